//! Owns the UI state and the request lifecycle around a lookup.
//!
//! Every submit is issued a [`Ticket`] carrying a sequence number. Only the
//! ticket issued last may change the state when it resolves; anything older
//! is dropped as stale, so the most recently *submitted* query always wins
//! regardless of the order in which responses arrive.

use tracing::{debug, info, warn};

use crate::{
    model::WeatherResult,
    provider::{FetchError, WeatherProvider},
};

/// Shown for every failed lookup, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str =
    r#"Unable to fetch weather. Try "Mumbai", "Delhi", or "Bangalore""#;

/// Everything the renderer needs.
///
/// `result` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub query: String,
    pub result: Option<WeatherResult>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    query: String,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct Controller {
    state: UiState,
    last_issued: u64,
}

impl Controller {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            state: UiState { query: query.into(), ..UiState::default() },
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.loading {
            Phase::Loading
        } else if self.state.result.is_some() {
            Phase::Success
        } else if self.state.error.is_some() {
            Phase::Failure
        } else {
            Phase::Idle
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Start a lookup for the current query.
    ///
    /// Returns `None` and leaves the state untouched when the query is empty.
    pub fn begin_submit(&mut self) -> Option<Ticket> {
        if self.state.query.is_empty() {
            return None;
        }

        self.last_issued += 1;
        self.state.loading = true;
        self.state.error = None;

        debug!(seq = self.last_issued, query = %self.state.query, "lookup started");
        Some(Ticket { seq: self.last_issued, query: self.state.query.clone() })
    }

    /// Apply the outcome of a lookup, unless a newer one has been issued since.
    pub fn resolve(
        &mut self,
        ticket: &Ticket,
        outcome: Result<WeatherResult, FetchError>,
    ) -> Resolution {
        if ticket.seq != self.last_issued {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                query = %ticket.query,
                "discarding stale lookup"
            );
            return Resolution::Stale;
        }

        match outcome {
            Ok(result) => {
                info!(query = %ticket.query, "lookup succeeded");
                self.state.result = Some(result);
                self.state.error = None;
            }
            Err(err) => {
                warn!(query = %ticket.query, error = %err, "lookup failed");
                self.state.result = None;
                self.state.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        self.state.loading = false;

        Resolution::Applied
    }

    /// Submit the current query and wait for it to resolve.
    ///
    /// Returns `None` when the query is empty.
    pub async fn submit<P>(&mut self, provider: &P) -> Option<Resolution>
    where
        P: WeatherProvider + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let outcome = provider.current(ticket.query()).await;
        Some(self.resolve(&ticket, outcome))
    }
}
