//! Interactive session: input lines are submits, lookups run concurrently and
//! the screen is redrawn after every state change.

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    task::{Id, JoinError, JoinSet},
};
use tracing::error;
use weathercard_core::{
    Controller, FetchError, Resolution, Ticket, WeatherProvider, WeatherResult, render,
};

type Lookup = Result<WeatherResult, FetchError>;

const HINT: &str = "Type a city and press Enter (:q to quit)";

/// Runs until `:q`, or until the input ends and every pending lookup has
/// resolved.
pub async fn run<R, W>(
    provider: Arc<dyn WeatherProvider>,
    query: String,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session {
        controller: Controller::new(query),
        provider,
        in_flight: JoinSet::new(),
        tickets: HashMap::new(),
    };
    let mut lines = input.lines();
    let mut input_open = true;

    session.submit();
    draw(output, &session.controller).await?;

    while input_open || !session.in_flight.is_empty() {
        let changed = tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    None => {
                        input_open = false;
                        false
                    }
                    Some(line) if is_quit(&line) => break,
                    Some(line) => {
                        session.controller.set_query(line);
                        session.submit()
                    }
                }
            }
            Some(joined) = session.in_flight.join_next_with_id(), if !session.in_flight.is_empty() => {
                session.complete(joined)
            }
            else => break,
        };

        if changed {
            draw(output, &session.controller).await?;
        }
    }

    Ok(())
}

struct Session {
    controller: Controller,
    provider: Arc<dyn WeatherProvider>,
    in_flight: JoinSet<Lookup>,
    tickets: HashMap<Id, Ticket>,
}

impl Session {
    /// Returns `false` when the query was empty and nothing was started.
    fn submit(&mut self) -> bool {
        let Some(ticket) = self.controller.begin_submit() else {
            return false;
        };

        let provider = Arc::clone(&self.provider);
        let query = ticket.query().to_owned();
        let handle = self.in_flight.spawn(async move { provider.current(&query).await });
        self.tickets.insert(handle.id(), ticket);
        true
    }

    /// Returns `true` when the outcome changed the state.
    fn complete(&mut self, joined: Result<(Id, Lookup), JoinError>) -> bool {
        let (id, outcome) = match joined {
            Ok(done) => done,
            Err(e) => {
                error!(error = %e, "lookup task did not complete");
                (e.id(), Err(FetchError::Interrupted(e.to_string())))
            }
        };

        let Some(ticket) = self.tickets.remove(&id) else {
            return false;
        };
        self.controller.resolve(&ticket, outcome) == Resolution::Applied
    }
}

async fn draw<W>(output: &mut W, controller: &Controller) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = format!("\n{}{HINT}\n", render(controller.state()));
    output.write_all(frame.as_bytes()).await.context("Failed to write frame")?;
    output.flush().await.context("Failed to flush output")?;
    Ok(())
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), ":q" | ":quit")
}
