use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Body of a weatherapi.com `current.json` response.
///
/// The body is not validated. Missing, `null` or oddly typed fields become
/// `None` (numbers sent as strings are still read as numbers) and the
/// renderer deals with the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherResult {
    #[serde(deserialize_with = "lenient")]
    pub location: Location,
    #[serde(deserialize_with = "lenient")]
    pub current: Current,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub country: Option<String>,
    /// Local time at the location, e.g. `2024-01-15 12:00`.
    #[serde(deserialize_with = "text")]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    #[serde(deserialize_with = "number")]
    pub temp_c: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub feelslike_c: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub condition: Condition,
    #[serde(deserialize_with = "number")]
    pub wind_kph: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub humidity: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub vis_km: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub pressure_mb: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "text")]
    pub text: Option<String>,
}

impl WeatherResult {
    /// Reads whatever JSON document the service returned. Never fails: a
    /// document that is not an object yields an empty result.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn condition_text(&self) -> Option<&str> {
        self.current.condition.text.as_deref()
    }
}

/// Nested object that falls back to its default when it is `null` or not an object.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
        _ => None,
    })
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_current_body() {
        let body = r#"{
            "location": {"name": "Mumbai", "country": "India", "localtime": "2024-01-15 12:00"},
            "current": {
                "temp_c": 31.2, "feelslike_c": 35.0,
                "condition": {"text": "Sunny", "code": 1000},
                "wind_kph": 13.0, "humidity": 62, "vis_km": 10.0, "pressure_mb": 1011.0
            }
        }"#;

        let parsed: WeatherResult = serde_json::from_str(body).expect("body should parse");
        assert_eq!(parsed.location.name.as_deref(), Some("Mumbai"));
        assert_eq!(parsed.current.humidity, Some(62.0));
        assert_eq!(parsed.condition_text(), Some("Sunny"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let parsed: WeatherResult =
            serde_json::from_str(r#"{"location": {"name": "London"}}"#).expect("should parse");

        assert_eq!(parsed.location.name.as_deref(), Some("London"));
        assert_eq!(parsed.location.country, None);
        assert_eq!(parsed.current, Current::default());
        assert_eq!(parsed.condition_text(), None);
    }

    #[test]
    fn any_json_object_parses() {
        let parsed: WeatherResult = serde_json::from_str("{}").expect("should parse");
        assert_eq!(parsed, WeatherResult::default());
    }

    #[test]
    fn numbers_sent_as_strings_are_read() {
        let parsed = WeatherResult::from_json(serde_json::json!({
            "location": {"name": "London", "country": "UK"},
            "current": {"temp_c": "18", "humidity": " 62 ", "wind_kph": "fast"}
        }));

        assert_eq!(parsed.current.temp_c, Some(18.0));
        assert_eq!(parsed.current.humidity, Some(62.0));
        assert_eq!(parsed.current.wind_kph, None);
    }

    #[test]
    fn null_and_mistyped_sections_become_empty() {
        let parsed = WeatherResult::from_json(serde_json::json!({
            "location": null,
            "current": {"temp_c": 18, "condition": "Sunny"}
        }));

        assert_eq!(parsed.location, Location::default());
        assert_eq!(parsed.current.temp_c, Some(18.0));
        assert_eq!(parsed.condition_text(), None);
    }

    #[test]
    fn mistyped_text_fields_are_kept_or_dropped() {
        let parsed = WeatherResult::from_json(serde_json::json!({
            "location": {"name": 42, "country": ["UK"], "localtime": null}
        }));

        assert_eq!(parsed.location.name.as_deref(), Some("42"));
        assert_eq!(parsed.location.country, None);
        assert_eq!(parsed.location.localtime, None);
    }

    #[test]
    fn non_object_documents_yield_empty_result() {
        assert_eq!(WeatherResult::from_json(serde_json::json!([1, 2])), WeatherResult::default());
        assert_eq!(WeatherResult::from_json(Value::Null), WeatherResult::default());
    }
}
