// Push channel events consumed by the dashboard
use super::forecast::{ForecastPoint, ForecastSeries};
use super::reading::CurrentReading;
use super::status::ConnectionStatus;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connect,
    Disconnect,
    Status(StatusMessage),
    CurrentData(CurrentReading),
    NewForecast(ForecastSeries),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusMessage {
    pub msg: String,
    /// Typed status from backends that send one; takes precedence over `msg`
    #[serde(default)]
    pub state: Option<ConnectionStatus>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    forecast: Vec<ForecastPoint>,
}

#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    #[error("unknown event {0:?}")]
    UnknownEvent(String),

    #[error("malformed {event} payload: {source}")]
    Malformed {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{event} payload contains non-finite values")]
    NonFinite { event: &'static str },
}

impl ChannelEvent {
    /// Decode a named event and its JSON payload
    pub fn decode(name: &str, data: &str) -> Result<Self, EventDecodeError> {
        match name {
            "connect" => Ok(ChannelEvent::Connect),
            "disconnect" => Ok(ChannelEvent::Disconnect),
            "status" => parse::<StatusMessage>("status", data).map(ChannelEvent::Status),
            "current_data" => {
                let reading = parse::<CurrentReading>("current_data", data)?;
                if !reading.is_finite() {
                    return Err(EventDecodeError::NonFinite { event: "current_data" });
                }
                Ok(ChannelEvent::CurrentData(reading))
            }
            "new_forecast" => {
                let payload = parse::<ForecastPayload>("new_forecast", data)?;
                let finite = payload
                    .forecast
                    .iter()
                    .all(|p| p.temp.is_finite() && p.precipitation.is_finite() && p.aqi.is_finite());
                if !finite {
                    return Err(EventDecodeError::NonFinite { event: "new_forecast" });
                }
                Ok(ChannelEvent::NewForecast(ForecastSeries::new(payload.forecast)))
            }
            other => Err(EventDecodeError::UnknownEvent(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Connect => "connect",
            ChannelEvent::Disconnect => "disconnect",
            ChannelEvent::Status(_) => "status",
            ChannelEvent::CurrentData(_) => "current_data",
            ChannelEvent::NewForecast(_) => "new_forecast",
        }
    }
}

fn parse<'a, T: Deserialize<'a>>(event: &'static str, data: &'a str) -> Result<T, EventDecodeError> {
    serde_json::from_str(data).map_err(|source| EventDecodeError::Malformed { event, source })
}
