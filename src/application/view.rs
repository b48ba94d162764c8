// Rendering surface the presenter draws onto
use crate::domain::condition::Icon;
use crate::domain::forecast::ChartSelection;
use crate::domain::status::ConnectionStatus;
use serde::Serialize;

pub const TIME: &str = "time";
pub const DATE: &str = "date";
pub const WEATHER_CONDITION: &str = "weather-condition";
pub const MAIN_WEATHER_ICON: &str = "main-weather-icon";
pub const HUMIDITY_ICON: &str = "humidity-icon";
pub const PRESSURE_ICON: &str = "pressure-icon";

pub const FORECAST_PLACEHOLDER_TEXT: &str = "Waiting for enough data to generate forecast...";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("no element with id {0:?}")]
    MissingElement(String),
}

/// One drawn state of the forecast chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub tooltips: Vec<String>,
    pub label: String,
    pub unit: String,
    pub border_color: String,
    pub fill_color: String,
    pub y_min: f64,
    pub y_max: f64,
}

/// Abstract display. Missing anchors are reported, never panicked on.
pub trait View {
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), ViewError>;

    fn set_icon(&mut self, id: &str, icon: Icon) -> Result<(), ViewError>;

    fn set_status(&mut self, status: ConnectionStatus, text: &str) -> Result<(), ViewError>;

    /// Show the chart canvas with `frame`, hiding the placeholder
    fn show_chart(&mut self, frame: &ChartFrame);

    /// Hide the chart canvas and show `placeholder` instead
    fn hide_chart(&mut self, placeholder: &str);

    fn set_active_toggle(&mut self, selection: ChartSelection);
}
