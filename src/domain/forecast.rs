// Forecast domain models
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: String,
    pub temp: f64,
    pub precipitation: f64,
    pub aqi: f64,
}

/// Ordered, time-labelled forecast. Replaced wholesale on every push.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.time.clone()).collect()
    }

    /// Values of one metric, parallel to `labels()`
    pub fn project(&self, selection: ChartSelection) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| match selection {
                ChartSelection::Temperature => p.temp,
                ChartSelection::Precipitation => p.precipitation,
                ChartSelection::AirQuality => p.aqi,
            })
            .collect()
    }
}

/// Serialized as the toggle control's metric-type attribute, the same
/// value `FromStr` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChartSelection {
    #[default]
    #[serde(rename = "temp")]
    Temperature,
    #[serde(rename = "precipitation")]
    Precipitation,
    #[serde(rename = "aqi")]
    AirQuality,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid chart selection: {0:?}")]
pub struct InvalidSelection(pub String);

impl ChartSelection {
    pub const ALL: [ChartSelection; 3] = [
        ChartSelection::Temperature,
        ChartSelection::Precipitation,
        ChartSelection::AirQuality,
    ];

    /// Value of the toggle control's metric-type attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartSelection::Temperature => "temp",
            ChartSelection::Precipitation => "precipitation",
            ChartSelection::AirQuality => "aqi",
        }
    }

    pub fn style(&self) -> MetricStyle {
        match self {
            ChartSelection::Temperature => MetricStyle {
                label: "Temperature",
                unit: "°C",
                border_color: "#f87171",
                fill_color: "rgba(248, 113, 113, 0.5)",
                y_min: -10.0,
                y_max: 50.0,
            },
            ChartSelection::Precipitation => MetricStyle {
                label: "Precipitation",
                unit: "%",
                border_color: "#60a5fa",
                fill_color: "rgba(96, 165, 250, 0.5)",
                y_min: 0.0,
                y_max: 100.0,
            },
            ChartSelection::AirQuality => MetricStyle {
                label: "AQI",
                unit: "",
                border_color: "#facc15",
                fill_color: "rgba(250, 204, 21, 0.5)",
                y_min: 0.0,
                y_max: 500.0,
            },
        }
    }
}

impl FromStr for ChartSelection {
    type Err = InvalidSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartSelection::ALL
            .into_iter()
            .find(|sel| sel.as_str() == s)
            .ok_or_else(|| InvalidSelection(s.to_string()))
    }
}

impl fmt::Display for ChartSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis bounds, unit and colors for one chart metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStyle {
    pub label: &'static str,
    pub unit: &'static str,
    pub border_color: &'static str,
    pub fill_color: &'static str,
    pub y_min: f64,
    pub y_max: f64,
}

impl MetricStyle {
    /// Tooltip text for a single data point, e.g. "Temperature: 21.4 °C"
    pub fn tooltip(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format!("{}: {:.1}", self.label, value)
        } else {
            format!("{}: {:.1} {}", self.label, value, self.unit)
        }
    }
}
