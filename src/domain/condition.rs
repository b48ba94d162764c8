// Weather condition classification
use super::reading::CurrentReading;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherCondition {
    Rainy,
    Cloudy,
    PartlyCloudy,
    Sunny,
}

impl WeatherCondition {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Sunny => "Sunny",
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            WeatherCondition::Rainy => Icon::Rainy,
            WeatherCondition::Cloudy => Icon::Cloudy,
            WeatherCondition::PartlyCloudy => Icon::PartlyCloudy,
            WeatherCondition::Sunny => Icon::Sunny,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Sunny,
    Cloudy,
    Rainy,
    PartlyCloudy,
    Humidity,
    Pressure,
}

/// Light-intensity cut-offs (raw sensor units)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConditionThresholds {
    pub cloudy_below: f64,
    pub partly_cloudy_below: f64,
}

impl Default for ConditionThresholds {
    fn default() -> Self {
        Self {
            cloudy_below: 50.0,
            partly_cloudy_below: 400.0,
        }
    }
}

/// Rain wins over everything, then light decides.
pub fn classify_condition(reading: &CurrentReading, thresholds: &ConditionThresholds) -> WeatherCondition {
    if reading.rain_detected {
        WeatherCondition::Rainy
    } else if reading.light_intensity < thresholds.cloudy_below {
        WeatherCondition::Cloudy
    } else if reading.light_intensity < thresholds.partly_cloudy_below {
        WeatherCondition::PartlyCloudy
    } else {
        WeatherCondition::Sunny
    }
}
