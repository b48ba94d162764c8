// Current sensor reading domain model
use serde::{Deserialize, Serialize};

/// Latest reading pushed by the sensor backend. Superseded by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    #[serde(alias = "temperature")]
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub aqi: f64,
    pub light_intensity: f64,
    pub rain_detected: bool,
    pub co: f64,
    pub nh3: f64,
    pub co2: f64,
    pub alcohol: f64,
    pub lpg: f64,
    pub ch4: f64,
}

impl Default for CurrentReading {
    fn default() -> Self {
        Self {
            temp: 0.0,
            humidity: 0.0,
            pressure: 0.0,
            aqi: 0.0,
            light_intensity: 0.0,
            rain_detected: false,
            co: 0.0,
            nh3: 0.0,
            co2: 0.0,
            alcohol: 0.0,
            lpg: 0.0,
            ch4: 0.0,
        }
    }
}

/// How a numeric field is rendered into its display anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldFormat {
    pub element_id: &'static str,
    pub decimals: usize,
    pub suffix: &'static str,
}

impl FieldFormat {
    const fn new(element_id: &'static str, decimals: usize, suffix: &'static str) -> Self {
        Self {
            element_id,
            decimals,
            suffix,
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}{}", self.decimals, value, self.suffix)
    }
}

impl CurrentReading {
    /// Every numeric field paired with its display format, in render order
    pub fn display_fields(&self) -> [(FieldFormat, f64); 11] {
        [
            (FieldFormat::new("current-temp", 1, "°"), self.temp),
            (FieldFormat::new("current-humidity", 1, "%"), self.humidity),
            (FieldFormat::new("current-pressure", 0, ""), self.pressure),
            (FieldFormat::new("current-aqi", 0, ""), self.aqi),
            (FieldFormat::new("current-light", 0, ""), self.light_intensity),
            (FieldFormat::new("current-co", 1, ""), self.co),
            (FieldFormat::new("current-nh3", 1, ""), self.nh3),
            (FieldFormat::new("current-co2", 0, ""), self.co2),
            (FieldFormat::new("current-alcohol", 2, ""), self.alcohol),
            (FieldFormat::new("current-lpg", 1, ""), self.lpg),
            (FieldFormat::new("current-ch4", 1, ""), self.ch4),
        ]
    }

    /// JSON carries no NaN, but a reading built in code might
    pub fn is_finite(&self) -> bool {
        self.display_fields().iter().all(|(_, v)| v.is_finite())
    }
}
