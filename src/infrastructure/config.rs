use crate::domain::condition::ConditionThresholds;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub channel: ChannelSettings,
    pub server: ServerSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelSettings {
    pub url: String,
    pub reconnect_delay_secs: u64,
}

impl ChannelSettings {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub cloudy_below_lux: f64,
    pub partly_cloudy_below_lux: f64,
}

impl DisplaySettings {
    pub fn thresholds(&self) -> ConditionThresholds {
        ConditionThresholds {
            cloudy_below: self.cloudy_below_lux,
            partly_cloudy_below: self.partly_cloudy_below_lux,
        }
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let thresholds = ConditionThresholds::default();
    Ok(config::Config::builder()
        .set_default("channel.url", "http://127.0.0.1:5000/events")?
        .set_default("channel.reconnect_delay_secs", 5)?
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("display.cloudy_below_lux", thresholds.cloudy_below)?
        .set_default("display.partly_cloudy_below_lux", thresholds.partly_cloudy_below)?)
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__SECTION__KEY`
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &DashboardConfig) -> anyhow::Result<()> {
    let display = &config.display;
    if display.cloudy_below_lux > display.partly_cloudy_below_lux {
        anyhow::bail!(
            "display.cloudy_below_lux ({}) must not exceed display.partly_cloudy_below_lux ({})",
            display.cloudy_below_lux,
            display.partly_cloudy_below_lux
        );
    }
    if config.channel.url.is_empty() {
        anyhow::bail!("channel.url must not be empty");
    }
    Ok(())
}
