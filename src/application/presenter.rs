// Dashboard presenter - Maps channel events and user input onto the view
use crate::application::chart::ChartRenderer;
use crate::application::clock::{Clock, ClockText};
use crate::application::view::{self, View, ViewError};
use crate::domain::condition::{classify_condition, ConditionThresholds, Icon};
use crate::domain::events::{ChannelEvent, StatusMessage};
use crate::domain::forecast::{ChartSelection, ForecastSeries};
use crate::domain::reading::CurrentReading;
use crate::domain::status::{classify_status, ConnectionStatus};
use chrono::NaiveDateTime;

const CONNECTING_TEXT: &str = "Connecting to server...";
const CONNECTED_TEXT: &str = "Connected to server.";
const DISCONNECTED_TEXT: &str = "Disconnected from server.";

pub struct DashboardPresenter<V: View> {
    view: V,
    thresholds: ConditionThresholds,
    chart: ChartRenderer,
    clock: Clock,
    selection: ChartSelection,
    forecast: Option<ForecastSeries>,
    status: Option<ConnectionStatus>,
}

impl<V: View> DashboardPresenter<V> {
    pub fn new(view: V, thresholds: ConditionThresholds) -> Self {
        Self {
            view,
            thresholds,
            chart: ChartRenderer::new(),
            clock: Clock::new(),
            selection: ChartSelection::default(),
            forecast: None,
            status: None,
        }
    }

    /// Initial page state: static icons, default readings, hidden chart
    /// and a pending status until the channel reports in
    pub fn mount(&mut self) {
        report(self.view.set_status(ConnectionStatus::Predicting, CONNECTING_TEXT));
        self.put_icon(view::HUMIDITY_ICON, Icon::Humidity);
        self.put_icon(view::PRESSURE_ICON, Icon::Pressure);
        self.view.set_active_toggle(self.selection);
        self.show_defaults();
    }

    pub fn handle(&mut self, event: ChannelEvent, now: NaiveDateTime) {
        tracing::debug!("Handling {} event", event.name());
        match event {
            ChannelEvent::Connect => self.on_connect(now),
            ChannelEvent::Disconnect => self.on_disconnect(),
            ChannelEvent::Status(status) => self.on_status(&status, now),
            ChannelEvent::CurrentData(reading) => self.on_current_data(&reading),
            ChannelEvent::NewForecast(series) => self.on_forecast(series),
        }
    }

    pub fn on_connect(&mut self, now: NaiveDateTime) {
        tracing::info!("Push channel connected");
        self.apply_status(ConnectionStatus::Connected, CONNECTED_TEXT, now);
    }

    pub fn on_disconnect(&mut self) {
        tracing::warn!("Push channel disconnected");
        self.status = Some(ConnectionStatus::Error);
        report(self.view.set_status(ConnectionStatus::Error, DISCONNECTED_TEXT));
    }

    pub fn on_status(&mut self, message: &StatusMessage, now: NaiveDateTime) {
        let status = message.state.unwrap_or_else(|| classify_status(&message.msg));
        tracing::debug!("Status {:?}: {}", status, message.msg);
        self.apply_status(status, &message.msg, now);
        if status == ConnectionStatus::Error {
            self.forecast = None;
            self.show_defaults();
        }
    }

    pub fn on_current_data(&mut self, reading: &CurrentReading) {
        self.render_reading(reading);
    }

    pub fn on_forecast(&mut self, series: ForecastSeries) {
        tracing::info!("Received forecast with {} points", series.len());
        self.forecast = Some(series);
        self.redraw_chart();
    }

    /// Switch the charted metric. Unknown metric names leave the selection unchanged.
    pub fn toggle_chart(&mut self, metric: &str) -> bool {
        match metric.parse::<ChartSelection>() {
            Ok(selection) => {
                self.selection = selection;
                self.view.set_active_toggle(selection);
                self.redraw_chart();
                true
            }
            Err(e) => {
                tracing::warn!("Ignoring chart toggle: {}", e);
                false
            }
        }
    }

    /// Clock tick; renders only once the clock has been started
    pub fn tick(&mut self, now: NaiveDateTime) {
        if self.clock.is_running() {
            self.render_clock(&Clock::format(&now));
        }
    }

    fn apply_status(&mut self, status: ConnectionStatus, text: &str, now: NaiveDateTime) {
        self.status = Some(status);
        report(self.view.set_status(status, text));
        if status == ConnectionStatus::Connected && self.clock.start() {
            tracing::info!("Starting live clock");
            self.render_clock(&Clock::format(&now));
        }
    }

    fn show_defaults(&mut self) {
        if !self.clock.is_running() {
            self.render_clock(&Clock::placeholder());
        }
        self.render_reading(&CurrentReading::default());
        self.redraw_chart();
    }

    fn render_reading(&mut self, reading: &CurrentReading) {
        let condition = classify_condition(reading, &self.thresholds);
        for (format, value) in reading.display_fields() {
            self.put_text(format.element_id, &format.format(value));
        }
        self.put_text(view::WEATHER_CONDITION, condition.label());
        self.put_icon(view::MAIN_WEATHER_ICON, condition.icon());
    }

    fn render_clock(&mut self, text: &ClockText) {
        self.put_text(view::TIME, &text.time);
        self.put_text(view::DATE, &text.date);
    }

    fn redraw_chart(&mut self) {
        self.chart
            .render(&mut self.view, self.forecast.as_ref(), self.selection);
    }

    fn put_text(&mut self, id: &str, text: &str) {
        report(self.view.set_text(id, text));
    }

    fn put_icon(&mut self, id: &str, icon: Icon) {
        report(self.view.set_icon(id, icon));
    }
}

#[cfg(test)]
impl<V: View> DashboardPresenter<V> {
    pub fn selection(&self) -> ChartSelection {
        self.selection
    }

    pub fn status(&self) -> Option<ConnectionStatus> {
        self.status
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        self.forecast.as_ref()
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

fn report(result: Result<(), ViewError>) {
    if let Err(e) = result {
        tracing::debug!("Skipping view update: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::view::ChartFrame;
    use crate::domain::forecast::ForecastPoint;
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct RecordingView {
        texts: HashMap<String, String>,
        icons: HashMap<String, Icon>,
        status: Option<(ConnectionStatus, String)>,
        chart: Option<ChartFrame>,
        placeholder: Option<String>,
        active: Option<ChartSelection>,
        missing: HashSet<String>,
    }

    impl RecordingView {
        fn text(&self, id: &str) -> &str {
            self.texts.get(id).map(String::as_str).unwrap_or("")
        }
    }

    impl View for RecordingView {
        fn set_text(&mut self, id: &str, text: &str) -> Result<(), ViewError> {
            if self.missing.contains(id) {
                return Err(ViewError::MissingElement(id.to_string()));
            }
            self.texts.insert(id.to_string(), text.to_string());
            Ok(())
        }

        fn set_icon(&mut self, id: &str, icon: Icon) -> Result<(), ViewError> {
            self.icons.insert(id.to_string(), icon);
            Ok(())
        }

        fn set_status(&mut self, status: ConnectionStatus, text: &str) -> Result<(), ViewError> {
            self.status = Some((status, text.to_string()));
            Ok(())
        }

        fn show_chart(&mut self, frame: &ChartFrame) {
            self.chart = Some(frame.clone());
            self.placeholder = None;
        }

        fn hide_chart(&mut self, placeholder: &str) {
            self.chart = None;
            self.placeholder = Some(placeholder.to_string());
        }

        fn set_active_toggle(&mut self, selection: ChartSelection) {
            self.active = Some(selection);
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn presenter() -> DashboardPresenter<RecordingView> {
        let mut p = DashboardPresenter::new(RecordingView::default(), ConditionThresholds::default());
        p.mount();
        p
    }

    fn sample_reading() -> CurrentReading {
        CurrentReading {
            temp: 22.3,
            humidity: 55.0,
            pressure: 1012.0,
            aqi: 42.0,
            light_intensity: 300.0,
            rain_detected: false,
            co: 0.1,
            nh3: 0.2,
            co2: 410.0,
            alcohol: 0.01,
            lpg: 0.3,
            ch4: 0.4,
        }
    }

    fn sample_series() -> ForecastSeries {
        ForecastSeries::new(
            [("14:00", 21.0, 10.0, 40.0), ("16:00", 22.0, 20.0, 45.0), ("18:00", 19.5, 35.0, 60.0)]
                .into_iter()
                .map(|(time, temp, precipitation, aqi)| ForecastPoint {
                    time: time.to_string(),
                    temp,
                    precipitation,
                    aqi,
                })
                .collect(),
        )
    }

    fn status(msg: &str) -> StatusMessage {
        StatusMessage {
            msg: msg.to_string(),
            state: None,
        }
    }

    #[test]
    fn test_mount_shows_defaults() {
        let p = presenter();
        let v = p.view();
        assert_eq!(v.text("current-temp"), "0.0°");
        assert_eq!(v.text(view::TIME), "00:00");
        assert_eq!(v.text(view::DATE), "Saturday, January 1");
        assert_eq!(v.icons.get(view::HUMIDITY_ICON), Some(&Icon::Humidity));
        assert_eq!(v.icons.get(view::PRESSURE_ICON), Some(&Icon::Pressure));
        assert_eq!(v.active, Some(ChartSelection::Temperature));
        assert!(v.chart.is_none());
        assert_eq!(v.placeholder.as_deref(), Some(view::FORECAST_PLACEHOLDER_TEXT));
        assert_eq!(
            v.status,
            Some((ConnectionStatus::Predicting, CONNECTING_TEXT.to_string()))
        );
        assert_eq!(p.status(), None);
    }

    #[test]
    fn test_unreachable_server_after_mount_shows_disconnected() {
        let mut p = presenter();
        p.handle(ChannelEvent::Disconnect, at(9, 0));
        assert_eq!(
            p.view().status,
            Some((ConnectionStatus::Error, DISCONNECTED_TEXT.to_string()))
        );
        assert!(!p.clock_running());
    }

    #[test]
    fn test_current_data_renders_fields_and_condition() {
        let mut p = presenter();
        p.handle(ChannelEvent::CurrentData(sample_reading()), at(10, 0));
        let v = p.view();
        assert_eq!(v.text("current-temp"), "22.3°");
        assert_eq!(v.text("current-humidity"), "55.0%");
        assert_eq!(v.text("current-pressure"), "1012");
        assert_eq!(v.text("current-alcohol"), "0.01");
        assert_eq!(v.text(view::WEATHER_CONDITION), "Partly Cloudy");
        assert_eq!(v.icons.get(view::MAIN_WEATHER_ICON), Some(&Icon::PartlyCloudy));
    }

    #[test]
    fn test_rain_reading_is_rainy() {
        let mut p = presenter();
        let reading = CurrentReading {
            rain_detected: true,
            light_intensity: 900.0,
            ..sample_reading()
        };
        p.on_current_data(&reading);
        assert_eq!(p.view().text(view::WEATHER_CONDITION), "Rainy");
    }

    #[test]
    fn test_forecast_labels_match_series() {
        let mut p = presenter();
        p.on_forecast(sample_series());
        let frame = p.view().chart.clone().unwrap();
        assert_eq!(frame.labels, vec!["14:00", "16:00", "18:00"]);
        assert_eq!(frame.values, vec![21.0, 22.0, 19.5]);
        assert_eq!(frame.label, "Temperature");
        assert_eq!(frame.tooltips[1], "Temperature: 22.0 °C");
        assert_eq!((frame.y_min, frame.y_max), (-10.0, 50.0));
        assert!(p.view().placeholder.is_none());
        assert!(p.chart().is_visible());
    }

    #[test]
    fn test_empty_forecast_hides_chart() {
        let mut p = presenter();
        p.on_forecast(sample_series());
        p.on_forecast(ForecastSeries::default());
        assert!(p.view().chart.is_none());
        assert_eq!(p.view().placeholder.as_deref(), Some(view::FORECAST_PLACEHOLDER_TEXT));
        assert!(!p.chart().is_visible());
    }

    #[test]
    fn test_toggle_redraws_selected_metric() {
        let mut p = presenter();
        p.on_forecast(sample_series());
        assert!(p.toggle_chart("aqi"));
        let frame = p.view().chart.clone().unwrap();
        assert_eq!(frame.values, vec![40.0, 45.0, 60.0]);
        assert_eq!(frame.unit, "");
        assert_eq!(frame.y_max, 500.0);
        assert_eq!(p.view().active, Some(ChartSelection::AirQuality));

        assert!(p.toggle_chart("precipitation"));
        let frame = p.view().chart.clone().unwrap();
        assert_eq!(frame.values, vec![10.0, 20.0, 35.0]);
        assert_eq!(frame.unit, "%");
    }

    #[test]
    fn test_invalid_toggle_is_noop() {
        let mut p = presenter();
        p.on_forecast(sample_series());
        p.toggle_chart("precipitation");
        let before = p.view().chart.clone();
        assert!(!p.toggle_chart("humidity"));
        assert_eq!(p.selection(), ChartSelection::Precipitation);
        assert_eq!(p.view().active, Some(ChartSelection::Precipitation));
        assert_eq!(p.view().chart, before);
    }

    #[test]
    fn test_toggle_before_forecast_keeps_placeholder() {
        let mut p = presenter();
        assert!(p.toggle_chart("aqi"));
        assert!(p.view().chart.is_none());
        assert_eq!(p.selection(), ChartSelection::AirQuality);
    }

    #[test]
    fn test_sensor_not_detected_resets_to_defaults() {
        let mut p = presenter();
        p.on_current_data(&sample_reading());
        p.on_forecast(sample_series());
        p.handle(
            ChannelEvent::Status(status("Sensor not detected on /dev/ttyACM0. Retrying...")),
            at(10, 0),
        );
        let v = p.view();
        assert_eq!(p.status(), Some(ConnectionStatus::Error));
        assert_eq!(v.status.as_ref().unwrap().0, ConnectionStatus::Error);
        assert_eq!(v.text("current-temp"), "0.0°");
        assert_eq!(v.text("current-co2"), "0");
        assert_eq!(v.text(view::WEATHER_CONDITION), "Cloudy");
        assert!(v.chart.is_none());
        assert!(p.forecast().is_none());
    }

    #[test]
    fn test_clock_starts_on_first_connected_status() {
        let mut p = presenter();
        p.tick(at(10, 0));
        assert_eq!(p.view().text(view::TIME), "00:00");

        p.on_status(&status("Gathering data... 2/24"), at(10, 0));
        assert!(!p.clock_running());
        assert_eq!(p.status(), Some(ConnectionStatus::Predicting));

        p.on_status(&status("Connected to sensor on /dev/ttyACM0."), at(10, 1));
        assert!(p.clock_running());
        assert_eq!(p.view().text(view::TIME), "10:01");
        assert_eq!(p.view().text(view::DATE), "Friday, March 15");

        p.tick(at(10, 2));
        assert_eq!(p.view().text(view::TIME), "10:02");
    }

    #[test]
    fn test_clock_keeps_running_after_error() {
        let mut p = presenter();
        p.on_connect(at(8, 0));
        p.on_status(&status("Sensor not detected"), at(8, 1));
        assert_eq!(p.view().text(view::TIME), "08:00");
        p.tick(at(8, 2));
        assert_eq!(p.view().text(view::TIME), "08:02");
    }

    #[test]
    fn test_typed_state_overrides_text() {
        let mut p = presenter();
        p.on_status(
            &StatusMessage {
                msg: "Live prediction active.".to_string(),
                state: Some(ConnectionStatus::Predicting),
            },
            at(9, 0),
        );
        assert_eq!(p.status(), Some(ConnectionStatus::Predicting));
        assert!(!p.clock_running());
    }

    #[test]
    fn test_connect_and_disconnect() {
        let mut p = presenter();
        p.handle(ChannelEvent::Connect, at(12, 30));
        assert_eq!(p.status(), Some(ConnectionStatus::Connected));
        assert_eq!(p.view().text(view::TIME), "12:30");

        p.on_current_data(&sample_reading());
        p.handle(ChannelEvent::Disconnect, at(12, 31));
        assert_eq!(p.status(), Some(ConnectionStatus::Error));
        assert_eq!(p.view().status.as_ref().unwrap().1, DISCONNECTED_TEXT);
        assert_eq!(p.view().text("current-temp"), "22.3°");
    }

    #[test]
    fn test_missing_element_is_not_fatal() {
        let mut view = RecordingView::default();
        view.missing.insert("current-co".to_string());
        let mut p = DashboardPresenter::new(view, ConditionThresholds::default());
        p.on_current_data(&sample_reading());
        assert_eq!(p.view().text("current-co"), "");
        assert_eq!(p.view().text("current-ch4"), "0.4");
    }
}
