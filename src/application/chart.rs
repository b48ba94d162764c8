// Forecast chart renderer
use crate::application::view::{ChartFrame, View, FORECAST_PLACEHOLDER_TEXT};
use crate::domain::forecast::{ChartSelection, ForecastSeries};

/// Owns the single chart instance. The frame is created once and
/// mutated in place on every redraw.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    frame: ChartFrame,
    visible: bool,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Redraw from `series` using the metric picked by `selection`.
    /// An absent or empty series hides the chart behind the placeholder.
    pub fn render<V: View>(
        &mut self,
        view: &mut V,
        series: Option<&ForecastSeries>,
        selection: ChartSelection,
    ) {
        let Some(series) = series.filter(|s| !s.is_empty()) else {
            self.clear();
            view.hide_chart(FORECAST_PLACEHOLDER_TEXT);
            return;
        };

        let style = selection.style();
        self.frame.labels = series.labels();
        self.frame.values = series.project(selection);
        self.frame.tooltips = self.frame.values.iter().map(|v| style.tooltip(*v)).collect();
        self.frame.label = style.label.to_string();
        self.frame.unit = style.unit.to_string();
        self.frame.border_color = style.border_color.to_string();
        self.frame.fill_color = style.fill_color.to_string();
        self.frame.y_min = style.y_min;
        self.frame.y_max = style.y_max;
        self.visible = true;

        tracing::debug!(
            "Chart redrawn: {} with {} points",
            selection,
            self.frame.labels.len()
        );
        view.show_chart(&self.frame);
    }

    fn clear(&mut self) {
        self.frame.labels.clear();
        self.frame.values.clear();
        self.frame.tooltips.clear();
        self.visible = false;
    }
}
