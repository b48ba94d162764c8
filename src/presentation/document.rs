// In-memory document the presenter renders into and the HTTP layer reads from
use crate::application::view::{self, ChartFrame, View, ViewError};
use crate::domain::condition::Icon;
use crate::domain::forecast::ChartSelection;
use crate::domain::reading::CurrentReading;
use crate::domain::status::ConnectionStatus;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const ICON_ANCHORS: [&str; 3] = [view::MAIN_WEATHER_ICON, view::HUMIDITY_ICON, view::PRESSURE_ICON];

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusRegion {
    pub text: String,
    pub class: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSnapshot {
    pub texts: BTreeMap<String, String>,
    pub icons: BTreeMap<String, Option<Icon>>,
    pub status: StatusRegion,
    pub chart: Option<ChartFrame>,
    pub placeholder: Option<String>,
    pub active_chart: ChartSelection,
}

impl DocumentSnapshot {
    fn with_anchors() -> Self {
        let mut texts: BTreeMap<String, String> = CurrentReading::default()
            .display_fields()
            .iter()
            .map(|(format, _)| (format.element_id.to_string(), String::new()))
            .collect();
        for id in [view::TIME, view::DATE, view::WEATHER_CONDITION] {
            texts.insert(id.to_string(), String::new());
        }

        Self {
            texts,
            icons: ICON_ANCHORS.iter().map(|id| (id.to_string(), None)).collect(),
            status: StatusRegion::default(),
            chart: None,
            placeholder: None,
            active_chart: ChartSelection::default(),
        }
    }
}

/// Cheap-to-clone handle; clones share the same document
#[derive(Debug, Clone)]
pub struct DocumentView {
    inner: Arc<RwLock<DocumentSnapshot>>,
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentView {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DocumentSnapshot::with_anchors())),
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentSnapshot> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentSnapshot> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl View for DocumentView {
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), ViewError> {
        let mut doc = self.write();
        let slot = doc
            .texts
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))?;
        *slot = text.to_string();
        Ok(())
    }

    fn set_icon(&mut self, id: &str, icon: Icon) -> Result<(), ViewError> {
        let mut doc = self.write();
        let slot = doc
            .icons
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))?;
        *slot = Some(icon);
        Ok(())
    }

    fn set_status(&mut self, status: ConnectionStatus, text: &str) -> Result<(), ViewError> {
        let mut doc = self.write();
        doc.status.text = text.to_string();
        doc.status.class = Some(status.css_class());
        Ok(())
    }

    fn show_chart(&mut self, frame: &ChartFrame) {
        let mut doc = self.write();
        doc.chart = Some(frame.clone());
        doc.placeholder = None;
    }

    fn hide_chart(&mut self, placeholder: &str) {
        let mut doc = self.write();
        doc.chart = None;
        doc.placeholder = Some(placeholder.to_string());
    }

    fn set_active_toggle(&mut self, selection: ChartSelection) {
        self.write().active_chart = selection;
    }
}
