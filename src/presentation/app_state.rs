// Application state for HTTP handlers
use crate::application::event_loop::UiCommand;
use crate::presentation::document::DocumentView;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub document: DocumentView,
    pub commands: mpsc::Sender<UiCommand>,
}
