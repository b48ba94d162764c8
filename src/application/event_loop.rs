// Single task that owns the presenter and serializes all UI work
use crate::application::presenter::DashboardPresenter;
use crate::application::view::View;
use crate::domain::events::ChannelEvent;
use std::time::Duration;
use tokio::sync::mpsc;

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// User input forwarded from the HTTP surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    ToggleChart(String),
}

/// Drive the presenter from channel events, user commands and clock ticks.
/// Returns the presenter once both input channels have closed.
pub async fn run_event_loop<V: View>(
    mut presenter: DashboardPresenter<V>,
    mut events: mpsc::Receiver<ChannelEvent>,
    mut commands: mpsc::Receiver<UiCommand>,
    clock_period: Duration,
) -> DashboardPresenter<V> {
    let mut clock = tokio::time::interval(clock_period);
    clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut events_open = true;
    let mut commands_open = true;

    while events_open || commands_open {
        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => presenter.handle(event, local_now()),
                None => {
                    tracing::info!("Push channel closed");
                    events_open = false;
                }
            },
            command = commands.recv(), if commands_open => match command {
                Some(UiCommand::ToggleChart(metric)) => {
                    presenter.toggle_chart(&metric);
                }
                None => commands_open = false,
            },
            _ = clock.tick() => presenter.tick(local_now()),
        }
    }

    presenter
}

fn local_now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
