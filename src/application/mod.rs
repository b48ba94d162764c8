// Application layer - Presenter, chart, clock and the loop that drives them
pub mod chart;
pub mod clock;
pub mod event_loop;
pub mod presenter;
pub mod view;
