// Domain layer - Readings, forecasts and the rules that classify them
pub mod condition;
pub mod events;
pub mod forecast;
pub mod reading;
pub mod status;
