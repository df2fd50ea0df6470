// Domain layer - immutable measurement, trend, and chart data models
pub mod chart;
pub mod error;
pub mod precision;
pub mod record;
pub mod trend;
