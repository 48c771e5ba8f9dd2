pub mod aggregate;
pub mod sanitize;
pub mod snapshot;
pub mod state;

pub use aggregate::hourly_series;
pub use snapshot::SensorSnapshot;
pub use state::DashboardState;
