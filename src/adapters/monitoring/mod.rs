//! Background monitoring tasks.

mod health_monitor;

pub use health_monitor::{HealthMonitor, HealthMonitorConfig, MonitorHandle};
