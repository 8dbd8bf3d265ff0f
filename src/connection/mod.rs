//! Connection health derived from packet arrival times.

pub mod connection_monitor;
pub mod connection_state;
pub mod monitor_worker;

pub use connection_monitor::ConnectionMonitor;
pub use connection_state::ConnectionState;
pub use monitor_worker::spawn_monitor_worker;
