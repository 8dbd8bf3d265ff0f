//! UDP ingestion of classifier datagrams.

pub mod constants;
pub mod datagram_handler;
pub mod listener_config;
pub mod listener_error;
pub mod udp_listener;

pub use listener_config::ListenerConfig;
pub use listener_error::ListenerError;
pub use udp_listener::UdpListener;
