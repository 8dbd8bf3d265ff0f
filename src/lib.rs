//! wandlink receives gesture classifications from an external recognizer over
//! UDP and exposes them to a frame-driven consumer.
//!
//! It provides two binaries:
//! - `wand_monitor`: a window that starts the receiver and shows the live feed.
//! - `wand_sim`: a sender that emits synthetic classifier datagrams.
//!
//! The network side (listener and connection monitor) runs on its own threads
//! and publishes into a shared read model; the consumer polls that model once
//! per frame without blocking.

/// The `wand_monitor` window.
pub mod app;
/// Cooperative cancellation shared by the worker threads.
pub mod cancel_token;
/// Handles configuration loading and management.
pub mod config;
/// Connection state machine and its monitor thread.
pub mod connection;
/// Gesture samples and datagram decoding.
pub mod gesture;
/// UDP socket ownership and the receive loop.
pub mod listener;
/// Logging utilities for the application.
pub mod log;
/// Hold-to-brew matching and recipe progress.
pub mod matcher;
/// Minimal OSC parsing for Wekinator outputs.
pub mod osc;
/// Shared state read by the consumer each frame.
pub mod read_model;
/// Startup and teardown of the whole subsystem.
pub mod receiver;
