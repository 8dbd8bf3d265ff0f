//! The hand-off point between network threads and the frame loop.

pub mod gesture_source;
pub mod shared_read_model;

pub use gesture_source::GestureSource;
pub use shared_read_model::{PacketStats, ReadSnapshot, SharedReadModel};
