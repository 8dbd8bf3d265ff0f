use crate::connection::ConnectionState;

/// Non-blocking read API polled by gameplay code once per frame.
///
/// Before the first datagram implementations return an empty label,
/// zero confidence and [`ConnectionState::Waiting`].
pub trait GestureSource: Send + Sync {
    fn gesture(&self) -> String;
    fn confidence(&self) -> f32;
    fn connection_state(&self) -> ConnectionState;
}
