/// Port the recognizer sends to by default.
pub const DEFAULT_PORT: u16 = 5052;
/// Field separator of the delimited wire format.
pub const DEFAULT_SEPARATOR: char = '|';
/// Seconds the feed may stay silent at startup before it is reported down.
pub const DEFAULT_WARMUP_SECS: f32 = 5.0;
/// Seconds without a datagram after which a connected feed is reported down.
pub const DEFAULT_LIVENESS_TIMEOUT_SECS: f32 = 5.0;
/// Seconds between liveness checks.
pub const DEFAULT_POLL_INTERVAL_SECS: f32 = 2.0;
/// Pause after a failed receive before trying again.
pub const RECEIVE_BACKOFF_MILLIS: u64 = 1_000;
/// Read timeout of the socket; bounds how long cancellation can go unnoticed.
pub const SOCKET_READ_TIMEOUT_MILLIS: u64 = 100;
/// Receive buffer size. Large enough for any IPv4 UDP payload.
pub const MAX_DATAGRAM_SIZE: usize = 65_536;
