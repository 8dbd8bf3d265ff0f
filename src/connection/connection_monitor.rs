use std::time::{Duration, Instant};

use crate::{connection::ConnectionState, listener::ListenerConfig};

/// Time-driven half of the connection state machine.
///
/// Arrival-driven transitions (`Waiting`/`Disconnected` -> `Connected`) are
/// applied by the listener the moment a datagram lands; this type only
/// decides when silence turns into `Disconnected`:
///
/// - `Waiting -> Disconnected` once the warm-up interval has passed with no
///   datagram at all. Checked on every tick.
/// - `Connected -> Disconnected` when, at a liveness check, the last datagram
///   is older than the liveness timeout. Liveness checks run once per poll
///   interval and never before warm-up has elapsed.
#[derive(Debug, Clone)]
pub struct ConnectionMonitor {
    started_at: Instant,
    warmup: Duration,
    liveness_timeout: Duration,
    poll_interval: Duration,
    last_liveness_check: Instant,
}

impl ConnectionMonitor {
    pub fn new(
        started_at: Instant,
        warmup: Duration,
        liveness_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            started_at,
            warmup,
            liveness_timeout,
            poll_interval,
            last_liveness_check: started_at,
        }
    }

    pub fn from_config(config: &ListenerConfig, started_at: Instant) -> Self {
        Self::new(
            started_at,
            config.warmup,
            config.liveness_timeout,
            config.poll_interval,
        )
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn warmup_elapsed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.warmup
    }

    /// Evaluates the elapsed-time rules at `now` and returns the state that
    /// should be published. `last_packet` is `None` until the first datagram.
    pub fn on_tick(
        &mut self,
        now: Instant,
        current: ConnectionState,
        last_packet: Option<Instant>,
    ) -> ConnectionState {
        if current == ConnectionState::Waiting
            && last_packet.is_none()
            && self.warmup_elapsed(now)
        {
            return ConnectionState::Disconnected;
        }

        if now.saturating_duration_since(self.last_liveness_check) < self.poll_interval {
            return current;
        }
        self.last_liveness_check = now;

        if current == ConnectionState::Connected && self.warmup_elapsed(now) {
            let last = last_packet.unwrap_or(self.started_at);
            if now.saturating_duration_since(last) > self.liveness_timeout {
                return ConnectionState::Disconnected;
            }
        }
        current
    }
}
