use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use crate::{
    connection::ConnectionState, gesture::GestureSample, read_model::gesture_source::GestureSource,
};

/// Consistent copy of what the consumer displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadSnapshot {
    pub sample: GestureSample,
    pub state: ConnectionState,
    /// Arrival time of the latest datagram; `None` until the first one.
    /// An empty label is a valid sample, so this is what tells the initial
    /// default apart from received data.
    pub last_packet: Option<Instant>,
}

impl ReadSnapshot {
    pub fn has_received(&self) -> bool {
        self.last_packet.is_some()
    }
}

/// Datagram counters since the model was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketStats {
    /// Every datagram that arrived, decodable or not.
    pub received: u64,
    /// Datagrams that were discarded without publishing a sample.
    pub rejected: u64,
}

#[derive(Debug, Default)]
struct ReadState {
    sample: GestureSample,
    state: ConnectionState,
    last_packet: Option<Instant>,
    stats: PacketStats,
}

/// Latest sample and connection state, shared between the listener thread,
/// the monitor thread and the per-frame consumer.
///
/// Every write replaces a whole value inside one short critical section, so
/// readers never see a label from one sample paired with the confidence of
/// another. No lock is held across I/O or decoding.
#[derive(Debug, Default)]
pub struct SharedReadModel {
    inner: Mutex<ReadState>,
}

impl SharedReadModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReadState> {
        // Fields are only ever replaced whole, so a poisoned guard still
        // holds a consistent value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current sample.
    pub fn publish_sample(&self, sample: GestureSample) {
        self.lock().sample = sample;
    }

    /// Replaces the connection state, returning the previous one.
    pub fn publish_state(&self, state: ConnectionState) -> ConnectionState {
        std::mem::replace(&mut self.lock().state, state)
    }

    /// Liveness pulse for a datagram that arrived at `at`: stamps the arrival
    /// and moves to `Connected`. Returns the state before the pulse.
    pub fn record_arrival(&self, at: Instant) -> ConnectionState {
        let mut guard = self.lock();
        guard.last_packet = Some(at);
        guard.stats.received += 1;
        std::mem::replace(&mut guard.state, ConnectionState::Connected)
    }

    /// Counts a datagram that produced no sample.
    pub fn record_rejected(&self) {
        self.lock().stats.rejected += 1;
    }

    /// Applies a time-based transition atomically with respect to arrivals.
    ///
    /// `decide` receives the current state and last arrival time; its result
    /// is stored. Returns `(before, after)`.
    pub fn update_state<F>(&self, decide: F) -> (ConnectionState, ConnectionState)
    where
        F: FnOnce(ConnectionState, Option<Instant>) -> ConnectionState,
    {
        let mut guard = self.lock();
        let before = guard.state;
        let after = decide(before, guard.last_packet);
        guard.state = after;
        (before, after)
    }

    /// Reads sample and state together.
    pub fn snapshot(&self) -> ReadSnapshot {
        let guard = self.lock();
        ReadSnapshot {
            sample: guard.sample.clone(),
            state: guard.state,
            last_packet: guard.last_packet,
        }
    }

    pub fn sample(&self) -> GestureSample {
        self.lock().sample.clone()
    }

    pub fn last_packet_at(&self) -> Option<Instant> {
        self.lock().last_packet
    }

    pub fn stats(&self) -> PacketStats {
        self.lock().stats
    }
}

impl GestureSource for SharedReadModel {
    fn gesture(&self) -> String {
        self.lock().sample.label().to_string()
    }

    fn confidence(&self) -> f32 {
        self.lock().sample.confidence()
    }

    fn connection_state(&self) -> ConnectionState {
        self.lock().state
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::{sync::Arc, thread, time::Duration};

    #[test]
    fn defaults_before_any_packet() {
        let model = SharedReadModel::new();
        assert_eq!(model.gesture(), "");
        assert_eq!(model.confidence(), 0.0);
        assert_eq!(model.connection_state(), ConnectionState::Waiting);
        assert_eq!(model.last_packet_at(), None);
        assert_eq!(model.stats(), PacketStats::default());
        assert!(!model.snapshot().has_received());
    }

    #[test]
    fn empty_label_after_arrival_is_received_data() {
        let model = SharedReadModel::new();
        let now = Instant::now();
        model.record_arrival(now);
        model.publish_sample(GestureSample::new("", 50.0));

        let snap = model.snapshot();
        assert!(snap.has_received());
        assert_eq!(snap.last_packet, Some(now));
        assert_eq!(snap.sample.label(), "");
        assert_eq!(snap.sample.confidence(), 50.0);
    }

    #[test]
    fn arrival_connects_and_stamps_time() {
        let model = SharedReadModel::new();
        let now = Instant::now();
        assert_eq!(model.record_arrival(now), ConnectionState::Waiting);
        assert_eq!(model.connection_state(), ConnectionState::Connected);
        assert_eq!(model.last_packet_at(), Some(now));
        assert_eq!(model.record_arrival(now), ConnectionState::Connected);
        assert_eq!(model.stats().received, 2);
    }

    #[test]
    fn update_state_sees_latest_arrival() {
        let model = SharedReadModel::new();
        let t = Instant::now();
        model.record_arrival(t);
        let (before, after) = model.update_state(|state, last| {
            assert_eq!(last, Some(t));
            assert_eq!(state, ConnectionState::Connected);
            ConnectionState::Disconnected
        });
        assert_eq!((before, after), (ConnectionState::Connected, ConnectionState::Disconnected));
        assert_eq!(model.snapshot().state, ConnectionState::Disconnected);
    }

    #[test]
    fn concurrent_readers_never_see_torn_samples() {
        let model = Arc::new(SharedReadModel::new());
        let writer_model = Arc::clone(&model);

        // Each label encodes its confidence, so a mismatch means a torn read.
        let writer = thread::spawn(move || {
            for i in 0..5_000u32 {
                let c = (i % 100) as f32;
                writer_model.publish_sample(GestureSample::new(format!("g{}", i % 100), c));
            }
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        while !writer.is_finished() && Instant::now() < deadline {
            let snap = model.snapshot();
            if snap.sample.label().is_empty() {
                continue;
            }
            let expected: f32 = snap.sample.label()[1..].parse().unwrap();
            assert_eq!(snap.sample.confidence(), expected);
        }
        writer.join().unwrap();
    }
}
