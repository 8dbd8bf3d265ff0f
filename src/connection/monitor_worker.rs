use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    cancel_token::CancelToken, connection::ConnectionMonitor, log::LogSink,
    read_model::SharedReadModel, sink_info,
};

/// Granularity of the monitor loop. Warm-up expiry is noticed within one tick.
pub const MONITOR_TICK: Duration = Duration::from_millis(50);

/// Spawns the `gesture-link-monitor` thread.
///
/// Each tick feeds the current time into `monitor` inside the read model's
/// critical section, so a datagram that lands concurrently is never
/// overwritten by a stale timeout decision. Transitions are logged at Info.
///
/// # Errors
/// Returns the OS error if the thread cannot be created.
pub fn spawn_monitor_worker(
    mut monitor: ConnectionMonitor,
    model: Arc<SharedReadModel>,
    cancel: CancelToken,
    logger: Arc<dyn LogSink>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gesture-link-monitor".into())
        .spawn(move || {
            while !cancel.wait_timeout(MONITOR_TICK) {
                let now = Instant::now();
                let (before, after) =
                    model.update_state(|state, last_packet| monitor.on_tick(now, state, last_packet));

                if before != after {
                    let silent_for = model
                        .last_packet_at()
                        .unwrap_or(monitor.started_at())
                        .elapsed();
                    sink_info!(
                        logger,
                        "[Monitor] connection {before} -> {after} (silent for {silent_for:?})"
                    );
                }
            }
        })
}
