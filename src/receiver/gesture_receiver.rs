use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::Instant,
};

use crate::{
    cancel_token::CancelToken,
    connection::{ConnectionMonitor, ConnectionState, spawn_monitor_worker},
    listener::{ListenerConfig, ListenerError, UdpListener},
    log::LogSink,
    read_model::{GestureSource, PacketStats, ReadSnapshot, SharedReadModel},
    sink_error, sink_info,
};

#[derive(Default)]
struct Workers {
    listener: Option<UdpListener>,
    monitor: Option<JoinHandle<()>>,
}

/// Owns the gesture subsystem: the UDP listener, the connection monitor and
/// the read model they publish into.
///
/// Startup order is bind, spawn listener, spawn monitor. [`stop`](Self::stop)
/// cancels both workers, joins them (which closes the socket) and publishes
/// `Disconnected`. It is safe to call from several threads and any number of
/// times; dropping the receiver calls it too.
///
/// The receiver itself is the consumer's read handle: [`gesture`](GestureSource::gesture),
/// [`confidence`](GestureSource::confidence) and
/// [`connection_state`](GestureSource::connection_state) never block on I/O.
pub struct GestureReceiver {
    config: ListenerConfig,
    local_addr: SocketAddr,
    model: Arc<SharedReadModel>,
    cancel: CancelToken,
    workers: Mutex<Workers>,
    stopped: AtomicBool,
    logger: Arc<dyn LogSink>,
}

impl GestureReceiver {
    /// Validates `config`, binds the socket and starts both workers.
    ///
    /// # Errors
    /// Any [`ListenerError`]; on error nothing is left running and the port
    /// is not held.
    pub fn start(config: ListenerConfig, logger: Arc<dyn LogSink>) -> Result<Self, ListenerError> {
        config.validate()?;

        let started_at = Instant::now();
        let model = Arc::new(SharedReadModel::new());
        let cancel = CancelToken::new();

        let mut listener = UdpListener::start(
            &config,
            Arc::clone(&model),
            cancel.clone(),
            Arc::clone(&logger),
        )?;
        let local_addr = listener.local_addr();

        let monitor = ConnectionMonitor::from_config(&config, started_at);
        let monitor_handle = match spawn_monitor_worker(
            monitor,
            Arc::clone(&model),
            cancel.clone(),
            Arc::clone(&logger),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                listener.stop();
                return Err(ListenerError::Spawn(e));
            }
        };

        sink_info!(
            logger,
            "[Receiver] started on {local_addr} (warm-up {:?}, timeout {:?}, poll {:?}, format {})",
            config.warmup,
            config.liveness_timeout,
            config.poll_interval,
            config.wire_format
        );

        Ok(Self {
            config,
            local_addr,
            model,
            cancel,
            workers: Mutex::new(Workers {
                listener: Some(listener),
                monitor: Some(monitor_handle),
            }),
            stopped: AtomicBool::new(false),
            logger,
        })
    }

    /// Tears the subsystem down. Concurrent callers wait for the first one
    /// to finish; later calls return immediately.
    pub fn stop(&self) {
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        self.cancel.cancel();
        if let Some(mut listener) = workers.listener.take() {
            listener.stop();
        }
        if let Some(monitor) = workers.monitor.take() {
            if monitor.join().is_err() {
                sink_error!(self.logger, "[Receiver] monitor thread panicked");
            }
        }

        let before = self.model.publish_state(ConnectionState::Disconnected);
        self.stopped.store(true, Ordering::SeqCst);
        sink_info!(
            self.logger,
            "[Receiver] stopped on {} (connection {before} -> Disconnected)",
            self.local_addr
        );
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Label, confidence and state read together.
    pub fn snapshot(&self) -> ReadSnapshot {
        self.model.snapshot()
    }

    pub fn stats(&self) -> PacketStats {
        self.model.stats()
    }

    /// Shared read model, for consumers that outlive a borrow of the receiver.
    pub fn read_model(&self) -> Arc<SharedReadModel> {
        Arc::clone(&self.model)
    }
}

impl GestureSource for GestureReceiver {
    fn gesture(&self) -> String {
        self.model.gesture()
    }

    fn confidence(&self) -> f32 {
        self.model.confidence()
    }

    fn connection_state(&self) -> ConnectionState {
        self.model.connection_state()
    }
}

impl Drop for GestureReceiver {
    fn drop(&mut self) {
        self.stop();
    }
}
