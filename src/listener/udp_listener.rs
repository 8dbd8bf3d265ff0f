use std::{
    io,
    net::{SocketAddr, UdpSocket},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    cancel_token::CancelToken,
    listener::{
        ListenerConfig, ListenerError,
        constants::{MAX_DATAGRAM_SIZE, RECEIVE_BACKOFF_MILLIS, SOCKET_READ_TIMEOUT_MILLIS},
        datagram_handler::DatagramHandler,
    },
    log::LogSink,
    read_model::SharedReadModel,
    sink_error, sink_info,
};

/// How the receive loop reacts to a failed `recv_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecvFailure {
    /// Read timeout or signal; just check cancellation and receive again.
    Idle,
    /// Anything else: log, back off, retry.
    Transient,
}

fn classify_recv_error(e: &io::Error) -> RecvFailure {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted => {
            RecvFailure::Idle
        }
        _ => RecvFailure::Transient,
    }
}

/// A bound UDP socket with its receive thread.
///
/// The socket is moved into the `gesture-udp-listener` thread and closed when
/// that thread returns, so it is released exactly once and never touched after
/// [`stop`](Self::stop) has returned.
pub struct UdpListener {
    local_addr: SocketAddr,
    cancel: CancelToken,
    thread: Option<JoinHandle<()>>,
    logger: Arc<dyn LogSink>,
}

impl UdpListener {
    /// Binds the configured address and starts receiving.
    ///
    /// Binding happens on the caller's thread; only the receive loop runs in
    /// the background. The loop exits when `cancel` fires.
    ///
    /// # Errors
    /// [`ListenerError::Bind`] when the address is unavailable, otherwise
    /// [`ListenerError::Socket`] or [`ListenerError::Spawn`].
    pub fn start(
        config: &ListenerConfig,
        model: Arc<SharedReadModel>,
        cancel: CancelToken,
        logger: Arc<dyn LogSink>,
    ) -> Result<Self, ListenerError> {
        let addr = config.socket_addr();
        let socket =
            UdpSocket::bind(addr).map_err(|source| ListenerError::Bind { addr, source })?;
        socket
            .set_read_timeout(Some(Duration::from_millis(SOCKET_READ_TIMEOUT_MILLIS)))
            .map_err(ListenerError::Socket)?;
        let local_addr = socket.local_addr().map_err(ListenerError::Socket)?;

        let handler = DatagramHandler::new(config.clone(), model, Arc::clone(&logger));
        let loop_cancel = cancel.clone();
        let loop_logger = Arc::clone(&logger);

        let thread = thread::Builder::new()
            .name("gesture-udp-listener".into())
            .spawn(move || run_receive_loop(socket, &handler, &loop_cancel, &loop_logger))
            .map_err(ListenerError::Spawn)?;

        sink_info!(logger, "[Listener] bound {local_addr}");

        Ok(Self {
            local_addr,
            cancel,
            thread: Some(thread),
            logger,
        })
    }

    /// Address actually bound; differs from the config when port 0 was used.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels the receive loop and waits for it to release the socket.
    /// Calling it again is a no-op.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        let Some(thread) = self.thread.take() else {
            return;
        };
        if thread.join().is_err() {
            sink_error!(self.logger, "[Listener] receive thread panicked");
        }
    }
}

impl Drop for UdpListener {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_receive_loop(
    socket: UdpSocket,
    handler: &DatagramHandler,
    cancel: &CancelToken,
    logger: &Arc<dyn LogSink>,
) {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
    let backoff = Duration::from_millis(RECEIVE_BACKOFF_MILLIS);

    while !cancel.is_cancelled() {
        match socket.recv_from(&mut buf) {
            Ok((n, from)) => handler.handle(&buf[..n], from, Instant::now()),
            Err(e) => match classify_recv_error(&e) {
                RecvFailure::Idle => {}
                RecvFailure::Transient => {
                    sink_error!(logger, "[Listener] receive failed: {e}; retrying in {backoff:?}");
                    if cancel.wait_timeout(backoff) {
                        break;
                    }
                }
            },
        }
    }

    sink_info!(logger, "[Listener] receive loop stopped, closing socket");
    drop(socket);
}
