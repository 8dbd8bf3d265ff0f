use std::{net::SocketAddr, sync::Arc, time::Instant};

use crate::{
    gesture::{DecodeOutcome, decode_datagram},
    listener::ListenerConfig,
    log::LogSink,
    read_model::SharedReadModel,
    sink_info, sink_trace, sink_warn,
};

/// Turns one received datagram into read-model updates.
///
/// Arrival is recorded before decoding, so even an undecodable datagram
/// keeps the connection alive. Decode failures are logged and leave the
/// previous sample in place.
pub(crate) struct DatagramHandler {
    config: ListenerConfig,
    model: Arc<SharedReadModel>,
    logger: Arc<dyn LogSink>,
}

impl DatagramHandler {
    pub(crate) fn new(
        config: ListenerConfig,
        model: Arc<SharedReadModel>,
        logger: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            config,
            model,
            logger,
        }
    }

    pub(crate) fn handle(&self, payload: &[u8], from: SocketAddr, arrived_at: Instant) {
        let before = self.model.record_arrival(arrived_at);
        if !before.is_connected() {
            sink_info!(
                self.logger,
                "[Listener] datagram from {from}: connection {before} -> Connected"
            );
        }

        let previous = self.model.sample();
        let outcome = match decode_datagram(
            self.config.wire_format,
            payload,
            self.config.separator,
            &previous,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.model.record_rejected();
                sink_warn!(
                    self.logger,
                    "[Listener] dropped {} byte datagram from {from}: {e}",
                    payload.len()
                );
                return;
            }
        };

        if let DecodeOutcome::LabelOnly { error, .. } = &outcome {
            sink_warn!(
                self.logger,
                "[Listener] kept previous confidence for datagram from {from}: {error}"
            );
        }

        let sample = outcome.into_sample();
        if self.config.debug_logs {
            sink_info!(
                self.logger,
                "Gesture: {}, Confidence: {:.1}%",
                sample.label(),
                sample.confidence()
            );
        } else {
            sink_trace!(
                self.logger,
                "[Listener] {} @ {:.1}% from {from}",
                sample.label(),
                sample.confidence()
            );
        }
        self.model.publish_sample(sample);
    }
}
