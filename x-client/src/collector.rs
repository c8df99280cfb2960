//! Per-invocation buffering of intercepted responses.

use tokio::sync::mpsc;
use tracing::trace;

use crate::driver::{RawResponse, ResourceKind};

/// Owns the receiving end of one invocation's response channel and buffers
/// every XHR-kind event in arrival order. The buffer is unbounded for the
/// duration of the scrape and dropped with the collector.
pub struct ResponseCollector {
    rx: mpsc::UnboundedReceiver<RawResponse>,
    buffer: Vec<RawResponse>,
}

impl ResponseCollector {
    pub fn new(rx: mpsc::UnboundedReceiver<RawResponse>) -> Self {
        Self {
            rx,
            buffer: Vec::new(),
        }
    }

    /// Pull everything that has arrived so far into the buffer and expose it.
    /// Arrival order is preserved; non-XHR kinds are discarded.
    pub fn drain(&mut self) -> &[RawResponse] {
        while let Ok(raw) = self.rx.try_recv() {
            if raw.kind == ResourceKind::Xhr {
                self.buffer.push(raw);
            } else {
                trace!(url = %raw.url, "discarding non-xhr response");
            }
        }
        &self.buffer
    }
}
