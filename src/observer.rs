//! Per-session structured trace hook.
//!
//! A scan reports its progress to a [`ScanObserver`] carried in the
//! [`ScanConfig`](crate::ScanConfig). The default observer does nothing;
//! [`TracingObserver`] forwards events to `tracing`.

use tracing::{debug, trace};

use crate::error::ScanError;
use crate::format::Conversion;

/// Something that happened during a scan.
#[derive(Debug)]
#[non_exhaustive]
pub enum ScanEvent<'e> {
    /// A session started.
    Started {
        /// `"narrow"` or `"wide"`
        width: &'static str,
        /// Whether destination capacities are checked
        secure: bool,
    },
    /// A conversion completed.
    Converted {
        /// 1-based index of the conversion in the format
        index: usize,
        /// The conversion that ran
        conversion: &'e Conversion,
        /// Characters consumed by the whole scan so far
        consumed: usize,
    },
    /// The scan stopped before the end of the format.
    Halted {
        /// Why it stopped
        error: &'e ScanError,
        /// Assignments made before stopping
        assigned: usize,
    },
    /// The session ended.
    Finished {
        /// Assignments made
        assigned: usize,
        /// Characters consumed
        consumed: usize,
    },
}

/// Receives [`ScanEvent`]s.
pub trait ScanObserver: Send + Sync {
    /// Called for every event of a session.
    fn on_event(&self, event: &ScanEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn on_event(&self, _event: &ScanEvent<'_>) {}
}

/// Forwards events to `tracing` at trace/debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_event(&self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::Started { width, secure } => {
                debug!(width, secure, "scan started");
            }
            ScanEvent::Converted {
                index,
                conversion,
                consumed,
            } => {
                trace!(index, consumed, ?conversion, "conversion done");
            }
            ScanEvent::Halted { error, assigned } => {
                debug!(assigned, %error, "scan halted");
            }
            ScanEvent::Finished { assigned, consumed } => {
                debug!(assigned, consumed, "scan finished");
            }
        }
    }
}
