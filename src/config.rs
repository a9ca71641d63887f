//! Per-call configuration: locale override, observer, invalid-parameter
//! handler, and the UCRT option word.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::constants::{
    SCANF_LEGACY_MSVCRT_COMPATIBILITY, SCANF_LEGACY_WIDE_SPECIFIERS, SCANF_OPTIONS_MASK,
    SCANF_SECURECRT,
};
use crate::error::ContractViolation;
use crate::locale::{Locale, current_locale};
use crate::observer::{NoopObserver, ScanObserver};

/// Called once for every contract violation a scan detects.
pub type InvalidParameterHandler = Arc<dyn Fn(&ContractViolation) + Send + Sync>;

/// The handler used unless one is configured: logs and lets the scan fail.
pub fn default_invalid_parameter_handler(violation: &ContractViolation) {
    error!("invalid parameter passed to scanf: {}", violation);
}

/// Configuration for a [`Scanner`](crate::Scanner)
#[derive(Clone)]
pub struct ScanConfig {
    locale: Option<Locale>,
    observer: Arc<dyn ScanObserver>,
    handler: InvalidParameterHandler,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            locale: None,
            observer: Arc::new(NoopObserver),
            handler: Arc::new(default_invalid_parameter_handler),
        }
    }
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl ScanConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale; `None` uses the calling thread's current locale
    pub fn locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the session observer
    pub fn observer(mut self, observer: impl ScanObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Sets the invalid-parameter handler
    pub fn invalid_parameter_handler(
        mut self,
        handler: impl Fn(&ContractViolation) + Send + Sync + 'static,
    ) -> Self {
        self.handler = Arc::new(handler);
        self
    }

    /// The locale a scan with this config uses
    pub fn resolved_locale(&self) -> Locale {
        self.locale.clone().unwrap_or_else(current_locale)
    }

    pub(crate) fn observer_ref(&self) -> &dyn ScanObserver {
        self.observer.as_ref()
    }

    pub(crate) fn report_violation(&self, violation: &ContractViolation) {
        (self.handler)(violation);
    }
}

/// Option word of the UCRT `__stdio_common_v*scanf` dispatchers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions(u64);

impl ScanOptions {
    /// Wraps a raw option word
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw option word
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether the secure variant is requested
    pub const fn is_secure(self) -> bool {
        self.0 & SCANF_SECURECRT != 0
    }

    /// Logs every bit that asks for behavior this crate does not implement.
    /// `known` is the set of bits the calling dispatcher understands.
    pub fn report_unhandled(self, known: u64) {
        if self.0 & !known != 0 {
            warn!("scanf options {:#x} not handled", self.0);
        }
        if self.0 & known & SCANF_LEGACY_WIDE_SPECIFIERS != 0 {
            debug!("legacy wide specifiers requested; wide scans always use them");
        }
        if self.0 & known & SCANF_LEGACY_MSVCRT_COMPATIBILITY != 0 {
            debug!("legacy msvcrt nan/inf handling requested; nan/inf parsing is not implemented");
        }
    }

    /// Bits understood by the string dispatchers
    pub const STRING_KNOWN: u64 = SCANF_OPTIONS_MASK;

    /// Bits understood by the stream dispatchers
    pub const STREAM_KNOWN: u64 = SCANF_SECURECRT;
}
