//! Warning reporting for dispatch failures.
//!
//! The registry reports failures through a [`Logger`] handed to it by the
//! host. Until one is installed, failures are still returned as errors but
//! nothing is reported.

use std::error::Error;
use std::sync::{Arc, OnceLock};

/// Host-supplied sink for registry warnings.
pub trait Logger: Send + Sync + 'static {
    /// Whether warnings are currently wanted. Checked before a message is
    /// formatted.
    fn is_warning_enabled(&self) -> bool;

    /// Records a warning. `code` identifies the failing operation.
    fn warn(&self, code: u32, message: &str, error: Option<&(dyn Error + 'static)>);
}

/// A [`Logger`] that forwards to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn is_warning_enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::WARN)
    }

    fn warn(&self, code: u32, message: &str, error: Option<&(dyn Error + 'static)>) {
        match error {
            Some(error) => tracing::warn!(code, error = %error, "{message}"),
            None => tracing::warn!(code, "{message}"),
        }
    }
}

/// The registry's slot for its logger. Set at most once.
#[derive(Default)]
pub(crate) struct Diagnostics {
    logger: OnceLock<Arc<dyn Logger>>,
}

impl Diagnostics {
    /// Installs `logger`. Returns `false` if one was already installed;
    /// the first logger stays.
    pub(crate) fn install(&self, logger: Arc<dyn Logger>) -> bool {
        self.logger.set(logger).is_ok()
    }

    #[cfg(test)]
    pub(crate) fn is_installed(&self) -> bool {
        self.logger.get().is_some()
    }

    /// Reports a warning if a logger is installed and wants warnings.
    /// `message` is only evaluated in that case.
    pub(crate) fn warn(
        &self,
        code: u32,
        message: impl FnOnce() -> String,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let Some(logger) = self.logger.get() else {
            return;
        };
        if !logger.is_warning_enabled() {
            return;
        }
        logger.warn(code, &message(), error);
    }
}
