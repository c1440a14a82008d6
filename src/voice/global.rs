//! Process-wide facade handle.
//!
//! The facade is designed to be shared: one provider, one set of hooks, one
//! subscription lifecycle per process. `init` installs that shared handle
//! explicitly instead of hiding a lazily-built instance. Tests should skip
//! this module and construct a fresh [`Voice`] per case.

use std::sync::{Arc, OnceLock};

use super::Voice;

static GLOBAL: OnceLock<Arc<Voice>> = OnceLock::new();

/// Install the process-wide facade. Fails with the rejected handle if one
/// was already installed.
pub fn init(voice: Arc<Voice>) -> Result<(), Arc<Voice>> {
    GLOBAL.set(voice)
}

/// The process-wide facade, if [`init`] has been called.
pub fn get() -> Option<Arc<Voice>> {
    GLOBAL.get().cloned()
}
