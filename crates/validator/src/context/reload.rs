//! Hot-swappable context for processes that reload rules at runtime.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use super::LocalizationContext;

/// A [`LocalizationContext`] that can be replaced while requests are in flight.
///
/// Readers take a snapshot with [`load`](Self::load) and keep using it for the
/// whole request; a concurrent [`store`](Self::store) never exposes a
/// half-built catalog, only the fully old or the fully new context.
#[derive(Debug)]
pub struct ReloadableContext {
    current: ArcSwap<LocalizationContext>,
}

impl ReloadableContext {
    /// Wraps an initial context.
    pub fn new(context: LocalizationContext) -> Self {
        Self {
            current: ArcSwap::from_pointee(context),
        }
    }

    /// Current snapshot. Lock-free.
    pub fn load(&self) -> Arc<LocalizationContext> {
        self.current.load_full()
    }

    /// Replaces the context for all subsequent [`load`](Self::load) calls.
    pub fn store(&self, context: LocalizationContext) {
        self.replace(context);
    }

    /// Replaces the context and returns the previous one.
    pub fn replace(&self, context: LocalizationContext) -> Arc<LocalizationContext> {
        info!(
            locale = %context.locale(),
            rules = context.registry().len(),
            "swapping localization context"
        );
        self.current.swap(Arc::new(context))
    }
}

impl From<LocalizationContext> for ReloadableContext {
    fn from(context: LocalizationContext) -> Self {
        Self::new(context)
    }
}
