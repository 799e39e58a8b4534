//! Surface Context Registry
//!
//! Tracks which surface currently owns focus and keeps a non-owning handle to each
//! surface's execution context. Owners hold the context as `Arc<C>`; the registry only
//! keeps a `Weak<C>`, compares handles by identity, and never extends their lifetime.
//!
//! All state lives behind one lock, so every operation is linearizable across the
//! threads that drive surface lifecycles.

use crate::config::RegistryConfig;
use crate::error::ApiError;
use crate::surface::{SurfaceKind, SURFACE_KIND_COUNT};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

struct RegistryState<C: ?Sized> {
    contexts: [Option<Weak<C>>; SURFACE_KIND_COUNT],
    paused: [bool; SURFACE_KIND_COUNT],
    current: SurfaceKind,
}

impl<C: ?Sized> RegistryState<C> {
    fn new() -> Self {
        Self {
            contexts: std::array::from_fn(|_| None),
            paused: [false; SURFACE_KIND_COUNT],
            current: SurfaceKind::None,
        }
    }

    /// Upgrade the slot for `kind`; a context dropped by its owner reads as empty.
    fn live(&self, kind: SurfaceKind) -> Option<Arc<C>> {
        self.contexts[kind.index()].as_ref().and_then(Weak::upgrade)
    }

    fn set_current(&mut self, kind: SurfaceKind) {
        self.current = kind;
        debug!(surface = %kind, "New current surface");
    }
}

/// Identity comparison on the data pointer only.
fn same_handle<C: ?Sized>(slot: &Weak<C>, handle: &Arc<C>) -> bool {
    std::ptr::addr_eq(slot.as_ptr(), Arc::as_ptr(handle))
}

/// Registry of per-surface execution contexts plus the current-surface marker
///
/// One instance per host application, constructed by the host and passed explicitly
/// (usually as `Arc<SurfaceContextRegistry<C>>`) to whichever subsystem needs lookups.
pub struct SurfaceContextRegistry<C: ?Sized + Send + Sync> {
    state: Mutex<RegistryState<C>>,
    fallback: SurfaceKind,
}

impl<C: ?Sized + Send + Sync> SurfaceContextRegistry<C> {
    /// Create a registry with default configuration and register `app` as the
    /// application-wide context.
    pub fn new(app: &Arc<C>) -> Self {
        Self::build(app, RegistryConfig::default().fallback)
    }

    /// Create a registry with an explicit configuration
    ///
    /// Fails with `ApiError::ConfigError` if the configuration does not validate.
    pub fn with_config(app: &Arc<C>, config: &RegistryConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("Invalid registry config: {}", e)))?;
        Ok(Self::build(app, config.fallback))
    }

    fn build(app: &Arc<C>, fallback: SurfaceKind) -> Self {
        let registry = Self {
            state: Mutex::new(RegistryState::new()),
            fallback,
        };
        registry.register(SurfaceKind::App, app);
        registry
    }

    /// Kind consulted when the current surface has no live context.
    pub fn fallback(&self) -> SurfaceKind {
        self.fallback
    }

    /// Record `handle` as the context for `kind`, overwriting any previous handle.
    ///
    /// The `None` slot is never populated; registering under it is ignored.
    pub fn register(&self, kind: impl Into<SurfaceKind>, handle: &Arc<C>) {
        let kind = kind.into();
        if kind == SurfaceKind::None {
            debug!("Ignoring context registration for surface none");
            return;
        }

        let mut state = self.state.lock();
        state.contexts[kind.index()] = Some(Arc::downgrade(handle));
        debug!(surface = %kind, handle = ?Arc::as_ptr(handle), "Registered surface context");
    }

    /// Clear the context for `kind` if it is still `handle`.
    ///
    /// Stale or foreign handles are ignored. When the cleared kind was current, the
    /// current kind resets to `None` in the same critical section. Returns whether the
    /// slot was cleared.
    pub fn unregister(&self, kind: impl Into<SurfaceKind>, handle: &Arc<C>) -> bool {
        let kind = kind.into();
        let mut state = self.state.lock();

        let matches = state.contexts[kind.index()]
            .as_ref()
            .is_some_and(|slot| same_handle(slot, handle));
        if !matches {
            debug!(surface = %kind, "Ignoring stale context unregistration");
            return false;
        }

        state.contexts[kind.index()] = None;
        if state.current == kind {
            state.set_current(SurfaceKind::None);
            debug!(surface = %kind, "Current surface cleared");
        }
        debug!(surface = %kind, "Surface context cleared");
        true
    }

    /// Make `kind` the current surface. No handle needs to be registered for it yet.
    pub fn set_current(&self, kind: impl Into<SurfaceKind>) {
        let kind = kind.into();
        self.state.lock().set_current(kind);
    }

    pub fn current(&self) -> SurfaceKind {
        self.state.lock().current
    }

    pub fn on_pause(&self, kind: impl Into<SurfaceKind>) {
        let kind = kind.into();
        let mut state = self.state.lock();
        state.paused[kind.index()] = true;
        debug!(surface = %kind, "Surface paused");
    }

    /// Mark `kind` resumed; a resumed surface becomes current if it was not already.
    pub fn on_resume(&self, kind: impl Into<SurfaceKind>) {
        let kind = kind.into();
        let mut state = self.state.lock();
        state.paused[kind.index()] = false;
        debug!(surface = %kind, previous = %state.current, "Surface resumed");
        if state.current != kind {
            state.set_current(kind);
        }
    }

    /// Paused flag for `kind`. Observability only; resolution ignores it.
    pub fn is_paused(&self, kind: impl Into<SurfaceKind>) -> bool {
        let kind = kind.into();
        self.state.lock().paused[kind.index()]
    }

    /// Context registered for `kind`, if any is still alive.
    pub fn get_context(&self, kind: impl Into<SurfaceKind>) -> Option<Arc<C>> {
        let kind = kind.into();
        self.state.lock().live(kind)
    }

    /// Resolve the context for the current surface, falling back to the fallback
    /// surface (primary by default) when the current one has none.
    pub fn current_context(&self) -> Result<Arc<C>, ApiError> {
        let state = self.state.lock();
        if let Some(context) = state.live(state.current) {
            return Ok(context);
        }

        state.live(self.fallback).ok_or_else(|| {
            warn!(
                current = %state.current,
                fallback = %self.fallback,
                "No surface context available"
            );
            ApiError::NoContextAvailable {
                current: state.current,
                fallback: self.fallback,
            }
        })
    }

    /// Drop every handle, reset paused flags, and reset the current surface to `None`.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.contexts.iter_mut().for_each(|slot| *slot = None);
        state.paused = [false; SURFACE_KIND_COUNT];
        state.current = SurfaceKind::None;
        debug!("Surface context registry cleared");
    }

    /// Consistent view of the registry taken under a single lock acquisition.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.lock();
        let slots = SurfaceKind::ALL.map(|kind| SlotSnapshot {
            kind,
            registered: state.live(kind).is_some(),
            paused: state.paused[kind.index()],
        });

        RegistrySnapshot {
            current: state.current,
            fallback: self.fallback,
            slots,
        }
    }
}

/// Per-kind view inside a [`RegistrySnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    pub kind: SurfaceKind,
    pub registered: bool,
    pub paused: bool,
}

/// Point-in-time view of a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub current: SurfaceKind,
    pub fallback: SurfaceKind,
    /// One entry per kind, in slot order.
    pub slots: [SlotSnapshot; SURFACE_KIND_COUNT],
}

impl RegistrySnapshot {
    pub fn slot(&self, kind: SurfaceKind) -> &SlotSnapshot {
        &self.slots[kind.index()]
    }
}
