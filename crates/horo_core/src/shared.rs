//! Serialized access to a stateful ephemeris backend.
//!
//! Some backends keep process-wide state (an open data file, a selected
//! path) and cannot serve two computations at once. Wrapping such a backend
//! in [`SharedEphemeris`] gives every clone of the handle the same mutex; a
//! computation holds the lock for its whole duration, so one chart or scan
//! never sees another's file switch halfway through.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::EphemerisProvider;

/// Cloneable handle that serializes access to one provider.
#[derive(Debug)]
pub struct SharedEphemeris<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> Clone for SharedEphemeris<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: EphemerisProvider> SharedEphemeris<P> {
    pub fn new(provider: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(provider)),
        }
    }

    /// Borrow exclusive access until the guard is dropped.
    ///
    /// `&*guard` is itself an [`EphemerisProvider`].
    pub fn lock(&self) -> MutexGuard<'_, P> {
        self.inner.lock()
    }

    /// Run one logical computation with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Swap the wrapped backend, waiting for any running computation.
    pub fn replace(&self, provider: P) -> P {
        std::mem::replace(&mut *self.inner.lock(), provider)
    }
}
