//! Releasing owners of native handles.

use crate::error::InvalidHandleError;
use crate::fence::fence;
use crate::handle::{Handle, NativeReturn};
use crate::native::{DeepClone, NativeValue};
use crate::retention::{Retention, RetentionKey};
use std::any::Any;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::sync::Arc;
use tethered_sys::TetheredHandle;

/// The releasing owner of one native value of type `T`.
///
/// Exactly one [`Owned`] exists per owned native handle.
/// The handle is released when the wrapper is dropped, unless ownership was handed back to the native library with [`Self::into_raw`].
/// Since dropping needs the wrapper by value, no accessor can run on a released handle.
pub struct Owned<T: NativeValue> {
    handle: Handle,

    /// Used to keep the dependencies of the native value alive for the lifetime of the wrapper.
    retained: Retention,

    _marker: PhantomData<fn() -> T>,
}

impl<T: NativeValue> Owned<T> {
    /// Takes exclusive ownership of `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandleError`] if `raw` is a sentinel.
    ///
    /// # Safety
    ///
    /// `raw` must be a live handle of type `T` that nothing else releases.
    pub unsafe fn adopt(raw: TetheredHandle) -> Result<Self, InvalidHandleError> {
        let handle = Handle::new(raw)?;
        tracing::trace!(target: "tethered::handle", kind = T::NAME, %handle, "adopt");

        Ok(Self {
            handle,
            retained: Retention::new(),
            _marker: PhantomData,
        })
    }

    /// Takes exclusive ownership of the value returned by a native constructor.
    ///
    /// Returns `None` if the constructor returned a sentinel.
    ///
    /// # Safety
    ///
    /// Same as [`Self::adopt`].
    pub unsafe fn adopt_return(raw: TetheredHandle) -> Option<Self> {
        match NativeReturn::from(raw) {
            NativeReturn::Value(handle) => unsafe { Self::adopt(handle.get()) }.ok(),
            NativeReturn::Absent(sentinel) => {
                tracing::debug!(target: "tethered::handle", kind = T::NAME, sentinel, "native call returned no value");
                None
            }
        }
    }

    /// Returns the raw handle.
    ///
    /// The handle is only valid while `self` is alive; prefer [`Self::with_raw`] for native calls.
    pub fn raw(&self) -> TetheredHandle {
        self.handle.get()
    }

    /// Calls `f` with the raw handle, keeping `self` alive until `f` has returned.
    pub fn with_raw<R>(&self, f: impl FnOnce(TetheredHandle) -> R) -> R {
        let result = f(self.handle.get());
        fence(self);
        result
    }

    /// Asks the native library for an independent copy and returns its raw handle without adopting it.
    ///
    /// The caller owns the returned handle, which may be a sentinel.
    pub fn clone_raw(&self) -> TetheredHandle {
        self.with_raw(|raw| unsafe { T::clone_raw(raw) })
    }

    /// Returns a new wrapper owning an independent copy of the native value.
    ///
    /// Returns `None` if the native library could not produce a copy.
    pub fn duplicate(&self) -> Option<Self>
    where
        T: DeepClone,
    {
        let copy = unsafe { Self::adopt_return(self.clone_raw()) }?;
        tracing::trace!(target: "tethered::handle", kind = T::NAME, from = %self.handle, to = %copy.handle, "duplicate");
        Some(copy)
    }

    /// Returns a new wrapper owning a copy of the native value that may share memory with `self`.
    ///
    /// The copy retains `self`, so the original outlives every copy made this way.
    /// Returns `None` if the native library could not produce a copy.
    pub fn duplicate_retaining(self: &Arc<Self>) -> Option<Self> {
        let mut copy = unsafe { Self::adopt_return(self.clone_raw()) }?;
        copy.retain(Arc::clone(self));
        tracing::trace!(target: "tethered::handle", kind = T::NAME, from = %self.handle, to = %copy.handle, "duplicate retaining original");
        Some(copy)
    }

    /// Keeps `dependency` alive at least as long as this wrapper.
    pub fn retain<D: Any + Send + Sync>(&mut self, dependency: Arc<D>) -> RetentionKey {
        self.retained.retain(dependency)
    }

    /// Returns the dependencies retained by this wrapper.
    pub fn retained(&self) -> &Retention {
        &self.retained
    }

    /// Hands the native value over to the native library.
    ///
    /// Returns the raw handle, which the host does not release any more, together with the retained dependencies.
    /// The caller must keep those alive for as long as the native value may point into them.
    pub fn into_raw(self) -> (TetheredHandle, Retention) {
        let mut this = ManuallyDrop::new(self);
        let retained = std::mem::take(&mut this.retained);
        tracing::trace!(target: "tethered::handle", kind = T::NAME, handle = %this.handle, "transfer to native");
        (this.handle.get(), retained)
    }
}

impl<T: NativeValue> Drop for Owned<T> {
    fn drop(&mut self) {
        tracing::trace!(target: "tethered::handle", kind = T::NAME, handle = %self.handle, "release");
        unsafe { T::release_raw(self.handle.get()) }
    }
}

impl<T: NativeValue> std::fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owned")
            .field("kind", &T::NAME)
            .field("handle", &self.handle)
            .field("retained", &self.retained)
            .finish()
    }
}
