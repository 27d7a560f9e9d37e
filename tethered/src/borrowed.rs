//! Non-releasing views into native memory owned elsewhere.

use crate::error::InvalidHandleError;
use crate::fence::fence;
use crate::handle::Handle;
use crate::native::{DeepClone, NativeValue};
use crate::owned::Owned;
use crate::retention::Retention;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;
use tethered_sys::TetheredHandle;

/// A handle to a native value of type `T` that lives inside another wrapper's native value.
///
/// A [`Borrowed`] never releases its handle.
/// It retains the owner of the memory it points into, so that owner cannot be released while the view exists.
pub struct Borrowed<T: NativeValue> {
    handle: Handle,
    retained: Retention,
    _marker: PhantomData<fn() -> T>,
}

impl<T: NativeValue> Borrowed<T> {
    /// Wraps `raw`, a handle borrowed from the native value held by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandleError`] if `raw` is a sentinel.
    ///
    /// # Safety
    ///
    /// `raw` must be a handle of type `T` that stays valid for as long as `owner` is alive.
    pub unsafe fn adopt_view<O: Any + Send + Sync>(
        raw: TetheredHandle,
        owner: Arc<O>,
    ) -> Result<Self, InvalidHandleError> {
        let handle = Handle::new(raw)?;
        tracing::trace!(target: "tethered::handle", kind = T::NAME, %handle, "borrow");

        let mut retained = Retention::new();
        retained.retain(owner);

        Ok(Self {
            handle,
            retained,
            _marker: PhantomData,
        })
    }

    /// Returns the raw handle.
    pub fn raw(&self) -> TetheredHandle {
        self.handle.get()
    }

    /// Calls `f` with the raw handle, keeping `self` and its owner alive until `f` has returned.
    pub fn with_raw<R>(&self, f: impl FnOnce(TetheredHandle) -> R) -> R {
        let result = f(self.handle.get());
        fence(self);
        result
    }

    /// Returns an owned copy of the viewed value, independent of the owner.
    ///
    /// Returns `None` if the native library could not produce a copy.
    pub fn duplicate(&self) -> Option<Owned<T>>
    where
        T: DeepClone,
    {
        let raw = self.with_raw(|raw| unsafe { T::clone_raw(raw) });
        unsafe { Owned::adopt_return(raw) }
    }

    /// Returns the objects this view keeps alive; its owner is always among them.
    pub fn retained(&self) -> &Retention {
        &self.retained
    }
}

impl<T: NativeValue> std::fmt::Debug for Borrowed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Borrowed")
            .field("kind", &T::NAME)
            .field("handle", &self.handle)
            .field("retained", &self.retained)
            .finish()
    }
}
