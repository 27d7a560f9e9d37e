//! The seam between the ownership machinery and a concrete native type.

use tethered_sys::TetheredHandle;

#[cfg(doc)]
use crate::owned::Owned;

/// The lifetime entry points of one native type.
///
/// Implementors are marker types; [`Owned<T>`] stores the handle and calls these functions.
///
/// # Safety
///
/// - [`Self::clone_raw`] must return either a sentinel or a fresh handle, owned by the caller and independent of its argument.
/// - [`Self::release_raw`] must deallocate exactly the value behind its argument.
/// - Both must be callable from any thread for distinct handles, and [`Self::clone_raw`] concurrently with itself for the same handle: wrappers are `Send` and `Sync`.
pub unsafe trait NativeValue: 'static {
    /// Name of the type in log events.
    const NAME: &'static str;

    /// Asks the native library for an independent copy of `handle`.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn clone_raw(handle: TetheredHandle) -> TetheredHandle;

    /// Deallocates `handle`.
    ///
    /// # Safety
    ///
    /// `handle` must be an owned, live handle, released at most once.
    unsafe fn release_raw(handle: TetheredHandle);
}

/// Native types whose clone shares no memory with the original.
///
/// Only these types get [`Owned::duplicate`]; the others go through [`Owned::duplicate_retaining`].
///
/// # Safety
///
/// A handle returned by [`NativeValue::clone_raw`] must stay valid after its original is released.
pub unsafe trait DeepClone: NativeValue {}
