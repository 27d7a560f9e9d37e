use crate::ledger::{self, Kind};
use crate::{TetheredHandle, TETHERED_ERR_ALLOCATION};

/// Moves `value` to the native heap and returns its handle.
///
/// Returns [`TETHERED_ERR_ALLOCATION`] when a failure was injected on this thread.
pub(crate) fn into_handle<T>(value: T, kind: Kind) -> TetheredHandle {
    #[cfg(feature = "ledger")]
    if crate::debug::take_injected_failure() {
        tracing::debug!(target: "tethered_sys", ?kind, "injected allocation failure");
        return TETHERED_ERR_ALLOCATION;
    }

    #[cfg(not(feature = "ledger"))]
    let _ = TETHERED_ERR_ALLOCATION;

    let handle = Box::into_raw(Box::new(value)) as usize as TetheredHandle;
    ledger::insert(handle, kind);
    handle
}

/// # Safety
///
/// `handle` must come from [`into_handle`] with a `T` and must not have been taken yet.
pub(crate) unsafe fn get<'a, T>(handle: TetheredHandle) -> &'a T {
    &*(handle as usize as *const T)
}

/// # Safety
///
/// Same as [`get`]; the handle is dangling afterwards.
pub(crate) unsafe fn take<T>(handle: TetheredHandle) -> T {
    *Box::from_raw(handle as usize as *mut T)
}
