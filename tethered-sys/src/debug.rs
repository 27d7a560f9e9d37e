//! Diagnostics backed by the allocation ledger.

use crate::ledger;
use crate::TetheredHandle;
use std::cell::Cell;

thread_local! {
    static INJECTED_FAILURES: Cell<u32> = const { Cell::new(0) };
}

/// Makes the next `count` allocations on the calling thread fail.
///
/// # Safety
///
/// Always safe to call; `unsafe` for uniformity with the rest of the C API.
#[no_mangle]
pub unsafe extern "C" fn tethered_debug_fail_next_allocations(count: u32) {
    INJECTED_FAILURES.with(|failures| failures.set(count));
}

/// Returns `true` if `handle` is currently live, owned or borrowed.
///
/// # Safety
///
/// Always safe to call; `unsafe` for uniformity with the rest of the C API.
#[no_mangle]
pub unsafe extern "C" fn tethered_debug_is_live(handle: TetheredHandle) -> bool {
    ledger::lookup(handle).is_some()
}

/// Returns the number of live handles across all threads, views included.
///
/// # Safety
///
/// Always safe to call; `unsafe` for uniformity with the rest of the C API.
#[no_mangle]
pub unsafe extern "C" fn tethered_debug_live_count() -> usize {
    ledger::len()
}

pub(crate) fn take_injected_failure() -> bool {
    INJECTED_FAILURES.with(|failures| match failures.get() {
        0 => false,
        remaining => {
            failures.set(remaining - 1);
            true
        }
    })
}
