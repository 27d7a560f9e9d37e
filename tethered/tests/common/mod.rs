#![allow(dead_code)]

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tethered::{BytesKeyTuple, BytesKeyTupleFfi, DeepClone, NativeValue, PublicKey, TetheredHandle};
use tethered_sys::{TetheredPublicKey, TetheredThirtyTwoBytes};

/// A stand-in for the native tuple library that records every call.
///
/// Values live in a process-wide map so wrappers may move across threads.
/// Call counters are per thread, so parallel tests do not see each other's calls.
pub struct CountingTuple;

static VALUES: Lazy<Mutex<HashMap<TetheredHandle, (TetheredThirtyTwoBytes, TetheredPublicKey)>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static RELEASES: Lazy<Mutex<HashMap<TetheredHandle, usize>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0x1000_0000);

thread_local! {
    static NATIVE_CALLS: Cell<usize> = const { Cell::new(0) };
    static FAIL_NEXT: Cell<bool> = const { Cell::new(false) };
}

fn record_call() {
    NATIVE_CALLS.with(|calls| calls.set(calls.get() + 1));
}

fn allocate(value: (TetheredThirtyTwoBytes, TetheredPublicKey)) -> TetheredHandle {
    if FAIL_NEXT.with(|fail| fail.replace(false)) {
        return tethered_sys::TETHERED_ERR_ALLOCATION;
    }

    let handle = NEXT_HANDLE.fetch_add(0x40, Ordering::Relaxed);
    VALUES.lock().insert(handle, value);
    handle
}

fn read(handle: TetheredHandle) -> (TetheredThirtyTwoBytes, TetheredPublicKey) {
    match VALUES.lock().get(&handle) {
        Some(value) => *value,
        None => panic!("access to dead handle {handle:#x}"),
    }
}

/// Number of native calls made on the current thread.
pub fn native_calls() -> usize {
    NATIVE_CALLS.with(Cell::get)
}

/// Number of times `handle` was released.
pub fn releases(handle: TetheredHandle) -> usize {
    RELEASES.lock().get(&handle).copied().unwrap_or(0)
}

/// Returns `true` if `handle` was allocated and not released yet.
pub fn is_live(handle: TetheredHandle) -> bool {
    VALUES.lock().contains_key(&handle)
}

/// Makes the next allocation on the current thread return a sentinel.
pub fn fail_next_allocation() {
    FAIL_NEXT.with(|fail| fail.set(true));
}

unsafe impl NativeValue for CountingTuple {
    const NAME: &'static str = "CountingTuple";

    unsafe fn clone_raw(handle: TetheredHandle) -> TetheredHandle {
        record_call();
        allocate(read(handle))
    }

    unsafe fn release_raw(handle: TetheredHandle) {
        record_call();
        *RELEASES.lock().entry(handle).or_insert(0) += 1;
        if VALUES.lock().remove(&handle).is_none() {
            panic!("release of dead handle {handle:#x}");
        }
    }
}

unsafe impl DeepClone for CountingTuple {}

unsafe impl BytesKeyTupleFfi for CountingTuple {
    unsafe fn construct(a: TetheredThirtyTwoBytes, b: TetheredPublicKey) -> TetheredHandle {
        record_call();
        allocate((a, b))
    }

    unsafe fn get_a(handle: TetheredHandle) -> TetheredThirtyTwoBytes {
        record_call();
        read(handle).0
    }

    unsafe fn get_b(handle: TetheredHandle) -> TetheredPublicKey {
        record_call();
        read(handle).1
    }
}

/// Builds a tuple through the stub's constructor entry point.
pub fn stub_tuple(a: [u8; 32], b: PublicKey) -> Option<BytesKeyTuple<CountingTuple>> {
    let raw = unsafe { CountingTuple::construct(TetheredThirtyTwoBytes { data: a }, b.into()) };
    unsafe { BytesKeyTuple::from_raw(raw) }.ok()
}

/// A public key: `0x02` followed by 32 bytes of `0x01`.
pub fn public_key_bytes() -> [u8; 33] {
    let mut bytes = [0x01; 33];
    bytes[0] = 0x02;
    bytes
}

/// Routes `tracing` output to the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
