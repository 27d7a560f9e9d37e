/*!
# tethered-sys

Raw C-ABI entry points of the tethered native value library.
This crate is not meant to be used directly; most users should use [`tethered`](https://docs.rs/tethered), a safe wrapper built on top of `tethered-sys`.

## Overview

`tethered-sys` owns every value it hands out.
Values cross the boundary as opaque [`TetheredHandle`]s; the caller reads them back through accessor entry points and must call the matching `_free` entry point exactly once per owned handle.

Entry points that can fail return a handle in the sentinel range `[0, TETHERED_SENTINEL_MAX]` instead of a value.
No allocation ever lives at such a small address, so a sentinel can never be mistaken for a real handle.

| Value | Entry points |
| --- | --- |
| (32 bytes, public key) tuple | `tethered_bytes_key_tuple_{new, new_with_key, get_a, get_b, b_ref, clone, free}` |
| Public key | `tethered_public_key_{new, get, clone, free}` |
| Diagnostics (`ledger` feature) | `tethered_debug_{is_live, live_count, fail_next_allocations}` |

## Contract violations

Passing a sentinel, a freed handle, a handle of the wrong kind, or freeing a borrowed handle is undefined behavior in the C API.
With the `ledger` feature enabled these are detected, logged at `error` level and the process is aborted.

## License

`tethered-sys` is dual-licensed under the MIT License and the Apache-2.0 License.
You may choose either license when using the software.
*/

mod alloc;
#[cfg(feature = "ledger")]
mod debug;
mod ledger;
mod public_key;
mod tuple;

#[cfg(feature = "ledger")]
pub use debug::*;
pub use public_key::*;
pub use tuple::*;

/// An opaque handle to a value owned by the native library.
pub type TetheredHandle = u64;

/// The largest handle value reserved for sentinels.
///
/// Any handle in `[0, TETHERED_SENTINEL_MAX]` means "no value".
pub const TETHERED_SENTINEL_MAX: TetheredHandle = 4096;

/// Sentinel returned when no more specific reason is available.
pub const TETHERED_NONE: TetheredHandle = 0;

/// Sentinel returned when the native allocation failed.
pub const TETHERED_ERR_ALLOCATION: TetheredHandle = 2;

/// Length of the first tuple element.
pub const TETHERED_THIRTY_TWO_BYTES_LEN: usize = 32;

/// Length of a compressed public key.
pub const TETHERED_PUBLIC_KEY_LEN: usize = 33;

/// A fixed 32-byte buffer, passed by value.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TetheredThirtyTwoBytes {
    pub data: [u8; TETHERED_THIRTY_TWO_BYTES_LEN],
}

/// A compressed public key, passed by value.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TetheredPublicKey {
    pub compressed_form: [u8; TETHERED_PUBLIC_KEY_LEN],
}

/// Returns `true` if `handle` falls in the reserved sentinel range.
pub const fn tethered_is_sentinel(handle: TetheredHandle) -> bool {
    handle <= TETHERED_SENTINEL_MAX
}
