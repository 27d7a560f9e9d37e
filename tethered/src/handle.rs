//! Raw handles and the sentinel convention.
//!
//! Native entry points that can fail return a single integer that is either a handle or a sentinel.
//! Every raw value in `[0, SENTINEL_MAX]` is a sentinel: no allocation ever lives at such an address.
//! [`NativeReturn`] splits that channel into a proper tagged result as soon as it reaches the host.

use crate::error::InvalidHandleError;
use tethered_sys::TetheredHandle;

/// The largest raw value reserved for sentinels.
pub const SENTINEL_MAX: TetheredHandle = tethered_sys::TETHERED_SENTINEL_MAX;

/// Returns `true` if `raw` is a sentinel rather than a handle.
pub const fn is_sentinel(raw: TetheredHandle) -> bool {
    tethered_sys::tethered_is_sentinel(raw)
}

/// A raw handle known to lie outside the sentinel range.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Handle(TetheredHandle);

impl Handle {
    /// Validates `raw` against the sentinel range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandleError`] if `raw` is a sentinel.
    pub const fn new(raw: TetheredHandle) -> Result<Self, InvalidHandleError> {
        if is_sentinel(raw) {
            Err(InvalidHandleError { raw })
        } else {
            Ok(Self(raw))
        }
    }

    /// Returns the raw value to pass to the native library.
    pub const fn get(self) -> TetheredHandle {
        self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The value returned by a native entry point that may fail.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NativeReturn {
    /// The call produced a value.
    Value(Handle),

    /// The call produced no value; the sentinel is kept for diagnostics.
    Absent(TetheredHandle),
}

impl NativeReturn {
    /// Returns the handle, if any.
    pub const fn value(self) -> Option<Handle> {
        match self {
            Self::Value(handle) => Some(handle),
            Self::Absent(_) => None,
        }
    }
}

impl From<TetheredHandle> for NativeReturn {
    fn from(raw: TetheredHandle) -> Self {
        match Handle::new(raw) {
            Ok(handle) => Self::Value(handle),
            Err(_) => Self::Absent(raw),
        }
    }
}
