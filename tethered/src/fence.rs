//! Liveness fences.
//!
//! A native call only receives the integer value of a handle.
//! Nothing ties the wrapper that owns the handle to the duration of that call, so in principle the wrapper could be considered dead, and its handle released, while the call is still running.
//!
//! Borrowing the wrapper for the whole call rules this out at compile time: [`Owned::with_raw`] holds `&self` until the closure returns, and release needs the wrapper by value.
//! [`fence`] additionally marks the wrapper as observably used after the call, so the optimizer can neither end its lifetime early nor move the drop above the call.

#[cfg(doc)]
use crate::owned::Owned;

/// Keeps `value` alive up to this point in program order.
///
/// Performs no computation and returns nothing.
#[inline(always)]
pub fn fence<T: ?Sized>(value: &T) {
    std::hint::black_box(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_is_transparent() {
        let value = vec![1u8, 2, 3];
        fence(&value);
        fence(value.as_slice());
        assert_eq!(value, [1, 2, 3]);
    }
}
