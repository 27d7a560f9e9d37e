//! The (32 bytes, public key) tuple.

use crate::borrowed::Borrowed;
use crate::bytes::{Element, Hex, THIRTY_TWO_BYTES_LEN, ThirtyTwoBytes, check_len};
use crate::error::{InvalidHandleError, LengthMismatchError};
use crate::native::{DeepClone, NativeValue};
use crate::owned::Owned;
use crate::public_key::{PublicKey, PublicKeyHandle, PublicKeyRef};
use std::sync::Arc;
use tethered_sys::{TetheredHandle, TetheredPublicKey, TetheredThirtyTwoBytes};

/// Entry points of a native (32 bytes, public key) tuple.
///
/// # Safety
///
/// [`Self::construct`] must copy its arguments and return either a sentinel or a fresh owned handle.
pub unsafe trait BytesKeyTupleFfi: NativeValue {
    /// Builds a new native tuple.
    ///
    /// # Safety
    ///
    /// Implementation-defined; always safe for the native library.
    unsafe fn construct(a: TetheredThirtyTwoBytes, b: TetheredPublicKey) -> TetheredHandle;

    /// Reads the first element.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn get_a(handle: TetheredHandle) -> TetheredThirtyTwoBytes;

    /// Reads the second element.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn get_b(handle: TetheredHandle) -> TetheredPublicKey;
}

/// The tuple implemented by `tethered-sys`.
#[derive(Debug)]
pub struct NativeBytesKeyTuple;

unsafe impl NativeValue for NativeBytesKeyTuple {
    const NAME: &'static str = "BytesKeyTuple";

    unsafe fn clone_raw(handle: TetheredHandle) -> TetheredHandle {
        unsafe { tethered_sys::tethered_bytes_key_tuple_clone(handle) }
    }

    unsafe fn release_raw(handle: TetheredHandle) {
        unsafe { tethered_sys::tethered_bytes_key_tuple_free(handle) }
    }
}

unsafe impl DeepClone for NativeBytesKeyTuple {}

unsafe impl BytesKeyTupleFfi for NativeBytesKeyTuple {
    unsafe fn construct(a: TetheredThirtyTwoBytes, b: TetheredPublicKey) -> TetheredHandle {
        unsafe { tethered_sys::tethered_bytes_key_tuple_new(a, b) }
    }

    unsafe fn get_a(handle: TetheredHandle) -> TetheredThirtyTwoBytes {
        unsafe { tethered_sys::tethered_bytes_key_tuple_get_a(handle) }
    }

    unsafe fn get_b(handle: TetheredHandle) -> TetheredPublicKey {
        unsafe { tethered_sys::tethered_bytes_key_tuple_get_b(handle) }
    }
}

/// A tuple of a 32-byte buffer and a compressed public key, owned by the native library.
///
/// [`BytesKeyTuple`] is generic over the [`BytesKeyTupleFfi`] implementation, which defaults to the `tethered-sys` one.
pub struct BytesKeyTuple<N: BytesKeyTupleFfi = NativeBytesKeyTuple> {
    inner: Owned<N>,
}

impl<N: BytesKeyTupleFfi> BytesKeyTuple<N> {
    /// Adopts a raw tuple handle.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandleError`] if `raw` is a sentinel.
    ///
    /// # Safety
    ///
    /// `raw` must be a live tuple handle that nothing else releases.
    pub unsafe fn from_raw(raw: TetheredHandle) -> Result<Self, InvalidHandleError> {
        unsafe { Owned::adopt(raw) }.map(|inner| Self { inner })
    }

    /// Returns the first element.
    pub fn get_a(&self) -> ThirtyTwoBytes {
        self.inner.with_raw(|raw| unsafe { N::get_a(raw) }).data
    }

    /// Returns the second element.
    pub fn get_b(&self) -> PublicKey {
        self.inner.with_raw(|raw| unsafe { N::get_b(raw) }).into()
    }

    /// Creates a new tuple which has the same data as `self`, with every buffer duplicated.
    ///
    /// Returns `None` if the native library could not produce a copy.
    pub fn duplicate(&self) -> Option<Self>
    where
        N: DeepClone,
    {
        self.inner.duplicate().map(|inner| Self { inner })
    }

    /// Returns the raw FFI handle.
    ///
    /// This is intended for internal use and advanced scenarios.
    pub fn raw(&self) -> TetheredHandle {
        self.inner.raw()
    }

    /// Hands the tuple over to the native library and returns its raw handle.
    pub fn into_raw(self) -> TetheredHandle {
        let (raw, retained) = self.inner.into_raw();
        debug_assert!(retained.is_empty(), "tuples retain nothing");
        raw
    }
}

impl BytesKeyTuple<NativeBytesKeyTuple> {
    /// Creates a new tuple from byte slices.
    ///
    /// Returns `Ok(None)` if the native library could not build the tuple.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatchError`] if `a` is not 32 bytes or `b` is not 33 bytes long.
    /// No native call is made in that case.
    pub fn of(a: &[u8], b: &[u8]) -> Result<Option<Self>, LengthMismatchError> {
        let a = check_len::<THIRTY_TWO_BYTES_LEN>(Element::A, a)?;
        let b = PublicKey::try_from_slice(b)?;
        Ok(Self::new(a, b))
    }

    /// Creates a new tuple from the contained elements, which are copied as they are.
    ///
    /// Returns `None` if the native library could not build the tuple.
    pub fn new(a: ThirtyTwoBytes, b: PublicKey) -> Option<Self> {
        let raw = unsafe { NativeBytesKeyTuple::construct(TetheredThirtyTwoBytes { data: a }, b.into()) };
        unsafe { Owned::adopt_return(raw) }.map(|inner| Self { inner })
    }

    /// Creates a new tuple that takes over the native public key `b`.
    ///
    /// Returns `None` if the native library could not build the tuple, in which case `b` is released anyway.
    pub fn with_key(a: ThirtyTwoBytes, b: PublicKeyHandle) -> Option<Self> {
        let (b, retained) = b.into_owned().into_raw();
        debug_assert!(retained.is_empty(), "public keys retain nothing");
        let a = TetheredThirtyTwoBytes { data: a };
        let raw = unsafe { tethered_sys::tethered_bytes_key_tuple_new_with_key(a, b) };
        unsafe { Owned::adopt_return(raw) }.map(|inner| Self { inner })
    }

    /// Creates a new tuple from a copy of the native public key `b`.
    ///
    /// `b` stays owned by the caller.
    /// Returns `None` if the key could not be copied or the tuple could not be built.
    pub fn with_key_ref(a: ThirtyTwoBytes, b: &PublicKeyHandle) -> Option<Self> {
        Self::with_key(a, b.duplicate()?)
    }

    /// Returns a view of the second element that reads it in place.
    ///
    /// The view keeps the tuple alive.
    /// Returns `None` if the native library hands out no view.
    pub fn b_ref(self: &Arc<Self>) -> Option<PublicKeyRef> {
        let raw = self
            .inner
            .with_raw(|raw| unsafe { tethered_sys::tethered_bytes_key_tuple_b_ref(raw) });

        unsafe { Borrowed::adopt_view(raw, Arc::clone(self)) }
            .ok()
            .map(PublicKeyRef)
    }
}

impl<N: BytesKeyTupleFfi> PartialEq for BytesKeyTuple<N> {
    fn eq(&self, other: &Self) -> bool {
        self.get_a() == other.get_a() && self.get_b() == other.get_b()
    }
}

impl<N: BytesKeyTupleFfi> Eq for BytesKeyTuple<N> {}

impl<N: BytesKeyTupleFfi> std::fmt::Debug for BytesKeyTuple<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BytesKeyTuple")
            .field("inner", &self.inner)
            .field("a", &format_args!("{}", Hex(&self.get_a())))
            .field("b", &self.get_b())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PublicKey {
        let mut bytes = [0x01; 33];
        bytes[0] = 0x02;
        PublicKey::from(bytes)
    }

    mod new {
        use super::*;

        #[test]
        fn test_accessors() {
            let tuple = BytesKeyTuple::new([0x42; 32], key()).unwrap();
            assert_eq!(tuple.get_a(), [0x42; 32]);
            assert_eq!(tuple.get_b(), key());
        }

        #[test]
        fn test_key_is_not_interpreted() {
            let mut bytes = [0x01; 33];
            bytes[0] = 0x05;
            let tuple = BytesKeyTuple::new([0; 32], PublicKey::from(bytes)).unwrap();
            assert_eq!(tuple.get_b().as_bytes(), &bytes);
        }
    }

    mod of {
        use super::*;

        #[test]
        fn test_wrong_b_length() {
            let result = BytesKeyTuple::of(&[0; 32], &[0x02; 34]);
            assert_eq!(
                result.unwrap_err(),
                LengthMismatchError {
                    element: Element::B,
                    expected: 33,
                    actual: 34,
                }
            );
        }
    }

    #[test]
    fn test_equality_follows_contents() {
        let tuple = BytesKeyTuple::new([7; 32], key()).unwrap();
        let copy = tuple.duplicate().unwrap();
        let other = BytesKeyTuple::new([8; 32], key()).unwrap();

        assert_eq!(tuple, copy);
        assert_ne!(tuple, other);
    }

    #[test]
    fn test_debug_shows_elements() {
        let tuple = BytesKeyTuple::new([0xff; 32], key()).unwrap();
        let debug = format!("{tuple:?}");
        assert!(debug.contains(&"ff".repeat(32)));
        assert!(debug.contains("PublicKey(02"));
    }
}
