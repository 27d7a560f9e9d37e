//! Compressed public keys, as host values and as native values.

use crate::borrowed::Borrowed;
use crate::bytes::{Element, Hex, check_len};
use crate::error::LengthMismatchError;
use crate::native::{DeepClone, NativeValue};
use crate::owned::Owned;
use tethered_sys::TetheredHandle;

/// Length of a compressed public key.
pub const PUBLIC_KEY_LEN: usize = tethered_sys::TETHERED_PUBLIC_KEY_LEN;

/// A compressed public key: a one-byte prefix followed by a 32-byte coordinate.
///
/// This is a plain host value. Only its length is checked; the bytes cross the boundary as they are.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Creates a public key from its serialized form.
    pub const fn from_array(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a public key from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatchError`] if `bytes` is not exactly [`PUBLIC_KEY_LEN`] bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, LengthMismatchError> {
        check_len::<PUBLIC_KEY_LEN>(Element::B, bytes).map(Self)
    }

    /// Returns the serialized form.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = LengthMismatchError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(bytes)
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<PublicKey> for tethered_sys::TetheredPublicKey {
    fn from(key: PublicKey) -> Self {
        Self {
            compressed_form: key.0,
        }
    }
}

impl From<tethered_sys::TetheredPublicKey> for PublicKey {
    fn from(key: tethered_sys::TetheredPublicKey) -> Self {
        Self(key.compressed_form)
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Hex(&self.0))
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "PublicKey({})", Hex(&self.0))
    }
}

/// Lifetime entry points of a native public key.
#[derive(Debug)]
pub struct NativePublicKey;

unsafe impl NativeValue for NativePublicKey {
    const NAME: &'static str = "PublicKey";

    unsafe fn clone_raw(handle: TetheredHandle) -> TetheredHandle {
        unsafe { tethered_sys::tethered_public_key_clone(handle) }
    }

    unsafe fn release_raw(handle: TetheredHandle) {
        unsafe { tethered_sys::tethered_public_key_free(handle) }
    }
}

unsafe impl DeepClone for NativePublicKey {}

/// A public key owned by the native library.
#[derive(Debug)]
pub struct PublicKeyHandle(pub(crate) Owned<NativePublicKey>);

impl PublicKeyHandle {
    /// Hands `key` to the native library.
    ///
    /// Returns `None` if the native library cannot allocate it.
    pub fn new(key: PublicKey) -> Option<Self> {
        let raw = unsafe { tethered_sys::tethered_public_key_new(key.into()) };
        unsafe { Owned::adopt_return(raw) }.map(Self)
    }

    /// Returns a copy of the key.
    pub fn get(&self) -> PublicKey {
        self.0
            .with_raw(|raw| unsafe { tethered_sys::tethered_public_key_get(raw) })
            .into()
    }

    /// Returns a handle to an independent copy of the key.
    pub fn duplicate(&self) -> Option<Self> {
        self.0.duplicate().map(Self)
    }

    /// Returns the raw FFI handle.
    ///
    /// This is intended for internal use and advanced scenarios.
    pub fn raw(&self) -> TetheredHandle {
        self.0.raw()
    }

    /// Returns the underlying owner.
    pub fn into_owned(self) -> Owned<NativePublicKey> {
        self.0
    }
}

/// A public key embedded in another native value.
///
/// Keeps the value it was borrowed from alive.
#[derive(Debug)]
pub struct PublicKeyRef(pub(crate) Borrowed<NativePublicKey>);

impl PublicKeyRef {
    /// Returns a copy of the key.
    pub fn get(&self) -> PublicKey {
        self.0
            .with_raw(|raw| unsafe { tethered_sys::tethered_public_key_get(raw) })
            .into()
    }

    /// Returns the underlying view.
    pub fn as_borrowed(&self) -> &Borrowed<NativePublicKey> {
        &self.0
    }

    /// Returns a handle to an independent copy of the key, which does not keep the owner alive.
    pub fn to_handle(&self) -> Option<PublicKeyHandle> {
        self.0.duplicate().map(PublicKeyHandle)
    }

    /// Returns the raw FFI handle.
    ///
    /// This is intended for internal use and advanced scenarios.
    pub fn raw(&self) -> TetheredHandle {
        self.0.raw()
    }
}
