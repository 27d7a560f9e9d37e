use crate::alloc::{get, into_handle, take};
use crate::ledger::{self, Kind};
use crate::{TetheredHandle, TetheredPublicKey};

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub(crate) struct NativePublicKey {
    pub(crate) key: TetheredPublicKey,
}

fn is_readable(kind: Kind) -> bool {
    matches!(kind, Kind::PublicKey | Kind::PublicKeyView { .. })
}

/// Creates a native public key holding a copy of `key`.
///
/// The bytes are stored as given. Returns a sentinel if the key could not be allocated.
///
/// # Safety
///
/// Always safe to call; `unsafe` for uniformity with the rest of the C API.
#[no_mangle]
pub unsafe extern "C" fn tethered_public_key_new(key: TetheredPublicKey) -> TetheredHandle {
    into_handle(NativePublicKey { key }, Kind::PublicKey)
}

/// Reads a public key.
///
/// # Safety
///
/// `key` must be a live public key handle, owned or borrowed.
#[no_mangle]
pub unsafe extern "C" fn tethered_public_key_get(key: TetheredHandle) -> TetheredPublicKey {
    ledger::expect("tethered_public_key_get", key, is_readable);
    get::<NativePublicKey>(key).key
}

/// Creates an owned copy of a public key. Borrowed handles may be cloned too.
///
/// # Safety
///
/// `orig` must be a live public key handle, owned or borrowed.
#[no_mangle]
pub unsafe extern "C" fn tethered_public_key_clone(orig: TetheredHandle) -> TetheredHandle {
    ledger::expect("tethered_public_key_clone", orig, is_readable);
    into_handle(*get::<NativePublicKey>(orig), Kind::PublicKey)
}

/// Releases a public key.
///
/// # Safety
///
/// `key` must be an owned public key handle that has not been released or moved into another value.
#[no_mangle]
pub unsafe extern "C" fn tethered_public_key_free(key: TetheredHandle) {
    ledger::remove("tethered_public_key_free", key, Kind::PublicKey);
    drop(take::<NativePublicKey>(key));
}
