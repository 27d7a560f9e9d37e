use crate::alloc::{get, into_handle, take};
use crate::ledger::{self, Kind};
use crate::public_key::NativePublicKey;
use crate::{TetheredHandle, TetheredPublicKey, TetheredThirtyTwoBytes};

#[repr(C)]
#[derive(Copy, Clone, Debug)]
struct NativeTuple {
    a: TetheredThirtyTwoBytes,
    b: NativePublicKey,
}

fn is_tuple(kind: Kind) -> bool {
    kind == Kind::Tuple
}

/// Creates a new tuple from the contained elements.
///
/// Both elements are copied as given. Returns a sentinel if the tuple could not be allocated.
///
/// # Safety
///
/// Always safe to call; `unsafe` for uniformity with the rest of the C API.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_new(
    a: TetheredThirtyTwoBytes,
    b: TetheredPublicKey,
) -> TetheredHandle {
    into_handle(
        NativeTuple {
            a,
            b: NativePublicKey { key: b },
        },
        Kind::Tuple,
    )
}

/// Creates a new tuple, taking ownership of the native public key `b`.
///
/// `b` is consumed even if the tuple could not be allocated.
///
/// # Safety
///
/// `b` must be an owned public key handle; it must not be used or released afterwards.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_new_with_key(
    a: TetheredThirtyTwoBytes,
    b: TetheredHandle,
) -> TetheredHandle {
    ledger::remove("tethered_bytes_key_tuple_new_with_key", b, Kind::PublicKey);
    let b = take::<NativePublicKey>(b);

    into_handle(NativeTuple { a, b }, Kind::Tuple)
}

/// Returns the first element.
///
/// # Safety
///
/// `tuple` must be a live tuple handle.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_get_a(tuple: TetheredHandle) -> TetheredThirtyTwoBytes {
    ledger::expect("tethered_bytes_key_tuple_get_a", tuple, is_tuple);
    get::<NativeTuple>(tuple).a
}

/// Returns a copy of the second element.
///
/// # Safety
///
/// `tuple` must be a live tuple handle.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_get_b(tuple: TetheredHandle) -> TetheredPublicKey {
    ledger::expect("tethered_bytes_key_tuple_get_b", tuple, is_tuple);
    get::<NativeTuple>(tuple).b.key
}

/// Returns a borrowed public key handle pointing into `tuple`.
///
/// The returned handle is valid until `tuple` is released, and must never be released itself.
///
/// # Safety
///
/// `tuple` must be a live tuple handle.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_b_ref(tuple: TetheredHandle) -> TetheredHandle {
    ledger::expect("tethered_bytes_key_tuple_b_ref", tuple, is_tuple);
    let view = &get::<NativeTuple>(tuple).b as *const NativePublicKey as usize as TetheredHandle;
    ledger::insert(view, Kind::PublicKeyView { parent: tuple });
    view
}

/// Creates a new tuple which has the same data as `orig`, with every buffer duplicated.
///
/// # Safety
///
/// `orig` must be a live tuple handle.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_clone(orig: TetheredHandle) -> TetheredHandle {
    ledger::expect("tethered_bytes_key_tuple_clone", orig, is_tuple);
    into_handle(*get::<NativeTuple>(orig), Kind::Tuple)
}

/// Releases a tuple and invalidates every handle borrowed from it.
///
/// # Safety
///
/// `tuple` must be a live tuple handle that has not been released yet.
#[no_mangle]
pub unsafe extern "C" fn tethered_bytes_key_tuple_free(tuple: TetheredHandle) {
    ledger::remove("tethered_bytes_key_tuple_free", tuple, Kind::Tuple);
    drop(take::<NativeTuple>(tuple));
}
