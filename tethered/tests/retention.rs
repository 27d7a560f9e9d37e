#![cfg(feature = "ledger")]

mod common;

use common::*;
use std::sync::Arc;
use tethered::*;
use tethered_sys::tethered_debug_is_live;

fn is_native_live(raw: TetheredHandle) -> bool {
    unsafe { tethered_debug_is_live(raw) }
}

fn tuple(a: u8) -> BytesKeyTuple {
    BytesKeyTuple::new([a; 32], PublicKey::from(public_key_bytes())).unwrap()
}

mod b_ref {
    use super::*;

    #[test]
    fn test_view_keeps_tuple_alive() {
        init_tracing();

        let tuple = Arc::new(tuple(0x10));
        let tuple_raw = tuple.raw();
        let weak = Arc::downgrade(&tuple);

        let view = tuple.b_ref().unwrap();
        drop(tuple);

        assert!(weak.upgrade().is_some());
        assert!(is_native_live(tuple_raw));
        assert!(is_native_live(view.raw()));
        assert_eq!(view.get().as_bytes(), &public_key_bytes());

        let view_raw = view.raw();
        drop(view);
        assert!(weak.upgrade().is_none());
        assert!(!is_native_live(tuple_raw));
        assert!(!is_native_live(view_raw));
    }

    #[test]
    fn test_view_copy_is_independent() {
        let tuple = Arc::new(tuple(0x11));
        let view = tuple.b_ref().unwrap();

        let key = view.to_handle().unwrap();
        drop(view);
        drop(tuple);

        assert!(is_native_live(key.raw()));
        assert_eq!(key.get().as_bytes(), &public_key_bytes());
    }

    #[test]
    fn test_view_retains_its_owner() {
        let tuple = Arc::new(tuple(0x12));
        let view = tuple.b_ref().unwrap();

        assert_eq!(view.as_borrowed().retained().len(), 1);
        assert_eq!(Arc::strong_count(&tuple), 2);
    }
}

mod with_key {
    use super::*;

    #[test]
    fn test_moved_key_belongs_to_tuple() {
        let key = PublicKeyHandle::new(PublicKey::from(public_key_bytes())).unwrap();
        let key_raw = key.raw();

        let tuple = BytesKeyTuple::with_key([0x20; 32], key).unwrap();
        assert!(!is_native_live(key_raw));
        assert_eq!(tuple.get_a(), [0x20; 32]);
        assert_eq!(tuple.get_b().as_bytes(), &public_key_bytes());
    }

    #[test]
    fn test_borrowed_key_is_duplicated() {
        let key = PublicKeyHandle::new(PublicKey::from(public_key_bytes())).unwrap();

        let tuple = BytesKeyTuple::with_key_ref([0x21; 32], &key).unwrap();
        drop(tuple);

        assert!(is_native_live(key.raw()));
        assert_eq!(key.get().as_bytes(), &public_key_bytes());
    }

    #[test]
    fn test_failed_construction_releases_moved_key() {
        let key = PublicKeyHandle::new(PublicKey::from(public_key_bytes())).unwrap();
        let key_raw = key.raw();

        unsafe { tethered_sys::tethered_debug_fail_next_allocations(1) };
        assert!(BytesKeyTuple::with_key([0x22; 32], key).is_none());
        assert!(!is_native_live(key_raw));
    }
}

mod duplicate_retaining {
    use super::*;

    #[test]
    fn test_copy_retains_original() {
        let key = PublicKeyHandle::new(PublicKey::from(public_key_bytes())).unwrap();
        let original = Arc::new(key.into_owned());
        let original_raw = original.raw();

        let copy = original.duplicate_retaining().unwrap();
        drop(original);

        assert!(is_native_live(original_raw));
        assert_eq!(copy.retained().len(), 1);

        drop(copy);
        assert!(!is_native_live(original_raw));
    }
}
