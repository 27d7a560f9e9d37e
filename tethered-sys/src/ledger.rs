//! Registry of live native allocations.
//!
//! With the `ledger` feature disabled only the sentinel check remains.

use crate::{tethered_is_sentinel, TetheredHandle};

#[cfg(feature = "ledger")]
use once_cell::sync::Lazy;
#[cfg(feature = "ledger")]
use parking_lot::Mutex;
#[cfg(feature = "ledger")]
use std::collections::HashMap;

/// What a live handle refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Tuple,
    PublicKey,

    /// A public key embedded in the tuple `parent`. Never freed on its own.
    PublicKeyView { parent: TetheredHandle },
}

#[cfg(feature = "ledger")]
#[derive(Default)]
struct Ledger {
    live: HashMap<TetheredHandle, Kind>,

    /// Views borrowed from each tuple, dropped together with it.
    views: HashMap<TetheredHandle, Vec<TetheredHandle>>,
}

#[cfg(feature = "ledger")]
static LIVE: Lazy<Mutex<Ledger>> = Lazy::new(|| Mutex::new(Ledger::default()));

pub(crate) fn insert(handle: TetheredHandle, kind: Kind) {
    #[cfg(feature = "ledger")]
    {
        let mut ledger = LIVE.lock();
        let fresh = ledger.live.insert(handle, kind).is_none();
        if let (true, Kind::PublicKeyView { parent }) = (fresh, kind) {
            ledger.views.entry(parent).or_default().push(handle);
        }
    }

    #[cfg(not(feature = "ledger"))]
    let _ = (handle, kind);
}

/// Aborts unless `handle` is live and of a kind `accepts` allows.
pub(crate) fn expect(op: &'static str, handle: TetheredHandle, accepts: impl Fn(Kind) -> bool) {
    if tethered_is_sentinel(handle) {
        violation(op, handle, "sentinel handle");
    }

    #[cfg(feature = "ledger")]
    match LIVE.lock().live.get(&handle) {
        None => violation(op, handle, "unknown or released handle"),
        Some(kind) if !accepts(*kind) => violation(op, handle, "handle of the wrong kind"),
        Some(_) => {}
    }

    #[cfg(not(feature = "ledger"))]
    let _ = accepts;
}

/// Forgets `handle` ahead of its deallocation.
///
/// Releasing a tuple also invalidates every view borrowed from it.
pub(crate) fn remove(op: &'static str, handle: TetheredHandle, kind: Kind) {
    if tethered_is_sentinel(handle) {
        violation(op, handle, "sentinel handle");
    }

    #[cfg(feature = "ledger")]
    {
        let mut ledger = LIVE.lock();
        match ledger.live.get(&handle).copied() {
            None => violation(op, handle, "unknown or released handle"),
            Some(Kind::PublicKeyView { .. }) => violation(op, handle, "release of a borrowed handle"),
            Some(found) if found != kind => violation(op, handle, "handle of the wrong kind"),
            Some(_) => {
                ledger.live.remove(&handle);
                for view in ledger.views.remove(&handle).unwrap_or_default() {
                    ledger.live.remove(&view);
                }
            }
        }
    }

    #[cfg(not(feature = "ledger"))]
    let _ = kind;
}

#[cfg(feature = "ledger")]
pub(crate) fn lookup(handle: TetheredHandle) -> Option<Kind> {
    LIVE.lock().live.get(&handle).copied()
}

#[cfg(feature = "ledger")]
pub(crate) fn len() -> usize {
    LIVE.lock().live.len()
}

#[cold]
pub(crate) fn violation(op: &'static str, handle: TetheredHandle, reason: &'static str) -> ! {
    tracing::error!(target: "tethered_sys", op, handle, reason, "native contract violation");
    std::process::abort()
}
