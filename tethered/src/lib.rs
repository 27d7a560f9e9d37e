/*!
# tethered

Safe ownership of values that live in a native library.

## Overview

A native library hands out values as opaque handles.
`tethered` wraps each handle in exactly one releasing owner, [`Owned<T>`], that:

- releases the handle exactly once, when the owner is dropped;
- cannot be used after release, because release consumes the owner;
- keeps alive the host objects its native value points into, through its [`Retention`] set;
- duplicates the value through the native library's own clone entry point when a copy has to cross an ownership boundary;
- stays alive for the whole duration of every native call that uses its handle (see [`fence()`](fence())).

Native calls that can fail return a sentinel in `[0, SENTINEL_MAX]` instead of a handle.
Constructors turn sentinels into `None`; adopting a sentinel directly is an [`InvalidHandleError`].

Views into memory owned by another value are [`Borrowed<T>`]: they never release their handle and retain their owner.

## Example

```
use std::sync::Arc;
use tethered::{BytesKeyTuple, LengthMismatchError};

let mut key = [0x01; 33];
key[0] = 0x02;

let tuple = BytesKeyTuple::of(&[0x00; 32], &key)?.expect("native construction failed");
assert_eq!(tuple.get_a(), [0x00; 32]);
assert_eq!(tuple.get_b().as_bytes(), &key);

let copy = tuple.duplicate().expect("native clone failed");
drop(tuple);
assert_eq!(copy.get_b().as_bytes(), &key);

let view = Arc::new(copy).b_ref().expect("no view");
assert_eq!(view.get().as_bytes(), &key);
# Ok::<(), LengthMismatchError>(())
```

## Logging

Lifetime events are emitted through [`tracing`] under the `tethered::handle` target.
Adoption, duplication, borrowing, transfer and release are logged at `trace` level; sentinel results at `debug` level.

## Features

- `ledger` (default): enables the allocation ledger of `tethered-sys`, which aborts on any use of an unknown or released handle and exposes the `tethered_debug_*` diagnostics.
*/

pub mod borrowed;
pub use borrowed::*;

pub mod bytes;
pub use bytes::*;

pub mod error;
pub use error::*;

pub mod fence;
pub use fence::*;

pub mod handle;
pub use handle::*;

pub mod native;
pub use native::*;

pub mod owned;
pub use owned::*;

pub mod public_key;
pub use public_key::*;

pub mod retention;
pub use retention::*;

pub mod tuple;
pub use tuple::*;

pub use tethered_sys::TetheredHandle;
