use std::sync::Arc;
use tethered::{BytesKeyTuple, PublicKey, PublicKeyHandle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Print every handle acquisition and release.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let a = [0x00; 32];
    let mut b = [0x01; 33];
    b[0] = 0x02;

    // Construct from untrusted slices: lengths are checked before the native call.
    let original = BytesKeyTuple::of(&a, &b)?.ok_or("the native library rejected the tuple")?;
    println!("original: {original:?}");

    // An independent copy outlives the original.
    let copy = original.duplicate().ok_or("could not duplicate the tuple")?;
    drop(original);
    println!("copy after dropping the original: a = {:02x?}, b = {}", copy.get_a(), copy.get_b());

    // A view of the embedded key keeps the tuple alive.
    let shared = Arc::new(copy);
    let view = shared.b_ref().ok_or("could not borrow the key")?;
    drop(shared);
    println!("key read through a view of a dropped tuple: {}", view.get());
    drop(view);

    // Moving a native key into a tuple transfers its ownership.
    let key = PublicKeyHandle::new(PublicKey::from(b)).ok_or("the native library rejected the key")?;
    let tuple = BytesKeyTuple::with_key([0xff; 32], key).ok_or("could not build the tuple")?;
    println!("tuple built from a native key: {tuple:?}");

    Ok(())
}
