//! Fixed-length byte buffers exchanged with the native library.

use crate::error::LengthMismatchError;

/// Length of [`ThirtyTwoBytes`].
pub const THIRTY_TWO_BYTES_LEN: usize = tethered_sys::TETHERED_THIRTY_TWO_BYTES_LEN;

/// A fixed 32-byte buffer.
pub type ThirtyTwoBytes = [u8; THIRTY_TWO_BYTES_LEN];

/// Position of an element in a composite value.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Element {
    /// The first element.
    A,

    /// The second element.
    B,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "element a"),
            Self::B => write!(f, "element b"),
        }
    }
}

/// Copies `bytes` into an array of exactly `N` bytes.
///
/// # Errors
///
/// Returns [`LengthMismatchError`] if `bytes` is not `N` bytes long.
pub fn check_len<const N: usize>(
    element: Element,
    bytes: &[u8],
) -> Result<[u8; N], LengthMismatchError> {
    <[u8; N]>::try_from(bytes).map_err(|_| LengthMismatchError {
        element,
        expected: N,
        actual: bytes.len(),
    })
}

/// Lowercase hexadecimal rendering of a byte slice.
pub(crate) struct Hex<'a>(pub &'a [u8]);

impl std::fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
