use crate::bytes::Element;
use tethered_sys::TetheredHandle;

/// A host-supplied buffer does not have the length its element requires.
///
/// Always raised before any native call is made.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct LengthMismatchError {
    /// The element the buffer was meant for.
    pub element: Element,

    /// The required length, in bytes.
    pub expected: usize,

    /// The length that was supplied, in bytes.
    pub actual: usize,
}

impl std::error::Error for LengthMismatchError {}

impl std::fmt::Display for LengthMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "invalid length for {}: expected {} bytes, got {}",
            self.element, self.expected, self.actual
        )
    }
}

/// A raw handle falls in the reserved sentinel range and cannot be adopted.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct InvalidHandleError {
    /// The rejected raw value.
    pub raw: TetheredHandle,
}

impl InvalidHandleError {
    /// Returns the reason encoded in the sentinel, if the native library defines one.
    pub const fn reason(&self) -> Option<&'static str> {
        match self.raw {
            tethered_sys::TETHERED_ERR_ALLOCATION => Some("allocation failure"),
            _ => None,
        }
    }
}

impl std::error::Error for InvalidHandleError {}

impl std::fmt::Display for InvalidHandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "sentinel handle {} ({reason})", self.raw),
            None => write!(f, "sentinel handle {}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = LengthMismatchError {
            element: Element::A,
            expected: 32,
            actual: 31,
        };

        assert_eq!(
            error.to_string(),
            "invalid length for element a: expected 32 bytes, got 31"
        );
    }

    #[test]
    fn test_invalid_handle_display() {
        let error = InvalidHandleError {
            raw: tethered_sys::TETHERED_ERR_ALLOCATION,
        };
        assert_eq!(error.to_string(), "sentinel handle 2 (allocation failure)");

        let error = InvalidHandleError { raw: 4096 };
        assert_eq!(error.reason(), None);
        assert_eq!(error.to_string(), "sentinel handle 4096");
    }
}
