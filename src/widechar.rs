// SPDX-License-Identifier: MIT

//! Bridge between host-native strings and the CLI's 16-bit wide character
//! buffers.
//!
//! The CLI's `SQLWCHAR` is always a 16-bit code unit, even on platforms
//! (Unix with `wchar_t` as 32-bit) where the host's native wide character
//! is wider. This module only ever deals in `u16` so there is nothing to
//! get wrong there; its job is the narrow/wide round trip and the
//! byte-vs-code-unit length convention.
//!
//! Only the basic multilingual plane is handled: every probe that uses this
//! bridge passes ASCII-range literals, so a full UTF-16 surrogate-pair
//! encoder would be unexercised code.

/// Owns a null-terminated, widened buffer for the lifetime of a CLI call.
pub struct WideBuffer {
    units: Vec<u16>,
}

impl WideBuffer {
    /// Widen `s` into a null-terminated `u16` buffer.
    pub fn from_str(s: &str) -> Self {
        let mut units: Vec<u16> = s.encode_utf16().collect();
        units.push(0);
        WideBuffer { units }
    }

    /// Pointer to the first code unit, for passing to an `SQLWCHAR*`
    /// parameter. Valid for as long as `self` is alive.
    pub fn as_ptr(&self) -> *const u16 {
        self.units.as_ptr()
    }

    /// Length in 16-bit code units, excluding the terminating null.
    pub fn len_units(&self) -> usize {
        self.units.len() - 1
    }

    /// Length in bytes, excluding the terminating null. The CLI's wide
    /// entry points report lengths in bytes, never code units; callers
    /// filling in a `string_length` parameter must use this, not
    /// [`WideBuffer::len_units`].
    pub fn len_bytes(&self) -> usize {
        self.len_units() * std::mem::size_of::<u16>()
    }
}

/// Decode a byte-length-prefixed wide buffer back into a `String`.
///
/// `byte_len` is a byte count, per the bridge's length convention, and is
/// rounded down to a whole number of code units (an odd byte count
/// indicates a truncated buffer from a misbehaving driver; decoding what
/// is available is preferable to panicking on probe-path code).
pub fn decode_wide(buf: &[u16], byte_len: usize) -> String {
    let unit_len = (byte_len / std::mem::size_of::<u16>()).min(buf.len());
    String::from_utf16_lossy(&buf[..unit_len])
}

/// Scan a widened buffer back to the original narrow string, assuming it
/// is null-terminated. Used by the round-trip law in the testable
/// properties: widen then scan an ASCII string yields the same string.
pub fn scan_to_narrow(buf: &WideBuffer) -> String {
    decode_wide(&buf.units, buf.len_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_then_scan_roundtrips_ascii() {
        for s in ["", "a", "SELECT 1", "Driver={X};Mode=Success;"] {
            let widened = WideBuffer::from_str(s);
            assert_eq!(scan_to_narrow(&widened), s);
        }
    }

    #[test]
    fn len_bytes_is_twice_len_units() {
        let w = WideBuffer::from_str("abcd");
        assert_eq!(w.len_units(), 4);
        assert_eq!(w.len_bytes(), 8);
    }

    #[test]
    fn decode_wide_truncates_to_whole_units() {
        let w = WideBuffer::from_str("hello");
        let buf = unsafe { std::slice::from_raw_parts(w.as_ptr(), w.len_units() + 1) };
        // Pretend the driver only reported 3 bytes available (1.5 code units).
        let decoded = decode_wide(buf, 3);
        assert_eq!(decoded, "h");
    }
}
