#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

/// The 128-bit secret key of the facade transform, held as two 64-bit words.
///
/// The key is an opaque input supplied by an external key-management
/// component. This crate never writes it anywhere: `Key` has no `Display`,
/// no serialization, and a redacting [`Debug`](fmt::Debug) impl.
///
/// # Examples
///
/// ```rust
/// use uuid47::Key;
///
/// let a: Key = "0123456789abcdef:fedcba9876543210".parse()?;
/// let b: Key = "0x0123456789abcdef : 0xFEDCBA9876543210".parse()?;
/// let c: Key = "0123456789abcdeffedcba9876543210".parse()?;
/// assert_eq!(a, b);
/// assert_eq!(a, c);
/// # Ok::<(), uuid47::KeyFormatError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Key {
    pub(crate) k0: u64,
    pub(crate) k1: u64,
}

impl Key {
    /// Creates a key from its two 64-bit words.
    pub const fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    /// Creates a key from 16 raw bytes: `k0` from bytes 0-7 and `k1` from
    /// bytes 8-15, each read little-endian.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            k0: u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
            k1: u64::from_le_bytes([
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14],
                bytes[15],
            ]),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

impl From<[u8; 16]> for Key {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes(src)
    }
}

impl str::FromStr for Key {
    type Err = KeyFormatError;

    /// Creates a key from its textual encoding: either two colon-separated
    /// 16-hex-digit halves or 32 contiguous hex digits, with an optional
    /// `0x`/`0X` prefix per half and ASCII whitespace ignored throughout.
    /// Each half is read as 8 bytes little-endian.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: KeyFormatError = KeyFormatError {};

        // longest well-formed input: "0x" + 16 digits, ':', "0x" + 16 digits
        let mut compact = [0u8; 37];
        let mut len = 0;
        for c in src.bytes() {
            if c.is_ascii_whitespace() {
                continue;
            }
            *compact.get_mut(len).ok_or(ERR)? = c;
            len += 1;
        }
        let compact = &compact[..len];

        match compact.iter().position(|&c| c == b':') {
            Some(pos) => Ok(Self::new(
                parse_hex64_le(strip_0x(&compact[..pos]))?,
                parse_hex64_le(strip_0x(&compact[pos + 1..]))?,
            )),
            None => {
                let digits = strip_0x(compact);
                if digits.len() != 32 {
                    return Err(ERR);
                }
                Ok(Self::new(
                    parse_hex64_le(&digits[..16])?,
                    parse_hex64_le(&digits[16..])?,
                ))
            }
        }
    }
}

fn strip_0x(s: &[u8]) -> &[u8] {
    match s {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => s,
    }
}

/// Parses exactly 16 hex digits as 8 bytes read little-endian.
fn parse_hex64_le(digits: &[u8]) -> Result<u64, KeyFormatError> {
    const ERR: KeyFormatError = KeyFormatError {};
    if digits.len() != 16 {
        return Err(ERR);
    }
    let mut bytes = [0u8; 8];
    for (i, e) in bytes.iter_mut().enumerate() {
        let hi = (digits[2 * i] as char).to_digit(16).ok_or(ERR)? as u8;
        let lo = (digits[2 * i + 1] as char).to_digit(16).ok_or(ERR)? as u8;
        *e = (hi << 4) | lo;
    }
    Ok(u64::from_le_bytes(bytes))
}

/// Error parsing an invalid textual key encoding.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyFormatError {}

impl fmt::Display for KeyFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key encoding")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for KeyFormatError {}
