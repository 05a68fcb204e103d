//! The masking transform between the sortable form and its facade.
//!
//! Encoding XORs a keyed 48-bit mask into the timestamp field and relabels
//! the value as version 4; decoding recomputes the same mask and XORs it back
//! out. The mask is derived from the 74 random bits the transform never
//! touches, so both directions see identical PRF input and the transform is
//! its own inverse under the same key.

#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

use crate::siphash::siphash24;
use crate::{Key, Uuid};

const MASK48: u64 = 0x0000_ffff_ffff_ffff;

const SORTABLE_VERSION: u8 = 7;
const FACADE_VERSION: u8 = 4;

/// Builds the 10-byte PRF message from the identifier's random fields:
/// the low nibble of byte 6, byte 7, the low six bits of byte 8, and
/// bytes 9-15. These bytes are identical in the sortable and facade forms
/// of the same identifier.
fn sip_input(u: &Uuid) -> [u8; 10] {
    let b = u.as_bytes();
    let mut msg = [0u8; 10];
    msg[0] = b[6] & 0x0f;
    msg[1] = b[7];
    msg[2] = b[8] & 0x3f;
    msg[3..].copy_from_slice(&b[9..]);
    msg
}

/// Derives the 48-bit timestamp mask for `u` under `key`.
fn mask48(u: &Uuid, key: &Key) -> u64 {
    siphash24(&sip_input(u), key.k0, key.k1) & MASK48
}

/// Encodes a sortable (version 7) identifier into its facade form.
///
/// The output carries the masked timestamp, version 4, and the variant bits
/// `10`; fields A and B are copied unchanged. The input's version marker is
/// not inspected (see [`try_encode_v4facade`] for the checked variant).
///
/// # Examples
///
/// ```rust
/// use uuid47::{decode_v4facade, encode_v4facade, Key, Uuid};
///
/// let key = Key::new(0x0123456789abcdef, 0xfedcba9876543210);
/// let id = "018f2d9f-9a2a-7def-8c3f-7b1a2c4d5e6f".parse::<Uuid>()?;
///
/// let facade = encode_v4facade(id, &key);
/// assert_eq!(facade.version(), 4);
/// assert_eq!(decode_v4facade(facade, &key), id);
/// # Ok::<(), uuid47::ParseError>(())
/// ```
pub fn encode_v4facade(v7: Uuid, key: &Key) -> Uuid {
    let enc_ts = v7.unix_ts_ms() ^ mask48(&v7, key);
    v7.with_unix_ts_ms(enc_ts)
        .with_version(FACADE_VERSION)
        .with_variant_10()
}

/// Decodes a facade (version 4) identifier back into its sortable form.
///
/// Recovers the original timestamp only under the key that produced the
/// facade; under any other key the result is garbage with overwhelming
/// probability. The input's version marker is not inspected (see
/// [`try_decode_v4facade`] for the checked variant).
pub fn decode_v4facade(facade: Uuid, key: &Key) -> Uuid {
    let ts = facade.unix_ts_ms() ^ mask48(&facade, key);
    facade
        .with_unix_ts_ms(ts)
        .with_version(SORTABLE_VERSION)
        .with_variant_10()
}

/// Like [`encode_v4facade`], but fails unless the input carries the sortable
/// version marker (7).
pub fn try_encode_v4facade(v7: Uuid, key: &Key) -> Result<Uuid, UnexpectedVersionError> {
    match v7.version() {
        SORTABLE_VERSION => Ok(encode_v4facade(v7, key)),
        found => Err(UnexpectedVersionError {
            expected: SORTABLE_VERSION,
            found,
        }),
    }
}

/// Like [`decode_v4facade`], but fails unless the input carries the facade
/// version marker (4).
pub fn try_decode_v4facade(facade: Uuid, key: &Key) -> Result<Uuid, UnexpectedVersionError> {
    match facade.version() {
        FACADE_VERSION => Ok(decode_v4facade(facade, key)),
        found => Err(UnexpectedVersionError {
            expected: FACADE_VERSION,
            found,
        }),
    }
}

/// Error returned by the checked transforms when the input's version marker
/// does not match the expected form.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnexpectedVersionError {
    expected: u8,
    found: u8,
}

impl fmt::Display for UnexpectedVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected version {}, found version {}",
            self.expected, self.found
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for UnexpectedVersionError {}
