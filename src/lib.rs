//! Store sortable UUIDv7 identifiers, present a SipHash-masked UUIDv4 facade.
//!
//! A database wants time-ordered identifiers for index locality; clients must
//! not learn creation timestamps from the identifiers they see. This crate
//! keeps both: the storage layer holds the *sortable* form (version 7, real
//! 48-bit millisecond timestamp), and at the presentation boundary the
//! timestamp is XORed with a 48-bit SipHash-2-4 mask derived from the
//! identifier's own random bits under a secret key, yielding a *facade* that
//! is structurally a version-4 UUID. The transform is exactly invertible
//! under the same key and loses nothing.
//!
//! ```rust
//! use uuid47::{decode_v4facade, encode_v4facade, Key};
//!
//! let key: Key = "0123456789abcdef:fedcba9876543210".parse()?;
//!
//! let id = uuid47::uuid7();
//! let facade = encode_v4facade(id, &key);
//! assert_eq!(facade.version(), 4);
//! assert_eq!(decode_v4facade(facade, &key), id);
//! # Ok::<(), uuid47::KeyFormatError>(())
//! ```
//!
//! # Field and bit layout
//!
//! Both forms share one layout; only the version nibble and the content of
//! `unix_ts_ms` differ between them:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field holds the Unix timestamp in milliseconds
//!   (sortable form) or that timestamp XORed with the keyed mask (facade
//!   form).
//! - The 4-bit `ver` field is `0111` in the sortable form and `0100` in the
//!   facade form.
//! - The 2-bit `var` field is set at `10` in both forms.
//! - The 74 bits of `rand_a` and `rand_b` are identical in both forms. The
//!   mask is computed from these bits, which is what makes the transform
//!   self-inverse: both directions read the same PRF input.
//!
//! # Generating identifiers
//!
//! [`uuid7()`] draws from a process-wide monotonic generator: within one
//! millisecond the low 32 bits of `rand_b` act as a counter while the
//! remaining 42 random bits are redrawn each millisecond, so outputs from
//! one process are strictly increasing even under clock rollback. Use
//! [`V7Generator`] directly to control the random source, the clock, or the
//! scope of the monotonicity guarantee.

#![cfg_attr(not(feature = "std"), no_std)]

mod id;
pub use id::{ParseError, Uuid, Variant};

mod siphash;

mod key;
pub use key::{Key, KeyFormatError};

mod facade;
pub use facade::{
    decode_v4facade, encode_v4facade, try_decode_v4facade, try_encode_v4facade,
    UnexpectedVersionError,
};

pub mod generator;
#[doc(inline)]
pub use generator::V7Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::uuid7;
