#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, ops, str};

/// Represents a 128-bit identifier in either of its two wire forms.
///
/// A `Uuid` is a plain 16-byte value. The *sortable* form (version 7) carries
/// a real 48-bit Unix millisecond timestamp in its first six bytes; the
/// *facade* form (version 4) carries the same timestamp XORed with a keyed
/// 48-bit mask, so that the value is indistinguishable from a random UUID to
/// anyone without the key. Both forms share the variant bits `10` and the
/// 74 bits of random payload (fields A and B), which no transform touches.
///
/// All field access goes through the accessors below; the byte offsets and
/// masks of each field live here and nowhere else.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from sortable-form (version 7) field values.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` exceeds 48 bits, `rand_a` exceeds 12 bits, or
    /// `rand_b` exceeds 62 bits.
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            0x70 | (rand_a >> 8) as u8,
            rand_a as u8,
            0x80 | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ])
    }

    /// Returns the 48-bit timestamp field: bytes 0-5 read big-endian.
    ///
    /// In the sortable form this is Unix milliseconds; in the facade form it
    /// is the masked value and meaningless without the key.
    pub const fn unix_ts_ms(&self) -> u64 {
        ((self.0[0] as u64) << 40)
            | ((self.0[1] as u64) << 32)
            | ((self.0[2] as u64) << 24)
            | ((self.0[3] as u64) << 16)
            | ((self.0[4] as u64) << 8)
            | (self.0[5] as u64)
    }

    /// Returns the 12-bit field A: the low nibble of byte 6 and all of byte 7.
    pub const fn rand_a(&self) -> u16 {
        (((self.0[6] & 0x0f) as u16) << 8) | (self.0[7] as u16)
    }

    /// Returns the 62-bit field B: the low six bits of byte 8 and bytes 9-15.
    pub const fn rand_b(&self) -> u64 {
        (((self.0[8] & 0x3f) as u64) << 56)
            | ((self.0[9] as u64) << 48)
            | ((self.0[10] as u64) << 40)
            | ((self.0[11] as u64) << 32)
            | ((self.0[12] as u64) << 24)
            | ((self.0[13] as u64) << 16)
            | ((self.0[14] as u64) << 8)
            | (self.0[15] as u64)
    }

    /// Returns the version nibble: the high half of byte 6 (7 for the
    /// sortable form, 4 for the facade form).
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the variant field encoded in the top bits of byte 8.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0b0000..=0b0111 => Variant::Var0,
            0b1000..=0b1011 => Variant::Var10,
            0b1100..=0b1101 => Variant::Var110,
            _ => Variant::Var111,
        }
    }

    /// Returns a copy with the low 48 bits of `unix_ts_ms` written big-endian
    /// into bytes 0-5. All other fields are untouched.
    pub(crate) const fn with_unix_ts_ms(self, unix_ts_ms: u64) -> Self {
        let mut b = self.0;
        b[0] = (unix_ts_ms >> 40) as u8;
        b[1] = (unix_ts_ms >> 32) as u8;
        b[2] = (unix_ts_ms >> 24) as u8;
        b[3] = (unix_ts_ms >> 16) as u8;
        b[4] = (unix_ts_ms >> 8) as u8;
        b[5] = unix_ts_ms as u8;
        Self(b)
    }

    /// Returns a copy with the version nibble replaced, keeping field A.
    pub(crate) const fn with_version(self, version: u8) -> Self {
        let mut b = self.0;
        b[6] = (b[6] & 0x0f) | (version << 4);
        Self(b)
    }

    /// Returns a copy with the variant bits forced to `10`, keeping field B.
    pub(crate) const fn with_variant_10(self) -> Self {
        let mut b = self.0;
        b[8] = (b[8] & 0x3f) | 0x80;
        Self(b)
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid47::Uuid;
    ///
    /// let x = "018f2d9f-9a2a-7def-8c3f-7b1a2c4d5e6f".parse::<Uuid>()?;
    /// let y = x.hyphenated();
    /// assert_eq!(&y as &str, "018f2d9f-9a2a-7def-8c3f-7b1a2c4d5e6f");
    /// assert_eq!(format!("{}", y), "018f2d9f-9a2a-7def-8c3f-7b1a2c4d5e6f");
    /// # Ok::<(), uuid47::ParseError>(())
    /// ```
    pub fn hyphenated(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

/// The variant field of a [`Uuid`], read from the top bits of byte 8.
///
/// Both forms produced by this crate carry [`Variant::Var10`]; the other
/// values only ever show up in externally supplied input.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Bit pattern `0xxx`.
    Var0,
    /// Bit pattern `10xx`: the variant of every identifier this crate emits.
    Var10,
    /// Bit pattern `110x`.
    Var110,
    /// Bit pattern `111x`.
    Var111,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// Concrete return type of [`Uuid::hyphenated()`] containing the stack-allocated 8-4-4-4-12
/// string representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.hyphenated())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    const MAX_UINT48: u64 = (1 << 48) - 1;
    const MAX_UINT12: u16 = (1 << 12) - 1;
    const MAX_UINT62: u64 = (1 << 62) - 1;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u16, u64), &'static str)] {
        &[
            ((0, 0, 0), "00000000-0000-7000-8000-000000000000"),
            ((MAX_UINT48, 0, 0), "ffffffff-ffff-7000-8000-000000000000"),
            ((0, MAX_UINT12, 0), "00000000-0000-7fff-8000-000000000000"),
            ((0, 0, MAX_UINT62), "00000000-0000-7000-bfff-ffffffffffff"),
            (
                (MAX_UINT48, MAX_UINT12, MAX_UINT62),
                "ffffffff-ffff-7fff-bfff-ffffffffffff",
            ),
            (
                (0x17f22e279b0, 0xcc3, 0x18c4dc0c0c07398f),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.hyphenated() as &str, *text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.to_string(), text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.hyphenated().to_string(), text);
            #[cfg(all(feature = "std", feature = "uuid"))]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Reads back the fields that from_fields_v7 packed
    #[test]
    fn reads_back_the_fields_that_from_fields_v7_packed() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(e.unix_ts_ms(), fs.0);
            assert_eq!(e.rand_a(), fs.1);
            assert_eq!(e.rand_b(), fs.2);
            assert_eq!(e.version(), 7);
            assert_eq!(e.variant(), Variant::Var10);
        }
    }

    /// Rewrites each field without touching the others
    #[test]
    fn rewrites_each_field_without_touching_the_others() {
        let e = Uuid::from_fields_v7(0x17f22e279b0, 0xcc3, 0x18c4dc0c0c07398f);

        let t = e.with_unix_ts_ms(0x0123456789ab);
        assert_eq!(t.unix_ts_ms(), 0x0123456789ab);
        assert_eq!(t.rand_a(), e.rand_a());
        assert_eq!(t.rand_b(), e.rand_b());
        assert_eq!(t.version(), e.version());

        let v = e.with_version(4);
        assert_eq!(v.version(), 4);
        assert_eq!(v.unix_ts_ms(), e.unix_ts_ms());
        assert_eq!(v.rand_a(), e.rand_a());
        assert_eq!(v.rand_b(), e.rand_b());

        let w = Uuid::from([0u8; 16]).with_variant_10();
        assert_eq!(w.variant(), Variant::Var10);
        assert_eq!(w.rand_b(), 0);
    }

    /// Classifies the variant field of arbitrary byte patterns
    #[test]
    fn classifies_the_variant_field_of_arbitrary_byte_patterns() {
        let with_byte8 = |x: u8| {
            let mut b = [0u8; 16];
            b[8] = x;
            Uuid::from(b)
        };
        assert_eq!(with_byte8(0x00).variant(), Variant::Var0);
        assert_eq!(with_byte8(0x7f).variant(), Variant::Var0);
        assert_eq!(with_byte8(0x80).variant(), Variant::Var10);
        assert_eq!(with_byte8(0xbf).variant(), Variant::Var10);
        assert_eq!(with_byte8(0xc0).variant(), Variant::Var110);
        assert_eq!(with_byte8(0xdf).variant(), Variant::Var110);
        assert_eq!(with_byte8(0xe0).variant(), Variant::Var111);
        assert_eq!(with_byte8(0xff).variant(), Variant::Var111);
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.hyphenated() as &str,
            "00000000-0000-0000-0000-000000000000"
        );

        assert_eq!(
            &Uuid::MAX.hyphenated() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.hyphenated().parse(), Ok(e));
            assert_eq!(e.hyphenated().to_uppercase().parse(), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
        }
    }
}
