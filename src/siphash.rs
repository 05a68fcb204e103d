//! SipHash-2-4, the keyed pseudorandom function behind the facade mask.
//!
//! This is the reference algorithm, bit-for-bit: two compression rounds per
//! message block, four finalization rounds, 64-bit output. The facade
//! transform only ever feeds it 10-byte messages, but the implementation is
//! total over all lengths so it can be pinned against the published test
//! vectors.

/// Computes the SipHash-2-4 value of `msg` under the 128-bit key `(k0, k1)`.
pub(crate) fn siphash24(msg: &[u8], k0: u64, k1: u64) -> u64 {
    let mut v = [
        0x736f_6d65_7073_6575 ^ k0,
        0x646f_7261_6e64_6f6d ^ k1,
        0x6c79_6765_6e65_7261 ^ k0,
        0x7465_6462_7974_6573 ^ k1,
    ];

    let mut chunks = msg.chunks_exact(8);
    for chunk in chunks.by_ref() {
        let m = u64::from_le_bytes(chunk.try_into().unwrap());
        v[3] ^= m;
        sip_round(&mut v);
        sip_round(&mut v);
        v[0] ^= m;
    }

    // padding block: trailing bytes in the low positions, length mod 256 on top
    let mut b = (msg.len() as u64) << 56;
    for (i, e) in chunks.remainder().iter().enumerate() {
        b |= (*e as u64) << (8 * i);
    }
    v[3] ^= b;
    sip_round(&mut v);
    sip_round(&mut v);
    v[0] ^= b;

    v[2] ^= 0xff;
    for _ in 0..4 {
        sip_round(&mut v);
    }
    v[0] ^ v[1] ^ v[2] ^ v[3]
}

/// One ARX round over the four state words.
#[inline]
fn sip_round(v: &mut [u64; 4]) {
    v[0] = v[0].wrapping_add(v[1]);
    v[2] = v[2].wrapping_add(v[3]);
    v[1] = v[1].rotate_left(13);
    v[3] = v[3].rotate_left(16);
    v[1] ^= v[0];
    v[3] ^= v[2];
    v[0] = v[0].rotate_left(32);
    v[2] = v[2].wrapping_add(v[1]);
    v[0] = v[0].wrapping_add(v[3]);
    v[1] = v[1].rotate_left(17);
    v[3] = v[3].rotate_left(21);
    v[1] ^= v[2];
    v[3] ^= v[0];
    v[2] = v[2].rotate_left(32);
}
