//! Byte-level packing, unpacking, compression, and decompression.
//!
//! All functions operate on raw coefficient arrays (`&[i16; N]`) and byte
//! buffers, keeping this module independent of the `Poly` wrapper. Every
//! layout is little-endian at the bit level: coefficient `i` occupies bits
//! `[i * d, (i + 1) * d)` of the output stream.

use super::reduce::to_canonical;
use crate::params::{N, POLYBYTES, Q, SYMBYTES};

/// Compress a canonical coefficient to `d` bits: `round(2^d / q * x) mod 2^d`.
#[inline]
pub(crate) fn compress(x: u16, d: u32) -> u16 {
    let t = (((x as u32) << d) + (Q as u32) / 2) / (Q as u32);
    (t & ((1u32 << d) - 1)) as u16
}

/// Decompress a `d`-bit value: `round(q / 2^d * y)`.
#[inline]
pub(crate) fn decompress(y: u16, d: u32) -> u16 {
    (((y as u32) * (Q as u32) + (1u32 << (d - 1))) >> d) as u16
}

/// Bytes occupied by one polynomial at `d` bits per coefficient.
#[inline]
pub const fn packed_len(d: u32) -> usize {
    N * d as usize / 8
}

/// Write `N` values of `d` bits each, produced by `value(i)`.
fn pack_bits(r: &mut [u8], d: u32, value: impl Fn(usize) -> u16) {
    let r = &mut r[..packed_len(d)];
    let mut acc = 0u32;
    let mut bits = 0u32;
    let mut pos = 0;
    for i in 0..N {
        acc |= (value(i) as u32) << bits;
        bits += d;
        while bits >= 8 {
            r[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            bits -= 8;
        }
    }
}

/// Read `N` values of `d` bits each and hand them to `store(i, value)`.
fn unpack_bits(a: &[u8], d: u32, mut store: impl FnMut(usize, u16)) {
    let mask = (1u32 << d) - 1;
    let mut acc = 0u32;
    let mut bits = 0u32;
    let mut i = 0;
    for &byte in &a[..packed_len(d)] {
        acc |= (byte as u32) << bits;
        bits += 8;
        while bits >= d {
            store(i, (acc & mask) as u16);
            i += 1;
            acc >>= d;
            bits -= d;
        }
    }
}

// 12-bit serialisation (POLYBYTES = 384)

/// Serialize coefficients to bytes, mapping each to `[0, q)` first.
pub fn poly_tobytes(r: &mut [u8], a: &[i16; N]) {
    debug_assert!(r.len() >= POLYBYTES);
    pack_bits(r, 12, |i| to_canonical(a[i]));
}

/// Deserialize 12-bit coefficients. No reduction: values above `q` from
/// malformed input are kept as-is.
pub fn poly_frombytes(r: &mut [i16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYBYTES);
    unpack_bits(a, 12, |i, v| r[i] = v as i16);
}

// Message encoding (1 bit per coefficient)

/// Decode a 32-byte message: each bit maps to `0` or `(q + 1) / 2 = 1665`.
pub fn poly_frommsg(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    for (i, c) in r.iter_mut().enumerate() {
        let mask = -(((msg[i / 8] >> (i % 8)) & 1) as i16);
        *c = mask & ((Q + 1) / 2);
    }
}

/// Encode a polynomial as a 32-byte message (compress to 1 bit).
pub fn poly_tomsg(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    msg.fill(0);
    for (i, &c) in a.iter().enumerate() {
        let bit = compress(to_canonical(c), 1) as u8;
        msg[i / 8] |= bit << (i % 8);
    }
}

// Compression (d = 4, 5 for v; d = 10, 11 for each poly of b)

/// Compress every coefficient to `d` bits and pack.
pub fn poly_compress(r: &mut [u8], a: &[i16; N], d: u32) {
    debug_assert!(matches!(d, 1 | 4 | 5 | 10 | 11), "unsupported d={d}");
    pack_bits(r, d, |i| compress(to_canonical(a[i]), d));
}

/// Unpack `d`-bit values and decompress them into `[0, q)`.
pub fn poly_decompress(r: &mut [i16; N], a: &[u8], d: u32) {
    debug_assert!(matches!(d, 1 | 4 | 5 | 10 | 11), "unsupported d={d}");
    unpack_bits(a, d, |i, v| r[i] = decompress(v, d) as i16);
}
