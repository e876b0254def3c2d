//! Byte encodings of IND-CPA keys and ciphertexts.
//!
//! - public key: `tobytes(pkpv) || rho`
//! - secret key: `tobytes(skpv)`
//! - ciphertext: `compress_du(b) || compress_dv(v)`
//!
//! Key encodings are exact inverses for canonical input. Ciphertext
//! compression is lossy; each coefficient comes back within
//! `ceil(q / 2^(d+1))` of the original.

use crate::math::{poly::Poly, polyvec::PolyVec};
use crate::params::{MlKemParams, POLYBYTES, SYMBYTES};

#[inline]
fn polyvec_bytes<const K: usize>() -> usize {
    K * POLYBYTES
}

/// Serialize the public key as `tobytes(pkpv) || seed`.
pub fn pack_pk<const K: usize>(r: &mut [u8], pkpv: &PolyVec<K>, seed: &[u8; SYMBYTES]) {
    let (poly_bytes, seed_bytes) = r.split_at_mut(polyvec_bytes::<K>());
    pkpv.tobytes(poly_bytes);
    seed_bytes[..SYMBYTES].copy_from_slice(seed);
}

/// Inverse of [`pack_pk`].
pub fn unpack_pk<const K: usize>(pkpv: &mut PolyVec<K>, seed: &mut [u8; SYMBYTES], pk: &[u8]) {
    let (poly_bytes, seed_bytes) = pk.split_at(polyvec_bytes::<K>());
    pkpv.frombytes(poly_bytes);
    seed.copy_from_slice(&seed_bytes[..SYMBYTES]);
}

/// Serialize the secret vector.
pub fn pack_sk<const K: usize>(r: &mut [u8], skpv: &PolyVec<K>) {
    skpv.tobytes(r);
}

/// Inverse of [`pack_sk`].
pub fn unpack_sk<const K: usize>(skpv: &mut PolyVec<K>, sk: &[u8]) {
    skpv.frombytes(sk);
}

/// Compress and serialize `(b, v)` with the parameter set's `D_U` / `D_V`.
pub fn pack_ciphertext<P: MlKemParams, const K: usize>(r: &mut [u8], b: &PolyVec<K>, v: &Poly) {
    let (b_bytes, v_bytes) = r.split_at_mut(P::POLYVEC_COMPRESSED_BYTES);
    b.compress(b_bytes, P::D_U);
    v.compress(v_bytes, P::D_V);
}

/// Inverse of [`pack_ciphertext`], up to compression loss.
pub fn unpack_ciphertext<P: MlKemParams, const K: usize>(
    b: &mut PolyVec<K>,
    v: &mut Poly,
    c: &[u8],
) {
    let (b_bytes, v_bytes) = c.split_at(P::POLYVEC_COMPRESSED_BYTES);
    b.decompress(b_bytes, P::D_U);
    v.decompress(v_bytes, P::D_V);
}
