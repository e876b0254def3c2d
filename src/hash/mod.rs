//! Hash and extendable-output function (XOF) adapters.
//!
//! Wraps the SHA-3 family as used by ML-KEM (FIPS 203):
//!
//! | ML-KEM name | Primitive   | Function |
//! |-------------|-------------|----------|
//! | **H**       | SHA3-256    | [`hash_h`] |
//! | **G**       | SHA3-512    | [`hash_g`] |
//! | **PRF**     | SHAKE-256   | [`prf`] |
//! | **XOF**     | SHAKE-128   | [`xof_absorb`] / [`XofState::squeeze_blocks`] |
//! | **J**       | SHAKE-256   | [`rkprf`] |

use sha3::{
    Digest, Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

use crate::params::{SSBYTES, SYMBYTES};

/// SHAKE-128 rate in bytes: one squeezed block.
pub const XOF_BLOCKBYTES: usize = 168;

/// H(input) = SHA3-256(input) -> 32 bytes.
#[inline]
pub fn hash_h(input: impl AsRef<[u8]>) -> [u8; 32] {
    Sha3_256::digest(input).into()
}

/// G(input) = SHA3-512(input) -> 64 bytes.
#[inline]
pub fn hash_g(input: impl AsRef<[u8]>) -> [u8; 64] {
    Sha3_512::digest(input).into()
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed into `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[nonce]);
    h.finalize_xof().read(output);
}

/// Absorbed SHAKE-128 state for one matrix cell.
pub struct XofState {
    reader: Shake128Reader,
}

impl XofState {
    /// Squeeze `out.len() / XOF_BLOCKBYTES` whole blocks into `out`.
    pub fn squeeze_blocks(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len() % XOF_BLOCKBYTES, 0, "partial XOF block requested");
        self.reader.read(out);
    }
}

impl core::fmt::Debug for XofState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XofState").finish_non_exhaustive()
    }
}

/// Absorb `seed || x || y` into SHAKE-128.
#[must_use]
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> XofState {
    let mut h = Shake128::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[x, y]);
    XofState {
        reader: h.finalize_xof(),
    }
}

/// J(key, ct) = SHAKE-256(key || ct) -> 32 bytes (implicit-reject PRF).
pub fn rkprf(key: &[u8; SYMBYTES], ct: impl AsRef<[u8]>) -> [u8; SSBYTES] {
    let mut out = [0u8; SSBYTES];
    Shake256::default()
        .chain(key)
        .chain(ct)
        .finalize_xof()
        .read(&mut out);
    out
}
