//! Polynomial type and coefficient-level operations.
//!
//! `Poly` wraps `[i16; N]` (N = 256). Whether a value is in the normal or
//! the NTT domain is tracked by the caller. Byte-level methods write into
//! caller-owned buffers so that no secret-bearing temporary is returned by
//! value.

use zeroize::Zeroize;

use super::{ntt, pack, reduce};
use crate::params::{N, SYMBYTES};

/// Polynomial in Rq = Zq[X]/(X^n + 1), stored as N = 256 coefficients.
#[derive(Clone, Copy, Zeroize)]
pub struct Poly {
    pub(crate) coeffs: [i16; N],
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Poly { coeffs: [0i16; N] }
    }

    /// Borrow the coefficients.
    #[inline]
    pub fn coeffs(&self) -> &[i16; N] {
        &self.coeffs
    }

    /// Whether every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    // ---- Arithmetic -------------------------------------------------------

    /// Coefficient-wise addition: `self = a + b`.
    #[inline]
    pub fn add(&mut self, a: &Poly, b: &Poly) {
        for ((r, &x), &y) in self.coeffs.iter_mut().zip(&a.coeffs).zip(&b.coeffs) {
            *r = x + y;
        }
    }

    /// Coefficient-wise subtraction: `self = a - b`.
    #[inline]
    pub fn sub(&mut self, a: &Poly, b: &Poly) {
        for ((r, &x), &y) in self.coeffs.iter_mut().zip(&a.coeffs).zip(&b.coeffs) {
            *r = x - y;
        }
    }

    /// In-place addition: `self += other`.
    #[inline]
    pub fn add_assign(&mut self, other: &Poly) {
        for (r, &x) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *r += x;
        }
    }

    /// In-place reversed subtraction: `self = minuend - self`.
    #[inline]
    pub fn sub_from(&mut self, minuend: &Poly) {
        for (r, &x) in self.coeffs.iter_mut().zip(&minuend.coeffs) {
            *r = x - *r;
        }
    }

    /// Barrett-reduce every coefficient to the centered range.
    #[inline]
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::barrett_reduce(*c);
        }
    }

    // ---- NTT / inverse NTT -----------------------------------------------

    /// Forward NTT (in-place), followed by a Barrett reduction.
    #[inline]
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
        self.reduce();
    }

    /// Inverse NTT (in-place), result in Montgomery domain.
    #[inline]
    pub fn invntt_tomont(&mut self) {
        ntt::invntt(&mut self.coeffs);
    }

    /// Convert all coefficients to Montgomery representation.
    pub fn tomont(&mut self) {
        const F: i32 = ((1u64 << 32) % (crate::params::Q as u64)) as i32; // R^2 mod q = 1353
        for c in self.coeffs.iter_mut() {
            *c = reduce::montgomery_reduce((*c as i32) * F);
        }
    }

    /// Pointwise Montgomery multiplication: `self = a * b * 2^-16` (NTT domain).
    ///
    /// 64 groups of four coefficients, each group two degree-1 products with
    /// twiddles `zeta` and `-zeta`.
    pub fn basemul_montgomery(&mut self, a: &Poly, b: &Poly) {
        let groups = self
            .coeffs
            .chunks_exact_mut(4)
            .zip(a.coeffs.chunks_exact(4))
            .zip(b.coeffs.chunks_exact(4));
        for (i, ((r, x), y)) in groups.enumerate() {
            let zeta = ntt::ZETAS[64 + i];
            let (r_lo, r_hi) = r.split_at_mut(2);
            ntt::basemul(r_lo, &x[..2], &y[..2], zeta);
            ntt::basemul(r_hi, &x[2..], &y[2..], -zeta);
        }
    }

    // ---- Serialisation ----------------------------------------------------

    /// Serialize to bytes (12-bit encoding, 384 bytes).
    pub fn tobytes(&self, r: &mut [u8]) {
        pack::poly_tobytes(r, &self.coeffs);
    }

    /// Deserialize from bytes (12-bit decoding).
    pub fn frombytes(&mut self, a: &[u8]) {
        pack::poly_frombytes(&mut self.coeffs, a);
    }

    // ---- Message encoding -------------------------------------------------

    /// Decode a 32-byte message (1 bit per coefficient).
    pub fn frommsg(&mut self, msg: &[u8; SYMBYTES]) {
        pack::poly_frommsg(&mut self.coeffs, msg);
    }

    /// Encode as a 32-byte message.
    pub fn tomsg(&self, msg: &mut [u8; SYMBYTES]) {
        pack::poly_tomsg(msg, &self.coeffs);
    }

    // ---- Compression ------------------------------------------------------

    /// Compress to `d` bits per coefficient into `r`.
    pub fn compress(&self, r: &mut [u8], d: u32) {
        pack::poly_compress(r, &self.coeffs, d);
    }

    /// Decompress `d`-bit coefficients from `a`.
    pub fn decompress(&mut self, a: &[u8], d: u32) {
        pack::poly_decompress(&mut self.coeffs, a, d);
    }
}

impl Default for Poly {
    #[inline]
    fn default() -> Self {
        Poly::zero()
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly").finish_non_exhaustive()
    }
}
