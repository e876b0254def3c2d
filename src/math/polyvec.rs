//! Vector of polynomials and associated operations.
//!
//! `PolyVec<K>` holds `K` polynomials and provides NTT, inner product,
//! compression, and byte serialisation, all parameterised by the
//! const-generic rank `K`.

use zeroize::Zeroize;

use super::{pack::packed_len, poly::Poly};
use crate::params::POLYBYTES;

/// A vector of `K` polynomials (K = 2, 3, or 4 in ML-KEM).
#[derive(Clone, Zeroize)]
pub struct PolyVec<const K: usize> {
    pub(crate) polys: [Poly; K],
}

impl<const K: usize> PolyVec<K> {
    /// Zero-initialised polynomial vector.
    #[inline]
    pub fn zero() -> Self {
        PolyVec {
            polys: [Poly::zero(); K],
        }
    }

    /// Borrow the component polynomials.
    #[inline]
    pub fn polys(&self) -> &[Poly; K] {
        &self.polys
    }

    /// Mutably borrow the component polynomials.
    #[inline]
    pub fn polys_mut(&mut self) -> &mut [Poly; K] {
        &mut self.polys
    }

    /// Whether every polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.polys.iter().all(Poly::is_zero)
    }

    // ---- NTT / inverse NTT -----------------------------------------------

    /// Forward NTT on every polynomial in the vector.
    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Inverse NTT on every polynomial (result in Montgomery domain).
    pub fn invntt_tomont(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt_tomont();
        }
    }

    // ---- Arithmetic -------------------------------------------------------

    /// Barrett-reduce all coefficients in every polynomial.
    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    /// In-place addition: `self += other`.
    pub fn add_assign(&mut self, other: &PolyVec<K>) {
        for (p, o) in self.polys.iter_mut().zip(&other.polys) {
            p.add_assign(o);
        }
    }

    /// Pointwise Montgomery inner product with accumulation:
    /// `r = sum_i(a[i] * b[i])` (all in NTT domain), then reduced.
    pub fn basemul_acc_montgomery(r: &mut Poly, a: &PolyVec<K>, b: &PolyVec<K>) {
        let mut tmp = Poly::zero();
        r.basemul_montgomery(&a.polys[0], &b.polys[0]);
        for (x, y) in a.polys.iter().zip(&b.polys).skip(1) {
            tmp.basemul_montgomery(x, y);
            r.add_assign(&tmp);
        }
        r.reduce();
        tmp.zeroize();
    }

    // ---- 12-bit byte serialisation ----------------------------------------

    /// Serialize to bytes: `K * 384` bytes.
    pub fn tobytes(&self, r: &mut [u8]) {
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(POLYBYTES)) {
            p.tobytes(chunk);
        }
    }

    /// Deserialize from `K * 384` bytes.
    pub fn frombytes(&mut self, a: &[u8]) {
        for (p, chunk) in self.polys.iter_mut().zip(a.chunks_exact(POLYBYTES)) {
            p.frombytes(chunk);
        }
    }

    // ---- Compression for the ciphertext `b` component ---------------------

    /// Compress every polynomial with `d_u` bits per coefficient.
    pub fn compress(&self, r: &mut [u8], d_u: u32) {
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(packed_len(d_u))) {
            p.compress(chunk, d_u);
        }
    }

    /// Decompress every polynomial from `d_u`-bit coefficients.
    pub fn decompress(&mut self, a: &[u8], d_u: u32) {
        for (p, chunk) in self.polys.iter_mut().zip(a.chunks_exact(packed_len(d_u))) {
            p.decompress(chunk, d_u);
        }
    }
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> core::fmt::Debug for PolyVec<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PolyVec").field("k", &K).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{N, Q};

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut pv = PolyVec::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                pv.polys[k].coeffs[i] = ((k * N + i) as i16 * 7) % (Q - 1);
            }
        }
        let mut buf = [0u8; 3 * POLYBYTES];
        pv.tobytes(&mut buf);

        let mut pv2 = PolyVec::<3>::zero();
        pv2.frombytes(&buf);
        for k in 0..3 {
            assert_eq!(pv.polys[k].coeffs, pv2.polys[k].coeffs, "poly {k} mismatch");
        }
    }

    #[test]
    fn add_zero_identity() {
        let mut pv = PolyVec::<2>::zero();
        pv.polys[0].coeffs[0] = 42;
        pv.polys[1].coeffs[255] = 100;

        pv.add_assign(&PolyVec::<2>::zero());

        assert_eq!(pv.polys[0].coeffs[0], 42);
        assert_eq!(pv.polys[1].coeffs[255], 100);
    }

    #[test]
    fn inner_product_is_sum_of_basemuls() {
        let mut a = PolyVec::<2>::zero();
        let mut b = PolyVec::<2>::zero();
        for i in 0..N {
            a.polys[0].coeffs[i] = (i as i16 * 3) % Q;
            a.polys[1].coeffs[i] = (i as i16 * 5) % Q;
            b.polys[0].coeffs[i] = (i as i16 * 7) % Q;
            b.polys[1].coeffs[i] = (i as i16 * 11) % Q;
        }
        let mut acc = Poly::zero();
        PolyVec::basemul_acc_montgomery(&mut acc, &a, &b);

        let mut p0 = Poly::zero();
        let mut p1 = Poly::zero();
        p0.basemul_montgomery(&a.polys[0], &b.polys[0]);
        p1.basemul_montgomery(&a.polys[1], &b.polys[1]);
        p0.add_assign(&p1);
        p0.reduce();
        assert_eq!(acc.coeffs, p0.coeffs);
    }

    #[test]
    fn compress_covers_every_polynomial() {
        let mut pv = PolyVec::<4>::zero();
        for p in pv.polys.iter_mut() {
            p.coeffs.fill(1000);
        }
        let mut buf = [0u8; 4 * 352];
        pv.compress(&mut buf, 11);

        let mut back = PolyVec::<4>::zero();
        back.decompress(&buf, 11);
        for p in &back.polys {
            assert!(p.coeffs.iter().all(|&c| (c - 1000).abs() <= 1));
        }
    }
}
