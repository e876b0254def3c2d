//! Public matrix `A` (or `A^T`) expanded from a 32-byte seed.
//!
//! Each cell is an NTT-domain polynomial with coefficients uniform in
//! `[0, q)`, drawn by rejection sampling from a SHAKE-128 stream keyed by
//! `seed || x || y`.

use zeroize::Zeroize;

use crate::hash::{XOF_BLOCKBYTES, xof_absorb};
use crate::math::{poly::Poly, polyvec::PolyVec};
use crate::params::{N, Q, SYMBYTES};

/// Blocks squeezed up front: enough for 256 accepted coefficients with
/// overwhelming probability.
pub const GEN_MATRIX_NBLOCKS: usize =
    (12 * N / 8 * (1 << 12) / Q as usize + XOF_BLOCKBYTES) / XOF_BLOCKBYTES;

/// `K x K` matrix of NTT-domain polynomials, stored row-major.
#[derive(Clone, Zeroize)]
pub struct PolyMatrix<const K: usize> {
    pub(crate) rows: [PolyVec<K>; K],
}

impl<const K: usize> PolyMatrix<K> {
    /// All-zero matrix.
    pub fn zero() -> Self {
        PolyMatrix {
            rows: core::array::from_fn(|_| PolyVec::zero()),
        }
    }

    #[inline]
    pub fn rows(&self) -> &[PolyVec<K>; K] {
        &self.rows
    }

    #[inline]
    pub fn rows_mut(&mut self) -> &mut [PolyVec<K>; K] {
        &mut self.rows
    }

    /// Whether every coefficient of every cell is zero.
    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(PolyVec::is_zero)
    }
}

impl<const K: usize> Default for PolyMatrix<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> core::fmt::Debug for PolyMatrix<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PolyMatrix").field("k", &K).finish_non_exhaustive()
    }
}

/// Parse 12-bit candidates from `buf` (two per byte triple) into `r`,
/// keeping those below `q`. Returns the number written, at most `r.len()`.
pub fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(3) {
        if ctr >= r.len() {
            break;
        }
        let val0 = (chunk[0] as u16) | (((chunk[1] as u16) & 0x0F) << 8);
        let val1 = ((chunk[1] as u16) >> 4) | ((chunk[2] as u16) << 4);

        if val0 < Q as u16 {
            r[ctr] = val0 as i16;
            ctr += 1;
        }
        if ctr < r.len() && val1 < Q as u16 {
            r[ctr] = val1 as i16;
            ctr += 1;
        }
    }
    ctr
}

/// Fill one cell from the XOF stream for `seed || x || y`.
fn sample_cell(p: &mut Poly, seed: &[u8; SYMBYTES], x: u8, y: u8) {
    let mut xof = xof_absorb(seed, x, y);
    let mut buf = [0u8; GEN_MATRIX_NBLOCKS * XOF_BLOCKBYTES];
    xof.squeeze_blocks(&mut buf);
    let mut ctr = rej_uniform(&mut p.coeffs, &buf);

    while ctr < N {
        let block = &mut buf[..XOF_BLOCKBYTES];
        xof.squeeze_blocks(block);
        ctr += rej_uniform(&mut p.coeffs[ctr..], block);
    }
}

/// Deterministically expand `seed` into `A` (or `A^T` when `transposed`).
///
/// Cell `(i, j)` absorbs `(j, i)` when not transposed and `(i, j)` when
/// transposed, so the transposed matrix is exactly the transpose of the
/// untransposed one.
pub fn gen_matrix<const K: usize>(a: &mut PolyMatrix<K>, seed: &[u8; SYMBYTES], transposed: bool) {
    for (i, row) in a.rows.iter_mut().enumerate() {
        for (j, cell) in row.polys.iter_mut().enumerate() {
            let (x, y) = if transposed { (i, j) } else { (j, i) };
            sample_cell(cell, seed, x as u8, y as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nblocks_matches_reference_constant() {
        assert_eq!(GEN_MATRIX_NBLOCKS, 3);
    }

    #[test]
    fn rej_uniform_rejects_out_of_range_candidates() {
        // 0xFFF twice (rejected), then 0x001 and 0xD00 (= 3328, accepted).
        let buf = [0xFF, 0xFF, 0xFF, 0x01, 0x00, 0xD0];
        let mut r = [0i16; 8];
        assert_eq!(rej_uniform(&mut r, &buf), 2);
        assert_eq!(&r[..2], &[1, 3328]);
    }

    #[test]
    fn rej_uniform_stops_when_full() {
        let buf = [0u8; 30];
        let mut r = [7i16; 3];
        assert_eq!(rej_uniform(&mut r, &buf), 3);
        assert_eq!(r, [0, 0, 0]);
    }

    #[test]
    fn coefficients_are_canonical() {
        let mut a = PolyMatrix::<3>::zero();
        gen_matrix(&mut a, &[42u8; SYMBYTES], false);
        for row in a.rows() {
            for p in row.polys() {
                assert!(p.coeffs().iter().all(|c| (0..Q).contains(c)));
            }
        }
    }

    #[test]
    fn transpose_consistency() {
        let seed: [u8; SYMBYTES] = core::array::from_fn(|i| i as u8);
        let mut a = PolyMatrix::<4>::zero();
        let mut at = PolyMatrix::<4>::zero();
        gen_matrix(&mut a, &seed, false);
        gen_matrix(&mut at, &seed, true);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(at.rows[i].polys[j].coeffs, a.rows[j].polys[i].coeffs, "({i}, {j})");
            }
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        let seed = [0xA5u8; SYMBYTES];
        let mut a = PolyMatrix::<2>::zero();
        let mut b = PolyMatrix::<2>::zero();
        gen_matrix(&mut a, &seed, false);
        gen_matrix(&mut b, &seed, false);
        for (ra, rb) in a.rows.iter().zip(&b.rows) {
            for (pa, pb) in ra.polys.iter().zip(&rb.polys) {
                assert_eq!(pa.coeffs, pb.coeffs);
            }
        }

        let mut c = PolyMatrix::<2>::zero();
        gen_matrix(&mut c, &[0x5Au8; SYMBYTES], false);
        assert_ne!(a.rows[0].polys[0].coeffs, c.rows[0].polys[0].coeffs);
    }
}
