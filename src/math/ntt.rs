//! Number-Theoretic Transform and base multiplication in `Z_q[X]/(X^2 - zeta)`.
//!
//! - [`ntt`]: forward transform, standard order in, bit-reversed order out.
//! - [`invntt`]: inverse transform, output scaled by the Montgomery factor.
//! - [`basemul`]: degree-1 multiplication in the transform domain.

use super::reduce::{barrett_reduce, fqmul};
use crate::params::{N, Q};

const Q64: i64 = Q as i64;

const fn pow_mod(mut base: i64, mut exp: i64) -> i64 {
    let mut result = 1;
    base %= Q64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % Q64;
        }
        exp >>= 1;
        base = base * base % Q64;
    }
    result
}

const fn bitrev7(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 7 {
        r |= ((x >> i) & 1) << (6 - i);
        i += 1;
    }
    r
}

const fn centred(val: i64) -> i16 {
    if val > Q64 / 2 { (val - Q64) as i16 } else { val as i16 }
}

/// Twiddle factors `zeta^BitRev7(i) * 2^16 mod q` for the primitive 256th
/// root of unity `zeta = 17`, centred.
pub const ZETAS: [i16; 128] = {
    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        zetas[i] = centred(pow_mod(17, bitrev7(i) as i64) * (1 << 16) % Q64);
        i += 1;
    }
    zetas
};

/// Forward NTT (in-place). Output coefficients are bounded by `8q` in
/// absolute value; callers reduce afterwards.
pub fn ntt(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = fqmul(zeta, *b);
                *b = *a - t;
                *a += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Every output coefficient carries an extra factor
/// `2^16`, i.e. the result is in Montgomery form.
pub fn invntt(r: &mut [i16; N]) {
    // 2^32 * 128^-1 mod q
    const F: i16 = centred(pow_mod(2, 32) * pow_mod(128, Q64 - 2) % Q64);
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k = k.saturating_sub(1);
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = *a;
                *a = barrett_reduce(t + *b);
                *b = fqmul(zeta, *b - t);
            }
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, F);
    }
}

/// `r = a * b mod (X^2 - zeta)` for degree-1 polynomials; `r`, `a`, `b` are
/// two-coefficient slices.
#[inline]
pub fn basemul(r: &mut [i16], a: &[i16], b: &[i16], zeta: i16) {
    r[0] = fqmul(fqmul(a[1], b[1]), zeta) + fqmul(a[0], b[0]);
    r[1] = fqmul(a[0], b[1]) + fqmul(a[1], b[0]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zetas_match_reference_table() {
        assert_eq!(&ZETAS[..8], &[-1044, -758, -359, -1517, 1493, 1422, 287, 202]);
        assert_eq!(&ZETAS[125..], &[-1460, 1522, 1628]);
    }

    #[test]
    fn ntt_invntt_roundtrip() {
        let mut a = [0i16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i % 13) as i16;
        }
        let original = a;
        ntt(&mut a);
        assert_ne!(a, original);
        invntt(&mut a);

        // invntt(ntt(a)) = a * 2^16; fqmul(c, 1) removes the factor.
        for c in &mut a {
            *c = barrett_reduce(fqmul(*c, 1));
        }
        assert_eq!(a, original);
    }

    fn schoolbook_mul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        let mut c = [0i32; N];
        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                let prod = ai as i32 * bj as i32;
                if i + j < N {
                    c[i + j] += prod;
                } else {
                    c[i + j - N] -= prod;
                }
            }
        }
        c.map(|ci| ci.rem_euclid(Q as i32) as i16)
    }

    #[test]
    fn basemul_matches_negacyclic_schoolbook() {
        use crate::math::poly::Poly;

        let mut a = Poly::zero();
        let mut b = Poly::zero();
        for i in 0..N {
            a.coeffs[i] = ((i * 7 + 3) % 100) as i16;
            b.coeffs[i] = ((i * 13 + 1) % 100) as i16;
        }
        let expected = schoolbook_mul(&a.coeffs, &b.coeffs);

        a.ntt();
        b.ntt();
        let mut c = Poly::zero();
        c.basemul_montgomery(&a, &b);
        c.invntt_tomont();

        for (i, (&got, &exp)) in c.coeffs.iter().zip(expected.iter()).enumerate() {
            let got = (barrett_reduce(got) as i32).rem_euclid(Q as i32) as i16;
            assert_eq!(got, exp, "mismatch at {i}");
        }
    }
}
