//! Montgomery and Barrett reduction modulo q = 3329.

use crate::params::Q;

/// q^-1 mod 2^16.
pub const QINV: i16 = -3327;

/// 2^16 mod q, centred.
pub const MONT: i16 = -1044;

/// Montgomery reduction: `a * 2^-16 mod q`.
///
/// Input `a` in `[-q * 2^15, q * 2^15)`, output in `(-q, q)`.
#[inline]
pub fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction to the centred representative in `[-(q-1)/2, (q-1)/2]`.
#[inline]
pub fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32);
    let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// `a * b * 2^-16 mod q`.
#[inline]
pub fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Map a coefficient in `(-q, q)` to its canonical representative in `[0, q)`.
#[inline]
pub fn to_canonical(a: i16) -> u16 {
    (a as u16).wrapping_add(((a >> 15) as u16) & (Q as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn montgomery_reduce_of_zero() {
        assert_eq!(montgomery_reduce(0), 0);
    }

    #[test]
    fn barrett_reduce_fixes_multiples_of_q() {
        assert_eq!(barrett_reduce(Q), 0);
        assert_eq!(barrett_reduce(-Q), 0);
        assert_eq!(barrett_reduce(42), 42);
    }

    #[test]
    fn barrett_output_is_centred() {
        for a in i16::MIN..=i16::MAX {
            let r = barrett_reduce(a);
            assert!(r.abs() <= (Q - 1) / 2, "barrett_reduce({a}) = {r}");
            assert_eq!((a as i32 - r as i32).rem_euclid(Q as i32), 0);
        }
    }

    #[test]
    fn fqmul_by_mont_is_identity() {
        assert_eq!(fqmul(1, MONT), 1);
    }

    #[test]
    fn canonical_range() {
        assert_eq!(to_canonical(-1), (Q - 1) as u16);
        assert_eq!(to_canonical(0), 0);
        assert_eq!(to_canonical(Q - 1), (Q - 1) as u16);
    }
}
