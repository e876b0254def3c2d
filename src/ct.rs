//! Constant-time helpers for the implicit-rejection step of decapsulation.
//!
//! Neither function branches on or indexes by its data; lengths are public.

/// Compare two equal-length byte strings. Returns `0` if they are equal and
/// `1` otherwise.
///
/// # Panics
/// If the lengths differ.
#[inline]
pub fn ct_verify(a: &[u8], b: &[u8]) -> u8 {
    assert_eq!(a.len(), b.len(), "ct_verify: length mismatch");

    let diff = a.iter().zip(b).fold(0u8, |acc, (&x, &y)| acc | (x ^ y));
    let diff = core::hint::black_box(diff) as u32;
    // 0 -> 0, 1..=255 -> 1
    (diff.wrapping_neg() >> 31) as u8
}

/// Overwrite `dst` with `src` when `condition == 1`; leave it unchanged when
/// `condition == 0`.
///
/// # Panics
/// If the lengths differ.
#[inline]
pub fn ct_cmov(dst: &mut [u8], src: &[u8], condition: u8) {
    assert_eq!(dst.len(), src.len(), "ct_cmov: length mismatch");
    debug_assert!(condition <= 1, "ct_cmov: condition must be 0 or 1");

    let mask = core::hint::black_box(condition).wrapping_neg();
    for (d, &s) in dst.iter_mut().zip(src) {
        *d ^= mask & (*d ^ s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_equal() {
        assert_eq!(ct_verify(&[0x11; 768], &[0x11; 768]), 0);
        assert_eq!(ct_verify(&[], &[]), 0);
    }

    #[test]
    fn verify_detects_any_single_byte_flip() {
        let a = [0u8; 64];
        for pos in [0, 31, 63] {
            for bit in 0..8 {
                let mut b = a;
                b[pos] ^= 1 << bit;
                assert_eq!(ct_verify(&a, &b), 1, "pos {pos} bit {bit}");
            }
        }
    }

    #[test]
    fn cmov_selects_by_condition() {
        let src = [0xBB_u8; 32];

        let mut dst = [0xAA_u8; 32];
        ct_cmov(&mut dst, &src, 0);
        assert_eq!(dst, [0xAA; 32]);

        ct_cmov(&mut dst, &src, 1);
        assert_eq!(dst, src);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn verify_rejects_length_mismatch() {
        ct_verify(&[0u8; 3], &[0u8; 4]);
    }
}
