//! Centered binomial noise ([`cbd2`], [`cbd3`]) and the PRF-driven
//! [`poly_getnoise`] sampler built on them.

use zeroize::Zeroize;

use super::poly::Poly;
use crate::hash;
use crate::params::{N, SYMBYTES};

/// CBD with eta=2: 128 bytes of PRF output -> 256 coefficients in {-2, ..., 2}.
pub fn cbd2(r: &mut [i16; N], buf: &[u8]) {
    debug_assert!(buf.len() >= 2 * N / 4);
    for (out, chunk) in r.chunks_exact_mut(8).zip(buf.chunks_exact(4)) {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for (j, c) in out.iter_mut().enumerate() {
            let a = ((d >> (4 * j)) & 3) as i16;
            let b = ((d >> (4 * j + 2)) & 3) as i16;
            *c = a - b;
        }
    }
}

/// CBD with eta=3: 192 bytes of PRF output -> 256 coefficients in {-3, ..., 3}.
pub fn cbd3(r: &mut [i16; N], buf: &[u8]) {
    debug_assert!(buf.len() >= 3 * N / 4);
    for (out, chunk) in r.chunks_exact_mut(4).zip(buf.chunks_exact(3)) {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for (j, c) in out.iter_mut().enumerate() {
            let a = ((d >> (6 * j)) & 7) as i16;
            let b = ((d >> (6 * j + 3)) & 7) as i16;
            *c = a - b;
        }
    }
}

/// Sample `r` from `CBD_eta(PRF(seed, nonce))`. The PRF output is erased
/// before returning.
///
/// # Panics
/// If `eta` is not 2 or 3.
pub fn poly_getnoise(r: &mut Poly, eta: usize, seed: &[u8; SYMBYTES], nonce: u8) {
    let mut buf = [0u8; 3 * N / 4];
    match eta {
        2 => {
            let buf = &mut buf[..2 * N / 4];
            hash::prf(seed, nonce, buf);
            cbd2(&mut r.coeffs, buf);
        }
        3 => {
            hash::prf(seed, nonce, &mut buf);
            cbd3(&mut r.coeffs, &buf);
        }
        _ => panic!("unsupported eta={eta}"),
    }
    buf.zeroize();
}
