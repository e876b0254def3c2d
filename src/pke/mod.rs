//! IND-CPA public-key encryption, the inner scheme used by ML-KEM.
//!
//! Key generation and encryption are split into stages shared between the
//! calling thread and a helper (see [`crate::multicore`]); decryption runs
//! on the calling thread alone.
//!
//! The byte-level functions allocate a fresh scratch object per call and
//! are reentrant. The `_in` variants take caller-owned scratch storage,
//! which is zero again when they return.

mod decrypt;
mod encrypt;
mod keypair;
mod scratch;

pub use decrypt::indcpa_dec_in;
pub use encrypt::indcpa_enc_in;
pub use keypair::indcpa_keypair_derand_in;
pub use scratch::{DecryptScratch, EncryptScratch, KeypairScratch};

use crate::math::{poly::Poly, sample};
use crate::params::{MlKemParams, SYMBYTES};

/// Sample each polynomial in `polys` from the CBD with parameter `eta`,
/// consuming one nonce per polynomial.
pub(crate) fn getnoise(polys: &mut [Poly], eta: usize, seed: &[u8; SYMBYTES], nonce: &mut u8) {
    for p in polys {
        sample::poly_getnoise(p, eta, seed, *nonce);
        *nonce += 1;
    }
}

/// Deterministic IND-CPA keypair: writes `P::INDCPA_PK_BYTES` into `pk` and
/// `P::INDCPA_SK_BYTES` into `sk`.
pub fn indcpa_keypair_derand<P: MlKemParams>(pk: &mut [u8], sk: &mut [u8], coins: &[u8; SYMBYTES]) {
    match P::K {
        2 => indcpa_keypair_derand_in::<P, 2>(&mut KeypairScratch::new(), pk, sk, coins),
        3 => indcpa_keypair_derand_in::<P, 3>(&mut KeypairScratch::new(), pk, sk, coins),
        4 => indcpa_keypair_derand_in::<P, 4>(&mut KeypairScratch::new(), pk, sk, coins),
        _ => unreachable!(),
    }
}

/// Deterministic IND-CPA encryption of `m` under `pk` with `coins`.
pub fn indcpa_enc<P: MlKemParams>(
    ct: &mut [u8],
    m: &[u8; SYMBYTES],
    pk: &[u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_enc_in::<P, 2>(&mut EncryptScratch::new(), ct, m, pk, coins),
        3 => indcpa_enc_in::<P, 3>(&mut EncryptScratch::new(), ct, m, pk, coins),
        4 => indcpa_enc_in::<P, 4>(&mut EncryptScratch::new(), ct, m, pk, coins),
        _ => unreachable!(),
    }
}

/// IND-CPA decryption of `ct` with `sk` into `m`.
pub fn indcpa_dec<P: MlKemParams>(m: &mut [u8; SYMBYTES], ct: &[u8], sk: &[u8]) {
    match P::K {
        2 => indcpa_dec_in::<P, 2>(&mut DecryptScratch::new(), m, ct, sk),
        3 => indcpa_dec_in::<P, 3>(&mut DecryptScratch::new(), m, ct, sk),
        4 => indcpa_dec_in::<P, 4>(&mut DecryptScratch::new(), m, ct, sk),
        _ => unreachable!(),
    }
}
