//! IND-CPA decryption, run entirely on the calling context.

use tracing::debug_span;

use super::DecryptScratch;
use crate::erase::{EraseOnDrop, erase};
use crate::math::polyvec::PolyVec;
use crate::params::{MlKemParams, SYMBYTES};
use crate::serialize;

/// IND-CPA decryption into caller-provided `scratch`.
///
/// `ct` must be `P::INDCPA_BYTES` long and `sk` `P::INDCPA_SK_BYTES`;
/// `K` must equal `P::K`. Never fails: a wrong key or a tampered
/// ciphertext yields an unrelated message.
///
/// # Panics
/// On a length mismatch. `scratch` is zero on return in every case.
pub fn indcpa_dec_in<P: MlKemParams, const K: usize>(
    scratch: &mut DecryptScratch<K>,
    m: &mut [u8; SYMBYTES],
    ct: &[u8],
    sk: &[u8],
) {
    assert_eq!(K, P::K, "scratch rank does not match the parameter set");
    assert_eq!(ct.len(), P::INDCPA_BYTES, "ciphertext length");
    assert_eq!(sk.len(), P::INDCPA_SK_BYTES, "secret key length");

    let _span = debug_span!("decrypt", k = K).entered();
    let mut guard = EraseOnDrop::new(scratch);
    let DecryptScratch { b, skpv, v, mp } = &mut *guard;

    serialize::unpack_ciphertext::<P, K>(b, v, ct);
    serialize::unpack_sk(skpv, sk);

    b.ntt();
    PolyVec::<K>::basemul_acc_montgomery(mp, skpv, b);
    mp.invntt_tomont();
    mp.sub_from(v);
    mp.reduce();
    mp.tomsg(m);

    erase(&mut *skpv);
    erase(&mut *b);
    erase(&mut *v);
    erase(&mut *mp);
}
