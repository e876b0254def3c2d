//! IND-CPA encryption split across the main and helper contexts.
//!
//! | stage | helper                       | main                                  |
//! |-------|------------------------------|---------------------------------------|
//! | A     | encode the message into `k`  | unpack the public key                 |
//! | B     | rows `[K/2, K)` of `A^T . r` | rows `[0, K/2)` of `A^T . r`, `t . r` |
//!
//! Between the stages main expands `A^T` and samples the noise; after stage
//! B it finishes `b` and `v`, wipes every intermediate and packs.

use tracing::debug_span;

use super::{EncryptScratch, getnoise};
use crate::erase::{EraseOnDrop, erase};
use crate::math::{polyvec::PolyVec, sample};
use crate::matrix::gen_matrix;
use crate::multicore::{Job, job::multiply_range, run_stage, split_point};
use crate::params::{MlKemParams, SYMBYTES};
use crate::serialize;

/// Deterministic IND-CPA encryption into caller-provided `scratch`.
///
/// `ct` must be `P::INDCPA_BYTES` long and `pk` `P::INDCPA_PK_BYTES`;
/// `K` must equal `P::K`. Identical inputs give identical ciphertexts.
///
/// # Panics
/// On a length mismatch. `scratch` is zero on return in every case.
pub fn indcpa_enc_in<P: MlKemParams, const K: usize>(
    scratch: &mut EncryptScratch<K>,
    ct: &mut [u8],
    m: &[u8; SYMBYTES],
    pk: &[u8],
    coins: &[u8; SYMBYTES],
) {
    assert_eq!(K, P::K, "scratch rank does not match the parameter set");
    assert_eq!(ct.len(), P::INDCPA_BYTES, "ciphertext buffer length");
    assert_eq!(pk.len(), P::INDCPA_PK_BYTES, "public key length");

    let mut guard = EraseOnDrop::new(scratch);
    let EncryptScratch {
        at,
        pkpv,
        sp,
        ep,
        b,
        epp,
        k,
        v,
        public_seed,
    } = &mut *guard;

    {
        let _stage = debug_span!("encrypt.stage_a", k = K).entered();
        let job: Job<'_, K> = Job::EncodeMessage { msg: m, k: &mut *k };
        run_stage(job, || serialize::unpack_pk(pkpv, public_seed, pk));
    }

    {
        let _span = debug_span!("encrypt.sample", k = K).entered();
        gen_matrix(at, public_seed, true);
        erase(&mut *public_seed);

        let mut nonce = 0u8;
        getnoise(&mut sp.polys, P::ETA1, coins, &mut nonce);
        getnoise(&mut ep.polys, P::ETA2, coins, &mut nonce);
        sample::poly_getnoise(epp, P::ETA2, coins, nonce);
        sp.ntt();
    }

    {
        let _stage = debug_span!("encrypt.stage_b", k = K).entered();
        let split = split_point(K);
        let (rows_main, rows_helper) = at.rows.split_at(split);
        let (out_main, out_helper) = b.polys.split_at_mut(split);
        let r = &*sp;
        let job = Job::MultiplyRange {
            rows: rows_helper,
            vector: r,
            out: out_helper,
            tomont: false,
        };
        run_stage(job, || {
            multiply_range(rows_main, r, out_main, false);
            PolyVec::<K>::basemul_acc_montgomery(v, pkpv, r);
        });
    }

    b.invntt_tomont();
    v.invntt_tomont();
    b.add_assign(ep);
    v.add_assign(epp);
    v.add_assign(k);
    b.reduce();
    v.reduce();

    erase(&mut *at);
    erase(&mut *sp);
    erase(&mut *ep);
    erase(&mut *epp);
    erase(&mut *pkpv);
    erase(&mut *k);

    serialize::pack_ciphertext::<P, K>(ct, b, v);
    erase(&mut *b);
    erase(&mut *v);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MlKem1024;
    use crate::pke::{KeypairScratch, indcpa_keypair_derand_in};

    #[test]
    fn scratch_is_erased_after_encryption() {
        let mut pk = [0u8; MlKem1024::INDCPA_PK_BYTES];
        let mut sk = [0u8; MlKem1024::INDCPA_SK_BYTES];
        indcpa_keypair_derand_in::<MlKem1024, 4>(
            &mut KeypairScratch::new(),
            &mut pk,
            &mut sk,
            &[1u8; SYMBYTES],
        );

        let mut scratch = EncryptScratch::<4>::new();
        let mut ct = [0u8; MlKem1024::INDCPA_BYTES];
        indcpa_enc_in::<MlKem1024, 4>(&mut scratch, &mut ct, &[0xC3; SYMBYTES], &pk, &[2u8; SYMBYTES]);
        assert!(scratch.is_erased());
        assert!(ct.iter().any(|&c| c != 0));
    }

    #[test]
    #[should_panic(expected = "ciphertext buffer length")]
    fn wrong_ciphertext_length_panics() {
        let pk = [0u8; MlKem1024::INDCPA_PK_BYTES];
        let mut ct = [0u8; MlKem1024::INDCPA_BYTES - 1];
        indcpa_enc_in::<MlKem1024, 4>(
            &mut EncryptScratch::new(),
            &mut ct,
            &[0u8; SYMBYTES],
            &pk,
            &[0u8; SYMBYTES],
        );
    }

    fn encrypt_decrypt_at_rank<P: MlKemParams, const K: usize>() {
        let mut pk = vec![0u8; P::INDCPA_PK_BYTES];
        let mut sk = vec![0u8; P::INDCPA_SK_BYTES];
        indcpa_keypair_derand_in::<P, K>(&mut KeypairScratch::new(), &mut pk, &mut sk, &[K as u8; SYMBYTES]);

        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 7) as u8);
        let mut ct = vec![0u8; P::INDCPA_BYTES];
        indcpa_enc_in::<P, K>(&mut EncryptScratch::new(), &mut ct, &msg, &pk, &[3u8; SYMBYTES]);

        let mut out = [0u8; SYMBYTES];
        crate::pke::indcpa_dec_in::<P, K>(&mut crate::pke::DecryptScratch::new(), &mut out, &ct, &sk);
        assert_eq!(out, msg);
    }

    #[test]
    fn message_stage_runs_at_every_rank() {
        use crate::params::{MlKem512, MlKem768};
        encrypt_decrypt_at_rank::<MlKem512, 2>();
        encrypt_decrypt_at_rank::<MlKem768, 3>();
        encrypt_decrypt_at_rank::<MlKem1024, 4>();
    }
}
