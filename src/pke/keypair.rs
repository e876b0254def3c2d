//! IND-CPA key generation split across the main and helper contexts.
//!
//! | stage | helper                          | main                                   |
//! |-------|---------------------------------|----------------------------------------|
//! | A     | `G(coins \|\| K)`, expand `A`   | `G(coins \|\| K)`, sample `s`, `e`, NTT |
//! | B     | rows `[K/2, K)` of `A . s`      | rows `[0, K/2)` of `A . s`             |
//! | C     | pack the public key             | pack the secret key                    |

use tracing::debug_span;

use super::{KeypairScratch, getnoise};
use crate::erase::{EraseOnDrop, erase};
use crate::multicore::{
    Job,
    job::{expand_coins, multiply_range},
    run_stage, split_point,
};
use crate::params::{MlKemParams, SYMBYTES};
use crate::serialize;

/// Deterministic IND-CPA keypair into caller-provided `scratch`.
///
/// `pk` must be `P::INDCPA_PK_BYTES` long and `sk` `P::INDCPA_SK_BYTES`;
/// `K` must equal `P::K`. Identical `coins` give identical keys.
///
/// # Panics
/// On a length mismatch. `scratch` is zero on return in every case.
pub fn indcpa_keypair_derand_in<P: MlKemParams, const K: usize>(
    scratch: &mut KeypairScratch<K>,
    pk: &mut [u8],
    sk: &mut [u8],
    coins: &[u8; SYMBYTES],
) {
    assert_eq!(K, P::K, "scratch rank does not match the parameter set");
    assert_eq!(pk.len(), P::INDCPA_PK_BYTES, "public key buffer length");
    assert_eq!(sk.len(), P::INDCPA_SK_BYTES, "secret key buffer length");

    let mut guard = EraseOnDrop::new(scratch);
    let KeypairScratch {
        a,
        e,
        pkpv,
        skpv,
        public_seed,
        noise_seed,
    } = &mut *guard;

    {
        let _stage = debug_span!("keypair.stage_a", k = K).entered();
        let job = Job::HashAndGenMatrix {
            coins,
            public_seed: &mut *public_seed,
            a: &mut *a,
        };
        run_stage(job, || {
            let mut digest = expand_coins::<K>(coins);
            noise_seed.copy_from_slice(&digest[SYMBYTES..]);
            erase(&mut digest);

            let mut nonce = 0u8;
            getnoise(&mut skpv.polys, P::ETA1, noise_seed, &mut nonce);
            getnoise(&mut e.polys, P::ETA1, noise_seed, &mut nonce);
            erase(&mut *noise_seed);

            skpv.ntt();
            e.ntt();
        });
    }

    {
        let _stage = debug_span!("keypair.stage_b", k = K).entered();
        let split = split_point(K);
        let (rows_main, rows_helper) = a.rows.split_at(split);
        let (out_main, out_helper) = pkpv.polys.split_at_mut(split);
        let s = &*skpv;
        let job = Job::MultiplyRange {
            rows: rows_helper,
            vector: s,
            out: out_helper,
            tomont: true,
        };
        run_stage(job, || multiply_range(rows_main, s, out_main, true));
        erase(&mut *a);

        pkpv.add_assign(e);
        pkpv.reduce();
        erase(&mut *e);
    }

    {
        let _stage = debug_span!("keypair.stage_c", k = K).entered();
        let job = Job::PackPublicKey {
            pk,
            pkpv: &*pkpv,
            public_seed: &*public_seed,
        };
        run_stage(job, || {
            serialize::pack_sk(sk, skpv);
            erase(&mut *skpv);
        });
        erase(&mut *pkpv);
        erase(&mut *public_seed);
    }
}
