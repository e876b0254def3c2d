//! Work descriptors handed from main to the helper.
//!
//! A [`Job`] is built completely before hand-off and holds exclusive or
//! shared borrows of storage that main does not touch until the stage
//! barrier. Moving it through the forward channel transfers ownership
//! exactly once; the helper consumes it with [`Job::execute`].

use tracing::trace;
use zeroize::Zeroize;

use crate::hash;
use crate::math::{poly::Poly, polyvec::PolyVec};
use crate::matrix::{PolyMatrix, gen_matrix};
use crate::params::SYMBYTES;
use crate::serialize;

/// One unit of helper work.
pub enum Job<'a, const K: usize> {
    /// Derive `(rho, sigma) = G(coins || K)`, publish `rho`, wipe the digest,
    /// then expand the untransposed matrix from `rho`.
    HashAndGenMatrix {
        coins: &'a [u8; SYMBYTES],
        public_seed: &'a mut [u8; SYMBYTES],
        a: &'a mut PolyMatrix<K>,
    },
    /// `out[i] = rows[i] . vector` (NTT domain) for a contiguous lane range,
    /// optionally converted to Montgomery form.
    MultiplyRange {
        rows: &'a [PolyVec<K>],
        vector: &'a PolyVec<K>,
        out: &'a mut [Poly],
        tomont: bool,
    },
    /// Serialize `pkpv || public_seed` into `pk`.
    PackPublicKey {
        pk: &'a mut [u8],
        pkpv: &'a PolyVec<K>,
        public_seed: &'a [u8; SYMBYTES],
    },
    /// Map message bits to polynomial coefficients.
    EncodeMessage {
        msg: &'a [u8; SYMBYTES],
        k: &'a mut Poly,
    },
}

impl<const K: usize> Job<'_, K> {
    /// Stable name used in traces and completion tokens.
    pub fn name(&self) -> &'static str {
        match self {
            Job::HashAndGenMatrix { .. } => "hash_and_gen_matrix",
            Job::MultiplyRange { .. } => "multiply_range",
            Job::PackPublicKey { .. } => "pack_public_key",
            Job::EncodeMessage { .. } => "encode_message",
        }
    }

    /// Run the job to completion on the current thread.
    pub fn execute(self) {
        match self {
            Job::HashAndGenMatrix {
                coins,
                public_seed,
                a,
            } => {
                let mut digest = expand_coins::<K>(coins);
                public_seed.copy_from_slice(&digest[..SYMBYTES]);
                digest.zeroize();
                gen_matrix(a, public_seed, false);
            }
            Job::MultiplyRange {
                rows,
                vector,
                out,
                tomont,
            } => {
                trace!(lanes = out.len(), tomont, "multiplying lane range");
                multiply_range(rows, vector, out, tomont);
            }
            Job::PackPublicKey {
                pk,
                pkpv,
                public_seed,
            } => serialize::pack_pk(pk, pkpv, public_seed),
            Job::EncodeMessage { msg, k } => k.frommsg(msg),
        }
    }
}

impl<const K: usize> core::fmt::Debug for Job<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Job").field("name", &self.name()).finish_non_exhaustive()
    }
}

/// `G(coins || K)`: the first half is the public seed, the second the noise seed.
pub(crate) fn expand_coins<const K: usize>(coins: &[u8; SYMBYTES]) -> [u8; 2 * SYMBYTES] {
    let mut input = [0u8; SYMBYTES + 1];
    input[..SYMBYTES].copy_from_slice(coins);
    input[SYMBYTES] = K as u8;
    let digest = hash::hash_g(&input);
    input.zeroize();
    digest
}

/// Matrix-vector product over one lane range: `out[i] = rows[i] . vector`.
pub fn multiply_range<const K: usize>(
    rows: &[PolyVec<K>],
    vector: &PolyVec<K>,
    out: &mut [Poly],
    tomont: bool,
) {
    debug_assert_eq!(rows.len(), out.len());
    for (r, row) in out.iter_mut().zip(rows) {
        PolyVec::basemul_acc_montgomery(r, row, vector);
        if tomont {
            r.tomont();
        }
    }
}
