//! Reusable working storage for the IND-CPA primitives.
//!
//! Each primitive borrows its scratch object exclusively for the duration
//! of one call, so two invocations can never share storage. Every field is
//! zero on return, whichever way the call exits.

use zeroize::Zeroize;

use crate::math::{poly::Poly, polyvec::PolyVec};
use crate::matrix::PolyMatrix;
use crate::params::SYMBYTES;

/// Storage for [`indcpa_keypair_derand_in`](super::indcpa_keypair_derand_in).
#[derive(Zeroize)]
pub struct KeypairScratch<const K: usize> {
    pub(crate) a: PolyMatrix<K>,
    pub(crate) e: PolyVec<K>,
    pub(crate) pkpv: PolyVec<K>,
    pub(crate) skpv: PolyVec<K>,
    pub(crate) public_seed: [u8; SYMBYTES],
    pub(crate) noise_seed: [u8; SYMBYTES],
}

impl<const K: usize> KeypairScratch<K> {
    /// Zero-filled keypair storage, ready for any number of calls.
    pub fn new() -> Self {
        Self {
            a: PolyMatrix::zero(),
            e: PolyVec::zero(),
            pkpv: PolyVec::zero(),
            skpv: PolyVec::zero(),
            public_seed: [0u8; SYMBYTES],
            noise_seed: [0u8; SYMBYTES],
        }
    }

    /// Whether every field is zero-filled.
    pub fn is_erased(&self) -> bool {
        self.a.is_zero()
            && self.e.is_zero()
            && self.pkpv.is_zero()
            && self.skpv.is_zero()
            && self.public_seed == [0u8; SYMBYTES]
            && self.noise_seed == [0u8; SYMBYTES]
    }
}

/// Storage for [`indcpa_enc_in`](super::indcpa_enc_in).
#[derive(Zeroize)]
pub struct EncryptScratch<const K: usize> {
    pub(crate) at: PolyMatrix<K>,
    pub(crate) pkpv: PolyVec<K>,
    pub(crate) sp: PolyVec<K>,
    pub(crate) ep: PolyVec<K>,
    pub(crate) b: PolyVec<K>,
    pub(crate) epp: Poly,
    pub(crate) k: Poly,
    pub(crate) v: Poly,
    pub(crate) public_seed: [u8; SYMBYTES],
}

impl<const K: usize> EncryptScratch<K> {
    /// Zero-filled encryption storage.
    pub fn new() -> Self {
        Self {
            at: PolyMatrix::zero(),
            pkpv: PolyVec::zero(),
            sp: PolyVec::zero(),
            ep: PolyVec::zero(),
            b: PolyVec::zero(),
            epp: Poly::zero(),
            k: Poly::zero(),
            v: Poly::zero(),
            public_seed: [0u8; SYMBYTES],
        }
    }

    /// Whether every field is zero-filled.
    pub fn is_erased(&self) -> bool {
        self.at.is_zero()
            && self.pkpv.is_zero()
            && self.sp.is_zero()
            && self.ep.is_zero()
            && self.b.is_zero()
            && self.epp.is_zero()
            && self.k.is_zero()
            && self.v.is_zero()
            && self.public_seed == [0u8; SYMBYTES]
    }
}

/// Storage for [`indcpa_dec_in`](super::indcpa_dec_in).
#[derive(Zeroize)]
pub struct DecryptScratch<const K: usize> {
    pub(crate) b: PolyVec<K>,
    pub(crate) skpv: PolyVec<K>,
    pub(crate) v: Poly,
    pub(crate) mp: Poly,
}

impl<const K: usize> DecryptScratch<K> {
    /// Zero-filled decryption storage.
    pub fn new() -> Self {
        Self {
            b: PolyVec::zero(),
            skpv: PolyVec::zero(),
            v: Poly::zero(),
            mp: Poly::zero(),
        }
    }

    /// Whether every field is zero-filled.
    pub fn is_erased(&self) -> bool {
        self.b.is_zero() && self.skpv.is_zero() && self.v.is_zero() && self.mp.is_zero()
    }
}

macro_rules! impl_scratch_common {
    ($($name:ident),+) => {$(
        impl<const K: usize> Default for $name<K> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<const K: usize> core::fmt::Debug for $name<K> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("k", &K)
                    .field("erased", &self.is_erased())
                    .finish_non_exhaustive()
            }
        }
    )+};
}

impl_scratch_common!(KeypairScratch, EncryptScratch, DecryptScratch);
