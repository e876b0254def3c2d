//! `kem-dualcore` -- ML-KEM with the IND-CPA core split across two
//! execution contexts.
//!
//! Key generation and encryption run as a sequence of stages. In each stage
//! the calling thread hands one [`multicore::Job`] to a freshly launched
//! helper thread over a one-slot mailbox, works on a disjoint share of the
//! data itself, and waits for the helper's completion token before touching
//! anything the helper wrote. Every secret-derived intermediate lives in an
//! explicit scratch object and is zeroized after its last use.
//!
//! The FIPS 203 KEM ([`kem`]) is layered on top for all three parameter
//! sets: ML-KEM-512, ML-KEM-768, and ML-KEM-1024.

#![deny(unsafe_code)]

pub mod ct;
pub mod erase;
pub mod hash;
pub mod kem;
pub mod math;
pub mod matrix;
pub mod multicore;
pub mod params;
pub mod pke;
pub mod serialize;
pub mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{MlKem512, MlKem768, MlKem1024, MlKemParams};
pub use pke::{indcpa_dec, indcpa_enc, indcpa_keypair_derand};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// Errors returned when constructing keys or ciphertexts from byte slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input byte slice has wrong length for this parameter set.
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
        }
    }
}

impl core::error::Error for Error {}
