//! Core mathematical primitives for ML-KEM.
//!
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! polynomial and polynomial-vector arithmetic, byte-level packing and
//! compression, and CBD noise sampling. Uniform matrix sampling lives in
//! [`crate::matrix`].

pub mod ntt;
pub mod pack;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod sample;
