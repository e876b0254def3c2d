//! Deterministic and randomized ML-KEM behaviour checks.

use kem_dualcore::{
    Ciphertext, Error, MlKem512, MlKem768, MlKem1024, MlKemParams, PublicKey, SecretKey,
    decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn keygen_coins(tag: u8) -> [u8; 64] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(37)))
}

fn enc_coins(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(53)))
}

fn check_roundtrip<P: MlKemParams>() {
    let (pk, sk) = keypair_derand::<P>(&keygen_coins(0));
    let (ct, ss) = encapsulate_derand::<P>(&pk, &enc_coins(0));
    assert_eq!(decapsulate::<P>(&ct, &sk), ss);
}

fn check_determinism<P: MlKemParams>() {
    let (pk1, sk1) = keypair_derand::<P>(&keygen_coins(1));
    let (pk2, sk2) = keypair_derand::<P>(&keygen_coins(1));
    assert_eq!(pk1, pk2);
    assert_eq!(sk1.as_bytes(), sk2.as_bytes());

    let (ct1, ss1) = encapsulate_derand::<P>(&pk1, &enc_coins(1));
    let (ct2, ss2) = encapsulate_derand::<P>(&pk2, &enc_coins(1));
    assert_eq!(ct1, ct2);
    assert_eq!(ss1, ss2);
}

fn check_sizes<P: MlKemParams>() {
    let (pk, sk) = keypair_derand::<P>(&keygen_coins(2));
    let (ct, ss) = encapsulate_derand::<P>(&pk, &enc_coins(2));
    assert_eq!(pk.as_bytes().len(), P::PK_BYTES);
    assert_eq!(sk.as_bytes().len(), P::SK_BYTES);
    assert_eq!(ct.as_bytes().len(), P::CT_BYTES);
    assert_eq!(ss.as_bytes().len(), 32);
}

fn check_wrong_secret_key<P: MlKemParams>() {
    let (pk, _) = keypair_derand::<P>(&keygen_coins(3));
    let (_, other_sk) = keypair_derand::<P>(&keygen_coins(4));
    let (ct, ss) = encapsulate_derand::<P>(&pk, &enc_coins(3));
    assert_ne!(decapsulate::<P>(&ct, &other_sk), ss);
}

fn check_distinct_encapsulations<P: MlKemParams>() {
    let (pk, sk) = keypair_derand::<P>(&keygen_coins(5));
    let (ct1, ss1) = encapsulate_derand::<P>(&pk, &enc_coins(10));
    let (ct2, ss2) = encapsulate_derand::<P>(&pk, &enc_coins(11));
    assert_ne!(ct1, ct2);
    assert_ne!(ss1, ss2);
    assert_eq!(decapsulate::<P>(&ct1, &sk), ss1);
    assert_eq!(decapsulate::<P>(&ct2, &sk), ss2);
}

fn check_randomized_roundtrip<P: MlKemParams>() {
    let mut rng = StdRng::seed_from_u64(0xD0A1 ^ P::K as u64);
    for _ in 0..8 {
        let (pk, sk) = keypair::<P>(&mut rng);
        let (ct, ss) = encapsulate::<P>(&pk, &mut rng);
        assert_eq!(decapsulate::<P>(&ct, &sk), ss);
    }
}

/// Every corrupted ciphertext is rejected: the secret differs from the
/// honest one and is stable across repeated decapsulation.
fn check_corrupted_ciphertexts<P: MlKemParams>() {
    const TRIALS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0xC0FFEE ^ P::K as u64);
    let (pk, sk) = keypair::<P>(&mut rng);
    for trial in 0..TRIALS {
        let (ct, ss) = encapsulate::<P>(&pk, &mut rng);
        let mut bad = ct.clone();
        let pos = rng.gen_range(0..P::CT_BYTES);
        bad.as_bytes_mut()[pos] ^= rng.gen_range(1..=255u8);

        let rejected = decapsulate::<P>(&bad, &sk);
        assert_ne!(rejected, ss, "trial {trial}, byte {pos}");
        if trial % 100 == 0 {
            assert_eq!(decapsulate::<P>(&bad, &sk), rejected);
        }
    }
}

fn check_slice_conversions<P: MlKemParams>() {
    let (pk, sk) = keypair_derand::<P>(&keygen_coins(6));
    let (ct, ss) = encapsulate_derand::<P>(&pk, &enc_coins(6));

    let pk2 = PublicKey::<P>::try_from(pk.as_bytes()).unwrap();
    let sk2 = SecretKey::<P>::try_from(sk.as_bytes()).unwrap();
    let ct2 = Ciphertext::<P>::try_from(ct.as_bytes()).unwrap();
    assert_eq!(pk2, pk);
    assert_eq!(decapsulate::<P>(&ct2, &sk2), ss);

    let short = &ct.as_bytes()[1..];
    assert_eq!(
        Ciphertext::<P>::try_from(short).unwrap_err(),
        Error::InvalidLength {
            expected: P::CT_BYTES,
            actual: P::CT_BYTES - 1,
        }
    );
    assert!(PublicKey::<P>::try_from(&[0u8; 1][..]).is_err());
}

macro_rules! for_each_param_set {
    ($($check:ident),* $(,)?) => {
        mod mlkem512 {
            use super::*;
            $( #[test] fn $check() { super::$check::<MlKem512>(); } )*
        }
        mod mlkem768 {
            use super::*;
            $( #[test] fn $check() { super::$check::<MlKem768>(); } )*
        }
        mod mlkem1024 {
            use super::*;
            $( #[test] fn $check() { super::$check::<MlKem1024>(); } )*
        }
    };
}

for_each_param_set!(
    check_roundtrip,
    check_determinism,
    check_sizes,
    check_wrong_secret_key,
    check_distinct_encapsulations,
    check_randomized_roundtrip,
    check_corrupted_ciphertexts,
    check_slice_conversions,
);
