//! IND-CCA2 key encapsulation (ML-KEM, FIPS 203) on top of the dual-context
//! IND-CPA core: keygen, encapsulate, decapsulate with implicit rejection.

use rand_core::{CryptoRng, RngCore};
use tracing::debug_span;
use zerocopy::transmute_ref;
use zeroize::Zeroize;

use crate::ct;
use crate::hash;
use crate::params::{ByteArray, MlKemParams, SYMBYTES};
use crate::pke;
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret, Sym2};

/// Deterministic key generation from `coins = d || z`: `d` seeds the
/// IND-CPA keypair, `z` keys the implicit-rejection PRF.
#[must_use]
pub fn keypair_derand<P: MlKemParams>(coins: &[u8; 2 * SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let _span = debug_span!("kem.keypair", k = P::K).entered();
    let Sym2(d, z): &Sym2 = transmute_ref!(coins);

    let mut pk_arr = P::PkArray::zeroed();
    let mut sk_arr = P::SkArray::zeroed();
    let pk = pk_arr.as_mut();
    let sk = sk_arr.as_mut();

    pke::indcpa_keypair_derand::<P>(pk, &mut sk[..P::INDCPA_SK_BYTES], d);

    // sk = indcpa_sk || pk || H(pk) || z
    let (_, tail) = sk.split_at_mut(P::INDCPA_SK_BYTES);
    let (sk_pk, tail) = tail.split_at_mut(P::PK_BYTES);
    let (sk_h, sk_z) = tail.split_at_mut(SYMBYTES);
    sk_pk.copy_from_slice(pk);
    sk_h.copy_from_slice(&hash::hash_h(&*pk));
    sk_z.copy_from_slice(z);

    (PublicKey::from_bytes(pk_arr), SecretKey::from_bytes(sk_arr))
}

/// Key generation with caller-supplied randomness.
pub fn keypair<P: MlKemParams>(rng: &mut (impl RngCore + CryptoRng)) -> (PublicKey<P>, SecretKey<P>) {
    let mut coins = [0u8; 2 * SYMBYTES];
    rng.fill_bytes(&mut coins);
    let keys = keypair_derand::<P>(&coins);
    coins.zeroize();
    keys
}

/// Deterministic encapsulation with message `m`.
#[must_use]
pub fn encapsulate_derand<P: MlKemParams>(
    pk: &PublicKey<P>,
    m: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    let _span = debug_span!("kem.encapsulate", k = P::K).entered();

    // (K || r) = G(m || H(pk))
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(m);
    buf[SYMBYTES..].copy_from_slice(&hash::hash_h(pk.as_bytes()));
    let mut kr = hash::hash_g(&buf);
    buf.zeroize();

    let Sym2(k, r): &Sym2 = transmute_ref!(&kr);
    let mut ct_arr = P::CtArray::zeroed();
    pke::indcpa_enc::<P>(ct_arr.as_mut(), m, pk.as_bytes(), r);
    let ss = SharedSecret::from(k);
    kr.zeroize();

    (Ciphertext::from_bytes(ct_arr), ss)
}

/// Encapsulation with caller-supplied randomness.
pub fn encapsulate<P: MlKemParams>(
    pk: &PublicKey<P>,
    rng: &mut (impl RngCore + CryptoRng),
) -> (Ciphertext<P>, SharedSecret) {
    let mut m = [0u8; SYMBYTES];
    rng.fill_bytes(&mut m);
    let out = encapsulate_derand::<P>(pk, &m);
    m.zeroize();
    out
}

/// Recover the shared secret. A ciphertext that does not re-encrypt to
/// itself yields the pseudorandom `J(z, ct)` instead of an error.
pub fn decapsulate<P: MlKemParams>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let _span = debug_span!("kem.decapsulate", k = P::K).entered();
    let sk_bytes = sk.as_bytes();
    let ct_bytes = ct.as_bytes();

    let (indcpa_sk, tail) = sk_bytes.split_at(P::INDCPA_SK_BYTES);
    let (pk_bytes, tail) = tail.split_at(P::PK_BYTES);
    let (h_pk, z) = tail.split_at(SYMBYTES);

    let mut m_prime = [0u8; SYMBYTES];
    pke::indcpa_dec::<P>(&mut m_prime, ct_bytes, indcpa_sk);

    // (K' || r') = G(m' || H(pk))
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&m_prime);
    buf[SYMBYTES..].copy_from_slice(h_pk);
    let mut kr = hash::hash_g(&buf);
    let Sym2(k_prime, r_prime): &Sym2 = transmute_ref!(&kr);

    let mut cmp = P::CtArray::zeroed();
    pke::indcpa_enc::<P>(cmp.as_mut(), &m_prime, pk_bytes, r_prime);
    let fail = ct::ct_verify(ct_bytes, cmp.as_ref());

    let mut z_arr = [0u8; SYMBYTES];
    z_arr.copy_from_slice(z);
    let mut ss = hash::rkprf(&z_arr, ct_bytes);
    ct::ct_cmov(&mut ss, k_prime, 1 - fail);

    z_arr.zeroize();
    m_prime.zeroize();
    buf.zeroize();
    kr.zeroize();
    cmp.zeroize();

    let out = SharedSecret::from_bytes(ss);
    ss.zeroize();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MlKem512, MlKem768};

    #[test]
    fn secret_key_layout() {
        let coins: [u8; 64] = core::array::from_fn(|i| i as u8);
        let (pk, sk) = keypair_derand::<MlKem512>(&coins);
        let sk = sk.as_bytes();
        let off = MlKem512::INDCPA_SK_BYTES;
        assert_eq!(&sk[off..off + MlKem512::PK_BYTES], pk.as_bytes());
        assert_eq!(
            &sk[off + MlKem512::PK_BYTES..off + MlKem512::PK_BYTES + SYMBYTES],
            &hash::hash_h(pk.as_bytes())
        );
        assert_eq!(&sk[MlKem512::SK_BYTES - SYMBYTES..], &coins[SYMBYTES..]);
    }

    #[test]
    fn roundtrip_and_implicit_rejection() {
        let (pk, sk) = keypair_derand::<MlKem768>(&[5u8; 64]);
        let (ct, ss) = encapsulate_derand::<MlKem768>(&pk, &[6u8; SYMBYTES]);
        assert_eq!(decapsulate::<MlKem768>(&ct, &sk), ss);

        let mut bad = ct.clone();
        bad.as_bytes_mut()[0] ^= 1;
        let rejected = decapsulate::<MlKem768>(&bad, &sk);
        assert_ne!(rejected, ss);

        let z: [u8; SYMBYTES] = sk.as_bytes()[MlKem768::SK_BYTES - SYMBYTES..]
            .try_into()
            .unwrap();
        assert_eq!(rejected.as_bytes(), &hash::rkprf(&z, bad.as_bytes()));
    }
}
