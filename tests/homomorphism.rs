//! End-to-end checks against a small Paillier key pair used as an oracle.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use paillier_agg::{ops, AggregateError, PublicKey};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const P: &[u8] = b"ae658f33fe3b890b93f448b3a5aa3c81";
const Q: &[u8] = b"979a071e518ae4525b4b1b75321c5297";

/// Holds the private half so tests can decrypt aggregates.
struct Oracle {
    key: PublicKey,
    lambda: BigUint,
    mu: BigUint,
}

impl Oracle {
    fn new() -> Self {
        let p = BigUint::parse_bytes(P, 16).unwrap();
        let q = BigUint::parse_bytes(Q, 16).unwrap();
        let key = PublicKey::new(&p * &q).unwrap();
        let lambda = (&p - 1u32).lcm(&(&q - 1u32));
        // g = n + 1 makes L(g^λ mod n²) = λ mod n.
        let mu = mod_inverse(&lambda, key.modulus());
        Self { key, lambda, mu }
    }

    fn pub_hex(&self) -> String {
        self.key.to_hex()
    }

    fn encrypt<R: Rng>(&self, m: u64, rng: &mut R) -> String {
        let n = self.key.modulus();
        let n2 = self.key.modulus_squared();
        let r = loop {
            let r = rng.gen_biguint_below(n);
            if !r.is_zero() && r.gcd(n).is_one() {
                break r;
            }
        };
        let gm = self.key.generator().modpow(&BigUint::from(m), n2);
        ((gm * r.modpow(n, n2)) % n2).to_str_radix(16)
    }

    fn decrypt(&self, hex: &str) -> BigUint {
        let n = self.key.modulus();
        let c = BigUint::parse_bytes(hex.as_bytes(), 16).unwrap();
        let u = c.modpow(&self.lambda, self.key.modulus_squared());
        let l = (u - 1u32) / n;
        (l * &self.mu) % n
    }
}

fn mod_inverse(a: &BigUint, m: &BigUint) -> BigUint {
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let e = a.extended_gcd(&m);
    assert!(e.gcd.is_one(), "not invertible");
    e.x.mod_floor(&m).to_biguint().unwrap()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

#[test]
fn oracle_roundtrip() {
    let o = Oracle::new();
    let mut rng = rng();
    for m in [0u64, 1, 42, u32::MAX as u64] {
        assert_eq!(o.decrypt(&o.encrypt(m, &mut rng)), BigUint::from(m));
    }
}

fn plain_and_permutation() -> impl Strategy<Value = (Vec<u64>, Vec<usize>)> {
    prop::collection::vec(0u64..1 << 32, 1..7).prop_flat_map(|plain| {
        let order: Vec<usize> = (0..plain.len()).collect();
        (Just(plain), Just(order).prop_shuffle())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn add_decrypts_to_plaintext_sum(a in 0u64..1 << 62, b in 0u64..1 << 62, seed in any::<u64>()) {
        let o = Oracle::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let sum = ops::add(&[o.encrypt(a, &mut rng), o.encrypt(b, &mut rng)], &o.pub_hex()).unwrap();
        prop_assert_eq!(o.decrypt(&sum), BigUint::from(a) + b);
    }

    #[test]
    fn scalar_mul_decrypts_to_product(a in any::<u64>(), s in any::<u64>(), seed in any::<u64>()) {
        let o = Oracle::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let out = ops::scalar_mul(&o.encrypt(a, &mut rng), s, &o.pub_hex()).unwrap();
        prop_assert_eq!(o.decrypt(&out), BigUint::from(a) * s);
    }

    #[test]
    fn weighted_add_decrypts_to_dot_product(
        terms in prop::collection::vec((0u64..1 << 32, 0u64..1 << 32), 0..8),
        seed in any::<u64>(),
    ) {
        let o = Oracle::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let cts: Vec<String> = terms.iter().map(|&(m, _)| o.encrypt(m, &mut rng)).collect();
        let weights: Vec<u64> = terms.iter().map(|&(_, w)| w).collect();

        let out = ops::weighted_add(&cts, &weights, &o.pub_hex()).unwrap();
        let expected: BigUint = terms.iter().map(|&(m, w)| BigUint::from(m) * w).sum();
        prop_assert_eq!(o.decrypt(&out), expected);
    }

    #[test]
    fn add_is_order_independent((plain, order) in plain_and_permutation(), seed in any::<u64>()) {
        let o = Oracle::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let cts: Vec<String> = plain.iter().map(|&m| o.encrypt(m, &mut rng)).collect();
        let shuffled: Vec<&str> = order.iter().map(|&i| cts[i].as_str()).collect();

        let in_order = ops::add(&cts, &o.pub_hex()).unwrap();
        prop_assert_eq!(&ops::add(&shuffled, &o.pub_hex()).unwrap(), &in_order);
        prop_assert_eq!(o.decrypt(&in_order), BigUint::from(plain.iter().sum::<u64>()));
    }
}

#[test]
fn unit_weights_equal_plain_add() {
    let o = Oracle::new();
    let mut rng = rng();
    let cts: Vec<String> = (0..5).map(|m| o.encrypt(m, &mut rng)).collect();
    assert_eq!(
        ops::weighted_add(&cts, &[1; 5], &o.pub_hex()).unwrap(),
        ops::add(&cts, &o.pub_hex()).unwrap()
    );
}

#[test]
fn empty_add_decrypts_to_zero() {
    let o = Oracle::new();
    let empty: Vec<String> = Vec::new();
    let out = ops::add(&empty, &o.pub_hex()).unwrap();
    assert_eq!(o.decrypt(&out), BigUint::from(0u32));
}

#[test]
fn one_bad_ciphertext_fails_the_whole_call() {
    let o = Oracle::new();
    let mut rng = rng();
    let mut cts: Vec<String> = (0..4).map(|m| o.encrypt(m, &mut rng)).collect();
    cts.push(o.key.modulus_squared().to_str_radix(16));
    cts.push(o.encrypt(9, &mut rng));

    assert_eq!(
        ops::add(&cts, &o.pub_hex()),
        Err(AggregateError::CiphertextOutOfRange { index: Some(4) })
    );
    assert_eq!(
        ops::weighted_add(&cts, &[2; 6], &o.pub_hex()),
        Err(AggregateError::CiphertextOutOfRange { index: Some(4) })
    );
}

#[test]
fn ciphertext_under_a_bigger_key_is_rejected() {
    let o = Oracle::new();
    let big = PublicKey::new(o.key.modulus() * 3u32).unwrap();
    let foreign = (big.modulus_squared() - 1u32).to_str_radix(16);
    assert!(matches!(
        ops::scalar_mul(&foreign, 2, &o.pub_hex()),
        Err(AggregateError::CiphertextOutOfRange { .. })
    ));
}

#[test]
fn concurrent_calls_do_not_interfere() {
    let o = Oracle::new();
    let mut rng = rng();
    let batches: Vec<(Vec<String>, u64)> = (0..8u64)
        .map(|t| {
            let plain: Vec<u64> = (0..4).map(|i| t * 10 + i).collect();
            let cts = plain.iter().map(|&m| o.encrypt(m, &mut rng)).collect();
            (cts, plain.iter().sum())
        })
        .collect();
    let pub_hex = o.pub_hex();
    let pub_hex = pub_hex.as_str();

    let outputs: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = batches
            .iter()
            .map(|(cts, _)| s.spawn(move || ops::add(cts, pub_hex).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for ((_, expected), out) in batches.iter().zip(&outputs) {
        assert_eq!(o.decrypt(out), BigUint::from(*expected));
    }
}
