use proptest::prelude::*;
use yashe::{
    Ciphertext, KeyGenerator, KeySet, Parameters, ParametersLiteral, Plaintext, Yashe, YasheError,
};

fn yashe(seed: u8) -> Yashe {
    Yashe::with_seed(&ParametersLiteral::default(), [seed; 32]).unwrap()
}

#[test]
fn encrypt_decrypt_42() {
    let mut yashe: Yashe = yashe(0);
    let ct: Ciphertext = yashe.encrypt_integer(42).unwrap();
    assert_eq!(ct.depth(), 0);
    assert_eq!(yashe.decrypt_integer(&ct).unwrap(), 42);
}

#[test]
fn add_42_13() {
    let mut yashe: Yashe = yashe(1);
    let a: Ciphertext = yashe.encrypt_integer(42).unwrap();
    let b: Ciphertext = yashe.encrypt_integer(13).unwrap();
    let c: Ciphertext = yashe.add(&a, &b).unwrap();
    assert_eq!(c.depth(), 0);
    assert_eq!(yashe.decrypt_integer(&c).unwrap(), 55);
}

#[test]
fn mul_42_13() {
    let mut yashe: Yashe = yashe(2);
    let a: Ciphertext = yashe.encrypt_integer(42).unwrap();
    let b: Ciphertext = yashe.encrypt_integer(13).unwrap();
    let c: Ciphertext = yashe.mul(&a, &b).unwrap();
    assert_eq!(c.depth(), 1);
    assert_eq!(yashe.decrypt_integer(&c).unwrap(), 546);
}

#[test]
fn additions_wrap_mod_t() {
    let mut yashe: Yashe = yashe(3);
    let a: Ciphertext = yashe.encrypt_integer(1000).unwrap();
    let b: Ciphertext = yashe.encrypt_integer(100).unwrap();
    let c: Ciphertext = yashe.add(&a, &b).unwrap();
    assert_eq!(yashe.decrypt_integer(&c).unwrap(), (1000 + 100) % 1024);
    let d: Ciphertext = yashe.mul(&a, &b).unwrap();
    assert_eq!(yashe.decrypt_integer(&d).unwrap(), (1000 * 100) % 1024);
}

#[test]
fn two_chained_multiplications() {
    let mut yashe: Yashe = yashe(4);
    assert_eq!(yashe.max_multiplicative_depth(), 2);
    let a: Ciphertext = yashe.encrypt_integer(3).unwrap();
    let b: Ciphertext = yashe.encrypt_integer(5).unwrap();
    let c: Ciphertext = yashe.encrypt_integer(7).unwrap();
    let d: Ciphertext = yashe.encrypt_integer(2).unwrap();

    let ab: Ciphertext = yashe.mul(&a, &b).unwrap();
    let cd: Ciphertext = yashe.mul(&c, &d).unwrap();
    let abcd: Ciphertext = yashe.mul(&ab, &cd).unwrap();
    assert_eq!(abcd.depth(), 2);
    assert_eq!(yashe.decrypt_integer(&abcd).unwrap(), 210);

    let abc: Ciphertext = yashe.mul(&ab, &c).unwrap();
    assert_eq!(abc.depth(), 2);
    assert_eq!(yashe.decrypt_integer(&abc).unwrap(), 105);
}

#[test]
fn polynomial_messages_multiply_in_the_ring() {
    let mut yashe: Yashe = yashe(5);
    let params: Parameters = yashe.params().clone();
    // (1 + x) * (2 + x^31) = 2 + 2x + x^31 + x^32, and x^32 = 1
    let mut m1: Vec<u64> = vec![0; 32];
    m1[0] = 1;
    m1[1] = 1;
    let mut m2: Vec<u64> = vec![0; 32];
    m2[0] = 2;
    m2[31] = 1;
    let a: Ciphertext = yashe.encrypt(&Plaintext::new(&params, &m1).unwrap()).unwrap();
    let b: Ciphertext = yashe.encrypt(&Plaintext::new(&params, &m2).unwrap()).unwrap();
    let c: Ciphertext = yashe.mul(&a, &b).unwrap();

    let mut expected: Vec<u64> = vec![0; 32];
    expected[0] = 3;
    expected[1] = 2;
    expected[31] = 1;
    assert_eq!(yashe.decrypt(&c).unwrap().coeffs(), expected.as_slice());

    let s: Ciphertext = yashe.add(&a, &b).unwrap();
    let mut expected: Vec<u64> = vec![0; 32];
    expected[0] = 3;
    expected[1] = 1;
    expected[31] = 1;
    assert_eq!(yashe.decrypt(&s).unwrap().coeffs(), expected.as_slice());
}

#[test]
fn measured_noise_stays_below_estimates() {
    let mut yashe: Yashe = yashe(6);
    let estimator = yashe.noise_estimator();
    let a: Ciphertext = yashe.encrypt_integer(17).unwrap();
    let b: Ciphertext = yashe.encrypt_integer(29).unwrap();
    assert!(yashe.noise(&a).unwrap() <= estimator.fresh());
    let c: Ciphertext = yashe.mul(&a, &b).unwrap();
    assert!(yashe.noise(&c).unwrap() <= estimator.bound_for_depth(1));
    assert!(estimator.is_decryptable(&yashe.noise(&c).unwrap()));
}

#[test]
fn ciphertexts_of_other_parameters_are_rejected() {
    let mut small: Yashe =
        Yashe::with_seed(&ParametersLiteral { log_n: 4, ..Default::default() }, [7u8; 32]).unwrap();
    let large: Yashe = yashe(8);
    let ct: Ciphertext = small.encrypt_integer(1).unwrap();
    assert!(matches!(large.decrypt(&ct), Err(YasheError::InvalidCiphertext(_))));
    assert!(matches!(large.add(&ct, &ct), Err(YasheError::InvalidCiphertext(_))));
}

#[test]
fn keygen_with_default_parameters() {
    let params: Parameters = Parameters::new(&ParametersLiteral::default()).unwrap();
    let keys: KeySet = KeyGenerator {}
        .gen_keys(&params, &mut sampling::Source::new([9u8; 32]))
        .unwrap();
    assert_eq!(keys.evk.gamma().len(), params.ell());
}

#[test]
fn key_generation_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
    let mut yashe: Yashe = yashe(10);
    let ct: Ciphertext = yashe.encrypt_integer(7).unwrap();
    assert_eq!(yashe.decrypt_integer(&ct).unwrap(), 7);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn homomorphic_add_and_mul(seed in any::<[u8; 32]>(), i in 0u64..1024, j in 0u64..1024) {
        let mut yashe: Yashe = Yashe::with_seed(&ParametersLiteral::default(), seed).unwrap();
        let a: Ciphertext = yashe.encrypt_integer(i).unwrap();
        let b: Ciphertext = yashe.encrypt_integer(j).unwrap();
        prop_assert_eq!(yashe.decrypt_integer(&a).unwrap(), i);
        prop_assert_eq!(yashe.decrypt_integer(&yashe.add(&a, &b).unwrap()).unwrap(), (i + j) % 1024);
        prop_assert_eq!(yashe.decrypt_integer(&yashe.mul(&a, &b).unwrap()).unwrap(), (i * j) % 1024);
    }
}
