use ark_bls12_381::{Fr, G1Projective};
use ark_ff::Field;
use ark_std::{One, UniformRand, Zero};
use rust_kzg_bls12381::fft::FftSettings;
use rust_kzg_bls12381::helpers;

#[test]
fn test_fft_settings_root_tables() {
    let fs = FftSettings::new(6).unwrap();
    assert_eq!(fs.max_width(), 64);

    let expanded = fs.expanded_roots_of_unity();
    assert_eq!(expanded.len(), 65);
    assert_eq!(expanded[0], Fr::one());
    assert_eq!(expanded[64], Fr::one());
    for root in &expanded[1..64] {
        assert_ne!(*root, Fr::one(), "no interior root may be one");
    }

    let reverse = fs.reverse_roots_of_unity();
    for i in 0..=64 {
        assert_eq!(reverse[i], expanded[64 - i]);
    }
}

#[test]
fn test_roots_of_unity_are_a_permutation() {
    let fs = FftSettings::new(5).unwrap();
    let mut permuted = fs.roots_of_unity().to_vec();
    let mut expanded = fs.expanded_roots_of_unity()[..32].to_vec();
    permuted.sort();
    expanded.sort();
    assert_eq!(permuted, expanded);
}

#[test]
fn test_roots_of_unity_have_full_order() {
    let fs = FftSettings::new(5).unwrap();
    for root in fs.roots_of_unity() {
        assert_eq!(root.pow([32u64]), Fr::one());
    }
    // The expanded table is in power order, so adjacent entries are related
    // by the primitive root.
    let expanded = fs.expanded_roots_of_unity();
    let omega = expanded[1];
    for i in 1..=32 {
        assert_eq!(expanded[i], expanded[i - 1] * omega);
    }
}

#[test]
fn test_fft_g1_roundtrip() {
    let mut rng = ark_std::test_rng();
    let fs = FftSettings::new(5).unwrap();

    let input: Vec<G1Projective> = (0..32).map(|_| G1Projective::rand(&mut rng)).collect();
    let transformed = fs.fft_g1(&input, false).unwrap();
    let recovered = fs.fft_g1(&transformed, true).unwrap();
    assert_eq!(recovered, input);

    // And the other way around.
    let inverted = fs.fft_g1(&input, true).unwrap();
    let restored = fs.fft_g1(&inverted, false).unwrap();
    assert_eq!(restored, input);
}

#[test]
fn test_fft_g1_smaller_than_max_width() {
    let mut rng = ark_std::test_rng();
    let fs = FftSettings::new(6).unwrap();

    // Smaller power-of-two sizes stride through the same tables.
    for n in [1usize, 2, 8, 16] {
        let input: Vec<G1Projective> = (0..n).map(|_| G1Projective::rand(&mut rng)).collect();
        let roundtrip = fs.fft_g1(&fs.fft_g1(&input, false).unwrap(), true).unwrap();
        assert_eq!(roundtrip, input, "roundtrip failed for n = {n}");
    }
}

#[test]
fn test_fft_g1_matches_naive_dft() {
    let mut rng = ark_std::test_rng();
    let fs = FftSettings::new(3).unwrap();
    let input: Vec<G1Projective> = (0..8).map(|_| G1Projective::rand(&mut rng)).collect();

    let output = fs.fft_g1(&input, false).unwrap();

    let roots = fs.expanded_roots_of_unity();
    for (k, value) in output.iter().enumerate() {
        let mut expected = G1Projective::zero();
        for (j, point) in input.iter().enumerate() {
            expected += helpers::g1_mul(point, &roots[(j * k) % 8]);
        }
        assert_eq!(*value, expected, "output {k} disagrees with the naive DFT");
    }
}

#[test]
fn test_fft_g1_rejects_bad_sizes() {
    let mut rng = ark_std::test_rng();
    let fs = FftSettings::new(4).unwrap();

    let input: Vec<G1Projective> = (0..3).map(|_| G1Projective::rand(&mut rng)).collect();
    assert!(fs.fft_g1(&input, false).is_err());

    let input: Vec<G1Projective> = (0..32).map(|_| G1Projective::rand(&mut rng)).collect();
    assert!(fs.fft_g1(&input, false).is_err());

    assert!(fs.fft_g1(&[], false).is_err());
}

#[test]
fn test_fft_g1_zero_vector() {
    let fs = FftSettings::new(4).unwrap();
    let input = vec![G1Projective::zero(); 16];
    let output = fs.fft_g1(&input, true).unwrap();
    assert!(output.iter().all(|point| point.is_zero()));
}
