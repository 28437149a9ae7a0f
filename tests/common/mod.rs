#![allow(dead_code)]

use ark_bls12_381::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::UniformRand;
use rust_kzg_bls12381::blob::Blob;
use rust_kzg_bls12381::consts::FIELD_ELEMENTS_PER_BLOB;
use rust_kzg_bls12381::helpers;
use rust_kzg_bls12381::srs::{self, KzgSettings};
use rust_kzg_bls12381::traits::{G1AffineExt, G2AffineExt};

/// Fixed setup secret. Only the test fixture knows tau; the library under
/// test sees nothing but the serialized points.
pub fn test_tau() -> Fr {
    Fr::from(1_234_567_890_123_456_789u64)
}

/// Serialized synthetic powers of tau: `FIELD_ELEMENTS_PER_BLOB` monomial G1
/// powers and the two G2 points verification needs.
pub fn setup_bytes() -> (Vec<u8>, Vec<u8>) {
    let tau = test_tau();
    let g1_generator = G1Affine::generator();

    let mut g1_bytes = Vec::new();
    let mut power = Fr::from(1u64);
    for _ in 0..FIELD_ELEMENTS_PER_BLOB {
        let point = (g1_generator * power).into_affine();
        g1_bytes.extend_from_slice(&point.to_compressed());
        power *= tau;
    }

    let g2_generator = G2Affine::generator();
    let mut g2_bytes = Vec::new();
    g2_bytes.extend_from_slice(&g2_generator.to_compressed());
    g2_bytes.extend_from_slice(&(g2_generator * tau).into_affine().to_compressed());

    (g1_bytes, g2_bytes)
}

pub fn load_test_settings() -> KzgSettings {
    let (g1_bytes, g2_bytes) = setup_bytes();
    srs::load_trusted_setup_from_bytes(&g1_bytes, &g2_bytes).unwrap()
}

/// The synthetic setup in the text file format.
pub fn setup_text() -> String {
    let (g1_bytes, g2_bytes) = setup_bytes();
    format!(
        "{}\n2\n{}\n{}\n",
        FIELD_ELEMENTS_PER_BLOB,
        hex::encode(&g1_bytes),
        hex::encode(&g2_bytes)
    )
}

pub fn write_temp_setup(contents: &str, name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("kzg-setup-{}-{}.txt", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn blob_from_scalars(scalars: &[Fr]) -> Blob {
    let mut bytes = Vec::with_capacity(scalars.len() * 32);
    for scalar in scalars {
        bytes.extend_from_slice(&helpers::fr_to_bytes(scalar));
    }
    Blob::new(&bytes).unwrap()
}

pub fn random_blob<R: rand::Rng>(rng: &mut R) -> Blob {
    let scalars: Vec<Fr> = (0..FIELD_ELEMENTS_PER_BLOB)
        .map(|_| Fr::rand(rng))
        .collect();
    blob_from_scalars(&scalars)
}
