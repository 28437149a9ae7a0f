use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, PrimeGroup, VariableBaseMSM};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::CanonicalDeserialize;
use ark_std::{One, Zero};
use sha2::{Digest, Sha256};

use crate::blob::Blob;
use crate::consts::{
    BYTES_PER_BLOB, BYTES_PER_COMMITMENT, BYTES_PER_FIELD_ELEMENT,
    EVALUATION_CHALLENGE_SEPARATOR, FIAT_SHAMIR_PROTOCOL_DOMAIN, FIELD_ELEMENTS_PER_BLOB,
};
use crate::errors::KzgError;
use crate::polynomial::PolynomialEvalForm;
use crate::srs::KzgSettings;
use crate::traits::G1AffineExt;

/// Below this many points a plain fold beats the MSM setup cost.
const NAIVE_MSM_CUTOFF: usize = 8;

/// Deserializes a 32-byte little-endian scalar, rejecting any value at or
/// above the field modulus.
pub fn fr_from_bytes(bytes: &[u8]) -> Result<Fr, KzgError> {
    if bytes.len() != BYTES_PER_FIELD_ELEMENT {
        return Err(KzgError::BadArgs(format!(
            "scalar must be {} bytes, got {}",
            BYTES_PER_FIELD_ELEMENT,
            bytes.len()
        )));
    }
    Fr::deserialize_uncompressed(bytes)
        .map_err(|_| KzgError::BadArgs("scalar is not a canonical field element".to_string()))
}

/// Serializes a scalar to its canonical 32-byte little-endian form.
pub fn fr_to_bytes(value: &Fr) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut out = [0u8; BYTES_PER_FIELD_ELEMENT];
    let bytes = value.into_bigint().to_bytes_le();
    out[..bytes.len()].copy_from_slice(&bytes);
    out
}

/// Maps a byte message to a field element by reducing its SHA-256 digest
/// little-endian mod the field order.
pub fn hash_to_fr(msg: &[u8]) -> Fr {
    Fr::from_le_bytes_mod_order(&Sha256::digest(msg))
}

/// Computes `[1, x, x^2, ..., x^(count-1)]`.
pub fn compute_powers(base: &Fr, count: usize) -> Vec<Fr> {
    let mut powers = Vec::with_capacity(count);
    let mut current = Fr::one();
    for _ in 0..count {
        powers.push(current);
        current *= base;
    }
    powers
}

/// Combines vectors coefficient-wise: `out[i] = sum_j scalars[j] * vectors[j][i]`.
///
/// All vectors must be blob-length; an empty input yields the zero vector.
pub fn vector_lincomb(vectors: &[&[Fr]], scalars: &[Fr]) -> Result<Vec<Fr>, KzgError> {
    let mut out = vec![Fr::zero(); FIELD_ELEMENTS_PER_BLOB];
    if vectors.len() != scalars.len() {
        return Err(KzgError::BadArgs(
            "mismatched vector and scalar counts".to_string(),
        ));
    }
    for (vector, scalar) in vectors.iter().zip(scalars) {
        if vector.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::BadArgs(format!(
                "vector must have {} elements, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                vector.len()
            )));
        }
        for (acc, value) in out.iter_mut().zip(vector.iter()) {
            *acc += *scalar * value;
        }
    }
    Ok(out)
}

/// Multiplies a G1 point by a scalar.
///
/// The FFT butterflies multiply by one a lot, so the trivial scalars skip
/// the double-and-add entirely; everything else runs the backend multiply,
/// which is bounded by the scalar's actual bit length. Not constant time.
pub fn g1_mul(point: &G1Projective, scalar: &Fr) -> G1Projective {
    if scalar.is_zero() {
        G1Projective::zero()
    } else if scalar.is_one() {
        *point
    } else {
        point.mul_bigint(scalar.into_bigint())
    }
}

/// Computes `sum_i scalars[i] * points[i]`.
///
/// Uses Pippenger via the backend MSM for larger inputs; small inputs take a
/// plain fold.
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    if points.len() != scalars.len() {
        return Err(KzgError::BadArgs(format!(
            "mismatched lengths for linear combination: {} points, {} scalars",
            points.len(),
            scalars.len()
        )));
    }
    if points.len() <= NAIVE_MSM_CUTOFF {
        let mut acc = G1Projective::zero();
        for (point, scalar) in points.iter().zip(scalars) {
            acc += g1_mul(&point.into_group(), scalar);
        }
        return Ok(acc.into_affine());
    }
    let lincomb = G1Projective::msm(points, scalars)
        .map_err(|_| KzgError::Internal("MSM input length mismatch".to_string()))?;
    Ok(lincomb.into_affine())
}

/// Checks `e(a1, a2) == e(b1, b2)` with a single multi-pairing.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bls12_381::multi_pairing(p, q);
    result.is_zero()
}

/// Reverses the lower `bit_width` bits of `value`.
pub fn reverse_bits(value: u32, bit_width: u32) -> u32 {
    if bit_width == 0 {
        return 0;
    }
    value.reverse_bits() >> (u32::BITS - bit_width)
}

/// Reorders a slice in place so that element `i` lands at the bit-reversal
/// of `i`. The length must be a power of two no larger than 2^32.
pub fn reverse_bit_order<T>(values: &mut [T]) -> Result<(), KzgError> {
    let n = values.len();
    if !n.is_power_of_two() {
        return Err(KzgError::BadArgs(
            "length is not a power of two".to_string(),
        ));
    }
    if (n as u64) > (1u64 << 32) {
        return Err(KzgError::BadArgs("length exceeds 2^32".to_string()));
    }
    if n < 2 {
        return Ok(());
    }
    let order = n.trailing_zeros();
    for i in 0..n {
        let r = reverse_bits(i as u32, order) as usize;
        // Swap each pair once.
        if r > i {
            values.swap(i, r);
        }
    }
    Ok(())
}

/// Evaluates a polynomial given in evaluation form at an arbitrary point
/// using the barycentric formula
/// `p(z) = (z^n - 1) / n * sum_i p(D_i) * D_i / (z - D_i)`.
///
/// The domain is the bit-reversed roots of unity from the settings, so
/// `evaluations()[i]` is the value at `roots_of_unity[i]`. A `z` on the
/// domain short-circuits to the stored evaluation.
pub fn evaluate_polynomial_in_evaluation_form(
    polynomial: &PolynomialEvalForm,
    z: &Fr,
    settings: &KzgSettings,
) -> Result<Fr, KzgError> {
    let roots = settings.fft_settings().roots_of_unity();
    let width = polynomial.len();
    if width != roots.len() {
        return Err(KzgError::BadArgs(
            "inconsistent length between polynomial and evaluation domain".to_string(),
        ));
    }

    if let Some(index) = roots.iter().position(|root| root == z) {
        return Ok(polynomial.evaluations()[index]);
    }

    let inverse_width = Fr::from(width as u64)
        .inverse()
        .ok_or_else(|| KzgError::Internal("evaluation domain has zero width".to_string()))?;

    let mut sum = Fr::zero();
    for (value, root) in polynomial.evaluations().iter().zip(roots) {
        // z is off the domain here, so the denominator cannot vanish.
        sum += *value * root / (*z - root);
    }

    Ok(sum * (z.pow([width as u64]) - Fr::one()) * inverse_width)
}

/// Derives the aggregation challenge `r` and the evaluation challenge `z`
/// from the blobs and commitments being aggregated.
///
/// The transcript is `tag || degree_le64 || k_le64 || blobs || commitments`,
/// hashed with SHA-256. `r` is the digest reduced mod the field order; `z`
/// is the same reduction of the digest re-hashed with a separator byte. The
/// byte layout is consensus-critical and must not change.
pub fn compute_aggregate_challenges(
    blobs: &[Blob],
    commitments: &[G1Affine],
) -> Result<(Fr, Fr), KzgError> {
    if blobs.len() != commitments.len() {
        return Err(KzgError::BadArgs(
            "mismatched blob and commitment counts".to_string(),
        ));
    }
    let k = blobs.len();
    let input_size = FIAT_SHAMIR_PROTOCOL_DOMAIN.len()
        + 8
        + 8
        + k * BYTES_PER_BLOB
        + k * BYTES_PER_COMMITMENT;

    let mut transcript = Vec::with_capacity(input_size);
    transcript.extend_from_slice(FIAT_SHAMIR_PROTOCOL_DOMAIN);
    transcript.extend_from_slice(&(FIELD_ELEMENTS_PER_BLOB as u64).to_le_bytes());
    transcript.extend_from_slice(&(k as u64).to_le_bytes());
    for blob in blobs {
        transcript.extend_from_slice(blob.data());
    }
    for commitment in commitments {
        transcript.extend_from_slice(&commitment.to_compressed());
    }
    // Catch any drift between the layout above and the size bookkeeping.
    if transcript.len() != input_size {
        return Err(KzgError::Internal(
            "challenge transcript size mismatch".to_string(),
        ));
    }

    let digest = Sha256::digest(&transcript);
    let r = Fr::from_le_bytes_mod_order(&digest);

    let mut z_input = [0u8; 33];
    z_input[..32].copy_from_slice(&digest);
    z_input[32] = EVALUATION_CHALLENGE_SEPARATOR;
    let z = Fr::from_le_bytes_mod_order(&Sha256::digest(z_input));

    Ok((r, z))
}
