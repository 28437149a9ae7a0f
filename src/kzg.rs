//! Commitment, proof and verification routines.
//!
//! Everything here is a pure function of its inputs and an immutable
//! [`KzgSettings`]; concurrent calls on a shared setup are safe.

use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::Zero;

use crate::blob::Blob;
use crate::consts::{BYTES_PER_COMMITMENT, BYTES_PER_FIELD_ELEMENT, BYTES_PER_PROOF};
use crate::errors::KzgError;
use crate::helpers;
use crate::polynomial::PolynomialEvalForm;
use crate::srs::KzgSettings;
use crate::traits::G1AffineExt;

/// Commits to a blob, returning the compressed commitment.
pub fn blob_to_kzg_commitment(
    blob: &Blob,
    settings: &KzgSettings,
) -> Result<[u8; BYTES_PER_COMMITMENT], KzgError> {
    Ok(commit_blob(blob, settings)?.to_compressed())
}

/// Commits to a blob as a curve point.
pub fn commit_blob(blob: &Blob, settings: &KzgSettings) -> Result<G1Affine, KzgError> {
    let polynomial = blob.to_polynomial()?;
    commit_eval_form(&polynomial, settings)
}

/// Commits to a polynomial in evaluation form. Since the setup holds the
/// Lagrange basis over the same domain, this is a single MSM.
pub fn commit_eval_form(
    polynomial: &PolynomialEvalForm,
    settings: &KzgSettings,
) -> Result<G1Affine, KzgError> {
    if polynomial.len() != settings.length() {
        return Err(KzgError::BadArgs(format!(
            "polynomial has {} evaluations, setup supports {}",
            polynomial.len(),
            settings.length()
        )));
    }
    helpers::g1_lincomb(settings.g1_values(), polynomial.evaluations())
}

/// Computes a proof that the blob's polynomial evaluates to `p(z)` at the
/// given point. `z` is a 32-byte little-endian scalar.
pub fn compute_kzg_proof(
    blob: &Blob,
    z_bytes: &[u8; BYTES_PER_FIELD_ELEMENT],
    settings: &KzgSettings,
) -> Result<[u8; BYTES_PER_PROOF], KzgError> {
    let polynomial = blob.to_polynomial()?;
    let z = helpers::fr_from_bytes(z_bytes)?;
    Ok(compute_proof_impl(&polynomial, &z, settings)?.to_compressed())
}

/// Computes the quotient polynomial `q(x) = (p(x) - p(z)) / (x - z)` on the
/// evaluation domain and commits to it.
fn compute_proof_impl(
    polynomial: &PolynomialEvalForm,
    z: &Fr,
    settings: &KzgSettings,
) -> Result<G1Affine, KzgError> {
    let roots = settings.fft_settings().roots_of_unity();
    if polynomial.len() != roots.len() {
        return Err(KzgError::BadArgs(
            "inconsistent length between polynomial and evaluation domain".to_string(),
        ));
    }

    let y = helpers::evaluate_polynomial_in_evaluation_form(polynomial, z, settings)?;
    let eval_fr = polynomial.evaluations();

    let mut poly_shift: Vec<Fr> = Vec::with_capacity(eval_fr.len());
    for value in eval_fr {
        poly_shift.push(*value - y);
    }

    let mut denom_poly: Vec<Fr> = Vec::with_capacity(roots.len());
    for root in roots {
        denom_poly.push(*root - z);
    }

    let mut quotient_poly: Vec<Fr> = Vec::with_capacity(roots.len());
    for i in 0..roots.len() {
        if denom_poly[i].is_zero() {
            // z hit the domain point at this row; the quotient there is the
            // sum over the remaining rows instead of a division.
            quotient_poly.push(compute_quotient_eval_on_domain(z, eval_fr, &y, roots));
        } else {
            quotient_poly.push(poly_shift[i] / denom_poly[i]);
        }
    }

    helpers::g1_lincomb(settings.g1_values(), &quotient_poly)
}

/// Quotient evaluation at the domain point `z = D_m` itself:
/// `q(D_m) = sum_{i != m} (p(D_i) - y) * D_i / (D_m * (D_m - D_i))`.
fn compute_quotient_eval_on_domain(z: &Fr, eval_fr: &[Fr], value: &Fr, roots: &[Fr]) -> Fr {
    let mut quotient = Fr::zero();
    for (i, root) in roots.iter().enumerate() {
        if root == z {
            continue;
        }
        let numerator = (eval_fr[i] - value) * root;
        let denominator = (*z - root) * z;
        quotient += numerator / denominator;
    }
    quotient
}

/// Verifies a proof that the committed polynomial evaluates to `y` at `z`,
/// by checking `e(proof, [tau]G2 - [z]G2) == e(commitment - [y]G1, G2)`.
///
/// Returns `Err(BadArgs)` when an input fails to decode and `Ok(false)` when
/// the inputs decode but the pairing check fails.
pub fn verify_kzg_proof(
    commitment_bytes: &[u8; BYTES_PER_COMMITMENT],
    z_bytes: &[u8; BYTES_PER_FIELD_ELEMENT],
    y_bytes: &[u8; BYTES_PER_FIELD_ELEMENT],
    proof_bytes: &[u8; BYTES_PER_PROOF],
    settings: &KzgSettings,
) -> Result<bool, KzgError> {
    let commitment = G1Affine::from_compressed(commitment_bytes)?;
    let proof = G1Affine::from_compressed(proof_bytes)?;
    let z = helpers::fr_from_bytes(z_bytes)?;
    let y = helpers::fr_from_bytes(y_bytes)?;
    Ok(verify_proof_impl(&commitment, &z, &y, &proof, settings))
}

fn verify_proof_impl(
    commitment: &G1Affine,
    z: &Fr,
    y: &Fr,
    proof: &G1Affine,
    settings: &KzgSettings,
) -> bool {
    let g2_generator = settings.g2_values()[0];
    let tau_g2 = settings.g2_values()[1];

    // [tau]G2 - [z]G2
    let x_minus_z = (G2Projective::from(tau_g2) - g2_generator * *z).into_affine();
    // commitment - [y]G1
    let p_minus_y = (G1Projective::from(*commitment) - G1Affine::generator() * *y).into_affine();

    helpers::pairings_verify(p_minus_y, g2_generator, *proof, x_minus_z)
}

/// Computes a single proof covering all blobs: commitments and blobs are
/// folded with powers of the Fiat-Shamir challenge `r`, and the aggregated
/// polynomial is proven at the derived evaluation point `z`.
pub fn compute_aggregate_kzg_proof(
    blobs: &[Blob],
    settings: &KzgSettings,
) -> Result<[u8; BYTES_PER_PROOF], KzgError> {
    let mut polynomials = Vec::with_capacity(blobs.len());
    let mut commitments = Vec::with_capacity(blobs.len());
    for blob in blobs {
        let polynomial = blob.to_polynomial()?;
        commitments.push(commit_eval_form(&polynomial, settings)?);
        polynomials.push(polynomial);
    }

    let (r, z) = helpers::compute_aggregate_challenges(blobs, &commitments)?;
    let r_powers = helpers::compute_powers(&r, blobs.len());

    let aggregated_poly = aggregate_polynomials(&polynomials, &r_powers)?;
    Ok(compute_proof_impl(&aggregated_poly, &z, settings)?.to_compressed())
}

/// Verifies an aggregate proof against the blobs and their claimed
/// commitments by recomputing the challenges and folding both sides.
pub fn verify_aggregate_kzg_proof(
    blobs: &[Blob],
    commitment_bytes: &[[u8; BYTES_PER_COMMITMENT]],
    proof_bytes: &[u8; BYTES_PER_PROOF],
    settings: &KzgSettings,
) -> Result<bool, KzgError> {
    if blobs.len() != commitment_bytes.len() {
        return Err(KzgError::BadArgs(
            "mismatched blob and commitment counts".to_string(),
        ));
    }
    let commitments = commitment_bytes
        .iter()
        .map(|bytes| G1Affine::from_compressed(bytes))
        .collect::<Result<Vec<_>, _>>()?;
    let proof = G1Affine::from_compressed(proof_bytes)?;

    let (r, z) = helpers::compute_aggregate_challenges(blobs, &commitments)?;
    let r_powers = helpers::compute_powers(&r, blobs.len());

    let polynomials = blobs
        .iter()
        .map(|blob| blob.to_polynomial())
        .collect::<Result<Vec<_>, _>>()?;
    let aggregated_poly = aggregate_polynomials(&polynomials, &r_powers)?;
    let y = helpers::evaluate_polynomial_in_evaluation_form(&aggregated_poly, &z, settings)?;

    let aggregated_commitment = helpers::g1_lincomb(&commitments, &r_powers)?;

    Ok(verify_proof_impl(
        &aggregated_commitment,
        &z,
        &y,
        &proof,
        settings,
    ))
}

fn aggregate_polynomials(
    polynomials: &[PolynomialEvalForm],
    r_powers: &[Fr],
) -> Result<PolynomialEvalForm, KzgError> {
    let views: Vec<&[Fr]> = polynomials
        .iter()
        .map(|polynomial| polynomial.evaluations())
        .collect();
    PolynomialEvalForm::new(helpers::vector_lincomb(&views, r_powers)?)
}
