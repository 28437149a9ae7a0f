//! Radix-2 FFT over G1 and the precomputed root-of-unity tables it runs on.
//!
//! The trusted-setup loader uses the inverse transform once to turn
//! monomial-basis powers of tau into the Lagrange basis; the same settings
//! supply the evaluation domain for every proof.

use ark_bls12_381::{Fr, G1Projective};
use ark_ff::{BigInt, Field, PrimeField};
use ark_std::{One, Zero};

use crate::consts::SCALE2_ROOT_OF_UNITY;
use crate::errors::KzgError;
use crate::helpers;

/// Precomputed roots of unity for FFTs up to `2^max_scale` elements.
///
/// The same settings serve every power-of-two transform size up to
/// `max_width`: smaller sizes stride through the tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FftSettings {
    max_width: usize,
    /// `w^0, w^1, ..., w^max_width`; first and last entries are one.
    expanded_roots_of_unity: Vec<Fr>,
    /// The expanded roots in reverse order, i.e. the inverse roots.
    reverse_roots_of_unity: Vec<Fr>,
    /// The first `max_width` expanded roots in bit-reversed index order.
    /// This is the evaluation domain blobs are defined over.
    roots_of_unity: Vec<Fr>,
}

impl FftSettings {
    pub fn new(max_scale: usize) -> Result<Self, KzgError> {
        if max_scale >= SCALE2_ROOT_OF_UNITY.len() {
            return Err(KzgError::BadArgs(format!(
                "max scale {} exceeds the root-of-unity table ({} entries)",
                max_scale,
                SCALE2_ROOT_OF_UNITY.len()
            )));
        }
        let max_width = 1usize << max_scale;
        let root_of_unity = Fr::from_bigint(BigInt::new(SCALE2_ROOT_OF_UNITY[max_scale]))
            .ok_or_else(|| {
                KzgError::Internal("root-of-unity limbs exceed the field modulus".to_string())
            })?;

        let expanded_roots_of_unity = expand_root_of_unity(&root_of_unity, max_width)?;

        let mut reverse_roots_of_unity = expanded_roots_of_unity.clone();
        reverse_roots_of_unity.reverse();

        let mut roots_of_unity = expanded_roots_of_unity[..max_width].to_vec();
        helpers::reverse_bit_order(&mut roots_of_unity)?;

        Ok(Self {
            max_width,
            expanded_roots_of_unity,
            reverse_roots_of_unity,
            roots_of_unity,
        })
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn expanded_roots_of_unity(&self) -> &[Fr] {
        &self.expanded_roots_of_unity
    }

    pub fn reverse_roots_of_unity(&self) -> &[Fr] {
        &self.reverse_roots_of_unity
    }

    pub fn roots_of_unity(&self) -> &[Fr] {
        &self.roots_of_unity
    }

    /// Forward or inverse FFT over G1. The input length must be a power of
    /// two no larger than `max_width`; the inverse path scales every output
    /// by `n^-1`.
    pub fn fft_g1(
        &self,
        input: &[G1Projective],
        inverse: bool,
    ) -> Result<Vec<G1Projective>, KzgError> {
        let n = input.len();
        if n == 0 || !n.is_power_of_two() {
            return Err(KzgError::BadArgs(
                "FFT size must be a power of two".to_string(),
            ));
        }
        if n > self.max_width {
            return Err(KzgError::BadArgs(format!(
                "FFT size {} exceeds the settings width {}",
                n, self.max_width
            )));
        }

        let roots_stride = self.max_width / n;
        let mut output = vec![G1Projective::zero(); n];
        if inverse {
            fft_g1_fast(
                &mut output,
                input,
                1,
                &self.reverse_roots_of_unity,
                roots_stride,
            );
            let inverse_length = Fr::from(n as u64)
                .inverse()
                .ok_or_else(|| KzgError::Internal("FFT size has no inverse".to_string()))?;
            for value in output.iter_mut() {
                *value = helpers::g1_mul(value, &inverse_length);
            }
        } else {
            fft_g1_fast(
                &mut output,
                input,
                1,
                &self.expanded_roots_of_unity,
                roots_stride,
            );
        }
        Ok(output)
    }
}

/// Fills `[1, root, root^2, ...]` until the sequence cycles back to one,
/// which must happen exactly at index `width`.
fn expand_root_of_unity(root: &Fr, width: usize) -> Result<Vec<Fr>, KzgError> {
    let mut roots = Vec::with_capacity(width + 1);
    roots.push(Fr::one());
    roots.push(*root);

    while !roots[roots.len() - 1].is_one() {
        if roots.len() > width {
            return Err(KzgError::Internal(
                "root of unity cycle did not close at the expected width".to_string(),
            ));
        }
        let next = roots[roots.len() - 1] * root;
        roots.push(next);
    }
    if roots.len() != width + 1 {
        return Err(KzgError::Internal(
            "root of unity cycle closed early".to_string(),
        ));
    }
    Ok(roots)
}

/// Recursive decimation butterfly. `output` and the strided view into
/// `input` have the same logical length; each level halves the size and
/// doubles both strides.
fn fft_g1_fast(
    output: &mut [G1Projective],
    input: &[G1Projective],
    stride: usize,
    roots: &[Fr],
    roots_stride: usize,
) {
    let half = output.len() / 2;
    if half > 0 {
        let (even, odd) = output.split_at_mut(half);
        fft_g1_fast(even, input, stride * 2, roots, roots_stride * 2);
        fft_g1_fast(odd, &input[stride..], stride * 2, roots, roots_stride * 2);
        for i in 0..half {
            let y_times_root = helpers::g1_mul(&odd[i], &roots[i * roots_stride]);
            odd[i] = even[i] - y_times_root;
            even[i] += y_times_root;
        }
    } else {
        output[0] = input[0];
    }
}
