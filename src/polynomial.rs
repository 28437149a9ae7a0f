use ark_bls12_381::Fr;

use crate::consts::FIELD_ELEMENTS_PER_BLOB;
use crate::errors::KzgError;

/// A polynomial in evaluation form over the bit-reversed root-of-unity
/// domain: `evaluations[i]` is the value at `roots_of_unity[i]`. Always
/// blob-length; aggregated polynomials use the same representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialEvalForm {
    evaluations: Vec<Fr>,
}

impl PolynomialEvalForm {
    pub fn new(evaluations: Vec<Fr>) -> Result<Self, KzgError> {
        if evaluations.len() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::BadArgs(format!(
                "polynomial must have {} evaluations, got {}",
                FIELD_ELEMENTS_PER_BLOB,
                evaluations.len()
            )));
        }
        Ok(Self { evaluations })
    }

    pub fn evaluations(&self) -> &[Fr] {
        &self.evaluations
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    pub fn get_evaluation(&self, i: usize) -> Option<&Fr> {
        self.evaluations.get(i)
    }
}
