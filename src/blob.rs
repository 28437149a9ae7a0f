use serde::{Deserialize, Serialize};

use crate::consts::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT};
use crate::errors::KzgError;
use crate::helpers;
use crate::polynomial::PolynomialEvalForm;

/// A blob: exactly [`BYTES_PER_BLOB`] bytes holding
/// [`crate::consts::FIELD_ELEMENTS_PER_BLOB`] canonical little-endian field
/// elements. These are the evaluations of the committed polynomial over the
/// bit-reversed root-of-unity domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    /// Creates a blob from its wire bytes, validating the length and that
    /// every 32-byte chunk is a canonical field element.
    pub fn new(data: &[u8]) -> Result<Self, KzgError> {
        if data.len() != BYTES_PER_BLOB {
            return Err(KzgError::BadArgs(format!(
                "blob must be {} bytes, got {}",
                BYTES_PER_BLOB,
                data.len()
            )));
        }
        for (i, chunk) in data.chunks_exact(BYTES_PER_FIELD_ELEMENT).enumerate() {
            helpers::fr_from_bytes(chunk).map_err(|_| {
                KzgError::BadArgs(format!("field element {} is not canonical", i))
            })?;
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// The wire bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decodes the blob into its polynomial evaluation form.
    pub fn to_polynomial(&self) -> Result<PolynomialEvalForm, KzgError> {
        let evaluations = self
            .data
            .chunks_exact(BYTES_PER_FIELD_ELEMENT)
            .map(helpers::fr_from_bytes)
            .collect::<Result<Vec<_>, _>>()?;
        PolynomialEvalForm::new(evaluations)
    }
}
