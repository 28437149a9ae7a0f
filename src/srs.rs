use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use ark_bls12_381::{G1Affine, G1Projective, G2Affine};
use ark_ec::CurveGroup;
use rayon::prelude::*;

use crate::consts::{BYTES_PER_G1_POINT, BYTES_PER_G2_POINT, FIELD_ELEMENTS_PER_BLOB};
use crate::errors::KzgError;
use crate::fft::FftSettings;
use crate::helpers;
use crate::traits::{G1AffineExt, G2AffineExt};

/// The loaded trusted setup. Immutable once constructed; every commitment,
/// proof and verification borrows it read-only, so a single instance can be
/// shared across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KzgSettings {
    /// Lagrange-basis powers of tau in bit-reversed domain order:
    /// `g1_values[i]` is `L_i(tau) * G` for the domain point
    /// `roots_of_unity[i]`. Committing to a blob is one MSM against these.
    g1_values: Vec<G1Affine>,
    /// `[G2, tau * G2, ...]`; only the first two entries are used.
    g2_values: Vec<G2Affine>,
    fft_settings: FftSettings,
}

impl KzgSettings {
    /// Number of G1 points, equal to the blob length.
    pub fn length(&self) -> usize {
        self.g1_values.len()
    }

    pub fn g1_values(&self) -> &[G1Affine] {
        &self.g1_values
    }

    pub fn g2_values(&self) -> &[G2Affine] {
        &self.g2_values
    }

    pub fn fft_settings(&self) -> &FftSettings {
        &self.fft_settings
    }
}

/// Loads a trusted setup from the text format: two decimal counts `n1` and
/// `n2`, then `n1` compressed G1 points and `n2` compressed G2 points as
/// hex, with arbitrary whitespace between bytes.
pub fn load_trusted_setup(path: impl AsRef<Path>) -> Result<KzgSettings, KzgError> {
    let contents = fs::read_to_string(path).map_err(|e| KzgError::Io(e.to_string()))?;
    load_trusted_setup_from_text(&contents)
}

/// Parses the text trusted-setup format. See [`load_trusted_setup`].
pub fn load_trusted_setup_from_text(contents: &str) -> Result<KzgSettings, KzgError> {
    let mut tokens = contents.split_whitespace();
    let n1: usize = tokens
        .next()
        .ok_or_else(|| KzgError::BadArgs("missing G1 point count".to_string()))?
        .parse()
        .map_err(|_| KzgError::BadArgs("invalid G1 point count".to_string()))?;
    let n2: usize = tokens
        .next()
        .ok_or_else(|| KzgError::BadArgs("missing G2 point count".to_string()))?
        .parse()
        .map_err(|_| KzgError::BadArgs("invalid G2 point count".to_string()))?;

    let hex_stream: String = tokens.collect();
    let bytes = hex::decode(&hex_stream)
        .map_err(|_| KzgError::BadArgs("setup contains non-hex point data".to_string()))?;

    let g1_size = n1
        .checked_mul(BYTES_PER_G1_POINT)
        .ok_or_else(|| KzgError::BadArgs("G1 point count overflows".to_string()))?;
    let g2_size = n2
        .checked_mul(BYTES_PER_G2_POINT)
        .ok_or_else(|| KzgError::BadArgs("G2 point count overflows".to_string()))?;
    if bytes.len() != g1_size + g2_size {
        return Err(KzgError::BadArgs(format!(
            "setup holds {} point bytes, expected {}",
            bytes.len(),
            g1_size + g2_size
        )));
    }

    load_trusted_setup_from_bytes(&bytes[..g1_size], &bytes[g1_size..])
}

/// Builds the settings from concatenated compressed points: `g1_bytes` must
/// hold exactly [`FIELD_ELEMENTS_PER_BLOB`] monomial-basis G1 powers of tau
/// and `g2_bytes` at least two G2 points.
///
/// The G1 powers are decompressed, run through an inverse FFT to obtain the
/// Lagrange basis, and bit-reversal permuted to match the evaluation domain.
pub fn load_trusted_setup_from_bytes(
    g1_bytes: &[u8],
    g2_bytes: &[u8],
) -> Result<KzgSettings, KzgError> {
    if g1_bytes.len() % BYTES_PER_G1_POINT != 0 || g2_bytes.len() % BYTES_PER_G2_POINT != 0 {
        return Err(KzgError::BadArgs(
            "setup bytes are not a whole number of points".to_string(),
        ));
    }
    let n1 = g1_bytes.len() / BYTES_PER_G1_POINT;
    let n2 = g2_bytes.len() / BYTES_PER_G2_POINT;
    if n1 != FIELD_ELEMENTS_PER_BLOB {
        return Err(KzgError::BadArgs(format!(
            "setup holds {} G1 points, expected {}",
            n1, FIELD_ELEMENTS_PER_BLOB
        )));
    }
    if n2 < 2 {
        return Err(KzgError::BadArgs(format!(
            "setup holds {} G2 points, need at least 2",
            n2
        )));
    }

    let monomial_g1: Vec<G1Projective> = g1_bytes
        .par_chunks(BYTES_PER_G1_POINT)
        .map(|chunk| G1Affine::from_compressed(chunk).map(G1Projective::from))
        .collect::<Result<_, _>>()?;

    let g2_values: Vec<G2Affine> = g2_bytes
        .par_chunks(BYTES_PER_G2_POINT)
        .map(G2Affine::from_compressed)
        .collect::<Result<_, _>>()?;

    let max_scale = n1.next_power_of_two().trailing_zeros() as usize;
    let fft_settings = FftSettings::new(max_scale)?;

    let lagrange = fft_settings.fft_g1(&monomial_g1, true)?;
    let mut g1_values: Vec<G1Affine> = lagrange.par_iter().map(|point| point.into_affine()).collect();
    helpers::reverse_bit_order(&mut g1_values)?;

    Ok(KzgSettings {
        g1_values,
        g2_values,
        fft_settings,
    })
}

// Optional process-wide settings slot for callers that want one setup per
// process. The core never touches it; all operations take an explicit
// `&KzgSettings`.
static SHARED_SETTINGS: Mutex<Option<Arc<KzgSettings>>> = Mutex::new(None);

/// Loads a trusted setup into the process-wide slot, replacing any previous
/// one.
pub fn load_trusted_setup_shared(path: impl AsRef<Path>) -> Result<(), KzgError> {
    let settings = load_trusted_setup(path)?;
    let mut slot = SHARED_SETTINGS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(settings));
    Ok(())
}

/// The current process-wide settings, if loaded.
pub fn shared_settings() -> Option<Arc<KzgSettings>> {
    SHARED_SETTINGS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Clears the process-wide slot. Outstanding references stay valid until
/// dropped.
pub fn free_trusted_setup_shared() {
    SHARED_SETTINGS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}
