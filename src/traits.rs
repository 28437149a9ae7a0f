use ark_bls12_381::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInt, BigInteger, Field, PrimeField};
use ark_std::Zero;

use crate::consts::{BYTES_PER_G1_POINT, BYTES_PER_G2_POINT};
use crate::errors::KzgError;

// Wire flag bits, carried in the top three bits of the first byte of a
// compressed point (big-endian zcash/eth convention).
const COMPRESSION_FLAG: u8 = 0x80;
const INFINITY_FLAG: u8 = 0x40;
const SIGN_FLAG: u8 = 0x20;
const FLAG_MASK: u8 = COMPRESSION_FLAG | INFINITY_FLAG | SIGN_FLAG;

/// 48-byte big-endian compressed encoding of G1 points, the format
/// commitments and proofs use on the wire.
pub trait G1AffineExt: Sized {
    /// Decompresses a point, validating the encoding is canonical, the point
    /// is on the curve and it lies in the prime-order subgroup.
    fn from_compressed(bytes: &[u8]) -> Result<Self, KzgError>;

    fn to_compressed(&self) -> [u8; BYTES_PER_G1_POINT];
}

/// 96-byte big-endian compressed encoding of G2 points, used by the trusted
/// setup.
pub trait G2AffineExt: Sized {
    fn from_compressed(bytes: &[u8]) -> Result<Self, KzgError>;

    fn to_compressed(&self) -> [u8; BYTES_PER_G2_POINT];
}

fn check_flags(bytes: &[u8], expected_len: usize, group: &str) -> Result<bool, KzgError> {
    if bytes.len() != expected_len {
        return Err(KzgError::BadArgs(format!(
            "{} point must be {} bytes, got {}",
            group,
            expected_len,
            bytes.len()
        )));
    }
    if bytes[0] & COMPRESSION_FLAG == 0 {
        return Err(KzgError::BadArgs(format!(
            "{} point is not in compressed form",
            group
        )));
    }
    let infinity = bytes[0] & INFINITY_FLAG != 0;
    if infinity {
        // The identity is the flag byte 0xc0 followed by zeros, nothing else.
        let tail_is_zero = bytes[0] & !FLAG_MASK == 0 && bytes[1..].iter().all(|b| *b == 0);
        if bytes[0] & SIGN_FLAG != 0 || !tail_is_zero {
            return Err(KzgError::BadArgs(format!(
                "malformed {} point at infinity",
                group
            )));
        }
    }
    Ok(infinity)
}

/// Strict big-endian base-field parse; rejects values at or above the
/// modulus.
fn fq_from_be_bytes(bytes: &[u8]) -> Option<Fq> {
    let mut limbs = [0u64; 6];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
        *limb = u64::from_be_bytes(chunk.try_into().ok()?);
    }
    Fq::from_bigint(BigInt::new(limbs))
}

/// An element is lexicographically largest when it exceeds its own negation,
/// i.e. it lies above (p - 1) / 2.
fn lexicographically_largest(y: &Fq) -> bool {
    *y > -*y
}

/// The Fq2 ordering compares the c1 coordinate first, matching the wire
/// format's coordinate order.
fn fq2_lexicographically_largest(y: &Fq2) -> bool {
    if y.c1.is_zero() {
        lexicographically_largest(&y.c0)
    } else {
        lexicographically_largest(&y.c1)
    }
}

impl G1AffineExt for G1Affine {
    fn from_compressed(bytes: &[u8]) -> Result<Self, KzgError> {
        if check_flags(bytes, BYTES_PER_G1_POINT, "G1")? {
            return Ok(G1Affine::identity());
        }
        let greatest = bytes[0] & SIGN_FLAG != 0;

        let mut x_bytes = [0u8; BYTES_PER_G1_POINT];
        x_bytes.copy_from_slice(bytes);
        x_bytes[0] &= !FLAG_MASK;
        let x = fq_from_be_bytes(&x_bytes)
            .ok_or_else(|| KzgError::BadArgs("G1 x coordinate is not canonical".to_string()))?;

        // Reconstruct y from the curve equation y^2 = x^3 + 4 and pick the
        // root the sign flag names.
        let y_squared = x * x * x + Fq::from(4u64);
        let mut y = y_squared
            .sqrt()
            .ok_or_else(|| KzgError::BadArgs("G1 point is not on the curve".to_string()))?;
        if lexicographically_largest(&y) != greatest {
            y = -y;
        }

        let point = G1Affine::new_unchecked(x, y);
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(KzgError::BadArgs(
                "G1 point is not in the prime-order subgroup".to_string(),
            ));
        }
        Ok(point)
    }

    fn to_compressed(&self) -> [u8; BYTES_PER_G1_POINT] {
        let mut out = [0u8; BYTES_PER_G1_POINT];
        if self.is_zero() {
            out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
            return out;
        }
        out.copy_from_slice(&self.x.into_bigint().to_bytes_be());
        out[0] |= COMPRESSION_FLAG;
        if lexicographically_largest(&self.y) {
            out[0] |= SIGN_FLAG;
        }
        out
    }
}

impl G2AffineExt for G2Affine {
    fn from_compressed(bytes: &[u8]) -> Result<Self, KzgError> {
        if check_flags(bytes, BYTES_PER_G2_POINT, "G2")? {
            return Ok(G2Affine::identity());
        }
        let greatest = bytes[0] & SIGN_FLAG != 0;

        // The wire format is x_c1 then x_c0, each big-endian.
        let mut c1_bytes = [0u8; BYTES_PER_G1_POINT];
        c1_bytes.copy_from_slice(&bytes[..BYTES_PER_G1_POINT]);
        c1_bytes[0] &= !FLAG_MASK;
        let x_c1 = fq_from_be_bytes(&c1_bytes)
            .ok_or_else(|| KzgError::BadArgs("G2 x coordinate is not canonical".to_string()))?;
        let x_c0 = fq_from_be_bytes(&bytes[BYTES_PER_G1_POINT..])
            .ok_or_else(|| KzgError::BadArgs("G2 x coordinate is not canonical".to_string()))?;
        let x = Fq2::new(x_c0, x_c1);

        // y^2 = x^3 + 4(1 + u) on the twist.
        let twist_b = Fq2::new(Fq::from(4u64), Fq::from(4u64));
        let y_squared = x * x * x + twist_b;
        let mut y = y_squared
            .sqrt()
            .ok_or_else(|| KzgError::BadArgs("G2 point is not on the curve".to_string()))?;
        if fq2_lexicographically_largest(&y) != greatest {
            y = -y;
        }

        let point = G2Affine::new_unchecked(x, y);
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(KzgError::BadArgs(
                "G2 point is not in the prime-order subgroup".to_string(),
            ));
        }
        Ok(point)
    }

    fn to_compressed(&self) -> [u8; BYTES_PER_G2_POINT] {
        let mut out = [0u8; BYTES_PER_G2_POINT];
        if self.is_zero() {
            out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
            return out;
        }
        out[..BYTES_PER_G1_POINT].copy_from_slice(&self.x.c1.into_bigint().to_bytes_be());
        out[BYTES_PER_G1_POINT..].copy_from_slice(&self.x.c0.into_bigint().to_bytes_be());
        out[0] |= COMPRESSION_FLAG;
        if fq2_lexicographically_largest(&self.y) {
            out[0] |= SIGN_FLAG;
        }
        out
    }
}
