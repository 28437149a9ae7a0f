//! KZG polynomial commitments over BLS12-381 for EIP-4844 blobs.
//!
//! The main data pipeline goes:
//! > blob bytes -> [blob::Blob] -> [polynomial::PolynomialEvalForm] ->
//! > KZG commitment / proof
//!
//! - Blob: a fixed-size array of canonical scalar field elements, interpreted
//!   as the evaluations of a polynomial over the bit-reversed root-of-unity
//!   domain.
//! - [srs::KzgSettings]: the loaded trusted setup. The monomial powers of
//!   tau from the setup file are converted to the Lagrange basis with one
//!   inverse G1 FFT at load time, so committing to a blob afterwards is a
//!   single multi-scalar multiplication.
//! - Proofs are single G1 points; [kzg::verify_kzg_proof] checks the pairing
//!   identity `e(proof, [tau]G2 - [z]G2) == e(commitment - [y]G1, G2)`.
//!
//! Aggregate proofs fold any number of blobs into one proof using
//! Fiat-Shamir challenges derived from the blobs and commitments
//! ([kzg::compute_aggregate_kzg_proof] / [kzg::verify_aggregate_kzg_proof]).
//!
//! All operations are pure functions of their inputs and an immutable
//! [srs::KzgSettings]; a loaded setup can be shared freely across threads.
//!
//! # Example
//!
//! ```no_run
//! use rust_kzg_bls12381::{blob::Blob, consts::BYTES_PER_BLOB, kzg, srs};
//!
//! let settings = srs::load_trusted_setup("trusted_setup.txt").unwrap();
//! let blob = Blob::new(&vec![0u8; BYTES_PER_BLOB]).unwrap();
//! let commitment = kzg::blob_to_kzg_commitment(&blob, &settings).unwrap();
//! let proof = kzg::compute_aggregate_kzg_proof(&[blob.clone()], &settings).unwrap();
//! assert!(kzg::verify_aggregate_kzg_proof(&[blob], &[commitment], &proof, &settings).unwrap());
//! ```

pub mod blob;
pub mod consts;
pub mod errors;
pub mod fft;
pub mod helpers;
pub mod kzg;
pub mod polynomial;
pub mod srs;
pub mod traits;
