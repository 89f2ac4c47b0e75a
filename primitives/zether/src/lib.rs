//! # zether-primitives
//!
//! Shared building blocks for anonymous confidential-balance proofs over
//! alt_bn128 (BN254 G1):
//!
//! - [`bn128`]: scalars, points, fixed-width encodings, `hash_to_curve`
//! - [`elgamal`]: ciphertext pairs `(C, D)` and bounded decryption
//! - [`algebra`]: field vectors, polynomials, generator vectors
//! - [`generators`]: Pedersen parameters and the per-epoch generator
//! - [`transcript`]: ABI-encoded Fiat-Shamir transcript
//! - [`anonymity`]: helpers for the one-of-many ring argument
//! - [`keys`]: key pairs and account identifiers
//! - [`proofs`]: proof structures and their byte layouts
//! - [`statement`]: public inputs and the transcript prefix they seed
//!
//! Prover and verifier both depend on this crate so the generator choice,
//! challenge order and byte layout are defined in exactly one place.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod algebra;
pub mod anonymity;
pub mod bn128;
pub mod elgamal;
pub mod generators;
pub mod keys;
pub mod proofs;
pub mod statement;
pub mod transcript;


pub use algebra::{FieldVector, GeneratorVector, Polynomial};
pub use bn128::{Point, Scalar};
pub use elgamal::Ciphertext;
pub use generators::{GeneratorParams, epoch_generator, epoch_tag};
pub use keys::{KeyPair, RegistrationSignature, public_key_hash};
pub use proofs::{InnerProductProof, RedeemProof, TransferProof};
pub use statement::{RedeemStatement, TransferStatement};
pub use transcript::Transcript;

use thiserror::Error;

/// Errors raised while decoding bytes into protocol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("wrong length: expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
    #[error("input is not a whole number of points")]
    Truncated,
    #[error("scalar is not reduced below the group order")]
    NonCanonicalScalar,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("bad compressed point encoding")]
    BadEncoding,
    #[error("no plaintext in range matches the ciphertext")]
    DiscreteLogNotFound,
    #[error("proof layout: {0}")]
    Layout(&'static str),
}

/// Protocol constants and domain labels.
pub mod constants {
    /// Bits per range-proved amount.
    pub const BITS_PER_AMOUNT: usize = 32;
    /// Largest amount a ciphertext may carry.
    pub const MAX_PLAIN: u64 = (1u64 << BITS_PER_AMOUNT) - 1;
    /// Range-proof vector length for redeem (one amount).
    pub const REDEEM_BITS: usize = BITS_PER_AMOUNT;
    /// Range-proof vector length for transfer (two packed amounts).
    pub const TRANSFER_BITS: usize = 2 * BITS_PER_AMOUNT;
    /// Largest `m = log2(N)` whose ring commitments fit in the transfer
    /// generators (`4m + 2 <= 64`).
    pub const MAX_ANONYMITY_DEPTH: usize = (TRANSFER_BITS - 2) / 4;

    /// Seed for the blinding generator `H`.
    pub const LABEL_H: &[u8] = b"V";
    /// Prefix for the left vector generators `G_i`.
    pub const LABEL_GS: &[u8] = b"G";
    /// Prefix for the right vector generators `H_i`.
    pub const LABEL_HS: &[u8] = b"H";
    /// Prefix for the per-epoch generator.
    pub const LABEL_EPOCH: &[u8] = b"Zether";
    /// Suffix appended to a user secret before hashing it into a key.
    pub const LABEL_SECRET: &[u8] = b"ETH";
}
