//! # zether-prover: Anonymous Zether proof generation
//!
//! Client-side proofs for confidential balances held as ElGamal ciphertexts
//! on alt_bn128:
//!
//! - [`prove_redeem`]: the balance left after a withdrawal is a 32-bit value
//!   and the caller owns the account key
//! - [`prove_transfer`]: a transfer inside an anonymity ring keeps the
//!   sender's balance non-negative and hides which members are sender and
//!   receiver
//! - [`sign_registration`]: proof of key ownership for account registration
//!
//! The byte-level calls take and return the fixed-width encodings the ledger
//! uses (64-byte points, 32-byte scalars). Typed entry points live in
//! [`redeem`], [`transfer`] and [`registration`] for callers that already
//! hold curve values.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zether_prover::{prove_redeem, RedeemInput};
//!
//! let input = RedeemInput {
//!     cln, crn,          // balance after the redeem (64-byte points)
//!     y,                 // account public key
//!     epoch: 42,
//!     sender: [0u8; 20], // address receiving the plain tokens
//!     sk,                // 32-byte secret key
//!     b_diff: 70,        // balance left
//!     rng_seed: None,    // thread CSPRNG
//! };
//! let out = prove_redeem(&input)?;
//! // submit out.proof and out.epoch_tag
//! ```
//!
//! ## Security Notes
//!
//! - Blinding scalars use 512 bits of CSPRNG output reduced into the field
//! - A fixed `rng_seed` is for fixtures only; reusing a seed across real
//!   proofs leaks the witness
//! - arkworks field and group arithmetic is not constant time

pub mod bench_vectors;
pub mod ipa;
mod range;
pub mod redeem;
pub mod registration;
pub mod transfer;
#[cfg(test)]
mod tests;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zether_primitives::{
    DecodeError, KeyPair, Point, RedeemStatement, TransferStatement,
    bn128::{point_from_bytes, point_to_bytes, scalar_from_bytes},
    epoch_tag,
};

pub use redeem::RedeemWitness;
pub use transfer::TransferWitness;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("malformed input: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid witness: {0}")]
    InvalidWitness(&'static str),
    #[error("proof construction failed: {0}")]
    Construction(&'static str),
}

/// Seeded stream for fixtures, thread CSPRNG otherwise.
fn rng_for(seed: Option<[u8; 32]>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::from_seed(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    }
}

pub(crate) fn log_rejection(protocol: &str, err: &ProverError) {
    if let ProverError::InvalidWitness(reason) = err {
        log::warn!(target: "zether-prover", "{protocol} witness rejected: {reason}");
    }
}

/// Proof bytes plus the epoch tag `sk·u_epoch` submitted next to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOutput {
    pub proof: Vec<u8>,
    pub epoch_tag: Vec<u8>,
}

// ===== Redeem =====

#[derive(Clone, Debug)]
pub struct RedeemInput {
    pub cln: [u8; 64],
    pub crn: [u8; 64],
    pub y: [u8; 64],
    pub epoch: u64,
    pub sender: [u8; 20],
    pub sk: [u8; 32],
    pub b_diff: u64,
    pub rng_seed: Option<[u8; 32]>,
}

/// `proveRedeem(CLn, CRn, y, epoch, sender, sk, bDiff) -> bytes`.
pub fn prove_redeem(input: &RedeemInput) -> Result<ProofOutput, ProverError> {
    let statement = RedeemStatement {
        cln: point_from_bytes(&input.cln)?,
        crn: point_from_bytes(&input.crn)?,
        y: point_from_bytes(&input.y)?,
        epoch: input.epoch,
        sender: input.sender,
    };
    let witness = RedeemWitness { sk: scalar_from_bytes(&input.sk)?, b_diff: input.b_diff };

    let mut rng = rng_for(input.rng_seed);
    let proof = redeem::prove(&statement, &witness, &mut rng)?;
    let bytes = proof.to_bytes();
    log::debug!(target: "zether-prover", "redeem proof produced: {} bytes", bytes.len());

    Ok(ProofOutput {
        proof: bytes,
        epoch_tag: point_to_bytes(&epoch_tag(&witness.sk, statement.epoch)).to_vec(),
    })
}

// ===== Transfer =====

#[derive(Clone, Debug)]
pub struct TransferInput {
    pub cln: Vec<[u8; 64]>,
    pub crn: Vec<[u8; 64]>,
    pub c: Vec<[u8; 64]>,
    pub d: [u8; 64],
    pub y: Vec<[u8; 64]>,
    pub epoch: u64,
    pub sk: [u8; 32],
    pub r: [u8; 32],
    pub b_transfer: u64,
    pub b_diff: u64,
    /// `(sender, receiver)`
    pub index: (usize, usize),
    pub rng_seed: Option<[u8; 32]>,
}

fn decode_points(raw: &[[u8; 64]]) -> Result<Vec<Point>, DecodeError> {
    raw.iter().map(|p| point_from_bytes(p)).collect()
}

/// `proveTransfer(CLn, CRn, C, D, y, epoch, sk, r, bTransfer, bDiff, index) -> bytes`.
pub fn prove_transfer(input: &TransferInput) -> Result<ProofOutput, ProverError> {
    let statement = TransferStatement {
        cln: decode_points(&input.cln)?,
        crn: decode_points(&input.crn)?,
        c: decode_points(&input.c)?,
        d: point_from_bytes(&input.d)?,
        y: decode_points(&input.y)?,
        epoch: input.epoch,
    };
    let witness = TransferWitness {
        sk: scalar_from_bytes(&input.sk)?,
        r: scalar_from_bytes(&input.r)?,
        b_transfer: input.b_transfer,
        b_diff: input.b_diff,
        index: input.index,
    };

    let mut rng = rng_for(input.rng_seed);
    let proof = transfer::prove(&statement, &witness, &mut rng)?;
    let bytes = proof.to_bytes();
    log::debug!(
        target: "zether-prover",
        "transfer proof produced: ring {} / {} bytes",
        statement.ring_size(),
        bytes.len()
    );

    Ok(ProofOutput {
        proof: bytes,
        epoch_tag: point_to_bytes(&epoch_tag(&witness.sk, statement.epoch)).to_vec(),
    })
}

// ===== Registration =====

/// Sign `address` with the key `sk`; returns `c ‖ s` (64 bytes).
pub fn sign_registration(
    address: &[u8; 20],
    sk: &[u8; 32],
    rng_seed: Option<[u8; 32]>,
) -> Result<[u8; 64], ProverError> {
    let keypair = KeyPair::from_scalar(scalar_from_bytes(sk)?);
    let mut rng = rng_for(rng_seed);
    Ok(registration::sign(address, &keypair, &mut rng).to_bytes())
}
