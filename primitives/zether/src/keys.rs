//! Account key pairs and the identifiers the ledger indexes them by.

use ark_ff::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::{
    DecodeError,
    bn128::{
        Point, Scalar, hash_to_scalar, keccak256, point_to_bytes, point_to_encoded,
        random_scalar, scalar_from_bytes, scalar_to_bytes,
    },
    constants::LABEL_SECRET,
    generators::base_g,
    transcript::Transcript,
};

/// `y = x·G`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub x: Scalar,
    pub y: Point,
}

impl KeyPair {
    pub fn from_scalar(x: Scalar) -> Self {
        Self { x, y: base_g() * x }
    }

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let x = random_scalar(rng);
            if !x.is_zero() {
                return Self::from_scalar(x);
            }
        }
    }

    /// Deterministic key from a user secret: `x = keccak(secret ‖ "ETH") mod r`.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut seed = secret.to_vec();
        seed.extend_from_slice(LABEL_SECRET);
        Self::from_scalar(hash_to_scalar(&seed))
    }

    pub fn public_key_hash(&self) -> [u8; 32] {
        public_key_hash(&self.y)
    }

    /// Compressed public key shown to users.
    pub fn encoded(&self) -> [u8; 32] {
        point_to_encoded(&self.y)
    }
}

/// Account identifier: `keccak256(y.x ‖ y.y)`, not reduced.
pub fn public_key_hash(y: &Point) -> [u8; 32] {
    keccak256(&point_to_bytes(y))
}

/// Challenge for the registration signature: `H(address, y, K)`.
pub fn registration_challenge(address: &[u8; 20], y: &Point, k_commit: &Point) -> Scalar {
    let mut t = Transcript::new();
    t.append_address(address);
    t.append_point(y);
    t.append_point(k_commit);
    t.challenge_scalar()
}

/// Schnorr proof of key ownership bound to an account address, submitted
/// once at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistrationSignature {
    pub c: Scalar,
    pub s: Scalar,
}

impl RegistrationSignature {
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&scalar_to_bytes(&self.c));
        out[32..].copy_from_slice(&scalar_to_bytes(&self.s));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != 64 {
            return Err(DecodeError::Length { expected: 64, got: bytes.len() });
        }
        Ok(Self { c: scalar_from_bytes(&bytes[..32])?, s: scalar_from_bytes(&bytes[32..])? })
    }
}
