//! Fiat-Shamir transcript over Ethereum ABI tuple encoding.
//!
//! A challenge is `keccak256(abi.encode(pending...)) mod r`. Scalars and
//! integers encode as `uint256`/`bytes32` words, a point as `bytes32[2]`
//! inline, and a point list as a dynamic `bytes32[2][]` (head offset, then
//! length word and elements in the tail). Once a challenge is drawn the
//! pending list becomes the single word holding it, so every later challenge
//! chains over all earlier messages.

use alloc::vec::Vec;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};

use crate::bn128::{Point, Scalar, hash_to_scalar, point_to_bytes, points_to_bytes, scalar_to_bytes};

fn word(bytes: &[u8; 32]) -> DynSolValue {
    DynSolValue::FixedBytes(B256::from(*bytes), 32)
}

/// `bytes32[2]` holding `x ‖ y`.
fn point_value(encoded: &[u8; 64]) -> DynSolValue {
    DynSolValue::FixedArray(
        encoded.chunks_exact(32).map(|c| DynSolValue::FixedBytes(B256::from_slice(c), 32)).collect(),
    )
}

/// Append-then-hash challenge derivation shared by prover and verifier.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pending: Vec<DynSolValue>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_word(&mut self, word_bytes: [u8; 32]) {
        self.pending.push(word(&word_bytes));
    }

    pub fn append_u64(&mut self, value: u64) {
        self.pending.push(DynSolValue::Uint(U256::from(value), 256));
    }

    pub fn append_address(&mut self, address: &[u8; 20]) {
        self.pending.push(DynSolValue::Address(Address::from(*address)));
    }

    pub fn append_scalar(&mut self, s: &Scalar) {
        self.append_word(scalar_to_bytes(s));
    }

    pub fn append_point(&mut self, p: &Point) {
        self.pending.push(point_value(&point_to_bytes(p)));
    }

    pub fn append_points(&mut self, ps: &[Point]) {
        let values = points_to_bytes(ps).iter().map(point_value).collect();
        self.pending.push(DynSolValue::Array(values));
    }

    /// `abi.encode(pending...)`.
    fn encoded(&self) -> Vec<u8> {
        DynSolValue::Tuple(self.pending.clone()).abi_encode_params()
    }

    /// Hash everything pending into a scalar and restart the chain from it.
    pub fn challenge_scalar(&mut self) -> Scalar {
        let c = hash_to_scalar(&self.encoded());
        self.pending.clear();
        self.append_scalar(&c);
        c
    }
}
