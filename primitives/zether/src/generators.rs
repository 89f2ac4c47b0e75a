//! Transparent Pedersen parameters and the per-epoch generator.
//!
//! `G` is the fixed alt_bn128 generator `(1, 2)`. Every other base point
//! comes out of [`hash_to_curve`] on a fixed label, so no trusted setup is
//! involved and the verifier can recompute all of them.

use alloc::vec::Vec;

use alloy_sol_types::SolValue;
use ark_bn254::G1Affine;
use ark_ec::AffineRepr;

use crate::{
    algebra::{FieldVector, GeneratorVector},
    bn128::{Point, Scalar, hash_to_curve},
    constants::{LABEL_EPOCH, LABEL_GS, LABEL_H, LABEL_HS},
};

fn indexed(label: &[u8], index: u64) -> Point {
    let mut seed = Vec::with_capacity(label.len() + 32);
    seed.extend_from_slice(label);
    seed.extend_from_slice(&index.abi_encode());
    hash_to_curve(&seed)
}

/// Base generator `G = (1, 2)`; public keys and ciphertexts are built on it.
pub fn base_g() -> Point {
    G1Affine::generator().into_group()
}

/// Blinding generator `H`.
pub fn base_h() -> Point {
    hash_to_curve(LABEL_H)
}

/// `u = hash_to_curve("Zether" ‖ u256(epoch))`.
pub fn epoch_generator(epoch: u64) -> Point {
    indexed(LABEL_EPOCH, epoch)
}

/// `sk·u_epoch`; one value per key and epoch, so a second spend in the same
/// epoch is recognizable.
pub fn epoch_tag(secret: &Scalar, epoch: u64) -> Point {
    epoch_generator(epoch) * secret
}

#[derive(Clone, Debug)]
pub struct GeneratorParams {
    pub g: Point,
    pub h: Point,
    pub gs: GeneratorVector,
    pub hs: GeneratorVector,
}

impl GeneratorParams {
    /// Parameters for vectors of length `n`.
    pub fn new(n: usize) -> Self {
        Self {
            g: base_g(),
            h: base_h(),
            gs: GeneratorVector::new((0..n as u64).map(|i| indexed(LABEL_GS, i)).collect()),
            hs: GeneratorVector::new((0..n as u64).map(|i| indexed(LABEL_HS, i)).collect()),
        }
    }

    pub fn size(&self) -> usize {
        self.gs.len()
    }

    /// `blind·H + ⟨left, G⃗⟩ + ⟨right, H⃗⟩`.
    pub fn commit(&self, blind: &Scalar, left: &FieldVector, right: &FieldVector) -> Point {
        self.h * blind + self.gs.commit(left) + self.hs.commit(right)
    }

    /// `blind·H + ⟨left, G⃗[..len]⟩`, used for the ring bit commitments.
    pub fn commit_left(&self, blind: &Scalar, left: &FieldVector) -> Point {
        self.h * blind + self.gs.slice(0, left.len()).commit(left)
    }
}
