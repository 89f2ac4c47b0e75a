//! Ring (one-of-many) helpers shared by the transfer prover and verifier.
//!
//! Sender and receiver indices in a ring of size `N = 2^m` are committed bit
//! by bit. Challenge `w` opens each bit as `f_j = b_j·w + a_j`, and the
//! index polynomial of leaf `i` is `Π_j f_{j, i_j}(X)` with
//! `f_{j,1}(X) = b_j·X + a_j` and `f_{j,0}(X) = X − f_{j,1}(X)`. It has degree
//! `m` with leading coefficient 1 only at the committed index.

use alloc::vec::Vec;

use ark_ff::{One, Zero};

use crate::{
    algebra::{FieldVector, Polynomial},
    bn128::Scalar,
};

/// `log2(n)` when `n` is a power of two `>= 2`.
pub fn ring_depth(n: usize) -> Option<usize> {
    (n >= 2 && n.is_power_of_two()).then(|| n.trailing_zeros() as usize)
}

/// Leaf polynomials for bit openings `(a_j, b_j)`, built level by level.
///
/// After processing bit `j`, entry `i` holds the product over bits `< j+1`
/// for leaves whose low bits equal `i`.
pub fn index_polynomials(a: &[Scalar], b: &[Scalar]) -> Vec<Polynomial> {
    debug_assert_eq!(a.len(), b.len());
    let mut leaves = alloc::vec![Polynomial::one()];
    for (a_j, b_j) in a.iter().zip(b) {
        let right = Polynomial::linear(*a_j, *b_j);
        let left = Polynomial::linear(-*a_j, Scalar::one() - b_j);
        let half = leaves.len();
        let mut next = Vec::with_capacity(2 * half);
        next.extend(leaves.iter().map(|p| p * &left));
        next.extend(leaves.iter().map(|p| p * &right));
        debug_assert_eq!(next.len(), 2 * half);
        leaves = next;
    }
    leaves
}

/// `P[k]`: the degree-`k` coefficient of every leaf polynomial, `k < m`.
pub fn coefficient_vectors(leaves: &[Polynomial], m: usize) -> Vec<FieldVector> {
    (0..m)
        .map(|k| FieldVector::new(leaves.iter().map(|p| p.coefficient(k)).collect()))
        .collect()
}

/// Leaf evaluations from the opened bits `f` (length `m`) at challenge `w`.
pub fn opening_evaluations(f: &[Scalar], w: &Scalar) -> Vec<Scalar> {
    let mut out = alloc::vec![Scalar::one()];
    for f_j in f {
        let zero_branch = *w - f_j;
        let mut next = Vec::with_capacity(2 * out.len());
        next.extend(out.iter().map(|p| *p * zero_branch));
        next.extend(out.iter().map(|p| *p * f_j));
        out = next;
    }
    out
}

/// Rotation weights `e_0 = e_1 = 1`, `e_i = v^{i−1}`.
pub fn shift_weights(v: &Scalar, n: usize) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(n);
    let mut acc = Scalar::one();
    for i in 0..n {
        out.push(acc);
        if i > 0 {
            acc *= v;
        }
    }
    out
}

/// Per-member coefficients `Σ_i e_i·poly_i[(j − s_i) mod N]`, where
/// `poly_i` is `p` for even `i` and `q` for odd `i` and `s_i = i − i mod 2`.
///
/// Multiplying these against a public array gives the aggregated rotation
/// sum both sides of the ring argument agree on.
pub fn fold_rotations(weights: &[Scalar], p: &[Scalar], q: &[Scalar]) -> FieldVector {
    let n = p.len();
    debug_assert_eq!(q.len(), n);
    debug_assert_eq!(weights.len(), n);
    let mut out = alloc::vec![Scalar::zero(); n];
    for (i, e) in weights.iter().enumerate() {
        let poly = if i % 2 == 0 { p } else { q };
        let shift = i - i % 2;
        for (j, slot) in out.iter_mut().enumerate() {
            *slot += *e * poly[(j + n - shift) % n];
        }
    }
    FieldVector::new(out)
}
