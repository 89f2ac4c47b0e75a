//! Field vectors, scalar polynomials and generator vectors.

use alloc::vec::Vec;
use core::ops::{Add, Mul, Sub};

use ark_bn254::G1Affine;
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::{Field, One, Zero};

use crate::{
    bn128::{Point, Scalar},
    constants::BITS_PER_AMOUNT,
};

/// Ordered scalars. Binary operations require equal lengths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldVector(pub Vec<Scalar>);

impl FieldVector {
    pub fn new(v: Vec<Scalar>) -> Self {
        Self(v)
    }

    pub fn filled(value: Scalar, n: usize) -> Self {
        Self(alloc::vec![value; n])
    }

    /// `[1, base, base², ...]` of length `n`.
    pub fn powers(base: &Scalar, n: usize) -> Self {
        let mut out = Vec::with_capacity(n);
        let mut acc = Scalar::one();
        for _ in 0..n {
            out.push(acc);
            acc *= base;
        }
        Self(out)
    }

    /// Little-endian bits of `value` as scalars.
    pub fn bits(value: u64, n: usize) -> Self {
        Self((0..n).map(|i| Scalar::from((value >> i) & 1)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    pub fn sum(&self) -> Scalar {
        self.0.iter().sum()
    }

    pub fn inner_product(&self, other: &FieldVector) -> Scalar {
        debug_assert_eq!(self.len(), other.len());
        self.0.iter().zip(&other.0).map(|(a, b)| *a * b).sum()
    }

    pub fn hadamard(&self, other: &FieldVector) -> FieldVector {
        debug_assert_eq!(self.len(), other.len());
        Self(self.0.iter().zip(&other.0).map(|(a, b)| *a * b).collect())
    }

    /// Broadcast-add a scalar.
    pub fn plus(&self, s: &Scalar) -> FieldVector {
        Self(self.0.iter().map(|a| *a + s).collect())
    }

    pub fn times(&self, s: &Scalar) -> FieldVector {
        Self(self.0.iter().map(|a| *a * s).collect())
    }

    pub fn negate(&self) -> FieldVector {
        Self(self.0.iter().map(|a| -*a).collect())
    }

    /// Element-wise inverse; `None` if any entry is zero.
    pub fn invert(&self) -> Option<FieldVector> {
        self.0.iter().map(|a| a.inverse()).collect::<Option<Vec<_>>>().map(Self)
    }

    pub fn concat(&self, other: &FieldVector) -> FieldVector {
        let mut v = self.0.clone();
        v.extend_from_slice(&other.0);
        Self(v)
    }

    /// Split at the midpoint.
    pub fn halves(&self) -> (FieldVector, FieldVector) {
        let (l, r) = self.0.split_at(self.len() / 2);
        (Self(l.to_vec()), Self(r.to_vec()))
    }
}

impl Add for &FieldVector {
    type Output = FieldVector;
    fn add(self, rhs: &FieldVector) -> FieldVector {
        debug_assert_eq!(self.len(), rhs.len());
        FieldVector(self.0.iter().zip(&rhs.0).map(|(a, b)| *a + b).collect())
    }
}

impl Sub for &FieldVector {
    type Output = FieldVector;
    fn sub(self, rhs: &FieldVector) -> FieldVector {
        debug_assert_eq!(self.len(), rhs.len());
        FieldVector(self.0.iter().zip(&rhs.0).map(|(a, b)| *a - b).collect())
    }
}

/// Scalar-coefficient polynomial, lowest degree first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial(pub Vec<Scalar>);

impl Polynomial {
    pub fn new(coefficients: Vec<Scalar>) -> Self {
        Self(coefficients)
    }

    pub fn one() -> Self {
        Self(alloc::vec![Scalar::one()])
    }

    /// `c0 + c1·X`.
    pub fn linear(c0: Scalar, c1: Scalar) -> Self {
        Self(alloc::vec![c0, c1])
    }

    /// Coefficient of `X^k`, zero past the degree.
    pub fn coefficient(&self, k: usize) -> Scalar {
        self.0.get(k).copied().unwrap_or_else(Scalar::zero)
    }

    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        self.0.iter().rev().fold(Scalar::zero(), |acc, c| acc * x + c)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.0.is_empty() || rhs.0.is_empty() {
            return Polynomial(Vec::new());
        }
        let mut out = alloc::vec![Scalar::zero(); self.0.len() + rhs.0.len() - 1];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in rhs.0.iter().enumerate() {
                out[i + j] += *a * b;
            }
        }
        Polynomial(out)
    }
}

/// Ordered curve points used as commitment bases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorVector(pub Vec<Point>);

impl GeneratorVector {
    pub fn new(v: Vec<Point>) -> Self {
        Self(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    /// `Σ s_i·P_i` as a single multi-scalar multiplication.
    pub fn commit(&self, exponents: &FieldVector) -> Point {
        debug_assert_eq!(self.len(), exponents.len());
        let bases: Vec<G1Affine> = Point::normalize_batch(&self.0);
        Point::msm_unchecked(&bases, exponents.as_slice())
    }

    pub fn sum(&self) -> Point {
        self.0.iter().sum()
    }

    /// `[s_i·P_i]`.
    pub fn hadamard(&self, exponents: &FieldVector) -> GeneratorVector {
        debug_assert_eq!(self.len(), exponents.len());
        Self(self.0.iter().zip(exponents.as_slice()).map(|(p, s)| *p * s).collect())
    }

    pub fn times(&self, s: &Scalar) -> GeneratorVector {
        Self(self.0.iter().map(|p| *p * s).collect())
    }

    pub fn halves(&self) -> (GeneratorVector, GeneratorVector) {
        let (l, r) = self.0.split_at(self.len() / 2);
        (Self(l.to_vec()), Self(r.to_vec()))
    }

    pub fn slice(&self, start: usize, end: usize) -> GeneratorVector {
        Self(self.0[start..end].to_vec())
    }
}

impl Add for &GeneratorVector {
    type Output = GeneratorVector;
    fn add(self, rhs: &GeneratorVector) -> GeneratorVector {
        debug_assert_eq!(self.len(), rhs.len());
        GeneratorVector(self.0.iter().zip(&rhs.0).map(|(a, b)| *a + b).collect())
    }
}

// ===== Range-proof constants =====

/// `[z²·2^i]_{i<32} ‖ [z³·2^i]_{i<32} ‖ ...` for `amounts` packed values.
pub fn twos_times_zs(z: &Scalar, amounts: usize) -> FieldVector {
    let twos = FieldVector::powers(&Scalar::from(2u64), BITS_PER_AMOUNT);
    let mut z_j = z.square();
    let mut out = FieldVector::default();
    for _ in 0..amounts {
        out = out.concat(&twos.times(&z_j));
        z_j *= z;
    }
    out
}

/// `δ(y, z) = (z − z²)·⟨1, yⁿ⟩ − Σ_j z^{j+3}·(2³² − 1)` for `n = 32·amounts`.
pub fn range_delta(y: &Scalar, z: &Scalar, amounts: usize) -> Scalar {
    let n = BITS_PER_AMOUNT * amounts;
    let sum_y = FieldVector::powers(y, n).sum();
    let ones_dot_twos = Scalar::from(u32::MAX as u64);
    let z2 = z.square();
    let mut z_j = z2 * z;
    let mut tail = Scalar::zero();
    for _ in 0..amounts {
        tail += z_j * ones_dot_twos;
        z_j *= z;
    }
    (*z - z2) * sum_y - tail
}
