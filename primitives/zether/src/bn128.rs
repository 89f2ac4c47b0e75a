//! alt_bn128 (BN254 G1) scalars and points with the fixed-width encodings the
//! on-chain verifier reads.
//!
//! Scalars are 32-byte big-endian words reduced below the group order `r`.
//! Points are 64 bytes `x ‖ y`, each coordinate a 32-byte big-endian word; the
//! identity is all zeros, matching the precompile convention.

use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Keccak256};

use alloc::vec::Vec;

use crate::DecodeError;

/// Element of the scalar field (mod the group order).
pub type Scalar = Fr;
/// Curve point in projective form.
pub type Point = G1Projective;

/// Width of an encoded scalar or coordinate.
pub const SCALAR_BYTES: usize = 32;
/// Width of an encoded point.
pub const POINT_BYTES: usize = 64;

/// Bit set in the first byte of an encoded key when `y` is odd.
const ENCODED_ODD_FLAG: u8 = 0x80;

/// `keccak256(data)`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `keccak256(data) mod r`.
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::from_be_bytes_mod_order(&keccak256(data))
}

/// Uniform scalar from 64 bytes of CSPRNG output (wide reduction).
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; 64];
    rng.fill_bytes(&mut bytes);
    Scalar::from_le_bytes_mod_order(&bytes)
}

fn field_to_word<F: PrimeField>(f: &F) -> [u8; 32] {
    let be = f.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

fn canonical_field<F: PrimeField>(word: &[u8]) -> Option<F> {
    let f = F::from_be_bytes_mod_order(word);
    (field_to_word(&f).as_slice() == word).then_some(f)
}

pub fn scalar_to_bytes(s: &Scalar) -> [u8; 32] {
    field_to_word(s)
}

/// Decode a canonical scalar; values `>= r` are rejected.
pub fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar, DecodeError> {
    if bytes.len() != SCALAR_BYTES {
        return Err(DecodeError::Length { expected: SCALAR_BYTES, got: bytes.len() });
    }
    canonical_field::<Scalar>(bytes).ok_or(DecodeError::NonCanonicalScalar)
}

pub fn point_to_bytes(p: &Point) -> [u8; 64] {
    affine_to_bytes(&p.into_affine())
}

fn affine_to_bytes(a: &G1Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    if let Some((x, y)) = a.xy() {
        out[..32].copy_from_slice(&field_to_word(x));
        out[32..].copy_from_slice(&field_to_word(y));
    }
    out
}

/// Decode `x ‖ y`, checking the point lies on the curve and in G1.
pub fn point_from_bytes(bytes: &[u8]) -> Result<Point, DecodeError> {
    if bytes.len() != POINT_BYTES {
        return Err(DecodeError::Length { expected: POINT_BYTES, got: bytes.len() });
    }
    if bytes.iter().all(|b| *b == 0) {
        return Ok(Point::zero());
    }
    let x = canonical_field::<Fq>(&bytes[..32]).ok_or(DecodeError::NotOnCurve)?;
    let y = canonical_field::<Fq>(&bytes[32..]).ok_or(DecodeError::NotOnCurve)?;
    let affine = G1Affine::new_unchecked(x, y);
    if !affine.is_on_curve() || !affine.is_in_correct_subgroup_assuming_on_curve() {
        return Err(DecodeError::NotOnCurve);
    }
    Ok(affine.into_group())
}

/// Encode many points with one batched normalization.
pub fn points_to_bytes(points: &[Point]) -> Vec<[u8; 64]> {
    Point::normalize_batch(points).iter().map(affine_to_bytes).collect()
}

/// Decode a packed run of points.
pub fn points_from_bytes(bytes: &[u8]) -> Result<Vec<Point>, DecodeError> {
    if bytes.len() % POINT_BYTES != 0 {
        return Err(DecodeError::Truncated);
    }
    bytes.chunks_exact(POINT_BYTES).map(point_from_bytes).collect()
}

/// Exponent `(p + 1) / 4`; valid square-root exponent because `p ≡ 3 (mod 4)`.
fn sqrt_exponent() -> <Fq as PrimeField>::BigInt {
    let mut e = Fq::MODULUS;
    let _ = e.add_with_carry(&1u64.into());
    e.div2();
    e.div2();
    e
}

/// Curve right-hand side `x³ + 3`.
fn curve_rhs(x: &Fq) -> Fq {
    x.square() * x + Fq::from(3u64)
}

/// Square root of `rhs` via the `(p+1)/4` shortcut, if one exists.
fn sqrt_3_mod_4(rhs: &Fq) -> Option<Fq> {
    let y = rhs.pow(sqrt_exponent());
    (y.square() == *rhs).then_some(y)
}

/// Deterministically map a seed to a curve point.
///
/// `x` starts at `keccak(seed) mod p` and is incremented until `x³ + 3` is a
/// quadratic residue. The root returned by the exponent shortcut is used as is.
pub fn hash_to_curve(seed: &[u8]) -> Point {
    let mut x = Fq::from_be_bytes_mod_order(&keccak256(seed));
    loop {
        if let Some(y) = sqrt_3_mod_4(&curve_rhs(&x)) {
            return G1Affine::new_unchecked(x, y).into_group();
        }
        x += Fq::one();
    }
}

/// Compressed 32-byte form of a point (`x` with the parity of `y` in the top bit).
pub fn point_to_encoded(p: &Point) -> [u8; 32] {
    let affine = p.into_affine();
    let Some((x, y)) = affine.xy() else {
        return [0u8; 32];
    };
    let mut out = field_to_word(x);
    if y.into_bigint().is_odd() {
        out[0] |= ENCODED_ODD_FLAG;
    }
    out
}

/// Inverse of [`point_to_encoded`].
pub fn point_from_encoded(bytes: &[u8; 32]) -> Result<Point, DecodeError> {
    if bytes.iter().all(|b| *b == 0) {
        return Ok(Point::zero());
    }
    let odd = bytes[0] & ENCODED_ODD_FLAG != 0;
    let mut word = *bytes;
    word[0] &= !ENCODED_ODD_FLAG;
    let x = canonical_field::<Fq>(&word).ok_or(DecodeError::BadEncoding)?;
    let y = sqrt_3_mod_4(&curve_rhs(&x)).ok_or(DecodeError::BadEncoding)?;
    let y = if y.into_bigint().is_odd() == odd { y } else { -y };
    Ok(G1Affine::new_unchecked(x, y).into_group())
}

/// Multiplicative inverse; the zero element has none.
pub fn invert(s: &Scalar) -> Option<Scalar> {
    s.inverse()
}

/// `base^exp` for a small exponent.
pub fn pow(base: &Scalar, exp: u64) -> Scalar {
    base.pow([exp])
}
