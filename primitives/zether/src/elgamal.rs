//! Exponential ElGamal over alt_bn128.
//!
//! `Enc(b; r) = (C, D) = (b·G + r·y, r·G)`. Ciphertexts add component-wise,
//! so `Enc(a) + Enc(b)` decrypts to `a + b`.

use core::ops::{Add, AddAssign, Sub, SubAssign};

use ark_ff::Zero;

use crate::{
    DecodeError,
    bn128::{Point, Scalar, point_from_bytes, point_to_bytes},
    constants::MAX_PLAIN,
    generators::base_g,
};

/// Encoded size of a ciphertext (`C ‖ D`).
pub const CIPHERTEXT_BYTES: usize = 128;

#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    /// `b·G + r·y`
    pub C: Point,
    /// `r·G`
    pub D: Point,
}

impl Ciphertext {
    /// The encryption of zero with zero randomness.
    pub fn zero() -> Self {
        Self { C: Point::zero(), D: Point::zero() }
    }

    pub fn encrypt(amount: u64, public_key: &Point, blind: &Scalar) -> Self {
        let g = base_g();
        Self {
            C: g * Scalar::from(amount) + *public_key * blind,
            D: g * blind,
        }
    }

    /// `b·G` recovered with the secret key.
    pub fn plain_point(&self, secret: &Scalar) -> Point {
        self.C - self.D * secret
    }

    /// Recover the plaintext by walking outwards from `guess` until a
    /// multiple of `G` in `[0, MAX_PLAIN]` matches.
    ///
    /// A good guess (the last known balance) makes this a handful of point
    /// additions; the worst case covers the whole range.
    pub fn decrypt(&self, secret: &Scalar, guess: u64) -> Result<u64, DecodeError> {
        let target = self.plain_point(secret);
        let g = base_g();
        let start = guess.min(MAX_PLAIN);

        let mut up = g * Scalar::from(start);
        if up == target {
            return Ok(start);
        }
        let mut down = up;
        let (mut hi, mut lo) = (start, start);
        while hi < MAX_PLAIN || lo > 0 {
            if hi < MAX_PLAIN {
                up += g;
                hi += 1;
                if up == target {
                    return Ok(hi);
                }
            }
            if lo > 0 {
                down -= g;
                lo -= 1;
                if down == target {
                    return Ok(lo);
                }
            }
        }
        log::debug!(target: "zether", "discrete log search exhausted");
        Err(DecodeError::DiscreteLogNotFound)
    }

    pub fn add_plain(&self, amount: u64) -> Self {
        Self { C: self.C + base_g() * Scalar::from(amount), D: self.D }
    }

    pub fn sub_plain(&self, amount: u64) -> Self {
        Self { C: self.C - base_g() * Scalar::from(amount), D: self.D }
    }

    pub fn to_bytes(&self) -> [u8; CIPHERTEXT_BYTES] {
        let mut out = [0u8; CIPHERTEXT_BYTES];
        out[..64].copy_from_slice(&point_to_bytes(&self.C));
        out[64..].copy_from_slice(&point_to_bytes(&self.D));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != CIPHERTEXT_BYTES {
            return Err(DecodeError::Length { expected: CIPHERTEXT_BYTES, got: bytes.len() });
        }
        Ok(Self { C: point_from_bytes(&bytes[..64])?, D: point_from_bytes(&bytes[64..])? })
    }
}

impl Add for Ciphertext {
    type Output = Ciphertext;
    fn add(self, rhs: Ciphertext) -> Ciphertext {
        Ciphertext { C: self.C + rhs.C, D: self.D + rhs.D }
    }
}

impl AddAssign for Ciphertext {
    fn add_assign(&mut self, rhs: Ciphertext) {
        *self = *self + rhs;
    }
}

impl Sub for Ciphertext {
    type Output = Ciphertext;
    fn sub(self, rhs: Ciphertext) -> Ciphertext {
        Ciphertext { C: self.C - rhs.C, D: self.D - rhs.D }
    }
}

impl SubAssign for Ciphertext {
    fn sub_assign(&mut self, rhs: Ciphertext) {
        *self = *self - rhs;
    }
}
