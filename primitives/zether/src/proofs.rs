//! Proof structures and their canonical byte layouts.
//!
//! All fields are fixed width (32-byte scalars, 64-byte points) and arrays
//! carry no length prefix; their lengths follow from the ring size and the
//! range-proof width.
//!
//! ```text
//! IPA:      L[k] ‖ R[k] ‖ a ‖ b                                  k = log2(n)
//! Redeem:   BA ‖ BS ‖ T1 ‖ T2 ‖ tHat ‖ mu ‖ c ‖ s_sk ‖ s_b ‖ s_tau ‖ IPA(32)
//! Transfer: BA ‖ BS ‖ A ‖ B ‖ CLnG[m] ‖ CRnG[m] ‖ C_0G[m] ‖ DG[m] ‖ y_0G[m]
//!           ‖ gG[m] ‖ C_XG[m] ‖ y_XG[m] ‖ f[2m] ‖ z_A ‖ T1 ‖ T2 ‖ tHat ‖ mu
//!           ‖ c ‖ s_sk ‖ s_r ‖ s_b ‖ s_tau ‖ IPA(64)
//! ```

use alloc::vec::Vec;

use crate::{
    DecodeError,
    anonymity::ring_depth,
    bn128::{
        POINT_BYTES, Point, SCALAR_BYTES, Scalar, point_from_bytes, points_to_bytes,
        scalar_from_bytes, scalar_to_bytes,
    },
    constants::{REDEEM_BITS, TRANSFER_BITS},
};

/// Rounds of the inner-product argument for vectors of length `n`.
pub const fn ipa_rounds(n: usize) -> usize {
    n.trailing_zeros() as usize
}

struct Writer(Vec<u8>);

impl Writer {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn points(&mut self, ps: &[Point]) -> &mut Self {
        for p in points_to_bytes(ps) {
            self.0.extend_from_slice(&p);
        }
        self
    }

    fn scalars(&mut self, ss: &[Scalar]) -> &mut Self {
        for s in ss {
            self.0.extend_from_slice(&scalar_to_bytes(s));
        }
        self
    }

    fn finish(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.0)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or(DecodeError::Layout("truncated proof"))?;
        let out = self.bytes.get(self.pos..end).ok_or(DecodeError::Layout("truncated proof"))?;
        self.pos = end;
        Ok(out)
    }

    fn point(&mut self) -> Result<Point, DecodeError> {
        point_from_bytes(self.take(POINT_BYTES)?)
    }

    fn points(&mut self, n: usize) -> Result<Vec<Point>, DecodeError> {
        (0..n).map(|_| self.point()).collect()
    }

    fn scalar(&mut self) -> Result<Scalar, DecodeError> {
        scalar_from_bytes(self.take(SCALAR_BYTES)?)
    }

    fn scalars(&mut self, n: usize) -> Result<Vec<Scalar>, DecodeError> {
        (0..n).map(|_| self.scalar()).collect()
    }

    fn finish(self) -> Result<(), DecodeError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(DecodeError::Layout("trailing bytes"))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerProductProof {
    pub l: Vec<Point>,
    pub r: Vec<Point>,
    pub a: Scalar,
    pub b: Scalar,
}

impl InnerProductProof {
    fn write(&self, w: &mut Writer) {
        w.points(&self.l).points(&self.r).scalars(&[self.a, self.b]);
    }

    fn read(r: &mut Reader<'_>, rounds: usize) -> Result<Self, DecodeError> {
        Ok(Self { l: r.points(rounds)?, r: r.points(rounds)?, a: r.scalar()?, b: r.scalar()? })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.write(&mut w);
        w.finish()
    }

    /// Parse a proof for vectors of length `n`.
    pub fn from_bytes(bytes: &[u8], n: usize) -> Result<Self, DecodeError> {
        let mut r = Reader::new(bytes);
        let proof = Self::read(&mut r, ipa_rounds(n))?;
        r.finish()?;
        Ok(proof)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemProof {
    pub ba: Point,
    pub bs: Point,
    pub t1: Point,
    pub t2: Point,
    pub t_hat: Scalar,
    pub mu: Scalar,
    pub c: Scalar,
    pub s_sk: Scalar,
    pub s_b: Scalar,
    pub s_tau: Scalar,
    pub ipa: InnerProductProof,
}

impl RedeemProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.points(&[self.ba, self.bs, self.t1, self.t2]).scalars(&[
            self.t_hat, self.mu, self.c, self.s_sk, self.s_b, self.s_tau,
        ]);
        self.ipa.write(&mut w);
        w.finish()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(bytes);
        let proof = Self {
            ba: r.point()?,
            bs: r.point()?,
            t1: r.point()?,
            t2: r.point()?,
            t_hat: r.scalar()?,
            mu: r.scalar()?,
            c: r.scalar()?,
            s_sk: r.scalar()?,
            s_b: r.scalar()?,
            s_tau: r.scalar()?,
            ipa: InnerProductProof::read(&mut r, ipa_rounds(REDEEM_BITS))?,
        };
        r.finish()?;
        Ok(proof)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferProof {
    pub ba: Point,
    pub bs: Point,
    pub a: Point,
    pub b: Point,
    pub cln_g: Vec<Point>,
    pub crn_g: Vec<Point>,
    pub c_0g: Vec<Point>,
    pub d_g: Vec<Point>,
    pub y_0g: Vec<Point>,
    pub g_g: Vec<Point>,
    pub c_xg: Vec<Point>,
    pub y_xg: Vec<Point>,
    pub f: Vec<Scalar>,
    pub z_a: Scalar,
    pub t1: Point,
    pub t2: Point,
    pub t_hat: Scalar,
    pub mu: Scalar,
    pub c: Scalar,
    pub s_sk: Scalar,
    pub s_r: Scalar,
    pub s_b: Scalar,
    pub s_tau: Scalar,
    pub ipa: InnerProductProof,
}

impl TransferProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.points(&[self.ba, self.bs, self.a, self.b])
            .points(&self.cln_g)
            .points(&self.crn_g)
            .points(&self.c_0g)
            .points(&self.d_g)
            .points(&self.y_0g)
            .points(&self.g_g)
            .points(&self.c_xg)
            .points(&self.y_xg)
            .scalars(&self.f)
            .scalars(&[self.z_a])
            .points(&[self.t1, self.t2])
            .scalars(&[self.t_hat, self.mu, self.c, self.s_sk, self.s_r, self.s_b, self.s_tau]);
        self.ipa.write(&mut w);
        w.finish()
    }

    /// Parse a proof for an anonymity set of `ring_size` members.
    pub fn from_bytes(bytes: &[u8], ring_size: usize) -> Result<Self, DecodeError> {
        let m = ring_depth(ring_size).ok_or(DecodeError::Layout("ring size"))?;
        let mut r = Reader::new(bytes);
        let proof = Self {
            ba: r.point()?,
            bs: r.point()?,
            a: r.point()?,
            b: r.point()?,
            cln_g: r.points(m)?,
            crn_g: r.points(m)?,
            c_0g: r.points(m)?,
            d_g: r.points(m)?,
            y_0g: r.points(m)?,
            g_g: r.points(m)?,
            c_xg: r.points(m)?,
            y_xg: r.points(m)?,
            f: r.scalars(2 * m)?,
            z_a: r.scalar()?,
            t1: r.point()?,
            t2: r.point()?,
            t_hat: r.scalar()?,
            mu: r.scalar()?,
            c: r.scalar()?,
            s_sk: r.scalar()?,
            s_r: r.scalar()?,
            s_b: r.scalar()?,
            s_tau: r.scalar()?,
            ipa: InnerProductProof::read(&mut r, ipa_rounds(TRANSFER_BITS))?,
        };
        r.finish()?;
        Ok(proof)
    }

    /// Ring depth `m` this proof was built for.
    pub fn depth(&self) -> usize {
        self.cln_g.len()
    }
}

/// Serialized size of a redeem proof.
pub const fn redeem_proof_len() -> usize {
    4 * POINT_BYTES
        + 6 * SCALAR_BYTES
        + 2 * ipa_rounds(REDEEM_BITS) * POINT_BYTES
        + 2 * SCALAR_BYTES
}

/// Serialized size of a transfer proof over a ring of depth `m`.
pub const fn transfer_proof_len(m: usize) -> usize {
    (4 + 8 * m + 2) * POINT_BYTES
        + (2 * m + 1 + 7) * SCALAR_BYTES
        + 2 * ipa_rounds(TRANSFER_BITS) * POINT_BYTES
        + 2 * SCALAR_BYTES
}
