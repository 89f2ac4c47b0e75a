//! Public proof inputs and the transcript prefix they seed.

use alloc::vec::Vec;

use crate::{
    bn128::{Point, Scalar},
    transcript::Transcript,
};

/// Redeem: the sender's balance after the withdrawal, `(CLn, CRn)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemStatement {
    pub cln: Point,
    pub crn: Point,
    pub y: Point,
    pub epoch: u64,
    pub sender: [u8; 20],
}

impl RedeemStatement {
    /// Transcript after absorbing `H(CLn, CRn, y, epoch, sender)`.
    pub fn transcript(&self) -> (Transcript, Scalar) {
        let mut t = Transcript::new();
        t.append_point(&self.cln);
        t.append_point(&self.crn);
        t.append_point(&self.y);
        t.append_u64(self.epoch);
        t.append_address(&self.sender);
        let hash = t.challenge_scalar();
        (t, hash)
    }
}

/// Transfer over a ring of `N` accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferStatement {
    /// Balances after the transfer, left halves.
    pub cln: Vec<Point>,
    /// Balances after the transfer, right halves.
    pub crn: Vec<Point>,
    /// Per-member adjustment `C_i`.
    pub c: Vec<Point>,
    /// Shared randomness commitment `r·G`.
    pub d: Point,
    pub y: Vec<Point>,
    pub epoch: u64,
}

impl TransferStatement {
    pub fn ring_size(&self) -> usize {
        self.y.len()
    }

    /// All ring arrays share one length.
    pub fn is_well_formed(&self) -> bool {
        let n = self.y.len();
        self.cln.len() == n && self.crn.len() == n && self.c.len() == n
    }

    /// Transcript after absorbing `H(CLn[], CRn[], C[], D, y[], epoch)`.
    pub fn transcript(&self) -> (Transcript, Scalar) {
        let mut t = Transcript::new();
        t.append_points(&self.cln);
        t.append_points(&self.crn);
        t.append_points(&self.c);
        t.append_point(&self.d);
        t.append_points(&self.y);
        t.append_u64(self.epoch);
        let hash = t.challenge_scalar();
        (t, hash)
    }
}
