//! # zether-verifier
//!
//! Reference verification for redeem, transfer and registration proofs,
//! recomputing every challenge with the same ABI transcript as the prover.
//! The ledger runs its own verifier; this crate mirrors it so proofs can be
//! checked off-chain and in tests.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

use ark_ff::Field;
use thiserror::Error;
use zether_primitives::{
    DecodeError, FieldVector, GeneratorParams, GeneratorVector, InnerProductProof, Point,
    RedeemProof, RedeemStatement, RegistrationSignature, Scalar, TransferProof,
    TransferStatement, Transcript,
    algebra::{range_delta, twos_times_zs},
    anonymity::{fold_rotations, opening_evaluations, ring_depth, shift_weights},
    bn128::{point_from_bytes, pow},
    constants::{BITS_PER_AMOUNT, MAX_ANONYMITY_DEPTH, REDEEM_BITS, TRANSFER_BITS},
    epoch_generator,
    generators::base_g,
    keys::registration_challenge,
};

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("malformed input: {0}")]
    Decode(#[from] DecodeError),
    #[error("malformed statement or proof: {0}")]
    Malformed(&'static str),
    #[error("proof rejected: {0}")]
    Rejected(&'static str),
}

fn reject(reason: &'static str) -> VerifierError {
    log::debug!(target: "zether-verifier", "rejected: {reason}");
    VerifierError::Rejected(reason)
}

/// `Σ_k w^k·P_k`.
fn weighted_sum(w_pows: &FieldVector, points: &[Point]) -> Point {
    GeneratorVector::new(points.to_vec()).commit(w_pows)
}

// ===== Inner product =====

/// Check `P = ⟨a, G⃗⟩ + ⟨b, H⃗⟩ + ⟨a, b⟩·u` folded through every round.
pub fn verify_inner_product(
    transcript: &mut Transcript,
    mut gs: GeneratorVector,
    mut hs: GeneratorVector,
    u: Point,
    mut p: Point,
    proof: &InnerProductProof,
) -> Result<(), VerifierError> {
    let n = gs.len();
    if !n.is_power_of_two() || hs.len() != n {
        return Err(VerifierError::Malformed("generator lengths"));
    }
    let rounds = n.trailing_zeros() as usize;
    if proof.l.len() != rounds || proof.r.len() != rounds {
        return Err(VerifierError::Malformed("inner-product round count"));
    }

    for (l, r) in proof.l.iter().zip(&proof.r) {
        transcript.append_point(l);
        transcript.append_point(r);
        let x = transcript.challenge_scalar();
        let x_inv = x.inverse().ok_or_else(|| reject("zero round challenge"))?;

        let (g_l, g_r) = gs.halves();
        let (h_l, h_r) = hs.halves();
        gs = &g_l.times(&x_inv) + &g_r.times(&x);
        hs = &h_l.times(&x) + &h_r.times(&x_inv);
        p += *l * x.square() + *r * x_inv.square();
    }

    let expected =
        gs.as_slice()[0] * proof.a + hs.as_slice()[0] * proof.b + u * (proof.a * proof.b);
    if p != expected {
        return Err(reject("inner product"));
    }
    Ok(())
}

/// Shared tail of both protocols: draw `o` and check the IPA over
/// `(G⃗, H⃗∘y⁻ⁿ)` against the range-proof commitment.
#[allow(clippy::too_many_arguments)]
fn verify_range_ipa(
    transcript: &mut Transcript,
    params: &GeneratorParams,
    ba: &Point,
    bs: &Point,
    y: &Scalar,
    z: &Scalar,
    x: &Scalar,
    t_hat: &Scalar,
    mu: &Scalar,
    ipa: &InnerProductProof,
) -> Result<(), VerifierError> {
    let n = params.size();
    let amounts = n / BITS_PER_AMOUNT;
    let o = transcript.challenge_scalar();
    let u_x = params.g * o;

    let ys = FieldVector::powers(y, n);
    let ys_inv = ys.invert().ok_or_else(|| reject("zero y challenge"))?;
    let h_primes = params.hs.hadamard(&ys_inv);
    let h_exp = &ys.times(z) + &twos_times_zs(z, amounts);

    let p = *ba + *bs * x - params.gs.sum() * z + h_primes.commit(&h_exp) - params.h * mu
        + u_x * t_hat;
    verify_inner_product(transcript, params.gs.clone(), h_primes, u_x, p, ipa)
}

// ===== Redeem =====

pub fn verify_redeem(
    statement: &RedeemStatement,
    epoch_tag: &Point,
    proof: &RedeemProof,
) -> Result<(), VerifierError> {
    let params = GeneratorParams::new(REDEEM_BITS);
    let (g, h) = (params.g, params.h);
    let (mut t, _) = statement.transcript();

    t.append_point(&proof.ba);
    t.append_point(&proof.bs);
    let y = t.challenge_scalar();
    let z = t.challenge_scalar();
    t.append_point(&proof.t1);
    t.append_point(&proof.t2);
    let x = t.challenge_scalar();

    let z2 = z.square();
    let c = proof.c;
    let delta = range_delta(&y, &z, 1);
    let u = epoch_generator(statement.epoch);

    let a_y = g * proof.s_sk - statement.y * c;
    let a_b = g * proof.s_b + statement.crn * (proof.s_sk * z2) - statement.cln * (c * z2);
    let a_t = h * proof.s_tau - g * proof.s_b
        + (g * (proof.t_hat - delta) - proof.t1 * x - proof.t2 * x.square()) * c;
    let a_u = u * proof.s_sk - *epoch_tag * c;
    for p in [a_y, a_b, a_t, a_u] {
        t.append_point(&p);
    }
    if t.challenge_scalar() != c {
        return Err(reject("redeem sigma challenge"));
    }

    verify_range_ipa(
        &mut t,
        &params,
        &proof.ba,
        &proof.bs,
        &y,
        &z,
        &x,
        &proof.t_hat,
        &proof.mu,
        &proof.ipa,
    )
}

/// Decode and verify a serialized redeem proof.
pub fn verify_redeem_bytes(
    statement: &RedeemStatement,
    epoch_tag: &[u8],
    proof: &[u8],
) -> Result<(), VerifierError> {
    let tag = point_from_bytes(epoch_tag)?;
    let proof = RedeemProof::from_bytes(proof)?;
    verify_redeem(statement, &tag, &proof)
}

// ===== Transfer =====

pub fn verify_transfer(
    statement: &TransferStatement,
    epoch_tag: &Point,
    proof: &TransferProof,
) -> Result<(), VerifierError> {
    let n = statement.ring_size();
    let m = ring_depth(n).ok_or(VerifierError::Malformed("ring size"))?;
    if m > MAX_ANONYMITY_DEPTH || !statement.is_well_formed() {
        return Err(VerifierError::Malformed("ring arrays"));
    }
    let rows = [
        &proof.cln_g, &proof.crn_g, &proof.c_0g, &proof.d_g, &proof.y_0g, &proof.g_g,
        &proof.c_xg, &proof.y_xg,
    ];
    if rows.iter().any(|row| row.len() != m) || proof.f.len() != 2 * m {
        return Err(VerifierError::Malformed("proof does not match ring size"));
    }

    let params = GeneratorParams::new(TRANSFER_BITS);
    let (g, h) = (params.g, params.h);
    let (mut t, _) = statement.transcript();

    for p in [proof.ba, proof.bs, proof.a, proof.b] {
        t.append_point(&p);
    }
    let v = t.challenge_scalar();
    for row in rows {
        t.append_points(row);
    }
    let w = t.challenge_scalar();

    // ===== Ring bits =====
    let f = FieldVector::new(proof.f.clone());
    let w_minus_f = f.negate().plus(&w);
    let (f0, fm) = (proof.f[0], proof.f[m]);
    let tail = FieldVector::new(alloc::vec![f0 * fm, (w - f0) * (w - fm)]);
    let opened = f.concat(&f.hadamard(&w_minus_f)).concat(&tail);
    if proof.b * w + proof.a != params.commit_left(&proof.z_a, &opened) {
        return Err(reject("ring bit commitment"));
    }

    let y = t.challenge_scalar();
    let z = t.challenge_scalar();
    t.append_point(&proof.t1);
    t.append_point(&proof.t2);
    let x = t.challenge_scalar();

    // ===== Ring-opened values =====
    let p_eval = FieldVector::new(opening_evaluations(&proof.f[..m], &w));
    let q_eval = opening_evaluations(&proof.f[m..], &w);
    let w_pows = FieldVector::powers(&w, m);
    let w_m = pow(&w, m as u64);

    let cln = GeneratorVector::new(statement.cln.clone());
    let crn = GeneratorVector::new(statement.crn.clone());
    let cs = GeneratorVector::new(statement.c.clone());
    let ys = GeneratorVector::new(statement.y.clone());

    let cln_r = cln.commit(&p_eval) - weighted_sum(&w_pows, &proof.cln_g);
    let crn_r = crn.commit(&p_eval) - weighted_sum(&w_pows, &proof.crn_g);
    let c_0r = cs.commit(&p_eval) - weighted_sum(&w_pows, &proof.c_0g);
    let y_0r = ys.commit(&p_eval) - weighted_sum(&w_pows, &proof.y_0g);
    let d_r = statement.d * w_m - weighted_sum(&w_pows, &proof.d_g);
    let g_r = g * w_m - weighted_sum(&w_pows, &proof.g_g);

    let folded = fold_rotations(&shift_weights(&v, n), p_eval.as_slice(), &q_eval);
    let c_xr = cs.commit(&folded) - weighted_sum(&w_pows, &proof.c_xg);
    let y_xr = ys.commit(&folded) - weighted_sum(&w_pows, &proof.y_xg);

    // ===== Sigma =====
    let z2 = z.square();
    let z3 = z2 * z;
    let c = proof.c;
    let delta = range_delta(&y, &z, 2);
    let u = epoch_generator(statement.epoch);

    let a_y = g_r * proof.s_sk - y_0r * c;
    let a_d = g * proof.s_r - statement.d * c;
    let a_b = g * proof.s_b + (d_r * (-z2) + crn_r * z3) * proof.s_sk
        - (c_0r * (-z2) + cln_r * z3) * c;
    let a_x = y_xr * proof.s_r - c_xr * c;
    let a_t = h * proof.s_tau - g * proof.s_b
        + (g * (proof.t_hat - delta) - proof.t1 * x - proof.t2 * x.square()) * (c * w_m);
    let a_u = u * proof.s_sk - *epoch_tag * c;
    for p in [a_y, a_d, a_b, a_x, a_t, a_u] {
        t.append_point(&p);
    }
    if t.challenge_scalar() != c {
        return Err(reject("transfer sigma challenge"));
    }

    verify_range_ipa(
        &mut t,
        &params,
        &proof.ba,
        &proof.bs,
        &y,
        &z,
        &x,
        &proof.t_hat,
        &proof.mu,
        &proof.ipa,
    )
}

/// Decode and verify a serialized transfer proof.
pub fn verify_transfer_bytes(
    statement: &TransferStatement,
    epoch_tag: &[u8],
    proof: &[u8],
) -> Result<(), VerifierError> {
    let tag = point_from_bytes(epoch_tag)?;
    let proof = TransferProof::from_bytes(proof, statement.ring_size())?;
    verify_transfer(statement, &tag, &proof)
}

// ===== Registration =====

/// `K = s·G − c·y` must hash back to `c`.
pub fn verify_registration(
    address: &[u8; 20],
    y: &Point,
    signature: &RegistrationSignature,
) -> Result<(), VerifierError> {
    let k_commit = base_g() * signature.s - *y * signature.c;
    if registration_challenge(address, y, &k_commit) != signature.c {
        return Err(reject("registration signature"));
    }
    Ok(())
}

/// Decode many statement points at once.
pub fn decode_points(raw: &[[u8; 64]]) -> Result<Vec<Point>, VerifierError> {
    raw.iter().map(|p| point_from_bytes(p).map_err(VerifierError::from)).collect()
}
