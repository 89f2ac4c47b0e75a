//! Redeem: prove the balance left after a withdrawal is in `[0, 2³²)` and
//! that the prover owns the account key.

use ark_ff::Field;
use rand::{CryptoRng, RngCore};
use zether_primitives::{
    GeneratorParams, RedeemProof, RedeemStatement, Scalar,
    bn128::random_scalar,
    constants::{MAX_PLAIN, REDEEM_BITS},
    epoch_generator,
    generators::base_g,
};

use crate::{ProverError, range::commit_bits};

#[derive(Clone, Debug)]
pub struct RedeemWitness {
    pub sk: Scalar,
    /// Balance remaining after the redeem.
    pub b_diff: u64,
}

/// Range and key/balance checks. Draws no randomness.
pub fn validate(statement: &RedeemStatement, witness: &RedeemWitness) -> Result<(), ProverError> {
    if witness.b_diff > MAX_PLAIN {
        return Err(ProverError::InvalidWitness("remaining balance exceeds 32 bits"));
    }
    let g = base_g();
    if g * witness.sk != statement.y {
        return Err(ProverError::InvalidWitness("secret key does not match public key"));
    }
    if statement.cln - statement.crn * witness.sk != g * Scalar::from(witness.b_diff) {
        return Err(ProverError::InvalidWitness("remaining balance does not match ciphertext"));
    }
    Ok(())
}

pub fn prove<R: RngCore + CryptoRng>(
    statement: &RedeemStatement,
    witness: &RedeemWitness,
    rng: &mut R,
) -> Result<RedeemProof, ProverError> {
    validate(statement, witness).inspect_err(|e| crate::log_rejection("redeem", e))?;

    let params = GeneratorParams::new(REDEEM_BITS);
    let (mut transcript, _) = statement.transcript();

    // ===== Range commitments =====
    let bits = commit_bits(&params, witness.b_diff, rng);
    transcript.append_point(&bits.ba);
    transcript.append_point(&bits.bs);
    let y = transcript.challenge_scalar();
    let z = transcript.challenge_scalar();

    let poly = bits.polynomial(&params, &y, &z, rng);
    transcript.append_point(&poly.t1);
    transcript.append_point(&poly.t2);
    let (t1, t2) = (poly.t1, poly.t2);
    let x = transcript.challenge_scalar();

    let z2 = z.square();
    let value_term = z2 * Scalar::from(witness.b_diff);
    let eval = poly.evaluate(&bits, &x, &value_term)?;

    // ===== Sigma protocol =====
    let u = epoch_generator(statement.epoch);
    let k_sk = random_scalar(rng);
    let k_b = random_scalar(rng);
    let k_tau = random_scalar(rng);

    let a_y = params.g * k_sk;
    let a_b = params.g * k_b + statement.crn * (z2 * k_sk);
    let a_t = params.h * k_tau - params.g * k_b;
    let a_u = u * k_sk;
    for p in [a_y, a_b, a_t, a_u] {
        transcript.append_point(&p);
    }
    let c = transcript.challenge_scalar();

    let s_sk = k_sk + c * witness.sk;
    let s_b = k_b + c * value_term;
    let s_tau = k_tau + c * eval.tau_x;
    let (t_hat, mu) = (eval.t_hat, eval.mu);

    // ===== Inner product =====
    let ipa = eval.prove_ipa(&mut transcript, &params)?;

    Ok(RedeemProof {
        ba: bits.ba,
        bs: bits.bs,
        t1,
        t2,
        t_hat,
        mu,
        c,
        s_sk,
        s_b,
        s_tau,
        ipa,
    })
}
