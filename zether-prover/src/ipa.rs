//! Inner-product argument prover.
//!
//! Proves knowledge of `a, b` with `P = ⟨a, G⃗⟩ + ⟨b, H⃗⟩ + ⟨a, b⟩·u` in
//! `log2(n)` halving rounds. Each round publishes `L`, `R`, draws `x` from the
//! transcript and folds
//! `G' = G_L·x⁻¹ + G_R·x`, `H' = H_L·x + H_R·x⁻¹`,
//! `a' = a_L·x + a_R·x⁻¹`, `b' = b_L·x⁻¹ + b_R·x`.

use ark_ff::Field;
use zether_primitives::{FieldVector, GeneratorVector, InnerProductProof, Point, Transcript};

use crate::ProverError;

pub fn prove_inner_product(
    transcript: &mut Transcript,
    mut gs: GeneratorVector,
    mut hs: GeneratorVector,
    u: Point,
    mut a: FieldVector,
    mut b: FieldVector,
) -> Result<InnerProductProof, ProverError> {
    let n = a.len();
    if !n.is_power_of_two() || b.len() != n || gs.len() != n || hs.len() != n {
        return Err(ProverError::Construction("inner-product input shape"));
    }

    let rounds = n.trailing_zeros() as usize;
    let mut ls = Vec::with_capacity(rounds);
    let mut rs = Vec::with_capacity(rounds);

    while a.len() > 1 {
        let (a_l, a_r) = a.halves();
        let (b_l, b_r) = b.halves();
        let (g_l, g_r) = gs.halves();
        let (h_l, h_r) = hs.halves();

        let c_l = a_l.inner_product(&b_r);
        let c_r = a_r.inner_product(&b_l);
        let l = g_r.commit(&a_l) + h_l.commit(&b_r) + u * c_l;
        let r = g_l.commit(&a_r) + h_r.commit(&b_l) + u * c_r;

        transcript.append_point(&l);
        transcript.append_point(&r);
        let x = transcript.challenge_scalar();
        let x_inv = x.inverse().ok_or(ProverError::Construction("zero round challenge"))?;

        gs = &g_l.times(&x_inv) + &g_r.times(&x);
        hs = &h_l.times(&x) + &h_r.times(&x_inv);
        a = &a_l.times(&x) + &a_r.times(&x_inv);
        b = &b_l.times(&x_inv) + &b_r.times(&x);

        ls.push(l);
        rs.push(r);
    }

    Ok(InnerProductProof { l: ls, r: rs, a: a.as_slice()[0], b: b.as_slice()[0] })
}
