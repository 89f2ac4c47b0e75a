//! Anonymous transfer: a packed 64-bit range proof over `(bTransfer, bDiff)`
//! plus a one-of-many argument that hides which ring members are the sender
//! and the receiver.

use ark_ff::{Field, One};
use rand::{CryptoRng, RngCore};
use zether_primitives::{
    Ciphertext, FieldVector, GeneratorParams, GeneratorVector, Point, Scalar, TransferProof,
    TransferStatement,
    anonymity::{
        coefficient_vectors, fold_rotations, index_polynomials, ring_depth, shift_weights,
    },
    bn128::{pow, random_scalar},
    constants::{BITS_PER_AMOUNT, MAX_ANONYMITY_DEPTH, MAX_PLAIN, TRANSFER_BITS},
    epoch_generator,
    generators::base_g,
};

use crate::{ProverError, range::commit_bits};

#[derive(Clone, Debug)]
pub struct TransferWitness {
    pub sk: Scalar,
    /// Randomness shared by every `C_i` and by `D`.
    pub r: Scalar,
    pub b_transfer: u64,
    /// Sender balance after the transfer.
    pub b_diff: u64,
    /// `(sender, receiver)` positions in the ring.
    pub index: (usize, usize),
}

/// Ring shape, index and amount checks. Returns the ring depth `m`.
pub fn validate_shape(
    statement: &TransferStatement,
    witness: &TransferWitness,
) -> Result<usize, ProverError> {
    let n = statement.ring_size();
    let m = ring_depth(n)
        .ok_or(ProverError::InvalidWitness("anonymity set size must be a power of two >= 2"))?;
    if m > MAX_ANONYMITY_DEPTH {
        return Err(ProverError::InvalidWitness("anonymity set too large"));
    }
    if !statement.is_well_formed() {
        return Err(ProverError::InvalidWitness("ring arrays differ in length"));
    }
    let (sender, receiver) = witness.index;
    if sender >= n || receiver >= n {
        return Err(ProverError::InvalidWitness("index out of range"));
    }
    if sender % 2 == receiver % 2 {
        return Err(ProverError::InvalidWitness("sender and receiver need opposite parity"));
    }
    if witness.b_transfer > MAX_PLAIN || witness.b_diff > MAX_PLAIN {
        return Err(ProverError::InvalidWitness("amount exceeds 32 bits"));
    }
    Ok(m)
}

/// Full validation: shape plus consistency of keys, `C`, `D` and the
/// sender's new balance. Draws no randomness.
pub fn validate(
    statement: &TransferStatement,
    witness: &TransferWitness,
) -> Result<usize, ProverError> {
    let m = validate_shape(statement, witness)?;
    let (sender, receiver) = witness.index;
    let g = base_g();
    if g * witness.sk != statement.y[sender] {
        return Err(ProverError::InvalidWitness("secret key does not match sender key"));
    }
    if g * witness.r != statement.d {
        return Err(ProverError::InvalidWitness("D does not match randomness"));
    }
    let amount = g * Scalar::from(witness.b_transfer);
    for (i, (c, y)) in statement.c.iter().zip(&statement.y).enumerate() {
        let mut expected = *y * witness.r;
        if i == sender {
            expected -= amount;
        } else if i == receiver {
            expected += amount;
        }
        if *c != expected {
            return Err(ProverError::InvalidWitness("transfer ciphertext mismatch"));
        }
    }
    let plain = statement.cln[sender] - statement.crn[sender] * witness.sk;
    if plain != g * Scalar::from(witness.b_diff) {
        return Err(ProverError::InvalidWitness("remaining balance does not match ciphertext"));
    }
    Ok(m)
}

/// Build the public side of a transfer from the ring's current balances:
/// `C_i = ±amount·G + r·y_i`, `D = r·G`, `CLn_i = CL_i + C_i`, `CRn_i = CR_i + D`.
pub fn build_statement(
    balances: &[Ciphertext],
    keys: &[Point],
    index: (usize, usize),
    amount: u64,
    r: &Scalar,
    epoch: u64,
) -> Result<TransferStatement, ProverError> {
    let n = keys.len();
    if balances.len() != n {
        return Err(ProverError::InvalidWitness("ring arrays differ in length"));
    }
    let (sender, receiver) = index;
    if sender >= n || receiver >= n || sender == receiver {
        return Err(ProverError::InvalidWitness("index out of range"));
    }
    if amount > MAX_PLAIN {
        return Err(ProverError::InvalidWitness("amount exceeds 32 bits"));
    }

    let g = base_g();
    let d = g * r;
    let value = g * Scalar::from(amount);
    let c: Vec<Point> = keys
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let blinded = *y * r;
            match i {
                i if i == sender => blinded - value,
                i if i == receiver => blinded + value,
                _ => blinded,
            }
        })
        .collect();

    Ok(TransferStatement {
        cln: balances.iter().zip(&c).map(|(b, c)| b.C + c).collect(),
        crn: balances.iter().map(|b| b.D + d).collect(),
        c,
        d,
        y: keys.to_vec(),
        epoch,
    })
}

/// Bits of both indices, low `m` for the sender, high `m` for the receiver.
fn index_bits(index: (usize, usize), m: usize) -> FieldVector {
    let (sender, receiver) = index;
    let bits = |v: usize| (0..m).map(move |j| Scalar::from(((v >> j) & 1) as u64));
    FieldVector::new(bits(sender).chain(bits(receiver)).collect())
}

fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| random_scalar(rng)).collect()
}

/// `Σ_k w^k·s_k`.
fn weighted(w_pows: &FieldVector, s: &[Scalar]) -> Scalar {
    w_pows.as_slice().iter().zip(s).map(|(w, s)| *w * s).sum()
}

pub fn prove<R: RngCore + CryptoRng>(
    statement: &TransferStatement,
    witness: &TransferWitness,
    rng: &mut R,
) -> Result<TransferProof, ProverError> {
    let m = validate(statement, witness).inspect_err(|e| crate::log_rejection("transfer", e))?;
    let n = statement.ring_size();
    let (sender, receiver) = witness.index;

    let params = GeneratorParams::new(TRANSFER_BITS);
    let g = params.g;
    let (mut transcript, _) = statement.transcript();

    // ===== Range and ring-bit commitments =====
    let packed = witness.b_transfer | (witness.b_diff << BITS_PER_AMOUNT);
    let bits = commit_bits(&params, packed, rng);

    let a = FieldVector::new(random_scalars(rng, 2 * m));
    let b = index_bits(witness.index, m);
    let one = Scalar::one();
    let c_vec = a.hadamard(&b.times(&-Scalar::from(2u64)).plus(&one));
    let d_vec = a.hadamard(&a).negate();
    let (a0, am) = (a.as_slice()[0], a.as_slice()[m]);
    let e_vec = FieldVector::new(vec![a0 * am, a0 * am]);
    let sender_low = sender & 1;
    let receiver_low = receiver & 1;
    let f_vec =
        FieldVector::new(vec![a.as_slice()[sender_low * m], -a.as_slice()[receiver_low * m]]);

    let r_a = random_scalar(rng);
    let r_b = random_scalar(rng);
    let big_a = params.commit_left(&r_a, &a.concat(&d_vec).concat(&e_vec));
    let big_b = params.commit_left(&r_b, &b.concat(&c_vec).concat(&f_vec));

    for p in [bits.ba, bits.bs, big_a, big_b] {
        transcript.append_point(&p);
    }
    let v = transcript.challenge_scalar();

    // ===== Index polynomials and blinded cross terms =====
    let p_leaves = index_polynomials(&a.as_slice()[..m], &b.as_slice()[..m]);
    let q_leaves = index_polynomials(&a.as_slice()[m..], &b.as_slice()[m..]);
    let p_coeffs = coefficient_vectors(&p_leaves, m);
    let q_coeffs = coefficient_vectors(&q_leaves, m);

    let phi = random_scalars(rng, m);
    let chi = random_scalars(rng, m);
    let psi = random_scalars(rng, m);
    let omega = random_scalars(rng, m);

    let cln = GeneratorVector::new(statement.cln.clone());
    let crn = GeneratorVector::new(statement.crn.clone());
    let cs = GeneratorVector::new(statement.c.clone());
    let ys = GeneratorVector::new(statement.y.clone());
    let y_sender = statement.y[sender];
    let weights = shift_weights(&v, n);
    let b_transfer = Scalar::from(witness.b_transfer);

    let mut cln_g = Vec::with_capacity(m);
    let mut crn_g = Vec::with_capacity(m);
    let mut c_0g = Vec::with_capacity(m);
    let mut d_g = Vec::with_capacity(m);
    let mut y_0g = Vec::with_capacity(m);
    let mut g_g = Vec::with_capacity(m);
    let mut c_xg = Vec::with_capacity(m);
    let mut y_xg = Vec::with_capacity(m);
    for k in 0..m {
        let pk = &p_coeffs[k];
        cln_g.push(cln.commit(pk) + y_sender * phi[k]);
        crn_g.push(crn.commit(pk) + g * phi[k]);
        c_0g.push(cs.commit(pk) + y_sender * chi[k]);
        d_g.push(g * chi[k]);
        y_0g.push(ys.commit(pk) + y_sender * psi[k]);
        g_g.push(g * psi[k]);

        // amount terms of every rotation, at the sender and receiver slots
        let folded = fold_rotations(&weights, pk.as_slice(), q_coeffs[k].as_slice());
        let shift = folded.as_slice()[receiver] - folded.as_slice()[sender];
        c_xg.push(statement.d * omega[k] + g * (b_transfer * shift));
        y_xg.push(g * omega[k]);
    }

    for row in [&cln_g, &crn_g, &c_0g, &d_g, &y_0g, &g_g, &c_xg, &y_xg] {
        transcript.append_points(row);
    }
    let w = transcript.challenge_scalar();

    let f = &b.times(&w) + &a;
    let z_a = r_b * w + r_a;

    // ===== Range polynomial =====
    let y = transcript.challenge_scalar();
    let z = transcript.challenge_scalar();
    let poly = bits.polynomial(&params, &y, &z, rng);
    transcript.append_point(&poly.t1);
    transcript.append_point(&poly.t2);
    let (t1, t2) = (poly.t1, poly.t2);
    let x = transcript.challenge_scalar();

    let z2 = z.square();
    let z3 = z2 * z;
    let value_term = z2 * b_transfer + z3 * Scalar::from(witness.b_diff);
    let eval = poly.evaluate(&bits, &x, &value_term)?;

    // ===== Ring-opened values =====
    let w_pows = FieldVector::powers(&w, m);
    let w_m = pow(&w, m as u64);
    let crn_r = statement.crn[sender] * w_m - g * weighted(&w_pows, &phi);
    let d_r = statement.d * w_m - g * weighted(&w_pows, &chi);
    let psi_w = w_m - weighted(&w_pows, &psi);
    let y_0r = y_sender * psi_w;
    let g_r = g * psi_w;

    let p_eval: Vec<Scalar> = p_leaves.iter().map(|p| p.evaluate(&w)).collect();
    let q_eval: Vec<Scalar> = q_leaves.iter().map(|q| q.evaluate(&w)).collect();
    let y_xg_w: Point = y_xg.iter().zip(w_pows.as_slice()).map(|(p, wk)| *p * wk).sum();
    let y_xr = ys.commit(&fold_rotations(&weights, &p_eval, &q_eval)) - y_xg_w;

    // ===== Sigma protocol =====
    let u = epoch_generator(statement.epoch);
    let k_sk = random_scalar(rng);
    let k_r = random_scalar(rng);
    let k_b = random_scalar(rng);
    let k_tau = random_scalar(rng);

    let a_y = g_r * k_sk;
    let a_d = g * k_r;
    let a_b = g * k_b + (d_r * (-z2) + crn_r * z3) * k_sk;
    let a_x = y_xr * k_r;
    let a_t = params.h * k_tau - g * k_b;
    let a_u = u * k_sk;
    for p in [a_y, a_d, a_b, a_x, a_t, a_u] {
        transcript.append_point(&p);
    }
    let c = transcript.challenge_scalar();

    let s_sk = k_sk + c * witness.sk;
    let s_r = k_r + c * witness.r;
    let s_b = k_b + c * w_m * value_term;
    let s_tau = k_tau + c * w_m * eval.tau_x;
    let (t_hat, mu) = (eval.t_hat, eval.mu);

    // ===== Inner product =====
    let ipa = eval.prove_ipa(&mut transcript, &params)?;

    Ok(TransferProof {
        ba: bits.ba,
        bs: bits.bs,
        a: big_a,
        b: big_b,
        cln_g,
        crn_g,
        c_0g,
        d_g,
        y_0g,
        g_g,
        c_xg,
        y_xg,
        f: f.0,
        z_a,
        t1,
        t2,
        t_hat,
        mu,
        c,
        s_sk,
        s_r,
        s_b,
        s_tau,
        ipa,
    })
}
