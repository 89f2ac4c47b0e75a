//! Bulletproofs-style range argument shared by redeem and transfer.
//!
//! The proved value is a little-endian bit vector `aL` of one 32-bit amount
//! (redeem) or two packed amounts (transfer). Steps follow the protocol:
//! bit commitments, the `t(X)` coefficient commitments, evaluation at `x`,
//! and finally the inner-product argument over `(l(x), r(x))`.

use ark_ff::{Field, One};
use rand::{CryptoRng, RngCore};
use zether_primitives::{
    FieldVector, GeneratorParams, InnerProductProof, Point, Scalar, Transcript,
    algebra::{range_delta, twos_times_zs},
    bn128::random_scalar,
    constants::BITS_PER_AMOUNT,
};

use crate::{ProverError, ipa::prove_inner_product};

fn random_vector<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> FieldVector {
    FieldVector::new((0..n).map(|_| random_scalar(rng)).collect())
}

/// `BA`, `BS` and their openings.
pub(crate) struct BitCommitments {
    al: FieldVector,
    ar: FieldVector,
    sl: FieldVector,
    sr: FieldVector,
    alpha: Scalar,
    rho: Scalar,
    pub ba: Point,
    pub bs: Point,
}

pub(crate) fn commit_bits<R: RngCore + CryptoRng>(
    params: &GeneratorParams,
    value: u64,
    rng: &mut R,
) -> BitCommitments {
    let n = params.size();
    let al = FieldVector::bits(value, n);
    let ar = al.plus(&-Scalar::one());
    let alpha = random_scalar(rng);
    let ba = params.commit(&alpha, &al, &ar);

    let sl = random_vector(rng, n);
    let sr = random_vector(rng, n);
    let rho = random_scalar(rng);
    let bs = params.commit(&rho, &sl, &sr);

    BitCommitments { al, ar, sl, sr, alpha, rho, ba, bs }
}

/// `l(X) = l0 + l1·X`, `r(X) = r0 + r1·X` and the commitments `T1`, `T2`.
pub(crate) struct PolyCommitments {
    l0: FieldVector,
    l1: FieldVector,
    r0: FieldVector,
    r1: FieldVector,
    ys: FieldVector,
    delta: Scalar,
    t_coeffs: [Scalar; 3],
    tau1: Scalar,
    tau2: Scalar,
    pub t1: Point,
    pub t2: Point,
}

impl BitCommitments {
    pub(crate) fn polynomial<R: RngCore + CryptoRng>(
        &self,
        params: &GeneratorParams,
        y: &Scalar,
        z: &Scalar,
        rng: &mut R,
    ) -> PolyCommitments {
        let n = params.size();
        let amounts = n / BITS_PER_AMOUNT;
        let ys = FieldVector::powers(y, n);
        let twos = twos_times_zs(z, amounts);

        let l0 = self.al.plus(&-*z);
        let l1 = self.sl.clone();
        let r0 = &ys.hadamard(&self.ar.plus(z)) + &twos;
        let r1 = self.sr.hadamard(&ys);

        let t0 = l0.inner_product(&r0);
        let t1 = l0.inner_product(&r1) + l1.inner_product(&r0);
        let t2 = l1.inner_product(&r1);
        let tau1 = random_scalar(rng);
        let tau2 = random_scalar(rng);

        PolyCommitments {
            delta: range_delta(y, z, amounts),
            t_coeffs: [t0, t1, t2],
            t1: params.g * t1 + params.h * tau1,
            t2: params.g * t2 + params.h * tau2,
            l0,
            l1,
            r0,
            r1,
            ys,
            tau1,
            tau2,
        }
    }
}

/// Values revealed after the evaluation challenge `x`.
pub(crate) struct Evaluation {
    lx: FieldVector,
    rx: FieldVector,
    ys: FieldVector,
    pub t_hat: Scalar,
    pub tau_x: Scalar,
    pub mu: Scalar,
}

impl PolyCommitments {
    /// Evaluate at `x`. `value_term` is `⟨aL, twos_times_zs⟩`, the part of
    /// `t(0)` the sigma protocol binds to the ciphertexts.
    pub(crate) fn evaluate(
        self,
        bits: &BitCommitments,
        x: &Scalar,
        value_term: &Scalar,
    ) -> Result<Evaluation, ProverError> {
        let lx = &self.l0 + &self.l1.times(x);
        let rx = &self.r0 + &self.r1.times(x);
        let t_hat = lx.inner_product(&rx);
        let [t0, t1, t2] = self.t_coeffs;
        let x2 = x.square();

        // t(0) must come out as value_term + δ for a valid bit vector.
        if t0 != *value_term + self.delta {
            return Err(ProverError::Construction("range polynomial constant term"));
        }
        if t_hat != t0 + t1 * x + t2 * x2 {
            return Err(ProverError::Construction("tHat does not match t(x)"));
        }

        Ok(Evaluation {
            t_hat,
            tau_x: self.tau1 * x + self.tau2 * x2,
            mu: bits.alpha + bits.rho * x,
            lx,
            rx,
            ys: self.ys,
        })
    }
}

impl Evaluation {
    /// Draw `o`, then run the inner-product argument on
    /// `(G⃗, H⃗∘y⁻ⁿ)` with `u_x = o·G`.
    pub(crate) fn prove_ipa(
        self,
        transcript: &mut Transcript,
        params: &GeneratorParams,
    ) -> Result<InnerProductProof, ProverError> {
        let o = transcript.challenge_scalar();
        let u_x = params.g * o;
        let ys_inv = self.ys.invert().ok_or(ProverError::Construction("zero y challenge"))?;
        let h_primes = params.hs.hadamard(&ys_inv);
        prove_inner_product(transcript, params.gs.clone(), h_primes, u_x, self.lx, self.rx)
    }
}
