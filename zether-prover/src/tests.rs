use crate::bench_vectors::{demo_redeem, demo_transfer};
use crate::*;
use proptest::prelude::*;
use rand::{CryptoRng, RngCore};
use zether_primitives::{
    Scalar,
    bn128::point_to_bytes,
    constants::MAX_PLAIN,
    generators::base_g,
    proofs::{redeem_proof_len, transfer_proof_len},
};

/// Counts draws so tests can assert rejected inputs consume no randomness.
struct CountingRng {
    inner: ChaCha20Rng,
    draws: usize,
}

impl CountingRng {
    fn new(tag: u8) -> Self {
        Self { inner: ChaCha20Rng::from_seed([tag; 32]), draws: 0 }
    }
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dst)
    }
}

impl CryptoRng for CountingRng {}

// ===== Redeem =====

#[test]
fn redeem_proof_has_fixed_length() {
    let (st, wit) = demo_redeem(500, 120, 3);
    let mut rng = CountingRng::new(1);
    let proof = redeem::prove(&st, &wit, &mut rng).expect("redeem prove");
    assert_eq!(proof.to_bytes().len(), redeem_proof_len());
    assert_eq!(proof.ipa.l.len(), 5);
    assert!(rng.draws > 0);
}

#[test]
fn redeem_rejects_out_of_range_balance_before_randomness() {
    // bDiff = 2^32 is just past the range
    let (mut st, mut wit) = demo_redeem(500, 0, 3);
    wit.b_diff = MAX_PLAIN + 1;
    let mut rng = CountingRng::new(1);
    let err = redeem::prove(&st, &wit, &mut rng).unwrap_err();
    assert!(matches!(err, ProverError::InvalidWitness(_)));
    assert_eq!(rng.draws, 0);

    // overdrawn: balance 10, redeem 11 wraps far past the range
    let (st2, wit2) = demo_redeem(10, 11, 3);
    assert!(matches!(
        redeem::prove(&st2, &wit2, &mut rng),
        Err(ProverError::InvalidWitness(_))
    ));
    assert_eq!(rng.draws, 0);

    st.y = base_g();
    wit.b_diff = 500;
    assert!(matches!(
        redeem::prove(&st, &wit, &mut rng),
        Err(ProverError::InvalidWitness("secret key does not match public key"))
    ));
    assert_eq!(rng.draws, 0);
}

#[test]
fn redeem_rejects_inconsistent_balance() {
    let (st, mut wit) = demo_redeem(500, 100, 3);
    wit.b_diff = 401;
    assert!(matches!(
        redeem::validate(&st, &wit),
        Err(ProverError::InvalidWitness("remaining balance does not match ciphertext"))
    ));
}

#[test]
fn same_seed_same_proof() {
    let (st, wit) = demo_redeem(77, 7, 9);
    let a = redeem::prove(&st, &wit, &mut ChaCha20Rng::from_seed([5; 32])).unwrap();
    let b = redeem::prove(&st, &wit, &mut ChaCha20Rng::from_seed([5; 32])).unwrap();
    let c = redeem::prove(&st, &wit, &mut ChaCha20Rng::from_seed([6; 32])).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.to_bytes(), c.to_bytes());
    // the statement challenge depends only on public inputs
    assert_eq!(st.transcript().1, st.clone().transcript().1);
}

#[test]
fn byte_level_redeem() {
    let (st, wit) = demo_redeem(1_000, 1, 4);
    let input = RedeemInput {
        cln: point_to_bytes(&st.cln),
        crn: point_to_bytes(&st.crn),
        y: point_to_bytes(&st.y),
        epoch: st.epoch,
        sender: st.sender,
        sk: zether_primitives::bn128::scalar_to_bytes(&wit.sk),
        b_diff: wit.b_diff,
        rng_seed: Some([9; 32]),
    };
    let out = prove_redeem(&input).expect("prove");
    assert_eq!(out.proof.len(), redeem_proof_len());
    assert_eq!(
        out.epoch_tag,
        point_to_bytes(&zether_primitives::epoch_tag(&wit.sk, st.epoch)).to_vec()
    );
    assert_eq!(prove_redeem(&input).unwrap(), out);

    let mut bad = input.clone();
    bad.y[63] ^= 1;
    assert!(matches!(prove_redeem(&bad), Err(ProverError::Decode(_))));

    let mut unseeded = input.clone();
    unseeded.rng_seed = None;
    assert_eq!(prove_redeem(&unseeded).unwrap().proof.len(), redeem_proof_len());

    let mut overstated = input;
    overstated.b_diff += 1;
    assert!(matches!(
        prove_redeem(&overstated),
        Err(ProverError::InvalidWitness("remaining balance does not match ciphertext"))
    ));
}

// ===== Transfer =====

#[test]
fn transfer_proof_has_fixed_length() {
    for (ring, m) in [(2usize, 1usize), (4, 2), (8, 3)] {
        let (st, wit) = demo_transfer(ring, (0, ring - 1), 100, 40, 1).unwrap();
        let proof = transfer::prove(&st, &wit, &mut CountingRng::new(2)).expect("transfer prove");
        assert_eq!(proof.depth(), m);
        assert_eq!(proof.f.len(), 2 * m);
        assert_eq!(proof.ipa.l.len(), 6);
        assert_eq!(proof.to_bytes().len(), transfer_proof_len(m));
    }
}

#[test]
fn transfer_rejects_non_power_of_two_ring() {
    let (st, wit) = demo_transfer(3, (0, 1), 100, 40, 1).unwrap();
    let mut rng = CountingRng::new(3);
    let err = transfer::prove(&st, &wit, &mut rng).unwrap_err();
    assert!(matches!(err, ProverError::InvalidWitness(_)));
    assert_eq!(rng.draws, 0);
}

#[test]
fn transfer_rejects_bad_indices() {
    let (st, mut wit) = demo_transfer(4, (0, 1), 100, 40, 1).unwrap();
    let mut rng = CountingRng::new(3);

    wit.index = (0, 2);
    assert!(matches!(
        transfer::prove(&st, &wit, &mut rng),
        Err(ProverError::InvalidWitness("sender and receiver need opposite parity"))
    ));
    wit.index = (0, 5);
    assert!(matches!(
        transfer::prove(&st, &wit, &mut rng),
        Err(ProverError::InvalidWitness("index out of range"))
    ));
    assert_eq!(rng.draws, 0);
}

#[test]
fn transfer_rejects_overdraft_and_oversized_amount() {
    let (st, wit) = demo_transfer(2, (1, 0), 30, 31, 1).unwrap();
    let mut rng = CountingRng::new(4);
    assert!(matches!(
        transfer::prove(&st, &wit, &mut rng),
        Err(ProverError::InvalidWitness("amount exceeds 32 bits"))
    ));

    assert!(matches!(
        demo_transfer(2, (1, 0), 30, MAX_PLAIN + 1, 1),
        Err(ProverError::InvalidWitness(_))
    ));
    assert_eq!(rng.draws, 0);
}

#[test]
fn transfer_rejects_wrong_randomness() {
    let (st, mut wit) = demo_transfer(2, (0, 1), 30, 3, 1).unwrap();
    wit.r += Scalar::from(1u64);
    assert!(matches!(
        transfer::validate(&st, &wit),
        Err(ProverError::InvalidWitness("D does not match randomness"))
    ));
}

#[test]
fn byte_level_transfer_matches_typed_call() {
    let (st, wit) = demo_transfer(4, (2, 1), 90, 45, 11).unwrap();
    let enc = |ps: &[zether_primitives::Point]| ps.iter().map(point_to_bytes).collect::<Vec<_>>();
    let input = TransferInput {
        cln: enc(&st.cln),
        crn: enc(&st.crn),
        c: enc(&st.c),
        d: point_to_bytes(&st.d),
        y: enc(&st.y),
        epoch: st.epoch,
        sk: zether_primitives::bn128::scalar_to_bytes(&wit.sk),
        r: zether_primitives::bn128::scalar_to_bytes(&wit.r),
        b_transfer: wit.b_transfer,
        b_diff: wit.b_diff,
        index: wit.index,
        rng_seed: Some([1; 32]),
    };
    let out = prove_transfer(&input).expect("prove");
    let typed = transfer::prove(&st, &wit, &mut ChaCha20Rng::from_seed([1; 32])).unwrap();
    assert_eq!(out.proof, typed.to_bytes());

    let mut same_parity = input.clone();
    same_parity.index = (2, 0);
    assert!(matches!(prove_transfer(&same_parity), Err(ProverError::InvalidWitness(_))));

    let mut wrong_key = input;
    wrong_key.sk = zether_primitives::bn128::scalar_to_bytes(&(wit.sk + Scalar::from(1u64)));
    assert!(matches!(
        prove_transfer(&wrong_key),
        Err(ProverError::InvalidWitness(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn built_statements_validate(
        balance in 0u64..=MAX_PLAIN,
        amount in 0u64..=MAX_PLAIN,
        receiver in prop::sample::select(vec![1usize, 3, 5, 7]),
    ) {
        prop_assume!(amount <= balance);
        let (st, wit) = demo_transfer(8, (0, receiver), balance, amount, 2).unwrap();
        prop_assert_eq!(transfer::validate(&st, &wit).unwrap(), 3);
    }
}

// ===== Registration =====

#[test]
fn registration_signature_verifies_algebraically() {
    let keys = KeyPair::from_secret(b"alice");
    let address = [0x42; 20];
    let bytes = sign_registration(
        &address,
        &zether_primitives::bn128::scalar_to_bytes(&keys.x),
        Some([3; 32]),
    )
    .unwrap();
    let sig = zether_primitives::RegistrationSignature::from_bytes(&bytes).unwrap();
    let k_commit = base_g() * sig.s - keys.y * sig.c;
    assert_eq!(
        zether_primitives::keys::registration_challenge(&address, &keys.y, &k_commit),
        sig.c
    );
}

// ===== Fixtures =====

#[test]
fn fixtures_serialize() {
    let fixtures = bench_vectors::some_valid_proofs().unwrap();
    assert_eq!(fixtures.transfer.len(), 3);
    let json = serde_json::to_string(&fixtures).unwrap();
    assert!(json.contains("\"epoch_tag\""));
    assert_eq!(fixtures.redeem.proof.len(), 2 * redeem_proof_len());
}
