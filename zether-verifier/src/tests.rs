use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zether_primitives::{
    KeyPair,
    bn128::{point_to_bytes, random_scalar},
    constants::MAX_PLAIN,
    epoch_tag,
};
use zether_prover::{
    bench_vectors::{demo_redeem, demo_transfer},
    ipa::prove_inner_product,
    redeem, registration, transfer,
};

fn rng(tag: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([tag; 32])
}

fn flip_each(bytes: &[u8], mut check: impl FnMut(&[u8])) {
    for i in 0..bytes.len() {
        let mut tampered = bytes.to_vec();
        tampered[i] ^= 0x01;
        check(&tampered);
    }
}

// ===== Inner product =====

#[test]
fn inner_product_every_length() {
    let mut r = rng(1);
    for log_n in 0..=6 {
        let n = 1usize << log_n;
        let params = GeneratorParams::new(n);
        let a = FieldVector::new((0..n).map(|_| random_scalar(&mut r)).collect());
        let b = FieldVector::new((0..n).map(|_| random_scalar(&mut r)).collect());
        let u = params.g * random_scalar(&mut r);
        let p = params.gs.commit(&a) + params.hs.commit(&b) + u * a.inner_product(&b);

        let proof = prove_inner_product(
            &mut Transcript::new(),
            params.gs.clone(),
            params.hs.clone(),
            u,
            a,
            b,
        )
        .expect("prove");
        assert_eq!(proof.l.len(), log_n);

        let (gs, hs) = (params.gs.clone(), params.hs.clone());
        verify_inner_product(&mut Transcript::new(), gs, hs, u, p, &proof)
            .expect("honest proof verifies");

        let shifted = p + params.g;
        assert!(matches!(
            verify_inner_product(&mut Transcript::new(), params.gs, params.hs, u, shifted, &proof),
            Err(VerifierError::Rejected(_))
        ));
    }
}

#[test]
fn inner_product_rejects_wrong_round_count() {
    let params = GeneratorParams::new(4);
    let a = FieldVector::filled(Scalar::from(3u64), 4);
    let b = FieldVector::filled(Scalar::from(5u64), 4);
    let u = params.h;
    let p = params.gs.commit(&a) + params.hs.commit(&b) + u * a.inner_product(&b);
    let mut proof =
        prove_inner_product(&mut Transcript::new(), params.gs.clone(), params.hs.clone(), u, a, b)
            .unwrap();
    proof.l.pop();
    assert!(matches!(
        verify_inner_product(&mut Transcript::new(), params.gs, params.hs, u, p, &proof),
        Err(VerifierError::Malformed(_))
    ));
}

// ===== Redeem =====

#[test]
fn redeem_completeness_at_range_edges() {
    for (balance, amount) in [(500u64, 500u64), (MAX_PLAIN - 1, 0), (1_000, 1)] {
        let (st, wit) = demo_redeem(balance, amount, 12);
        let proof = redeem::prove(&st, &wit, &mut rng(2)).expect("prove");
        let tag = epoch_tag(&wit.sk, st.epoch);
        verify_redeem(&st, &tag, &proof).expect("honest redeem verifies");
        verify_redeem_bytes(&st, &point_to_bytes(&tag), &proof.to_bytes())
            .expect("byte-level redeem verifies");
    }
}

#[test]
fn redeem_rejects_tampering() {
    let (st, wit) = demo_redeem(800, 300, 5);
    let proof = redeem::prove(&st, &wit, &mut rng(3)).unwrap().to_bytes();
    let tag = point_to_bytes(&epoch_tag(&wit.sk, st.epoch));

    flip_each(&proof, |bad| {
        assert!(verify_redeem_bytes(&st, &tag, bad).is_err());
    });
    assert!(verify_redeem_bytes(&st, &tag, &proof[..proof.len() - 1]).is_err());
}

#[test]
fn redeem_rejects_wrong_statement() {
    let (st, wit) = demo_redeem(800, 300, 5);
    let proof = redeem::prove(&st, &wit, &mut rng(3)).unwrap();
    let tag = epoch_tag(&wit.sk, st.epoch);

    let mut next_epoch = st.clone();
    next_epoch.epoch += 1;
    assert!(verify_redeem(&next_epoch, &tag, &proof).is_err());

    let stale_tag = epoch_tag(&wit.sk, st.epoch + 1);
    assert!(matches!(verify_redeem(&st, &stale_tag, &proof), Err(VerifierError::Rejected(_))));

    let mut other_sender = st.clone();
    other_sender.sender = [0x22; 20];
    assert!(verify_redeem(&other_sender, &tag, &proof).is_err());
}

// ===== Transfer =====

#[test]
fn transfer_completeness_per_ring_size() {
    for (ring, index) in [(2usize, (0usize, 1usize)), (4, (3, 0)), (8, (2, 5))] {
        let (st, wit) = demo_transfer(ring, index, 1_000, 250, 3).unwrap();
        let proof = transfer::prove(&st, &wit, &mut rng(4)).expect("prove");
        let tag = epoch_tag(&wit.sk, st.epoch);
        verify_transfer(&st, &tag, &proof).expect("honest transfer verifies");
        verify_transfer_bytes(&st, &point_to_bytes(&tag), &proof.to_bytes())
            .expect("byte-level transfer verifies");
    }
}

#[test]
fn transfer_completeness_at_range_edges() {
    // bDiff = MAX_PLAIN - 1, then the whole maximal balance with bDiff = 0
    for amount in [1, MAX_PLAIN] {
        let (st, wit) = demo_transfer(4, (0, 1), MAX_PLAIN, amount, 3).unwrap();
        assert_eq!(wit.b_diff, MAX_PLAIN - amount);
        let proof = transfer::prove(&st, &wit, &mut rng(10)).expect("prove");
        let tag = epoch_tag(&wit.sk, st.epoch);
        verify_transfer(&st, &tag, &proof).expect("honest transfer verifies");
        verify_transfer_bytes(&st, &point_to_bytes(&tag), &proof.to_bytes())
            .expect("byte-level transfer verifies");
    }
}

#[test]
fn transfer_of_whole_balance_verifies() {
    let (st, wit) = demo_transfer(4, (1, 2), 640, 640, 9).unwrap();
    let proof = transfer::prove(&st, &wit, &mut rng(5)).unwrap();
    verify_transfer(&st, &epoch_tag(&wit.sk, st.epoch), &proof).expect("verifies");
}

#[test]
fn transfer_rejects_tampering() {
    let (st, wit) = demo_transfer(4, (0, 3), 100, 40, 2).unwrap();
    let proof = transfer::prove(&st, &wit, &mut rng(6)).unwrap().to_bytes();
    let tag = point_to_bytes(&epoch_tag(&wit.sk, st.epoch));

    flip_each(&proof, |bad| {
        assert!(verify_transfer_bytes(&st, &tag, bad).is_err());
    });
}

#[test]
fn transfer_rejects_wrong_statement() {
    let (st, wit) = demo_transfer(4, (0, 3), 100, 40, 2).unwrap();
    let proof = transfer::prove(&st, &wit, &mut rng(6)).unwrap();
    let tag = epoch_tag(&wit.sk, st.epoch);

    let stale_tag = epoch_tag(&wit.sk, st.epoch + 1);
    assert!(verify_transfer(&st, &stale_tag, &proof).is_err());

    // reordering the ring changes the transcript
    let mut swapped = st.clone();
    swapped.y.swap(1, 2);
    assert!(verify_transfer(&swapped, &tag, &proof).is_err());

    // a proof for a 4-ring cannot be read against an 8-ring
    let (big, _) = demo_transfer(8, (0, 3), 100, 40, 2).unwrap();
    assert!(matches!(
        verify_transfer_bytes(&big, &point_to_bytes(&tag), &proof.to_bytes()),
        Err(VerifierError::Decode(_))
    ));
}

// ===== Registration =====

#[test]
fn registration_round_trip() {
    let keys = KeyPair::generate(&mut rng(7));
    let address = [0x5a; 20];
    let sig = registration::sign(&address, &keys, &mut rng(8));
    verify_registration(&address, &keys.y, &sig).expect("valid signature");

    let other = [0x5b; 20];
    assert!(verify_registration(&other, &keys.y, &sig).is_err());
    let mut forged = sig;
    forged.s += Scalar::from(1u64);
    assert!(verify_registration(&address, &keys.y, &forged).is_err());
}

#[test]
fn decode_points_rejects_off_curve() {
    let good = point_to_bytes(&zether_primitives::generators::base_g());
    let mut bad = good;
    bad[63] ^= 1;
    assert_eq!(decode_points(&[good]).unwrap().len(), 1);
    assert!(matches!(decode_points(&[good, bad]), Err(VerifierError::Decode(_))));
}
