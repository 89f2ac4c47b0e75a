//! Deterministic statements, witnesses and fixtures for tests, benches and
//! the `gen_vectors` binary.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use zether_primitives::{
    Ciphertext, KeyPair, RedeemStatement, TransferStatement,
    bn128::{point_to_bytes, random_scalar},
    epoch_tag,
};

use crate::{ProverError, RedeemWitness, TransferWitness, redeem, transfer};

fn seeded(tag: u8) -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    ChaCha20Rng::from_seed(seed)
}

/// Account holding `balance`, redeeming `amount` of it.
pub fn demo_redeem(balance: u64, amount: u64, epoch: u64) -> (RedeemStatement, RedeemWitness) {
    let mut rng = seeded(1);
    let keys = KeyPair::from_secret(b"alice");
    let current = Ciphertext::encrypt(balance, &keys.y, &random_scalar(&mut rng));
    let after = current.sub_plain(amount);
    let statement =
        RedeemStatement { cln: after.C, crn: after.D, y: keys.y, epoch, sender: [0x11; 20] };
    let witness = RedeemWitness { sk: keys.x, b_diff: balance.wrapping_sub(amount) };
    (statement, witness)
}

/// Ring of `ring_size` accounts, each funded with `balance`; `index.0` sends
/// `amount` to `index.1`.
pub fn demo_transfer(
    ring_size: usize,
    index: (usize, usize),
    balance: u64,
    amount: u64,
    epoch: u64,
) -> Result<(TransferStatement, TransferWitness), ProverError> {
    let mut rng = seeded(2);
    let members: Vec<KeyPair> =
        (0..ring_size).map(|i| KeyPair::from_secret(format!("member-{i}").as_bytes())).collect();
    let keys: Vec<_> = members.iter().map(|k| k.y).collect();
    let balances: Vec<Ciphertext> = keys
        .iter()
        .map(|y| Ciphertext::encrypt(balance, y, &random_scalar(&mut rng)))
        .collect();
    let r = random_scalar(&mut rng);
    let statement = transfer::build_statement(&balances, &keys, index, amount, &r, epoch)?;
    let sender = members
        .get(index.0)
        .ok_or(ProverError::InvalidWitness("index out of range"))?;
    let witness = TransferWitness {
        sk: sender.x,
        r,
        b_transfer: amount,
        b_diff: balance.wrapping_sub(amount),
        index,
    };
    Ok((statement, witness))
}

#[derive(Debug, Serialize)]
pub struct RedeemFixture {
    pub cln: String,
    pub crn: String,
    pub y: String,
    pub epoch: u64,
    pub sender: String,
    pub proof: String,
    pub epoch_tag: String,
}

#[derive(Debug, Serialize)]
pub struct TransferFixture {
    pub cln: Vec<String>,
    pub crn: Vec<String>,
    pub c: Vec<String>,
    pub d: String,
    pub y: Vec<String>,
    pub epoch: u64,
    pub proof: String,
    pub epoch_tag: String,
}

#[derive(Debug, Serialize)]
pub struct Fixtures {
    pub redeem: RedeemFixture,
    pub transfer: Vec<TransferFixture>,
}

fn hex_points(ps: &[zether_primitives::Point]) -> Vec<String> {
    ps.iter().map(|p| hex::encode(point_to_bytes(p))).collect()
}

/// One redeem proof and a transfer proof per ring size 2, 4, 8.
pub fn some_valid_proofs() -> Result<Fixtures, ProverError> {
    let epoch = 7;

    let (rs, rw) = demo_redeem(1_000, 300, epoch);
    let proof = redeem::prove(&rs, &rw, &mut seeded(3))?;
    let redeem = RedeemFixture {
        cln: hex::encode(point_to_bytes(&rs.cln)),
        crn: hex::encode(point_to_bytes(&rs.crn)),
        y: hex::encode(point_to_bytes(&rs.y)),
        epoch,
        sender: hex::encode(rs.sender),
        proof: hex::encode(proof.to_bytes()),
        epoch_tag: hex::encode(point_to_bytes(&epoch_tag(&rw.sk, epoch))),
    };

    let mut transfers = Vec::new();
    for ring_size in [2usize, 4, 8] {
        let (ts, tw) = demo_transfer(ring_size, (0, ring_size - 1), 1_000, 250, epoch)?;
        let proof = transfer::prove(&ts, &tw, &mut seeded(4))?;
        transfers.push(TransferFixture {
            cln: hex_points(&ts.cln),
            crn: hex_points(&ts.crn),
            c: hex_points(&ts.c),
            d: hex::encode(point_to_bytes(&ts.d)),
            y: hex_points(&ts.y),
            epoch,
            proof: hex::encode(proof.to_bytes()),
            epoch_tag: hex::encode(point_to_bytes(&epoch_tag(&tw.sk, epoch))),
        });
    }

    Ok(Fixtures { redeem, transfer: transfers })
}
