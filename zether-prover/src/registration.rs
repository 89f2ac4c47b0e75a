//! Registration signature: `K = k·G`, `c = H(address, y, K)`, `s = k + c·x`.

use rand::{CryptoRng, RngCore};
use zether_primitives::{
    KeyPair, RegistrationSignature, bn128::random_scalar, generators::base_g,
    keys::registration_challenge,
};

pub fn sign<R: RngCore + CryptoRng>(
    address: &[u8; 20],
    keypair: &KeyPair,
    rng: &mut R,
) -> RegistrationSignature {
    let k = random_scalar(rng);
    let k_commit = base_g() * k;
    let c = registration_challenge(address, &keypair.y, &k_commit);
    RegistrationSignature { c, s: k + c * keypair.x }
}
