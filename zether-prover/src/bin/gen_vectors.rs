use std::{env, fs, path::PathBuf};

use zether_prover::bench_vectors::some_valid_proofs;

/// Write deterministic proof fixtures as JSON, to the path given as the first
/// argument or to stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = some_valid_proofs()?;
    let json = serde_json::to_string_pretty(&fixtures)?;
    match env::args().nth(1).map(PathBuf::from) {
        Some(dst) => {
            fs::write(&dst, json)?;
            eprintln!("Wrote {}", dst.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
