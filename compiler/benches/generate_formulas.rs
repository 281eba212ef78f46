use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYMBOLS: &[&str] = &[
    "H", "He", "C", "N", "O", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "K", "Ca", "Fe", "Cu",
];

fn unit(rng: &mut StdRng, depth: u32, out: &mut String) {
    if depth == 0 || rng.gen_bool(0.7) {
        out.push_str(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]);
    } else {
        out.push('(');
        for _ in 0..rng.gen_range(1..4) {
            unit(rng, depth - 1, out);
        }
        out.push(')');
    }
    if rng.gen_bool(0.5) {
        out.push_str(&rng.gen_range(2..10).to_string());
    }
}

fn formula(rng: &mut StdRng) -> String {
    let mut out = String::new();
    for _ in 0..rng.gen_range(1..6) {
        unit(rng, 3, &mut out);
    }
    out
}

fn main() -> std::io::Result<()> {
    let mut args = env::args().skip(1);
    let output_path = args
        .next()
        .unwrap_or_else(|| "benches/formulas.txt".to_string());
    let count: usize = args.next().and_then(|n| n.parse().ok()).unwrap_or(100_000);

    let mut rng = StdRng::seed_from_u64(42);
    let mut file = BufWriter::new(File::create(&output_path)?);
    for _ in 0..count {
        writeln!(file, "{}", formula(&mut rng))?;
    }
    file.flush()?;

    println!("Generated formula file: {output_path} ({count} formulas)");
    Ok(())
}
