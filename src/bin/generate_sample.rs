//! Writes a synthetic classifier run for trying out `mvsc-plot-cuts`:
//! `sample_results.pat`, `sample_zerolag.pat` and `sample_trees.txt`.

use std::fmt::Write as _;

use anyhow::{Context, Result};

const DIMENSIONS: [&str; 4] = ["snr", "chisq", "eff_distance", "dt"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Log-uniform draw in `[lo, hi)`.
    fn log_uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (lo.ln() + self.next_f64() * (hi.ln() - lo.ln())).exp()
    }
}

/// One trigger's values for `DIMENSIONS`, in that order.
fn trigger(rng: &mut SimpleRng, injection: bool) -> [f64; 4] {
    if injection {
        let snr = rng.log_uniform(8.0, 200.0);
        [
            snr,
            rng.log_uniform(0.5, 3.0) * snr.sqrt(),
            rng.log_uniform(1.0, 300.0),
            rng.log_uniform(1e-4, 5e-3),
        ]
    } else {
        let snr = rng.log_uniform(5.5, 20.0);
        [
            snr,
            rng.log_uniform(2.0, 20.0) * snr.sqrt(),
            rng.log_uniform(5.0, 500.0),
            rng.log_uniform(1e-3, 1e-2),
        ]
    }
}

fn pattern_file(rng: &mut SimpleRng, rows: usize, injection_every: usize) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "index class {}", DIMENSIONS.join(" "))?;
    for i in 0..rows {
        let injection = injection_every > 0 && i % injection_every == 0;
        let dims = trigger(rng, injection);
        write!(out, "{i} {}", u8::from(injection))?;
        for v in dims {
            write!(out, " {v:.6}")?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn tree_file(rng: &mut SimpleRng, n_cuts: usize) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Trained SprBaggerDecisionTree with {n_cuts} splits")?;
    for id in 0..n_cuts {
        let dim = (rng.next_u64() % DIMENSIONS.len() as u64) as usize;
        let cut = match DIMENSIONS[dim] {
            "snr" => rng.log_uniform(6.0, 40.0),
            "chisq" => rng.log_uniform(3.0, 60.0),
            "eff_distance" => rng.log_uniform(5.0, 300.0),
            _ => rng.log_uniform(1e-4, 1e-2),
        };
        let score = 0.4 + 0.2 * rng.next_f64();
        writeln!(out, "Id: {id} Score: {score:.5} Dim: {dim} Cut: {cut:.6}")?;
    }
    writeln!(out, "Dimensions:")?;
    for (i, name) in DIMENSIONS.iter().enumerate() {
        writeln!(out, "{i:>7} {name:>15}")?;
    }
    Ok(out)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let outputs = [
        ("sample_results.pat", pattern_file(&mut rng, 2000, 3)?),
        ("sample_zerolag.pat", pattern_file(&mut rng, 150, 0)?),
        ("sample_trees.txt", tree_file(&mut rng, 60)?),
    ];

    for (path, contents) in &outputs {
        std::fs::write(path, contents).with_context(|| format!("writing {path}"))?;
        println!("Wrote {path}");
    }
    println!(
        "Try: mvsc-plot-cuts -f sample_results.pat -z sample_zerolag.pat -t sample_trees.txt -x snr -y chisq"
    );
    Ok(())
}
