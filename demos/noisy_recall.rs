//! Noisy Recall Demo
//!
//! Stores a few 6x6 glyphs in a Hopfield network, corrupts one of them and
//! relaxes the corrupted probe back toward the stored glyph.
//!
//! Run with: cargo run --example noisy_recall

use hopfield_recall::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ROWS: usize = 6;
const COLS: usize = 6;

fn glyph(rows: [&str; ROWS]) -> Vec<f64> {
    rows.iter()
        .flat_map(|row| row.chars().map(|c| if c == '#' { 1.0 } else { -1.0 }))
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let memories = vec![
        glyph(["#....#", ".#..#.", "..##..", "..##..", ".#..#.", "#....#"]),
        glyph(["######", "#....#", "#....#", "#....#", "#....#", "######"]),
        glyph(["..##..", "..##..", "######", "######", "..##..", "..##.."]),
    ];

    let model = build(&memories)?;
    log::info!(
        "Stored {} glyphs in a {}-neuron network (capacity ~{:.1})",
        model.memory_count(),
        model.size(),
        model.capacity()
    );

    let mut rng = StdRng::seed_from_u64(7);
    let target = 2;
    let probe = corrupt(&memories[target], 5, &mut rng)?;

    println!("Probe ({} bits flipped):", hamming(&probe, &memories[target])?);
    print!("{}", render_ascii(&probe, ROWS, COLS)?);

    let config = RecoveryConfig::new()
        .max_iterations(1000)
        .patience(5)
        .min_iterations(300);
    let engine = RecoveryEngine::new(config)?;
    let trajectory = engine.recover(&model, &probe, &mut rng)?;

    let recovered = match trajectory.final_state() {
        Some(state) => state.to_vec(),
        None => return Err(anyhow::anyhow!("recovery produced no states")),
    };

    println!("\nRecovered after {} iterations ({:?}):", trajectory.len(), trajectory.termination());
    print!("{}", render_ascii(&recovered, ROWS, COLS)?);

    let trace = trajectory.energy_trace();
    println!("\n=== Energy ===");
    println!("Probe:      {:.4}", energy(&model, &probe)?);
    for (t, e) in trace.iter().enumerate().filter(|(t, _)| t % 50 == 0) {
        println!("Iter {:>4}:  {:.4}", t + 1, e);
    }
    if let Some(final_energy) = trajectory.final_energy() {
        println!("Final:      {:.4}", final_energy);
        if let Some(closest) = model.closest_reference(final_energy) {
            println!(
                "Closest reference energy: glyph {} ({:.4})",
                closest,
                model.reference_energies()[closest]
            );
        }
    }

    println!("\nHamming distance to stored glyph: {}", hamming(&recovered, &memories[target])?);
    println!("Neuron flips: {}", trajectory.flip_count());

    Ok(())
}
