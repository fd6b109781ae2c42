//! Lightweight gate/lex/validate/compile benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p fleet_sim_core --example pipeline_benchmark --release`

use std::time::Instant;

use fleet_sim_core::{check_format, compile_actions, tokenize, validate_tokens};

fn per_iter_ms(elapsed: std::time::Duration, iterations: usize) -> f64 {
    elapsed.as_secs_f64() * 1000.0 / iterations as f64
}

fn run_benchmark(label: &str, input: &str, iterations: usize) -> Result<(), String> {
    let gate_start = Instant::now();
    for _ in 0..iterations {
        let _ = check_format(input);
    }
    let gate_elapsed = gate_start.elapsed();

    let validate_start = Instant::now();
    for _ in 0..iterations {
        let _ = validate_tokens(tokenize(input));
    }
    let validate_elapsed = validate_start.elapsed();

    let tokens = validate_tokens(tokenize(input))
        .into_result()
        .map_err(|e| format!("sample '{label}' is not a valid command: {e}"))?;

    let compile_start = Instant::now();
    for _ in 0..iterations {
        let _ = compile_actions(&tokens);
    }
    let compile_elapsed = compile_start.elapsed();

    println!("Benchmark: {label}");
    println!("  input_bytes: {}", input.len());
    println!("  steps:       {}", tokens.len());
    println!(
        "  gate:     total={:?}, per_iter={:.3} ms",
        gate_elapsed,
        per_iter_ms(gate_elapsed, iterations)
    );
    println!(
        "  validate: total={:?}, per_iter={:.3} ms",
        validate_elapsed,
        per_iter_ms(validate_elapsed, iterations)
    );
    println!(
        "  compile:  total={:?}, per_iter={:.3} ms",
        compile_elapsed,
        per_iter_ms(compile_elapsed, iterations)
    );
    Ok(())
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("FLEETSIM_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(500);

    let samples = [
        ("short_route", "F10R90L90B5".to_string()),
        ("long_route", "F25R90F10L180B3L90".repeat(500)),
    ];

    for (label, input) in &samples {
        run_benchmark(label, input, iterations)?;
    }

    Ok(())
}
