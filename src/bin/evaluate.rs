//! Evaluate a [`PerceptronPredictor`] against a few synthetic workloads.
//! Each workload runs on its own core.

use perceptron_bp::*;
use perceptron_bp::sim::run_trace;
use perceptron_bp::trace::*;
use tracing_subscriber::EnvFilter;
use std::env;

const LOOP_EXIT: &[Outcome] = &[Outcome::T, Outcome::T, Outcome::T, Outcome::N];

fn workloads() -> Vec<(&'static str, TraceBuilder)> {
    let mut biased = TraceBuilder::new(1);
    biased.branch(0x1000_0000, BranchPattern::AlwaysTaken)
        .branch(0x1000_0040, BranchPattern::NeverTaken)
        .site(0x1000_0080, BranchKind::DirectCall, BranchPattern::AlwaysTaken)
        .site(0x1000_0100, BranchKind::Return, BranchPattern::AlwaysTaken);

    let mut periodic = TraceBuilder::new(2);
    periodic.branch(0x2000_0000, BranchPattern::TakenPeriodic(5))
        .branch(0x2000_0010, BranchPattern::NotTakenPeriodic(3))
        .branch(0x2000_0020, BranchPattern::Pattern(LOOP_EXIT));

    let mut noisy = TraceBuilder::new(3);
    noisy.branch(0x3000_0000, BranchPattern::Random(0.9))
        .branch(0x3000_0004, BranchPattern::Random(0.5))
        .branch(0x3000_0008, BranchPattern::TakenPeriodic(2));

    vec![("biased", biased), ("periodic", periodic), ("noisy", noisy)]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let len = match args.get(1).map(|s| s.parse::<usize>()) {
        None => 100_000,
        Some(Ok(len)) => len,
        Some(Err(_)) => {
            println!("usage: {} [records per workload]", args[0]);
            return;
        },
    };

    let mut workloads = workloads();
    let cfg = PredictorConfig::new(workloads.len());
    let mut bp = match PerceptronPredictor::<HISTORY_LENGTH>::init(&cfg) {
        Ok(bp) => bp,
        Err(e) => {
            eprintln!("error: {}", e);
            return;
        },
    };

    for (core_id, (name, builder)) in workloads.iter_mut().enumerate() {
        let records = builder.build(len);
        let stat = run_trace(&mut bp, core_id, &records);

        println!("[*] {} (core {}, {} sites)", name, core_id, builder.num_sites());
        println!("  {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
            bp.name(),
            stat.global_hits(),
            stat.global_brns(),
            stat.hit_rate() * 100.0,
            stat.global_miss()
        );
        println!("  Low hit-rate branches:");
        for (pc, data) in stat.low_rate_branches(4, 0.95) {
            println!("    {:016x} {:8}/{:8} {:.4}",
                pc, data.hits, data.occ, data.hit_rate()
            );
        }
        println!();
    }
}
