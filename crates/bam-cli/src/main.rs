mod report;

use std::path::PathBuf;

use bam_core::{
    build_weights, fixtures, verify_recall, BamConfig, BamError, BamExecutor, Direction,
    PatternSet,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use report::{Format, Reporter};

#[derive(Parser, Debug)]
#[command(name = "bam-cli", about = "Bidirectional associative memory experiments")]
struct Cli {
    /// Print LaTeX tables instead of plain text
    #[arg(long)]
    latex: bool,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Noise trials per stored pattern
    #[arg(long)]
    trials: Option<usize>,
    /// Components flipped per noise trial
    #[arg(long)]
    flips: Option<usize>,
    /// Seed for the noise experiment
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(d) = "bam_core=info".parse() {
        filter = filter.add_directive(d);
    }
    if let Ok(d) = "bam_cli=info".parse() {
        filter = filter.add_directive(d);
    }

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_config(cli: &Cli) -> Result<BamConfig, Box<dyn std::error::Error>> {
    let mut config = BamConfig::load_layered(cli.config.as_deref())?;
    if let Some(trials) = cli.trials {
        config.noise.trials = trials;
    }
    if let Some(flips) = cli.flips {
        config.noise.flips = flips;
    }
    if let Some(seed) = cli.seed {
        config.noise.seed = seed;
    }
    if cli.latex {
        config.report.latex = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let format = if config.report.latex {
        Format::Latex
    } else {
        Format::Plain
    };
    let reporter = Reporter::new(format, config.report.color);
    info!(?format, "starting BAM experiments");

    part_a(&reporter)?;
    part_b(&reporter)?;
    part_c(&reporter, &config)?;
    noise_experiment(&reporter, &config)?;
    Ok(())
}

/// Each pair through its own outer product, then all pairs through the sum.
fn part_a(reporter: &Reporter) -> Result<(), BamError> {
    print!("{}", reporter.heading("Part A"));
    let patterns = fixtures::part_a()?;

    for (index, pair) in patterns.pairs().iter().enumerate() {
        let Some(single) = patterns.single(index) else {
            continue;
        };
        let checks = verify_recall(&build_weights(&single), &single)?;
        for check in &checks {
            print!("{}", reporter.recall_check(index + 1, check, pair));
        }
    }

    let weights = build_weights(&patterns);
    println!();
    print!("{}", reporter.matrix("Summed weight matrix", &weights));
    println!();
    for (check, pair) in verify_recall(&weights, &patterns)?.iter().zip(patterns.pairs()) {
        print!("{}", reporter.recall_check(check.index + 1, check, pair));
    }
    println!();
    Ok(())
}

fn part_b(reporter: &Reporter) -> Result<(), BamError> {
    print!("{}", reporter.heading("Part B"));
    let patterns = fixtures::part_a()?;
    print!("{}", reporter.crosstalk(&bam_core::crosstalk(&patterns)));
    println!();
    Ok(())
}

/// Recall both ways on three pairs, then again after storing a fourth.
fn part_c(reporter: &Reporter, config: &BamConfig) -> Result<(), BamError> {
    print!("{}", reporter.heading("Part C"));
    let mut exec = BamExecutor::with_patterns(fixtures::part_a()?, config.clone());
    recall_both_ways(reporter, &mut exec, "Three pairs")?;

    let (input, output) = fixtures::part_c_addition()?;
    exec.add_pattern(input, output)?;
    print!("{}", reporter.matrix("Weight matrix with four pairs", exec.weights()));
    println!();
    print!("{}", reporter.crosstalk(&exec.crosstalk()));
    println!();
    recall_both_ways(reporter, &mut exec, "Four pairs")?;
    Ok(())
}

fn recall_both_ways(
    reporter: &Reporter,
    exec: &mut BamExecutor,
    label: &str,
) -> Result<(), BamError> {
    for direction in [Direction::FromInputs, Direction::FromOutputs] {
        match exec.execute(direction) {
            Ok(_) => {}
            Err(BamError::DidNotConverge {
                iterations,
                unstable,
            }) => {
                warn!(iterations, unstable, direction = direction.label(), "recall skipped");
                println!(
                    "Recall {} did not converge within {iterations} iteration(s)",
                    direction.label()
                );
                continue;
            }
            Err(e) => return Err(e),
        }
        if let Some(trajectory) = exec.trajectory() {
            print!("{}", reporter.trajectory(trajectory, exec.patterns().pairs()));
        }
        let report = exec.correctness()?;
        let label = format!("{label}, {}", direction.label());
        print!("{}", reporter.correctness(&label, &report));
        println!();
    }
    Ok(())
}

fn noise_experiment(reporter: &Reporter, config: &BamConfig) -> Result<(), BamError> {
    print!("{}", reporter.heading("Noise correction"));
    for (label, patterns) in [
        ("Part A pairs", fixtures::part_a()?),
        ("Well-separated pairs", fixtures::separated_triplet()?),
    ] {
        println!("{}", noise_section(reporter, config, label, patterns)?);
    }
    Ok(())
}

/// Noise trials on one set. More flips than components skips the set.
fn noise_section(
    reporter: &Reporter,
    config: &BamConfig,
    label: &str,
    patterns: PatternSet,
) -> Result<String, BamError> {
    let exec = BamExecutor::with_patterns(patterns, config.clone());
    match exec.noise_trials() {
        Ok(report) => Ok(format!("{label}:\n{}", reporter.noise(&report))),
        Err(BamError::DimensionMismatch {
            expected, actual, ..
        }) => {
            warn!(label, flips = actual, dimension = expected, "noise trials skipped");
            Ok(format!(
                "{label}: skipped, cannot flip {actual} of {expected} components\n"
            ))
        }
        Err(e) => Err(e),
    }
}
