//! hopfield: associative memory over glyph grids.
//!
//! Trains a Hopfield memory on labelled grids (the built-in vowels by
//! default) and recalls noisy or partial query grids.
//!
//! This is the CLI binary entry point.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hopfield_recall::config::{DEFAULT_MAX_ITERATIONS, GLYPH_SIDE};
use hopfield_recall::core::pattern::Pattern;
use hopfield_recall::glyphs::catalog::{classify, vowels, Glyph};
use hopfield_recall::glyphs::grid::{parse_glyph_file, parse_grid, render_grid};
use hopfield_recall::memory::associative::{AssociativeMemory, RecallConfig};
use hopfield_recall::memory::batch::{convergence_rate, recall_batch};

/// Hopfield associative memory CLI.
#[derive(Parser, Debug)]
#[command(
    name = "hopfield",
    about = "Hebbian associative memory with synchronous recall",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on the vowels, corrupt each one and recall it.
    Demo {
        /// Bits flipped in every query.
        #[arg(short, long, default_value_t = 2)]
        flips: usize,

        /// Seed for choosing the flipped bits.
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Maximum relaxation steps.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
    },

    /// Train on a glyph file and write a snapshot.
    Train {
        /// Glyph file (`> label` followed by grid rows). Defaults to the vowels.
        #[arg(short, long)]
        glyphs: Option<PathBuf>,

        /// Snapshot output path.
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Recall a query grid.
    Recall {
        /// Trained snapshot to load.
        #[arg(long, conflicts_with = "glyphs")]
        snapshot: Option<PathBuf>,

        /// Glyph file to train on before recalling. Defaults to the vowels.
        #[arg(short, long)]
        glyphs: Option<PathBuf>,

        /// Query grid file.
        #[arg(short, long)]
        query: PathBuf,

        /// Maximum relaxation steps.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("hopfield v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Demo {
            flips,
            seed,
            max_iterations,
        } => run_demo(flips, seed, max_iterations),
        Command::Train { glyphs, out } => run_train(glyphs.as_deref(), &out),
        Command::Recall {
            snapshot,
            glyphs,
            query,
            max_iterations,
        } => run_recall(snapshot.as_deref(), glyphs.as_deref(), &query, max_iterations),
    }
}

fn load_glyphs(path: Option<&Path>) -> Result<Vec<Glyph>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read glyph file {}", path.display()))?;
            parse_glyph_file(&text).with_context(|| format!("in {}", path.display()))
        }
        None => Ok(vowels()),
    }
}

fn train_on(glyphs: &[Glyph]) -> Result<AssociativeMemory> {
    let patterns: Vec<Pattern> = glyphs.iter().map(|g| g.pattern.clone()).collect();
    let size = patterns.first().map(Pattern::len).unwrap_or(0);
    let mut memory = AssociativeMemory::new(size)?;
    memory.train(&patterns)?;
    tracing::info!(
        "Trained on {} glyphs of {} cells",
        patterns.len(),
        memory.pattern_size()
    );
    Ok(memory)
}

/// Grid side for display: the square root when the size is a square.
fn display_side(size: usize) -> usize {
    let side = (size as f64).sqrt().round() as usize;
    if side * side == size {
        side
    } else {
        size
    }
}

fn run_demo(flips: usize, seed: u64, max_iterations: usize) -> Result<()> {
    let glyphs = vowels();
    let memory = train_on(&glyphs)?;

    let queries: Vec<Pattern> = glyphs
        .iter()
        .enumerate()
        .map(|(i, g)| g.pattern.corrupted(flips, seed.wrapping_add(i as u64)))
        .collect();
    let config = RecallConfig::with_max_iterations(max_iterations);
    let outcomes = recall_batch(&memory, &queries, &config);

    for ((glyph, query), outcome) in glyphs.iter().zip(&queries).zip(&outcomes) {
        let outcome = outcome.as_ref().map_err(|e| e.clone())?;
        let matched = classify(&outcome.pattern, &glyphs);
        tracing::info!(
            "{}: {} flips -> {:?} after {} steps, nearest {}",
            glyph.label,
            flips,
            outcome.exit,
            outcome.iterations,
            matched
                .map(|m| format!("{} (distance {})", m.label, m.distance))
                .unwrap_or_else(|| "none".to_string()),
        );
        println!(
            "{}\n\n{}\n",
            render_grid(query, GLYPH_SIDE),
            render_grid(&outcome.pattern, GLYPH_SIDE)
        );
    }

    tracing::info!(
        "Converged: {:.1}%",
        convergence_rate(&outcomes) * 100.0
    );
    Ok(())
}

fn run_train(glyphs: Option<&Path>, out: &Path) -> Result<()> {
    let glyphs = load_glyphs(glyphs)?;
    let memory = train_on(&glyphs)?;
    memory.save(out)?;
    tracing::info!("Snapshot written to {}", out.display());
    Ok(())
}

fn run_recall(
    snapshot: Option<&Path>,
    glyphs: Option<&Path>,
    query: &Path,
    max_iterations: usize,
) -> Result<()> {
    let (memory, known) = match snapshot {
        Some(path) => (AssociativeMemory::load(path)?, Vec::new()),
        None => {
            let glyphs = load_glyphs(glyphs)?;
            (train_on(&glyphs)?, glyphs)
        }
    };
    if !memory.is_trained() {
        tracing::warn!("Memory has no trained patterns; recall will only apply tie-breaks.");
    }

    let text = std::fs::read_to_string(query)
        .with_context(|| format!("failed to read query {}", query.display()))?;
    let pattern = parse_grid(&text).with_context(|| format!("in {}", query.display()))?;
    if pattern.len() != memory.pattern_size() {
        bail!(
            "query has {} cells but the memory stores {}-cell patterns",
            pattern.len(),
            memory.pattern_size()
        );
    }

    let outcome = memory.recall_with(&pattern, &RecallConfig::with_max_iterations(max_iterations))?;
    tracing::info!("{:?} after {} steps", outcome.exit, outcome.iterations);
    if let Some(m) = classify(&outcome.pattern, &known) {
        tracing::info!("Nearest glyph: {} (distance {})", m.label, m.distance);
    }

    println!(
        "{}",
        render_grid(&outcome.pattern, display_side(memory.pattern_size()))
    );
    Ok(())
}
