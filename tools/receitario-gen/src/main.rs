//! Recipe Dataset Generator
//!
//! Reads the raw recipe dump, enriches every recipe and writes the typed
//! TypeScript data module consumed by the app. Running it without flags
//! reads `Receitas GlicoBem Json.txt` and writes `data/recipes.ts`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use receitario_core::{DEFAULT_INPUT, DEFAULT_OUTPUT, Pipeline, PipelineConfig};
use tracing::info;
use tracing::level_filters::LevelFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "receitario-gen")]
#[command(about = "Generate the typed recipe dataset module from the raw recipe dump")]
#[command(version)]
struct Cli {
    /// Raw recipe dump (JSON array)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Generated TypeScript module
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Replacement enrichment rule table (JSON)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Enrich and render, but do not write the module
    #[arg(long)]
    dry_run: bool,

    /// Log every enriched recipe
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else if self.quiet {
            LevelFilter::WARN
        } else {
            LevelFilter::INFO
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::new()
            .with_input(&self.input)
            .with_output(&self.output)
            .with_dry_run(self.dry_run);
        match self.rules {
            Some(ref rules) => config.with_rules(rules),
            None => config,
        }
    }
}

fn generate(cli: &Cli) -> Result<()> {
    let pipeline = Pipeline::new(cli.pipeline_config()).context("Failed to set up the generator")?;

    let report = pipeline.run().with_context(|| {
        format!(
            "Failed to generate {} from {}",
            cli.output.display(),
            cli.input.display()
        )
    })?;

    if let Some(ref output) = report.output {
        info!(bytes = report.bytes, "wrote {}", output.display());
        println!("Arquivo {} gerado com sucesso!", output.display());
    }
    print!("{report}");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.level())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = generate(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
