use anyhow::{Context, Result, bail};
use clap::Parser;
use ocludal::core::Dataset;
use ocludal::persistence::{model_path, save_model};
use ocludal::ui::cli::drivers::TerminalPrompter;
use ocludal::ui::cli::wizard::prompt_experiment;
use ocludal::ui::types::build::build_learner;
use ocludal::ui::types::choices::ExperimentConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ocludal")]
#[command(about = "Active learning with novelty-driven bootstrapping", long_about = None)]
#[command(version)]
struct Cli {
    /// Experiment configuration (JSON)
    #[arg(long, conflicts_with = "wizard")]
    config: Option<PathBuf>,

    /// Build the configuration interactively
    #[arg(long)]
    wizard: bool,

    /// Write the configuration used for this run to a file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let cfg = match (&cli.config, cli.wizard) {
        (_, true) => prompt_experiment(&TerminalPrompter)?,
        (Some(path), false) => ExperimentConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        (None, false) => bail!("pass --config <file> or --wizard"),
    };

    if let Some(path) = &cli.save_config {
        fs::write(path, serde_json::to_string_pretty(&cfg)?)
            .with_context(|| format!("writing config {}", path.display()))?;
        log::info!("config saved to {}", path.display());
    }

    let dataset = Dataset::from_csv(&cfg.data_path, &cfg.label_column, &cfg.drop_columns)
        .with_context(|| format!("loading {}", cfg.data_path.display()))?;
    log::info!(
        "loaded {} rows, {} features, {} classes",
        dataset.len(),
        dataset.n_features(),
        dataset.distinct_labels().len()
    );

    let output_name = cfg.resolved_output_name();
    let learner = build_learner(&cfg, &output_name)?;
    let outcome = learner.run(&dataset)?;

    let results_path = cfg.results_dir.join(&output_name);
    if let Err(e) = outcome.results.export(&results_path, cfg.results_format) {
        log::warn!("could not write results to {}: {e}", results_path.display());
    }
    let model_file = model_path(&cfg.models_dir, &output_name);
    if let Err(e) = save_model(&outcome.model, &model_file) {
        log::warn!("could not save model to {}: {e}", model_file.display());
    }

    if let Some(last) = outcome.results.latest() {
        println!("{last}");
    }
    println!(
        "{} rounds, {} labelled of {}; results in {}",
        outcome.results.len(),
        outcome.pool.labelled().len(),
        outcome.pool.total(),
        results_path.display()
    );
    Ok(())
}
