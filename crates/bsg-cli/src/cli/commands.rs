use super::CliError;
use super::helpers::{build_evaluator, init_logging, load_run_config, run_name, write_error};
use anyhow::Context;
use bsg_core::common::constants::{kev_to_total_energy, total_energy_to_kev};
use bsg_core::domain::{BsgError, Diagnostics};
use bsg_core::modules::spectrum::serialization::{write_json_artifact, write_text_artifact};
use bsg_core::modules::spectrum::{
    BufferedRawSink, ReportContext, RunSummary, SpectrumBuilder, render_text_report,
};
use serde::Serialize;
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Transition deck (TOML)
    #[arg(long, short = 'c')]
    config: PathBuf,

    /// Directory receiving the .raw, .txt and .json outputs
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Base name of the outputs; defaults to the deck's file stem
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Exchange parameter table, overriding `exchange_data` in the deck
    #[arg(long)]
    exchange_data: Option<PathBuf>,

    /// Log construction steps at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(clap::Args)]
pub(super) struct EvaluateArgs {
    /// Transition deck (TOML)
    #[arg(long, short = 'c')]
    config: PathBuf,

    /// Kinetic energy in keV; repeat for several points
    #[arg(long = "energy", short = 'e', required = true, allow_negative_numbers = true)]
    energies: Vec<f64>,

    /// Exchange parameter table, overriding `exchange_data` in the deck
    #[arg(long)]
    exchange_data: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log construction steps at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

pub(super) fn run_spectrum_command(args: RunArgs) -> Result<i32, CliError> {
    let _logging = init_logging(args.verbose);
    let config = load_run_config(&args.config, args.exchange_data.as_deref())?;
    let name = run_name(&args.config, args.name);

    let mut diagnostics = Diagnostics::new();
    let evaluator = build_evaluator(&config, &mut diagnostics)?;

    fs::create_dir_all(&args.output_dir).map_err(|source| write_error(&args.output_dir, source))?;
    let raw_path = args.output_dir.join(format!("{name}.raw"));
    let report_path = args.output_dir.join(format!("{name}.txt"));
    let summary_path = args.output_dir.join(format!("{name}.json"));

    let raw_file = File::create(&raw_path).map_err(|source| write_error(&raw_path, source))?;
    let mut raw_sink = BufferedRawSink::new(raw_file);
    let built =
        SpectrumBuilder::new(&evaluator).build_from_config(&config.spectrum, &mut raw_sink);
    drop(raw_sink);
    let spectrum = match built {
        Ok(spectrum) => spectrum,
        Err(error) => {
            if let Err(source) = fs::remove_file(&raw_path) {
                tracing::warn!(
                    path = %raw_path.display(),
                    %source,
                    "failed to remove partial raw spectrum"
                );
            }
            return Err(error.into());
        }
    };

    let summary = RunSummary::compute(&name, &config, &evaluator, &spectrum, &diagnostics)
        .map_err(BsgError::from)?;
    let report = render_text_report(&ReportContext {
        name: &name,
        config: &config,
        evaluator: &evaluator,
        spectrum: &spectrum,
        summary: &summary,
    });
    write_text_artifact(&report_path, &report)
        .map_err(|source| write_error(&report_path, source))?;
    write_json_artifact(&summary_path, &summary)
        .map_err(|source| write_error(&summary_path, source))?;

    let label = if summary.partial_halflife.is_some() { "log ft" } else { "log f" };
    println!(
        "{} -> {}: {} samples, {label} = {:.4}, mean energy = {:.3} keV",
        summary.mother, summary.daughter, summary.samples, summary.log_ft, summary.mean_energy_kev
    );
    println!("Raw spectrum: {}", raw_path.display());
    println!("Report: {}", report_path.display());
    println!("Summary: {}", summary_path.display());
    Ok(0)
}

#[derive(Debug, Serialize)]
struct EvaluatedPoint {
    energy_kev: f64,
    w: f64,
    rate: f64,
    neutrino_rate: f64,
}

pub(super) fn run_evaluate_command(args: EvaluateArgs) -> Result<i32, CliError> {
    let _logging = init_logging(args.verbose);
    let config = load_run_config(&args.config, args.exchange_data.as_deref())?;
    let mut diagnostics = Diagnostics::new();
    let evaluator = build_evaluator(&config, &mut diagnostics)?;

    let mut points = Vec::with_capacity(args.energies.len());
    for energy_kev in args.energies {
        let requested = kev_to_total_energy(energy_kev);
        let evaluated = evaluator
            .evaluate_in_domain(requested)
            .map_err(BsgError::from)?;
        if let Some((w, rate)) = evaluated {
            points.push(EvaluatedPoint {
                energy_kev: total_energy_to_kev(w),
                w,
                rate: rate.rate,
                neutrino_rate: rate.neutrino_rate,
            });
        }
    }

    if args.json {
        let text = serde_json::to_string_pretty(&points)
            .context("failed to serialize evaluated points")?;
        println!("{text}");
    } else {
        println!("{:>12}\t{:>12}\t{:>14}\t{:>14}", "E [keV]", "W [m_ec2]", "dN_e/dW", "dN_v/dW");
        for point in &points {
            println!(
                "{:>12.4}\t{:>12.6}\t{:>14.6e}\t{:>14.6e}",
                point.energy_kev, point.w, point.rate, point.neutrino_rate
            );
        }
    }
    Ok(0)
}
