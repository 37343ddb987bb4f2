use bsg_core::common::config::RunConfig;
use bsg_core::domain::{BsgError, BsgResult, Diagnostics};
use bsg_core::modules::corrections::{CorrectionPipeline, CorrectionSettings, DecayRateEvaluator};
use bsg_core::modules::matrix_elements::ConfiguredMatrixElements;
use bsg_core::modules::transition::{NuclearParameters, load_exchange_table};
use std::path::{Path, PathBuf};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr subscriber for the duration of one command.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output and
/// the default shows warnings and errors.
pub(super) fn init_logging(verbose: bool) -> DefaultGuard {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .set_default()
}

pub(super) fn current_working_dir() -> BsgResult<PathBuf> {
    std::env::current_dir().map_err(|source| {
        BsgError::resource(
            "IO.CLI_CURRENT_DIR",
            format!("failed to read current working directory: {}", source),
        )
    })
}

pub(super) fn resolve_cli_path(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

/// Loads a deck and anchors its exchange table path.
///
/// A path given on the command line is taken relative to the working
/// directory; one given in the deck is taken relative to the deck.
pub(super) fn load_run_config(
    config_path: &Path,
    exchange_override: Option<&Path>,
) -> BsgResult<RunConfig> {
    let working_dir = current_working_dir()?;
    let config_path = resolve_cli_path(&working_dir, config_path);
    let mut config = RunConfig::load(&config_path)?;

    let deck_dir = config_path.parent().unwrap_or(&working_dir).to_path_buf();
    config.exchange_data = match exchange_override {
        Some(path) => Some(resolve_cli_path(&working_dir, path)),
        None => config
            .exchange_data
            .take()
            .map(|path| resolve_cli_path(&deck_dir, &path)),
    };
    tracing::debug!(config = %config_path.display(), "loaded run configuration");
    Ok(config)
}

/// Builds the per-energy evaluator of a loaded deck.
pub(super) fn build_evaluator(
    config: &RunConfig,
    diagnostics: &mut Diagnostics,
) -> BsgResult<DecayRateEvaluator> {
    let exchange_table = load_exchange_table(config, diagnostics);
    let provider = ConfiguredMatrixElements::from_config(&config.matrix_elements);
    let parameters =
        NuclearParameters::build(config, &provider, exchange_table.as_ref(), diagnostics)?;
    let pipeline = CorrectionPipeline::new(parameters, CorrectionSettings::from_config(config));
    Ok(DecayRateEvaluator::new(pipeline, config.spectrum.out_of_range))
}

/// Run name from `--name` or the deck's file stem.
pub(super) fn run_name(config_path: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        config_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spectrum".to_string())
    })
}

pub(super) fn write_error(path: &Path, source: std::io::Error) -> BsgError {
    BsgError::resource(
        "IO.OUTPUT_WRITE",
        format!("failed to write '{}': {}", path.display(), source),
    )
}
