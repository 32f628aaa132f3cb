use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fichaui::{
    FichaUI, SavedFicha, UiOptions,
    io::{ExportFormat, ExportTarget},
    storage::{FileStore, restore},
};

const LOG_FILE_NAME: &str = "fichaui.log";

#[derive(Debug, Parser)]
#[command(
    name = "fichaui",
    version,
    about = "Pick a Star Wars character, annotate it and keep a local ficha"
)]
struct Cli {
    /// Catalog page listing the selectable characters
    #[arg(long = "catalog-url", value_name = "URL")]
    catalog_url: Option<String>,

    /// Directory holding the stored ficha (defaults to the platform data dir)
    #[arg(long = "store-dir", value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Log file; filtered by RUST_LOG (default "info")
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start from an empty form instead of the stored ficha
    #[arg(long = "no-restore")]
    no_restore: bool,

    /// Input poll interval in milliseconds
    #[arg(long = "tick-rate-ms", value_name = "MS", default_value_t = 100)]
    tick_rate_ms: u64,

    /// Hide the key help line
    #[arg(long = "no-help")]
    no_help: bool,

    /// Print the stored ficha and exit without opening the form
    #[arg(long = "print")]
    print: bool,

    /// Export format; inferred from the first file destination, else JSON
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<ExportFormat>,

    /// Where the ficha is written ("-" is stdout, the default). Repeatable.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<ExportTarget>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let store_dir = resolve_store_dir(cli.store_dir.as_deref())?;
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| store_dir.join(LOG_FILE_NAME));
    init_logging(&log_file)?;

    let export = ExportSettings::from_cli(&cli);
    let store = FileStore::new(&store_dir);

    if cli.print {
        let ficha = restore(&store)
            .summary
            .ok_or_else(|| eyre!("no ficha stored in {}", store_dir.display()))?;
        return export.write(&ficha);
    }

    let options = UiOptions::default()
        .with_help(!cli.no_help)
        .with_tick_rate(Duration::from_millis(cli.tick_rate_ms.max(1)));
    let mut ui = FichaUI::new(store)
        .with_options(options)
        .with_restore(!cli.no_restore);
    if let Some(url) = cli.catalog_url.as_ref() {
        ui = ui.with_catalog_url(url.clone());
    }

    info!(store = %store_dir.display(), "starting form");
    match ui.run().map_err(Report::msg)? {
        Some(ficha) => export.write(&ficha),
        None => {
            info!("form closed without saving");
            Ok(())
        }
    }
}

fn resolve_store_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => FileStore::default_dir()
            .ok_or_else(|| eyre!("no platform data directory; pass --store-dir")),
    }
}

/// The terminal belongs to the form, so events go to a file.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}

struct ExportSettings {
    format: ExportFormat,
    pretty: bool,
    targets: Vec<ExportTarget>,
}

impl ExportSettings {
    fn from_cli(cli: &Cli) -> Self {
        let targets = if cli.outputs.is_empty() {
            vec![ExportTarget::Stdout]
        } else {
            cli.outputs.clone()
        };
        let format = cli
            .format
            .or_else(|| targets.iter().find_map(ExportTarget::inferred_format))
            .unwrap_or_default();
        Self {
            format,
            pretty: !cli.no_pretty,
            targets,
        }
    }

    fn write(&self, ficha: &SavedFicha) -> Result<()> {
        let export = ficha
            .export()
            .with_format(self.format)
            .with_pretty(self.pretty);
        for target in &self.targets {
            export
                .write_to(target)
                .wrap_err_with(|| format!("failed to export the {} ficha", self.format))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_is_the_default_target() {
        let cli = Cli::parse_from(["fichaui", "--no-pretty"]);
        let settings = ExportSettings::from_cli(&cli);
        assert!(!settings.pretty);
        assert_eq!(settings.format, ExportFormat::Json);
        assert_eq!(settings.targets, vec![ExportTarget::Stdout]);
    }

    #[test]
    fn outputs_accept_files_and_stdout() {
        let cli = Cli::parse_from(["fichaui", "-o", "-", "ficha.json"]);
        let settings = ExportSettings::from_cli(&cli);
        assert_eq!(
            settings.targets,
            vec![
                ExportTarget::Stdout,
                ExportTarget::File(PathBuf::from("ficha.json"))
            ]
        );
    }

    #[test]
    fn rejects_unknown_formats_and_empty_targets() {
        assert!(Cli::try_parse_from(["fichaui", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["fichaui", "-o", ""]).is_err());
    }
}
