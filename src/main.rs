use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use automapper::{logging, metrics, FieldPath, ProjectionConfig, Projector, Record, Value};

#[derive(Parser)]
#[command(name = "automapper")]
#[command(about = "Project JSON records with an auto-map configuration")]
#[command(version = "0.1.0")]
struct Cli {
    /// Also write JSON logs to a daily-rotated file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print collected metrics in Prometheus format to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a JSON source document and print the result
    Project {
        /// Source JSON document
        #[arg(long)]
        input: PathBuf,
        /// Projection config (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON object to project onto (defaults to an empty object)
        #[arg(long)]
        destination: Option<PathBuf>,
        #[arg(long)]
        copy_arrays: bool,
        #[arg(long)]
        copy_objects: bool,
        /// Dotted path to select (repeatable)
        #[arg(long)]
        select: Vec<String>,
        /// Dotted path to ignore (repeatable)
        #[arg(long)]
        ignore: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// Check that a config file parses and print its normalized form
    CheckConfig { path: PathBuf },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.log_dir.as_deref())?;
    let metrics_handle = if cli.metrics {
        metrics::init_metrics()
    } else {
        None
    };

    match cli.command {
        Commands::Project {
            input,
            config,
            destination,
            copy_arrays,
            copy_objects,
            select,
            ignore,
            pretty,
        } => {
            let mut config = match config {
                Some(path) => ProjectionConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ProjectionConfig::new(),
            };
            config.copy_arrays |= copy_arrays;
            config.copy_objects |= copy_objects;
            extend_paths(&mut config.select, select);
            extend_paths(&mut config.ignore, ignore);
            debug!("Effective config: {:?}", config);

            let source = read_json(&input)?;
            let destination = match destination {
                Some(path) => read_destination(&path)?,
                None => Record::new(),
            };

            let projected = Projector::new(&config).project(&source, destination)?;
            let json = projected.to_json();
            let rendered = if pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };
            println!("{}", rendered);
            info!("Projected {}", input.display());
        }
        Commands::CheckConfig { path } => {
            let config = ProjectionConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            info!("Config {} is valid", path.display());
        }
    }

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

fn extend_paths(paths: &mut Option<Vec<FieldPath>>, extra: Vec<String>) {
    if extra.is_empty() {
        return;
    }
    paths
        .get_or_insert_with(Vec::new)
        .extend(extra.into_iter().map(FieldPath::from));
}

fn read_destination(path: &Path) -> Result<Record> {
    match read_json(path)? {
        Value::Record(record) => Ok(record),
        other => bail!(
            "destination {} must be a JSON object, found {:?}",
            path.display(),
            other.kind()
        ),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    Ok(Value::from(json))
}
