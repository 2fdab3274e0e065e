//! Glasscat command-line interface.
//!
//! Query optical glass catalogs from the shell:
//! ```sh
//! glasscat list SCHOTT.AGF
//! glasscat show SCHOTT.AGF N-BK7 --temperature 40
//! glasscat query SCHOTT.AGF PgF
//! glasscat index SCHOTT.AGF N-BK7 0.4861 0.5876 0.6563
//! glasscat run report.toml
//! ```
//!
//! Set `RUST_LOG=warn` to see load diagnostics as they are found.

mod config;
mod runner;

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use glasscat_optics::air::STANDARD_PRESSURE;
use glasscat_optics::{Environment, GlassProperty};

#[derive(Parser)]
#[command(name = "glasscat")]
#[command(about = "Glasscat: optical glass catalog queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every glass with its formula, nd and vd.
    List {
        /// One or more `.agf` / `.xml` catalog files.
        #[arg(required = true)]
        catalogs: Vec<PathBuf>,
        #[command(flatten)]
        env: EnvArgs,
    },
    /// Print the full record and derived values of one glass.
    Show {
        catalog: PathBuf,
        glass: String,
        /// Print the stored record as JSON instead.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        env: EnvArgs,
    },
    /// Print one property (nd, ne, vd, ve, PgF, PCt_, eta1, eta2) for every glass.
    Query {
        catalog: PathBuf,
        key: String,
        #[command(flatten)]
        env: EnvArgs,
    },
    /// Print the index of one glass at the given wavelengths (µm).
    Index {
        catalog: PathBuf,
        glass: String,
        #[arg(required = true)]
        wavelengths: Vec<f64>,
        #[command(flatten)]
        env: EnvArgs,
    },
    /// Run a report from a TOML configuration file.
    Run {
        /// Path to the report configuration file.
        config: PathBuf,
    },
}

#[derive(Args)]
struct EnvArgs {
    /// Ambient temperature in °C.
    #[arg(short, long, default_value_t = 25.0)]
    temperature: f64,
    /// Ambient pressure in Pa.
    #[arg(short, long, default_value_t = STANDARD_PRESSURE)]
    pressure: f64,
}

impl EnvArgs {
    fn environment(&self) -> Environment {
        Environment {
            temperature: self.temperature,
            pressure: self.pressure,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::List { catalogs, env } => {
            for path in &catalogs {
                let (catalog, _) = runner::load_catalog(path, env.environment())?;
                runner::write_list(&mut out, &catalog)?;
            }
            Ok(())
        }
        Commands::Show {
            catalog,
            glass,
            json,
            env,
        } => {
            let (catalog, _) = runner::load_catalog(&catalog, env.environment())?;
            let view = catalog
                .glass_at_name(&glass)
                .ok_or_else(|| anyhow::anyhow!("No glass named {} in {}", glass, catalog.supplier()))?;
            if json {
                runner::write_glass_json(&mut out, view.glass())
            } else {
                runner::write_glass(&mut out, &view)
            }
        }
        Commands::Query { catalog, key, env } => {
            let property: GlassProperty = key.parse()?;
            let (catalog, _) = runner::load_catalog(&catalog, env.environment())?;
            runner::write_query(&mut out, &catalog, property)
        }
        Commands::Index {
            catalog,
            glass,
            wavelengths,
            env,
        } => {
            let (catalog, _) = runner::load_catalog(&catalog, env.environment())?;
            let view = catalog
                .glass_at_name(&glass)
                .ok_or_else(|| anyhow::anyhow!("No glass named {} in {}", glass, catalog.supplier()))?;
            runner::write_indices(&mut out, &view, &wavelengths)
        }
        Commands::Run { config } => {
            let job = config::load_config(&config)?;
            log::debug!("Configuration: {}", config.display());
            runner::run_report(&mut out, &job)
        }
    }
}
