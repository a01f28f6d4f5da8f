use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use bend_mesh::io::table::Table;
use bend_mesh::mesh_generation::{ChannelConfig, write_block_mesh_dict};
use bend_mesh::post::{
    CoefficientHistory, LiftDistribution, ResidualHistory, relative_error_percent,
};

/// Curved-channel blockMeshDict generator and solver post-processing
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a blockMeshDict for the annular bend
    Generate {
        /// JSON configuration; omitted fields take their defaults
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Output path
        #[clap(short, long, default_value = "blockMeshDict")]
        out: PathBuf,

        #[clap(flatten)]
        overrides: Overrides,
    },

    /// Extract final residuals per time step from a solver log
    Residuals {
        /// Solver log
        #[clap(short, long, default_value = "log")]
        log: PathBuf,

        /// Output table
        #[clap(short, long, default_value = "residuals.tsv")]
        out: PathBuf,
    },

    /// Accumulate and integrate a sectional lift distribution
    Lift {
        /// Two-column table of slice position and lift
        #[clap(short, long)]
        input: PathBuf,

        /// Slice spacing
        #[clap(short, long, default_value_t = 0.01)]
        step: f64,

        /// Directly integrated total lift, for the error estimate
        #[clap(short, long)]
        direct: Option<f64>,

        /// Treat the input as a half span and mirror it about x = 0
        #[clap(long)]
        mirror: bool,

        /// Accumulated-lift table
        #[clap(short, long, default_value = "accumulated_lift_data.txt")]
        out: PathBuf,

        /// Optional copy of the (possibly mirrored) distribution
        #[clap(long)]
        distribution_out: Option<PathBuf>,
    },

    /// Extract Cd and Cl histories from a force-coefficient file
    Coefficients {
        #[clap(short, long, default_value = "coefficient.dat")]
        input: PathBuf,

        #[clap(short, long, default_value = "coefficients.tsv")]
        out: PathBuf,
    },
}

/// Per-field overrides applied on top of the configuration file
#[derive(Parser)]
struct Overrides {
    #[clap(long)]
    feature_size: Option<f64>,
    #[clap(long)]
    cell_size: Option<f64>,
    #[clap(long)]
    bend_radius: Option<f64>,
    #[clap(long)]
    clearance_multiple: Option<f64>,
    #[clap(long)]
    span_deg: Option<f64>,
    #[clap(long)]
    height: Option<f64>,
    #[clap(long)]
    sub_blocks: Option<usize>,
    #[clap(long)]
    circumferential_cells: Option<usize>,
    #[clap(long)]
    feature_angle_deg: Option<f64>,
}

impl Overrides {
    fn apply(&self, config: &mut ChannelConfig) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field {
                    config.$field = v;
                })*
            };
        }
        set!(
            feature_size,
            cell_size,
            bend_radius,
            clearance_multiple,
            span_deg,
            height,
            sub_blocks,
            circumferential_cells,
            feature_angle_deg
        );
    }
}

fn write_table(table: &Table, out: &Path) -> Result<()> {
    table
        .write(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {} row(s) to {}", table.rows.len(), out.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    match args.cmd {
        Command::Generate {
            config,
            out,
            overrides,
        } => {
            let now = Instant::now();
            let mut cfg = match &config {
                Some(path) => ChannelConfig::from_json_file(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => ChannelConfig::default(),
            };
            overrides.apply(&mut cfg);
            write_block_mesh_dict(&cfg, &out)
                .with_context(|| format!("generating {}", out.display()))?;
            info!("Generated mesh dictionary in {:?}", now.elapsed());
        }
        Command::Residuals { log, out } => {
            let history = ResidualHistory::read(&log)
                .with_context(|| format!("parsing {}", log.display()))?;
            if history.is_empty() {
                bail!("no `Time = ` markers found in {}", log.display());
            }
            info!(
                "{} step(s), variables: {}",
                history.times.len(),
                history.variables.join(", ")
            );
            write_table(&history.to_table(), &out)?;
        }
        Command::Lift {
            input,
            step,
            direct,
            mirror,
            out,
            distribution_out,
        } => {
            let mut dist = LiftDistribution::read(&input, step)
                .with_context(|| format!("reading {}", input.display()))?;
            if mirror {
                dist = dist.mirrored();
            }
            let integrated = dist.integrated();
            info!("Total lift (integrated) = {integrated:.2}");
            if let Some(direct) = direct {
                info!("Total lift (direct)     = {direct:.2}");
                match relative_error_percent(integrated, direct) {
                    Some(err) => info!("Lift error              = {err:.2} %"),
                    None => warn!("direct lift is zero; relative error undefined"),
                }
            }
            write_table(&dist.accumulated_table()?, &out)?;
            if let Some(path) = distribution_out {
                write_table(&dist.distribution_table()?, &path)?;
            }
        }
        Command::Coefficients { input, out } => {
            let history = CoefficientHistory::read(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            if let Some((cd, cl)) = history.last() {
                info!("Final Cd = {cd:.6}, Cl = {cl:.6} ({} samples)", history.len());
            } else {
                warn!("no coefficient rows in {}", input.display());
            }
            write_table(&history.to_table()?, &out)?;
        }
    }
    Ok(())
}
