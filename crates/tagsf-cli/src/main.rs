//! tagsf CLI

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use tagsf_calib::{Bundled, ScaleFactorTable};
use tagsf_core::{CalibrationRow, DataPeriod, TagSummary, Variation};
use tagsf_retag::{
    DEFAULT_SEED, ThreeCategoryConfig, ThreeCategoryCorrector, TwoCategoryConfig,
    TwoCategoryCorrector,
};

#[derive(Parser)]
#[command(name = "tagsf")]
#[command(about = "tagsf - scale-factor re-tagging of tagger categories")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a calibration and print a short description of it
    Validate {
        /// Bundled calibration id (particlenet-xbb, particlenet-top, photon-saa) or JSON path
        #[arg(short, long)]
        calibration: String,
    },

    /// Print the full calibration document
    Inspect {
        /// Bundled calibration id or JSON path
        #[arg(short, long)]
        calibration: String,

        /// Output file (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up a single scale factor
    Lookup {
        /// Bundled calibration id or JSON path
        #[arg(short, long)]
        calibration: String,

        /// Data-taking period (2016APV, 2016, 2017, 2018)
        #[arg(long)]
        period: DataPeriod,

        /// Systematic variation (nominal, up, down)
        #[arg(long, default_value = "nominal")]
        variation: Variation,

        /// Calibrated row (loose/mp, tight/hp)
        #[arg(long, default_value = "tight")]
        row: CalibrationRow,

        /// Object transverse momentum in GeV
        #[arg(long)]
        pt: f64,
    },

    /// Re-tag a reproducible toy population and print the category summary
    Toy {
        /// Bundled calibration id or JSON path
        #[arg(short, long)]
        calibration: String,

        /// Number of categories
        #[arg(long, value_enum, default_value = "three")]
        mode: Mode,

        /// Data-taking period
        #[arg(long)]
        period: DataPeriod,

        /// Systematic variation
        #[arg(long, default_value = "nominal")]
        variation: Variation,

        /// Number of toy objects
        #[arg(short, long, default_value = "10000")]
        n: usize,

        /// Seed of the toy population (pT and score)
        #[arg(long, default_value = "42")]
        toy_seed: u64,

        /// Seed of the re-tagging draws
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Toy pT range lower edge (GeV)
        #[arg(long, default_value = "200")]
        pt_min: f64,

        /// Toy pT range upper edge (GeV)
        #[arg(long, default_value = "1500")]
        pt_max: f64,

        /// Loose working point (three-category mode)
        #[arg(long, default_value = "0.8")]
        wp_loose: f64,

        /// Tight working point; the only working point in two-category mode
        #[arg(long, default_value = "0.98")]
        wp_tight: f64,

        /// Loose-band efficiency (three-category mode)
        #[arg(long, default_value = "0.18")]
        eff_loose: f64,

        /// Tight-band efficiency; the pass efficiency in two-category mode
        #[arg(long, default_value = "0.02")]
        eff_tight: f64,

        /// Row used as the pass scale factor (two-category mode)
        #[arg(long, default_value = "tight")]
        pass_row: CalibrationRow,

        /// Print the plain-text summary instead of JSON
        #[arg(long)]
        text: bool,

        /// Output file for the summary. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Two,
    Three,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Validate { calibration } => cmd_validate(&calibration),
        Commands::Inspect { calibration, output } => cmd_inspect(&calibration, output.as_ref()),
        Commands::Lookup { calibration, period, variation, row, pt } => {
            cmd_lookup(&calibration, period, variation, row, pt)
        }
        Commands::Toy {
            calibration,
            mode,
            period,
            variation,
            n,
            toy_seed,
            seed,
            pt_min,
            pt_max,
            wp_loose,
            wp_tight,
            eff_loose,
            eff_tight,
            pass_row,
            text,
            output,
        } => {
            let toy = ToyArgs {
                mode,
                period,
                variation,
                n,
                toy_seed,
                seed,
                pt_range: (pt_min, pt_max),
                working_points: (wp_loose, wp_tight),
                efficiencies: (eff_loose, eff_tight),
                pass_row,
            };
            cmd_toy(&calibration, &toy, text, output.as_ref())
        }
    }
}

/// Bundled id first, then a filesystem path.
fn load_calibration(source: &str) -> Result<ScaleFactorTable> {
    let table = match source.parse::<Bundled>() {
        Ok(bundled) => ScaleFactorTable::bundled(bundled)?,
        Err(_) => ScaleFactorTable::from_path(source)?,
    };
    tracing::info!(name = table.name(), version = table.version(), "loaded calibration");
    Ok(table)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    write_text(output, &serde_json::to_string_pretty(&value)?)
}

fn write_text(output: Option<&PathBuf>, text: &str) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, text)?;
    } else {
        println!("{text}");
    }
    Ok(())
}

fn cmd_validate(calibration: &str) -> Result<()> {
    let table = load_calibration(calibration)?;
    let periods: Vec<serde_json::Value> = table
        .periods()
        .map(|p| {
            let rows: Vec<String> = [CalibrationRow::Loose, CalibrationRow::Tight]
                .into_iter()
                .filter(|&r| table.has_row(p, r))
                .map(|r| r.to_string())
                .collect();
            serde_json::json!({ "period": p.to_string(), "rows": rows })
        })
        .collect();
    let binning = table.binning();
    write_json(
        None,
        serde_json::json!({
            "valid": true,
            "name": table.name(),
            "version": table.version(),
            "n_bins": binning.n_bins(),
            "edges": binning.edges,
            "open_ended": binning.open_ended,
            "periods": periods,
        }),
    )
}

fn cmd_inspect(calibration: &str, output: Option<&PathBuf>) -> Result<()> {
    let table = load_calibration(calibration)?;
    write_json(output, serde_json::to_value(table.document())?)
}

fn cmd_lookup(
    calibration: &str,
    period: DataPeriod,
    variation: Variation,
    row: CalibrationRow,
    pt: f64,
) -> Result<()> {
    let table = load_calibration(calibration)?;
    let resolved = table.resolve(period, variation, row)?;
    let bin = table.binning().find_bin(pt);
    write_json(
        None,
        serde_json::json!({
            "calibration": table.name(),
            "period": period.to_string(),
            "variation": variation.to_string(),
            "row": row.to_string(),
            "pt": pt,
            "bin": bin,
            "scale_factor": resolved.lookup(pt),
        }),
    )
}

struct ToyArgs {
    mode: Mode,
    period: DataPeriod,
    variation: Variation,
    n: usize,
    toy_seed: u64,
    seed: u64,
    pt_range: (f64, f64),
    working_points: (f64, f64),
    efficiencies: (f64, f64),
    pass_row: CalibrationRow,
}

fn cmd_toy(
    calibration: &str,
    args: &ToyArgs,
    text: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let (pt_min, pt_max) = args.pt_range;
    if !(pt_min.is_finite() && pt_max.is_finite() && pt_min < pt_max) {
        anyhow::bail!("invalid pT range [{pt_min}, {pt_max})");
    }
    let table = load_calibration(calibration)?;

    let mut rng = StdRng::seed_from_u64(args.toy_seed);
    let objects: Vec<(f64, f64)> = (0..args.n)
        .map(|_| {
            let pt = pt_min + (pt_max - pt_min) * rng.random::<f64>();
            let score = rng.random::<f64>();
            (pt, score)
        })
        .collect();

    let summary: TagSummary = match args.mode {
        Mode::Two => {
            let cfg = TwoCategoryConfig::new(
                args.working_points.1,
                args.efficiencies.1,
                args.period,
            )
            .variation(args.variation)
            .pass_row(args.pass_row)
            .seed(args.seed);
            let mut corrector = TwoCategoryCorrector::new(cfg, &table)?;
            for &(pt, score) in &objects {
                corrector.retag(pt, score);
            }
            corrector.summary()
        }
        Mode::Three => {
            let cfg = ThreeCategoryConfig::new(args.working_points, args.efficiencies, args.period)
                .variation(args.variation)
                .seed(args.seed);
            let mut corrector = ThreeCategoryCorrector::new(cfg, &table)?;
            for &(pt, score) in &objects {
                corrector.retag(pt, score);
            }
            corrector.summary()
        }
    };
    tracing::info!(objects = args.n, net = ?summary.net_migration(), "toy re-tagging done");

    if text {
        write_text(output, &summary.to_string())
    } else {
        write_json(output, serde_json::to_value(&summary)?)
    }
}
