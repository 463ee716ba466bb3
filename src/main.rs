//! DCA Calculator CLI
//!
//! Command-line interface for estimating returns and projecting DCA plans

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use dca_calculator::{
    report::{self, ChartData},
    selection::format_month,
    CalculatorConfig, DcaSession, ProjectionEngine,
};

#[derive(Parser)]
#[command(name = "dca-calc")]
#[command(about = "Project dollar-cost-averaging returns from historical prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the return over a date range and project a plan
    Project {
        #[command(flatten)]
        plan: PlanArgs,

        /// Use this annual rate instead of estimating one (e.g. 0.07)
        #[arg(long)]
        rate: Option<f64>,

        /// Write the projection table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the projection and summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Apply drags to the range selector and report the resulting window
    Range {
        /// CSV file with Date and Close columns
        #[arg(short, long)]
        file: PathBuf,

        /// Drag positions, applied in order
        #[arg(long = "drag", allow_negative_numbers = true)]
        drags: Vec<f64>,

        #[arg(long, default_value_t = 0.0)]
        track_start: f64,

        #[arg(long, default_value_t = 400.0)]
        track_end: f64,
    },
    /// Project a plan over several horizons
    Sweep {
        #[command(flatten)]
        plan: PlanArgs,

        /// Horizons in years
        #[arg(long, value_delimiter = ',', default_values_t = vec![1, 5, 10, 20, 30])]
        horizons: Vec<u32>,
    },
}

/// Plan inputs; each flag overrides the matching config field
#[derive(Args)]
struct PlanArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file with Date and Close columns
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(long)]
    initial: Option<f64>,

    #[arg(long)]
    periodic: Option<f64>,

    /// daily, monthly or yearly
    #[arg(long)]
    period: Option<String>,

    #[arg(long)]
    years: Option<u32>,

    /// First month of the estimation window (MM-YYYY)
    #[arg(long)]
    from: Option<String>,

    /// Last month of the estimation window (MM-YYYY)
    #[arg(long)]
    to: Option<String>,
}

impl PlanArgs {
    fn into_config(self) -> anyhow::Result<CalculatorConfig> {
        let mut config = match &self.config {
            Some(path) => CalculatorConfig::from_file(path)?,
            None => CalculatorConfig::default(),
        };

        if self.file.is_some() {
            config.price_file = self.file;
        }
        if let Some(initial) = self.initial {
            config.initial_investment = initial;
        }
        if let Some(periodic) = self.periodic {
            config.periodic_investment = periodic;
        }
        if let Some(period) = self.period {
            config.period = period;
        }
        if let Some(years) = self.years {
            config.years = years;
        }
        if self.from.is_some() {
            config.range_start = self.from;
        }
        if self.to.is_some() {
            config.range_end = self.to;
        }

        Ok(config)
    }
}

/// Load the session and estimate over the configured (or full) range
fn estimate(config: &CalculatorConfig) -> anyhow::Result<(DcaSession, f64)> {
    let Some(path) = &config.price_file else {
        bail!("no price file given (use --file or set price_file in the config)");
    };

    let session = DcaSession::load(path)
        .with_context(|| format!("loading prices from {}", path.display()))?;

    let domain = session.selector().domain();
    let rate = match config.selection(domain)? {
        Some(selection) => session.estimate_rate_for(&selection)?,
        None => session.estimate_rate()?,
    };

    Ok((session, rate))
}

fn run_project(
    plan: PlanArgs,
    rate_override: Option<f64>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = plan.into_config()?;
    let inputs = config.inputs()?;

    let (label, rate) = match rate_override {
        Some(rate) => ("manual rate".to_string(), rate),
        None => {
            let (session, rate) = estimate(&config)?;
            (session.label().to_string(), rate)
        }
    };

    let result = ProjectionEngine::new(inputs).project(rate)?;

    println!("DCA Projection: {}", label);
    println!("======================\n");
    println!(
        "Plan: {} initial, {} {} for {} years",
        report::format_currency(inputs.initial),
        report::format_currency(inputs.periodic),
        inputs.period_unit,
        inputs.years
    );
    println!("{}", report::summary_text(&result));
    if let Some(mwr) = result.money_weighted_return() {
        println!("Money-Weighted Return: {}", report::format_percent(mwr));
    }

    // Yearly milestones
    let chart = ChartData::from_result(&result, &label);
    let per_year = inputs.period_unit.periods_per_year() as usize;
    println!("\n{:>6} {:>18} {:>18}", "Year", "Value", "Invested");
    println!("{}", "-".repeat(44));
    for point in chart.points.iter().step_by(per_year) {
        println!(
            "{:>6.0} {:>18} {:>18}",
            point.elapsed_years,
            report::format_currency(point.future_value),
            report::format_currency(point.total_invested)
        );
    }

    let csv = csv.or(config.output);
    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        report::write_csv(&result, BufWriter::new(file))?;
        println!("\nProjection table written to: {}", path.display());
    }
    if let Some(path) = json {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        report::write_json(&result, &label, BufWriter::new(file))?;
        println!("JSON report written to: {}", path.display());
    }

    Ok(())
}

fn run_range(file: PathBuf, drags: Vec<f64>, track_start: f64, track_end: f64) -> anyhow::Result<()> {
    let mut session = DcaSession::load(&file)
        .with_context(|| format!("loading prices from {}", file.display()))?;

    let domain = session.selector().domain();
    println!(
        "Domain: {} to {}",
        format_month(domain.from),
        format_month(domain.to)
    );

    for position in drags {
        let state = session.select_range(position, track_start, track_end);
        let (low, high) = state.labels();
        println!("  drag {:>8.1} -> {} .. {}", position, low, high);
    }

    let (start, end) = session.selector().calendar_bounds();
    println!("Window: {} through {}", start, end);
    println!(
        "Estimated Annual Return: {}",
        report::format_percent(session.estimate_rate()?)
    );

    Ok(())
}

fn run_sweep(plan: PlanArgs, horizons: Vec<u32>) -> anyhow::Result<()> {
    let config = plan.into_config()?;
    let inputs = config.inputs()?;
    let (session, rate) = estimate(&config)?;

    let results = session.sweep_horizons(inputs, &horizons, rate)?;

    println!(
        "{}: estimated annual return {}",
        session.label(),
        report::format_percent(rate)
    );
    println!("{:>6} {:>18} {:>18} {:>18}", "Years", "Invested", "Value", "Profit");
    println!("{}", "-".repeat(63));
    for result in &results {
        println!(
            "{:>6} {:>18} {:>18} {:>18}",
            result.years,
            report::format_currency(result.total_invested),
            report::format_currency(result.future_value),
            report::format_currency(result.profit)
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project { plan, rate, csv, json } => run_project(plan, rate, csv, json),
        Commands::Range {
            file,
            drags,
            track_start,
            track_end,
        } => run_range(file, drags, track_start, track_end),
        Commands::Sweep { plan, horizons } => run_sweep(plan, horizons),
    }
}
