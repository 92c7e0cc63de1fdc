//! Command-line front end for the resistor network calculator.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use rnetcalc::{
    code_summary, compute_ladder, format_r_value, parse_r_value, unique_values, RCalc, RRes,
    RSeries, E12, E24, E3, E6,
};

#[derive(Parser)]
#[command(name = "rnetcalc")]
#[command(about = "Series/parallel resistor network calculator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find resistor networks approximating a target resistance
    Find(FindArgs),
    /// Compute the bill of materials for an R-2R ladder DAC
    Ladder(LadderArgs),
    /// Print the identification codes for a single resistor value
    Code {
        /// Resistor value (plain ohms or suffixed, e.g. 4K7, 1M)
        value: String,
    },
}

#[derive(Args)]
struct FindArgs {
    /// Target resistance (plain ohms or suffixed, e.g. 4K7, 1M)
    #[arg(short, long)]
    target: String,

    /// Tolerance in percent
    #[arg(short = 'p', long, default_value_t = 5.0)]
    tolerance: f64,

    /// Standard series supplying the catalog: e3, e6, e12 or e24
    #[arg(short, long, default_value = "e24", conflicts_with = "values")]
    series: String,

    /// Comma-separated catalog values, overriding --series
    #[arg(long)]
    values: Option<String>,

    /// Maximum resistors per network
    #[arg(long, default_value_t = 5)]
    max_size: usize,

    /// Maximum stored networks per size
    #[arg(long, default_value_t = 10_000)]
    max_per_size: usize,

    /// Maximum results to display
    #[arg(long, default_value_t = 50)]
    max_results: usize,

    /// Annotate the top N results with component codes
    #[arg(long, default_value_t = 5)]
    codes: usize,

    /// Filter bound over R (resistance) and N (count), e.g. "N <= 3"
    #[cfg(feature = "expr_filter")]
    #[arg(long = "where", value_name = "BOUND")]
    bounds: Vec<String>,
}

#[derive(Args)]
struct LadderArgs {
    /// Base resistance R (plain ohms or suffixed, e.g. 10K)
    #[arg(short, long)]
    base: String,

    /// Converter width in bits
    #[arg(long, default_value_t = 8)]
    bits: u32,

    /// Reference voltage
    #[arg(long, default_value_t = 5.0)]
    vref: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Find(args) => run_find(args),
        Command::Ladder(args) => run_ladder(args),
        Command::Code { value } => run_code(value),
    }
}

fn series_by_name(name: &str) -> Result<&'static RSeries> {
    match name.to_ascii_lowercase().as_str() {
        "e3" => Ok(&E3),
        "e6" => Ok(&E6),
        "e12" => Ok(&E12),
        "e24" => Ok(&E24),
        other => bail!("unknown series '{}', expected e3, e6, e12 or e24", other),
    }
}

fn parse_catalog(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(|item| {
            parse_r_value(item).with_context(|| format!("unparseable resistor value '{}'", item))
        })
        .collect()
}

fn run_find(args: &FindArgs) -> Result<()> {
    let target = parse_r_value(&args.target)
        .with_context(|| format!("unparseable target '{}'", args.target))?;
    let catalog = match &args.values {
        Some(list) => parse_catalog(list)?,
        None => series_by_name(&args.series)?.values().to_vec(),
    };

    let rcalc = RCalc::new(catalog)
        .max_size(args.max_size)
        .max_per_size(args.max_per_size)
        .max_results(args.max_results);
    let tolerance = args.tolerance / 100.0;

    let res = calc_with_bounds(args, &rcalc, target, tolerance)?;

    println!();
    println!(
        "-- Networks within {:.2}% tolerance of {:.2} Ω --",
        args.tolerance, target
    );
    match res {
        None => println!("No network found within the specified tolerance."),
        Some(res) => print_matches(&res, args.codes),
    }
    print_legend();
    Ok(())
}

#[cfg(feature = "expr_filter")]
fn calc_with_bounds(
    args: &FindArgs,
    rcalc: &RCalc,
    target: f64,
    tolerance: f64,
) -> Result<Option<RRes>> {
    if args.bounds.is_empty() {
        return Ok(rcalc.calc(target, tolerance)?);
    }
    let mut builder = rnetcalc::RFilterBuilder::new();
    for bound in &args.bounds {
        builder = builder.try_bound(bound)?;
    }
    Ok(rcalc.calc_where(target, tolerance, builder.finish())?)
}

#[cfg(not(feature = "expr_filter"))]
fn calc_with_bounds(
    _args: &FindArgs,
    rcalc: &RCalc,
    target: f64,
    tolerance: f64,
) -> Result<Option<RRes>> {
    Ok(rcalc.calc(target, tolerance)?)
}

fn print_matches(res: &RRes, codes: usize) {
    println!(
        "   Found {} combinations, showing top {} sorted by error",
        res.total(),
        res.len()
    );
    println!();
    for (idx, m) in res.iter().enumerate() {
        if idx < codes {
            println!("#{} {}", idx + 1, m);
            println!("    Component resistor codes:");
            for value in unique_values(m.net().parts().values()) {
                println!("      {}", code_summary(value));
            }
        } else {
            println!("{}", m);
        }
        println!();
    }
    if res.overflow() > 0 {
        println!("... and {} more results", res.overflow());
        println!();
    }
}

fn print_legend() {
    println!();
    println!("-- Color Code Reference --");
    println!("Digits: Black=0, Brown=1, Red=2, Orange=3, Yellow=4");
    println!("        Green=5, Blue=6, Violet=7, Grey=8, White=9");
    println!("Tolerance: Gold=5%, Brown=1%, Red=2%, Silver=10%");
}

fn run_ladder(args: &LadderArgs) -> Result<()> {
    let base =
        parse_r_value(&args.base).with_context(|| format!("unparseable base '{}'", args.base))?;
    let ladder = compute_ladder(base, args.bits, args.vref)?;

    println!();
    println!(
        "-- R-2R ladder: {} bits, Vref {:.3} V --",
        ladder.bits, ladder.vref
    );
    println!("R  = {} ({} needed)", format_r_value(ladder.r), ladder.r_count);
    println!("     {}", code_summary(ladder.r));
    println!(
        "2R = {} ({} needed)",
        format_r_value(ladder.r2),
        ladder.r2_count
    );
    println!("     {}", code_summary(ladder.r2));
    println!();
    println!(
        "Levels: {}   LSB: {:.6} V   Max output: {:.6} V",
        ladder.levels, ladder.lsb, ladder.max_output
    );
    println!();
    println!("Sample outputs:");
    for step in &ladder.samples {
        println!(
            "  {}  {:>8}  {:.6} V",
            step.code, step.value, step.voltage
        );
    }
    Ok(())
}

fn run_code(value: &str) -> Result<()> {
    let ohms =
        parse_r_value(value).with_context(|| format!("unparseable resistor value '{}'", value))?;
    println!("{}", code_summary(ohms));
    Ok(())
}
