use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cut_planner::input::{self, Limits, RawDemand};
use cut_planner::render;
use cut_planner::solver::Solver;
use tracing::Level;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(
    name = "cut_planner",
    about = "1D cutting stock planner (best-fit decreasing)"
)]
struct Cli {
    /// Stock length shared by every unit (e.g. 6000)
    #[arg(long, required_unless_present_any = ["input", "json"])]
    stock: Option<String>,

    /// Cut pieces as LENGTH:qty (e.g. 2200:3 760:8)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<String>,

    /// Input sheet with piece, quantity and stock columns
    #[arg(long, conflicts_with_all = ["stock", "cuts", "json"])]
    input: Option<PathBuf>,

    /// JSON file with `pieces`, `quantities` and `stock_length`
    #[arg(long, conflicts_with_all = ["stock", "cuts"])]
    json: Option<PathBuf>,

    /// Write the cutting plan as CSV to this file, replacing its contents
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show an ASCII bar of each stock unit
    #[arg(long)]
    layout: bool,

    /// Refuse demands that expand to more cuts than this
    #[arg(long, default_value_t = Limits::default().max_cuts)]
    max_cuts: u64,

    /// Log validation and packing details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_number(s: &str, what: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid {} '{}'", what, s))
}

fn parse_cut(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("invalid cut '{}', expected LENGTH:qty", s));
    }
    let length = parse_number(parts[0], "length")?;
    let qty = parse_number(parts[1], "quantity")?;
    Ok((length, qty))
}

fn read_demand(cli: &Cli) -> Result<RawDemand, String> {
    if let Some(path) = &cli.input {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        return input::parse_sheet(&text).map_err(|e| e.to_string());
    }

    if let Some(path) = &cli.json {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        return serde_json::from_str(&text)
            .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e));
    }

    let stock = cli.stock.as_deref().ok_or("missing --stock")?;
    let mut raw = RawDemand {
        stock_length: parse_number(stock, "stock length")?,
        ..Default::default()
    };
    for c in &cli.cuts {
        let (length, qty) = parse_cut(c)?;
        raw.pieces.push(length);
        raw.quantities.push(qty);
    }
    Ok(raw)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let raw = read_demand(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let limits = Limits {
        max_cuts: cli.max_cuts,
    };
    let job = input::validate(&raw, &limits).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let solver = Solver::new(job.stock_length, job.requests);
    let result = solver.solve();

    if let Some(path) = &cli.output
        && let Err(e) = std::fs::write(path, render::render_csv(&result))
    {
        eprintln!("Error: cannot write {}: {}", path.display(), e);
        std::process::exit(1);
    }

    match cli.format {
        Format::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Format::Csv => print!("{}", render::render_csv(&result)),
        Format::Text => {
            print!("{}", render::render_table(&result));
            println!();
            print!("{}", render::render_summary(&result));
        }
    }

    if cli.layout {
        println!();
        for (i, bin) in result.bins.iter().enumerate() {
            println!("Stock unit {}:", i + 1);
            print!("{}", render::render_bin(result.stock_length, bin));
        }
    }
}
