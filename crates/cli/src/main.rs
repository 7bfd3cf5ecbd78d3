// Restock CLI - purchase suggestions from inventory spreadsheets

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use restock_cli::exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};
use restock_cli::output;
use restock_engine::mapping::ColumnMapping;
use restock_engine::suggest::compute_suggestions;
use restock_engine::summary::Summary;
use restock_engine::Error;

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  restock-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  restock-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

#[derive(Parser)]
#[command(name = "restock")]
#[command(about = "Purchase suggestions from inventory spreadsheets")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the column headers of a spreadsheet
    #[command(after_help = "\
Examples:
  restock columns inventory.xlsx
  restock columns sales.csv")]
    Columns {
        /// Input file (xlsx, xls, xlsb, ods, csv, tsv)
        input: PathBuf,
    },

    /// Compute purchase suggestions from a spreadsheet
    #[command(after_help = "\
Examples:
  restock suggest inventory.xlsx --product Item --stock 'On Hand' --sold 'Units Sold'
  restock suggest inventory.xlsx --mapping profile.json --to json
  restock suggest sales.csv --product Item --stock Stock --sold Sold \\
      --cost 'Unit Cost' --min-stock 10 --safety-multiplier 1.5 --export")]
    Suggest {
        /// Input file (xlsx, xls, xlsb, ods, csv, tsv)
        input: PathBuf,

        /// Mapping profile (JSON). Flags below override its values.
        #[arg(long, value_name = "FILE")]
        mapping: Option<PathBuf>,

        /// Header of the product name column
        #[arg(long, value_name = "HEADER")]
        product: Option<String>,

        /// Header of the current stock column
        #[arg(long, value_name = "HEADER")]
        stock: Option<String>,

        /// Header of the units sold column
        #[arg(long, value_name = "HEADER")]
        sold: Option<String>,

        /// Header of the unit cost column (unset: cost is 0)
        #[arg(long, value_name = "HEADER")]
        cost: Option<String>,

        /// Keep at least this many units on hand
        #[arg(long, value_name = "N")]
        min_stock: Option<f64>,

        /// Scale units sold by this factor to estimate demand
        #[arg(long, value_name = "X")]
        safety_multiplier: Option<f64>,

        /// Output format
        #[arg(long, short = 't', value_enum, default_value = "table")]
        to: OutputFormat,

        /// Also write the list as an XLSX workbook (default: purchase_suggestions.xlsx)
        #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = restock_io::EXPORT_FILE_NAME)]
        export: Option<PathBuf>,

        /// Suppress import notes on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    fn export(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    /// Map an engine error to its exit code, with a mapping hint where
    /// the fix is another command away.
    fn engine(err: Error) -> Self {
        let code = match &err {
            Error::Parse(_) => EXIT_PARSE,
            _ => EXIT_ERROR,
        };
        let hint = match &err {
            Error::MissingMapping(_) | Error::UnknownColumn { .. } => {
                Some("run 'restock columns <file>' to see the available headers".to_string())
            }
            _ => None,
        };
        Self {
            code,
            message: err.to_string(),
            hint,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = &err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.code)
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Columns { input } => cmd_columns(input),
        Commands::Suggest {
            input,
            mapping,
            product,
            stock,
            sold,
            cost,
            min_stock,
            safety_multiplier,
            to,
            export,
            quiet,
        } => {
            let mapping = build_mapping(
                mapping.as_deref(),
                product,
                stock,
                sold,
                cost,
                min_stock,
                safety_multiplier,
            )?;
            cmd_suggest(input, mapping, to, export, quiet)
        }
    }
}

fn cmd_columns(input: PathBuf) -> Result<(), CliError> {
    let (table, report) = restock_io::import_path(&input).map_err(CliError::engine)?;

    eprintln!("loaded {}", report.summary());
    for (idx, header) in table.headers().iter().enumerate() {
        println!("{:>3}  {}", idx, header);
    }
    Ok(())
}

fn cmd_suggest(
    input: PathBuf,
    mapping: ColumnMapping,
    to: OutputFormat,
    export: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let (table, report) = restock_io::import_path(&input).map_err(CliError::engine)?;
    if !quiet {
        eprintln!("loaded {}", report.summary());
    }

    let entries = compute_suggestions(&table, &mapping).map_err(CliError::engine)?;
    let summary = Summary::from_entries(&entries);

    match to {
        OutputFormat::Table => println!("{}", output::render_table(&entries, &summary)),
        OutputFormat::Json => {
            println!("{}", output::render_json(&entries, &summary).map_err(CliError::export)?)
        }
        OutputFormat::Csv => {
            print!("{}", output::render_csv(&entries).map_err(CliError::export)?)
        }
    }

    if let Some(path) = export {
        restock_io::xlsx::export_to_path(&entries, &path).map_err(CliError::export)?;
        if !quiet {
            eprintln!(
                "exported {} suggestion{} to {}",
                entries.len(),
                if entries.len() == 1 { "" } else { "s" },
                path.display()
            );
        }
    }

    Ok(())
}

/// Build the column mapping from an optional JSON profile plus flag
/// overrides. Required-column validation is the engine's job — it has
/// the sheet headers to check against.
fn build_mapping(
    profile: Option<&std::path::Path>,
    product: Option<String>,
    stock: Option<String>,
    sold: Option<String>,
    cost: Option<String>,
    min_stock: Option<f64>,
    safety_multiplier: Option<f64>,
) -> Result<ColumnMapping, CliError> {
    let mut mapping = match profile {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str(&content).map_err(|e| {
                CliError::args(format!("invalid mapping profile {}: {}", path.display(), e))
            })?
        }
        None => ColumnMapping::default(),
    };

    if let Some(product) = product {
        mapping.product_column = product;
    }
    if let Some(stock) = stock {
        mapping.stock_column = stock;
    }
    if let Some(sold) = sold {
        mapping.sold_column = sold;
    }
    if let Some(cost) = cost {
        mapping.cost_column = Some(cost);
    }
    if let Some(min_stock) = min_stock {
        mapping.min_stock = min_stock;
    }
    if let Some(safety_multiplier) = safety_multiplier {
        mapping.safety_multiplier = safety_multiplier;
    }

    Ok(mapping)
}
