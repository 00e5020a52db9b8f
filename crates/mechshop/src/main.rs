//! mechshop CLI - mechanic shop database front end

use clap::{Parser, Subcommand};
use mechshop::cli::{Menu, OutputFormat, OutputWriter};
use mechshop::config::{Config, DB_ENV_VAR};
use mechshop::db::get_table_info;
use mechshop::{import, Report, ShopDb, ShopError, TABLES};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  mechshop                                 # interactive menu
  mechshop init                            # create the tables
  mechshop import ./data                   # load customer.csv, car.csv, ...
  mechshop report total-bill --limit 5
  mechshop -f csv report bills-under --threshold 50
  mechshop schema Service_Request"#;

#[derive(Parser)]
#[command(name = "mechshop")]
#[command(about = "Menu-driven front end for a mechanic shop database")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Database file (default: <data dir>/mechshop/shop.db)
    #[arg(long, env = DB_ENV_VAR, global = true)]
    db: Option<PathBuf>,

    /// Output format for reports
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Omit header row
    #[arg(short = 'H', long = "no-header", global = true)]
    no_header: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Create the shop tables
    Init,

    /// Load the CSV data set from a directory
    Import {
        /// Directory holding customer.csv, mechanic.csv, car.csv, owns.csv,
        /// service_request.csv and closed_request.csv
        dir: PathBuf,
    },

    /// Run a canned report
    Report {
        #[arg(value_enum)]
        report: Report,

        /// Number of rows to return (most-serviced, total-bill)
        #[arg(short, long, conflicts_with = "threshold")]
        limit: Option<i64>,

        /// Threshold to compare against (bills-under, many-cars)
        #[arg(short, long)]
        threshold: Option<i64>,
    },

    /// List the tables
    Tables,

    /// Show the schema of one table
    Schema { table: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Menu);

    // Catalogue commands don't need a database.
    match &command {
        Commands::Tables => {
            print_tables();
            return Ok(());
        }
        Commands::Schema { table } => {
            let info =
                get_table_info(table).ok_or_else(|| ShopError::TableNotFound(table.clone()))?;
            println!("{}", info.create_sql);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::resolve(cli.db)?;
    let db = ShopDb::open(config.db_path())?;

    match command {
        Commands::Menu => {
            println!("Connected to {}", config.db_path().display());
            let stdin = io::stdin();
            let mut menu = Menu::new(&db, stdin.lock(), io::stdout())
                .with_format(cli.format)
                .with_header(!cli.no_header);
            menu.run()?;
            println!("Bye !");
        }
        Commands::Init => {
            for table in TABLES {
                println!("{:<16} {} rows", table.name, db.count_rows(table.name)?);
            }
            println!("Schema ready in {}", config.db_path().display());
        }
        Commands::Import { dir } => {
            let summary = import::import_dir(&db, &dir)?;
            let mut writer =
                OutputWriter::new(io::stdout(), cli.format).with_header(!cli.no_header);
            if summary.is_empty() {
                writer.writeln(&format!("No CSV files found in {}", dir.display()))?;
            } else if cli.format == OutputFormat::Table {
                for entry in &summary {
                    writer.writeln(&format!("{:<16} {} rows", entry.table, entry.rows))?;
                }
            } else {
                writer.write_records(&summary)?;
            }
        }
        Commands::Report {
            report,
            limit,
            threshold,
        } => {
            let value = report.select_value(limit, threshold)?;
            let result = report.run(&db, value)?;
            OutputWriter::new(io::stdout(), cli.format)
                .with_header(!cli.no_header)
                .write_result(&result)?;
        }
        Commands::Tables | Commands::Schema { .. } => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mechshop=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_tables() {
    println!("TABLES");
    println!("══════════════════════════════════════════════════════════════════════════════\n");
    for table in TABLES {
        println!("  {:<16} {}", table.name, table.description);
    }
    println!("\nRun 'mechshop schema <table>' for column details.");
}
