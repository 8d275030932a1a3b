use clap::{Parser, builder::styling};
use employee_etl::{Config, EmployeeEtl};
use eyre::{Context, Result};
use owo_colors::OwoColorize;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Employee ETL: clean an employee spreadsheet and replace a database table with it
#[derive(Parser)]
#[command(name = "emp-etl", version, styles = STYLES)]
struct Cli {
    /// Spreadsheet (.xlsx, .xls, .ods) or delimited (.csv, .tsv) source file
    #[arg(default_value = "employees_db.xlsx")]
    file: String,

    /// Destination table, replaced on every run
    #[arg(default_value = "employees")]
    table: String,

    /// The dotenv file to source DB_URL from
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_loaded = match dotenvy::from_filename(&cli.env) {
        Ok(_) => true,
        Err(err) if err.not_found() => false,
        Err(err) => return Err(err).with_context(|| format!("Failed to read {}", cli.env)),
    };

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if !env_loaded {
        log::debug!("No dotenv file at {}, using process environment", cli.env);
    }

    let config = Config::from_env()?;
    log::debug!("Destination: {}", config.destination);

    let etl = EmployeeEtl::new(config);
    match etl.run(&cli.file, &cli.table) {
        Ok(count) => {
            log::info!(
                "Loaded {} rows from {} into {}",
                count.cyan(),
                cli.file.bright_black(),
                cli.table.bright_black()
            );
            Ok(())
        }
        Err(err) => {
            log::error!(
                "Run aborted at {} for {}",
                err.stage().red(),
                cli.file.bright_black()
            );
            std::process::exit(1);
        }
    }
}
