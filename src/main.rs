//! Command-line interface for dbify
//!
//! # Usage Examples
//!
//! ```bash
//! # Typed values are inferred: age becomes INT, active TINYINT, loss FLOAT
//! dbify insert events --field name=Alice --field age=30 --field active=true
//!
//! # Force a value to be stored as text
//! dbify insert events --text zip=02139
//!
//! # Whole record as a JSON object
//! dbify insert runs --json '{"model": "resnet", "epoch": 3, "loss": 0.31}'
//!
//! # Live columns of a table
//! dbify describe events
//! ```
//!
//! Connection settings come from `--connection-string`, or from a named
//! profile (`--server`, default "default") in `~/.dbify.toml`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dbify::fields::build_record;
use dbify::ConnectionOpts;
use schema_sync::{synchronize, ConnectionProvider, SchemaConnection};
use tracing::info;

#[derive(Parser)]
#[command(name = "dbify")]
#[command(about = "Persist records into MySQL, evolving the table schema as needed")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert one record, creating the table and columns it needs
    Insert {
        /// Target table
        table: String,

        /// Field with an inferred type (format: NAME=VALUE)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Field stored as text regardless of its content (format: NAME=VALUE)
        #[arg(long = "text", value_name = "NAME=VALUE")]
        texts: Vec<String>,

        /// Fields as a JSON object; added before --field and --text
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,
    },

    /// Print the live columns of a table
    Describe {
        /// Table to describe
        table: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Insert {
            table,
            fields,
            texts,
            json,
        } => run_insert(&cli.connection, &table, json.as_deref(), &fields, &texts).await,
        Commands::Describe { table } => run_describe(&cli.connection, &table).await,
    }
}

async fn run_insert(
    connection: &ConnectionOpts,
    table: &str,
    json: Option<&str>,
    fields: &[String],
    texts: &[String],
) -> anyhow::Result<()> {
    let record = build_record(json, fields, texts)?;
    let provider = connection
        .provider()
        .context("Failed to configure MySQL connection")?;

    let result = synchronize(&provider, table, record).await;
    provider.disconnect().await?;
    let persisted = result.with_context(|| format!("Failed to insert into '{table}'"))?;

    info!("Inserted {} field(s) into '{}'", persisted.len(), table);
    println!("{}", serde_json::to_string(&persisted.to_json())?);
    Ok(())
}

async fn run_describe(connection: &ConnectionOpts, table: &str) -> anyhow::Result<()> {
    let provider = connection
        .provider()
        .context("Failed to configure MySQL connection")?;

    let schema = {
        let mut conn = provider.acquire().await?;
        conn.describe_table(table).await?
    };
    provider.disconnect().await?;

    if schema.columns.is_empty() {
        anyhow::bail!("Table '{table}' does not exist");
    }
    for column in &schema.columns {
        println!("{}\t{}", column.name, column.declared_type);
    }
    Ok(())
}
