// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use cgd_ingest::{run_import, ImportLog, ImportOptions};
use cgd_store::SqliteStore;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy)]
enum ExitCode {
    Success = 0,
    Internal = 10,
}

#[derive(Parser)]
#[command(name = "cgd")]
#[command(about = "Cancer genetic dependency catalogue operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full reload of the catalogue from the reference and result files.
    Populate {
        #[arg(long, default_value = "input_data")]
        input_dir: PathBuf,
        /// Directory holding the per-study result tables; defaults to
        /// the input directory.
        #[arg(long)]
        results_dir: Option<PathBuf>,
        #[arg(long, default_value = "cgd.sqlite")]
        db: PathBuf,
    },
    InspectDb {
        #[arg(long)]
        db: PathBuf,
        #[arg(long, default_value_t = 5)]
        sample_rows: usize,
    },
}

fn main() -> ProcessExitCode {
    init_tracing();
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CGD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Populate {
            input_dir,
            results_dir,
            db,
        } => {
            let results_dir = results_dir.unwrap_or_else(|| input_dir.clone());
            populate(&input_dir, &results_dir, &db, cli.json)
        }
        Commands::InspectDb { db, sample_rows } => inspect_db(db, sample_rows),
    }
}

fn populate(
    input_dir: &std::path::Path,
    results_dir: &std::path::Path,
    db: &std::path::Path,
    machine_json: bool,
) -> Result<(), String> {
    let opts = ImportOptions::from_root(input_dir, results_dir);
    let mut store = SqliteStore::open(db).map_err(|e| e.to_string())?;
    let mut log = ImportLog::default();
    let report = run_import(&mut store, &opts, &mut log).map_err(|e| e.to_string())?;

    let payload = json!({
        "report": report,
        "events": log.events(),
    });
    if machine_json {
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

fn inspect_db(db: PathBuf, sample_rows: usize) -> Result<(), String> {
    let conn = Connection::open(db).map_err(|e| e.to_string())?;
    let schema_version: String = conn
        .query_row(
            "SELECT v FROM cgd_meta WHERE k = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| e.to_string())?;
    println!("schema_version={schema_version}");

    for table in ["genes", "studies", "dependencies"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| e.to_string())?;
        println!("{table}_count={count}");
    }

    let mut idx_stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .map_err(|e| e.to_string())?;
    let indexes = idx_stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    println!(
        "indexes={}",
        serde_json::to_string(&indexes).map_err(|e| e.to_string())?
    );

    let sql = format!(
        "SELECT driver, target, histotype, study, wilcox_p, interaction \
         FROM dependencies ORDER BY wilcox_p, driver, target LIMIT {sample_rows}"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    println!(
        "sample_rows={}",
        serde_json::to_string(&rows).map_err(|e| e.to_string())?
    );
    Ok(())
}
