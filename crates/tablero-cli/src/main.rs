//! tablero — command-line front-end for the task board.
//!
//! Plays the service-layer role: parse and validate the request shape,
//! delegate to the store, print results as JSON on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tablero_core::amortization;
use tablero_core::domain::{BoardError, TaskId, TaskPatch};
use tablero_core::store::{JsonFileStore, StoreConfig, TaskStore};

#[derive(Parser)]
#[command(name = "tablero", about = "File-backed kanban task board", version)]
struct Cli {
    /// Task file to operate on.
    #[arg(long, global = true, default_value = "tasks.json", env = "TABLERO_FILE")]
    file: PathBuf,

    /// Accept any non-empty state label instead of the closed vocabulary
    /// (Por Hacer / En Progreso / Hecho).
    #[arg(long, global = true)]
    open_states: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every task as a JSON array.
    List,
    /// Create a task. The state defaults to "Por Hacer".
    Add {
        content: String,
        #[arg(long)]
        state: Option<String>,
    },
    /// Update content and/or state of an existing task.
    Update {
        id: u64,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
    /// Delete a task by id.
    Delete { id: u64 },
    /// Print the amortization schedule of a fixed-payment loan.
    Amortize {
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent (e.g. 5.0 for 5%).
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // Storage failures get logged; bad input and missing ids are just
        // reported back to the caller.
        if err.is_storage() {
            tracing::error!(%err, "storage failure");
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(exit_code(&err));
    }
}

/// Exit codes mirror the usual HTTP mapping of this error taxonomy:
/// 2 for bad input (400), 3 for a missing id (404), 1 for storage (500).
fn exit_code(err: &BoardError) -> i32 {
    match err {
        BoardError::Validation(_) => 2,
        BoardError::NotFound(_) => 3,
        _ => 1,
    }
}

async fn run(cli: Cli) -> Result<(), BoardError> {
    // Amortize never touches the task file, so handle it before opening one.
    let command = match cli.command {
        Command::Amortize {
            principal,
            rate,
            months,
        } => {
            let entries = amortization::schedule(principal, rate, months)?;
            println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            return Ok(());
        }
        other => other,
    };

    let config = if cli.open_states {
        StoreConfig::open_states()
    } else {
        StoreConfig::default()
    };
    let store = JsonFileStore::open(cli.file, config).await?;

    match command {
        Command::List => {
            let tasks = store.get_all().await?;
            println!("{}", serde_json::to_string_pretty(&tasks).unwrap());
        }
        Command::Add { content, state } => {
            let task = store.add(&content, state.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&task).unwrap());
        }
        Command::Update { id, content, state } => {
            let patch = TaskPatch { content, state };
            let task = store.update(TaskId::new(id), patch).await?;
            println!("{}", serde_json::to_string_pretty(&task).unwrap());
        }
        Command::Delete { id } => {
            store.delete(TaskId::new(id)).await?;
            let message = serde_json::json!({ "message": format!("Task {id} deleted") });
            println!("{message}");
        }
        Command::Amortize { .. } => unreachable!("handled above"),
    }
    Ok(())
}
