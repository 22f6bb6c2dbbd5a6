use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "farm-records")]
#[command(about = "Read and edit farm, crop, task and transaction records")]
pub struct Cli {
    /// TOML file with an [apper] table; APPER_* environment variables are used otherwise
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Crop {
        #[command(subcommand)]
        action: ChildAction,
    },
    Farm {
        #[command(subcommand)]
        action: RecordAction,
    },
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    Transaction {
        #[command(subcommand)]
        action: TransactionAction,
    },
}

/// Operations every collection supports. Record data is camelCase JSON.
#[derive(Debug, Subcommand)]
pub enum RecordAction {
    List,
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        json: String,
    },
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    Delete {
        id: String,
    },
}

/// Collections whose records belong to a farm.
#[derive(Debug, Subcommand)]
pub enum ChildAction {
    #[command(flatten)]
    Record(RecordAction),
    ByFarm {
        farm_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskAction {
    #[command(flatten)]
    Child(ChildAction),
    /// Open tasks due today
    Today,
}

#[derive(Debug, Subcommand)]
pub enum TransactionAction {
    #[command(flatten)]
    Child(ChildAction),
    /// Income, expense and profit totals
    Summary,
}
