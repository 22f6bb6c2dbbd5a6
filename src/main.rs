use clap::Parser;
use farm_records::config::cli::{ChildAction, Command, RecordAction, TaskAction, TransactionAction};
use farm_records::domain::ports::RecordStore;
use farm_records::utils::{logger, validation::Validate};
use farm_records::{
    Cli, ClientConfig, CropService, FarmService, HttpRecordStore, TaskService,
    TomlConfig, TransactionService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Client config: {:?}", config);

    let store = match HttpRecordStore::new(&config) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("❌ Client setup failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    match run(cli.command, store).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> farm_records::Result<ClientConfig> {
    match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(config.into_client_config())
        }
        None => {
            let config = ClientConfig::from_env()?;
            config.validate()?;
            Ok(config)
        }
    }
}

fn parse_input<T: DeserializeOwned>(json: &str) -> farm_records::Result<T> {
    Ok(serde_json::from_str(json)?)
}

fn output<T: Serialize>(value: T) -> farm_records::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

async fn run<S: RecordStore>(command: Command, store: S) -> farm_records::Result<Value> {
    match command {
        Command::Farm { action } => {
            let farms = FarmService::new(store);
            match action {
                RecordAction::List => output(farms.list().await?),
                RecordAction::Get { id } => output(farms.get_by_id(id).await?),
                RecordAction::Create { json } => output(farms.create(&parse_input(&json)?).await?),
                RecordAction::Update { id, json } => {
                    output(farms.update(id, &parse_input(&json)?).await?)
                }
                RecordAction::Delete { id } => output(farms.delete(id).await?),
            }
        }
        Command::Crop { action } => {
            let crops = CropService::new(store);
            match action {
                ChildAction::ByFarm { farm_id } => output(crops.get_by_farm_id(farm_id).await?),
                ChildAction::Record(RecordAction::List) => output(crops.list().await?),
                ChildAction::Record(RecordAction::Get { id }) => {
                    output(crops.get_by_id(id).await?)
                }
                ChildAction::Record(RecordAction::Create { json }) => {
                    output(crops.create(&parse_input(&json)?).await?)
                }
                ChildAction::Record(RecordAction::Update { id, json }) => {
                    output(crops.update(id, &parse_input(&json)?).await?)
                }
                ChildAction::Record(RecordAction::Delete { id }) => output(crops.delete(id).await?),
            }
        }
        Command::Task { action } => {
            let tasks = TaskService::new(store);
            match action {
                TaskAction::Today => output(tasks.todays_tasks().await?),
                TaskAction::Child(ChildAction::ByFarm { farm_id }) => {
                    output(tasks.get_by_farm_id(farm_id).await?)
                }
                TaskAction::Child(ChildAction::Record(RecordAction::List)) => {
                    output(tasks.list().await?)
                }
                TaskAction::Child(ChildAction::Record(RecordAction::Get { id })) => {
                    output(tasks.get_by_id(id).await?)
                }
                TaskAction::Child(ChildAction::Record(RecordAction::Create { json })) => {
                    output(tasks.create(&parse_input(&json)?).await?)
                }
                TaskAction::Child(ChildAction::Record(RecordAction::Update { id, json })) => {
                    output(tasks.update(id, &parse_input(&json)?).await?)
                }
                TaskAction::Child(ChildAction::Record(RecordAction::Delete { id })) => {
                    output(tasks.delete(id).await?)
                }
            }
        }
        Command::Transaction { action } => {
            let transactions = TransactionService::new(store);
            match action {
                TransactionAction::Summary => output(transactions.recent_summary().await?),
                TransactionAction::Child(ChildAction::ByFarm { farm_id }) => {
                    output(transactions.get_by_farm_id(farm_id).await?)
                }
                TransactionAction::Child(ChildAction::Record(RecordAction::List)) => {
                    output(transactions.list().await?)
                }
                TransactionAction::Child(ChildAction::Record(RecordAction::Get { id })) => {
                    output(transactions.get_by_id(id).await?)
                }
                TransactionAction::Child(ChildAction::Record(RecordAction::Create { json })) => {
                    output(transactions.create(&parse_input(&json)?).await?)
                }
                TransactionAction::Child(ChildAction::Record(RecordAction::Update {
                    id,
                    json,
                })) => output(transactions.update(id, &parse_input(&json)?).await?),
                TransactionAction::Child(ChildAction::Record(RecordAction::Delete { id })) => {
                    output(transactions.delete(id).await?)
                }
            }
        }
    }
}
