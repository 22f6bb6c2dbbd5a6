pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::http::HttpRecordStore;
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use domain::ports::{ConfigProvider, RecordStore};
pub use services::{
    crop::CropService, farm::FarmService, task::TaskService, transaction::TransactionService,
};
pub use utils::error::{AdapterError, Result};
