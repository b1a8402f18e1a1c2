pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use app::{execute, execute_all, TaskContext};
pub use config::SiteConfig;
pub use core::engine::{EngineOptions, RewriteEngine};
pub use domain::model::{BatchReport, Category, FileStatus, TaskKind};
pub use utils::error::{HubError, Result};
