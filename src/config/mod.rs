#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod site_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command, GlobalArgs};
pub use site_config::SiteConfig;
