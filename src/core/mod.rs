pub mod backup;
pub mod discovery;
pub mod engine;
pub mod report;

pub use crate::domain::model::{BatchReport, Category, Page, PageTarget, RewriteOutcome};
pub use crate::domain::ports::{Rewrite, Storage};
pub use crate::utils::error::Result;
