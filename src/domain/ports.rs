use crate::domain::model::{Page, RewriteOutcome};
use crate::utils::error::Result;
use std::path::Path;

/// Site file access, relative to the site root.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}

/// A single-pass text rewrite applied to one page.
///
/// Implementations are pure: they look at the page content and say what it should
/// become. Reading, writing, dry runs and backups are the engine's business.
pub trait Rewrite: Send + Sync {
    fn name(&self) -> &'static str;
    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome>;
}
