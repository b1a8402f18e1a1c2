use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const BACKUP_DIR: &str = ".backups";

/// Snapshot the current content of files about to be overwritten.
///
/// Returns the root-relative path of the archive written through `storage`.
pub async fn archive<S: Storage>(
    storage: &S,
    task: &str,
    files: &[(PathBuf, String)],
) -> Result<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S%3f");
    let archive_path = Path::new(BACKUP_DIR).join(format!("{}-{}.zip", task, stamp));

    let zip_data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (path, content) in files {
            // zip entries always use '/'
            let name = path.to_string_lossy().replace('\\', "/");
            zip.start_file(name, SimpleFileOptions::default())?;
            zip.write_all(content.as_bytes())?;
        }
        zip.finish()?.into_inner()
    };

    tracing::debug!(
        "Writing backup of {} files ({} bytes) to {}",
        files.len(),
        zip_data.len(),
        archive_path.display()
    );
    storage.write_file(&archive_path, &zip_data).await?;

    Ok(archive_path)
}
