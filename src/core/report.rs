use crate::domain::model::BatchReport;
use crate::utils::error::{HubError, Result};
use crate::utils::validation::validate_file_extensions;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    task: &'a str,
    path: &'a str,
    category: &'a str,
    status: String,
    detail: &'a str,
}

/// Write run reports as `.json` (full structure) or `.csv` (one row per file).
pub fn write_report(path: &Path, reports: &[BatchReport]) -> Result<()> {
    let display = path.to_string_lossy().to_string();
    validate_file_extensions("report", std::slice::from_ref(&display), &["json", "csv"])?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let json = serde_json::to_string_pretty(reports)?;
            std::fs::write(path, json)?;
        }
        Some("csv") => {
            let mut writer = csv::Writer::from_path(path)?;
            for report in reports {
                for file in &report.files {
                    writer.serialize(CsvRow {
                        task: &report.task,
                        path: &file.path,
                        category: file.category.map(|c| c.slug()).unwrap_or(""),
                        status: file.status.to_string(),
                        detail: &file.detail,
                    })?;
                }
            }
            writer.flush()?;
        }
        _ => {
            return Err(HubError::InvalidConfigValueError {
                field: "report".to_string(),
                value: display,
                reason: "Report must end in .json or .csv".to_string(),
            })
        }
    }

    tracing::info!("📁 Report saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, FileReport, FileStatus};
    use tempfile::TempDir;

    fn sample() -> BatchReport {
        let mut report = BatchReport::new("scrub-claims", false);
        report.files.push(FileReport {
            path: "prompts/money/budget.html".to_string(),
            category: Some(Category::Money),
            status: FileStatus::Updated,
            detail: "removed 2 claims".to_string(),
        });
        report
    }

    #[test]
    fn test_csv_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/report.csv");

        write_report(&path, &[sample()]).unwrap();

        let csv = std::fs::read_to_string(path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("task,path,category,status,detail"));
        assert_eq!(
            lines.next(),
            Some("scrub-claims,prompts/money/budget.html,money,updated,removed 2 claims")
        );
    }

    #[test]
    fn test_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        write_report(&path, &[sample()]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value[0]["task"], "scrub-claims");
        assert_eq!(value[0]["files"][0]["status"], "updated");
        assert_eq!(value[0]["files"][0]["category"], "money");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        assert!(write_report(&temp_dir.path().join("report.txt"), &[sample()]).is_err());
    }
}
