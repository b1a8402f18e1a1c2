use thiserror::Error;

/// Exit code of a run whose batches finished but recorded failed files.
pub const FAILED_FILES_EXIT_CODE: i32 = 2;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Backup archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    RegexError(#[from] regex::Error),

    #[error("File discovery error: {0}")]
    GlobError(#[from] glob::PatternError),

    #[error("Could not walk the site tree: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("File is not valid UTF-8: {path}")]
    EncodingError { path: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Content,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HubError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HubError::ConfigValidationError { .. }
            | HubError::InvalidConfigValueError { .. }
            | HubError::MissingConfigError { .. }
            | HubError::UnknownCategory { .. }
            | HubError::GlobError(_) => ErrorCategory::Configuration,
            HubError::IoError(_) | HubError::EncodingError { .. } | HubError::WalkError(_) => {
                ErrorCategory::FileSystem
            }
            HubError::RegexError(_)
            | HubError::TemplateError { .. }
            | HubError::ProcessingError { .. } => ErrorCategory::Content,
            HubError::ZipError(_) | HubError::CsvError(_) | HubError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Content => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that aborted with this error.
    ///
    /// Never [`FAILED_FILES_EXIT_CODE`]: that one belongs to batches that finished.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HubError::IoError(_) => "Check that --root points at the site checkout and that files are writable",
            HubError::WalkError(_) => "Check that --root exists and is readable",
            HubError::EncodingError { .. } => "Re-save the file as UTF-8",
            HubError::ZipError(_) => "Check free disk space under <root>/.backups or run without --backup",
            HubError::CsvError(_) | HubError::SerializationError(_) => {
                "Check that the --report path is writable"
            }
            HubError::RegexError(_) => "Fix the pattern in the configuration file",
            HubError::GlobError(_) => "Category and directory names must not contain glob characters",
            HubError::ConfigValidationError { .. }
            | HubError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the TOML configuration"
            }
            HubError::MissingConfigError { .. } => "Add the missing section to the TOML configuration",
            HubError::UnknownCategory { .. } => {
                "Use one of: business, money, health, relationships, everyday, coding, content, ai-art"
            }
            HubError::TemplateError { .. } => "Check the placeholders used by the page template",
            HubError::ProcessingError { .. } => "Re-run with --verbose to see which file failed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HubError::IoError(e) => format!("Could not read or write a site file: {}", e),
            HubError::EncodingError { path } => format!("{} is not UTF-8 text", path),
            HubError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            HubError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not valid for {}: {}", value, field, reason)
            }
            HubError::MissingConfigError { field } => format!("{} is not configured", field),
            HubError::UnknownCategory { name } => format!("'{}' is not a known category", name),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = HubError::MissingConfigError {
            field: "banners.money".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.user_friendly_message(), "banners.money is not configured");
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = HubError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_per_category() {
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let walk = walkdir::WalkDir::new("/definitely/not/a/site/root")
            .into_iter()
            .find_map(|entry| entry.err())
            .unwrap();

        let cases: Vec<(HubError, ErrorCategory, i32)> = vec![
            (
                HubError::UnknownCategory { name: "garden".to_string() },
                ErrorCategory::Configuration,
                1,
            ),
            (
                HubError::InvalidConfigValueError {
                    field: "site.base_url".to_string(),
                    value: "x".to_string(),
                    reason: "bad".to_string(),
                },
                ErrorCategory::Configuration,
                1,
            ),
            (
                HubError::TemplateError { message: "missing value".to_string() },
                ErrorCategory::Content,
                1,
            ),
            (HubError::from(regex::Regex::new("(").unwrap_err()), ErrorCategory::Content, 1),
            (HubError::from(denied()), ErrorCategory::FileSystem, 3),
            (
                HubError::EncodingError { path: "a.html".to_string() },
                ErrorCategory::FileSystem,
                3,
            ),
            (HubError::from(walk), ErrorCategory::FileSystem, 3),
            (
                HubError::from(zip::result::ZipError::FileNotFound),
                ErrorCategory::Output,
                3,
            ),
            (HubError::from(csv::Error::from(denied())), ErrorCategory::Output, 3),
        ];

        for (err, category, code) in cases {
            assert_eq!(err.category(), category, "{}", err);
            assert_eq!(err.exit_code(), code, "{}", err);
            assert_ne!(err.exit_code(), FAILED_FILES_EXIT_CODE);
        }
    }
}
