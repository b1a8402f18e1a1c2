use crate::utils::error::HubError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Business,
    Money,
    Health,
    Relationships,
    Everyday,
    Coding,
    Content,
    AiArt,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Money,
        Category::Business,
        Category::Relationships,
        Category::Health,
        Category::Everyday,
        Category::Coding,
        Category::Content,
        Category::AiArt,
    ];

    /// Directory name under `prompts/`.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Money => "money",
            Category::Health => "health",
            Category::Relationships => "relationships",
            Category::Everyday => "everyday",
            Category::Coding => "coding",
            Category::Content => "content",
            Category::AiArt => "ai-art",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Money => "Money",
            Category::Health => "Health",
            Category::Relationships => "Relationships",
            Category::Everyday => "Everyday",
            Category::Coding => "Coding",
            Category::Content => "Content",
            Category::AiArt => "AI Art",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| HubError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateProduct {
    pub name: String,
    pub price: String,
    pub description: String,
    pub link: String,
}

impl AffiliateProduct {
    /// Commission per sale as a number, e.g. `"$46.91"` -> `46.91`.
    pub fn price_value(&self) -> f64 {
        self.price
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .unwrap_or(0.0)
    }
}

/// Per-category gradient block inserted at the end of the article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub heading: String,
    pub body: String,
    pub cta: String,
    pub link: String,
    pub gradient: String,
    pub accent: String,
    #[serde(default = "default_white")]
    pub heading_color: String,
    #[serde(default = "default_white")]
    pub button_background: String,
}

fn default_white() -> String {
    "white".to_string()
}

/// One page to generate under `prompts/<category>/<slug>.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSpec {
    pub category: Category,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub body: Option<String>,
}

/// Every maintenance job the tool knows, in the names used on the command line
/// and in `[run] tasks = [...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    InjectBanners,
    InstallCards,
    MoveBanners,
    Generate,
    FixLinks,
    RetargetLinks,
    FixRelated,
    FixPaths,
    FixStylesheets,
    StandardizeHeaders,
    RemoveSections,
    ScrubClaims,
    ReplaceMarketingClaims,
    SetupAnalytics,
    AddSecurityHeaders,
    AddFeedLinks,
    AddCookieConsent,
    AddCopyButton,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::InjectBanners => "inject-banners",
            TaskKind::InstallCards => "install-cards",
            TaskKind::MoveBanners => "move-banners",
            TaskKind::Generate => "generate",
            TaskKind::FixLinks => "fix-links",
            TaskKind::RetargetLinks => "retarget-links",
            TaskKind::FixRelated => "fix-related",
            TaskKind::FixPaths => "fix-paths",
            TaskKind::FixStylesheets => "fix-stylesheets",
            TaskKind::StandardizeHeaders => "standardize-headers",
            TaskKind::RemoveSections => "remove-sections",
            TaskKind::ScrubClaims => "scrub-claims",
            TaskKind::ReplaceMarketingClaims => "replace-marketing-claims",
            TaskKind::SetupAnalytics => "setup-analytics",
            TaskKind::AddSecurityHeaders => "add-security-headers",
            TaskKind::AddFeedLinks => "add-feed-links",
            TaskKind::AddCookieConsent => "add-cookie-consent",
            TaskKind::AddCopyButton => "add-copy-button",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A discovered HTML file, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageTarget {
    pub path: PathBuf,
    pub category: Option<Category>,
}

impl PageTarget {
    pub fn new(path: impl Into<PathBuf>, category: Option<Category>) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub target: PageTarget,
    pub content: String,
}

/// A page produced from a template rather than rewritten in place.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub target: PageTarget,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RewriteOutcome {
    Updated { content: String, notes: Vec<String> },
    Unchanged { reason: String },
    PatternNotFound { pattern: String },
}

impl RewriteOutcome {
    pub fn updated(content: String) -> Self {
        RewriteOutcome::Updated {
            content,
            notes: Vec::new(),
        }
    }

    pub fn unchanged(reason: impl Into<String>) -> Self {
        RewriteOutcome::Unchanged {
            reason: reason.into(),
        }
    }

    pub fn not_found(pattern: impl Into<String>) -> Self {
        RewriteOutcome::PatternNotFound {
            pattern: pattern.into(),
        }
    }

    /// New page content, or `None` when the page stays as it is.
    pub fn content(&self) -> Option<&str> {
        match self {
            RewriteOutcome::Updated { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    Updated,
    Created,
    Skipped,
    PatternNotFound,
    Failed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileStatus::Updated => "updated",
            FileStatus::Created => "created",
            FileStatus::Skipped => "skipped",
            FileStatus::PatternNotFound => "pattern-not-found",
            FileStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub category: Option<Category>,
    pub status: FileStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub task: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub dry_run: bool,
    pub backup: Option<String>,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(task: impl Into<String>, dry_run: bool) -> Self {
        Self {
            task: task.into(),
            started_at: chrono::Utc::now(),
            dry_run,
            backup: None,
            files: Vec::new(),
        }
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Files whose content changed, or would have in a dry run.
    pub fn changed(&self) -> usize {
        self.count(FileStatus::Updated) + self.count(FileStatus::Created)
    }

    pub fn has_failures(&self) -> bool {
        self.count(FileStatus::Failed) > 0
    }

    pub fn merge(&mut self, other: BatchReport) {
        if self.backup.is_none() {
            self.backup = other.backup;
        }
        self.files.extend(other.files);
    }
}
