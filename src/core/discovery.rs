use crate::domain::model::{Category, PageTarget};
use crate::utils::error::{HubError, Result};
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Pages that are listings or scaffolding, never prompt pages.
const NON_PROMPT_PAGES: [&str; 2] = ["index.html", "template.html"];

/// Prompt pages in `<root>/<prompts_dir>/<category>/*.html`, one directory level, sorted.
pub fn category_pages(root: &Path, prompts_dir: &str, categories: &[Category]) -> Result<Vec<PageTarget>> {
    let mut targets = Vec::new();

    for category in categories {
        let folder = root.join(prompts_dir).join(category.slug());
        if !folder.is_dir() {
            tracing::warn!("⚠️ Category folder doesn't exist: {}", folder.display());
            continue;
        }

        let pattern = format!(
            "{}/*.html",
            glob::Pattern::escape(&folder.to_string_lossy())
        );

        let mut found = 0;
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("⚠️ Unreadable entry in {}: {}", folder.display(), e);
                    continue;
                }
            };

            let is_prompt = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| !NON_PROMPT_PAGES.contains(&n))
                .unwrap_or(false);
            if !is_prompt {
                continue;
            }

            targets.push(PageTarget::new(relative_to(root, &path)?, Some(*category)));
            found += 1;
        }

        tracing::debug!("📁 {}: {} prompt pages", category, found);
    }

    targets.sort();
    Ok(targets)
}

/// Every `*.html` below `root`, skipping any directory whose name is in `skip_dirs`.
pub fn tree_pages(root: &Path, prompts_dir: &str, skip_dirs: &[String]) -> Result<Vec<PageTarget>> {
    let mut targets = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !skip_dirs
                .iter()
                .any(|skip| entry.file_name().to_string_lossy() == skip.as_str())
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // an unreadable root means there is no site to work on
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let is_html = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("html"))
            .unwrap_or(false);
        if !is_html {
            continue;
        }

        let relative = relative_to(root, entry.path())?;
        let category = category_of(&relative, prompts_dir);
        targets.push(PageTarget::new(relative, category));
    }

    targets.sort();
    Ok(targets)
}

/// Category of a root-relative path shaped like `<prompts_dir>/<category>/...`.
pub fn category_of(relative: &Path, prompts_dir: &str) -> Option<Category> {
    let mut parts = relative.components().filter_map(|c| match c {
        Component::Normal(part) => part.to_str(),
        _ => None,
    });

    let prompts_parts: Vec<&str> = prompts_dir.split('/').filter(|p| !p.is_empty()).collect();
    for expected in prompts_parts {
        if parts.next()? != expected {
            return None;
        }
    }

    let category = parts.next()?;
    // the category folder has to contain the page, not be the page
    parts.next()?;
    category.parse().ok()
}

fn relative_to(root: &Path, path: &Path) -> Result<std::path::PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| HubError::ProcessingError {
            message: format!("{} is outside of {}", path.display(), root.display()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, path: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "<html></html>").unwrap();
    }

    #[test]
    fn test_category_pages_skip_index_and_other_categories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "prompts/money/budget-optimizer.html");
        touch(root, "prompts/money/index.html");
        touch(root, "prompts/money/notes.txt");
        touch(root, "prompts/business/cold-email.html");

        let targets = category_pages(root, "prompts", &[Category::Money, Category::Health]).unwrap();

        assert_eq!(
            targets,
            vec![PageTarget::new("prompts/money/budget-optimizer.html", Some(Category::Money))]
        );
    }

    #[test]
    fn test_tree_pages_skips_configured_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "index.html");
        touch(root, "prompts/coding/api-builder.html");
        touch(root, "site-v2/index.html");
        touch(root, "node_modules/pkg/readme.html");

        let skip = vec!["site-v2".to_string(), "node_modules".to_string()];
        let targets = tree_pages(root, "prompts", &skip).unwrap();
        let paths: Vec<_> = targets.iter().map(|t| t.path.to_string_lossy().replace('\\', "/")).collect();

        assert_eq!(paths, vec!["index.html", "prompts/coding/api-builder.html"]);
        assert_eq!(targets[1].category, Some(Category::Coding));
        assert_eq!(targets[0].category, None);
    }

    #[test]
    fn test_tree_pages_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let err = tree_pages(&temp_dir.path().join("missing"), "prompts", &[]).unwrap_err();
        assert!(matches!(err, HubError::WalkError(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_tree_pages_skips_unreadable_dirs() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "index.html");
        touch(root, "locked/page.html");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = tree_pages(root, "prompts", &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let paths: Vec<_> = result
            .unwrap()
            .iter()
            .map(|t| t.path.to_string_lossy().replace('\\', "/"))
            .collect();
        assert!(paths.contains(&"index.html".to_string()));
    }

    #[test]
    fn test_category_of() {
        assert_eq!(
            category_of(Path::new("prompts/ai-art/logo.html"), "prompts"),
            Some(Category::AiArt)
        );
        assert_eq!(category_of(Path::new("prompts/index.html"), "prompts"), None);
        assert_eq!(category_of(Path::new("about.html"), "prompts"), None);
        assert_eq!(category_of(Path::new("prompts/archive/old.html"), "prompts"), None);
    }
}
