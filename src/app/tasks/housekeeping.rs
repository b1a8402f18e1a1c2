//! Site-wide boilerplate: asset paths, stylesheet links and the navigation header.

use crate::app::tasks::links::ordered_replacements;
use crate::app::templates::render_site_header;
use crate::config::SiteConfig;
use crate::domain::model::{Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::{indent_block, insert_at};
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<title>.*?</title>").expect("title pattern is valid"));

static PLAIN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[ \t]*<header>.*?</header>").expect("header pattern is valid"));

pub struct FixPaths {
    rewrites: Vec<(String, String)>,
    brand_link: Regex,
    brand_home: String,
}

impl FixPaths {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let brand = regex::escape(&config.site.brand);
        Ok(Self {
            rewrites: ordered_replacements(&config.paths.rewrites),
            brand_link: Regex::new(&format!(r#"<h1><a href="[^"]*">{}</a></h1>"#, brand))?,
            brand_home: format!(r#"<h1><a href="/">{}</a></h1>"#, config.site.brand),
        })
    }
}

impl Rewrite for FixPaths {
    fn name(&self) -> &'static str {
        "fix-paths"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let mut content = page.content.clone();
        let mut notes = Vec::new();

        for (from, to) in &self.rewrites {
            let count = content.matches(from.as_str()).count();
            if count > 0 {
                content = content.replace(from.as_str(), to);
                notes.push(format!("{}x {} -> {}", count, from, to));
            }
        }

        let brand_links = self
            .brand_link
            .find_iter(&content)
            .filter(|m| m.as_str() != self.brand_home)
            .count();
        if brand_links > 0 {
            content = self
                .brand_link
                .replace_all(&content, regex::NoExpand(&self.brand_home))
                .into_owned();
            notes.push("brand header -> /".to_string());
        }

        if notes.is_empty() {
            return Ok(RewriteOutcome::unchanged("paths already absolute"));
        }
        Ok(RewriteOutcome::Updated { content, notes })
    }
}

/// Adds missing stylesheet links right after `</title>`.
pub struct FixStylesheets {
    hrefs: Vec<(String, Regex)>,
}

impl FixStylesheets {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let hrefs = config
            .paths
            .stylesheets
            .iter()
            .map(|href| -> Result<(String, Regex)> {
                let present = Regex::new(&format!(r#"<link\b[^>]*\bhref="{}"[^>]*>"#, regex::escape(href)))?;
                Ok((href.clone(), present))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { hrefs })
    }
}

impl Rewrite for FixStylesheets {
    fn name(&self) -> &'static str {
        "fix-stylesheets"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let missing: Vec<&str> = self
            .hrefs
            .iter()
            .filter(|(_, present)| !present.is_match(&page.content))
            .map(|(href, _)| href.as_str())
            .collect();

        if missing.is_empty() {
            return Ok(RewriteOutcome::unchanged("stylesheets present"));
        }

        let Some(title) = TITLE_CLOSE.find(&page.content) else {
            return Ok(RewriteOutcome::not_found("</title>"));
        };

        let block: String = missing
            .iter()
            .map(|href| format!("\n    <link rel=\"stylesheet\" href=\"{}\">", href))
            .collect();

        Ok(RewriteOutcome::Updated {
            content: insert_at(&page.content, title.end(), &block),
            notes: missing.iter().map(|href| format!("added {}", href)).collect(),
        })
    }
}

/// Swaps a bare `<header>` for the standard navigation header.
pub struct StandardizeHeaders {
    header: String,
    script: String,
}

impl StandardizeHeaders {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            header: render_site_header(&config.site.brand)?,
            script: config.paths.script.clone(),
        })
    }
}

impl Rewrite for StandardizeHeaders {
    fn name(&self) -> &'static str {
        "standardize-headers"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        if content.contains("site-header") && content.contains("mobile-menu-toggle") {
            return Ok(RewriteOutcome::unchanged("standard header present"));
        }

        let Some(old) = PLAIN_HEADER.find(content) else {
            return Ok(RewriteOutcome::not_found("<header>"));
        };

        let indent: String = old.as_str().chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        let mut updated = String::with_capacity(content.len() + self.header.len());
        updated.push_str(&content[..old.start()]);
        updated.push_str(&indent_block(&self.header, if indent.is_empty() { "    " } else { indent.as_str() }));
        updated.push_str(&content[old.end()..]);

        let mut notes = vec!["replaced header".to_string()];
        if !updated.contains(self.script.as_str()) {
            if let Some(pos) = updated.find("</head>") {
                let tag = format!("    <script src=\"{}\" defer></script>\n", self.script);
                updated = insert_at(&updated, pos, &tag);
                notes.push(format!("added {}", self.script));
            }
        }

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageTarget;
    use pretty_assertions::assert_eq;

    fn page(content: &str) -> Page {
        Page {
            target: PageTarget::new("prompts/money/a.html", None),
            content: content.to_string(),
        }
    }

    fn updated(outcome: RewriteOutcome) -> String {
        match outcome {
            RewriteOutcome::Updated { content, .. } => content,
            other => panic!("expected an update, got {:?}", other),
        }
    }

    #[test]
    fn test_fix_paths() {
        let task = FixPaths::from_config(&SiteConfig::default()).unwrap();
        let html = concat!(
            "<link rel=\"stylesheet\" href=\"../../style.css\">\n",
            "<script src=\"../../script.js\"></script>\n",
            "<a href=\"../index.html\">Home</a>\n",
            "<h1><a href=\"../../index.html\">FreePromptHub</a></h1>\n",
            "<img src=\"../img/logo.png\">\n",
        );

        assert_eq!(
            updated(task.rewrite(&page(html)).unwrap()),
            concat!(
                "<link rel=\"stylesheet\" href=\"/style.css\">\n",
                "<script src=\"/script.js\"></script>\n",
                "<a href=\"/\">Home</a>\n",
                "<h1><a href=\"/\">FreePromptHub</a></h1>\n",
                "<img src=\"../img/logo.png\">\n",
            )
        );
    }

    #[test]
    fn test_fix_paths_brand_header_from_other_location() {
        let task = FixPaths::from_config(&SiteConfig::default()).unwrap();
        let out = updated(
            task.rewrite(&page("<h1><a href=\"home.html\">FreePromptHub</a></h1>"))
                .unwrap(),
        );
        assert_eq!(out, "<h1><a href=\"/\">FreePromptHub</a></h1>");

        let again = task.rewrite(&page(&out)).unwrap();
        assert!(matches!(again, RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_fix_stylesheets_adds_only_missing() {
        let task = FixStylesheets::from_config(&SiteConfig::default()).unwrap();
        let html = "<head>\n    <title>T</title>\n    <link rel=\"stylesheet\" href=\"/style.css\">\n</head>";

        let out = updated(task.rewrite(&page(html)).unwrap());
        assert_eq!(
            out,
            "<head>\n    <title>T</title>\n    <link rel=\"stylesheet\" href=\"/css/dark-mode.css\">\n    <link rel=\"stylesheet\" href=\"/style.css\">\n</head>"
        );
        assert!(matches!(task.rewrite(&page(&out)).unwrap(), RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_fix_stylesheets_needs_title() {
        let task = FixStylesheets::from_config(&SiteConfig::default()).unwrap();
        let outcome = task.rewrite(&page("<head></head>")).unwrap();
        assert_eq!(outcome, RewriteOutcome::not_found("</title>"));
    }

    #[test]
    fn test_standardize_header_and_script() {
        let task = StandardizeHeaders::from_config(&SiteConfig::default()).unwrap();
        let html = "<head>\n    <title>T</title>\n</head>\n<body>\n    <header>\n        <h1>Old</h1>\n    </header>\n</body>";

        let out = updated(task.rewrite(&page(html)).unwrap());
        assert!(out.contains("    <header class=\"site-header\">"));
        assert!(!out.contains("<h1>Old</h1>"));
        assert!(out.contains("    <script src=\"/script.js\" defer></script>\n</head>"));
        assert_eq!(out.matches("<header").count(), 1);

        assert!(matches!(task.rewrite(&page(&out)).unwrap(), RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_standardize_keeps_existing_script() {
        let task = StandardizeHeaders::from_config(&SiteConfig::default()).unwrap();
        let html = "<head><script src=\"/script.js\"></script></head><header>x</header>";
        let out = updated(task.rewrite(&page(html)).unwrap());
        assert_eq!(out.matches("/script.js").count(), 1);
    }

    #[test]
    fn test_standardize_keeps_versioned_or_single_quoted_script() {
        let task = StandardizeHeaders::from_config(&SiteConfig::default()).unwrap();
        for head in [
            "<head><script src=\"/script.js?v=3\" defer></script></head>",
            "<head><script src='/script.js'></script></head>",
        ] {
            let html = format!("{}<body><header>x</header></body>", head);
            let out = updated(task.rewrite(&page(&html)).unwrap());
            assert_eq!(out.matches("/script.js").count(), 1, "{}", head);
            assert!(out.contains("class=\"site-header\""));
        }
    }

    #[test]
    fn test_standardize_needs_header() {
        let task = StandardizeHeaders::from_config(&SiteConfig::default()).unwrap();
        let outcome = task.rewrite(&page("<body><header class=\"x\"></header></body>")).unwrap();
        assert_eq!(outcome, RewriteOutcome::not_found("<header>"));
    }
}
