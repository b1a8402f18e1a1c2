use crate::config::SiteConfig;
use crate::domain::model::{Category, Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::escape_attr;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

static CLICKBANK_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href="https?://[^"]*clickbank[^"]*""#).expect("clickbank pattern is valid")
});

static PLACEHOLDER_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"(?s)<a href="#"([^>]*)>(.*?)</a>"##).expect("anchor pattern is valid"));

static CARD_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h3>\s*([^<]+?)\s*</h3>").expect("title pattern is valid"));

/// Sort `(from, to)` pairs longest `from` first and drop no-op pairs, so that no
/// entry rewrites text another entry already matched.
pub(crate) fn ordered_replacements(table: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = table
        .iter()
        .filter(|(from, to)| !from.is_empty() && from != to)
        .map(|(from, to)| (from.clone(), to.clone()))
        .collect();
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Replaces every occurrence of each known-broken URL.
pub struct FixLinks {
    fixes: Vec<(String, String)>,
}

impl FixLinks {
    pub fn new(table: &BTreeMap<String, String>) -> Self {
        Self {
            fixes: ordered_replacements(table),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.link_fixes)
    }
}

impl Rewrite for FixLinks {
    fn name(&self) -> &'static str {
        "fix-links"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let mut content = page.content.clone();
        let mut notes = Vec::new();

        for (from, to) in &self.fixes {
            let count = content.matches(from.as_str()).count();
            if count > 0 {
                content = content.replace(from.as_str(), to);
                notes.push(format!("{}x {} -> {}", count, from, to));
            }
        }

        if notes.is_empty() {
            return Ok(RewriteOutcome::unchanged("no broken links"));
        }
        Ok(RewriteOutcome::Updated { content, notes })
    }
}

/// Points every ClickBank link on a category page at that category's canonical link.
pub struct RetargetLinks {
    links: BTreeMap<Category, String>,
}

impl RetargetLinks {
    pub fn from_config(config: &SiteConfig) -> Self {
        let links = Category::ALL
            .into_iter()
            .filter_map(|c| config.category_link(c).map(|link| (c, link.to_string())))
            .collect();
        Self { links }
    }
}

impl Rewrite for RetargetLinks {
    fn name(&self) -> &'static str {
        "retarget-links"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let Some(category) = page.target.category else {
            return Ok(RewriteOutcome::unchanged("not a category page"));
        };
        let Some(link) = self.links.get(&category) else {
            return Ok(RewriteOutcome::unchanged(format!("no canonical link for {}", category)));
        };

        let count = CLICKBANK_HREF.find_iter(&page.content).count();
        if count == 0 {
            return Ok(RewriteOutcome::unchanged("no ClickBank links"));
        }

        let replacement = format!("href=\"{}\"", escape_attr(link));
        let content = CLICKBANK_HREF
            .replace_all(&page.content, regex::NoExpand(&replacement))
            .into_owned();

        Ok(RewriteOutcome::Updated {
            content,
            notes: vec![format!("{} links -> {}", count, link)],
        })
    }
}

/// Gives `href="#"` related-prompt cards the path their `<h3>` title maps to.
pub struct FixRelated {
    mappings: BTreeMap<String, String>,
}

impl FixRelated {
    pub fn new(mappings: BTreeMap<String, String>) -> Self {
        Self { mappings }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.related_links.clone())
    }
}

impl Rewrite for FixRelated {
    fn name(&self) -> &'static str {
        "fix-related"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        if !page.content.contains("href=\"#\"") {
            return Ok(RewriteOutcome::unchanged("no placeholder links"));
        }

        let mut notes = Vec::new();
        let content = PLACEHOLDER_ANCHOR.replace_all(&page.content, |caps: &Captures| {
            let inner = &caps[2];
            let mapped = CARD_TITLE
                .captures(inner)
                .and_then(|title| self.mappings.get_key_value(title[1].trim()));

            match mapped {
                Some((title, path)) => {
                    notes.push(format!("{} -> {}", title, path));
                    format!("<a href=\"{}\"{}>{}</a>", escape_attr(path), &caps[1], inner)
                }
                None => caps[0].to_string(),
            }
        });

        if notes.is_empty() {
            return Ok(RewriteOutcome::unchanged("no mapped placeholder links"));
        }
        Ok(RewriteOutcome::Updated {
            content: content.into_owned(),
            notes,
        })
    }
}
