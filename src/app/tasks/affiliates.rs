//! Affiliate blocks: the per-category banner, the product card and moving the
//! banner to the top of the page.

use crate::app::templates::{render_banner, render_card};
use crate::config::SiteConfig;
use crate::domain::model::{AffiliateProduct, Category, Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::{indent_before, indent_block, insert_at};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub const BANNER_MARKER: &str = "<!-- Affiliate Recommendation -->";
pub const BANNER_CLASS: &str = "affiliate-section";
pub const CARD_CLASS: &str = "affiliate-recommendation";

static FOOTER_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<footer[^>]*>").expect("footer pattern is valid"));

static BANNER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)([ \t]*(?:<!-- Affiliate Recommendation -->\s*)?<section class="[^"]*\baffiliate-section\b[^"]*"[^>]*>.*?</section>)[ \t]*\n?"#,
    )
    .expect("banner pattern is valid")
});

/// Where a moved banner goes, most specific first.
static TOP_ANCHORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?s)</nav>\s*<main[^>]*>\s*<div[^>]*>",
        r"(?s)<main[^>]*>\s*<div[^>]*>",
        r#"<article class="prompt-display">"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("anchor pattern is valid"))
    .collect()
});

fn category_or_skip(page: &Page) -> std::result::Result<Category, RewriteOutcome> {
    page.target
        .category
        .ok_or_else(|| RewriteOutcome::unchanged("not a category page"))
}

/// Inserts the category banner right before the first `</article>`.
pub struct InjectBanners {
    banners: BTreeMap<Category, String>,
}

impl InjectBanners {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let mut banners = BTreeMap::new();
        for category in Category::ALL {
            if let Some(banner) = config.banner_for(category) {
                banners.insert(category, render_banner(banner)?);
            }
        }
        Ok(Self { banners })
    }
}

impl Rewrite for InjectBanners {
    fn name(&self) -> &'static str {
        "inject-banners"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let category = match category_or_skip(page) {
            Ok(category) => category,
            Err(outcome) => return Ok(outcome),
        };

        let content = &page.content;
        if content.contains(BANNER_MARKER) || content.contains(BANNER_CLASS) {
            return Ok(RewriteOutcome::unchanged("banner already present"));
        }

        let Some(banner) = self.banners.get(&category) else {
            return Ok(RewriteOutcome::unchanged(format!("no banner configured for {}", category)));
        };

        let Some(pos) = content.find("</article>") else {
            return Ok(RewriteOutcome::not_found("</article>"));
        };

        let indent = indent_before(content, pos);
        let updated = if indent.is_empty() && !content[..pos].ends_with('\n') {
            insert_at(content, pos, &format!("\n{}\n", indent_block(banner, "    ")))
        } else {
            let line_start = pos - indent.len();
            let block = indent_block(banner, &format!("{}    ", indent));
            insert_at(content, line_start, &format!("{}\n", block))
        };

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes: vec![format!("added {} banner", category)],
        })
    }
}

/// Inserts the category's product card before the footer.
pub struct InstallCards {
    cards: BTreeMap<Category, (AffiliateProduct, String)>,
}

impl InstallCards {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let mut cards = BTreeMap::new();
        for category in Category::ALL {
            if let Some((_, product)) = config.product_for(category) {
                cards.insert(category, (product.clone(), render_card(product)?));
            }
        }
        Ok(Self { cards })
    }

    pub fn product(&self, category: Category) -> Option<&AffiliateProduct> {
        self.cards.get(&category).map(|(product, _)| product)
    }
}

impl Rewrite for InstallCards {
    fn name(&self) -> &'static str {
        "install-cards"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let category = match category_or_skip(page) {
            Ok(category) => category,
            Err(outcome) => return Ok(outcome),
        };

        let content = &page.content;
        if content.contains(CARD_CLASS) {
            return Ok(RewriteOutcome::unchanged("card already present"));
        }

        let Some((product, card)) = self.cards.get(&category) else {
            return Ok(RewriteOutcome::unchanged(format!("no product mapped to {}", category)));
        };

        let updated = if let Some(footer) = FOOTER_OPEN.find(content) {
            let indent = indent_before(content, footer.start());
            let line_start = footer.start() - indent.len();
            let block = indent_block(card, &format!("{}    ", indent));
            insert_at(content, line_start, &format!("{}\n", block))
        } else if let Some(pos) = content.rfind("</body>") {
            insert_at(content, pos, &format!("{}\n", indent_block(card, "    ")))
        } else {
            return Ok(RewriteOutcome::not_found("<footer> or </body>"));
        };

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes: vec![format!("added {} ({})", product.name, product.price)],
        })
    }
}

/// Moves the first banner block to the top of the page content.
pub struct MoveBanners;

impl Rewrite for MoveBanners {
    fn name(&self) -> &'static str {
        "move-banners"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        let Some(caps) = BANNER_BLOCK.captures(content) else {
            return Ok(RewriteOutcome::unchanged("no banner on page"));
        };
        let (Some(whole), Some(block)) = (caps.get(0), caps.get(1)) else {
            return Ok(RewriteOutcome::unchanged("no banner on page"));
        };

        let mut without = String::with_capacity(content.len());
        without.push_str(&content[..whole.start()]);
        without.push_str(&content[whole.end()..]);

        let Some(anchor) = TOP_ANCHORS.iter().find_map(|re| re.find(&without)) else {
            return Ok(RewriteOutcome::not_found("<main> or <article class=\"prompt-display\">"));
        };

        let updated = insert_at(&without, anchor.end(), &format!("\n{}", block.as_str()));
        if updated == *content {
            return Ok(RewriteOutcome::unchanged("banner already at the top"));
        }

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes: vec!["moved banner to the top".to_string()],
        })
    }
}
