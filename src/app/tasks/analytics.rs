use crate::app::templates::{
    render_analytics_head, render_conversion_tracker, render_site_header, DASHBOARD,
};
use crate::config::SiteConfig;
use crate::domain::model::{Category, GeneratedPage, Page, PageTarget, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::{escape_text, fill_template, indent_block, insert_at};
use std::collections::BTreeMap;

pub const DASHBOARD_PATH: &str = "analytics-dashboard.html";

/// Installs the analytics head block and the conversion tracker.
pub struct SetupAnalytics {
    head: String,
    tracker: String,
}

impl SetupAnalytics {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            head: indent_block(&render_analytics_head(&config.analytics)?, "    "),
            tracker: indent_block(&render_conversion_tracker(&config.site.prompts_dir)?, "    "),
        })
    }
}

impl Rewrite for SetupAnalytics {
    fn name(&self) -> &'static str {
        "setup-analytics"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        let has_gtag = content.contains("gtag(");
        let has_tracker = content.contains("ConversionTracker");
        if has_gtag && has_tracker {
            return Ok(RewriteOutcome::unchanged("analytics already installed"));
        }

        let head_pos = content.find("</head>");
        let body_pos = content.rfind("</body>");
        let (Some(head_pos), Some(body_pos)) = (head_pos, body_pos) else {
            return Ok(RewriteOutcome::not_found("</head> and </body>"));
        };

        let mut notes = Vec::new();
        // </body> comes later in the file, so insert there first to keep head_pos valid.
        let mut updated = content.clone();
        if !has_tracker {
            updated = insert_at(&updated, body_pos, &format!("{}\n", self.tracker));
            notes.push("added conversion tracker".to_string());
        }
        if !has_gtag {
            updated = insert_at(&updated, head_pos, &format!("{}\n", self.head));
            notes.push("added analytics".to_string());
        }

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes,
        })
    }
}

/// The analytics dashboard written to the site root.
pub fn dashboard_page(config: &SiteConfig) -> Result<GeneratedPage> {
    let rows: Vec<String> = Category::ALL
        .iter()
        .map(|category| {
            let product = config
                .product_for(*category)
                .map(|(_, p)| format!("{} ({})", p.name, p.price))
                .unwrap_or_else(|| "no product".to_string());
            format!(
                "                <li>{}: {}</li>",
                category.title(),
                escape_text(&product)
            )
        })
        .collect();

    let mut vars = BTreeMap::new();
    vars.insert("brand", escape_text(&config.site.brand));
    vars.insert("base_url", escape_text(&config.site.base_url));
    vars.insert("ga_id", escape_text(&config.analytics.ga_id));
    vars.insert("site_header", indent_block(&render_site_header(&config.site.brand)?, "    "));
    vars.insert("category_rows", rows.join("\n"));

    Ok(GeneratedPage {
        target: PageTarget::new(DASHBOARD_PATH, None),
        content: fill_template("dashboard", DASHBOARD, &vars)?,
    })
}
