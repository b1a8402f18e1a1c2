//! Prompt pages built from the `[[prompts]]` catalogue.

use crate::app::templates::{
    render_analytics_head, render_card, render_conversion_tracker, render_site_header, PROMPT_PAGE,
};
use crate::config::SiteConfig;
use crate::domain::model::{Category, GeneratedPage, PageTarget, PromptSpec};
use crate::utils::error::Result;
use crate::utils::html::{escape_attr, escape_text, fill_template, indent_block};
use crate::utils::validation::validate_slug;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub fn default_keywords(spec: &PromptSpec) -> String {
    format!(
        "{}, {}, professional guide, strategy",
        spec.slug.replace('-', " "),
        spec.category.slug()
    )
}

pub fn default_body(title: &str) -> String {
    format!(
        r#"Create a comprehensive {} for my situation:

**Current Situation:**
- Describe your current situation: [YOUR CURRENT STATE]
- Main challenges you're facing: [SPECIFIC CHALLENGES]
- Goals and objectives: [WHAT YOU WANT TO ACHIEVE]
- Timeline for results: [WHEN YOU NEED THIS]
- Resources available: [TIME/BUDGET/TEAM/TOOLS]

**Detailed Analysis:**
Please provide a thorough analysis including:

1. **Assessment & Evaluation**
   - Current state analysis
   - Strengths and weaknesses identification
   - Opportunities and threats
   - Gap analysis between current and desired state

2. **Strategic Planning**
   - Step-by-step action plan
   - Priority ranking and sequencing
   - Resource allocation recommendations
   - Risk assessment and mitigation

3. **Implementation Framework**
   - Specific tactics and methods
   - Tools and resources needed
   - Timeline and milestones
   - Success metrics and KPIs

4. **Best Practices**
   - Industry standards and benchmarks
   - Proven strategies and methods
   - Common mistakes to avoid
   - Expert tips and insights

**Specific Requirements:**
- Focus area: [YOUR SPECIFIC FOCUS]
- Constraints to consider: [LIMITATIONS/RESTRICTIONS]
- Success definition: [HOW YOU'LL MEASURE SUCCESS]
- Stakeholders involved: [WHO ELSE IS AFFECTED]

**Expected Outcomes:**
Please provide:
- Actionable recommendations with clear next steps
- Templates, checklists, or frameworks where applicable
- Resource recommendations (tools, books, courses)
- Timeline estimates for implementation
- Warning signs and troubleshooting guidance

Make all advice practical, specific, and immediately actionable."#,
        title.to_lowercase()
    )
}

/// Renders catalogue entries into pages. The shared blocks are rendered once.
pub struct PromptPageRenderer<'a> {
    config: &'a SiteConfig,
    analytics_head: String,
    conversion_tracker: String,
    site_header: String,
    year: i32,
}

impl<'a> PromptPageRenderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Result<Self> {
        Ok(Self {
            config,
            analytics_head: indent_block(&render_analytics_head(&config.analytics)?, "    "),
            conversion_tracker: indent_block(&render_conversion_tracker(&config.site.prompts_dir)?, "    "),
            site_header: indent_block(&render_site_header(&config.site.brand)?, "    "),
            year: chrono::Utc::now().year(),
        })
    }

    pub fn target(&self, spec: &PromptSpec) -> PageTarget {
        let path = PathBuf::from(&self.config.site.prompts_dir)
            .join(spec.category.slug())
            .join(format!("{}.html", spec.slug));
        PageTarget::new(path, Some(spec.category))
    }

    pub fn render(&self, spec: &PromptSpec) -> Result<GeneratedPage> {
        validate_slug("prompts.slug", &spec.slug)?;

        let product = self.config.product_for(spec.category);
        let affiliate_section = match product {
            Some((_, product)) => indent_block(&render_card(product)?, "        "),
            None => String::new(),
        };
        let keywords = spec.keywords.clone().unwrap_or_else(|| default_keywords(spec));
        let body = spec.body.clone().unwrap_or_else(|| default_body(&spec.title));

        let mut vars = BTreeMap::new();
        vars.insert("title", escape_attr(&spec.title));
        vars.insert("description", escape_attr(&spec.description));
        vars.insert("keywords", escape_attr(&keywords));
        vars.insert("category", spec.category.slug().to_string());
        vars.insert("category_title", spec.category.title().to_string());
        vars.insert("filename", spec.slug.clone());
        vars.insert("prompt_text", escape_text(&body));
        vars.insert("affiliate_section", affiliate_section);
        vars.insert(
            "affiliate_product",
            product.map(|(key, _)| key.to_string()).unwrap_or_else(|| "none".to_string()),
        );
        vars.insert("brand", escape_text(&self.config.site.brand));
        vars.insert("base_url", self.config.site.base_url.trim_end_matches('/').to_string());
        vars.insert("prompts_dir", self.config.site.prompts_dir.trim_matches('/').to_string());
        vars.insert("analytics_head", self.analytics_head.clone());
        vars.insert("conversion_tracker", self.conversion_tracker.clone());
        vars.insert("site_header", self.site_header.clone());
        vars.insert("year", self.year.to_string());

        Ok(GeneratedPage {
            target: self.target(spec),
            content: fill_template("prompt_page", PROMPT_PAGE, &vars)?,
        })
    }
}

/// Every catalogue page in the selected categories.
pub fn render_catalogue(config: &SiteConfig, categories: &[Category]) -> Result<Vec<GeneratedPage>> {
    let renderer = PromptPageRenderer::new(config)?;
    config
        .prompts
        .iter()
        .filter(|spec| categories.contains(&spec.category))
        .map(|spec| renderer.render(spec))
        .collect()
}
