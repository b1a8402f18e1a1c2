use crate::config::site_config::{AnalyticsConfig, ConsentConfig};
use crate::domain::model::{AffiliateProduct, Banner};
use crate::utils::error::Result;
use crate::utils::html::{escape_attr, escape_text, fill_template};
use std::collections::BTreeMap;

pub const PROMPT_PAGE: &str = include_str!("../../templates/prompt_page.html");
pub const AFFILIATE_CARD: &str = include_str!("../../templates/affiliate_card.html");
pub const BANNER: &str = include_str!("../../templates/banner.html");
pub const SITE_HEADER: &str = include_str!("../../templates/site_header.html");
pub const ANALYTICS_HEAD: &str = include_str!("../../templates/analytics_head.html");
pub const CONVERSION_TRACKER: &str = include_str!("../../templates/conversion_tracker.html");
pub const DASHBOARD: &str = include_str!("../../templates/dashboard.html");
pub const SECURITY_HEADERS: &str = include_str!("../../templates/security_headers.html");
pub const FEED_DISCOVERY: &str = include_str!("../../templates/feed_discovery.html");
pub const FEED_FOOTER_SECTION: &str = include_str!("../../templates/feed_footer_section.html");
pub const COOKIE_CONSENT_STYLE: &str = include_str!("../../templates/cookie_consent_style.html");
pub const COOKIE_CONSENT_BANNER: &str = include_str!("../../templates/cookie_consent_banner.html");
pub const COPY_BUTTON: &str = include_str!("../../templates/copy_button.html");
pub const COPY_BUTTON_STYLE: &str = include_str!("../../templates/copy_button_style.html");
pub const COPY_BUTTON_SCRIPT: &str = include_str!("../../templates/copy_button_script.html");

/// The category banner, unindented.
pub fn render_banner(banner: &Banner) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("heading", escape_text(&banner.heading));
    vars.insert("body", escape_text(&banner.body));
    vars.insert("cta", escape_text(&banner.cta));
    vars.insert("link", escape_attr(&banner.link));
    vars.insert("gradient", escape_attr(&banner.gradient));
    vars.insert("accent", escape_attr(&banner.accent));
    vars.insert("heading_color", escape_attr(&banner.heading_color));
    vars.insert("button_background", escape_attr(&banner.button_background));
    fill_template("banner", BANNER, &vars)
}

/// The "Works Better With" product card, unindented.
pub fn render_card(product: &AffiliateProduct) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("name", escape_text(&product.name));
    vars.insert("description", escape_text(&product.description));
    vars.insert("link", escape_attr(&product.link));
    fill_template("affiliate_card", AFFILIATE_CARD, &vars)
}

pub fn render_site_header(brand: &str) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("brand", escape_text(brand));
    fill_template("site_header", SITE_HEADER, &vars)
}

pub fn render_analytics_head(analytics: &AnalyticsConfig) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("ga_id", escape_attr(&analytics.ga_id));
    vars.insert("pixel_id", escape_attr(&analytics.pixel_id));
    vars.insert("hotjar_id", escape_attr(&analytics.hotjar_id));
    fill_template("analytics_head", ANALYTICS_HEAD, &vars)
}

pub fn render_conversion_tracker(prompts_dir: &str) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("prompts_dir", regex::escape(prompts_dir.trim_matches('/')).replace('/', "\\/"));
    fill_template("conversion_tracker", CONVERSION_TRACKER, &vars)
}

pub fn render_feed_discovery(brand: &str) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("brand", escape_attr(brand));
    fill_template("feed_discovery", FEED_DISCOVERY, &vars)
}

pub fn render_cookie_banner(consent: &ConsentConfig) -> Result<String> {
    let mut vars = BTreeMap::new();
    vars.insert("privacy_policy", escape_attr(&consent.privacy_policy));
    vars.insert("privacy_center", escape_attr(&consent.privacy_center));
    vars.insert("script", escape_attr(&consent.script));
    fill_template("cookie_consent_banner", COOKIE_CONSENT_BANNER, &vars)
}
