use crate::config::defaults;
use crate::domain::model::{AffiliateProduct, Banner, Category, PromptSpec, TaskKind};
use crate::utils::error::{HubError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_site_path, validate_slug, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Everything the maintenance jobs need to know about the site.
///
/// Each table defaults to the built-in FreePromptHub data. A table present in the
/// TOML file replaces the built-in one as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub affiliates: BTreeMap<String, AffiliateProduct>,
    pub category_affiliates: BTreeMap<String, String>,
    pub banners: BTreeMap<String, Banner>,
    pub link_fixes: BTreeMap<String, String>,
    pub category_links: BTreeMap<String, String>,
    pub related_links: BTreeMap<String, String>,
    pub paths: PathsConfig,
    pub cleanup: CleanupConfig,
    pub analytics: AnalyticsConfig,
    pub feeds: FeedsConfig,
    pub consent: ConsentConfig,
    pub prompts: Vec<PromptSpec>,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub brand: String,
    pub base_url: String,
    pub prompts_dir: String,
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub rewrites: BTreeMap<String, String>,
    pub stylesheets: Vec<String>,
    pub script: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReplacement {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Section classes whose presence marks a page for cleanup.
    pub sections: Vec<String>,
    /// Removed alongside `sections`, but only from pages that had one of them.
    pub companion_sections: Vec<String>,
    pub claims: Vec<ClaimReplacement>,
    /// Inflated figures swapped for factual wording by `replace-marketing-claims`.
    pub marketing_claims: Vec<ClaimReplacement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub ga_id: String,
    pub pixel_id: String,
    pub hotjar_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Root-relative pages whose footer gets the sitemap and RSS links.
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    pub script: String,
    pub privacy_policy: String,
    pub privacy_center: String,
    /// File names that never get the banner.
    pub skip_pages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tasks: Vec<TaskKind>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            brand: "FreePromptHub".to_string(),
            base_url: "https://freeprompt.hub".to_string(),
            prompts_dir: "prompts".to_string(),
            skip_dirs: vec![
                "site-v2".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
                crate::core::backup::BACKUP_DIR.to_string(),
            ],
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            rewrites: defaults::path_rewrites(),
            stylesheets: defaults::stylesheets(),
            script: "/script.js".to_string(),
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            sections: vec!["works-best-with".to_string()],
            companion_sections: vec!["tools-grid".to_string()],
            claims: claim_table(defaults::claim_replacements()),
            marketing_claims: claim_table(defaults::marketing_claims()),
        }
    }
}

fn claim_table(pairs: Vec<(String, String)>) -> Vec<ClaimReplacement> {
    pairs
        .into_iter()
        .map(|(from, to)| ClaimReplacement { from, to })
        .collect()
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            pages: defaults::feed_pages(),
        }
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            script: "/js/cookie-consent.js".to_string(),
            privacy_policy: "/privacy-policy.html".to_string(),
            privacy_center: "/privacy-center.html".to_string(),
            skip_pages: vec!["privacy-center.html".to_string()],
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            ga_id: "G-XXXXXXXXXX".to_string(),
            pixel_id: "YOUR_PIXEL_ID".to_string(),
            hotjar_id: "YOUR_HOTJAR_ID".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            affiliates: defaults::affiliates(),
            category_affiliates: defaults::category_affiliates(),
            banners: defaults::banners(),
            link_fixes: defaults::link_fixes(),
            category_links: defaults::category_links(),
            related_links: defaults::related_links(),
            paths: PathsConfig::default(),
            cleanup: CleanupConfig::default(),
            analytics: AnalyticsConfig::default(),
            feeds: FeedsConfig::default(),
            consent: ConsentConfig::default(),
            prompts: defaults::prompts(),
            run: RunConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HubError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HubError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` references (e.g. `${GA_MEASUREMENT_ID}`) with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Product promoted on pages of `category`.
    pub fn product_for(&self, category: Category) -> Option<(&str, &AffiliateProduct)> {
        let key = self.category_affiliates.get(category.slug())?;
        self.affiliates.get(key).map(|p| (key.as_str(), p))
    }

    pub fn banner_for(&self, category: Category) -> Option<&Banner> {
        self.banners.get(category.slug())
    }

    pub fn category_link(&self, category: Category) -> Option<&str> {
        self.category_links.get(category.slug()).map(String::as_str)
    }

    /// Lookups use the exact slug, so `Money` or ` money` would never match.
    fn validate_category_keys<V>(field: &str, map: &BTreeMap<String, V>) -> Result<()> {
        for key in map.keys() {
            let category = key.parse::<Category>().map_err(|_| HubError::InvalidConfigValueError {
                field: field.to_string(),
                value: key.clone(),
                reason: "Not a known category".to_string(),
            })?;
            if key != category.slug() {
                return Err(HubError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: key.clone(),
                    reason: format!("Category keys are lowercase slugs; use '{}'", category.slug()),
                });
            }
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("site.base_url", &self.site.base_url)?;
        validate_path("site.prompts_dir", &self.site.prompts_dir)?;
        validate_non_empty_string("site.brand", &self.site.brand)?;

        for (key, product) in &self.affiliates {
            validate_non_empty_string(&format!("affiliates.{}.name", key), &product.name)?;
            validate_url(&format!("affiliates.{}.link", key), &product.link)?;
        }

        Self::validate_category_keys("category_affiliates", &self.category_affiliates)?;
        for (category, key) in &self.category_affiliates {
            if !self.affiliates.contains_key(key) {
                return Err(HubError::InvalidConfigValueError {
                    field: format!("category_affiliates.{}", category),
                    value: key.clone(),
                    reason: "No product with this key under [affiliates]".to_string(),
                });
            }
        }

        Self::validate_category_keys("banners", &self.banners)?;
        for (category, banner) in &self.banners {
            validate_url(&format!("banners.{}.link", category), &banner.link)?;
            validate_non_empty_string(&format!("banners.{}.heading", category), &banner.heading)?;
        }

        Self::validate_category_keys("category_links", &self.category_links)?;
        for (category, link) in &self.category_links {
            validate_url(&format!("category_links.{}", category), link)?;
        }

        for (from, to) in &self.link_fixes {
            validate_non_empty_string("link_fixes", from)?;
            validate_url(&format!("link_fixes.\"{}\"", from), to)?;
        }

        for (title, path) in &self.related_links {
            validate_site_path(&format!("related_links.\"{}\"", title), path)?;
        }

        for from in self.paths.rewrites.keys() {
            validate_non_empty_string("paths.rewrites", from)?;
        }
        for claim in &self.cleanup.claims {
            validate_non_empty_string("cleanup.claims.from", &claim.from)?;
        }
        for claim in &self.cleanup.marketing_claims {
            validate_non_empty_string("cleanup.marketing_claims.from", &claim.from)?;
        }

        for page in &self.feeds.pages {
            validate_path("feeds.pages", page)?;
        }
        validate_site_path("consent.script", &self.consent.script)?;
        validate_site_path("consent.privacy_policy", &self.consent.privacy_policy)?;
        validate_site_path("consent.privacy_center", &self.consent.privacy_center)?;

        let mut seen = HashSet::new();
        for (i, prompt) in self.prompts.iter().enumerate() {
            validate_slug(&format!("prompts[{}].slug", i), &prompt.slug)?;
            validate_non_empty_string(&format!("prompts[{}].title", i), &prompt.title)?;
            if !seen.insert((prompt.category, prompt.slug.as_str())) {
                return Err(HubError::ConfigValidationError {
                    field: format!("prompts[{}]", i),
                    message: format!("{}/{} is listed twice", prompt.category, prompt.slug),
                });
            }
        }

        Ok(())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prompts.len(), 50);
        assert_eq!(config.prompts.iter().filter(|p| p.body.is_some()).count(), 30);
        assert!(config
            .prompts
            .iter()
            .any(|p| p.slug == "investor-pitch-deck" && p.category == Category::Business));

        let (key, product) = config.product_for(Category::Money).unwrap();
        assert_eq!(key, "billionaire-brain-wave");
        assert_eq!(product.price, "$42.32");
        assert!(config.banner_for(Category::AiArt).is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml_content = r#"
[site]
base_url = "https://example.org"

[link_fixes]
"https://old.hop.clickbank.net" = "https://new.hop.clickbank.net"

[run]
tasks = ["fix-links", "scrub-claims"]
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.site.base_url, "https://example.org");
        assert_eq!(config.site.prompts_dir, "prompts");
        assert_eq!(config.link_fixes.len(), 1);
        assert_eq!(config.run.tasks, vec![TaskKind::FixLinks, TaskKind::ScrubClaims]);
        assert_eq!(config.affiliates.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prompts_table() {
        let toml_content = r#"
[[prompts]]
category = "ai-art"
slug = "poster-prompts"
title = "Poster Prompt Pack"
description = "Poster prompts"
keywords = "poster, ai art"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.prompts.len(), 1);
        assert_eq!(config.prompts[0].category, Category::AiArt);
        assert_eq!(config.prompts[0].keywords.as_deref(), Some("poster, ai art"));
        assert!(config.prompts[0].body.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROMPTHUB_TEST_GA_ID", "G-TEST1234");

        let toml_content = r#"
[analytics]
ga_id = "${PROMPTHUB_TEST_GA_ID}"
pixel_id = "${PROMPTHUB_TEST_UNSET_PIXEL}"
hotjar_id = "123"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.analytics.ga_id, "G-TEST1234");
        assert_eq!(config.analytics.pixel_id, "${PROMPTHUB_TEST_UNSET_PIXEL}");

        std::env::remove_var("PROMPTHUB_TEST_GA_ID");
    }

    #[test]
    fn test_config_validation() {
        let bad_link = r#"
[category_links]
money = "hop.clickbank.net/?vendor=x"
"#;
        assert!(SiteConfig::from_toml_str(bad_link).unwrap().validate().is_err());

        let bad_category = r#"
[category_links]
gardening = "https://x.hop.clickbank.net"
"#;
        assert!(SiteConfig::from_toml_str(bad_category).unwrap().validate().is_err());

        let dangling_product = r#"
[category_affiliates]
money = "does-not-exist"
"#;
        assert!(SiteConfig::from_toml_str(dangling_product).unwrap().validate().is_err());

        let capitalised = r#"
[category_links]
Money = "https://new.hop.clickbank.net"
"#;
        let err = SiteConfig::from_toml_str(capitalised).unwrap().validate().unwrap_err();
        assert!(matches!(
            err,
            HubError::InvalidConfigValueError { ref field, ref value, .. }
                if field == "category_links" && value == "Money"
        ));

        let unknown_task = r#"
[run]
tasks = ["launch-rockets"]
"#;
        assert!(SiteConfig::from_toml_str(unknown_task).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[site]\nbrand = \"Test Hub\"\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.brand, "Test Hub");
    }
}
