use crate::config::site_config::ClaimReplacement;
use crate::config::SiteConfig;
use crate::domain::model::{Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use regex::Regex;

fn section_pattern(class: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"(?s)[ \t]*<section class="{}"[^>]*>.*?</section>[ \t]*\n?"#,
        regex::escape(class)
    ))?)
}

fn compile_sections(classes: &[String]) -> Result<Vec<(String, Regex)>> {
    classes
        .iter()
        .map(|class| -> Result<(String, Regex)> { Ok((class.clone(), section_pattern(class)?)) })
        .collect()
}

/// Removes competitor recommendation sections, and their companions from the same pages.
pub struct RemoveSections {
    sections: Vec<(String, Regex)>,
    companions: Vec<(String, Regex)>,
}

impl RemoveSections {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            sections: compile_sections(&config.cleanup.sections)?,
            companions: compile_sections(&config.cleanup.companion_sections)?,
        })
    }
}

impl Rewrite for RemoveSections {
    fn name(&self) -> &'static str {
        "remove-sections"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        if !self.sections.iter().any(|(_, re)| re.is_match(&page.content)) {
            return Ok(RewriteOutcome::unchanged("no sections to remove"));
        }

        let mut content = page.content.clone();
        let mut notes = Vec::new();
        for (class, re) in self.sections.iter().chain(&self.companions) {
            let count = re.find_iter(&content).count();
            if count > 0 {
                content = re.replace_all(&content, "").into_owned();
                notes.push(format!("removed {}x {}", count, class));
            }
        }

        Ok(RewriteOutcome::Updated { content, notes })
    }
}

/// Ordered literal replacement of claim wording: fake discounts for `scrub-claims`,
/// inflated figures for `replace-marketing-claims`.
pub struct ScrubClaims {
    name: &'static str,
    replacements: Vec<ClaimReplacement>,
}

impl ScrubClaims {
    pub fn new(name: &'static str, replacements: Vec<ClaimReplacement>) -> Self {
        Self { name, replacements }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new("scrub-claims", config.cleanup.claims.clone())
    }

    pub fn marketing(config: &SiteConfig) -> Self {
        Self::new("replace-marketing-claims", config.cleanup.marketing_claims.clone())
    }
}

impl Rewrite for ScrubClaims {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let mut content = page.content.clone();
        let mut total = 0;

        for claim in &self.replacements {
            let count = content.matches(claim.from.as_str()).count();
            if count > 0 {
                content = content.replace(claim.from.as_str(), &claim.to);
                total += count;
            }
        }

        if total == 0 {
            return Ok(RewriteOutcome::unchanged("no claims found"));
        }
        Ok(RewriteOutcome::Updated {
            content,
            notes: vec![format!("replaced {} claims", total)],
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
            target: PageTarget::new("prompts/coding/a.html", None),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_remove_sections_with_companions() {
        let task = RemoveSections::from_config(&SiteConfig::default()).unwrap();
        let html = concat!(
            "<main>\n",
            "    <section class=\"works-best-with\">\n        <h3>Use ChatGPT</h3>\n    </section>\n",
            "    <section class=\"tools-grid\">\n        <a>tool</a>\n    </section>\n",
            "    <section class=\"prompt-display\">keep</section>\n",
            "</main>\n"
        );

        let RewriteOutcome::Updated { content, notes } = task.rewrite(&page(html)).unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(
            content,
            "<main>\n    <section class=\"prompt-display\">keep</section>\n</main>\n"
        );
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_companions_alone_are_kept() {
        let task = RemoveSections::from_config(&SiteConfig::default()).unwrap();
        let html = "<section class=\"tools-grid\">x</section>";
        assert!(matches!(task.rewrite(&page(html)).unwrap(), RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_scrub_claims_in_order() {
        let task = ScrubClaims::from_config(&SiteConfig::default());
        let html = "<a>⚠️ 67% OFF TODAY - Get Access</a><a>Get 67% Off Today Only →</a><p>67% off today only!</p>";

        let RewriteOutcome::Updated { content, .. } = task.rewrite(&page(html)).unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(
            content,
            "<a>Get Access</a><a>Learn More →</a><p>Special offer available</p>"
        );
        assert!(matches!(task.rewrite(&page(&content)).unwrap(), RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_marketing_claims_become_factual() {
        let task = ScrubClaims::marketing(&SiteConfig::default());
        assert_eq!(task.name(), "replace-marketing-claims");

        let html = "<span class=\"badge\">Worth $10K analysis</span><p>Worth $15K agency fee</p><p>Worth $10K analysis</p>";
        let RewriteOutcome::Updated { content, notes } = task.rewrite(&page(html)).unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(
            content,
            "<span class=\"badge\">Professional analysis</span><p>Professional quality</p><p>Professional analysis</p>"
        );
        assert_eq!(notes, vec!["replaced 3 claims".to_string()]);
    }
}
