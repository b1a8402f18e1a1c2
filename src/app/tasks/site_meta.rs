//! Page-wide meta blocks: security headers, feed links and the cookie consent banner.

use crate::app::templates::{
    render_cookie_banner, render_feed_discovery, COOKIE_CONSENT_STYLE, FEED_FOOTER_SECTION,
    SECURITY_HEADERS,
};
use crate::config::SiteConfig;
use crate::domain::model::{Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::{indent_before, indent_block, insert_at};
use once_cell::sync::Lazy;
use regex::Regex;

pub const SECURITY_MARKER: &str = "Security Headers via Meta Tags";

/// Where the security block goes, first match wins.
static HEAD_ANCHORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r#"(?i)<meta\s+name="viewport"[^>]*>"#, r"(?i)<meta\s+charset[^>]*>", r"(?i)<head(?:\s[^>]*)?>"]
        .iter()
        .map(|p| Regex::new(p).expect("head anchor pattern is valid"))
        .collect()
});

static FOOTER_LISTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["Resources", "Legal"]
        .iter()
        .map(|h| {
            Regex::new(&format!(r"(?s)<h4>{}</h4>\s*<ul>.*?(</ul>)", h)).expect("footer list pattern is valid")
        })
        .collect()
});

static FOOTER_BOTTOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div class="footer-bottom">"#).expect("footer bottom pattern is valid"));

/// Adds the security meta tags after the viewport meta, the charset meta or `<head>`.
pub struct SecurityHeaders;

impl Rewrite for SecurityHeaders {
    fn name(&self) -> &'static str {
        "add-security-headers"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        if content.contains(SECURITY_MARKER) {
            return Ok(RewriteOutcome::unchanged("security headers present"));
        }

        let Some(anchor) = HEAD_ANCHORS.iter().find_map(|re| re.find(content)) else {
            return Ok(RewriteOutcome::not_found("<head>"));
        };

        let indent = match indent_before(content, anchor.start()) {
            "" => "    ",
            indent => indent,
        };
        let block = format!("\n{}", indent_block(SECURITY_HEADERS, indent));

        Ok(RewriteOutcome::Updated {
            content: insert_at(content, anchor.end(), &block),
            notes: vec!["added security headers".to_string()],
        })
    }
}

/// Links the sitemap and feeds from the footer and advertises the feeds in `<head>`.
pub struct FeedLinks {
    discovery: String,
}

impl FeedLinks {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            discovery: render_feed_discovery(&config.site.brand)?,
        })
    }
}

const FEED_ITEMS: [&str; 2] = [
    r#"<li><a href="/sitemap.html">Sitemap</a></li>"#,
    r#"<li><a href="/rss.xml">RSS Feed</a></li>"#,
];

impl Rewrite for FeedLinks {
    fn name(&self) -> &'static str {
        "add-feed-links"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        if content.contains("sitemap.html") || content.contains("rss.xml") {
            return Ok(RewriteOutcome::unchanged("feed links present"));
        }
        if !content.contains("<footer") && !content.contains("footer-section") {
            return Ok(RewriteOutcome::not_found("<footer>"));
        }

        let mut updated = content.clone();
        let mut notes = Vec::new();

        let list_close = FOOTER_LISTS
            .iter()
            .find_map(|re| re.captures(&updated).and_then(|caps| caps.get(1)))
            .map(|m| m.start());

        if let Some(close) = list_close {
            let close_indent = indent_before(&updated, close).to_string();
            let items: String = FEED_ITEMS
                .iter()
                .map(|item| format!("    {}{}\n", close_indent, item))
                .collect();
            updated = insert_at(&updated, close - close_indent.len(), &items);
            notes.push("added footer links".to_string());
        } else if let Some(bottom) = FOOTER_BOTTOM.find(&updated).map(|m| m.start()) {
            let indent = indent_before(&updated, bottom).to_string();
            let section = format!("{}\n{}", indent_block(FEED_FOOTER_SECTION, &indent).trim_start(), indent);
            updated = insert_at(&updated, bottom, &section);
            notes.push("added footer resources section".to_string());
        }

        if !updated.contains("rel=\"alternate\"") {
            if let Some(pos) = updated.find("</head>") {
                let block = format!("{}\n", indent_block(&self.discovery, "    "));
                updated = insert_at(&updated, pos, &block);
                notes.push("added feed autodiscovery".to_string());
            }
        }

        if notes.is_empty() {
            return Ok(RewriteOutcome::not_found("footer list or </head>"));
        }
        Ok(RewriteOutcome::Updated {
            content: updated,
            notes,
        })
    }
}

/// Adds the consent banner styles before `</head>` and the banner before `</body>`.
pub struct CookieConsent {
    marker: String,
    banner: String,
    skip_pages: Vec<String>,
}

impl CookieConsent {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let script = &config.consent.script;
        let marker = script.rsplit('/').next().unwrap_or(script.as_str()).to_string();
        Ok(Self {
            marker,
            banner: render_cookie_banner(&config.consent)?,
            skip_pages: config.consent.skip_pages.clone(),
        })
    }
}

impl Rewrite for CookieConsent {
    fn name(&self) -> &'static str {
        "add-cookie-consent"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        if self.skip_pages.contains(&page.target.file_name()) {
            return Ok(RewriteOutcome::unchanged("consent page itself"));
        }

        let content = &page.content;
        if content.contains(&self.marker) {
            return Ok(RewriteOutcome::unchanged("cookie consent present"));
        }

        let (Some(head), Some(body)) = (content.find("</head>"), content.rfind("</body>")) else {
            return Ok(RewriteOutcome::not_found("</head> and </body>"));
        };

        let banner = format!("{}\n", indent_block(&self.banner, "    "));
        let style = format!("{}\n", indent_block(COOKIE_CONSENT_STYLE, "    "));

        // the later offset first, so the earlier one stays valid
        let updated = insert_at(content, body, &banner);
        let updated = insert_at(&updated, head, &style);

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes: vec!["added cookie consent".to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageTarget;
    use pretty_assertions::assert_eq;

    fn page(path: &str, content: &str) -> Page {
        Page {
            target: PageTarget::new(path, None),
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
    fn test_security_headers_follow_viewport() {
        let html = concat!(
            "<head>\n",
            "    <meta charset=\"UTF-8\">\n",
            "    <meta name=\"viewport\" content=\"width=device-width\">\n",
            "    <title>T</title>\n",
            "</head>"
        );
        let out = updated(SecurityHeaders.rewrite(&page("about.html", html)).unwrap());

        let viewport_end = out.find("width=device-width\">").unwrap();
        let marker = out.find(SECURITY_MARKER).unwrap();
        assert!(marker > viewport_end);
        assert!(out.contains("\n    <!-- Security Headers via Meta Tags -->\n    <meta http-equiv=\"Content-Security-Policy\""));
        assert!(out.ends_with("nosniff\">\n    <meta http-equiv=\"X-XSS-Protection\" content=\"1; mode=block\">\n    <meta name=\"referrer\" content=\"strict-origin-when-cross-origin\">\n    <meta http-equiv=\"Permissions-Policy\" content=\"accelerometer=(), camera=(), geolocation=(), gyroscope=(), magnetometer=(), microphone=(), payment=(), usb=()\">\n    <title>T</title>\n</head>"));

        let again = SecurityHeaders.rewrite(&page("about.html", &out)).unwrap();
        assert!(matches!(again, RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_security_headers_fall_back_to_charset_then_head() {
        let charset = updated(SecurityHeaders.rewrite(&page("a.html", "<head><meta charset=\"UTF-8\"></head>")).unwrap());
        assert!(charset.starts_with("<head><meta charset=\"UTF-8\">\n    <!-- Security Headers"));

        let head = updated(SecurityHeaders.rewrite(&page("a.html", "<head></head>")).unwrap());
        assert!(head.starts_with("<head>\n    <!-- Security Headers"));

        let fragment = SecurityHeaders.rewrite(&page("a.html", "<header>x</header>")).unwrap();
        assert_eq!(fragment, RewriteOutcome::not_found("<head>"));
    }

    #[test]
    fn test_feed_links_join_resources_list() {
        let task = FeedLinks::from_config(&SiteConfig::default()).unwrap();
        let html = concat!(
            "<head>\n    <title>T</title>\n</head>\n",
            "<footer>\n",
            "    <div class=\"footer-section\">\n",
            "        <h4>Resources</h4>\n",
            "        <ul>\n",
            "            <li><a href=\"/about.html\">About</a></li>\n",
            "        </ul>\n",
            "    </div>\n",
            "</footer>"
        );

        let out = updated(task.rewrite(&page("index.html", html)).unwrap());
        assert_eq!(
            out,
            concat!(
                "<head>\n    <title>T</title>\n",
                "    <!-- Feed Autodiscovery -->\n",
                "    <link rel=\"alternate\" type=\"application/rss+xml\" title=\"FreePromptHub RSS Feed\" href=\"/rss.xml\">\n",
                "    <link rel=\"alternate\" type=\"application/atom+xml\" title=\"FreePromptHub Atom Feed\" href=\"/atom.xml\">\n",
                "    <link rel=\"alternate\" type=\"application/json\" title=\"FreePromptHub JSON Feed\" href=\"/feed.json\">\n",
                "    <link rel=\"sitemap\" type=\"application/xml\" title=\"Sitemap\" href=\"/sitemap.xml\">\n",
                "</head>\n",
                "<footer>\n",
                "    <div class=\"footer-section\">\n",
                "        <h4>Resources</h4>\n",
                "        <ul>\n",
                "            <li><a href=\"/about.html\">About</a></li>\n",
                "            <li><a href=\"/sitemap.html\">Sitemap</a></li>\n",
                "            <li><a href=\"/rss.xml\">RSS Feed</a></li>\n",
                "        </ul>\n",
                "    </div>\n",
                "</footer>"
            )
        );

        assert!(matches!(task.rewrite(&page("index.html", &out)).unwrap(), RewriteOutcome::Unchanged { .. }));
    }

    #[test]
    fn test_feed_links_new_section_before_footer_bottom() {
        let task = FeedLinks::from_config(&SiteConfig::default()).unwrap();
        let html = concat!(
            "<footer>\n",
            "    <div class=\"footer-section\"><h4>About</h4></div>\n",
            "    <div class=\"footer-bottom\">c</div>\n",
            "</footer>"
        );

        let out = updated(task.rewrite(&page("about.html", html)).unwrap());
        assert!(out.contains(concat!(
            "    <div class=\"footer-section\">\n",
            "        <h4>Resources</h4>\n",
            "        <ul>\n",
            "            <li><a href=\"/sitemap.html\">Sitemap</a></li>\n"
        )));
        assert!(out.contains("    </div>\n    <div class=\"footer-bottom\">c</div>"));
        assert_eq!(out.matches("<div").count(), out.matches("</div>").count());
    }

    #[test]
    fn test_feed_links_need_footer() {
        let task = FeedLinks::from_config(&SiteConfig::default()).unwrap();
        let outcome = task.rewrite(&page("a.html", "<head></head><main></main>")).unwrap();
        assert_eq!(outcome, RewriteOutcome::not_found("<footer>"));
    }

    #[test]
    fn test_cookie_consent_once_and_not_on_privacy_center() {
        let task = CookieConsent::from_config(&SiteConfig::default()).unwrap();
        let html = "<head>\n    <title>T</title>\n</head>\n<body>\n    <p>x</p>\n</body>\n";

        let out = updated(task.rewrite(&page("about.html", html)).unwrap());
        assert!(out.contains("    </style>\n</head>"));
        assert!(out.contains("    <div id=\"cookieConsentBanner\" class=\"cookie-consent-banner\">"));
        assert!(out.contains("    </script>\n</body>"));
        assert_eq!(out.matches("cookie-consent.js").count(), 1);
        assert!(matches!(task.rewrite(&page("about.html", &out)).unwrap(), RewriteOutcome::Unchanged { .. }));

        let center = task.rewrite(&page("privacy-center.html", html)).unwrap();
        assert!(matches!(center, RewriteOutcome::Unchanged { .. }));

        let fragment = task.rewrite(&page("a.html", "<div>x</div>")).unwrap();
        assert_eq!(fragment, RewriteOutcome::not_found("</head> and </body>"));
    }
}
