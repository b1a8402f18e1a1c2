use crate::app::templates::{COPY_BUTTON, COPY_BUTTON_SCRIPT, COPY_BUTTON_STYLE};
use crate::domain::model::{Page, RewriteOutcome};
use crate::domain::ports::Rewrite;
use crate::utils::error::Result;
use crate::utils::html::{indent_before, indent_block, insert_at};
use once_cell::sync::Lazy;
use regex::Regex;

static PROMPT_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div class="prompt-content"[^>]*>"#).expect("prompt content pattern is valid"));

/// Puts a copy button at the top of the prompt text, with its styles and click handler.
///
/// Pages with a `prompt-toolbar` already have one above the prompt.
pub struct CopyButton;

impl Rewrite for CopyButton {
    fn name(&self) -> &'static str {
        "add-copy-button"
    }

    fn rewrite(&self, page: &Page) -> Result<RewriteOutcome> {
        let content = &page.content;
        if content.contains("copy-button-top") || content.contains("prompt-toolbar") {
            return Ok(RewriteOutcome::unchanged("copy button present"));
        }

        let Some(div) = PROMPT_CONTENT.find(content) else {
            return Ok(RewriteOutcome::not_found("<div class=\"prompt-content\">"));
        };
        let (Some(head), Some(body)) = (content.find("</head>"), content.rfind("</body>")) else {
            return Ok(RewriteOutcome::not_found("</head> and </body>"));
        };
        if !(head < div.start() && div.end() < body) {
            return Ok(RewriteOutcome::not_found("<div class=\"prompt-content\"> inside <body>"));
        }

        let button_indent = format!("{}    ", indent_before(content, div.start()));
        let button = format!("\n{}", indent_block(COPY_BUTTON, &button_indent));
        let script = format!("{}\n", indent_block(COPY_BUTTON_SCRIPT, "    "));
        let style = format!("{}\n", indent_block(COPY_BUTTON_STYLE, "    "));

        let updated = insert_at(content, body, &script);
        let updated = insert_at(&updated, div.end(), &button);
        let updated = insert_at(&updated, head, &style);

        Ok(RewriteOutcome::Updated {
            content: updated,
            notes: vec!["added top copy button".to_string()],
        })
    }
}
