use crate::utils::error::{HubError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("placeholder pattern is valid"));

/// Fill `{{name}}` placeholders. A placeholder without a value is an error so that
/// a half-rendered page never reaches the site.
pub fn fill_template(name: &str, template: &str, vars: &BTreeMap<&str, String>) -> Result<String> {
    let missing: Vec<&str> = PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|key| !vars.contains_key(key))
        .collect();

    if !missing.is_empty() {
        return Err(HubError::TemplateError {
            message: format!("template '{}' has no value for: {}", name, missing.join(", ")),
        });
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &regex::Captures| {
        // checked above
        vars.get(&caps[1]).cloned().unwrap_or_default()
    });

    Ok(rendered.into_owned())
}

pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

pub fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Whitespace that precedes `pos` on its line, or "" when other text sits in front of it.
pub fn indent_before(content: &str, pos: usize) -> &str {
    let line_start = content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &content[line_start..pos];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

/// Insert `block` at byte offset `pos`.
pub fn insert_at(content: &str, pos: usize, block: &str) -> String {
    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(&content[..pos]);
    out.push_str(block);
    out.push_str(&content[pos..]);
    out
}

/// Prefix every non-blank line of `block` with `indent`, dropping the trailing newline.
pub fn indent_block(block: &str, indent: &str) -> String {
    block
        .trim_end()
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
