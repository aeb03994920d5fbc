//! LinkedIn renders plain text only, so model output has to be stripped of
//! the markdown the model insists on producing.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.+?)`").unwrap());
static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\*{3,}|-{3,})$").unwrap());
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

/// Strip markdown syntax, keeping the text inside it.
pub fn strip_markdown(content: &str) -> String {
    let content = CODE_BLOCK.replace_all(content, "");
    let content = BOLD.replace_all(&content, "$1");
    let content = BOLD_UNDERSCORE.replace_all(&content, "$1");
    let content = ITALIC.replace_all(&content, "$1");
    let content = ITALIC_UNDERSCORE.replace_all(&content, "$1");
    let content = STRIKETHROUGH.replace_all(&content, "$1");
    let content = INLINE_CODE.replace_all(&content, "$1");
    let content = HEADER.replace_all(&content, "");
    let content = HORIZONTAL_RULE.replace_all(&content, "");
    let content = EXCESS_BLANK_LINES.replace_all(&content, "\n\n\n");

    content.trim().to_string()
}
