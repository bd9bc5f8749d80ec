//! Conversion of compose text between plain text and HTML.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::{Error, Result};

/// Target format of a compose body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeFormat {
    /// Plain text.
    Text,
    /// HTML.
    Html,
}

impl FromStr for ComposeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            other => Err(Error::Config(format!("unknown compose format '{other}'"))),
        }
    }
}

/// Converts compose data to `to`.
///
/// # Errors
///
/// Returns an error if HTML conversion fails.
pub fn convert_compose_text(data: &str, to: ComposeFormat) -> Result<String> {
    match to {
        ComposeFormat::Html => Ok(text_to_html(data)),
        ComposeFormat::Text => html_to_text(data),
    }
}

/// Converts HTML to plain (Markdown-flavoured) text without wrapping.
///
/// # Errors
///
/// Returns an error if the HTML cannot be converted.
pub fn html_to_text(html: &str) -> Result<String> {
    Ok(htmd::convert(html)?)
}

/// Converts plain text to HTML.
///
/// Text is escaped, line breaks become `<br />` and `http(s)` URLs
/// become links.
#[must_use]
pub fn text_to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + text.len() / 4);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            html.push_str("<br />\n");
        }
        linkify_line(line.strip_suffix('\r').unwrap_or(line), &mut html);
    }
    html
}

fn linkify_line(line: &str, out: &mut String) {
    let mut rest = line;
    while let Some(start) = find_url_start(rest) {
        escape_into(&rest[..start], out);
        let tail = &rest[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let url = tail[..end].trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'', '"']);
        let mut href = String::new();
        escape_into(url, &mut href);
        let _ = write!(out, "<a href=\"{href}\" target=\"_blank\">{href}</a>");
        rest = &tail[url.len()..];
    }
    escape_into(rest, out);
}

fn find_url_start(text: &str) -> Option<usize> {
    let https = text.find("https://");
    let http = text.find("http://");
    match (http, https) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
