//! Address list parser.
//!
//! The grammar is a forgiving subset of RFC 5322 `address-list` tuned for
//! compose fields: entries are separated by `,` or `;` at top level, and an
//! entry without `@` is kept as a fragment instead of being rejected.

use crate::address::ParsedAddress;
use crate::error::{Error, Result};
use crate::list::AddressList;

/// Options controlling how entries are completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Host assigned to entries that have no domain part.
    ///
    /// Leave unset to keep such entries as fragments.
    pub default_domain: Option<String>,
}

impl ParseOptions {
    /// Options that complete bare local parts with `domain`.
    #[must_use]
    pub fn with_default_domain(domain: impl Into<String>) -> Self {
        Self {
            default_domain: Some(domain.into()),
        }
    }
}

/// Parses free text into an ordered address list.
pub trait AddressListParser {
    /// Parses `text` using `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is structurally malformed.
    fn parse(&self, text: &str, options: &ParseOptions) -> Result<AddressList>;
}

impl<T: AddressListParser + ?Sized> AddressListParser for &T {
    fn parse(&self, text: &str, options: &ParseOptions) -> Result<AddressList> {
        (**self).parse(text, options)
    }
}

/// The built-in RFC 5322 style parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc822Parser;

impl AddressListParser for Rfc822Parser {
    fn parse(&self, text: &str, options: &ParseOptions) -> Result<AddressList> {
        AddressList::parse(text, options)
    }
}

pub(crate) fn parse_list(text: &str, options: &ParseOptions) -> Result<Vec<ParsedAddress>> {
    let mut addresses = Vec::new();
    for (offset, segment) in split_top_level(text)? {
        if let Some(address) = parse_entry(segment, offset, options)? {
            addresses.push(address);
        }
    }
    Ok(addresses)
}

/// Splits on top-level delimiters and checks bracket balance.
fn split_top_level(text: &str) -> Result<Vec<(usize, &str)>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut angle: Option<usize> = None;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => skip_quoted(&mut chars, i)?,
            '(' => {
                skip_comment(&mut chars, i)?;
            }
            ')' => return Err(Error::UnexpectedChar { ch: c, position: i }),
            '<' => {
                if angle.is_some() {
                    return Err(Error::UnexpectedChar { ch: c, position: i });
                }
                angle = Some(i);
            }
            '>' => {
                if angle.take().is_none() {
                    return Err(Error::UnexpectedChar { ch: c, position: i });
                }
            }
            ',' | ';' if angle.is_none() => {
                segments.push((start, &text[start..i]));
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if let Some(open) = angle {
        return Err(Error::UnterminatedAngle(open));
    }
    segments.push((start, &text[start..]));
    Ok(segments)
}

fn skip_quoted(chars: &mut std::str::CharIndices<'_>, open: usize) -> Result<()> {
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    break;
                }
            }
            '"' => return Ok(()),
            _ => {}
        }
    }
    Err(Error::UnterminatedQuote(open))
}

/// Consumes a (possibly nested) comment and returns its unescaped text.
fn skip_comment(chars: &mut std::str::CharIndices<'_>, open: usize) -> Result<String> {
    let mut depth = 1usize;
    let mut content = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => content.push(escaped),
                None => break,
            },
            '(' => {
                depth += 1;
                content.push(c);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(content);
                }
                content.push(c);
            }
            _ => content.push(c),
        }
    }
    Err(Error::UnterminatedComment(open))
}

/// Blanks out comments so byte offsets stay valid, collecting their text.
fn strip_comments(segment: &str, base: usize) -> Result<(String, Vec<String>)> {
    let mut cleaned = String::with_capacity(segment.len());
    let mut comments = Vec::new();
    let mut chars = segment.char_indices();
    let mut in_quote = false;

    while let Some((i, c)) = chars.next() {
        if in_quote {
            cleaned.push(c);
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        cleaned.push(escaped);
                    }
                }
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_quote = true;
                cleaned.push(c);
            }
            '(' => {
                let comment = skip_comment(&mut chars, base + i)?;
                let end = chars.offset();
                cleaned.extend(std::iter::repeat_n(' ', end - i));
                let comment = comment.trim();
                if !comment.is_empty() {
                    comments.push(comment.to_string());
                }
            }
            _ => cleaned.push(c),
        }
    }
    Ok((cleaned, comments))
}

fn parse_entry(
    segment: &str,
    base: usize,
    options: &ParseOptions,
) -> Result<Option<ParsedAddress>> {
    let (cleaned, comments) = strip_comments(segment, base)?;
    if cleaned.trim().is_empty() {
        return Ok(None);
    }
    let comment_personal = (!comments.is_empty()).then(|| comments.join(" "));

    let Some(open) = find_unquoted(&cleaned, '<', 0) else {
        let (mailbox, host) = parse_addr_spec(&cleaned, base, options)?;
        return Ok(Some(ParsedAddress::from_parts(
            Some(mailbox),
            host,
            comment_personal,
        )));
    };

    let close = find_unquoted(&cleaned, '>', open + 1)
        .ok_or(Error::UnterminatedAngle(base + open))?;
    let trailing_start = close + 1;
    if let Some((i, ch)) = cleaned[trailing_start..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
    {
        return Err(Error::UnexpectedChar {
            ch,
            position: base + trailing_start + i,
        });
    }

    let inner = &cleaned[open + 1..close];
    if inner.trim().is_empty() {
        return Err(Error::InvalidAddress(format!(
            "empty angle address at byte {}",
            base + open
        )));
    }
    let (mailbox, host) = parse_addr_spec(inner, base + open + 1, options)?;
    let phrase = decode(&cleaned[..open], true);
    let personal = if phrase.is_empty() {
        comment_personal
    } else {
        Some(phrase)
    };

    Ok(Some(ParsedAddress::from_parts(Some(mailbox), host, personal)))
}

/// Splits an addr-spec into local part and optional host.
fn parse_addr_spec(
    text: &str,
    base: usize,
    options: &ParseOptions,
) -> Result<(String, Option<String>)> {
    let Some(at) = find_unquoted(text, '@', 0) else {
        let mailbox = decode(text, true);
        if mailbox.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "empty address at byte {base}"
            )));
        }
        return Ok((mailbox, options.default_domain.clone()));
    };

    if let Some(second) = find_unquoted(text, '@', at + 1) {
        return Err(Error::UnexpectedChar {
            ch: '@',
            position: base + second,
        });
    }

    let local = decode(&text[..at], false);
    if local.is_empty() {
        return Err(Error::InvalidAddress(format!(
            "missing local part in '{}'",
            text.trim()
        )));
    }

    let host = text[at + 1..].trim();
    if host.contains(|c: char| c.is_whitespace() || c == '"') {
        return Err(Error::InvalidAddress(format!("invalid domain '{host}'")));
    }
    let host = if host.is_empty() {
        options.default_domain.clone()
    } else {
        Some(host.to_string())
    };

    Ok((local, host))
}

/// Finds `needle` outside quoted strings, starting at byte `from`.
fn find_unquoted(text: &str, needle: char, from: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in text[from..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            c if c == needle && !in_quote => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// Removes quoting. Phrases also get internal whitespace collapsed.
fn decode(text: &str, collapse: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quote = false;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_quote = !in_quote,
            '\\' if in_quote => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            _ => out.push(c),
        }
    }
    if collapse {
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        out.trim().to_string()
    }
}
