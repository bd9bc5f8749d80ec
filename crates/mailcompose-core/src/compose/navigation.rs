//! Return navigation from the compose page.

use std::collections::HashMap;

use url::Url;

use crate::Result;

/// Mailbox page the compose form returns to by default.
const MAILBOX_PAGE: &str = "mailbox.php";

/// Form values carried back to the mailbox view, in query order.
pub const RETURN_PARAMS: [&str; 4] = ["start", "page", "mailbox", "thismailbox"];

/// Builds the URL that returns from compose to the mailbox listing.
///
/// Uses `target` if given, otherwise `mailbox.php` relative to `base`.
/// Non-empty [`RETURN_PARAMS`] from `form` are appended.
///
/// # Errors
///
/// Returns an error if the default URL cannot be joined onto `base`.
pub fn mailbox_return_url(
    base: &Url,
    target: Option<Url>,
    form: &HashMap<String, String>,
) -> Result<Url> {
    let mut url = match target {
        Some(url) => url,
        None => base.join(MAILBOX_PAGE)?,
    };

    for key in RETURN_PARAMS {
        if let Some(value) = form.get(key).filter(|value| !value.is_empty()) {
            url.query_pairs_mut().append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_target_with_params() {
        let base = Url::parse("https://mail.example.com/imp/compose.php").unwrap();
        let form = form(&[
            ("mailbox", "INBOX/Work"),
            ("page", "2"),
            ("start", ""),
            ("subject", "ignored"),
        ]);

        let url = mailbox_return_url(&base, None, &form).unwrap();
        assert_eq!(
            url.as_str(),
            "https://mail.example.com/imp/mailbox.php?page=2&mailbox=INBOX%2FWork"
        );
    }

    #[test]
    fn test_explicit_target_without_params() {
        let base = Url::parse("https://mail.example.com/imp/").unwrap();
        let target = Url::parse("https://mail.example.com/imp/message.php?uid=7").unwrap();

        let url = mailbox_return_url(&base, Some(target), &HashMap::new()).unwrap();
        assert_eq!(url.as_str(), "https://mail.example.com/imp/message.php?uid=7");
    }
}
