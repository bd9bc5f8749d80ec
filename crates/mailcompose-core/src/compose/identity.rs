//! Per-identity data exported to the compose page script.

use mailcompose_address::AddressList;
use serde_json::{Map, Value};

use crate::Result;

/// Script variable holding the identity list.
pub const IDENTITIES_JS_VAR: &str = "ImpComposeBase.identities";

/// Sent-mail folder configured for an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMailFolder {
    /// Folder name as submitted by forms.
    pub form_name: String,
    /// Folder name escaped for display.
    pub display_html: String,
}

/// A sending identity as the compose page sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeIdentity {
    /// Where sent mail is saved, if anywhere.
    pub sent_mail_folder: Option<SentMailFolder>,
    /// Save sent mail by default.
    pub save_sent_mail: bool,
    /// Addresses to add as Bcc.
    pub bcc: AddressList,
}

/// Script-side shape of one identity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IdentityJs {
    /// Sent mail folder name.
    pub smf_name: String,
    /// Save in sent mail folder by default.
    pub smf_save: bool,
    /// Sent mail folder display name.
    pub smf_display: String,
    /// Bcc addresses to add.
    pub bcc: String,
}

impl From<&ComposeIdentity> for IdentityJs {
    fn from(identity: &ComposeIdentity) -> Self {
        let (smf_name, smf_display) = identity
            .sent_mail_folder
            .as_ref()
            .map(|folder| (folder.form_name.clone(), folder.display_html.clone()))
            .unwrap_or_default();

        Self {
            smf_name,
            smf_save: identity.save_sent_mail,
            smf_display,
            bcc: identity.bcc.to_string(),
        }
    }
}

/// Builds the inline script variables for all identities, in order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn identity_js(identities: &[ComposeIdentity]) -> Result<Value> {
    let exported: Vec<IdentityJs> = identities.iter().map(IdentityJs::from).collect();

    let mut vars = Map::new();
    vars.insert(IDENTITIES_JS_VAR.to_string(), serde_json::to_value(exported)?);
    Ok(Value::Object(vars))
}
