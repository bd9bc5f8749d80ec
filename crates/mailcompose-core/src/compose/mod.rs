//! Compose page helpers.
//!
//! Small typed builders for the pieces the compose form wires together:
//! text conversion, passphrase dialogs, spellchecker and autocompleter
//! widgets, identity data and navigation back to the mailbox.

mod convert;
mod identity;
mod navigation;
mod passphrase;
mod widgets;

pub use convert::{ComposeFormat, convert_compose_text, html_to_text, text_to_html};
pub use identity::{ComposeIdentity, IDENTITIES_JS_VAR, IdentityJs, SentMailFolder, identity_js};
pub use navigation::{RETURN_PARAMS, mailbox_return_url};
pub use passphrase::{DialogParams, PassphraseDialog, PassphraseKind};
pub use widgets::{
    AutocompleterBinding, MenuView, SpellCheckerConfig, SpellCheckerStates, ViewMode,
    autocompleter_bindings,
};
