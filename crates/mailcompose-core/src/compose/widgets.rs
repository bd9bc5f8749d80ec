//! Spellchecker and autocompleter widget configuration.

/// Markup of the spellcheck button icon.
const SPELL_ICON: &str = r#"<span class="iconImg spellcheckImg"></span>"#;

/// Client widget that completes addresses from the contact directory.
const AUTOCOMPLETER_WIDGET: &str = "ContactAutoCompleter";

/// Which compose UI is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Traditional page-per-action view.
    Basic,
    /// Script-driven view.
    #[default]
    Dynamic,
}

/// How menu buttons are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuView {
    /// Text only.
    Text,
    /// Icons only.
    Icon,
    /// Icons and text.
    #[default]
    Both,
}

impl MenuView {
    const fn shows_text(self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }
}

/// Button labels for each spellchecker state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpellCheckerStates {
    /// Idle, ready to check.
    pub check_spelling: String,
    /// Check in progress.
    pub checking: String,
    /// Showing suggestions.
    pub resume_edit: String,
    /// Check failed.
    pub error: String,
}

/// Spellchecker attachment for the compose body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckerConfig {
    /// Widget instance id.
    pub id: String,
    /// Element holding the text to check.
    pub target_id: &'static str,
    /// Element that starts a check.
    pub trigger_id: &'static str,
    /// Labels per state.
    pub states: SpellCheckerStates,
}

impl SpellCheckerConfig {
    /// Builds the configuration for a view and menu style.
    #[must_use]
    pub fn new(view: ViewMode, menu_view: MenuView) -> Self {
        let (prefix, br) = match view {
            ViewMode::Basic => ("IMP", "<br />"),
            ViewMode::Dynamic => ("DIMP", ""),
        };
        let label = |text: &str| format!("{SPELL_ICON}{br}{text}");

        let check_spelling = if menu_view.shows_text() {
            label("Check Spelling")
        } else {
            SPELL_ICON.to_string()
        };

        Self {
            id: format!("{prefix}.SpellChecker"),
            target_id: "composeMessage",
            trigger_id: "spellcheck",
            states: SpellCheckerStates {
                check_spelling,
                checking: label("Checking..."),
                resume_edit: label("Resume Editing"),
                error: label("Spell Check Failed"),
            },
        }
    }
}

/// Autocompleter attached to one address field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleterBinding {
    /// Client widget name.
    pub widget: &'static str,
    /// DOM id of the address field.
    pub trigger_id: String,
}

/// One autocompleter per address field, in order.
pub fn autocompleter_bindings<I, S>(fields: I) -> Vec<AutocompleterBinding>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields
        .into_iter()
        .map(|field| AutocompleterBinding {
            widget: AUTOCOMPLETER_WIDGET,
            trigger_id: field.into(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_view_breaks_labels() {
        let config = SpellCheckerConfig::new(ViewMode::Basic, MenuView::Both);
        assert_eq!(config.id, "IMP.SpellChecker");
        assert_eq!(
            config.states.checking,
            format!("{SPELL_ICON}<br />Checking...")
        );
        assert_eq!(
            config.states.check_spelling,
            format!("{SPELL_ICON}<br />Check Spelling")
        );
    }

    #[test]
    fn test_icon_menu_hides_check_label() {
        let config = SpellCheckerConfig::new(ViewMode::Dynamic, MenuView::Icon);
        assert_eq!(config.id, "DIMP.SpellChecker");
        assert_eq!(config.states.check_spelling, SPELL_ICON);
        assert_eq!(config.states.error, format!("{SPELL_ICON}Spell Check Failed"));
    }

    #[test]
    fn test_config_serializes_script_names() {
        let json = serde_json::to_value(SpellCheckerConfig::new(
            ViewMode::Dynamic,
            MenuView::Text,
        ))
        .unwrap();
        assert_eq!(json["targetId"], "composeMessage");
        assert_eq!(json["triggerId"], "spellcheck");
        assert!(json["states"]["ResumeEdit"].is_string());
    }

    #[test]
    fn test_autocompleter_bindings() {
        let bindings = autocompleter_bindings(["to", "cc", "bcc"]);
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[1].trigger_id, "cc");
        assert_eq!(bindings[0].widget, "ContactAutoCompleter");
    }
}
