//! Preference schema types.

use crate::{Error, Result};

/// A value a preference can hold.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// A single choice key.
    Single(String),
    /// A set of choice keys.
    Multiple(Vec<String>),
}

/// Kind of preference and its allowed choices as `(key, label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "enum", rename_all = "lowercase")]
pub enum PrefKind {
    /// Exactly one of the choices.
    Enum(Vec<(String, String)>),
    /// Any subset of the choices.
    Multienum(Vec<(String, String)>),
}

impl PrefKind {
    fn choices(&self) -> &[(String, String)] {
        match self {
            Self::Enum(choices) | Self::Multienum(choices) => choices,
        }
    }

    fn allows(&self, key: &str) -> bool {
        self.choices().iter().any(|(k, _)| k == key)
    }
}

/// One declared preference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Pref {
    /// Preference name.
    pub name: String,
    /// Default value.
    pub value: PrefValue,
    /// Users may not change it.
    pub locked: bool,
    /// Kind and choices.
    #[serde(flatten)]
    pub kind: PrefKind,
    /// Prompt shown next to the control.
    pub desc: String,
}

/// A group of preferences shown together.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PrefGroup {
    /// Group key.
    pub name: String,
    /// Column the group is listed under.
    pub column: String,
    /// Group title.
    pub label: String,
    /// Group description.
    pub desc: String,
    /// Member preference names, in display order.
    pub members: Vec<String>,
}

/// Groups and preferences of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PrefSchema {
    /// Groups in display order.
    pub groups: Vec<PrefGroup>,
    /// Preferences in declaration order.
    pub prefs: Vec<Pref>,
}

impl PrefSchema {
    /// Looks up a preference by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pref> {
        self.prefs.iter().find(|pref| pref.name == name)
    }

    /// Checks that `value` is allowed for preference `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference is unknown, the value shape does
    /// not match its kind, or a key is not among its choices.
    pub fn validate(&self, name: &str, value: &PrefValue) -> Result<()> {
        let pref = self
            .get(name)
            .ok_or_else(|| Error::UnknownPreference(name.to_string()))?;

        let invalid = |value: &str| Error::InvalidPreference {
            name: name.to_string(),
            value: value.to_string(),
        };

        match (&pref.kind, value) {
            (PrefKind::Enum(_), PrefValue::Single(key)) => {
                if pref.kind.allows(key) {
                    Ok(())
                } else {
                    Err(invalid(key))
                }
            }
            (PrefKind::Multienum(_), PrefValue::Multiple(keys)) => keys
                .iter()
                .find(|key| !pref.kind.allows(key))
                .map_or(Ok(()), |key| Err(invalid(key))),
            (_, PrefValue::Single(key)) => Err(invalid(key)),
            (_, PrefValue::Multiple(keys)) => Err(invalid(&keys.join(","))),
        }
    }
}
