//! Passphrase dialog parameters for PGP and S/MIME.

use crate::{Error, Result};

/// Prefix of the compose cache id used for symmetric PGP passphrases.
const SYMMETRIC_ID_PREFIX: &str = "imp_compose_";

/// Which secret the dialog asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassphraseKind {
    /// Personal PGP key passphrase.
    Pgp,
    /// Symmetric PGP passphrase for one compose session.
    PgpSymmetric {
        /// Compose cache id.
        cache_id: String,
    },
    /// Personal S/MIME key passphrase.
    Smime,
}

impl PassphraseKind {
    /// Builds a kind from the request names `pgp`, `pgp_symm` and `smime`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names, or `pgp_symm` without a cache id.
    pub fn from_request(kind: &str, cache_id: Option<&str>) -> Result<Self> {
        match kind {
            "pgp" => Ok(Self::Pgp),
            "smime" => Ok(Self::Smime),
            "pgp_symm" => cache_id
                .filter(|id| !id.is_empty())
                .map(|id| Self::PgpSymmetric {
                    cache_id: id.to_string(),
                })
                .ok_or_else(|| Error::Config("pgp_symm dialog requires a cache id".into())),
            other => Err(Error::Config(format!(
                "unknown passphrase dialog type '{other}'"
            ))),
        }
    }

    const fn dialog_type(&self) -> &'static str {
        match self {
            Self::Pgp => "pgpPersonal",
            Self::PgpSymmetric { .. } => "pgpSymmetric",
            Self::Smime => "smimePersonal",
        }
    }
}

/// Extra parameters passed to the dialog script.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DialogParams {
    /// Open as soon as the page loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onload: Option<bool>,
    /// Cache id of the symmetric passphrase.
    #[serde(rename = "symmetricid", skip_serializing_if = "Option::is_none")]
    pub symmetric_id: Option<String>,
}

/// Everything the presentation layer needs to render a passphrase dialog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PassphraseDialog {
    /// Dialog type understood by the client script.
    #[serde(rename = "type")]
    pub dialog_type: &'static str,
    /// Open as soon as the page loads.
    pub onload: bool,
    /// Type-specific parameters.
    pub params: DialogParams,
}

impl PassphraseDialog {
    /// Builds the dialog for `kind`.
    #[must_use]
    pub fn new(kind: &PassphraseKind) -> Self {
        let params = match kind {
            PassphraseKind::PgpSymmetric { cache_id } => DialogParams {
                onload: None,
                symmetric_id: Some(format!("{SYMMETRIC_ID_PREFIX}{cache_id}")),
            },
            PassphraseKind::Pgp | PassphraseKind::Smime => DialogParams {
                onload: Some(true),
                symmetric_id: None,
            },
        };

        Self {
            dialog_type: kind.dialog_type(),
            onload: true,
            params,
        }
    }

    /// Serializes the dialog for inline script output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
