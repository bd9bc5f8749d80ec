//! Inventory display preferences.

use std::future::Future;

use tracing::debug;

use super::model::{Pref, PrefGroup, PrefKind, PrefSchema, PrefValue};
use crate::Result;

/// Column an inventory list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Stock id.
    #[default]
    StockId,
    /// Item name.
    Name,
    /// Note.
    Note,
}

/// Direction of an inventory sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

/// View shown after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultView {
    /// Item list.
    #[default]
    List,
    /// Search form.
    Search,
    /// Stock entry.
    Stock,
}

impl SortBy {
    const ALL: [Self; 3] = [Self::StockId, Self::Name, Self::Note];

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StockId => "stock_id",
            Self::Name => "name",
            Self::Note => "note",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StockId => "Stock ID",
            Self::Name => "Item Name",
            Self::Note => "Note",
        }
    }
}

impl SortDirection {
    const ALL: [Self; 2] = [Self::Ascending, Self::Descending];

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

impl DefaultView {
    const ALL: [Self; 3] = [Self::List, Self::Search, Self::Stock];

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Search => "search",
            Self::Stock => "stock",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Search => "Search",
            Self::Stock => "Stock",
        }
    }
}

/// A user-defined inventory property that can be shown as a list column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InventoryProperty {
    /// Property id.
    pub id: i64,
    /// Property name.
    pub name: String,
}

/// Source of the inventory properties offered as list columns.
pub trait PropertySource {
    /// Returns all properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn properties(&self) -> impl Future<Output = Result<Vec<InventoryProperty>>> + Send;
}

fn choices<T: Copy>(
    all: &[T],
    key: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Vec<(String, String)> {
    all.iter()
        .map(|&item| (key(item).to_string(), label(item).to_string()))
        .collect()
}

/// Builds the inventory preference schema, listing properties from `source`.
///
/// # Errors
///
/// Returns an error if the properties cannot be loaded.
pub async fn inventory_prefs<S: PropertySource>(source: &S) -> Result<PrefSchema> {
    let properties = source.properties().await?;
    debug!(count = properties.len(), "loaded inventory properties");

    let groups = vec![PrefGroup {
        name: "display".into(),
        column: "General Options".into(),
        label: "Display Options".into(),
        desc: "Change your inventory sorting and display options.".into(),
        members: ["sortby", "sortdir", "list_properties", "sesha_default_view"]
            .map(String::from)
            .to_vec(),
    }];

    let prefs = vec![
        Pref {
            name: "sortby".into(),
            value: PrefValue::Single(SortBy::default().key().into()),
            locked: false,
            kind: PrefKind::Enum(choices(&SortBy::ALL, SortBy::key, SortBy::label)),
            desc: "Default sorting criteria:".into(),
        },
        Pref {
            name: "sortdir".into(),
            value: PrefValue::Single(SortDirection::default().key().into()),
            locked: false,
            kind: PrefKind::Enum(choices(
                &SortDirection::ALL,
                SortDirection::key,
                SortDirection::label,
            )),
            desc: "Default sorting direction:".into(),
        },
        Pref {
            name: "sesha_default_view".into(),
            value: PrefValue::Single(DefaultView::default().key().into()),
            locked: false,
            kind: PrefKind::Enum(choices(
                &DefaultView::ALL,
                DefaultView::key,
                DefaultView::label,
            )),
            desc: "Select the view to display after login:".into(),
        },
        Pref {
            name: "list_properties".into(),
            value: PrefValue::Multiple(Vec::new()),
            locked: false,
            kind: PrefKind::Multienum(
                properties
                    .into_iter()
                    .map(|property| (property.id.to_string(), property.name))
                    .collect(),
            ),
            desc: "Select properties that you would like to see in the list view \
                   (all other properties are only shown on individual item screens):"
                .into(),
        },
    ];

    Ok(PrefSchema { groups, prefs })
}
