use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Fixed grouping key partitioning the menu
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Espresso,
    Frappuccino,
    Blended,
    Teavana,
    Desert,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Espresso,
        Category::Frappuccino,
        Category::Blended,
        Category::Teavana,
        Category::Desert,
    ];

    /// Key used in the backend paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Espresso => "espresso",
            Category::Frappuccino => "frappuccino",
            Category::Blended => "blended",
            Category::Teavana => "teavana",
            Category::Desert => "desert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Espresso => "☕ Espresso",
            Category::Frappuccino => "🥤 Frappuccino",
            Category::Blended => "🍹 Blended",
            Category::Teavana => "🫖 Teavana",
            Category::Desert => "🍰 Dessert",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn next(&self) -> Category {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Category {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or(ClientError::InvalidCategory(s.to_string()))
    }
}

/// Backend-assigned identifier. Opaque: only compared and echoed back in paths.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct MenuId(String);

impl MenuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for MenuId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for MenuId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// Backends hand out either string or numeric ids
impl<'de> Deserialize<'de> for MenuId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Uint(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => MenuId(s),
            RawId::Int(n) => MenuId(n.to_string()),
            RawId::Uint(n) => MenuId(n.to_string()),
        })
    }
}

/// One purchasable item
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: MenuId,
    pub name: String,
    #[serde(default)]
    pub sold_out: bool,
}

impl MenuEntry {
    pub fn new(id: impl Into<MenuId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sold_out: false,
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Serialize)]
pub(crate) struct MenuNameRequest<'a> {
    pub name: &'a str,
}
