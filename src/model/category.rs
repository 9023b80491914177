use crate::model::EntryType;
use serde::{Deserialize, Serialize};

/// A named, colored bucket for transactions of one `EntryType`.
///
/// Transactions refer to a category by `name`, not by `id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: String,
    name: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    /// A hex color such as `#e76f51`.
    color: String,
}

impl Category {
    pub(crate) fn new(id: impl Into<String>, new: NewCategory) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            entry_type: new.entry_type,
            color: new.color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The fields of a `Category` supplied by the caller. The store assigns the `id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub color: String,
}
