//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod defaults;
mod totals;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{Category, NewCategory};
pub use defaults::{default_categories, sample_transactions};
pub use totals::CategoryTotals;
pub use transaction::{NewTransaction, Transaction, TransactionFilter};

use serde::{Deserialize, Serialize};

/// Whether money came in or went out. Both transactions and categories carry one.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(EntryType);
serde_plain::derive_fromstr_from_deserialize!(EntryType);

impl EntryType {
    /// The factor applied to an amount of this type when computing a balance.
    pub(crate) fn sign(&self) -> i32 {
        match self {
            EntryType::Income => 1,
            EntryType::Expense => -1,
        }
    }
}

/// Selects transactions by type in the history view, `All` selects both.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TypeFilter);
serde_plain::derive_fromstr_from_deserialize!(TypeFilter);

impl TypeFilter {
    pub fn matches(&self, entry_type: EntryType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => entry_type == EntryType::Income,
            TypeFilter::Expense => entry_type == EntryType::Expense,
        }
    }
}

impl From<EntryType> for TypeFilter {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Income => TypeFilter::Income,
            EntryType::Expense => TypeFilter::Expense,
        }
    }
}
