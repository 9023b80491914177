use crate::model::{Amount, EntryType, TypeFilter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recorded money movement.
///
/// The serialized field names and order match the `transactions` snapshot entry:
/// `{"id":"1","date":"2025-04-10","amount":3000,"category":"Salary",...}`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    date: NaiveDate,
    amount: Amount,
    /// The name of a `Category`. Nothing guarantees that such a category exists.
    category: String,
    description: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
}

impl Transaction {
    pub(crate) fn new(id: impl Into<String>, new: NewTransaction) -> Self {
        Self {
            id: id.into(),
            date: new.date,
            amount: new.amount,
            category: new.category,
            description: new.description,
            entry_type: new.entry_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }
}

/// The fields of a `Transaction` supplied by the caller. The store assigns the `id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Selects transactions for the history view.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TransactionFilter {
    entry_type: TypeFilter,
    search: String,
}

impl TransactionFilter {
    pub fn new(entry_type: TypeFilter, search: impl AsRef<str>) -> Self {
        Self {
            entry_type,
            search: search.as_ref().trim().to_lowercase(),
        }
    }

    /// True when the type matches and the search text is found, ignoring case, in either the
    /// description or the category. An empty search matches everything.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.entry_type.matches(transaction.entry_type()) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let description = transaction.description().to_lowercase();
        let category = transaction.category().to_lowercase();
        description.contains(&self.search) || category.contains(&self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Transaction {
        Transaction::new(
            "abc",
            NewTransaction {
                date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                amount: Amount::from(75),
                category: "Food".to_string(),
                description: "Lunch with Sam".to_string(),
                entry_type: EntryType::Expense,
            },
        )
    }

    #[test]
    fn test_serialize_snapshot_shape() {
        let json = serde_json::to_string(&lunch()).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","date":"2025-05-01","amount":75,"category":"Food","description":"Lunch with Sam","type":"expense"}"#
        );
    }

    #[test]
    fn test_deserialize_browser_snapshot_entry() {
        let json = r#"{"id":"1714567890123","date":"2025-04-12","amount":50.5,"category":"Food","description":"Grocery shopping","type":"expense"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id(), "1714567890123");
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2025, 4, 12).unwrap());
        assert_eq!(t.amount(), "50.5".parse::<Amount>().unwrap());
        assert_eq!(t.entry_type(), EntryType::Expense);
    }

    #[test]
    fn test_filter_search_ignores_case() {
        let t = lunch();
        assert!(TransactionFilter::new(TypeFilter::All, "LUNCH").matches(&t));
        assert!(TransactionFilter::new(TypeFilter::All, "foo").matches(&t));
        assert!(TransactionFilter::new(TypeFilter::Expense, "").matches(&t));
        assert!(!TransactionFilter::new(TypeFilter::Income, "").matches(&t));
        assert!(!TransactionFilter::new(TypeFilter::All, "rent").matches(&t));
    }
}
