//! The data a new snapshot starts with: ten categories and five sample transactions.

use crate::model::{Amount, Category, EntryType, NewCategory, NewTransaction, Transaction};
use chrono::NaiveDate;

const CATEGORIES: [(&str, &str, EntryType, &str); 10] = [
    ("1", "Salary", EntryType::Income, "#38b000"),
    ("2", "Freelance", EntryType::Income, "#80ed99"),
    ("3", "Investment", EntryType::Income, "#157f1f"),
    ("4", "Gift", EntryType::Income, "#0077b6"),
    ("5", "Housing", EntryType::Expense, "#e5383b"),
    ("6", "Food", EntryType::Expense, "#e76f51"),
    ("7", "Transportation", EntryType::Expense, "#f4a261"),
    ("8", "Entertainment", EntryType::Expense, "#e9c46a"),
    ("9", "Utilities", EntryType::Expense, "#2a9d8f"),
    ("10", "Healthcare", EntryType::Expense, "#264653"),
];

struct Sample {
    id: &'static str,
    date: (i32, u32, u32),
    amount: i32,
    category: &'static str,
    description: &'static str,
    entry_type: EntryType,
}

const TRANSACTIONS: [Sample; 5] = [
    Sample {
        id: "1",
        date: (2025, 4, 10),
        amount: 3000,
        category: "Salary",
        description: "Monthly salary",
        entry_type: EntryType::Income,
    },
    Sample {
        id: "2",
        date: (2025, 4, 12),
        amount: 50,
        category: "Food",
        description: "Grocery shopping",
        entry_type: EntryType::Expense,
    },
    Sample {
        id: "3",
        date: (2025, 4, 15),
        amount: 100,
        category: "Entertainment",
        description: "Movie tickets",
        entry_type: EntryType::Expense,
    },
    Sample {
        id: "4",
        date: (2025, 4, 16),
        amount: 500,
        category: "Freelance",
        description: "Design project",
        entry_type: EntryType::Income,
    },
    Sample {
        id: "5",
        date: (2025, 4, 17),
        amount: 200,
        category: "Housing",
        description: "Electricity bill",
        entry_type: EntryType::Expense,
    },
];

/// The categories used when the snapshot has no `categories` entry.
pub fn default_categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(id, name, entry_type, color)| {
            Category::new(
                *id,
                NewCategory {
                    name: name.to_string(),
                    entry_type: *entry_type,
                    color: color.to_string(),
                },
            )
        })
        .collect()
}

/// The transactions used when the snapshot has no `transactions` entry.
pub fn sample_transactions() -> Vec<Transaction> {
    TRANSACTIONS
        .iter()
        .map(|s| {
            let (y, m, d) = s.date;
            Transaction::new(
                s.id,
                NewTransaction {
                    date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                    amount: Amount::from(s.amount),
                    category: s.category.to_string(),
                    description: s.description.to_string(),
                    entry_type: s.entry_type,
                },
            )
        })
        .collect()
}
