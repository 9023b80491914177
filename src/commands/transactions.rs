//! Handlers for recording, deleting and listing transactions.

use crate::args::{AddArgs, DeleteArgs, ListArgs};
use crate::commands::{plural, Out};
use crate::model::{Amount, EntryType, NewTransaction, Transaction, TransactionFilter};
use crate::{Config, Result};
use anyhow::{bail, Context};
use chrono::Local;
use std::str::FromStr;
use tracing::{debug, warn};

/// Validates the fields of a new transaction and records it.
///
/// Every field must be non-empty. Text made only of spaces counts as filled in. The amount must
/// be a positive number: the type says whether the money came in or went out, so the amount
/// itself is never negative.
///
/// A category name that does not match any category of the same type is accepted with a warning.
/// Such a transaction still counts toward the totals under its own name.
pub fn add_transaction(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let new = validate(&args)?;
    let mut store = config.open_store()?;

    let known = store
        .categories_of_type(new.entry_type)
        .iter()
        .any(|c| c.name() == new.category);
    if !known {
        warn!(
            "There is no {} category named '{}', the transaction will use it anyway",
            new.entry_type, new.category
        );
    }

    let transaction = store.add_transaction(new)?;
    let message = format!(
        "Added {} transaction {}: {} {}",
        transaction.entry_type(),
        transaction.id(),
        transaction.description(),
        transaction.amount()
    );
    Ok(Out::new(message, transaction))
}

fn validate(args: &AddArgs) -> Result<NewTransaction> {
    if args.amount().is_empty() {
        bail!("The amount is required")
    }
    if args.category().is_empty() {
        bail!("The category is required")
    }
    if args.description().is_empty() {
        bail!("The description is required")
    }
    let amount = Amount::from_str(args.amount().trim())
        .with_context(|| format!("The amount '{}' is not a number", args.amount()))?;
    if amount.is_zero() {
        bail!("The amount must not be zero")
    }
    if amount.is_negative() {
        bail!(
            "The amount must not be negative, use --type {} or --type {} instead",
            EntryType::Income,
            EntryType::Expense
        )
    }
    let date = args.date().unwrap_or_else(|| Local::now().date_naive());
    Ok(NewTransaction {
        date,
        amount,
        category: args.category().to_string(),
        description: args.description().to_string(),
        entry_type: args.entry_type(),
    })
}

/// Deletes the transaction with the given ID. An ID that matches nothing is not an error.
pub fn delete_transaction(config: Config, args: DeleteArgs) -> Result<Out<Option<Transaction>>> {
    let mut store = config.open_store()?;
    let removed = store.delete_transaction(args.id())?;
    let message = match &removed {
        Some(t) => format!("Deleted transaction {}: {}", t.id(), t.description()),
        None => format!(
            "There is no transaction with ID {}, nothing was deleted",
            args.id()
        ),
    };
    Ok(Out::new(message, removed))
}

/// Renders the transaction history, newest first, narrowed by type and search text.
pub fn list_transactions(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let store = config.open_store()?;
    let filter = TransactionFilter::new(args.entry_type(), args.search());
    let found: Vec<Transaction> = store
        .filter_transactions(&filter)
        .into_iter()
        .cloned()
        .collect();
    debug!(
        "{} of {} match",
        plural(found.len(), "transaction", "transactions"),
        store.transactions().len()
    );

    if found.is_empty() {
        return Ok(Out::new("No transactions found", found));
    }

    let rows: Vec<Row> = found
        .iter()
        .map(|t| Row::new(t, store.category_color(t.category())))
        .collect();
    Ok(Out::new(render(&rows), found))
}

/// One line of the history table.
struct Row {
    id: String,
    date: String,
    description: String,
    category: String,
    amount: String,
}

impl Row {
    fn new(t: &Transaction, color: &str) -> Self {
        let sign = match t.entry_type() {
            EntryType::Income => '+',
            EntryType::Expense => '-',
        };
        Self {
            id: t.id().to_string(),
            date: t.date().format("%b %-d, %Y").to_string(),
            description: t.description().to_string(),
            category: format!("{} ({color})", t.category()),
            amount: format!("{sign}{}", t.amount()),
        }
    }
}

fn render(rows: &[Row]) -> String {
    let id_w = rows
        .iter()
        .map(|r| r.id.chars().count())
        .max()
        .unwrap_or_default();
    let date_w = rows
        .iter()
        .map(|r| r.date.chars().count())
        .max()
        .unwrap_or_default();
    let desc_w = rows
        .iter()
        .map(|r| r.description.chars().count())
        .max()
        .unwrap_or_default();
    let cat_w = rows
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or_default();
    let amount_w = rows
        .iter()
        .map(|r| r.amount.chars().count())
        .max()
        .unwrap_or_default();

    rows.iter()
        .map(|r| {
            format!(
                "{:<id_w$}  {:<date_w$}  {:<desc_w$}  {:<cat_w$}  {:>amount_w$}",
                r.id, r.date, r.description, r.category, r.amount
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeFilter;
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn lunch(amount: &str) -> AddArgs {
        AddArgs::new(
            amount,
            "Food",
            "Lunch",
            EntryType::Expense,
            NaiveDate::from_ymd_opt(2025, 5, 1),
        )
    }

    #[test]
    fn test_add_transaction() {
        let env = TestEnv::new();
        let out = add_transaction(env.config(), lunch("75")).unwrap();
        let added = out.structure().unwrap();
        assert_eq!(added.amount(), Amount::from(75));
        assert!(out.message().contains("Lunch $75.00"));

        let store = env.config().open_store().unwrap();
        assert_eq!(store.transactions().len(), 6);
        assert_eq!(store.total_expense(), Decimal::from(425));
    }

    #[test]
    fn test_add_transaction_accepts_formatted_amount() {
        let env = TestEnv::new();
        let out = add_transaction(env.config(), lunch("$1,200.50")).unwrap();
        assert_eq!(
            out.structure().unwrap().amount().value(),
            "1200.50".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_add_transaction_defaults_to_today() {
        let env = TestEnv::new();
        let args = AddArgs::new("5", "Food", "Snack", EntryType::Expense, None);
        let out = add_transaction(env.config(), args).unwrap();
        assert_eq!(out.structure().unwrap().date(), Local::now().date_naive());
    }

    #[test]
    fn test_add_transaction_rejects_missing_fields() {
        let env = TestEnv::new();
        for args in [
            AddArgs::new("", "Food", "Lunch", EntryType::Expense, None),
            AddArgs::new("5", "", "Lunch", EntryType::Expense, None),
            AddArgs::new("5", "Food", "", EntryType::Expense, None),
        ] {
            let err = add_transaction(env.config(), args).unwrap_err();
            assert!(err.to_string().contains("is required"));
        }
        assert_eq!(env.config().open_store().unwrap().transactions().len(), 5);
    }

    #[test]
    fn test_add_transaction_accepts_blank_description() {
        let env = TestEnv::new();
        let args = AddArgs::new("5", "Food", "  ", EntryType::Expense, None);
        let out = add_transaction(env.config(), args).unwrap();
        assert_eq!(out.structure().unwrap().description(), "  ");
        assert!(add_transaction(env.config(), lunch("  ")).is_err());
    }

    #[test]
    fn test_add_transaction_rejects_bad_amounts() {
        let env = TestEnv::new();
        assert!(add_transaction(env.config(), lunch("abc")).is_err());
        assert!(add_transaction(env.config(), lunch("0")).is_err());
        assert!(add_transaction(env.config(), lunch("-5")).is_err());
        assert!(!env.config().data_dir().join("transactions.json").exists());
    }

    #[test]
    fn test_add_transaction_unknown_category_is_kept() {
        let env = TestEnv::new();
        let args = AddArgs::new("9", "Pets", "Cat food", EntryType::Expense, None);
        add_transaction(env.config(), args).unwrap();
        let store = env.config().open_store().unwrap();
        assert_eq!(store.orphaned_transactions().len(), 1);
        assert_eq!(
            store.category_totals(EntryType::Expense).get("Pets"),
            Some(Decimal::from(9))
        );
    }

    #[test]
    fn test_delete_transaction() {
        let env = TestEnv::new();
        let out = delete_transaction(env.config(), DeleteArgs::new("3")).unwrap();
        assert_eq!(out.structure().unwrap().as_ref().unwrap().id(), "3");
        assert!(out.message().contains("Movie tickets"));
        assert_eq!(env.config().open_store().unwrap().transactions().len(), 4);
    }

    #[test]
    fn test_delete_unknown_transaction_succeeds() {
        let env = TestEnv::new();
        let out = delete_transaction(env.config(), DeleteArgs::new("nope")).unwrap();
        assert!(out.structure().unwrap().is_none());
        assert!(out.message().contains("nothing was deleted"));
        assert_eq!(env.config().open_store().unwrap().transactions().len(), 5);
    }

    #[test]
    fn test_list_transactions() {
        let env = TestEnv::new();
        let out = list_transactions(env.config(), ListArgs::default()).unwrap();
        let ids: Vec<&str> = out.structure().unwrap().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["5", "4", "3", "2", "1"]);

        let lines: Vec<&str> = out.message().lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Apr 17, 2025"));
        assert!(lines[0].contains("Housing (#e5383b)"));
        assert!(lines[0].ends_with("-$200.00"));
        assert!(lines[4].ends_with("+$3,000.00"));
    }

    #[test]
    fn test_list_transactions_filtered() {
        let env = TestEnv::new();
        let args = ListArgs::new(TypeFilter::Income, Some("FREE".to_string()));
        let out = list_transactions(env.config(), args).unwrap();
        let found = out.structure().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category(), "Freelance");
    }

    #[test]
    fn test_list_transactions_none_found() {
        let env = TestEnv::new();
        let args = ListArgs::new(TypeFilter::All, Some("zzz".to_string()));
        let out = list_transactions(env.config(), args).unwrap();
        assert_eq!(out.message(), "No transactions found");
        assert!(out.structure().unwrap().is_empty());
    }
}
