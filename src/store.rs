//! `FinanceStore` owns the transactions and categories and keeps the snapshot in sync with them.

use crate::model::{
    default_categories, sample_transactions, Category, CategoryTotals, EntryType, NewCategory,
    NewTransaction, Transaction, TransactionFilter,
};
use crate::snapshot::{KeyValueStore, CATEGORIES_KEY, TRANSACTIONS_KEY};
use crate::{utils, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

/// The color reported for a category name that matches no category.
pub const FALLBACK_COLOR: &str = "#cccccc";

/// The in-memory transaction and category store.
///
/// A `FinanceStore` is hydrated once, in `load`, and never re-reads its snapshot afterwards.
/// Every mutation rewrites both snapshot entries, except that an empty collection is never
/// written. This means that deleting the last transaction leaves the previous `transactions`
/// entry in place, and the deleted data reappears at the next `load`.
///
/// Aggregates are recomputed from the full transaction list on every call.
#[derive(Debug)]
pub struct FinanceStore<S: KeyValueStore> {
    storage: S,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl<S: KeyValueStore> FinanceStore<S> {
    /// Hydrates from `storage`. A missing entry is seeded with the built-in defaults. Nothing is
    /// written until the first mutation, unlike the browser tracker which saved the seeded data
    /// right away. A read-only session therefore leaves an empty store empty.
    ///
    /// # Errors
    /// - Returns an error if `storage` cannot be read.
    /// - Returns an error if a stored entry is not a valid JSON array of the expected type.
    pub fn load(storage: S) -> Result<Self> {
        let transactions = match read_entry(&storage, TRANSACTIONS_KEY)? {
            Some(transactions) => transactions,
            None => {
                debug!("No stored transactions, using the sample transactions");
                sample_transactions()
            }
        };
        let categories = match read_entry(&storage, CATEGORIES_KEY)? {
            Some(categories) => categories,
            None => {
                debug!("No stored categories, using the default categories");
                default_categories()
            }
        };
        debug!(
            "Loaded {} transactions and {} categories",
            transactions.len(),
            categories.len()
        );
        Ok(Self {
            storage,
            transactions,
            categories,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives back the key-value store, dropping the in-memory state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All categories in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Appends a transaction with a freshly generated id and returns it.
    ///
    /// No validation happens here. The in-memory change is kept even if the snapshot write fails.
    ///
    /// # Errors
    /// - Returns an error if the snapshot cannot be written.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction::new(utils::generate_id(), new);
        debug!(
            "Adding {} transaction {}",
            transaction.entry_type(),
            transaction.id()
        );
        self.transactions.push(transaction.clone());
        self.persist()?;
        Ok(transaction)
    }

    /// Removes the transaction with `id`, returning it. An unknown `id` is not an error, it
    /// returns `None`. The snapshot is written either way.
    ///
    /// # Errors
    /// - Returns an error if the snapshot cannot be written.
    pub fn delete_transaction(&mut self, id: &str) -> Result<Option<Transaction>> {
        let removed = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .map(|ix| self.transactions.remove(ix));
        match &removed {
            Some(_) => debug!("Deleted transaction {id}"),
            None => debug!("No transaction {id} to delete"),
        }
        self.persist()?;
        Ok(removed)
    }

    /// Appends a category with a freshly generated id and returns it.
    ///
    /// # Errors
    /// - Returns an error if the snapshot cannot be written.
    pub fn add_category(&mut self, new: NewCategory) -> Result<Category> {
        let category = Category::new(utils::generate_id(), new);
        debug!(
            "Adding {} category '{}' with id {}",
            category.entry_type(),
            category.name(),
            category.id()
        );
        self.categories.push(category.clone());
        self.persist()?;
        Ok(category)
    }

    /// Removes the category with `id`, returning it. Transactions that use its name are left as
    /// they are, see `orphaned_transactions`.
    ///
    /// # Errors
    /// - Returns an error if the snapshot cannot be written.
    pub fn delete_category(&mut self, id: &str) -> Result<Option<Category>> {
        let removed = self
            .categories
            .iter()
            .position(|c| c.id() == id)
            .map(|ix| self.categories.remove(ix));
        match &removed {
            Some(c) => debug!("Deleted category {id} '{}'", c.name()),
            None => debug!("No category {id} to delete"),
        }
        self.persist()?;
        Ok(removed)
    }

    /// Income minus expenses over all transactions.
    pub fn balance(&self) -> Decimal {
        self.transactions
            .iter()
            .map(|t| t.amount().value() * Decimal::from(t.entry_type().sign()))
            .sum()
    }

    pub fn total_income(&self) -> Decimal {
        self.total(EntryType::Income)
    }

    pub fn total_expense(&self) -> Decimal {
        self.total(EntryType::Expense)
    }

    fn total(&self, entry_type: EntryType) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.entry_type() == entry_type)
            .map(|t| t.amount().value())
            .sum()
    }

    /// Sums the transactions of `entry_type` by category name.
    pub fn category_totals(&self, entry_type: EntryType) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for t in self
            .transactions
            .iter()
            .filter(|t| t.entry_type() == entry_type)
        {
            totals.add(t.category(), t.amount().value());
        }
        totals
    }

    /// The color of the first category named `name`, or `FALLBACK_COLOR`.
    pub fn category_color(&self, name: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.color())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// The categories offered when recording a transaction of `entry_type`.
    pub fn categories_of_type(&self, entry_type: EntryType) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.entry_type() == entry_type)
            .collect()
    }

    /// The transactions selected by `filter`, newest first. Transactions on the same date keep
    /// their insertion order.
    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        let mut found: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .collect();
        found.sort_by(|a, b| b.date().cmp(&a.date()));
        found
    }

    /// Transactions whose category name does not match any category.
    pub fn orphaned_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| !self.categories.iter().any(|c| c.name() == t.category()))
            .collect()
    }

    fn persist(&mut self) -> Result<()> {
        write_entry(&mut self.storage, TRANSACTIONS_KEY, &self.transactions)?;
        write_entry(&mut self.storage, CATEGORIES_KEY, &self.categories)
    }
}

fn read_entry<S, T>(storage: &S, key: &str) -> Result<Option<Vec<T>>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(json) = storage
        .get(key)
        .with_context(|| format!("Unable to read the '{key}' snapshot entry"))?
    else {
        return Ok(None);
    };
    let items = serde_json::from_str(&json)
        .with_context(|| format!("Unable to parse the '{key}' snapshot entry"))?;
    Ok(Some(items))
}

fn write_entry<S, T>(storage: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    if items.is_empty() {
        debug!("Not writing the '{key}' snapshot entry because it is empty");
        return Ok(());
    }
    let json = serde_json::to_string(items)
        .with_context(|| format!("Unable to serialize the '{key}' snapshot entry"))?;
    storage
        .set(key, &json)
        .with_context(|| format!("Unable to write the '{key}' snapshot entry"))?;
    trace!("Wrote {} items to the '{key}' snapshot entry", items.len());
    Ok(())
}
