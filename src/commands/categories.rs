//! Handlers for the `finance category` subcommands.

use crate::args::{AddCategoryArgs, DeleteArgs, ListCategoriesArgs};
use crate::commands::{plural, Out};
use crate::model::{Category, NewCategory};
use crate::{Config, Result};
use anyhow::bail;
use tracing::warn;

/// Creates a category. The name and color must not be blank.
///
/// A second category with an existing name is allowed, but transactions and colors resolve to
/// the first one, so a warning is logged.
pub fn add_category(config: Config, args: AddCategoryArgs) -> Result<Out<Category>> {
    if args.name().trim().is_empty() {
        bail!("The category name is required")
    }
    if args.color().trim().is_empty() {
        bail!("The category color is required")
    }

    let mut store = config.open_store()?;
    if store.categories().iter().any(|c| c.name() == args.name()) {
        warn!(
            "A category named '{}' already exists, the new one will be shadowed by it",
            args.name()
        );
    }

    let category = store.add_category(NewCategory {
        name: args.name().to_string(),
        entry_type: args.entry_type(),
        color: args.color().to_string(),
    })?;
    let message = format!(
        "Added {} category {}: {}",
        category.entry_type(),
        category.id(),
        category.name()
    );
    Ok(Out::new(message, category))
}

/// Deletes a category by ID. Transactions that refer to it by name are kept and reported.
pub fn delete_category(config: Config, args: DeleteArgs) -> Result<Out<Option<Category>>> {
    let mut store = config.open_store()?;
    let Some(removed) = store.delete_category(args.id())? else {
        return Ok(Out::new(
            format!(
                "There is no category with ID {}, nothing was deleted",
                args.id()
            ),
            None,
        ));
    };

    let orphans = store
        .orphaned_transactions()
        .iter()
        .filter(|t| t.category() == removed.name())
        .count();
    let mut message = format!("Deleted category {}: {}", removed.id(), removed.name());
    if orphans > 0 {
        message.push_str(&format!(
            "\n{} the name '{}'",
            plural(orphans, "transaction still uses", "transactions still use"),
            removed.name()
        ));
    }
    Ok(Out::new(message, Some(removed)))
}

/// Lists the categories, optionally only those of one type.
pub fn list_categories(config: Config, args: ListCategoriesArgs) -> Result<Out<Vec<Category>>> {
    let store = config.open_store()?;
    let found: Vec<Category> = store
        .categories()
        .iter()
        .filter(|c| args.entry_type().matches(c.entry_type()))
        .cloned()
        .collect();
    if found.is_empty() {
        return Ok(Out::new("No categories found", found));
    }

    let id_w = found.iter().map(|c| c.id().len()).max().unwrap_or_default();
    let name_w = found
        .iter()
        .map(|c| c.name().chars().count())
        .max()
        .unwrap_or_default();
    let message = found
        .iter()
        .map(|c| {
            format!(
                "{:<id_w$}  {:<name_w$}  {:<7}  {}",
                c.id(),
                c.name(),
                c.entry_type().to_string(),
                c.color()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, found))
}
