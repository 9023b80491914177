//! These structs provide the CLI interface for the finance CLI.

use crate::model::{EntryType, TypeFilter};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// finance: A command-line personal finance tracker.
///
/// Record income and expense transactions, assign them to categories, and view your balance and
/// a breakdown of where the money came from and went. Data is kept as two JSON files in the data
/// directory under --finance-home.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the finance home directory and its configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/finance. If you want it somewhere else then pass --finance-home or set FINANCE_HOME.
    Init,
    /// Record a new income or expense transaction.
    Add(AddArgs),
    /// Delete a transaction by ID.
    Delete(DeleteArgs),
    /// Show the transaction history, newest first.
    List(ListArgs),
    /// Show the balance, totals and the breakdown by category.
    Summary,
    /// Add, delete or list categories.
    Category(CategoryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// The directory where finance data and configuration is held. Defaults to ~/finance
    #[arg(long, env = "FINANCE_HOME", default_value_t = default_finance_home())]
    finance_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn finance_home(&self) -> &DisplayPath {
        &self.finance_home
    }
}

/// Args for the `finance add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount of money, e.g. 75, 75.50 or $1,200.00
    #[arg(long)]
    amount: String,

    /// The category name, e.g. Food. See `finance category list`.
    #[arg(long)]
    category: String,

    /// A short description, e.g. "Lunch"
    #[arg(long)]
    description: String,

    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = EntryType::Expense)]
    entry_type: EntryType,

    /// The date in YYYY-MM-DD format. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        entry_type: EntryType,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            entry_type,
            date,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
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

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `finance delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete, as shown by `finance list`.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `finance list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show transactions of this type.
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    entry_type: TypeFilter,

    /// Only show transactions whose description or category contains this text (ignoring case).
    #[arg(long)]
    search: Option<String>,
}

impl ListArgs {
    pub fn new(entry_type: TypeFilter, search: Option<String>) -> Self {
        Self { entry_type, search }
    }

    pub fn entry_type(&self) -> TypeFilter {
        self.entry_type
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// Args for the `finance category` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategorySubcommand,
}

impl CategoryArgs {
    pub fn command(&self) -> &CategorySubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Create a new category.
    Add(AddCategoryArgs),
    /// Delete a category by ID. Transactions that use it keep its name.
    Delete(DeleteArgs),
    /// List the categories.
    List(ListCategoriesArgs),
}

/// Args for the `finance category add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddCategoryArgs {
    /// The category name. Transactions refer to the category by this name.
    #[arg(long)]
    name: String,

    /// Whether the category is for income or expenses.
    #[arg(long = "type", value_enum)]
    entry_type: EntryType,

    /// A hex color used when displaying the category, e.g. #e76f51
    #[arg(long)]
    color: String,
}

impl AddCategoryArgs {
    pub fn new(name: impl Into<String>, entry_type: EntryType, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type,
            color: color.into(),
        }
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

/// Args for the `finance category list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListCategoriesArgs {
    /// Only show categories of this type.
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    entry_type: TypeFilter,
}

impl ListCategoriesArgs {
    pub fn new(entry_type: TypeFilter) -> Self {
        Self { entry_type }
    }

    pub fn entry_type(&self) -> TypeFilter {
        self.entry_type
    }
}

fn default_finance_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("finance"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --finance-home or FINANCE_HOME instead of relying on the \
                default finance home directory.",
            );
            PathBuf::from("finance")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "finance",
            "--finance-home",
            "/tmp/f",
            "add",
            "--amount",
            "75",
            "--category",
            "Food",
            "--description",
            "Lunch",
            "--date",
            "2025-05-01",
        ])
        .unwrap();
        assert_eq!(args.common().finance_home().path(), Path::new("/tmp/f"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        let Command::Add(add) = args.command() else {
            panic!("expected the add command")
        };
        assert_eq!(add.amount(), "75");
        assert_eq!(add.entry_type(), EntryType::Expense);
        assert_eq!(add.date(), NaiveDate::from_ymd_opt(2025, 5, 1));
    }

    #[test]
    fn test_parse_list_income() {
        let argv = ["finance", "list", "--type", "income", "--search", "sal"];
        let args = Args::try_parse_from(argv).unwrap();
        let Command::List(list) = args.command() else {
            panic!("expected the list command")
        };
        assert_eq!(list.entry_type(), TypeFilter::Income);
        assert_eq!(list.search(), "sal");
    }

    #[test]
    fn test_parse_category_add() {
        let args = Args::try_parse_from([
            "finance", "category", "add", "--name", "Pets", "--type", "expense", "--color",
            "#123456",
        ])
        .unwrap();
        let Command::Category(category) = args.command() else {
            panic!("expected the category command")
        };
        let CategorySubcommand::Add(add) = category.command() else {
            panic!("expected the category add command")
        };
        assert_eq!(add.name(), "Pets");
        assert_eq!(add.entry_type(), EntryType::Expense);
    }

    #[test]
    fn test_parse_bad_date_fails() {
        let result = Args::try_parse_from([
            "finance",
            "add",
            "--amount",
            "1",
            "--category",
            "Food",
            "--description",
            "x",
            "--date",
            "05/01/2025",
        ]);
        assert!(result.is_err());
    }
}
