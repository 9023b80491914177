//! The `finance summary` dashboard.

use crate::commands::Out;
use crate::model::{Amount, CategoryTotals, EntryType};
use crate::snapshot::KeyValueStore;
use crate::store::FinanceStore;
use crate::{Config, Result};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Balance, totals and the per-category breakdowns, recomputed from every transaction.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    balance: Amount,
    income: Amount,
    expense: Amount,
    income_by_category: Breakdown,
    expense_by_category: Breakdown,
}

impl Summary {
    pub(crate) fn new<S: KeyValueStore>(store: &FinanceStore<S>) -> Self {
        Self {
            balance: store.balance().into(),
            income: store.total_income().into(),
            expense: store.total_expense().into(),
            income_by_category: Breakdown::new(store, EntryType::Income),
            expense_by_category: Breakdown::new(store, EntryType::Expense),
        }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn income(&self) -> Amount {
        self.income
    }

    pub fn expense(&self) -> Amount {
        self.expense
    }

    pub fn income_by_category(&self) -> &Breakdown {
        &self.income_by_category
    }

    pub fn expense_by_category(&self) -> &Breakdown {
        &self.expense_by_category
    }

    fn render(&self) -> String {
        let mut s = format!(
            "Balance:         {}\nTotal income:    {}\nTotal expenses:  {}\n",
            self.balance, self.income, self.expense
        );
        s.push_str("\nIncome by category\n");
        s.push_str(&self.income_by_category.render("No income recorded"));
        s.push_str("\n\nExpenses by category\n");
        s.push_str(&self.expense_by_category.render("No expenses recorded"));
        s
    }
}

/// The totals of one entry type, per category, in the order each category first appears.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Breakdown {
    lines: Vec<BreakdownLine>,
}

impl Breakdown {
    fn new<S: KeyValueStore>(store: &FinanceStore<S>, entry_type: EntryType) -> Self {
        let totals: CategoryTotals = store.category_totals(entry_type);
        let lines = totals
            .iter()
            .map(|(name, amount)| BreakdownLine {
                category: name.to_string(),
                color: store.category_color(name).to_string(),
                amount: amount.into(),
                share: totals.share(name).and_then(|d| d.to_f64()),
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[BreakdownLine] {
        &self.lines
    }

    fn render(&self, empty: &str) -> String {
        if self.lines.is_empty() {
            return format!("  {empty}");
        }
        let labels: Vec<String> = self
            .lines
            .iter()
            .map(|l| format!("{} ({})", l.category, l.color))
            .collect();
        let amounts: Vec<String> = self.lines.iter().map(|l| l.amount.to_string()).collect();
        let label_w = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or_default();
        let amount_w = amounts.iter().map(|a| a.len()).max().unwrap_or_default();

        self.lines
            .iter()
            .zip(labels.iter().zip(amounts.iter()))
            .map(|(line, (label, amount))| {
                let share = line
                    .share
                    .map(|p| format!("{p:.2}%"))
                    .unwrap_or_else(|| "-".to_string());
                format!("  {label:<label_w$}  {amount:>amount_w$}  {share:>7}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A category's total and its percentage of the total for its type.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownLine {
    category: String,
    color: String,
    amount: Amount,
    share: Option<f64>,
}

impl BreakdownLine {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn share(&self) -> Option<f64> {
        self.share
    }
}

/// Computes the dashboard figures.
pub fn summary(config: Config) -> Result<Out<Summary>> {
    let store = config.open_store()?;
    let summary = Summary::new(&store);
    Ok(Out::new(summary.render(), summary))
}
