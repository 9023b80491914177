use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Summed amounts per category name, in the order each name was first encountered.
///
/// A name only appears if at least one transaction contributed to it.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
}

impl CategoryTotals {
    pub(crate) fn add(&mut self, name: &str, amount: Decimal) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((name.to_string(), amount)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, total)| *total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(n, total)| (n.as_str(), *total))
    }

    /// The sum over all categories.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, total)| *total).sum()
    }

    /// The percentage of `total()` contributed by `name`, rounded to two places. `None` if the
    /// name is absent or the total is zero.
    pub fn share(&self, name: &str) -> Option<Decimal> {
        let total = self.total();
        if total.is_zero() {
            return None;
        }
        self.get(name)
            .map(|amount| (amount * Decimal::ONE_HUNDRED / total).round_dp(2))
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, total) in &self.entries {
            map.serialize_entry(name, &total.to_string())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_keep_first_encountered_order() {
        let mut totals = CategoryTotals::default();
        totals.add("Food", Decimal::from(50));
        totals.add("Housing", Decimal::from(200));
        totals.add("Food", Decimal::from(25));
        let names: Vec<&str> = totals.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Food", "Housing"]);
        assert_eq!(totals.get("Food"), Some(Decimal::from(75)));
        assert_eq!(totals.get("Gift"), None);
        assert_eq!(totals.total(), Decimal::from(275));
    }

    #[test]
    fn test_share() {
        let mut totals = CategoryTotals::default();
        totals.add("Food", Decimal::from(50));
        totals.add("Housing", Decimal::from(150));
        assert_eq!(totals.share("Food"), Some(Decimal::from(25)));
        assert_eq!(totals.share("Housing"), Some(Decimal::from(75)));
        assert_eq!(totals.share("Gift"), None);
        assert_eq!(CategoryTotals::default().share("Food"), None);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let mut totals = CategoryTotals::default();
        totals.add("Housing", Decimal::from(200));
        totals.add("Food", Decimal::from(50));
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"Housing":"200","Food":"50"}"#);
    }
}
