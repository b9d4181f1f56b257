use rust_decimal::Decimal;

/// Ordered category → amount mapping.
///
/// Keys are unique; iteration order is insertion order, which drives both
/// display order and export row order. Used for allocations and for actual
/// expenses (where a missing category reads as zero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountSet {
    entries: Vec<(String, Decimal)>,
}

impl AmountSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    /// Amount for a category, defaulting to zero when absent.
    pub fn get_or_zero(&self, category: &str) -> Decimal {
        self.get(category).unwrap_or(Decimal::ZERO)
    }

    /// Insert or update, preserving the position of an existing key.
    pub fn set(&mut self, category: &str, amount: Decimal) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == category) {
            entry.1 = amount;
        } else {
            self.entries.push((category.to_string(), amount));
        }
    }

    pub fn remove(&mut self, category: &str) -> Option<Decimal> {
        let idx = self.entries.iter().position(|(name, _)| name == category)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}

impl FromIterator<(String, Decimal)> for AmountSet {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, amount) in iter {
            set.set(&name, amount);
        }
        set
    }
}
