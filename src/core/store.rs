use std::collections::HashMap;

use crate::models::{IncomeEntry, Listing, TransitStop};

/// Profession income lookup with a mean-income fallback
#[derive(Debug, Clone, Default)]
pub struct IncomeTable {
    entries: Vec<IncomeEntry>,
    by_profession: HashMap<String, usize>,
    mean_income: f64,
}

impl IncomeTable {
    /// Build the table, keeping the first entry for each case-folded profession
    pub fn new(entries: Vec<IncomeEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut by_profession = HashMap::with_capacity(entries.len());

        for entry in entries {
            let key = entry.profession.to_lowercase();
            if by_profession.contains_key(&key) {
                tracing::debug!("Ignoring duplicate income entry for {}", entry.profession);
                continue;
            }
            by_profession.insert(key, kept.len());
            kept.push(entry);
        }

        let mean_income = if kept.is_empty() {
            0.0
        } else {
            kept.iter().map(|e| e.avg_income).sum::<f64>() / kept.len() as f64
        };

        Self {
            entries: kept,
            by_profession,
            mean_income,
        }
    }

    /// Look up a profession case-insensitively
    pub fn get(&self, profession: &str) -> Option<f64> {
        self.by_profession
            .get(&profession.to_lowercase())
            .map(|&idx| self.entries[idx].avg_income)
    }

    /// Income for a profession, falling back to the mean of all incomes
    pub fn resolve(&self, profession: &str) -> f64 {
        self.get(profession).unwrap_or(self.mean_income)
    }

    pub fn mean_income(&self) -> f64 {
        self.mean_income
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable snapshot of the three datasets
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// request.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    listings: Vec<Listing>,
    incomes: IncomeTable,
    stops: Vec<TransitStop>,
}

impl DatasetStore {
    pub fn new(listings: Vec<Listing>, incomes: Vec<IncomeEntry>, stops: Vec<TransitStop>) -> Self {
        Self {
            listings,
            incomes: IncomeTable::new(incomes),
            stops,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn incomes(&self) -> &IncomeTable {
        &self.incomes
    }

    pub fn stops(&self) -> &[TransitStop] {
        &self.stops
    }
}
