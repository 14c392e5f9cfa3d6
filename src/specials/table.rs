use super::types::{Day, Special};
use std::collections::{BTreeMap, BTreeSet};

/// All loaded specials, kept sorted by day then bar name
#[derive(Debug, Clone, Default)]
pub struct SpecialsTable {
    specials: Vec<Special>,
}

/// Counts shown on the summary view
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_bars: usize,
    pub total_specials: usize,
    pub days_covered: usize,
    pub avg_specials_per_bar: f64,
    /// Monday-first; days without specials are included with a zero count
    pub per_day: Vec<(Day, usize)>,
    /// Alphabetical by bar name
    pub per_bar: Vec<(String, usize)>,
}

/// One pivot row: a bar and its first deal on each day (Monday first)
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub bar: String,
    pub deals: [Option<String>; 7],
}

impl SpecialsTable {
    pub fn new(mut specials: Vec<Special>) -> Self {
        // Stable sort keeps file order for duplicate (day, bar) pairs
        specials.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.bar.cmp(&b.bar)));
        Self { specials }
    }

    pub fn specials(&self) -> &[Special] {
        &self.specials
    }

    pub fn len(&self) -> usize {
        self.specials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specials.is_empty()
    }

    /// Specials matching the optional day and bar filters
    pub fn filter(&self, day: Option<Day>, bar: Option<&str>) -> Vec<&Special> {
        self.specials
            .iter()
            .filter(|s| day.map_or(true, |d| s.day == d))
            .filter(|s| bar.map_or(true, |b| s.bar == b))
            .collect()
    }

    /// Owned copies of one day's specials, ready for route planning
    pub fn for_day(&self, day: Day) -> Vec<Special> {
        self.specials.iter().filter(|s| s.day == day).cloned().collect()
    }

    /// Distinct bar names, sorted
    pub fn bars(&self) -> Vec<String> {
        self.specials
            .iter()
            .map(|s| s.bar.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Days with at least one special, Monday first
    pub fn days(&self) -> Vec<Day> {
        self.specials
            .iter()
            .map(|s| s.day)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> SummaryStats {
        let mut per_bar: BTreeMap<String, usize> = BTreeMap::new();
        let mut per_day = [0usize; 7];
        for special in &self.specials {
            *per_bar.entry(special.bar.clone()).or_default() += 1;
            per_day[special.day.index()] += 1;
        }

        let total_bars = per_bar.len();
        let total_specials = self.specials.len();
        let avg_specials_per_bar = if total_bars > 0 {
            total_specials as f64 / total_bars as f64
        } else {
            0.0
        };

        SummaryStats {
            total_bars,
            total_specials,
            days_covered: self.days().len(),
            avg_specials_per_bar,
            per_day: Day::ALL.iter().map(|d| (*d, per_day[d.index()])).collect(),
            per_bar: per_bar.into_iter().collect(),
        }
    }

    /// Bar x day grid of deals. Where a bar has several specials on one day
    /// the first one wins.
    pub fn pivot(&self) -> Vec<PivotRow> {
        let mut rows: BTreeMap<&str, [Option<String>; 7]> = BTreeMap::new();
        for special in &self.specials {
            let deals = rows.entry(special.bar.as_str()).or_default();
            let slot = &mut deals[special.day.index()];
            if slot.is_none() {
                *slot = Some(special.deal.clone());
            }
        }

        rows.into_iter()
            .map(|(bar, deals)| PivotRow {
                bar: bar.to_string(),
                deals,
            })
            .collect()
    }
}
