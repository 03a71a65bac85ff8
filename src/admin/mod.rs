//! Admin listing — client-side filter, pagination, and summary stats over
//! the full fetched record set.
//!
//! A plain linear scan; the record sets involved are small.

use crate::profile::{ActivityLevel, StoredProfile};

/// Fixed page size of the admin table.
pub const ITEMS_PER_PAGE: usize = 10;

/// In-memory view model over one fetch of the listing endpoint.
///
/// Pages are 1-based. Changing the filter text always resets to page 1.
#[derive(Debug, Clone)]
pub struct AdminListing {
    records: Vec<StoredProfile>,
    filtered: Vec<usize>,
    filter: String,
    page: usize,
}

impl AdminListing {
    pub fn new(records: Vec<StoredProfile>) -> Self {
        let filtered = (0..records.len()).collect();
        Self {
            records,
            filtered,
            filter: String::new(),
            page: 1,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of records matching the current filter.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(ITEMS_PER_PAGE)
    }

    /// Case-insensitive substring match over name and email; resets to
    /// page 1.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        let needle = text.to_lowercase();
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                r.profile.name.to_lowercase().contains(&needle)
                    || r.profile.email.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect();
        self.page = 1;
    }

    /// The rows of the current page, at most [`ITEMS_PER_PAGE`] of them.
    pub fn page_rows(&self) -> Vec<&StoredProfile> {
        self.filtered
            .iter()
            .skip((self.page - 1) * ITEMS_PER_PAGE)
            .take(ITEMS_PER_PAGE)
            .map(|&i| &self.records[i])
            .collect()
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages().max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

/// Headline numbers shown above the admin table.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_users: usize,
    /// Mean age, rounded to a whole number. 0 when there are no records.
    pub average_age: f64,
    /// Mean weight, rounded to one decimal. 0 when there are no records.
    pub average_weight: f64,
    /// Records per activity level; zero-count levels are dropped.
    pub activity_distribution: Vec<(ActivityLevel, usize)>,
}

impl Stats {
    pub fn compute(records: &[StoredProfile]) -> Self {
        let total_users = records.len();

        let (average_age, average_weight) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            let n = records.len() as f64;
            let age_sum: f64 = records.iter().map(|r| r.profile.age as f64).sum();
            let weight_sum: f64 = records.iter().map(|r| r.profile.weight).sum();
            (
                (age_sum / n).round(),
                (weight_sum / n * 10.0).round() / 10.0,
            )
        };

        let activity_distribution = ActivityLevel::ALL
            .into_iter()
            .map(|level| {
                (
                    level,
                    records
                        .iter()
                        .filter(|r| r.profile.activity_level == level)
                        .count(),
                )
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            total_users,
            average_age,
            average_weight,
            activity_distribution,
        }
    }
}
