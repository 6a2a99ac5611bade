use std::cmp::Ordering;

use crate::model::Coin;

/// Hard cap on rendered rows. There is no paging past this slice.
pub const DISPLAY_LIMIT: usize = 25;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Rank,
    Name,
    Price,
    Change24h,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Rank,
        SortField::Name,
        SortField::Price,
        SortField::Change24h,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Rank => "#",
            SortField::Name => "Name",
            SortField::Price => "Price",
            SortField::Change24h => "24h %",
        }
    }

    fn compare(self, a: &Coin, b: &Coin) -> Ordering {
        match self {
            SortField::Rank => a.cmc_rank.cmp(&b.cmc_rank),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Price => cmp_f64(a.price(), b.price()),
            SortField::Change24h => cmp_f64(a.change_24h(), b.change_24h()),
        }
    }
}

/// Active sort column and direction. Exactly one of each at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

impl SortSpec {
    pub fn new() -> Self {
        Self {
            field: SortField::Rank,
            ascending: true,
        }
    }

    /// Selecting the active field flips direction; selecting another field
    /// switches to it and resets to ascending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field;
            self.ascending = true;
        }
    }

    pub fn direction_icon(self) -> &'static str {
        if self.ascending {
            "↑"
        } else {
            "↓"
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new()
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Pure view derivation: name filter, stable sort, 25-row slice.
///
/// `sort_by` is a stable sort, so rows with equal keys keep their relative
/// order from the input list; reversing the comparator for descending order
/// leaves that property intact.
pub fn derive_view<'a>(coins: &'a [Coin], search: &str, sort: SortSpec) -> Vec<&'a Coin> {
    let mut rows: Vec<&Coin> = if search.is_empty() {
        coins.iter().collect()
    } else {
        let needle = search.to_lowercase();
        coins
            .iter()
            .filter(|coin| coin.name.to_lowercase().contains(&needle))
            .collect()
    };

    rows.sort_by(|a, b| {
        let ord = sort.field.compare(a, b);
        if sort.ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    rows.truncate(DISPLAY_LIMIT);
    rows
}
