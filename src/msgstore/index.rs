//! # Display Indexes
//!
//! Stores identify records by stable string ids, which are unpleasant to type.
//! Screens number whatever rows they currently show, starting at 1, and the
//! user refers to rows by that number. An index is only meaningful against the
//! list it was assigned from: filtering or re-fetching renumbers the rows.

use std::fmt;
use std::str::FromStr;

/// A 1-based row number in the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    /// `None` for 0, which is never a valid row.
    pub fn new(n: usize) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Position in the underlying zero-based list.
    pub fn offset(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(DisplayIndex::new)
            .ok_or_else(|| format!("Invalid index format: {}", s))
    }
}

/// A row paired with its display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indexed<T> {
    pub index: DisplayIndex,
    pub item: T,
}

/// Numbers rows in order, starting at 1.
pub fn index_items<T, I>(items: I) -> Vec<Indexed<T>>
where
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .zip(1..)
        .map(|(item, n)| Indexed {
            index: DisplayIndex(n),
            item,
        })
        .collect()
}

/// Looks up the row a display index points at.
pub fn select<T>(items: &[T], index: DisplayIndex) -> Option<&T> {
    items.get(index.offset())
}
