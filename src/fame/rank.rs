use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Deserialize;

use super::aggregator::{RankedAuthor, Statistics};

/// Primary sort field of the final listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    #[default]
    Lines,
    Commits,
    Files,
}

impl OrderBy {
    /// The configured field first, then the remaining two in
    /// `lines, commits, files` order.
    pub fn key(self, stats: &Statistics) -> [usize; 3] {
        match self {
            OrderBy::Lines => [stats.lines, stats.commits, stats.files],
            OrderBy::Commits => [stats.commits, stats.lines, stats.files],
            OrderBy::Files => [stats.files, stats.lines, stats.commits],
        }
    }
}

/// Larger keys first; equal keys fall back to the case-insensitive name,
/// then the exact name so that distinct authors never compare equal.
pub fn compare(order: OrderBy, a: &RankedAuthor, b: &RankedAuthor) -> Ordering {
    order
        .key(&b.stats)
        .cmp(&order.key(&a.stats))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn rank(mut authors: Vec<RankedAuthor>, order: OrderBy) -> Vec<RankedAuthor> {
    authors.sort_by(|a, b| compare(order, a, b));
    authors
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
