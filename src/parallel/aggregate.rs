use anyhow::{Result, bail};
use std::cmp::Ordering;
use std::sync::Mutex;

/// Place index-tagged partial results into a pre-sized ordered sequence
///
/// Completion order does not matter; the output order is the input order. Every index in
/// `[0, total)` must be delivered exactly once.
pub fn place_indexed<R, I>(total: usize, partials: I) -> Result<Vec<R>>
where
    I: IntoIterator<Item = (usize, R)>,
{
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();

    for (index, value) in partials {
        match slots.get_mut(index) {
            None => bail!("partial result index {index} outside of 0..{total}"),
            Some(Some(_)) => bail!("partial result index {index} delivered twice"),
            Some(slot) => *slot = Some(value),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            Some(value) => Ok(value),
            None => bail!("partial result index {index} was never delivered"),
        })
        .collect()
}

/// Shared scalar accumulator guarded by a mutex
///
/// Each unit accumulates privately and calls [`LockedSum::add`] once; the lock is held
/// for that single addition only.
#[derive(Debug, Default)]
pub struct LockedSum {
    total: Mutex<f64>,
}

impl LockedSum {
    pub fn new(initial: f64) -> Self {
        Self {
            total: Mutex::new(initial),
        }
    }

    pub fn add(&self, local: f64) {
        // A poisoned lock still holds a valid f64
        let mut total = self.total.lock().unwrap_or_else(|e| e.into_inner());
        *total += local;
    }

    /// Read the final value once every unit has joined
    pub fn into_total(self) -> f64 {
        self.total.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// Lock-free reduction: each unit wrote its own slot, sum them in slot order
pub fn sum_slots(slots: &[f64]) -> f64 {
    slots.iter().sum()
}

/// Stable sort; records with equal keys keep their relative input order
pub fn stable_sort_by<T, F>(items: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(compare);
}

/// Counters for failure-tagged results, updated only by the draining side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Sum of the counts carried by successful results
    pub successes: usize,
    /// Number of failed results
    pub errors: usize,
}

impl Tally {
    pub fn record_success(&mut self, count: usize) {
        self.successes += count;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }
}
