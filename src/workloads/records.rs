//! JSON record sorting: per-record fan-out, index-tagged merge, stable sort by name

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::parallel::{ParallelExecutor, fan_in, place_indexed, stable_sort_by};

/// How records are handed to concurrent units before the merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Dispatch {
    /// One thread per record, results through a channel sized to the record count
    #[default]
    PerRecord,
    /// A fixed pool of workers pulls records from a bounded queue
    Pool,
}

/// One contact record; missing fields decode as empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub website: String,
}

fn by_name(a: &Person, b: &Person) -> std::cmp::Ordering {
    a.name.cmp(&b.name)
}

pub fn read(path: &Path) -> Result<Vec<Person>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn write(path: &Path, people: &[Person]) -> Result<()> {
    let json = serde_json::to_string_pretty(people)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn sequential(mut people: Vec<Person>) -> Vec<Person> {
    stable_sort_by(&mut people, by_name);
    people
}

/// Hand every record to a concurrent unit, restore input order by index, then sort
///
/// `workers` only sizes the [`Dispatch::Pool`] variant.
pub fn parallel(people: &[Person], dispatch: Dispatch, workers: usize) -> Result<Vec<Person>> {
    let partials = match dispatch {
        Dispatch::PerRecord => fan_in(people, Person::clone)?,
        Dispatch::Pool => ParallelExecutor::new(workers).execute_indexed(people, Person::clone)?,
    };
    let mut placed = place_indexed(people.len(), partials)?;
    stable_sort_by(&mut placed, by_name);
    Ok(placed)
}
