//! Arbitrary-precision factorials, one unit per input

use anyhow::Result;
use num_bigint::BigUint;

use crate::parallel::{fan_in, place_indexed};

pub fn factorial(n: u64) -> BigUint {
    (2..=n).fold(BigUint::from(1u32), |acc, i| acc * i)
}

pub fn sequential(inputs: &[u64]) -> Vec<BigUint> {
    inputs.iter().map(|&n| factorial(n)).collect()
}

/// One thread per input; results come back in input order whatever order they finish in
pub fn parallel(inputs: &[u64]) -> Result<Vec<BigUint>> {
    let partials = fan_in(inputs, |&n| factorial(n))?;
    place_indexed(inputs.len(), partials)
}
