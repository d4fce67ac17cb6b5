//! Dense integer matrix multiplication, one unit per output cell

use anyhow::{Result, ensure};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::parallel::{Granularity, decompose};

/// Square row-major integer matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    data: Vec<i64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Matrix with entries drawn uniformly from `[0, 100)`
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            n,
            data: (0..n * n).map(|_| rng.gen_range(0..100)).collect(),
        }
    }

    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n = rows.len();
        ensure!(
            rows.iter().all(|row| row.len() == n),
            "matrix must be square ({n} rows)"
        );
        Ok(Self {
            n,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.data[i * self.n + j]
    }

    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.data.chunks(self.n.max(1)).map(<[i64]>::to_vec).collect()
    }

    /// Sum of all entries, a cheap digest for comparing large results
    pub fn checksum(&self) -> i64 {
        self.data.iter().sum()
    }
}

fn dot(a: &Matrix, b: &Matrix, i: usize, j: usize) -> i64 {
    (0..a.n).map(|k| a.get(i, k) * b.get(k, j)).sum()
}

pub fn multiply_sequential(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    ensure!(a.n == b.n, "matrix sizes differ: {} vs {}", a.n, b.n);

    let n = a.n;
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            c.data[i * n + j] = dot(a, b, i, j);
        }
    }
    Ok(c)
}

/// Parallel multiply on `pool`; each output cell is an independent unit writing its own slot
pub fn multiply_parallel(a: &Matrix, b: &Matrix, pool: &rayon::ThreadPool) -> Result<Matrix> {
    ensure!(a.n == b.n, "matrix sizes differ: {} vs {}", a.n, b.n);

    let n = a.n;
    let cells = decompose(n * n, Granularity::PerCell { cols: n })?;
    let mut c = Matrix::zeros(n);

    pool.install(|| {
        c.data
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(slot, cell)| {
                let (i, j) = cell.cell(n);
                *slot = dot(a, b, i, j);
            });
    });

    Ok(c)
}
