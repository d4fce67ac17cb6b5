use anyhow::{Result, bail};
use std::ops::Range;

/// A disjoint slice of a workload's input domain, assigned to one concurrent unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Position of this partition in the scheme (used to merge results deterministically)
    pub index: usize,
    /// First input index covered (inclusive)
    pub start: usize,
    /// One past the last input index covered
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Row/column of a per-cell partition in a grid with `cols` columns
    pub fn cell(&self, cols: usize) -> (usize, usize) {
        (self.start / cols, self.start % cols)
    }
}

/// How a workload's input domain is split into partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One partition per input element (factorial set, record list, endpoint list)
    PerTask,
    /// A fixed number of contiguous blocks; the last block absorbs the remainder
    Block { workers: usize },
    /// One partition per row of a `width`-wide grid; `total` counts rows
    PerRow { width: usize },
    /// One partition per output cell of a grid with `cols` columns; `total` counts cells
    PerCell { cols: usize },
}

/// Split `total` units of work according to `granularity`
///
/// Partitions come back ordered by `index` and together cover the domain exactly once.
/// For `PerRow` the ranges are expressed in element (pixel) indices, so `total` rows of
/// `width` elements cover `[0, total * width)`.
pub fn decompose(total: usize, granularity: Granularity) -> Result<Vec<Partition>> {
    let partitions = match granularity {
        Granularity::PerTask => (0..total)
            .map(|index| Partition {
                index,
                start: index,
                end: index + 1,
            })
            .collect(),
        Granularity::Block { workers } => block_ranges(total, workers)?
            .into_iter()
            .enumerate()
            .map(|(index, range)| Partition {
                index,
                start: range.start,
                end: range.end,
            })
            .collect(),
        Granularity::PerRow { width } => (0..total)
            .map(|row| Partition {
                index: row,
                start: row * width,
                end: (row + 1) * width,
            })
            .collect(),
        Granularity::PerCell { cols } => {
            if cols == 0 && total > 0 {
                bail!("per-cell decomposition needs at least one column");
            }
            (0..total)
                .map(|index| Partition {
                    index,
                    start: index,
                    end: index + 1,
                })
                .collect()
        }
    };

    tracing::trace!(?granularity, total, "decomposed workload");
    Ok(partitions)
}

/// Contiguous block ranges: `size = total / workers`, last block ends at `total`
///
/// When `total < workers` the leading blocks are empty and the last one takes everything.
pub fn block_ranges(total: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    if workers == 0 {
        bail!("block decomposition needs at least one worker");
    }

    let size = total / workers;
    Ok((0..workers)
        .map(|w| {
            let start = w * size;
            let end = if w == workers - 1 { total } else { (w + 1) * size };
            start..end
        })
        .collect())
}

/// Check that `partitions` are non-overlapping and cover `[0, total)` exactly
pub fn verify_coverage(total: usize, partitions: &[Partition]) -> bool {
    let mut seen = vec![false; total];
    for partition in partitions {
        if partition.end > total || partition.start > partition.end {
            return false;
        }
        for i in partition.range() {
            if seen[i] {
                return false;
            }
            seen[i] = true;
        }
    }
    seen.into_iter().all(|covered| covered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_last_absorbs_remainder() {
        let ranges = block_ranges(10, 3).unwrap();
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_block_coverage_across_sizes() {
        for total in 1..64 {
            for workers in 1..=total {
                let parts = decompose(total, Granularity::Block { workers }).unwrap();
                assert_eq!(parts.len(), workers);
                assert!(verify_coverage(total, &parts), "total={total} workers={workers}");
            }
        }
    }

    #[test]
    fn test_block_fewer_units_than_workers() {
        let ranges = block_ranges(3, 8).unwrap();
        assert_eq!(ranges.len(), 8);
        assert!(ranges[..7].iter().all(|r| r.is_empty()));
        assert_eq!(ranges[7], 0..3);
    }

    #[test]
    fn test_block_zero_workers_is_error() {
        assert!(block_ranges(10, 0).is_err());
    }

    #[test]
    fn test_per_task_and_per_cell() {
        let tasks = decompose(5, Granularity::PerTask).unwrap();
        assert_eq!(tasks.len(), 5);
        assert!(tasks.iter().all(|p| p.len() == 1));
        assert!(verify_coverage(5, &tasks));

        let cells = decompose(6, Granularity::PerCell { cols: 3 }).unwrap();
        assert_eq!(cells[4].cell(3), (1, 1));
        assert_eq!(cells[5].cell(3), (1, 2));
        assert!(verify_coverage(6, &cells));
    }

    #[test]
    fn test_per_row_ranges() {
        let rows = decompose(4, Granularity::PerRow { width: 5 }).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].range(), 10..15);
        assert!(verify_coverage(20, &rows));
    }

    fn partition(index: usize, start: usize, end: usize) -> Partition {
        Partition { index, start, end }
    }

    #[test]
    fn test_verify_coverage_detects_overlap_and_gap() {
        let overlap = [partition(0, 0, 3), partition(1, 2, 4)];
        assert!(!verify_coverage(4, &overlap));

        let gap = [partition(0, 0, 2), partition(1, 3, 4)];
        assert!(!verify_coverage(4, &gap));

        let exact = [partition(0, 0, 2), partition(1, 2, 4)];
        assert!(verify_coverage(4, &exact));
    }
}
