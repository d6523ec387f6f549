use std::{fmt, result};

use crate::{rbt::MAX_TREE_DEPTH, util::ToJson, Result};

/// Leaf statistics gathered by [Index::validate][crate::rbt::Index].
///
/// Every leaf, a node without children, is sampled with its depth and the
/// number of black nodes on its path from root. Depth of the root node
/// is 1. All leaves of a valid tree carry the same black count.
#[derive(Clone)]
pub struct Depth {
    leaves: usize,
    total: usize,
    min: usize,
    max: usize,
    blacks: Option<usize>,
    counts: [u64; MAX_TREE_DEPTH + 1],
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            leaves: 0,
            total: 0,
            min: usize::MAX,
            max: 0,
            blacks: None,
            counts: [0; MAX_TREE_DEPTH + 1],
        }
    }
}

impl Depth {
    /// Record a leaf at `depth`, with `blacks` black nodes from root to
    /// leaf, both inclusive.
    pub fn sample(&mut self, depth: usize, blacks: usize) -> Result<()> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            err_at!(Fatal, msg: "leaf depth {} not in 1..={}", depth, MAX_TREE_DEPTH)?;
        }
        match self.blacks {
            Some(n) if n != blacks => {
                err_at!(Fatal, msg: "leaf at {} has {} blacks, others {}", depth, blacks, n)?
            }
            _ => self.blacks = Some(blacks),
        }

        self.leaves += 1;
        self.total += depth;
        self.min = usize::min(self.min, depth);
        self.max = usize::max(self.max, depth);
        self.counts[depth] += 1;
        Ok(())
    }

    /// Fail if the deepest leaf crosses `2 * log2(n_count + 1)`, the
    /// height limit of a red-black tree with `n_count` nodes.
    pub fn check_height(&self, n_count: usize) -> Result<()> {
        let limit = 2_f64 * ((n_count + 1) as f64).log2();
        if (self.max as f64) > limit {
            err_at!(Fatal, msg: "height {} exceeds {:.2} for {}", self.max, limit, n_count)?;
        }
        Ok(())
    }

    pub fn to_leaves(&self) -> usize {
        self.leaves
    }

    pub fn to_min(&self) -> usize {
        if self.leaves == 0 {
            0
        } else {
            self.min
        }
    }

    /// Height of the tree.
    pub fn to_max(&self) -> usize {
        self.max
    }

    pub fn to_mean(&self) -> usize {
        self.total.checked_div(self.leaves).unwrap_or(0)
    }

    /// Black-height of the tree, counting root and leaf. None if no leaf
    /// was sampled.
    pub fn to_blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return (depth, leaves) pairs, for every depth having a leaf.
    pub fn to_histogram(&self) -> Vec<(usize, u64)> {
        let iter = self.counts.iter().enumerate();
        iter.filter(|(_, n)| **n > 0).map(|(d, n)| (d, *n)).collect()
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let blacks = self.blacks.map_or("none".to_string(), |b| b.to_string());
        let hist: Vec<String> = self
            .to_histogram()
            .into_iter()
            .map(|(d, n)| format!("{}:{}", d, n))
            .collect();
        write!(
            f,
            "{{ leaves={}, min={}, mean={}, max={}, blacks={}, histogram=[{}] }}",
            self.leaves,
            self.to_min(),
            self.to_mean(),
            self.max,
            blacks,
            hist.join(" "),
        )
    }
}

impl ToJson for Depth {
    fn to_json(&self) -> String {
        let blacks = self.blacks.map_or("null".to_string(), |b| b.to_string());
        let hist: Vec<String> = self
            .to_histogram()
            .into_iter()
            .map(|(d, n)| format!(r#""{}": {}"#, d, n))
            .collect();
        format!(
            concat!(
                r#"{{ "leaves": {}, "min": {}, "mean": {}, "max": {}, "#,
                r#""blacks": {}, "histogram": {{ {} }} }}"#,
            ),
            self.leaves,
            self.to_min(),
            self.to_mean(),
            self.max,
            blacks,
            hist.join(", "),
        )
    }
}

#[cfg(test)]
#[path = "depth_test.rs"]
mod depth_test;
