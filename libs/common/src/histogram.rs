//! Fixed-binning 1D histograms and a name-keyed registry for QA output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A 1D histogram with uniform binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1D {
    /// Histogram name.
    pub name: String,
    /// Histogram title (ROOT-style `title;x;y`).
    pub title: String,
    /// Number of bins (excluding under/overflow).
    pub n_bins: usize,
    /// Lower edge of first bin.
    pub x_min: f64,
    /// Upper edge of last bin.
    pub x_max: f64,
    /// Bin contents (length = n_bins).
    pub bin_content: Vec<f64>,
    /// Underflow bin content.
    pub underflow: f64,
    /// Overflow bin content.
    pub overflow: f64,
    /// Total number of fills, including under/overflow.
    pub entries: u64,
}

impl Histogram1D {
    pub fn new(name: &str, title: &str, n_bins: usize, x_min: f64, x_max: f64) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            n_bins,
            x_min,
            x_max,
            bin_content: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        }
    }

    /// Index of the bin containing `x`, or `None` for under/overflow.
    ///
    /// Bins are half-open `[low, high)`, so `x == x_max` lands in overflow.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if self.n_bins == 0 || x.is_nan() || x < self.x_min || x >= self.x_max {
            return None;
        }
        let width = (self.x_max - self.x_min) / self.n_bins as f64;
        let idx = ((x - self.x_min) / width) as usize;
        Some(idx.min(self.n_bins - 1))
    }

    pub fn fill(&mut self, x: f64) {
        self.entries += 1;
        match self.find_bin(x) {
            Some(idx) => self.bin_content[idx] += 1.0,
            None if x >= self.x_max => self.overflow += 1.0,
            None => self.underflow += 1.0,
        }
    }

    /// Content of bin `idx` (0-based, in-range bins only).
    pub fn bin(&self, idx: usize) -> f64 {
        self.bin_content.get(idx).copied().unwrap_or(0.0)
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    fn same_binning(&self, other: &Histogram1D) -> bool {
        self.n_bins == other.n_bins && self.x_min == other.x_min && self.x_max == other.x_max
    }

    /// Add the contents of `other` into `self`.
    pub fn merge(&mut self, other: &Histogram1D) -> Result<()> {
        if !self.same_binning(other) {
            return Err(Error::HistogramMismatch {
                name: self.name.clone(),
                reason: format!(
                    "binning ({}, {}, {}) vs ({}, {}, {})",
                    self.n_bins, self.x_min, self.x_max, other.n_bins, other.x_min, other.x_max
                ),
            });
        }
        for (a, b) in self.bin_content.iter_mut().zip(&other.bin_content) {
            *a += b;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.entries += other.entries;
        Ok(())
    }
}

/// Name-keyed collection of histograms, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramRegistry {
    histograms: BTreeMap<String, Histogram1D>,
}

impl HistogramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty histogram under `name`, replacing any previous one.
    pub fn add(&mut self, name: &str, title: &str, n_bins: usize, x_min: f64, x_max: f64) {
        self.histograms
            .insert(name.into(), Histogram1D::new(name, title, n_bins, x_min, x_max));
    }

    /// Fill `name` at `x`. Returns `false` if no such histogram is registered.
    pub fn fill(&mut self, name: &str, x: f64) -> bool {
        match self.histograms.get_mut(name) {
            Some(h) => {
                h.fill(x);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Histogram1D> {
        self.histograms.get(name)
    }

    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Merge every histogram of `other` into `self`, adopting ones `self` lacks.
    pub fn merge(&mut self, other: &HistogramRegistry) -> Result<()> {
        for (name, hist) in &other.histograms {
            match self.histograms.get_mut(name) {
                Some(mine) => mine.merge(hist)?,
                None => {
                    self.histograms.insert(name.clone(), hist.clone());
                }
            }
        }
        Ok(())
    }
}
