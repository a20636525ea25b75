//! Processing unit model.
//!
//! Processing units are the heterogeneous workers tasks are dispatched onto.
//! Each unit is characterized only by its rate; units are read-only during a
//! simulation and are referenced by index from completion events.

use serde::{Deserialize, Serialize};

/// A processing unit with a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingUnit {
    /// Work units completed per unit of simulated time. Must be > 0.
    pub rate: f64,
}

impl ProcessingUnit {
    /// Creates a processing unit with the given rate.
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Builds one unit per rate, preserving order.
    pub fn from_rates(rates: &[f64]) -> Vec<Self> {
        rates.iter().copied().map(Self::new).collect()
    }

    /// Builds units sharing a nominal rate, each scaled by its multiplier.
    ///
    /// `scaled(1e10, &[1.0, 1.0, 2.0])` yields two nominal units and one
    /// twice as fast.
    pub fn scaled(nominal_rate: f64, multipliers: &[f64]) -> Vec<Self> {
        multipliers
            .iter()
            .map(|m| Self::new(nominal_rate * m))
            .collect()
    }

    /// Simulated time needed to complete `work` on this unit.
    #[inline]
    pub fn time_to_complete(&self, work: f64) -> f64 {
        work / self.rate
    }
}
