use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::{Policy, SchedulerError};

const DEFAULT_QUANTUM: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(quantum) => quantum,
    None => panic!("default quantum must be non-zero"),
};

const DEFAULT_AGING: AgingFactor = AgingFactor { units: 5_000 };

/// Rate at which a waiting process gains effective priority, per tick.
///
/// Held in fixed point, in units of `1 / AgingFactor::SCALE`, so the bonus
/// is an exact integer floor of `alpha * elapsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "f64")]
pub struct AgingFactor {
    units: u64,
}

impl AgingFactor {
    /// Resolution of the factor: ten-thousandths.
    pub const SCALE: u64 = 10_000;

    /// No aging: effective priority equals base priority.
    pub const NONE: AgingFactor = AgingFactor { units: 0 };

    /// Rounds `alpha` to the nearest ten-thousandth.
    pub fn new(alpha: f64) -> Result<AgingFactor, SchedulerError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(SchedulerError::InvalidAgingFactor(alpha));
        }
        Ok(AgingFactor {
            units: (alpha * Self::SCALE as f64).round() as u64,
        })
    }

    pub fn get(self) -> f64 {
        self.units as f64 / Self::SCALE as f64
    }

    /// `floor(alpha * elapsed)`, saturating at `i64::MAX`.
    pub fn bonus(self, elapsed: usize) -> i64 {
        let scaled = u128::from(self.units) * elapsed as u128 / u128::from(Self::SCALE);
        i64::try_from(scaled).unwrap_or(i64::MAX)
    }
}

impl From<AgingFactor> for f64 {
    fn from(aging: AgingFactor) -> f64 {
        aging.get()
    }
}

impl fmt::Display for AgingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.get())
    }
}

/// Parameters for a complete simulation of all three disciplines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Time quantum for round robin.
    pub quantum: NonZeroUsize,
    /// Aging factor for preemptive priority.
    pub aging: AgingFactor,
}

impl SimulationConfig {
    pub fn new(quantum: usize, aging: f64) -> Result<SimulationConfig, SchedulerError> {
        Ok(SimulationConfig {
            quantum: NonZeroUsize::new(quantum).ok_or(SchedulerError::InvalidQuantum)?,
            aging: AgingFactor::new(aging)?,
        })
    }

    /// The disciplines to run, in the order they are reported.
    pub fn policies(&self) -> [Policy; 3] {
        [
            Policy::Fcfs,
            Policy::RoundRobin {
                quantum: self.quantum,
            },
            Policy::PriorityAging { aging: self.aging },
        ]
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            quantum: DEFAULT_QUANTUM,
            aging: DEFAULT_AGING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantum_is_rejected() {
        assert_eq!(
            SimulationConfig::new(0, 1.0),
            Err(SchedulerError::InvalidQuantum)
        );
    }

    #[test]
    fn test_aging_factor_must_be_finite_and_non_negative() {
        assert!(AgingFactor::new(-0.25).is_err());
        assert!(AgingFactor::new(f64::NAN).is_err());
        assert!(AgingFactor::new(f64::INFINITY).is_err());
        assert_eq!(AgingFactor::new(1.5).map(AgingFactor::get), Ok(1.5));
    }

    #[test]
    fn test_bonus_is_exact_at_integer_boundaries() {
        // 0.29 * 100 lands just below 29 in binary floating point
        assert_eq!(AgingFactor::new(0.29).unwrap().bonus(100), 29);
        assert_eq!(AgingFactor::new(0.7).unwrap().bonus(10), 7);
        assert_eq!(AgingFactor::new(0.1).unwrap().bonus(30), 3);
        assert_eq!(AgingFactor::new(0.29).unwrap().bonus(99), 28);
        assert_eq!(AgingFactor::NONE.bonus(usize::MAX), 0);
    }

    #[test]
    fn test_bonus_saturates() {
        let aging = AgingFactor::new(1e12).unwrap();
        assert_eq!(aging.bonus(usize::MAX), i64::MAX);
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.quantum.get(), 2);
        assert_eq!(config.aging.get(), 0.5);
    }

    #[test]
    fn test_policy_headers() {
        let config = SimulationConfig::new(3, 0.25).unwrap();
        let names: Vec<String> = config.policies().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "FCFS",
                "Round Robin (Time Quantum = 3)",
                "Preemptive Priority with Aging (alpha = 0.25)",
            ]
        );
    }
}
