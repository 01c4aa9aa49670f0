// Timebase and sensitivity lookup tables

use crate::error::{PdsError, Result};

/// Seconds per division, indexed by the timebase byte of a channel record.
pub const TIMEBASE: [f64; 32] = [
    0.000005, 0.00001, 0.000025, 0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01,
    0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0,
    2500.0, 5000.0, 10000.0, 25000.0, 50000.0, 100000.0,
];

/// Volts per division, indexed by the sensitivity byte of a channel record.
pub const SENSITIVITY: [f64; 21] = [
    0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0,
    500.0, 1000.0, 2000.0, 5000.0, 10000.0,
];

pub fn timebase(index: u32) -> Result<f64> {
    TIMEBASE
        .get(index as usize)
        .copied()
        .ok_or(PdsError::TimebaseIndex(index))
}

pub fn sensitivity(index: u32) -> Result<f64> {
    SENSITIVITY
        .get(index as usize)
        .copied()
        .ok_or(PdsError::SensitivityIndex(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_increasing() {
        assert!(TIMEBASE.windows(2).all(|w| w[0] < w[1]));
        assert!(SENSITIVITY.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(timebase(0).unwrap(), 0.000005);
        assert_eq!(timebase(31).unwrap(), 100000.0);
        assert_eq!(sensitivity(0).unwrap(), 0.002);
        assert_eq!(sensitivity(20).unwrap(), 10000.0);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(timebase(32), Err(PdsError::TimebaseIndex(32))));
        assert!(matches!(sensitivity(21), Err(PdsError::SensitivityIndex(21))));
        assert!(matches!(timebase(u32::MAX), Err(PdsError::TimebaseIndex(u32::MAX))));
    }
}
