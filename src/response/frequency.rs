//! Frequency sweep construction and validation
//!
//! The engine evaluates caller-supplied frequency arrays; these helpers
//! build well-formed sweeps and enforce the array invariant (non-empty,
//! finite, strictly positive, strictly increasing).

use crate::error::{Result, SiteError};

/// Validate a caller-supplied frequency array.
pub fn validate_frequencies(frequencies: &[f64]) -> Result<()> {
    if frequencies.is_empty() {
        return Err(SiteError::InvalidFrequencies {
            reason: "array is empty".to_string(),
        });
    }
    let mut previous = 0.0;
    for (index, &f) in frequencies.iter().enumerate() {
        if !f.is_finite() || f <= 0.0 {
            return Err(SiteError::InvalidFrequencies {
                reason: format!("sample {index} is {f}, expected a positive finite value"),
            });
        }
        if f <= previous {
            return Err(SiteError::InvalidFrequencies {
                reason: format!("sample {index} ({f} Hz) does not increase strictly"),
            });
        }
        previous = f;
    }
    Ok(())
}

/// `count` linearly spaced frequencies covering `[min, max]` inclusive.
pub fn lin_spaced(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}

/// `count` logarithmically spaced frequencies covering `[min, max]`
/// inclusive. The usual choice for transfer-function sweeps.
pub fn log_spaced(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![min];
    }
    let log_min = min.ln();
    let step = (max.ln() - log_min) / (count - 1) as f64;
    (0..count)
        .map(|i| (log_min + step * i as f64).exp())
        .collect()
}
