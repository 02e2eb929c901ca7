//! Resonance Extractor
//!
//! Scans an amplitude spectrum for local maxima above a significance
//! threshold. The threshold is a configurable multiple of the median
//! amplitude, which rejects the small numerical ripple a propagator sweep
//! produces without suppressing genuine higher modes. On a plateau the
//! lowest-frequency sample is the peak unless configured otherwise.

use crate::response::TransferFunction;
use serde::{Deserialize, Serialize};

/// Which sample of an amplitude plateau counts as the peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateauTieBreak {
    #[default]
    LowerFrequency,
    HigherFrequency,
}

/// Peak-picking policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakSettings {
    /// A sample qualifies only if it exceeds this multiple of the median
    /// amplitude
    pub significance: f64,
    /// Plateau resolution rule
    pub tie_break: PlateauTieBreak,
}

impl Default for PeakSettings {
    fn default() -> Self {
        Self {
            significance: 1.1,
            tie_break: PlateauTieBreak::default(),
        }
    }
}

/// A local maximum of the amplification spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonancePeak {
    /// Frequency of the maximum in Hz
    pub frequency: f64,
    /// Amplitude of the transfer function at that frequency
    pub amplitude: f64,
}

/// Extract resonance peaks from a computed transfer function, ascending
/// by frequency. An empty result is valid: a profile without impedance
/// contrast has nothing to resonate.
pub fn resonance_peaks(
    transfer_function: &TransferFunction,
    settings: &PeakSettings,
) -> Vec<ResonancePeak> {
    peaks_from_spectrum(
        transfer_function.frequencies(),
        &transfer_function.amplitudes(),
        settings,
    )
}

/// The first (lowest-frequency) qualifying peak, when one exists.
pub fn fundamental_resonance(
    transfer_function: &TransferFunction,
    settings: &PeakSettings,
) -> Option<ResonancePeak> {
    resonance_peaks(transfer_function, settings).into_iter().next()
}

/// Peak extraction over a raw spectrum, for callers that smooth or
/// combine amplitude sequences before picking.
///
/// `frequencies` and `amplitudes` must have equal length; an index is a
/// peak if it rises above its left neighbor, falls to its right, and
/// exceeds the significance threshold. Exactly one of the two
/// comparisons is strict, which resolves plateau ties to the configured
/// side (lower frequency by default). End samples have only one neighbor
/// and never qualify.
pub fn peaks_from_spectrum(
    frequencies: &[f64],
    amplitudes: &[f64],
    settings: &PeakSettings,
) -> Vec<ResonancePeak> {
    debug_assert_eq!(frequencies.len(), amplitudes.len());
    if amplitudes.len() < 3 {
        return Vec::new();
    }

    let threshold = settings.significance * median(amplitudes);
    let mut peaks = Vec::new();
    for i in 1..amplitudes.len() - 1 {
        let is_peak = match settings.tie_break {
            PlateauTieBreak::LowerFrequency => {
                amplitudes[i] > amplitudes[i - 1] && amplitudes[i] >= amplitudes[i + 1]
            }
            PlateauTieBreak::HigherFrequency => {
                amplitudes[i] >= amplitudes[i - 1] && amplitudes[i] > amplitudes[i + 1]
            }
        };
        if is_peak && amplitudes[i] > threshold {
            peaks.push(ResonancePeak {
                frequency: frequencies[i],
                amplitude: amplitudes[i],
            });
        }
    }
    peaks
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HalfSpace, Layer, SiteModel};
    use crate::response::{lin_spaced, transfer_function, ResponseSettings};
    use approx::assert_abs_diff_eq;

    fn settings() -> PeakSettings {
        PeakSettings::default()
    }

    #[test]
    fn test_finds_isolated_maxima_in_ascending_order() {
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let amps = [1.0, 4.0, 1.0, 1.0, 3.0, 1.0, 1.0];
        let peaks = peaks_from_spectrum(&freqs, &amps, &settings());
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].frequency, 2.0);
        assert_eq!(peaks[0].amplitude, 4.0);
        assert_eq!(peaks[1].frequency, 5.0);
    }

    #[test]
    fn test_plateau_resolves_to_lower_frequency_by_default() {
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let amps = [1.0, 1.0, 5.0, 5.0, 5.0, 1.0, 1.0];
        let peaks = peaks_from_spectrum(&freqs, &amps, &settings());
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].frequency, 3.0);
    }

    #[test]
    fn test_plateau_tie_break_is_configurable() {
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let amps = [1.0, 1.0, 5.0, 5.0, 5.0, 1.0, 1.0];
        let to_higher = PeakSettings {
            tie_break: PlateauTieBreak::HigherFrequency,
            ..Default::default()
        };
        let peaks = peaks_from_spectrum(&freqs, &amps, &to_higher);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].frequency, 5.0);
    }

    #[test]
    fn test_monotonic_spectrum_has_no_peaks() {
        let freqs = [1.0, 2.0, 3.0, 4.0];
        let rising = [1.0, 2.0, 3.0, 4.0];
        let falling = [4.0, 3.0, 2.0, 1.0];
        assert!(peaks_from_spectrum(&freqs, &rising, &settings()).is_empty());
        assert!(peaks_from_spectrum(&freqs, &falling, &settings()).is_empty());
    }

    #[test]
    fn test_end_samples_never_qualify() {
        let freqs = [1.0, 2.0, 3.0];
        let amps = [9.0, 1.0, 9.0];
        assert!(peaks_from_spectrum(&freqs, &amps, &settings()).is_empty());
    }

    #[test]
    fn test_threshold_rejects_ripple() {
        // Median 1.0: the 1.05 bump stays below 1.1 x median
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let amps = [1.0, 1.05, 1.0, 4.0, 1.0];
        let peaks = peaks_from_spectrum(&freqs, &amps, &settings());
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].frequency, 4.0);

        // A permissive multiplier keeps the ripple
        let permissive = PeakSettings {
            significance: 0.5,
            ..Default::default()
        };
        assert_eq!(peaks_from_spectrum(&freqs, &amps, &permissive).len(), 2);
    }

    #[test]
    fn test_fundamental_from_transfer_function() {
        let model = SiteModel::builder()
            .layer(Layer::new(10.0, 200.0, 1900.0, 20.0))
            .half_space(HalfSpace::new(800.0, 2200.0, 100.0))
            .build()
            .unwrap();
        let response = ResponseSettings::default();
        let tf = transfer_function(&model, &lin_spaced(0.5, 20.0, 391), &response).unwrap();

        let peaks = resonance_peaks(&tf, &settings());
        assert!(!peaks.is_empty());
        let fundamental = fundamental_resonance(&tf, &settings()).unwrap();
        assert_eq!(fundamental, peaks[0]);
        // Quarter-wavelength resonance of the 10 m / 200 m/s layer
        assert_abs_diff_eq!(fundamental.frequency, 5.0, epsilon = 0.05);
        assert!(fundamental.amplitude > 1.0);
    }
}
