//! Transfer Function Engine and Resonance Extractor
//!
//! Frequency-domain SH-wave amplification of a layered site: sweep
//! construction, the propagator-matrix engine, impedance amplification,
//! and peak extraction from the computed spectrum.

mod frequency;
mod impedance;
mod peaks;
mod transfer;

pub use frequency::{lin_spaced, log_spaced, validate_frequencies};
pub use impedance::impedance_amplification;
pub use peaks::{
    fundamental_resonance, peaks_from_spectrum, resonance_peaks, PeakSettings, PlateauTieBreak,
    ResonancePeak,
};
pub use transfer::{
    transfer_function, AttenuationMode, HalfspaceBoundary, NumericalInstability,
    ResponseSettings, TransferFunction,
};
