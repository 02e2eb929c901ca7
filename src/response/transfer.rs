//! SH-wave Transfer Function Engine
//!
//! Propagates horizontally polarized shear motion through the layered
//! column with a 2x2 displacement-stress propagator per layer
//! (Thomson-Haskell style). Starting from the free surface (unit
//! displacement, zero traction) the recursion accumulates the state down
//! to the half-space top; the transfer function at each frequency is the
//! reciprocal of the reference motion extracted there. Frequencies are
//! independent of one another, so a sweep is a plain map over the array.
//!
//! Attenuation enters through the complex shear velocity V*(1 + i/(2*Qs));
//! the elastic case is the same recursion with real velocities. The
//! incidence angle is defined in the half-space and Snell's constant
//! horizontal slowness fixes the propagation angle of every layer.

use crate::error::{Result, SiteError};
use crate::model::SiteModel;
use crate::response::frequency::validate_frequencies;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

/// Denominator modulus below which a sample is clamped and flagged
/// instead of dividing toward infinity.
const DENOMINATOR_FLOOR: f64 = 1e-12;

/// Elastic/anelastic selection for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttenuationMode {
    /// Anelastic when any layer carries a finite Qs, elastic otherwise
    #[default]
    Auto,
    /// Ignore Qs everywhere (real wavenumbers)
    Elastic,
    /// Complex velocities from Qs (infinite/absent Qs stays elastic)
    Anelastic,
}

/// Reference motion at the base of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfspaceBoundary {
    /// No up-going energy in the half-space beyond the incident wave;
    /// the reference is twice the incident amplitude, i.e. the free
    /// surface motion of the bare half-space. A profile without
    /// impedance contrast amplifies by exactly 1.
    #[default]
    Radiation,
    /// The reference is the total motion at the half-space top, as an
    /// instrument at the base of the column records it. Elastic layer
    /// resonances drive this reference through zero, which the
    /// instability clamp catches.
    Outcrop,
}

/// Caller-supplied configuration of a transfer-function evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseSettings {
    /// Angle of incidence in degrees from the vertical, defined in the
    /// half-space
    pub incidence_deg: f64,
    pub mode: AttenuationMode,
    pub boundary: HalfspaceBoundary,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            incidence_deg: 0.0,
            mode: AttenuationMode::Auto,
            boundary: HalfspaceBoundary::Radiation,
        }
    }
}

/// A frequency sample whose denominator came out near-singular; its value
/// was clamped and is of reduced quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericalInstability {
    pub index: usize,
    pub frequency: f64,
}

/// Complex amplification spectrum for one site model, frequency array and
/// incidence angle. Immutable once computed; owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    frequencies: Vec<f64>,
    values: Vec<Complex64>,
    instabilities: Vec<NumericalInstability>,
    boundary: HalfspaceBoundary,
    anelastic: bool,
}

impl TransferFunction {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Complex amplification values, one per frequency.
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Amplitude spectrum (complex modulus per sample).
    pub fn amplitudes(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }

    /// Near-singular samples, in ascending frequency order.
    pub fn instabilities(&self) -> &[NumericalInstability] {
        &self.instabilities
    }

    pub fn is_flagged(&self, index: usize) -> bool {
        self.instabilities.iter().any(|i| i.index == index)
    }

    /// Whether attenuation was folded into the wavenumbers.
    pub fn is_anelastic(&self) -> bool {
        self.anelastic
    }

    pub fn boundary(&self) -> HalfspaceBoundary {
        self.boundary
    }
}

/// Evaluate the SH transfer function of `model` over `frequencies` (Hz).
pub fn transfer_function(
    model: &SiteModel,
    frequencies: &[f64],
    settings: &ResponseSettings,
) -> Result<TransferFunction> {
    validate_frequencies(frequencies)?;
    let half_space = model
        .half_space()
        .ok_or(SiteError::MissingHalfSpace {
            operation: "transfer function",
        })?;
    if !settings.incidence_deg.is_finite()
        || !(0.0..90.0).contains(&settings.incidence_deg)
    {
        return Err(SiteError::InvalidIncidence {
            angle: settings.incidence_deg,
        });
    }

    let anelastic = match settings.mode {
        AttenuationMode::Auto => model.has_attenuation(),
        AttenuationMode::Elastic => false,
        AttenuationMode::Anelastic => true,
    };

    // Frequency-independent layer quantities: complex velocity, shear
    // modulus, thickness.
    let layers: Vec<(Complex64, Complex64, f64)> = model
        .layers()
        .iter()
        .map(|l| {
            let v = complex_velocity(l.vs, l.finite_qs(), anelastic);
            (v, l.density * v * v, l.thickness)
        })
        .collect();
    let v_half = complex_velocity(half_space.vs, half_space.finite_qs(), anelastic);
    let mu_half = half_space.density * v_half * v_half;

    // Snell: horizontal slowness set by the incidence angle in the
    // half-space, constant through the stack.
    let slowness_h = settings.incidence_deg.to_radians().sin() / v_half;

    let mut values = Vec::with_capacity(frequencies.len());
    let mut instabilities = Vec::new();
    for (index, &frequency) in frequencies.iter().enumerate() {
        let omega = 2.0 * PI * frequency;

        let mut u = Complex64::new(1.0, 0.0);
        let mut tau = Complex64::new(0.0, 0.0);
        for &(v, mu, thickness) in &layers {
            let vertical = vertical_slowness(slowness_h, v);
            let impedance = mu * vertical;
            let phase = omega * vertical * thickness;
            let (cos, sin) = (phase.cos(), phase.sin());
            let u_bottom = u * cos + tau * sin / (omega * impedance);
            let tau_bottom = -u * omega * impedance * sin + tau * cos;
            u = u_bottom;
            tau = tau_bottom;
        }

        let impedance_h = mu_half * vertical_slowness(slowness_h, v_half);
        let reference = match settings.boundary {
            // Twice the incident amplitude at the half-space top
            HalfspaceBoundary::Radiation => {
                u + tau / (Complex64::i() * omega * impedance_h)
            }
            HalfspaceBoundary::Outcrop => u,
        };

        let (reference, clamped) = clamp_reference(reference);
        let value = reference.finv();
        let value = if value.re.is_finite() && value.im.is_finite() {
            value
        } else {
            Complex64::new(0.0, 0.0)
        };
        if clamped || !(value.re.is_finite() && value.im.is_finite()) {
            warn!(frequency, index, "near-singular transfer function sample");
            instabilities.push(NumericalInstability { index, frequency });
        }
        values.push(value);
    }

    Ok(TransferFunction {
        frequencies: frequencies.to_vec(),
        values,
        instabilities,
        boundary: settings.boundary,
        anelastic,
    })
}

fn complex_velocity(vs: f64, qs: Option<f64>, anelastic: bool) -> Complex64 {
    match qs {
        Some(q) if anelastic => Complex64::new(vs, vs / (2.0 * q)),
        _ => Complex64::new(vs, 0.0),
    }
}

/// cos(theta)/V for the layer angle implied by the horizontal slowness.
fn vertical_slowness(slowness_h: Complex64, v: Complex64) -> Complex64 {
    let sin_theta = slowness_h * v;
    (Complex64::new(1.0, 0.0) - sin_theta * sin_theta).sqrt() / v
}

fn clamp_reference(reference: Complex64) -> (Complex64, bool) {
    let norm = reference.norm();
    if norm >= DENOMINATOR_FLOOR {
        return (reference, false);
    }
    if norm == 0.0 {
        return (Complex64::new(DENOMINATOR_FLOOR, 0.0), true);
    }
    (reference * (DENOMINATOR_FLOOR / norm), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HalfSpace, Layer, SiteModel};
    use crate::response::frequency::lin_spaced;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn uniform_half_space() -> SiteModel {
        SiteModel::builder()
            .layer(Layer::elastic(10.0, 500.0, 2000.0))
            .half_space(HalfSpace::elastic(500.0, 2000.0))
            .build()
            .unwrap()
    }

    /// 10 m of 200 m/s sediment: quarter-wavelength resonance at 5 Hz.
    fn soft_layer(qs: Option<f64>, half_space_vs: f64, half_space_density: f64) -> SiteModel {
        let layer = match qs {
            Some(q) => Layer::new(10.0, 200.0, 1900.0, q),
            None => Layer::elastic(10.0, 200.0, 1900.0),
        };
        SiteModel::builder()
            .layer(layer)
            .half_space(HalfSpace::elastic(half_space_vs, half_space_density))
            .build()
            .unwrap()
    }

    #[test]
    fn test_uniform_half_space_is_unity() {
        let model = uniform_half_space();
        let freqs = lin_spaced(0.5, 20.0, 40);
        let tf = transfer_function(&model, &freqs, &ResponseSettings::default()).unwrap();
        assert!(!tf.is_anelastic());
        assert!(tf.instabilities().is_empty());
        for amplitude in tf.amplitudes() {
            assert_abs_diff_eq!(amplitude, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_uniform_half_space_oblique_incidence_is_unity() {
        let model = uniform_half_space();
        let settings = ResponseSettings {
            incidence_deg: 30.0,
            ..Default::default()
        };
        let tf = transfer_function(&model, &lin_spaced(1.0, 10.0, 10), &settings).unwrap();
        for amplitude in tf.amplitudes() {
            assert_abs_diff_eq!(amplitude, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fundamental_resonance_at_quarter_wavelength() {
        // Very stiff base approximates a rigid boundary
        let model = soft_layer(None, 10_000.0, 2500.0);
        let freqs = lin_spaced(0.5, 20.0, 391); // 0.05 Hz steps, hits 5.0
        let tf = transfer_function(&model, &freqs, &ResponseSettings::default()).unwrap();
        let amplitudes = tf.amplitudes();
        let peak = amplitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap()
            .0;
        assert_abs_diff_eq!(freqs[peak], 200.0 / (4.0 * 10.0), epsilon = 0.05);

        // At the peak the elastic amplification against the incident
        // wave is the impedance ratio of half-space to layer
        let contrast = (2500.0 * 10_000.0) / (1900.0 * 200.0);
        assert_relative_eq!(amplitudes[peak], contrast, max_relative = 1e-6);
    }

    #[test]
    fn test_elastic_base_resonance_is_clamped_and_flagged() {
        // Base-motion reference: the displacement at the half-space top
        // vanishes at the quarter-wavelength frequency of the elastic
        // layer
        let model = soft_layer(None, 800.0, 2200.0);
        let settings = ResponseSettings {
            boundary: HalfspaceBoundary::Outcrop,
            ..Default::default()
        };
        let tf = transfer_function(&model, &[4.0, 5.0, 6.0], &settings).unwrap();
        assert!(tf.is_flagged(1), "exact resonance sample must be flagged");
        assert!(tf.amplitudes()[1] > 1e10);
        assert!(!tf.is_flagged(0));
        assert!(!tf.is_flagged(2));
    }

    #[test]
    fn test_attenuation_damps_the_resonance() {
        let freqs = lin_spaced(0.5, 20.0, 391);
        let settings = ResponseSettings::default();

        let elastic = transfer_function(&soft_layer(None, 800.0, 2200.0), &freqs, &settings)
            .unwrap()
            .amplitudes();
        let damped = transfer_function(&soft_layer(Some(10.0), 800.0, 2200.0), &freqs, &settings)
            .unwrap()
            .amplitudes();

        let elastic_peak = elastic.iter().cloned().fold(0.0, f64::max);
        let damped_peak = damped.iter().cloned().fold(0.0, f64::max);
        assert!(
            damped_peak < elastic_peak,
            "damped peak {damped_peak} should fall below elastic peak {elastic_peak}"
        );
        assert!(damped_peak > 1.0);
    }

    #[test]
    fn test_mode_resolution() {
        let freqs = [1.0, 2.0];

        let attenuating = soft_layer(Some(20.0), 800.0, 2200.0);
        let auto = transfer_function(&attenuating, &freqs, &ResponseSettings::default()).unwrap();
        assert!(auto.is_anelastic());

        let forced = ResponseSettings {
            mode: AttenuationMode::Elastic,
            ..Default::default()
        };
        let elastic = transfer_function(&attenuating, &freqs, &forced).unwrap();
        assert!(!elastic.is_anelastic());

        let no_qs = soft_layer(None, 800.0, 2200.0);
        let auto = transfer_function(&no_qs, &freqs, &ResponseSettings::default()).unwrap();
        assert!(!auto.is_anelastic());
    }

    #[test]
    fn test_requires_half_space() {
        let model = SiteModel::builder()
            .layer(Layer::elastic(10.0, 200.0, 1900.0))
            .build()
            .unwrap();
        let err = transfer_function(&model, &[1.0], &ResponseSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_HALF_SPACE");
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let model = soft_layer(None, 800.0, 2200.0);
        assert!(transfer_function(&model, &[], &ResponseSettings::default()).is_err());
        assert!(transfer_function(&model, &[2.0, 1.0], &ResponseSettings::default()).is_err());

        let steep = ResponseSettings {
            incidence_deg: 90.0,
            ..Default::default()
        };
        assert!(transfer_function(&model, &[1.0], &steep).is_err());
    }

    #[test]
    fn test_long_wavelength_limit_is_transparent() {
        let model = soft_layer(Some(20.0), 800.0, 2200.0);
        let tf = transfer_function(&model, &[1e-3], &ResponseSettings::default()).unwrap();
        assert_abs_diff_eq!(tf.amplitudes()[0], 1.0, epsilon = 1e-3);
    }
}
