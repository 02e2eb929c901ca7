//! Quarter-wavelength depth and averages
//!
//! The quarter-wavelength depth at a frequency is the depth z equal to a
//! quarter of the wavelength implied by the travel-time average velocity
//! down to z itself. The cyclic depth/velocity relationship is resolved by
//! an explicit fixed-point iteration with a relative tolerance and an
//! iteration cap; non-convergence is reported on the solution, never
//! raised as an error.

use crate::average::depth::{average_density, depth_weighted_average, SoilProperty};
use crate::error::{Result, SiteError};
use crate::model::SiteModel;
use crate::response::impedance_amplification;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed-point iteration settings for the quarter-wavelength solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QwlSettings {
    /// Relative change in depth below which the iteration stops
    pub tolerance: f64,
    /// Hard cap on the number of iterations
    pub max_iterations: u32,
}

impl Default for QwlSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 50,
        }
    }
}

/// Outcome of the quarter-wavelength depth search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QwlSolution {
    /// Converged (or best-estimate) quarter-wavelength depth in meters
    pub depth: f64,
    /// Iterations actually performed
    pub iterations: u32,
    /// False when the iteration cap was hit before the tolerance
    pub converged: bool,
}

/// Frequency-dependent site parameters at the quarter-wavelength depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QwlParameters {
    /// Frequency the parameters refer to, in Hz
    pub frequency: f64,
    /// Quarter-wavelength depth in meters
    pub depth: f64,
    /// Travel-time average velocity down to that depth, in m/s
    pub velocity: f64,
    /// Thickness-weighted mean density down to that depth, in kg/m3
    pub density: f64,
    /// Square-root impedance amplification against the profile base
    pub amplification: f64,
    /// Convergence flag carried over from the depth search
    pub converged: bool,
    /// Iterations used by the depth search
    pub iterations: u32,
}

/// Solve for the quarter-wavelength depth at `frequency`, seeding the
/// iteration with the quarter wavelength in the surface layer.
pub fn quarter_wavelength_depth(
    model: &SiteModel,
    frequency: f64,
    settings: &QwlSettings,
) -> Result<QwlSolution> {
    let seed = model.surface().vs / (4.0 * frequency_checked(frequency)?);
    quarter_wavelength_depth_seeded(model, frequency, seed, settings)
}

/// Solve for the quarter-wavelength depth starting from an explicit seed
/// depth. Re-solving from a converged depth terminates in one iteration.
pub fn quarter_wavelength_depth_seeded(
    model: &SiteModel,
    frequency: f64,
    seed: f64,
    settings: &QwlSettings,
) -> Result<QwlSolution> {
    let frequency = frequency_checked(frequency)?;
    if !seed.is_finite() || seed <= 0.0 {
        return Err(SiteError::InvalidDepth { depth: seed });
    }

    let mut depth = seed;
    for iteration in 1..=settings.max_iterations {
        let mean_slowness = depth_weighted_average(model, SoilProperty::Slowness, depth)?;
        let next = 1.0 / (4.0 * frequency * mean_slowness);
        let change = (next - depth).abs() / next;
        debug!(frequency, iteration, depth, next, change, "qwl iteration");
        depth = next;
        if change <= settings.tolerance {
            return Ok(QwlSolution {
                depth,
                iterations: iteration,
                converged: true,
            });
        }
    }

    warn!(
        frequency,
        depth,
        cap = settings.max_iterations,
        "quarter-wavelength iteration hit the cap; returning best estimate"
    );
    Ok(QwlSolution {
        depth,
        iterations: settings.max_iterations,
        converged: false,
    })
}

/// Average velocity, density and square-root impedance amplification at
/// the quarter-wavelength depth for `frequency`.
///
/// The amplification baseline is the half-space, or the deepest layer for
/// a truncated profile, at vertical incidence.
pub fn quarter_wavelength_parameters(
    model: &SiteModel,
    frequency: f64,
    settings: &QwlSettings,
) -> Result<QwlParameters> {
    let solution = quarter_wavelength_depth(model, frequency, settings)?;
    let velocity = 1.0 / depth_weighted_average(model, SoilProperty::Slowness, solution.depth)?;
    let density = average_density(model, solution.depth)?;

    let (ref_vs, ref_density) = match model.half_space() {
        Some(half_space) => (half_space.vs, half_space.density),
        None => {
            let deepest = &model.layers()[model.layer_count() - 1];
            (deepest.vs, deepest.density)
        }
    };
    let amplification = impedance_amplification(velocity, density, ref_vs, ref_density, 0.0);

    Ok(QwlParameters {
        frequency,
        depth: solution.depth,
        velocity,
        density,
        amplification,
        converged: solution.converged,
        iterations: solution.iterations,
    })
}

fn frequency_checked(frequency: f64) -> Result<f64> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(SiteError::InvalidFrequencies {
            reason: format!("frequency {frequency} must be strictly positive"),
        });
    }
    Ok(frequency)
}
