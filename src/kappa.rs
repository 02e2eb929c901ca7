//! Kappa0 Estimator
//!
//! The high-frequency attenuation parameter Kappa0 is the shear-wave
//! travel time divided by Qs, integrated over a depth range from the free
//! surface. Elastic layers (infinite Qs) contribute nothing.

use crate::average::{depth_weighted_average, SoilProperty};
use crate::error::Result;
use crate::model::SiteModel;

/// Site attenuation parameter Kappa0 in seconds over `[0, depth]`.
///
/// `depth: None` integrates over the whole measured column. Partial
/// layers are pro-rated exactly as in travel-time averaging, and depths
/// below the column extend into the half-space under the same rules (a
/// truncated profile fails with
/// [`DepthExceedsModel`](crate::SiteError::DepthExceedsModel)).
pub fn kappa0(model: &SiteModel, depth: Option<f64>) -> Result<f64> {
    let depth = depth.unwrap_or_else(|| model.total_thickness());
    // The kernel averages 1/(Vs·Qs) over the column; scaling by the depth
    // turns the mean back into the travel-time integral.
    let mean_attenuation = depth_weighted_average(model, SoilProperty::Attenuation, depth)?;
    Ok(depth * mean_attenuation)
}
