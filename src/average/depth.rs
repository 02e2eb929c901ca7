//! Thickness-weighted depth averaging
//!
//! The shared kernel behind travel-time average velocity, mean density
//! and the kappa integral: a property is averaged over the column from
//! the free surface down to an arbitrary depth, pro-rating the layer the
//! target depth falls in and extending into the half-space when the
//! depth reaches below the measured column.

use crate::error::{Result, SiteError};
use crate::model::{HalfSpace, Layer, SiteModel};
use serde::{Deserialize, Serialize};

/// Per-layer property selected for depth averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilProperty {
    /// Shear slowness 1/Vs in s/m
    Slowness,
    /// Shear-wave velocity in m/s
    Velocity,
    /// Mass density in kg/m3
    Density,
    /// Specific attenuation 1/(Vs·Qs) in s/m; zero for elastic layers
    Attenuation,
}

impl SoilProperty {
    fn of_layer(self, layer: &Layer) -> f64 {
        match self {
            SoilProperty::Slowness => layer.slowness(),
            SoilProperty::Velocity => layer.vs,
            SoilProperty::Density => layer.density,
            SoilProperty::Attenuation => layer
                .finite_qs()
                .map_or(0.0, |qs| 1.0 / (layer.vs * qs)),
        }
    }

    fn of_half_space(self, half_space: &HalfSpace) -> f64 {
        match self {
            SoilProperty::Slowness => half_space.slowness(),
            SoilProperty::Velocity => half_space.vs,
            SoilProperty::Density => half_space.density,
            SoilProperty::Attenuation => half_space
                .finite_qs()
                .map_or(0.0, |qs| 1.0 / (half_space.vs * qs)),
        }
    }
}

/// Thickness-weighted mean of a soil property from the surface down to
/// `depth` meters.
///
/// The layer containing `depth` contributes only the fraction of its
/// thickness above `depth`; a depth exactly at an interface takes the
/// layer above in full and nothing below. Beyond the measured column the
/// half-space property extends the profile, or the call fails with
/// [`SiteError::DepthExceedsModel`] when the profile has none.
pub fn depth_weighted_average(
    model: &SiteModel,
    property: SoilProperty,
    depth: f64,
) -> Result<f64> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(SiteError::InvalidDepth { depth });
    }

    let mut mean = 0.0;
    let mut covered = 0.0;
    for layer in model.layers() {
        if covered + layer.thickness < depth {
            mean += layer.thickness * property.of_layer(layer) / depth;
            covered += layer.thickness;
        } else {
            mean += (depth - covered) * property.of_layer(layer) / depth;
            return Ok(mean);
        }
    }
    // Depth reaches below the deepest interface
    match model.half_space() {
        Some(half_space) => {
            mean += (depth - covered) * property.of_half_space(half_space) / depth;
            Ok(mean)
        }
        None => Err(SiteError::DepthExceedsModel {
            requested: depth,
            available: model.total_thickness(),
        }),
    }
}

/// Travel-time average (harmonic, slowness-weighted) shear velocity from
/// the surface down to `depth` meters.
pub fn travel_time_average_velocity(model: &SiteModel, depth: f64) -> Result<f64> {
    let mean_slowness = depth_weighted_average(model, SoilProperty::Slowness, depth)?;
    Ok(1.0 / mean_slowness)
}

/// The conventional Vs30: travel-time average velocity over the top 30 m.
pub fn vs30(model: &SiteModel) -> Result<f64> {
    travel_time_average_velocity(model, 30.0)
}

/// Thickness-weighted arithmetic mean density down to `depth` meters.
pub fn average_density(model: &SiteModel, depth: f64) -> Result<f64> {
    depth_weighted_average(model, SoilProperty::Density, depth)
}
