//! Layer value types
//!
//! A profile is an ordered stack of finite [`Layer`]s over an optional
//! terminal [`HalfSpace`]. All physical parameters are SI: thickness in
//! meters, shear velocity in m/s, density in kg/m3; the quality factor Qs
//! is dimensionless. `qs: None` means perfectly elastic.

use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};

/// A single finite-thickness layer of the vertical soil/rock profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer thickness in meters (strictly positive)
    pub thickness: f64,
    /// Shear-wave velocity in m/s (strictly positive)
    pub vs: f64,
    /// Mass density in kg/m3 (strictly positive)
    pub density: f64,
    /// Shear-wave quality factor; `None` = perfectly elastic
    pub qs: Option<f64>,
}

impl Layer {
    /// Create a layer with anelastic attenuation.
    pub fn new(thickness: f64, vs: f64, density: f64, qs: f64) -> Self {
        Self {
            thickness,
            vs,
            density,
            qs: Some(qs),
        }
    }

    /// Create a perfectly elastic layer (infinite Qs).
    pub fn elastic(thickness: f64, vs: f64, density: f64) -> Self {
        Self {
            thickness,
            vs,
            density,
            qs: None,
        }
    }

    /// Shear slowness in s/m.
    pub fn slowness(&self) -> f64 {
        1.0 / self.vs
    }

    /// Seismic impedance (density times velocity).
    pub fn impedance(&self) -> f64 {
        self.density * self.vs
    }

    /// The quality factor when it is finite. An explicitly infinite `qs`
    /// is treated exactly like `None`.
    pub fn finite_qs(&self) -> Option<f64> {
        self.qs.filter(|q| q.is_finite())
    }

    /// Validate layer parameters; `index` is the position in the profile
    /// (0 = surface) and only serves error reporting.
    pub fn validate(&self, index: usize) -> Result<()> {
        check_positive(self.thickness, "thickness", index)?;
        check_positive(self.vs, "shear-wave velocity", index)?;
        check_positive(self.density, "density", index)?;
        if let Some(qs) = self.qs {
            if qs.is_nan() || qs <= 0.0 {
                return Err(SiteError::InvalidModel {
                    reason: format!("layer {index}: non-positive quality factor {qs}"),
                });
            }
        }
        Ok(())
    }
}

/// The terminal half-space under the layered column. Its thickness is
/// unbounded by definition, so only material parameters are stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfSpace {
    /// Shear-wave velocity in m/s (strictly positive)
    pub vs: f64,
    /// Mass density in kg/m3 (strictly positive)
    pub density: f64,
    /// Shear-wave quality factor; `None` = perfectly elastic
    pub qs: Option<f64>,
}

impl HalfSpace {
    pub fn new(vs: f64, density: f64, qs: f64) -> Self {
        Self {
            vs,
            density,
            qs: Some(qs),
        }
    }

    pub fn elastic(vs: f64, density: f64) -> Self {
        Self {
            vs,
            density,
            qs: None,
        }
    }

    /// Shear slowness in s/m.
    pub fn slowness(&self) -> f64 {
        1.0 / self.vs
    }

    /// Seismic impedance (density times velocity).
    pub fn impedance(&self) -> f64 {
        self.density * self.vs
    }

    /// The quality factor when it is finite.
    pub fn finite_qs(&self) -> Option<f64> {
        self.qs.filter(|q| q.is_finite())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.vs.is_finite() || self.vs <= 0.0 {
            return Err(SiteError::InvalidModel {
                reason: format!("half-space: non-positive shear-wave velocity {}", self.vs),
            });
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(SiteError::InvalidModel {
                reason: format!("half-space: non-positive density {}", self.density),
            });
        }
        if let Some(qs) = self.qs {
            if qs.is_nan() || qs <= 0.0 {
                return Err(SiteError::InvalidModel {
                    reason: format!("half-space: non-positive quality factor {qs}"),
                });
            }
        }
        Ok(())
    }
}

fn check_positive(value: f64, name: &str, index: usize) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SiteError::InvalidModel {
            reason: format!("layer {index}: non-positive {name} {value}"),
        });
    }
    Ok(())
}
