//! Site model construction and read-only access
//!
//! A [`SiteModel`] is built once through [`SiteModelBuilder`], validated
//! in full at `build()`, and never mutated afterwards. Every computation
//! in the crate takes the model by shared reference; there is no cached
//! derived state and no module-level mutable state anywhere.

use crate::error::{Result, SiteError};
use crate::model::{HalfSpace, Layer};
use serde::Serialize;

/// Immutable description of a one-dimensional layered site: finite layers
/// in top-to-bottom order over an optional terminal half-space.
///
/// The half-space is optional because measured columns without bedrock
/// characterization are legitimate input; operations that cannot be posed
/// without one fail fast instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteModel {
    id: Option<String>,
    layers: Vec<Layer>,
    half_space: Option<HalfSpace>,
    measured_depth: Option<(f64, f64)>,
}

impl SiteModel {
    /// Start building a model.
    pub fn builder() -> SiteModelBuilder {
        SiteModelBuilder::default()
    }

    /// Site identifier, if one was attached.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Number of finite layers (the half-space is not counted).
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The finite layers in top-to-bottom order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// A single layer by position (0 = surface).
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// The topmost layer.
    pub fn surface(&self) -> &Layer {
        &self.layers[0]
    }

    /// The terminal half-space, when the profile has one.
    pub fn half_space(&self) -> Option<&HalfSpace> {
        self.half_space.as_ref()
    }

    /// Depth range over which the profile was actually measured, if known.
    pub fn measured_depth(&self) -> Option<(f64, f64)> {
        self.measured_depth
    }

    /// Cumulative depth to the top of layer `index` (0.0 for the surface
    /// layer). `index == layer_count()` addresses the half-space top.
    pub fn depth_to_top(&self, index: usize) -> Option<f64> {
        if index > self.layers.len() {
            return None;
        }
        Some(self.layers[..index].iter().map(|l| l.thickness).sum())
    }

    /// Depth of every layer top, free surface included. The last entry is
    /// the top of the half-space (equal to [`total_thickness`]).
    ///
    /// [`total_thickness`]: SiteModel::total_thickness
    pub fn interface_depths(&self) -> Vec<f64> {
        let mut depths = Vec::with_capacity(self.layers.len() + 1);
        let mut z = 0.0;
        for layer in &self.layers {
            depths.push(z);
            z += layer.thickness;
        }
        depths.push(z);
        depths
    }

    /// Total thickness of the finite layers in meters.
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    /// Whether any layer (or the half-space) carries a finite Qs. Drives
    /// the default elastic/anelastic choice of the transfer function.
    pub fn has_attenuation(&self) -> bool {
        self.layers.iter().any(|l| l.finite_qs().is_some())
            || self
                .half_space
                .as_ref()
                .is_some_and(|h| h.finite_qs().is_some())
    }
}

/// Builder for [`SiteModel`]; collects layers top to bottom and validates
/// everything at [`build`](SiteModelBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SiteModelBuilder {
    id: Option<String>,
    layers: Vec<Layer>,
    half_space: Option<HalfSpace>,
    measured_depth: Option<(f64, f64)>,
}

impl SiteModelBuilder {
    /// Attach a site identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a finite layer below the ones already added.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append several layers in top-to-bottom order.
    pub fn layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Terminate the profile with a half-space.
    pub fn half_space(mut self, half_space: HalfSpace) -> Self {
        self.half_space = Some(half_space);
        self
    }

    /// Record the measured depth range (metadata only).
    pub fn measured_depth(mut self, from: f64, to: f64) -> Self {
        self.measured_depth = Some((from, to));
        self
    }

    /// Validate and freeze the model.
    pub fn build(self) -> Result<SiteModel> {
        if self.layers.is_empty() {
            return Err(SiteError::InvalidModel {
                reason: "profile has no layers".to_string(),
            });
        }
        for (index, layer) in self.layers.iter().enumerate() {
            layer.validate(index)?;
        }
        if let Some(half_space) = &self.half_space {
            half_space.validate()?;
        }
        if let Some((from, to)) = self.measured_depth {
            if !from.is_finite() || !to.is_finite() || from < 0.0 || to <= from {
                return Err(SiteError::InvalidModel {
                    reason: format!("measured depth range {from}..{to} is not ordered"),
                });
            }
        }
        Ok(SiteModel {
            id: self.id,
            layers: self.layers,
            half_space: self.half_space,
            measured_depth: self.measured_depth,
        })
    }
}
