//! Layered Site Model
//!
//! Immutable description of a horizontally layered site: finite layers
//! (thickness, Vs, density, Qs) in top-to-bottom order over an optional
//! terminal half-space, plus site metadata.

mod layer;
mod site;

pub use layer::{HalfSpace, Layer};
pub use site::{SiteModel, SiteModelBuilder};
