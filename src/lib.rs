//! Strata - Seismic Site Response Characterization
//!
//! Strata derives the engineering parameters used in ground-motion hazard
//! analysis from a layered velocity-density-attenuation profile: the
//! SH-wave transfer function and its resonance peaks, travel-time and
//! quarter-wavelength average velocities, the high-frequency attenuation
//! parameter Kappa0, and the EC8 site class.
//!
//! # Architecture
//!
//! Everything starts from an immutable [`SiteModel`]:
//!
//! ```text
//! SiteModel ──┬── average::   Vs30, quarter-wavelength parameters ── classify::
//!             ├── kappa::     Kappa0
//!             └── response::  transfer function ── resonance peaks
//! ```
//!
//! Models are validated once at construction and never mutated; every
//! computation takes the model by shared reference and returns values
//! owned by the caller, so sweeps parallelize externally without locks.
//! Fatal conditions surface as [`SiteError`]; degraded-quality conditions
//! (fixed-point non-convergence, near-singular frequency samples) are
//! flagged on the returned values instead of aborting a sweep.
//!
//! # Example
//!
//! ```
//! use strata::{HalfSpace, Layer, SiteModel};
//! use strata::response::{self, ResponseSettings, PeakSettings};
//!
//! # fn main() -> strata::Result<()> {
//! let model = SiteModel::builder()
//!     .id("demo")
//!     .layer(Layer::new(10.0, 200.0, 1900.0, 20.0))
//!     .half_space(HalfSpace::new(800.0, 2200.0, 100.0))
//!     .build()?;
//!
//! let vs30 = strata::average::vs30(&model)?;
//! let class = strata::classify::classify(vs30);
//!
//! let freqs = response::log_spaced(0.2, 25.0, 200);
//! let tf = response::transfer_function(&model, &freqs, &ResponseSettings::default())?;
//! let peaks = response::resonance_peaks(&tf, &PeakSettings::default());
//! # let _ = (class, peaks);
//! # Ok(())
//! # }
//! ```

pub mod average;
pub mod classify;
pub mod error;
pub mod kappa;
pub mod model;
pub mod response;

pub use classify::SiteClass;
pub use error::{Result, SiteError};
pub use model::{HalfSpace, Layer, SiteModel, SiteModelBuilder};
