//! Depth-Averaging Module
//!
//! Travel-time average velocity at arbitrary depth (Vs30 and friends) and
//! the frequency-dependent quarter-wavelength averages, both built on the
//! same thickness-weighted kernel.

mod depth;
mod qwl;

pub use depth::{
    average_density, depth_weighted_average, travel_time_average_velocity, vs30, SoilProperty,
};
pub use qwl::{
    quarter_wavelength_depth, quarter_wavelength_depth_seeded, quarter_wavelength_parameters,
    QwlParameters, QwlSettings, QwlSolution,
};
