//! Site Classifier
//!
//! Maps a travel-time average velocity (conventionally Vs30) onto the
//! Eurocode 8 ground types A-D. Exact threshold values fall into the
//! lower-velocity band; the special classes (E, S1, S2) need information
//! beyond an average velocity and come back as `Unclassified`, as does
//! any non-positive or non-finite input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EC8 ground type. The derived ordering (`A < B < C < D`) follows
/// decreasing stiffness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SiteClass {
    /// Rock or rock-like formation, Vs30 > 800 m/s
    A,
    /// Very dense sand or gravel, or very stiff clay, 360-800 m/s
    B,
    /// Dense or medium-dense sand or gravel, or stiff clay, 180-360 m/s
    C,
    /// Loose-to-medium cohesionless soil or soft clay, below 180 m/s
    D,
    /// Outside the A-D bands (special ground types, or invalid input)
    Unclassified,
}

impl SiteClass {
    /// EC8 ground description for reporting.
    pub fn description(&self) -> &'static str {
        match self {
            SiteClass::A => "rock or other rock-like geological formation",
            SiteClass::B => "very dense sand, gravel, or very stiff clay",
            SiteClass::C => "dense or medium-dense sand, gravel, or stiff clay",
            SiteClass::D => "loose-to-medium cohesionless soil or soft clay",
            SiteClass::Unclassified => "not classifiable from average velocity alone",
        }
    }
}

impl fmt::Display for SiteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteClass::Unclassified => write!(f, "unclassified"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Classify an average shear-wave velocity in m/s. Total over the
/// positive reals; never fails.
pub fn classify(average_velocity: f64) -> SiteClass {
    if !average_velocity.is_finite() || average_velocity <= 0.0 {
        return SiteClass::Unclassified;
    }
    if average_velocity > 800.0 {
        SiteClass::A
    } else if average_velocity > 360.0 {
        SiteClass::B
    } else if average_velocity > 180.0 {
        SiteClass::C
    } else {
        SiteClass::D
    }
}
