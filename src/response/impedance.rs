//! Square-root impedance amplification
//!
//! Amplification across a seismic impedance contrast after Joyner et al.
//! (1981) and Boore (2013), with the Snell effective-angle correction for
//! non-vertical incidence. Used standalone and as the amplification term
//! of the quarter-wavelength parameters.

/// Amplification of the site material (`top_*`) against a reference
/// material at depth (`ref_*`), at an incidence angle in degrees measured
/// from the vertical in the reference material.
pub fn impedance_amplification(
    top_vs: f64,
    top_density: f64,
    ref_vs: f64,
    ref_density: f64,
    incidence_deg: f64,
) -> f64 {
    let mut amplification =
        ((ref_density * ref_vs) / (top_density * top_vs)).sqrt();

    if incidence_deg > 0.0 {
        let incidence = incidence_deg.to_radians();
        // Effective angle of propagation at the site, via Snell's law
        let effective = ((top_vs / ref_vs) * incidence.sin()).asin();
        amplification *= (incidence.cos() / effective.cos()).sqrt();
    }

    amplification
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_no_contrast_is_unity() {
        assert_abs_diff_eq!(
            impedance_amplification(200.0, 1900.0, 200.0, 1900.0, 10.0),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_contrast_vertical() {
        assert_abs_diff_eq!(
            impedance_amplification(200.0, 1900.0, 1500.0, 2500.0, 0.0),
            3.14,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_single_contrast_oblique() {
        assert_abs_diff_eq!(
            impedance_amplification(200.0, 1900.0, 1500.0, 2500.0, 45.0),
            2.65,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_graded_contrasts_vertical() {
        let site = [(200.0, 1900.0), (800.0, 2100.0), (2000.0, 2500.0)];
        let expected = [3.63, 1.72, 1.0];
        for ((vs, density), want) in site.into_iter().zip(expected) {
            assert_abs_diff_eq!(
                impedance_amplification(vs, density, 2000.0, 2500.0, 0.0),
                want,
                epsilon = 0.01
            );
        }
    }
}
