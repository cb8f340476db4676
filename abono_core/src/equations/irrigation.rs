//! # Drip Irrigation Formulas
//!
//! The five chained formulas behind one irrigation event. Each derived value
//! depends only on raw inputs and on values derived before it.
//!
//! ## Notation
//!
//! - `A` = Greenhouse surface area (m²)
//! - `G` = Total emitters (goteros)
//! - `q` = Flow rate of one emitter (L/h)
//! - `t` = Irrigation time (minutes)
//! - `CE` = Fertilizer electrical conductivity
//!
//! ## Preconditions
//!
//! Functions dividing by `A` assume `A > 0`. The engine only calls them after
//! the tier-1 gate has passed; they do not guard against zero themselves.

/// Minutes in one hour
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Reference area the per-area flow is normalized to (m²)
pub const REFERENCE_AREA_M2: f64 = 1000.0;

/// Divisor turning (flow per 1000 m² × CE × minutes) into kilograms
pub const FERTILIZER_DIVISOR: f64 = 100_000.0;

/// Emitter density: G / A
#[inline]
pub fn emitters_per_square_meter(total_emitters: f64, surface_area_m2: f64) -> f64 {
    total_emitters / surface_area_m2
}

/// Hourly water flow of the whole greenhouse: A × (G/A) × q
#[inline]
pub fn liters_per_hour(surface_area_m2: f64, emitters_per_m2: f64, emitter_flow_lph: f64) -> f64 {
    surface_area_m2 * emitters_per_m2 * emitter_flow_lph
}

/// Hourly flow normalized to 1000 m²: Q / (A / 1000)
#[inline]
pub fn flow_per_1000m2_per_hour(liters_per_hour: f64, surface_area_m2: f64) -> f64 {
    liters_per_hour / (surface_area_m2 / REFERENCE_AREA_M2)
}

/// Water delivered during one irrigation: (Q / 60) × t
#[inline]
pub fn water_used_liters(liters_per_hour: f64, irrigation_minutes: f64) -> f64 {
    (liters_per_hour / MINUTES_PER_HOUR) * irrigation_minutes
}

/// Fertilizer consumed during one irrigation, in kg:
/// (Q₁₀₀₀ / 100000) × CE × t × (A / 1000)
#[inline]
pub fn fertilizer_used_kg(
    flow_per_1000m2_per_hour: f64,
    fertilizer_conductivity: f64,
    irrigation_minutes: f64,
    surface_area_m2: f64,
) -> f64 {
    (flow_per_1000m2_per_hour / FERTILIZER_DIVISOR)
        * fertilizer_conductivity
        * irrigation_minutes
        * (surface_area_m2 / REFERENCE_AREA_M2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_emitter_density() {
        assert_relative_eq!(emitters_per_square_meter(2000.0, 1000.0), 2.0);
        assert_relative_eq!(emitters_per_square_meter(3.0, 4.0), 0.75);
    }

    #[test]
    fn test_liters_per_hour_reduces_to_emitters_times_flow() {
        // A × (G/A) × q == G × q
        let eps = emitters_per_square_meter(1500.0, 820.0);
        assert_relative_eq!(liters_per_hour(820.0, eps, 1.6), 1500.0 * 1.6, epsilon = 1e-9);
    }

    #[test]
    fn test_flow_normalization() {
        // 4000 L/h over 500 m² is 8000 L/h per 1000 m²
        assert_relative_eq!(flow_per_1000m2_per_hour(4000.0, 500.0), 8000.0);
    }

    #[test]
    fn test_water_used() {
        assert_relative_eq!(water_used_liters(4000.0, 30.0), 2000.0);
        assert_relative_eq!(water_used_liters(600.0, 90.0), 900.0);
    }

    #[test]
    fn test_fertilizer_used() {
        // (4000 / 100000) × 1.5 × 30 × 1 = 1.8
        assert_relative_eq!(fertilizer_used_kg(4000.0, 1.5, 30.0, 1000.0), 1.8, epsilon = 1e-12);
    }
}
