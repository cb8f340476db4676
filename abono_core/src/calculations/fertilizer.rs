//! # Fertilizer Calculation
//!
//! Derives water and fertilizer consumption for one irrigation event.
//!
//! ## Tiers
//!
//! Results are gated in three sequential tiers:
//!
//! 1. Surface, emitters and emitter flow all > 0: emitter density, hourly flow
//!    and flow per 1000 m². Otherwise the outcome is
//!    [`CalculationOutcome::Incomplete`].
//! 2. Irrigation time > 0: water used in this irrigation.
//! 3. Conductivity > 0 (and tier 2): fertilizer used.
//!
//! Missing tier-2/3 inputs still yield [`CalculationOutcome::Computed`], with
//! the unreachable fields left as `None`.
//!
//! ## Example
//!
//! ```rust
//! use abono_core::calculations::{compute, CalculationOutcome, InputFields};
//!
//! let input = InputFields::new(1000.0, 2000, 2.0)
//!     .with_irrigation_minutes(30.0)
//!     .with_fertilizer_conductivity(1.5);
//!
//! match compute(&input) {
//!     CalculationOutcome::Computed(results) => {
//!         let water = results.water_used_liters.unwrap();
//!         assert!((water - 2000.0).abs() < 1e-9);
//!     }
//!     CalculationOutcome::Incomplete(reason) => panic!("{}", reason.hint()),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::irrigation;
use crate::errors::{CalcError, CalcResult};

/// Raw field values for one calculation.
///
/// Every field defaults to empty/zero so a partially filled form
/// deserializes cleanly.
///
/// ## JSON Example
///
/// ```json
/// {
///   "greenhouse_id": "INV-7",
///   "surface_area_m2": 1000.0,
///   "total_emitters": 2000,
///   "emitter_flow_lph": 2.0,
///   "fertilizer_conductivity": 1.5,
///   "irrigation_minutes": 30.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFields {
    /// Greenhouse identifier, used as a label only
    pub greenhouse_id: Option<String>,

    /// Greenhouse surface area (m²)
    pub surface_area_m2: f64,

    /// Total drip emitters in the greenhouse
    pub total_emitters: u32,

    /// Flow rate of each emitter (L/h)
    pub emitter_flow_lph: f64,

    /// Fertilizer electrical conductivity (CE)
    pub fertilizer_conductivity: f64,

    /// Irrigation duration (minutes)
    pub irrigation_minutes: f64,
}

impl InputFields {
    /// Create inputs with the three tier-1 fields set.
    pub fn new(surface_area_m2: f64, total_emitters: u32, emitter_flow_lph: f64) -> Self {
        InputFields {
            surface_area_m2,
            total_emitters,
            emitter_flow_lph,
            ..Default::default()
        }
    }

    pub fn with_greenhouse_id(mut self, id: impl Into<String>) -> Self {
        self.greenhouse_id = Some(id.into());
        self
    }

    pub fn with_irrigation_minutes(mut self, minutes: f64) -> Self {
        self.irrigation_minutes = minutes;
        self
    }

    pub fn with_fertilizer_conductivity(mut self, conductivity: f64) -> Self {
        self.fertilizer_conductivity = conductivity;
        self
    }

    /// The greenhouse id trimmed, or `None` when absent or blank.
    pub fn greenhouse_label(&self) -> Option<&str> {
        self.greenhouse_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    fn base_ready(&self) -> bool {
        self.surface_area_m2 > 0.0 && self.total_emitters > 0 && self.emitter_flow_lph > 0.0
    }

    fn irrigation_ready(&self) -> bool {
        self.irrigation_minutes > 0.0
    }

    fn conductivity_ready(&self) -> bool {
        self.fertilizer_conductivity > 0.0
    }
}

/// Which precondition tier is blocking further results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteReason {
    /// Surface area, emitter count or emitter flow is missing
    #[serde(rename = "base")]
    BaseFields,
    /// Irrigation time is missing
    IrrigationTime,
    /// Fertilizer conductivity is missing
    FertilizerConductivity,
}

impl IncompleteReason {
    /// Tier number (1-3) this reason blocks
    pub fn tier(&self) -> u8 {
        match self {
            IncompleteReason::BaseFields => 1,
            IncompleteReason::IrrigationTime => 2,
            IncompleteReason::FertilizerConductivity => 3,
        }
    }

    /// Stable identifier, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            IncompleteReason::BaseFields => "base",
            IncompleteReason::IrrigationTime => "irrigation_time",
            IncompleteReason::FertilizerConductivity => "fertilizer_conductivity",
        }
    }

    /// User-facing hint naming the fields to fill in
    pub fn hint(&self) -> &'static str {
        match self {
            IncompleteReason::BaseFields => {
                "Introduce los valores de superficie, goteros totales y caudal del gotero para ver los cálculos"
            }
            IncompleteReason::IrrigationTime => {
                "Introduce el tiempo de riego para calcular el agua y el abono gastados"
            }
            IncompleteReason::FertilizerConductivity => {
                "Introduce la CE del abono para calcular el abono gastado"
            }
        }
    }
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics. Tier-1 values are always present; later tiers are
/// `None` until their inputs are > 0.
///
/// Values are full precision; rounding happens only when formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    /// Emitters per square meter
    pub emitters_per_m2: f64,

    /// Water flow of the whole greenhouse (L/h)
    pub liters_per_hour: f64,

    /// Water flow normalized to 1000 m² (L/h)
    pub flow_per_1000m2_per_hour: f64,

    /// Water delivered in this irrigation (L)
    pub water_used_liters: Option<f64>,

    /// Fertilizer consumed in this irrigation (kg)
    pub fertilizer_used_kg: Option<f64>,
}

impl ResultBundle {
    /// First tier still missing, or `None` when every result is available.
    pub fn pending(&self) -> Option<IncompleteReason> {
        if self.water_used_liters.is_none() {
            Some(IncompleteReason::IrrigationTime)
        } else if self.fertilizer_used_kg.is_none() {
            Some(IncompleteReason::FertilizerConductivity)
        } else {
            None
        }
    }

    /// Whether every tier has been reached
    pub fn is_final(&self) -> bool {
        self.pending().is_none()
    }

    /// Convert into [`FinalResults`], failing when a tier is missing.
    ///
    /// Export formatting goes through this, so a partial bundle can never
    /// reach a document as a silent zero.
    pub fn finalize(&self) -> CalcResult<FinalResults> {
        match (self.water_used_liters, self.fertilizer_used_kg) {
            (Some(water_used_liters), Some(fertilizer_used_kg)) => Ok(FinalResults {
                emitters_per_m2: self.emitters_per_m2,
                liters_per_hour: self.liters_per_hour,
                flow_per_1000m2_per_hour: self.flow_per_1000m2_per_hour,
                water_used_liters,
                fertilizer_used_kg,
            }),
            (None, _) => Err(CalcError::incomplete_results(IncompleteReason::IrrigationTime)),
            (Some(_), None) => Err(CalcError::incomplete_results(
                IncompleteReason::FertilizerConductivity,
            )),
        }
    }
}

/// A [`ResultBundle`] with every tier reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalResults {
    pub emitters_per_m2: f64,
    pub liters_per_hour: f64,
    pub flow_per_1000m2_per_hour: f64,
    pub water_used_liters: f64,
    pub fertilizer_used_kg: f64,
}

/// Outcome of one recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// Tier 1 not reached; nothing can be derived yet
    Incomplete(IncompleteReason),
    /// Tier 1 reached; later tiers per their gates
    Computed(ResultBundle),
}

impl CalculationOutcome {
    /// Results, if tier 1 was reached
    pub fn results(&self) -> Option<&ResultBundle> {
        match self {
            CalculationOutcome::Computed(results) => Some(results),
            CalculationOutcome::Incomplete(_) => None,
        }
    }

    /// The tier currently blocking, for either variant
    pub fn pending(&self) -> Option<IncompleteReason> {
        match self {
            CalculationOutcome::Incomplete(reason) => Some(*reason),
            CalculationOutcome::Computed(results) => results.pending(),
        }
    }

    /// Hint for the blocking tier, `None` when every result is available
    pub fn hint(&self) -> Option<&'static str> {
        self.pending().map(|reason| reason.hint())
    }

    /// Whether every tier has been reached
    pub fn is_final(&self) -> bool {
        self.pending().is_none()
    }
}

/// Run the tiered calculation.
///
/// Never fails: unmet preconditions are reported through
/// [`CalculationOutcome::Incomplete`] or `None` fields. Pure and
/// deterministic.
pub fn compute(input: &InputFields) -> CalculationOutcome {
    if !input.base_ready() {
        return CalculationOutcome::Incomplete(IncompleteReason::BaseFields);
    }

    let area = input.surface_area_m2;

    let emitters_per_m2 = irrigation::emitters_per_square_meter(f64::from(input.total_emitters), area);
    let liters_per_hour = irrigation::liters_per_hour(area, emitters_per_m2, input.emitter_flow_lph);
    let flow_per_1000m2_per_hour = irrigation::flow_per_1000m2_per_hour(liters_per_hour, area);

    let water_used_liters = input
        .irrigation_ready()
        .then(|| irrigation::water_used_liters(liters_per_hour, input.irrigation_minutes));

    let fertilizer_used_kg = (input.irrigation_ready() && input.conductivity_ready()).then(|| {
        irrigation::fertilizer_used_kg(
            flow_per_1000m2_per_hour,
            input.fertilizer_conductivity,
            input.irrigation_minutes,
            area,
        )
    });

    CalculationOutcome::Computed(ResultBundle {
        emitters_per_m2,
        liters_per_hour,
        flow_per_1000m2_per_hour,
        water_used_liters,
        fertilizer_used_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_a() -> InputFields {
        InputFields::new(1000.0, 2000, 2.0)
    }

    fn scenario_b() -> InputFields {
        scenario_a().with_irrigation_minutes(30.0)
    }

    fn scenario_c() -> InputFields {
        scenario_b().with_fertilizer_conductivity(1.5)
    }

    fn computed(input: &InputFields) -> ResultBundle {
        match compute(input) {
            CalculationOutcome::Computed(results) => results,
            other => panic!("expected computed outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_a_base_only() {
        let results = computed(&scenario_a());
        assert_relative_eq!(results.emitters_per_m2, 2.0);
        assert_relative_eq!(results.liters_per_hour, 4000.0);
        assert_relative_eq!(results.flow_per_1000m2_per_hour, 4000.0);
        assert_eq!(results.water_used_liters, None);
        assert_eq!(results.fertilizer_used_kg, None);
        assert_eq!(results.pending(), Some(IncompleteReason::IrrigationTime));
    }

    #[test]
    fn test_scenario_b_water_without_fertilizer() {
        let results = computed(&scenario_b());
        assert_relative_eq!(results.water_used_liters.unwrap(), 2000.0);
        assert_eq!(results.fertilizer_used_kg, None);
        assert_eq!(results.pending(), Some(IncompleteReason::FertilizerConductivity));
    }

    #[test]
    fn test_scenario_c_final() {
        let results = computed(&scenario_c());
        assert_relative_eq!(results.water_used_liters.unwrap(), 2000.0);
        assert_relative_eq!(results.fertilizer_used_kg.unwrap(), 1.8, epsilon = 1e-12);
        assert!(results.is_final());
    }

    #[test]
    fn test_scenario_d_zero_area_is_incomplete() {
        let input = InputFields {
            surface_area_m2: 0.0,
            ..scenario_c()
        };
        assert_eq!(compute(&input), CalculationOutcome::Incomplete(IncompleteReason::BaseFields));
    }

    #[test]
    fn test_any_zero_base_field_is_incomplete() {
        let no_emitters = InputFields {
            total_emitters: 0,
            ..scenario_c()
        };
        let no_flow = InputFields {
            emitter_flow_lph: 0.0,
            ..scenario_c()
        };
        for input in [no_emitters, no_flow, InputFields::default()] {
            let outcome = compute(&input);
            assert_eq!(outcome, CalculationOutcome::Incomplete(IncompleteReason::BaseFields));
            assert!(outcome.results().is_none());
        }
    }

    #[test]
    fn test_negative_and_nan_never_pass_gate() {
        let negative = InputFields::new(-1000.0, 2000, 2.0);
        let nan = InputFields::new(f64::NAN, 2000, 2.0);
        assert!(matches!(compute(&negative), CalculationOutcome::Incomplete(_)));
        assert!(matches!(compute(&nan), CalculationOutcome::Incomplete(_)));
    }

    #[test]
    fn test_conductivity_without_time_stays_pending() {
        let input = scenario_a().with_fertilizer_conductivity(1.5);
        let results = computed(&input);
        assert_eq!(results.water_used_liters, None);
        assert_eq!(results.fertilizer_used_kg, None);
        assert_eq!(results.pending(), Some(IncompleteReason::IrrigationTime));
    }

    #[test]
    fn test_base_identities() {
        for (area, emitters, flow) in [(1000.0, 2000, 2.0), (733.5, 1211, 1.6), (12.0, 7, 4.0)] {
            let results = computed(&InputFields::new(area, emitters, flow));
            assert_relative_eq!(results.emitters_per_m2, f64::from(emitters) / area);
            assert_relative_eq!(
                results.liters_per_hour,
                area * results.emitters_per_m2 * flow,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_determinism() {
        let input = scenario_c().with_greenhouse_id("INV-3");
        assert_eq!(compute(&input), compute(&input));
    }

    #[test]
    fn test_monotonic_in_irrigation_time() {
        let mut previous: Option<ResultBundle> = None;
        for minutes in [1.0, 5.0, 12.5, 30.0, 90.0] {
            let results = computed(&scenario_c().with_irrigation_minutes(minutes));
            if let Some(prev) = &previous {
                assert!(results.water_used_liters.unwrap() > prev.water_used_liters.unwrap());
                assert!(results.fertilizer_used_kg.unwrap() > prev.fertilizer_used_kg.unwrap());
            }
            previous = Some(results);
        }
    }

    #[test]
    fn test_finalize_requires_every_tier() {
        let partial = computed(&scenario_b());
        assert_eq!(
            partial.finalize(),
            Err(CalcError::incomplete_results(IncompleteReason::FertilizerConductivity))
        );

        let final_results = computed(&scenario_c()).finalize().unwrap();
        assert_relative_eq!(final_results.water_used_liters, 2000.0);
    }

    #[test]
    fn test_outcome_hints() {
        assert_eq!(
            compute(&InputFields::default()).hint(),
            Some(IncompleteReason::BaseFields.hint())
        );
        assert_eq!(
            compute(&scenario_a()).hint(),
            Some(IncompleteReason::IrrigationTime.hint())
        );
        assert_eq!(compute(&scenario_c()).hint(), None);
        assert!(compute(&scenario_c()).is_final());
    }

    #[test]
    fn test_greenhouse_label() {
        assert_eq!(scenario_a().greenhouse_label(), None);
        assert_eq!(scenario_a().with_greenhouse_id("   ").greenhouse_label(), None);
        assert_eq!(scenario_a().with_greenhouse_id(" 12B ").greenhouse_label(), Some("12B"));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&compute(&InputFields::default())).unwrap();
        assert_eq!(json, r#"{"status":"incomplete","data":"base"}"#);

        let outcome = compute(&scenario_b());
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"fertilizer_used_kg\":null"));
        let roundtrip: CalculationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, outcome);
    }

    #[test]
    fn test_json_keeps_full_precision() {
        // (4000 / 60) * 30 is not exactly 2000 in binary floating point
        let results = compute(&scenario_b()).results().cloned().unwrap();
        let water = results.water_used_liters.unwrap();
        assert_ne!(water, 2000.0);

        let json = serde_json::to_string(&results).unwrap();
        let roundtrip: ResultBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.water_used_liters, Some(water));
    }

    #[test]
    fn test_tier_numbers() {
        assert_eq!(IncompleteReason::BaseFields.tier(), 1);
        assert_eq!(IncompleteReason::IrrigationTime.tier(), 2);
        assert_eq!(IncompleteReason::FertilizerConductivity.tier(), 3);
    }

    #[test]
    fn test_partial_input_json_uses_defaults() {
        let input: InputFields = serde_json::from_str(r#"{"surface_area_m2": 500.0}"#).unwrap();
        assert_eq!(input.total_emitters, 0);
        assert_eq!(input.greenhouse_id, None);
        assert_eq!(compute(&input), CalculationOutcome::Incomplete(IncompleteReason::BaseFields));
    }
}
