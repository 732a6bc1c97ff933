//! Reference factors supplied once per processing run.

/// The six tiering coefficients used by the valuation and emissions engines.
///
/// Values carry no validation beyond having parsed as numbers; they are
/// loaded once at startup and only read afterwards.
///
/// # Examples
///
/// ```
/// use generation_report::factors::ReferenceFactors;
///
/// let factors = ReferenceFactors::new(0.5, 1.0, 1.5, 0.1, 0.2, 0.3);
/// assert_eq!(factors.value_factor_medium, 1.0);
/// assert_eq!(factors.emissions_factor_high, 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFactors {
    /// Value factor applied to offshore wind.
    pub value_factor_low: f64,
    /// Value factor applied to gas and coal.
    pub value_factor_medium: f64,
    /// Value factor applied to non-offshore wind.
    pub value_factor_high: f64,
    /// Lowest emissions tier (currently unused by any engine).
    pub emissions_factor_low: f64,
    /// Emissions factor applied to gas.
    pub emissions_factor_medium: f64,
    /// Emissions factor applied to coal.
    pub emissions_factor_high: f64,
}

impl ReferenceFactors {
    /// Creates a factor set, value factors first (low, medium, high) then
    /// emissions factors in the same order.
    pub fn new(
        value_factor_low: f64,
        value_factor_medium: f64,
        value_factor_high: f64,
        emissions_factor_low: f64,
        emissions_factor_medium: f64,
        emissions_factor_high: f64,
    ) -> Self {
        Self {
            value_factor_low,
            value_factor_medium,
            value_factor_high,
            emissions_factor_low,
            emissions_factor_medium,
            emissions_factor_high,
        }
    }
}
