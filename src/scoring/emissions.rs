//! Emissions calculator
//!
//! Fixed emission factors in tCO2e per unit of input.

use super::round_to;
use crate::models::{CarbonInput, EmissionsBreakdown, EmissionsResult};

/// Grid electricity, tCO2e per kWh (Scope 2)
pub const ELECTRICITY_FACTOR: f64 = 0.000367;
/// Natural gas, tCO2e per kg (Scope 1)
pub const GAS_FACTOR: f64 = 0.00296;
/// Diesel, tCO2e per liter (Scope 1)
pub const DIESEL_FACTOR: f64 = 0.00268;
/// Gasoline, tCO2e per liter (Scope 1)
pub const GASOLINE_FACTOR: f64 = 0.00230;

/// Convert fuel and electricity quantities into Scope 1 / Scope 2 emissions.
///
/// Scope totals keep full precision so that band edges are evaluated on the
/// exact value; only the per-source breakdown is rounded to 3 decimals.
pub fn compute_emissions(input: &CarbonInput) -> EmissionsResult {
    let gas = input.gas_kg() * GAS_FACTOR;
    let diesel = input.diesel_liters() * DIESEL_FACTOR;
    let gasoline = input.gasoline_liters() * GASOLINE_FACTOR;
    let electricity = input.electricity_kwh() * ELECTRICITY_FACTOR;

    let scope1_tons = gas + diesel + gasoline;
    let scope2_tons = electricity;

    EmissionsResult {
        scope1_tons,
        scope2_tons,
        total_tons: scope1_tons + scope2_tons,
        breakdown: EmissionsBreakdown {
            gas_tons: round_to(gas, 3),
            diesel_tons: round_to(diesel, 3),
            gasoline_tons: round_to(gasoline, 3),
            electricity_tons: round_to(electricity, 3),
        },
    }
}
