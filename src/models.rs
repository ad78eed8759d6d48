//! Core data models for ecoscore
//!
//! Validated inputs, scoring outputs and the records persisted by the
//! evaluation store. Input types can only be built through their checked
//! constructors; the loosely-shaped [`EvaluationRequest`] is the serde-facing
//! schema and is converted with [`EvaluationRequest::validate`].

use crate::error::{non_negative, InputError, InputResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reporting period of combustion and grid-electricity consumption
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarbonInput {
    electricity_kwh: f64,
    gas_kg: f64,
    diesel_liters: f64,
    gasoline_liters: f64,
}

impl CarbonInput {
    pub fn new(
        electricity_kwh: f64,
        gas_kg: f64,
        diesel_liters: f64,
        gasoline_liters: f64,
    ) -> InputResult<Self> {
        Ok(Self {
            electricity_kwh: non_negative("electricity_kwh", electricity_kwh)?,
            gas_kg: non_negative("gas_kg", gas_kg)?,
            diesel_liters: non_negative("diesel_liters", diesel_liters)?,
            gasoline_liters: non_negative("gasoline_liters", gasoline_liters)?,
        })
    }

    pub fn electricity_kwh(&self) -> f64 {
        self.electricity_kwh
    }

    pub fn gas_kg(&self) -> f64 {
        self.gas_kg
    }

    pub fn diesel_liters(&self) -> f64 {
        self.diesel_liters
    }

    pub fn gasoline_liters(&self) -> f64 {
        self.gasoline_liters
    }
}

/// Monthly water consumption
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaterInput {
    monthly_consumption_liters: f64,
}

impl WaterInput {
    pub fn new(monthly_consumption_liters: f64) -> InputResult<Self> {
        Ok(Self {
            monthly_consumption_liters: non_negative(
                "water_liters",
                monthly_consumption_liters,
            )?,
        })
    }

    pub fn monthly_consumption_liters(&self) -> f64 {
        self.monthly_consumption_liters
    }
}

/// Waste produced and the share of it that was recycled.
///
/// Invariant: `recycled_waste_kg <= total_waste_kg`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WasteInput {
    total_waste_kg: f64,
    recycled_waste_kg: f64,
}

impl WasteInput {
    pub fn new(total_waste_kg: f64, recycled_waste_kg: f64) -> InputResult<Self> {
        let total = non_negative("waste_kg", total_waste_kg)?;
        let recycled = non_negative("recycled_kg", recycled_waste_kg)?;
        if recycled > total {
            return Err(InputError::RecycledExceedsTotal { recycled, total });
        }
        Ok(Self {
            total_waste_kg: total,
            recycled_waste_kg: recycled,
        })
    }

    pub fn total_waste_kg(&self) -> f64 {
        self.total_waste_kg
    }

    pub fn recycled_waste_kg(&self) -> f64 {
        self.recycled_waste_kg
    }

    /// Recycled share in percent, or `None` when no waste was reported.
    pub fn valorization_percent(&self) -> Option<f64> {
        if self.total_waste_kg == 0.0 {
            None
        } else {
            Some(self.recycled_waste_kg / self.total_waste_kg * 100.0)
        }
    }
}

/// All validated inputs of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "EvaluationRequest", into = "EvaluationRequest")]
pub struct EvaluationInputs {
    pub carbon: CarbonInput,
    pub water: WaterInput,
    pub waste: WasteInput,
}

/// Raw evaluation payload as submitted (file, CLI flags or batch entry).
///
/// Every quantity is optional and defaults to zero. Field aliases accept the
/// camelCase names used by older form payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationRequest {
    /// Company the evaluation belongs to (only used when saving)
    #[serde(skip_serializing_if = "Option::is_none", alias = "companyId")]
    pub company: Option<String>,
    #[serde(alias = "electricityKWh", alias = "electricityKwh")]
    pub electricity_kwh: Option<f64>,
    #[serde(alias = "gasKg")]
    pub gas_kg: Option<f64>,
    #[serde(alias = "dieselLiters")]
    pub diesel_liters: Option<f64>,
    #[serde(alias = "gasolineLiters")]
    pub gasoline_liters: Option<f64>,
    #[serde(alias = "monthlyConsumptionLiters")]
    pub water_liters: Option<f64>,
    #[serde(alias = "totalWasteKg")]
    pub waste_kg: Option<f64>,
    #[serde(alias = "recycledWasteKg")]
    pub recycled_kg: Option<f64>,
}

impl EvaluationRequest {
    /// Check every quantity and build the validated inputs.
    pub fn validate(&self) -> InputResult<EvaluationInputs> {
        let carbon = CarbonInput::new(
            self.electricity_kwh.unwrap_or(0.0),
            self.gas_kg.unwrap_or(0.0),
            self.diesel_liters.unwrap_or(0.0),
            self.gasoline_liters.unwrap_or(0.0),
        )?;
        let water = WaterInput::new(self.water_liters.unwrap_or(0.0))?;
        let waste = WasteInput::new(
            self.waste_kg.unwrap_or(0.0),
            self.recycled_kg.unwrap_or(0.0),
        )?;
        Ok(EvaluationInputs {
            carbon,
            water,
            waste,
        })
    }
}

impl TryFrom<EvaluationRequest> for EvaluationInputs {
    type Error = InputError;

    fn try_from(request: EvaluationRequest) -> Result<Self, Self::Error> {
        request.validate()
    }
}

impl From<EvaluationInputs> for EvaluationRequest {
    fn from(inputs: EvaluationInputs) -> Self {
        Self {
            company: None,
            electricity_kwh: Some(inputs.carbon.electricity_kwh),
            gas_kg: Some(inputs.carbon.gas_kg),
            diesel_liters: Some(inputs.carbon.diesel_liters),
            gasoline_liters: Some(inputs.carbon.gasoline_liters),
            water_liters: Some(inputs.water.monthly_consumption_liters),
            waste_kg: Some(inputs.waste.total_waste_kg),
            recycled_kg: Some(inputs.waste.recycled_waste_kg),
        }
    }
}

/// Per-source emissions in tCO2e, rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionsBreakdown {
    pub gas_tons: f64,
    pub diesel_tons: f64,
    pub gasoline_tons: f64,
    pub electricity_tons: f64,
}

/// Emissions split by GHG Protocol scope
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionsResult {
    /// Direct fuel combustion
    pub scope1_tons: f64,
    /// Purchased electricity
    pub scope2_tons: f64,
    /// `scope1_tons + scope2_tons`
    pub total_tons: f64,
    pub breakdown: EmissionsBreakdown,
}

/// Sub-scores of the three assessed dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub carbon_score: u8,
    pub water_score: u8,
    pub waste_score: u8,
}

impl DimensionScores {
    /// Build scores from external values, rejecting anything above 100.
    pub fn new(carbon_score: u8, water_score: u8, waste_score: u8) -> InputResult<Self> {
        for (field, value) in [
            ("carbon", carbon_score),
            ("water", water_score),
            ("waste", waste_score),
        ] {
            if value > 100 {
                return Err(InputError::ScoreOutOfRange { field, value });
            }
        }
        Ok(Self {
            carbon_score,
            water_score,
            waste_score,
        })
    }
}

/// Performance tier, ordered `Low < Basic < Intermediate < Advanced`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Low,
    Basic,
    Intermediate,
    Advanced,
}

impl Tier {
    /// All tiers in ascending order
    pub const ALL: [Tier; 4] = [Tier::Low, Tier::Basic, Tier::Intermediate, Tier::Advanced];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Basic => "Basic",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
        }
    }

    /// One-line assessment shown in reports
    pub fn assessment(&self) -> &'static str {
        match self {
            Tier::Advanced => "Advanced environmental practices across the board",
            Tier::Intermediate => "Solid practices with room for targeted improvement",
            Tier::Basic => "First measures in place, several areas need attention",
            Tier::Low => "Environmental performance needs a structured action plan",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Output of one evaluation. Stored verbatim by the evaluation store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub emissions: EmissionsResult,
    pub scores: DimensionScores,
    /// Weighted score in [0, 100], two-decimal precision
    pub final_score: f64,
    pub tier: Tier,
}

impl EvaluationResult {
    /// Every emission figure and the final score are finite numbers.
    /// JSON has no encoding for infinities, so only such results are stored.
    pub fn is_finite(&self) -> bool {
        let e = &self.emissions;
        [
            e.scope1_tons,
            e.scope2_tons,
            e.total_tons,
            e.breakdown.gas_tons,
            e.breakdown.diesel_tons,
            e.breakdown.gasoline_tons,
            e.breakdown.electricity_tons,
            self.final_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// An evaluation as persisted for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvaluation {
    pub id: Uuid,
    pub company_id: String,
    pub created_at: DateTime<Utc>,
    pub inputs: EvaluationInputs,
    pub result: EvaluationResult,
}

impl StoredEvaluation {
    /// Stamp a scored evaluation with a fresh id and the current time
    pub fn new(
        company_id: &str,
        inputs: EvaluationInputs,
        result: EvaluationResult,
    ) -> InputResult<Self> {
        let company_id = company_id.trim();
        if company_id.is_empty() {
            return Err(InputError::Empty { field: "company" });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            created_at: Utc::now(),
            inputs,
            result,
        })
    }
}

/// Extended producer responsibility record for one product line and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRecord {
    pub id: Uuid,
    pub company_id: String,
    pub product: String,
    pub subcategory: String,
    pub year: i32,
    pub quantity_generated_kg: f64,
    pub quantity_valorized_kg: f64,
    /// `quantity_valorized_kg / quantity_generated_kg * 100`
    pub valorization_percent: f64,
    pub created_at: DateTime<Utc>,
}

impl RepRecord {
    pub fn new(
        company_id: &str,
        product: &str,
        subcategory: &str,
        year: i32,
        quantity_generated_kg: f64,
        quantity_valorized_kg: f64,
    ) -> InputResult<Self> {
        let company_id = company_id.trim();
        if company_id.is_empty() {
            return Err(InputError::Empty { field: "company" });
        }
        let product = product.trim();
        if product.is_empty() {
            return Err(InputError::Empty { field: "product" });
        }

        let generated = non_negative("quantity_generated_kg", quantity_generated_kg)?;
        if generated == 0.0 {
            return Err(InputError::NothingGenerated(generated));
        }
        let valorized = non_negative("quantity_valorized_kg", quantity_valorized_kg)?;
        if valorized > generated {
            return Err(InputError::ValorizedExceedsGenerated {
                valorized,
                generated,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            product: product.to_string(),
            subcategory: subcategory.trim().to_string(),
            year,
            quantity_generated_kg: generated,
            quantity_valorized_kg: valorized,
            valorization_percent: valorized / generated * 100.0,
            created_at: Utc::now(),
        })
    }
}
