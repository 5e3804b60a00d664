//! Investment strategy presets: named weighting profiles over the six KPI
//! categories used by the suburb scorer.
//!
//! Presets live in the process-wide [`StrategyLibrary`] resource. The library
//! seeds three built-in presets and lets the user add, edit, and activate
//! their own. Downstream systems react to library changes via Bevy change
//! detection; there is no separate notification channel.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// KPI keys
// ---------------------------------------------------------------------------

/// The six KPI categories a strategy weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kpi {
    Yield,
    Vacancy,
    Growth5y,
    SocioEconomic,
    StockOnMarket,
    Infrastructure,
}

/// Ordered list of all KPI categories for UI iteration.
pub const ALL_KPIS: [Kpi; 6] = [
    Kpi::Yield,
    Kpi::Vacancy,
    Kpi::Growth5y,
    Kpi::SocioEconomic,
    Kpi::StockOnMarket,
    Kpi::Infrastructure,
];

impl Kpi {
    /// Human-readable label for display in preset editors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yield => "Rental Yield",
            Self::Vacancy => "Vacancy Rate",
            Self::Growth5y => "5-Year Growth",
            Self::SocioEconomic => "Socio-Economic Index",
            Self::StockOnMarket => "Stock on Market",
            Self::Infrastructure => "Infrastructure",
        }
    }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// One non-negative weight per KPI category.
///
/// Weights carry no unit; consumers divide by the sum. Negative inputs are
/// clamped to zero on construction so the non-negativity invariant holds for
/// every instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub yield_: f32,
    pub vacancy: f32,
    pub growth_5y: f32,
    pub socio_economic: f32,
    pub stock_on_market: f32,
    pub infrastructure: f32,
}

impl Weights {
    /// Build a weight set, clamping negative inputs to zero.
    pub fn new(
        yield_: f32,
        vacancy: f32,
        growth_5y: f32,
        socio_economic: f32,
        stock_on_market: f32,
        infrastructure: f32,
    ) -> Self {
        Self {
            yield_: yield_.max(0.0),
            vacancy: vacancy.max(0.0),
            growth_5y: growth_5y.max(0.0),
            socio_economic: socio_economic.max(0.0),
            stock_on_market: stock_on_market.max(0.0),
            infrastructure: infrastructure.max(0.0),
        }
    }

    /// An equal weighting across all six KPIs.
    pub fn uniform() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0)
    }

    pub fn get(&self, kpi: Kpi) -> f32 {
        match kpi {
            Kpi::Yield => self.yield_,
            Kpi::Vacancy => self.vacancy,
            Kpi::Growth5y => self.growth_5y,
            Kpi::SocioEconomic => self.socio_economic,
            Kpi::StockOnMarket => self.stock_on_market,
            Kpi::Infrastructure => self.infrastructure,
        }
    }

    pub fn sum(&self) -> f32 {
        ALL_KPIS.iter().map(|&k| self.get(k)).sum()
    }

    /// Weights scaled so they sum to 1. An all-zero set normalizes to the
    /// uniform weighting rather than dividing by zero.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum <= f32::EPSILON {
            let w = 1.0 / ALL_KPIS.len() as f32;
            return Self::new(w, w, w, w, w, w);
        }
        Self::new(
            self.yield_ / sum,
            self.vacancy / sum,
            self.growth_5y / sum,
            self.socio_economic / sum,
            self.stock_on_market / sum,
            self.infrastructure / sum,
        )
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::uniform()
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    CashFlow,
    CapitalGrowth,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

/// The investor-facing description of a preset: what it optimizes for, how
/// much risk it tolerates, and over what holding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub goal: Goal,
    pub risk: Risk,
    pub horizon: Horizon,
}

// ---------------------------------------------------------------------------
// Presets and the library
// ---------------------------------------------------------------------------

/// A named weighting profile over the KPI categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPreset {
    pub id: u64,
    pub name: String,
    pub profile: StrategyProfile,
    pub weights: Weights,
}

/// Process-wide list of strategy presets plus the active selection.
///
/// Mutations go through `ResMut<StrategyLibrary>`; the scoring system picks
/// them up through change detection on the next frame.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct StrategyLibrary {
    presets: Vec<StrategyPreset>,
    active_id: u64,
    next_id: u64,
}

impl Default for StrategyLibrary {
    fn default() -> Self {
        let presets = vec![
            StrategyPreset {
                id: 1,
                name: "Cash Flow Focus".to_string(),
                profile: StrategyProfile {
                    goal: Goal::CashFlow,
                    risk: Risk::Low,
                    horizon: Horizon::Short,
                },
                weights: Weights::new(35.0, 15.0, 10.0, 10.0, 15.0, 15.0),
            },
            StrategyPreset {
                id: 2,
                name: "Long-Term Growth".to_string(),
                profile: StrategyProfile {
                    goal: Goal::CapitalGrowth,
                    risk: Risk::Medium,
                    horizon: Horizon::Long,
                },
                weights: Weights::new(25.0, 10.0, 30.0, 15.0, 10.0, 10.0),
            },
            StrategyPreset {
                id: 3,
                name: "Balanced".to_string(),
                profile: StrategyProfile {
                    goal: Goal::Balanced,
                    risk: Risk::Medium,
                    horizon: Horizon::Medium,
                },
                weights: Weights::new(20.0, 15.0, 20.0, 15.0, 15.0, 15.0),
            },
        ];
        Self {
            presets,
            active_id: 1,
            next_id: 4,
        }
    }
}

impl StrategyLibrary {
    pub fn presets(&self) -> &[StrategyPreset] {
        &self.presets
    }

    pub fn get(&self, id: u64) -> Option<&StrategyPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// The currently active preset. Falls back to the first preset if the
    /// active id was removed; `None` only for an empty library.
    pub fn active(&self) -> Option<&StrategyPreset> {
        self.get(self.active_id).or_else(|| self.presets.first())
    }

    /// Add a user preset, assigning it a fresh id. Returns the id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        profile: StrategyProfile,
        weights: Weights,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.presets.push(StrategyPreset {
            id,
            name: name.into(),
            profile,
            weights,
        });
        id
    }

    /// Replace an existing preset in place. Unknown ids are a no-op.
    pub fn upsert(&mut self, preset: StrategyPreset) {
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(slot) => *slot = preset,
            None => self.presets.push(preset),
        }
    }

    /// Remove a preset. Removing the active preset falls back to the first
    /// remaining one.
    pub fn remove(&mut self, id: u64) {
        self.presets.retain(|p| p.id != id);
        if self.active_id == id {
            self.active_id = self.presets.first().map(|p| p.id).unwrap_or(0);
        }
    }

    /// Activate a preset by id. Unknown ids are a no-op.
    pub fn set_active(&mut self, id: u64) {
        if self.get(id).is_some() {
            self.active_id = id;
        }
    }

    /// Export the library (user edits included) as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Import a library previously produced by [`Self::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
