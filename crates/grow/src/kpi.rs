//! Mock KPI snapshots for the suburb click payload.
//!
//! Until the real data pipeline lands, KPI values are derived from xxh32 of
//! the suburb identifier under per-field seeds, so every suburb presents
//! stable, plausible-looking numbers across sessions.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

const SEED_YIELD: u32 = 0x01;
const SEED_VACANCY: u32 = 0x02;
const SEED_GROWTH: u32 = 0x03;
const SEED_SEIFA: u32 = 0x04;
const SEED_STOCK: u32 = 0x05;
const SEED_INFRA: u32 = 0x06;

/// The KPI block shown in the suburb click popup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Gross rental yield, percent.
    pub yield_pct: f32,
    /// Rental vacancy rate, percent.
    pub vacancy_pct: f32,
    /// Five-year price growth, percent.
    pub growth_5y_pct: f32,
    /// Socio-economic index (SEIFA-style, ~850–1150).
    pub socio_economic_index: u16,
    /// Stock on market, percent of dwellings listed.
    pub stock_on_market_pct: f32,
    /// Infrastructure score, 0–100.
    pub infrastructure_score: u8,
}

/// Map a field hash into `[lo, hi]` with two decimal places of resolution.
fn scaled(id: &str, seed: u32, lo: f32, hi: f32) -> f32 {
    let unit = (xxh32(id.as_bytes(), seed) % 10_000) as f32 / 10_000.0;
    lo + unit * (hi - lo)
}

impl KpiSnapshot {
    /// Deterministic mock values for a suburb identifier.
    pub fn mock_for(id: &str) -> Self {
        Self {
            yield_pct: scaled(id, SEED_YIELD, 2.0, 7.0),
            vacancy_pct: scaled(id, SEED_VACANCY, 0.5, 4.5),
            growth_5y_pct: scaled(id, SEED_GROWTH, -5.0, 60.0),
            socio_economic_index: 850 + (xxh32(id.as_bytes(), SEED_SEIFA) % 300) as u16,
            stock_on_market_pct: scaled(id, SEED_STOCK, 0.5, 3.5),
            infrastructure_score: (xxh32(id.as_bytes(), SEED_INFRA) % 101) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_are_deterministic() {
        assert_eq!(KpiSnapshot::mock_for("3056"), KpiSnapshot::mock_for("3056"));
    }

    #[test]
    fn different_suburbs_get_different_numbers() {
        assert_ne!(KpiSnapshot::mock_for("3056"), KpiSnapshot::mock_for("3058"));
    }

    #[test]
    fn values_stay_in_plausible_ranges() {
        for id in ["3056", "3058", "3065", "2000", "6000", "0800"] {
            let k = KpiSnapshot::mock_for(id);
            assert!((2.0..=7.0).contains(&k.yield_pct));
            assert!((0.5..=4.5).contains(&k.vacancy_pct));
            assert!((-5.0..=60.0).contains(&k.growth_5y_pct));
            assert!((850..=1150).contains(&k.socio_economic_index));
            assert!((0.5..=3.5).contains(&k.stock_on_market_pct));
            assert!(k.infrastructure_score <= 100);
        }
    }
}
