//! Crisis shock definitions.
//!
//! A [`ShockTable`] maps each [`AssetType`] to an ordered list of named
//! crisis shocks. Each shock is the total proportional price change the crisis
//! is assumed to cause (e.g. -0.50 for a 50% drawdown).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tailrisk_core::{AssetType, RiskError, RiskResult};

/// A named crisis and its total proportional price shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisShock {
    /// Crisis name.
    pub name: String,
    /// Total proportional price change (negative = price drop).
    pub shock: f64,
}

impl CrisisShock {
    /// Creates a new crisis shock.
    #[must_use]
    pub fn new(name: impl Into<String>, shock: f64) -> Self {
        Self {
            name: name.into(),
            shock,
        }
    }

    /// Shock as a percentage (e.g., -0.50 = -50%).
    #[must_use]
    pub fn shock_percent(&self) -> f64 {
        self.shock * 100.0
    }
}

/// The crises chosen for one stress run, in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedShocks {
    /// Asset type the shocks were drawn from.
    pub asset_type: AssetType,
    /// Selected shocks in application order.
    pub shocks: Vec<CrisisShock>,
}

impl SelectedShocks {
    /// Number of selected crises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shocks.len()
    }

    /// True if no crisis was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shocks.is_empty()
    }

    /// Iterates over the selected shocks.
    pub fn iter(&self) -> impl Iterator<Item = &CrisisShock> {
        self.shocks.iter()
    }

    /// Names of the selected crises.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.shocks.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Reference table of crisis shocks per asset type.
///
/// Crisis order within an asset type is preserved; positional selection
/// (`select_by_position`) numbers crises from 1 in that order.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::AssetType;
/// use tailrisk_risk::stress::ShockTable;
///
/// let table = ShockTable::standard();
/// let selected = table
///     .select(AssetType::Oil, &["2008 Financial Crisis"])
///     .unwrap();
/// assert_eq!(selected.shocks[0].shock, -0.60);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShockTable {
    entries: BTreeMap<AssetType, Vec<CrisisShock>>,
}

impl ShockTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of five historical crises per asset type.
    #[must_use]
    pub fn standard() -> Self {
        standard::table()
    }

    /// Sets the crisis list for an asset type, replacing any previous list.
    #[must_use]
    pub fn with_asset(mut self, asset_type: AssetType, crises: Vec<CrisisShock>) -> Self {
        self.entries.insert(asset_type, crises);
        self
    }

    /// Asset types present in the table.
    pub fn asset_types(&self) -> impl Iterator<Item = AssetType> + '_ {
        self.entries.keys().copied()
    }

    /// The ordered crisis list for an asset type.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::UnknownAssetType` if the table has no entry for it.
    pub fn crises(&self, asset_type: AssetType) -> RiskResult<&[CrisisShock]> {
        self.entries
            .get(&asset_type)
            .map(Vec::as_slice)
            .ok_or_else(|| RiskError::unknown_asset_type(asset_type.as_str()))
    }

    /// Looks up one crisis shock by name.
    pub fn shock(&self, asset_type: AssetType, crisis: &str) -> RiskResult<&CrisisShock> {
        self.crises(asset_type)?
            .iter()
            .find(|c| c.name == crisis)
            .ok_or_else(|| RiskError::unknown_crisis(asset_type.as_str(), crisis))
    }

    /// Selects crises by name, keeping the requested order.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::UnknownAssetType` or `RiskError::UnknownCrisis`
    /// if a lookup fails.
    pub fn select<S: AsRef<str>>(
        &self,
        asset_type: AssetType,
        crisis_names: &[S],
    ) -> RiskResult<SelectedShocks> {
        let shocks = crisis_names
            .iter()
            .map(|name| self.shock(asset_type, name.as_ref()).cloned())
            .collect::<RiskResult<Vec<_>>>()?;

        Ok(SelectedShocks { asset_type, shocks })
    }

    /// Selects crises by their 1-based position in the asset type's list.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::UnknownAssetType` if the asset type is missing and
    /// `RiskError::InvalidParameter` for a position outside `1..=len`.
    pub fn select_by_position(
        &self,
        asset_type: AssetType,
        positions: &[usize],
    ) -> RiskResult<SelectedShocks> {
        let crises = self.crises(asset_type)?;
        let shocks = positions
            .iter()
            .map(|&pos| {
                pos.checked_sub(1)
                    .and_then(|idx| crises.get(idx))
                    .cloned()
                    .ok_or_else(|| {
                        RiskError::invalid_parameter(
                            "crisis",
                            format!(
                                "position {pos} is outside 1..={} for asset type {asset_type}",
                                crises.len()
                            ),
                        )
                    })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        Ok(SelectedShocks { asset_type, shocks })
    }
}

/// Standard crisis shocks.
pub mod standard {
    use super::*;

    /// 2008 Financial Crisis.
    pub const GFC_2008: &str = "2008 Financial Crisis";
    /// COVID-19 Market Crash.
    pub const COVID_19: &str = "COVID-19 Market Crash";
    /// Dot-com Bubble.
    pub const DOT_COM: &str = "Dot-com Bubble";
    /// Black Monday 1987.
    pub const BLACK_MONDAY_1987: &str = "Black Monday 1987";
    /// Asian Financial Crisis 1997.
    pub const ASIAN_CRISIS_1997: &str = "Asian Financial Crisis 1997";

    /// Shocks for stocks.
    #[must_use]
    pub fn stock() -> Vec<CrisisShock> {
        vec![
            CrisisShock::new(GFC_2008, -0.50),
            CrisisShock::new(COVID_19, -0.35),
            CrisisShock::new(DOT_COM, -0.40),
            CrisisShock::new(BLACK_MONDAY_1987, -0.22),
            CrisisShock::new(ASIAN_CRISIS_1997, -0.35),
        ]
    }

    /// Shocks for commodities.
    #[must_use]
    pub fn commodity() -> Vec<CrisisShock> {
        vec![
            CrisisShock::new(GFC_2008, -0.40),
            CrisisShock::new(COVID_19, -0.25),
            CrisisShock::new(DOT_COM, -0.30),
            CrisisShock::new(BLACK_MONDAY_1987, -0.15),
            CrisisShock::new(ASIAN_CRISIS_1997, -0.30),
        ]
    }

    /// Shocks for oil.
    #[must_use]
    pub fn oil() -> Vec<CrisisShock> {
        vec![
            CrisisShock::new(GFC_2008, -0.60),
            CrisisShock::new(COVID_19, -0.45),
            CrisisShock::new(DOT_COM, -0.35),
            CrisisShock::new(BLACK_MONDAY_1987, -0.20),
            CrisisShock::new(ASIAN_CRISIS_1997, -0.40),
        ]
    }

    /// The full standard table.
    #[must_use]
    pub fn table() -> ShockTable {
        ShockTable::new()
            .with_asset(AssetType::Stock, stock())
            .with_asset(AssetType::Commodity, commodity())
            .with_asset(AssetType::Oil, oil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_has_five_crises_per_asset() {
        let table = ShockTable::standard();
        for asset in AssetType::ALL {
            let crises = table.crises(asset).unwrap();
            assert_eq!(crises.len(), 5);
            assert!(crises.iter().all(|c| c.shock < 0.0));
        }
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let table = ShockTable::standard();
        let selected = table
            .select(AssetType::Stock, &[standard::DOT_COM, standard::GFC_2008])
            .unwrap();
        assert_eq!(selected.names(), vec![standard::DOT_COM, standard::GFC_2008]);
        assert_eq!(selected.shocks[0].shock, -0.40);
        assert_eq!(selected.shocks[1].shock, -0.50);
    }

    #[test]
    fn test_select_unknown_crisis() {
        let table = ShockTable::standard();
        let err = table
            .select(AssetType::Commodity, &["Tulip Mania"])
            .unwrap_err();
        assert_eq!(err, RiskError::unknown_crisis("commodity", "Tulip Mania"));
    }

    #[test]
    fn test_select_unknown_asset_type() {
        let table = ShockTable::new().with_asset(AssetType::Stock, standard::stock());
        let err = table.select(AssetType::Oil, &[standard::GFC_2008]).unwrap_err();
        assert_eq!(err, RiskError::unknown_asset_type("oil"));
    }

    #[test]
    fn test_select_by_position_is_one_based() {
        let table = ShockTable::standard();
        let selected = table.select_by_position(AssetType::Oil, &[1, 3]).unwrap();
        assert_eq!(selected.names(), vec![standard::GFC_2008, standard::DOT_COM]);
        assert_eq!(selected.shocks[1].shock, -0.35);
    }

    #[test]
    fn test_select_by_position_out_of_range() {
        let table = ShockTable::standard();
        assert!(matches!(
            table.select_by_position(AssetType::Oil, &[0]),
            Err(RiskError::InvalidParameter { .. })
        ));
        assert!(matches!(
            table.select_by_position(AssetType::Oil, &[6]),
            Err(RiskError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_selection_is_allowed() {
        let table = ShockTable::standard();
        let selected = table.select::<&str>(AssetType::Stock, &[]).unwrap();
        assert!(selected.is_empty());
    }
}
