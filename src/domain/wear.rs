//! Wear float mapping between trade-up materials and the crafted output.
//!
//! - Forward mapping interpolates a material float linearly into the output range.
//! - Inverse mapping answers the highest material float that still lands at or
//!   below a target output float.
//! - Restricted output profiles (two-tier finishes) reuse the same arithmetic with
//!   different operands.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of decimal places mapped floats are rounded to.
pub const FLOAT_DECIMALS: i32 = 6;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum MappingError {
    #[error("no wear configuration for {0}")]
    UnknownIdentifier(String),
    #[error("degenerate wear range [{min}, {max}]")]
    DegenerateRange { min: f64, max: f64 },
    #[error("target float {target} is below the reachable floor {floor}")]
    UnreachableTarget { target: f64, floor: f64 },
    #[error("wear value is not a number")]
    InvalidWear,
    #[error("no materials selected")]
    EmptySelection,
}

/// Closed `[min, max]` float span of a material or an output family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WearRange {
    pub min: f64,
    pub max: f64,
}

impl WearRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Also true when either bound is NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn checked(self) -> Result<Self, MappingError> {
        if self.is_degenerate() {
            Err(MappingError::DegenerateRange {
                min: self.min,
                max: self.max,
            })
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for WearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2} ~ {:.2}]", self.min, self.max)
    }
}

/// Exterior condition buckets, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::FactoryNew,
        Tier::MinimalWear,
        Tier::FieldTested,
        Tier::WellWorn,
        Tier::BattleScarred,
    ];

    /// Suffix used by market hash names, e.g. `Field-Tested`.
    pub fn market_suffix(&self) -> &'static str {
        match self {
            Tier::FactoryNew => "Factory New",
            Tier::MinimalWear => "Minimal Wear",
            Tier::FieldTested => "Field-Tested",
            Tier::WellWorn => "Well-Worn",
            Tier::BattleScarred => "Battle-Scarred",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Tier::FactoryNew => "FN",
            Tier::MinimalWear => "MW",
            Tier::FieldTested => "FT",
            Tier::WellWorn => "WW",
            Tier::BattleScarred => "BS",
        }
    }

    /// Localized label shown next to prices.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::FactoryNew => "崭新出厂 (FN)",
            Tier::MinimalWear => "略有磨损 (MW)",
            Tier::FieldTested => "久经沙场 (FT)",
            Tier::WellWorn => "破损不堪 (WW)",
            Tier::BattleScarred => "战痕累累 (BS)",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.market_suffix())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown tier '{0}' (expected one of fn, mw, ft, ww, bs)")]
pub struct ParseTierError(String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Tier::ALL
            .into_iter()
            .find(|tier| {
                normalized == tier.code().to_ascii_lowercase()
                    || normalized == tier.market_suffix().to_ascii_lowercase().replace('-', " ")
            })
            .ok_or_else(|| ParseTierError(raw.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierBand {
    pub tier: Tier,
    pub low: f64,
    pub high: f64,
}

impl TierBand {
    pub const fn new(tier: Tier, low: f64, high: f64) -> Self {
        Self { tier, low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Ordered tier bands. Lookups scan in declaration order, so a float sitting on a
/// shared boundary belongs to the earlier band.
#[derive(Clone, Debug, PartialEq)]
pub struct TierTable {
    bands: Vec<TierBand>,
}

impl TierTable {
    pub fn new(bands: Vec<TierBand>) -> Self {
        Self { bands }
    }

    pub fn classify(&self, wear: f64) -> Option<Tier> {
        self.bands
            .iter()
            .find(|band| band.contains(wear))
            .map(|band| band.tier)
    }

    pub fn band(&self, tier: Tier) -> Option<&TierBand> {
        self.bands.iter().find(|band| band.tier == tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierBand> {
        self.bands.iter()
    }

    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.bands.iter().map(|band| band.tier)
    }
}

/// Output float range together with the tier table that partitions it.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputProfile {
    pub range: WearRange,
    pub tiers: TierTable,
}

impl OutputProfile {
    pub fn new(range: WearRange, tiers: TierTable) -> Self {
        Self { range, tiers }
    }
}

/// Which output profile of a family to map against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeMode {
    #[default]
    Standard,
    Restricted,
}

impl RangeMode {
    pub fn from_flag(restricted: bool) -> Self {
        if restricted {
            RangeMode::Restricted
        } else {
            RangeMode::Standard
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: String,
    pub range: WearRange,
}

impl Material {
    pub fn new(id: impl Into<String>, range: WearRange) -> Self {
        Self {
            id: id.into(),
            range,
        }
    }
}

/// A caller-chosen material and its float.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSelection {
    pub material_id: String,
    pub wear: f64,
}

impl MaterialSelection {
    pub fn new(material_id: impl Into<String>, wear: f64) -> Self {
        Self {
            material_id: material_id.into(),
            wear,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MappedMaterial {
    pub material_id: String,
    pub input_wear: f64,
    pub output_wear: f64,
}

/// Preview of a full trade-up: every selection mapped and the averaged result.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedWear {
    pub rows: Vec<MappedMaterial>,
    pub average: f64,
    pub tier: Option<Tier>,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("material {id} has degenerate range {range}")]
    DegenerateMaterial { id: String, range: WearRange },
    #[error("{mode:?} output range {range} is degenerate")]
    DegenerateOutput { mode: RangeMode, range: WearRange },
    #[error("{mode:?} tier table is empty")]
    EmptyTierTable { mode: RangeMode },
    #[error("{mode:?} tier table does not span {range}")]
    TierSpanMismatch { mode: RangeMode, range: WearRange },
    #[error("{mode:?} tier {previous} ends at {end} but {next} starts at {start}")]
    TierGap {
        mode: RangeMode,
        previous: Tier,
        end: f64,
        next: Tier,
        start: f64,
    },
}

/// Stateless mapping engine for one trade-up family.
#[derive(Clone, Debug, PartialEq)]
pub struct WearEngine {
    materials: Vec<Material>,
    standard: OutputProfile,
    restricted: Option<OutputProfile>,
}

impl WearEngine {
    pub fn new(materials: Vec<Material>, standard: OutputProfile) -> Self {
        Self {
            materials,
            standard,
            restricted: None,
        }
    }

    pub fn with_restricted(mut self, restricted: OutputProfile) -> Self {
        self.restricted = Some(restricted);
        self
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material_range(&self, material_id: &str) -> Result<WearRange, MappingError> {
        self.materials
            .iter()
            .find(|material| material.id == material_id)
            .map(|material| material.range)
            .ok_or_else(|| MappingError::UnknownIdentifier(material_id.to_string()))
    }

    pub fn profile(&self, mode: RangeMode) -> Result<&OutputProfile, MappingError> {
        match mode {
            RangeMode::Standard => Ok(&self.standard),
            RangeMode::Restricted => self
                .restricted
                .as_ref()
                .ok_or_else(|| MappingError::UnknownIdentifier("restricted output range".into())),
        }
    }

    /// Material float to output float on the standard profile.
    pub fn forward_map(&self, material_id: &str, wear: f64) -> Result<f64, MappingError> {
        let material = self.material_range(material_id)?;
        map_into(material, wear, self.standard.range)
    }

    pub fn classify_tier(&self, output_wear: f64) -> Option<Tier> {
        classify_tier(output_wear, &self.standard.tiers)
    }

    /// Highest material float whose mapped output stays at or below `target_max`.
    pub fn inverse_map(
        &self,
        material_id: &str,
        target_max: f64,
        mode: RangeMode,
    ) -> Result<f64, MappingError> {
        let material = self.material_range(material_id)?;
        let output = self.profile(mode)?.range;
        invert_from(material, target_max, output)
    }

    /// [`Self::inverse_map`] against the upper bound of `tier` in the active table.
    pub fn inverse_for_tier(
        &self,
        material_id: &str,
        tier: Tier,
        mode: RangeMode,
    ) -> Result<f64, MappingError> {
        let band = self
            .profile(mode)?
            .tiers
            .band(tier)
            .ok_or_else(|| MappingError::UnknownIdentifier(format!("tier {tier}")))?;
        self.inverse_map(material_id, band.high, mode)
    }

    pub fn combine(&self, selections: &[MaterialSelection]) -> Result<CombinedWear, MappingError> {
        if selections.is_empty() {
            return Err(MappingError::EmptySelection);
        }

        let rows = selections
            .iter()
            .map(|selection| {
                self.forward_map(&selection.material_id, selection.wear)
                    .map(|output_wear| MappedMaterial {
                        material_id: selection.material_id.clone(),
                        input_wear: selection.wear,
                        output_wear,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let average = rows.iter().map(|row| row.output_wear).sum::<f64>() / rows.len() as f64;
        Ok(CombinedWear {
            tier: self.classify_tier(average),
            rows,
            average,
        })
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues: Vec<ConfigIssue> = self
            .materials
            .iter()
            .filter(|material| material.range.is_degenerate())
            .map(|material| ConfigIssue::DegenerateMaterial {
                id: material.id.clone(),
                range: material.range,
            })
            .collect();

        validate_profile(&self.standard, RangeMode::Standard, &mut issues);
        if let Some(restricted) = &self.restricted {
            validate_profile(restricted, RangeMode::Restricted, &mut issues);
        }
        issues
    }
}

fn validate_profile(profile: &OutputProfile, mode: RangeMode, issues: &mut Vec<ConfigIssue>) {
    let range = profile.range;
    if range.is_degenerate() {
        issues.push(ConfigIssue::DegenerateOutput { mode, range });
    }

    let bands: Vec<&TierBand> = profile.tiers.iter().collect();
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        issues.push(ConfigIssue::EmptyTierTable { mode });
        return;
    };

    if first.low != range.min || last.high != range.max {
        issues.push(ConfigIssue::TierSpanMismatch { mode, range });
    }

    for pair in bands.windows(2) {
        if pair[0].high != pair[1].low {
            issues.push(ConfigIssue::TierGap {
                mode,
                previous: pair[0].tier,
                end: pair[0].high,
                next: pair[1].tier,
                start: pair[1].low,
            });
        }
    }
}

/// First band in table order whose closed interval holds `wear`.
pub fn classify_tier(wear: f64, table: &TierTable) -> Option<Tier> {
    table.classify(wear)
}

/// Linear interpolation of `wear` from `material` into `output`.
///
/// Out-of-range input is clamped to the nearest material bound first.
pub fn map_into(material: WearRange, wear: f64, output: WearRange) -> Result<f64, MappingError> {
    let material = material.checked()?;
    let output = output.checked()?;
    if wear.is_nan() {
        return Err(MappingError::InvalidWear);
    }

    let position = (material.clamp(wear) - material.min) / material.span();
    let mapped = output.clamp(output.min + position * output.span());
    Ok(output.clamp(round_float(mapped)))
}

/// Inverse of [`map_into`] for an upper output bound.
pub fn invert_from(
    material: WearRange,
    target_max: f64,
    output: WearRange,
) -> Result<f64, MappingError> {
    let output = output.checked()?;
    let material = material.checked()?;
    let ratio = (target_max - output.min) / output.span();
    if ratio.is_nan() || ratio < 0.0 {
        return Err(MappingError::UnreachableTarget {
            target: target_max,
            floor: output.min,
        });
    }

    let ratio = ratio.min(1.0);
    Ok((material.min + ratio * material.span()).min(material.max))
}

pub fn round_float(value: f64) -> f64 {
    let scale = 10_f64.powi(FLOAT_DECIMALS);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn five_tiers(min: f64, max: f64) -> TierTable {
        TierTable::new(vec![
            TierBand::new(Tier::FactoryNew, min, 0.07),
            TierBand::new(Tier::MinimalWear, 0.07, 0.15),
            TierBand::new(Tier::FieldTested, 0.15, 0.38),
            TierBand::new(Tier::WellWorn, 0.38, 0.45),
            TierBand::new(Tier::BattleScarred, 0.45, max),
        ])
    }

    fn restricted_profile() -> OutputProfile {
        OutputProfile::new(
            WearRange::new(0.0, 0.08),
            TierTable::new(vec![
                TierBand::new(Tier::FactoryNew, 0.0, 0.07),
                TierBand::new(Tier::MinimalWear, 0.07, 0.08),
            ]),
        )
    }

    fn engine() -> WearEngine {
        WearEngine::new(
            vec![
                Material::new("unit", WearRange::new(0.0, 1.0)),
                Material::new("short", WearRange::new(0.0, 0.80)),
                Material::new("narrow", WearRange::new(0.0, 0.65)),
                Material::new("offset", WearRange::new(0.1, 0.9)),
            ],
            OutputProfile::new(WearRange::new(0.0, 1.0), five_tiers(0.0, 1.0)),
        )
        .with_restricted(restricted_profile())
    }

    fn glove_engine() -> WearEngine {
        WearEngine::new(
            vec![
                Material::new("short", WearRange::new(0.0, 0.80)),
                Material::new("narrow", WearRange::new(0.0, 0.65)),
            ],
            OutputProfile::new(WearRange::new(0.06, 0.80), five_tiers(0.06, 0.80)),
        )
    }

    fn sample_wears() -> Vec<f64> {
        let mut wears: Vec<f64> = (0..=400).map(|step| -0.5 + step as f64 * 0.005).collect();
        wears.extend([f64::INFINITY, f64::NEG_INFINITY, 0.07, 0.15, 0.38, 0.45]);
        wears
    }

    #[test]
    fn forward_map_identity_ranges() {
        assert_eq!(engine().forward_map("unit", 0.5), Ok(0.5));
    }

    #[test]
    fn forward_map_interpolates_into_glove_range() {
        let mapped = glove_engine().forward_map("short", 0.4).unwrap();
        assert!((mapped - 0.43).abs() < TOLERANCE, "got {mapped}");
    }

    #[test]
    fn forward_map_stays_in_output_range_and_is_rounded() {
        for engine in [engine(), glove_engine()] {
            let output = engine.profile(RangeMode::Standard).unwrap().range;
            for material in engine.materials() {
                for wear in sample_wears() {
                    let mapped = engine.forward_map(&material.id, wear).unwrap();
                    assert!(mapped.is_finite());
                    assert!(output.contains(mapped), "{wear} -> {mapped} outside {output}");
                    assert_eq!(mapped, round_float(mapped));
                }
            }
        }
    }

    #[test]
    fn forward_map_clamps_out_of_range_input() {
        let engine = engine();
        assert_eq!(engine.forward_map("short", 5.0), Ok(1.0));
        assert_eq!(engine.forward_map("short", -3.0), Ok(0.0));
        assert_eq!(engine.forward_map("offset", 0.0), Ok(0.0));
    }

    #[test]
    fn forward_map_rejects_nan() {
        assert_eq!(
            engine().forward_map("unit", f64::NAN),
            Err(MappingError::InvalidWear)
        );
        assert!(matches!(
            engine().inverse_map("unit", f64::NAN, RangeMode::Standard),
            Err(MappingError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn unknown_material_is_distinct_from_edge_values() {
        let engine = engine();
        assert_eq!(
            engine.forward_map("missing", 0.5),
            Err(MappingError::UnknownIdentifier("missing".into()))
        );
        assert_eq!(engine.forward_map("unit", 0.0), Ok(0.0));
        assert!(matches!(
            engine.inverse_map("missing", 0.07, RangeMode::Standard),
            Err(MappingError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn mapped_floats_always_classify() {
        for engine in [engine(), glove_engine()] {
            for material in engine.materials() {
                for wear in sample_wears() {
                    let mapped = engine.forward_map(&material.id, wear).unwrap();
                    assert!(
                        engine.classify_tier(mapped).is_some(),
                        "{} @ {wear} -> {mapped} has no tier",
                        material.id
                    );
                }
            }
        }
    }

    #[test]
    fn boundary_floats_resolve_to_earlier_tier() {
        let table = five_tiers(0.0, 1.0);
        for _ in 0..3 {
            assert_eq!(classify_tier(0.07, &table), Some(Tier::FactoryNew));
            assert_eq!(classify_tier(0.15, &table), Some(Tier::MinimalWear));
            assert_eq!(classify_tier(0.38, &table), Some(Tier::FieldTested));
            assert_eq!(classify_tier(0.45, &table), Some(Tier::WellWorn));
        }
        assert_eq!(classify_tier(0.0, &table), Some(Tier::FactoryNew));
        assert_eq!(classify_tier(1.0, &table), Some(Tier::BattleScarred));
    }

    #[test]
    fn classify_outside_table_is_none() {
        let table = five_tiers(0.06, 0.80);
        assert_eq!(classify_tier(0.05, &table), None);
        assert_eq!(classify_tier(0.81, &table), None);
        assert_eq!(classify_tier(f64::NAN, &table), None);
    }

    #[test]
    fn inverse_map_first_tier_scenario() {
        let wear = engine()
            .inverse_map("short", 0.07, RangeMode::Standard)
            .unwrap();
        assert!((wear - 0.056).abs() < TOLERANCE, "got {wear}");
    }

    #[test]
    fn inverse_map_restricted_clamps_ratio() {
        assert_eq!(
            engine().inverse_map("unit", 0.08, RangeMode::Restricted),
            Ok(1.0)
        );
    }

    #[test]
    fn inverse_map_target_above_ceiling_returns_material_max() {
        assert_eq!(
            engine().inverse_map("short", 3.0, RangeMode::Standard),
            Ok(0.80)
        );
    }

    #[test]
    fn inverse_map_below_floor_is_unreachable() {
        assert_eq!(
            glove_engine().inverse_map("short", 0.05, RangeMode::Standard),
            Err(MappingError::UnreachableTarget {
                target: 0.05,
                floor: 0.06
            })
        );
    }

    #[test]
    fn inverse_round_trip_is_supremum() {
        let step = 1e-3;
        for engine in [engine(), glove_engine()] {
            let profile = engine.profile(RangeMode::Standard).unwrap().clone();
            for material in engine.materials() {
                for band in profile.tiers.iter().filter(|band| band.high < profile.range.max) {
                    let bound = engine
                        .inverse_map(&material.id, band.high, RangeMode::Standard)
                        .unwrap();
                    let mapped = engine.forward_map(&material.id, bound).unwrap();
                    assert!(mapped <= band.high + 1e-6, "{mapped} > {}", band.high);

                    let over = engine.forward_map(&material.id, bound + step).unwrap();
                    assert!(over > band.high, "{over} should exceed {}", band.high);
                }
            }
        }
    }

    #[test]
    fn inverse_for_tier_uses_band_upper_bound() {
        let engine = engine();
        assert_eq!(
            engine.inverse_for_tier("short", Tier::FactoryNew, RangeMode::Standard),
            engine.inverse_map("short", 0.07, RangeMode::Standard)
        );
        assert!(matches!(
            engine.inverse_for_tier("short", Tier::FieldTested, RangeMode::Restricted),
            Err(MappingError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn restricted_mode_matches_equivalent_standard_engine() {
        let restricted = engine();
        let standard = WearEngine::new(restricted.materials().to_vec(), restricted_profile());
        for material in restricted.materials() {
            for target in [0.0, 0.01, 0.05, 0.07, 0.075, 0.08, 0.2] {
                assert_eq!(
                    restricted.inverse_map(&material.id, target, RangeMode::Restricted),
                    standard.inverse_map(&material.id, target, RangeMode::Standard)
                );
            }
        }
    }

    #[test]
    fn restricted_mode_without_profile_is_unknown() {
        assert!(matches!(
            glove_engine().inverse_map("short", 0.07, RangeMode::Restricted),
            Err(MappingError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn degenerate_ranges_never_produce_numbers() {
        let degenerate = WearEngine::new(
            vec![
                Material::new("flat", WearRange::new(0.3, 0.3)),
                Material::new("inverted", WearRange::new(0.9, 0.1)),
                Material::new("nan", WearRange::new(f64::NAN, 1.0)),
            ],
            OutputProfile::new(WearRange::new(0.0, 1.0), five_tiers(0.0, 1.0)),
        );
        for material in degenerate.materials() {
            for wear in sample_wears() {
                assert!(matches!(
                    degenerate.forward_map(&material.id, wear),
                    Err(MappingError::DegenerateRange { .. })
                ));
                assert!(matches!(
                    degenerate.inverse_map(&material.id, wear, RangeMode::Standard),
                    Err(MappingError::DegenerateRange { .. }) | Err(MappingError::InvalidWear)
                ));
            }
        }

        let flat_output = WearEngine::new(
            vec![Material::new("unit", WearRange::new(0.0, 1.0))],
            OutputProfile::new(WearRange::new(0.5, 0.5), five_tiers(0.5, 0.5)),
        );
        for wear in sample_wears() {
            assert!(matches!(
                flat_output.forward_map("unit", wear),
                Err(MappingError::DegenerateRange { .. })
            ));
            assert!(matches!(
                flat_output.inverse_map("unit", wear, RangeMode::Standard),
                Err(MappingError::DegenerateRange { .. })
            ));
        }
    }

    #[test]
    fn combine_averages_mapped_floats() {
        let engine = glove_engine();
        let combined = engine
            .combine(&[
                MaterialSelection::new("short", 0.0),
                MaterialSelection::new("short", 0.8),
                MaterialSelection::new("narrow", 0.0),
                MaterialSelection::new("narrow", 0.0),
                MaterialSelection::new("short", 0.0),
            ])
            .unwrap();
        assert_eq!(combined.rows.len(), 5);
        assert!((combined.average - 0.208).abs() < TOLERANCE);
        assert_eq!(combined.tier, Some(Tier::FieldTested));
    }

    #[test]
    fn combine_reports_first_failure() {
        let engine = glove_engine();
        assert_eq!(
            engine.combine(&[
                MaterialSelection::new("short", 0.1),
                MaterialSelection::new("ghost", 0.1),
            ]),
            Err(MappingError::UnknownIdentifier("ghost".into()))
        );
        assert_eq!(engine.combine(&[]), Err(MappingError::EmptySelection));
    }

    #[test]
    fn validate_flags_gaps_and_degenerate_ranges() {
        assert!(engine().validate().is_empty());

        let broken = WearEngine::new(
            vec![Material::new("flat", WearRange::new(0.2, 0.2))],
            OutputProfile::new(
                WearRange::new(0.0, 1.0),
                TierTable::new(vec![
                    TierBand::new(Tier::FactoryNew, 0.0, 0.07),
                    TierBand::new(Tier::MinimalWear, 0.08, 0.9),
                ]),
            ),
        );
        let issues = broken.validate();
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, ConfigIssue::DegenerateMaterial { .. })));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, ConfigIssue::TierGap { .. })));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, ConfigIssue::TierSpanMismatch { .. })));
    }

    #[test]
    fn tier_parses_codes_and_names() {
        assert_eq!("fn".parse::<Tier>(), Ok(Tier::FactoryNew));
        assert_eq!("Field-Tested".parse::<Tier>(), Ok(Tier::FieldTested));
        assert_eq!("battle_scarred".parse::<Tier>(), Ok(Tier::BattleScarred));
        assert!("pristine".parse::<Tier>().is_err());
    }
}
