//! Static trade-up family tables: material floats, output profiles, default
//! price lists and market names.

use std::{collections::HashMap, sync::OnceLock};

use super::pricing::PricedItem;
use super::wear::{Material, OutputProfile, Tier, TierBand, TierTable, WearEngine, WearRange};

/// Key under which material prices are persisted for every family.
pub const MATERIALS_KEY: &str = "weapons";

const GAMMA_DOPPLER: &str = "Gamma Doppler";

/// How the exterior of a priced item is chosen when building market names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceTierPolicy {
    /// Always quote this exterior, whatever the caller asks for.
    Fixed(Tier),
    /// Quote the caller's exterior, defaulting to Field-Tested.
    Chosen,
}

#[derive(Debug)]
pub struct TradeUpFamily {
    pub id: &'static str,
    pub title: &'static str,
    /// Plural noun for the crafted items ("gloves", "knives").
    pub output_noun: &'static str,
    /// Persisted JSON key for the output price list.
    pub outputs_key: &'static str,
    pub data_file: &'static str,
    /// Name of the restricted output variant, when the family has one.
    pub restricted_label: Option<&'static str>,
    pub price_policy: PriceTierPolicy,
    pub engine: WearEngine,
    default_outputs: Vec<PricedItem>,
    default_materials: Vec<PricedItem>,
    market_names: HashMap<String, String>,
}

impl TradeUpFamily {
    pub fn default_outputs(&self) -> Vec<PricedItem> {
        self.default_outputs.clone()
    }

    pub fn default_materials(&self) -> Vec<PricedItem> {
        self.default_materials.clone()
    }

    pub fn market_base(&self, name: &str) -> Option<&str> {
        self.market_names.get(name).map(String::as_str)
    }

    /// Market hash name for a display name at the requested exterior.
    ///
    /// Gamma Doppler finishes only trade as Factory New, whatever was requested.
    pub fn build_market_hash(&self, name: &str, tier: Option<Tier>) -> Option<String> {
        let base = self.market_base(name)?;
        let tier = match self.price_policy {
            PriceTierPolicy::Fixed(tier) => tier,
            PriceTierPolicy::Chosen if base.contains(GAMMA_DOPPLER) => Tier::FactoryNew,
            PriceTierPolicy::Chosen => tier.unwrap_or(Tier::FieldTested),
        };
        Some(format!("{base} ({})", tier.market_suffix()))
    }
}

/// All configured families, in menu order.
pub fn families() -> &'static [TradeUpFamily] {
    static FAMILIES: OnceLock<Vec<TradeUpFamily>> = OnceLock::new();
    FAMILIES.get_or_init(|| vec![revolution_clutch(), nightmare_riptide()])
}

pub fn find_family(id: &str) -> Option<&'static TradeUpFamily> {
    families()
        .iter()
        .find(|family| family.id.eq_ignore_ascii_case(id))
}

fn five_tier_table(min: f64, max: f64) -> TierTable {
    TierTable::new(vec![
        TierBand::new(Tier::FactoryNew, min, 0.07),
        TierBand::new(Tier::MinimalWear, 0.07, 0.15),
        TierBand::new(Tier::FieldTested, 0.15, 0.38),
        TierBand::new(Tier::WellWorn, 0.38, 0.45),
        TierBand::new(Tier::BattleScarred, 0.45, max),
    ])
}

fn priced(entries: &[(&str, f64)]) -> Vec<PricedItem> {
    entries
        .iter()
        .map(|(name, price)| PricedItem::new(*name, *price))
        .collect()
}

fn unpriced<S: AsRef<str>>(names: &[S]) -> Vec<PricedItem> {
    names
        .iter()
        .map(|name| PricedItem::new(name.as_ref(), 0.0))
        .collect()
}

fn owned_names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(display, market)| (display.to_string(), market.to_string()))
        .collect()
}

fn revolution_clutch() -> TradeUpFamily {
    const GLOVE_MIN: f64 = 0.06;
    const GLOVE_MAX: f64 = 0.80;

    let materials = vec![
        Material::new("M4A4 | 反冲精英", WearRange::new(0.0, 0.80)),
        Material::new("AK-47 | 一发入魂", WearRange::new(0.0, 1.0)),
        Material::new("MP7 | 血腥运动", WearRange::new(0.0, 0.65)),
        Material::new("M4A4 | 黑色魅影", WearRange::new(0.0, 0.90)),
    ];
    let standard = OutputProfile::new(
        WearRange::new(GLOVE_MIN, GLOVE_MAX),
        five_tier_table(GLOVE_MIN, GLOVE_MAX),
    );

    let market_names = owned_names(&[
        ("驾驶手套（★） | 墨绿色调", "★ Driver Gloves | Racing Green"),
        ("九头蛇手套（★） | 响尾蛇", "★ Hydra Gloves | Rattler"),
        ("九头蛇手套（★） | 翡翠色调", "★ Hydra Gloves | Emerald"),
        ("九头蛇手套（★） | 红树林", "★ Hydra Gloves | Mangrove"),
        ("摩托手套（★） | 交运", "★ Moto Gloves | Transport"),
        ("专业手套（★） | 狩鹿", "★ Specialist Gloves | Buckshot"),
        ("裹手（★） | 防水布胶带", "★ Hand Wraps | Duct Tape"),
        ("裹手（★） | 森林色调", "★ Hand Wraps | Forest DDPAT"),
        ("驾驶手套（★） | 超越", "★ Driver Gloves | Overtake"),
        ("摩托手套（★） | 嘭！", "★ Moto Gloves | POW!"),
        ("九头蛇手套（★） | 表面淬火", "★ Hydra Gloves | Case Hardened"),
        ("摩托手套（★） | 玳瑁", "★ Moto Gloves | Turtle"),
        ("裹手（★） | 套印", "★ Hand Wraps | Overprint"),
        ("专业手套（★） | 大腕", "★ Specialist Gloves | Mogul"),
        ("摩托手套（★） | 多边形", "★ Moto Gloves | Polygon"),
        ("运动手套（★） | 青铜形态", "★ Sport Gloves | Bronze Morph"),
        ("专业手套（★） | 深红之网", "★ Specialist Gloves | Crimson Web"),
        ("驾驶手套（★） | 王蛇", "★ Driver Gloves | King Snake"),
        ("专业手套（★） | 渐变之色", "★ Specialist Gloves | Fade"),
        ("运动手套（★） | 欧米伽", "★ Sport Gloves | Omega"),
        ("驾驶手套（★） | 蓝紫格子", "★ Driver Gloves | Imperial Plaid"),
        ("裹手（★） | 钴蓝骷髅", "★ Hand Wraps | Cobalt Skulls"),
        ("运动手套（★） | 双栖", "★ Sport Gloves | Amphibious"),
        ("运动手套（★） | 迈阿密风云", "★ Sport Gloves | Vice"),
        ("M4A4 | 反冲精英", "M4A4 | Temukau"),
        ("AK-47 | 一发入魂", "AK-47 | Head Shot"),
        ("MP7 | 血腥运动", "MP7 | Bloodsport"),
        ("M4A4 | 黑色魅影", "M4A4 | Neo-Noir"),
    ]);

    // Seed prices so charts are meaningful before the first refresh.
    let default_outputs = priced(&[
        ("驾驶手套（★） | 墨绿色调", 340.0),
        ("九头蛇手套（★） | 响尾蛇", 346.5),
        ("九头蛇手套（★） | 翡翠色调", 368.0),
        ("九头蛇手套（★） | 红树林", 354.0),
        ("摩托手套（★） | 交运", 382.0),
        ("专业手套（★） | 狩鹿", 425.0),
        ("裹手（★） | 防水布胶带", 423.0),
        ("裹手（★） | 森林色调", 410.0),
        ("驾驶手套（★） | 超越", 480.0),
        ("摩托手套（★） | 嘭！", 799.5),
        ("九头蛇手套（★） | 表面淬火", 537.5),
        ("摩托手套（★） | 玳瑁", 635.0),
        ("裹手（★） | 套印", 809.5),
        ("专业手套（★） | 大腕", 834.5),
        ("摩托手套（★） | 多边形", 949.5),
        ("运动手套（★） | 青铜形态", 869.0),
        ("专业手套（★） | 深红之网", 1248.49),
        ("驾驶手套（★） | 王蛇", 1370.0),
        ("专业手套（★） | 渐变之色", 1779.5),
        ("运动手套（★） | 欧米伽", 2088.0),
        ("驾驶手套（★） | 蓝紫格子", 1830.0),
        ("裹手（★） | 钴蓝骷髅", 1819.0),
        ("运动手套（★） | 双栖", 3197.5),
        ("运动手套（★） | 迈阿密风云", 5190.0),
    ]);
    let default_materials = unpriced(&materials.iter().map(|m| m.id.as_str()).collect::<Vec<_>>());

    TradeUpFamily {
        id: "revolution",
        title: "Revolution / Clutch glove trade-up",
        output_noun: "gloves",
        outputs_key: "gloves",
        data_file: "gloves.json",
        restricted_label: None,
        price_policy: PriceTierPolicy::Fixed(Tier::FieldTested),
        engine: WearEngine::new(materials, standard),
        default_outputs,
        default_materials,
        market_names,
    }
}

fn nightmare_riptide() -> TradeUpFamily {
    const KNIFE_MIN: f64 = 0.0;
    const KNIFE_MAX: f64 = 1.0;
    const GAMMA_MAX: f64 = 0.08;

    // Third column: list Black Laminate ahead of Bright Water.
    const KNIVES: [(&str, &str, bool); 5] = [
        ("暗影双匕", "Shadow Daggers", false),
        ("鲍伊猎刀", "Bowie Knife", false),
        ("猎杀者匕首", "Huntsman Knife", false),
        ("弯刀", "Falchion Knife", true),
        ("蝴蝶刀", "Butterfly Knife", true),
    ];
    const FINISHES: [(&str, &str); 6] = [
        ("澄澈之水", "Bright Water"),
        ("黑色层压板", "Black Laminate"),
        ("自由之手", "Freehand"),
        ("传说", "Lore"),
        ("自动化", "Autotronic"),
        ("伽玛多普勒", GAMMA_DOPPLER),
    ];
    const WEAPONS: [(&str, &str); 4] = [
        ("MP9 | 星使", "MP9 | Starlight Protector"),
        ("AK-47 | 夜愿", "AK-47 | Nightwish"),
        ("沙漠之鹰 | 纵横波涛", "Desert Eagle | Ocean Drive"),
        ("AK-47 | 抽象派 1337", "AK-47 | Leet Museo"),
    ];

    let materials = vec![
        Material::new("MP9 | 星使", WearRange::new(0.0, 0.80)),
        Material::new("AK-47 | 夜愿", WearRange::new(0.0, 1.0)),
        Material::new("AK-47 | 抽象派 1337", WearRange::new(0.0, 0.65)),
        Material::new("沙漠之鹰 | 纵横波涛", WearRange::new(0.0, 1.0)),
    ];
    let standard = OutputProfile::new(
        WearRange::new(KNIFE_MIN, KNIFE_MAX),
        five_tier_table(KNIFE_MIN, KNIFE_MAX),
    );
    let gamma = OutputProfile::new(
        WearRange::new(KNIFE_MIN, GAMMA_MAX),
        TierTable::new(vec![
            TierBand::new(Tier::FactoryNew, KNIFE_MIN, 0.07),
            TierBand::new(Tier::MinimalWear, 0.07, GAMMA_MAX),
        ]),
    );

    let mut market_names = owned_names(&WEAPONS);
    let mut knife_names = Vec::with_capacity(KNIVES.len() * FINISHES.len());
    for (knife_cn, knife_en, laminate_first) in KNIVES {
        let mut finishes = FINISHES;
        if laminate_first {
            finishes.swap(0, 1);
        }
        for (finish_cn, finish_en) in finishes {
            let display = format!("{knife_cn}｜{finish_cn}");
            market_names.insert(display.clone(), format!("★ {knife_en} | {finish_en}"));
            knife_names.push(display);
        }
    }

    TradeUpFamily {
        id: "nightmare",
        title: "Dreams & Nightmares / Riptide knife trade-up",
        output_noun: "knives",
        outputs_key: "knives",
        data_file: "knives.json",
        restricted_label: Some(GAMMA_DOPPLER),
        price_policy: PriceTierPolicy::Chosen,
        engine: WearEngine::new(materials, standard).with_restricted(gamma),
        default_outputs: unpriced(&knife_names),
        default_materials: unpriced(&WEAPONS.map(|(display, _)| display)),
        market_names,
    }
}
