use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::{
    cli::{Cli, Commands, RefreshScope},
    domain::{
        apply_quotes, average_price, break_even_material_price, families, find_family,
        sorted_by_price, wear::TierBand, FamilyState, ItemKind, MaterialSelection,
        PriceTierPolicy, PricedItem, RangeMode, RefreshSummary, Tier, TradeUpFamily, WearEngine,
    },
    infra::steamdt::PriceClient,
    ui::{
        calculator::{combine_report, describe_error, forward_report, inverse_report},
        chart::bar_chart,
        heading,
        table::price_table,
    },
    util::{
        config::Settings,
        persistence::{family_file, load_family_state, save_family_state},
    },
};

const CHART_WIDTH: usize = 40;

/// Which prices to pull before rendering the board.
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshRequest {
    None,
    All(RefreshScope),
    One(String),
}

impl RefreshRequest {
    fn from_flags(refresh_all: Option<RefreshScope>, refresh: Option<String>) -> Self {
        match (refresh_all, refresh) {
            (Some(scope), _) => RefreshRequest::All(scope),
            (None, Some(name)) => RefreshRequest::One(name),
            (None, None) => RefreshRequest::None,
        }
    }
}

/// Exteriors requested for each price list; the family policy may override them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteTiers {
    pub outputs: Option<Tier>,
    pub materials: Tier,
}

impl QuoteTiers {
    fn for_kind(&self, kind: ItemKind) -> Option<Tier> {
        match kind {
            ItemKind::Output => self.outputs,
            ItemKind::Material => Some(self.materials),
        }
    }
}

fn scope_kinds(scope: RefreshScope) -> &'static [ItemKind] {
    match scope {
        RefreshScope::Outputs => &[ItemKind::Output],
        RefreshScope::Materials => &[ItemKind::Material],
        RefreshScope::Both => &[ItemKind::Output, ItemKind::Material],
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::Families => print!("{}", families_overview()),
        Commands::Prices {
            family,
            tier,
            material_tier,
            refresh_all,
            refresh,
            materials,
        } => {
            let settings = Settings::from_args(&global)?;
            let family = resolve_family(&family)?;
            let request = RefreshRequest::from_flags(refresh_all, refresh);
            let tiers = QuoteTiers {
                outputs: tier,
                materials: material_tier,
            };
            let board = refresh_and_render(&settings, family, tiers, &request, materials).await?;
            print!("{board}");
        }
        Commands::Map {
            family,
            material,
            wear,
        } => print!("{}", map_report(resolve_family(&family)?, &material, wear)),
        Commands::MaxWear {
            family,
            material,
            tier,
            restricted,
        } => print!(
            "{}",
            max_wear_report(resolve_family(&family)?, &material, tier, restricted)
        ),
        Commands::Combine {
            family,
            selections,
        } => print!("{}", combine_preview(resolve_family(&family)?, &selections)),
    }
    Ok(())
}

fn resolve_family(id: &str) -> Result<&'static TradeUpFamily> {
    let Some(family) = find_family(id) else {
        let known: Vec<&str> = families().iter().map(|family| family.id).collect();
        bail!("unknown family '{id}' (known: {})", known.join(", "));
    };
    for issue in family.engine.validate() {
        warn!(family = family.id, %issue, "wear configuration problem");
    }
    Ok(family)
}

/// Loads the family's saved prices, applies the requested refresh, persists and
/// renders the board.
pub async fn refresh_and_render(
    settings: &Settings,
    family: &TradeUpFamily,
    tiers: QuoteTiers,
    request: &RefreshRequest,
    show_material_chart: bool,
) -> Result<String> {
    let path = family_file(&settings.data_dir, family);
    let mut state = load_family_state(&path, family);

    let targets = refresh_targets(&state, request)?;
    let mut out = String::new();
    if !targets.is_empty() {
        let api_key = settings.require_api_key()?;
        let client = PriceClient::with_base_url(settings.base_url.as_str(), api_key)
            .context("failed to initialise price client")?
            .with_timeout(settings.request_timeout);

        let summary =
            refresh_items(&client, family, &mut state, &targets, tiers, settings.concurrency).await;
        info!(
            family = family.id,
            attempted = summary.attempted,
            updated = summary.updated,
            "price refresh finished"
        );
        out.push_str(&refresh_message(request, summary));
        if summary.updated > 0 {
            state.touch();
        }
        save_family_state(&path, family, &state)
            .with_context(|| format!("failed to save prices to {}", path.display()))?;
    }

    out.push_str(&price_board(family, &state, tiers, show_material_chart));
    Ok(out)
}

fn refresh_targets(state: &FamilyState, request: &RefreshRequest) -> Result<Vec<(ItemKind, String)>> {
    match request {
        RefreshRequest::None => Ok(Vec::new()),
        RefreshRequest::All(scope) => Ok(scope_kinds(*scope)
            .iter()
            .copied()
            .flat_map(|kind| {
                state
                    .items(kind)
                    .iter()
                    .map(move |item| (kind, item.name.clone()))
            })
            .collect()),
        RefreshRequest::One(name) => match state.locate(name) {
            Some((kind, item)) => Ok(vec![(kind, item.name.clone())]),
            None => bail!("no item named '{name}' in this family"),
        },
    }
}

/// Fetches quotes for `targets` and writes the usable ones into `state`.
async fn refresh_items(
    client: &PriceClient,
    family: &TradeUpFamily,
    state: &mut FamilyState,
    targets: &[(ItemKind, String)],
    tiers: QuoteTiers,
    concurrency: usize,
) -> RefreshSummary {
    let lookups = plan_lookups(family, targets, tiers);
    if lookups.is_empty() {
        return RefreshSummary::default();
    }

    let quotes = client
        .fetch_many(lookups.keys().cloned().collect(), concurrency)
        .await;

    let mut output_quotes = HashMap::new();
    let mut material_quotes = HashMap::new();
    for (market_hash, price) in quotes {
        for (kind, name) in lookups.get(&market_hash).into_iter().flatten() {
            let target = match kind {
                ItemKind::Output => &mut output_quotes,
                ItemKind::Material => &mut material_quotes,
            };
            target.insert(name.to_string(), price);
        }
    }

    let outputs = apply_quotes(state.items_mut(ItemKind::Output), &output_quotes);
    let materials = apply_quotes(state.items_mut(ItemKind::Material), &material_quotes);
    RefreshSummary {
        attempted: outputs.attempted + materials.attempted,
        updated: outputs.updated + materials.updated,
    }
}

/// Groups targets by the market hash name they are quoted under.
fn plan_lookups<'a>(
    family: &TradeUpFamily,
    targets: &'a [(ItemKind, String)],
    tiers: QuoteTiers,
) -> HashMap<String, Vec<(ItemKind, &'a str)>> {
    let mut lookups: HashMap<String, Vec<(ItemKind, &str)>> = HashMap::new();
    for (kind, name) in targets {
        match family.build_market_hash(name, tiers.for_kind(*kind)) {
            Some(market_hash) => lookups
                .entry(market_hash)
                .or_default()
                .push((*kind, name.as_str())),
            None => warn!(item = %name, "no market name configured, skipping"),
        }
    }
    lookups
}

fn refresh_message(request: &RefreshRequest, summary: RefreshSummary) -> String {
    match request {
        RefreshRequest::One(name) if summary.updated > 0 => format!("✅ 已更新：{name}\n"),
        RefreshRequest::One(name) => format!("❌ 没拉到价格：{name}（保留原价）\n"),
        _ => format!(
            "✅ 已刷新 {} / {} 件物品，{} 件保留原价\n",
            summary.updated,
            summary.attempted,
            summary.failed()
        ),
    }
}

fn quoted_tier(family: &TradeUpFamily, tier: Option<Tier>) -> Tier {
    match family.price_policy {
        PriceTierPolicy::Fixed(tier) => tier,
        PriceTierPolicy::Chosen => tier.unwrap_or(Tier::FieldTested),
    }
}

fn price_board(
    family: &TradeUpFamily,
    state: &FamilyState,
    tiers: QuoteTiers,
    show_material_chart: bool,
) -> String {
    let tier = quoted_tier(family, tiers.outputs);
    let material_tier = quoted_tier(family, Some(tiers.materials));
    let average = average_price(&state.outputs);
    let break_even = break_even_material_price(average);

    let mut out = heading(family.title);
    if let Some(updated_at) = &state.updated_at {
        out.push_str(&format!("上次刷新：{updated_at}\n"));
    }
    out.push('\n');

    out.push_str(&price_table(
        &format!("{} 价格（{}）", family.output_noun, tier.label()),
        family.output_noun,
        &state.outputs,
    ));
    out.push('\n');
    out.push_str(&bar_chart(
        "价格展示图",
        &chart_bars(state.outputs.iter()),
        Some(("平均价", average)),
        CHART_WIDTH,
    ));
    out.push('\n');

    let materials: Vec<PricedItem> = sorted_by_price(&state.materials)
        .into_iter()
        .cloned()
        .collect();
    out.push_str(&price_table(
        &format!("材料价格（{}，从低到高）", material_tier.label()),
        "材料",
        &materials,
    ));
    out.push_str(&format!(
        "平均成品价：{average:.2}，单把材料保本价：{break_even:.2}\n"
    ));
    if show_material_chart {
        out.push('\n');
        out.push_str(&bar_chart(
            "材料价格 vs 保本价",
            &chart_bars(materials.iter()),
            Some(("保本价", break_even)),
            CHART_WIDTH,
        ));
    }
    out
}

fn chart_bars<'a>(items: impl Iterator<Item = &'a PricedItem>) -> Vec<(&'a str, f64)> {
    items.map(|item| (item.name.as_str(), item.min_price)).collect()
}

fn standard_band(engine: &WearEngine, tier: Option<Tier>) -> Option<&TierBand> {
    let tier = tier?;
    engine.profile(RangeMode::Standard).ok()?.tiers.band(tier)
}

fn map_report(family: &TradeUpFamily, material: &str, wear: f64) -> String {
    let engine = &family.engine;
    match engine.forward_map(material, wear) {
        Ok(output) => forward_report(
            material,
            wear,
            output,
            standard_band(engine, engine.classify_tier(output)),
        ),
        Err(error) => format!("{}\n", describe_error(&error)),
    }
}

fn max_wear_report(family: &TradeUpFamily, material: &str, tier: Tier, restricted: bool) -> String {
    let engine = &family.engine;
    let mode = RangeMode::from_flag(restricted);
    let target = match mode {
        RangeMode::Restricted => family.restricted_label.unwrap_or(family.output_noun),
        RangeMode::Standard => family.output_noun,
    };

    let result = engine.material_range(material).and_then(|range| {
        engine
            .inverse_for_tier(material, tier, mode)
            .map(|max_wear| (range, max_wear))
    });
    match result {
        Ok((range, max_wear)) => inverse_report(material, range, tier, target, max_wear),
        Err(error) => format!("{}\n", describe_error(&error)),
    }
}

fn combine_preview(family: &TradeUpFamily, selections: &[MaterialSelection]) -> String {
    let engine = &family.engine;
    match engine.combine(selections) {
        Ok(combined) => combine_report(&combined, standard_band(engine, combined.tier)),
        Err(error) => format!("{}\n", describe_error(&error)),
    }
}

fn families_overview() -> String {
    let mut out = String::new();
    for family in families() {
        out.push_str(&heading(&format!("{} · {}", family.id, family.title)));
        if let Ok(profile) = family.engine.profile(RangeMode::Standard) {
            out.push_str(&format!("{} 磨损区间：{}\n", family.output_noun, profile.range));
        }
        if let (Some(label), Ok(profile)) = (
            family.restricted_label,
            family.engine.profile(RangeMode::Restricted),
        ) {
            let tiers: Vec<&str> = profile.tiers.tiers().map(|tier| tier.code()).collect();
            out.push_str(&format!(
                "{label} 磨损区间：{}（{}）\n",
                profile.range,
                tiers.join(" / ")
            ));
        }
        for material in family.engine.materials() {
            out.push_str(&format!("  {} {}\n", material.id, material.range));
        }
        out.push('\n');
    }
    out
}
