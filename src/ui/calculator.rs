use crate::domain::wear::{CombinedWear, MappingError, Tier, TierBand, WearRange};

use super::{display_width, heading, pad_right};

const SAFETY_HINT: &str = "建议再多留 0.001~0.003 安全余量。";

/// Single material mapped into the output range.
pub fn forward_report(material: &str, input: f64, output: f64, band: Option<&TierBand>) -> String {
    let mut out = heading("磨损映射");
    out.push_str(&format!("{material} 磨损 {input:.6} → 成品磨损 {output:.6}\n"));
    out.push_str(&tier_line(band));
    out
}

/// Largest usable material float for the requested exterior.
pub fn inverse_report(
    material: &str,
    material_range: WearRange,
    tier: Tier,
    target: &str,
    max_wear: f64,
) -> String {
    let mut out = heading("反推最大材料磨损");
    out.push_str(&format!(
        "要合出 {} 的{target}，{material} {material_range} 的磨损应 ≤ {max_wear:.6}\n",
        tier.label()
    ));
    out.push_str(SAFETY_HINT);
    out.push('\n');
    out
}

pub fn combine_report(combined: &CombinedWear, band: Option<&TierBand>) -> String {
    const HEADERS: [&str; 3] = ["材料", "材料磨损", "映射磨损"];

    let name_width = combined
        .rows
        .iter()
        .map(|row| display_width(&row.material_id))
        .chain(std::iter::once(display_width(HEADERS[0])))
        .max()
        .unwrap_or(0);

    let mut out = heading("合成预览");
    out.push_str(&format!(
        "{}  {}  {}\n",
        pad_right(HEADERS[0], name_width),
        pad_right(HEADERS[1], 10),
        HEADERS[2]
    ));
    for row in &combined.rows {
        out.push_str(&format!(
            "{}  {:<10.6}  {:.6}\n",
            pad_right(&row.material_id, name_width),
            row.input_wear,
            row.output_wear
        ));
    }
    out.push_str(&format!("平均成品磨损：{:.6}\n", combined.average));
    out.push_str(&tier_line(band));
    out
}

/// User-facing text for a failed calculation.
pub fn describe_error(error: &MappingError) -> String {
    match error {
        MappingError::UnknownIdentifier(id) => format!("无法计算：未配置 {id}"),
        MappingError::DegenerateRange { min, max } => {
            format!("无法计算，请检查区间。[{min} ~ {max}] 不是有效区间")
        }
        MappingError::UnreachableTarget { target, floor } => {
            format!("无法计算：目标磨损 {target} 低于成品最低磨损 {floor}")
        }
        MappingError::InvalidWear => "无法计算：磨损不是有效数字".to_string(),
        MappingError::EmptySelection => "无法计算：至少选择一把材料枪".to_string(),
    }
}

fn tier_line(band: Option<&TierBand>) -> String {
    match band {
        Some(band) => format!(
            "预计成色：{}（区间：{:.2} ~ {:.2}）\n",
            band.tier.label(),
            band.low,
            band.high
        ),
        None => "未能匹配到成色区间\n".to_string(),
    }
}
