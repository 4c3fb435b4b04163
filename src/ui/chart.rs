use super::{display_width, heading, pad_right};

const BAR: char = '█';
const MARKER: char = '┆';

/// Horizontal bar chart; `reference` draws a dashed marker column across every row.
pub fn bar_chart(
    title: &str,
    bars: &[(&str, f64)],
    reference: Option<(&str, f64)>,
    width: usize,
) -> String {
    let mut out = heading(title);
    if bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = bars
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let scale_max = bars
        .iter()
        .map(|(_, value)| *value)
        .chain(reference.map(|(_, value)| value))
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    let columns = |value: f64| -> usize {
        if scale_max <= 0.0 || !value.is_finite() || value <= 0.0 {
            0
        } else {
            ((value / scale_max) * width as f64).round() as usize
        }
    };
    let marker = reference.map(|(_, value)| columns(value));

    for (label, value) in bars {
        let filled = columns(*value);
        let mut track: Vec<char> = (0..width.max(1))
            .map(|column| if column < filled { BAR } else { ' ' })
            .collect();
        if let Some(at) = marker.filter(|at| *at >= filled && *at < track.len()) {
            track[at] = MARKER;
        }
        let track: String = track.into_iter().collect();
        out.push_str(&format!(
            "{} |{} {value:.0}\n",
            pad_right(label, label_width),
            track.trim_end()
        ));
    }

    if let Some((label, value)) = reference {
        out.push_str(&format!(
            "{} {MARKER} {label}：{value:.1}\n",
            " ".repeat(label_width + 1)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_bar_fills_width() {
        let chart = bar_chart("t", &[("a", 50.0), ("b", 100.0)], None, 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[1], "a |█████ 50");
        assert_eq!(lines[2], "b |██████████ 100");
    }

    #[test]
    fn reference_marker_and_legend() {
        let chart = bar_chart("t", &[("a", 20.0), ("b", 100.0)], Some(("平均价", 50.0)), 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[1], "a |██   ┆ 20");
        assert_eq!(lines[3], "   ┆ 平均价：50.0");
    }

    #[test]
    fn zero_prices_render_empty_bars() {
        let chart = bar_chart("t", &[("a", 0.0)], Some(("avg", 0.0)), 10);
        assert_eq!(chart.lines().nth(1), Some("a |┆ 0"));
    }

    #[test]
    fn empty_chart_says_so() {
        assert!(bar_chart("t", &[], None, 10).contains("(no data)"));
    }
}
