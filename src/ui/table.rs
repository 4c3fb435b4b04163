use crate::domain::PricedItem;

use super::{display_width, heading, pad_right};

/// Two-column price table in list order.
pub fn price_table(title: &str, name_header: &str, items: &[PricedItem]) -> String {
    const PRICE_HEADER: &str = "最低价";

    let name_width = items
        .iter()
        .map(|item| display_width(&item.name))
        .chain(std::iter::once(display_width(name_header)))
        .max()
        .unwrap_or(0);
    let prices: Vec<String> = items
        .iter()
        .map(|item| format!("{:.2}", item.min_price))
        .collect();
    let price_width = prices
        .iter()
        .map(String::len)
        .chain(std::iter::once(display_width(PRICE_HEADER)))
        .max()
        .unwrap_or(0);

    let mut out = heading(title);
    out.push_str(&format!(
        "{}  {}\n",
        pad_right(name_header, name_width),
        PRICE_HEADER
    ));
    out.push_str(&format!("{}\n", "-".repeat(name_width + 2 + price_width)));
    for (item, price) in items.iter().zip(&prices) {
        out.push_str(&format!(
            "{}  {price:>price_width$}\n",
            pad_right(&item.name, name_width)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_with_two_decimals() {
        let items = vec![
            PricedItem::new("运动手套（★） | 双栖", 3197.5),
            PricedItem::new("AK-47 | 夜愿", 12.0),
        ];
        let table = price_table("手套价格表", "手套", &items);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "== 手套价格表 ==");
        assert!(lines[1].starts_with("手套"));
        assert!(lines[3].ends_with("3197.50"));
        assert!(lines[4].ends_with("  12.00"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_list_renders_header_only() {
        let table = price_table("empty", "name", &[]);
        assert_eq!(table.lines().count(), 3);
    }
}
