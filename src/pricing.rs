use crate::models::{Product, SummaryResponse};

pub const DEFAULT_PREMIUM_UNIT_PRICE: u64 = 300;
pub const DEFAULT_OTHER_UNIT_PRICE: u64 = 250;

/// Unit prices in shekels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceConfig {
    pub premium_unit_price: u64,
    pub other_unit_price: u64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            premium_unit_price: DEFAULT_PREMIUM_UNIT_PRICE,
            other_unit_price: DEFAULT_OTHER_UNIT_PRICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_count: u64,
    pub premium_count: u64,
    pub other_count: u64,
    pub price: u64,
}

pub fn compute_totals(products: &[Product], prices: &PriceConfig) -> Totals {
    let mut total_count = 0u64;
    let mut premium_count = 0u64;
    for product in products {
        total_count = total_count.saturating_add(product.count);
        if product.is_premium {
            premium_count = premium_count.saturating_add(product.count);
        }
    }

    let other_count = total_count - premium_count;
    let price = premium_count
        .saturating_mul(prices.premium_unit_price)
        .saturating_add(other_count.saturating_mul(prices.other_unit_price));

    Totals {
        total_count,
        premium_count,
        other_count,
        price,
    }
}

/// Builds the clipboard text: greeting, one `name: count` line per non-zero
/// product, then the price.
pub fn summary_text(products: &[Product], totals: &Totals) -> String {
    let mut lines = Vec::with_capacity(products.len() + 4);
    lines.push("היי,".to_string());
    lines.push(format!("יש לי בשבילך {} פאקטים-", totals.total_count));
    lines.extend(
        products
            .iter()
            .filter(|product| product.count > 0)
            .map(|product| format!("{}: {}", product.name, product.count)),
    );
    lines.push(String::new());
    lines.push(format!(
        "סך הכל זה יצא {} ש\"ח",
        group_thousands(totals.price)
    ));
    lines.join("\n")
}

pub fn build_summary(products: &[Product], prices: &PriceConfig) -> SummaryResponse {
    let totals = compute_totals(products, prices);
    SummaryResponse {
        total_count: totals.total_count,
        premium_count: totals.premium_count,
        other_count: totals.other_count,
        price: totals.price,
        text: summary_text(products, &totals),
    }
}

/// Formats `value` with `,` between groups of three digits, as he-IL does.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![Product::new("A", 3, false), Product::new("B", 2, true)]
    }

    #[test]
    fn totals_for_mixed_list() {
        let totals = compute_totals(&sample(), &PriceConfig::default());
        assert_eq!(totals.total_count, 5);
        assert_eq!(totals.premium_count, 2);
        assert_eq!(totals.other_count, 3);
        assert_eq!(totals.price, 1350);
    }

    #[test]
    fn empty_list_is_all_zero() {
        let totals = compute_totals(&[], &PriceConfig::default());
        assert_eq!(totals, Totals::default());

        let text = summary_text(&[], &totals);
        assert_eq!(text, "היי,\nיש לי בשבילך 0 פאקטים-\n\nסך הכל זה יצא 0 ש\"ח");
    }

    #[test]
    fn counts_partition_total_for_any_list() {
        let lists = vec![
            vec![],
            vec![Product::new("x", 0, true)],
            vec![Product::new("x", 7, true), Product::new("y", 9, true)],
            vec![
                Product::new("a", 1, false),
                Product::new("b", 40, true),
                Product::new("a", 3, false),
                Product::new("c", 0, false),
            ],
        ];
        let prices = PriceConfig::default();
        for list in lists {
            let totals = compute_totals(&list, &prices);
            assert_eq!(totals.total_count, totals.premium_count + totals.other_count);
            assert_eq!(
                totals.price,
                totals.premium_count * 300 + totals.other_count * 250
            );
        }
    }

    #[test]
    fn configured_prices_are_used() {
        let prices = PriceConfig {
            premium_unit_price: 10,
            other_unit_price: 1,
        };
        let totals = compute_totals(&sample(), &prices);
        assert_eq!(totals.price, 23);
    }

    #[test]
    fn summary_lists_only_non_zero_products() {
        let products = vec![
            Product::new("Camel", 4, false),
            Product::new("Winston", 0, false),
            Product::new("Marlboro Gold", 1, true),
        ];
        let summary = build_summary(&products, &PriceConfig::default());
        assert_eq!(
            summary.text,
            "היי,\nיש לי בשבילך 5 פאקטים-\nCamel: 4\nMarlboro Gold: 1\n\nסך הכל זה יצא 1,300 ש\"ח"
        );
        assert!(!summary.text.contains("Winston"));
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1350), "1,350");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
