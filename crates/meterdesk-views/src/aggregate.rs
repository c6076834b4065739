//! Pure aggregations over remote report rows.

use meterdesk_types::{ProductCount, SellerRow, SellerTotal};

/// Group raw seller rows by name and sum their string-typed amounts.
///
/// The remote reports one row per seller per day with the amount as a
/// decimal string; unparsable amounts count as zero. The result is sorted
/// by total descending, seller name ascending on equal totals so the
/// ordering is deterministic.
pub fn seller_totals(rows: &[SellerRow]) -> Vec<SellerTotal> {
    let mut totals: Vec<SellerTotal> = Vec::new();
    for row in rows {
        let amount = row.total_sales.trim().parse::<f64>().unwrap_or(0.0);
        match totals.iter_mut().find(|t| t.user_name == row.user_name) {
            Some(total) => total.total_sales += amount,
            None => totals.push(SellerTotal {
                user_name: row.user_name.clone(),
                total_sales: amount,
            }),
        }
    }
    totals.sort_by(|a, b| {
        b.total_sales
            .partial_cmp(&a.total_sales)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.user_name.cmp(&b.user_name))
    });
    totals
}

/// The single best-selling product, if any rows exist. Ties resolve to the
/// product name that sorts first.
pub fn best_product(rows: &[ProductCount]) -> Option<&ProductCount> {
    rows.iter()
        .min_by(|a, b| b.count.cmp(&a.count).then_with(|| a.product.cmp(&b.product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, amount: &str) -> SellerRow {
        SellerRow {
            user_name: name.to_string(),
            total_sales: amount.to_string(),
        }
    }

    #[test]
    fn test_seller_totals_groups_and_sorts() {
        let rows = vec![row("ama", "10"), row("kofi", "5"), row("ama", "3")];
        let totals = seller_totals(&rows);
        assert_eq!(
            totals,
            vec![
                SellerTotal {
                    user_name: "ama".to_string(),
                    total_sales: 13.0,
                },
                SellerTotal {
                    user_name: "kofi".to_string(),
                    total_sales: 5.0,
                },
            ]
        );
    }

    #[test]
    fn test_unparsable_amount_counts_as_zero() {
        let rows = vec![row("ama", "n/a"), row("ama", "7.5")];
        let totals = seller_totals(&rows);
        assert_eq!(totals.len(), 1);
        assert!((totals[0].total_sales - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tied_totals_order_by_name() {
        let rows = vec![row("zuri", "4"), row("ama", "4")];
        let totals = seller_totals(&rows);
        assert_eq!(totals[0].user_name, "ama");
        assert_eq!(totals[1].user_name, "zuri");
    }

    #[test]
    fn test_best_product() {
        assert!(best_product(&[]).is_none());
        let rows = vec![
            ProductCount {
                product: "three-phase meter".to_string(),
                count: 4,
            },
            ProductCount {
                product: "single-phase meter".to_string(),
                count: 9,
            },
        ];
        assert_eq!(best_product(&rows).unwrap().product, "single-phase meter");
    }
}
