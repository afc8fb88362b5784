use contracts::dashboards::d400_sales_dashboard::FilterSelection;
use contracts::domain::a001_sale_record::SaleRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Суммы по срезу: количество и сумма продаж
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SliceTotals {
    pub qty: f64,
    pub amt: f64,
}

/// Sum quantity and amount over records of one category.
pub fn sum_by_category(records: &[SaleRecord], category: &str) -> SliceTotals {
    sum_matching(records, |r| r.category == category)
}

/// Sum quantity and amount over records of one brand, across all categories.
pub fn sum_by_brand(records: &[SaleRecord], brand: &str) -> SliceTotals {
    sum_matching(records, |r| r.brand == brand)
}

/// Per-category amount totals, one entry per distinct category, in
/// first-seen order of the input (insertion order, not sorted).
pub fn totals_by_category(records: &[SaleRecord]) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for record in records {
        if !totals.contains_key(&record.category) {
            order.push(record.category.clone());
        }
        *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
    }

    order
        .into_iter()
        .map(|category| {
            let total = totals.get(&category).copied().unwrap_or(0.0);
            (category, total)
        })
        .collect()
}

/// Apply a category/brand/month restriction locally (AND over the set
/// fields, mirroring the server-side query semantics).
pub fn filter_records<'a>(
    records: &'a [SaleRecord],
    filter: &FilterSelection,
) -> Vec<&'a SaleRecord> {
    records
        .iter()
        .filter(|r| {
            let match_cat = filter
                .category
                .as_ref()
                .map(|c| &r.category == c)
                .unwrap_or(true);
            let match_brand = filter.brand.as_ref().map(|b| &r.brand == b).unwrap_or(true);
            let match_month = filter.month.map(|m| r.month == m).unwrap_or(true);
            match_cat && match_brand && match_month
        })
        .collect()
}

fn sum_matching<F>(records: &[SaleRecord], predicate: F) -> SliceTotals
where
    F: Fn(&SaleRecord) -> bool,
{
    records
        .iter()
        .filter(|r| predicate(r))
        .fold(SliceTotals::default(), |acc, r| SliceTotals {
            qty: acc.qty + r.quantity,
            amt: acc.amt + r.amount,
        })
}
