use contracts::dashboards::d400_sales_dashboard::{
    ChartDataset, ChartInput, GoalProgress, Metric, ValueFormat,
};
use contracts::domain::a001_sale_record::SaleRecord;
use contracts::enums::Month;
use contracts::shared::catalog::CategoryCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Валюта дашборда (перуанский соль)
const CURRENCY: &str = "S/";

/// Neutral fill for the "remaining" share of the progress doughnut.
const REMAINING_COLOR: &str = "#e5e7eb";
const ACHIEVED_COLOR: &str = "#10b981";

/// Одна точка временного ряда: месяц, значение, ключ серии (бренд)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: Month,
    pub value: f64,
    pub brand: String,
}

/// Value a record contributes under the selected metric.
pub fn value_of(record: &SaleRecord, metric: Metric) -> f64 {
    match metric {
        Metric::Quantity => record.quantity,
        Metric::SalesAmount => record.quantity * record.price,
    }
}

/// Formatting metadata for the selected metric: currency with two decimals
/// for sales amount, plain number for quantity.
pub fn value_format(metric: Metric) -> ValueFormat {
    match metric {
        Metric::Quantity => ValueFormat::Number { decimals: 0 },
        Metric::SalesAmount => ValueFormat::Money {
            currency: CURRENCY.to_string(),
            decimals: 2,
        },
    }
}

/// Build the time series for the monthly chart.
///
/// Applies the category restriction (`None` = all), maps each record to its
/// metric value, drops non-positive contributions and sorts by the fixed
/// month order. The month ordering is load-bearing for time-series
/// rendering; the sort is stable, so same-month points keep input order.
pub fn monthly_series(
    records: &[SaleRecord],
    category: Option<&str>,
    metric: Metric,
) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .filter(|r| category.map(|c| r.category == c).unwrap_or(true))
        .map(|r| SeriesPoint {
            month: r.month,
            value: value_of(r, metric),
            brand: r.brand.clone(),
        })
        .filter(|p| p.value > 0.0)
        .collect();
    points.sort_by_key(|p| p.month.index());
    points
}

/// Total `amount` per brand, one entry per distinct brand in first-seen
/// order. Feeds label/value arrays for single-series bar and doughnut views.
pub fn grouped_amount_by_brand(records: &[SaleRecord]) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for record in records {
        if !totals.contains_key(&record.brand) {
            order.push(record.brand.clone());
        }
        *totals.entry(record.brand.clone()).or_insert(0.0) += record.amount;
    }

    order
        .into_iter()
        .map(|brand| {
            let total = totals.get(&brand).copied().unwrap_or(0.0);
            (brand, total)
        })
        .collect()
}

/// Goal progress over a filtered record set: achieved quantity against an
/// explicit target. `remaining` never goes negative.
pub fn goal_progress(records: &[SaleRecord], target: f64) -> GoalProgress {
    let achieved: f64 = records.iter().map(|r| r.quantity).sum();
    GoalProgress {
        achieved,
        remaining: (target - achieved).max(0.0),
    }
}

// ---------------------------------------------------------------------------
// ChartInput builders, one per dashboard slot
// ---------------------------------------------------------------------------

/// Primary comparison surface: one bar per brand, amount totals.
pub fn brand_comparison_input(records: &[SaleRecord], catalog: &CategoryCatalog) -> ChartInput {
    let grouped = grouped_amount_by_brand(records);
    let labels: Vec<String> = grouped.iter().map(|(brand, _)| brand.clone()).collect();
    let data: Vec<f64> = grouped.iter().map(|(_, total)| *total).collect();
    let colors: Vec<String> = labels
        .iter()
        .map(|brand| catalog.color_of(brand).to_string())
        .collect();

    ChartInput {
        labels,
        series: vec![ChartDataset {
            label: format!("Monto Total ({})", CURRENCY),
            data,
            color: None,
        }],
        colors,
        value_format: ValueFormat::Money {
            currency: CURRENCY.to_string(),
            decimals: 2,
        },
    }
}

/// Goal-progress doughnut: achieved vs remaining quantity.
pub fn goal_progress_input(progress: GoalProgress) -> ChartInput {
    ChartInput {
        labels: vec!["Logrado".to_string(), "Restante".to_string()],
        series: vec![ChartDataset {
            label: "Avance de meta".to_string(),
            data: vec![progress.achieved, progress.remaining],
            color: None,
        }],
        colors: vec![ACHIEVED_COLOR.to_string(), REMAINING_COLOR.to_string()],
        value_format: ValueFormat::Number { decimals: 0 },
    }
}

/// Monthly histogram: fixed 12-month label axis, one dataset per brand in
/// first-seen order. Contributions for the same brand and month are summed
/// for display.
pub fn monthly_histogram_input(
    records: &[SaleRecord],
    category: Option<&str>,
    metric: Metric,
    catalog: &CategoryCatalog,
) -> ChartInput {
    let points = monthly_series(records, category, metric);

    let mut brand_order: Vec<String> = Vec::new();
    for p in &points {
        if !brand_order.contains(&p.brand) {
            brand_order.push(p.brand.clone());
        }
    }

    let mut series: Vec<ChartDataset> = brand_order
        .iter()
        .map(|brand| ChartDataset {
            label: brand.clone(),
            data: vec![0.0; 12],
            color: Some(catalog.color_of(brand).to_string()),
        })
        .collect();

    for p in &points {
        let idx = brand_order.iter().position(|b| b == &p.brand).unwrap_or(0);
        series[idx].data[p.month.index()] += p.value;
    }

    let colors = brand_order
        .iter()
        .map(|brand| catalog.color_of(brand).to_string())
        .collect();

    ChartInput {
        labels: Month::all().iter().map(|m| m.label().to_string()).collect(),
        series,
        colors,
        value_format: value_format(metric),
    }
}
