use crate::enums::Month;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// Active category/brand/month restriction. `None` means "no restriction".
///
/// Equality on the whole selection is what tags fetch responses: a snapshot
/// issued for one selection is discarded if the selection moved on before it
/// arrived.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FilterSelection {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub month: Option<Month>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.brand.is_none() && self.month.is_none()
    }
}

// ---------------------------------------------------------------------------
// Chart metric & value formatting
// ---------------------------------------------------------------------------

/// Какую величину рисуем: количество или сумму продаж
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Quantity,
    SalesAmount,
}

/// How to format the numeric value on the render side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String, decimals: u8 },
    Number { decimals: u8 },
}

// ---------------------------------------------------------------------------
// Renderer input
// ---------------------------------------------------------------------------

/// Named output slot on the dashboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartSlot {
    /// Primary category/brand comparison (bar)
    BrandComparison,
    /// Goal progress (doughnut)
    GoalProgress,
    /// Per-month histogram / grouped bar
    MonthlyHistogram,
}

impl ChartSlot {
    pub fn all() -> Vec<ChartSlot> {
        vec![
            ChartSlot::BrandComparison,
            ChartSlot::GoalProgress,
            ChartSlot::MonthlyHistogram,
        ]
    }

    /// Stable identifier, used as the render-target lookup key.
    pub fn code(&self) -> &'static str {
        match self {
            ChartSlot::BrandComparison => "brand-comparison",
            ChartSlot::GoalProgress => "goal-progress",
            ChartSlot::MonthlyHistogram => "monthly-histogram",
        }
    }
}

/// One labelled series of values, aligned with `ChartInput::labels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    /// One colour per dataset; the renderer may ignore it for multi-colour
    /// single-dataset charts and use `ChartInput::colors` instead.
    pub color: Option<String>,
}

/// Renderer-agnostic chart description: everything an external chart
/// collaborator needs to paint one surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInput {
    pub labels: Vec<String>,
    pub series: Vec<ChartDataset>,
    /// Per-label colours for single-series charts.
    pub colors: Vec<String>,
    #[serde(rename = "valueFormat")]
    pub value_format: ValueFormat,
}

// ---------------------------------------------------------------------------
// Pivot edits & goal progress
// ---------------------------------------------------------------------------

/// Редактируемые поля строки пивота перед сохранением
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PivotRowEdit {
    pub quantity: f64,
    pub price: f64,
    #[serde(rename = "goalQty")]
    pub goal_qty: f64,
    #[serde(rename = "goalAmt")]
    pub goal_amt: f64,
}

/// Goal-progress figures for the doughnut indicator.
/// `remaining` is clamped at zero when the target is exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub achieved: f64,
    pub remaining: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_selection_equality_tags_requests() {
        let a = FilterSelection {
            category: Some("Gaseosas".into()),
            brand: None,
            month: None,
        };
        let b = FilterSelection {
            category: Some("Gaseosas".into()),
            brand: None,
            month: None,
        };
        let c = FilterSelection {
            category: Some("Aguas".into()),
            brand: None,
            month: None,
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(FilterSelection::default().is_empty());
        assert!(!a.is_empty());
    }

    #[test]
    fn test_value_format_wire_shape() {
        let money = ValueFormat::Money {
            currency: "S/".into(),
            decimals: 2,
        };
        let json = serde_json::to_value(&money).unwrap();
        assert_eq!(json["kind"], "Money");
        assert_eq!(json["currency"], "S/");
    }

    #[test]
    fn test_chart_slot_codes_are_distinct() {
        let codes: Vec<&str> = ChartSlot::all().iter().map(|s| s.code()).collect();
        assert_eq!(codes.len(), 3);
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
