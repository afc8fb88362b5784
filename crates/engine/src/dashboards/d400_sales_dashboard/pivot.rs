use contracts::dashboards::d400_sales_dashboard::FilterSelection;
use contracts::domain::a001_sale_record::SaleRecord;
use contracts::enums::Month;

/// Агрегат одного месяца: факт против цели для выбранной пары
/// категория + бренд.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PivotRow {
    pub quantity: f64,
    pub price: f64,
    pub goal_qty: f64,
    pub goal_amt: f64,
    pub amount: f64,
}

impl PivotRow {
    /// Фактическая сумма строки (quantity * price, не серверный amount)
    fn actual_amt(&self) -> f64 {
        self.quantity * self.price
    }

    pub fn qty_profit(&self) -> f64 {
        self.quantity - self.goal_qty
    }

    /// Deviation from the quantity goal in percent; 0 when no goal is set
    /// (goal-less months show neutral scores, never infinity).
    pub fn qty_variation_pct(&self) -> f64 {
        if self.goal_qty != 0.0 {
            (self.quantity / self.goal_qty - 1.0) * 100.0
        } else {
            0.0
        }
    }

    pub fn qty_score_pct(&self) -> f64 {
        if self.goal_qty != 0.0 {
            (self.quantity / self.goal_qty) * 100.0
        } else {
            0.0
        }
    }

    pub fn amt_profit(&self) -> f64 {
        self.actual_amt() - self.goal_amt
    }

    pub fn amt_variation_pct(&self) -> f64 {
        if self.goal_amt != 0.0 {
            (self.actual_amt() / self.goal_amt - 1.0) * 100.0
        } else {
            0.0
        }
    }

    pub fn amt_score_pct(&self) -> f64 {
        if self.goal_amt != 0.0 {
            (self.actual_amt() / self.goal_amt) * 100.0
        } else {
            0.0
        }
    }
}

/// Пивот-таблица: ровно 12 строк, по одной на календарный месяц.
///
/// Перед каждым заполнением таблица сбрасывается в ноль целиком — частичное
/// обновление оставляло бы устаревшие месяцы после смены фильтра.
#[derive(Debug, Clone)]
pub struct PivotTable {
    rows: [PivotRow; 12],
}

impl Default for PivotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PivotTable {
    pub fn new() -> Self {
        Self {
            rows: [PivotRow::default(); 12],
        }
    }

    /// Zero out every row. Must run before every repopulation.
    pub fn reset(&mut self) {
        self.rows = [PivotRow::default(); 12];
    }

    /// Fill rows from records matching the active category/brand selection.
    /// Month is NOT filtered here: each matching record's month selects the
    /// row it overwrites.
    ///
    /// A record replaces its month's row wholesale — one row per month per
    /// brand is the editing model, not a transaction ledger. When two
    /// records share a month, the later one in iteration order wins.
    pub fn populate(&mut self, records: &[SaleRecord], filter: &FilterSelection) {
        for record in records {
            let match_cat = filter
                .category
                .as_ref()
                .map(|c| &record.category == c)
                .unwrap_or(true);
            let match_brand = filter
                .brand
                .as_ref()
                .map(|b| &record.brand == b)
                .unwrap_or(true);
            if !(match_cat && match_brand) {
                continue;
            }
            self.rows[record.month.index()] = PivotRow {
                quantity: record.quantity,
                price: record.price,
                goal_qty: record.goal_qty,
                goal_amt: record.goal_amt,
                amount: record.amount,
            };
        }
    }

    pub fn row(&self, month: Month) -> &PivotRow {
        &self.rows[month.index()]
    }

    /// All 12 rows in fixed calendar order.
    pub fn rows(&self) -> impl Iterator<Item = (Month, &PivotRow)> + '_ {
        Month::all()
            .into_iter()
            .map(move |m| (m, &self.rows[m.index()]))
    }
}
