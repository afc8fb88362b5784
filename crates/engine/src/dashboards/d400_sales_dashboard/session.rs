use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use contracts::dashboards::d400_sales_dashboard::{
    ChartInput, ChartSlot, FilterSelection, Metric, PivotRowEdit,
};
use contracts::domain::a001_sale_record::{NewSale, SaleRecord, SalesQuery};
use contracts::enums::Month;
use contracts::shared::catalog::CategoryCatalog;

use super::aggregation::{self, filter_records, SliceTotals};
use super::pivot::PivotTable;
use super::selector::FilterSelector;
use super::series;
use crate::errors::EngineError;
use crate::shared::datasource::SalesDataSource;
use crate::shared::renderer::ChartRenderer;

/// Снимок записей продаж с меткой фильтра, под который он запрашивался
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSnapshot {
    pub records: Vec<SaleRecord>,
    /// Selection the fetch was issued for; mismatched snapshots are stale.
    pub issued_for: FilterSelection,
    pub fetched_at: DateTime<Utc>,
}

/// Производный вывод для трёх слотов рендеринга
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub brand_comparison: ChartInput,
    pub goal_progress: ChartInput,
    pub monthly_histogram: ChartInput,
}

impl DashboardCharts {
    fn for_slot(&self, slot: ChartSlot) -> &ChartInput {
        match slot {
            ChartSlot::BrandComparison => &self.brand_comparison,
            ChartSlot::GoalProgress => &self.goal_progress,
            ChartSlot::MonthlyHistogram => &self.monthly_histogram,
        }
    }
}

/// Сессия дашборда: один логический пользователь, один снимок, один фильтр.
///
/// Вся работа синхронна и событийна: «пришёл снимок» и «запись подтверждена»
/// запускают полный проход reset → populate → построение серий. Локальный
/// пивот никогда не обновляется оптимистично — только после подтверждённого
/// round trip к источнику данных.
pub struct DashboardSession<S: SalesDataSource> {
    source: S,
    selector: FilterSelector,
    snapshot: Option<SalesSnapshot>,
    pivot: PivotTable,
    metric: Metric,
    charts: Option<DashboardCharts>,
}

impl<S: SalesDataSource> DashboardSession<S> {
    pub fn new(source: S, catalog: CategoryCatalog) -> Self {
        Self {
            source,
            selector: FilterSelector::new(catalog),
            snapshot: None,
            pivot: PivotTable::new(),
            metric: Metric::SalesAmount,
            charts: None,
        }
    }

    // -- filter -------------------------------------------------------------

    /// Set the category (cascading brand reset). Invalidates all derived
    /// output; call `reload` to repopulate.
    pub fn set_category(&mut self, category: &str) {
        self.selector.set_category(category);
        self.invalidate();
    }

    /// Set the brand; rejected when outside the current category's list.
    pub fn set_brand(&mut self, brand: &str) -> bool {
        let accepted = self.selector.set_brand(brand);
        if accepted {
            self.invalidate();
        }
        accepted
    }

    pub fn set_month(&mut self, month: Option<Month>) {
        self.selector.set_month(month);
        self.invalidate();
    }

    /// Switch the charted metric. Pure recompute, no re-fetch needed.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.recompute();
    }

    pub fn selector(&self) -> &FilterSelector {
        &self.selector
    }

    // -- snapshot lifecycle -------------------------------------------------

    /// Fetch a fresh snapshot for the current selection and derive all
    /// output from it. Returns `false` if the response was already stale
    /// when it arrived (selection changed mid-flight).
    pub async fn reload(&mut self) -> Result<bool, EngineError> {
        let selection = self.selector.selection();
        let query = SalesQuery {
            category: selection.category.clone(),
            brand: selection.brand.clone(),
        };
        let records = self.source.fetch_sales(&query).await?;
        Ok(self.apply_snapshot(SalesSnapshot {
            records,
            issued_for: selection,
            fetched_at: Utc::now(),
        }))
    }

    /// Accept a snapshot if it still matches the current selection.
    ///
    /// Guards against out-of-order responses under rapid filter changes: a
    /// late response for a superseded filter is discarded, never merged.
    pub fn apply_snapshot(&mut self, snapshot: SalesSnapshot) -> bool {
        if snapshot.issued_for != self.selector.selection() {
            tracing::warn!(
                "discarding stale snapshot issued for {:?}, current selection is {:?}",
                snapshot.issued_for,
                self.selector.selection()
            );
            return false;
        }
        self.snapshot = Some(snapshot);
        self.recompute();
        true
    }

    /// Full derivation pass over the current snapshot:
    /// reset → populate → build chart inputs.
    pub fn recompute(&mut self) {
        self.pivot.reset();
        let Some(snapshot) = &self.snapshot else {
            self.charts = None;
            return;
        };
        let selection = self.selector.selection();
        self.pivot.populate(&snapshot.records, &selection);

        let filtered: Vec<_> = filter_records(&snapshot.records, &selection)
            .into_iter()
            .cloned()
            .collect();
        let goal_target: f64 = filtered.iter().map(|r| r.goal_qty).sum();
        let catalog = self.selector.catalog();

        self.charts = Some(DashboardCharts {
            brand_comparison: series::brand_comparison_input(&filtered, catalog),
            goal_progress: series::goal_progress_input(series::goal_progress(
                &filtered,
                goal_target,
            )),
            monthly_histogram: series::monthly_histogram_input(
                &snapshot.records,
                selection.category.as_deref(),
                self.metric,
                catalog,
            ),
        });
    }

    // -- writes -------------------------------------------------------------

    /// Persist an edited pivot row for `month` under the selected
    /// category/brand, then reload. Fails up front when category or brand
    /// is not selected; no partial write is attempted.
    pub async fn save_row(&mut self, month: Month, edit: &PivotRowEdit) -> Result<(), EngineError> {
        let selection = self.selector.selection();
        let (Some(category), Some(brand)) = (selection.category, selection.brand) else {
            return Err(EngineError::Validation(
                "Seleccione categoría y marca antes de guardar".to_string(),
            ));
        };
        let sale = NewSale {
            category,
            brand,
            month,
            quantity: edit.quantity,
            price: edit.price,
            goal_qty: edit.goal_qty,
            goal_amt: edit.goal_amt,
        };
        self.source.add_sale(&sale).await?;
        // Never optimistic: trust the pivot only after the confirmed round trip.
        self.reload().await?;
        Ok(())
    }

    /// Register a new sale from the entry form, then reload.
    pub async fn add_sale(&mut self, sale: &NewSale) -> Result<(), EngineError> {
        if sale.category.trim().is_empty() || sale.brand.trim().is_empty() {
            return Err(EngineError::Validation(
                "Seleccione categoría y marca".to_string(),
            ));
        }
        if sale.price <= 0.0 {
            return Err(EngineError::Validation(
                "El precio debe ser mayor a cero".to_string(),
            ));
        }
        self.source.add_sale(sale).await?;
        self.reload().await?;
        Ok(())
    }

    // -- derived output -----------------------------------------------------

    pub fn pivot(&self) -> &PivotTable {
        &self.pivot
    }

    pub fn charts(&self) -> Option<&DashboardCharts> {
        self.charts.as_ref()
    }

    pub fn records(&self) -> &[SaleRecord] {
        self.snapshot
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or(&[])
    }

    /// Quantity/amount totals for one category, over the whole snapshot.
    pub fn category_sum(&self, category: &str) -> SliceTotals {
        aggregation::sum_by_category(self.records(), category)
    }

    /// Quantity/amount totals for one brand, across all categories.
    pub fn brand_sum(&self, brand: &str) -> SliceTotals {
        aggregation::sum_by_brand(self.records(), brand)
    }

    /// Amount totals per category present in the snapshot, first-seen order.
    pub fn category_totals(&self) -> Vec<(String, f64)> {
        aggregation::totals_by_category(self.records())
    }

    /// Hand each slot's chart input to the renderer. Slots without a mount
    /// surface are skipped silently; that is an expected partial-UI state.
    pub fn render_to(&self, renderer: &mut dyn ChartRenderer) {
        let Some(charts) = &self.charts else {
            tracing::debug!("render skipped: no snapshot applied yet");
            return;
        };
        for slot in ChartSlot::all() {
            if !renderer.mount_available(slot) {
                tracing::debug!("render target '{}' absent, skipping", slot.code());
                continue;
            }
            renderer.render(slot, charts.for_slot(slot));
        }
    }

    fn invalidate(&mut self) {
        self.pivot.reset();
        self.charts = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::memory_source::InMemorySalesSource;
    use contracts::domain::a001_sale_record::{SaleRecord, SaleRecordId};
    use contracts::shared::catalog::DEFAULT_CATALOG;
    use std::collections::HashMap;

    fn record(
        id: &str,
        category: &str,
        brand: &str,
        month: Month,
        quantity: f64,
        price: f64,
        goal_qty: f64,
    ) -> SaleRecord {
        SaleRecord {
            id: SaleRecordId::new(id),
            category: category.to_string(),
            brand: brand.to_string(),
            month,
            quantity,
            price,
            amount: quantity * price,
            goal_qty,
            goal_amt: goal_qty * price,
        }
    }

    fn seeded_session() -> DashboardSession<InMemorySalesSource> {
        let source = InMemorySalesSource::with_records(vec![
            record("1", "Gaseosas", "Coca Cola", Month::Enero, 80.0, 2.0, 100.0),
            record("2", "Gaseosas", "Pepsi", Month::Enero, 20.0, 1.5, 0.0),
            record("3", "Aguas", "San Luis", Month::Febrero, 30.0, 1.0, 40.0),
        ]);
        DashboardSession::new(source, DEFAULT_CATALOG.clone())
    }

    #[tokio::test]
    async fn test_reload_populates_pivot_and_charts() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        assert!(session.set_brand("Coca Cola"));
        assert!(session.reload().await.unwrap());

        let row = session.pivot().row(Month::Enero);
        assert_eq!(row.quantity, 80.0);
        assert_eq!(row.qty_score_pct(), 80.0);

        let charts = session.charts().unwrap();
        assert_eq!(charts.brand_comparison.labels, vec!["Coca Cola"]);
        assert_eq!(charts.monthly_histogram.labels.len(), 12);
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_discarded() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        assert!(session.reload().await.unwrap());

        // A late response from the previous (unfiltered) request arrives
        // after the user already narrowed the selection further.
        let stale = SalesSnapshot {
            records: vec![],
            issued_for: FilterSelection::default(),
            fetched_at: Utc::now(),
        };
        assert!(!session.apply_snapshot(stale));
        // derived output still reflects the matching snapshot
        assert!(session.charts().is_some());
        assert!(!session.records().is_empty());
    }

    #[tokio::test]
    async fn test_save_row_requires_category_and_brand() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        // brand deliberately not selected
        let result = session
            .save_row(Month::Enero, &PivotRowEdit::default())
            .await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_row_round_trips_and_repopulates() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        assert!(session.set_brand("Coca Cola"));
        session.reload().await.unwrap();

        let edit = PivotRowEdit {
            quantity: 120.0,
            price: 2.0,
            goal_qty: 100.0,
            goal_amt: 200.0,
        };
        session.save_row(Month::Marzo, &edit).await.unwrap();

        let row = session.pivot().row(Month::Marzo);
        assert_eq!(row.quantity, 120.0);
        assert_eq!(row.qty_score_pct(), 120.0);
        // Enero row survived the full reload
        assert_eq!(session.pivot().row(Month::Enero).quantity, 80.0);
    }

    #[tokio::test]
    async fn test_add_sale_validation_mirrors_entry_form() {
        let mut session = seeded_session();
        let no_price = NewSale {
            category: "Gaseosas".to_string(),
            brand: "Pepsi".to_string(),
            month: Month::Abril,
            quantity: 1.0,
            price: 0.0,
            goal_qty: 0.0,
            goal_amt: 0.0,
        };
        assert!(matches!(
            session.add_sale(&no_price).await,
            Err(EngineError::Validation(_))
        ));

        let ok = NewSale {
            price: 2.0,
            ..no_price
        };
        session.add_sale(&ok).await.unwrap();
        assert_eq!(session.records().len(), 4);
    }

    #[tokio::test]
    async fn test_category_totals_over_snapshot() {
        let mut session = seeded_session();
        session.reload().await.unwrap();

        let totals = session.category_totals();
        assert_eq!(totals[0].0, "Gaseosas");
        assert_eq!(totals[1].0, "Aguas");
        let grand: f64 = totals.iter().map(|(_, t)| t).sum();
        let amounts: f64 = session.records().iter().map(|r| r.amount).sum();
        assert!((grand - amounts).abs() < 1e-9);

        let gaseosas = session.category_sum("Gaseosas");
        assert_eq!(gaseosas.qty, 100.0);
        let pepsi = session.brand_sum("Pepsi");
        assert_eq!(pepsi.amt, 30.0);
    }

    #[tokio::test]
    async fn test_filter_change_invalidates_derived_output() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        session.reload().await.unwrap();
        assert!(session.charts().is_some());

        session.set_category("Aguas");
        assert!(session.charts().is_none());
        let rows: Vec<_> = session.pivot().rows().map(|(_, r)| *r).collect();
        assert!(rows.iter().all(|r| r.quantity == 0.0));
    }

    #[tokio::test]
    async fn test_metric_switch_recomputes_without_refetch() {
        let mut session = seeded_session();
        session.set_category("Gaseosas");
        session.reload().await.unwrap();
        session.set_metric(Metric::Quantity);
        let charts = session.charts().unwrap();
        assert!(matches!(
            charts.monthly_histogram.value_format,
            contracts::dashboards::d400_sales_dashboard::ValueFormat::Number { .. }
        ));
    }

    struct RecordingRenderer {
        mounted: Vec<ChartSlot>,
        painted: HashMap<&'static str, usize>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn mount_available(&self, slot: ChartSlot) -> bool {
            self.mounted.contains(&slot)
        }
        fn render(&mut self, slot: ChartSlot, _input: &ChartInput) {
            *self.painted.entry(slot.code()).or_insert(0) += 1;
        }
    }

    #[tokio::test]
    async fn test_render_skips_missing_targets_silently() {
        let mut session = seeded_session();
        session.reload().await.unwrap();

        let mut renderer = RecordingRenderer {
            mounted: vec![ChartSlot::BrandComparison],
            painted: HashMap::new(),
        };
        session.render_to(&mut renderer);
        assert_eq!(renderer.painted.get("brand-comparison"), Some(&1));
        assert_eq!(renderer.painted.get("goal-progress"), None);
        assert_eq!(renderer.painted.get("monthly-histogram"), None);
    }
}
