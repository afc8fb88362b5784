use contracts::dashboards::d400_sales_dashboard::{ChartInput, ChartSlot, Metric};
use contracts::domain::a001_sale_record::NewSale;
use contracts::enums::Month;
use contracts::shared::catalog::DEFAULT_CATALOG;
use engine::dashboards::d400_sales_dashboard::pivot::PivotRow;
use engine::dashboards::d400_sales_dashboard::session::DashboardSession;
use engine::shared::memory_source::InMemorySalesSource;
use engine::shared::renderer::ChartRenderer;

/// Рендерер-заглушка: вместо canvas пишет входы графиков в лог как JSON.
struct LogRenderer;

impl ChartRenderer for LogRenderer {
    fn mount_available(&self, _slot: ChartSlot) -> bool {
        true
    }

    fn render(&mut self, slot: ChartSlot, input: &ChartInput) {
        match serde_json::to_string(input) {
            Ok(payload) => tracing::info!("slot '{}': {}", slot.code(), payload),
            Err(e) => tracing::warn!("slot '{}': cannot serialize input: {}", slot.code(), e),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = InMemorySalesSource::new();
    let mut session = DashboardSession::new(source, DEFAULT_CATALOG.clone());

    // Seed a few sales through the regular mutation path
    let seed = [
        ("Gaseosas", "Coca Cola", Month::Enero, 80.0, 2.0, 100.0),
        ("Gaseosas", "Pepsi", Month::Enero, 45.0, 1.8, 60.0),
        ("Gaseosas", "Coca Cola", Month::Febrero, 110.0, 2.0, 100.0),
        ("Aguas", "San Luis", Month::Enero, 30.0, 1.2, 50.0),
        ("Aguas", "San Mateo", Month::Marzo, 25.0, 1.5, 0.0),
    ];
    for (category, brand, month, quantity, price, goal_qty) in seed {
        session
            .add_sale(&NewSale {
                category: category.to_string(),
                brand: brand.to_string(),
                month,
                quantity,
                price,
                goal_qty,
                goal_amt: goal_qty * price,
            })
            .await?;
    }

    tracing::info!("loaded {} sale records", session.records().len());
    for (category, total) in session.category_totals() {
        tracing::info!("{:<10} total {:>8.2}", category, total);
    }

    session.set_category("Gaseosas");
    if !session.set_brand("Coca Cola") {
        anyhow::bail!("brand not available under the selected category");
    }
    session.reload().await?;

    for (month, row) in session.pivot().rows() {
        if *row == PivotRow::default() {
            continue;
        }
        tracing::info!(
            "{:<12} qty {:>6.1} goal {:>6.1} score {:>6.1}% profit {:>7.1}",
            month.label(),
            row.quantity,
            row.goal_qty,
            row.qty_score_pct(),
            row.amt_profit(),
        );
    }

    session.set_metric(Metric::Quantity);
    session.render_to(&mut LogRenderer);

    Ok(())
}
