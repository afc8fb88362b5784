use contracts::dashboards::d400_sales_dashboard::{ChartInput, ChartSlot};

/// Внешний рендерер графиков (canvas, DOM, терминал — ядру всё равно).
///
/// Контракт: перед отрисовкой нового графика в том же слоте реализация
/// обязана полностью снести предыдущую визуализацию (destroy-and-recreate),
/// иначе текут ресурсы рендерера.
pub trait ChartRenderer {
    /// Is there a mount surface for this slot right now? During partial UI
    /// lifecycle states a missing target is expected, not an error.
    fn mount_available(&self, slot: ChartSlot) -> bool;

    /// Paint `input` into `slot`, replacing whatever was there.
    fn render(&mut self, slot: ChartSlot, input: &ChartInput);
}
