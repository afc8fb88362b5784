use async_trait::async_trait;
use contracts::domain::a001_sale_record::{AddSaleAck, NewSale, SaleRecord, SalesQuery};
use thiserror::Error;

/// Ошибки коллаборатора-источника данных
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Внешний источник записей продаж (GraphQL или эквивалент).
///
/// Повторы и восстановление после сетевых сбоев — забота реализации;
/// ядро выполняет каждый вызов ровно один раз.
#[async_trait]
pub trait SalesDataSource: Send + Sync {
    /// Query "sales": full snapshot, optionally narrowed by category/brand
    /// (server-side AND).
    async fn fetch_sales(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, DataSourceError>;

    /// Mutation "addSale". The caller must re-fetch afterwards; the local
    /// snapshot is only trusted after a confirmed round trip.
    async fn add_sale(&self, sale: &NewSale) -> Result<AddSaleAck, DataSourceError>;
}
