use async_trait::async_trait;
use contracts::domain::a001_sale_record::{
    AddSaleAck, NewSale, SaleRecord, SaleRecordId, SalesQuery,
};
use std::sync::Mutex;
use uuid::Uuid;

use super::datasource::{DataSourceError, SalesDataSource};

/// Источник данных в памяти: эталонная реализация контракта `SalesDataSource`
/// для тестов и демо. Присваивает id на «серверной» стороне и вычисляет
/// `amount`, как это делает реальный резолвер мутации.
#[derive(Debug, Default)]
pub struct InMemorySalesSource {
    records: Mutex<Vec<SaleRecord>>,
}

impl InMemorySalesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SaleRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("sales store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SalesDataSource for InMemorySalesSource {
    async fn fetch_sales(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, DataSourceError> {
        let records = self.records.lock().expect("sales store poisoned");
        Ok(records
            .iter()
            .filter(|r| {
                let match_cat = query
                    .category
                    .as_ref()
                    .map(|c| &r.category == c)
                    .unwrap_or(true);
                let match_brand = query.brand.as_ref().map(|b| &r.brand == b).unwrap_or(true);
                match_cat && match_brand
            })
            .cloned()
            .collect())
    }

    async fn add_sale(&self, sale: &NewSale) -> Result<AddSaleAck, DataSourceError> {
        if sale.category.trim().is_empty() || sale.brand.trim().is_empty() {
            return Err(DataSourceError::Decode(
                "addSale: category and brand are required".to_string(),
            ));
        }
        let record = SaleRecord {
            id: SaleRecordId::new(Uuid::new_v4().to_string()),
            category: sale.category.clone(),
            brand: sale.brand.clone(),
            month: sale.month,
            quantity: sale.quantity,
            price: sale.price,
            amount: sale.quantity * sale.price,
            goal_qty: sale.goal_qty,
            goal_amt: sale.goal_amt,
        };
        let ack = AddSaleAck {
            id: record.id.clone(),
            amount: record.amount,
        };
        self.records
            .lock()
            .expect("sales store poisoned")
            .push(record);
        Ok(ack)
    }
}
