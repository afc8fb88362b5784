use crate::enums::Month;
use serde::{Deserialize, Serialize};

/// ID записи продажи. Присваивается источником данных, локально не генерируется.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleRecordId(pub String);

impl SaleRecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Запись продажи (одна транзакция category/brand/month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleRecordId,
    pub category: String,
    pub brand: String,
    pub month: Month,
    /// Количество (единиц). Отсутствующее значение в источнике = 0.
    pub quantity: f64,
    /// Цена за единицу. Отсутствующее значение в источнике = 0.
    pub price: f64,
    /// Сумма. Значение сервера авторитетно; иначе quantity * price.
    pub amount: f64,
    /// Целевое количество для brand/month (0 = цель не задана)
    #[serde(rename = "goalQty")]
    pub goal_qty: f64,
    /// Целевая сумма для brand/month (0 = цель не задана)
    #[serde(rename = "goalAmt")]
    pub goal_amt: f64,
}

impl SaleRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.value().trim().is_empty() {
            return Err("El id es obligatorio".into());
        }
        if self.category.trim().is_empty() {
            return Err("La categoría es obligatoria".into());
        }
        if self.brand.trim().is_empty() {
            return Err("La marca es obligatoria".into());
        }
        if self.quantity < 0.0 {
            return Err("La cantidad no puede ser negativa".into());
        }
        if self.price < 0.0 {
            return Err("El precio no puede ser negativo".into());
        }
        Ok(())
    }
}

// =============================================================================
// Wire DTOs
// =============================================================================

/// Запись продажи как её отдаёт источник данных. Набор полей рос от ревизии к
/// ревизии, поэтому все числовые поля опциональны, а мусорные значения
/// приводятся к 0 при декодировании.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaleRecordDto {
    pub id: String,
    pub category: String,
    pub brand: String,
    pub month: String,
    #[serde(default, deserialize_with = "serde_num::opt_lenient")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "serde_num::opt_lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "serde_num::opt_lenient")]
    pub amount: Option<f64>,
    #[serde(
        rename = "goalQty",
        default,
        deserialize_with = "serde_num::opt_lenient"
    )]
    pub goal_qty: Option<f64>,
    #[serde(
        rename = "goalAmt",
        default,
        deserialize_with = "serde_num::opt_lenient"
    )]
    pub goal_amt: Option<f64>,
}

impl SaleRecordDto {
    /// Convert the wire shape into the domain entity.
    ///
    /// Missing numerics become 0; a missing `amount` is derived as
    /// `quantity * price`; an unknown month label rejects the record.
    pub fn into_record(self) -> Result<SaleRecord, String> {
        let month = Month::from_label(&self.month)
            .ok_or_else(|| format!("Mes desconocido: '{}'", self.month))?;
        let quantity = self.quantity.unwrap_or(0.0).max(0.0);
        let price = self.price.unwrap_or(0.0).max(0.0);
        let amount = self.amount.unwrap_or(quantity * price);
        Ok(SaleRecord {
            id: SaleRecordId::new(self.id),
            category: self.category,
            brand: self.brand,
            month,
            quantity,
            price,
            amount,
            goal_qty: self.goal_qty.unwrap_or(0.0).max(0.0),
            goal_amt: self.goal_amt.unwrap_or(0.0).max(0.0),
        })
    }
}

/// Аргументы запроса "sales" (фильтры сервера, AND-семантика)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SalesQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Аргументы мутации "addSale"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub category: String,
    pub brand: String,
    pub month: Month,
    pub quantity: f64,
    pub price: f64,
    #[serde(rename = "goalQty")]
    pub goal_qty: f64,
    #[serde(rename = "goalAmt")]
    pub goal_amt: f64,
}

/// Ответ мутации "addSale"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSaleAck {
    pub id: SaleRecordId,
    pub amount: f64,
}

// Lenient numeric decoding: number, numeric string, null or garbage.
// Anything unparseable degrades to None instead of failing the whole payload.
mod serde_num {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn opt_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_decodes_full_record() {
        let json = r#"{
            "id": "s-1",
            "category": "Gaseosas",
            "brand": "Coca Cola",
            "month": "Enero",
            "quantity": 10,
            "price": 2.5,
            "amount": 25.0,
            "goalQty": 100,
            "goalAmt": 250
        }"#;
        let dto: SaleRecordDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record().unwrap();
        assert_eq!(record.month, Month::Enero);
        assert_eq!(record.quantity, 10.0);
        assert_eq!(record.amount, 25.0);
        assert_eq!(record.goal_qty, 100.0);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_dto_tolerates_missing_and_malformed_numerics() {
        // Older revisions do not send goals; broken feeds send strings or null.
        let json = r#"{
            "id": "s-2",
            "category": "Aguas",
            "brand": "San Luis",
            "month": "Febrero",
            "quantity": "8",
            "price": null,
            "goalQty": "n/a"
        }"#;
        let dto: SaleRecordDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record().unwrap();
        assert_eq!(record.quantity, 8.0);
        assert_eq!(record.price, 0.0);
        // amount absent -> derived from quantity * price
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.goal_qty, 0.0);
        assert_eq!(record.goal_amt, 0.0);
    }

    #[test]
    fn test_dto_rejects_unknown_month() {
        let dto = SaleRecordDto {
            id: "s-3".into(),
            category: "Gaseosas".into(),
            brand: "Pepsi".into(),
            month: "Smarch".into(),
            ..Default::default()
        };
        assert!(dto.into_record().is_err());
    }

    #[test]
    fn test_amount_from_server_is_authoritative() {
        let dto = SaleRecordDto {
            id: "s-4".into(),
            category: "Gaseosas".into(),
            brand: "Pepsi".into(),
            month: "Marzo".into(),
            quantity: Some(10.0),
            price: Some(2.0),
            amount: Some(19.0),
            ..Default::default()
        };
        let record = dto.into_record().unwrap();
        assert_eq!(record.amount, 19.0);
    }
}
