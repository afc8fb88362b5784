use serde::{Deserialize, Serialize};

/// Календарный месяц отчёта (испанские метки, как в источнике данных)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Month {
    /// Get the wire label as stored in sale records
    pub fn label(&self) -> &'static str {
        match self {
            Month::Enero => "Enero",
            Month::Febrero => "Febrero",
            Month::Marzo => "Marzo",
            Month::Abril => "Abril",
            Month::Mayo => "Mayo",
            Month::Junio => "Junio",
            Month::Julio => "Julio",
            Month::Agosto => "Agosto",
            Month::Septiembre => "Septiembre",
            Month::Octubre => "Octubre",
            Month::Noviembre => "Noviembre",
            Month::Diciembre => "Diciembre",
        }
    }

    /// Zero-based position in the calendar year (Enero = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get all months in calendar order
    pub fn all() -> Vec<Month> {
        vec![
            Month::Enero,
            Month::Febrero,
            Month::Marzo,
            Month::Abril,
            Month::Mayo,
            Month::Junio,
            Month::Julio,
            Month::Agosto,
            Month::Septiembre,
            Month::Octubre,
            Month::Noviembre,
            Month::Diciembre,
        ]
    }

    /// Парсинг из строки. Case-insensitive; "Setiembre" (перуанский вариант)
    /// принимается как алиас "Septiembre".
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "enero" => Some(Month::Enero),
            "febrero" => Some(Month::Febrero),
            "marzo" => Some(Month::Marzo),
            "abril" => Some(Month::Abril),
            "mayo" => Some(Month::Mayo),
            "junio" => Some(Month::Junio),
            "julio" => Some(Month::Julio),
            "agosto" => Some(Month::Agosto),
            "septiembre" | "setiembre" => Some(Month::Septiembre),
            "octubre" => Some(Month::Octubre),
            "noviembre" => Some(Month::Noviembre),
            "diciembre" => Some(Month::Diciembre),
            _ => None,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
