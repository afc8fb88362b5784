use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Fallback colour for brands missing from the catalog.
pub const DEFAULT_BRAND_COLOR: &str = "#9ca3af";

/// Одна карточка бренда в каталоге
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandInfo {
    pub name: String,
    /// Display colour for chart series (hex)
    pub color: String,
    /// External logo asset URL
    #[serde(rename = "logoUrl")]
    pub logo_url: String,
}

/// Категория с упорядоченным списком брендов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub brands: Vec<BrandInfo>,
}

/// Статический каталог категорий и брендов: порядок категорий и брендов
/// значим (им определяется порядок выпадающих списков и серий на графиках).
/// Только чтение; в рантайме не мутируется.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub categories: Vec<CategoryInfo>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<CategoryInfo>) -> Self {
        Self { categories }
    }

    /// Ordered category names.
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Ordered brand names registered under `category`. Empty for an
    /// unknown or empty category.
    pub fn brands_of(&self, category: &str) -> Vec<String> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.brands.iter().map(|b| b.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Category a brand is registered under, if any.
    pub fn category_of(&self, brand: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.brands.iter().any(|b| b.name == brand))
            .map(|c| c.name.as_str())
    }

    /// Display colour for a brand; unknown brands get the neutral default.
    pub fn color_of(&self, brand: &str) -> &str {
        self.brand_info(brand)
            .map(|b| b.color.as_str())
            .unwrap_or(DEFAULT_BRAND_COLOR)
    }

    /// Logo URL for a brand, if registered.
    pub fn logo_of(&self, brand: &str) -> Option<&str> {
        self.brand_info(brand).map(|b| b.logo_url.as_str())
    }

    /// Does `brand` belong to the brand list registered under `category`?
    pub fn is_valid_pair(&self, category: &str, brand: &str) -> bool {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.brands.iter().any(|b| b.name == brand))
            .unwrap_or(false)
    }

    fn brand_info(&self, brand: &str) -> Option<&BrandInfo> {
        self.categories
            .iter()
            .flat_map(|c| c.brands.iter())
            .find(|b| b.name == brand)
    }
}

/// Каталог по умолчанию (данные дашборда продаж: газировки и воды)
pub static DEFAULT_CATALOG: Lazy<CategoryCatalog> = Lazy::new(|| {
    CategoryCatalog::new(vec![
        CategoryInfo {
            name: "Gaseosas".to_string(),
            brands: vec![
                BrandInfo {
                    name: "Coca Cola".to_string(),
                    color: "#ef4444".to_string(),
                    logo_url:
                        "https://upload.wikimedia.org/wikipedia/commons/c/ce/Coca-Cola_logo.svg"
                            .to_string(),
                },
                BrandInfo {
                    name: "Pepsi".to_string(),
                    color: "#2563eb".to_string(),
                    logo_url:
                        "https://upload.wikimedia.org/wikipedia/commons/0/0f/Pepsi_logo_2014.svg"
                            .to_string(),
                },
            ],
        },
        CategoryInfo {
            name: "Aguas".to_string(),
            brands: vec![
                BrandInfo {
                    name: "San Luis".to_string(),
                    color: "#3b82f6".to_string(),
                    logo_url:
                        "https://images.seeklogo.com/logo-png/0/1/agua-san-luis-logo-png_seeklogo-4731.png"
                            .to_string(),
                },
                BrandInfo {
                    name: "San Mateo".to_string(),
                    color: "#10b981".to_string(),
                    logo_url: "https://estudiocrater.com/wp-content/uploads/2017/11/SM-01-1.jpg"
                        .to_string(),
                },
            ],
        },
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brands_of() {
        assert_eq!(
            DEFAULT_CATALOG.brands_of("Aguas"),
            vec!["San Luis".to_string(), "San Mateo".to_string()]
        );
        assert_eq!(
            DEFAULT_CATALOG.brands_of("Gaseosas"),
            vec!["Coca Cola".to_string(), "Pepsi".to_string()]
        );
        assert!(DEFAULT_CATALOG.brands_of("Cervezas").is_empty());
        assert!(DEFAULT_CATALOG.brands_of("").is_empty());
    }

    #[test]
    fn test_color_fallback() {
        assert_eq!(DEFAULT_CATALOG.color_of("Coca Cola"), "#ef4444");
        assert_eq!(DEFAULT_CATALOG.color_of("Inca Kola"), DEFAULT_BRAND_COLOR);
    }

    #[test]
    fn test_category_membership() {
        assert!(DEFAULT_CATALOG.is_valid_pair("Gaseosas", "Pepsi"));
        assert!(!DEFAULT_CATALOG.is_valid_pair("Aguas", "Pepsi"));
        assert_eq!(DEFAULT_CATALOG.category_of("San Mateo"), Some("Aguas"));
        assert_eq!(DEFAULT_CATALOG.category_of("Fanta"), None);
    }

    #[test]
    fn test_logo_lookup() {
        assert!(DEFAULT_CATALOG.logo_of("San Luis").is_some());
        assert!(DEFAULT_CATALOG.logo_of("Fanta").is_none());
    }
}
