use contracts::dashboards::d400_sales_dashboard::FilterSelection;
use contracts::enums::Month;
use contracts::shared::catalog::CategoryCatalog;

/// Текущий выбор фильтра дашборда с каскадом категория → бренд.
///
/// Смена категории всегда сбрасывает бренд: бренд обязан принадлежать списку
/// брендов новой категории. Это инвариант, а не удобство.
#[derive(Debug, Clone)]
pub struct FilterSelector {
    catalog: CategoryCatalog,
    category: Option<String>,
    brand: Option<String>,
    month: Option<Month>,
    available_brands: Vec<String>,
}

impl FilterSelector {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self {
            catalog,
            category: None,
            brand: None,
            month: None,
            available_brands: Vec::new(),
        }
    }

    /// Set the category, clear the brand and recompute the available-brands
    /// list. An empty or unknown category yields an empty list.
    pub fn set_category(&mut self, category: &str) {
        self.brand = None;
        if category.is_empty() {
            self.category = None;
            self.available_brands = Vec::new();
        } else {
            self.category = Some(category.to_string());
            self.available_brands = self.catalog.brands_of(category);
        }
    }

    /// Accept the brand only if it is in the current available list.
    /// Returns whether the selection changed.
    pub fn set_brand(&mut self, brand: &str) -> bool {
        if self.available_brands.iter().any(|b| b == brand) {
            self.brand = Some(brand.to_string());
            true
        } else {
            false
        }
    }

    pub fn set_month(&mut self, month: Option<Month>) {
        self.month = month;
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.brand = None;
        self.month = None;
        self.available_brands = Vec::new();
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn available_brands(&self) -> &[String] {
        &self.available_brands
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Snapshot of the current restriction, used to tag fetch requests.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            category: self.category.clone(),
            brand: self.brand.clone(),
            month: self.month,
        }
    }
}
