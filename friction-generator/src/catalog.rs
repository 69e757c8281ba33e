//! Fixed seed data the generator draws from.

/// A product that can be added to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Immutable seed data for one storefront.
///
/// Every list must be non-empty; [`Catalog::storefront`] provides the
/// standard data set.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Every term a visitor may search for, problematic ones included.
    pub search_terms: Vec<String>,
    /// Terms that never match anything in the store.
    pub problematic_terms: Vec<String>,
    /// Pages that exist on the site.
    pub site_urls: Vec<String>,
    /// Pages that always answer 404.
    pub broken_urls: Vec<String>,
    /// Size of the shared visitor pool; ids run from `user_0001` upward.
    pub user_pool: u32,
}

impl Catalog {
    /// The electronics-accessories storefront.
    pub fn storefront() -> Self {
        let products = vec![
            Product::new("prod_001", "Wireless Mouse", 29.99),
            Product::new("prod_002", "USB-C Cable", 15.99),
            Product::new("prod_003", "Laptop Stand", 49.99),
            Product::new("prod_004", "Mechanical Keyboard", 89.99),
            Product::new("prod_005", "Wireless Headphones", 129.99),
            Product::new("prod_006", "Phone Case", 19.99),
            Product::new("prod_007", "Screen Protector", 9.99),
            Product::new("prod_008", "Power Bank", 39.99),
            Product::new("prod_009", "Webcam", 79.99),
            Product::new("prod_010", "External SSD", 119.99),
        ];

        // Misspellings outside `problematic_terms` still return results.
        let search_terms = [
            "wireless mouse",
            "laptop charger",
            "usb-c cable",
            "wireless headphone",
            "usbc cable",
            "wireles headphones",
            "laptop chargr",
            "mous",
            "keybord",
            "headfone",
            "screen protecter",
            "blutooth speaker",
        ];

        let problematic_terms = [
            "usbc cable",
            "wireles headphones",
            "laptop chargr",
            "mous",
            "keybord",
        ];

        let site_urls = [
            "/",
            "/products",
            "/cart",
            "/checkout",
            "/checkout/payment",
            "/product/prod_001",
            "/product/prod_002",
            "/product/prod_003",
        ];

        let broken_urls = ["/product/old-laptop-123", "/product/discontinued-item"];

        Self {
            products,
            search_terms: to_strings(&search_terms),
            problematic_terms: to_strings(&problematic_terms),
            site_urls: to_strings(&site_urls),
            broken_urls: to_strings(&broken_urls),
            user_pool: 200,
        }
    }

    /// Whether a search for `term` is guaranteed to come back empty.
    pub fn is_problematic(&self, term: &str) -> bool {
        self.problematic_terms.iter().any(|t| t == term)
    }

    /// Whether `url` points at a page that no longer exists.
    pub fn is_broken(&self, url: &str) -> bool {
        self.broken_urls.iter().any(|u| u == url)
    }

    /// URLs error logs are drawn from: broken pages first, then the live site.
    pub fn error_urls(&self) -> Vec<&str> {
        self.broken_urls
            .iter()
            .chain(self.site_urls.iter())
            .map(String::as_str)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::storefront()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
