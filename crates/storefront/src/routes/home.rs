//! Home page handler: catalog sections plus the cart drawer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use kubemart_core::CatalogProduct;
use tracing::instrument;

use super::cart::CartView;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub name: String,
    /// Display price, e.g. `$19.99`.
    pub price: String,
    /// Raw price echoed back by the add-to-cart form.
    pub price_value: String,
    pub image: String,
    pub discount: Option<String>,
}

impl From<&CatalogProduct> for ProductCardView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format!("${:.2}", product.price),
            price_value: product.price.to_string(),
            image: product.image.clone(),
            discount: product.discount.map(|d| format!("-{d}%")),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub best_sellers: Vec<ProductCardView>,
    pub on_sale: Vec<ProductCardView>,
    pub all: Vec<ProductCardView>,
    /// Set when the catalog gateway was unreachable.
    pub catalog_error: Option<String>,
    pub cart: CartView,
}

/// Display the storefront home page.
///
/// One catalog fetch and one cart fetch per page load; both degrade to an
/// empty state rather than failing the page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let cards = |products: &[CatalogProduct]| -> Vec<ProductCardView> {
        products.iter().map(ProductCardView::from).collect()
    };

    let (best_sellers, on_sale, all, catalog_error) = match state.catalog().catalog().await {
        Ok(catalog) => (
            cards(&catalog.best_sellers),
            cards(&catalog.on_sale),
            cards(&catalog.all),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            (
                Vec::new(),
                Vec::new(),
                Vec::new(),
                Some("Products are unavailable right now.".to_string()),
            )
        }
    };

    let cart = match state.cart().items().await {
        Ok(items) => CartView::from_snapshot(&items, state.config().tax_rate, None),
        Err(e) => {
            tracing::warn!("Failed to fetch cart: {e}");
            CartView::empty()
        }
    };

    HomeTemplate {
        best_sellers,
        on_sale,
        all,
        catalog_error,
        cart,
    }
}
