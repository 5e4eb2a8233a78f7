//! Catalog page handlers: category list, plant grid, and plant detail overlay.
//!
//! Categories and plants are fetched concurrently and each section degrades
//! on its own. A catalog failure turns into a message inside the page, never
//! into an error response.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use verdant_core::{Cart, CatalogEntity, CategoryId, PlantId};

use super::cart::{CartView, load_cart_or_empty};
use crate::catalog::CatalogError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Shown in place of a section whose fetch failed.
pub const MSG_FAILED: &str = "Something went wrong";
/// Shown when a plant listing is empty.
pub const MSG_NO_PLANTS: &str = "No plants found";
/// Shown when the category listing is empty.
pub const MSG_NO_CATEGORIES: &str = "No categories found";

const ALL_PLANTS_TITLE: &str = "All Plants";
const FALLBACK_CATEGORY_TITLE: &str = "Category";

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub href: Option<String>,
    pub active: bool,
}

/// Plant display data for templates.
#[derive(Clone)]
pub struct PlantView {
    pub name: String,
    pub image: Option<String>,
    pub description: String,
    /// Formatted price, e.g. `৳120`.
    pub price: String,
    /// Bare amount posted by the add-to-cart form.
    pub price_amount: String,
    pub detail_href: Option<String>,
}

/// Detail overlay display data.
#[derive(Clone)]
pub struct DetailView {
    pub plant: Option<PlantView>,
    pub message: Option<String>,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Link to `{prefix}/{id}` when the ID is safe to place in a path segment.
fn id_href(prefix: &str, id: &str) -> Option<String> {
    let linkable = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    linkable.then(|| format!("{prefix}/{id}"))
}

/// Path back to a category page, keeping an explicit `?name=` heading.
fn category_return_to(id: &CategoryId, heading: Option<&str>) -> String {
    match heading {
        Some(name) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("name", name)
                .finish();
            format!("/categories/{id}?{query}")
        }
        None => format!("/categories/{id}"),
    }
}

impl CategoryView {
    fn new(entity: &CatalogEntity, active_id: Option<&CategoryId>) -> Self {
        Self {
            name: entity.name.clone(),
            href: id_href("/categories", &entity.id),
            active: active_id.is_some_and(|active| active.as_str() == entity.id),
        }
    }
}

impl From<&CatalogEntity> for PlantView {
    fn from(entity: &CatalogEntity) -> Self {
        Self {
            name: entity.name.clone(),
            image: entity.has_image().then(|| entity.image.clone()),
            description: entity.description.clone(),
            price: entity.price().to_string(),
            price_amount: entity.price.to_string(),
            detail_href: id_href("/plants", &entity.id),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub title: String,
    pub categories: Vec<CategoryView>,
    pub categories_message: Option<String>,
    pub plants: Vec<PlantView>,
    pub plants_message: Option<String>,
    pub cart: CartView,
    pub detail: Option<DetailView>,
    /// Path forms on this page redirect back to.
    pub return_to: String,
}

/// Everything a catalog page is assembled from.
struct PageParts<'a> {
    title: String,
    active_category: Option<&'a CategoryId>,
    categories: std::result::Result<Vec<CatalogEntity>, CatalogError>,
    plants: std::result::Result<Vec<CatalogEntity>, CatalogError>,
    cart: &'a Cart,
    detail: Option<DetailView>,
    return_to: String,
}

impl CatalogTemplate {
    fn assemble(parts: PageParts<'_>) -> Self {
        let (categories, categories_message) = match parts.categories {
            Ok(list) if list.is_empty() => (Vec::new(), Some(MSG_NO_CATEGORIES.to_string())),
            Ok(list) => (
                list.iter()
                    .map(|c| CategoryView::new(c, parts.active_category))
                    .collect(),
                None,
            ),
            Err(e) => {
                tracing::error!("Failed to fetch categories: {e}");
                (Vec::new(), Some(MSG_FAILED.to_string()))
            }
        };

        let (plants, plants_message) = match parts.plants {
            Ok(list) if list.is_empty() => (Vec::new(), Some(MSG_NO_PLANTS.to_string())),
            Ok(list) => (list.iter().map(PlantView::from).collect(), None),
            Err(e) => {
                tracing::error!("Failed to fetch plants: {e}");
                (Vec::new(), Some(MSG_FAILED.to_string()))
            }
        };

        Self {
            title: parts.title,
            categories,
            categories_message,
            plants,
            plants_message,
            cart: CartView::from(parts.cart),
            detail: parts.detail,
            return_to: parts.return_to,
        }
    }
}

/// Category page query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Heading to show; looked up from the category list when absent.
    pub name: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Home page: every category and every plant.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> CatalogTemplate {
    let cart = load_cart_or_empty(&session).await;
    let catalog = state.catalog();
    let (categories, plants) = tokio::join!(catalog.categories(), catalog.plants());

    CatalogTemplate::assemble(PageParts {
        title: ALL_PLANTS_TITLE.to_string(),
        active_category: None,
        categories,
        plants,
        cart: &cart,
        detail: None,
        return_to: "/".to_string(),
    })
}

/// Plants in one category, with that category highlighted.
#[instrument(skip(state, session))]
pub async fn category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<CatalogTemplate> {
    let id: CategoryId = id
        .parse()
        .map_err(|e| AppError::BadRequest(format!("category id: {e}")))?;

    let cart = load_cart_or_empty(&session).await;
    let catalog = state.catalog();
    let (categories, plants) = tokio::join!(catalog.categories(), catalog.plants_in_category(&id));

    let heading = query
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let return_to = category_return_to(&id, heading.as_deref());

    let title = heading
        .or_else(|| {
            categories
                .as_ref()
                .ok()?
                .iter()
                .find(|c| c.id == id.as_str())
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| FALLBACK_CATEGORY_TITLE.to_string());

    Ok(CatalogTemplate::assemble(PageParts {
        title,
        active_category: Some(&id),
        categories,
        plants,
        cart: &cart,
        detail: None,
        return_to,
    }))
}

/// Home page with the detail overlay open for one plant.
#[instrument(skip(state, session))]
pub async fn plant(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<CatalogTemplate> {
    let id: PlantId = id
        .parse()
        .map_err(|e| AppError::BadRequest(format!("plant id: {e}")))?;

    let cart = load_cart_or_empty(&session).await;
    let catalog = state.catalog();
    let (categories, plants, detail) =
        tokio::join!(catalog.categories(), catalog.plants(), catalog.plant(&id));

    let detail = match detail {
        Ok(Some(entity)) => DetailView {
            plant: Some(PlantView::from(&entity)),
            message: None,
        },
        Ok(None) => DetailView {
            plant: None,
            message: Some(MSG_NO_PLANTS.to_string()),
        },
        Err(e) => {
            tracing::error!("Failed to fetch plant {id}: {e}");
            DetailView {
                plant: None,
                message: Some(MSG_FAILED.to_string()),
            }
        }
    };

    Ok(CatalogTemplate::assemble(PageParts {
        title: ALL_PLANTS_TITLE.to_string(),
        active_category: None,
        categories,
        plants,
        cart: &cart,
        detail: Some(detail),
        return_to: format!("/plants/{id}"),
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use verdant_core::CartLine;

    use super::*;

    fn entity(value: &serde_json::Value) -> CatalogEntity {
        CatalogEntity::from_value(value)
    }

    fn failure() -> CatalogError {
        CatalogError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        }
    }

    fn parts<'a>(
        cart: &'a Cart,
        categories: std::result::Result<Vec<CatalogEntity>, CatalogError>,
        plants: std::result::Result<Vec<CatalogEntity>, CatalogError>,
    ) -> PageParts<'a> {
        PageParts {
            title: ALL_PLANTS_TITLE.to_string(),
            active_category: None,
            categories,
            plants,
            cart,
            detail: None,
            return_to: "/".to_string(),
        }
    }

    #[test]
    fn test_id_href() {
        assert_eq!(id_href("/plants", "12").as_deref(), Some("/plants/12"));
        assert_eq!(id_href("/plants", ""), None);
        assert_eq!(id_href("/plants", "a b"), None);
        assert_eq!(id_href("/plants", "../x"), None);
    }

    #[test]
    fn test_category_return_to_keeps_heading() {
        let id = CategoryId::new("2");
        assert_eq!(category_return_to(&id, None), "/categories/2");
        assert_eq!(
            category_return_to(&id, Some("Roses")),
            "/categories/2?name=Roses"
        );
        assert_eq!(
            category_return_to(&id, Some("Red & White")),
            "/categories/2?name=Red+%26+White"
        );
        assert_eq!(
            crate::routes::cart::safe_return_to(Some(&category_return_to(&id, Some("Red Roses")))),
            "/categories/2?name=Red+Roses"
        );
    }

    #[test]
    fn test_plant_view() {
        let view = PlantView::from(&entity(&json!({
            "id": 3, "name": "Aloe", "price": "12.5", "image": ""
        })));
        assert_eq!(view.price, "৳12.5");
        assert_eq!(view.price_amount, "12.5");
        assert_eq!(view.image, None);
        assert_eq!(view.detail_href.as_deref(), Some("/plants/3"));
    }

    #[test]
    fn test_active_category() {
        let active = CategoryId::new("2");
        let view = CategoryView::new(&entity(&json!({ "id": 2, "category_name": "Herbs" })), Some(&active));
        assert!(view.active);
        let other = CategoryView::new(&entity(&json!({ "id": 3 })), Some(&active));
        assert!(!other.active);
        assert_eq!(other.name, "Unknown");
    }

    #[test]
    fn test_sections_fail_independently() {
        let cart = Cart::new();
        let page = CatalogTemplate::assemble(parts(
            &cart,
            Err(failure()),
            Ok(vec![entity(&json!({ "id": 1, "name": "Mango" }))]),
        ));
        assert_eq!(page.categories_message.as_deref(), Some(MSG_FAILED));
        assert_eq!(page.plants.len(), 1);
        assert!(page.plants_message.is_none());
    }

    #[test]
    fn test_empty_plants_is_a_state() {
        let cart = Cart::new();
        let page = CatalogTemplate::assemble(parts(&cart, Ok(vec![]), Ok(vec![])));
        assert_eq!(page.plants_message.as_deref(), Some(MSG_NO_PLANTS));
        assert_eq!(page.categories_message.as_deref(), Some(MSG_NO_CATEGORIES));
    }

    #[test]
    fn test_page_renders() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::new("Rose", 50.0));
        let page = CatalogTemplate::assemble(parts(
            &cart,
            Ok(vec![entity(&json!({ "id": 1, "category_name": "Flowers" }))]),
            Err(failure()),
        ));

        let html = page.render().unwrap_or_default();
        assert!(html.contains("Flowers"));
        assert!(html.contains(MSG_FAILED));
        assert!(html.contains("Total: ৳50"));
    }
}
