//! Cart route handlers.
//!
//! The cart is a [`Cart`] serialized into the visitor's session. Mutations
//! are plain form posts that answer with a 303 back to the page the form
//! came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::Value;
use tower_sessions::Session;
use tracing::instrument;
use verdant_core::normalize::{self, DEFAULT_NAME};
use verdant_core::{Cart, CartLine, Price};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    /// Position in the cart, posted back by the remove form.
    pub index: usize,
    pub name: String,
    pub price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView {
                    index,
                    name: line.name.clone(),
                    price: Price::from_amount(line.price).to_string(),
                })
                .collect(),
            total: cart.total_price().to_string(),
            count: cart.len(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session; a session without one has an empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored cart does not
/// deserialize.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Load the cart for display, falling back to an empty cart on session errors.
pub async fn load_cart_or_empty(session: &Session) -> Cart {
    match load_cart(session).await {
        Ok(cart) => cart,
        Err(e) => {
            tracing::warn!("Failed to load cart from session: {e}");
            Cart::new()
        }
    }
}

async fn store_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Only same-site absolute paths are valid redirect targets.
#[must_use]
pub fn safe_return_to(target: Option<&str>) -> String {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && path.bytes().all(|b| b.is_ascii_graphic() && b != b'\\') =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// Every field is optional text; values are coerced rather than validated.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: Option<String>,
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub return_to: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart_or_empty(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
        return_to: "/cart".to_string(),
    }
}

/// Append a line to the cart.
///
/// A blank name becomes "Unknown" and the price is coerced the same way
/// catalog prices are, so a tampered form can only ever add a 0-priced line.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let name = form
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let price = form
        .price
        .map(Value::String)
        .as_ref()
        .and_then(normalize::coerce_number)
        .unwrap_or(0.0);

    let mut cart = load_cart(&session).await?;
    cart.add_line(CartLine::new(name.clone(), price));
    store_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added plant", Some(&[("name", name.as_str())][..]));
    tracing::info!(lines = cart.len(), total = cart.total(), "Cart line added");

    Ok(Redirect::to(&safe_return_to(form.return_to.as_deref())))
}

/// Remove the line at the posted index.
///
/// An index that is missing, non-numeric, or out of range leaves the cart
/// unchanged.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let redirect = Redirect::to(&safe_return_to(form.return_to.as_deref()));

    let Some(index) = form
        .index
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
    else {
        tracing::warn!(index = ?form.index, "Ignoring cart removal without a valid index");
        return Ok(redirect);
    };

    let mut cart = load_cart(&session).await?;
    match cart.remove_line(index) {
        Some(line) => {
            store_cart(&session, &cart).await?;
            add_breadcrumb("cart", "Removed plant", Some(&[("name", line.name.as_str())][..]));
            tracing::info!(lines = cart.len(), total = cart.total(), "Cart line removed");
        }
        None => {
            tracing::debug!(index, lines = cart.len(), "Cart removal index out of range");
        }
    }

    Ok(redirect)
}
