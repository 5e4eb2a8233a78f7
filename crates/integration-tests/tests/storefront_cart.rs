//! Integration tests for the session cart.
//!
//! Cart forms answer with a 303; reqwest follows it, so each POST returns
//! the page named by `return_to`.

use reqwest::StatusCode;
use verdant_integration_tests::{TestContext, fake_catalog, new_client};

async fn add(ctx: &TestContext, name: &str, price: &str) -> String {
    let (status, body) = ctx
        .post_form(
            "/cart/add",
            &[("name", name), ("price", price), ("return_to", "/cart")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn remove(ctx: &TestContext, index: &str) -> String {
    let (status, body) = ctx
        .post_form("/cart/remove", &[("index", index), ("return_to", "/cart")])
        .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_empty_cart() {
    let ctx = TestContext::new(fake_catalog()).await;

    let (status, body) = ctx.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("Total: ৳0"));
}

#[tokio::test]
async fn test_add_then_remove_first_line() {
    let ctx = TestContext::new(fake_catalog()).await;

    add(&ctx, "Rose", "50").await;
    let body = add(&ctx, "Tulip", "70").await;
    assert!(body.contains("Total: ৳120"));

    let body = remove(&ctx, "0").await;
    assert!(body.contains("Tulip-৳70"));
    assert!(!body.contains("Rose-৳50"));
    assert!(body.contains("Total: ৳70"));
}

#[tokio::test]
async fn test_duplicate_lines_are_kept() {
    let ctx = TestContext::new(fake_catalog()).await;

    add(&ctx, "Rose", "50").await;
    let body = add(&ctx, "Rose", "50").await;

    assert_eq!(body.matches("Rose-৳50").count(), 2);
    assert!(body.contains("Total: ৳100"));
}

#[tokio::test]
async fn test_out_of_range_removal_is_a_no_op() {
    let ctx = TestContext::new(fake_catalog()).await;

    add(&ctx, "Rose", "50").await;
    let body = remove(&ctx, "5").await;
    assert!(body.contains("Total: ৳50"));

    let body = remove(&ctx, "not-a-number").await;
    assert!(body.contains("Rose-৳50"));
}

#[tokio::test]
async fn test_unparseable_price_adds_zero() {
    let ctx = TestContext::new(fake_catalog()).await;

    add(&ctx, "Fern", "12.5").await;
    let body = add(&ctx, "", "abc").await;

    assert!(body.contains("Unknown-৳0"));
    assert!(body.contains("Total: ৳12.5"));
}

#[tokio::test]
async fn test_add_redirects_back_to_catalog_page() {
    let ctx = TestContext::new(fake_catalog()).await;

    let (status, body) = ctx
        .post_form(
            "/cart/add",
            &[("name", "Rose"), ("price", "50"), ("return_to", "/categories/2")],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Flowering Plant</h1>"));
    assert!(body.contains("Cart (1)"));
}

#[tokio::test]
async fn test_add_keeps_category_heading() {
    let ctx = TestContext::new(fake_catalog()).await;

    let (status, body) = ctx
        .post_form(
            "/cart/add",
            &[("name", "Rose"), ("price", "50"), ("return_to", "/categories/2?name=Roses")],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Roses</h1>"));
    assert!(body.contains("Total: ৳50"));
}

#[tokio::test]
async fn test_foreign_return_to_is_ignored() {
    let ctx = TestContext::new(fake_catalog()).await;

    let resp = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
        .post(ctx.url("/cart/add"))
        .form(&[("name", "Rose"), ("price", "50"), ("return_to", "https://evil.example")])
        .send()
        .await
        .expect("Failed to post form");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn test_cart_is_per_session() {
    let ctx = TestContext::new(fake_catalog()).await;

    add(&ctx, "Rose", "50").await;

    let other_visitor = new_client();
    let body = other_visitor
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains("Your cart is empty"));

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("Rose-৳50"));
}
