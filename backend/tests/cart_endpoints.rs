//! End-to-end cart walk over the local fixture store.
//!
//! Exercises real Actix handlers with the in-process adapters: sign in,
//! then add, merge, update, remove, and clear cart lines, checking the
//! derived totals and error statuses along the way.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use techzone_backend::inbound::http;
use techzone_backend::test_support::{local_http_state, test_session_middleware};

async fn spawn_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(local_http_state()))
            .service(
                web::scope("/api/v1")
                    .wrap(test_session_middleware())
                    .configure(http::configure),
            ),
    )
    .await
}

/// Sign in through the fixture gateway and return the session cookie.
async fn sign_in<S>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "correct horse" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}

#[actix_web::test]
async fn cart_requires_a_session() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/cart").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn full_cart_walk() {
    let app = spawn_app().await;
    let cookie = sign_in(&app).await;

    // Empty to start.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cart")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cart: Value = test::read_body_json(res).await;
    assert_eq!(cart["totalItems"], 0);

    // Add two units of the Dell XPS base variant.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie.clone())
            .set_json(json!({ "productId": 101, "quantity": 2 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cart: Value = test::read_body_json(res).await;
    assert_eq!(cart["totalItems"], 2);
    assert_eq!(cart["items"][0]["productId"], 101);
    let item_id = cart["items"][0]["id"].as_u64().expect("line id");

    // Adding the same variant merges into the existing line.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie.clone())
            .set_json(json!({ "productId": 101, "quantity": 1 }))
            .to_request(),
    )
    .await;
    let cart: Value = test::read_body_json(res).await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart["totalItems"], 3);

    // Pushing the merged line past available stock is a conflict.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie.clone())
            .set_json(json!({ "productId": 101, "quantity": 20 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["message"],
        "Cannot add 20 more. Only 19 items available"
    );

    // Zero quantity is rejected before any lookup.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/cart/items/{item_id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "quantity": 0 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Quantity must be greater than 0");

    // Set the quantity down to one.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/cart/items/{item_id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "quantity": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cart: Value = test::read_body_json(res).await;
    assert_eq!(cart["totalItems"], 1);

    // Unknown lines are not found.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/cart/items/424242")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Add a second product, then clear everything.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie.clone())
            .set_json(json!({ "productId": 204, "quantity": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/cart")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let receipt: Value = test::read_body_json(res).await;
    assert_eq!(receipt["itemsRemoved"], 2);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cart")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let cart: Value = test::read_body_json(res).await;
    assert_eq!(cart["totalItems"], 0);
}

#[actix_web::test]
async fn unknown_products_and_types_are_rejected() {
    let app = spawn_app().await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie.clone())
            .set_json(json!({ "productId": 9999, "quantity": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Product 9999 not found");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie)
            .set_json(json!({ "productId": 101, "productType": "Monitor", "quantity": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn out_of_stock_variants_conflict() {
    let app = spawn_app().await;
    let cookie = sign_in(&app).await;

    // Variant 403 is seeded with zero stock.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(cookie)
            .set_json(json!({ "productId": 403, "quantity": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Only 0 items available in stock");
}
