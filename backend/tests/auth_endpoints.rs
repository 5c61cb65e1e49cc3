//! Account endpoint walk over the fixture identity gateway.

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

#[actix_web::test]
async fn login_issues_a_session_and_me_reads_it() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada.lovelace@example.com", "password": "correct horse" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned();
    let user: Value = test::read_body_json(res).await;
    assert_eq!(user["email"], "ada.lovelace@example.com");
    assert_eq!(user["name"], "Ada Lovelace");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = test::read_body_json(res).await;
    assert_eq!(user["email"], "ada.lovelace@example.com");
}

#[actix_web::test]
async fn me_without_a_session_is_unauthorised() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn invalid_login_submissions_name_their_fields() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "not-an-address", "password": "short" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    let fields = &body["details"]["fields"];
    assert!(fields["email"].is_array());
    assert!(fields["password"].is_array());
}

#[actix_web::test]
async fn short_usernames_fail_registration_validation() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "userName": "ab",
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "correct horse",
                "confirmPassword": "correct horse"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["details"]["fields"]["userName"].is_array());
}

#[actix_web::test]
async fn registration_returns_the_confirmation_message() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "userName": "ada1815",
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "correct horse",
                "confirmPassword": "correct horse"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["message"],
        "Account created. Check your inbox for a verification code."
    );
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "correct horse" }))
            .to_request(),
    )
    .await;
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let emptied = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie rewritten");
    assert!(emptied.value().is_empty() || emptied.max_age().is_some_and(|age| age.is_zero()));
}

#[actix_web::test]
async fn laptop_listing_is_public() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/laptops?search=apple")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = test::read_body_json(res).await;
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0]["brand"]["name"], "Apple");
}
