use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use catalog_api::routes;

mod common;

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.repo()))
                .configure(routes::configure),
        )
        .await
    };
}

fn tag_ids(product: &Value) -> Vec<i64> {
    product["tags"]
        .as_array()
        .map(|tags| tags.iter().filter_map(|tag| tag["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_category_endpoints() {
    let test_db = common::TestDb::new("test_api_categories.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Shoes"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Shoes");

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["products"], json!([]));

    let req = test::TestRequest::put()
        .uri(&format!("/api/categories/{id}"))
        .set_json(json!({"name": "Boots"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["name"], "Boots");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/categories/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Category not found"}));
}

#[actix_web::test]
async fn test_missing_records_return_not_found() {
    let test_db = common::TestDb::new("test_api_not_found.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/tags/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Tag not found");

    let req = test::TestRequest::put()
        .uri("/api/products/42")
        .set_json(json!({"stock": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product not found");

    let req = test::TestRequest::delete()
        .uri("/api/categories/42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_bodies_are_rejected() {
    let test_db = common::TestDb::new("test_api_invalid_bodies.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .set_json(json!({"name": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Cap", "price": -1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Cap", "price": 5, "category_id": 77}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn test_product_tags_follow_tag_ids() {
    let test_db = common::TestDb::new("test_api_product_tags.db");
    let app = init_app!(test_db);

    let mut tag_id_by_name = Vec::new();
    for name in ["red", "green", "blue"] {
        let req = test::TestRequest::post()
            .uri("/api/tags")
            .set_json(json!({ "name": name }))
            .to_request();
        let tag: Value = test::call_and_read_body_json(&app, req).await;
        tag_id_by_name.push(tag["id"].as_i64().unwrap());
    }
    let (red, green, blue) = (tag_id_by_name[0], tag_id_by_name[1], tag_id_by_name[2]);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Paint"}))
        .to_request();
    let category: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "name": "Wall Paint",
            "price": 24.5,
            "stock": 10,
            "category_id": category["id"],
            "tagIds": [red, green],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["price_cents"], 2450);
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{id}"))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tag_ids(&product), vec![red, green]);
    assert_eq!(product["category"]["name"], "Paint");

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{id}"))
        .set_json(json!({"stock": 4, "tagIds": [green, blue]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["stock"], 4);
    assert_eq!(updated["name"], "Wall Paint");
    let mut ids = tag_ids(&updated);
    ids.sort();
    assert_eq!(ids, vec![green, blue]);

    // An empty list leaves the current tags in place.
    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{id}"))
        .set_json(json!({"tagIds": [], "category_id": null}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    let mut ids = tag_ids(&updated);
    ids.sort();
    assert_eq!(ids, vec![green, blue]);
    assert_eq!(updated["category_id"], Value::Null);
    assert_eq!(updated["category"], Value::Null);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tags/{red}"))
        .to_request();
    let tag: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tag["products"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tags/{green}"))
        .to_request();
    let tag: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tag["products"], json!([]));
}
