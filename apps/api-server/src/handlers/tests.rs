//! Route tests over in-memory repositories and asset store.

use std::io::Cursor;
use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::{Value, json};
use uuid::Uuid;

use packblog_core::BlogService;
use packblog_core::domain::{BlogDraft, DEFAULT_AUTHOR, DEFAULT_READ_TIME, Visitor};
use packblog_core::ports::{AssetStore, ImageDimensions, UploadFile};
use packblog_infra::{
    InMemoryAssetStore, InMemoryBlogRepository, InMemoryVisitorRepository, UnconfiguredAssetStore,
};

use super::configure_routes;
use crate::state::AppState;

const BOUNDARY: &str = "packblog-test-boundary";
const MAX_UPLOAD: usize = 1024 * 1024;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

struct Fixture {
    state: AppState,
    assets: Arc<InMemoryAssetStore>,
}

fn fixture_with(visitors: Vec<Visitor>) -> Fixture {
    let assets = Arc::new(InMemoryAssetStore::new("custom-pack-boxes/blogs"));
    let state = AppState::from_parts(
        Arc::new(InMemoryBlogRepository::new()),
        Arc::new(InMemoryVisitorRepository::with_visitors(visitors)),
        assets.clone(),
        MAX_UPLOAD,
    );
    Fixture { state, assets }
}

fn fixture() -> Fixture {
    fixture_with(Vec::new())
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn multipart_body(fields: &[(&str, &str)], cover: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = cover {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"coverImage\"; filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart(req: test::TestRequest, fields: &[(&str, &str)], cover: Option<&[u8]>) -> test::TestRequest {
    req.insert_header((
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    ))
    .set_payload(multipart_body(fields, cover))
}

fn create_request(fields: &[(&str, &str)], cover: Option<&[u8]>) -> test::TestRequest {
    multipart(test::TestRequest::post().uri("/api/blogs"), fields, cover)
}

const HELLO: &[(&str, &str)] = &[("title", "Hello World"), ("excerpt", "E"), ("content", "C")];

async fn json_body(res: ServiceResponse) -> (StatusCode, Value) {
    let status = res.status();
    (status, test::read_body_json(res).await)
}

async fn text_body(res: ServiceResponse) -> (StatusCode, String) {
    let status = res.status();
    let bytes = test::read_body(res).await;
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn assert_generated_slug(slug: &str, base: &str) {
    let suffix = slug.strip_prefix(&format!("{base}-")).unwrap();
    assert_eq!(suffix.len(), 6);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!(fixture().state);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_create_publish_read_delete() {
    let app = test_app!(fixture().state);

    // Create
    let req = create_request(HELLO, None).to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Blog created successfully");
    assert_eq!(body["data"]["published"], false);
    assert_eq!(body["data"]["author"], "Admin");
    assert_eq!(body["data"]["readTime"], 5);
    let slug = body["data"]["slug"].as_str().unwrap().to_string();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_generated_slug(&slug, "hello-world");

    // Drafts are not public
    let req = test::TestRequest::get()
        .uri(&format!("/api/public/blogs/{slug}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    // Publish
    let req = test::TestRequest::put()
        .uri(&format!("/api/blogs/{id}/publish"))
        .set_json(json!({"published": true}))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog published successfully");
    assert_eq!(body["data"]["published"], true);

    // Public JSON read counts a view
    let req = test::TestRequest::get()
        .uri(&format!("/api/public/blogs/{slug}"))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blog"]["title"], "Hello World");
    assert_eq!(body["data"]["blog"]["views"], 1);
    assert_eq!(body["data"]["related"], json!([]));

    // Public page
    let req = test::TestRequest::get()
        .uri(&format!("/blogs/{slug}"))
        .to_request();
    let (status, html) = text_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Hello World - Custom Pack Boxes</title>"));
    assert!(html.contains(r#"content="packaging, boxes, custom""#));

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/blogs/{id}"))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/public/blogs/{slug}"))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Blog not found");

    let req = test::TestRequest::get()
        .uri(&format!("/blogs/{slug}"))
        .to_request();
    let (status, html) = text_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Blog Not Found"));
}

#[actix_web::test]
async fn test_create_requires_title_excerpt_content() {
    let f = fixture();
    let assets = f.assets.clone();
    let app = test_app!(f.state);

    let png = png(1200, 630);
    let req = create_request(&[("title", "   "), ("excerpt", "E"), ("content", "C")], Some(png.as_slice()))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title, excerpt, and content are required");

    let req = test::TestRequest::get().uri("/api/blogs").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(assets.stored_count().await, 0);
}

#[actix_web::test]
async fn test_create_rejects_non_image_cover() {
    let f = fixture();
    let assets = f.assets.clone();
    let app = test_app!(f.state);

    let req = create_request(HELLO, Some(&b"not an image"[..])).to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cover image must be a valid image file");
    assert_eq!(assets.stored_count().await, 0);
}

#[actix_web::test]
async fn test_small_cover_is_accepted_with_notice_and_deleted_with_blog() {
    let f = fixture();
    let assets = f.assets.clone();
    let app = test_app!(f.state);

    let png = png(600, 315);
    let req = create_request(HELLO, Some(png.as_slice())).to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::CREATED);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Blog created successfully ("));
    assert!(message.contains("600×315px"));

    let public_id = body["data"]["coverImage"]["public_id"].as_str().unwrap().to_string();
    assert!(public_id.starts_with("custom-pack-boxes/blogs/"));
    assert!(assets.contains(&public_id).await);

    let id = body["data"]["id"].as_str().unwrap();
    let req = test::TestRequest::delete()
        .uri(&format!("/api/blogs/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(assets.deleted_ids().await, vec![public_id]);
}

#[actix_web::test]
async fn test_upload_failure_is_internal_error_with_cause() {
    let assets: Arc<dyn AssetStore> = Arc::new(UnconfiguredAssetStore);
    let state = AppState::from_parts(
        Arc::new(InMemoryBlogRepository::new()),
        Arc::new(InMemoryVisitorRepository::new()),
        assets,
        MAX_UPLOAD,
    );
    let app = test_app!(state);

    let png = png(1200, 630);
    let req = create_request(HELLO, Some(png.as_slice())).to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create blog");
    assert_eq!(body["message"], "Asset storage is not configured");
}

#[actix_web::test]
async fn test_delete_after_image_hosting_removed() {
    let blogs = Arc::new(InMemoryBlogRepository::new());
    let hosted = BlogService::new(blogs.clone(), Arc::new(InMemoryAssetStore::default()));
    let draft = BlogDraft {
        title: "Hosted Cover".to_string(),
        excerpt: "Excerpt".to_string(),
        content: "<p>Body</p>".to_string(),
        author: DEFAULT_AUTHOR.to_string(),
        tags: Vec::new(),
        published: true,
        featured: false,
        read_time: DEFAULT_READ_TIME,
    };
    let cover = UploadFile {
        file_name: "cover.png".to_string(),
        content_type: Some("image/png".to_string()),
        bytes: png(1200, 630),
        dimensions: Some(ImageDimensions::RECOMMENDED),
    };
    let blog = hosted.create(draft, Some(cover)).await.unwrap().blog;
    assert!(blog.cover_image.is_some());

    let state = AppState::from_parts(
        blogs,
        Arc::new(InMemoryVisitorRepository::new()),
        Arc::new(UnconfiguredAssetStore),
        MAX_UPLOAD,
    );
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/blogs/{}", blog.id))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog deleted successfully");
}

#[actix_web::test]
async fn test_oversized_upload_is_rejected() {
    let state = AppState::from_parts(
        Arc::new(InMemoryBlogRepository::new()),
        Arc::new(InMemoryVisitorRepository::new()),
        Arc::new(InMemoryAssetStore::default()),
        16,
    );
    let app = test_app!(state);

    let png = png(1200, 630);
    let req = create_request(HELLO, Some(png.as_slice())).to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_update_changes_slug_only_with_title() {
    let app = test_app!(fixture().state);

    let req = create_request(HELLO, None).to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let slug = body["data"]["slug"].as_str().unwrap().to_string();

    let req = multipart(
        test::TestRequest::put().uri(&format!("/api/blogs/{id}")),
        &[("content", "<p>New <em>body</em></p>"), ("tags", "eco"), ("tags", " eco ")],
        None,
    )
    .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog updated successfully");
    assert_eq!(body["data"]["slug"], slug.as_str());
    assert_eq!(body["data"]["title"], "Hello World");
    assert_eq!(body["data"]["tags"], json!(["eco"]));

    let req = multipart(
        test::TestRequest::put().uri(&format!("/api/blogs/{id}")),
        &[("title", "Goodbye World")],
        None,
    )
    .to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_generated_slug(body["data"]["slug"].as_str().unwrap(), "goodbye-world");
    assert_eq!(body["data"]["content"], "<p>New <em>body</em></p>");
}

#[actix_web::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = test_app!(fixture().state);

    for uri in [
        "/api/blogs/not-a-uuid".to_string(),
        format!("/api/blogs/{}", Uuid::new_v4()),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let (status, body) = json_body(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Blog not found");
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/api/blogs/{}", Uuid::new_v4()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_publish_rejects_malformed_body() {
    let app = test_app!(fixture().state);

    let req = create_request(HELLO, None).to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/blogs/{id}/publish"))
        .set_json(json!({"published": "yes"}))
        .to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_list_filters_by_status_and_search() {
    let app = test_app!(fixture().state);

    for title in ["Kraft Mailers", "Rigid Boxes"] {
        let req = create_request(&[("title", title), ("excerpt", "E"), ("content", "C")], None)
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = create_request(
        &[("title", "Live"), ("excerpt", "E"), ("content", "C"), ("published", "true")],
        None,
    )
    .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/blogs?status=draft").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/blogs?status=published").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"][0]["title"], "Live");

    let req = test::TestRequest::get().uri("/api/blogs?search=kraft&status=bogus").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Kraft Mailers"]);
}

fn visitor(country: Option<&str>, email: Option<&str>, minutes_ago: i64) -> Visitor {
    Visitor {
        id: Uuid::new_v4(),
        ip: "198.51.100.7".to_string(),
        country: country.map(String::from),
        city: Some("Somewhere".to_string()),
        email: email.map(String::from),
        cookies_accepted: email.is_some(),
        visited_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

fn visitor_fixture() -> Fixture {
    fixture_with(vec![
        visitor(Some("Peru"), Some("a@example.com"), 30),
        visitor(Some("Canada"), None, 10),
        visitor(Some("Unknown"), None, 20),
        visitor(None, Some("b@example.com"), 5),
        visitor(Some("Peru"), None, 1),
    ])
}

#[actix_web::test]
async fn test_visitor_list_and_filter() {
    let app = test_app!(visitor_fixture().state);

    let req = test::TestRequest::get().uri("/api/visitors?country=all").to_request();
    let (status, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 5);
    let times: Vec<&str> = body["data"]["visitors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["visitedAt"].as_str().unwrap())
        .collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted);

    let req = test::TestRequest::get().uri("/api/visitors?country=Peru").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["visitors"][0]["country"], "Peru");
}

#[actix_web::test]
async fn test_visitor_countries_and_stats() {
    let app = test_app!(visitor_fixture().state);

    let req = test::TestRequest::get().uri("/api/visitors/countries").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["countries"], json!(["Canada", "Peru"]));

    let req = test::TestRequest::get().uri("/api/visitors/stats").to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    assert_eq!(
        body["data"],
        json!({"total": 5, "withEmail": 2, "cookiesAccepted": 2})
    );
}

#[actix_web::test]
async fn test_dashboard_pages_render() {
    let app = test_app!(visitor_fixture().state);

    let req = create_request(HELLO, None).to_request();
    let (_, body) = json_body(test::call_service(&app, req).await).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri("/dashboard/blogs").to_request();
    let (status, html) = text_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Hello World"));

    let req = test::TestRequest::get()
        .uri(&format!("/dashboard/blogs/{id}/edit"))
        .to_request();
    let (_, html) = text_body(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"data-method="PUT""#));

    let req = test::TestRequest::get()
        .uri("/dashboard/blogs/nope/edit")
        .to_request();
    let (status, html) = text_body(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Blog Not Found"));

    let req = test::TestRequest::get().uri("/dashboard/blogs/new").to_request();
    let (_, html) = text_body(test::call_service(&app, req).await).await;
    assert!(html.contains("Create Blog"));

    let req = test::TestRequest::get().uri("/dashboard/visitors").to_request();
    let (_, html) = text_body(test::call_service(&app, req).await).await;
    assert!(html.contains("Visitors by country"));
    assert!(html.contains("Total visitors"));

    let req = test::TestRequest::get()
        .uri("/dashboard/visitors?country=Peru")
        .to_request();
    let (_, html) = text_body(test::call_service(&app, req).await).await;
    assert!(!html.contains("Visitors by country"));
}

#[actix_web::test]
async fn test_static_assets() {
    let app = test_app!(fixture().state);

    let req = test::TestRequest::get().uri("/static/app.css").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );

    let req = test::TestRequest::get().uri("/static/missing.js").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
