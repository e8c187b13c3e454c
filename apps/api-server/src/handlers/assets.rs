//! Stylesheet and scripts, compiled into the binary.

use actix_web::{HttpResponse, web};

const APP_CSS: &str = include_str!("../../static/app.css");
const EDITOR_JS: &str = include_str!("../../static/editor.js");
const DASHBOARD_JS: &str = include_str!("../../static/dashboard.js");

/// GET /static/{file}
pub async fn static_file(path: web::Path<String>) -> HttpResponse {
    let (body, content_type) = match path.as_str() {
        "app.css" => (APP_CSS, "text/css; charset=utf-8"),
        "editor.js" => (EDITOR_JS, "text/javascript; charset=utf-8"),
        "dashboard.js" => (DASHBOARD_JS, "text/javascript; charset=utf-8"),
        _ => return HttpResponse::NotFound().finish(),
    };

    HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .content_type(content_type)
        .body(body)
}

