//! Read-only HTTP API over the loaded tables
//!
//! - `GET /movies`: `top_250_movies`
//! - `GET /filmography`: `filmography_roles`
//! - `GET /reviews`: `movie_reviews`
//!
//! Each endpoint returns a JSON array of column -> value objects, or a 500
//! with `{"detail": "..."}` when the table cannot be read.

use crate::assembler::{FILMOGRAPHY_TABLE, REVIEWS_TABLE, TOP_LIST_TABLE};
use crate::db;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use rusqlite::Connection;
use serde_json::json;
use std::sync::Mutex;

/// Shared state for all handlers
pub struct AppState {
    pub db: Mutex<Connection>,
}

fn table_response(data: &AppState, table: &str) -> HttpResponse {
    let conn = match data.db.lock() {
        Ok(conn) => conn,
        Err(_) => {
            log::error!("Database lock poisoned");
            return HttpResponse::InternalServerError().json(json!({"detail": "database unavailable"}));
        }
    };

    match db::fetch_all(&conn, table) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Query on '{}' failed: {}", table, e);
            HttpResponse::InternalServerError().json(json!({"detail": e.to_string()}))
        }
    }
}

/// Retrieve the top list
#[get("/movies")]
async fn movies(data: web::Data<AppState>) -> impl Responder {
    table_response(&data, TOP_LIST_TABLE)
}

#[get("/filmography")]
async fn filmography(data: web::Data<AppState>) -> impl Responder {
    table_response(&data, FILMOGRAPHY_TABLE)
}

#[get("/reviews")]
async fn reviews(data: web::Data<AppState>) -> impl Responder {
    table_response(&data, REVIEWS_TABLE)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(movies).service(filmography).service(reviews);
}

pub async fn run(conn: Connection, addr: &str) -> std::io::Result<()> {
    let data = web::Data::new(AppState {
        db: Mutex::new(conn),
    });

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind(addr)?;
    log::info!("Listening on {}", addr);
    server.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn state_with_movies() -> web::Data<AppState> {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"CREATE TABLE "top_250_movies" ("Title" TEXT, "Year" TEXT, "Rating" TEXT);
               INSERT INTO "top_250_movies" VALUES ('The Godfather', '1972', '9.2');"#,
        )
        .unwrap();
        web::Data::new(AppState {
            db: Mutex::new(conn),
        })
    }

    #[actix_web::test]
    async fn test_movies_returns_rows() {
        let app = test::init_service(
            App::new().app_data(state_with_movies()).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/movies").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!([{"Title": "The Godfather", "Year": "1972", "Rating": "9.2"}])
        );
    }

    #[actix_web::test]
    async fn test_missing_table_is_server_error() {
        let app = test::init_service(
            App::new().app_data(state_with_movies()).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/reviews").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("movie_reviews"));
    }
}
