#![allow(dead_code)]

use reqwest::Client;
use rust_catalog::api::create_api_router;
use rust_catalog::entities::setup_schema;
use rust_catalog::repository::category as category_store;
use rust_catalog::repository::product::{self as product_store, NewProduct};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub db: Arc<DatabaseConnection>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn category(&self, name: &str) -> i32 {
        category_store::create(self.db.as_ref(), name.to_owned(), None)
            .await
            .expect("Failed to create category")
            .id
    }

    pub async fn product(&self, name: &str, price: i64, stock: i32, category_id: i32) -> i32 {
        product_store::create(
            self.db.as_ref(),
            NewProduct {
                name: name.to_owned(),
                price,
                stock,
                category_id,
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create product")
        .id
    }
}

/// Starts the service on an ephemeral port backed by a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    let db = Arc::new(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!(
        "http://{}",
        listener.local_addr().expect("Failed to read local address")
    );

    let app = create_api_router(db.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    TestApp {
        address,
        db,
        client: Client::new(),
    }
}
