//! Shared harness: an in-memory stand-in for the remote catalog plus the admin server.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use catalog_admin::{transport, CatalogService, HttpCatalogClient, Product, ProductDraft};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Debug)]
struct UpstreamState {
    products: Vec<Product>,
    next_id: u64,
    failing: bool,
}

/// Fake remote catalog speaking the products/categories HTTP contract.
#[derive(Clone)]
pub struct Upstream {
    state: Arc<Mutex<UpstreamState>>,
}

type UpstreamResult<T> = Result<Json<T>, StatusCode>;

impl Upstream {
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(Mutex::new(UpstreamState {
                products,
                next_id,
                failing: false,
            })),
        }
    }

    /// Two records: "Red Shoe" (shoes) and "Blue Hat" (hats).
    pub fn seeded() -> Self {
        Self::with_products(vec![
            product(1, "Red Shoe", 25.0, "shoes"),
            product(2, "Blue Hat", 15.5, "hats"),
        ])
    }

    /// Makes every subsequent request answer 503.
    pub fn fail(&self, on: bool) {
        self.state.lock().unwrap().failing = on;
    }

    pub fn product_count(&self) -> usize {
        self.state.lock().unwrap().products.len()
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, UpstreamState>, StatusCode> {
        let state = self.state.lock().unwrap();
        if state.failing {
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
        Ok(state)
    }

    fn router(self) -> Router {
        Router::new()
            .route("/products", get(list).post(create))
            .route("/products/categories", get(categories))
            .route("/products/category/:category", get(by_category))
            .route("/products/:id", get(fetch).put(update).delete(remove))
            .with_state(self)
    }

    /// Serves the fake on an ephemeral port and returns its base URL.
    pub async fn spawn(self) -> (String, JoinHandle<()>) {
        serve(self.router()).await
    }
}

pub fn product(id: u64, title: &str, price: f64, category: &str) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://img.test/{id}.png"),
        "rating": { "rate": 4.0, "count": 10 }
    }))
    .unwrap()
}

fn from_draft(id: u64, draft: ProductDraft) -> Product {
    Product {
        id,
        title: draft.title,
        price: draft.price,
        description: draft.description,
        category: draft.category,
        image: Some(draft.image),
        rating: None,
    }
}

async fn list(State(up): State<Upstream>) -> UpstreamResult<Vec<Product>> {
    Ok(Json(up.guard()?.products.clone()))
}

async fn categories(State(up): State<Upstream>) -> UpstreamResult<Vec<String>> {
    let state = up.guard()?;
    let mut categories: Vec<String> = state.products.iter().map(|p| p.category.clone()).collect();
    categories.sort();
    categories.dedup();
    Ok(Json(categories))
}

async fn by_category(
    State(up): State<Upstream>,
    Path(category): Path<String>,
) -> UpstreamResult<Vec<Product>> {
    let state = up.guard()?;
    Ok(Json(
        state
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect(),
    ))
}

async fn fetch(State(up): State<Upstream>, Path(id): Path<u64>) -> UpstreamResult<Product> {
    let state = up.guard()?;
    state
        .products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create(
    State(up): State<Upstream>,
    Json(draft): Json<ProductDraft>,
) -> UpstreamResult<Product> {
    let mut state = up.guard()?;
    let created = from_draft(state.next_id, draft);
    state.next_id += 1;
    state.products.insert(0, created.clone());
    Ok(Json(created))
}

async fn update(
    State(up): State<Upstream>,
    Path(id): Path<u64>,
    Json(draft): Json<ProductDraft>,
) -> UpstreamResult<Product> {
    let mut state = up.guard()?;
    let updated = from_draft(id, draft);
    if let Some(slot) = state.products.iter_mut().find(|p| p.id == id) {
        *slot = updated.clone();
    }
    Ok(Json(updated))
}

async fn remove(State(up): State<Upstream>, Path(id): Path<u64>) -> UpstreamResult<Product> {
    let mut state = up.guard()?;
    let idx = state
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(state.products.remove(idx)))
}

async fn serve(router: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

pub fn remote_client(base_url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(reqwest::Url::parse(base_url).unwrap())
}

/// A running admin API in front of `upstream`.
pub struct Harness {
    pub upstream: Upstream,
    pub base_url: String,
    pub catalog: Arc<CatalogService>,
    pub client: reqwest::Client,
    tasks: Vec<JoinHandle<()>>,
}

impl Harness {
    pub async fn start(upstream: Upstream) -> Self {
        let (upstream_url, upstream_task) = upstream.clone().spawn().await;
        let catalog = Arc::new(CatalogService::new(
            Arc::new(remote_client(&upstream_url)),
            16,
        ));
        let router = transport::http::create_router(transport::http::AppState {
            catalog: catalog.clone(),
        });
        let (base_url, admin_task) = serve(router).await;
        Self {
            upstream,
            base_url,
            catalog,
            client: reqwest::Client::new(),
            tasks: vec![upstream_task, admin_task],
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    pub async fn load(&self) -> serde_json::Value {
        let response = self.client.post(self.url("/api/session/load")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.unwrap()
    }

    /// Product ids of the unfiltered local listing, in order.
    pub async fn ids(&self) -> Vec<u64> {
        let (_, body) = self.get("/api/products").await;
        body["data"]["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
