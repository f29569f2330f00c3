// Responsible for all communication with the remote product catalog.

use crate::domain::product::{Product, ProductDraft, ProductId};
use crate::infra::remote::RequestFailure;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// The remote products and categories resources.
///
/// Every call is one round trip: no caching, no retry, no request
/// deduplication and no timeout beyond the transport default.
#[async_trait]
pub trait CatalogRemote: Send + Sync {
    /// Full, unfiltered and unpaginated product listing.
    async fn list(&self) -> Result<Vec<Product>, RequestFailure>;

    /// Products of a single category, as filtered by the remote.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, RequestFailure>;

    /// Known category labels.
    async fn categories(&self) -> Result<Vec<String>, RequestFailure>;

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RequestFailure>;

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, RequestFailure>;

    /// Returns the deleted record's last known representation.
    async fn delete(&self, id: ProductId) -> Result<Product, RequestFailure>;
}

/// [`CatalogRemote`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    ///
    /// `config::api_base_url` rejects bases that cannot carry path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "catalog request");
        self.http.request(method, url)
    }

    async fn execute<T: DeserializeOwned>(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, RequestFailure> {
        let response = request.send().await.map_err(|source| {
            warn!(operation, error = %source, "catalog request failed");
            RequestFailure::Transport { operation, source }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation, %status, "catalog request rejected");
            return Err(RequestFailure::Status { operation, status });
        }

        response.json::<T>().await.map_err(|source| {
            warn!(operation, error = %source, "catalog response undecodable");
            RequestFailure::Decode { operation, source }
        })
    }
}

#[async_trait]
impl CatalogRemote for HttpCatalogClient {
    async fn list(&self) -> Result<Vec<Product>, RequestFailure> {
        Self::execute("list products", self.request(Method::GET, &["products"])).await
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, RequestFailure> {
        Self::execute(
            "list products by category",
            self.request(Method::GET, &["products", "category", category]),
        )
        .await
    }

    async fn categories(&self) -> Result<Vec<String>, RequestFailure> {
        Self::execute(
            "list categories",
            self.request(Method::GET, &["products", "categories"]),
        )
        .await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RequestFailure> {
        Self::execute(
            "create product",
            self.request(Method::POST, &["products"]).json(draft),
        )
        .await
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, RequestFailure> {
        let id = id.to_string();
        Self::execute(
            "update product",
            self.request(Method::PUT, &["products", &id]).json(draft),
        )
        .await
    }

    async fn delete(&self, id: ProductId) -> Result<Product, RequestFailure> {
        let id = id.to_string();
        Self::execute(
            "delete product",
            self.request(Method::DELETE, &["products", &id]),
        )
        .await
    }
}
