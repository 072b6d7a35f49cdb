use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::api::MenuApi;
use crate::error::ClientError;
use crate::types::{Category, MenuEntry, MenuId, MenuNameRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// `MenuApi` over HTTP/JSON
#[derive(Clone, Debug)]
pub struct HttpMenuClient {
    client: Client,
    base_url: Url,
}

impl HttpMenuClient {
    /// No request timeout is configured: a slow backend only delays the caller.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = || ClientError::InvalidBaseUrl(trimmed.to_string());

        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid());
        }

        Ok(Self {
            client: Client::builder().build()?,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Path segments are percent-encoded, so ids may contain `/`, `?` or `#`
    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn menu_url(&self, category: Category) -> Url {
        self.url_with(&["category", category.as_str(), "menu"])
    }

    fn entry_url(&self, category: Category, id: &MenuId) -> Url {
        self.url_with(&["category", category.as_str(), "menu", id.as_str()])
    }

    fn check_status(method: &'static str, url: &str, response: &Response) -> Result<(), ClientError> {
        let status = response.status();
        if !status.is_success() {
            error!(%method, %url, status = status.as_u16(), "Menu API request failed");
            return Err(ClientError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl MenuApi for HttpMenuClient {
    async fn list_by_category(&self, category: Category) -> Result<Vec<MenuEntry>, ClientError> {
        let url = self.menu_url(category);
        debug!(%url, "GET menu list");

        let response = self.client.get(url.clone()).send().await?;
        Self::check_status("GET", url.as_str(), &response)?;

        let entries: Vec<MenuEntry> = Self::decode(url.as_str(), response).await?;
        debug!(%category, count = entries.len(), "Menu list loaded");
        Ok(entries)
    }

    async fn create_menu(&self, category: Category, name: &str) -> Result<(), ClientError> {
        let url = self.menu_url(category);
        debug!(%url, %name, "POST menu");

        let response = self
            .client
            .post(url.clone())
            .json(&MenuNameRequest { name })
            .send()
            .await?;
        Self::check_status("POST", url.as_str(), &response)
    }

    async fn update_menu(
        &self,
        category: Category,
        name: &str,
        id: &MenuId,
    ) -> Result<MenuEntry, ClientError> {
        let url = self.entry_url(category, id);
        debug!(%url, %name, "PUT menu");

        let response = self
            .client
            .put(url.clone())
            .json(&MenuNameRequest { name })
            .send()
            .await?;
        Self::check_status("PUT", url.as_str(), &response)?;

        Self::decode(url.as_str(), response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(matches!(
            HttpMenuClient::new("localhost:3000/api"),
            Err(ClientError::InvalidBaseUrl(_))
        ));

        let client = HttpMenuClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_list_by_category_keeps_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/category/espresso/menu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "2", "name": "Americano", "soldOut": false},
                {"id": "1", "name": "Cafe Latte", "soldOut": true},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&format!("{}/api", server.uri())).unwrap();
        let entries = client.list_by_category(Category::Espresso).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Americano");
        assert_eq!(entries[1].id, MenuId::from("1"));
        assert!(entries[1].sold_out);
    }

    #[tokio::test]
    async fn test_create_menu_posts_name_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/category/frappuccino/menu"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "Latte"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        client.create_menu(Category::Frappuccino, "Latte").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_menu_reports_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/category/blended/menu"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        let err = client.create_menu(Category::Blended, "Smoothie").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_update_menu_puts_to_entry_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/category/espresso/menu/5"))
            .and(body_json(json!({"name": "Mocha"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 5, "name": "Mocha", "soldOut": false})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        let updated = client
            .update_menu(Category::Espresso, "Mocha", &MenuId::from(5u64))
            .await
            .unwrap();

        assert_eq!(updated.id, MenuId::from("5"));
        assert_eq!(updated.name, "Mocha");
    }

    #[test]
    fn test_entry_url_encodes_reserved_characters() {
        let client = HttpMenuClient::new("http://localhost:3000/api").unwrap();
        let url = client.entry_url(Category::Espresso, &MenuId::from("a/b?c#d"));

        assert_eq!(url.path(), "/api/category/espresso/menu/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[tokio::test]
    async fn test_update_menu_with_slash_in_id_hits_single_entry_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/category/espresso/menu/house%2Fblend"))
            .and(body_json(json!({"name": "House Blend"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "house/blend", "name": "House Blend"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        let updated = client
            .update_menu(Category::Espresso, "House Blend", &MenuId::from("house/blend"))
            .await
            .unwrap();

        assert_eq!(updated.id, MenuId::from("house/blend"));
    }

    #[tokio::test]
    async fn test_update_menu_not_found_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/category/teavana/menu/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        let err = client
            .update_menu(Category::Teavana, "Chai", &MenuId::from("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_list_with_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/category/desert/menu"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = HttpMenuClient::new(&server.uri()).unwrap();
        let err = client.list_by_category(Category::Desert).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
