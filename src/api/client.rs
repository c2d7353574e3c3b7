use async_trait::async_trait;
use reqwest::{header, Client, Method};

use super::types::*;
use super::TodoApi;
use crate::config::Config;

/// HTTP client for the `/api/todo` endpoints
pub struct TodoClient {
    client: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and unwrap the `{success, code, data, message}` envelope
    async fn send<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Vec<Todo>, ApiError> {
        let url = self.url(endpoint);
        log::debug!("{} {}", method, url);

        let mut request = self.client
            .request(method, &url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // The envelope may still explain a failure status, so try it first
        match serde_json::from_str::<ApiResponse>(&text) {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(ApiError::Decode(e)),
        }
    }
}

#[async_trait]
impl TodoApi for TodoClient {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        self.send::<()>(Method::GET, "/api/todo", None).await
    }

    async fn create(&self, form: &TodoForm) -> Result<Vec<Todo>, ApiError> {
        self.send(Method::POST, "/api/todo", Some(form)).await
    }

    async fn update(&self, id: &str, update: &TodoUpdate) -> Result<Vec<Todo>, ApiError> {
        let endpoint = format!("/api/todo/{}", id);
        self.send(Method::PUT, &endpoint, Some(update)).await
    }

    async fn toggle(&self, id: &str) -> Result<Vec<Todo>, ApiError> {
        let endpoint = format!("/api/todo/{}", id);
        self.send::<()>(Method::PATCH, &endpoint, None).await
    }

    async fn delete(&self, id: &str) -> Result<Vec<Todo>, ApiError> {
        let endpoint = format!("/api/todo/{}", id);
        self.send::<()>(Method::DELETE, &endpoint, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = TodoClient::new(&config).unwrap();
        let err = client.list().await.unwrap_err();
        assert!(err.is_transport(), "{:?}", err);
    }

    #[test]
    fn endpoints_hang_off_the_base_url() {
        let config = Config {
            api_base_url: "http://localhost:5173/".to_string(),
            ..Config::default()
        };
        let client = TodoClient::new(&config).unwrap();
        assert_eq!(client.url("/api/todo/7"), "http://localhost:5173/api/todo/7");
    }
}
