use crate::domain::model::CarRecord;
use crate::domain::ports::CarService;
use crate::domain::rules::{prepare_new_car, prepare_replacement, require_car_id};
use crate::utils::error::{ConfigError, FieldError, Result, ServiceError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Client for a remote car API exposing `/cars` and `/cars/{id}`.
///
/// Server status codes are passed through as the error status; the body's
/// `message` (or `error`) field becomes the original message.
#[derive(Debug, Clone)]
pub struct RestCarService {
    client: Client,
    base_url: Url,
}

impl RestCarService {
    pub fn new(endpoint: &str) -> std::result::Result<Self, ConfigError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: &str) -> RestCarServiceBuilder {
        RestCarServiceBuilder {
            endpoint: endpoint.to_string(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn cars_url(&self, car_id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::internal(
                    "car API endpoint cannot hold a path",
                    format!("endpoint '{}' is not a base URL", self.base_url),
                )
            })?
            .pop_if_empty()
            .push("cars")
            .extend(car_id);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&CarRecord>,
        action: &str,
    ) -> Result<Response> {
        tracing::debug!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(car) = body {
            request = request.json(car);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(action, &e))?;

        let status = response.status();
        tracing::debug!("car API response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read car API error body: {}", e);
                String::new()
            }
        };
        let original = error_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
        Err(ServiceError::new(
            format!("{} failed with status {}", action, status.as_u16()),
            status.as_u16(),
            original,
        ))
    }
}

pub struct RestCarServiceBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl RestCarServiceBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn build(self) -> std::result::Result<RestCarService, ConfigError> {
        crate::utils::validation::validate_url("backend.endpoint", &self.endpoint)?;
        let base_url = Url::parse(&self.endpoint)
            .map_err(|e| FieldError::new("backend.endpoint", &self.endpoint, e.to_string()))?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                FieldError::new("backend.headers", name, format!("Invalid header name: {}", e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                FieldError::new(
                    "backend.headers",
                    name,
                    format!("Invalid header value: {}", e),
                )
            })?;
            default_headers.insert(header_name, header_value);
        }

        let mut client = Client::builder().default_headers(default_headers);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(RestCarService {
            client: client.build()?,
            base_url,
        })
    }
}

fn transport_error(action: &str, err: &reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::timeout(format!("{} timed out", action), err.to_string())
    } else {
        ServiceError::unavailable(
            format!("{} could not reach the car API", action),
            err.to_string(),
        )
    }
}

fn decode_error(action: &str, err: &reqwest::Error) -> ServiceError {
    ServiceError::bad_gateway(
        format!("{} returned an unreadable response", action),
        err.to_string(),
    )
}

fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let from_json = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });
    Some(from_json.unwrap_or_else(|| trimmed.to_string()))
}

#[async_trait]
impl CarService for RestCarService {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        require_car_id(car_id)?;
        let action = format!("fetching car {}", car_id);
        let url = self.cars_url(Some(car_id))?;
        let response = self.send(Method::GET, url, None, &action).await?;
        let car: CarRecord = response
            .json()
            .await
            .map_err(|e| decode_error(&action, &e))?;
        if car.id() != Some(car_id) {
            return Err(ServiceError::bad_gateway(
                format!("{} returned a different record", action),
                format!("expected id '{}', got {:?}", car_id, car.id()),
            ));
        }
        Ok(car)
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        let action = "listing cars";
        let url = self.cars_url(None)?;
        let response = self.send(Method::GET, url, None, action).await?;
        response.json().await.map_err(|e| decode_error(action, &e))
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        prepare_new_car(&car)?;
        let url = self.cars_url(None)?;
        self.send(Method::POST, url, Some(&car), "creating car")
            .await?;
        Ok(())
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        let id = prepare_replacement(&car)?;
        let action = format!("updating car {}", id);
        let url = self.cars_url(Some(id))?;
        self.send(Method::PUT, url, Some(&car), &action).await?;
        Ok(())
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        require_car_id(car_id)?;
        let action = format!("deleting car {}", car_id);
        let url = self.cars_url(Some(car_id))?;
        self.send(Method::DELETE, url, None, &action).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cars_url_appends_segments() {
        let service = RestCarService::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            service.cars_url(None).unwrap().as_str(),
            "http://localhost:8080/api/cars"
        );
        assert_eq!(
            service.cars_url(Some("a b/c")).unwrap().as_str(),
            "http://localhost:8080/api/cars/a%20b%2Fc"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(matches!(
            RestCarService::new("ftp://example.com"),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RestCarService::builder("http://localhost")
            .header("bad header", "x")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_error_detail_prefers_message_field() {
        assert_eq!(
            error_detail(r#"{"message":"car 7 is gone"}"#).as_deref(),
            Some("car 7 is gone")
        );
        assert_eq!(
            error_detail(r#"{"error":"bad year"}"#).as_deref(),
            Some("bad year")
        );
        assert_eq!(error_detail("plain text").as_deref(), Some("plain text"));
        assert_eq!(error_detail("  "), None);
    }
}
