//! HTTP client for the sandbox aggregation API.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    ErrorBody, IndividualId, IndividualRequest, RawCompany, RawDirectory, RawIndividualBatch,
    SandboxCreateRequest, SandboxCreateResponse, SANDBOX_PRODUCTS,
};
use super::HrApi;
use crate::config::DashConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::Provider;

const SANDBOX_CREATE_PATH: &str = "api/sandbox/create";
const COMPANY_PATH: &str = "api/employer/company";
const DIRECTORY_PATH: &str = "api/employer/directory";
const INDIVIDUAL_PATH: &str = "api/employer/individual";

/// Blocking client for the four sandbox endpoints.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &DashConfig) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a successful JSON body, or turn a non-success response into
    /// `ApiError::Status` carrying the body's `message`.
    fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl HrApi for ApiClient {
    fn create_sandbox(&self, provider: Provider) -> ApiResult<String> {
        let url = self.endpoint(SANDBOX_CREATE_PATH)?;
        tracing::debug!(%url, provider = provider.as_str(), "Creating sandbox connection");

        let request = SandboxCreateRequest {
            provider: provider.as_str(),
            products: SANDBOX_PRODUCTS,
        };
        let response = self.client.post(url).json(&request).send()?;
        let created: SandboxCreateResponse = Self::read_json(response)?;

        created
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)
    }

    fn company(&self, token: &str) -> ApiResult<RawCompany> {
        let url = self.endpoint(COMPANY_PATH)?;
        tracing::debug!(%url, "Fetching company");

        let response = self.client.get(url).bearer_auth(token).send()?;
        Self::read_json(response)
    }

    fn directory(&self, token: &str) -> ApiResult<RawDirectory> {
        let url = self.endpoint(DIRECTORY_PATH)?;
        tracing::debug!(%url, "Fetching directory");

        let response = self.client.get(url).bearer_auth(token).send()?;
        Self::read_json(response)
    }

    fn individuals(&self, token: &str, individual_ids: &[&str]) -> ApiResult<RawIndividualBatch> {
        let url = self.endpoint(INDIVIDUAL_PATH)?;
        tracing::debug!(%url, count = individual_ids.len(), "Fetching individuals");

        let request = IndividualRequest {
            requests: individual_ids
                .iter()
                .map(|&id| IndividualId { individual_id: id })
                .collect(),
        };
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()?;
        Self::read_json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// Serve exactly one canned response and hand back the raw request text.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        (format!("http://{}", addr), handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        let mut content_length = 0usize;

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        format!("{}\r\n{}", head, String::from_utf8(body).unwrap())
    }

    fn client_for(base: &str) -> ApiClient {
        let config = DashConfig::load(Some(base), Some(5)).unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_create_sandbox_posts_provider_and_products() {
        let (base, server) = serve_once("200 OK", r#"{"access_token":"tok1"}"#);
        let token = client_for(&base).create_sandbox(Provider::Gusto).unwrap();
        assert_eq!(token, "tok1");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/sandbox/create HTTP/1.1"));
        assert!(request.contains(r#""provider":"gusto""#));
        assert!(request.contains(r#""products":["company","directory","individual","employment"]"#));
    }

    #[test]
    fn test_create_sandbox_without_token() {
        let (base, server) = serve_once("200 OK", "{}");
        let err = client_for(&base).create_sandbox(Provider::Workday).unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        server.join().unwrap();
    }

    #[test]
    fn test_company_sends_bearer_token() {
        let (base, server) = serve_once("200 OK", r#"{"id":"c1","legal_name":"Acme"}"#);
        let company = client_for(&base).company("tok1").unwrap();
        assert_eq!(company.legal_name.as_deref(), Some("Acme"));

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /api/employer/company HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer tok1"));
    }

    #[test]
    fn test_not_implemented_is_classified() {
        let (base, server) = serve_once("501 Not Implemented", r#"{"message":"Not Implemented"}"#);
        let err = client_for(&base).company("tok1").unwrap_err();
        assert!(err.is_not_implemented());
        server.join().unwrap();
    }

    #[test]
    fn test_error_without_json_body() {
        let (base, server) = serve_once("500 Internal Server Error", "oops");
        let err = client_for(&base).directory("tok1").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, message: None }));
        server.join().unwrap();
    }

    #[test]
    fn test_malformed_success_body() {
        let (base, server) = serve_once("200 OK", "not json");
        let err = client_for(&base).directory("tok1").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_individuals_request_body() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"responses":[{"individual_id":"e1","body":{"first_name":"Jo"}}]}"#,
        );
        let batch = client_for(&base).individuals("tok1", &["e1"]).unwrap();
        assert_eq!(batch.responses.unwrap().len(), 1);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/employer/individual HTTP/1.1"));
        assert!(request.contains(r#"{"requests":[{"individual_id":"e1"}]}"#));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let client = client_for("http://localhost:9999/proxy");
        assert_eq!(
            client.endpoint(COMPANY_PATH).unwrap().as_str(),
            "http://localhost:9999/proxy/api/employer/company"
        );
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(&format!("http://{}", addr)).company("tok1").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
