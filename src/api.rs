use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::logic::errors::{classify_error, FetchError};

pub type CharacterId = u32;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Life status reported by the API ("Alive", "Dead", "unknown")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

impl Status {
    /// Lowercase wire value, used for both query parameters and URL state
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "Unknown",
        }
    }

    /// Case-insensitive parse; empty or unrecognized input yields None
    pub fn parse(value: &str) -> Option<Status> {
        match value.trim().to_lowercase().as_str() {
            "alive" => Some(Status::Alive),
            "dead" => Some(Status::Dead),
            "unknown" => Some(Status::Unknown),
            _ => None,
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::parse(&value).unwrap_or(Status::Unknown)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.label().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: Status,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: Location,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PageInfo {
    next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CharactersResponse {
    info: PageInfo,
    results: Vec<Character>,
}

/// The batch endpoint answers a single object for one id and an array otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Character>),
    One(Box<Character>),
}

/// One page of list results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPage {
    pub items: Vec<Character>,
    pub has_more: bool,
}

/// Query for the paginated collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub name: Option<String>,
    pub status: Option<Status>,
    pub species: Option<String>,
    pub gender: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            name: None,
            status: None,
            species: None,
            gender: None,
        }
    }
}

impl ListQuery {
    /// Outgoing query parameters. Empty filters are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.max(1).to_string())];

        let optional = [
            ("name", self.name.as_deref()),
            ("status", self.status.as_ref().map(Status::as_str)),
            ("species", self.species.as_deref()),
            ("gender", self.gender.as_deref()),
        ];
        for (key, value) in optional {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs
    }
}

/// Decode a list response body into a page
pub fn decode_page(text: &str) -> Result<CharacterPage, serde_json::Error> {
    let response: CharactersResponse = serde_json::from_str(text)?;
    Ok(CharacterPage {
        has_more: response.info.next.is_some(),
        items: response.results,
    })
}

/// Decode a batch-by-id response, always yielding a vector in server order
pub fn decode_batch(text: &str) -> Result<Vec<Character>, serde_json::Error> {
    Ok(match serde_json::from_str::<OneOrMany>(text)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![*item],
    })
}

fn api_error(status: StatusCode, text: &str) -> FetchError {
    FetchError::Network(format!("API error {}: {}", status, text))
}

/// Map a list response to a page. A filter with no matches comes back as
/// 404 "There is nothing here" and is an empty final page.
pub fn decode_list_response(status: StatusCode, text: &str) -> Result<CharacterPage, FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(CharacterPage::default());
    }
    if !status.is_success() {
        return Err(api_error(status, text));
    }

    decode_page(text)
        .map_err(|e| FetchError::Network(format!("Failed to parse character page: {}", e)))
}

/// Map a batch-by-id response. None of the ids existing is an empty batch.
pub fn decode_batch_response(status: StatusCode, text: &str) -> Result<Vec<Character>, FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(Vec::new());
    }
    if !status.is_success() {
        return Err(api_error(status, text));
    }

    decode_batch(text).map_err(|e| FetchError::Network(format!("Failed to parse characters: {}", e)))
}

/// Map a single-character response
pub fn decode_character_response(status: StatusCode, text: &str) -> Result<Character, FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound);
    }
    if !status.is_success() {
        return Err(api_error(status, text));
    }

    // The API also reports missing ids as {"error": "Character not found"}
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| FetchError::Network(format!("Failed to parse character: {}", e)))?;
    if value.get("error").is_some() {
        return Err(FetchError::NotFound);
    }

    serde_json::from_value(value)
        .map_err(|e| FetchError::Network(format!("Failed to parse character: {}", e)))
}

/// Operations the runtime needs from the remote catalog
pub trait CatalogApi: Clone + Send + Sync + 'static {
    fn list_characters(
        &self,
        query: &ListQuery,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<CharacterPage, FetchError>> + Send;

    fn get_characters_by_ids(
        &self,
        ids: &[CharacterId],
    ) -> impl Future<Output = Result<Vec<Character>, FetchError>> + Send;

    fn get_character(
        &self,
        id: CharacterId,
    ) -> impl Future<Output = Result<Character, FetchError>> + Send;
}

#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Send a GET and return the status with the raw body
    async fn get_text(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<(StatusCode, String), FetchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| classify_error(&e))?;
        Ok((status, text))
    }

    async fn fetch_page(&self, query: &ListQuery) -> Result<CharacterPage, FetchError> {
        let url = format!("{}/character/", self.base_url);
        let (status, text) = self.get_text(&url, &query.query_pairs()).await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(page = query.page, "list query matched nothing");
        }
        decode_list_response(status, &text)
    }
}

impl CatalogApi for CatalogClient {
    async fn list_characters(
        &self,
        query: &ListQuery,
        cancel: &CancellationToken,
    ) -> Result<CharacterPage, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            page = self.fetch_page(query) => page,
        }
    }

    async fn get_characters_by_ids(
        &self,
        ids: &[CharacterId],
    ) -> Result<Vec<Character>, FetchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/character/{}", self.base_url, joined);
        let (status, text) = self.get_text(&url, &[]).await?;
        decode_batch_response(status, &text)
    }

    async fn get_character(&self, id: CharacterId) -> Result<Character, FetchError> {
        let url = format!("{}/character/{}", self.base_url, id);
        let (status, text) = self.get_text(&url, &[]).await?;
        decode_character_response(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RICK: &str = r#"{
        "id": 1,
        "name": "Rick Sanchez",
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": "https://rickandmortyapi.com/api/character/1",
        "created": "2017-11-04T18:48:46.250Z"
    }"#;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(Status::parse("Alive"), Some(Status::Alive));
        assert_eq!(Status::parse("DEAD"), Some(Status::Dead));
        assert_eq!(Status::parse("unknown"), Some(Status::Unknown));
        assert_eq!(Status::parse(""), None);
        assert_eq!(Status::parse("zombie"), None);
    }

    #[test]
    fn test_character_deserializes_server_casing() {
        let character: Character = serde_json::from_str(RICK).unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.status, Status::Alive);
        assert_eq!(character.location.name, "Citadel of Ricks");
        assert_eq!(character.episode.len(), 1);
    }

    #[test]
    fn test_query_pairs_omit_empty_filters() {
        let query = ListQuery {
            page: 2,
            name: Some(String::new()),
            status: None,
            species: Some("  ".to_string()),
            gender: None,
        };
        assert_eq!(query.query_pairs(), vec![("page", "2".to_string())]);
    }

    #[test]
    fn test_query_pairs_lowercase_status() {
        let query = ListQuery {
            page: 1,
            name: Some("Morty".to_string()),
            status: Some(Status::Dead),
            species: None,
            gender: Some("male".to_string()),
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("page", "1".to_string()),
                ("name", "Morty".to_string()),
                ("status", "dead".to_string()),
                ("gender", "male".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_clamp_page_to_one() {
        let query = ListQuery {
            page: 0,
            ..ListQuery::default()
        };
        assert_eq!(query.query_pairs()[0], ("page", "1".to_string()));
    }

    #[test]
    fn test_decode_page_has_more_from_next() {
        let body = format!(
            r#"{{"info": {{"count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character/?page=2", "prev": null}}, "results": [{}]}}"#,
            RICK
        );
        let page = decode_page(&body).unwrap();
        assert!(page.has_more);
        assert_eq!(page.items.len(), 1);

        let last = r#"{"info": {"count": 0, "pages": 1, "next": null, "prev": null}, "results": []}"#;
        assert!(!decode_page(last).unwrap().has_more);
    }

    #[test]
    fn test_decode_batch_normalizes_single_object() {
        let items = decode_batch(RICK).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rick Sanchez");
    }

    #[test]
    fn test_decode_batch_keeps_server_order() {
        let second = RICK.replace("\"id\": 1", "\"id\": 7").replace("Rick Sanchez", "Abradolf Lincler");
        let body = format!("[{}, {}]", second, RICK);
        let ids: Vec<_> = decode_batch(&body).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![7, 1]);
    }

    #[test]
    fn test_list_not_found_is_empty_final_page() {
        let page = decode_list_response(StatusCode::NOT_FOUND, r#"{"error": "There is nothing here"}"#)
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_list_server_error_is_network() {
        let result = decode_list_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(result, Err(FetchError::Network(msg)) if msg.contains("500")));
    }

    #[test]
    fn test_list_malformed_body_is_network() {
        let result = decode_list_response(StatusCode::OK, "<html>");
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_batch_not_found_is_empty() {
        let items = decode_batch_response(StatusCode::NOT_FOUND, r#"{"error": "Character not found"}"#)
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_batch_other_status_is_network() {
        let result = decode_batch_response(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_character_not_found_by_status_or_body() {
        assert_eq!(
            decode_character_response(StatusCode::NOT_FOUND, ""),
            Err(FetchError::NotFound)
        );
        assert_eq!(
            decode_character_response(StatusCode::OK, r#"{"error": "Character not found"}"#),
            Err(FetchError::NotFound)
        );
    }

    #[test]
    fn test_character_ok_and_server_error() {
        let character = decode_character_response(StatusCode::OK, RICK).unwrap();
        assert_eq!(character.name, "Rick Sanchez");

        let result = decode_character_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(result, Err(FetchError::Network(msg)) if msg.contains("502")));
    }

    /// Accept one connection, wait `delay`, then answer with `status` and `body`
    async fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_timeout_is_network() {
        let base = serve_once("200 OK", "{}", Duration::from_secs(2)).await;
        let client = CatalogClient::new(&base, Duration::from_millis(200)).unwrap();

        let result = client.get_character(1).await;
        assert!(matches!(result, Err(FetchError::Network(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_network_not_not_found() {
        let base = serve_once("503 Service Unavailable", "down", Duration::ZERO).await;
        let client = CatalogClient::new(&base, Duration::from_secs(2)).unwrap();

        let result = client.get_character(1).await;
        assert!(matches!(result, Err(FetchError::Network(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_batch_with_no_ids_skips_network() {
        // Port 9 is discard; any real request would fail
        let client = CatalogClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let items = client.get_characters_by_ids(&[]).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_with_cancelled_token_returns_cancelled() {
        let client = CatalogClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = client.list_characters(&ListQuery::default(), &cancel).await;
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
