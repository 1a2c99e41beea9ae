//! Search result envelope.

use serde::Deserialize;

/// Response of a collection search, decoded straight into the entity type.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryResponse<E> {
    /// Number of objects of this kind the caller can see.
    #[serde(default)]
    pub total: Option<u64>,
    /// Number of objects matching the search.
    #[serde(default)]
    pub subtotal: u64,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Search string as the server understood it.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<E>,
}

impl<E> Default for QueryResponse<E> {
    fn default() -> Self {
        QueryResponse {
            total: None,
            subtotal: 0,
            page: None,
            per_page: None,
            search: None,
            results: vec![],
        }
    }
}

impl<E> QueryResponse<E> {
    pub fn is_empty(&self) -> bool {
        self.subtotal == 0 || self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn test_decode_typed_results() {
        let raw = std::fs::read_to_string("src/tests/test_data/query_locations_01.json")
            .expect("Error reading query fixture");
        let response: QueryResponse<Location> = serde_json::from_str(&raw).unwrap();
        assert_eq!(response.subtotal, 2);
        assert_eq!(response.total, Some(5));
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].object.name, "dc1");
        assert_eq!(response.results[1].title, "berlin/dc1");
        assert!(!response.is_empty());
    }

    #[test]
    fn test_decode_empty() {
        let response: QueryResponse<Location> =
            serde_json::from_str(r#"{"total": 5, "subtotal": 0, "search": "name=\"x\"", "results": []}"#)
                .unwrap();
        assert!(response.is_empty());
        assert_eq!(response.search.as_deref(), Some("name=\"x\""));
    }
}
