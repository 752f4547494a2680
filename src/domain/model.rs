use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl City {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Body of `GET /api/cities/queryByPage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    pub content: Vec<City>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub size: u32,
    /// 1-based page number.
    #[serde(default)]
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermutableCityResponse {
    pub city: City,
    pub words_in_dictionary: Vec<String>,
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.size as usize
    }
}

/// One slice of a repository listing plus the total it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size as u64) as u32
    }
}

/// `<li>` fragments rendered from one fetched page.
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub names: Vec<String>,
    pub fragments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_response_wire_names() {
        let response = PaginatedResponse {
            content: vec![City::new(1, "Aachen")],
            total_pages: 3,
            total_elements: 41,
            last: false,
            size: 20,
            number: 1,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["totalElements"], 41);
        assert_eq!(json["content"][0]["name"], "Aachen");
    }

    #[test]
    fn test_client_tolerates_sparse_body() {
        let body = r#"{"content":[{"name":"Bern"},{"name":"Oslo","country":"NO"}]}"#;
        let response: PaginatedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.content[1].name, "Oslo");
        assert_eq!(response.content[0].id, 0);
    }

    #[test]
    fn test_page_math() {
        let page = Page {
            content: vec![1, 2, 3],
            total_elements: 41,
            size: 20,
        };
        assert_eq!(page.total_pages(), 3);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);

        let empty: Page<i32> = Page {
            content: vec![],
            total_elements: 0,
            size: 20,
        };
        assert_eq!(empty.total_pages(), 0);
    }
}
