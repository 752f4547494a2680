use crate::domain::model::{City, Page, PageRequest};
use crate::domain::ports::{CityRepository, WordRepository};
use crate::utils::error::Result;

/// City table held in memory. Keeps both insertion order and a name-sorted view.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCityRepository {
    cities: Vec<City>,
    by_name: Vec<City>,
}

impl InMemoryCityRepository {
    pub fn new(cities: Vec<City>) -> Self {
        let mut by_name = cities.clone();
        // Case-insensitive first, exact name breaks ties so the order is total.
        by_name.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Self { cities, by_name }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn slice_page(source: &[City], request: PageRequest) -> Page<City> {
    let content = source
        .iter()
        .skip(request.offset())
        .take(request.size as usize)
        .cloned()
        .collect();

    Page {
        content,
        total_elements: source.len() as u64,
        size: request.size,
    }
}

impl CityRepository for InMemoryCityRepository {
    fn find_all(&self, request: PageRequest) -> Result<Page<City>> {
        Ok(slice_page(&self.cities, request))
    }

    fn find_all_by_name_asc(&self, request: PageRequest) -> Result<Page<City>> {
        Ok(slice_page(&self.by_name, request))
    }

    fn find_with_name_length(&self, length: usize) -> Result<Vec<City>> {
        Ok(self
            .cities
            .iter()
            .filter(|city| city.name.chars().count() == length)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryWordRepository {
    words: Vec<String>,
}

impl InMemoryWordRepository {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordRepository for InMemoryWordRepository {
    fn find_words_with_length(&self, length: usize) -> Result<Vec<String>> {
        Ok(self
            .words
            .iter()
            .filter(|word| word.chars().count() == length)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> InMemoryCityRepository {
        InMemoryCityRepository::new(vec![
            City::new(1, "zurich"),
            City::new(2, "Amsterdam"),
            City::new(3, "bruges"),
            City::new(4, "Cordoba"),
        ])
    }

    #[test]
    fn test_find_all_keeps_insertion_order() {
        let page = repository().find_all(PageRequest::new(1, 2)).unwrap();
        assert_eq!(page.content, vec![City::new(1, "zurich"), City::new(2, "Amsterdam")]);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_find_all_by_name_asc_ignores_case() {
        let page = repository().find_all_by_name_asc(PageRequest::new(1, 4)).unwrap();
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Amsterdam", "bruges", "Cordoba", "zurich"]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = repository().find_all_by_name_asc(PageRequest::new(5, 2)).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn test_find_with_name_length_counts_chars() {
        let repo = InMemoryCityRepository::new(vec![
            City::new(1, "Cordoba"),
            City::new(2, "Córdoba"),
            City::new(3, "Bern"),
        ]);
        let found = repo.find_with_name_length(7).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_words_filtered_by_length() {
        let repo = InMemoryWordRepository::new(vec![
            "breed".to_string(),
            "breded".to_string(),
            "dozen".to_string(),
        ]);
        assert_eq!(repo.find_words_with_length(5).unwrap(), vec!["breed", "dozen"]);
        assert_eq!(repo.find_words_with_length(6).unwrap(), vec!["breded"]);
        assert!(repo.find_words_with_length(7).unwrap().is_empty());
    }
}
