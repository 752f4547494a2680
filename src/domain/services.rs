use crate::domain::model::{
    City, Page, PageRequest, PaginatedResponse, PermutableCityResponse,
};
use crate::domain::ports::{CityRepository, WordRepository};
use crate::utils::error::{CitiesError, Result};
use std::collections::HashSet;

/// Cities considered by the permutation search have names of this length.
pub const PERMUTABLE_NAME_LENGTH: usize = 7;

/// Dictionary word lengths matched against each candidate city.
pub const WORD_LENGTHS: [usize; 3] = [5, 6, 7];

pub struct CityService<C: CityRepository, W: WordRepository> {
    cities: C,
    words: W,
}

impl<C: CityRepository, W: WordRepository> CityService<C, W> {
    pub fn new(cities: C, words: W) -> Self {
        Self { cities, words }
    }

    pub fn find_cities_with_params(&self, page: i64, size: i64) -> Result<PaginatedResponse> {
        let request = validate_page_and_size(page, size)?;

        tracing::info!("Fetching all cities from repository");
        let result = self.cities.find_all(request)?;

        tracing::debug!("Mapped {} results. Building response", result.content.len());
        build_response(request, result)
    }

    pub fn find_cities_in_alphabetical_order(
        &self,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse> {
        let request = validate_page_and_size(page, size)?;

        tracing::info!("Fetching cities ordered by name");
        let result = self.cities.find_all_by_name_asc(request)?;

        tracing::debug!("Mapped {} results. Building response", result.content.len());
        build_response(request, result)
    }

    pub fn find_most_permutable_city(&self) -> Result<PermutableCityResponse> {
        let candidates = self.cities.find_with_name_length(PERMUTABLE_NAME_LENGTH)?;
        tracing::info!("Checking {} city names", candidates.len());

        let mut dictionaries = Vec::with_capacity(WORD_LENGTHS.len());
        for length in WORD_LENGTHS {
            let words: HashSet<String> = self
                .words
                .find_words_with_length(length)?
                .iter()
                .map(|word| word.to_lowercase())
                .collect();
            dictionaries.push((length, words));
        }

        let mut best: Option<(City, Vec<String>)> = None;
        for city in candidates {
            let mut found = Vec::new();
            for (length, dictionary) in &dictionaries {
                collect_permutation_words(city.name.trim(), *length, dictionary, &mut found);
            }

            let best_len = best.as_ref().map(|(_, words)| words.len()).unwrap_or(0);
            if found.len() > best_len {
                tracing::debug!(city = %city.name, words = found.len(), "New most permutable city");
                best = Some((city, found));
            }
        }

        let (city, words_in_dictionary) = best.ok_or_else(|| {
            tracing::error!("No city name could be permuted into a dictionary word");
            CitiesError::data_processing(
                "An error occurred while calculating permutations and response was null",
            )
        })?;

        Ok(PermutableCityResponse {
            city,
            words_in_dictionary,
        })
    }
}

fn validate_page_and_size(page: i64, size: i64) -> Result<PageRequest> {
    tracing::debug!("Validating page number: {} and size: {}", page, size);

    if page < 1 {
        tracing::warn!("Page number validation failed: page {} is less than 1", page);
        return Err(CitiesError::bad_request(
            "Page must be at least one",
            "Pagination should start at 1",
        ));
    }

    if size < 1 {
        tracing::warn!("Page size validation failed: size {} is less than 1", size);
        return Err(CitiesError::bad_request(
            "Size must be greater than zero",
            "Query must show at least one element",
        ));
    }

    let page = u32::try_from(page).map_err(|_| {
        CitiesError::bad_request("Page out of range", "Page number is too large")
    })?;
    let size = u32::try_from(size).map_err(|_| {
        CitiesError::bad_request("Size out of range", "Page size is too large")
    })?;

    Ok(PageRequest::new(page, size))
}

fn build_response(request: PageRequest, result: Page<City>) -> Result<PaginatedResponse> {
    let total_pages = result.total_pages();

    if request.page > total_pages {
        tracing::warn!(
            "Requested page was {}, but last page is {}",
            request.page,
            total_pages
        );
        return Err(CitiesError::bad_request(
            "Not enough pages",
            format!("Query results can show up to {} pages", total_pages),
        ));
    }

    Ok(PaginatedResponse {
        content: result.content,
        total_pages,
        total_elements: result.total_elements,
        last: total_pages <= request.page,
        size: request.size,
        number: request.page,
    })
}

/// Appends to `found` every `length`-letter arrangement of the characters
/// of `name` that is in `dictionary`, ignoring case. Arrangements are
/// visited by picking the earliest unused position first, so words appear
/// in the order that walk reaches them. Words are stored lowercased and
/// only once.
fn collect_permutation_words(
    name: &str,
    length: usize,
    dictionary: &HashSet<String>,
    found: &mut Vec<String>,
) {
    if dictionary.is_empty() {
        return;
    }

    let letters: Vec<char> = name.to_lowercase().chars().collect();
    let mut prefix = String::with_capacity(length * 4);
    permute(&letters, length, &mut prefix, dictionary, found);
}

fn permute(
    remaining: &[char],
    length: usize,
    prefix: &mut String,
    dictionary: &HashSet<String>,
    found: &mut Vec<String>,
) {
    if length == 0 {
        if dictionary.contains(prefix.as_str()) && !found.iter().any(|w| w == prefix) {
            tracing::trace!("Found {} in the dictionary", prefix);
            found.push(prefix.clone());
        }
        return;
    }

    for i in 0..remaining.len() {
        let mut rest = remaining.to_vec();
        let ch = rest.remove(i);
        prefix.push(ch);
        permute(&rest, length - 1, prefix, dictionary, found);
        prefix.pop();
    }
}
