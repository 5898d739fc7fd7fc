use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_page_size(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            size: size.unwrap_or_else(default_page_size),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.size < 1 || self.size > MAX_PAGE_SIZE {
            return Err(format!("size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        Ok(())
    }

    /// Documents to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, size: u32, total_items: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(size)) as u32
        };
        Self {
            page,
            size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationParams, total_items: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(pagination.page, pagination.size, total_items),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Tells an absent field (`None`) apart from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Seasons span two consecutive years, e.g. "2024-2025"
pub(crate) fn validate_season(season: &str) -> Result<(), validator::ValidationError> {
    let valid = season
        .split_once('-')
        .and_then(|(start, end)| {
            if start.len() != 4 || end.len() != 4 {
                return None;
            }
            let start: u32 = start.parse().ok()?;
            let end: u32 = end.parse().ok()?;
            Some(end == start + 1)
        })
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_season")
            .with_message("Season must look like 2024-2025".into()))
    }
}

/// Federation licenses: uppercase letters, digits and dashes
pub(crate) fn validate_license(license: &str) -> Result<(), validator::ValidationError> {
    let valid = !license.is_empty()
        && license
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_license"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::new(None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.size, DEFAULT_PAGE_SIZE);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_offset_and_limit() {
        let params = PaginationParams::new(Some(3), Some(25));
        assert_eq!(params.offset(), 50);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(PaginationParams::new(Some(0), None).validate().is_err());
        assert!(PaginationParams::new(None, Some(0)).validate().is_err());
        assert!(PaginationParams::new(None, Some(MAX_PAGE_SIZE + 1)).validate().is_err());
        assert!(PaginationParams::new(None, Some(MAX_PAGE_SIZE)).validate().is_ok());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 20, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 20, 21).total_pages, 2);
    }

    #[test]
    fn test_pagination_meta_is_camel_case() {
        let json = serde_json::to_value(PaginationMeta::new(2, 10, 35)).unwrap();
        assert_eq!(json["totalItems"], 35);
        assert_eq!(json["totalPages"], 4);
    }

    #[test]
    fn test_season_must_be_consecutive_years() {
        assert!(validate_season("2024-2025").is_ok());
        assert!(validate_season("2024-2026").is_err());
        assert!(validate_season("24-25").is_err());
        assert!(validate_season("2024").is_err());
    }

    #[test]
    fn test_license_format() {
        assert!(validate_license("TF-0123").is_ok());
        assert!(validate_license("tf-0123").is_err());
        assert!(validate_license("").is_err());
    }
}
