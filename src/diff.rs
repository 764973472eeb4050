// book-form - Book catalog form client
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Change detection between a loaded book and the edited form
//!
//! Only fields that differ from the baseline are sent. Numeric fields compare by value,
//! so a price loaded as `10` and resubmitted as `"10.0"` is not a change.

use crate::model::{Book, BookDetail, BookPatch, BookRequest, DetailPatch};
use reqwest::Method;
use std::fmt;

/// Number of top-level scalar fields in a full record
pub const TOP_LEVEL_FIELDS: usize = 5;

/// Number of detail fields in a full record
pub const DETAIL_FIELDS: usize = 6;

/// HTTP method used to send an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    /// Partial update; fields not in the payload are kept
    Patch,
    /// Full replacement
    Put,
}

impl UpdateMethod {
    /// Pick PUT for a full record and PATCH for anything smaller
    pub fn select(patch: &BookPatch) -> Self {
        if patch.is_full_record() {
            UpdateMethod::Put
        } else {
            UpdateMethod::Patch
        }
    }

    pub fn as_method(&self) -> Method {
        match self {
            UpdateMethod::Patch => Method::PATCH,
            UpdateMethod::Put => Method::PUT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMethod::Patch => "PATCH",
            UpdateMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.top_level_count() == 0 && self.detail_request.is_none()
    }

    /// Changed scalar fields, not counting `detailRequest`
    pub fn top_level_count(&self) -> usize {
        [
            &self.title,
            &self.author,
            &self.isbn,
            &self.price,
            &self.publish_date,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }

    /// True when every scalar and every detail field is present
    pub fn is_full_record(&self) -> bool {
        self.top_level_count() == TOP_LEVEL_FIELDS
            && self
                .detail_request
                .as_ref()
                .map_or(false, |detail| detail.field_count() == DETAIL_FIELDS)
    }
}

impl DetailPatch {
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    pub fn field_count(&self) -> usize {
        [
            &self.description,
            &self.language,
            &self.page_count,
            &self.publisher,
            &self.cover_image_url,
            &self.edition,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }
}

/// Build the payload holding only the fields of `current` that differ from `original`
pub fn patch_payload(original: &Book, current: &BookRequest) -> BookPatch {
    let mut patch = BookPatch {
        title: changed_text(&original.title, &current.title),
        author: changed_text(&original.author, &current.author),
        isbn: changed_text(&original.isbn, &current.isbn),
        price: changed_number(&original.price, &current.price),
        publish_date: changed_text(&original.publish_date, &current.publish_date),
        detail_request: None,
    };

    let detail = detail_patch(original.detail.as_ref(), current);
    if !detail.is_empty() {
        patch.detail_request = Some(detail);
    }

    patch
}

fn detail_patch(original: Option<&BookDetail>, current: &BookRequest) -> DetailPatch {
    let current = &current.detail_request;

    // A book stored without detail has nothing to compare against.
    let Some(original) = original else {
        return DetailPatch {
            description: Some(current.description.clone()),
            language: Some(current.language.clone()),
            page_count: Some(current.page_count.clone()),
            publisher: Some(current.publisher.clone()),
            cover_image_url: Some(current.cover_image_url.clone()),
            edition: Some(current.edition.clone()),
        };
    };

    DetailPatch {
        description: changed_text(&original.description, &current.description),
        language: changed_text(&original.language, &current.language),
        page_count: changed_number(&original.page_count, &current.page_count),
        publisher: changed_text(&original.publisher, &current.publisher),
        cover_image_url: changed_text(&original.cover_image_url, &current.cover_image_url),
        edition: changed_text(&original.edition, &current.edition),
    }
}

fn changed_text(original: &str, current: &str) -> Option<String> {
    (original != current).then(|| current.to_string())
}

fn changed_number(original: &str, current: &str) -> Option<String> {
    (!numbers_equal(original, current)).then(|| current.to_string())
}

/// Compare by numeric value when both sides parse, by text otherwise
fn numbers_equal(a: &str, b: &str) -> bool {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y || a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetailRequest;

    fn original() -> Book {
        Book {
            id: 42,
            title: "A".to_string(),
            author: "Author".to_string(),
            isbn: "1234567890123".to_string(),
            price: "10".to_string(),
            publish_date: "2024-01-01".to_string(),
            detail: Some(BookDetail {
                description: "desc".to_string(),
                language: "Korean".to_string(),
                page_count: "300".to_string(),
                publisher: "Pub".to_string(),
                cover_image_url: "https://example.com/a.png".to_string(),
                edition: "1".to_string(),
            }),
        }
    }

    fn unchanged() -> BookRequest {
        let book = original();
        let detail = book.detail.unwrap();
        BookRequest {
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            price: book.price,
            publish_date: book.publish_date,
            detail_request: DetailRequest {
                description: detail.description,
                language: detail.language,
                page_count: detail.page_count,
                publisher: detail.publisher,
                cover_image_url: detail.cover_image_url,
                edition: detail.edition,
            },
        }
    }

    #[test]
    fn test_identical_is_empty() {
        let patch = patch_payload(&original(), &unchanged());
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }

    #[test]
    fn test_price_change_only() {
        let mut current = unchanged();
        current.price = "20".to_string();

        let patch = patch_payload(&original(), &current);
        assert_eq!(
            patch,
            BookPatch {
                price: Some("20".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(UpdateMethod::select(&patch), UpdateMethod::Patch);
    }

    #[test]
    fn test_numeric_fields_compare_by_value() {
        let mut current = unchanged();
        current.price = "10.0".to_string();
        current.detail_request.page_count = "300".to_string();
        assert!(patch_payload(&original(), &current).is_empty());

        // Text fields stay strict.
        current.detail_request.edition.push_str(".0");
        assert!(!patch_payload(&original(), &current).is_empty());
    }

    #[test]
    fn test_unchanged_nan_price_is_not_a_change() {
        let mut book = original();
        book.price = "NaN".to_string();
        let mut current = unchanged();
        current.price = "NaN".to_string();

        assert!(patch_payload(&book, &current).is_empty());
    }

    #[test]
    fn test_detail_only_change() {
        let mut current = unchanged();
        current.detail_request.language = "English".to_string();

        let patch = patch_payload(&original(), &current);
        assert_eq!(patch.top_level_count(), 0);
        let detail = patch.detail_request.clone().unwrap();
        assert_eq!(detail.language.as_deref(), Some("English"));
        assert_eq!(detail.field_count(), 1);
        assert_eq!(UpdateMethod::select(&patch), UpdateMethod::Patch);
    }

    #[test]
    fn test_all_top_level_without_detail_is_patch() {
        let current = BookRequest {
            title: "B".to_string(),
            author: "Other".to_string(),
            isbn: "9999999999999".to_string(),
            price: "11".to_string(),
            publish_date: "2024-02-02".to_string(),
            ..unchanged()
        };

        let patch = patch_payload(&original(), &current);
        assert_eq!(patch.top_level_count(), TOP_LEVEL_FIELDS);
        assert!(patch.detail_request.is_none());
        assert_eq!(UpdateMethod::select(&patch), UpdateMethod::Patch);
    }

    #[test]
    fn test_full_record_is_put() {
        let current = BookRequest {
            title: "B".to_string(),
            author: "Other".to_string(),
            isbn: "9999999999999".to_string(),
            price: "11".to_string(),
            publish_date: "2024-02-02".to_string(),
            detail_request: DetailRequest {
                description: "new".to_string(),
                language: "English".to_string(),
                page_count: "120".to_string(),
                publisher: "Other Pub".to_string(),
                cover_image_url: "https://example.com/b.png".to_string(),
                edition: "2".to_string(),
            },
        };

        let patch = patch_payload(&original(), &current);
        assert!(patch.is_full_record());
        assert_eq!(UpdateMethod::select(&patch), UpdateMethod::Put);
        assert_eq!(UpdateMethod::Put.as_method(), Method::PUT);
    }

    #[test]
    fn test_missing_original_detail_sends_all_detail_fields() {
        let mut book = original();
        book.detail = None;

        let patch = patch_payload(&book, &unchanged());
        assert_eq!(patch.top_level_count(), 0);
        assert_eq!(patch.detail_request.unwrap().field_count(), DETAIL_FIELDS);
    }
}
