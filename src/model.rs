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


//! Transport records for the Book API
//!
//! The server sends `Book` (with an optional nested `detail`); the form submits a
//! `BookRequest` (with a mandatory `detailRequest`) on create and a sparse `BookPatch`
//! on update. Field names follow the server's camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// SERVER RECORDS
// ============================================================================

/// A book as returned by `GET /api/books` and `GET /api/books/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Some servers send ids as strings
    #[serde(deserialize_with = "id_from_number_or_text")]
    pub id: i64,
    #[serde(default, deserialize_with = "text_or_number")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub author: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub isbn: String,
    /// Sent as a JSON number by most servers; kept as text for the form
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub publish_date: String,
    #[serde(default)]
    pub detail: Option<BookDetail>,
}

/// Descriptive fields of a book; absent on books created without details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    #[serde(default, deserialize_with = "text_or_number")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub language: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub page_count: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub publisher: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub cover_image_url: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub edition: String,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// FORM PAYLOADS
// ============================================================================

/// Full record submitted by the form on create
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
    pub detail_request: DetailRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRequest {
    pub description: String,
    pub language: String,
    pub page_count: String,
    pub publisher: String,
    pub cover_image_url: String,
    pub edition: String,
}

/// Changed fields only, sent on update
///
/// `None` fields are left out of the JSON entirely so the server keeps its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_request: Option<DetailPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
}

/// Accept strings, numbers, booleans and null for text fields
///
/// `null` becomes an empty string, numbers keep their JSON spelling.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}

/// Accept an integer id given either as a JSON number or as a numeric string
fn id_from_number_or_text<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("id {} is not an integer", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("id '{}' is not an integer", s))),
        other => Err(serde::de::Error::custom(format!(
            "expected integer id, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_with_numeric_fields() {
        let book: Book = serde_json::from_value(json!({
            "id": 7,
            "title": "Rust in Action",
            "author": "Tim McNamara",
            "isbn": "9781617294556",
            "price": 35000,
            "publishDate": "2021-08-10",
            "detail": {
                "description": "Systems programming",
                "language": "English",
                "pageCount": 456,
                "publisher": "Manning",
                "coverImageUrl": "https://example.com/cover.jpg",
                "edition": "1st"
            }
        }))
        .unwrap();

        assert_eq!(book.price, "35000");
        assert_eq!(book.publish_date, "2021-08-10");
        let detail = book.detail.unwrap();
        assert_eq!(detail.page_count, "456");
        assert_eq!(detail.cover_image_url, "https://example.com/cover.jpg");
    }

    #[test]
    fn test_book_without_detail() {
        let book: Book = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "author": "B",
            "isbn": "1234567890123",
            "price": "10",
            "publishDate": null,
            "detail": null
        }))
        .unwrap();

        assert!(book.detail.is_none());
        assert_eq!(book.publish_date, "");
    }

    #[test]
    fn test_string_id_is_accepted() {
        let book: Book = serde_json::from_str(
            r#"{"id":"7","title":"A","author":"B","isbn":"1234567890123","price":"10","publishDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(book.id, 7);

        let bad = serde_json::from_str::<Book>(r#"{"id":"seven","title":"A"}"#);
        assert!(bad.is_err());
        let fractional = serde_json::from_str::<Book>(r#"{"id":7.5,"title":"A"}"#);
        assert!(fractional.is_err());
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = BookPatch {
            price: Some("20".to_string()),
            detail_request: Some(DetailPatch {
                edition: Some("2nd".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "price": "20", "detailRequest": { "edition": "2nd" } }));
    }

    #[test]
    fn test_request_uses_detail_request_key() {
        let value = serde_json::to_value(BookRequest::default()).unwrap();
        assert!(value.get("detailRequest").is_some());
        assert!(value.get("publishDate").is_some());
    }

    #[test]
    fn test_error_body_message_is_optional() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Duplicate ISBN"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Duplicate ISBN"));
    }
}
