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


//! Client-side checks run before any request is sent
//!
//! Fields are checked in form order and only the first failure is reported, so the
//! view can focus a single input.

use crate::error::{BookFormError, Result};
use crate::form::FormField;
use crate::model::BookRequest;
use regex::Regex;

lazy_static::lazy_static! {
    static ref ISBN_PATTERN: Regex = Regex::new(r"^\d{13}$").expect("ISBN pattern is valid");
}

/// Check that `isbn` is exactly thirteen ASCII digits
pub fn is_valid_isbn(isbn: &str) -> bool {
    // `\d` is Unicode-aware in the regex crate; keep ASCII only.
    isbn.is_ascii() && ISBN_PATTERN.is_match(isbn)
}

/// Validate a submitted book, reporting the first failing field
pub fn validate_book(book: &BookRequest) -> Result<()> {
    let detail = &book.detail_request;

    require(FormField::Title, &book.title)?;
    require(FormField::Author, &book.author)?;
    if !is_valid_isbn(&book.isbn) {
        return Err(BookFormError::validation(
            FormField::Isbn,
            "ISBN must be exactly 13 digits.",
        ));
    }
    require(FormField::Price, &book.price)?;
    require(FormField::PublishDate, &book.publish_date)?;

    require(FormField::Description, &detail.description)?;
    require(FormField::Language, &detail.language)?;
    require(FormField::PageCount, &detail.page_count)?;
    require(FormField::Publisher, &detail.publisher)?;
    require(FormField::CoverImageUrl, &detail.cover_image_url)?;
    require(FormField::Edition, &detail.edition)?;

    Ok(())
}

fn require(field: FormField, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BookFormError::validation(
            field,
            format!("Please enter the {}.", field.label()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::BookForm;
    use crate::model::DetailRequest;

    fn complete() -> BookRequest {
        BookRequest {
            title: "The Rust Programming Language".to_string(),
            author: "Steve Klabnik".to_string(),
            isbn: "9781718503106".to_string(),
            price: "39.99".to_string(),
            publish_date: "2023-02-28".to_string(),
            detail_request: DetailRequest {
                description: "The official book".to_string(),
                language: "English".to_string(),
                page_count: "560".to_string(),
                publisher: "No Starch Press".to_string(),
                cover_image_url: "https://example.com/trpl.png".to_string(),
                edition: "2nd".to_string(),
            },
        }
    }

    fn failing_field(book: &BookRequest) -> Option<FormField> {
        match validate_book(book) {
            Err(BookFormError::Validation { field, .. }) => Some(field),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => None,
        }
    }

    #[test]
    fn test_complete_book_passes() {
        assert!(validate_book(&complete()).is_ok());
    }

    #[test]
    fn test_isbn_must_be_thirteen_digits() {
        for isbn in ["", "978171850310", "97817185031066", "978-1718503106", "978171850310X", " 9781718503106"] {
            let mut book = complete();
            book.isbn = isbn.to_string();
            assert_eq!(failing_field(&book), Some(FormField::Isbn), "isbn {isbn:?}");
        }
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(!is_valid_isbn("٩٧٨١٧١٨٥٠٣١٠٦"));
        assert!(is_valid_isbn("0000000000000"));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut book = complete();
        book.author.clear();
        book.detail_request.edition.clear();
        assert_eq!(failing_field(&book), Some(FormField::Author));

        let err = validate_book(&book).unwrap_err();
        assert_eq!(err.to_string(), "Please enter the author.");
    }

    #[test]
    fn test_every_field_is_required() {
        for field in FormField::ALL {
            let mut form = BookForm::new();
            for other in FormField::ALL {
                form.set(other, "1234567890123");
            }
            form.set(field, "   ");

            assert_eq!(failing_field(&form.to_request()), Some(field));
        }
    }
}
