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


//! Form state
//!
//! `BookForm` holds the raw text of every input exactly as the user typed it. Values are
//! trimmed only when the form is read into a `BookRequest`.

use crate::model::{Book, BookRequest, DetailRequest};
use std::fmt;

/// Every input of the book form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Author,
    Isbn,
    Price,
    PublishDate,
    Description,
    Language,
    PageCount,
    Publisher,
    CoverImageUrl,
    Edition,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Title,
        FormField::Author,
        FormField::Isbn,
        FormField::Price,
        FormField::PublishDate,
        FormField::Description,
        FormField::Language,
        FormField::PageCount,
        FormField::Publisher,
        FormField::CoverImageUrl,
        FormField::Edition,
    ];

    /// Input name, matching the JSON key
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Isbn => "isbn",
            FormField::Price => "price",
            FormField::PublishDate => "publishDate",
            FormField::Description => "description",
            FormField::Language => "language",
            FormField::PageCount => "pageCount",
            FormField::Publisher => "publisher",
            FormField::CoverImageUrl => "coverImageUrl",
            FormField::Edition => "edition",
        }
    }

    /// Kebab-case spelling of `name`, used for command-line flags
    pub fn flag(&self) -> String {
        let mut flag = String::new();
        for c in self.name().chars() {
            if c.is_ascii_uppercase() {
                flag.push('-');
                flag.push(c.to_ascii_lowercase());
            } else {
                flag.push(c);
            }
        }
        flag
    }

    /// Human label used in messages and table headers
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Isbn => "ISBN",
            FormField::Price => "price",
            FormField::PublishDate => "publish date",
            FormField::Description => "description",
            FormField::Language => "language",
            FormField::PageCount => "page count",
            FormField::Publisher => "publisher",
            FormField::CoverImageUrl => "cover image URL",
            FormField::Edition => "edition",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw values of the form inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
    pub description: String,
    pub language: String,
    pub page_count: String,
    pub publisher: String,
    pub cover_image_url: String,
    pub edition: String,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Isbn => &self.isbn,
            FormField::Price => &self.price,
            FormField::PublishDate => &self.publish_date,
            FormField::Description => &self.description,
            FormField::Language => &self.language,
            FormField::PageCount => &self.page_count,
            FormField::Publisher => &self.publisher,
            FormField::CoverImageUrl => &self.cover_image_url,
            FormField::Edition => &self.edition,
        }
    }

    pub fn set<S: Into<String>>(&mut self, field: FormField, value: S) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::Isbn => &mut self.isbn,
            FormField::Price => &mut self.price,
            FormField::PublishDate => &mut self.publish_date,
            FormField::Description => &mut self.description,
            FormField::Language => &mut self.language,
            FormField::PageCount => &mut self.page_count,
            FormField::Publisher => &mut self.publisher,
            FormField::CoverImageUrl => &mut self.cover_image_url,
            FormField::Edition => &mut self.edition,
        };
        *slot = value.into();
    }

    /// Read the form into a request, trimming every value
    pub fn to_request(&self) -> BookRequest {
        BookRequest {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            price: self.price.trim().to_string(),
            publish_date: self.publish_date.trim().to_string(),
            detail_request: DetailRequest {
                description: self.description.trim().to_string(),
                language: self.language.trim().to_string(),
                page_count: self.page_count.trim().to_string(),
                publisher: self.publisher.trim().to_string(),
                cover_image_url: self.cover_image_url.trim().to_string(),
                edition: self.edition.trim().to_string(),
            },
        }
    }

    /// Fill the inputs from a stored book
    ///
    /// Detail inputs are only touched when the book has a detail record.
    pub fn populate(&mut self, book: &Book) {
        self.title = book.title.clone();
        self.author = book.author.clone();
        self.isbn = book.isbn.clone();
        self.price = book.price.clone();
        self.publish_date = book.publish_date.clone();

        if let Some(ref detail) = book.detail {
            self.description = detail.description.clone();
            self.language = detail.language.clone();
            self.page_count = detail.page_count.clone();
            self.publisher = detail.publisher.clone();
            self.cover_image_url = detail.cover_image_url.clone();
            self.edition = detail.edition.clone();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
