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


//! Render model for the book list
//!
//! The table either lists books or, after a failed load, holds a single error row.
//! `render_text` lays it out with fixed-width columns for terminals.

use crate::model::{Book, BookDetail};

/// Shown in detail columns of books stored without a detail record
pub const MISSING: &str = "-";

/// Text of the error row
pub const LOAD_ERROR_ROW: &str = "Error: could not load data.";

const HEADERS: [&str; 12] = [
    "ID",
    "Title",
    "Author",
    "ISBN",
    "Price",
    "Published",
    "Description",
    "Language",
    "Pages",
    "Publisher",
    "Cover",
    "Edition",
];

/// One rendered row; the id backs the row's edit and delete actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: i64,
    pub cells: [String; 11],
}

impl BookRow {
    pub fn title(&self) -> &str {
        &self.cells[0]
    }
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            cells: [
                book.title.clone(),
                book.author.clone(),
                book.isbn.clone(),
                book.price.clone(),
                book.publish_date.clone(),
                detail_cell(book, |d| &d.description),
                detail_cell(book, |d| &d.language),
                detail_cell(book, |d| &d.page_count),
                detail_cell(book, |d| &d.publisher),
                detail_cell(book, |d| &d.cover_image_url),
                detail_cell(book, |d| &d.edition),
            ],
        }
    }
}

fn detail_cell(book: &Book, pick: fn(&BookDetail) -> &String) -> String {
    book.detail
        .as_ref()
        .map(|d| pick(d).clone())
        .unwrap_or_else(|| MISSING.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookTable {
    Rows(Vec<BookRow>),
    Error(String),
}

impl BookTable {
    pub fn from_books(books: &[Book]) -> Self {
        BookTable::Rows(books.iter().map(BookRow::from).collect())
    }

    pub fn load_error() -> Self {
        BookTable::Error(LOAD_ERROR_ROW.to_string())
    }

    /// Book rows; empty for the error state
    pub fn rows(&self) -> &[BookRow] {
        match self {
            BookTable::Rows(rows) => rows,
            BookTable::Error(_) => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BookTable::Error(_))
    }

    pub fn render_text(&self) -> String {
        let rows = match self {
            BookTable::Error(message) => return format!("{}\n", message),
            BookTable::Rows(rows) => rows,
        };

        let lines: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                std::iter::once(row.id.to_string())
                    .chain(row.cells.iter().cloned())
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
        push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
        for line in lines {
            push_line(&mut out, line.into_iter(), &widths);
        }
        out
    }
}

fn push_line<I>(out: &mut String, cells: I, widths: &[usize])
where
    I: Iterator<Item = String>,
{
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
