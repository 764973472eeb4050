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


//! Book form controller
//!
//! Drives a `FormView` through the create/list/edit/delete flows:
//! - Loads the list on start and after every successful mutation
//! - Validates the form before anything goes over the wire
//! - Sends only the changed fields when editing, picking PATCH or PUT
//! - Turns every failure into a banner message
//!
//! # Form modes
//! ```text
//!            edit_book (ok)
//!   Create ──────────────────▶ Edit(session)
//!     ▲                            │
//!     └────────────────────────────┘
//!      update ok / reset / cancel
//! ```
//! `edit_book` while already editing rebinds the session to the new book.
//!
//! Every action reports its own failure to the view before returning it, so callers
//! may ignore the returned `Result`.

use crate::api::BookApiClient;
use crate::diff::{patch_payload, UpdateMethod};
use crate::error::{BookFormError, Result};
use crate::feedback::{Message, MessageBanner};
use crate::form::{BookForm, FormField};
use crate::model::{Book, BookRequest};
use crate::table::BookTable;
use crate::validation;
use tracing::{debug, info, warn};

pub const SUBMIT_CREATE_LABEL: &str = "Add book";
pub const SUBMIT_EDIT_LABEL: &str = "Update book";
pub const SUBMIT_BUSY_LABEL: &str = "Updating...";

const CREATED: &str = "Book created successfully!";
const UPDATED: &str = "Book updated successfully!";
const DELETED: &str = "Book deleted successfully!";

/// The UI surface the controller drives
///
/// Implementations only display state; all decisions stay in the controller.
pub trait FormView {
    /// Replace the table body
    fn render_table(&mut self, table: &BookTable);

    fn show_message(&mut self, message: &Message);

    fn hide_message(&mut self);

    /// Update the submit control's label and whether it accepts clicks
    fn set_submit(&mut self, label: &str, enabled: bool);

    fn set_cancel_visible(&mut self, visible: bool);

    /// Move input focus to the field that failed validation
    fn focus_field(&mut self, field: FormField);

    /// Ask the user a yes/no question
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Form values changed programmatically (populate or reset)
    fn form_updated(&mut self, _form: &BookForm) {}
}

/// The book being edited and its values as loaded from the server
///
/// Never mutated; a new session replaces the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    book_id: i64,
    original: Book,
}

impl EditSession {
    pub fn new(book_id: i64, original: Book) -> Self {
        Self { book_id, original }
    }

    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// Baseline for change detection
    pub fn original(&self) -> &Book {
        &self.original
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(EditSession),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            FormMode::Edit(session) => Some(session),
            FormMode::Create => None,
        }
    }
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Book),
    Updated {
        book: Book,
        method: UpdateMethod,
    },
}

pub struct BookFormController<V: FormView> {
    client: BookApiClient,
    view: V,
    form: BookForm,
    mode: FormMode,
    banner: MessageBanner,
    table: BookTable,
}

impl<V: FormView> BookFormController<V> {
    pub fn new(client: BookApiClient, view: V) -> Self {
        Self {
            client,
            view,
            form: BookForm::new(),
            mode: FormMode::Create,
            banner: MessageBanner::new(),
            table: BookTable::Rows(Vec::new()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// Inputs as the user edits them
    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn banner(&self) -> &MessageBanner {
        &self.banner
    }

    pub fn table(&self) -> &BookTable {
        &self.table
    }

    /// Initial load, run once when the form is shown
    pub async fn start(&mut self) -> Result<usize> {
        self.reset_form();
        self.load_books().await
    }

    /// Fetch the collection and render it
    ///
    /// On failure the table shows a single error row.
    pub async fn load_books(&mut self) -> Result<usize> {
        match self.client.list_books().await {
            Ok(books) => {
                debug!(count = books.len(), "loaded books");
                self.table = BookTable::from_books(&books);
                self.view.render_table(&self.table);
                Ok(books.len())
            }
            Err(e) => {
                self.report(&e);
                self.table = BookTable::load_error();
                self.view.render_table(&self.table);
                Err(e)
            }
        }
    }

    /// Read, validate and send the form according to the current mode
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let data = self.form.to_request();
        self.validate_book(&data)?;

        match self.mode.session().cloned() {
            Some(session) => {
                let book = self.update_book(&session, &data).await?;
                let method = UpdateMethod::select(&patch_payload(session.original(), &data));
                Ok(SubmitOutcome::Updated { book, method })
            }
            None => self.create_book(&data).await.map(SubmitOutcome::Created),
        }
    }

    /// Check required fields and the ISBN pattern, focusing the first bad field
    pub fn validate_book(&mut self, data: &BookRequest) -> Result<()> {
        if let Err(e) = validation::validate_book(data) {
            if let BookFormError::Validation { field, .. } = &e {
                self.view.focus_field(*field);
            }
            self.report(&e);
            return Err(e);
        }
        Ok(())
    }

    pub async fn create_book(&mut self, data: &BookRequest) -> Result<Book> {
        match self.client.create_book(data).await {
            Ok(book) => {
                info!(id = book.id, title = %book.title, "book created");
                self.reset_form();
                self.show_message(Message::success(CREATED));
                let _ = self.load_books().await;
                Ok(book)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Send the fields of `data` that differ from the session's baseline
    ///
    /// The submit control is disabled while the request is in flight and re-enabled
    /// afterwards whatever the result.
    pub async fn update_book(&mut self, session: &EditSession, data: &BookRequest) -> Result<Book> {
        self.view.set_submit(SUBMIT_BUSY_LABEL, false);

        let patch = patch_payload(session.original(), data);
        if patch.is_empty() {
            let e = BookFormError::NoChanges;
            self.report(&e);
            self.view.set_submit(SUBMIT_EDIT_LABEL, true);
            return Err(e);
        }

        let method = UpdateMethod::select(&patch);
        debug!(id = session.book_id(), %method, "sending update");
        let result = self.client.update_book(session.book_id(), method, &patch).await;
        self.view.set_submit(SUBMIT_EDIT_LABEL, true);

        match result {
            Ok(book) => {
                info!(id = session.book_id(), %method, "book updated");
                self.reset_form();
                self.show_message(Message::success(UPDATED));
                let _ = self.load_books().await;
                Ok(book)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Delete a book after the user confirms
    ///
    /// Returns `Ok(false)` without touching the server when the user declines.
    pub async fn delete_book(&mut self, id: i64, title: &str) -> Result<bool> {
        let prompt = format!("Really delete the book \"{}\"?", title);
        if !self.view.confirm(&prompt) {
            debug!(id, "delete cancelled");
            return Ok(false);
        }

        match self.client.delete_book(id).await {
            Ok(()) => {
                info!(id, "book deleted");
                self.show_message(Message::success(DELETED));
                let _ = self.load_books().await;
                Ok(true)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Load a book into the form and switch to edit mode
    pub async fn edit_book(&mut self, id: i64) -> Result<()> {
        let book = match self.client.get_book(id).await {
            Ok(book) => book,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };

        self.reset_form();
        self.form.populate(&book);
        self.view.form_updated(&self.form);

        self.mode = FormMode::Edit(EditSession::new(id, book));
        self.view.set_submit(SUBMIT_EDIT_LABEL, true);
        self.view.set_cancel_visible(true);
        debug!(id, "editing book");
        Ok(())
    }

    /// Clear inputs, drop the edit session and any message
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.view.form_updated(&self.form);
        self.mode = FormMode::Create;
        self.view.set_submit(SUBMIT_CREATE_LABEL, true);
        self.view.set_cancel_visible(false);
        self.hide_message();
    }

    /// Leave edit mode without saving
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    pub fn show_message(&mut self, message: Message) {
        self.view.show_message(&message);
        self.banner.show(message);
    }

    pub fn hide_message(&mut self) {
        self.banner.hide();
        self.view.hide_message();
    }

    /// Hide the banner once its message has expired
    ///
    /// Returns true if a message was hidden.
    pub fn expire_message(&mut self) -> bool {
        if self.banner.last_message().is_some() && self.banner.visible_message().is_none() {
            self.hide_message();
            return true;
        }
        false
    }

    /// Sleep until the current message's deadline, then hide it
    ///
    /// Returns immediately with `false` when no message is showing. A message shown
    /// while waiting is not picked up; call again to wait for it.
    pub async fn wait_message_expiry(&mut self) -> bool {
        let Some(deadline) = self.banner.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.expire_message()
    }

    fn report(&mut self, error: &BookFormError) {
        if !error.is_client_side() {
            warn!(error = %error, "action failed");
        }
        self.show_message(Message::error(error.user_message()));
    }
}
