//! book-form: create, list, edit and delete books through the catalog REST API
//!
//! The [`controller::BookFormController`] holds the form and its edit session and
//! drives any [`controller::FormView`]. The CLI binary provides a terminal view.

pub mod api;
pub mod controller;
pub mod diff;
pub mod error;
pub mod feedback;
pub mod form;
pub mod model;
pub mod table;
pub mod validation;

pub use api::{BookApiClient, ClientConfig};
pub use controller::{BookFormController, EditSession, FormMode, FormView, SubmitOutcome};
pub use diff::{patch_payload, UpdateMethod};
pub use error::{BookFormError, Result};
pub use form::{BookForm, FormField};
pub use model::{Book, BookDetail, BookPatch, BookRequest, DetailPatch, DetailRequest};
