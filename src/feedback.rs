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


//! Success and error banner shown above the form
//!
//! Messages expire on their own: `visible_message` stops returning a message once its
//! deadline has passed, whether or not anyone called `hide`.

use std::time::Duration;
use tokio::time::Instant;

/// How long a message stays visible
pub const AUTO_HIDE_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// The banner's current message and when it goes away
#[derive(Debug, Clone, Default)]
pub struct MessageBanner {
    current: Option<(Message, Instant)>,
}

impl MessageBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any previous one and restarting the timer
    pub fn show(&mut self, message: Message) {
        self.current = Some((message, Instant::now() + AUTO_HIDE_AFTER));
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn visible_message(&self) -> Option<&Message> {
        match self.current {
            Some((ref message, deadline)) if Instant::now() < deadline => Some(message),
            _ => None,
        }
    }

    /// The last message shown, even if it already expired
    pub fn last_message(&self) -> Option<&Message> {
        self.current.as_ref().map(|(message, _)| message)
    }

    /// When the current message hides, if one was shown
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, deadline)| *deadline)
    }
}
