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


use anyhow::Context;
use book_form::controller::{BookFormController, FormView};
use book_form::feedback::{Message, MessageKind};
use book_form::form::{BookForm, FormField};
use book_form::table::BookTable;
use book_form::{BookApiClient, ClientConfig};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "book-form")]
#[command(about = "Manage the book catalog from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the book API [default: $BOOK_API_BASE_URL or http://localhost:8080]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    /// Log requests (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all books
    List,
    /// Add a new book
    Create {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Load a book, apply the given changes and save it
    Edit {
        /// Book id
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book
    Delete {
        /// Book id
        id: i64,
        /// Title shown in the confirmation prompt
        #[arg(long)]
        title: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form inputs; only the given ones are written into the form
#[derive(Args, Debug, Default)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    publish_date: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    page_count: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    cover_image_url: Option<String>,
    #[arg(long)]
    edition: Option<String>,
}

impl BookFields {
    fn apply(self, form: &mut BookForm) {
        let values = [
            (FormField::Title, self.title),
            (FormField::Author, self.author),
            (FormField::Isbn, self.isbn),
            (FormField::Price, self.price),
            (FormField::PublishDate, self.publish_date),
            (FormField::Description, self.description),
            (FormField::Language, self.language),
            (FormField::PageCount, self.page_count),
            (FormField::Publisher, self.publisher),
            (FormField::CoverImageUrl, self.cover_image_url),
            (FormField::Edition, self.edition),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}

/// Prints everything the controller shows; asks confirmations on stdin
struct TerminalView {
    assume_yes: bool,
}

impl FormView for TerminalView {
    fn render_table(&mut self, table: &BookTable) {
        print!("{}", table.render_text());
    }

    fn show_message(&mut self, message: &Message) {
        match message.kind {
            MessageKind::Success => println!("✓ {}", message.text),
            MessageKind::Error => eprintln!("✗ {}", message.text),
        }
    }

    fn hide_message(&mut self) {}

    fn set_submit(&mut self, _label: &str, _enabled: bool) {}

    fn set_cancel_visible(&mut self, _visible: bool) {}

    fn focus_field(&mut self, field: FormField) {
        eprintln!("  (check --{})", field.flag());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "book_form=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::from_env();
    config.timeout = Duration::from_secs(cli.timeout_secs);
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let client = BookApiClient::with_config(config).context("invalid client configuration")?;

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let mut controller = BookFormController::new(client, TerminalView { assume_yes });

    let ok = match cli.command {
        Commands::List => controller.start().await.is_ok(),
        Commands::Create { fields } => {
            fields.apply(controller.form_mut());
            controller.submit().await.is_ok()
        }
        Commands::Edit { id, fields } => {
            if controller.edit_book(id).await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
            fields.apply(controller.form_mut());
            controller.submit().await.is_ok()
        }
        Commands::Delete { id, title, .. } => controller.delete_book(id, &title).await.is_ok(),
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
