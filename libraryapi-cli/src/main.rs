//! Command-line interface for the library author catalog.
//!
//! Runs author and book operations directly against the configured store.
//! Output is plain text by default, or JSON with `--json`.

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use libraryapi_model::model::{
    author::{AuthorId, AuthorModel},
    book::{BookId, BookModel},
};
use libraryapi_service::{
    LibraryService,
    config::AppConfig,
    error::{AppError, ErrorCode},
    tracing::tracer::Tracer,
};

/// Command-line interface configuration.
#[derive(Parser)]
#[command(name = "libraryapi-cli")]
#[command(about = "A CLI tool for managing the library author catalog")]
#[command(version)]
pub struct Cli {
    /// Output format (json or text)
    #[arg(long, short = 'J', env = "LIBRARYAPI_JSON")]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Author operations
    Author {
        #[command(subcommand)]
        command: AuthorCommands,
    },
    /// Book operations
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
}

/// Author-related operations.
#[derive(Subcommand)]
pub enum AuthorCommands {
    /// Get an author by ID
    Get {
        #[arg(help = "Author ID (e.g., authors/01J... or just 01J...)")]
        id: AuthorId,
    },
    /// Search authors
    ///
    /// Without --example, values must match exactly. With it, each value only
    /// has to be contained, ignoring case.
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        nationality: Option<String>,
        /// Match by case-insensitive containment
        #[arg(long)]
        example: bool,
    },
    /// Create a new author
    Create {
        #[arg(long)]
        name: String,
        /// Birth date (YYYY-MM-DD), must be in the past
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        nationality: String,
    },
    /// Update an existing author, replacing all of its attributes
    Update {
        #[arg(help = "Author ID (e.g., authors/01J... or just 01J...)")]
        id: AuthorId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        nationality: String,
    },
    /// Delete an author without registered books
    Delete {
        #[arg(help = "Author ID (e.g., authors/01J... or just 01J...)")]
        id: AuthorId,
    },
}

/// Book-related operations.
#[derive(Subcommand)]
pub enum BookCommands {
    /// Get a book by ID
    Get {
        #[arg(help = "Book ID (e.g., books/01J... or just 01J...)")]
        id: BookId,
    },
    /// Register a book for an existing author
    Register {
        #[arg(long)]
        title: String,
        #[arg(long = "author", help = "Author ID (e.g., authors/01J... or just 01J...)")]
        author_id: AuthorId,
    },
    /// List the books of an author
    List {
        #[arg(long = "author", help = "Author ID (e.g., authors/01J... or just 01J...)")]
        author_id: AuthorId,
    },
    /// Delete a book
    Delete {
        #[arg(help = "Book ID (e.g., books/01J... or just 01J...)")]
        id: BookId,
    },
}

#[derive(Serialize)]
struct AuthorList<'a> {
    authors: &'a [AuthorModel],
    total_size: usize,
}

#[derive(Serialize)]
struct BookList<'a> {
    books: &'a [BookModel],
    total_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map(AppError::code);
            match code {
                Some(code) => eprintln!("Error [{}]: {err}", code.as_str_name()),
                None => eprintln!("Error: {err}"),
            }
            ExitCode::from(exit_code(code))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::get();
    Tracer::install(config).map_err(AppError::from)?;
    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    let service = LibraryService::from_config(&config.database)?;

    match cli.command {
        Commands::Author { command } => {
            handle_author_command(&service, command, cli.json).await?;
        }
        Commands::Book { command } => {
            handle_book_command(&service, command, cli.json).await?;
        }
    }

    Ok(())
}

/// Maps a failure to a process exit code.
fn exit_code(code: Option<ErrorCode>) -> u8 {
    match code {
        Some(ErrorCode::InvalidArgument) => 2,
        Some(ErrorCode::NotFound) => 3,
        Some(ErrorCode::FailedPrecondition) => 4,
        Some(ErrorCode::AlreadyExists) => 5,
        Some(ErrorCode::Internal) | None => 1,
    }
}

/// Handles author-related CLI commands.
///
/// # Errors
///
/// Returns an error if the operation fails or the output cannot be encoded.
async fn handle_author_command(
    service: &LibraryService,
    command: AuthorCommands,
    json_output: bool,
) -> Result<()> {
    match command {
        AuthorCommands::Get { id } => {
            let author = service.authors.get(&id).await?;
            output_author(&author, json_output)?;
        }

        AuthorCommands::Search {
            name,
            nationality,
            example,
        } => {
            let authors = if example {
                service
                    .authors
                    .search_by_example(name.as_deref(), nationality.as_deref())
                    .await?
            } else {
                service
                    .authors
                    .search(name.as_deref(), nationality.as_deref())
                    .await?
            };

            if json_output {
                let list = AuthorList {
                    authors: &authors,
                    total_size: authors.len(),
                };
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                println!("Authors ({} total):", authors.len());
                for author in &authors {
                    println!(
                        "  - {}: {} ({}, born {})",
                        display_id(author),
                        author.name,
                        author.nationality,
                        author.birth_date
                    );
                }
            }
        }

        AuthorCommands::Create {
            name,
            birth_date,
            nationality,
        } => {
            let author = service
                .authors
                .create(AuthorModel::new(name, birth_date, nationality))
                .await?;
            output_author(&author, json_output)?;
        }

        AuthorCommands::Update {
            id,
            name,
            birth_date,
            nationality,
        } => {
            service
                .authors
                .update(AuthorModel::new(name, birth_date, nationality).with_id(id))
                .await?;
            let author = service.authors.get(&id).await?;
            output_author(&author, json_output)?;
        }

        AuthorCommands::Delete { id } => {
            service
                .authors
                .delete(&service.authors.get(&id).await?)
                .await?;

            if json_output {
                println!("{{\"status\": \"deleted\"}}");
            } else {
                println!("Author deleted successfully");
            }
        }
    }

    Ok(())
}

/// Handles book-related CLI commands.
///
/// # Errors
///
/// Returns an error if the operation fails or the output cannot be encoded.
async fn handle_book_command(
    service: &LibraryService,
    command: BookCommands,
    json_output: bool,
) -> Result<()> {
    match command {
        BookCommands::Get { id } => {
            let book = service.books.get(&id).await?;
            output_book(&book, json_output)?;
        }

        BookCommands::Register { title, author_id } => {
            let book = service.books.register(&title, author_id).await?;
            output_book(&book, json_output)?;
        }

        BookCommands::List { author_id } => {
            let books = service.books.list_by_author(&author_id).await?;

            if json_output {
                let list = BookList {
                    books: &books,
                    total_size: books.len(),
                };
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                println!("Books of {author_id} ({} total):", books.len());
                for book in &books {
                    println!("  - {}: {}", book.id, book.title);
                }
            }
        }

        BookCommands::Delete { id } => {
            service.books.delete(id).await?;

            if json_output {
                println!("{{\"status\": \"deleted\"}}");
            } else {
                println!("Book deleted successfully");
            }
        }
    }

    Ok(())
}

fn display_id(author: &AuthorModel) -> String {
    author
        .id
        .map(|id| id.to_name())
        .unwrap_or_default()
}

/// Outputs author information in the specified format.
fn output_author(author: &AuthorModel, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(author)?);
    } else {
        println!("Author Details:");
        println!("  Name: {}", display_id(author));
        println!("  Full Name: {}", author.name);
        println!("  Birth Date: {}", author.birth_date);
        println!("  Nationality: {}", author.nationality);
        if let Some(create_time) = author.create_time {
            println!("  Created: {create_time}");
        }
    }
    Ok(())
}

/// Outputs book information in the specified format.
fn output_book(book: &BookModel, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(book)?);
    } else {
        println!("Book Details:");
        println!("  Name: {}", book.id);
        println!("  Title: {}", book.title);
        println!("  Author: {}", book.author_id);
        println!("  Created: {}", book.create_time);
    }
    Ok(())
}
