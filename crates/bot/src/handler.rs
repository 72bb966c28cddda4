//! Executes parsed commands against the Book Record Store.

use shelf_core::error::CoreError;
use shelf_core::types::OwnerId;
use shelf_db::models::book::CreateBook;
use shelf_db::repositories::BookRepo;
use shelf_db::{DbPool, StoreError};

use crate::command::{Command, CommandError};
use crate::reply;

/// Turn one incoming message into reply text.
///
/// Returns `None` for messages that are not commands.
pub async fn handle_message(pool: &DbPool, owner: OwnerId, text: &str) -> Option<String> {
    match Command::parse(text) {
        Ok(command) => Some(execute(pool, owner, command).await),
        Err(CommandError::NotACommand) => None,
        Err(err) => Some(err.to_string()),
    }
}

/// Run a command for `owner` and render the outcome.
///
/// Store failures are rendered too; nothing is retried. `/edit` and
/// `/delete` address books by id alone and are not limited to `owner`.
pub async fn execute(pool: &DbPool, owner: OwnerId, command: Command) -> String {
    match run(pool, owner, command).await {
        Ok(text) => text,
        Err(err) => render_store_error(owner, err),
    }
}

async fn run(pool: &DbPool, owner: OwnerId, command: Command) -> Result<String, StoreError> {
    let text = match command {
        Command::Start => reply::START_TEXT.to_string(),
        Command::Help => reply::HELP_TEXT.to_string(),
        Command::Add {
            title,
            author,
            genre,
            status,
        } => {
            let input = CreateBook {
                user_id: owner,
                title,
                author,
                genre,
                status,
            };
            let book = BookRepo::create(pool, &input).await?;
            tracing::info!(book_id = book.id, user_id = owner, "Book added from chat");
            reply::BOOK_ADDED.to_string()
        }
        Command::List { page } => {
            let books = BookRepo::list_page(pool, owner, page).await?;
            reply::format_books(&books, reply::EMPTY_PAGE)
        }
        Command::Search { query } => {
            let books = BookRepo::search(pool, owner, &query).await?;
            reply::format_books(&books, reply::NOTHING_FOUND)
        }
        Command::Edit { id, patch } => {
            BookRepo::update_fields(pool, id, &patch).await?;
            tracing::info!(book_id = id, user_id = owner, "Book edited from chat");
            reply::BOOK_UPDATED.to_string()
        }
        Command::Delete { id } => {
            BookRepo::delete(pool, id).await?;
            tracing::info!(book_id = id, user_id = owner, "Book deleted from chat");
            reply::BOOK_DELETED.to_string()
        }
        Command::Stats => {
            let count = BookRepo::monthly_completion_count(pool, owner).await?;
            reply::format_stats(count)
        }
    };
    Ok(text)
}

fn render_store_error(owner: OwnerId, err: StoreError) -> String {
    match err {
        StoreError::Core(CoreError::NotFound { id, .. }) => reply::format_not_found(id),
        StoreError::Core(CoreError::Validation(msg)) => msg,
        StoreError::Unavailable(err) => {
            tracing::error!(user_id = owner, error = %err, "Storage failure while handling command");
            reply::STORAGE_FAILURE.to_string()
        }
    }
}
