//! Plain-text replies.

use shelf_db::models::book::Book;

/// Telegram rejects messages longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

pub const START_TEXT: &str = "Hi! This is your reading diary. Send /help for instructions.";

pub const HELP_TEXT: &str = "\
/add <title>, <author>, <genre>, <status: read|reading|planned>
/list [page]
/search <title or author>
/edit <id>, field=value, ... (fields: title, author, genre, status)
/delete <id>
/stats";

pub const BOOK_ADDED: &str = "Book added!";
pub const BOOK_UPDATED: &str = "Book updated.";
pub const BOOK_DELETED: &str = "Book deleted.";
pub const EMPTY_PAGE: &str = "No books on this page.";
pub const NOTHING_FOUND: &str = "Nothing found.";
pub const STORAGE_FAILURE: &str = "Something went wrong, please try again later.";

/// One book on one line: `id. title - author [genre] (status)`.
pub fn format_book(book: &Book) -> String {
    format!(
        "{}. {} - {} [{}] ({})",
        book.id,
        book.title,
        book.author,
        book.genre.as_deref().unwrap_or("-"),
        book.status,
    )
}

/// One line per book, or `empty` when there are none.
pub fn format_books(books: &[Book], empty: &str) -> String {
    if books.is_empty() {
        return empty.to_string();
    }
    let mut out = String::new();
    for (i, book) in books.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_book(book));
    }
    out
}

pub fn format_stats(count: i64) -> String {
    format!("Books read this month: {count}")
}

pub fn format_not_found(id: i64) -> String {
    format!("Book {id} not found.")
}

/// Split a reply into chunks Telegram will accept, breaking at line ends
/// where possible.
pub fn split_message(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > MAX_MESSAGE_CHARS && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > MAX_MESSAGE_CHARS {
            // A single line that cannot fit: hard-wrap by characters.
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(MAX_MESSAGE_CHARS) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
