//! HTML rendering for the server-side pages.
//!
//! Pages are small enough to build with `format!`. Every piece of
//! user-supplied text goes through [`escape`] before it is embedded.

use std::fmt::Write;

use shelf_core::book::{MAX_AUTHOR_LENGTH, MAX_GENRE_LENGTH, MAX_TITLE_LENGTH};
use shelf_core::status::ReadingStatus;
use shelf_db::models::book::Book;

use crate::handlers::pages::BookForm;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Human-readable status label.
pub fn status_label(status: ReadingStatus) -> &'static str {
    match status {
        ReadingStatus::Read => "Read",
        ReadingStatus::Reading => "Reading",
        ReadingStatus::Planned => "Planned",
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Books</a> | <a href=\"/add\">Add a book</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// The index page: a table of recent books, or a placeholder when empty.
pub fn render_index(books: &[Book]) -> String {
    let mut body = String::from("<h1>Recent books</h1>\n");

    if books.is_empty() {
        body.push_str("<p>No books yet.</p>");
        return layout("Reading diary", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>#</th><th>Title</th><th>Author</th><th>Genre</th>\
         <th>Status</th><th>Owner</th><th>Added</th></tr></thead>\n<tbody>\n",
    );
    for book in books {
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{title}</td><td>{author}</td><td>{genre}</td>\
             <td>{status}</td><td>{owner}</td><td>{added}</td></tr>",
            id = book.id,
            title = escape(&book.title),
            author = escape(&book.author),
            genre = book.genre.as_deref().map(escape).unwrap_or_default(),
            status = status_label(book.status),
            owner = book.user_id,
            added = book.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    body.push_str("</tbody>\n</table>");

    layout("Reading diary", &body)
}

/// The add-book form, optionally pre-filled and showing an error.
pub fn render_add_form(error: Option<&str>, form: Option<&BookForm>) -> String {
    let mut body = String::from("<h1>Add a book</h1>\n");

    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(error));
    }

    let user_id = form.map(|f| f.user_id.to_string()).unwrap_or_default();
    let title = form.map(|f| escape(&f.title)).unwrap_or_default();
    let author = form.map(|f| escape(&f.author)).unwrap_or_default();
    let genre = form
        .and_then(|f| f.genre.as_deref())
        .map(escape)
        .unwrap_or_default();
    let selected = form.map(|f| f.status);

    let mut options = String::new();
    for status in ReadingStatus::ALL {
        let _ = write!(
            options,
            "<option value=\"{value}\"{sel}>{label}</option>",
            value = status.as_str(),
            sel = if selected == Some(status) { " selected" } else { "" },
            label = status_label(status),
        );
    }

    let _ = write!(
        body,
        "<form method=\"post\" action=\"/add\">\n\
         <label>User id <input type=\"number\" name=\"user_id\" min=\"1\" required value=\"{user_id}\"></label>\n\
         <label>Title <input name=\"title\" maxlength=\"{MAX_TITLE_LENGTH}\" required value=\"{title}\"></label>\n\
         <label>Author <input name=\"author\" maxlength=\"{MAX_AUTHOR_LENGTH}\" required value=\"{author}\"></label>\n\
         <label>Genre <input name=\"genre\" maxlength=\"{MAX_GENRE_LENGTH}\" value=\"{genre}\"></label>\n\
         <label>Status <select name=\"status\">{options}</select></label>\n\
         <button type=\"submit\">Add</button>\n\
         </form>"
    );

    layout("Add a book", &body)
}
