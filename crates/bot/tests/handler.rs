//! Integration tests for chat command handling.
//!
//! Messages go through `handle_message` against a real database, the same
//! path the polling loop uses.

use shelf_bot::command::{USAGE_ADD, USAGE_DELETE, USAGE_EDIT, USAGE_SEARCH};
use shelf_bot::handler::handle_message;
use shelf_bot::reply;
use shelf_core::status::ReadingStatus;
use shelf_db::repositories::BookRepo;
use sqlx::PgPool;

const OWNER: i64 = 1001;
const OTHER: i64 = 2002;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn send(pool: &PgPool, owner: i64, text: &str) -> String {
    handle_message(pool, owner, text)
        .await
        .unwrap_or_else(|| panic!("expected a reply to {text:?}"))
}

/// Id of the owner's most recently added book.
async fn last_id(pool: &PgPool, owner: i64) -> i64 {
    let mut page = 1;
    let mut last = None;
    loop {
        let books = BookRepo::list_page(pool, owner, page).await.unwrap();
        if books.is_empty() {
            break;
        }
        last = books.last().map(|b| b.id);
        page += 1;
    }
    last.expect("owner has no books")
}

// ---------------------------------------------------------------------------
// Plain text and help
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn plain_text_gets_no_reply(pool: PgPool) {
    assert!(handle_message(&pool, OWNER, "hello there").await.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn start_and_help(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/start").await, reply::START_TEXT);
    assert_eq!(send(&pool, OWNER, "/help").await, reply::HELP_TEXT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_command_is_reported(pool: PgPool) {
    let answer = send(&pool, OWNER, "/frobnicate").await;
    assert!(answer.contains("/frobnicate"));
    assert!(answer.contains("/help"));
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn add_stores_book_for_sender(pool: PgPool) {
    let answer = send(&pool, OWNER, "/add Dune, Frank Herbert, sci-fi, planned").await;
    assert_eq!(answer, reply::BOOK_ADDED);

    let books = BookRepo::list_page(&pool, OWNER, 1).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].author, "Frank Herbert");
    assert_eq!(books[0].genre.as_deref(), Some("sci-fi"));
    assert_eq!(books[0].status, ReadingStatus::Planned);

    assert!(BookRepo::list_page(&pool, OTHER, 1).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_accepts_russian_status_label(pool: PgPool) {
    send(&pool, OWNER, "/add Мастер и Маргарита, Булгаков, роман, прочитано").await;

    let books = BookRepo::list_page(&pool, OWNER, 1).await.unwrap();
    assert_eq!(books[0].status, ReadingStatus::Read);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_with_wrong_arity_shows_usage(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/add Dune, Herbert").await, USAGE_ADD);
    assert!(BookRepo::list_page(&pool, OWNER, 1).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_with_bad_status_explains(pool: PgPool) {
    let answer = send(&pool, OWNER, "/add Dune, Herbert, sci-fi, finished").await;
    assert!(answer.contains("Unknown status 'finished'"));
    assert!(answer.ends_with(USAGE_ADD));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_with_blank_title_explains(pool: PgPool) {
    let answer = send(&pool, OWNER, "/add  , Herbert, sci-fi, read").await;
    assert!(answer.starts_with("Title must not be empty"));
}

// ---------------------------------------------------------------------------
// List and search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_pages_by_ten(pool: PgPool) {
    for i in 0..12 {
        send(&pool, OWNER, &format!("/add Book {i}, Author, , planned")).await;
    }

    let first = send(&pool, OWNER, "/list").await;
    assert_eq!(first.lines().count(), 10);
    assert!(first.lines().all(|l| l.contains("[-] (planned)")));

    let second = send(&pool, OWNER, "/list 2").await;
    assert_eq!(second.lines().count(), 2);

    assert_eq!(send(&pool, OWNER, "/list 3").await, reply::EMPTY_PAGE);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_scoped_to_sender(pool: PgPool) {
    send(&pool, OTHER, "/add Dune, Herbert, sci-fi, read").await;
    assert_eq!(send(&pool, OWNER, "/list").await, reply::EMPTY_PAGE);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_title_or_author(pool: PgPool) {
    send(&pool, OWNER, "/add Dune, Frank Herbert, sci-fi, read").await;
    send(&pool, OWNER, "/add Emma, Jane Austen, classic, reading").await;

    let by_author = send(&pool, OWNER, "/search herbert").await;
    assert_eq!(by_author.lines().count(), 1);
    assert!(by_author.contains("Dune - Frank Herbert"));

    let by_title = send(&pool, OWNER, "/search EMM").await;
    assert!(by_title.contains("Emma"));

    assert_eq!(send(&pool, OWNER, "/search tolkien").await, reply::NOTHING_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_search_shows_usage(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/search").await, USAGE_SEARCH);
}

// ---------------------------------------------------------------------------
// Edit and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_updates_named_fields(pool: PgPool) {
    send(&pool, OWNER, "/add Dune, Herbert, sci-fi, planned").await;
    let id = last_id(&pool, OWNER).await;

    let answer = send(&pool, OWNER, &format!("/edit {id}, status=reading, genre=classic")).await;
    assert_eq!(answer, reply::BOOK_UPDATED);

    let book = BookRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(book.status, ReadingStatus::Reading);
    assert_eq!(book.genre.as_deref(), Some("classic"));
    assert_eq!(book.title, "Dune");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_missing_book_reports_not_found(pool: PgPool) {
    let answer = send(&pool, OWNER, "/edit 999999, title=Ghost").await;
    assert_eq!(answer, reply::format_not_found(999_999));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_without_fields_shows_usage(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/edit 5").await, USAGE_EDIT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_unknown_field_explains(pool: PgPool) {
    let answer = send(&pool, OWNER, "/edit 5, rating=5").await;
    assert!(answer.ends_with(USAGE_EDIT));
    assert!(answer.lines().count() >= 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_book(pool: PgPool) {
    send(&pool, OWNER, "/add Dune, Herbert, sci-fi, planned").await;
    let id = last_id(&pool, OWNER).await;

    assert_eq!(send(&pool, OWNER, &format!("/delete {id}")).await, reply::BOOK_DELETED);
    assert!(BookRepo::find_by_id(&pool, id).await.unwrap().is_none());

    assert_eq!(
        send(&pool, OWNER, &format!("/delete {id}")).await,
        reply::format_not_found(id)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_requires_numeric_id(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/delete dune").await, USAGE_DELETE);
    assert_eq!(send(&pool, OWNER, "/delete").await, USAGE_DELETE);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn stats_counts_books_read_this_month(pool: PgPool) {
    assert_eq!(send(&pool, OWNER, "/stats").await, reply::format_stats(0));

    send(&pool, OWNER, "/add Dune, Herbert, sci-fi, read").await;
    send(&pool, OWNER, "/add Emma, Austen, classic, reading").await;
    send(&pool, OTHER, "/add Ulysses, Joyce, modernism, read").await;

    assert_eq!(send(&pool, OWNER, "/stats").await, reply::format_stats(1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn storage_failure_gets_generic_reply(pool: PgPool) {
    pool.close().await;

    assert_eq!(send(&pool, OWNER, "/stats").await, reply::STORAGE_FAILURE);
    assert_eq!(
        send(&pool, OWNER, "/add Dune, Herbert, sci-fi, read").await,
        reply::STORAGE_FAILURE
    );
    // Parsing does not touch storage.
    assert_eq!(send(&pool, OWNER, "/search").await, USAGE_SEARCH);
}

// ---------------------------------------------------------------------------
// Full scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dune_lifecycle(pool: PgPool) {
    send(&pool, OWNER, "/add Dune, Frank Herbert, sci-fi, planned").await;
    let id = last_id(&pool, OWNER).await;

    let listed = send(&pool, OWNER, "/list").await;
    assert_eq!(listed, format!("{id}. Dune - Frank Herbert [sci-fi] (planned)"));

    send(&pool, OWNER, &format!("/edit {id}, status=read")).await;
    assert_eq!(send(&pool, OWNER, "/stats").await, reply::format_stats(1));

    send(&pool, OWNER, &format!("/delete {id}")).await;
    assert_eq!(send(&pool, OWNER, "/list").await, reply::EMPTY_PAGE);
    assert_eq!(send(&pool, OWNER, "/stats").await, reply::format_stats(0));
}
