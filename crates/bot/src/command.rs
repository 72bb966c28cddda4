//! Chat command parsing.
//!
//! Supported commands:
//!
//! ```text
//! /start
//! /help
//! /add <title>, <author>, <genre>, <status>
//! /list [page]
//! /search <text>
//! /edit <id>, field=value, ...
//! /delete <id>
//! /stats
//! ```
//!
//! Parsing is pure: a failed parse produces a [`CommandError`] whose text is
//! sent back to the user, and the store is never called.

use shelf_core::book::{normalize_author, normalize_genre, normalize_title, BookField, BookPatch};
use shelf_core::error::CoreError;
use shelf_core::status::ReadingStatus;
use shelf_core::types::DbId;

// ---------------------------------------------------------------------------
// Usage strings
// ---------------------------------------------------------------------------

pub const USAGE_ADD: &str = "Usage: /add Title, Author, Genre, Status";
pub const USAGE_LIST: &str = "Usage: /list [page]";
pub const USAGE_SEARCH: &str = "Usage: /search <title or author>";
pub const USAGE_EDIT: &str = "Usage: /edit id, field=value, ...";
pub const USAGE_DELETE: &str = "Usage: /delete id";

// ---------------------------------------------------------------------------
// Status labels
// ---------------------------------------------------------------------------

/// Status spellings accepted in chat, including the Russian labels used by
/// the first version of the bot.
const STATUS_ALIASES: &[(&str, ReadingStatus)] = &[
    ("read", ReadingStatus::Read),
    ("прочитано", ReadingStatus::Read),
    ("reading", ReadingStatus::Reading),
    ("читаю", ReadingStatus::Reading),
    ("planned", ReadingStatus::Planned),
    ("в планах", ReadingStatus::Planned),
];

/// Translate a chat status label into the canonical status.
///
/// Matching ignores case and collapses inner whitespace.
pub fn parse_status_label(label: &str) -> Result<ReadingStatus, CoreError> {
    let normalized = label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    STATUS_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, status)| *status)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown status '{}'. Use: read, reading or planned",
                label.trim()
            ))
        })
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Add {
        title: String,
        author: String,
        genre: Option<String>,
        status: ReadingStatus,
    },
    List {
        page: i64,
    },
    Search {
        query: String,
    },
    Edit {
        id: DbId,
        patch: BookPatch,
    },
    Delete {
        id: DbId,
    },
    Stats,
}

/// Why a message could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The message is plain text, not a command. It gets no reply.
    #[error("not a command")]
    NotACommand,

    #[error("Unknown command /{0}. Send /help for the list of commands.")]
    Unknown(String),

    /// Wrong shape: argument count, missing id, and so on.
    #[error("{0}")]
    Usage(&'static str),

    /// Right shape, bad value (empty title, unknown field or status).
    #[error("{message}\n{usage}")]
    Invalid {
        message: String,
        usage: &'static str,
    },
}

impl CommandError {
    fn invalid(err: CoreError, usage: &'static str) -> Self {
        let message = match err {
            CoreError::Validation(msg) => msg,
            other => other.to_string(),
        };
        Self::Invalid { message, usage }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Command {
    /// Parse a chat message.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();
        let Some(body) = text.strip_prefix('/') else {
            return Err(CommandError::NotACommand);
        };

        let (head, args) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], body[idx..].trim()),
            None => (body, ""),
        };
        // `/list@shelf_bot` is how Telegram addresses a bot in group chats.
        let name = head.split('@').next().unwrap_or_default().to_lowercase();

        match name.as_str() {
            "start" => Ok(Self::Start),
            "help" => Ok(Self::Help),
            "add" => parse_add(args),
            "list" => parse_list(args),
            "search" => parse_search(args),
            "edit" => parse_edit(args),
            "delete" => parse_delete(args),
            "stats" => Ok(Self::Stats),
            "" => Err(CommandError::NotACommand),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_add(args: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let [title, author, genre, status] = parts.as_slice() else {
        return Err(CommandError::Usage(USAGE_ADD));
    };

    let invalid = |err| CommandError::invalid(err, USAGE_ADD);
    Ok(Command::Add {
        title: normalize_title(title).map_err(invalid)?,
        author: normalize_author(author).map_err(invalid)?,
        genre: normalize_genre(Some(*genre)).map_err(invalid)?,
        status: parse_status_label(status).map_err(invalid)?,
    })
}

fn parse_list(args: &str) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Ok(Command::List { page: 1 });
    }
    match args.parse::<i64>() {
        Ok(page) if page >= 1 => Ok(Command::List { page }),
        _ => Err(CommandError::Usage(USAGE_LIST)),
    }
}

fn parse_search(args: &str) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage(USAGE_SEARCH));
    }
    Ok(Command::Search {
        query: args.to_string(),
    })
}

fn parse_id(raw: &str, usage: &'static str) -> Result<DbId, CommandError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(CommandError::Usage(usage))
}

fn parse_edit(args: &str) -> Result<Command, CommandError> {
    let mut parts = args.split(',');
    let id = parse_id(parts.next().unwrap_or_default(), USAGE_EDIT)?;

    let invalid = |err| CommandError::invalid(err, USAGE_EDIT);
    let mut patch = BookPatch::new();
    for pair in parts {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(CommandError::Usage(USAGE_EDIT));
        };
        let field = BookField::from_name(name).map_err(invalid)?;
        match field {
            BookField::Status => patch.status = Some(parse_status_label(value).map_err(invalid)?),
            other => patch.set(other, value).map_err(invalid)?,
        }
    }

    if patch.is_empty() {
        return Err(CommandError::Usage(USAGE_EDIT));
    }
    Ok(Command::Edit { id, patch })
}

fn parse_delete(args: &str) -> Result<Command, CommandError> {
    Ok(Command::Delete {
        id: parse_id(args, USAGE_DELETE)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- dispatch ------------------------------------------------------------

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello there"), Err(CommandError::NotACommand));
        assert_eq!(Command::parse("/"), Err(CommandError::NotACommand));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(Command::parse("/start"), Ok(Command::Start));
        assert_eq!(Command::parse("/help"), Ok(Command::Help));
        assert_eq!(Command::parse("  /stats  "), Ok(Command::Stats));
    }

    #[test]
    fn bot_mention_suffix_is_ignored() {
        assert_eq!(Command::parse("/list@shelf_bot 2"), Ok(Command::List { page: 2 }));
        assert_eq!(Command::parse("/STATS@shelf_bot"), Ok(Command::Stats));
    }

    #[test]
    fn unknown_command_points_to_help() {
        let err = Command::parse("/borrow 3").unwrap_err();
        assert_eq!(err, CommandError::Unknown("borrow".to_string()));
        assert!(err.to_string().contains("/help"));
    }

    // -- /add ----------------------------------------------------------------

    #[test]
    fn add_parses_four_fields() {
        assert_eq!(
            Command::parse("/add Dune, Frank Herbert, sci-fi, planned"),
            Ok(Command::Add {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                genre: Some("sci-fi".to_string()),
                status: ReadingStatus::Planned,
            })
        );
    }

    #[test]
    fn add_accepts_russian_status_and_empty_genre() {
        assert_matches!(
            Command::parse("/add Мастер и Маргарита, Булгаков, , В планах"),
            Ok(Command::Add { genre: None, status: ReadingStatus::Planned, .. })
        );
    }

    #[test]
    fn add_with_wrong_argument_count_shows_usage() {
        assert_eq!(Command::parse("/add Dune, Herbert"), Err(CommandError::Usage(USAGE_ADD)));
        assert_eq!(
            Command::parse("/add a, b, c, read, extra"),
            Err(CommandError::Usage(USAGE_ADD))
        );
        assert_eq!(Command::parse("/add"), Err(CommandError::Usage(USAGE_ADD)));
    }

    #[test]
    fn add_with_unknown_status_is_invalid() {
        assert_matches!(
            Command::parse("/add Dune, Herbert, sci-fi, finished"),
            Err(CommandError::Invalid { message, usage: USAGE_ADD }) if message.contains("finished")
        );
    }

    #[test]
    fn add_with_blank_author_is_invalid() {
        assert_matches!(
            Command::parse("/add Dune, , sci-fi, read"),
            Err(CommandError::Invalid { .. })
        );
    }

    // -- /list ---------------------------------------------------------------

    #[test]
    fn list_defaults_to_first_page() {
        assert_eq!(Command::parse("/list"), Ok(Command::List { page: 1 }));
        assert_eq!(Command::parse("/list 3"), Ok(Command::List { page: 3 }));
    }

    #[test]
    fn list_rejects_bad_pages() {
        for text in ["/list 0", "/list -1", "/list two", "/list 1 2"] {
            assert_eq!(Command::parse(text), Err(CommandError::Usage(USAGE_LIST)), "{text}");
        }
    }

    // -- /search -------------------------------------------------------------

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("/search  frank herbert "),
            Ok(Command::Search {
                query: "frank herbert".to_string()
            })
        );
    }

    #[test]
    fn empty_search_shows_usage() {
        assert_eq!(Command::parse("/search   "), Err(CommandError::Usage(USAGE_SEARCH)));
    }

    // -- /edit ---------------------------------------------------------------

    #[test]
    fn edit_builds_patch_from_allowed_fields() {
        let expected = BookPatch {
            title: Some("Dune Messiah".to_string()),
            author: None,
            genre: None,
            status: Some(ReadingStatus::Read),
        };
        assert_eq!(
            Command::parse("/edit 12, title=Dune Messiah, status=прочитано"),
            Ok(Command::Edit {
                id: 12,
                patch: expected
            })
        );
    }

    #[test]
    fn edit_value_may_contain_equals_sign() {
        assert_matches!(
            Command::parse("/edit 1, title=E=mc2"),
            Ok(Command::Edit { patch, .. }) if patch.title.as_deref() == Some("E=mc2")
        );
    }

    #[test]
    fn edit_rejects_fields_outside_allow_list() {
        assert_matches!(
            Command::parse("/edit 1, user_id=2"),
            Err(CommandError::Invalid { usage: USAGE_EDIT, .. })
        );
        assert_matches!(
            Command::parse("/edit 1, title=x, id=5"),
            Err(CommandError::Invalid { .. })
        );
    }

    #[test]
    fn edit_without_pairs_shows_usage() {
        assert_eq!(Command::parse("/edit 1"), Err(CommandError::Usage(USAGE_EDIT)));
        assert_eq!(Command::parse("/edit 1, title"), Err(CommandError::Usage(USAGE_EDIT)));
        assert_eq!(Command::parse("/edit abc, title=x"), Err(CommandError::Usage(USAGE_EDIT)));
    }

    #[test]
    fn edit_rejects_invalid_status() {
        assert_matches!(
            Command::parse("/edit 1, status=done"),
            Err(CommandError::Invalid { .. })
        );
    }

    // -- /delete -------------------------------------------------------------

    #[test]
    fn delete_requires_numeric_id() {
        assert_eq!(Command::parse("/delete 7"), Ok(Command::Delete { id: 7 }));
        assert_eq!(Command::parse("/delete"), Err(CommandError::Usage(USAGE_DELETE)));
        assert_eq!(Command::parse("/delete seven"), Err(CommandError::Usage(USAGE_DELETE)));
    }

    // -- status labels -------------------------------------------------------

    #[test]
    fn status_labels_ignore_case_and_spacing() {
        assert_eq!(parse_status_label(" READ ").unwrap(), ReadingStatus::Read);
        assert_eq!(parse_status_label("Читаю").unwrap(), ReadingStatus::Reading);
        assert_eq!(parse_status_label("в   планах").unwrap(), ReadingStatus::Planned);
        assert!(parse_status_label("done").is_err());
    }
}
