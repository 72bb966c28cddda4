//! Long-polling loop connecting Telegram updates to the command handler.

use std::time::Duration;

use shelf_db::DbPool;

use crate::handler;
use crate::reply;
use crate::telegram::{TelegramClient, Update};

/// Delay before polling again after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll for updates forever, answering each command message in turn.
///
/// Every update is acknowledged (via the next `offset`) once handled, even
/// if the reply could not be delivered.
pub async fn run(client: &TelegramClient, pool: &DbPool, poll_timeout_secs: u64) {
    let mut offset: Option<i64> = None;

    loop {
        match client.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    process_update(client, pool, update).await;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, retry_secs = RETRY_DELAY.as_secs(), "getUpdates failed");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

async fn process_update(client: &TelegramClient, pool: &DbPool, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let (Some(text), Some(from)) = (message.text.as_deref(), message.from.as_ref()) else {
        return;
    };

    let Some(answer) = handler::handle_message(pool, from.id, text).await else {
        return;
    };
    tracing::debug!(
        update_id = update.update_id,
        chat_id = message.chat.id,
        user_id = from.id,
        "Handled command"
    );

    for chunk in reply::split_message(&answer) {
        if let Err(err) = client.send_message(message.chat.id, &chunk).await {
            tracing::warn!(chat_id = message.chat.id, error = %err, "Failed to send reply");
            break;
        }
    }
}
