use crate::adapters::database::records::MessageRecord;
use crate::domain::message::{Message, MessageSelector, NewMessage};
use crate::error::Result;
use sqlx::PgConnection;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a message and returns it with the store-assigned id and timestamp.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, message))]
    pub(crate) async fn create(&self, conn: &mut PgConnection, message: &NewMessage) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (sender, receiver, message_body)
            VALUES ($1, $2, $3)
            RETURNING id, sender, receiver, sent_datetime, message_body
            "#,
        )
        .bind(&message.sender)
        .bind(&message.receiver)
        .bind(&message.message_body)
        .fetch_one(conn)
        .await?;

        Ok(record.into())
    }

    /// Counts every message matched by the selector, ignoring pagination.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn, selector), fields(mode = selector.mode()))]
    pub(crate) async fn count(&self, conn: &mut PgConnection, selector: &MessageSelector) -> Result<i64> {
        let count = match selector {
            MessageSelector::Thread { sender, receiver } => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*) FROM messages
                    WHERE (sender = $1 AND receiver = $2) OR (sender = $2 AND receiver = $1)
                    "#,
                )
                .bind(sender)
                .bind(receiver)
                .fetch_one(conn)
                .await?
            }
            MessageSelector::Inbox { user } => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE sender = $1 OR receiver = $1")
                    .bind(user)
                    .fetch_one(conn)
                    .await?
            }
        };

        Ok(count)
    }

    /// Fetches one page of the selected messages. Threads read oldest first, inboxes newest first.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn, selector), fields(mode = selector.mode()))]
    pub(crate) async fn fetch_page(
        &self,
        conn: &mut PgConnection,
        selector: &MessageSelector,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>> {
        let records = match selector {
            MessageSelector::Thread { sender, receiver } => {
                sqlx::query_as::<_, MessageRecord>(
                    r#"
                    SELECT id, sender, receiver, sent_datetime, message_body
                    FROM messages
                    WHERE (sender = $1 AND receiver = $2) OR (sender = $2 AND receiver = $1)
                    ORDER BY sent_datetime ASC, id ASC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(sender)
                .bind(receiver)
                .bind(limit)
                .bind(offset)
                .fetch_all(conn)
                .await?
            }
            MessageSelector::Inbox { user } => {
                sqlx::query_as::<_, MessageRecord>(
                    r#"
                    SELECT id, sender, receiver, sent_datetime, message_body
                    FROM messages
                    WHERE sender = $1 OR receiver = $1
                    ORDER BY sent_datetime DESC, id DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(user)
                .bind(limit)
                .bind(offset)
                .fetch_all(conn)
                .await?
            }
        };

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn exists(&self, conn: &mut PgConnection, message_id: i64) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i32>("SELECT 1 FROM messages WHERE id = $1")
            .bind(message_id)
            .fetch_optional(conn)
            .await?;
        Ok(found.is_some())
    }

    /// Hard-deletes a single message.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the deletion fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn delete(&self, conn: &mut PgConnection, message_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1").bind(message_id).execute(conn).await?;
        Ok(result.rows_affected())
    }
}
