use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::domain::message::{Message, MessagePage, MessageSelector, NewMessage, PageRequest};
use crate::error::{AppError, Result};
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) created_total: Counter<u64>,
    pub(crate) deleted_total: Counter<u64>,
    pub(crate) page_size: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("messages-api");
        Self {
            created_total: meter
                .u64_counter("messages_created_total")
                .with_description("Total messages stored")
                .build(),
            deleted_total: meter
                .u64_counter("messages_deleted_total")
                .with_description("Total messages deleted")
                .build(),
            page_size: meter
                .u64_histogram("message_list_page_size")
                .with_description("Number of messages returned by a single listing")
                .build(),
        }
    }
}

/// Message operations. Every call checks out one pooled connection and returns it on drop,
/// so the connection goes back to the pool on both the success and error paths.
#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository) -> Self {
        Self { pool, repo, metrics: Metrics::new() }
    }

    /// Lists a thread or an inbox, one page at a time.
    ///
    /// # Errors
    /// Returns `AppError::Store` if either query fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, selector),
        fields(mode = selector.mode(), page = request.page(), page_size = request.page_size())
    )]
    pub async fn list_messages(&self, selector: MessageSelector, request: PageRequest) -> Result<MessagePage> {
        self.fetch_page(&selector, request).await.map_err(|e| e.during("Error retrieving messages"))
    }

    async fn fetch_page(&self, selector: &MessageSelector, request: PageRequest) -> Result<MessagePage> {
        let mut conn = self.pool.acquire().await?;

        let total_count = self.repo.count(&mut conn, selector).await?;
        let messages = if total_count > request.offset() {
            self.repo.fetch_page(&mut conn, selector, request.page_size(), request.offset()).await?
        } else {
            Vec::new()
        };

        self.metrics.page_size.record(messages.len() as u64, &[KeyValue::new("mode", selector.mode())]);

        Ok(MessagePage { messages, request, total_count })
    }

    /// Stores a new message.
    ///
    /// # Errors
    /// Returns `AppError::Store` if the insert fails.
    #[tracing::instrument(err(level = "warn"), skip(self, message))]
    pub async fn send_message(&self, message: NewMessage) -> Result<Message> {
        match self.insert(&message).await {
            Ok(stored) => {
                tracing::debug!(message_id = stored.id, "Message stored");
                self.metrics.created_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(stored)
            }
            Err(e) => {
                self.metrics.created_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e.during("Error sending message"))
            }
        }
    }

    async fn insert(&self, message: &NewMessage) -> Result<Message> {
        let mut conn = self.pool.acquire().await?;
        self.repo.create(&mut conn, message).await
    }

    /// Deletes a message after confirming it exists.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no message has this id.
    /// Returns `AppError::Store` if a query fails.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn delete_message(&self, message_id: i64) -> Result<()> {
        self.delete_existing(message_id).await.map_err(|e| e.during("Error deleting message"))
    }

    async fn delete_existing(&self, message_id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        if !self.repo.exists(&mut conn, message_id).await? {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        let deleted = self.repo.delete(&mut conn, message_id).await?;
        self.metrics.deleted_total.add(deleted, &[]);
        tracing::debug!(message_id, "Message deleted");

        Ok(())
    }
}
