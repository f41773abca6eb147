use crate::config::PaginationConfig;
use crate::domain::message::{Message, MessagePage, MessageSelector, NewMessage, PageRequest};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Raw listing query. Paging values stay as strings so a non-numeric value falls back to the default.
#[derive(Debug, Default)]
pub struct ListMessagesParams {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub user: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListMessagesParams {
    /// Collects the listing keys from raw query pairs. When a key repeats, its first value wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sender" => &mut params.sender,
                "receiver" => &mut params.receiver,
                "user" => &mut params.user,
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Splits the query into a selector and a page request.
    ///
    /// # Errors
    /// Returns an error if no selector is given or the paging values are out of range.
    pub fn into_parts(self, config: &PaginationConfig) -> Result<(MessageSelector, PageRequest), String> {
        let request = PageRequest::new(
            parse_or(self.page.as_deref(), 1),
            parse_or(self.page_size.as_deref(), config.default_page_size),
        );
        let selector = MessageSelector::resolve(self.sender, self.receiver, self.user)
            .ok_or_else(|| "Provide either sender and receiver, or user".to_string())?;
        let request = request?;
        Ok((selector, request))
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub message_body: Option<String>,
}

impl CreateMessageRequest {
    /// # Errors
    /// Returns an error naming the required fields if any is missing or empty.
    pub fn validate(self) -> Result<NewMessage, String> {
        NewMessage::try_new(self.sender, self.receiver, self.message_body)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender: String,
    pub receiver: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub sent_datetime: Option<OffsetDateTime>,
    pub message_body: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            receiver: message.receiver,
            sent_datetime: message.sent_datetime,
            message_body: message.message_body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationResponse {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct MessagePageResponse {
    pub messages: Vec<MessageResponse>,
    pub pagination: PaginationResponse,
}

impl From<MessagePage> for MessagePageResponse {
    fn from(page: MessagePage) -> Self {
        let pagination = PaginationResponse {
            page: page.request.page(),
            page_size: page.request.page_size(),
            total_count: page.total_count,
            total_pages: page.total_pages(),
        };
        Self { messages: page.messages.into_iter().map(Into::into).collect(), pagination }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageResponse {
    pub message: String,
}

impl DeleteMessageResponse {
    #[must_use]
    pub fn for_id(message_id: i64) -> Self {
        Self { message: format!("Message {message_id} deleted") }
    }
}
