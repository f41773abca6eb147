use crate::domain::message::Message;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct MessageRecord {
    pub(crate) id: i64,
    pub(crate) sender: String,
    pub(crate) receiver: String,
    pub(crate) sent_datetime: Option<OffsetDateTime>,
    pub(crate) message_body: String,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            sender: record.sender,
            receiver: record.receiver,
            sent_datetime: record.sent_datetime,
            message_body: record.message_body,
        }
    }
}
