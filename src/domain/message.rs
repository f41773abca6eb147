use time::OffsetDateTime;

/// A stored direct message. `id` and `sent_datetime` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub(crate) id: i64,
    pub(crate) sender: String,
    pub(crate) receiver: String,
    pub(crate) sent_datetime: Option<OffsetDateTime>,
    pub(crate) message_body: String,
}

/// A message that passed presence checks and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub(crate) sender: String,
    pub(crate) receiver: String,
    pub(crate) message_body: String,
}

impl NewMessage {
    /// Builds a message from optional parts. Absent and empty values are both treated as missing.
    ///
    /// # Errors
    /// Returns a description of the missing fields.
    pub fn try_new(
        sender: Option<String>,
        receiver: Option<String>,
        message_body: Option<String>,
    ) -> Result<Self, String> {
        match (present(sender), present(receiver), present(message_body)) {
            (Some(sender), Some(receiver), Some(message_body)) => Ok(Self { sender, receiver, message_body }),
            _ => Err("sender, receiver, and message_body are required".to_string()),
        }
    }
}

/// Which slice of the table a listing reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSelector {
    /// Both directions between two users, oldest first.
    Thread { sender: String, receiver: String },
    /// Everything a user sent or received, newest first.
    Inbox { user: String },
}

impl MessageSelector {
    /// Picks the listing mode. A full sender/receiver pair wins over `user`.
    #[must_use]
    pub fn resolve(sender: Option<String>, receiver: Option<String>, user: Option<String>) -> Option<Self> {
        match (present(sender), present(receiver), present(user)) {
            (Some(sender), Some(receiver), _) => Some(Self::Thread { sender, receiver }),
            (_, _, Some(user)) => Some(Self::Inbox { user }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Thread { .. } => "thread",
            Self::Inbox { .. } => "inbox",
        }
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
    offset: i64,
}

impl PageRequest {
    /// # Errors
    /// Returns a description of the problem if `page` or `page_size` is out of range.
    pub fn new(page: i64, page_size: i64) -> Result<Self, String> {
        if page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if page_size < 1 {
            return Err("page_size must be at least 1".to_string());
        }
        let offset = (page - 1).checked_mul(page_size).ok_or_else(|| "page is out of range".to_string())?;
        Ok(Self { page, page_size, offset })
    }

    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> i64 {
        self.page_size
    }

    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

/// One page of a listing together with the size of the full result.
#[derive(Debug, Clone)]
pub struct MessagePage {
    pub(crate) messages: Vec<Message>,
    pub(crate) request: PageRequest,
    pub(crate) total_count: i64,
}

impl MessagePage {
    #[must_use]
    pub const fn total_pages(&self) -> i64 {
        total_pages(self.total_count, self.request.page_size)
    }
}

/// `ceil(total_count / page_size)`; zero rows means zero pages.
#[must_use]
pub const fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 || page_size <= 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
