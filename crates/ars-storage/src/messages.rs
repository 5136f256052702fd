use tokio::sync::RwLock;

use ars_core::models::message::DialogMessage;

use crate::error::StorageError;
use crate::BoxFuture;

/// Append-only log of dialog traffic.
pub trait MessageLog: Send + Sync {
    fn append(&self, message: DialogMessage) -> BoxFuture<'_, Result<(), StorageError>>;

    /// Messages for one E.164 phone, newest first.
    fn by_phone<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, Result<Vec<DialogMessage>, StorageError>>;
}

#[derive(Debug, Default)]
pub struct MemoryMessageLog {
    messages: RwLock<Vec<DialogMessage>>,
}

impl MemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageLog for MemoryMessageLog {
    fn append(&self, message: DialogMessage) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            self.messages.write().await.push(message);
            Ok(())
        })
    }

    fn by_phone<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, Result<Vec<DialogMessage>, StorageError>> {
        Box::pin(async move {
            Ok(self
                .messages
                .read()
                .await
                .iter()
                .rev()
                .filter(|m| m.phone == phone)
                .cloned()
                .collect())
        })
    }
}
