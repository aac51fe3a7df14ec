//! Chat listener: turns inbound messages into replies.
//!
//! Transport-agnostic. The caller delivers each message and sends whatever
//! reply comes back; `None` means stay quiet.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::engine::Resolver;
use crate::error::{Error, Result};
use crate::storage::EventStore;

/// One message as delivered by the transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Messages from bots (including this one) are ignored.
    pub author_is_bot: bool,
    pub content: String,
}

impl InboundMessage {
    pub fn from_user(content: impl Into<String>) -> Self {
        Self {
            author_is_bot: false,
            content: content.into(),
        }
    }
}

/// Answers messages from a fresh store snapshot each time.
#[derive(Clone)]
pub struct ChatListener {
    store: Arc<dyn EventStore>,
    resolver: Resolver,
}

impl ChatListener {
    pub fn new(store: Arc<dyn EventStore>, resolver: Resolver) -> Self {
        Self { store, resolver }
    }

    /// Resolve one message. Errors are returned, not swallowed.
    pub fn try_handle(&self, message: &InboundMessage) -> Result<Option<String>> {
        if message.author_is_bot {
            return Ok(None);
        }
        let events = self.store.load_events()?;
        let resolution = self.resolver.resolve(&message.content, &events)?;
        Ok(resolution.reply().map(str::to_owned))
    }

    /// Resolve one message, logging failures and replying with nothing.
    pub fn handle(&self, message: &InboundMessage) -> Option<String> {
        match self.try_handle(message) {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "failed to answer message");
                None
            }
        }
    }

    /// Line transport: each input line is a user message, each reply is
    /// written followed by a blank line. Runs until input ends.
    ///
    /// Messages are handled on the blocking pool since the store may read
    /// from disk.
    pub async fn run_lines<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let listener = self.clone();
            let reply =
                tokio::task::spawn_blocking(move || listener.handle(&InboundMessage::from_user(line)))
                    .await
                    .map_err(|e| Error::Other(format!("chat handler failed: {e}")))?;
            match reply {
                Some(reply) => {
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n\n").await?;
                    output.flush().await?;
                }
                None => debug!("no reply"),
            }
        }
        Ok(())
    }
}
