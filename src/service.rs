//! The long-running `serve` mode: admin surface and chat line transport
//! side by side until shutdown.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::info;

use crate::admin::{self, AdminState};
use crate::chat::ChatListener;
use crate::error::{Error, Result};

/// Bind the admin surface on `addr` (host, port) and run both surfaces
/// until `shutdown` resolves or one of them fails.
///
/// End of chat input is not a failure: the admin surface keeps serving.
/// A bind or I/O error from the admin server, or an I/O error from the
/// chat transport, stops everything and is returned.
pub async fn run<R, W, S>(
    addr: (String, u16),
    state: AdminState,
    chat: ChatListener,
    input: R,
    output: W,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
    S: Future<Output = ()> + Send,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let mut admin = tokio::spawn(admin::serve(addr, state, async move {
        let _ = stop_rx.wait_for(|stop| *stop).await;
    }));
    let mut chat_task = tokio::spawn(async move { chat.run_lines(input, output).await });
    tokio::pin!(shutdown);

    let mut admin_result = None;
    let mut chat_open = true;
    let outcome = loop {
        tokio::select! {
            joined = &mut admin => {
                admin_result = Some(flatten("admin", joined));
                break Ok(());
            }
            joined = &mut chat_task, if chat_open => {
                chat_open = false;
                match flatten("chat", joined) {
                    Ok(()) => info!("chat input closed, admin surface still serving"),
                    Err(e) => break Err(e),
                }
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break Ok(());
            }
        }
    };

    let _ = stop_tx.send(true);
    chat_task.abort();
    let admin_result = match admin_result {
        Some(result) => result,
        None => flatten("admin", admin.await),
    };
    outcome.and(admin_result)
}

fn flatten(task: &str, joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    joined.map_err(|e| Error::Other(format!("{task} task failed: {e}")))?
}
