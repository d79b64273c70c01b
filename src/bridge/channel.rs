use super::frame::{self, MethodCall};
use crate::router::Router;
use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

/// Line-delimited JSON method channel. Each call runs to completion before
/// the next line is read.
pub struct MethodChannel<R, W> {
    router: Router,
    reader: R,
    writer: W,
}

impl<R, W> MethodChannel<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(router: Router, reader: R, writer: W) -> Self {
        Self {
            router,
            reader,
            writer,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Method channel listening...");

        let mut lines = (&mut self.reader).lines();
        let mut handled = 0usize;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("Method channel closed after {} calls", handled);
                    return Ok(());
                }
                Err(e) => {
                    error!("Error reading from method channel: {}", e);
                    return Err(e).context("Failed to read method call");
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match frame::decode(line) {
                Ok(call) => Self::dispatch(&self.router, &call).await,
                Err((id, message)) => {
                    warn!("Dropping malformed frame: {}", message);
                    frame::bad_frame(id.as_ref(), &message)
                }
            };

            let mut encoded =
                serde_json::to_string(&response).context("Failed to encode response")?;
            encoded.push('\n');
            self.writer
                .write_all(encoded.as_bytes())
                .await
                .context("Failed to write response")?;
            self.writer.flush().await.context("Failed to flush response")?;

            handled += 1;
        }
    }

    async fn dispatch(router: &Router, call: &MethodCall) -> Value {
        let outcome = router.handle(&call.method, &call.arguments()).await;
        frame::encode(call.id.as_ref(), &outcome)
    }
}
