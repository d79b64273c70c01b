pub mod channel;
pub mod frame;

use crate::router::{Arguments, Router};
use anyhow::Result;
use channel::MethodChannel;
use serde_json::Value;
use tokio::io::BufReader;

/// Serve method calls over stdin/stdout until stdin is closed.
pub async fn serve(router: Router) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    MethodChannel::new(router, reader, tokio::io::stdout())
        .run()
        .await
}

/// Run a single call and return the encoded response frame.
pub async fn call(router: &Router, method: &str, args: &Arguments) -> Value {
    let outcome = router.handle(method, args).await;
    frame::encode(None, &outcome)
}
