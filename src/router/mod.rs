use crate::launch::LaunchResolver;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const OPEN_VIDEO: &str = "openVideo";
pub const IS_APP_INSTALLED: &str = "isAppInstalled";

pub const INVALID_URL: &str = "INVALID_URL";
pub const INVALID_PACKAGE: &str = "INVALID_PACKAGE";

/// Argument bag supplied with each call.
pub type Arguments = Map<String, Value>;

/// Result of one routed call, in the bridge's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
    NotImplemented,
}

impl Outcome {
    fn error(code: &str, message: &str) -> Self {
        Outcome::Error {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }
}

pub struct Router {
    resolver: LaunchResolver,
}

impl Router {
    pub fn new(resolver: LaunchResolver) -> Self {
        Self { resolver }
    }

    pub async fn handle(&self, method: &str, args: &Arguments) -> Outcome {
        debug!("Handling method call: {}", method);

        match method {
            OPEN_VIDEO => match string_argument(args, "url") {
                Some(url) => Outcome::Success(Value::Bool(self.resolver.launch(url).await)),
                None => {
                    warn!("{} called without a url", method);
                    Outcome::error(INVALID_URL, "URL is null")
                }
            },
            IS_APP_INSTALLED => match string_argument(args, "packageName") {
                Some(package) => {
                    Outcome::Success(Value::Bool(self.resolver.is_installed(package).await))
                }
                None => {
                    warn!("{} called without a packageName", method);
                    Outcome::error(INVALID_PACKAGE, "Package name is null")
                }
            },
            _ => {
                debug!("Unknown method: {}", method);
                Outcome::NotImplemented
            }
        }
    }
}

fn string_argument<'a>(args: &'a Arguments, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}
