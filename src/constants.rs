// Messages
pub const MESSAGE_VALIDATION_FAILED: &str = "there were failure(s) on validation process";
pub const MESSAGE_INVALID_BILLING_ID: &str = "invalid billing id";
pub const MESSAGE_INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Misc
pub const EMPTY: &str = "";

// Environment
pub const ENV_APP_HOST: &str = "APP_HOST";
pub const ENV_APP_PORT: &str = "APP_PORT";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const DEFAULT_APP_HOST: &str = "127.0.0.1";
pub const DEFAULT_APP_PORT: u16 = 8000;
