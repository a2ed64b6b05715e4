// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_LOG_FILTER: &str = "budget_tracker_server=info,tower_http=info";

// Session configuration
pub const SESSION_NAME: &str = "budget_session";
pub const SESSION_EXPIRY_DAYS: i64 = 3;
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;
pub const SESSION_USER_ID_KEY: &str = "user_id";
pub const SESSION_USERNAME_KEY: &str = "username";
pub const SESSION_DISPLAY_NAME_KEY: &str = "display_name";

// Ledger limits
pub const MAX_TRANSACTION_NAME_LENGTH: usize = 30;
pub const MAX_AMOUNT: i64 = 1_000_000;
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

// Account limits
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 12;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;
pub const DEFAULT_DISPLAY_NAME: &str = "User";

// Error messages
pub const ERR_BACKEND: &str = "Something went wrong, please try again later";
pub const ERR_UNAUTHORIZED: &str = "Not logged in";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ERR_TRANSACTION_NOT_FOUND: &str = "Transaction not found";
pub const ERR_USERNAME_TAKEN: &str = "Username already exists";
