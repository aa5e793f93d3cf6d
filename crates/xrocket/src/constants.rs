use std::time::Duration;

/// Production xRocket Pay API endpoint.
pub const BASE_URL: &str = "https://pay.ton-rocket.com/";

/// Header carrying the API token on outbound requests.
pub const API_KEY_HEADER: &str = "rocket-pay-key";

/// Header carrying the HMAC signature on inbound webhook deliveries.
/// Matched case-insensitively.
pub const SIGNATURE_HEADER: &str = "rocket-pay-signature";

/// Length of a hex-encoded HMAC-SHA256 signature.
pub const SIGNATURE_HEX_LEN: usize = 64;

pub const APP_INFO_PATH: &str = "/app/info";
pub const INVOICES_PATH: &str = "/tg-invoices";
pub const CURRENCIES_PATH: &str = "/currencies/available";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default invoice currency applied server-side when none is given.
pub const DEFAULT_CURRENCY: &str = "TONCOIN";

// Invoice limits documented by xRocket Pay.
pub const MAX_INVOICE_AMOUNT: f64 = 1_000_000.0;
pub const MAX_NUM_PAYMENTS: u32 = 1_000_000;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_HIDDEN_MESSAGE_LEN: usize = 2000;
pub const MAX_CALLBACK_URL_LEN: usize = 500;
pub const MAX_PAYLOAD_LEN: usize = 4000;
pub const MAX_EXPIRED_IN_SECS: u32 = 86_400;
