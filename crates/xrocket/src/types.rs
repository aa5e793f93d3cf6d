//! Request and response shapes of the xRocket Pay API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_CALLBACK_URL_LEN, MAX_DESCRIPTION_LEN, MAX_EXPIRED_IN_SECS, MAX_HIDDEN_MESSAGE_LEN,
    MAX_INVOICE_AMOUNT, MAX_NUM_PAYMENTS, MAX_PAYLOAD_LEN,
};
use crate::error::XRocketError;

/// Envelope wrapping every API response.
#[cfg_attr(not(feature = "full"), allow(dead_code))]
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<ValidationError>>,
}

#[cfg_attr(not(feature = "full"), allow(dead_code))]
impl<T> ApiResponse<T> {
    pub(crate) fn into_result(self) -> Result<T, XRocketError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(XRocketError::Serde(
                <serde_json::Error as serde::de::Error>::missing_field("data"),
            )),
            (false, _) => Err(XRocketError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
                errors: self.errors.unwrap_or_default(),
            }),
        }
    }
}

/// Per-field error returned alongside a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub property: String,
    pub error: String,
}

/// Response of `GET /app/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    pub fee_percents: f64,
    pub balances: Vec<AppBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppBalance {
    pub currency: String,
    pub balance: f64,
}

/// Body of `POST /tg-invoices`. Absent optionals are left to server defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceOptions {
    /// Invoice amount; the API keeps 9 decimal places.
    pub amount: f64,
    /// Minimum payment, only for multi-payment invoices without an amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_payments: Option<u32>,
    /// Defaults to `TONCOIN` server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shown to the payer once the invoice is paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_enabled: Option<bool>,
    /// Target of the "Return" button after payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Opaque data echoed back in webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Seconds until expiry, `0` for none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_in: Option<u32>,
}

impl CreateInvoiceOptions {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_min_payment(mut self, min_payment: f64) -> Self {
        self.min_payment = Some(min_payment);
        self
    }

    pub fn with_num_payments(mut self, num_payments: u32) -> Self {
        self.num_payments = Some(num_payments);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_hidden_message(mut self, hidden_message: impl Into<String>) -> Self {
        self.hidden_message = Some(hidden_message.into());
        self
    }

    pub fn with_comments_enabled(mut self, enabled: bool) -> Self {
        self.comments_enabled = Some(enabled);
        self
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_expired_in(mut self, seconds: u32) -> Self {
        self.expired_in = Some(seconds);
        self
    }

    /// Check the documented API limits locally so that obviously bad
    /// invoices never reach the network.
    pub fn validate(&self) -> Result<(), XRocketError> {
        check_amount("amount", self.amount)?;
        if let Some(min_payment) = self.min_payment {
            check_amount("minPayment", min_payment)?;
        }
        if let Some(n) = self.num_payments {
            if n > MAX_NUM_PAYMENTS {
                return Err(XRocketError::InvalidInvoice(format!(
                    "numPayments must be at most {MAX_NUM_PAYMENTS}, got {n}"
                )));
            }
        }
        check_len("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        check_len(
            "hiddenMessage",
            self.hidden_message.as_deref(),
            MAX_HIDDEN_MESSAGE_LEN,
        )?;
        check_len("callbackUrl", self.callback_url.as_deref(), MAX_CALLBACK_URL_LEN)?;
        check_len("payload", self.payload.as_deref(), MAX_PAYLOAD_LEN)?;
        if let Some(url) = self.callback_url.as_deref() {
            url::Url::parse(url).map_err(|e| {
                XRocketError::InvalidInvoice(format!("callbackUrl is not a valid URL: {e}"))
            })?;
        }
        if let Some(secs) = self.expired_in {
            if secs > MAX_EXPIRED_IN_SECS {
                return Err(XRocketError::InvalidInvoice(format!(
                    "expiredIn must be at most {MAX_EXPIRED_IN_SECS} seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), XRocketError> {
    if !value.is_finite() || !(0.0..=MAX_INVOICE_AMOUNT).contains(&value) {
        return Err(XRocketError::InvalidInvoice(format!(
            "{field} must be between 0 and {MAX_INVOICE_AMOUNT}, got {value}"
        )));
    }
    Ok(())
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), XRocketError> {
    match value {
        Some(v) if v.chars().count() > max => Err(XRocketError::InvalidInvoice(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Active,
    Paid,
    Expired,
}

/// Invoice as returned by `POST /tg-invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: u64,
    pub amount: f64,
    pub min_payment: f64,
    pub total_activations: u32,
    pub activations_left: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden_message: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    pub comments_enabled: bool,
    pub currency: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub paid: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    pub expired_in: u32,
    /// Telegram deep link the payer opens.
    pub link: String,
}

#[cfg_attr(not(feature = "full"), allow(dead_code))]
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrencyList {
    pub results: Vec<Currency>,
}

/// Entry of `GET /currencies/available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub currency: String,
    pub name: String,
    pub min_transfer: f64,
    pub min_cheque: f64,
    pub min_invoice: f64,
    pub min_withdraw: f64,
    pub fee_withdraw: FeeWithdraw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeWithdraw {
    pub currency: String,
    pub networks: Vec<NetworkFee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFee {
    pub network_code: NetworkCode,
    pub fee_withdraw: Fee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub fee: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkCode {
    Ton,
    Bsc,
    Eth,
    Btc,
    Trx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebhookType {
    InvoicePay,
    SubscriptionPay,
    SubscriptionEnd,
    ExchangeOrderComplete,
}

/// Webhook delivery body. Only trust it after signature verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(rename = "type")]
    pub kind: WebhookType,
    pub timestamp: DateTime<Utc>,
    pub data: WebhookInvoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInvoice {
    pub id: u64,
    pub amount: f64,
    pub min_payment: f64,
    pub total_activations: u32,
    pub activations_left: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden_message: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub comments_enabled: Option<bool>,
    pub currency: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub paid: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub expired_in: Option<u32>,
    pub link: String,
    pub payment: WebhookPayment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayment {
    pub user_id: u64,
    pub payment_num: u32,
    pub payment_amount: f64,
    pub comment: String,
    pub paid: DateTime<Utc>,
}
