use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::constants::{API_KEY_HEADER, APP_INFO_PATH, CURRENCIES_PATH, INVOICES_PATH};
use crate::error::XRocketError;
use crate::types::{
    ApiResponse, AppInfo, CreateInvoiceOptions, Currency, CurrencyList, Invoice, Webhook,
};
use crate::webhook::{WebhookHeaders, WebhookVerifier};

/// HTTP client for the xRocket Pay API.
///
/// Every request carries the `Rocket-Pay-Key` header. The same token backs
/// the embedded [`WebhookVerifier`], so one client covers both directions.
#[derive(Debug, Clone)]
pub struct XRocketClient {
    http: reqwest::Client,
    base_url: String,
    verifier: WebhookVerifier,
}

impl XRocketClient {
    pub fn new(config: ClientConfig) -> Result<Self, XRocketError> {
        let verifier = WebhookVerifier::new(&config.token)?;

        let mut api_key = HeaderValue::from_str(&config.token).map_err(|_| {
            XRocketError::Config("API token is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| XRocketError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            verifier,
        })
    }

    /// Shorthand for [`ClientConfig::from_env`] followed by [`XRocketClient::new`].
    pub fn from_env() -> Result<Self, XRocketError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// `GET /app/info`: app name, fee and balances.
    pub async fn app_info(&self) -> Result<AppInfo, XRocketError> {
        self.send(APP_INFO_PATH, self.http.get(self.url(APP_INFO_PATH)))
            .await
    }

    /// `POST /tg-invoices`. Options are validated locally first.
    pub async fn create_invoice(
        &self,
        options: &CreateInvoiceOptions,
    ) -> Result<Invoice, XRocketError> {
        options.validate()?;
        let invoice: Invoice = self
            .send(
                INVOICES_PATH,
                self.http.post(self.url(INVOICES_PATH)).json(options),
            )
            .await?;
        tracing::info!(
            invoice_id = invoice.id,
            amount = invoice.amount,
            currency = %invoice.currency,
            "invoice created"
        );
        Ok(invoice)
    }

    /// `GET /currencies/available`.
    pub async fn currencies(&self) -> Result<Vec<Currency>, XRocketError> {
        let list: CurrencyList = self
            .send(CURRENCIES_PATH, self.http.get(self.url(CURRENCIES_PATH)))
            .await?;
        Ok(list.results)
    }

    pub fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    /// See [`WebhookVerifier::verify`].
    pub fn verify_webhook_signature<H>(&self, body: impl AsRef<[u8]>, headers: &H) -> bool
    where
        H: WebhookHeaders + ?Sized,
    {
        self.verifier.verify(body, headers)
    }

    /// See [`WebhookVerifier::parse`].
    pub fn parse_webhook<H>(&self, body: &str, headers: &H) -> Result<Webhook, XRocketError>
    where
        H: WebhookHeaders + ?Sized,
    {
        self.verifier.parse(body, headers)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, XRocketError> {
        let resp = request
            .send()
            .await
            .map_err(|e| XRocketError::Http(format!("request to {path} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| XRocketError::Http(format!("failed to read {path} response: {e}")))?;

        tracing::debug!(path, status = %status, bytes = body.len(), "xRocket response");

        // Error responses usually still carry the JSON envelope with a message.
        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) => envelope.into_result(),
            Err(e) if status.is_success() => Err(XRocketError::Serde(e)),
            Err(_) => {
                tracing::warn!(path, status = %status, "xRocket request failed");
                Err(XRocketError::Http(format!("{path} returned {status}")))
            }
        }
    }
}
