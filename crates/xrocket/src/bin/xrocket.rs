use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xrocket::{
    ClientConfig, CreateInvoiceOptions, WebhookVerifier, XRocketClient, XRocketError,
    DEFAULT_CURRENCY,
};

const USAGE: &str = "\
usage: xrocket <command>

commands:
  app-info                              show app name, fee and balances
  currencies                            list available currencies
  invoice <amount> [currency] [desc]    create a Telegram invoice (currency defaults to TONCOIN)
  verify <body-file> <signature>        check a webhook signature

environment:
  XROCKET_API_TOKEN     app API token (required)
  XROCKET_BASE_URL      API root (default https://pay.ton-rocket.com/)
  XROCKET_TIMEOUT_SECS  request timeout in seconds (default 30)";

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,xrocket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but the outcome is negative.
async fn run(args: &[String]) -> Result<bool, XRocketError> {
    let command = args.first().map(String::as_str);
    if !matches!(
        command,
        Some("app-info" | "currencies" | "invoice" | "verify")
    ) {
        eprintln!("{USAGE}");
        return Ok(false);
    }

    let config = ClientConfig::from_env()?;

    match command {
        Some("app-info") => {
            let client = XRocketClient::new(config)?;
            let info = client.app_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Some("currencies") => {
            let client = XRocketClient::new(config)?;
            for currency in client.currencies().await? {
                println!(
                    "{:<12} {:<24} min invoice {}",
                    currency.currency, currency.name, currency.min_invoice
                );
            }
        }
        Some("invoice") => {
            let amount: f64 = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| XRocketError::InvalidInvoice("amount must be a number".into()))?;
            let currency = args.get(2).map_or(DEFAULT_CURRENCY, String::as_str);
            let mut options = CreateInvoiceOptions::new(amount).with_currency(currency);
            if let Some(description) = args.get(3) {
                options = options.with_description(description.as_str());
            }

            let client = XRocketClient::new(config)?;
            let invoice = client.create_invoice(&options).await?;
            println!("{}", serde_json::to_string_pretty(&invoice)?);
        }
        Some("verify") => {
            let (Some(path), Some(signature)) = (args.get(1), args.get(2)) else {
                eprintln!("{USAGE}");
                return Ok(false);
            };
            // Signature checks never touch the network.
            let verifier = WebhookVerifier::new(&config.token)?;
            let body = std::fs::read(path)
                .map_err(|e| XRocketError::Config(format!("cannot read {path}: {e}")))?;
            let valid = verifier.verify(&body, &[(xrocket::SIGNATURE_HEADER, signature.as_str())]);
            println!("{}", if valid { "valid" } else { "invalid" });
            return Ok(valid);
        }
        _ => {
            eprintln!("{USAGE}");
            return Ok(false);
        }
    }

    Ok(true)
}
