use std::io;
use std::time::Duration;

use smspro::{Credentials, SmsProClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = Credentials::new(
        required_env("SMSPRO_LOGIN")?,
        required_env("SMSPRO_PASSWORD")?,
        required_env("SMSPRO_SENDER")?,
    )?;

    let mut builder = SmsProClient::builder(credentials).timeout(Duration::from_secs(10));
    if let Ok(base_url) = std::env::var("SMSPRO_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let info = client.account_info().await?;
    println!(
        "status: {} ({}), active: {}, balance: {}, sms price: {}",
        info.status_code.as_i32(),
        info.status_text,
        info.is_active,
        info.balance,
        info.sms_price
    );

    Ok(())
}
