use std::io;

use smspro::{Credentials, MessageText, RawPhoneNumber, SendOptions, SendSms, SmsProClient};

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
    let phones = required_env("SMSPRO_PHONES")?
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    let message = std::env::var("SMSPRO_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smspro demo.".to_owned());

    let client = SmsProClient::new(credentials);
    let request = SendSms::new(phones, MessageText::new(message)?, SendOptions::default())?;
    let id = request.id().clone();

    let response = client.send_sms(request).await?;
    println!(
        "id: {}, status: {} ({}), recipients: {}, parts: {}",
        id.as_str(),
        response.status_code.as_i32(),
        response.status_text,
        response.recipients,
        response.sms_parts
    );

    Ok(())
}
