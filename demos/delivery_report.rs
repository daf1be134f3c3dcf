use std::io;

use smspro::{Credentials, DeliveryReportQuery, MessageId, RawPhoneNumber, SmsProClient};

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
    let id = MessageId::new(required_env("SMSPRO_MESSAGE_ID")?)?;
    let query = match std::env::var("SMSPRO_PHONE") {
        Ok(phone) => DeliveryReportQuery::for_phone(id, RawPhoneNumber::new(phone)?),
        Err(_) => DeliveryReportQuery::all(id),
    };

    let client = SmsProClient::new(credentials);
    let report = client.delivery_report(query).await?;
    println!(
        "status: {} ({})",
        report.status_code.as_i32(),
        report.status_text
    );
    for phone in report.phones {
        println!(
            "{}: {} ({}), sent {:?}, received {:?}",
            phone.number,
            phone.report_code.as_i32(),
            phone.report_text,
            phone.send_time,
            phone.receive_time
        );
    }

    Ok(())
}
