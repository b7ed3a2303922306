use mailinator_client::Client;

#[tokio::main]
async fn main() -> Result<(), mailinator_client::Error> {
    tracing_subscriber::fmt::init();

    let mailbox = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testuser".to_string());
    let client = Client::new(&mailbox)?;
    println!("Reading public inbox: {}@mailinator.com", client.mailbox());

    let inbox = client.inbox_status().await?;
    if inbox.is_empty() {
        println!("No messages found.");
        return Ok(());
    }

    println!("Found {} message(s):", inbox.len());
    for msg in &inbox {
        println!("- [{}] {} ({}s ago)", msg.id, msg.subject, msg.seconds_ago);
        match client.simplified_mail(msg).await {
            Ok(mail) => {
                println!("  From: {}", mail.from);
                println!("  To: {}", mail.to);
                println!("  {}", mail.body.lines().next().unwrap_or_default());
            }
            Err(e) => println!("  could not fetch message: {e}"),
        }
    }

    Ok(())
}
