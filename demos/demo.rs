//! Walkthrough of the Barid client: pick a domain, generate an address, poll the
//! inbox for a while, then print every message that arrived.

use barid_inbox::{Client, SessionAddress, DEFAULT_DOMAIN, DEFAULT_PAGE_LIMIT};
use std::io::Write;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📧 Barid inbox - demo");
    println!("{}", "=".repeat(50));

    let client = Client::new()?;

    println!("\n🌐 Available domains:");
    let domains = client.list_domains().await.unwrap_or_default();
    for domain in &domains {
        println!("   - {domain}");
    }

    let domain = domains
        .first()
        .map_or(DEFAULT_DOMAIN, String::as_str);
    let session = SessionAddress::generate(domain);
    let address = session.address();
    println!("\n📬 Send an email to: {address}");

    let start = Instant::now();
    let timeout = Duration::from_secs(120);
    let poll_interval = Duration::from_secs(5);

    loop {
        let messages = client.list_emails(&address, DEFAULT_PAGE_LIMIT).await?;

        if !messages.is_empty() {
            println!("\n\n📥 Received {} message(s)!", messages.len());
            for msg in &messages {
                println!("\n{}", "-".repeat(50));
                println!("From:     {}", msg.from_address);
                println!("Subject:  {}", msg.subject.as_deref().unwrap_or(""));
                println!("Received: {}", barid_inbox::format_timestamp(msg.received_at));

                match client.fetch_email(&msg.id).await {
                    Ok(details) => {
                        let view = barid_inbox::MessageView::new(&msg.id, &details);
                        let text = barid_inbox::render::render_detail(
                            &barid_inbox::DetailView::Open(view),
                            barid_inbox::render::DEFAULT_WIDTH,
                            false,
                        );
                        for line in text.lines().take(15) {
                            println!("   {line}");
                        }
                    }
                    Err(e) => eprintln!("   ❌ Failed to fetch: {e}"),
                }
            }
            break;
        }

        if start.elapsed() >= timeout {
            println!("\n\n⚠️  Timeout: No messages received");
            break;
        }

        let remaining = (timeout - start.elapsed()).as_secs();
        print!("\r   Checking... {remaining} seconds remaining   ");
        std::io::stdout().flush().ok();

        tokio::time::sleep(poll_interval).await;
    }

    Ok(())
}
