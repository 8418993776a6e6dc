//! Minimal chat session against the real Gemini API.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY=AIza...
//!
//! cargo run --example simple_chat
//! ```

use std::sync::Arc;

use talko::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("GEMINI_API_KEY")?;

    let app = Talko::builder()
        .storage(Arc::new(MemoryStorage::new()))
        .gemini_api_key(api_key)
        .build()?;
    let _cleanup = app.spawn_token_cleanup();

    println!("{}\n", talko::persona::about());

    let (account, token) = app
        .auth()
        .register("demo@example.com", "Passw0rd!", "Demo User")
        .await?;
    println!("Registered {} (token {token})\n", account.email);

    let queries = [
        "Assalam o Alaikum!",
        "Who created you?",
        "Give me three tips for learning Rust.",
    ];

    for query in queries {
        println!("> {query}");
        let session = app.chat().send_message(&account.id, query).await?;
        if let Some(reply) = session.messages.last() {
            println!("{}\n", reply.content);
        }
    }

    let threads = app.chat().sessions(&account.id).await?;
    for thread in threads {
        println!("[{}] {} messages", thread.title, thread.messages.len());
    }

    app.auth().logout(&token).await?;
    Ok(())
}
