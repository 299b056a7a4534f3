//! Demo: two accounts follow a third, which publishes a tagged post.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use social_feed::lifecycle::{setup_tracing, SocialSystem};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting social feed demo");
    let system = SocialSystem::new();

    let span = tracing::info_span!("following");
    async {
        for follower in ["bob", "carol"] {
            system
                .account(follower)
                .map_err(|e| e.to_string())?
                .follow_user("alice")
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let alice = system.account("alice").map_err(|e| e.to_string())?;
    let followers = alice.get_followers_list().await.map_err(|e| e.to_string())?;
    info!(?followers, "alice has followers");

    let post_id = alice
        .publish_post("hello #go #systems")
        .instrument(tracing::info_span!("publishing"))
        .await
        .map_err(|e| e.to_string())?;

    let post = system
        .post(post_id)
        .map_err(|e| e.to_string())?
        .get_post()
        .await
        .map_err(|e| e.to_string())?;
    info!(%post_id, tags = ?post.tags(), "Post published");

    for reader in ["bob", "carol"] {
        let feed = system
            .received_feed(reader, 10, 0)
            .await
            .map_err(|e| e.to_string())?;
        for summary in feed {
            info!(
                reader,
                author = %summary.author,
                content = %summary.content,
                likes = summary.like_count,
                comments = summary.comment_count,
                "Feed entry"
            );
        }
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Demo finished");
    Ok(())
}
