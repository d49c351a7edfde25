use mongodb::{Client, bson::doc};

/// Ping the server; `false` when it cannot be reached
pub async fn check_health(client: &Client) -> bool {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .is_ok()
}
