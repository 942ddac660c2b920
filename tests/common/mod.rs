use anyhow::Result;
use std::sync::Arc;

use rostergrid::record::RecordFields;
use rostergrid::server::{Server, ServerConfig};
use rostergrid::store::{MemoryStore, RecordStore};

#[allow(dead_code)]
pub fn fields(first: &str, last: &str, position: &str, email: &str) -> RecordFields {
    RecordFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        position: position.to_string(),
        phone: "555-0100".to_string(),
        email: email.to_string(),
    }
}

/// Store pre-filled with `n` distinct records.
#[allow(dead_code)]
pub fn seeded_store(n: usize) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for i in 0..n {
        store
            .create(&fields(
                &format!("First{i}"),
                &format!("Last{i}"),
                if i % 2 == 0 { "Engineer" } else { "Designer" },
                &format!("user{i}@example.com"),
            ))
            .unwrap();
    }
    store
}

#[allow(dead_code)]
pub async fn start_test_server(
    store: Arc<MemoryStore>,
    port: u16,
) -> Result<tokio::task::JoinHandle<()>> {
    let config = ServerConfig {
        version: "test".to_string(),
    };
    let server = Server::new(store, config);
    let app = server.router();
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(server_handle)
}
