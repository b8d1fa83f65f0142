//! Market Mole Backend Binary
//!
//! Serves the WebSocket gateway and health probe on BIND_ADDR
//! (e.g. 0.0.0.0:3000).

#[tokio::main]
async fn main() {
    mole_core::log();
    mole_server::run().await.unwrap();
}
