use tokio::net::TcpListener;

use tinywiki::logger::Logger;
use tinywiki::{build_router, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = Config::new();
    let addr = config.socket_addr()?;
    let state = config.into_state()?;
    log::info!("Pages stored in {:?}", state.store.root());
    let app = build_router(state);

    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
