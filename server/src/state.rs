use std::sync::Arc;

use redis::aio::ConnectionManager;
use reqwest::Client;

use super::{config::Config, database::init_redis};

pub struct AppState {
    pub config: Config,
    pub redis_connection: ConnectionManager,
    pub http_client: Client,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let redis_connection = init_redis(&config.redis_url).await;
        let http_client = Client::new();

        Arc::new(Self {
            config,
            redis_connection,
            http_client,
        })
    }
}
