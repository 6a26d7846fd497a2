use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::auth::TokenService;
use crate::clients::listings::ListingsClient;
use crate::config::Config;
use crate::db::Store;

/// Everything the API handlers share: the live config, the database
/// store, the token signer, and the upstream listings client.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub tokens: Arc<TokenService>,

    pub listings: Arc<ListingsClient>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.seed.enabled {
            crate::db::seed::seed_demo_data(&store, &config.seed.default_user_password).await?;
        }

        let tokens = Arc::new(TokenService::new(
            &config.jwt.secret,
            &config.jwt.issuer,
            &config.jwt.audience,
            config.jwt.expiry_days,
        ));

        let listings = Arc::new(ListingsClient::new(&config.listings)?);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            tokens,
            listings,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
