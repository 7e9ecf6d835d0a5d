use std::sync::Arc;

use mongodb::Client;

use super::{
    config::Config,
    schema::{build_schema, AppSchema},
    store::Stores,
    token::TokenKeys,
};

/// Everything a request handler needs, wired explicitly: config, store
/// backends, token keys, and the GraphQL schema holding the services.
pub struct State {
    pub config: Config,
    pub stores: Stores,
    pub tokens: TokenKeys,
    pub schema: AppSchema,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let client = Client::with_uri_str(&config.mongo_url)
            .await
            .expect("Database misconfigured!");
        let stores = Stores::mongo(&client.database(&config.mongo_database));

        let tokens = TokenKeys::new(config.jwt_secret.as_bytes());
        let schema = build_schema(stores.clone(), tokens.clone(), config.token_ttl_hours);

        Arc::new(Self {
            config,
            stores,
            tokens,
            schema,
        })
    }
}
