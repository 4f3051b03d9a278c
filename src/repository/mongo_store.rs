use crate::config::mongo_conf::MongoConfig;
use crate::model::material::Material;
use crate::model::quote::Quote;
use crate::repository::repository_error::RepositoryResult;
use bson::doc;
use mongodb::{Client, Collection, Database};
use tracing::{error, info};

/// Shared handle on the database. The driver pools connections internally,
/// so one store is built at startup and its collections are cloned into
/// each repository.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    material_collection: String,
    quote_collection: String,
}

impl MongoStore {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::options::{ClientOptions, Credential, ResolverConfig};

        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
        client_options.app_name = Some("OrcamentoPapelaria".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        client_options.server_selection_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        Ok(MongoStore {
            db: client.database(&config.database),
            material_collection: config.material_collection.clone(),
            quote_collection: config.quote_collection.clone(),
        })
    }

    /// Round-trips a `ping` so an unreachable server fails at startup, not on the first request.
    pub async fn ping(&self) -> RepositoryResult<()> {
        match self.db.run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => {
                info!(database = %self.db.name(), "MongoDB reachable");
                Ok(())
            }
            Err(e) => {
                error!("MongoDB ping failed: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn materials(&self) -> Collection<Material> {
        self.db.collection::<Material>(&self.material_collection)
    }

    pub fn quotes(&self) -> Collection<Quote> {
        self.db.collection::<Quote>(&self.quote_collection)
    }
}
