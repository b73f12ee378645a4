use std::path::Path;

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::{fred::prelude::Pool, RedisStore};

use crate::server::{
    config::Config,
    error::{config::ConfigError, Error},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<Pool>>, Error> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Secure cookies everywhere except debug builds served over plain HTTP
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Create the upload directory if missing and check that it is a writable directory
pub async fn prepare_upload_directory(path: &Path) -> Result<(), Error> {
    let unavailable = |reason: String| ConfigError::UploadDirectoryUnavailable {
        path: path.display().to_string(),
        reason,
    };

    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    if metadata.permissions().readonly() {
        return Err(unavailable("directory is read-only".to_string()).into());
    }

    Ok(())
}
