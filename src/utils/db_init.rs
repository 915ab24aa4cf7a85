#![forbid(unsafe_code)]

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use log::info;

use crate::utils::config::Config;
use crate::utils::web_utils::get_absolute_path;

// Database constants.
const POOL_MIN_CONNECTIONS: u32 = 2;
const POOL_MAX_CONNECTIONS: u32 = 8;

// ---------------------------------------------------------------------------
// init_db:
// ---------------------------------------------------------------------------
// See migrations directory for database schema definition.  The target
// database is expected to exist; creating it is an administrative step
// outside this server (e.g. createdb hellos).
pub async fn init_db(config: &Config) -> Pool<Postgres> {
    // Build the connection options from the configured parameters.
    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    // Create the database connection pool.
    let db = PgPoolOptions::new()
        .min_connections(POOL_MIN_CONNECTIONS)
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .expect("Unable to create db connection pool");
    info!("Connected to database {} at {}:{}.", config.db_name, config.db_host, config.db_port);

    // Locate the migration files.
    let mdir = get_absolute_path(&config.db_migrations_dir);
    let migrations = std::path::Path::new(&mdir);

    // Run the migrations.
    let migration_results = sqlx::migrate::Migrator::new(migrations)
        .await
        .expect("Migration failed")
        .run(&db)
        .await;

    match migration_results {
        Ok(_) => info!("Migration success"),
        Err(error) => {
            panic!("Migration run error: {}", error);
        }
    }

    info!("migration: {:?}", migration_results);
    db
}
