//! Shared application state.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::auth::{TokenSigner, UserDirectory};
use crate::bookmarks::BookmarkStore;
use crate::config::{Config, StorageBackend};
use crate::initialization::init_client;
use crate::messages::MessageStore;
use crate::notify::LoginNotifier;
use crate::storage::{init_db_pool_with_path, run_migrations};

/// Everything a handler can reach. Cloned per request; all fields are shared.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<UserDirectory>,
    pub tokens: Arc<TokenSigner>,
    pub bookmarks: Arc<BookmarkStore>,
    pub messages: Arc<MessageStore>,
    pub notifier: Arc<LoginNotifier>,
}

impl AppState {
    /// Builds the state for `config`: hashes the configured users, opens the
    /// selected storage backend and wires the notifier to the shared client.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let users = UserDirectory::from_credentials(&config.users, config.pbkdf2_iterations)
            .context("Failed to hash configured user passwords")?;
        let tokens = TokenSigner::new(&config.secret_key, config.token_ttl_seconds)
            .context("Invalid SECRET_KEY")?;

        let (bookmarks, messages) = open_stores(config).await?;
        info!(
            "Storage: bookmarks={} messages={}",
            bookmarks.backend_name(),
            messages.backend_name()
        );

        let client = init_client(config).context("Failed to initialize HTTP client")?;
        let notifier = LoginNotifier::from_config(client, config);

        Ok(Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            bookmarks: Arc::new(bookmarks),
            messages: Arc::new(messages),
            notifier: Arc::new(notifier),
        })
    }
}

async fn open_stores(config: &Config) -> Result<(BookmarkStore, MessageStore)> {
    match config.storage {
        StorageBackend::Memory => Ok((BookmarkStore::in_memory(), MessageStore::in_memory())),
        StorageBackend::File => {
            let bookmarks = BookmarkStore::open_file(&config.bookmarks_file)
                .await
                .with_context(|| {
                    format!(
                        "Failed to open bookmark file {}",
                        config.bookmarks_file.display()
                    )
                })?;
            let messages = MessageStore::open_file(&config.messages_file)
                .await
                .with_context(|| {
                    format!(
                        "Failed to open message file {}",
                        config.messages_file.display()
                    )
                })?;
            Ok((bookmarks, messages))
        }
        StorageBackend::Sqlite => {
            let pool = init_db_pool_with_path(&config.db_path)
                .await
                .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            Ok((
                BookmarkStore::sqlite(pool.clone()),
                MessageStore::sqlite(pool),
            ))
        }
    }
}
