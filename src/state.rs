use crate::{
    config::{RuntimeConfiguration, StorageConfig},
    error::AlunosResult,
    store::{StudentStore, memory::MemoryStudentStore, postgres::PostgresStudentStore},
};
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct AlunosState {
    store: Arc<dyn StudentStore>,
    config: RuntimeConfiguration,
}

impl AlunosState {
    pub async fn new(config: RuntimeConfiguration) -> AlunosResult<Self> {
        let store: Arc<dyn StudentStore> = match config.storage() {
            StorageConfig::Postgres(db_config) => {
                info!(max_connections = db_config.max_connections(), "Connecting to postgres");
                Arc::new(PostgresStudentStore::connect(db_config).await?)
            }
            StorageConfig::Memory => {
                warn!("Using in-memory storage, nothing will survive a restart");
                Arc::new(MemoryStudentStore::new())
            }
        };

        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: Arc<dyn StudentStore>, config: RuntimeConfiguration) -> Self {
        Self { store, config }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed, and to allow direct html! usage
    pub fn render(&self, title: &str, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    link rel="stylesheet" href="/assets/index.css" {}
                    title { (title) }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for AlunosState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
