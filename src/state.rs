use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    data::{StudentStore, memory_store::MemoryStudentStore, postgres_store::PostgresStudentStore},
    error::RollbookResult,
    maud_conveniences::render_nav,
    routes::sse::SseEvent,
};
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};
use tokio::sync::broadcast::{Receiver, Sender, channel};

#[derive(Clone, Debug)]
pub struct RollbookState {
    store: Arc<dyn StudentStore>,
    config: RuntimeConfiguration,
    sse_events_sender: Sender<SseEvent>,
}

impl RollbookState {
    pub async fn new(config: RuntimeConfiguration) -> RollbookResult<Self> {
        let store: Arc<dyn StudentStore> = match &*config.store_config() {
            StoreConfig::Memory => {
                info!("using in-memory student store");
                Arc::new(MemoryStudentStore::new())
            }
            StoreConfig::Postgres(db_config) => {
                info!("using postgres student store");
                Arc::new(PostgresStudentStore::connect(db_config).await?)
            }
        };

        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: Arc<dyn StudentStore>, config: RuntimeConfiguration) -> Self {
        let (tx, _rx) = channel(16);

        Self {
            store,
            config,
            sse_events_sender: tx,
        }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        let nav = render_nav();

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Rollbook" }
                }
                body hx-ext="sse" sse-connect="/sse_feed" class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (nav)
                    (markup)
                }
            }
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        //no subscribers is fine
        let _ = self.sse_events_sender.send(event);
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
        info!("student store closed");
    }
}

impl Deref for RollbookState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
