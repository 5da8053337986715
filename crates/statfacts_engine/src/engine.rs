use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use facts_logging::{facts_info, facts_warn};

use crate::facts::{facts_for, FactSource, ReqwestFactEnricher};
use crate::github::{ChannelProgressSink, ProfileFetcher, ReqwestProfileFetcher};
use crate::{EngineError, EngineEvent, EngineSettings, FactFetchMode, LookupId, TriviaCategory};

enum EngineCommand {
    FetchProfile { lookup_id: LookupId, username: String },
    FetchFacts { lookup_id: LookupId, counts: Vec<u64> },
}

struct Services {
    profiles: Arc<dyn ProfileFetcher>,
    facts: Arc<dyn FactSource>,
    category: TriviaCategory,
    mode: FactFetchMode,
}

/// Handle to the background runtime that performs lookups.
///
/// Commands are executed concurrently on a tokio runtime owned by a worker
/// thread; their results come back as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let profiles = Arc::new(ReqwestProfileFetcher::new(&settings)?);
        let facts = Arc::new(ReqwestFactEnricher::new(&settings)?);
        Self::with_services(settings, profiles, facts)
    }

    /// Builds an engine around custom fetchers.
    pub fn with_services(
        settings: EngineSettings,
        profiles: Arc<dyn ProfileFetcher>,
        facts: Arc<dyn FactSource>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let services = Arc::new(Services {
            profiles,
            facts,
            category: settings.trivia_category,
            mode: settings.fact_mode,
        });

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(services.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_profile(&self, lookup_id: LookupId, username: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchProfile {
            lookup_id,
            username: username.into(),
        });
    }

    pub fn fetch_facts(&self, lookup_id: LookupId, counts: Vec<u64>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchFacts { lookup_id, counts });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchProfile {
            lookup_id,
            username,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = services.profiles.fetch(lookup_id, &username, &sink).await;
            if let Err(err) = &result {
                facts_warn!("lookup {} for {:?} failed: {}", lookup_id, username, err);
            }
            let _ = event_tx.send(EngineEvent::ProfileFetched { lookup_id, result });
        }
        EngineCommand::FetchFacts { lookup_id, counts } => {
            let facts = facts_for(
                services.facts.as_ref(),
                &counts,
                services.category,
                services.mode,
            )
            .await;
            facts_info!("lookup {} enriched {} statistics", lookup_id, facts.len());
            let _ = event_tx.send(EngineEvent::FactsFetched {
                lookup_id,
                counts,
                facts,
            });
        }
    }
}
