use std::sync::Arc;

use recovery_core::{FoundWord, OperationSlot, RecoveryProgress, RecoveryView};
use recovery_logging::recovery_info;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::{
    parse_known_words, AsyncController, Collaborators, ConfigError, MnemonicSearch,
    OperationTicket, RecoveryConfig,
};

/// Caller-facing entry point: `start`, `reset` and an observable
/// `{ state, progress }` for the one current search.
#[derive(Clone)]
pub struct RecoveryEngine {
    controller: AsyncController<FoundWord, RecoveryProgress>,
    search: Arc<MnemonicSearch>,
}

impl RecoveryEngine {
    pub fn new(config: &RecoveryConfig, runtime: Handle) -> Result<Self, ConfigError> {
        Self::with_collaborators(config, Collaborators::standard(config), runtime)
    }

    pub fn with_collaborators(
        config: &RecoveryConfig,
        tools: Collaborators,
        runtime: Handle,
    ) -> Result<Self, ConfigError> {
        let search = MnemonicSearch::new(config, tools)?;
        Ok(Self {
            controller: AsyncController::new(runtime),
            search: Arc::new(search),
        })
    }

    /// Starts a search, superseding any search still running.
    pub fn start(
        &self,
        known_words: Vec<String>,
        target_address: impl Into<String>,
    ) -> OperationTicket {
        let search = Arc::clone(&self.search);
        let target_address = target_address.into();
        let ticket = self.controller.start(move |token| async move {
            search.run(known_words, target_address, &token).await
        });
        recovery_info!("Search {} started", ticket.handle());
        ticket
    }

    /// Like [`Self::start`] but takes raw input: words separated by any
    /// whitespace, address with surrounding whitespace ignored.
    pub fn start_from_input(&self, words_input: &str, address_input: &str) -> OperationTicket {
        self.start(parse_known_words(words_input), address_input.trim())
    }

    pub fn reset(&self) {
        self.controller.reset();
    }

    pub fn view(&self) -> RecoveryView {
        self.controller.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationSlot<FoundWord, RecoveryProgress>> {
        self.controller.subscribe()
    }

    pub fn word_count(&self) -> usize {
        self.search.word_count()
    }
}
