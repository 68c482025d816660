//! Action to handler lookup table.
//!
//! The registry is assembled once at start-up and never mutated afterwards,
//! so concurrent lookups need no synchronisation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use access_core::DomainError;

use super::action::Action;
use super::handler::{Assertion, CommandHandler, Query};
use crate::actions::{
    CheckAccessToTender, CheckResponder, GetLotIds, GetLotStateByIds, GetTenderState,
};
use crate::storage::TenderRepository;

/// Read-only map from [`Action`] to its handler.
pub struct HandlerRegistry {
    handlers: HashMap<Action, Box<dyn CommandHandler>>,
}

impl HandlerRegistry {
    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every action bound to `repository`.
    #[must_use]
    pub fn standard(repository: &Arc<dyn TenderRepository>) -> Self {
        Self::builder()
            .register(
                Action::CheckAccessToTender,
                Assertion(CheckAccessToTender::new(Arc::clone(repository))),
            )
            .register(
                Action::GetTenderState,
                Query(GetTenderState::new(Arc::clone(repository))),
            )
            .register(Action::GetLotIds, Query(GetLotIds::new(Arc::clone(repository))))
            .register(
                Action::GetLotStateByIds,
                Query(GetLotStateByIds::new(Arc::clone(repository))),
            )
            .register(
                Action::CheckResponder,
                Assertion(CheckResponder::new(Arc::clone(repository))),
            )
            .build()
    }

    /// Resolves an action name to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedAction`] when the name is unknown or
    /// has no registered handler.
    pub fn lookup(&self, name: &str) -> Result<&dyn CommandHandler, DomainError> {
        let action = Action::parse(name)?;
        self.handlers
            .get(&action)
            .map(|handler| &**handler)
            .ok_or_else(|| DomainError::unsupported_action(name))
    }

    /// Returns `true` when `action` has a handler.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.handlers.contains_key(&action)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HandlerRegistry")
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects handlers before the registry is frozen.
pub struct RegistryBuilder {
    handlers: HashMap<Action, Box<dyn CommandHandler>>,
}

impl RegistryBuilder {
    /// Binds `handler` to `action`, replacing any earlier binding.
    #[must_use]
    pub fn register<H>(mut self, action: Action, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        self.handlers.insert(action, Box::new(handler));
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}
