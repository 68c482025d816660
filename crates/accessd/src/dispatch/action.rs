//! Actions the service understands.

use strum::{AsRefStr, Display, EnumIter, EnumString, VariantNames};

use access_core::DomainError;

/// Action named by a command envelope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, VariantNames,
)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
    /// Verifies that a token and owner may act on a tender.
    CheckAccessToTender,
    /// Reads the tender status pair.
    GetTenderState,
    /// Lists lot identifiers, optionally filtered by state.
    GetLotIds,
    /// Reads the state of specific lots.
    GetLotStateByIds,
    /// Verifies that a person is a registered responder.
    CheckResponder,
}

impl Action {
    /// Resolves an action name. Names are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedAction`] for names outside the set.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.parse()
            .map_err(|_| DomainError::unsupported_action(name))
    }
}
