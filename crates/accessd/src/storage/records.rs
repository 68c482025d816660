//! Stored tender and lot records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use access_core::{Cpid, LotId, Ocid, Owner, PersonId, Token};

/// Lifecycle status of a tender.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TenderStatus {
    /// Being prepared, not yet announced.
    Planning,
    /// Announced in a plan.
    Planned,
    /// Open or under evaluation.
    Active,
    /// Withdrawn by the buyer.
    Cancelled,
    /// Closed without an award.
    Unsuccessful,
    /// Closed with an award.
    Complete,
}

/// Refinement of [`TenderStatus`] for the current procedure step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TenderStatusDetails {
    /// No refinement.
    Empty,
    /// Questions from bidders are being answered.
    Clarification,
    /// Bids are being collected.
    Tendering,
    /// Bids are being evaluated.
    Evaluation,
    /// Awards are being decided.
    Awarding,
    /// The procedure is paused.
    Suspended,
    /// A cancellation is in progress.
    Cancellation,
}

/// Lifecycle status of a lot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LotStatus {
    /// Being prepared.
    Planning,
    /// Announced in a plan.
    Planned,
    /// Open for bids.
    Active,
    /// Withdrawn.
    Cancelled,
    /// Closed without an award.
    Unsuccessful,
    /// Closed with an award.
    Complete,
}

/// Refinement of [`LotStatus`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LotStatusDetails {
    /// No refinement.
    Empty,
    /// Outcome not yet known.
    Unspecified,
    /// A contract was awarded.
    Awarded,
    /// Cancelled after announcement.
    Cancelled,
}

/// One lot of a tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRecord {
    /// Lot identifier.
    pub id: LotId,
    /// Lifecycle status.
    pub status: LotStatus,
    /// Status refinement.
    pub status_details: LotStatusDetails,
}

/// Stored state of a tender, keyed by its cpid and ocid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderRecord {
    /// Process identifier.
    pub cpid: Cpid,
    /// Contracting-process identifier.
    pub ocid: Ocid,
    /// Token issued to the owner when the tender was created.
    pub token: Token,
    /// Platform that owns the tender.
    pub owner: Owner,
    /// Lifecycle status.
    pub status: TenderStatus,
    /// Status refinement.
    pub status_details: TenderStatusDetails,
    /// Lots in publication order.
    #[serde(default)]
    pub lots: Vec<LotRecord>,
    /// Persons registered as responders.
    #[serde(default)]
    pub responders: Vec<PersonId>,
}

impl TenderRecord {
    /// Looks up a lot by identifier.
    #[must_use]
    pub fn lot(&self, id: &LotId) -> Option<&LotRecord> {
        self.lots.iter().find(|lot| &lot.id == id)
    }

    /// Returns `true` when `person` is a registered responder.
    #[must_use]
    pub fn has_responder(&self, person: &PersonId) -> bool {
        self.responders.contains(person)
    }
}
