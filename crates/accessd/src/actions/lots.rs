//! `getLotIds` and `getLotStateByIds`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use access_core::{DomainError, Failure, LotId};

use super::fields;
use super::tender_state::TenderKey;
use crate::dispatch::QueryHandler;
use crate::storage::{LotRecord, LotStatus, LotStatusDetails, TenderRepository};

/// One raw state filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotStateRequest {
    /// Raw lot status.
    pub status: Option<String>,
    /// Raw lot status refinement.
    pub status_details: Option<String>,
}

/// Raw `getLotIds` params.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotIdsRequest {
    /// Raw process identifier.
    pub cpid: Option<String>,
    /// Raw contracting-process identifier.
    pub ocid: Option<String>,
    /// Optional state filters.
    pub states: Option<Vec<LotStateRequest>>,
}

/// Lot state filter. Unset fields match any value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LotStateFilter {
    /// Required status, if any.
    pub status: Option<LotStatus>,
    /// Required refinement, if any.
    pub status_details: Option<LotStatusDetails>,
}

impl LotStateFilter {
    /// Returns `true` when `lot` satisfies every set field.
    #[must_use]
    pub fn matches(&self, lot: &LotRecord) -> bool {
        self.status.is_none_or(|status| status == lot.status)
            && self
                .status_details
                .is_none_or(|details| details == lot.status_details)
    }
}

impl TryFrom<LotStateRequest> for LotStateFilter {
    type Error = DomainError;

    fn try_from(request: LotStateRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .map(|text| fields::enumerated("states.status", &text))
            .transpose()?;
        let status_details = request
            .status_details
            .map(|text| fields::enumerated("states.statusDetails", &text))
            .transpose()?;
        Ok(Self {
            status,
            status_details,
        })
    }
}

/// Validated `getLotIds` params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotIdsParams {
    /// Tender identifiers.
    pub key: TenderKey,
    /// Filters combined with "any". Empty selects every lot.
    pub states: Vec<LotStateFilter>,
}

/// Lists the lots of a tender, optionally filtered by state.
pub struct GetLotIds {
    repository: Arc<dyn TenderRepository>,
}

impl GetLotIds {
    /// Creates the handler over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }
}

impl QueryHandler for GetLotIds {
    type Request = LotIdsRequest;
    type Params = LotIdsParams;
    type Payload = Vec<LotId>;

    fn convert(&self, request: LotIdsRequest) -> Result<LotIdsParams, DomainError> {
        let key = TenderKey::parse(request.cpid, request.ocid)?;
        let states = request
            .states
            .unwrap_or_default()
            .into_iter()
            .map(LotStateFilter::try_from)
            .collect::<Result<_, _>>()?;
        Ok(LotIdsParams { key, states })
    }

    fn execute(&self, params: LotIdsParams) -> Result<Vec<LotId>, Failure> {
        let TenderKey { cpid, ocid } = &params.key;
        let tender = fields::load_tender(self.repository.as_ref(), cpid, ocid)?;
        Ok(tender
            .lots
            .iter()
            .filter(|lot| {
                params.states.is_empty() || params.states.iter().any(|filter| filter.matches(lot))
            })
            .map(|lot| lot.id)
            .collect())
    }
}

/// Raw `getLotStateByIds` params.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotStatesRequest {
    /// Raw process identifier.
    pub cpid: Option<String>,
    /// Raw contracting-process identifier.
    pub ocid: Option<String>,
    /// Raw lot identifiers.
    pub lot_ids: Option<Vec<String>>,
}

/// Validated `getLotStateByIds` params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotStatesParams {
    /// Tender identifiers.
    pub key: TenderKey,
    /// Requested lots, non-empty and unique, in request order.
    pub lot_ids: Vec<LotId>,
}

/// State of one requested lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotState {
    /// Lot identifier.
    pub id: LotId,
    /// Lifecycle status.
    pub status: LotStatus,
    /// Status refinement.
    pub status_details: LotStatusDetails,
}

impl From<&LotRecord> for LotState {
    fn from(lot: &LotRecord) -> Self {
        Self {
            id: lot.id,
            status: lot.status,
            status_details: lot.status_details,
        }
    }
}

/// Reports the state of specific lots.
pub struct GetLotStateByIds {
    repository: Arc<dyn TenderRepository>,
}

impl GetLotStateByIds {
    /// Creates the handler over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }
}

impl QueryHandler for GetLotStateByIds {
    type Request = LotStatesRequest;
    type Params = LotStatesParams;
    type Payload = Vec<LotState>;

    fn convert(&self, request: LotStatesRequest) -> Result<LotStatesParams, DomainError> {
        let key = TenderKey::parse(request.cpid, request.ocid)?;
        let raw = fields::non_empty("lotIds", fields::required("lotIds", request.lot_ids)?)?;
        let lot_ids = raw
            .iter()
            .enumerate()
            .map(|(index, text)| {
                LotId::parse(text).map_err(|_| {
                    DomainError::data_format_mismatch(format!("lotIds[{index}]"), "uuid", text)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        fields::unique("lotIds", &lot_ids)?;
        Ok(LotStatesParams { key, lot_ids })
    }

    fn execute(&self, params: LotStatesParams) -> Result<Vec<LotState>, Failure> {
        let TenderKey { cpid, ocid } = &params.key;
        let tender = fields::load_tender(self.repository.as_ref(), cpid, ocid)?;
        let (found, missing): (Vec<_>, Vec<_>) = params
            .lot_ids
            .iter()
            .map(|id| tender.lot(id).ok_or(id))
            .partition(Result::is_ok);

        if !missing.is_empty() {
            let unknown = missing
                .into_iter()
                .filter_map(Result::err)
                .map(ToString::to_string);
            return Err(DomainError::lots_not_found(unknown).into());
        }
        Ok(found.into_iter().flatten().map(LotState::from).collect())
    }
}
