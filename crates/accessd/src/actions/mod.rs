//! Registered action handlers.
//!
//! Each handler owns a shared [`TenderRepository`](crate::storage::TenderRepository)
//! and converts its request fields in declaration order before touching it.

mod access;
mod fields;
mod lots;
mod responder;
mod tender_state;

pub use self::access::{AccessParams, AccessRequest, CheckAccessToTender};
pub use self::lots::{
    GetLotIds, GetLotStateByIds, LotIdsParams, LotIdsRequest, LotState, LotStateFilter,
    LotStateRequest, LotStatesParams, LotStatesRequest,
};
pub use self::responder::{CheckResponder, ResponderParams, ResponderRef, ResponderRequest};
pub use self::tender_state::{GetTenderState, TenderKey, TenderKeyRequest, TenderState};
