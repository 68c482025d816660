//! Canonical tender used across unit and behaviour tests.

use rstest::fixture;

use access_core::{Cpid, LotId, Ocid, Owner, PersonId, Token};

use crate::storage::{
    LotRecord, LotStatus, LotStatusDetails, TenderRecord, TenderStatus, TenderStatusDetails,
};

pub const CPID: &str = "ocds-b3wdp1-MD-1580458690892";
pub const OCID: &str = "ocds-b3wdp1-MD-1580458690892-EV-1580458791896";
pub const TOKEN: &str = "6d2a8a9b-3c4f-4f5e-9a1b-2c3d4e5f6a7b";
pub const OWNER: &str = "445f6851-c908-407d-9b45-14b92f3e964b";
pub const ACTIVE_LOT: &str = "5a1c8a3e-0f0b-4c62-8b4e-1f2d3c4b5a69";
pub const CANCELLED_LOT: &str = "9e7d6c5b-4a39-4281-b7a6-958473625140";
/// Well-formed lot id that is not part of the tender.
pub const UNKNOWN_LOT: &str = "11111111-2222-4333-8444-555555555555";
pub const RESPONDER: &str = "MD-IDNO-1234567";

fn lot(id: &str, status: LotStatus, status_details: LotStatusDetails) -> LotRecord {
    LotRecord {
        id: LotId::parse(id).expect("fixture lot id"),
        status,
        status_details,
    }
}

/// Active tender in the tendering step with one open and one cancelled lot.
#[fixture]
pub fn tender_record() -> TenderRecord {
    TenderRecord {
        cpid: Cpid::parse(CPID).expect("fixture cpid"),
        ocid: Ocid::parse(OCID).expect("fixture ocid"),
        token: Token::parse(TOKEN).expect("fixture token"),
        owner: Owner::parse(OWNER).expect("fixture owner"),
        status: TenderStatus::Active,
        status_details: TenderStatusDetails::Tendering,
        lots: vec![
            lot(ACTIVE_LOT, LotStatus::Active, LotStatusDetails::Empty),
            lot(
                CANCELLED_LOT,
                LotStatus::Cancelled,
                LotStatusDetails::Cancelled,
            ),
        ],
        responders: vec![PersonId::parse(RESPONDER).expect("fixture responder")],
    }
}
