//! Contracting-process identifier and procurement stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use super::{Cpid, timestamp};
use crate::failure::DomainError;

const FIELD: &str = "ocid";

/// Procurement stage encoded in a single-stage [`Ocid`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Stage {
    /// Awarded contract.
    Ac,
    /// Aggregated planning.
    Ap,
    /// Expenditure item.
    Ei,
    /// Evaluation.
    Ev,
    /// Framework establishment.
    Fe,
    /// Financing source.
    Fs,
    /// Negotiation procedure.
    Np,
    /// Purchasing catalogue contract.
    Pc,
    /// Planning notice.
    Pn,
    /// Purchase order.
    Po,
    /// Request for quotation.
    Rq,
    /// Tender planning.
    Tp,
}

/// Ocid qualified with a stage and the stage's own timestamp, e.g.
/// `ocds-b3wdp1-MD-1580458690892-EV-1580458791896`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingleStageOcid {
    value: String,
    cpid: Cpid,
    stage: Stage,
    timestamp: u64,
}

impl SingleStageOcid {
    /// Normalized text form.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Process the stage belongs to.
    #[must_use]
    pub const fn cpid(&self) -> &Cpid {
        &self.cpid
    }

    /// Stage code.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Stage creation timestamp in epoch milliseconds.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Contracting-process identifier.
///
/// A multi-stage ocid shares the text of its [`Cpid`]; a single-stage ocid
/// appends a stage code and a second timestamp. The stage is derived here once
/// and never re-parsed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ocid {
    /// Process-level identifier without a stage.
    MultiStage(Cpid),
    /// Stage-qualified identifier.
    SingleStage(SingleStageOcid),
}

impl Ocid {
    /// Parses either ocid form.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIdentifier`] naming the first segment
    /// that breaks the grammar, including unknown stage codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_core::{Ocid, Stage};
    ///
    /// let ocid = Ocid::parse("ocds-b3wdp1-MD-1580458690892-EV-1580458791896").expect("valid ocid");
    /// assert_eq!(ocid.stage(), Some(Stage::Ev));
    /// ```
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = text.split('-').collect();
        match segments.as_slice() {
            [prefix, authority, country, stamp] => {
                Cpid::from_segments(FIELD, text, [*prefix, *authority, *country, *stamp])
                    .map(Self::MultiStage)
            }
            [prefix, authority, country, stamp, code, stage_stamp] => {
                let cpid =
                    Cpid::from_segments(FIELD, text, [*prefix, *authority, *country, *stamp])?;
                let stage = parse_stage(text, code)?;
                let millis = timestamp(FIELD, "stage timestamp", stage_stamp, text)?;
                Ok(Self::SingleStage(SingleStageOcid {
                    value: format!("{cpid}-{stage}-{stage_stamp}"),
                    cpid,
                    stage,
                    timestamp: millis,
                }))
            }
            _ => Err(structure_error(FIELD, text, "4 or 6 '-'-separated segments")),
        }
    }

    /// Normalized text form.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::MultiStage(cpid) => cpid.as_str(),
            Self::SingleStage(ocid) => ocid.as_str(),
        }
    }

    /// Process identifier the ocid belongs to.
    #[must_use]
    pub const fn cpid(&self) -> &Cpid {
        match self {
            Self::MultiStage(cpid) => cpid,
            Self::SingleStage(ocid) => ocid.cpid(),
        }
    }

    /// Stage code, present only for single-stage ocids.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::MultiStage(_) => None,
            Self::SingleStage(ocid) => Some(ocid.stage()),
        }
    }

    /// Returns `true` when the ocid belongs to `cpid`.
    #[must_use]
    pub fn belongs_to(&self, cpid: &Cpid) -> bool {
        self.cpid() == cpid
    }
}

fn parse_stage(text: &str, code: &str) -> Result<Stage, DomainError> {
    code.parse().map_err(|_| {
        DomainError::malformed_identifier(
            FIELD,
            "stage",
            format!("one of {}", Stage::VARIANTS.join(", ")),
            text,
        )
    })
}

fn structure_error(name: &str, text: &str, expected: &str) -> DomainError {
    DomainError::malformed_identifier(name, "structure", expected, text)
}

impl fmt::Display for Ocid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl fmt::Display for SingleStageOcid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Ocid {
    type Err = DomainError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl TryFrom<String> for Ocid {
    type Error = DomainError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Ocid> for String {
    fn from(ocid: Ocid) -> Self {
        match ocid {
            Ocid::MultiStage(cpid) => cpid.into(),
            Ocid::SingleStage(single) => single.value,
        }
    }
}
