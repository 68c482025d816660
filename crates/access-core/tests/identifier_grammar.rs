//! Property tests for identifier parsing.

use access_core::{Cpid, DomainError, LotId, Ocid, Owner, PersonId, Stage, Token};
use proptest::prelude::*;

fn authority() -> impl Strategy<Value = String> {
    "[a-z0-9]{6}"
}

fn country() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

fn stamp() -> impl Strategy<Value = String> {
    "[0-9]{13}"
}

fn cpid_text() -> impl Strategy<Value = String> {
    (authority(), country(), stamp())
        .prop_map(|(authority, country, stamp)| format!("ocds-{authority}-{country}-{stamp}"))
}

fn stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(vec![
        Stage::Ac,
        Stage::Ap,
        Stage::Ei,
        Stage::Ev,
        Stage::Fe,
        Stage::Fs,
        Stage::Np,
        Stage::Pc,
        Stage::Pn,
        Stage::Po,
        Stage::Rq,
        Stage::Tp,
    ])
}

fn uuid_text() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
}

proptest! {
    /// Every well-formed cpid parses and renders unchanged.
    #[test]
    fn generated_cpids_parse(text in cpid_text()) {
        let cpid = Cpid::parse(&text).expect("generated cpid is valid");
        prop_assert_eq!(cpid.as_str(), text.as_str());
        prop_assert_eq!(cpid.to_string(), text);
    }

    /// Multi-stage ocids carry no stage and reuse the cpid text.
    #[test]
    fn multi_stage_ocids_parse(text in cpid_text()) {
        let ocid = Ocid::parse(&text).expect("generated ocid is valid");
        prop_assert_eq!(ocid.stage(), None);
        prop_assert_eq!(ocid.cpid().as_str(), text.as_str());
    }

    /// Single-stage ocids expose the stage they were built with.
    #[test]
    fn single_stage_ocids_parse(cpid in cpid_text(), stage in stage(), stage_stamp in stamp()) {
        let text = format!("{cpid}-{stage}-{stage_stamp}");
        let ocid = Ocid::parse(&text).expect("generated ocid is valid");
        prop_assert_eq!(ocid.stage(), Some(stage));
        prop_assert_eq!(ocid.cpid().as_str(), cpid.as_str());
        prop_assert_eq!(ocid.as_str(), text.as_str());
    }

    /// Any segment count other than four is a structural error for cpids.
    #[test]
    fn wrong_segment_counts_are_rejected(
        segments in prop::collection::vec("[a-z0-9]{1,6}", 0..9)
            .prop_filter("four segments is the valid arity", |segments| segments.len() != 4),
    ) {
        let text = segments.join("-");
        let error = Cpid::parse(&text).expect_err("wrong arity");
        let is_structure = matches!(
            &error,
            DomainError::MalformedIdentifier { segment, .. } if segment == "structure"
        );
        prop_assert!(is_structure, "unexpected error: {:?}", error);
    }

    /// A timestamp with any non-digit is rejected and names the segment.
    #[test]
    fn non_numeric_timestamps_are_rejected(
        authority in authority(),
        country in country(),
        stamp in "[0-9]{0,12}[a-zA-Z_.][0-9]{0,12}",
    ) {
        let text = format!("ocds-{authority}-{country}-{stamp}");
        let error = Cpid::parse(&text).expect_err("non-numeric timestamp");
        let is_timestamp = matches!(
            &error,
            DomainError::MalformedIdentifier { segment, .. } if segment == "timestamp"
        );
        prop_assert!(is_timestamp, "unexpected error: {:?}", error);
    }

    /// Canonical UUIDs parse in any case and render lowercase.
    #[test]
    fn canonical_uuids_parse(text in uuid_text()) {
        let owner = Owner::parse(&text).expect("canonical owner");
        let token = Token::parse(&text).expect("canonical token");
        let lot = LotId::parse(&text).expect("canonical lot");
        let lowercase = text.to_ascii_lowercase();
        prop_assert_eq!(owner.to_string(), lowercase.clone());
        prop_assert_eq!(token.to_string(), lowercase.clone());
        prop_assert_eq!(lot.to_string(), lowercase);
    }

    /// Hyphen-free UUIDs are not the canonical form.
    #[test]
    fn simple_uuids_are_rejected(text in "[0-9a-f]{32}") {
        let error = Owner::parse(&text).expect_err("simple form");
        prop_assert_eq!(error, DomainError::data_format_mismatch("owner", "uuid", text));
    }

    /// Person ids survive surrounding whitespace.
    #[test]
    fn person_ids_are_trimmed(core in "[A-Za-z0-9-]{1,20}", left in " {0,3}", right in "\t{0,3}") {
        let id = PersonId::parse(&format!("{left}{core}{right}")).expect("non-blank id");
        prop_assert_eq!(id.as_str(), core.as_str());
    }
}
