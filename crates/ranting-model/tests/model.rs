//! Tests for ranting-model types.

use proptest::prelude::*;
use ranting_model::{
    ArchiveCategory, ArchiveFile, ImpactData, Kader, Month, ProgramStatus, Report,
    ValidationError, default_programs, month_key, month_key_for_name,
};

#[test]
fn report_serializes_with_stored_field_names() {
    let report = Report {
        id: "2024-3".to_string(),
        month: Month::March,
        year: 2024,
        activity_name: "Yasinan".to_string(),
        photos: vec![],
        attendees: 40,
        involved_kader: 6,
        notes: String::new(),
    };
    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["activityName"], "Yasinan");
    assert_eq!(json["involvedKader"], 6);
    assert_eq!(json["month"], "Maret");
    assert_eq!(report.derived_id(), "2024-3");
}

#[test]
fn archive_file_uses_type_and_created_at() {
    let file = ArchiveFile {
        id: "file-1".to_string(),
        name: "sk.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        size: 2048,
        category: ArchiveCategory::Letter,
        data: "data:application/pdf;base64,".to_string(),
        created_at: 1,
    };
    let json = serde_json::to_value(&file).expect("serialize file");
    assert_eq!(json["type"], "application/pdf");
    assert_eq!(json["createdAt"], 1);
    assert_eq!(json["category"], "Surat");
    assert_eq!(file.size_kb(), "2.00 KB");
}

#[test]
fn impact_reads_existing_json() {
    let raw = r#"{"id":"2024-5","month":"Mei","year":2024,"activities":3,"attendees":120,
        "activeKader":9,"socialFund":1500000,"programProgress":40}"#;
    let entry: ImpactData = serde_json::from_str(raw).expect("parse impact");
    assert_eq!(entry.month, Month::May);
    assert_eq!(entry.social_fund, 1_500_000);
    assert_eq!(entry.derived_id(), entry.id);
}

#[test]
fn impact_progress_over_hundred_is_rejected() {
    let entry = ImpactData {
        id: "2024-1".to_string(),
        month: Month::January,
        year: 2024,
        activities: 0,
        attendees: 0,
        active_kader: 0,
        social_fund: 0,
        program_progress: 101,
    };
    assert!(matches!(
        entry.validate(),
        Err(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn kader_requires_name() {
    let kader = Kader {
        name: "  ".to_string(),
        ..Kader::default()
    };
    assert_eq!(
        kader.validate(),
        Err(ValidationError::MissingField { field: "name" })
    );
}

#[test]
fn seed_programs_cover_each_status() {
    let programs = default_programs();
    assert_eq!(programs.len(), 3);
    for status in ProgramStatus::ALL {
        assert!(programs.iter().any(|p| p.status == status));
    }
    assert!(programs.iter().all(|p| p.validate().is_ok()));
}

#[test]
fn month_key_examples() {
    assert_eq!(month_key_for_name(2024, "Maret").unwrap(), "2024-3");
    assert_eq!(month_key_for_name(2024, "Desember").unwrap(), "2024-12");
}

proptest! {
    #[test]
    fn month_key_is_total_and_unpadded(year in 1900i32..2200, index in 0usize..12) {
        let month = Month::from_index(index).unwrap();
        let key = month_key(year, month);
        prop_assert_eq!(&key, &format!("{}-{}", year, index + 1));
        prop_assert_eq!(month_key_for_name(year, month.name()).unwrap(), key);
    }
}
