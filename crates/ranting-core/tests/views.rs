use std::sync::Arc;

use proptest::prelude::*;
use ranting_core::{
    ImpactDashboard, ImpactInput, ProgramDraft, ProgramTracker, ReportBuilder, ReportDraft,
    to_csv,
};
use ranting_model::{Month, ProgramCategory, ProgramStatus, default_programs};
use ranting_persistence::{Database, MemoryMedium};

fn database(medium: &MemoryMedium) -> Database {
    Database::open(Arc::new(medium.clone())).expect("open database")
}

#[test]
fn default_programs_export_snapshot() {
    let csv = to_csv(&default_programs())
        .expect("render csv")
        .expect("non-empty");
    insta::assert_snapshot!(csv, @r"
    id,title,category,status,description,pic,deadline
    prog-1,Rapat Anggota Tahunan,Administrasi,Completed,...,Ketua,2024-03-31
    prog-2,Latihan Kader Dasar,Kaderisasi,In Progress,...,Sekretaris,2024-06-30
    prog-3,Website Ranting,Digitalisasi,Not Started,...,Bendahara,2024-09-30
    ");
}

#[test]
fn program_saved_in_one_tab_appears_in_another() {
    let shared = MemoryMedium::new();
    let mut tab_a = database(&shared);
    let mut tab_b = database(&shared);
    let (mut tracker_a, _) = ProgramTracker::open(&mut tab_a);
    let (mut tracker_b, _) = ProgramTracker::open(&mut tab_b);

    tracker_a
        .add(
            &mut tab_a,
            ProgramDraft {
                title: "Santunan Yatim".to_string(),
                category: ProgramCategory::Social,
                ..ProgramDraft::default()
            },
        )
        .expect("add program");

    tab_b.local().sync();
    assert!(tracker_b.refresh());
    assert_eq!(tracker_b.programs().len(), 4);
    assert_eq!(tracker_b.programs()[3].title, "Santunan Yatim");
}

#[test]
fn added_program_is_stored_as_json_array() {
    let medium = MemoryMedium::new();
    let mut db = database(&medium);
    let (mut tracker, _) = ProgramTracker::open(&mut db);
    tracker
        .add(
            &mut db,
            ProgramDraft {
                title: "Santunan Yatim".to_string(),
                category: ProgramCategory::Social,
                ..ProgramDraft::default()
            },
        )
        .expect("add program");

    let raw = ranting_persistence::StorageMedium::read(&medium, "local/programs")
        .expect("read blob")
        .expect("blob present");
    let stored: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let items = stored.as_array().expect("array of programs");
    assert_eq!(items.len(), 4);
    assert_eq!(items[3]["title"], "Santunan Yatim");
    assert_eq!(items[3]["category"], "Sosial");
    assert_eq!(items[0]["id"], "prog-1");
}

#[test]
fn external_change_overwrites_unsaved_status_edit() {
    let shared = MemoryMedium::new();
    let mut tab_a = database(&shared);
    let mut tab_b = database(&shared);
    let (mut tracker_a, _) = ProgramTracker::open(&mut tab_a);
    let (mut tracker_b, _) = ProgramTracker::open(&mut tab_b);

    shared.fail_writes(true);
    let err = tracker_b
        .set_status(&mut tab_b, "prog-3", ProgramStatus::Completed)
        .expect_err("write rejected");
    assert!(err.notice().is_error());
    assert!(tracker_b.has_unsaved_changes());
    shared.fail_writes(false);

    tracker_a
        .set_status(&mut tab_a, "prog-1", ProgramStatus::NotStarted)
        .expect("save in tab a");
    tab_b.local().sync();
    tracker_b.refresh();

    assert!(!tracker_b.has_unsaved_changes());
    let prog_3 = tracker_b.find("prog-3").expect("prog-3");
    assert_eq!(prog_3.status, ProgramStatus::NotStarted);
    let prog_1 = tracker_b.find("prog-1").expect("prog-1");
    assert_eq!(prog_1.status, ProgramStatus::NotStarted);
}

#[test]
fn malformed_programs_fall_back_to_defaults_with_notice() {
    let medium = MemoryMedium::new();
    ranting_persistence::StorageMedium::write(&medium, "local/programs", "[{oops")
        .expect("seed corrupt value");
    let mut db = database(&medium);

    let (tracker, notice) = ProgramTracker::open(&mut db);
    assert_eq!(tracker.programs().len(), 3);
    let notice = notice.expect("parse warning");
    assert!(notice.message.contains("\"programs\""));
    assert_eq!(
        ranting_persistence::StorageMedium::read(&medium, "local/programs")
            .expect("read")
            .as_deref(),
        Some("[{oops")
    );
}

#[test]
fn failed_report_save_keeps_list() {
    let medium = MemoryMedium::new();
    let mut db = database(&medium);
    let mut builder = ReportBuilder::open(&db).expect("open builder");
    let draft = ReportDraft {
        month: Month::June,
        year: 2024,
        activity_name: "Istighosah".to_string(),
        ..ReportDraft::default()
    };
    builder.save(&mut db, &draft).expect("first save");

    medium.fail_writes(true);
    let changed = ReportDraft {
        activity_name: "Changed".to_string(),
        ..draft
    };
    let err = builder.save(&mut db, &changed).expect_err("rejected");
    assert!(err.notice().is_error());
    assert_eq!(builder.reports()[0].activity_name, "Istighosah");
}

proptest! {
    #[test]
    fn impact_save_replaces_or_appends(
        entries in prop::collection::vec((2020i32..2026, 0usize..12), 1..20)
    ) {
        let mut db = database(&MemoryMedium::new());
        let (mut dashboard, _) = ImpactDashboard::open(&mut db);
        let mut seen = std::collections::BTreeSet::new();
        for (year, month_index) in entries {
            let month = Month::ALL[month_index];
            dashboard.input = ImpactInput {
                month,
                year,
                activities: 1,
                attendees: 1,
                active_kader: 1,
                social_fund: 10,
                program_progress: 10,
            };
            let before = dashboard.rows().len();
            dashboard.save(&mut db).expect("save");
            let expected = if seen.insert((year, month_index)) { before + 1 } else { before };
            prop_assert_eq!(dashboard.rows().len(), expected);
        }
    }
}
