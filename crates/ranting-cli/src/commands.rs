use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ranting_core::clock::current_year;
use ranting_core::{
    Archive, ArchiveFilter, CONTENT_TEMPLATES, ContentDraft, CoreError, ImpactDashboard,
    ImpactInput, KaderDraft, KaderFilter, KaderMap, Notice, ProgramDraft, ProgramFilter,
    ProgramTracker, RENJA_TEMPLATES, RenjaBuilder, ReportBuilder, ReportDraft, UploadRequest,
    YearlyReport,
};
use ranting_model::{Kader, ValidationError};
use ranting_persistence::{Database, PersistenceError};

use crate::cli::{
    ArchiveCommand, Command, ContentCommand, ImpactCommand, ImpactSaveArgs, KaderCommand,
    KaderEditArgs, KaderFilterArgs, ProgramCommand, RenjaCommand, ReportCommand, ReportSaveArgs,
};
use crate::summary::{
    archive_table, content_preview_table, content_template_table, impact_table, kader_table,
    notice_line, program_category_table, program_table, renja_list_table, renja_plan_table,
    renja_template_table, report_table,
};

/// Open the directory-backed database under `data_dir`.
pub fn open_database(data_dir: &Path) -> Result<Database> {
    Database::open_dir(data_dir)
        .with_context(|| format!("open data directory {}", data_dir.display()))
}

/// Run one command against `db`, writing tables and notices to `out`.
pub fn run(command: Command, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Program(command) => run_program(command, db, out),
        Command::Kader(command) => run_kader(command, db, out),
        Command::Archive(command) => run_archive(command, db, out),
        Command::Report(command) => run_report(command, db, out),
        Command::Renja(command) => run_renja(command, db, out),
        Command::Impact(command) => run_impact(command, db, out),
        Command::Content(command) => run_content(command, out),
    }
}

/// The notice for a failed command, when the failure came from a store or a form.
pub fn error_notice(error: &anyhow::Error) -> Option<Notice> {
    if let Some(error) = error.downcast_ref::<CoreError>() {
        return Some(error.notice());
    }
    if let Some(error) = error.downcast_ref::<PersistenceError>() {
        return Some(Notice::error(error.user_message()).with_suggestion(error.suggestion()));
    }
    error
        .downcast_ref::<ValidationError>()
        .map(|error| Notice::error(error.user_message()))
}

fn print_notice(out: &mut dyn Write, notice: &Notice) -> Result<()> {
    writeln!(out, "{}", notice_line(notice))?;
    Ok(())
}

fn print_warning(out: &mut dyn Write, warning: Option<Notice>) -> Result<()> {
    match warning {
        Some(notice) => print_notice(out, &notice),
        None => Ok(()),
    }
}

fn print_export(out: &mut dyn Write, path: Option<PathBuf>) -> Result<()> {
    let notice = match path {
        Some(path) => Notice::success(format!("Exported to {}.", path.display())),
        None => Notice::info("Nothing to export."),
    };
    print_notice(out, &notice)
}

fn run_program(command: ProgramCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    let (mut tracker, warning) = ProgramTracker::open(db);
    print_warning(out, warning)?;
    match command {
        ProgramCommand::List { category, status } => {
            let filter = ProgramFilter { category, status };
            writeln!(out, "{}", program_table(&tracker.filter(&filter)))?;
            writeln!(out, "{}", program_category_table(&tracker.by_category()))?;
        }
        ProgramCommand::Add(args) => {
            let draft = ProgramDraft {
                title: args.title,
                category: args.category,
                status: args.status,
                description: args.description,
                pic: args.pic,
                deadline: args.deadline,
            };
            let outcome = tracker.add(db, draft).context("add program")?;
            writeln!(out, "{}", program_table(&[&outcome.value]))?;
            print_notice(out, &outcome.notice)?;
        }
        ProgramCommand::Status { ids, to } => {
            let notice = if let [id] = ids.as_slice() {
                tracker.set_status(db, id, to)
            } else {
                for id in &ids {
                    tracker.find(id).context("select program")?;
                    tracker.selection.toggle(id);
                }
                tracker.bulk_set_status(db, to)
            }
            .context("change program status")?;
            print_notice(out, &notice)?;
        }
        ProgramCommand::Delete { id } => {
            let notice = tracker.delete(db, &id).context("delete program")?;
            print_notice(out, &notice)?;
        }
        ProgramCommand::Export { status, out: dir } => {
            let path = tracker
                .export_csv(&dir, status)
                .context("export programs")?;
            print_export(out, path)?;
        }
    }
    Ok(())
}

fn kader_filter(args: KaderFilterArgs) -> KaderFilter {
    KaderFilter {
        search: args.search,
        position: args.position,
        interests: args.interests,
        expertise: args.expertise,
    }
}

fn apply_edit(kader: &mut Kader, edit: KaderEditArgs) {
    let KaderEditArgs {
        name,
        position,
        expertise,
        interests,
        phone,
        availability,
    } = edit;
    let fields = [
        (&mut kader.name, name),
        (&mut kader.position, position),
        (&mut kader.expertise, expertise),
        (&mut kader.interests, interests),
        (&mut kader.phone, phone),
        (&mut kader.availability, availability),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
}

fn run_kader(command: KaderCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    let mut map = KaderMap::open(db).context("load members")?;
    match command {
        KaderCommand::List(filter) => {
            map.filter = kader_filter(filter);
            writeln!(out, "{}", kader_table(&map.filtered()))?;
        }
        KaderCommand::Add(fields) => {
            let draft = KaderDraft {
                name: fields.name,
                position: fields.position,
                expertise: fields.expertise,
                interests: fields.interests,
                phone: fields.phone,
                availability: fields.availability,
            };
            let outcome = map.add(db, draft).context("add member")?;
            writeln!(out, "{}", kader_table(&[&outcome.value]))?;
            print_notice(out, &outcome.notice)?;
        }
        KaderCommand::Edit { id, fields } => {
            let mut kader = map.load_for_edit(db, &id).context("load member")?;
            apply_edit(&mut kader, fields);
            let notice = map.save_edit(db, kader).context("save member")?;
            print_notice(out, &notice)?;
        }
        KaderCommand::Delete { id } => {
            let notice = map.delete(db, &id).context("delete member")?;
            print_notice(out, &notice)?;
        }
        KaderCommand::Export { filter, out: dir } => {
            map.filter = kader_filter(filter);
            let path = map.export_csv(&dir).context("export members")?;
            print_export(out, path)?;
        }
    }
    Ok(())
}

/// MIME type from a file extension, empty when unknown.
fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "",
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn run_archive(command: ArchiveCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    let mut archive = Archive::open(db).context("load archive")?;
    match command {
        ArchiveCommand::List { search, category } => {
            archive.filter = ArchiveFilter { search, category };
            writeln!(out, "{}", archive_table(&archive.filtered()))?;
        }
        ArchiveCommand::Upload { path, category } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let request = UploadRequest {
                name,
                mime: guess_mime(&path).to_string(),
                bytes: read_file(&path)?,
                category,
            };
            let outcome = archive.upload(db, request).context("upload file")?;
            writeln!(out, "{}", archive_table(&[&outcome.value]))?;
            print_notice(out, &outcome.notice)?;
        }
        ArchiveCommand::Download { id, out: dir } => {
            let download = archive.download(db, &id).context("download file")?;
            let target = dir.join(&download.file_name);
            fs::write(&target, &download.bytes)
                .with_context(|| format!("write {}", target.display()))?;
            tracing::info!(%id, path = %target.display(), "file downloaded");
            print_notice(
                out,
                &Notice::success(format!("Saved {}.", target.display())),
            )?;
        }
        ArchiveCommand::Delete { id } => {
            let notice = archive.delete(db, &id).context("delete file")?;
            print_notice(out, &notice)?;
        }
    }
    Ok(())
}

fn report_draft(args: ReportSaveArgs) -> Result<ReportDraft> {
    let mut draft = ReportDraft {
        month: args.month,
        year: args.year,
        activity_name: args.activity_name,
        attendees: args.attendees,
        involved_kader: args.involved_kader,
        notes: args.notes,
        photos: Vec::new(),
    };
    for path in &args.photos {
        let bytes = read_file(path)?;
        draft
            .attach_photo(guess_mime(path), &bytes)
            .map_err(CoreError::from)
            .context("attach photo")?;
    }
    Ok(draft)
}

fn run_report(command: ReportCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    match command {
        ReportCommand::Save(args) => {
            let mut builder = ReportBuilder::open(db).context("load reports")?;
            let draft = report_draft(args)?;
            let outcome = builder.save(db, &draft).context("save report")?;
            writeln!(out, "{}", report_table(std::slice::from_ref(&outcome.value)))?;
            print_notice(out, &outcome.notice)?;
        }
        ReportCommand::List => {
            let builder = ReportBuilder::open(db).context("load reports")?;
            writeln!(out, "{}", report_table(builder.reports()))?;
        }
        ReportCommand::Year { year } => {
            let yearly = YearlyReport::generate(db, year).context("build yearly report")?;
            if let Some(notice) = yearly.notice() {
                return print_notice(out, &notice);
            }
            for line in yearly.lines() {
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "Total: {} kegiatan, {} jamaah, {} kader",
                yearly.summary.reports, yearly.summary.attendees, yearly.summary.involved_kader
            )?;
        }
        ReportCommand::Delete { id } => {
            let mut builder = ReportBuilder::open(db).context("load reports")?;
            let notice = builder.delete(db, &id).context("delete report")?;
            print_notice(out, &notice)?;
        }
    }
    Ok(())
}

fn run_renja(command: RenjaCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    let (mut builder, warning) = RenjaBuilder::open(db);
    print_warning(out, warning)?;
    match command {
        RenjaCommand::Generate { keys, year, save } => {
            for key in &keys {
                builder.toggle(key).context("select program template")?;
            }
            let year = year.unwrap_or_else(current_year);
            let plan = builder.generate(year).context("generate work plan")?;
            writeln!(out, "{}", renja_plan_table(plan))?;
            if save {
                let notice = builder.save_generated(db).context("save work plan")?;
                print_notice(out, &notice)?;
            }
        }
        RenjaCommand::List => {
            writeln!(out, "{}", renja_list_table(builder.plans()))?;
        }
        RenjaCommand::Templates => {
            writeln!(out, "{}", renja_template_table(&RENJA_TEMPLATES))?;
        }
    }
    Ok(())
}

fn impact_input(args: ImpactSaveArgs) -> ImpactInput {
    ImpactInput {
        month: args.month,
        year: args.year,
        activities: args.activities,
        attendees: args.attendees,
        active_kader: args.active_kader,
        social_fund: args.social_fund,
        program_progress: args.program_progress,
    }
}

fn run_impact(command: ImpactCommand, db: &mut Database, out: &mut dyn Write) -> Result<()> {
    let (mut dashboard, warning) = ImpactDashboard::open(db);
    print_warning(out, warning)?;
    match command {
        ImpactCommand::Save(args) => {
            dashboard.input = impact_input(args);
            let notice = dashboard.save(db).context("save impact data")?;
            print_notice(out, &notice)?;
        }
        ImpactCommand::Summary => {
            let table = impact_table(&dashboard.chronological(), dashboard.summary());
            writeln!(out, "{table}")?;
        }
    }
    Ok(())
}

fn run_content(command: ContentCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        ContentCommand::List => {
            writeln!(out, "{}", content_template_table(&CONTENT_TEMPLATES))?;
        }
        ContentCommand::Show { id, values } => {
            let mut draft = ContentDraft::new(&id).context("open template")?;
            for (label, value) in values {
                draft.set(&label, value).context("fill template")?;
            }
            writeln!(out, "{}", draft.template().name)?;
            writeln!(out, "{}", content_preview_table(&draft.preview()))?;
            let missing = draft.missing_fields();
            let notice = if missing.is_empty() {
                Notice::success(format!("Ready to export as {}.", draft.export_file_name()))
            } else {
                Notice::info(format!("Still empty: {}.", missing.join(", ")))
            };
            print_notice(out, &notice)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime(Path::new("surat.PDF")), "application/pdf");
        assert_eq!(guess_mime(Path::new("foto.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("README")), "");
    }

    #[test]
    fn edit_only_touches_given_fields() {
        let mut kader = Kader {
            name: "Ahmad".to_string(),
            phone: "0812".to_string(),
            ..Kader::default()
        };
        apply_edit(
            &mut kader,
            KaderEditArgs {
                name: None,
                position: Some("Ketua".to_string()),
                expertise: None,
                interests: None,
                phone: None,
                availability: None,
            },
        );
        assert_eq!(kader.name, "Ahmad");
        assert_eq!(kader.position, "Ketua");
        assert_eq!(kader.phone, "0812");
    }

    #[test]
    fn core_errors_keep_their_notice_through_context() {
        let error = anyhow::Error::new(CoreError::not_found("member", "kader-1"))
            .context("load member");
        let notice = error_notice(&error).unwrap();
        assert_eq!(notice.message, "Member not found.");
        assert!(error_notice(&anyhow::anyhow!("disk on fire")).is_none());
    }
}
