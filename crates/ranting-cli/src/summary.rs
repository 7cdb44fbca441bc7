//! Terminal tables for each view.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ranting_core::archive::describe;
use ranting_core::renja::plan_title;
use ranting_core::{ContentTemplate, ImpactSummary, Notice, RenjaTemplate, format_rupiah};
use ranting_model::{
    ArchiveFile, ImpactData, Kader, ProgramCategory, ProgramItem, ProgramStatus, RenjaPlan,
    Report,
};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn right_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn status_cell(status: ProgramStatus) -> Cell {
    let color = match status {
        ProgramStatus::NotStarted => Color::DarkGrey,
        ProgramStatus::InProgress => Color::Yellow,
        ProgramStatus::Completed => Color::Green,
    };
    Cell::new(status).fg(color)
}

fn category_cell(category: ProgramCategory) -> Cell {
    Cell::new(category).add_attribute(Attribute::Bold)
}

/// One-line notice, prefixed with its level.
pub fn notice_line(notice: &Notice) -> String {
    format!("{}: {notice}", notice.level.label())
}

pub fn program_table(programs: &[&ProgramItem]) -> Table {
    let mut table = styled_table(&["ID", "Title", "Category", "Status", "PIC", "Deadline"]);
    for program in programs {
        table.add_row(vec![
            dim_cell(&program.id),
            Cell::new(&program.title),
            category_cell(program.category),
            status_cell(program.status),
            Cell::new(&program.pic),
            Cell::new(&program.deadline),
        ]);
    }
    table
}

/// Per-category counts, in the fixed category order.
pub fn program_category_table(groups: &[(ProgramCategory, Vec<&ProgramItem>)]) -> Table {
    let mut table = styled_table(&["Category", "Programs", "Completed"]);
    for (category, items) in groups {
        let completed = items
            .iter()
            .filter(|p| p.status == ProgramStatus::Completed)
            .count();
        table.add_row(vec![
            category_cell(*category),
            right_cell(items.len()),
            right_cell(completed),
        ]);
    }
    table
}

pub fn kader_table(members: &[&Kader]) -> Table {
    let mut table = styled_table(&[
        "ID",
        "Name",
        "Position",
        "Expertise",
        "Interests",
        "Availability",
    ]);
    for kader in members {
        table.add_row(vec![
            dim_cell(&kader.id),
            Cell::new(&kader.name),
            Cell::new(&kader.position),
            Cell::new(&kader.expertise),
            Cell::new(&kader.interests),
            Cell::new(&kader.availability),
        ]);
    }
    table
}

pub fn archive_table(files: &[&ArchiveFile]) -> Table {
    let mut table = styled_table(&["ID", "Name", "Details"]);
    for file in files {
        table.add_row(vec![
            dim_cell(&file.id),
            Cell::new(&file.name),
            Cell::new(describe(file)),
        ]);
    }
    table
}

pub fn report_table(reports: &[Report]) -> Table {
    let mut table = styled_table(&["ID", "Period", "Activity", "Attendees", "Kader", "Photos"]);
    for report in reports {
        table.add_row(vec![
            dim_cell(&report.id),
            Cell::new(format!("{} {}", report.month, report.year)),
            Cell::new(&report.activity_name),
            right_cell(report.attendees),
            right_cell(report.involved_kader),
            right_cell(report.photos.len()),
        ]);
    }
    table
}

pub fn renja_plan_table(plan: &RenjaPlan) -> Table {
    let mut table = styled_table(&["Month", "Program", "Indicator"]);
    for item in &plan.plan {
        table.add_row(vec![
            Cell::new(item.month),
            Cell::new(&item.program),
            Cell::new(&item.indicator),
        ]);
    }
    table
}

pub fn renja_list_table(plans: &[RenjaPlan]) -> Table {
    let mut table = styled_table(&["ID", "Title", "Months"]);
    for plan in plans {
        table.add_row(vec![
            dim_cell(&plan.id),
            Cell::new(plan_title(plan)),
            right_cell(plan.plan.len()),
        ]);
    }
    table
}

pub fn renja_template_table(templates: &[RenjaTemplate]) -> Table {
    let mut table = styled_table(&["Key", "Program"]);
    for template in templates {
        table.add_row(vec![Cell::new(template.key), Cell::new(template.label)]);
    }
    table
}

pub fn impact_table(rows: &[&ImpactData], summary: ImpactSummary) -> Table {
    let mut table = styled_table(&[
        "Period",
        "Activities",
        "Attendees",
        "Active Kader",
        "Social Fund",
        "Progress",
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(format!("{} {}", row.month, row.year)),
            right_cell(row.activities),
            right_cell(row.attendees),
            right_cell(row.active_kader),
            right_cell(format_rupiah(row.social_fund)),
            right_cell(format!("{}%", row.program_progress)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        right_cell(summary.total_activities).add_attribute(Attribute::Bold),
        right_cell(summary.total_attendees).add_attribute(Attribute::Bold),
        dim_cell("-"),
        right_cell(format_rupiah(summary.total_social_fund)).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

pub fn content_template_table(templates: &[ContentTemplate]) -> Table {
    let mut table = styled_table(&["ID", "Name", "Description", "Fields"]);
    for template in templates {
        table.add_row(vec![
            Cell::new(template.id),
            Cell::new(template.name),
            Cell::new(template.description),
            dim_cell(template.fields.join(", ")),
        ]);
    }
    table
}

pub fn content_preview_table(preview: &[(&str, &str)]) -> Table {
    let mut table = styled_table(&["Field", "Value"]);
    for (label, value) in preview {
        let value_cell = if value.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(label), value_cell]);
    }
    table
}

#[cfg(test)]
mod tests {
    use ranting_model::default_programs;

    use super::*;

    #[test]
    fn notice_line_has_level_prefix() {
        assert_eq!(notice_line(&Notice::success("Data saved!")), "success: Data saved!");
        let error = Notice::error("Title is required.").with_suggestion(Some("Fill it in.".into()));
        assert_eq!(notice_line(&error), "error: Title is required. Fill it in.");
    }

    #[test]
    fn program_table_has_row_per_program() {
        let programs = default_programs();
        let refs: Vec<&ProgramItem> = programs.iter().collect();
        let mut table = program_table(&refs);
        assert_eq!(table.row_iter().count(), 3);
        assert_eq!(table.column_count(), 6);
    }

    #[test]
    fn impact_table_appends_total_row() {
        let table = impact_table(&[], ImpactSummary::default());
        assert_eq!(table.row_iter().count(), 1);
    }
}
