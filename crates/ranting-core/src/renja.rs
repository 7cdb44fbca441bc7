//! Renja builder: annual work plans generated from program templates.

use ranting_model::{Month, RenjaItem, RenjaPlan, ValidationError};
use ranting_persistence::{Database, RENJA_PLANS_KEY, SyncedCollection};

use crate::clock::timestamp_id;
use crate::error::{CoreError, Result, load_warning_notice};
use crate::notice::Notice;

/// A program template offered by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenjaTemplate {
    pub key: &'static str,
    pub label: &'static str,
}

impl RenjaTemplate {
    pub fn indicator(&self) -> String {
        format!("Pelaksanaan {}", self.label)
    }
}

pub static RENJA_TEMPLATES: [RenjaTemplate; 5] = [
    RenjaTemplate {
        key: "administrasi",
        label: "Tertib Administrasi (Surat, Keuangan)",
    },
    RenjaTemplate {
        key: "kaderisasi",
        label: "Pendidikan Kader (LKD, Pelatihan)",
    },
    RenjaTemplate {
        key: "dakwah",
        label: "Kegiatan Dakwah (Majelis Taklim, Pengajian)",
    },
    RenjaTemplate {
        key: "sosial",
        label: "Bakti Sosial (Santunan, Kerja Bakti)",
    },
    RenjaTemplate {
        key: "digitalisasi",
        label: "Digitalisasi Ranting (Website, Medsos)",
    },
];

pub fn find_template(key: &str) -> Result<&'static RenjaTemplate> {
    RENJA_TEMPLATES
        .iter()
        .find(|t| t.key == key)
        .ok_or_else(|| CoreError::not_found("program template", key))
}

/// Distribute `selected` over the twelve months round-robin: month `i`
/// gets `selected[i % selected.len()]`.
pub fn generate_plan(
    id: String,
    year: i32,
    selected: &[&RenjaTemplate],
) -> std::result::Result<RenjaPlan, ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NothingSelected { what: "program" });
    }
    let plan = Month::ALL
        .iter()
        .enumerate()
        .map(|(index, &month)| {
            let template = selected[index % selected.len()];
            RenjaItem {
                month,
                program: template.label.to_string(),
                indicator: template.indicator(),
            }
        })
        .collect();
    Ok(RenjaPlan { id, year, plan })
}

/// State of the work-plan view.
#[derive(Debug)]
pub struct RenjaBuilder {
    plans: SyncedCollection<Vec<RenjaPlan>>,
    selected: Vec<&'static RenjaTemplate>,
    generated: Option<RenjaPlan>,
}

impl RenjaBuilder {
    pub fn open(db: &mut Database) -> (Self, Option<Notice>) {
        let (plans, warning) = SyncedCollection::open(db.local(), RENJA_PLANS_KEY, Vec::new());
        let builder = Self {
            plans,
            selected: Vec::new(),
            generated: None,
        };
        (builder, load_warning_notice(warning))
    }

    /// Saved plans, oldest first.
    pub fn plans(&self) -> &[RenjaPlan] {
        self.plans.get()
    }

    /// Selected templates, in the order they were picked.
    pub fn selected(&self) -> &[&'static RenjaTemplate] {
        &self.selected
    }

    /// Pick or unpick a template. Returns whether it is now selected.
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        let template = find_template(key)?;
        if let Some(position) = self.selected.iter().position(|t| t.key == key) {
            self.selected.remove(position);
            Ok(false)
        } else {
            self.selected.push(template);
            Ok(true)
        }
    }

    /// Build a plan for `year` from the current selection.
    pub fn generate(&mut self, year: i32) -> Result<&RenjaPlan> {
        let plan = generate_plan(timestamp_id("renja"), year, &self.selected)?;
        tracing::info!(id = %plan.id, year, templates = self.selected.len(), "work plan generated");
        Ok(&*self.generated.insert(plan))
    }

    pub fn generated(&self) -> Option<&RenjaPlan> {
        self.generated.as_ref()
    }

    /// Append the generated plan to the saved plans, then clear the plan and
    /// the selection.
    ///
    /// When the save fails the plan stays generated, so saving again retries
    /// without adding it twice.
    pub fn save_generated(&mut self, db: &mut Database) -> Result<Notice> {
        let Some(plan) = self.generated.clone() else {
            return Err(ValidationError::MissingField {
                field: "generated plan",
            }
            .into());
        };
        if self.plans().iter().any(|p| p.id == plan.id) {
            self.plans.persist(db.local())?;
        } else {
            self.plans.update(db.local(), |plans| plans.push(plan))?;
        }
        self.generated = None;
        self.selected.clear();
        Ok(Notice::success("Plan saved successfully!"))
    }

    /// Pick up a change made by another context.
    pub fn refresh(&mut self) -> bool {
        self.plans.refresh()
    }
}

/// Table rows (month, program, indicator) for the document renderer.
pub fn plan_rows(plan: &RenjaPlan) -> Vec<[String; 3]> {
    plan.plan
        .iter()
        .map(|item| {
            [
                item.month.to_string(),
                item.program.clone(),
                item.indicator.clone(),
            ]
        })
        .collect()
}

pub fn plan_title(plan: &RenjaPlan) -> String {
    format!("Rencana Kerja Tahunan {}", plan.year)
}

pub fn plan_file_name(plan: &RenjaPlan) -> String {
    format!("renja_{}.pdf", plan.year)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ranting_persistence::MemoryMedium;

    use super::*;

    #[test]
    fn two_templates_alternate_months() {
        let selected = [&RENJA_TEMPLATES[1], &RENJA_TEMPLATES[3]];
        let plan = generate_plan("renja-1".into(), 2025, &selected).unwrap();
        assert_eq!(plan.plan.len(), 12);
        for (index, item) in plan.plan.iter().enumerate() {
            let expected = selected[index % 2];
            assert_eq!(item.program, expected.label);
            assert_eq!(item.month, Month::ALL[index]);
        }
        assert_eq!(
            plan.plan[0].indicator,
            "Pelaksanaan Pendidikan Kader (LKD, Pelatihan)"
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(
            generate_plan("renja-1".into(), 2025, &[]).unwrap_err(),
            ValidationError::NothingSelected { what: "program" }
        );
    }

    #[test]
    fn selection_order_is_click_order() {
        let mut db = Database::open(Arc::new(MemoryMedium::new())).unwrap();
        let (mut builder, _) = RenjaBuilder::open(&mut db);
        builder.toggle("sosial").unwrap();
        builder.toggle("administrasi").unwrap();
        builder.toggle("dakwah").unwrap();
        assert!(!builder.toggle("sosial").unwrap());

        let keys: Vec<_> = builder.selected().iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["administrasi", "dakwah"]);
        assert!(builder.toggle("unknown").is_err());
    }

    #[test]
    fn save_appends_and_clears() {
        let mut db = Database::open(Arc::new(MemoryMedium::new())).unwrap();
        let (mut builder, _) = RenjaBuilder::open(&mut db);
        builder.toggle("kaderisasi").unwrap();
        builder.generate(2025).unwrap();
        builder.save_generated(&mut db).unwrap();

        assert_eq!(builder.plans().len(), 1);
        assert!(builder.generated().is_none());
        assert!(builder.selected().is_empty());
        assert!(builder.save_generated(&mut db).is_err());
    }

    #[test]
    fn retry_after_failed_save_does_not_duplicate() {
        let medium = MemoryMedium::new();
        let mut db = Database::open(Arc::new(medium.clone())).unwrap();
        let (mut builder, _) = RenjaBuilder::open(&mut db);
        builder.toggle("dakwah").unwrap();
        builder.generate(2025).unwrap();

        medium.fail_writes(true);
        assert!(builder.save_generated(&mut db).is_err());
        assert!(builder.generated().is_some());
        medium.fail_writes(false);

        builder.save_generated(&mut db).unwrap();
        assert_eq!(builder.plans().len(), 1);
        let stored = db.local().load(RENJA_PLANS_KEY, Vec::<RenjaPlan>::new());
        assert_eq!(stored.value.len(), 1);
    }
}
