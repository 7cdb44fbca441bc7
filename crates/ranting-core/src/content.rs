//! Content generator: social media poster templates.

use std::collections::BTreeMap;

use ranting_model::ValidationError;

use crate::error::{CoreError, Result};

/// A poster template and the fields its form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [&'static str],
}

pub static CONTENT_TEMPLATES: [ContentTemplate; 4] = [
    ContentTemplate {
        id: "hari-besar",
        name: "Ucapan Hari Besar",
        description: "Poster untuk hari besar Islam/nasional.",
        fields: &["Title", "Date"],
    },
    ContentTemplate {
        id: "laporan-kegiatan",
        name: "Laporan Kegiatan",
        description: "Ringkasan visual kegiatan yang telah dilaksanakan.",
        fields: &["Activity Name", "Date", "Location", "Attendees"],
    },
    ContentTemplate {
        id: "ajakan-rutinan",
        name: "Ajakan Rutinan",
        description: "Pengingat untuk kegiatan rutin seperti Yasinan.",
        fields: &["Activity Name", "Time", "Location"],
    },
    ContentTemplate {
        id: "quotes-kiai",
        name: "Quotes Kiai",
        description: "Kutipan inspiratif dari para ulama NU.",
        fields: &["Quote", "Source"],
    },
];

pub fn find_template(id: &str) -> Result<&'static ContentTemplate> {
    CONTENT_TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CoreError::not_found("template", id))
}

/// Values typed into a template's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    template: &'static ContentTemplate,
    values: BTreeMap<&'static str, String>,
}

impl ContentDraft {
    /// Start an empty draft. Unknown template ids are [`CoreError::NotFound`].
    pub fn new(template_id: &str) -> Result<Self> {
        Ok(Self {
            template: find_template(template_id)?,
            values: BTreeMap::new(),
        })
    }

    pub fn template(&self) -> &'static ContentTemplate {
        self.template
    }

    /// Set a field by its label.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let Some(&label) = self.template.fields.iter().find(|f| **f == field) else {
            return Err(ValidationError::InvalidValue {
                field: "template field",
                value: field.to_string(),
            }
            .into());
        };
        self.values.insert(label, value.into());
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Fields still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.template
            .fields
            .iter()
            .copied()
            .filter(|field| self.get(field).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// `(label, value)` pairs in form order, for the preview.
    pub fn preview(&self) -> Vec<(&'static str, &str)> {
        self.template
            .fields
            .iter()
            .map(|&field| (field, self.get(field).unwrap_or_default()))
            .collect()
    }

    /// File name of the exported poster.
    pub fn export_file_name(&self) -> String {
        format!("poster-{}.png", self.template.id)
    }
}
