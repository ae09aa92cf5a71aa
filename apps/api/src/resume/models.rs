use serde::{Deserialize, Serialize};

/// One `(section, subsection, content)` unit of resume data.
///
/// Rows stay string-typed so that user files with unknown sections survive a
/// round trip through import/export; `Section` is the typed view used by the
/// pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRow {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub subsection: String,
    #[serde(default)]
    pub content: String,
}

impl ResumeRow {
    pub fn new(
        section: impl Into<String>,
        subsection: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            subsection: subsection.into(),
            content: content.into(),
        }
    }

    /// The sentinel row returned when oracle output cannot be parsed.
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::new(Section::Error.as_str(), "parse_fail", message)
    }

    pub fn is_blank(&self) -> bool {
        self.section.trim().is_empty()
            && self.subsection.trim().is_empty()
            && self.content.trim().is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.section == Section::Error.as_str()
    }

    pub fn in_section(&self, section: Section) -> bool {
        self.section == section.as_str()
    }
}

/// Top-level resume categories, in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PersonalInfo,
    ProfessionalSummary,
    TechnicalSkills,
    ProfessionalExperience,
    Education,
    Certifications,
    Projects,
    Error,
}

impl Section {
    /// Canonical order used by the sanitizer and the PDF renderer.
    pub const ORDER: [Section; 7] = [
        Section::PersonalInfo,
        Section::ProfessionalSummary,
        Section::TechnicalSkills,
        Section::ProfessionalExperience,
        Section::Education,
        Section::Certifications,
        Section::Projects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal_info",
            Section::ProfessionalSummary => "professional_summary",
            Section::TechnicalSkills => "technical_skills",
            Section::ProfessionalExperience => "professional_experience",
            Section::Education => "education",
            Section::Certifications => "certifications",
            Section::Projects => "projects",
            Section::Error => "error",
        }
    }

    /// Resolves a free-form label (case-insensitive, with the short aliases the
    /// oracle tends to use) to a known section.
    pub fn from_label(label: &str) -> Option<Section> {
        match canonical_label(label).as_str() {
            "personal_info" => Some(Section::PersonalInfo),
            "professional_summary" => Some(Section::ProfessionalSummary),
            "technical_skills" => Some(Section::TechnicalSkills),
            "professional_experience" => Some(Section::ProfessionalExperience),
            "education" => Some(Section::Education),
            "certifications" => Some(Section::Certifications),
            "projects" => Some(Section::Projects),
            "error" => Some(Section::Error),
            _ => None,
        }
    }

    /// Display title, e.g. `professional_experience` → `Professional Experience`.
    pub fn title(self) -> String {
        title_case(self.as_str())
    }
}

/// Lower-cases a section label, turns spaces and hyphens into underscores and
/// applies the singular aliases.
pub fn canonical_label(label: &str) -> String {
    let normalized: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();

    match normalized.as_str() {
        "experience" => "professional_experience".to_string(),
        "certification" => "certifications".to_string(),
        "project" => "projects".to_string(),
        _ => normalized,
    }
}

pub fn title_case(label: &str) -> String {
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Contact fields that are always sourced from the stored profile.
pub const CONTACT_FIELDS: [&str; 7] = [
    "name",
    "location",
    "email",
    "phone",
    "linkedin",
    "github",
    "portfolio",
];

pub const TARGET_ROLES: &str = "target_roles";
pub const SUMMARY: &str = "summary";

pub const SKILL_CATEGORIES: [&str; 4] = [
    "programming_languages",
    "libraries_frameworks",
    "tools_platforms",
    "other_skills",
];

/// The stored contact profile of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub portfolio: String,
}

impl Profile {
    /// Looks up a contact field by its `personal_info` subsection name.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "location" => &self.location,
            "email" => &self.email,
            "phone" => &self.phone,
            "linkedin" => &self.linkedin,
            "github" => &self.github,
            "portfolio" => &self.portfolio,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// File-safe identifier derived from the display name.
    pub fn id(&self) -> String {
        self.name.trim().to_lowercase().replace(' ', "_")
    }
}
