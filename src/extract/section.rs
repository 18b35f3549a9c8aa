//! Bottom-block sections, keyed by their `h2` title.

use crate::model::EntryKind;

/// Exact paragraph shown by a tool page without category tags.
pub const NO_CATEGORIES: &str = "No categories have been assigned yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    AdditionalInformation,
    References,
    RelatedProjects,
    Projects,
    ToolsUsed,
    RelatedTools,
    SliceAndDice,
    Unrecognized(String),
}

/// Shape of a section listing links to other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Required prefix of an optional paragraph before the list
    pub intro: &'static str,
    /// Required prefix of every link target
    pub path_prefix: &'static str,
}

impl Section {
    pub fn from_title(title: &str) -> Self {
        match title {
            "Additional information" => Section::AdditionalInformation,
            "References" => Section::References,
            "Related projects" => Section::RelatedProjects,
            "Projects" => Section::Projects,
            "Tools used" => Section::ToolsUsed,
            "Related tools" => Section::RelatedTools,
            "Slice & Dice" => Section::SliceAndDice,
            other => Section::Unrecognized(other.to_string()),
        }
    }

    /// Heading text, also the YAML key of relation lists.
    pub fn title(&self) -> &str {
        match self {
            Section::AdditionalInformation => "Additional information",
            Section::References => "References",
            Section::RelatedProjects => "Related projects",
            Section::Projects => "Projects",
            Section::ToolsUsed => "Tools used",
            Section::RelatedTools => "Related tools",
            Section::SliceAndDice => "Slice & Dice",
            Section::Unrecognized(title) => title,
        }
    }

    /// Whether pages of `kind` carry this section.
    pub fn accepted_by(&self, kind: EntryKind) -> bool {
        use Section::*;
        match kind {
            EntryKind::Project => matches!(self, AdditionalInformation | References | ToolsUsed),
            EntryKind::Reference => {
                matches!(self, AdditionalInformation | RelatedProjects | RelatedTools)
            }
            EntryKind::Tool => {
                matches!(self, AdditionalInformation | Projects | References | SliceAndDice)
            }
        }
    }

    /// Link layout for relation sections, `None` for the others.
    pub fn relation(&self) -> Option<Relation> {
        match self {
            Section::References => Some(Relation {
                intro: "Additional information",
                path_prefix: "/references/",
            }),
            Section::RelatedProjects | Section::Projects => Some(Relation {
                intro: "A list of projects",
                path_prefix: "/projects/",
            }),
            Section::ToolsUsed | Section::RelatedTools => Some(Relation {
                intro: "A list of tools",
                path_prefix: "/tools/",
            }),
            _ => None,
        }
    }
}
