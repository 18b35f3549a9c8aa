use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// The three kinds of catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Project,
    Reference,
    Tool,
}

impl EntryKind {
    /// Harvest and extraction order.
    pub const ALL: [EntryKind; 3] = [EntryKind::Project, EntryKind::Reference, EntryKind::Tool];

    /// Category directory name, also the listing path segment on the site.
    pub fn dir_name(self) -> &'static str {
        match self {
            EntryKind::Project => "projects",
            EntryKind::Reference => "references",
            EntryKind::Tool => "tools",
        }
    }

    /// Class of the `div` holding the heading and description.
    ///
    /// Reference pages reuse the projects layout on the site.
    pub fn container_class(self) -> &'static str {
        match self {
            EntryKind::Project | EntryKind::Reference => "projects",
            EntryKind::Tool => "tools",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Project => "project",
            EntryKind::Reference => "reference",
            EntryKind::Tool => "tool",
        })
    }
}

/// Value of a field following the base ID/Name/Description triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Label present with no trailing text; emitted as YAML null
    Empty,
    Text(String),
    List(Vec<String>),
    /// Relation list of numeric entry IDs
    Ids(Vec<u32>),
}

/// One extracted catalog record.
///
/// Serializes as a flat mapping: `ID`, `Name`, `Description`, then `fields`
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub id: u32,
    pub name: String,
    /// Raw HTML fragment
    pub description: String,
    pub fields: IndexMap<String, FieldValue>,
}

impl Entry {
    pub fn new(kind: EntryKind, id: u32, name: String, description: String) -> Self {
        Self {
            kind,
            id,
            name,
            description,
            fields: IndexMap::new(),
        }
    }

    /// Labels owned by the base record; additional fields may not reuse them.
    pub const BASE_FIELDS: [&'static str; 3] = ["ID", "Name", "Description"];

    /// Renders the record as a block-style YAML document.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.fields.len()))?;
        map.serialize_entry("ID", &self.id)?;
        map.serialize_entry("Name", &self.name)?;
        map.serialize_entry("Description", &self.description)?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
