// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The document store: what a result points at.
//!
//! The oracle and the trie only know ids. Everything a reader sees (titles,
//! links, section anchors, the component/version a page belongs to) is looked
//! up here after the ranking is done.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DocId, DocRef, Field};

/// A section heading inside a document.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionTitle {
    pub id: u32,
    /// Anchor appended to the document url.
    pub hash: String,
    pub text: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub titles: Vec<SectionTitle>,
    /// Anything else the producer attached; string values are facetable.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(id: impl Into<DocId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            component: None,
            version: None,
            name: None,
            keyword: None,
            text: String::new(),
            titles: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Text of an indexed field, if the document has it.
    pub fn field_text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(self.title.as_str()),
            Field::Text => Some(self.text.as_str()),
            Field::Name => self.name.as_deref(),
            Field::Component => self.component.as_deref(),
            Field::Keyword => self.keyword.as_deref(),
        }
    }

    /// Any string-valued attribute by name, including the extra ones.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(self.title.as_str()),
            "url" => Some(self.url.as_str()),
            "text" => Some(self.text.as_str()),
            "component" => self.component.as_deref(),
            "version" => self.version.as_deref(),
            "name" => self.name.as_deref(),
            "keyword" => self.keyword.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }

    pub fn section(&self, section_id: u32) -> Option<&SectionTitle> {
        self.titles.iter().find(|t| t.id == section_id)
    }

    /// `component/version`, when the document has a component.
    pub fn component_version_key(&self) -> Option<String> {
        let component = self.component.as_deref()?;
        Some(format!(
            "{}/{}",
            component,
            self.version.as_deref().unwrap_or_default()
        ))
    }
}

/// Display metadata for one version of a component.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersion {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_version: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStore {
    pub documents: BTreeMap<DocId, Document>,
    #[serde(default)]
    pub component_versions: BTreeMap<String, ComponentVersion>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, returning the one it replaced.
    pub fn insert(&mut self, doc: Document) -> Option<Document> {
        self.documents.insert(doc.id, doc)
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Resolve a list of ids, skipping unknown ones. Order follows `ids`.
    pub fn resolve<'a>(&'a self, ids: &[DocId]) -> Vec<&'a Document> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Document and section a reference points at.
    ///
    /// The section is `None` when the reference has no section id or the
    /// document no longer has that section.
    pub fn lookup(&self, doc_ref: DocRef) -> Option<(&Document, Option<&SectionTitle>)> {
        let doc = self.get(doc_ref.doc_id)?;
        let section = doc_ref.section_id.and_then(|id| doc.section(id));
        Some((doc, section))
    }

    /// Key and metadata of the document's component version, when known.
    pub fn component_version(&self, doc: &Document) -> Option<(String, &ComponentVersion)> {
        let key = doc.component_version_key()?;
        let cv = self.component_versions.get(&key)?;
        Some((key, cv))
    }
}

// =============================================================================
// FACETS
// =============================================================================

/// `field:value` restriction on results, compared by string equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetFilter {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("facet filter must look like 'field:value', got '{0}'")]
pub struct FacetParseError(pub String);

impl FacetFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        doc.attribute(&self.field) == Some(self.value.as_str())
    }
}

impl FromStr for FacetFilter {
    type Err = FacetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, value)) if !field.is_empty() => Ok(Self::new(field, value)),
            _ => Err(FacetParseError(s.to_string())),
        }
    }
}

impl fmt::Display for FacetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}
