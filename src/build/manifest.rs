// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `manifest.json`: which document files make up a corpus.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::oracle::{default_fields, FieldSpec};
use crate::store::ComponentVersion;

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub version: u32,
    /// Document files, relative to the manifest.
    pub documents: Vec<String>,
    #[serde(default)]
    pub component_versions: BTreeMap<String, ComponentVersion>,
    /// Indexed fields and their boosts.
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
}
