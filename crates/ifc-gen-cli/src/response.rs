// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON bodies printed by the CLI

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ifc_gen_builders::{BatchResult, ElementError};
use serde::Serialize;

pub const MIME_TYPE: &str = "application/octet-stream";

/// Encoded copy of the generated file
#[derive(Debug, Serialize)]
pub struct EncodedFile {
    pub data: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: &'static str,
}

impl EncodedFile {
    pub fn new(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            filename: filename.into(),
            size: bytes.len(),
            mime_type: MIME_TYPE,
        }
    }
}

/// Successful generation
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub file_url: String,
    pub base64: EncodedFile,
    pub created_elements: Vec<String>,
    /// `null` when every element was built
    pub warnings: Option<Vec<String>>,
}

impl GenerateResponse {
    pub fn new(file_url: String, file: EncodedFile, batch: &BatchResult) -> Self {
        let warnings = batch.warning_messages();
        Self {
            status: "success",
            file_url,
            base64: file,
            created_elements: batch.created_identifiers(),
            warnings: (!warnings.is_empty()).then_some(warnings),
        }
    }
}

/// Batch in which no element could be built
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub message: String,
    pub errors: Vec<String>,
}

impl FailureResponse {
    pub fn new(errors: &[ElementError]) -> Self {
        Self {
            message: "No elements could be built.".to_string(),
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Liveness and capability report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub available_types: Vec<String>,
}

impl HealthReport {
    pub fn new(available_types: Vec<String>) -> Self {
        Self {
            status: "healthy",
            available_types,
        }
    }
}
