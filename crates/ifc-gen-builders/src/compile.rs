// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch compilation
//!
//! Bootstraps a fresh document, then builds every element in request
//! order. A failing element is recorded and skipped; the batch fails only
//! when bootstrapping fails or no element was created.

use crate::error::{CompileError, ElementError};
use crate::registry::{global_registry, BuilderRegistry};
use ifc_gen_document::{bootstrap, SpatialDocument, SpatialHierarchy};
use ifc_gen_model::{ElementPayload, EntityId, EntityResolver, ProjectMetadata};

/// One successfully built payload
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedElement {
    pub index: usize,
    /// Upper-case type tag
    pub element_type: String,
    /// Name of the first product, or `element_<index>`
    pub name: String,
    /// Every product created for the payload
    pub products: Vec<EntityId>,
}

impl CreatedElement {
    /// `<TYPE>:<name>`
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.element_type, self.name)
    }
}

/// Outcome of a batch with at least one created element
#[derive(Debug)]
pub struct BatchResult {
    pub document: SpatialDocument,
    pub hierarchy: SpatialHierarchy,
    pub created: Vec<CreatedElement>,
    /// Failures of elements that were skipped
    pub warnings: Vec<ElementError>,
}

impl BatchResult {
    /// `<TYPE>:<name>` per created element
    pub fn created_identifiers(&self) -> Vec<String> {
        self.created.iter().map(CreatedElement::identifier).collect()
    }

    /// Warning strings, `Element #<i> (<TYPE>): <message>`
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Total products across all created elements
    pub fn product_count(&self) -> usize {
        self.created.iter().map(|c| c.products.len()).sum()
    }
}

/// Compile a batch with the process-wide registry
pub fn compile(
    elements: &[ElementPayload],
    metadata: &ProjectMetadata,
) -> Result<BatchResult, CompileError> {
    compile_with(global_registry(), elements, metadata)
}

/// Compile a batch with an explicit registry
pub fn compile_with(
    registry: &BuilderRegistry,
    elements: &[ElementPayload],
    metadata: &ProjectMetadata,
) -> Result<BatchResult, CompileError> {
    let scaffold = bootstrap::from_metadata(metadata).map_err(CompileError::BootstrapFailure)?;
    let mut document = scaffold.document;
    let storey = scaffold.hierarchy.storey;

    let mut created = Vec::new();
    let mut errors = Vec::new();

    for (index, payload) in elements.iter().enumerate() {
        let element_type = payload.tag().to_uppercase();
        let result = registry
            .lookup(&element_type)
            .and_then(|builder| builder.build(&mut document, scaffold.body_context, storey, payload));

        match result {
            Ok(products) => {
                let name = products
                    .first()
                    .and_then(|id| document.get(*id))
                    .and_then(|e| e.name())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("element_{}", index));
                created.push(CreatedElement {
                    index,
                    element_type,
                    name,
                    products,
                });
            }
            Err(e) => {
                let error = ElementError::new(index, element_type, &e);
                log::log!(error.kind.log_level(), "{}", error);
                errors.push(error);
            }
        }
    }

    if created.is_empty() {
        log::error!("No elements could be built ({} errors)", errors.len());
        return Err(CompileError::BatchEmpty { errors });
    }

    log::info!(
        "Compiled {} of {} elements ({} products, {} entities)",
        created.len(),
        elements.len(),
        created.iter().map(|c| c.products.len()).sum::<usize>(),
        document.entity_count()
    );

    Ok(BatchResult {
        document,
        hierarchy: scaffold.hierarchy,
        created,
        warnings: errors,
    })
}
