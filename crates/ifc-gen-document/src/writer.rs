// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ISO-10303-21 (STEP) serialization
//!
//! Renders a [`SpatialDocument`] as an exchange file:
//!
//! ```text
//! ISO-10303-21;
//! HEADER;
//! FILE_DESCRIPTION(('ViewDefinition [DesignTransferView]'),'2;1');
//! FILE_NAME('model.ifc','2024-01-01T00:00:00',(''),(''),'ifc-gen 0.1.0','ifc-gen 0.1.0','');
//! FILE_SCHEMA(('IFC4'));
//! ENDSEC;
//! DATA;
//! #1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'Project',$,$,$,$,(#7),#2);
//! ENDSEC;
//! END-ISO-10303-21;
//! ```

use crate::document::SpatialDocument;
use ifc_gen_model::AttributeValue;
use std::fmt::Write;

const ORIGINATING_SYSTEM: &str = concat!("ifc-gen ", env!("CARGO_PKG_VERSION"));

/// Values written to the HEADER section
#[derive(Debug, Clone, PartialEq)]
pub struct StepHeader {
    pub name: String,
    /// ISO-8601 timestamp without offset
    pub time_stamp: String,
    pub author: String,
    pub organization: String,
    pub originating_system: String,
    pub view_definition: String,
}

impl Default for StepHeader {
    fn default() -> Self {
        Self::named("model.ifc")
    }
}

impl StepHeader {
    /// Header for a file name, stamped with the current local time
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_stamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            author: String::new(),
            organization: String::new(),
            originating_system: ORIGINATING_SYSTEM.to_string(),
            view_definition: "DesignTransferView".to_string(),
        }
    }
}

/// STEP text writer
pub struct StepWriter {
    header: StepHeader,
}

impl StepWriter {
    /// Create a writer with the given header
    pub fn new(header: StepHeader) -> Self {
        Self { header }
    }

    /// Render the complete exchange file
    pub fn write(&self, document: &SpatialDocument) -> String {
        let mut out = String::with_capacity(256 + document.entities().count() * 96);
        out.push_str("ISO-10303-21;\nHEADER;\n");
        self.write_header(&mut out, document.schema());
        out.push_str("ENDSEC;\nDATA;\n");
        for entity in document.entities() {
            let _ = write!(out, "{}={}(", entity.id, entity.ifc_type.name());
            write_values(&mut out, &entity.attributes);
            out.push_str(");\n");
        }
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
        out
    }

    fn write_header(&self, out: &mut String, schema: &str) {
        let h = &self.header;
        let _ = writeln!(
            out,
            "FILE_DESCRIPTION(('ViewDefinition [{}]'),'2;1');",
            encode_string(&h.view_definition)
        );
        let _ = writeln!(
            out,
            "FILE_NAME('{}','{}',('{}'),('{}'),'{}','{}','');",
            encode_string(&h.name),
            encode_string(&h.time_stamp),
            encode_string(&h.author),
            encode_string(&h.organization),
            ORIGINATING_SYSTEM,
            encode_string(&h.originating_system),
        );
        let _ = writeln!(out, "FILE_SCHEMA(('{}'));", encode_string(schema));
    }
}

fn write_values(out: &mut String, values: &[AttributeValue]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(out, value);
    }
}

/// Append one attribute value in STEP encoding
pub fn write_value(out: &mut String, value: &AttributeValue) {
    match value {
        AttributeValue::Null => out.push('$'),
        AttributeValue::Derived => out.push('*'),
        AttributeValue::EntityRef(id) => {
            let _ = write!(out, "{}", id);
        }
        AttributeValue::Bool(b) => out.push_str(if *b { ".T." } else { ".F." }),
        AttributeValue::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        AttributeValue::Float(f) => out.push_str(&format_real(*f)),
        AttributeValue::String(s) => {
            out.push('\'');
            out.push_str(&encode_string(s));
            out.push('\'');
        }
        AttributeValue::Enum(e) => {
            let _ = write!(out, ".{}.", e);
        }
        AttributeValue::List(items) => {
            out.push('(');
            write_values(out, items);
            out.push(')');
        }
        AttributeValue::TypedValue(name, args) => {
            out.push_str(&name.to_uppercase());
            out.push('(');
            write_values(out, args);
            out.push(')');
        }
    }
}

/// Format a REAL so that it always carries a decimal point
///
/// Non-finite values have no STEP encoding and are written as `$`.
pub fn format_real(value: f64) -> String {
    if !value.is_finite() {
        log::warn!("Non-finite real {} written as $", value);
        return "$".to_string();
    }
    if value == 0.0 {
        return "0.".to_string();
    }
    let magnitude = value.abs();
    if !(1e-4..1e16).contains(&magnitude) {
        // 1E-5 -> 1.E-5
        let s = format!("{:E}", value);
        return match s.split_once('E') {
            Some((mantissa, exp)) if !mantissa.contains('.') => format!("{}.E{}", mantissa, exp),
            _ => s,
        };
    }
    let mut s = format!("{}", value);
    if !s.contains('.') {
        s.push('.');
    }
    s
}

/// Escape a string body for a STEP literal
///
/// Quotes and backslashes are doubled; non-ASCII runs become `\X2\…\X0\`
/// blocks of UTF-16 code units.
pub fn encode_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(c),
            _ => {
                out.push_str("\\X2\\");
                let mut push_units = |ch: char| {
                    let mut buf = [0u16; 2];
                    for unit in ch.encode_utf16(&mut buf) {
                        let _ = write!(out, "{:04X}", unit);
                    }
                };
                push_units(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii() && !next.is_ascii_control() {
                        break;
                    }
                    push_units(next);
                    chars.next();
                }
                out.push_str("\\X0\\");
            }
        }
    }
    out
}
