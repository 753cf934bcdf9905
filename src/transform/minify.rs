//! Built-in transforms for JS and CSS.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Without `optimize` the
//! sources are only merged; with it the merged text is minified. Sources the
//! optimizer cannot parse are published merged but unminified.
//!
//! Scripts are classic `<script src>` files: their top-level bindings are
//! globals other scripts rely on, so they are neither renamed nor removed.

use std::fs;
use std::path::PathBuf;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{Transform, TransformError};
use crate::debug;

/// Stylesheet transform backed by lightningcss.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylesheetTransform;

impl Transform for StylesheetTransform {
    fn apply(&self, sources: &[PathBuf], optimize: bool) -> Result<Option<String>, TransformError> {
        let merged = merge(&read_all(sources)?, "");
        Ok(finish(merged, optimize, minify_css))
    }
}

/// Script transform backed by oxc.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTransform;

impl Transform for ScriptTransform {
    fn apply(&self, sources: &[PathBuf], optimize: bool) -> Result<Option<String>, TransformError> {
        let merged = merge(&read_all(sources)?, ";");
        Ok(finish(merged, optimize, minify_js))
    }
}

/// Read every source. Invalid UTF-8 is replaced rather than rejected.
fn read_all(sources: &[PathBuf]) -> Result<Vec<String>, TransformError> {
    sources
        .iter()
        .map(|path| {
            fs::read(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|err| TransformError::Read(path.clone(), err))
        })
        .collect()
}

/// Concatenate trimmed chunks, inserting `separator` only where a chunk
/// does not already end with it.
fn merge(chunks: &[String], separator: &str) -> String {
    let mut out = String::new();
    for chunk in chunks.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        if !out.is_empty() && !separator.is_empty() && !out.ends_with(separator) {
            out.push_str(separator);
        }
        out.push_str(chunk);
    }
    out
}

fn finish(merged: String, optimize: bool, minify: fn(&str) -> Option<String>) -> Option<String> {
    if merged.is_empty() {
        return None;
    }
    if !optimize {
        return Some(merged);
    }
    match minify(&merged) {
        Some(min) if !min.trim().is_empty() => Some(min),
        _ => {
            debug!("minify"; "no usable output, publishing unminified");
            Some(merged)
        }
    }
}

/// Minify a classic (non-module) script.
///
/// Only local bindings are mangled. The compressor is skipped because it
/// drops top-level declarations it considers unused.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_script(true);
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: Some(false),
            ..MangleOptions::default()
        }),
        compress: None,
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}
