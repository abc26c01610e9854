//! Loading Figma documents from disk.
//!
//! Three JSON envelopes are accepted:
//! - a files response, `{name, lastModified, version, document, ...}`
//! - a cache entry, `{data, timestamp, ttl}`, wrapping a files response
//! - a nodes response, `{name, ..., nodes: {id: {document}}}`; the first node
//!   by id is placed under a synthetic DOCUMENT root

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::api_types::{DesignNode, FigmaFile, NodeType};
use crate::error::{ExtractError, Result};

/// Read and parse a Figma document from `path`.
pub fn load_figma_file(path: &Path) -> Result<FigmaFile> {
    let json = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "loading figma document");
    parse_figma_file(&json)
}

pub fn parse_figma_file(json: &str) -> Result<FigmaFile> {
    let value: Value = serde_json::from_str(json)?;
    figma_file_from_value(value)
}

pub fn figma_file_from_value(value: Value) -> Result<FigmaFile> {
    let Value::Object(mut map) = value else {
        return Err(ExtractError::invalid_document(
            "expected a JSON object at the top level",
        ));
    };

    if map.contains_key("document") {
        return Ok(serde_json::from_value(Value::Object(map))?);
    }

    if let Some(data) = map.remove("data") {
        if data.get("document").is_some() || data.get("nodes").is_some() {
            tracing::debug!("unwrapping cache entry");
            return figma_file_from_value(data);
        }
        return Err(ExtractError::invalid_document(
            "cache entry `data` holds no Figma document",
        ));
    }

    if let Some(nodes) = map.remove("nodes") {
        return from_nodes_response(map, nodes);
    }

    Err(ExtractError::invalid_document(
        "no `document`, `data` or `nodes` key found",
    ))
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn from_nodes_response(map: Map<String, Value>, nodes: Value) -> Result<FigmaFile> {
    let Value::Object(nodes) = nodes else {
        return Err(ExtractError::invalid_document("`nodes` must be an object"));
    };

    let mut ids: Vec<&String> = nodes.keys().collect();
    ids.sort();
    let document = ids
        .into_iter()
        .find_map(|id| nodes.get(id)?.get("document").cloned())
        .ok_or_else(|| ExtractError::invalid_document("nodes response contains no documents"))?;
    let node: DesignNode = serde_json::from_value(document)?;

    let name = string_field(&map, "name").unwrap_or_else(|| node.name.clone());
    let mut file = FigmaFile::from_document(
        DesignNode::new(NodeType::Document, name.clone()).with_children(vec![node]),
    );
    file.name = Some(name);
    file.version = string_field(&map, "version");
    file.last_modified = string_field(&map, "lastModified");
    Ok(file)
}
