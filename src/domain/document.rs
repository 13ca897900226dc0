//! Saved document format
//!
//! Current (v2): `{"formatVersion": 2, "projects": { name: Project }}`
//!
//! Legacy (v1): the bare `{ name: Project }` map. Its items may lack
//! `additionalMass`, `initialForce`, `initialImpulse` and `timer`, may carry
//! an empty `color`, and its projects may lack `position`. A v1 map may also
//! sit inside a `{"formatVersion": 1, "projects": ..}` envelope. Loading
//! upgrades v1 to v2 before the strict parse, so the in-memory types never
//! carry optional fields.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::settings::{
    is_reserved_item_key, DEFAULT_COLOR, DOCUMENT_FORMAT_VERSION, LEGACY_FORMAT_VERSION,
};
use crate::domain::project::ProjectMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    format_version: u32,
    projects: &'a ProjectMap,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentIn {
    format_version: u32,
    projects: ProjectMap,
}

/// Result of reading a document
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedDocument {
    pub projects: ProjectMap,
    /// Version the input was written in, when it had to be upgraded
    pub migrated_from: Option<u32>,
}

pub fn to_document_json(projects: &ProjectMap) -> Result<String, String> {
    let out = DocumentOut {
        format_version: DOCUMENT_FORMAT_VERSION,
        projects,
    };
    serde_json::to_string(&out).map_err(|e| e.to_string())
}

pub fn from_document_json(json: &str) -> Result<LoadedDocument, String> {
    let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    from_document_value(value)
}

pub fn from_document_value(value: Value) -> Result<LoadedDocument, String> {
    let version = detect_version(&value)?;

    let (value, migrated_from) = match version {
        DOCUMENT_FORMAT_VERSION => (value, None),
        LEGACY_FORMAT_VERSION => (migrate_v1_to_v2(value)?, Some(LEGACY_FORMAT_VERSION)),
        v => return Err(format!("unsupported document format version: {}", v)),
    };

    let doc: DocumentIn = serde_json::from_value(value).map_err(|e| e.to_string())?;
    debug_assert_eq!(doc.format_version, DOCUMENT_FORMAT_VERSION);

    for (name, project) in doc.projects.iter() {
        project
            .validate()
            .map_err(|e| format!("project {}: {}", name, e))?;
    }

    Ok(LoadedDocument {
        projects: doc.projects,
        migrated_from,
    })
}

/// Parse a bare current-format project map, as the UI hands it over
pub fn project_map_from_json(json: &str) -> Result<ProjectMap, String> {
    let projects: ProjectMap = serde_json::from_str(json).map_err(|e| e.to_string())?;
    for (name, project) in projects.iter() {
        project
            .validate()
            .map_err(|e| format!("project {}: {}", name, e))?;
    }
    Ok(projects)
}

pub fn project_map_to_json(projects: &ProjectMap) -> Result<String, String> {
    serde_json::to_string(projects).map_err(|e| e.to_string())
}

/// Version of a parsed document; a top-level object without a numeric
/// `formatVersion` next to `projects` is a legacy project map.
pub fn detect_version(value: &Value) -> Result<u32, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "document root must be an object".to_string())?;

    match (obj.get("formatVersion"), obj.get("projects")) {
        (Some(Value::Number(n)), Some(_)) => {
            let v = n
                .as_u64()
                .ok_or_else(|| format!("invalid formatVersion: {}", n))?;
            u32::try_from(v).map_err(|_| format!("invalid formatVersion: {}", v))
        }
        _ => Ok(LEGACY_FORMAT_VERSION),
    }
}

fn migrate_v1_to_v2(value: Value) -> Result<Value, String> {
    let Value::Object(mut root) = value else {
        return Err("legacy document root must be an object".to_string());
    };

    // enveloped v1: the map is under `projects`
    let projects = if root.get("formatVersion").is_some_and(Value::is_number) {
        match root.remove("projects") {
            Some(Value::Object(projects)) => projects,
            _ => return Err("v1 envelope has no projects object".to_string()),
        }
    } else {
        root
    };

    let mut upgraded = Map::with_capacity(projects.len());
    for (name, project) in projects.into_iter() {
        let Value::Object(mut fields) = project else {
            return Err(format!("project {} is not an object", name));
        };

        fields.entry("position").or_insert(json!(0.0));

        for (key, item) in fields.iter_mut() {
            if is_reserved_item_key(key) {
                continue;
            }
            let Value::Object(item) = item else {
                return Err(format!("project {}: item {} is not an object", name, key));
            };
            item.entry("additionalMass").or_insert(json!(0.0));
            item.entry("initialForce").or_insert(json!([0.0, 0.0, 0.0]));
            item.entry("initialImpulse").or_insert(json!([0.0, 0.0, 0.0]));
            item.entry("timer").or_insert(json!(0.0));

            let color_is_blank = match item.get("color") {
                None => true,
                Some(Value::String(c)) => c.trim().is_empty(),
                Some(_) => false,
            };
            if color_is_blank {
                item.insert("color".to_string(), json!(DEFAULT_COLOR));
            }
        }

        upgraded.insert(name, Value::Object(fields));
    }

    Ok(json!({
        "formatVersion": DOCUMENT_FORMAT_VERSION,
        "projects": Value::Object(upgraded),
    }))
}
