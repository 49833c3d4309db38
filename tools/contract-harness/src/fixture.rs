//! Fixture files describing one HTTP request and its expected response.
//!
//! Fixtures live under `contracts/http/<service>/*.json`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub request: FixtureRequest,
    pub expect: FixtureExpect,
    /// Populated from the directory name while loading.
    #[serde(skip)]
    pub service: String,
}

#[derive(Debug, Deserialize)]
pub struct FixtureRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureExpect {
    pub status: u16,
    /// Top-level keys that must appear in the response body with these
    /// exact values. Keys not listed here are ignored.
    #[serde(default)]
    pub body_includes: BTreeMap<String, Value>,
}

/// Load every fixture under `contracts/http/`, optionally filtered to one
/// service directory. Files are sorted by path for stable run order.
pub fn load_all(workspace_root: &Path, service: Option<&str>) -> Result<Vec<Fixture>> {
    let http_dir = workspace_root.join("contracts").join("http");
    let mut fixtures = Vec::new();

    let mut service_dirs: Vec<_> = std::fs::read_dir(&http_dir)
        .with_context(|| format!("read {}", http_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    service_dirs.sort();

    for dir in service_dirs {
        let dir_name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_owned();
        if service.is_some_and(|s| s != dir_name) {
            continue;
        }

        let mut files: Vec<_> = std::fs::read_dir(&dir)
            .with_context(|| format!("read {}", dir.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for file in files {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let mut fixture: Fixture = serde_json::from_str(&contents)
                .with_context(|| format!("parse {}", file.display()))?;
            fixture.service = dir_name.clone();
            fixtures.push(fixture);
        }
    }

    Ok(fixtures)
}
