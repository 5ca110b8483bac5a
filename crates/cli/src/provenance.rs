use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What went into a rendered figure.
pub struct Payload {
    pub kind: String,
    /// The diagram description as parsed, defaults filled in.
    pub spec: Value,
    pub appearance: Value,
}

impl Payload {
    pub fn new(kind: &str, spec: Value) -> Self {
        Self {
            kind: kind.to_string(),
            spec,
            appearance: Value::Null,
        }
    }

    pub fn with_appearance(mut self, appearance: Value) -> Self {
        self.appearance = appearance;
        self
    }
}

/// Write `<figure>.provenance.json` next to `artifact` with the git commit,
/// callsite, crate version and the full diagram description.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": figures::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": {
            "kind": payload.kind,
            "spec": payload.spec,
            "appearance": payload.appearance
        },
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("figure"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` at build or run time, else `git rev-parse HEAD`, else `unknown`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/out/circle.svg"));
        assert_eq!(derived, Path::new("/tmp/out/circle.provenance.json"));
    }

    #[test]
    fn sidecar_records_kind_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("tri.svg");
        fs::write(&artifact, "<svg/>").unwrap();
        let payload = Payload::new("triangle", json!({"kind": "triangle"}))
            .with_appearance(json!({"width": 8.0}));
        let path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["params"]["kind"], "triangle");
        assert_eq!(parsed["params"]["appearance"]["width"], 8.0);
        assert!(parsed["callsite"]["file"].as_str().unwrap().ends_with("provenance.rs"));
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
    }
}
