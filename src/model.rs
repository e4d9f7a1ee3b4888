use crate::editor::{FieldDescriptor, OptionsTable};
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_ENV: &str = "PROFILE_TUI_CONFIG";
pub const CONFIG_FILE: &str = "profile.yaml";

#[derive(Debug, Deserialize, Clone)]
pub struct ProfileConfig {
    #[serde(default = "default_title")]
    pub title: String,
    // Persist after every per-field save, not only on form save
    #[serde(default)]
    pub autosave: bool,
    #[serde(default)]
    pub save_path: Option<String>,
    // Receives the profile as JSON on stdin
    #[serde(default)]
    pub submit_cmd: Option<String>,
    #[serde(default)]
    pub options: HashMap<String, Vec<String>>,
    pub fields: Vec<FieldDescriptor>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            autosave: false,
            save_path: None,
            submit_cmd: None,
            options: HashMap::new(),
            fields: vec![],
        }
    }
}

fn default_title() -> String {
    "Profile".to_string()
}

impl ProfileConfig {
    pub fn options_table(&self) -> OptionsTable {
        OptionsTable::builtin().with_overrides(self.options.clone())
    }
}

/// A parsed profile together with the directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub config: ProfileConfig,
    pub base_dir: PathBuf,
}

impl LoadedProfile {
    pub fn resolve_path(&self, p: &str) -> PathBuf {
        let pb = PathBuf::from(p);
        if pb.is_absolute() {
            pb
        } else {
            self.base_dir.join(pb)
        }
    }
}

pub(crate) fn validate_profile_config(cfg: &ProfileConfig) -> Result<(), ConfigError> {
    use std::collections::HashSet;
    let mut names = HashSet::new();
    for (index, f) in cfg.fields.iter().enumerate() {
        if f.name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        if !names.insert(f.name.as_str()) {
            return Err(ConfigError::DuplicateField {
                name: f.name.clone(),
                index,
            });
        }
    }
    Ok(())
}

pub fn load_profile_from_path(path: &Path) -> Result<LoadedProfile, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ProfileConfig = serde_yaml::from_str(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_profile_config(&config)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    info!(path = %path.display(), fields = config.fields.len(), "profile loaded");
    Ok(LoadedProfile { config, base_dir })
}

/// Finds the profile file: explicit path, then `PROFILE_TUI_CONFIG`, then
/// `profile.yaml` in CWD or `.tui/`, then `.tui/profile.yaml` in ancestors.
pub fn discover_profile(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let candidates = [cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)];
    for p in candidates {
        if p.exists() {
            return Ok(p);
        }
    }
    let mut cur = cwd;
    while let Some(parent) = cur.parent() {
        let p = parent.join(".tui").join(CONFIG_FILE);
        if p.exists() {
            return Ok(p);
        }
        cur = parent;
    }
    Err(ConfigError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::FieldType;

    const SAMPLE: &str = r#"
title: About me
autosave: true
save_path: out/profile.yaml
options:
  bodyType: [Slim, Athletic]
fields:
  - name: bodyType
    label: Body type
    value: Athletic
  - name: languages
    label: Languages
    value: "English, Kurdish, Arabic"
    type: listInput
  - name: bio
    label: Bio
    type: textarea
"#;

    #[test]
    fn parses_profile_yaml() {
        let cfg: ProfileConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.title, "About me");
        assert!(cfg.autosave);
        assert_eq!(cfg.fields.len(), 3);
        assert_eq!(cfg.fields[1].field_type, Some(FieldType::ListInput));
        assert_eq!(cfg.fields[2].value, "");
        let table = cfg.options_table();
        assert_eq!(table.get("bodyType").unwrap(), ["Slim", "Athletic"]);
        assert!(table.get("religion").is_some());
        validate_profile_config(&cfg).unwrap();
    }

    #[test]
    fn validate_detects_duplicate_names() {
        let cfg = ProfileConfig {
            fields: vec![
                FieldDescriptor::new("a", "A", ""),
                FieldDescriptor::new("a", "B", ""),
            ],
            ..Default::default()
        };
        let err = validate_profile_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("duplicate field name"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let cfg = ProfileConfig {
            fields: vec![FieldDescriptor::new(" ", "A", "")],
            ..Default::default()
        };
        assert!(matches!(
            validate_profile_config(&cfg),
            Err(ConfigError::EmptyName { index: 0 })
        ));
    }

    #[test]
    fn load_resolves_relative_paths_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, SAMPLE).unwrap();
        let loaded = load_profile_from_path(&path).unwrap();
        assert_eq!(
            loaded.resolve_path("out/profile.yaml"),
            dir.path().join("out/profile.yaml")
        );
    }

    #[test]
    fn discovery_prefers_explicit_then_tui_dir() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("x.yaml");
        assert_eq!(
            discover_profile(Some(&explicit), dir.path()).unwrap(),
            explicit
        );
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(dir.path().join(".tui")).unwrap();
        fs::write(dir.path().join(".tui").join(CONFIG_FILE), SAMPLE).unwrap();
        if std::env::var(CONFIG_ENV).is_err() {
            assert_eq!(
                discover_profile(None, &nested).unwrap(),
                dir.path().join(".tui").join(CONFIG_FILE)
            );
        }
    }

    #[test]
    fn parse_error_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "fields: nope").unwrap();
        let err = load_profile_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
