use crate::error::{EcoError, Result};
use crate::types::config::EcoConfig;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "ecoindex.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".ecoindex/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/ecoindex/config.toml";

/// Config sources, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    Global,
    Project,
    Local,
}

impl ConfigLayer {
    pub fn name(self) -> &'static str {
        match self {
            ConfigLayer::Global => "global",
            ConfigLayer::Project => "project",
            ConfigLayer::Local => "local",
        }
    }
}

/// Loads the layered config rooted at `root`; `None` when the project file
/// is absent.
pub fn load_config(root: &Path) -> Result<Option<EcoConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<EcoConfig>> {
    let project_path = root.join(DEFAULT_CONFIG_FILE);
    if !project_path.is_file() {
        return Ok(None);
    }

    let mut layers = Vec::with_capacity(3);
    if let Some(path) = global_path {
        layers.push((ConfigLayer::Global, path.to_path_buf()));
    }
    layers.push((ConfigLayer::Project, project_path));
    layers.push((ConfigLayer::Local, root.join(DEFAULT_LOCAL_FILE)));

    let mut merged = Table::new();
    for (layer, path) in layers {
        if !path.is_file() {
            continue;
        }
        overlay(&mut merged, read_layer(layer, &path)?);
        debug!(layer = layer.name(), path = %path.display(), "config layer applied");
    }

    let cfg: EcoConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| EcoError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn read_layer(layer: ConfigLayer, path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        EcoError::ConfigParse(format!("{} layer {}: {}", layer.name(), path.display(), e))
    })
}

/// Nested tables merge key by key; any other value from `top` wins.
fn overlay(base: &mut Table, top: Table) {
    for (key, value) in top {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay(existing, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::types::config::ReportFormatSetting;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_project_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[report]
format = "json"

[logging]
level = "info"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[engine]
as_of = "2024-01-31"

[domains]
enabled = ["air", "water", "radiation"]

[logging]
level = "warn"
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".ecoindex")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[domains]
enabled = ["energy"]
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert_eq!(cfg.report_format(), Some(ReportFormatSetting::Json));
        assert_eq!(cfg.log_level(), Some("warn"));
        assert_eq!(
            cfg.enabled_domains().expect("domains should parse"),
            vec![Domain::Energy]
        );
        assert_eq!(
            cfg.as_of().expect("date should parse").map(|d| d.to_string()),
            Some("2024-01-31".to_string())
        );
    }

    #[test]
    fn load_config_surfaces_validation_errors() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[domains]\nenabled = [\"traffic\"]\n",
        )
        .expect("project config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, EcoError::ConfigParse(_)));
    }

    #[test]
    fn load_config_reports_malformed_toml_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[engine\n").expect("write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains("project layer"));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn load_config_names_the_local_layer_on_parse_errors() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[report]\nformat = \"md\"\n")
            .expect("project config should write");
        fs::create_dir_all(root.path().join(".ecoindex")).expect("local dir should create");
        fs::write(root.path().join(DEFAULT_LOCAL_FILE), "enabled = [").expect("local should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, EcoError::ConfigParse(_)));
        assert!(err.to_string().contains("local layer"));
    }

    #[test]
    fn overlay_replaces_scalars_and_merges_nested_tables() {
        let mut base: Table = toml::from_str("[engine]\nas_of = \"2024-01-01\"\n[report]\nformat = \"md\"\n")
            .expect("base should parse");
        let top: Table = toml::from_str("[report]\nformat = \"json\"\n").expect("top should parse");

        overlay(&mut base, top);
        let field = |table: &str, key: &str| {
            base.get(table)
                .and_then(|value| value.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        assert_eq!(field("report", "format").as_deref(), Some("json"));
        assert_eq!(field("engine", "as_of").as_deref(), Some("2024-01-01"));
    }
}
