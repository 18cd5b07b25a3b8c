use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tallyline_ingest::LayoutRules;

/// Environment variable naming the statement folder
pub const FOLDER_ENV: &str = "STATEMENT_FOLDER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSection,
    pub output: OutputSection,
    pub layout: LayoutRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Folder scanned by `tallyline extract` (STATEMENT_FOLDER overrides it)
    pub folder: Option<PathBuf>,
    /// Extension of the files to extract: "pdf", or "txt" for pdftotext output
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// CSV file rows are appended to
    pub path: PathBuf,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            folder: None,
            extension: "pdf".to_string(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("statement.csv"),
        }
    }
}

pub fn tallyline_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tallyline"))
}

/// `--config` if given, else ~/.tallyline/config.toml
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(tallyline_home()?.join("config.toml")),
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Statement folder: flag, then STATEMENT_FOLDER, then the config file.
pub fn resolve_folder(
    flag: Option<PathBuf>,
    env: Option<String>,
    cfg: &Config,
    config_file: &Path,
) -> Result<PathBuf> {
    if let Some(p) = flag {
        return Ok(p);
    }
    if let Some(p) = env.filter(|s| !s.trim().is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = &cfg.input.folder {
        return Ok(p.clone());
    }
    bail!(
        "No statement folder given. Pass --folder, set {FOLDER_ENV}, or set input.folder in {}",
        config_file.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[input]
folder = "/data/statements"

[layout]
target_account = "Advantage Plus Banking"
"#,
        )
        .unwrap();
        assert_eq!(cfg.input.folder, Some(PathBuf::from("/data/statements")));
        assert_eq!(cfg.input.extension, "pdf");
        assert_eq!(cfg.output.path, PathBuf::from("statement.csv"));
        assert_eq!(cfg.layout.target_account, "Advantage Plus Banking");
        assert_eq!(cfg.layout.next_account, "Regular Savings");
        assert_eq!(cfg.layout.first_transaction_page, 3);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.output.path = PathBuf::from("/tmp/out.csv");

        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_missing_config_is_default() {
        let cfg = load_config(Path::new("/nonexistent/tallyline.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_folder_precedence() {
        let mut cfg = Config::default();
        cfg.input.folder = Some(PathBuf::from("/from/config"));
        let file = Path::new("config.toml");

        let got = resolve_folder(
            Some(PathBuf::from("/from/flag")),
            Some("/from/env".into()),
            &cfg,
            file,
        )
        .unwrap();
        assert_eq!(got, PathBuf::from("/from/flag"));

        let got = resolve_folder(None, Some("/from/env".into()), &cfg, file).unwrap();
        assert_eq!(got, PathBuf::from("/from/env"));

        let got = resolve_folder(None, Some("  ".into()), &cfg, file).unwrap();
        assert_eq!(got, PathBuf::from("/from/config"));

        let err = resolve_folder(None, None, &Config::default(), file).unwrap_err();
        assert!(err.to_string().contains(FOLDER_ENV));
    }
}
