use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing config
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    write_file(&path, &template("tailpost.toml")?)?;

    println!("✔ Initialized tailpost config in {}", path.display());
    println!();
    println!("Next steps:");
    println!("  edit [tail].files");
    println!("  tailpost config check {}", path.display());
    println!("  tailpost run --config {}", path.display());

    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded config template: {path}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents.trim_start())
        .with_context(|| format!("failed to create {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::load_spec;
    use tempfile::TempDir;

    #[test]
    fn init_writes_a_loadable_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config/tailpost.toml");

        init(path.clone()).unwrap();

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.version, 1);
        assert_eq!(spec.tail.files, vec!["/var/log/syslog".to_string()]);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tailpost.toml");
        fs::write(&path, "keep me").unwrap();

        let err = init(path.clone()).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }
}
