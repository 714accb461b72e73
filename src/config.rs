use crate::model::LibraryState;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "playq";
const STATE_FILE: &str = "library.json";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("PLAYQ_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn state_path() -> Result<PathBuf> {
    Ok(config_root()?.join(STATE_FILE))
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

pub fn load_state() -> Result<LibraryState> {
    let path = state_path()?;
    if !path.exists() {
        return Ok(LibraryState::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let state: LibraryState = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;
    Ok(state)
}

pub fn save_state(state: &LibraryState) -> Result<()> {
    ensure_config_dir()?;
    let path = state_path()?;
    let json = serde_json::to_string_pretty(state)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // One test so the env override is set exactly once; parallel test
    // threads share process environment.
    #[test]
    fn defaults_then_round_trip() {
        let dir = tempdir().expect("tempdir");
        unsafe {
            env::set_var("PLAYQ_CONFIG_DIR", dir.path().to_string_lossy().as_ref());
        }

        let loaded = load_state().expect("load before save");
        assert!(loaded.folders.is_empty());

        let state = LibraryState {
            folders: vec![PathBuf::from("/music")],
        };
        save_state(&state).expect("save");
        let loaded = load_state().expect("load");
        assert_eq!(loaded.folders, vec![PathBuf::from("/music")]);
    }
}
