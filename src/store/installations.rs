//! Installation store
//!
//! A single-level keyed map from installation name to claim, persisted as one
//! JSON file per name. `store` overwrites any prior record for the name; no
//! history is kept. The read-then-write sequence around an install is not
//! protected by a cross-process lock, so concurrent installs of the same name
//! are last-writer-wins.

use std::path::PathBuf;

use crate::claim::Claim;
use crate::error::{DeckhandError, Result};
use crate::store::Home;

pub struct InstallationStore {
    dir: PathBuf,
}

impl InstallationStore {
    pub fn open(home: &Home) -> Result<Self> {
        Ok(Self {
            dir: home.subdir("installations")?,
        })
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Read the record for an installation name, if one exists
    pub fn read(&self, name: &str) -> Result<Option<Claim>> {
        let path = self.record_path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| DeckhandError::StoreReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let claim = serde_json::from_str(&content).map_err(|e| DeckhandError::StoreReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(claim))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    /// Persist a claim, overwriting any prior record for its name
    ///
    /// Advances the claim's revision marker, so every persisted attempt is
    /// distinguishable from the one before it.
    pub fn store(&self, claim: &mut Claim) -> Result<()> {
        claim.touch();
        let json =
            serde_json::to_string_pretty(claim).map_err(|e| DeckhandError::PersistenceFailed {
                name: claim.name.clone(),
                reason: e.to_string(),
            })?;
        std::fs::write(self.record_path(&claim.name), json).map_err(|e| {
            DeckhandError::PersistenceFailed {
                name: claim.name.clone(),
                reason: e.to_string(),
            }
        })
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.record_path(name);
        if !path.is_file() {
            return Err(DeckhandError::InstallationNotFound {
                name: name.to_string(),
            });
        }
        std::fs::remove_file(&path).map_err(|e| DeckhandError::IoError {
            message: format!("failed to remove {}: {e}", path.display()),
        })
    }

    /// All records, sorted by installation name
    pub fn list(&self) -> Result<Vec<Claim>> {
        let mut claims = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(claim) = self.read(name)? {
                claims.push(claim);
            }
        }
        claims.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::Bundle;
    use crate::claim::{ClaimResult, Status};
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> InstallationStore {
        let home = Home::resolve(Some(temp.path().to_path_buf())).unwrap();
        InstallationStore::open(&home).unwrap()
    }

    fn claim(name: &str) -> Claim {
        let bundle: Bundle = serde_yaml::from_str(
            "name: app\nversion: '1'\nactions:\n  install:\n    command: ['/bin/true']\n",
        )
        .unwrap();
        Claim::new(name, bundle).unwrap()
    }

    #[test]
    fn test_read_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        assert!(store(&temp).read("nothing").unwrap().is_none());
    }

    #[test]
    fn test_store_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let mut claim = claim("myapp");
        claim.result = ClaimResult::success("install");
        store.store(&mut claim).unwrap();

        let read = store.read("myapp").unwrap().unwrap();
        assert_eq!(read, claim);
        assert_eq!(read.result.status, Status::Success);
        assert_eq!(read.revision, 1);
    }

    #[test]
    fn test_store_overwrites_idempotently() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let mut claim = claim("myapp");
        store.store(&mut claim).unwrap();
        store.store(&mut claim).unwrap();

        // One record, equal to the last write, revision advanced per attempt
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], claim);
        assert_eq!(all[0].revision, 2);
    }

    #[test]
    fn test_delete_missing_fails() {
        let temp = TempDir::new().unwrap();
        let err = store(&temp).delete("nothing").unwrap_err();
        assert!(matches!(err, DeckhandError::InstallationNotFound { .. }));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        for name in ["zeta", "alpha", "mid"] {
            store.store(&mut claim(name)).unwrap();
        }
        let names: Vec<_> = store.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_corrupt_record_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        std::fs::write(temp.path().join("installations/bad.json"), "not json").unwrap();
        let err = store.read("bad").unwrap_err();
        assert!(matches!(err, DeckhandError::StoreReadFailed { .. }));
    }
}
