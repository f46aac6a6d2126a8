//! Credential store
//!
//! Named credential sets persisted as one YAML file per name. The `--credential-set`
//! flag accepts either a name from this store or a direct path to a set file.

use std::path::{Path, PathBuf};

use crate::credentials::CredentialSet;
use crate::error::{DeckhandError, Result};
use crate::store::Home;

pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn open(home: &Home) -> Result<Self> {
        Ok(Self {
            dir: home.subdir("credentials")?,
        })
    }

    /// Read a named credential set from the store
    pub fn read(&self, name: &str) -> Result<CredentialSet> {
        let path = self.dir.join(format!("{name}.yaml"));
        if !path.is_file() {
            return Err(DeckhandError::CredentialSetNotFound {
                name: name.to_string(),
            });
        }
        load_file(&path)
    }

    /// Load a set from the store by name, or from a file when the argument is
    /// an existing path
    pub fn load(&self, name_or_path: &str) -> Result<CredentialSet> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            load_file(path)
        } else {
            self.read(name_or_path)
        }
    }
}

fn load_file(path: &Path) -> Result<CredentialSet> {
    let content = std::fs::read_to_string(path).map_err(|e| DeckhandError::StoreReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|e| DeckhandError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SET: &str = "name: staging\ncredentials:\n  - name: token\n    value: abc\n";

    #[test]
    fn test_read_named_set() {
        let temp = TempDir::new().unwrap();
        let home = Home::resolve(Some(temp.path().to_path_buf())).unwrap();
        let store = CredentialStore::open(&home).unwrap();
        std::fs::write(temp.path().join("credentials/staging.yaml"), SET).unwrap();

        let set = store.read("staging").unwrap();
        assert_eq!(set.name, "staging");
    }

    #[test]
    fn test_read_missing_set() {
        let temp = TempDir::new().unwrap();
        let home = Home::resolve(Some(temp.path().to_path_buf())).unwrap();
        let store = CredentialStore::open(&home).unwrap();

        let err = store.read("nothing").unwrap_err();
        assert!(matches!(err, DeckhandError::CredentialSetNotFound { .. }));
    }

    #[test]
    fn test_load_accepts_file_path() {
        let temp = TempDir::new().unwrap();
        let home = Home::resolve(Some(temp.path().to_path_buf())).unwrap();
        let store = CredentialStore::open(&home).unwrap();
        let file = temp.path().join("creds.yaml");
        std::fs::write(&file, SET).unwrap();

        let set = store.load(file.to_str().unwrap()).unwrap();
        assert_eq!(set.credentials.len(), 1);
    }
}
