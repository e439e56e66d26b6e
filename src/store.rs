/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashsets.
 *
 * Flashsets is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashsets is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashsets.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unable to find user home directory")]
    NoHomeDir,
    #[error("Store path is a directory: {}", .0.display())]
    PathIsDir(PathBuf),
    #[error("IoError: {}, path: {}", .1, .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    #[error("SerdeError: {0}")]
    Serde(#[from] serde_json::Error),
}

///String key-value storage, one document per key. Every write replaces the whole
///value, and the last writer wins.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

///Keeps each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

const DEFAULT_HOME_STORE_DIR: &str = ".config/flashsets";

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_user_home() -> Result<Self, StoreError> {
        let mut path = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        path.push(DEFAULT_HOME_STORE_DIR);
        Ok(Self::new(path))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);

        if let Ok(metadata) = std::fs::metadata(&path) {
            if metadata.is_file() {
                let json = std::fs::read_to_string(&path)
                    .map_err(|err| StoreError::Io(path.clone(), err))?;
                Ok(Some(json))
            } else {
                Err(StoreError::PathIsDir(path))
            }
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| StoreError::Io(path.clone(), err))?;
            }
        }

        std::fs::write(&path, value).map_err(|err| StoreError::Io(path.clone(), err))?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(path, err)),
        }
    }
}
