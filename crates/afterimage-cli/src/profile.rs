use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Player state that outlives a session.
///
/// Two scalar concerns: the highest level ever reached (written through the
/// moment it grows) and a pair of presentation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub highest_level: u32,
    pub sound_enabled: bool,
    pub dark_theme: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            highest_level: 0,
            sound_enabled: true,
            dark_theme: true,
        }
    }
}

pub trait ProfileStore {
    /// Loads the profile, falling back to defaults when the file is missing
    /// or unreadable.
    fn load(&self) -> Profile;
    fn save(&self, profile: &Profile) -> io::Result<()>;
}

/// JSON-file profile store under the platform config directory.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    #[must_use]
    pub fn new() -> Self {
        let path = if let Some(dirs) = ProjectDirs::from("", "", "afterimage") {
            dirs.config_dir().join("profile.json")
        } else {
            PathBuf::from("afterimage_profile.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Profile {
        if let Ok(bytes) = fs::read(&self.path)
            && let Ok(profile) = serde_json::from_slice::<Profile>(&bytes)
        {
            return profile;
        }
        Profile::default()
    }

    fn save(&self, profile: &Profile) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(profile).map_err(io::Error::other)?;
        fs::write(&self.path, data)
    }
}
