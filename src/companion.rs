//! Navigation companion file resolution.
//! How a PGPS file is paired with its SBET/POS file depends on how the survey
//! data is organized on disk, so this is left to the caller.
use std::path::{Path, PathBuf};

/// Finds the navigation file that goes with a PGPS file
pub trait CompanionResolver {
    /// Returns the navigation file path, `None` if none could be found
    fn resolve(&self, gps: &Path) -> Option<PathBuf>;
}

/// Always resolves to the same, user provided, navigation file
#[derive(Debug, Clone)]
pub struct FixedCompanion(pub PathBuf);

impl CompanionResolver for FixedCompanion {
    fn resolve(&self, _: &Path) -> Option<PathBuf> {
        if self.0.is_file() {
            Some(self.0.clone())
        } else {
            None
        }
    }
}

impl<F: Fn(&Path) -> Option<PathBuf>> CompanionResolver for F {
    fn resolve(&self, gps: &Path) -> Option<PathBuf> {
        self(gps)
    }
}
