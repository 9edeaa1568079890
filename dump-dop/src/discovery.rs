//! SBET / POS companion file discovery
use log::debug;
use pgps::prelude::CompanionResolver;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Searches the navigation file of a PGPS file among the files
/// sharing its acquisition date (YYMMDD), in its own directory, its parent
/// and the sibling `pos` and `sbet` directories.
/// Post processed SBET files are prefered over real time POS files.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryResolver;

/// YYMMDD token of a `..YYMMDD_HHMM.pgps` file name
fn date_token(name: &str) -> Option<&str> {
    let start = name.len().checked_sub(16)?;
    name.get(start..start + 6)
}

/// Lower ranks are better, `None` for unrelated files
fn rank(path: &Path, date: &str) -> Option<u8> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    if !name.contains(date) {
        return None;
    }
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    match extension.as_str() {
        "out" => Some(0),
        "pos" => Some(1),
        _ => None,
    }
}

impl CompanionResolver for DirectoryResolver {
    fn resolve(&self, gps: &Path) -> Option<PathBuf> {
        let name = gps.file_name()?.to_string_lossy().to_string();
        let date = date_token(&name)?;

        let dir = match gps.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut search = [
            dir.clone(),
            dir.join(".."),
            dir.join("..").join("pos"),
            dir.join("..").join("sbet"),
        ]
        .iter()
        .filter_map(|dir| fs::canonicalize(dir).ok())
        .collect::<Vec<_>>();

        search.sort();
        search.dedup();

        let mut candidates = Vec::new();

        for dir in search.iter() {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Some(rank) = rank(&path, date) {
                    debug!("candidate \"{}\"", path.display());
                    candidates.push((rank, path));
                }
            }
        }

        candidates.sort();
        candidates.dedup();
        candidates.into_iter().map(|(_, path)| path).next()
    }
}
