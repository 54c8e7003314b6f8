//! Locating the Red Alert 2 setup archive on disk.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// File name of the setup archive.
pub const SETUP_MIX_NAME: &str = "Setup.mix";

/// Environment variable that overrides the search.
pub const SETUP_MIX_ENV: &str = "KIROV_SETUP_MIX";

const GAME_DIR: [&str; 2] = ["EA Games", "Command & Conquer Red Alert II"];

/// Find `Setup.mix`.
///
/// Checks, in order: the `KIROV_SETUP_MIX` variable, the current directory,
/// its parent, and the usual install locations under `ProgramFiles`,
/// `ProgramFiles(x86)` and the user's documents folder. Returns the first
/// candidate that exists as a file.
pub fn locate_setup_mix() -> Option<PathBuf> {
    let current_dir = env::current_dir().ok();
    let candidates =
        setup_mix_candidates(current_dir.as_deref(), |key| env::var_os(key).map(PathBuf::from));

    let found = candidates.into_iter().find(|path| path.is_file());
    debug!(found = ?found, "setup archive search finished");
    found
}

/// Candidate locations in search order.
///
/// `var` resolves environment variables; it is a parameter so the search
/// order can be checked without touching the process environment.
pub fn setup_mix_candidates<F>(current_dir: Option<&Path>, var: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let mut candidates = Vec::new();

    if let Some(explicit) = var(SETUP_MIX_ENV) {
        candidates.push(explicit);
    }

    if let Some(dir) = current_dir {
        candidates.push(dir.join(SETUP_MIX_NAME));
        if let Some(parent) = dir.parent() {
            candidates.push(parent.join(SETUP_MIX_NAME));
        }
    }

    for key in ["ProgramFiles", "ProgramFiles(x86)"] {
        if let Some(root) = var(key) {
            candidates.push(root.join(GAME_DIR[0]).join(GAME_DIR[1]).join(SETUP_MIX_NAME));
        }
    }

    if let Some(documents) = documents_dir(&var) {
        candidates.push(documents.join("Red Alert 2").join(SETUP_MIX_NAME));
    }

    candidates
}

fn documents_dir<F>(var: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    var("USERPROFILE")
        .or_else(|| var("HOME"))
        .map(|home| home.join("Documents"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let vars = |key: &str| match key {
            SETUP_MIX_ENV => Some(PathBuf::from("/override/Setup.mix")),
            "ProgramFiles" => Some(PathBuf::from("/pf")),
            "HOME" => Some(PathBuf::from("/home/user")),
            _ => None,
        };

        let candidates = setup_mix_candidates(Some(Path::new("/games/ra2/bin")), vars);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/override/Setup.mix"),
                PathBuf::from("/games/ra2/bin/Setup.mix"),
                PathBuf::from("/games/ra2/Setup.mix"),
                PathBuf::from("/pf/EA Games/Command & Conquer Red Alert II/Setup.mix"),
                PathBuf::from("/home/user/Documents/Red Alert 2/Setup.mix"),
            ]
        );
    }

    #[test]
    fn test_no_environment() {
        let candidates = setup_mix_candidates(None, |_| None);
        assert!(candidates.is_empty());
    }
}
