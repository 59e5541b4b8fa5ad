use crate::conf::ConfigError;
use glob::glob;
use std::collections::HashSet;
use std::path::PathBuf;

/// Returns `true` if the entry contains glob metacharacters.
pub fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Expands configured file entries into the ordered list of paths to track.
///
/// Literal entries are kept as given (they may not exist yet). Glob entries
/// expand to their matches in sorted order, at the position of the pattern.
/// A pattern matching nothing is kept literally when `keep_unmatched` is set,
/// so a file created later can still appear; otherwise it is an error.
///
/// A path listed twice is only tracked once, at its first position.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if a pattern is malformed, or
/// `ConfigError::NoMatches` for an empty expansion without `keep_unmatched`.
pub fn discover_files(entries: &[String], keep_unmatched: bool) -> Result<Vec<PathBuf>, ConfigError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for entry in entries {
        let expanded = if is_glob_pattern(entry) {
            let mut matches: Vec<PathBuf> = glob(entry)
                .map_err(|e| ConfigError::Glob {
                    pattern: entry.clone(),
                    source: e,
                })?
                .filter_map(Result::ok)
                .collect();
            matches.sort();

            if matches.is_empty() {
                if !keep_unmatched {
                    return Err(ConfigError::NoMatches {
                        pattern: entry.clone(),
                    });
                }
                tracing::debug!(pattern = %entry, "pattern matched nothing; tracking it literally");
                vec![PathBuf::from(entry)]
            } else {
                matches
            }
        } else {
            vec![PathBuf::from(entry)]
        };

        for path in expanded {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
