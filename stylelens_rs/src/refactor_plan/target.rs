//! Choosing the stylesheet that receives extracted rules.

use std::sync::OnceLock;

use globset::{Glob, GlobMatcher};
use tracing::warn;

use crate::types::FileId;

/// Conventional global stylesheets, most specific framework layouts first.
const TARGET_PATTERNS: &[&str] = &[
    // Next.js
    "**/src/app/global.css",
    "**/src/styles/globals.css",
    "**/app/global.css",
    // Vite
    "**/src/main.css",
    "**/src/App.css",
    // Angular
    "**/src/styles.css",
    // Vue
    "**/src/assets/styles.css",
    "**/src/assets/main.css",
    // Astro and common layouts
    "**/src/styles/global.css",
    "**/src/global.css",
    "**/src/index.css",
    "**/src/app.css",
    "**/styles.css",
    "**/assets/css/main.css",
    "**/public/styles.css",
    "**/dist/styles.css",
    // Tailwind entry points
    "**/src/tailwind.css",
    "**/src/styles/tailwind.css",
    // CSS modules
    "**/src/**/*.module.css",
];

fn target_matchers() -> &'static [GlobMatcher] {
    static MATCHERS: OnceLock<Vec<GlobMatcher>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        TARGET_PATTERNS
            .iter()
            .filter_map(|pat| match Glob::new(pat) {
                Ok(glob) => Some(glob.compile_matcher()),
                Err(err) => {
                    warn!("invalid target glob '{}': {}", pat, err);
                    None
                }
            })
            .collect()
    })
}

/// Pick a stylesheet to append generated rules to.
///
/// Patterns are tried in priority order; the first one matching any candidate
/// wins, and among its matches the lexicographically smallest id is returned.
/// `None` means the host has nowhere to put a rule.
pub fn select_target_stylesheet(candidates: &[FileId]) -> Option<FileId> {
    for matcher in target_matchers() {
        let best = candidates
            .iter()
            .filter(|file| matcher.is_match(file.as_str()))
            .min();
        if let Some(file) = best {
            return Some(file.clone());
        }
    }
    None
}
