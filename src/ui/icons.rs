use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Basename of the shared fallback badge under the icons directory.
pub const FALLBACK_ICON: &str = "default";

const EMPTY_ICON: &str = " ";

/// Per-symbol badge lookup backed by `<icons_dir>/<symbol>.txt` files.
///
/// Every symbol is resolved at most once: a failed read transitions that
/// entry one-way to the fallback badge and the result is memoized, so the
/// primary path is never retried. If the fallback asset itself is missing
/// the cell degrades to a blank placeholder instead of erroring.
pub struct IconResolver {
    dir: PathBuf,
    fallback: Option<String>,
    cache: HashMap<String, String>,
}

impl IconResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let fallback = read_icon(&dir.join(format!("{}.txt", FALLBACK_ICON)));
        Self {
            dir,
            fallback,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, symbol: &str) -> String {
        let key = symbol.to_lowercase();
        if let Some(icon) = self.cache.get(&key) {
            return icon.clone();
        }

        let icon = read_icon(&self.dir.join(format!("{}.txt", key)))
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| EMPTY_ICON.to_string());

        self.cache.insert(key, icon.clone());
        icon
    }
}

fn read_icon(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let glyph = text.lines().next()?.trim();
    if glyph.is_empty() {
        None
    } else {
        Some(glyph.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "coin-tracker-icons-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn resolves_symbol_badge_case_insensitively() {
        let dir = icons_dir("hit");
        fs::write(dir.join("btc.txt"), "₿\n").unwrap();
        fs::write(dir.join("default.txt"), "¤\n").unwrap();

        let mut icons = IconResolver::new(&dir);
        assert_eq!(icons.resolve("BTC"), "₿");
        assert_eq!(icons.resolve("btc"), "₿");
    }

    #[test]
    fn missing_badge_falls_back_once_and_never_retries() {
        let dir = icons_dir("fallback");
        fs::write(dir.join("default.txt"), "¤\n").unwrap();

        let mut icons = IconResolver::new(&dir);
        assert_eq!(icons.resolve("ETH"), "¤");

        // The badge appearing later must not be picked up: the fallback
        // decision is one-way per symbol.
        fs::write(dir.join("eth.txt"), "Ξ\n").unwrap();
        assert_eq!(icons.resolve("ETH"), "¤");
    }

    #[test]
    fn missing_fallback_degrades_to_blank_placeholder() {
        let dir = icons_dir("empty");

        let mut icons = IconResolver::new(&dir);
        assert_eq!(icons.resolve("XRP"), EMPTY_ICON);
    }
}
