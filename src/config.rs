use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ui::layout::CellSize;

/// Flags that may come from the command line or an rc file.
///
/// Filter selection and search text are not persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_mouse: bool,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
    pub cell_size: Option<CellSize>,
    pub dead_zone: Option<u32>,
    pub pin_offset: Option<i64>,
    pub card_heights: Option<[i32; 4]>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans accumulate, values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_mouse: self.no_mouse || other.no_mouse,
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            cell_size: other.cell_size.or(self.cell_size),
            dead_zone: other.dead_zone.or(self.dead_zone),
            pin_offset: other.pin_offset.or(self.pin_offset),
            card_heights: other.card_heights.or(self.card_heights),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("bookstack").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("bookstack")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("bookstack").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("bookstack")
                .join("config");
        }
    }

    PathBuf::from(".bookstackrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".bookstackrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# bookstack defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(cell) = flags.cell_size {
        lines.push(format!("--cell-size {}x{}", cell.width_px, cell.height_px));
    }
    if let Some(px) = flags.dead_zone {
        lines.push(format!("--dead-zone {px}"));
    }
    if let Some(px) = flags.pin_offset {
        lines.push(format!("--pin-offset {px}"));
    }
    if let Some([a, b, c, d]) = flags.card_heights {
        lines.push(format!("--card-heights {a},{b},{c},{d}"));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens; unknown tokens and bad values are
/// skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let mut value = || {
            inline.map(ToOwned::to_owned).or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "-w" | "--watch" => flags.watch = true,
            "--no-mouse" => flags.no_mouse = true,
            "--perf" => flags.perf = true,
            "--debug-log" => {
                if let Some(v) = value() {
                    flags.debug_log = Some(PathBuf::from(v));
                }
            }
            "--cell-size" => {
                if let Some(cell) = value().as_deref().and_then(CellSize::parse) {
                    flags.cell_size = Some(cell);
                }
            }
            "--dead-zone" => {
                if let Some(px) = value().and_then(|v| v.parse().ok()) {
                    flags.dead_zone = Some(px);
                }
            }
            "--pin-offset" => {
                if let Some(px) = value().and_then(|v| v.parse().ok()) {
                    flags.pin_offset = Some(px);
                }
            }
            "--card-heights" => {
                if let Some(heights) = value().as_deref().and_then(parse_card_heights) {
                    flags.card_heights = Some(heights);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

/// Parse four comma-separated card heights, widest breakpoint first.
pub fn parse_card_heights(s: &str) -> Option<[i32; 4]> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<i32>().ok().filter(|v| *v > 0))
        .collect::<Option<Vec<_>>>()?;
    values.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "bookstack",
            "--watch",
            "--no-mouse",
            "--cell-size",
            "8x16",
            "--dead-zone=25",
            "--pin-offset",
            "150",
            "--card-heights=300,280,260,240",
            "--debug-log=events.log",
            "catalog.json",
        ]));
        assert!(flags.watch);
        assert!(flags.no_mouse);
        assert_eq!(flags.cell_size, CellSize::parse("8x16"));
        assert_eq!(flags.dead_zone, Some(25));
        assert_eq!(flags.pin_offset, Some(150));
        assert_eq!(flags.card_heights, Some([300, 280, 260, 240]));
        assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
    }

    #[test]
    fn test_parse_flag_tokens_skips_invalid_values() {
        let flags = parse_flag_tokens(&tokens(&[
            "--cell-size=huge",
            "--dead-zone",
            "-3",
            "--card-heights=1,2,3",
        ]));
        assert_eq!(flags.cell_size, None);
        assert_eq!(flags.dead_zone, None);
        assert_eq!(flags.card_heights, None);
    }

    #[test]
    fn test_parse_card_heights_requires_four_positive_values() {
        assert_eq!(parse_card_heights("280,260,240,220"), Some([280, 260, 240, 220]));
        assert_eq!(parse_card_heights("280,260,240"), None);
        assert_eq!(parse_card_heights("280,0,240,220"), None);
    }

    #[test]
    fn test_config_union_prefers_other_for_values() {
        let file = ConfigFlags {
            watch: true,
            dead_zone: Some(20),
            pin_offset: Some(80),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            perf: true,
            dead_zone: Some(5),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.perf);
        assert_eq!(merged.dead_zone, Some(5));
        assert_eq!(merged.pin_offset, Some(80));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            watch: true,
            no_mouse: true,
            perf: true,
            debug_log: Some(PathBuf::from("events.log")),
            cell_size: CellSize::parse("9x18"),
            dead_zone: Some(12),
            pin_offset: Some(140),
            card_heights: Some([300, 270, 250, 230]),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
