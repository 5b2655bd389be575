use std::path::PathBuf;

use bookstack::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use bookstack::ui::layout::CellSize;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".bookstackrc");
    let content = r#"
# comment
--watch

--cell-size 8x16

--debug-log=events.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.cell_size, CellSize::parse("8x16"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".bookstackrc");
    let content = "--watch\n--pin-offset 80\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "bookstack".to_string(),
        "--pin-offset".to_string(),
        "200".to_string(),
        "--no-mouse".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.no_mouse, "cli flags should be applied");
    assert_eq!(effective.pin_offset, Some(200), "cli should override pin offset");
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_layers_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".bookstackrc");
    std::fs::write(&global, "--perf\n--dead-zone 20\n--card-heights 300,280,260,240\n").unwrap();
    std::fs::write(&local, "--dead-zone 4\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert!(merged.perf);
    assert_eq!(merged.dead_zone, Some(4));
    assert_eq!(merged.card_heights, Some([300, 280, 260, 240]));
}

#[test]
fn test_parse_flag_tokens_ignores_positional_file() {
    let args = vec![
        "bookstack".to_string(),
        "catalog.json".to_string(),
        "--watch".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(
        flags,
        ConfigFlags {
            watch: true,
            ..ConfigFlags::default()
        }
    );
}

#[test]
fn test_short_watch_flag_enables_watching() {
    let args = vec![
        "bookstack".to_string(),
        "-w".to_string(),
        "catalog.json".to_string(),
    ];
    let effective = ConfigFlags::default().union(&parse_flag_tokens(&args));
    assert!(effective.watch);
}
