use std::fs;
use std::io::{self, Write};
use std::path::Path;

use persistence_core::{
    key, Error, Locator, Reader, SourceOptions, Stage, Store, StringDataSource, Writer,
};
use persistence_formats::{connect, IniFormat, JsonFormat};

fn open(root: &Path, locator: &str) -> Box<dyn Store> {
    connect(
        &Locator::parse(locator).unwrap(),
        &SourceOptions::with_root(root),
        None,
    )
    .unwrap()
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn missing_json_file_is_bootstrapped() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path(), "json://data/players.json");

    assert!(store.key_paths().unwrap().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("data").join("players.json")).unwrap(),
        "{}"
    );
}

#[test]
fn missing_ini_file_is_bootstrapped_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path(), "properties://settings.properties");

    assert_eq!(store.get(&key!("anything")).unwrap(), None);
    assert_eq!(
        fs::read_to_string(dir.path().join("settings.properties")).unwrap(),
        ""
    );
}

#[test]
fn change_detection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.json");
    fs::write(&path, r#"{"server": {"motd": "a"}}"#).unwrap();
    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    let mut store = open(dir.path(), "json://motd.json");

    assert!(!store.set(&key!("server.motd"), Some("a")).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"server": {"motd": "a"}}"#);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);

    assert!(store.set(&key!("server.motd"), Some("b")).unwrap());
    let mut fresh = open(dir.path(), "json://motd.json");
    assert_eq!(
        fresh.get(&key!("server.motd")).unwrap().as_deref(),
        Some("b")
    );
}

#[test]
fn repeated_set_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counter.ini");
    let mut store = open(dir.path(), "ini://counter.ini");

    assert!(store.set(&key!("count"), Some("1")).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "count=1\n");

    fs::write(&path, "sentinel=unchanged\n").unwrap();
    assert!(!store.set(&key!("count"), Some("1")).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "sentinel=unchanged\n");
}

#[test]
fn read_only_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locked.ini");
    fs::write(&path, "a=1\n").unwrap();
    let mut store = open(dir.path(), "readonly:ini://locked.ini");

    assert_eq!(store.get(&key!("a")).unwrap().as_deref(), Some("1"));
    for value in [Some("1"), Some("2"), None] {
        let err = store.set(&key!("a"), value).unwrap_err();
        assert!(matches!(err, Error::ReadOnly { .. }));
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "a=1\n");
}

#[test]
fn read_only_missing_file_is_still_bootstrapped() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path(), "readonly:json://fresh.json");

    assert!(store.key_paths().unwrap().is_empty());
    assert!(dir.path().join("fresh.json").exists());
}

#[test]
fn archive_entries_are_readable_but_not_writable() {
    let dir = tempfile::tempdir().unwrap();
    write_zip(
        &dir.path().join("bundle.zip"),
        &[("config/defaults.json", r#"{"motd": "packaged"}"#)],
    );
    let mut store = open(dir.path(), "json://bundle.zip/config/defaults.json");

    assert_eq!(
        store.get(&key!("motd")).unwrap().as_deref(),
        Some("packaged")
    );
    assert!(!store.set(&key!("motd"), Some("packaged")).unwrap());

    let err = store.set(&key!("motd"), Some("changed")).unwrap_err();
    assert!(err.is_read_only());
    assert_eq!(store.get(&key!("motd")).unwrap().as_deref(), Some("packaged"));
}

#[test]
fn missing_archive_entry_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let zip_path = dir.path().join("bundle.zip");
    write_zip(&zip_path, &[("present.json", "{}")]);
    let before = fs::read(&zip_path).unwrap();
    let mut store = open(dir.path(), "json://bundle.zip/absent.json");

    let err = store.key_paths().unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Load));
    assert_eq!(err.io_cause().map(io::Error::kind), Some(io::ErrorKind::NotFound));
    assert_eq!(fs::read(&zip_path).unwrap(), before);
    assert!(!dir.path().join("absent.json").exists());
}

#[test]
fn corrupt_document_reports_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let mut store = open(dir.path(), "json://broken.json");

    let err = store.get(&key!("a")).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Parse));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn pretty_print_modifier_indents_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path(), "prettyprint:json://pretty.json");

    store.set(&key!("a.b"), Some("c")).unwrap();
    let written = fs::read_to_string(dir.path().join("pretty.json")).unwrap();
    assert_eq!(written, "{\n  \"a\": {\n    \"b\": \"c\"\n  }\n}");
}

#[test]
fn unknown_scheme_is_rejected() {
    let err = connect(
        &Locator::parse("yaml://data.yml").unwrap(),
        &SourceOptions::default(),
        None,
    )
    .err()
    .unwrap();
    assert!(matches!(err, Error::Locator(_)));
}

#[test]
fn formats_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let options = SourceOptions::with_root(dir.path());

    let mut json = StringDataSource::new(
        Locator::parse("json://round.json").unwrap(),
        JsonFormat::new(),
        &options,
    );
    let mut ini = StringDataSource::new(
        Locator::parse("ini://round.ini").unwrap(),
        IniFormat,
        &options,
    );

    let entries = [
        ("a", "1"),
        ("a.b", "2"),
        ("with space.x", "multi\nline"),
        ("z", ""),
    ];
    for (k, v) in entries {
        let k = key!(k);
        json.set(&k, Some(v)).unwrap();
        ini.set(&k, Some(v)).unwrap();
    }

    let mut json_again = StringDataSource::new(
        Locator::parse("json://round.json").unwrap(),
        JsonFormat::new(),
        &options,
    );
    let mut ini_again = StringDataSource::new(
        Locator::parse("ini://round.ini").unwrap(),
        IniFormat,
        &options,
    );
    assert_eq!(json_again.key_paths().unwrap(), json.key_paths().unwrap());
    assert_eq!(ini_again.key_paths().unwrap(), ini.key_paths().unwrap());
    for (k, v) in entries {
        assert_eq!(json_again.get(&key!(k)).unwrap().as_deref(), Some(v));
        assert_eq!(ini_again.get(&key!(k)).unwrap().as_deref(), Some(v));
    }
}
