//! Integration tests for snapcache

use std::io::{Cursor, Write};
use std::path::Path;

/// Build a zip archive laid out the way CI publishes example databases
fn example_db_archive(entries: &[(&[u8], &[u8])]) -> Vec<u8> {
    use sha2::{Digest, Sha384};
    use zip::write::SimpleFileOptions;

    let name = |bytes: &[u8]| hex::encode(Sha384::digest(bytes))[..16].to_string();
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for &(key, value) in entries {
        writer
            .start_file(
                format!("{}/{}", name(key), name(value)),
                SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(value).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn write_settings(dir: &Path, api_url: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[catalog]\napi_url = \"{}\"\n\n[cache]\ndirectory = \"{}\"\n",
            api_url,
            dir.join("ci").display()
        ),
    )
    .unwrap();
    path
}

mod cli_tests {
    use super::*;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn snapcache() -> Command {
        let mut cmd = cargo_bin_cmd!("snapcache");
        cmd.env_remove("GH_TOKEN").env_remove("SNAPCACHE_CONFIG");
        cmd
    }

    #[test]
    fn help_displays() {
        snapcache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Read-only pull-through cache"));
    }

    #[test]
    fn version_displays() {
        snapcache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("snapcache"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        snapcache()
            .args(["--config", path.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        snapcache()
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[catalog]"))
            .stdout(predicate::str::contains("hypofuzz-example-db"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        snapcache()
            .args(["--config", path.to_str().unwrap(), "config", "init"])
            .assert()
            .success();
        assert!(path.exists());
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[catalog\n").unwrap();
        snapcache()
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn read_rejects_bad_key() {
        let temp = TempDir::new().unwrap();
        let config = write_settings(temp.path(), "http://127.0.0.1:1");
        snapcache()
            .args(["--config", config.to_str().unwrap()])
            .args(["read", "acme", "widgets", "not-hex"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid key"));
        assert!(!temp.path().join("ci").exists());
    }

    #[test]
    fn unreachable_catalog_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let config = write_settings(temp.path(), "http://127.0.0.1:1");
        snapcache()
            .args(["--config", config.to_str().unwrap()])
            .args(["read", "acme", "widgets", "00"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not connect"))
            .stderr(predicate::str::contains("Hint:"));
    }
}

mod end_to_end {
    use super::*;
    use assert_cmd::cargo::cargo_bin_cmd;
    use httpmock::prelude::*;
    use predicates::prelude::*;
    use snapcache::config::schema::CatalogSettings;
    use snapcache::config::{CacheConfig, Credential};
    use snapcache::store::{ExampleStore, ReadOnlyCache};
    use tempfile::TempDir;

    fn serve_snapshot(
        server: &MockServer,
        archive: Vec<u8>,
    ) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
        let catalog = server.mock(|when, then| {
            when.method(GET).path("/repos/acme/widgets/actions/artifacts");
            then.status(200).body(
                serde_json::json!({
                    "total_count": 3,
                    "artifacts": [
                        {
                            "id": 1,
                            "name": "hypofuzz-example-db",
                            "created_at": "2024-01-01T00:00:00Z",
                            "archive_download_url": server.url("/old.zip")
                        },
                        {
                            "id": 2,
                            "name": "hypofuzz-example-db",
                            "created_at": "2024-05-01T00:00:00Z",
                            "archive_download_url": server.url("/new.zip")
                        },
                        {
                            "id": 3,
                            "name": "coverage-report",
                            "created_at": "2024-09-01T00:00:00Z",
                            "archive_download_url": server.url("/coverage.zip")
                        }
                    ]
                })
                .to_string(),
            );
        });
        let download = server.mock(|when, then| {
            when.method(GET).path("/new.zip");
            then.status(200).body(archive);
        });
        (catalog, download)
    }

    #[test]
    fn cache_pulls_newest_snapshot_once() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let (catalog, download) =
            serve_snapshot(&server, example_db_archive(&[(b"key".as_slice(), b"value".as_slice())]));

        let config = CacheConfig::new("acme", "widgets")
            .with_cache_dir(temp.path().join("ci"))
            .with_credential(Credential::new("ghp_test"));
        let settings = CatalogSettings {
            api_url: server.base_url(),
            ..CatalogSettings::default()
        };
        let cache = ReadOnlyCache::github(config, &settings);

        catalog.assert_hits(0);
        assert_eq!(cache.read(b"key").unwrap(), vec![b"value".to_vec()]);
        assert_eq!(cache.read(b"key").unwrap(), vec![b"value".to_vec()]);
        assert!(cache.read(b"missing").unwrap().is_empty());

        cache.save(b"key", b"other").unwrap();
        assert_eq!(cache.read(b"key").unwrap(), vec![b"value".to_vec()]);

        catalog.assert_hits(1);
        download.assert_hits(1);
    }

    #[test]
    fn cli_read_prints_hex_values() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        serve_snapshot(&server, example_db_archive(&[(b"\x01\x02".as_slice(), b"hello".as_slice())]));
        let config = write_settings(temp.path(), &server.base_url());

        cargo_bin_cmd!("snapcache")
            .env_remove("GH_TOKEN")
            .args(["--config", config.to_str().unwrap()])
            .args(["read", "acme", "widgets", "0102"])
            .assert()
            .success()
            .stdout(predicate::str::contains(hex::encode(b"hello")));
    }

    #[test]
    fn cli_resolve_json() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        serve_snapshot(&server, Vec::new());
        let config = write_settings(temp.path(), &server.base_url());

        cargo_bin_cmd!("snapcache")
            .env_remove("GH_TOKEN")
            .args(["--config", config.to_str().unwrap()])
            .args(["resolve", "acme", "widgets", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"id\": 2"));
        assert!(!temp.path().join("ci").exists());
    }

    #[test]
    fn cli_fetch_extracts_snapshot() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        serve_snapshot(&server, example_db_archive(&[(b"k".as_slice(), b"v".as_slice())]));
        let config = write_settings(temp.path(), &server.base_url());

        cargo_bin_cmd!("snapcache")
            .env_remove("GH_TOKEN")
            .args(["--config", config.to_str().unwrap()])
            .args(["fetch", "acme", "widgets"])
            .assert()
            .success();

        let scoped = temp
            .path()
            .join("ci")
            .join("acme")
            .join("widgets")
            .join("hypofuzz-example-db");
        assert_eq!(std::fs::read_dir(scoped).unwrap().count(), 1);
    }

    #[test]
    fn missing_artifact_name_fails() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        serve_snapshot(&server, Vec::new());
        let config = write_settings(temp.path(), &server.base_url());

        cargo_bin_cmd!("snapcache")
            .env_remove("GH_TOKEN")
            .args(["--config", config.to_str().unwrap()])
            .args(["read", "acme", "widgets", "00", "--artifact", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No snapshot named nope"));
    }
}
