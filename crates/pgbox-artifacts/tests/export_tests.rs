//! File-level tests for artifact export: anchored merging, idempotent
//! re-export, and preservation of user edits.

use pgbox_artifacts::{
    COMPOSE_FILE, CONF_FILE, DOCKERFILE, INIT_SQL_FILE, ImageRef, ServiceOptions, export,
};
use pgbox_catalog::Catalog;
use pgbox_core::aggregate_with_arch;
use tempfile::TempDir;

fn opts(image: &str) -> ServiceOptions {
    ServiceOptions::new("pgbox-pg17-test", ImageRef::Image(image.to_string()))
}

#[test]
fn plain_server_exports_compose_only() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let agg = aggregate_with_arch::<&str>(&catalog, "17", "amd64", &[]).unwrap();

    let written = export(dir.path(), &agg, &opts("postgres:17")).unwrap();

    assert_eq!(written.len(), 1);
    assert!(dir.path().join(COMPOSE_FILE).exists());
    assert!(!dir.path().join(DOCKERFILE).exists());
    assert!(!dir.path().join(CONF_FILE).exists());
    assert!(!dir.path().join(INIT_SQL_FILE).exists());
}

#[test]
fn extension_request_exports_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let agg = aggregate_with_arch(&catalog, "17", "amd64", &["pg_cron", "pgvector"]).unwrap();

    export(dir.path(), &agg, &opts("pgbox-pg17-custom:abc")).unwrap();

    let dockerfile = std::fs::read_to_string(dir.path().join(DOCKERFILE)).unwrap();
    assert!(dockerfile.starts_with("ARG PG_MAJOR=17\nFROM postgres:17\n"));
    assert!(dockerfile.contains("postgresql-17-cron"));
    assert!(dockerfile.contains("postgresql-17-pgvector"));

    let compose = std::fs::read_to_string(dir.path().join(COMPOSE_FILE)).unwrap();
    assert!(compose.contains("container_name: pgbox-pg17-test"));
    assert!(compose.contains("shared_preload_libraries=pg_cron"));
    assert!(compose.contains("pg_isready"));

    let conf = std::fs::read_to_string(dir.path().join(CONF_FILE)).unwrap();
    assert!(conf.contains("shared_preload_libraries = 'pg_cron'"));
    assert!(conf.contains("cron.database_name = 'postgres'"));

    let init = std::fs::read_to_string(dir.path().join(INIT_SQL_FILE)).unwrap();
    assert!(init.contains("-- pgbox: begin pg_cron"));
    assert!(init.contains("CREATE EXTENSION IF NOT EXISTS pg_cron;"));
    assert!(init.contains("CREATE EXTENSION IF NOT EXISTS vector;"));
}

#[test]
fn init_fragments_are_ordered_by_name() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    // request order is reverse-alphabetical; file order must not be
    let agg = aggregate_with_arch(&catalog, "17", "amd64", &["pgvector", "hstore"]).unwrap();

    export(dir.path(), &agg, &opts("x")).unwrap();

    let init = std::fs::read_to_string(dir.path().join(INIT_SQL_FILE)).unwrap();
    let hstore = init.find("begin hstore").unwrap();
    let pgvector = init.find("begin pgvector").unwrap();
    assert!(hstore < pgvector);
}

#[test]
fn export_is_byte_for_byte_idempotent() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let agg =
        aggregate_with_arch(&catalog, "17", "amd64", &["pg_cron", "pgvector", "hypopg"]).unwrap();

    export(dir.path(), &agg, &opts("x")).unwrap();
    let first: Vec<String> = [DOCKERFILE, COMPOSE_FILE, CONF_FILE, INIT_SQL_FILE]
        .iter()
        .map(|f| std::fs::read_to_string(dir.path().join(f)).unwrap())
        .collect();

    export(dir.path(), &agg, &opts("x")).unwrap();
    let second: Vec<String> = [DOCKERFILE, COMPOSE_FILE, CONF_FILE, INIT_SQL_FILE]
        .iter()
        .map(|f| std::fs::read_to_string(dir.path().join(f)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn user_edits_outside_anchor_survive_reexport() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let agg = aggregate_with_arch(&catalog, "17", "amd64", &["pgvector"]).unwrap();

    export(dir.path(), &agg, &opts("x")).unwrap();

    // user appends a custom stanza after the anchor and tweaks the header
    let path = dir.path().join(DOCKERFILE);
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("\n# my extra layer\nRUN echo hello\n");
    std::fs::write(&path, &content).unwrap();

    export(dir.path(), &agg, &opts("x")).unwrap();

    let merged = std::fs::read_to_string(&path).unwrap();
    assert!(merged.contains("# my extra layer"));
    assert!(merged.contains("RUN echo hello"));
    assert!(merged.contains("postgresql-17-pgvector"));
    // still exactly one anchor pair
    assert_eq!(merged.matches("# pgbox:begin").count(), 1);
    assert_eq!(merged.matches("# pgbox:end").count(), 1);
}

#[test]
fn changed_request_replaces_anchored_content() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();

    let first = aggregate_with_arch(&catalog, "17", "amd64", &["pgvector"]).unwrap();
    export(dir.path(), &first, &opts("x")).unwrap();

    let second = aggregate_with_arch(&catalog, "17", "amd64", &["hypopg"]).unwrap();
    export(dir.path(), &second, &opts("x")).unwrap();

    let dockerfile = std::fs::read_to_string(dir.path().join(DOCKERFILE)).unwrap();
    assert!(dockerfile.contains("postgresql-17-hypopg"));
    assert!(!dockerfile.contains("postgresql-17-pgvector"));
}

#[test]
fn init_sql_volume_is_mounted_when_fragments_exist() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let agg = aggregate_with_arch(&catalog, "17", "amd64", &["hstore"]).unwrap();

    export(dir.path(), &agg, &opts("postgres:17")).unwrap();

    let compose = std::fs::read_to_string(dir.path().join(COMPOSE_FILE)).unwrap();
    assert!(compose.contains("./init.sql:/docker-entrypoint-initdb.d/init.sql:ro"));
}
