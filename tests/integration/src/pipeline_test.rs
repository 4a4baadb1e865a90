//! End-to-end pipeline test: catalog lookup -> aggregation -> naming
//! -> rendered artifacts, exercised against a temp directory without a
//! container runtime.

use pgbox_artifacts::{COMPOSE_FILE, DOCKERFILE, INIT_SQL_FILE, ImageRef, ServiceOptions, export};
use pgbox_catalog::Catalog;
use pgbox_core::{aggregate_with_arch, container_name, image_name};
use tempfile::TempDir;

#[test]
fn full_pipeline_for_extension_request() {
    let catalog = Catalog::builtin();
    let extensions = ["hstore", "pgvector", "hypopg"];

    let agg = aggregate_with_arch(&catalog, "17", "amd64", &extensions).unwrap();
    assert_eq!(
        agg.packages,
        vec!["postgresql-17-hypopg", "postgresql-17-pgvector"]
    );

    let container = container_name(&catalog, "17", &extensions);
    let image = image_name(&catalog, "17", &extensions);
    assert!(container.starts_with("pgbox-pg17-"));
    assert!(image.starts_with("pgbox-pg17-custom:"));

    let dir = TempDir::new().unwrap();
    let opts = ServiceOptions::new(&container, ImageRef::Build(".".to_string()));
    let written = export(dir.path(), &agg, &opts).unwrap();
    assert_eq!(written.len(), 3); // Dockerfile, compose, init.sql; no conf

    let dockerfile = std::fs::read_to_string(dir.path().join(DOCKERFILE)).unwrap();
    assert!(dockerfile.contains("postgresql-17-pgvector"));

    let init = std::fs::read_to_string(dir.path().join(INIT_SQL_FILE)).unwrap();
    assert!(init.contains("CREATE EXTENSION IF NOT EXISTS hstore;"));
    assert!(init.contains("CREATE EXTENSION IF NOT EXISTS vector;"));
    assert!(init.contains("CREATE EXTENSION IF NOT EXISTS hypopg;"));
}

#[test]
fn pipeline_is_deterministic_across_permutations() {
    let catalog = Catalog::builtin();

    let forward = aggregate_with_arch(&catalog, "17", "amd64", &["pg_cron", "pgvector"]).unwrap();
    let backward = aggregate_with_arch(&catalog, "17", "amd64", &["pgvector", "pg_cron"]).unwrap();
    assert_eq!(forward.packages, backward.packages);
    assert_eq!(forward.gucs, backward.gucs);
    assert_eq!(
        container_name(&catalog, "17", &["pg_cron", "pgvector"]),
        container_name(&catalog, "17", &["pgvector", "pg_cron"]),
    );

    // rendered bytes match too
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let opts = ServiceOptions::new("c", ImageRef::Build(".".to_string()));
    export(dir_a.path(), &forward, &opts).unwrap();
    export(dir_b.path(), &backward, &opts).unwrap();
    for file in [DOCKERFILE, COMPOSE_FILE, INIT_SQL_FILE] {
        assert_eq!(
            std::fs::read_to_string(dir_a.path().join(file)).unwrap(),
            std::fs::read_to_string(dir_b.path().join(file)).unwrap(),
            "{} differs between permutations",
            file
        );
    }
}

#[test]
fn reexport_after_user_edit_keeps_both_halves() {
    let catalog = Catalog::builtin();
    let agg = aggregate_with_arch(&catalog, "17", "amd64", &["pg_cron"]).unwrap();
    let dir = TempDir::new().unwrap();
    let opts = ServiceOptions::new("pgbox-pg17-x", ImageRef::Build(".".to_string()));

    export(dir.path(), &agg, &opts).unwrap();

    // user customizes the compose file outside the anchor
    let compose_path = dir.path().join(COMPOSE_FILE);
    let mut compose = std::fs::read_to_string(&compose_path).unwrap();
    compose.push_str("\n# deployed to staging on fridays\n");
    std::fs::write(&compose_path, &compose).unwrap();

    export(dir.path(), &agg, &opts).unwrap();

    let merged = std::fs::read_to_string(&compose_path).unwrap();
    assert!(merged.contains("# deployed to staging on fridays"));
    assert!(merged.contains("shared_preload_libraries=pg_cron"));
}

#[test]
fn conflicting_request_fails_before_rendering() {
    let catalog = Catalog::builtin();
    // pg_partman and pg_cron agree on nothing conflicting in the
    // builtin catalog, so drive the error through unknown names
    // instead: the pipeline must fail before artifacts exist.
    let dir = TempDir::new().unwrap();
    let err = aggregate_with_arch(&catalog, "17", "amd64", &["pgvector", "nope"]).unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
