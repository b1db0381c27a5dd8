use std::path::Path;

use modmig_context::MigrationContext;
use modmig_core::StructuralOps;
use serde_json::json;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[test]
fn rename_moves_within_root() {
    let dir = tempdir().unwrap();
    write(dir.path(), "world.sav", "{}");
    let ctx = MigrationContext::new(dir.path());
    ctx.rename_file(Path::new("world.sav"), Path::new("overworld.sav"))
        .unwrap();
    assert!(!dir.path().join("world.sav").exists());
    assert!(dir.path().join("overworld.sav").exists());
}

#[test]
fn rename_missing_source_reports_file_not_found() {
    let dir = tempdir().unwrap();
    let ctx = MigrationContext::new(dir.path());
    let err = ctx
        .rename_file(Path::new("absent.sav"), Path::new("other.sav"))
        .unwrap_err();
    assert_eq!(err.info().code, "modmig.file_not_found");
}

#[test]
fn move_creates_destination_parents() {
    let dir = tempdir().unwrap();
    write(dir.path(), "world.sav", "{}");
    let ctx = MigrationContext::new(dir.path());
    ctx.move_file(Path::new("world.sav"), Path::new("regions/north/world.sav"))
        .unwrap();
    assert!(dir.path().join("regions/north/world.sav").exists());
}

#[test]
fn delete_file_is_idempotent() {
    let dir = tempdir().unwrap();
    write(dir.path(), "stale.sav", "{}");
    let ctx = MigrationContext::new(dir.path());
    ctx.delete_file(Path::new("stale.sav")).unwrap();
    ctx.delete_file(Path::new("stale.sav")).unwrap();
    assert!(!dir.path().join("stale.sav").exists());
}

#[test]
fn read_and_write_round_trip_trees() {
    let dir = tempdir().unwrap();
    let ctx = MigrationContext::new(dir.path());
    let tree = json!({ "settlers": 3 });
    ctx.write_file(Path::new("town.sav"), &tree).unwrap();
    assert_eq!(ctx.read_file(Path::new("town.sav")).unwrap(), tree);
}

#[test]
fn directory_lifecycle() {
    let dir = tempdir().unwrap();
    let ctx = MigrationContext::new(dir.path());
    ctx.create_dir(Path::new("archive/old")).unwrap();
    assert!(dir.path().join("archive/old").is_dir());

    write(dir.path(), "archive/old/a.sav", "{}");
    let err = ctx.delete_dir(Path::new("archive/old"), false).unwrap_err();
    assert_eq!(err.info().code, "modmig.context_io");

    ctx.delete_dir(Path::new("archive"), true).unwrap();
    assert!(!dir.path().join("archive").exists());
    // missing directory is a no-op
    ctx.delete_dir(Path::new("archive"), true).unwrap();
}

#[test]
fn list_files_honors_pattern_recursion_and_sorting() {
    let dir = tempdir().unwrap();
    write(dir.path(), "b.sav", "{}");
    write(dir.path(), "a.sav", "{}");
    write(dir.path(), "notes.txt", "x");
    write(dir.path(), "regions/c.sav", "{}");
    let ctx = MigrationContext::new(dir.path());

    let shallow = ctx.list_files("*.sav", false).unwrap();
    assert_eq!(shallow, vec![Path::new("a.sav"), Path::new("b.sav")]);

    let deep = ctx.list_files("**/*.sav", true).unwrap();
    assert_eq!(
        deep,
        vec![
            Path::new("a.sav").to_path_buf(),
            Path::new("b.sav").to_path_buf(),
            Path::new("regions/c.sav").to_path_buf(),
        ]
    );
}

#[test]
fn list_dirs_matches_directories_only() {
    let dir = tempdir().unwrap();
    write(dir.path(), "regions/north/a.sav", "{}");
    write(dir.path(), "maps/b.sav", "{}");
    let ctx = MigrationContext::new(dir.path());
    let dirs = ctx.list_dirs("*", false).unwrap();
    assert_eq!(dirs, vec![Path::new("maps"), Path::new("regions")]);
}
