use std::{fs, process};

use autoscope_core::{BoardShape, Seed};
use autoscope_system_catalog::{Catalog, Navigator};

#[test]
fn builtin_catalog_fits_the_default_board() {
    let catalog = Catalog::builtin();
    let shape = BoardShape::new(64, 128).expect("valid shape");

    assert_eq!(catalog.len(), 32);
    for entry in catalog.entries() {
        assert!(!entry.seeds().is_empty());
        shape
            .fits(entry.rule().neighborhood())
            .unwrap_or_else(|error| panic!("{} does not fit: {error}", entry.rule().name()));
    }
}

#[test]
fn builtin_catalog_starts_with_amoeba_and_knows_larger_than_life_rules() {
    let catalog = Catalog::builtin();
    assert_eq!(Navigator::new().current_rule(&catalog).name(), "amoeba");

    let bugs = catalog.find("bugs").expect("bugs is builtin").rule();
    assert_eq!(bugs.neighborhood().total_weight(), 121);
    assert!(bugs.next_state(true, 34));
    assert!(bugs.next_state(true, 58));
    assert!(!bugs.next_state(true, 59));
    assert!(bugs.next_state(false, 45));
    assert!(!bugs.next_state(false, 46));

    let globe = catalog.find("globe").expect("globe is builtin").rule();
    assert_eq!(globe.neighborhood().total_weight(), 288);
}

#[test]
fn navigator_wraps_rules_and_resets_seed_selection() {
    let catalog = Catalog::builtin();
    let mut navigator = Navigator::new();

    let last = navigator.offset_rule(&catalog, -1);
    assert_eq!(last.name(), "ltl534413458");
    assert_eq!(navigator.rule_index(), catalog.len() - 1);

    let first = navigator.offset_rule(&catalog, 1);
    assert_eq!(first.name(), "amoeba");

    let mut navigator = Navigator::at(&catalog, "maze").expect("maze is builtin");
    assert_eq!(
        navigator.current_seed(&catalog),
        Seed::random(0.03).expect("valid density")
    );
    assert_eq!(navigator.offset_seed(&catalog, 2), Seed::square(8));
    assert_eq!(navigator.offset_seed(&catalog, -3), Seed::square(64));
    assert_eq!(navigator.offset_seed(&catalog, 1), Seed::random(0.03).expect("valid density"));

    let _ = navigator.offset_seed(&catalog, 4);
    assert_eq!(navigator.seed_index(), 4);
    let move_rule = navigator.offset_rule(&catalog, 1);
    assert_eq!(move_rule.name(), "move");
    assert_eq!(navigator.seed_index(), 0);
}

#[test]
fn navigator_at_unknown_rule_is_none() {
    assert_eq!(Navigator::at(&Catalog::builtin(), "no_such_rule"), None);
}

#[test]
fn catalog_file_loads_from_disk() {
    let path = std::env::temp_dir().join(format!("autoscope-catalog-{}.toml", process::id()));
    fs::write(
        &path,
        r#"
        version = 1

        [[rules]]
        name = "conway"
        survival = { counts = [2, 3] }
        birth = { counts = [3] }
        seeds = [{ kind = "square", side = 3 }]
        "#,
    )
    .expect("write catalog");

    let loaded = Catalog::from_path(&path);
    fs::remove_file(&path).expect("remove catalog");

    let catalog = loaded.expect("valid catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        Navigator::new().current_seed(&catalog),
        Seed::square(3)
    );
}

#[test]
fn missing_catalog_file_reports_its_path() {
    let path = std::env::temp_dir().join("autoscope-catalog-that-does-not-exist.toml");
    let error = Catalog::from_path(&path).expect_err("file is missing");
    assert!(format!("{error:#}").contains("autoscope-catalog-that-does-not-exist.toml"));
}
