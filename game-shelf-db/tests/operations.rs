use game_shelf_catalog::{GameDraft, Genre, Platform};
use game_shelf_db::*;
use std::fs;
use tempfile::TempDir;

fn seed(conn: &rusqlite::Connection) {
    upsert_genre(
        conn,
        &Genre {
            id: 1,
            name: "RPG".to_string(),
        },
    )
    .unwrap();
    upsert_platform(
        conn,
        &Platform {
            id: 10,
            name: "Super Nintendo".to_string(),
        },
    )
    .unwrap();
}

fn draft(name: &str) -> GameDraft {
    GameDraft {
        id: None,
        name: name.to_string(),
        image: None,
        release_year: 1995,
        genre_id: 1,
        version: None,
    }
}

#[test]
fn upsert_genre_is_idempotent() {
    let conn = open_memory().unwrap();
    seed(&conn);
    upsert_genre(
        &conn,
        &Genre {
            id: 1,
            name: "Role-Playing".to_string(),
        },
    )
    .unwrap();

    let genres = list_genres(&conn).unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Role-Playing");
}

#[test]
fn insert_assigns_fresh_ids() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let mut with_id = draft("Chrono Trigger");
    with_id.id = Some(999);

    let a = insert_game(&conn, &with_id).unwrap();
    let b = insert_game(&conn, &draft("Chrono Trigger")).unwrap();
    assert_ne!(a, 999);
    assert_ne!(a, b);

    let game = find_game(&conn, a).unwrap().unwrap();
    assert_eq!(game.name, "Chrono Trigger");
    assert_eq!(game.version, 1);
}

#[test]
fn insert_with_unknown_genre_violates_foreign_key() {
    let conn = open_memory().unwrap();
    let mut orphan = draft("Orphan");
    orphan.genre_id = 77;
    assert!(insert_game(&conn, &orphan).is_err());
}

#[test]
fn update_checks_version() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let id = insert_game(&conn, &draft("Chrono Trigger")).unwrap();

    let mut edit = draft("Chrono Trigger DS");
    edit.version = Some(1);
    assert!(update_game(&conn, id, &edit).unwrap());
    assert_eq!(find_game(&conn, id).unwrap().unwrap().version, 2);

    // Same token again is now stale.
    assert!(!update_game(&conn, id, &edit).unwrap());

    // No token: last writer wins.
    edit.version = None;
    assert!(update_game(&conn, id, &edit).unwrap());
    assert_eq!(find_game(&conn, id).unwrap().unwrap().version, 3);
}

#[test]
fn update_missing_game_matches_nothing() {
    let conn = open_memory().unwrap();
    seed(&conn);
    assert!(!update_game(&conn, 5, &draft("Ghost")).unwrap());
}

#[test]
fn delete_cascades_platform_links() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let id = insert_game(&conn, &draft("Chrono Trigger")).unwrap();
    attach_platform(&conn, id, 10).unwrap();

    assert!(delete_game(&conn, id).unwrap());
    assert!(!delete_game(&conn, id).unwrap());
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.games, 0);
    assert_eq!(stats.platform_links, 0);
}

#[test]
fn detach_reports_missing_link() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let id = insert_game(&conn, &draft("Chrono Trigger")).unwrap();
    attach_platform(&conn, id, 10).unwrap();

    assert!(detach_platform(&conn, id, 10).unwrap());
    assert!(!detach_platform(&conn, id, 10).unwrap());
}

#[test]
fn duplicate_attach_keeps_one_link() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let id = insert_game(&conn, &draft("Chrono Trigger")).unwrap();
    assert!(attach_platform(&conn, id, 10).unwrap());
    assert!(!attach_platform(&conn, id, 10).unwrap());

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.platform_links, 1);
}

#[test]
fn seed_from_catalog_loads_yaml() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("genres")).unwrap();
    fs::create_dir(tmp.path().join("platforms")).unwrap();
    fs::write(
        tmp.path().join("genres").join("genres.yaml"),
        "- id: 1\n  name: RPG\n- id: 2\n  name: Shooter\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("platforms").join("all.yaml"),
        "- id: 1\n  name: PlayStation\n",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_catalog(&conn, tmp.path()).unwrap();
    assert_eq!(stats.genres, 2);
    assert_eq!(stats.platforms, 1);

    // Seeding twice upserts rather than duplicating.
    seed_from_catalog(&conn, tmp.path()).unwrap();
    let counts = catalog_stats(&conn).unwrap();
    assert_eq!(counts.genres, 2);
    assert_eq!(counts.platforms, 1);
}
