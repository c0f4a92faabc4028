use game_shelf_catalog::{Game, GameForm, Genre, Platform};

fn snes() -> Platform {
    Platform {
        id: 1,
        name: "Super Nintendo".to_string(),
    }
}

fn chrono_trigger() -> Game {
    Game {
        id: 42,
        name: "Chrono Trigger".to_string(),
        image: Some("/img/chrono.png".to_string()),
        release_year: 1995,
        genre_id: 3,
        version: 2,
        genre: Some(Genre {
            id: 3,
            name: "RPG".to_string(),
        }),
        platforms: Vec::new(),
    }
}

#[test]
fn add_platform_skips_duplicates() {
    let mut game = chrono_trigger();
    assert!(game.add_platform(snes()));
    assert!(!game.add_platform(snes()));
    assert_eq!(game.platforms.len(), 1);
    assert!(game.has_platform(1));
}

#[test]
fn remove_platform_absent_is_none() {
    let mut game = chrono_trigger();
    game.add_platform(snes());
    assert!(game.remove_platform(2).is_none());
    assert_eq!(game.platforms, vec![snes()]);
    assert_eq!(game.remove_platform(1), Some(snes()));
    assert!(game.platforms.is_empty());
}

#[test]
fn form_prefills_from_game() {
    let form = GameForm::from_game(&chrono_trigger());
    assert_eq!(form.id, Some(42));
    assert_eq!(form.name, "Chrono Trigger");
    assert_eq!(form.image, "/img/chrono.png");
    assert_eq!(form.release_year, "1995");
    assert_eq!(form.genre_id, "3");
    assert_eq!(form.version, Some(2));
}

#[test]
fn valid_form_produces_trimmed_draft() {
    let form = GameForm {
        id: Some(5),
        name: "  Chrono Trigger ".to_string(),
        image: "   ".to_string(),
        release_year: "1995".to_string(),
        genre_id: "3".to_string(),
        version: Some(1),
    };
    let draft = form.validate().unwrap();
    assert_eq!(draft.id, Some(5));
    assert_eq!(draft.name, "Chrono Trigger");
    assert_eq!(draft.image, None);
    assert_eq!(draft.release_year, 1995);
    assert_eq!(draft.genre_id, 3);
    assert_eq!(draft.version, Some(1));
}

#[test]
fn invalid_form_collects_every_field_error() {
    let form = GameForm {
        name: String::new(),
        image: "x".repeat(300),
        release_year: "nineteen".to_string(),
        genre_id: "0".to_string(),
        ..Default::default()
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 4);
    for field in ["name", "image", "release_year", "genre_id"] {
        assert!(errors.get(field).is_some(), "missing error for {field}");
    }
}

#[test]
fn release_year_before_floor_is_rejected() {
    let form = GameForm {
        name: "Pong".to_string(),
        release_year: "1940".to_string(),
        genre_id: "1".to_string(),
        ..Default::default()
    };
    let errors = form.validate().unwrap_err();
    assert!(errors.get("release_year").is_some());
}
