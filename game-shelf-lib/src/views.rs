//! View models produced by the handlers.
//!
//! These are plain data: whatever renders them (the HTTP surface serializes
//! them to JSON) never needs to call back into the store.

use game_shelf_catalog::{Game, GameForm, Genre, GenreId, Platform, ValidationErrors};
use serde::Serialize;

/// One entry of a `<select>`-style list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    /// Genre choices valued by id, with `selected` marking the current one.
    pub fn genres(genres: &[Genre], selected: Option<GenreId>) -> Vec<Self> {
        genres
            .iter()
            .map(|g| Self {
                value: g.id.to_string(),
                text: g.name.clone(),
                selected: Some(g.id) == selected,
            })
            .collect()
    }

    /// Platform choices valued by id, in the order given.
    pub fn platforms(platforms: &[Platform]) -> Vec<Self> {
        platforms
            .iter()
            .map(|p| Self {
                value: p.id.to_string(),
                text: p.name.clone(),
                selected: false,
            })
            .collect()
    }
}

/// The create form.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePage {
    pub form: GameForm,
    pub genre_options: Vec<SelectOption>,
    pub errors: ValidationErrors,
}

impl CreatePage {
    pub fn new(form: GameForm, genres: &[Genre], errors: ValidationErrors) -> Self {
        let selected = form.genre_id.trim().parse().ok();
        Self {
            genre_options: SelectOption::genres(genres, selected),
            form,
            errors,
        }
    }
}

/// The edit form, also shown after adding or removing a platform.
///
/// `platforms` are the ones linked to the game; `platform_options` is the
/// pick list for linking another one.
#[derive(Debug, Clone, Serialize)]
pub struct EditPage {
    pub form: GameForm,
    pub genre: Option<Genre>,
    pub platforms: Vec<Platform>,
    pub genre_options: Vec<SelectOption>,
    pub platform_options: Vec<SelectOption>,
    pub errors: ValidationErrors,
}

impl EditPage {
    pub fn for_game(game: &Game, genres: &[Genre], platforms: &[Platform]) -> Self {
        Self {
            form: GameForm::from_game(game),
            genre: game.genre.clone(),
            platforms: game.platforms.clone(),
            genre_options: SelectOption::genres(genres, Some(game.genre_id)),
            platform_options: SelectOption::platforms(platforms),
            errors: ValidationErrors::default(),
        }
    }

    /// Echo a rejected submission back with its errors.
    pub fn invalid(form: GameForm, genres: &[Genre], errors: ValidationErrors) -> Self {
        let selected = form.genre_id.trim().parse().ok();
        Self {
            genre_options: SelectOption::genres(genres, selected),
            form,
            genre: None,
            platforms: Vec::new(),
            platform_options: Vec::new(),
            errors,
        }
    }
}

/// A rendered page and its model.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", content = "model")]
pub enum Page {
    List(Vec<Game>),
    Detail(Game),
    Create(CreatePage),
    Edit(EditPage),
    Delete(Game),
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::List(_) => "List",
            Page::Detail(_) => "Detail",
            Page::Create(_) => "Create",
            Page::Edit(_) => "Edit",
            Page::Delete(_) => "Delete",
        }
    }
}

/// Where a redirect sends the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::List => "/games",
        }
    }
}

/// What a handler asks the HTTP layer to do.
#[derive(Debug, Clone)]
pub enum Outcome {
    Render(Page),
    Redirect(Route),
}

impl Outcome {
    pub fn page(&self) -> Option<&Page> {
        match self {
            Outcome::Render(page) => Some(page),
            Outcome::Redirect(_) => None,
        }
    }

    pub fn is_redirect_to(&self, route: Route) -> bool {
        matches!(self, Outcome::Redirect(r) if *r == route)
    }
}
