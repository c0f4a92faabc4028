//! The game catalog handlers: one function per use case.
//!
//! Each handler receives the request's unit of work explicitly, issues its
//! store calls one after another, and returns an [`Outcome`] for the HTTP
//! layer to turn into a response.

use game_shelf_catalog::{GameForm, GameId, PlatformId, Relations, StoreError, UnitOfWork};

use crate::error::{HandlerError, HandlerResult};
use crate::views::{CreatePage, EditPage, Outcome, Page, Route};

fn render(page: Page) -> HandlerResult<Outcome> {
    Ok(Outcome::Render(page))
}

fn require_id(id: Option<GameId>) -> HandlerResult<GameId> {
    id.ok_or(HandlerError::MissingId { entity: "Game" })
}

/// Every game with its genre and platforms.
pub fn list(store: &mut impl UnitOfWork) -> HandlerResult<Outcome> {
    let games = store.list_games(Relations::ALL)?;
    render(Page::List(games))
}

/// One game with its genre.
pub fn detail(store: &mut impl UnitOfWork, id: Option<GameId>) -> HandlerResult<Outcome> {
    let id = require_id(id)?;
    let game = store
        .find_game(id, Relations::GENRE)?
        .ok_or_else(|| HandlerError::game_not_found(id))?;
    render(Page::Detail(game))
}

/// An empty create form with the genre choices.
pub fn create_form(store: &mut impl UnitOfWork) -> HandlerResult<Outcome> {
    let genres = store.genres()?;
    render(Page::Create(CreatePage::new(
        GameForm::default(),
        &genres,
        Default::default(),
    )))
}

/// Validate and insert a new game.
///
/// Names are not required to be unique. The store assigns the id; any id in
/// the form is ignored.
pub fn create_submit(store: &mut impl UnitOfWork, form: GameForm) -> HandlerResult<Outcome> {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            log::debug!("Rejected new game: {}", errors);
            let genres = store.genres()?;
            return render(Page::Create(CreatePage::new(form, &genres, errors)));
        }
    };

    let name = draft.name.clone();
    store.stage_insert(draft);
    let summary = store.commit()?;
    if let Some(id) = summary.inserted.first() {
        log::info!("Created game {} '{}'", id, name);
    }
    Ok(Outcome::Redirect(Route::List))
}

/// The edit form for a game, with genre and platform choices.
pub fn edit_form(store: &mut impl UnitOfWork, id: Option<GameId>) -> HandlerResult<Outcome> {
    let id = require_id(id)?;
    let game = store
        .find_game(id, Relations::PLATFORMS)?
        .ok_or_else(|| HandlerError::game_not_found(id))?;
    let genres = store.genres()?;
    let platforms = store.platforms_by_name()?;
    render(Page::Edit(EditPage::for_game(&game, &genres, &platforms)))
}

/// Validate and apply an edit.
///
/// The path id must match the id inside the form. A commit conflict is
/// reported as not-found when the game has since been deleted, and as a
/// conflict otherwise; it is never retried.
pub fn edit_submit(
    store: &mut impl UnitOfWork,
    id: GameId,
    form: GameForm,
) -> HandlerResult<Outcome> {
    if form.id != Some(id) {
        log::warn!("Edit of game {} carried id {:?}", id, form.id);
        return Err(HandlerError::game_not_found(id));
    }

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            log::debug!("Rejected edit of game {}: {}", id, errors);
            let genres = store.genres()?;
            return render(Page::Edit(EditPage::invalid(form, &genres, errors)));
        }
    };

    store.stage_update(id, draft);
    match store.commit() {
        Ok(_) => {
            log::info!("Updated game {}", id);
            Ok(Outcome::Redirect(Route::List))
        }
        Err(StoreError::Conflict { game_id }) => {
            if !game_exists(store, game_id)? {
                log::warn!("Game {} was deleted while being edited", game_id);
                return Err(HandlerError::game_not_found(game_id));
            }
            log::warn!("Game {} was modified while being edited", game_id);
            Err(HandlerError::Conflict { game_id })
        }
        Err(e) => Err(e.into()),
    }
}

/// Link a platform to a game unless it is already linked, then show the
/// edit view.
///
/// A game deleted between loading and committing is reported as not-found.
pub fn add_platform(
    store: &mut impl UnitOfWork,
    game_id: GameId,
    platform_id: PlatformId,
) -> HandlerResult<Outcome> {
    let mut game = store
        .find_game(game_id, Relations::ALL)?
        .ok_or_else(|| HandlerError::game_not_found(game_id))?;
    let platform = store
        .find_platform(platform_id)?
        .ok_or(HandlerError::NotFound {
            entity: "Platform",
            id: platform_id,
        })?;

    if game.add_platform(platform) {
        store.stage_attach_platform(game_id, platform_id);
        if let Err(e) = store.commit() {
            if !game_exists(store, game_id)? {
                log::warn!(
                    "Game {} was deleted before platform {} was linked",
                    game_id,
                    platform_id
                );
                return Err(HandlerError::game_not_found(game_id));
            }
            return Err(e.into());
        }
        log::info!("Linked platform {} to game {}", platform_id, game_id);
    } else {
        log::debug!("Platform {} already linked to game {}", platform_id, game_id);
    }

    let platforms = store.platforms_by_name()?;
    render(Page::Edit(EditPage::for_game(&game, &[], &platforms)))
}

/// Unlink a platform from a game if it is linked, then show the edit view.
/// A game deleted before the commit is reported as not-found.
pub fn remove_platform(
    store: &mut impl UnitOfWork,
    game_id: GameId,
    platform_id: PlatformId,
) -> HandlerResult<Outcome> {
    let mut game = store
        .find_game(game_id, Relations::PLATFORMS)?
        .ok_or_else(|| HandlerError::game_not_found(game_id))?;

    if game.remove_platform(platform_id).is_some() {
        store.stage_detach_platform(game_id, platform_id);
        let summary = store.commit()?;
        if summary.detached == 0 && !game_exists(store, game_id)? {
            log::warn!(
                "Game {} was deleted before platform {} was unlinked",
                game_id,
                platform_id
            );
            return Err(HandlerError::game_not_found(game_id));
        }
        log::info!("Unlinked platform {} from game {}", platform_id, game_id);
    } else {
        log::debug!("Platform {} not linked to game {}", platform_id, game_id);
    }

    render(Page::Edit(EditPage::for_game(&game, &[], &[])))
}

/// The delete confirmation for a game.
pub fn delete_form(store: &mut impl UnitOfWork, id: Option<GameId>) -> HandlerResult<Outcome> {
    let id = require_id(id)?;
    let game = store
        .find_game(id, Relations::GENRE)?
        .ok_or_else(|| HandlerError::game_not_found(id))?;
    render(Page::Delete(game))
}

/// Delete a game if it exists. Always commits and always redirects.
pub fn delete_submit(store: &mut impl UnitOfWork, id: GameId) -> HandlerResult<Outcome> {
    if let Some(game) = store.find_game(id, Relations::NONE)? {
        store.stage_remove(game.id);
    }
    let summary = store.commit()?;
    if summary.removed > 0 {
        log::info!("Deleted game {}", id);
    }
    Ok(Outcome::Redirect(Route::List))
}

fn game_exists(store: &mut impl UnitOfWork, id: GameId) -> HandlerResult<bool> {
    Ok(store.game_exists(id)?)
}
