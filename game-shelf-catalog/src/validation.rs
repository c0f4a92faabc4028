//! Field-level validation of the bound game form.

use chrono::Datelike;
use serde::Serialize;

use crate::types::{GameForm, GameId, GenreId};

/// Longest accepted game name, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted image path/URL, in characters.
pub const MAX_IMAGE_LEN: usize = 255;
/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1950;
/// How many years past the current one a release year may be announced.
pub const RELEASE_YEAR_LOOKAHEAD: i32 = 5;

/// A validated game payload, ready to be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub id: Option<GameId>,
    pub name: String,
    pub image: Option<String>,
    pub release_year: i32,
    pub genre_id: GenreId,
    pub version: Option<i64>,
}

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All constraint failures for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The first error recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl GameForm {
    /// Check every field constraint, collecting all failures.
    pub fn validate(&self) -> Result<GameDraft, ValidationErrors> {
        self.validate_with_year_ceiling(chrono::Local::now().year() + RELEASE_YEAR_LOOKAHEAD)
    }

    fn validate_with_year_ceiling(&self, max_year: i32) -> Result<GameDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "The Name field is required.");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(
                "name",
                format!("Name must be at most {MAX_NAME_LEN} characters."),
            );
        }

        let image = self.image.trim();
        if image.chars().count() > MAX_IMAGE_LEN {
            errors.push(
                "image",
                format!("Image must be at most {MAX_IMAGE_LEN} characters."),
            );
        }

        let release_year = match self.release_year.trim() {
            "" => {
                errors.push("release_year", "The Release Year field is required.");
                None
            }
            raw => match raw.parse::<i32>() {
                Ok(year) if (MIN_RELEASE_YEAR..=max_year).contains(&year) => Some(year),
                Ok(_) => {
                    errors.push(
                        "release_year",
                        format!("Release Year must be between {MIN_RELEASE_YEAR} and {max_year}."),
                    );
                    None
                }
                Err(_) => {
                    errors.push("release_year", format!("The value '{raw}' is not valid."));
                    None
                }
            },
        };

        let genre_id = match self.genre_id.trim() {
            "" => {
                errors.push("genre_id", "The Genre field is required.");
                None
            }
            raw => match raw.parse::<GenreId>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push("genre_id", format!("The value '{raw}' is not a valid genre."));
                    None
                }
            },
        };

        match (release_year, genre_id) {
            (Some(release_year), Some(genre_id)) if errors.is_empty() => Ok(GameDraft {
                id: self.id,
                name: name.to_string(),
                image: (!image.is_empty()).then(|| image.to_string()),
                release_year,
                genre_id,
                version: self.version,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, year: &str, genre: &str) -> GameForm {
        GameForm {
            name: name.to_string(),
            release_year: year.to_string(),
            genre_id: genre.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn ceiling_bounds_release_year() {
        let f = form("Star Fox", "2031", "1");
        assert!(f.validate_with_year_ceiling(2030).is_err());
        assert!(f.validate_with_year_ceiling(2031).is_ok());
    }

    #[test]
    fn whitespace_name_is_missing() {
        let errors = form("   ", "1993", "1")
            .validate_with_year_ceiling(2030)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("name").is_some());
    }
}
