//! Save use cases, including create-with-revival.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{SaveRepository, SaveRepositoryError};
use crate::domain::{Error, NewPostSave, PostSave, RecordId, SaveOutcome};

fn map_repository_error(error: SaveRepositoryError) -> Error {
    Error::internal(format!("save repository error: {error}"))
}

/// Service for saving posts.
#[derive(Clone)]
pub struct SaveService {
    saves: Arc<dyn SaveRepository>,
}

impl SaveService {
    /// Create the service over a save repository.
    pub fn new(saves: Arc<dyn SaveRepository>) -> Self {
        Self { saves }
    }

    /// Save a post for a user.
    ///
    /// Inserts when the pair has never been saved. Otherwise the existing
    /// row is returned, its deletion marker cleared, with `created = false`.
    /// The insert is conflict-aware so concurrent creates for one pair end
    /// with a single row.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures, or when the conflicting row
    /// vanishes before it can be revived.
    pub async fn create(&self, save: NewPostSave) -> Result<SaveOutcome, Error> {
        if let Some(inserted) = self
            .saves
            .insert_if_absent(&save)
            .await
            .map_err(map_repository_error)?
        {
            debug!(save_id = %inserted.id, "save created");
            return Ok(SaveOutcome {
                save: inserted,
                created: true,
            });
        }

        let revived = self
            .saves
            .revive(&save)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "save for post {} and user {} conflicted but was not found",
                    save.post_id, save.user_id
                ))
            })?;
        debug!(save_id = %revived.id, "save revived");
        Ok(SaveOutcome {
            save: revived,
            created: false,
        })
    }

    /// Fetch a save, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Not found when no row has the id.
    pub async fn get_any(&self, id: RecordId) -> Result<PostSave, Error> {
        self.saves
            .find_any_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Not found"))
    }

    /// Soft-delete a save. Repeating the delete is a no-op.
    ///
    /// # Errors
    ///
    /// Delete-is-missing-id when the save has no identity.
    pub async fn delete(&self, save: &PostSave) -> Result<(), Error> {
        if save.id.is_unset() {
            return Err(Error::delete_is_missing_id());
        }
        if save.is_deleted() {
            return Ok(());
        }
        self.saves
            .soft_delete(save.id)
            .await
            .map_err(map_repository_error)
    }

    /// Live saves of a post.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn list_for_post(&self, post_id: RecordId) -> Result<Vec<PostSave>, Error> {
        self.saves
            .list_for_post(post_id)
            .await
            .map_err(map_repository_error)
    }
}
