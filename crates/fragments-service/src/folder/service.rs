//! Folder CRUD with ownership and hierarchy enforcement.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use fragments_core::error::AppError;
use fragments_core::result::AppResult;
use fragments_core::types::{PageRequest, PageResponse};
use fragments_database::repositories::FolderRepository;
use fragments_database::repositories::folder::DUPLICATE_FOLDER_NAME;
use fragments_entity::folder::{Folder, FolderChanges, NewFolder};

use super::hierarchy::{HierarchyGuard, TxParentLookup};
use crate::context::RequestContext;
use crate::validation;

/// Message returned when deleting a folder that still has subfolders.
pub const FOLDER_HAS_CHILDREN: &str = "Cannot delete folder: folder contains subfolders";

/// Raw folder fields as submitted by the client. Used for create and for
/// the full replacement done by update.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FolderInput {
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

/// Manages each user's folder forest.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    guard: HierarchyGuard,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, guard: HierarchyGuard) -> Self {
        Self { folder_repo, guard }
    }

    /// Gets a folder owned by the caller.
    ///
    /// Folders owned by someone else are reported as not found.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|f| ctx.owns(f.user_id))
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Lists the direct children of `parent_id`, or root folders when `None`.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        self.folder_repo
            .list_children(ctx.user_id, parent_id, page)
            .await
    }

    /// Creates a new folder.
    pub async fn create_folder(&self, ctx: &RequestContext, input: FolderInput) -> AppResult<Folder> {
        let name = validation::folder_name(&input.name)?;
        let description = validation::description(input.description.as_deref())?;

        let mut tx = self.folder_repo.begin().await?;

        if let Some(parent_id) = input.parent_id {
            let mut lookup = TxParentLookup::new(&self.folder_repo, &mut *tx);
            self.guard
                .check_parent(&mut lookup, ctx.user_id, None, parent_id)
                .await?;
        }

        if self
            .folder_repo
            .name_taken(&mut *tx, ctx.user_id, &name, input.parent_id, None)
            .await?
        {
            return Err(AppError::conflict(DUPLICATE_FOLDER_NAME));
        }

        let folder = self
            .folder_repo
            .insert(
                &mut *tx,
                &NewFolder {
                    user_id: ctx.user_id,
                    name,
                    description,
                    parent_id: input.parent_id,
                },
            )
            .await?;

        crate::commit(tx).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Replaces a folder's name, description and parent.
    ///
    /// The parent-chain walk only runs when the parent actually changes.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        input: FolderInput,
    ) -> AppResult<Folder> {
        let name = validation::folder_name(&input.name)?;
        let description = validation::description(input.description.as_deref())?;

        let mut tx = self.folder_repo.begin().await?;

        let current = self
            .folder_repo
            .lock(&mut *tx, folder_id)
            .await?
            .filter(|f| ctx.owns(f.user_id))
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if let Some(parent_id) = input.parent_id {
            if current.parent_id != Some(parent_id) {
                let mut lookup = TxParentLookup::new(&self.folder_repo, &mut *tx);
                self.guard
                    .check_parent(&mut lookup, ctx.user_id, Some(folder_id), parent_id)
                    .await?;
            }
        }

        if self
            .folder_repo
            .name_taken(&mut *tx, ctx.user_id, &name, input.parent_id, Some(folder_id))
            .await?
        {
            return Err(AppError::conflict(DUPLICATE_FOLDER_NAME));
        }

        let folder = self
            .folder_repo
            .update(
                &mut *tx,
                folder_id,
                &FolderChanges {
                    name,
                    description,
                    parent_id: input.parent_id,
                },
            )
            .await?;

        crate::commit(tx).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder updated"
        );

        Ok(folder)
    }

    /// Deletes an empty-of-subfolders folder, moving its snippets to root
    /// in the same transaction.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<()> {
        let mut tx = self.folder_repo.begin().await?;

        self.folder_repo
            .lock(&mut *tx, folder_id)
            .await?
            .filter(|f| ctx.owns(f.user_id))
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if self.folder_repo.count_children(&mut *tx, folder_id).await? > 0 {
            return Err(AppError::conflict(FOLDER_HAS_CHILDREN));
        }

        let unfiled = self.folder_repo.unfile_snippets(&mut *tx, folder_id).await?;
        self.folder_repo.delete(&mut *tx, folder_id).await?;

        crate::commit(tx).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            unfiled_snippets = unfiled,
            "Folder deleted"
        );

        Ok(())
    }
}
