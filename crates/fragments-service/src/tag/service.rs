//! Read access to a user's tags.

use std::sync::Arc;

use fragments_core::result::AppResult;
use fragments_database::repositories::TagRepository;
use fragments_entity::tag::TagSummary;

use crate::context::RequestContext;

/// Lists tags. Tags are created and linked by the snippet service.
#[derive(Debug, Clone)]
pub struct TagService {
    tag_repo: Arc<TagRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// The caller's tags ordered by name, with snippet counts.
    pub async fn list_tags(&self, ctx: &RequestContext) -> AppResult<Vec<TagSummary>> {
        self.tag_repo.list_for_user(ctx.user_id).await
    }
}
