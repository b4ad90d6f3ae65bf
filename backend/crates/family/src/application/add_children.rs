//! Add Children Use Case

use std::sync::Arc;

use crate::domain::entity::child::NewChild;
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::family_id::FamilyId;
use crate::error::FamilyResult;

/// One submitted child entry
#[derive(Debug, Clone)]
pub struct ChildInput {
    pub first_name: String,
    pub color: Option<String>,
}

pub struct AddChildrenUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
}

impl<S> AddChildrenUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Insert the non-blank entries. Returns how many were stored; zero means
    /// no write was made at all.
    pub async fn execute(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        entries: &[ChildInput],
    ) -> FamilyResult<usize> {
        let children = NewChild::from_entries(
            entries
                .iter()
                .map(|e| (e.first_name.as_str(), e.color.as_deref())),
        );

        if children.is_empty() {
            tracing::debug!(family_id = %family_id, "No children submitted");
            return Ok(0);
        }

        self.store.add_children(caller, family_id, &children).await?;

        tracing::info!(family_id = %family_id, count = children.len(), "Children added");

        Ok(children.len())
    }
}
