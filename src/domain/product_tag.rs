use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: i32,
    /// Identifier of the product the tag is attached to.
    pub product_id: i32,
    /// Identifier of the referenced tag record.
    pub tag_id: i32,
    /// Timestamp for when the association was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the association.
    pub updated_at: NaiveDateTime,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: i32,
    /// Identifier of the tag being attached to the product.
    pub tag_id: i32,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}

/// Associations to insert and delete so that a product carries exactly a desired tag set.
///
/// Built by [`TagReconciliation::plan`], which does no I/O. Applying the plan is
/// left to the repository so both halves can share one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagReconciliation {
    /// New associations, in the order their tag ids were requested.
    pub to_insert: Vec<NewProductTag>,
    /// Identifiers of association records that must be removed.
    pub to_delete: Vec<i32>,
}

impl TagReconciliation {
    /// Diff the `current` associations of `product_id` against `desired_tag_ids`.
    ///
    /// A tag id repeated in `desired_tag_ids` yields a single insert.
    pub fn plan(product_id: i32, desired_tag_ids: &[i32], current: &[ProductTag]) -> Self {
        let existing: HashSet<i32> = current.iter().map(|assoc| assoc.tag_id).collect();
        let desired: HashSet<i32> = desired_tag_ids.iter().copied().collect();

        let mut queued = HashSet::with_capacity(desired_tag_ids.len());
        let to_insert = desired_tag_ids
            .iter()
            .copied()
            .filter(|tag_id| !existing.contains(tag_id) && queued.insert(*tag_id))
            .map(|tag_id| NewProductTag::new(product_id, tag_id))
            .collect();

        let to_delete = current
            .iter()
            .filter(|assoc| !desired.contains(&assoc.tag_id))
            .map(|assoc| assoc.id)
            .collect();

        Self {
            to_insert,
            to_delete,
        }
    }

    /// Whether applying the plan would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}
