use std::collections::HashSet;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product_tag::{
    NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag, TagReconciliation,
};
use crate::models::product_tag::{NewProductTag as DbNewProductTag, ProductTag as DbProductTag};
use crate::repository::{
    DieselRepository, ProductTagReader, ProductTagWriter, RepositoryError, RepositoryResult,
};

impl ProductTagReader for DieselRepository {
    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<DomainProductTag>> {
        let mut conn = self.conn()?;
        load_product_tags(&mut conn, product_id)
    }
}

impl ProductTagWriter for DieselRepository {
    fn create_product_tags(
        &self,
        new_product_tags: &[DomainNewProductTag],
    ) -> RepositoryResult<usize> {
        if new_product_tags.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        insert_product_tags(&mut conn, new_product_tags)
    }

    fn delete_product_tags(&self, product_tag_ids: &[i32]) -> RepositoryResult<usize> {
        if product_tag_ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        delete_product_tags_by_id(&mut conn, product_tag_ids)
    }

    fn sync_product_tags(
        &self,
        product_id: i32,
        tag_ids: &[i32],
    ) -> RepositoryResult<TagReconciliation> {
        let mut conn = self.conn()?;

        // Take the write lock up front so concurrent syncs queue on busy_timeout.
        conn.immediate_transaction::<TagReconciliation, RepositoryError, _>(|conn| {
            reconcile_product_tags(conn, product_id, tag_ids)
        })
    }
}

/// Bring the stored tags of `product_id` in line with `tag_ids`.
///
/// Must run inside a transaction opened by the caller.
pub(crate) fn reconcile_product_tags(
    conn: &mut SqliteConnection,
    product_id: i32,
    tag_ids: &[i32],
) -> RepositoryResult<TagReconciliation> {
    ensure_product_exists(conn, product_id)?;

    let known = known_tag_ids(conn, tag_ids)?;
    let desired: Vec<i32> = tag_ids
        .iter()
        .copied()
        .filter(|tag_id| known.contains(tag_id))
        .collect();
    if desired.len() != tag_ids.len() {
        let unknown: Vec<i32> = tag_ids
            .iter()
            .copied()
            .filter(|tag_id| !known.contains(tag_id))
            .collect();
        log::warn!("Ignoring unknown tag ids {unknown:?} for product {product_id}");
    }

    let current = load_product_tags(conn, product_id)?;
    let plan = TagReconciliation::plan(product_id, &desired, &current);

    delete_product_tags_by_id(conn, &plan.to_delete)?;
    insert_product_tags(conn, &plan.to_insert)?;

    Ok(plan)
}

fn load_product_tags(
    conn: &mut SqliteConnection,
    product_id: i32,
) -> RepositoryResult<Vec<DomainProductTag>> {
    use crate::schema::product_tags;

    let rows = product_tags::table
        .filter(product_tags::product_id.eq(product_id))
        .order(product_tags::id.asc())
        .load::<DbProductTag>(conn)?;

    Ok(rows.into_iter().map(DomainProductTag::from).collect())
}

fn insert_product_tags(
    conn: &mut SqliteConnection,
    new_product_tags: &[DomainNewProductTag],
) -> RepositoryResult<usize> {
    use crate::schema::product_tags;

    if new_product_tags.is_empty() {
        return Ok(0);
    }

    let rows = DbNewProductTag::batch(new_product_tags);
    let inserted = diesel::insert_into(product_tags::table)
        .values(&rows)
        .execute(conn)?;

    Ok(inserted)
}

fn delete_product_tags_by_id(
    conn: &mut SqliteConnection,
    product_tag_ids: &[i32],
) -> RepositoryResult<usize> {
    use crate::schema::product_tags;

    if product_tag_ids.is_empty() {
        return Ok(0);
    }

    let deleted =
        diesel::delete(product_tags::table.filter(product_tags::id.eq_any(product_tag_ids)))
            .execute(conn)?;

    Ok(deleted)
}

fn known_tag_ids(conn: &mut SqliteConnection, tag_ids: &[i32]) -> RepositoryResult<HashSet<i32>> {
    use crate::schema::tags;

    if tag_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let ids = tags::table
        .filter(tags::id.eq_any(tag_ids))
        .select(tags::id)
        .load::<i32>(conn)?;

    Ok(ids.into_iter().collect())
}

fn ensure_product_exists(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<()> {
    use crate::schema::products;

    let exists: bool = select(exists(products::table.find(product_id))).get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
