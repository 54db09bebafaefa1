use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::Product as DomainProduct;
use crate::domain::tag::{
    NewTag as DomainNewTag, Tag as DomainTag, TagWithProducts, UpdateTag as DomainUpdateTag,
};
use crate::models::product::Product as DbProduct;
use crate::models::product_tag::ProductTag as DbProductTag;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn list_tags(&self) -> RepositoryResult<Vec<TagWithProducts>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let db_tags = tags::table
            .order(tags::id.asc())
            .load::<DbTag>(&mut conn)?;

        attach_products(&mut conn, db_tags)
    }

    fn get_tag_by_id(&self, tag_id: i32) -> RepositoryResult<Option<TagWithProducts>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .find(tag_id)
            .first::<DbTag>(&mut conn)
            .optional()?;

        match tag {
            Some(tag) => Ok(attach_products(&mut conn, vec![tag])?.pop()),
            None => Ok(None),
        }
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tag(&self, tag_id: i32, updates: &DomainUpdateTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let updated = diesel::update(tags::table.find(tag_id))
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(tags::table.find(tag_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn attach_products(
    conn: &mut SqliteConnection,
    db_tags: Vec<DbTag>,
) -> RepositoryResult<Vec<TagWithProducts>> {
    use crate::schema::{product_tags, products};

    if db_tags.is_empty() {
        return Ok(Vec::new());
    }

    let rows = DbProductTag::belonging_to(&db_tags)
        .inner_join(products::table)
        .order(product_tags::id.asc())
        .select((DbProductTag::as_select(), DbProduct::as_select()))
        .load::<(DbProductTag, DbProduct)>(conn)?;

    let grouped = rows.grouped_by(&db_tags);

    Ok(db_tags
        .into_iter()
        .zip(grouped)
        .map(|(tag, rows)| {
            let products: Vec<DomainProduct> = rows
                .into_iter()
                .map(|(_, product)| DomainProduct::from(product))
                .collect();
            TagWithProducts::new(tag.into()).with_products(products)
        })
        .collect())
}
