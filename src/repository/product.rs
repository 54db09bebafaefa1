use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::category::Category as DomainCategory,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductWithRelations,
        UpdateProduct as DomainUpdateProduct,
    },
    domain::product_tag::TagReconciliation,
    domain::tag::Tag as DomainTag,
    models::category::Category as DbCategory,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_tag::ProductTag as DbProductTag,
    models::tag::Tag as DbTag,
    repository::product_tag::reconcile_product_tags,
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<ProductWithRelations>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        load_relations(&mut conn, db_products)
    }

    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductWithRelations>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => Ok(load_relations(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.find(product_id))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn update_product_with_tags(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
        tag_ids: &[i32],
    ) -> RepositoryResult<(DomainProduct, TagReconciliation)> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let plan = reconcile_product_tags(conn, product_id, tag_ids)?;
            let updated = diesel::update(products::table.find(product_id))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            Ok((DomainProduct::from(updated), plan))
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(product_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn load_relations(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<ProductWithRelations>> {
    use crate::schema::{product_tags, tags};

    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let tag_rows = DbProductTag::belonging_to(&db_products)
        .inner_join(tags::table)
        .order(product_tags::id.asc())
        .select((DbProductTag::as_select(), DbTag::as_select()))
        .load::<(DbProductTag, DbTag)>(conn)?;
    let grouped_tags = tag_rows.grouped_by(&db_products);

    let category_ids: Vec<i32> = db_products
        .iter()
        .filter_map(|product| product.category_id)
        .collect();
    let category_map = load_categories_by_id(conn, category_ids)?;

    let mut result = Vec::with_capacity(db_products.len());
    for (db_product, tag_rows) in db_products.into_iter().zip(grouped_tags) {
        let category = db_product
            .category_id
            .and_then(|category_id| category_map.get(&category_id).cloned());
        let tags: Vec<DomainTag> = tag_rows
            .into_iter()
            .map(|(_, tag)| DomainTag::from(tag))
            .collect();

        result.push(
            ProductWithRelations::new(db_product.into())
                .with_category(category)
                .with_tags(tags),
        );
    }

    Ok(result)
}

fn load_categories_by_id(
    conn: &mut SqliteConnection,
    category_ids: Vec<i32>,
) -> RepositoryResult<HashMap<i32, DomainCategory>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?;

    Ok(rows
        .into_iter()
        .map(|category| (category.id, DomainCategory::from(category)))
        .collect())
}
