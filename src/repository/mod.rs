use crate::db::{DbConnection, DbPool};
use crate::domain::{
    category::{Category, CategoryWithProducts, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductWithRelations, UpdateProduct},
    product_tag::{NewProductTag, ProductTag, TagReconciliation},
    tag::{NewTag, Tag, TagWithProducts, UpdateTag},
};

pub mod category;
pub mod errors;
pub mod product;
pub mod product_tag;
pub mod tag;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<CategoryWithProducts>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<CategoryWithProducts>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn list_tags(&self) -> RepositoryResult<Vec<TagWithProducts>>;
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<TagWithProducts>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn list_products(&self) -> RepositoryResult<Vec<ProductWithRelations>>;
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductWithRelations>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    /// Reconcile the product's tags with `tag_ids` and apply `updates` in one
    /// transaction. Nothing is stored when either step fails.
    fn update_product_with_tags(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
        tag_ids: &[i32],
    ) -> RepositoryResult<(Product, TagReconciliation)>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only access to product/tag associations.
pub trait ProductTagReader {
    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<ProductTag>>;
}

/// Write operations over product/tag associations.
pub trait ProductTagWriter {
    /// Insert all associations in one statement, returning the number of rows written.
    fn create_product_tags(&self, new_product_tags: &[NewProductTag]) -> RepositoryResult<usize>;
    /// Delete associations by their identifiers, returning the number of rows removed.
    fn delete_product_tags(&self, product_tag_ids: &[i32]) -> RepositoryResult<usize>;
    /// Make the tags of `product_id` match `tag_ids` in a single transaction.
    ///
    /// Ids that do not reference an existing tag are ignored. Returns the plan
    /// that was applied.
    fn sync_product_tags(
        &self,
        product_id: i32,
        tag_ids: &[i32],
    ) -> RepositoryResult<TagReconciliation>;
}
