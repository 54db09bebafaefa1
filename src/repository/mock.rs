use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ProductReader, ProductTagWriter, ProductWriter,
    RepositoryResult, TagReader, TagWriter,
};
use crate::domain::{
    category::{Category, CategoryWithProducts, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductWithRelations, UpdateProduct},
    product_tag::{NewProductTag, TagReconciliation},
    tag::{NewTag, Tag, TagWithProducts, UpdateTag},
};

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self) -> RepositoryResult<Vec<CategoryWithProducts>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<CategoryWithProducts>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn list_tags(&self) -> RepositoryResult<Vec<TagWithProducts>>;
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<TagWithProducts>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn list_products(&self) -> RepositoryResult<Vec<ProductWithRelations>>;
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductWithRelations>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn update_product_with_tags(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
            tag_ids: &[i32],
        ) -> RepositoryResult<(Product, TagReconciliation)>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductTagWriter {}

    impl ProductTagWriter for ProductTagWriter {
        fn create_product_tags(&self, new_product_tags: &[NewProductTag]) -> RepositoryResult<usize>;
        fn delete_product_tags(&self, product_tag_ids: &[i32]) -> RepositoryResult<usize>;
        fn sync_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<TagReconciliation>;
    }
}
