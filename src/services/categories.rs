use chrono::Utc;

use crate::domain::category::{Category, CategoryWithProducts};
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every category together with its products.
pub fn load_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryWithProducts>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories().map_err(ServiceError::from)
}

/// Fetches one category together with its products.
pub fn load_category<R>(repo: &R, category_id: i32) -> ServiceResult<CategoryWithProducts>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new category.
pub fn create_category<R>(repo: &R, form: CategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category).map_err(ServiceError::from)
}

/// Renames an existing category.
pub fn modify_category<R>(repo: &R, category_id: i32, form: CategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, &update).map_err(ServiceError::from)
}

/// Deletes a category; its products stay and lose their category.
pub fn remove_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::repository::RepositoryError;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn load_category_maps_missing_record_to_not_found() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_by_id()
            .times(1)
            .withf(|id| *id == 42)
            .returning(|_| Ok(None));

        let result = load_category(&repo, 42);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_categories_returns_repository_rows() {
        let mut repo = MockCategoryReader::new();
        repo.expect_list_categories().times(1).returning(|| {
            Ok(vec![
                CategoryWithProducts::new(sample_category(1, "Shirts")),
                CategoryWithProducts::new(sample_category(2, "Shorts")),
            ])
        });

        let categories = load_categories(&repo).expect("expected success");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].category.name, "Shorts");
    }

    #[test]
    fn create_category_validates_and_persists() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .times(1)
            .withf(|new_category| new_category.name == "Music")
            .returning(|_| Ok(sample_category(3, "Music")));

        let form = CategoryForm {
            name: "  Music ".to_string(),
        };

        let created = create_category(&repo, form).expect("expected success");

        assert_eq!(created.id, 3);
    }

    #[test]
    fn create_category_returns_form_error() {
        let repo = MockCategoryWriter::new();
        let form = CategoryForm {
            name: " ".to_string(),
        };

        let result = create_category(&repo, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn modify_category_surfaces_not_found() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_update_category()
            .times(1)
            .withf(|id, updates| *id == 9 && updates.name == "Hats")
            .returning(|_, _| Err(RepositoryError::NotFound));

        let form = CategoryForm {
            name: "Hats".to_string(),
        };

        let result = modify_category(&repo, 9, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn remove_category_deletes_record() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .times(1)
            .withf(|id| *id == 4)
            .returning(|_| Ok(()));

        assert!(remove_category(&repo, 4).is_ok());
    }
}
