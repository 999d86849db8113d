// Integration tests for review persistence and the identity map

use std::rc::Rc;

use hrdb_core::errors::ExErrorKind;
use hrdb_core::model::{shared, Review};
use hrdb_store::{HrStore, Repository};

fn setup_store() -> HrStore {
    let store = HrStore::open_in_memory().unwrap();
    store.create_tables().unwrap();
    store
}

#[test]
fn test_save_assigns_id_and_caches_instance() {
    // Given: A fresh review
    let mut store = setup_store();
    let review = shared(Review::new(2023, "Excellent performance", 1).unwrap());

    // When: It is saved
    store.reviews.save(&store.conn, &review).unwrap();

    // Then: It has an id and find_by_id returns the very same instance
    let id = review.borrow().id().unwrap();
    let found = store.reviews.find_by_id(&store.conn, id).unwrap().unwrap();
    assert!(Rc::ptr_eq(&review, &found));
    assert!(store.reviews.cache().contains(id));
}

#[test]
fn test_save_twice_is_rejected() {
    let mut store = setup_store();
    let review = store
        .reviews
        .create(&store.conn, 2023, "Excellent performance", 1)
        .unwrap();

    let err = store.reviews.save(&store.conn, &review).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(store.reviews.get_all(&store.conn).unwrap().len(), 1);
}

#[test]
fn test_create_accepts_numeric_year_text() {
    let mut store = setup_store();
    let review = store
        .reviews
        .create(&store.conn, " 2024 ", "Outstanding achievement", 3)
        .unwrap();

    assert_eq!(review.borrow().year(), 2024);
}

#[test]
fn test_create_rejects_invalid_fields_without_inserting() {
    let mut store = setup_store();

    let err = store
        .reviews
        .create(&store.conn, 1999, "Too early", 1)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.message(),
        "year must be an integer that is greater than or equal to 2000"
    );

    let err = store.reviews.create(&store.conn, 2023, "", 1).unwrap_err();
    assert_eq!(err.message(), "summary must be a non-empty string");

    assert!(store.reviews.get_all(&store.conn).unwrap().is_empty());
}

#[test]
fn test_find_by_id_missing_row_is_none() {
    let mut store = setup_store();
    assert!(store.reviews.find_by_id(&store.conn, 42).unwrap().is_none());
}

#[test]
fn test_instance_from_db_refreshes_cached_instance() {
    // Given: A saved review held by the caller
    let mut store = setup_store();
    let review = store
        .reviews
        .create(&store.conn, 2023, "Excellent performance", 1)
        .unwrap();
    let id = review.borrow().id().unwrap();

    // When: The row changes behind the cache's back and is fetched again
    store
        .conn
        .execute(
            "UPDATE reviews SET summary = 'Revised' WHERE id = ?1",
            [id],
        )
        .unwrap();
    let fetched = store.reviews.find_by_id(&store.conn, id).unwrap().unwrap();

    // Then: The caller's instance is the one returned, with refreshed fields
    assert!(Rc::ptr_eq(&review, &fetched));
    assert_eq!(review.borrow().summary(), "Revised");
}

#[test]
fn test_get_all_returns_rows_in_id_order_without_duplicates() {
    let mut store = setup_store();
    let first = store.reviews.create(&store.conn, 2023, "First", 1).unwrap();
    let second = store.reviews.create(&store.conn, 2024, "Second", 1).unwrap();

    let all = store.reviews.get_all(&store.conn).unwrap();
    assert_eq!(all.len(), 2);
    assert!(Rc::ptr_eq(&all[0], &first));
    assert!(Rc::ptr_eq(&all[1], &second));

    let again = store.reviews.get_all(&store.conn).unwrap();
    assert!(Rc::ptr_eq(&again[0], &first));
    assert_eq!(store.reviews.cache().len(), 2);
}

#[test]
fn test_invalid_stored_row_fails_validation_on_fetch() {
    let mut store = setup_store();
    store
        .conn
        .execute(
            "INSERT INTO reviews (year, summary, employee_id) VALUES (1990, 'Old', 1)",
            [],
        )
        .unwrap();

    let err = store.reviews.get_all(&store.conn).unwrap_err();
    assert!(err.is_validation());
    assert!(store.reviews.cache().is_empty());
}

#[test]
fn test_update_persists_new_values() {
    // Given: A saved review and a second employee
    let mut store = setup_store();
    let dept = store.departments.create(&store.conn, "Sales", "NY").unwrap();
    let dept_id = dept.borrow().id().unwrap();
    let ann = store
        .employees
        .create(&store.conn, "Ann", "Salesperson", dept_id)
        .unwrap();
    let bob = store
        .employees
        .create(&store.conn, "Bob", "Salesperson", dept_id)
        .unwrap();
    let ann_id = ann.borrow().id().unwrap();
    let bob_id = bob.borrow().id().unwrap();
    let review = store
        .reviews
        .create(&store.conn, 2023, "Good", ann_id)
        .unwrap();
    let id = review.borrow().id().unwrap();

    // When: Every field is changed and the review is updated
    {
        let mut finder = store.employee_finder();
        let mut r = review.borrow_mut();
        r.set_year("2025").unwrap();
        r.set_summary("Great").unwrap();
        r.set_employee_id(bob_id, &mut finder).unwrap();
    }
    store.reviews.update(&store.conn, &review).unwrap();

    // Then: A fresh fetch after clearing the cache sees exactly the new values
    store.clear_caches();
    let fetched = store.reviews.find_by_id(&store.conn, id).unwrap().unwrap();
    assert!(!Rc::ptr_eq(&review, &fetched));
    let fetched = fetched.borrow();
    assert_eq!(fetched.year(), 2025);
    assert_eq!(fetched.summary(), "Great");
    assert_eq!(fetched.employee_id(), Some(bob_id));
}

#[test]
fn test_update_unsaved_review_is_not_persisted_error() {
    let store = setup_store();
    let review = shared(Review::new(2023, "ok", 1).unwrap());

    let err = store.reviews.update(&store.conn, &review).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotPersisted);
}

#[test]
fn test_update_of_vanished_row_is_not_found() {
    let mut store = setup_store();
    let review = store.reviews.create(&store.conn, 2023, "ok", 1).unwrap();
    store.conn.execute("DELETE FROM reviews", []).unwrap();

    let err = store.reviews.update(&store.conn, &review).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), review.borrow().id());
}

#[test]
fn test_delete_evicts_and_resets_id() {
    // Given: A saved review
    let mut store = setup_store();
    let review = store
        .reviews
        .create(&store.conn, 2023, "Excellent performance", 1)
        .unwrap();
    let id = review.borrow().id().unwrap();

    // When: It is deleted
    store.reviews.delete(&store.conn, &review).unwrap();

    // Then: The row and cache entry are gone but field values remain
    assert_eq!(review.borrow().id(), None);
    assert_eq!(review.borrow().summary(), "Excellent performance");
    assert!(!store.reviews.cache().contains(id));
    assert!(store.reviews.find_by_id(&store.conn, id).unwrap().is_none());

    // And: Deleting again is a lifecycle error
    let err = store.reviews.delete(&store.conn, &review).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotPersisted);
}

#[test]
fn test_deleted_review_can_be_saved_again() {
    let mut store = setup_store();
    let review = store.reviews.create(&store.conn, 2023, "ok", 1).unwrap();
    store.reviews.delete(&store.conn, &review).unwrap();

    store.reviews.save(&store.conn, &review).unwrap();
    assert!(review.borrow().id().is_some());
    assert_eq!(store.reviews.get_all(&store.conn).unwrap().len(), 1);
}

#[test]
fn test_create_table_is_idempotent() {
    let mut store = setup_store();
    store.reviews.create(&store.conn, 2023, "ok", 1).unwrap();

    Repository::<Review>::create_table(&store.conn).unwrap();

    assert_eq!(store.reviews.get_all(&store.conn).unwrap().len(), 1);
}

#[test]
fn test_drop_table_without_table_succeeds() {
    let mut store = HrStore::open_in_memory().unwrap();
    Repository::<Review>::drop_table(&store.conn).unwrap();

    let err = store.reviews.get_all(&store.conn).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(err.message().contains("no such table"));
}

#[test]
fn test_reviews_for_employee_filters_and_orders() {
    let mut store = setup_store();
    store.reviews.create(&store.conn, 2023, "A1", 1).unwrap();
    store.reviews.create(&store.conn, 2023, "B1", 2).unwrap();
    store.reviews.create(&store.conn, 2024, "A2", 1).unwrap();

    let summaries: Vec<String> = store
        .reviews
        .for_employee(&store.conn, 1)
        .unwrap()
        .iter()
        .map(|r| r.borrow().summary().to_string())
        .collect();
    assert_eq!(summaries, vec!["A1", "A2"]);
}

#[test]
fn test_fetch_while_caller_borrows_cached_instance() {
    // Given: A saved review
    let mut store = setup_store();
    let review = store
        .reviews
        .create(&store.conn, 2023, "Excellent performance", 1)
        .unwrap();

    // When: It is fetched while a borrow of it is still alive
    let found = store
        .reviews
        .find_by_id(&store.conn, review.borrow().id().unwrap())
        .unwrap()
        .unwrap();

    // Then: The cached instance comes back unchanged
    assert!(Rc::ptr_eq(&review, &found));

    let held = review.borrow();
    let all = store.reviews.get_all(&store.conn).unwrap();
    assert_eq!(all.len(), 1);
    assert!(Rc::ptr_eq(&all[0], &review));
    assert_eq!(held.summary(), "Excellent performance");
}

#[test]
fn test_set_employee_id_while_employee_is_borrowed() {
    // Given: A cached employee and a review
    let mut store = setup_store();
    let emp = store
        .employees
        .create(&store.conn, "John Doe", "Salesperson", 1)
        .unwrap();
    let review = store.reviews.create(&store.conn, 2023, "ok", 99).unwrap();

    // When: The employee id is read through a live borrow during the lookup
    {
        let mut finder = store.employee_finder();
        let mut r = review.borrow_mut();
        r.set_employee_id(emp.borrow().id().unwrap(), &mut finder)
            .unwrap();
    }

    // Then: The assignment succeeds against the cached employee
    assert_eq!(review.borrow().employee_id(), emp.borrow().id());
}

#[test]
fn test_borrowed_instance_is_refreshed_on_next_fetch() {
    let mut store = setup_store();
    let review = store.reviews.create(&store.conn, 2023, "Before", 1).unwrap();
    let id = review.borrow().id().unwrap();
    store
        .conn
        .execute("UPDATE reviews SET summary = 'After' WHERE id = ?1", [id])
        .unwrap();

    {
        let held = review.borrow();
        store.reviews.find_by_id(&store.conn, id).unwrap();
        assert_eq!(held.summary(), "Before");
    }

    store.reviews.find_by_id(&store.conn, id).unwrap();
    assert_eq!(review.borrow().summary(), "After");
}
