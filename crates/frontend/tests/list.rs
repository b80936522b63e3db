#![allow(clippy::unwrap_used)]
// List page state: loading, selection and deletion.

mod common;

use api_types::category::Category;

use common::{Call, FakeService};
use frontend::{
    Effect,
    list::{DELETE_ERROR_MESSAGE, LOAD_ERROR_MESSAGE, ResourceList},
};

// ── Helpers ─────────────────────────────────────────────────────────

fn category(id: i64) -> Category {
    Category {
        id: Some(id),
        name: Some(format!("Categoria {id}")),
        description: None,
    }
}

async fn loaded(service: &FakeService<Category>) -> ResourceList<Category> {
    let mut list = ResourceList::default();
    list.load(service).await;
    list
}

fn selected_id(list: &ResourceList<Category>) -> Option<i64> {
    list.selected_item().and_then(|category| category.id)
}

// ── Loading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn load_fills_the_list() {
    let service = FakeService::categories(vec![category(1), category(2)]);
    let list = loaded(&service).await;

    assert_eq!(list.items().len(), 2);
    assert_eq!(list.error(), None);
    assert_eq!(selected_id(&list), Some(1));
}

#[tokio::test]
async fn failed_load_shows_the_list_error() {
    let service = FakeService::categories(vec![category(1)]);
    service.fail_with(500, "");

    let list = loaded(&service).await;

    assert!(list.items().is_empty());
    assert_eq!(list.error(), Some(LOAD_ERROR_MESSAGE));
    assert_eq!(list.selected_item(), None);
}

#[tokio::test]
async fn selection_stays_in_bounds() {
    let service = FakeService::categories(vec![category(1), category(2)]);
    let mut list = loaded(&service).await;

    list.select_prev();
    assert_eq!(list.selected(), 0);
    list.select_next();
    list.select_next();
    assert_eq!(list.selected(), 1);
    assert_eq!(selected_id(&list), Some(2));

    let mut empty = ResourceList::<Category>::default();
    empty.select_next();
    assert_eq!(empty.selected_item(), None);
}

// ── Deleting ────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_the_last_item_moves_the_selection_up() {
    let service = FakeService::categories(vec![category(1), category(2), category(3)]);
    let mut list = loaded(&service).await;
    list.select_next();
    list.select_next();
    assert_eq!(selected_id(&list), Some(3));

    let effects = list.delete_selected(&service).await;

    assert!(effects.is_empty());
    assert!(service.calls().contains(&Call::Delete(3)));
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.selected(), 1);
    assert_eq!(selected_id(&list), Some(2));
    assert_eq!(service.items().len(), 2);
}

#[tokio::test]
async fn deleting_the_only_item_leaves_an_empty_list() {
    let service = FakeService::categories(vec![category(7)]);
    let mut list = loaded(&service).await;

    list.delete_selected(&service).await;

    assert!(list.items().is_empty());
    assert_eq!(list.selected(), 0);
    assert_eq!(list.selected_item(), None);
}

#[tokio::test]
async fn failed_delete_alerts_and_keeps_the_item() {
    let service = FakeService::categories(vec![category(1), category(2)]);
    let mut list = loaded(&service).await;
    service.fail_with(500, "");

    let effects = list.delete_selected(&service).await;

    assert_eq!(effects, vec![Effect::Alert(DELETE_ERROR_MESSAGE.to_string())]);
    assert_eq!(list.items().len(), 2);
    assert_eq!(selected_id(&list), Some(1));
}

#[tokio::test]
async fn nothing_is_deleted_from_an_empty_list() {
    let service = FakeService::categories(Vec::new());
    let mut list = loaded(&service).await;

    let effects = list.delete_selected(&service).await;

    assert!(effects.is_empty());
    assert_eq!(service.calls(), vec![Call::GetAll]);
}
