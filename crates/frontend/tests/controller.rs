#![allow(clippy::unwrap_used)]
// Form controller lifecycle against an in-memory service.

mod common;

use api_types::{
    Amount,
    category::Category,
    entry::{Entry, EntryType},
};
use chrono::NaiveDate;
use serde_json::json;

use common::{Call, FakeService};
use frontend::{
    ActivatedRoute, Effect, FormStatus, Mode, ToastLevel,
    categories::{CategoryForm, category_form_definition},
    controller::{
        CONNECTION_ERROR_MESSAGE, LOAD_ERROR_MESSAGE, SUBMIT_ERROR_MESSAGE, SUCCESS_MESSAGE,
    },
    entries::EntryForm,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn route(url: &str) -> ActivatedRoute {
    ActivatedRoute::parse(url).unwrap()
}

fn housing() -> Category {
    Category {
        id: Some(5),
        name: Some("Moradia".to_string()),
        description: Some("Aluguel e condomínio".to_string()),
    }
}

async fn category_form(
    service: &FakeService<Category>,
    url: &str,
) -> (CategoryForm<FakeService<Category>>, Vec<Effect>) {
    CategoryForm::on_init(category_form_definition(), service.clone(), route(url)).await
}

fn is_create(call: &Call) -> bool {
    matches!(call, Call::Create)
}

fn is_update(call: &Call) -> bool {
    matches!(call, Call::Update(_))
}

// ── Activation ──────────────────────────────────────────────────────

#[tokio::test]
async fn new_mode_starts_empty_without_loading() {
    let service = FakeService::categories(vec![housing()]);
    let (form, effects) = category_form(&service, "categories/new").await;

    assert_eq!(form.mode(), Mode::New);
    assert!(effects.is_empty());
    assert!(service.calls().is_empty());
    assert_eq!(form.resource(), &Category::default());
    assert_eq!(form.page_title(), "Cadastro de Nova Categoria");
    assert_eq!(
        form.form().value(),
        json!({ "id": null, "name": null, "description": null })
    );
}

#[tokio::test]
async fn edit_mode_loads_and_patches_every_field() {
    let service = FakeService::categories(vec![housing()]);
    let (form, effects) = category_form(&service, "categories/5/edit").await;

    assert_eq!(form.mode(), Mode::Edit);
    assert!(effects.is_empty());
    assert_eq!(service.calls(), vec![Call::GetById(5)]);
    assert_eq!(form.resource(), &housing());
    assert_eq!(
        form.form().value(),
        json!({ "id": 5, "name": "Moradia", "description": "Aluguel e condomínio" })
    );
    assert_eq!(form.page_title(), "Editando Categoria: Moradia");
}

#[tokio::test]
async fn failed_load_raises_a_blocking_alert() {
    let service = FakeService::categories(vec![housing()]);
    let (form, effects) = category_form(&service, "categories/99/edit").await;

    assert_eq!(effects, vec![Effect::Alert(LOAD_ERROR_MESSAGE.to_string())]);
    assert_eq!(form.resource(), &Category::default());
    assert_eq!(form.page_title(), "Editando Categoria: ");
}

#[tokio::test]
async fn non_numeric_id_never_reaches_the_service() {
    let service = FakeService::categories(vec![housing()]);
    let (form, effects) = category_form(&service, "categories/abc/edit").await;

    assert_eq!(form.mode(), Mode::Edit);
    assert_eq!(effects, vec![Effect::Alert(LOAD_ERROR_MESSAGE.to_string())]);
    assert!(service.calls().is_empty());
}

// ── Submission ──────────────────────────────────────────────────────

#[tokio::test]
async fn new_mode_creates_once_and_reloads_the_edit_page() {
    let service = FakeService::categories(vec![housing()]);
    let (mut form, _) = category_form(&service, "categories/new").await;

    form.set_value("name", "Lazer");
    let effects = form.submit().await;

    assert_eq!(service.count(is_create), 1);
    assert_eq!(service.count(is_update), 0);
    assert_eq!(
        effects,
        vec![
            Effect::Toast {
                level: ToastLevel::Success,
                message: SUCCESS_MESSAGE.to_string(),
            },
            Effect::Navigate {
                url: "categories".to_string(),
                skip_location_change: true,
            },
            Effect::Navigate {
                url: "categories/6/edit".to_string(),
                skip_location_change: false,
            },
        ]
    );
    assert_eq!(form.resource().id, Some(6));
    assert_eq!(form.state().status(), FormStatus::Succeeded);
}

#[tokio::test]
async fn edit_mode_updates_once_and_never_creates() {
    let service = FakeService::categories(vec![housing()]);
    let (mut form, _) = category_form(&service, "categories/5/edit").await;

    form.set_value("name", "Casa");
    let effects = form.submit().await;

    assert_eq!(service.count(is_create), 0);
    assert_eq!(service.count(is_update), 1);
    assert!(service.calls().contains(&Call::Update(Some(5))));
    assert_eq!(
        effects.last(),
        Some(&Effect::navigate("categories/5/edit", false))
    );
    assert_eq!(service.items()[0].name.as_deref(), Some("Casa"));
}

#[tokio::test]
async fn validation_failure_lists_server_messages() {
    let service = FakeService::categories(Vec::new());
    let (mut form, _) = category_form(&service, "categories/new").await;
    service.fail_with(422, r#"{"errors":["Name is required"]}"#);

    let effects = form.submit().await;

    assert_eq!(
        effects,
        vec![Effect::toast(ToastLevel::Error, SUBMIT_ERROR_MESSAGE)]
    );
    assert!(!form.state().is_submitting());
    assert_eq!(form.state().status(), FormStatus::Failed);
    assert_eq!(
        form.state().server_errors(),
        Some(&["Name is required".to_string()][..])
    );
}

#[tokio::test]
async fn server_failure_uses_the_fallback_message() {
    let service = FakeService::categories(vec![housing()]);
    let (mut form, _) = category_form(&service, "categories/5/edit").await;
    service.fail_with(500, "");

    form.submit().await;

    assert_eq!(
        form.state().server_errors(),
        Some(&[CONNECTION_ERROR_MESSAGE.to_string()][..])
    );
}

#[tokio::test]
async fn editing_after_a_failure_returns_to_idle() {
    let service = FakeService::categories(Vec::new());
    let (mut form, _) = category_form(&service, "categories/new").await;
    service.fail_with(500, "");
    form.set_value("name", "Lazer");
    form.submit().await;
    assert_eq!(form.state().status(), FormStatus::Failed);

    form.set_value("name", "Lazer e viagens");
    assert_eq!(form.state().status(), FormStatus::Idle);
    assert!(form.can_submit());
}

#[tokio::test]
async fn split_submit_exposes_the_submitting_flag() {
    let service = FakeService::categories(Vec::new());
    let (mut form, _) = category_form(&service, "categories/new").await;
    form.set_value("name", "Lazer");

    let pending = form.begin_submit().unwrap();
    assert!(form.state().is_submitting());
    assert!(!form.can_submit());
    assert_eq!(pending.resource().name.as_deref(), Some("Lazer"));

    let result = form.dispatch(pending).await;
    let effects = form.complete_submit(result);
    assert!(!form.state().is_submitting());
    assert_eq!(effects.len(), 3);
}

// ── Entry form ──────────────────────────────────────────────────────

fn rent() -> Entry {
    Entry {
        id: Some(3),
        name: Some("Aluguel".to_string()),
        description: Some("Março".to_string()),
        kind: Some(EntryType::Expense),
        amount: Some(Amount::from_cents(150_000)),
        date: NaiveDate::from_ymd_opt(2024, 3, 5),
        paid: Some(false),
        category_id: Some(5),
        category: Some(housing()),
    }
}

#[tokio::test]
async fn entry_form_loads_entry_and_categories() {
    let entries = FakeService::entries(vec![rent()]);
    let categories = FakeService::categories(vec![housing()]);

    let (form, effects) =
        EntryForm::on_init(entries.clone(), categories.clone(), route("entries/3/edit")).await;

    assert!(effects.is_empty());
    assert_eq!(categories.calls(), vec![Call::GetAll]);
    assert_eq!(form.categories(), &[housing()]);

    let controller = form.controller();
    assert_eq!(controller.page_title(), "Editando Lançamento: Aluguel");
    assert_eq!(
        controller.form().value(),
        json!({
            "id": 3,
            "name": "Aluguel",
            "description": "Março",
            "type": "expense",
            "amount": "1500,00",
            "date": "05/03/2024",
            "paid": false,
            "categoryId": 5
        })
    );

    let options = form.options_for("categoryId").unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].text, "Moradia");
    assert_eq!(options[0].value, json!(5));
    assert!(form.options_for("name").is_none());
}

#[tokio::test]
async fn entry_form_survives_a_category_failure() {
    let entries = FakeService::entries(Vec::new());
    let categories = FakeService::categories(vec![housing()]);
    categories.fail_with(500, "");

    let (form, effects) =
        EntryForm::on_init(entries, categories, route("entries/new")).await;

    assert!(effects.is_empty());
    assert!(form.categories().is_empty());
    assert_eq!(form.controller().page_title(), "Cadastro de um novo Lançamento");
}

#[tokio::test]
async fn entry_submit_creates_with_typed_fields() {
    let entries = FakeService::entries(Vec::new());
    let categories = FakeService::categories(vec![housing()]);
    let (mut form, _) = EntryForm::on_init(entries.clone(), categories, route("entries/new")).await;

    let controller = form.controller_mut();
    controller.set_value("name", "Aluguel");
    controller.set_value("description", "Abril");
    controller.set_value("amount", "1500");
    controller.set_value("date", "05/04/2024");
    controller.set_value("categoryId", 5);
    assert!(controller.can_submit());

    let effects = controller.submit().await;

    assert_eq!(effects[2], Effect::navigate("entries/1/edit", false));
    let saved = &entries.items()[0];
    assert_eq!(saved.kind, Some(EntryType::Expense));
    assert_eq!(saved.amount, Some(Amount::from_cents(150_000)));
    assert_eq!(saved.paid, Some(true));
}

#[tokio::test]
async fn unconvertible_form_fails_without_calling_the_service() {
    let entries = FakeService::entries(Vec::new());
    let categories = FakeService::categories(Vec::new());
    let (mut form, _) = EntryForm::on_init(entries.clone(), categories, route("entries/new")).await;

    let controller = form.controller_mut();
    controller.set_value("amount", "doze");
    let effects = controller.submit().await;

    assert_eq!(effects, vec![Effect::toast(ToastLevel::Error, SUBMIT_ERROR_MESSAGE)]);
    assert!(entries.calls().is_empty());
    let messages = controller.state().server_errors().unwrap();
    assert!(messages[0].starts_with("Dados inválidos"));
}
