//! Entry (lançamento) form: the generic controller plus the category list
//! feeding the category select.

use api_types::{
    category::Category,
    entry::{Entry, EntryType},
};
use serde_json::Value;

use crate::{
    controller::{Effect, FormDefinition, ResourceFormController, json_to_resource},
    form::{FieldSpec, InputKind, Validator},
    route::ActivatedRoute,
    service::ResourceService,
};

/// Choice offered by a select widget.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub text: String,
    pub value: Value,
}

/// The closed set of entry types, in display order.
pub fn type_options() -> Vec<SelectOption> {
    EntryType::ALL
        .iter()
        .map(|kind| SelectOption {
            text: kind.label().to_string(),
            value: Value::from(kind.as_str()),
        })
        .collect()
}

fn entry_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::hidden("id"),
        FieldSpec::new("name", "Lançamento", InputKind::Text)
            .validators([Validator::Required, Validator::MinLength(2)]),
        FieldSpec::new("description", "Descrição", InputKind::Text)
            .validators([Validator::Required, Validator::MinLength(2)]),
        FieldSpec::new("type", "Tipo", InputKind::Select)
            .initial(EntryType::Expense.as_str())
            .validators([Validator::Required]),
        FieldSpec::new("amount", "Valor", InputKind::Text).validators([Validator::Required]),
        FieldSpec::new("date", "Data", InputKind::Text).validators([Validator::Required]),
        FieldSpec::new("paid", "Pago", InputKind::Toggle)
            .initial(true)
            .validators([Validator::Required]),
        FieldSpec::new("categoryId", "Categoria", InputKind::Select)
            .validators([Validator::Required]),
    ]
}

pub fn entry_form_definition() -> FormDefinition<Entry> {
    FormDefinition {
        fields: entry_fields,
        from_json: json_to_resource::<Entry>,
        creation_title: "Cadastro de um novo Lançamento",
        edition_title: |entry| {
            format!(
                "Editando Lançamento: {}",
                entry.name.as_deref().unwrap_or_default()
            )
        },
    }
}

pub struct EntryForm<S, C> {
    controller: ResourceFormController<Entry, S>,
    category_service: C,
    categories: Vec<Category>,
}

impl<S, C> EntryForm<S, C>
where
    S: ResourceService<Entry>,
    C: ResourceService<Category>,
{
    pub async fn on_init(
        service: S,
        category_service: C,
        route: ActivatedRoute,
    ) -> (Self, Vec<Effect>) {
        let (controller, effects) =
            ResourceFormController::on_init(entry_form_definition(), service, route).await;
        let mut form = Self {
            controller,
            category_service,
            categories: Vec::new(),
        };
        form.load_categories().await;
        (form, effects)
    }

    /// Refreshes the category choices. A failure leaves the list empty.
    pub async fn load_categories(&mut self) {
        match self.category_service.get_all().await {
            Ok(categories) => self.categories = categories,
            Err(err) => {
                tracing::warn!("failed to load categories: {err}");
                self.categories.clear();
            }
        }
    }

    pub fn controller(&self) -> &ResourceFormController<Entry, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ResourceFormController<Entry, S> {
        &mut self.controller
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_options(&self) -> Vec<SelectOption> {
        self.categories
            .iter()
            .filter_map(|category| {
                let id = category.id?;
                Some(SelectOption {
                    text: category.name.clone().unwrap_or_else(|| format!("#{id}")),
                    value: Value::from(id),
                })
            })
            .collect()
    }

    /// Choices for a select field, `None` for other fields.
    pub fn options_for(&self, field: &str) -> Option<Vec<SelectOption>> {
        match field {
            "type" => Some(type_options()),
            "categoryId" => Some(self.category_options()),
            _ => None,
        }
    }
}
