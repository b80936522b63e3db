use api_types::category::Category;

use crate::{
    controller::{FormDefinition, ResourceFormController, json_to_resource},
    form::{FieldSpec, InputKind, Validator},
};

pub type CategoryForm<S> = ResourceFormController<Category, S>;

fn category_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::hidden("id"),
        FieldSpec::new("name", "Nome", InputKind::Text)
            .validators([Validator::Required, Validator::MinLength(2)]),
        FieldSpec::new("description", "Descrição", InputKind::Text),
    ]
}

pub fn category_form_definition() -> FormDefinition<Category> {
    FormDefinition {
        fields: category_fields,
        from_json: json_to_resource::<Category>,
        creation_title: "Cadastro de Nova Categoria",
        edition_title: |category| {
            format!(
                "Editando Categoria: {}",
                category.name.as_deref().unwrap_or_default()
            )
        },
    }
}
