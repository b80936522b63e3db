//! Generic create-or-edit lifecycle for a single resource.
//!
//! [`ResourceFormController`] owns the form, the resource being edited and
//! a small [`FormState`]. Side effects (toasts, alerts, navigations) are
//! returned as [`Effect`]s for the shell to apply.

use api_types::error::ErrorsBody;
use serde_json::Value;

use crate::{
    form::{FieldSpec, Form},
    route::{ActivatedRoute, Mode},
    service::{Resource, ResourceService, ServiceError},
};

pub const SUCCESS_MESSAGE: &str = "Solicitação processada com sucesso!";
pub const SUBMIT_ERROR_MESSAGE: &str = "Ocorreu um erro ao processar a sua solicitação!";
pub const LOAD_ERROR_MESSAGE: &str = "Ocorreu um erro no servidor, tente mais tarde.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Falha na comunicação com o servidor. Por favor tente mais tarde.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Transient notification.
    Toast { level: ToastLevel, message: String },
    /// Blocking message the user must dismiss.
    Alert(String),
    Navigate {
        url: String,
        skip_location_change: bool,
    },
}

impl Effect {
    pub fn toast(level: ToastLevel, message: &str) -> Self {
        Self::Toast {
            level,
            message: message.to_string(),
        }
    }

    pub fn alert(message: &str) -> Self {
        Self::Alert(message.to_string())
    }

    pub fn navigate(url: impl Into<String>, skip_location_change: bool) -> Self {
        Self::Navigate {
            url: url.into(),
            skip_location_change,
        }
    }
}

/// Resource-specific pieces plugged into the generic controller.
pub struct FormDefinition<T> {
    /// Field list and per-field validators.
    pub fields: fn() -> Vec<FieldSpec>,
    /// Turns the form value into a resource.
    pub from_json: fn(Value) -> Result<T, serde_json::Error>,
    pub creation_title: &'static str,
    pub edition_title: fn(&T) -> String,
}

impl<T> Clone for FormDefinition<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FormDefinition<T> {}

/// Default JSON-to-model conversion.
pub fn json_to_resource<T: Resource>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Submission state read by the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    status: FormStatus,
    server_errors: Option<Vec<String>>,
}

impl FormState {
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Advisory flag: the shell disables the submit action while set.
    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn server_errors(&self) -> Option<&[String]> {
        self.server_errors.as_deref()
    }

    fn begin_submit(&mut self) {
        self.status = FormStatus::Submitting;
    }

    fn succeed(&mut self) {
        self.status = FormStatus::Succeeded;
    }

    fn fail(&mut self, messages: Vec<String>) {
        self.status = FormStatus::Failed;
        self.server_errors = Some(messages);
    }

    fn settle(&mut self) {
        if matches!(self.status, FormStatus::Succeeded | FormStatus::Failed) {
            self.status = FormStatus::Idle;
        }
    }
}

/// A converted resource waiting to be sent.
#[derive(Debug)]
pub struct PendingSubmit<T> {
    mode: Mode,
    resource: T,
}

impl<T> PendingSubmit<T> {
    pub fn resource(&self) -> &T {
        &self.resource
    }
}

pub struct ResourceFormController<T, S> {
    definition: FormDefinition<T>,
    service: S,
    route: ActivatedRoute,
    mode: Mode,
    form: Form,
    resource: T,
    state: FormState,
    page_title: String,
}

impl<T, S> ResourceFormController<T, S>
where
    T: Resource,
    S: ResourceService<T>,
{
    /// Detects the mode from `route` and builds the empty form.
    pub fn new(definition: FormDefinition<T>, service: S, route: ActivatedRoute) -> Self {
        let mode = Mode::from_route(&route);
        let form = Form::group((definition.fields)());
        let mut controller = Self {
            definition,
            service,
            route,
            mode,
            form,
            resource: T::default(),
            state: FormState::default(),
            page_title: String::new(),
        };
        controller.refresh_page_title();
        controller
    }

    /// Full activation: mode detection, form construction and, in edit
    /// mode, loading the resource.
    pub async fn on_init(
        definition: FormDefinition<T>,
        service: S,
        route: ActivatedRoute,
    ) -> (Self, Vec<Effect>) {
        let mut controller = Self::new(definition, service, route);
        let effects = controller.load_resource().await;
        controller.refresh_page_title();
        (controller, effects)
    }

    /// Fetches the resource named by the route's `id` param and patches it
    /// into the form. No-op in new mode.
    pub async fn load_resource(&mut self) -> Vec<Effect> {
        if self.mode != Mode::Edit {
            return Vec::new();
        }

        let Some(id) = self.route.param("id").and_then(|raw| raw.parse::<i64>().ok()) else {
            tracing::warn!(route = %self.route, "edit route without a numeric id");
            return vec![Effect::alert(LOAD_ERROR_MESSAGE)];
        };

        let loaded = self
            .service
            .get_by_id(id)
            .await
            .and_then(|resource| Ok((serde_json::to_value(&resource)?, resource)));

        match loaded {
            Ok((record, resource)) => {
                self.form.patch_value(&record);
                self.resource = resource;
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(id, "failed to load resource: {err}");
                vec![Effect::alert(LOAD_ERROR_MESSAGE)]
            }
        }
    }

    /// Recomputes the title; called after every render.
    pub fn refresh_page_title(&mut self) {
        self.page_title = match self.mode {
            Mode::New => self.definition.creation_title.to_string(),
            Mode::Edit => (self.definition.edition_title)(&self.resource),
        };
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn route(&self) -> &ActivatedRoute {
        &self.route
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// User edit. Leaves a finished submission state and goes back to idle.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let changed = self.form.set_value(name, value);
        if changed {
            self.state.settle();
        }
        changed
    }

    pub fn mark_touched(&mut self, name: &str) {
        self.form.mark_touched(name);
    }

    pub fn mark_all_touched(&mut self) {
        self.form.mark_all_touched();
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting() && self.form.is_valid()
    }

    /// Submits the form: create in new mode, update in edit mode.
    pub async fn submit(&mut self) -> Vec<Effect> {
        match self.begin_submit() {
            Ok(pending) => {
                let result = self.dispatch(pending).await;
                self.complete_submit(result)
            }
            Err(effects) => effects,
        }
    }

    /// First half of [`submit`](Self::submit): raises the submitting flag and
    /// converts the form value.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit<T>, Vec<Effect>> {
        self.state.begin_submit();
        match (self.definition.from_json)(self.form.value()) {
            Ok(resource) => Ok(PendingSubmit {
                mode: self.mode,
                resource,
            }),
            Err(err) => {
                tracing::debug!("form value does not convert: {err}");
                Err(self.actions_for_error(vec![format!("Dados inválidos: {err}")]))
            }
        }
    }

    pub async fn dispatch(&self, pending: PendingSubmit<T>) -> Result<T, ServiceError> {
        match pending.mode {
            Mode::New => self.service.create(pending.resource).await,
            Mode::Edit => self.service.update(pending.resource).await,
        }
    }

    pub fn complete_submit(&mut self, result: Result<T, ServiceError>) -> Vec<Effect> {
        match result {
            Ok(saved) => self.actions_for_success(saved),
            Err(err) => {
                tracing::warn!(route = %self.route, "submit failed: {err}");
                self.actions_for_error(server_error_messages(&err))
            }
        }
    }

    fn actions_for_success(&mut self, saved: T) -> Vec<Effect> {
        self.state.succeed();
        let id = saved.id();
        self.resource = saved;
        self.refresh_page_title();

        let collection = self.route.parent_path().to_string();
        let mut effects = vec![
            Effect::toast(ToastLevel::Success, SUCCESS_MESSAGE),
            Effect::navigate(collection.clone(), true),
        ];
        // Leaving and re-entering the edit route reloads this page.
        match id {
            Some(id) => effects.push(Effect::navigate(format!("{collection}/{id}/edit"), false)),
            None => tracing::warn!(%collection, "saved resource came back without an id"),
        }
        effects
    }

    fn actions_for_error(&mut self, messages: Vec<String>) -> Vec<Effect> {
        self.state.fail(messages);
        vec![Effect::toast(ToastLevel::Error, SUBMIT_ERROR_MESSAGE)]
    }
}

/// User-facing messages for a failed submission.
///
/// A 422 carries `{"errors": [..]}`; everything else, including a 422 whose
/// body does not parse, gets the generic connection message.
pub fn server_error_messages(err: &ServiceError) -> Vec<String> {
    if let ServiceError::Status { status: 422, body } = err {
        match serde_json::from_str::<ErrorsBody>(body) {
            Ok(parsed) => return parsed.errors,
            Err(parse_err) => tracing::warn!("unparseable 422 body: {parse_err}"),
        }
    }
    vec![CONNECTION_ERROR_MESSAGE.to_string()]
}
