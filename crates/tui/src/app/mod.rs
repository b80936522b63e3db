use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use serde_json::Value;

use api_types::{category::Category, entry::Entry};
use frontend::{
    ActivatedRoute, Collection, Effect, FormState, Mode, Page, RestClient, RestResource,
    ResourceService, Router, ToastLevel,
    categories::{CategoryForm, category_form_definition},
    controller::PendingSubmit,
    entries::{EntryForm, SelectOption},
    form::{Form, InputKind},
    list::ResourceList,
    reports::{Report, ReportFilter},
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub type CategoryService = RestResource<Category>;
pub type EntryService = RestResource<Entry>;

const TOAST_TTL: Duration = Duration::from_secs(3);
const REPORT_LOAD_ERROR: &str = "Erro ao carregar o relatório.";

#[derive(Debug)]
pub struct ToastState {
    pub level: ToastLevel,
    pub message: String,
    shown_at: Instant,
}

impl ToastState {
    fn new(level: ToastLevel, message: String) -> Self {
        Self {
            level,
            message,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

#[derive(Debug)]
pub struct ListPage<T> {
    pub list: ResourceList<T>,
    /// Set while the delete confirmation prompt is shown.
    pub confirm_delete: bool,
}

impl<T> ListPage<T> {
    fn new(list: ResourceList<T>) -> Self {
        Self {
            list,
            confirm_delete: false,
        }
    }
}

#[derive(Debug)]
pub struct ReportsPage {
    pub report: Report,
    pub error: Option<String>,
    entries: Vec<Entry>,
    categories: Vec<Category>,
}

impl ReportsPage {
    fn new(filter: ReportFilter) -> Self {
        Self {
            report: Report::build(&[], &[], filter),
            error: None,
            entries: Vec::new(),
            categories: Vec::new(),
        }
    }

    async fn load(&mut self, entries: &EntryService, categories: &CategoryService) {
        let loaded = match entries.get_all().await {
            Ok(entries) => categories.get_all().await.map(|categories| (entries, categories)),
            Err(err) => Err(err),
        };
        match loaded {
            Ok((entries, categories)) => {
                self.entries = entries;
                self.categories = categories;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("failed to load report data: {err}");
                self.error = Some(REPORT_LOAD_ERROR.to_string());
            }
        }
        self.rebuild(self.report.filter);
    }

    fn rebuild(&mut self, filter: ReportFilter) {
        self.report = Report::build(&self.entries, &self.categories, filter);
    }
}

pub enum ActiveForm {
    Category(CategoryForm<CategoryService>),
    Entry(EntryForm<EntryService, CategoryService>),
}

enum PendingForm {
    Category(PendingSubmit<Category>),
    Entry(PendingSubmit<Entry>),
}

impl ActiveForm {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Category(_) => Collection::Categories,
            Self::Entry(_) => Collection::Entries,
        }
    }

    pub fn form(&self) -> &Form {
        match self {
            Self::Category(controller) => controller.form(),
            Self::Entry(entry) => entry.controller().form(),
        }
    }

    pub fn state(&self) -> &FormState {
        match self {
            Self::Category(controller) => controller.state(),
            Self::Entry(entry) => entry.controller().state(),
        }
    }

    pub fn page_title(&self) -> &str {
        match self {
            Self::Category(controller) => controller.page_title(),
            Self::Entry(entry) => entry.controller().page_title(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Category(controller) => controller.mode(),
            Self::Entry(entry) => entry.controller().mode(),
        }
    }

    pub fn can_submit(&self) -> bool {
        match self {
            Self::Category(controller) => controller.can_submit(),
            Self::Entry(entry) => entry.controller().can_submit(),
        }
    }

    pub fn options_for(&self, field: &str) -> Option<Vec<SelectOption>> {
        match self {
            Self::Category(_) => None,
            Self::Entry(entry) => entry.options_for(field),
        }
    }

    fn set_value(&mut self, name: &str, value: Value) {
        match self {
            Self::Category(controller) => controller.set_value(name, value),
            Self::Entry(entry) => entry.controller_mut().set_value(name, value),
        };
    }

    fn mark_touched(&mut self, name: &str) {
        match self {
            Self::Category(controller) => controller.mark_touched(name),
            Self::Entry(entry) => entry.controller_mut().mark_touched(name),
        }
    }

    fn mark_all_touched(&mut self) {
        match self {
            Self::Category(controller) => controller.mark_all_touched(),
            Self::Entry(entry) => entry.controller_mut().mark_all_touched(),
        }
    }

    fn refresh_page_title(&mut self) {
        match self {
            Self::Category(controller) => controller.refresh_page_title(),
            Self::Entry(entry) => entry.controller_mut().refresh_page_title(),
        }
    }

    fn begin_submit(&mut self) -> std::result::Result<PendingForm, Vec<Effect>> {
        match self {
            Self::Category(controller) => controller.begin_submit().map(PendingForm::Category),
            Self::Entry(entry) => entry.controller_mut().begin_submit().map(PendingForm::Entry),
        }
    }

    async fn finish_submit(&mut self, pending: PendingForm) -> Vec<Effect> {
        match (self, pending) {
            (Self::Category(controller), PendingForm::Category(pending)) => {
                let result = controller.dispatch(pending).await;
                controller.complete_submit(result)
            }
            (Self::Entry(entry), PendingForm::Entry(pending)) => {
                let result = entry.controller().dispatch(pending).await;
                entry.controller_mut().complete_submit(result)
            }
            _ => {
                tracing::error!("pending submission does not belong to the active form");
                Vec::new()
            }
        }
    }
}

pub struct FormPage {
    pub form: ActiveForm,
    pub focus: usize,
}

impl FormPage {
    pub(crate) fn new(form: ActiveForm) -> Self {
        Self { form, focus: 0 }
    }

    /// Names of the fields the user can edit, in display order.
    pub fn visible_fields(&self) -> Vec<&'static str> {
        self.form
            .form()
            .controls()
            .iter()
            .filter(|control| control.input() != InputKind::Hidden)
            .map(|control| control.name())
            .collect()
    }

    pub fn focused_field(&self) -> Option<&'static str> {
        self.visible_fields().get(self.focus).copied()
    }

    fn focused_input(&self) -> Option<InputKind> {
        let name = self.focused_field()?;
        self.form.form().get(name).map(|control| control.input())
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.visible_fields().len();
        if count == 0 {
            return;
        }
        if let Some(name) = self.focused_field() {
            self.form.mark_touched(name);
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(name) = self.focused_field() else {
            return;
        };
        let Some(control) = self.form.form().get(name) else {
            return;
        };
        if control.input() != InputKind::Text {
            return;
        }
        let mut text = control.display_value();
        edit(&mut text);
        self.form.set_value(name, Value::String(text));
    }

    fn toggle(&mut self) {
        let Some(name) = self.focused_field() else {
            return;
        };
        let Some(control) = self.form.form().get(name) else {
            return;
        };
        if control.input() != InputKind::Toggle {
            return;
        }
        let current = control.value().as_bool().unwrap_or(false);
        self.form.set_value(name, Value::Bool(!current));
    }

    fn cycle_option(&mut self, forward: bool) {
        let Some(name) = self.focused_field() else {
            return;
        };
        let Some(options) = self.form.options_for(name) else {
            self.toggle();
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = self.form.form().get(name).map(|control| control.value());
        let position = options
            .iter()
            .position(|option| Some(&option.value) == current);
        let len = options.len();
        let next = match position {
            None => 0,
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
        };
        self.form.set_value(name, options[next].value.clone());
    }
}

pub enum PageState {
    Loading,
    Reports(ReportsPage),
    Categories(ListPage<Category>),
    Entries(ListPage<Entry>),
    Form(FormPage),
}

pub struct AppState {
    pub page: PageState,
    pub route: ActivatedRoute,
    /// Location as shown to the user; unchanged by skip-location navigations.
    pub location: String,
    pub toast: Option<ToastState>,
    pub alert: Option<String>,
    pub base_url: String,
}

pub struct App {
    categories: CategoryService,
    entries: EntryService,
    router: Router,
    timezone: chrono_tz::Tz,
    pub state: AppState,
    pending_submit: Option<PendingForm>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = RestClient::with_timeout(&config.base_url, config.request_timeout())?;
        let router = Router::new(&config.route)?;
        let timezone = config.timezone()?;

        let state = AppState {
            page: PageState::Loading,
            route: router.current().clone(),
            location: router.location().to_string(),
            toast: None,
            alert: None,
            base_url: client.base_url().to_string(),
        };

        Ok(Self {
            categories: client.resource(Collection::Categories.path()),
            entries: client.resource(Collection::Entries.path()),
            router,
            timezone,
            state,
            pending_submit: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let initial = self.router.current().clone();
        let effects = self.activate(initial).await;
        self.apply_effects(effects).await;

        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;
            self.after_render();

            // The submitting state has been drawn; now send the request.
            if let Some(pending) = self.pending_submit.take() {
                let effects = match &mut self.state.page {
                    PageState::Form(page) => page.form.finish_submit(pending).await,
                    _ => Vec::new(),
                };
                self.apply_effects(effects).await;
                continue;
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }
        }

        Ok(())
    }

    fn after_render(&mut self) {
        if let PageState::Form(page) = &mut self.state.page {
            page.form.refresh_page_title();
        }
    }

    fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Instantiates the page for `route`, loading whatever it needs.
    async fn activate(&mut self, route: ActivatedRoute) -> Vec<Effect> {
        tracing::debug!(%route, "activating page");
        self.pending_submit = None;
        self.state.route = route.clone();
        self.state.location = self.router.location().to_string();

        let mut effects = Vec::new();
        self.state.page = match route.page() {
            Page::Reports => {
                let mut page = ReportsPage::new(ReportFilter::containing(self.today()));
                page.load(&self.entries, &self.categories).await;
                PageState::Reports(page)
            }
            Page::List(Collection::Categories) => {
                let mut list = ResourceList::default();
                list.load(&self.categories).await;
                PageState::Categories(ListPage::new(list))
            }
            Page::List(Collection::Entries) => {
                let mut list = ResourceList::default();
                list.load(&self.entries).await;
                PageState::Entries(ListPage::new(list))
            }
            Page::Form(Collection::Categories) => {
                let definition = category_form_definition();
                let (form, loaded) =
                    CategoryForm::on_init(definition, self.categories.clone(), route).await;
                effects = loaded;
                PageState::Form(FormPage::new(ActiveForm::Category(form)))
            }
            Page::Form(Collection::Entries) => {
                let (form, loaded) =
                    EntryForm::on_init(self.entries.clone(), self.categories.clone(), route).await;
                effects = loaded;
                PageState::Form(FormPage::new(ActiveForm::Entry(form)))
            }
        };
        effects
    }

    async fn apply_effects(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Toast { level, message } => {
                    self.state.toast = Some(ToastState::new(level, message));
                }
                Effect::Alert(message) => {
                    self.state.alert = Some(message);
                }
                Effect::Navigate {
                    url,
                    skip_location_change,
                } => match self.router.navigate_by_url(&url, skip_location_change).cloned() {
                    Ok(route) => queue.extend(self.activate(route).await),
                    Err(err) => {
                        tracing::warn!("navigation failed: {err}");
                        self.state.toast =
                            Some(ToastState::new(ToastLevel::Error, err.to_string()));
                    }
                },
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        if self.state.alert.take().is_some() {
            return;
        }

        let effects = if matches!(self.state.page, PageState::Form(_)) {
            self.handle_form_key(action)
        } else {
            self.handle_page_key(action).await
        };
        self.apply_effects(effects).await;
    }

    fn handle_form_key(&mut self, action: AppAction) -> Vec<Effect> {
        let PageState::Form(page) = &mut self.state.page else {
            return Vec::new();
        };

        match action {
            AppAction::Cancel => {
                return vec![Effect::navigate(page.form.collection().path(), false)];
            }
            AppAction::NextField | AppAction::Down => page.move_focus(true),
            AppAction::PrevField | AppAction::Up => page.move_focus(false),
            AppAction::Left => page.cycle_option(false),
            AppAction::Right => page.cycle_option(true),
            AppAction::Backspace => page.edit_text(|text| {
                text.pop();
            }),
            AppAction::Input(' ') if page.focused_input() == Some(InputKind::Toggle) => {
                page.toggle();
            }
            AppAction::Input(ch) => page.edit_text(|text| text.push(ch)),
            AppAction::Submit => {
                if page.form.can_submit() {
                    match page.form.begin_submit() {
                        Ok(pending) => self.pending_submit = Some(pending),
                        Err(effects) => return effects,
                    }
                } else if !page.form.state().is_submitting() {
                    page.form.mark_all_touched();
                }
            }
            AppAction::Quit | AppAction::None => {}
        }
        Vec::new()
    }

    async fn handle_page_key(&mut self, action: AppAction) -> Vec<Effect> {
        let confirmed = matches!(action, AppAction::Input('y' | 's'));
        match &mut self.state.page {
            PageState::Categories(page) if page.confirm_delete => {
                page.confirm_delete = false;
                if confirmed {
                    return page.list.delete_selected(&self.categories).await;
                }
                return Vec::new();
            }
            PageState::Entries(page) if page.confirm_delete => {
                page.confirm_delete = false;
                if confirmed {
                    return page.list.delete_selected(&self.entries).await;
                }
                return Vec::new();
            }
            _ => {}
        }

        match action {
            AppAction::Backspace => return self.go_back().await,
            AppAction::Up => self.move_selection(false),
            AppAction::Down => self.move_selection(true),
            AppAction::Left => self.shift_report_month(false),
            AppAction::Right => self.shift_report_month(true),
            AppAction::Submit => return self.edit_selected(),
            AppAction::Input(ch) => match ch {
                'q' => self.should_quit = true,
                'r' => return vec![Effect::navigate("reports", false)],
                'c' => return vec![Effect::navigate(Collection::Categories.path(), false)],
                'l' => return vec![Effect::navigate(Collection::Entries.path(), false)],
                'n' => {
                    if let Some(collection) = self.current_collection() {
                        return vec![Effect::navigate(format!("{}/new", collection.path()), false)];
                    }
                }
                'e' => return self.edit_selected(),
                'd' => self.request_delete(),
                'j' => self.move_selection(true),
                'k' => self.move_selection(false),
                _ => {}
            },
            _ => {}
        }
        Vec::new()
    }

    async fn go_back(&mut self) -> Vec<Effect> {
        match self.router.back().cloned() {
            Some(route) => self.activate(route).await,
            None => Vec::new(),
        }
    }

    fn current_collection(&self) -> Option<Collection> {
        match &self.state.page {
            PageState::Categories(_) => Some(Collection::Categories),
            PageState::Entries(_) => Some(Collection::Entries),
            _ => None,
        }
    }

    fn edit_selected(&self) -> Vec<Effect> {
        let target = match &self.state.page {
            PageState::Categories(page) => page
                .list
                .selected_item()
                .and_then(|category| category.id)
                .map(|id| (Collection::Categories, id)),
            PageState::Entries(page) => page
                .list
                .selected_item()
                .and_then(|entry| entry.id)
                .map(|id| (Collection::Entries, id)),
            _ => None,
        };
        target
            .map(|(collection, id)| {
                vec![Effect::navigate(format!("{}/{id}/edit", collection.path()), false)]
            })
            .unwrap_or_default()
    }

    fn request_delete(&mut self) {
        match &mut self.state.page {
            PageState::Categories(page) => {
                page.confirm_delete = page.list.selected_item().is_some();
            }
            PageState::Entries(page) => {
                page.confirm_delete = page.list.selected_item().is_some();
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, forward: bool) {
        match &mut self.state.page {
            PageState::Categories(page) if forward => page.list.select_next(),
            PageState::Categories(page) => page.list.select_prev(),
            PageState::Entries(page) if forward => page.list.select_next(),
            PageState::Entries(page) => page.list.select_prev(),
            _ => {}
        }
    }

    fn shift_report_month(&mut self, forward: bool) {
        if let PageState::Reports(page) = &mut self.state.page {
            let filter = if forward {
                page.report.filter.next_month()
            } else {
                page.report.filter.prev_month()
            };
            page.rebuild(filter);
        }
    }
}
