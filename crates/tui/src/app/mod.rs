use std::time::{Duration, Instant};

use api_types::{Category, EntryStatus, Enumerated, FinancialEntry, PaymentMethod};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use engine::{EntryForm, Paginator, Summary, filter_entries};
use tokio::sync::mpsc;

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(3);
const INVALID_FORM: &str = "Please fill in all fields correctly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Create,
    Edit,
    Login,
}

/// Who is signed in, if anyone.
///
/// Starts signed out. There is no auth endpoint on the backend, so signing in
/// only changes what the navigation offers.
#[derive(Debug, Default)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn login(&mut self, username: &str) {
        self.username = Some(username.to_string());
    }

    pub fn logout(&mut self) {
        self.username = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Amount,
    Description,
    Date,
    Category,
    PaymentMethod,
    Status,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        Self::Amount,
        Self::Description,
        Self::Date,
        Self::Category,
        Self::PaymentMethod,
        Self::Status,
        Self::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Description => "Description",
            Self::Date => "Date",
            Self::Category => "Category",
            Self::PaymentMethod => "Payment Method",
            Self::Status => "Status",
            Self::Notes => "Notes",
        }
    }

    /// Placeholder shown while a choice field has nothing selected.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Category => "Select a category",
            Self::PaymentMethod => "Select a payment method",
            Self::Status => "Select a status",
            Self::Date => "YYYY-MM-DD",
            Self::Amount | Self::Description | Self::Notes => "",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::Category | Self::PaymentMethod | Self::Status)
    }

    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Default)]
pub struct FormState {
    pub form: EntryForm,
    pub focus: FormField,
    /// Record being edited; `None` on the create form.
    pub editing: Option<FinancialEntry>,
    /// A submission is in flight; submit is disabled until it resolves.
    pub submitting: bool,
    /// Ticket of the submission this form sent while it is in flight. A
    /// response only settles the form holding its ticket.
    pub ticket: Option<u64>,
    pub error: Option<String>,
}

impl FormState {
    fn text_field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Amount => Some(&mut self.form.amount),
            FormField::Description => Some(&mut self.form.description),
            FormField::Date => Some(&mut self.form.date),
            FormField::Notes => Some(&mut self.form.notes),
            FormField::Category | FormField::PaymentMethod | FormField::Status => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Category => self.form.category = cycle(self.form.category, forward),
            FormField::PaymentMethod => {
                self.form.payment_method = cycle(self.form.payment_method, forward)
            }
            FormField::Status => self.form.status = cycle(self.form.status, forward),
            FormField::Amount | FormField::Description | FormField::Date | FormField::Notes => {}
        }
    }

    fn clear_choice(&mut self) {
        match self.focus {
            FormField::Category => self.form.category = None,
            FormField::PaymentMethod => self.form.payment_method = None,
            FormField::Status => self.form.status = None,
            FormField::Amount | FormField::Description | FormField::Date | FormField::Notes => {}
        }
    }

    pub fn choice_label(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Category => self.form.category.map(Category::as_str),
            FormField::PaymentMethod => self.form.payment_method.map(PaymentMethod::as_str),
            FormField::Status => self.form.status.map(EntryStatus::as_str),
            FormField::Amount | FormField::Description | FormField::Date | FormField::Notes => None,
        }
    }

    pub fn text_value(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.form.amount,
            FormField::Description => &self.form.description,
            FormField::Date => &self.form.date,
            FormField::Notes => &self.form.notes,
            FormField::Category | FormField::PaymentMethod | FormField::Status => "",
        }
    }
}

/// Steps through `None` and every variant, like a select with an empty
/// first option.
fn cycle<T: Enumerated>(current: Option<T>, forward: bool) -> Option<T> {
    let all = T::ALL;
    let index = current.and_then(|value| all.iter().position(|v| *v == value));
    match (index, forward) {
        (None, true) => all.first().copied(),
        (None, false) => all.last().copied(),
        (Some(i), true) => all.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => all.get(i - 1).copied(),
    }
}

#[derive(Debug, Default)]
pub struct ListState {
    pub entries: Vec<FinancialEntry>,
    pub search: String,
    pub searching: bool,
    pub pager: Paginator,
    /// Row within the current page.
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl ListState {
    fn new(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            ..Self::default()
        }
    }

    pub fn filtered(&self) -> Vec<&FinancialEntry> {
        filter_entries(&self.entries, &self.search)
    }

    pub fn visible(&self) -> Vec<&FinancialEntry> {
        let filtered = self.filtered();
        self.pager.page(&filtered).to_vec()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_entries(self.filtered())
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.filtered().len())
    }

    pub fn selected_entry(&self) -> Option<&FinancialEntry> {
        self.visible().get(self.selected).copied()
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn next_page(&mut self) {
        let len = self.filtered().len();
        self.pager.next(len);
        self.selected = 0;
    }

    fn prev_page(&mut self) {
        self.pager.prev();
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub session: Session,
    pub login: LoginState,
    pub list: ListState,
    pub form: FormState,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

impl AppState {
    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

/// Outcome of a background request, applied on the UI loop.
///
/// Fetches carry the generation of the `refresh` that started them and form
/// submissions carry their ticket, so late responses can be told apart.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded {
        generation: u64,
        result: std::result::Result<Vec<FinancialEntry>, ClientError>,
    },
    Created {
        ticket: u64,
        result: std::result::Result<FinancialEntry, ClientError>,
    },
    Updated {
        ticket: u64,
        merged: FinancialEntry,
        result: std::result::Result<(), ClientError>,
    },
    Toggled(std::result::Result<(), ClientError>),
    Deleted(std::result::Result<(), ClientError>),
}

pub struct App {
    client: Client,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<ApiEvent>,
    events_rx: mpsc::UnboundedReceiver<ApiEvent>,
    /// Generation of the latest fetch; older `Loaded` events are dropped.
    refresh_generation: u64,
    next_ticket: u64,
    /// Ticket of the create/update request still waiting for a response.
    in_flight: Option<u64>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = AppState {
            screen: Screen::List,
            session: Session::default(),
            login: LoginState::default(),
            list: ListState::new(config.page_size),
            form: FormState::default(),
            toast: None,
            base_url: config.base_url,
        };

        Ok(Self {
            client,
            state,
            events_tx,
            events_rx,
            refresh_generation: 0,
            next_ticket: 0,
            in_flight: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.refresh();
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain_events();
            self.expire_toast(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_action(map_key(key));
                    }
                }
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.state.toast = None;
        }
    }

    fn spawn<F>(&self, request: F)
    where
        F: Future<Output = ApiEvent> + Send + 'static,
    {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            // The receiver only goes away on shutdown.
            let _ = events.send(request.await);
        });
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.screen {
            Screen::List => self.handle_list(action),
            Screen::Create | Screen::Edit => self.handle_form(action),
            Screen::Login => self.handle_login(action),
        }
    }

    fn handle_list(&mut self, action: AppAction) {
        let list = &mut self.state.list;
        if list.searching {
            match action {
                AppAction::Input(ch) => {
                    list.search.push(ch);
                    list.clamp_selection();
                }
                AppAction::Backspace => {
                    list.search.pop();
                    list.clamp_selection();
                }
                AppAction::Submit | AppAction::Cancel => list.searching = false,
                AppAction::Up => list.select_prev(),
                AppAction::Down => list.select_next(),
                _ => {}
            }
            return;
        }

        match action {
            AppAction::Up | AppAction::Input('k') => list.select_prev(),
            AppAction::Down | AppAction::Input('j') => list.select_next(),
            AppAction::Left | AppAction::Input('p') => list.prev_page(),
            AppAction::Right | AppAction::Input('n') => list.next_page(),
            AppAction::Input('/') => list.searching = true,
            AppAction::Cancel => {
                list.search.clear();
                list.clamp_selection();
            }
            AppAction::Input('a') => self.open_create(),
            AppAction::Submit | AppAction::Input('e') => self.open_edit(),
            AppAction::Input('d') => self.delete_selected(),
            AppAction::Input('t') => self.toggle_selected(),
            AppAction::Input('r') => self.refresh(),
            AppAction::Input('l') => {
                if self.state.session.is_authenticated() {
                    self.logout();
                } else {
                    self.state.login = LoginState::default();
                    self.state.screen = Screen::Login;
                }
            }
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn open_create(&mut self) {
        self.state.form = FormState::default();
        self.state.screen = Screen::Create;
    }

    fn open_edit(&mut self) {
        let Some(entry) = self.state.list.selected_entry().cloned() else {
            return;
        };
        self.state.form = FormState {
            form: EntryForm::for_entry(&entry),
            editing: Some(entry),
            ..FormState::default()
        };
        self.state.screen = Screen::Edit;
    }

    fn handle_form(&mut self, action: AppAction) {
        let form = &mut self.state.form;
        match action {
            AppAction::NextField | AppAction::Down => form.focus = form.focus.next(),
            AppAction::PrevField | AppAction::Up => form.focus = form.focus.prev(),
            AppAction::Left if form.focus.is_choice() => form.cycle_choice(false),
            AppAction::Right if form.focus.is_choice() => form.cycle_choice(true),
            AppAction::Input(' ') if form.focus.is_choice() => form.cycle_choice(true),
            AppAction::Input(ch) => {
                if let Some(field) = form.text_field_mut(form.focus) {
                    field.push(ch);
                }
            }
            AppAction::Backspace => {
                if form.focus.is_choice() {
                    form.clear_choice();
                } else if let Some(field) = form.text_field_mut(form.focus) {
                    field.pop();
                }
            }
            AppAction::Submit => self.submit_form(),
            AppAction::Cancel => {
                self.state.form.error = None;
                self.state.screen = Screen::List;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        if self.state.form.submitting {
            return;
        }
        if self.in_flight.is_some() {
            self.state.notify(
                ToastLevel::Info,
                "Please wait for the previous submission to finish.",
            );
            return;
        }

        match self.state.screen {
            Screen::Create => match self.state.form.form.validate_new() {
                Ok(body) => {
                    let ticket = self.begin_submission();
                    let client = self.client.clone();
                    self.spawn(async move {
                        let result = client.create_entry(&body).await;
                        ApiEvent::Created { ticket, result }
                    });
                }
                Err(err) => self.reject_form(err),
            },
            Screen::Edit => {
                let Some(original) = self.state.form.editing.as_ref() else {
                    self.state.screen = Screen::List;
                    return;
                };
                match self.state.form.form.validate_update(original) {
                    Ok(merged) => {
                        let ticket = self.begin_submission();
                        let client = self.client.clone();
                        self.spawn(async move {
                            let result = client.update_entry(&merged).await;
                            ApiEvent::Updated {
                                ticket,
                                merged,
                                result,
                            }
                        });
                    }
                    Err(err) => self.reject_form(err),
                }
            }
            Screen::List | Screen::Login => {}
        }
    }

    fn begin_submission(&mut self) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(ticket);
        self.state.form.error = None;
        self.state.form.submitting = true;
        self.state.form.ticket = Some(ticket);
        ticket
    }

    /// Settles the submission `ticket`. Returns whether the open form is the
    /// one that sent it.
    fn finish_submission(&mut self, ticket: u64) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        let form = &mut self.state.form;
        if form.ticket != Some(ticket) {
            return false;
        }
        form.ticket = None;
        form.submitting = false;
        true
    }

    fn reject_form(&mut self, err: engine::EngineError) {
        tracing::debug!(%err, "form rejected");
        self.state.form.error = Some(err.to_string());
        self.state.notify(ToastLevel::Error, INVALID_FORM);
    }

    fn refresh(&mut self) {
        self.refresh_generation += 1;
        let generation = self.refresh_generation;
        self.state.list.loading = true;
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.list_entries().await;
            ApiEvent::Loaded { generation, result }
        });
    }

    fn toggle_selected(&mut self) {
        let Some(entry) = self.state.list.selected_entry() else {
            return;
        };
        let Some(updated) = engine::toggled(entry) else {
            self.state.notify(
                ToastLevel::Info,
                "Only pending or completed transactions can be toggled.",
            );
            return;
        };

        let client = self.client.clone();
        self.spawn(async move { ApiEvent::Toggled(client.update_entry(&updated).await) });
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.state.list.selected_entry().map(|entry| entry.id.clone()) else {
            return;
        };
        let client = self.client.clone();
        self.spawn(async move { ApiEvent::Deleted(client.delete_entry(&id).await) });
    }

    fn handle_login(&mut self, action: AppAction) {
        let login = &mut self.state.login;
        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                login.focus = match login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            AppAction::Input(ch) => login_field_mut(login).push(ch),
            AppAction::Backspace => {
                login_field_mut(login).pop();
            }
            AppAction::Submit => self.attempt_login(),
            AppAction::Cancel => self.state.screen = Screen::List,
            _ => {}
        }
    }

    fn attempt_login(&mut self) {
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.trim();

        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some("Please fill in all fields.".to_string());
            return;
        }

        self.state.session.login(&username);
        self.state.login = LoginState::default();
        self.state.screen = Screen::List;
        tracing::info!(%username, "logged in");
        self.state.notify(ToastLevel::Success, "Successfully logged in!");
    }

    fn logout(&mut self) {
        self.state.session.logout();
        self.state.login = LoginState::default();
        self.state.screen = Screen::Login;
        tracing::info!("logged out");
        self.state.notify(ToastLevel::Success, "Successfully logged out!");
    }

    fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded { generation, .. } if generation != self.refresh_generation => {
                tracing::debug!(generation, "dropping stale fetch");
            }
            ApiEvent::Loaded {
                result: Ok(entries),
                ..
            } => {
                let list = &mut self.state.list;
                list.entries = entries;
                list.loading = false;
                list.error = None;
                list.last_refresh = Some(Local::now());
                list.clamp_selection();
            }
            ApiEvent::Loaded {
                result: Err(err), ..
            } => {
                tracing::warn!(%err, "failed to fetch entries");
                self.state.list.loading = false;
                self.state.list.error = Some(err.to_string());
                self.state
                    .notify(ToastLevel::Error, "Failed to load transactions.");
            }
            ApiEvent::Created {
                ticket,
                result: Ok(_),
            } => {
                if self.finish_submission(ticket) {
                    self.state.form.form.clear();
                    if self.state.screen == Screen::Create {
                        self.state.screen = Screen::List;
                    }
                }
                self.state
                    .notify(ToastLevel::Success, "Financial entry created successfully!");
                self.refresh();
            }
            ApiEvent::Created {
                ticket,
                result: Err(err),
            } => {
                tracing::warn!(%err, "failed to create entry");
                self.finish_submission(ticket);
                self.state
                    .notify(ToastLevel::Error, "Failed to create financial entry.");
            }
            ApiEvent::Updated {
                ticket,
                merged,
                result: Ok(()),
            } => {
                if self.finish_submission(ticket) {
                    self.state.form.editing = None;
                    if self.state.screen == Screen::Edit {
                        self.state.screen = Screen::List;
                    }
                }
                if let Some(stored) = self
                    .state
                    .list
                    .entries
                    .iter_mut()
                    .find(|entry| entry.id == merged.id)
                {
                    *stored = merged;
                }
                self.state
                    .notify(ToastLevel::Success, "Transaction updated successfully!");
                self.refresh();
            }
            ApiEvent::Updated {
                ticket,
                result: Err(err),
                ..
            } => {
                tracing::warn!(%err, "failed to update entry");
                self.finish_submission(ticket);
                self.state.notify(
                    ToastLevel::Error,
                    "Failed to update transaction. Please try again.",
                );
            }
            ApiEvent::Toggled(Ok(())) => self.refresh(),
            ApiEvent::Toggled(Err(err)) => {
                tracing::warn!(%err, "failed to toggle status");
                self.state
                    .notify(ToastLevel::Error, "Failed to update transaction status.");
            }
            ApiEvent::Deleted(Ok(())) => {
                self.state
                    .notify(ToastLevel::Success, "Transaction deleted successfully!");
                self.refresh();
            }
            ApiEvent::Deleted(Err(err)) => {
                tracing::warn!(%err, "failed to delete entry");
                self.state
                    .notify(ToastLevel::Error, "Failed to delete transaction.");
            }
        }
    }
}

fn login_field_mut(login: &mut LoginState) -> &mut String {
    match login.focus {
        LoginField::Username => &mut login.username,
        LoginField::Password => &mut login.password,
    }
}
