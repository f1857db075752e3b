/// Things that can happen to this app
mod action;

/// Side effects, and how to run them
mod effect;

/// The login form
mod login_form;

/// The registration form
mod register_form;

/// Shared rendering for bordered text inputs
mod text_field;

pub use action::Action;
pub use effect::{Effect, EffectContext};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use login_form::LoginForm;
use ratatui::{
    layout::{Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState,
    },
    Frame,
};
use register_form::RegisterForm;
use std::process::ExitCode;
use visita_core::api::Client;
use visita_core::appointment::Summary;

/// The "functional core" of the app.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        Self {
            status_line: None,
            state: AppState::Unloaded,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &mut self.state {
            AppState::Unloaded => frame.render_widget(Paragraph::new("Loading…"), body_area),
            AppState::Running(running) => running.render(body_area, frame),
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line,
            None => "All good!",
        });

        frame.render_widget(status, status_area);
    }

    /// Produce any side effects as needed to initialize the app.
    #[expect(clippy::unused_self)]
    pub fn init(&self) -> Effect {
        Effect::LoadAuth
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadedAuth(client) => {
                let (screen, effects) = Screen::initial(&client);
                self.state = AppState::Running(Running { client, screen });

                effects
            }

            Action::SavedAuth => {
                self.status_line = Some("Saved login".to_owned());

                vec![]
            }

            Action::Registered(result) => self
                .state
                .map_running_mut(|running| {
                    let Screen::Register(form) = &mut running.screen else {
                        return vec![];
                    };

                    match result {
                        Ok(user) => {
                            tracing::info!(email = %user.email, "registered");
                            running.screen = Screen::Registered;
                        }
                        Err(error) => {
                            form.submitted();
                            form.show_error(&error);
                        }
                    }

                    vec![]
                })
                .unwrap_or_default(),

            Action::LoggedIn(result) => self
                .state
                .map_running_mut(|running| {
                    let Screen::Login(form) = &mut running.screen else {
                        return vec![];
                    };

                    match result {
                        Ok(client) => {
                            running.client = client;
                            running.screen = Screen::Appointments(Appointments::fetching());

                            vec![
                                Effect::SaveAuth(running.client.clone()),
                                Effect::FetchAppointments(running.client.clone()),
                            ]
                        }
                        Err(_) => {
                            form.submitted();
                            form.show_error();

                            vec![]
                        }
                    }
                })
                .unwrap_or_default(),

            Action::GotAppointments(result) => {
                let problem = self
                    .state
                    .map_running_mut(|running| {
                        let Screen::Appointments(appointments) = &mut running.screen else {
                            return None;
                        };

                        match result {
                            Ok(rows) => {
                                appointments.loaded(rows);

                                None
                            }
                            Err(error) => {
                                appointments.failed();

                                Some(format!("Could not load appointments: {error}"))
                            }
                        }
                    })
                    .flatten();

                if let Some(problem) = problem {
                    self.status_line = Some(problem);
                }

                vec![]
            }

            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                self.handle_key(key)
            }

            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Decide what a key press means on the current screen.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let AppState::Running(running) = &mut self.state else {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.state = AppState::Exiting(ExitCode::SUCCESS);
            }

            return vec![];
        };

        match &mut running.screen {
            Screen::Login(form) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }
                (KeyCode::Char('r'), modifiers)
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    running.screen = Screen::Register(RegisterForm::default());

                    vec![]
                }
                (KeyCode::Enter, _) => form.submit(&running.client),
                _ => {
                    form.handle_event(key);

                    vec![]
                }
            },

            Screen::Register(form) => match key.code {
                KeyCode::Esc => {
                    running.screen = Screen::Login(LoginForm::default());

                    vec![]
                }
                KeyCode::Enter => form.submit(&running.client),
                _ => {
                    form.handle_event(key);

                    vec![]
                }
            },

            Screen::Registered => match key.code {
                KeyCode::Enter => {
                    running.screen = Screen::Login(LoginForm::default());

                    vec![]
                }
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }
                _ => {
                    self.status_line = Some(format!("Unknown key {key:?}"));

                    vec![]
                }
            },

            Screen::Appointments(appointments) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.state = AppState::Exiting(ExitCode::SUCCESS);

                    vec![]
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    appointments.table_state.select_next();

                    vec![]
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    appointments.table_state.select_previous();

                    vec![]
                }
                KeyCode::Char('r') => appointments.refresh(&running.client),
                _ => {
                    self.status_line = Some(format!("Unknown key {key:?}"));

                    vec![]
                }
            },
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// We haven't loaded saved credentials yet
    Unloaded,

    /// We know who we might be and are showing a screen
    Running(Running),

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}

impl AppState {
    /// Do something to the running state, if the app is indeed in that state.
    fn map_running_mut<T>(&mut self, edit: impl FnOnce(&mut Running) -> T) -> Option<T> {
        if let Self::Running(running) = self {
            Some(edit(running))
        } else {
            None
        }
    }
}

/// State once credentials have been loaded (or found absent) and we're
/// showing screens.
#[derive(Debug)]
struct Running {
    /// Who we talk to the server as. The token in here is the single source
    /// of truth for "logged in".
    client: Client,

    /// What's on screen
    screen: Screen,
}

impl Running {
    /// Render the current screen.
    fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        match &mut self.screen {
            Screen::Login(form) => form.render(body_area, frame),
            Screen::Register(form) => form.render(body_area, frame),
            Screen::Registered => render_registered(body_area, frame),
            Screen::Appointments(appointments) => appointments.render(body_area, frame),
        }
    }
}

/// The screens the app can show
#[derive(Debug)]
enum Screen {
    /// Asking for credentials
    Login(LoginForm),

    /// Creating an account
    Register(RegisterForm),

    /// An account was just created; offer the way back to login
    Registered,

    /// The schedule
    Appointments(Appointments),
}

impl Screen {
    /// Which screen to land on. Purely a function of whether the client
    /// holds a token: with one we go straight to the schedule, without one
    /// we ask for a login.
    fn initial(client: &Client) -> (Self, Vec<Effect>) {
        if client.logged_in() {
            (
                Self::Appointments(Appointments::fetching()),
                vec![Effect::FetchAppointments(client.clone())],
            )
        } else {
            (Self::Login(LoginForm::default()), vec![])
        }
    }
}

/// The schedule screen
#[derive(Debug)]
struct Appointments {
    /// What the server sent, in the order the server sent it. `None` until
    /// the first fetch lands.
    rows: Option<Vec<Summary>>,

    /// State of the schedule table
    table_state: TableState,

    /// True while a fetch is in flight, so `r` can't stack requests.
    fetching: bool,
}

impl Appointments {
    /// The screen as it looks while the first fetch is in flight.
    fn fetching() -> Self {
        Self {
            rows: None,
            table_state: TableState::new().with_selected(0),
            fetching: true,
        }
    }

    /// A fetch came back with rows.
    fn loaded(&mut self, rows: Vec<Summary>) {
        self.rows = Some(rows);
        self.fetching = false;
    }

    /// A fetch came back without rows. Whatever we had stays up.
    fn failed(&mut self) {
        self.fetching = false;
    }

    /// Kick off a fresh fetch, unless one is already in flight.
    fn refresh(&mut self, client: &Client) -> Vec<Effect> {
        if self.fetching {
            return vec![];
        }

        self.fetching = true;

        vec![Effect::FetchAppointments(client.clone())]
    }

    /// Render the schedule table.
    fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let Some(rows) = &self.rows else {
            frame.render_widget(Paragraph::new("Fetching your appointments…"), body_area);

            return;
        };

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new("No appointments yet. Press r to refresh."),
                body_area,
            );

            return;
        }

        let table_rows: Vec<Row> = rows
            .iter()
            .map(|summary| {
                Row::new(vec![
                    Cell::new(summary.date.with_timezone(&Local).to_rfc2822()),
                    Cell::new(summary.patient_name.clone()),
                ])
            })
            .collect();

        let num_rows = table_rows.len();

        let table = Table::new(table_rows, [Constraint::Min(31), Constraint::Min(9)])
            .header(
                Row::new(["Date", "Patient"])
                    .bg(Color::DarkGray)
                    .fg(Color::White),
            )
            .column_spacing(2)
            .highlight_symbol("● ")
            .row_highlight_style(Style::new().add_modifier(Modifier::BOLD))
            .flex(Flex::Legacy);

        let scroll = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_symbol("┃")
            .thumb_style(Style::new().fg(Color::White))
            .track_symbol(Some("┆"))
            .track_style(Style::new().fg(Color::Gray));
        let mut scroll_state =
            ScrollbarState::new(num_rows).position(self.table_state.selected().unwrap_or(0));

        frame.render_stateful_widget(table, body_area, &mut self.table_state);
        frame.render_stateful_widget(
            scroll,
            body_area.inner(Margin::new(1, 1)),
            &mut scroll_state,
        );
    }
}

/// The panel shown after a successful registration.
fn render_registered(body_area: Rect, frame: &mut Frame<'_>) {
    let popup_vert = Layout::vertical([Constraint::Length(4)]).flex(Flex::Center);
    let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

    let [popup_area] = popup_vert.areas(body_area);
    let [popup_area] = popup_horiz.areas(popup_area);

    let popup = Paragraph::new("Account created!\nPress enter to log in.")
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Success")
                .border_style(Style::new().green()),
        );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
