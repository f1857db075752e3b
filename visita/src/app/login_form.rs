use super::effect::Effect;
use super::text_field;
use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use visita_core::api::{login, Client};
use visita_core::validate;

/// The form for logging into an existing account
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Which field we're editing
    active: Field,

    /// The email the account was registered with
    username: Input,

    /// What's your password? (Will be masked)
    password: Input,

    /// True while a submission is in flight. This is the only double-submit
    /// guard: while it's set, enter does nothing.
    submitting: bool,

    /// What went wrong with the last attempt, if anything
    error: Option<String>,
}

form_fields!(Field, Username, Password);

impl LoginForm {
    /// Render centered over the given area.
    pub fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(9)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let fields = Layout::vertical(Constraint::from_lengths([3, 3, 1, 1, 1]));
        let [username_area, password_area, status_area, _, hint_area] = fields.areas(popup_area);

        text_field::render(
            frame,
            username_area,
            &self.username,
            "Email",
            false,
            matches!(self.active, Field::Username),
        );
        text_field::render(
            frame,
            password_area,
            &self.password,
            "Password",
            true,
            matches!(self.active, Field::Password),
        );

        if self.submitting {
            frame.render_widget(Paragraph::new("Logging in…"), status_area);
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                status_area,
            );
        }

        frame.render_widget(
            Paragraph::new("tab: next field · enter: log in · ctrl-r: register · esc: quit")
                .style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }

    /// Route a key to the right field, rotating fields on tab/shift-tab.
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Username => self.username.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                };
            }
        }
    }

    /// Try to submit: run the local checks and, when they pass, produce the
    /// network effect. While a submission is already in flight this does
    /// nothing at all.
    pub fn submit(&mut self, client: &Client) -> Vec<Effect> {
        if self.submitting {
            return vec![];
        }

        let username = self.username.value().trim().to_string();
        let password = self.password.value().to_string();

        if let Err(problem) = validate::login(&username, &password) {
            self.error = Some(problem.to_string());
            return vec![];
        }

        self.submitting = true;
        self.error = None;

        vec![Effect::LogIn(
            client.clone(),
            login::Req { username, password },
        )]
    }

    /// The in-flight submission came back (either way.) The form is usable
    /// again.
    pub fn submitted(&mut self) {
        self.submitting = false;
    }

    /// Surface a failed login. Deliberately one message for every failure:
    /// whoever's probing shouldn't learn whether the email or the password
    /// was the wrong half.
    pub fn show_error(&mut self) {
        self.error = Some("Login failed. Check your username and password.".to_string());
    }

    /// True while a submission is in flight.
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// What went wrong with the last attempt, if anything.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn tab_rotates_through_both_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.active, Field::Username);

        form.handle_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(form.active, Field::Password);

        form.handle_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(form.active, Field::Username);
    }

    #[test]
    fn back_tab_rotates_in_reverse() {
        let mut form = LoginForm::default();

        form.handle_event(KeyEvent::from(KeyCode::BackTab));
        assert_eq!(form.active, Field::Password);
    }
}
