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
use visita_core::api::{self, register, Client};
use visita_core::validate;

/// The form for creating a new account
#[derive(Debug, Default)]
pub struct RegisterForm {
    /// Which field we're editing
    active: Field,

    /// The patient's display name
    full_name: Input,

    /// The email to register (doubles as the login username)
    email: Input,

    /// What's your password? (Will be masked)
    password: Input,

    /// True while a submission is in flight. Enter does nothing until the
    /// response comes back and clears it.
    submitting: bool,

    /// What went wrong with the last attempt, if anything
    error: Option<String>,
}

form_fields!(Field, FullName, Email, Password);

impl RegisterForm {
    /// Render centered over the given area.
    pub fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(12)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let fields = Layout::vertical(Constraint::from_lengths([3, 3, 3, 1, 1, 1]));
        let [name_area, email_area, password_area, status_area, _, hint_area] =
            fields.areas(popup_area);

        text_field::render(
            frame,
            name_area,
            &self.full_name,
            "Full name",
            false,
            matches!(self.active, Field::FullName),
        );
        text_field::render(
            frame,
            email_area,
            &self.email,
            "Email",
            false,
            matches!(self.active, Field::Email),
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
            frame.render_widget(Paragraph::new("Registering…"), status_area);
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                status_area,
            );
        }

        frame.render_widget(
            Paragraph::new("tab: next field · enter: create account · esc: back to login")
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
                    Field::FullName => self.full_name.handle_event(&event),
                    Field::Email => self.email.handle_event(&event),
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

        let full_name = self.full_name.value().trim().to_string();
        let email = self.email.value().trim().to_string();
        let password = self.password.value().to_string();

        if let Err(problem) = validate::registration(&full_name, &email, &password) {
            self.error = Some(problem.to_string());
            return vec![];
        }

        self.submitting = true;
        self.error = None;

        vec![Effect::Register(
            client.clone(),
            register::Req::new(email, password, full_name),
        )]
    }

    /// The in-flight submission came back (either way.) The form is usable
    /// again.
    pub fn submitted(&mut self) {
        self.submitting = false;
    }

    /// Surface a failed registration in the terms the server gave us.
    pub fn show_error(&mut self, error: &api::Error) {
        self.error = Some(match error {
            api::Error::Conflict(_) => {
                "This email is already registered. Please try another one.".to_string()
            }
            api::Error::Connection(_) => {
                "Could not connect to the server. Please check your connection.".to_string()
            }
            api::Error::Validation(detail) | api::Error::Client(detail) => {
                format!("Registration failed: {detail}")
            }
            other => format!("Registration failed: {other}"),
        });
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
    use visita_core::api::error::{Detail, Problem};

    #[test]
    fn a_conflict_gets_the_duplicate_email_message() {
        let mut form = RegisterForm::default();

        form.show_error(&api::Error::Conflict("already registered".to_string()));

        assert_eq!(
            form.error(),
            Some("This email is already registered. Please try another one.")
        );
    }

    #[test]
    fn a_connection_problem_gets_the_connectivity_message() {
        let mut form = RegisterForm::default();

        form.show_error(&api::Error::Connection("connection refused".to_string()));

        assert_eq!(
            form.error(),
            Some("Could not connect to the server. Please check your connection.")
        );
    }

    #[test]
    fn validation_details_are_joined_into_the_message() {
        let mut form = RegisterForm::default();

        form.show_error(&api::Error::Validation(Detail::Problems(vec![
            Problem::Message("value is not a valid email address".to_string()),
        ])));

        assert_eq!(
            form.error(),
            Some("Registration failed: value is not a valid email address")
        );
    }
}
