//! Application state and core logic

use crate::state::{AppState, SpinnerState, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use meetup_intake::calendar;
use meetup_intake::catalog::FormKind;
use meetup_intake::config::{GatewayKind, IntakeConfig};
use meetup_intake::forms::{
    Advance, FieldKind, FieldSpec, FieldValue, FormController, FormError, FormStatus, Resolution,
    SubmissionTicket,
};
use meetup_intake::gateway::{self, Receipt, SubmissionGateway, SubmitFailure};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Rough latency of a real endpoint, used to pace the progress bar
const HTTP_EXPECTED_LATENCY: Duration = Duration::from_secs(1);

/// A finished gateway call on its way back to the event loop
#[derive(Debug)]
pub struct Outcome {
    pub kind: FormKind,
    pub ticket: SubmissionTicket,
    pub result: Result<Receipt, SubmitFailure>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: IntakeConfig,
    gateway: Arc<dyn SubmissionGateway>,
    /// One session per form, kept while the user looks at other forms
    sessions: HashMap<FormKind, FormController>,
    spinners: HashMap<FormKind, SpinnerState>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    /// Copy feedback message
    pub copy_message: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App using the gateway the configuration selects
    pub fn new(config: IntakeConfig) -> Result<Self> {
        let gateway = gateway::from_config(&config)?;
        Ok(Self::with_gateway(config, gateway))
    }

    pub fn with_gateway(config: IntakeConfig, gateway: Arc<dyn SubmissionGateway>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            gateway,
            sessions: HashMap::new(),
            spinners: HashMap::new(),
            outcome_tx,
            outcome_rx,
            copy_message: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// True while any progress bar is running
    pub fn is_animating(&self) -> bool {
        !self.spinners.is_empty()
    }

    /// Form highlighted in the picker
    pub fn selected_kind(&self) -> FormKind {
        let last = FormKind::ALL.len() - 1;
        FormKind::ALL[self.state.selected_index.min(last)]
    }

    /// Form currently on screen, if any
    pub fn active_kind(&self) -> Option<FormKind> {
        match self.state.current_view {
            View::Form => Some(self.selected_kind()),
            View::Picker => None,
        }
    }

    pub fn session(&self, kind: FormKind) -> Option<&FormController> {
        self.sessions.get(&kind)
    }

    pub fn active_session(&self) -> Option<&FormController> {
        self.active_kind().and_then(|kind| self.session(kind))
    }

    pub fn spinner(&self, kind: FormKind) -> Option<&SpinnerState> {
        self.spinners.get(&kind)
    }

    pub fn gateway_label(&self) -> String {
        match self.config.gateway_kind() {
            GatewayKind::Simulated if self.config.simulate_failure.unwrap_or(false) => {
                "simulated (failing)".to_string()
            }
            GatewayKind::Simulated => "simulated".to_string(),
            GatewayKind::Http => self
                .config
                .endpoint()
                .unwrap_or_else(|| "http".to_string()),
        }
    }

    /// Apply every gateway outcome that has arrived since the last frame
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::Picker => self.handle_picker_key(key)?,
            View::Form => self.handle_form_key(key),
        }
        Ok(())
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(FormKind::ALL.len())
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => self.open_selected()?,
            KeyCode::Char('f') => self.toggle_simulated_failure()?,
            _ => {}
        }
        Ok(())
    }

    /// Show the highlighted form, starting a session on first visit
    fn open_selected(&mut self) -> Result<()> {
        let kind = self.selected_kind();
        if !self.sessions.contains_key(&kind) {
            let schema = kind.schema()?;
            tracing::debug!("Starting {} session", kind.slug());
            self.sessions.insert(kind, FormController::new(schema));
        }
        self.state.current_view = View::Form;
        self.state.focus_field(0);
        Ok(())
    }

    fn toggle_simulated_failure(&mut self) -> Result<()> {
        if self.config.gateway_kind() != GatewayKind::Simulated {
            self.copy_message = Some("Failure simulation needs the simulated gateway".to_string());
            return Ok(());
        }

        let enabled = !self.config.simulate_failure.unwrap_or(false);
        self.config.simulate_failure = Some(enabled);
        self.gateway = gateway::from_config(&self.config)?;
        if let Err(e) = self.config.save() {
            self.push_error(format!("Could not save configuration: {e}"));
        }

        self.copy_message = Some(if enabled {
            "Simulated failures on".to_string()
        } else {
            "Simulated failures off".to_string()
        });
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let kind = self.selected_kind();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.reset_session(kind);
            }
            return;
        }

        let Some(status) = self.session(kind).map(FormController::status) else {
            self.state.current_view = View::Picker;
            return;
        };

        match status {
            FormStatus::Editing => self.handle_editing_key(kind, key),
            FormStatus::Submitting => {
                // Leaving abandons the attempt; its outcome will be discarded
                if key.code == KeyCode::Esc {
                    self.reset_session(kind);
                    self.state.current_view = View::Picker;
                }
            }
            FormStatus::Failed => match key.code {
                KeyCode::Enter => self.advance(kind),
                KeyCode::Esc => self.state.current_view = View::Picker,
                _ => {}
            },
            FormStatus::Submitted => match key.code {
                KeyCode::Char('c') => self.copy_receipt(kind),
                KeyCode::Char('g') if kind == FormKind::EventRegistration => {
                    self.copy_link(calendar::google_calendar_url(&self.config.event()), "Google")
                }
                KeyCode::Char('o') if kind == FormKind::EventRegistration => {
                    self.copy_link(calendar::outlook_calendar_url(&self.config.event()), "Outlook")
                }
                KeyCode::Enter => self.reset_session(kind),
                KeyCode::Esc => self.state.current_view = View::Picker,
                _ => {}
            },
        }
    }

    fn handle_editing_key(&mut self, kind: FormKind, key: KeyEvent) {
        let fields: Vec<FieldSpec> = match self.session(kind) {
            Some(form) => form.current_fields().into_iter().cloned().collect(),
            None => return,
        };
        let count = fields.len();
        let Some(spec) = fields.get(self.state.active_form_field) else {
            self.state.focus_field(0);
            return;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(count),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(count),
            KeyCode::Enter => self.advance(kind),
            KeyCode::Esc => self.retreat(kind),
            KeyCode::Left => self.move_option(kind, spec, false),
            KeyCode::Right => self.move_option(kind, spec, true),
            KeyCode::Char(' ') if spec.kind == FieldKind::Checkbox => self.toggle(kind, spec),
            KeyCode::Char(c) if accepts_typing(spec) => {
                self.update_value(kind, spec, |value| match value {
                    FieldValue::Text(mut text) => {
                        text.push(c);
                        FieldValue::Text(text)
                    }
                    other => other,
                })
            }
            KeyCode::Backspace if accepts_typing(spec) => {
                self.update_value(kind, spec, |value| match value {
                    FieldValue::Text(mut text) => {
                        text.pop();
                        FieldValue::Text(text)
                    }
                    other => other,
                })
            }
            _ => {}
        }
    }

    fn advance(&mut self, kind: FormKind) {
        let Some(form) = self.sessions.get_mut(&kind) else {
            return;
        };

        match form.advance() {
            Ok(Advance::Invalid(errors)) => {
                // Jump to the first invalid field
                let first = form
                    .current_fields()
                    .iter()
                    .position(|f| errors.contains_key(&f.name));
                self.state.focus_field(first.unwrap_or(0));
            }
            Ok(Advance::Step(_)) => self.state.focus_field(0),
            Ok(Advance::Submit(ticket)) => self.dispatch(kind, ticket),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn retreat(&mut self, kind: FormKind) {
        let Some(form) = self.sessions.get_mut(&kind) else {
            return;
        };

        match form.retreat() {
            Ok(_) => self.state.focus_field(0),
            Err(FormError::AtFirstStep) => self.state.current_view = View::Picker,
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn reset_session(&mut self, kind: FormKind) {
        if let Some(form) = self.sessions.get_mut(&kind) {
            form.reset();
        }
        self.spinners.remove(&kind);
        self.state.focus_field(0);
    }

    /// Hand the ticket's submission to the gateway on a background task
    fn dispatch(&mut self, kind: FormKind, ticket: SubmissionTicket) {
        let expected = match self.config.gateway_kind() {
            GatewayKind::Simulated => self.config.simulated_delay(),
            GatewayKind::Http => HTTP_EXPECTED_LATENCY,
        };
        self.spinners.insert(kind, SpinnerState::new(expected));

        let gateway = Arc::clone(&self.gateway);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = gateway.submit(ticket.submission()).await;
            // The receiver only goes away when the app shuts down
            let _ = tx.send(Outcome {
                kind,
                ticket,
                result,
            });
        });
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        let Outcome {
            kind,
            ticket,
            result,
        } = outcome;
        let Some(form) = self.sessions.get_mut(&kind) else {
            tracing::debug!("Dropping outcome for {}: no session", kind.slug());
            return;
        };

        if let Resolution::Applied(_) = form.resolve(&ticket, result) {
            self.spinners.remove(&kind);
        }
    }

    /// Apply `edit` to the field's current value (or its empty value)
    fn update_value(
        &mut self,
        kind: FormKind,
        spec: &FieldSpec,
        edit: impl FnOnce(FieldValue) -> FieldValue,
    ) {
        let Some(form) = self.sessions.get_mut(&kind) else {
            return;
        };
        let current = form
            .value(&spec.name)
            .cloned()
            .unwrap_or_else(|| spec.empty_value());

        if let Err(e) = form.set_value(&spec.name, edit(current)) {
            self.push_error(e.to_string());
        }
    }

    fn toggle(&mut self, kind: FormKind, spec: &FieldSpec) {
        if spec.is_checkbox_group() {
            let Some(option) = spec.allowed_values.get(self.state.option_cursor).cloned() else {
                return;
            };
            self.update_value(kind, spec, |value| match value {
                FieldValue::Choices(mut set) => {
                    if !set.remove(&option) {
                        set.insert(option);
                    }
                    FieldValue::Choices(set)
                }
                other => other,
            });
        } else {
            self.update_value(kind, spec, |value| match value {
                FieldValue::Flag(checked) => FieldValue::Flag(!checked),
                other => other,
            });
        }
    }

    /// Left/Right: cycle a select's value or move along a checkbox group
    fn move_option(&mut self, kind: FormKind, spec: &FieldSpec, forward: bool) {
        let len = spec.allowed_values.len();
        if len == 0 {
            return;
        }

        if spec.is_checkbox_group() {
            self.state.option_cursor = step_index(Some(self.state.option_cursor), len, forward);
            return;
        }

        if spec.kind == FieldKind::Select {
            let options = spec.allowed_values.clone();
            self.update_value(kind, spec, |value| {
                let current = options.iter().position(|o| o == value.as_text());
                FieldValue::text(options[step_index(current, len, forward)].clone())
            });
        }
    }

    fn copy_receipt(&mut self, kind: FormKind) {
        let Some(reference) = self
            .session(kind)
            .and_then(FormController::receipt)
            .map(|r| r.reference.clone())
        else {
            return;
        };

        match copy_to_clipboard(&reference) {
            Ok(()) => self.copy_message = Some(format!("Copied reference {reference}")),
            Err(e) => self.push_error(format!("Could not copy to clipboard: {e}")),
        }
    }

    fn copy_link(&mut self, link: Result<reqwest::Url>, calendar: &str) {
        let copied = link.and_then(|url| copy_to_clipboard(url.as_str()));
        match copied {
            Ok(()) => self.copy_message = Some(format!("Copied {calendar} Calendar link")),
            Err(e) => self.push_error(format!("Could not copy {calendar} Calendar link: {e}")),
        }
    }
}

/// Text-like fields take typed characters
fn accepts_typing(spec: &FieldSpec) -> bool {
    !matches!(spec.kind, FieldKind::Select | FieldKind::Checkbox)
}

/// Next or previous index in `0..len`, wrapping; `None` starts at an end
fn step_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetup_intake::gateway::SimulatedGateway;
    use pretty_assertions::assert_eq;

    fn app_with(gateway: SimulatedGateway) -> App {
        App::with_gateway(IntakeConfig::default(), Arc::new(gateway))
    }

    fn instant_app() -> App {
        app_with(SimulatedGateway::new(Duration::ZERO))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn open(app: &mut App, kind: FormKind) {
        app.state.selected_index = FormKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap();
        press(app, KeyCode::Enter);
    }

    /// Fill the contact form and press Enter on it
    fn submit_contact(app: &mut App) {
        open(app, FormKind::Contact);
        type_text(app, "Ada");
        press(app, KeyCode::Tab);
        type_text(app, "ada@example.com");
        press(app, KeyCode::Tab);
        press(app, KeyCode::Right);
        press(app, KeyCode::Enter);
    }

    async fn deliver_next(app: &mut App) {
        let outcome = app.outcome_rx.recv().await.unwrap();
        app.apply_outcome(outcome);
    }

    mod picker {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_picker() {
            let app = instant_app();
            assert_eq!(app.state.current_view, View::Picker);
            assert_eq!(app.selected_kind(), FormKind::EventRegistration);
            assert!(app.active_session().is_none());
        }

        #[test]
        fn test_navigation_is_bounded() {
            let mut app = instant_app();
            for _ in 0..10 {
                press(&mut app, KeyCode::Down);
            }
            assert_eq!(app.selected_kind(), FormKind::Question);
            press(&mut app, KeyCode::Char('k'));
            assert_eq!(app.selected_kind(), FormKind::Contact);
        }

        #[test]
        fn test_enter_opens_form() {
            let mut app = instant_app();
            open(&mut app, FormKind::MembershipApplication);
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.active_kind(), Some(FormKind::MembershipApplication));
            assert_eq!(
                app.active_session().unwrap().status(),
                FormStatus::Editing
            );
        }

        #[test]
        fn test_q_quits() {
            let mut app = instant_app();
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_the_active_field() {
            let mut app = instant_app();
            open(&mut app, FormKind::Question);
            type_text(&mut app, "Adq");
            press(&mut app, KeyCode::Backspace);
            type_text(&mut app, "a");

            let form = app.session(FormKind::Question).unwrap();
            assert_eq!(form.value("name"), Some(&FieldValue::text("Ada")));
        }

        #[test]
        fn test_q_types_instead_of_quitting() {
            let mut app = instant_app();
            open(&mut app, FormKind::Question);
            type_text(&mut app, "q");
            assert!(!app.should_quit());
        }

        #[test]
        fn test_invalid_advance_focuses_first_error() {
            let mut app = instant_app();
            open(&mut app, FormKind::Question);
            type_text(&mut app, "Ada");
            press(&mut app, KeyCode::Enter);

            let form = app.session(FormKind::Question).unwrap();
            assert_eq!(form.status(), FormStatus::Editing);
            assert!(form.error("email").is_some());
            assert!(form.error("question").is_some());
            assert_eq!(app.state.active_form_field, 1);
        }

        #[test]
        fn test_select_cycles_with_arrows() {
            let mut app = instant_app();
            open(&mut app, FormKind::Contact);
            app.state.focus_field(2);

            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Right);
            let value = |app: &App| {
                app.session(FormKind::Contact)
                    .unwrap()
                    .value("interest")
                    .cloned()
            };
            assert_eq!(value(&app), Some(FieldValue::text("speaking")));

            press(&mut app, KeyCode::Left);
            press(&mut app, KeyCode::Left);
            assert_eq!(value(&app), Some(FieldValue::text("sponsoring")));
        }

        #[test]
        fn test_space_toggles_checkbox_group_option() {
            let mut app = instant_app();
            open(&mut app, FormKind::MembershipApplication);
            // interests is the sixth field
            app.state.focus_field(5);

            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Left);
            press(&mut app, KeyCode::Char(' '));

            let form = app.session(FormKind::MembershipApplication).unwrap();
            assert_eq!(
                form.value("interests"),
                Some(&FieldValue::choices(["devops"]))
            );
        }

        #[test]
        fn test_space_toggles_single_checkbox() {
            let mut app = instant_app();
            open(&mut app, FormKind::MembershipApplication);
            app.state.focus_field(7);
            press(&mut app, KeyCode::Char(' '));

            let form = app.session(FormKind::MembershipApplication).unwrap();
            assert_eq!(form.value("code_of_conduct"), Some(&FieldValue::Flag(true)));
        }

        #[test]
        fn test_esc_walks_back_then_leaves() {
            let mut app = instant_app();
            open(&mut app, FormKind::EventRegistration);
            type_text(&mut app, "Ravi");
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "ravi@example.com");
            press(&mut app, KeyCode::Enter);
            assert_eq!(
                app.session(FormKind::EventRegistration)
                    .unwrap()
                    .current_step(),
                1
            );

            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Form);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Picker);

            // The session survives a trip to the picker
            let form = app.session(FormKind::EventRegistration).unwrap();
            assert_eq!(form.value("name"), Some(&FieldValue::text("Ravi")));
        }

        #[test]
        fn test_ctrl_r_resets() {
            let mut app = instant_app();
            open(&mut app, FormKind::Question);
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('r')).unwrap();

            let form = app.session(FormKind::Question).unwrap();
            assert!(form.values().is_empty());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_successful_submission() {
            let mut app = instant_app();
            submit_contact(&mut app);
            assert_eq!(
                app.session(FormKind::Contact).unwrap().status(),
                FormStatus::Submitting
            );
            assert!(app.is_animating());

            deliver_next(&mut app).await;

            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Submitted);
            assert!(form.receipt().is_some());
            assert!(!app.is_animating());
        }

        #[tokio::test]
        async fn test_keys_are_ignored_while_submitting() {
            let mut app = app_with(SimulatedGateway::new(Duration::from_millis(20)));
            submit_contact(&mut app);
            type_text(&mut app, "x");
            press(&mut app, KeyCode::Enter);

            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Submitting);
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_failure_then_retry() {
            let mut app = app_with(SimulatedGateway::failing(
                Duration::ZERO,
                SubmitFailure::NetworkError("offline".to_string()),
            ));
            submit_contact(&mut app);
            deliver_next(&mut app).await;

            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Failed);
            assert_eq!(
                form.failure(),
                Some(&SubmitFailure::NetworkError("offline".to_string()))
            );

            press(&mut app, KeyCode::Enter);
            assert_eq!(
                app.session(FormKind::Contact).unwrap().status(),
                FormStatus::Submitting
            );
            deliver_next(&mut app).await;
            assert_eq!(
                app.session(FormKind::Contact).unwrap().status(),
                FormStatus::Failed
            );
        }

        #[tokio::test]
        async fn test_reset_discards_late_outcome() {
            let mut app = app_with(SimulatedGateway::new(Duration::from_millis(10)));
            submit_contact(&mut app);
            app.handle_key(ctrl('r')).unwrap();
            assert!(!app.is_animating());

            deliver_next(&mut app).await;

            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Editing);
            assert!(form.receipt().is_none());
        }

        #[tokio::test]
        async fn test_leaving_while_submitting_discards_outcome() {
            let mut app = app_with(SimulatedGateway::new(Duration::from_millis(10)));
            submit_contact(&mut app);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Picker);
            assert!(!app.is_animating());

            deliver_next(&mut app).await;
            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Editing);
            assert!(form.receipt().is_none());
        }

        #[tokio::test]
        async fn test_failed_session_survives_leaving() {
            let mut app = app_with(SimulatedGateway::failing(
                Duration::ZERO,
                SubmitFailure::RejectedByServer("400 Bad Request".to_string()),
            ));
            submit_contact(&mut app);
            deliver_next(&mut app).await;
            press(&mut app, KeyCode::Esc);

            // A failed session keeps its answers for a later retry
            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Failed);
            assert_eq!(form.value("name"), Some(&FieldValue::text("Ada")));
        }

        #[tokio::test]
        async fn test_enter_after_success_starts_over() {
            let mut app = instant_app();
            submit_contact(&mut app);
            deliver_next(&mut app).await;

            press(&mut app, KeyCode::Enter);
            let form = app.session(FormKind::Contact).unwrap();
            assert_eq!(form.status(), FormStatus::Editing);
            assert!(form.receipt().is_none());
        }
    }

    mod helpers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_index_wraps() {
            assert_eq!(step_index(None, 3, true), 0);
            assert_eq!(step_index(None, 3, false), 2);
            assert_eq!(step_index(Some(2), 3, true), 0);
            assert_eq!(step_index(Some(0), 3, false), 2);
            assert_eq!(step_index(Some(1), 3, false), 0);
        }

        #[test]
        fn test_gateway_label() {
            let mut app = instant_app();
            assert_eq!(app.gateway_label(), "simulated");
            app.config.simulate_failure = Some(true);
            assert_eq!(app.gateway_label(), "simulated (failing)");
        }
    }
}
