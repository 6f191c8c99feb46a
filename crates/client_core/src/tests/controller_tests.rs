use super::*;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    gateway::GatewayError,
    render::TableRow,
};

use super::{
    events::{UiErrorCategory, UiErrorContext},
    session::SubmitLabel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List,
    Create { name: String, email: String },
    Update { id: UserId, name: String, email: String },
    Delete(UserId),
}

#[derive(Clone, Default)]
struct TestGateway {
    calls: Arc<Mutex<Vec<Call>>>,
    users: Vec<User>,
    fail_list: Option<GatewayError>,
    fail_write: Option<GatewayError>,
}

impl TestGateway {
    fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    fn failing_writes(err: GatewayError) -> Self {
        Self {
            fail_write: Some(err),
            ..Self::default()
        }
    }

    fn failing_list(err: GatewayError) -> Self {
        Self {
            fail_list: Some(err),
            ..Self::default()
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn count(&self, wanted: &Call) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }
}

#[async_trait]
impl UsersGateway for TestGateway {
    async fn list(&self) -> Result<Vec<User>, GatewayError> {
        self.record(Call::List);
        match &self.fail_list {
            Some(err) => Err(err.clone()),
            None => Ok(self.users.clone()),
        }
    }

    async fn create(&self, name: &str, email: &str) -> Result<User, GatewayError> {
        self.record(Call::Create {
            name: name.to_string(),
            email: email.to_string(),
        });
        if let Some(err) = &self.fail_write {
            return Err(err.clone());
        }
        Ok(user(100, name, email))
    }

    async fn update(&self, id: UserId, name: &str, email: &str) -> Result<User, GatewayError> {
        self.record(Call::Update {
            id,
            name: name.to_string(),
            email: email.to_string(),
        });
        if let Some(err) = &self.fail_write {
            return Err(err.clone());
        }
        Ok(user(id.0, name, email))
    }

    async fn delete(&self, id: UserId) -> Result<(), GatewayError> {
        self.record(Call::Delete(id));
        if let Some(err) = &self.fail_write {
            return Err(err.clone());
        }
        Ok(())
    }
}

#[derive(Default)]
struct TestView {
    tables: Vec<TableBody>,
    forms: Vec<FormView>,
    notices: Vec<UiError>,
    prompts: Vec<String>,
    confirm_answer: bool,
}

impl TestView {
    fn confirming(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            ..Self::default()
        }
    }
}

impl ViewPort for TestView {
    fn show_table(&mut self, table: &TableBody) {
        self.tables.push(table.clone());
    }

    fn show_form(&mut self, form: &FormView) {
        self.forms.push(form.clone());
    }

    fn notify(&mut self, error: &UiError) {
        self.notices.push(error.clone());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}

fn user(id: i64, name: &str, email: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn edit_target(id: i64, name: &str, email: &str) -> EditAction {
    EditAction {
        id: UserId(id),
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn refresh_renders_listed_users() {
    let gateway = TestGateway::with_users(vec![user(1, "A", "a@x.com")]);
    let mut controller = Controller::new(gateway.clone(), TestView::default());

    assert!(controller.refresh().await);

    assert_eq!(gateway.calls(), vec![Call::List]);
    let shown = controller.view().tables.last().expect("table shown");
    let row = shown.user_rows().next().expect("row");
    assert_eq!(row.id, UserId(1));
    assert_eq!(row.name_html, "A");
    assert_eq!(row.email_html, "a@x.com");
    assert_eq!(row.edit.id, UserId(1));
    assert_eq!(row.delete.id, UserId(1));
    assert_eq!(controller.table(), shown);
}

#[tokio::test]
async fn failed_refresh_shows_single_error_row_without_notice() {
    let gateway = TestGateway::failing_list(GatewayError::FetchFailed {
        status: Some(503),
        message: "Service Unavailable".to_string(),
    });
    let mut controller = Controller::new(gateway, TestView::default());

    assert!(!controller.refresh().await);

    let shown = controller.view().tables.last().expect("table shown");
    assert_eq!(
        shown.rows(),
        &[TableRow::Error {
            message: "could not load users: HTTP 503: Service Unavailable".to_string(),
            html: "could not load users: HTTP 503: Service Unavailable".to_string(),
        }]
    );
    assert!(controller.view().notices.is_empty());
}

#[tokio::test]
async fn submit_with_missing_field_makes_no_call() {
    for form in [
        FormValues::new("", "a@x.com"),
        FormValues::new("A", ""),
        FormValues::new("   ", "  "),
    ] {
        let gateway = TestGateway::default();
        let mut controller = Controller::new(gateway.clone(), TestView::default());

        let outcome = controller.submit(form.clone()).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(gateway.calls().is_empty());
        let notice = controller.view().notices.last().expect("notice");
        assert_eq!(notice.category(), UiErrorCategory::Validation);
        assert_eq!(notice.context(), UiErrorContext::Validation);
        // the user's input stays in the form
        assert_eq!(controller.form(), &form);
    }
}

#[tokio::test]
async fn submit_while_creating_calls_create_then_refreshes_once() {
    let gateway = TestGateway::default();
    let mut controller = Controller::new(gateway.clone(), TestView::default());

    let outcome = controller
        .submit(FormValues::new("  Ann ", " ann@x.com "))
        .await;

    assert_eq!(outcome, SubmitOutcome::Created(user(100, "Ann", "ann@x.com")));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Create {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
            },
            Call::List,
        ]
    );
    assert_eq!(controller.mode(), SessionMode::Creating);
    assert_eq!(controller.form(), &FormValues::default());
    assert_eq!(controller.view().forms.len(), 1);
    assert_eq!(controller.view().tables.len(), 1);
}

#[tokio::test]
async fn submit_while_editing_calls_update_with_target() {
    let gateway = TestGateway::default();
    let mut controller = Controller::new(gateway.clone(), TestView::default());

    controller.begin_edit(&edit_target(7, "Gus", "gus@x.com"));
    let outcome = controller
        .submit(FormValues::new("Gustav", "gus@x.com"))
        .await;

    assert_eq!(outcome, SubmitOutcome::Updated(user(7, "Gustav", "gus@x.com")));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Update {
                id: UserId(7),
                name: "Gustav".to_string(),
                email: "gus@x.com".to_string(),
            },
            Call::List,
        ]
    );
    assert_eq!(gateway.count(&Call::List), 1);
    assert_eq!(controller.mode(), SessionMode::Creating);

    let form = controller.view().forms.last().expect("form reset");
    assert_eq!(form.submit_label, SubmitLabel::Save);
    assert!(!form.cancel_visible);
    assert_eq!(form.id, None);
    assert!(form.name.is_empty() && form.email.is_empty());
}

#[tokio::test]
async fn failed_submit_keeps_mode_and_input() {
    let gateway = TestGateway::failing_writes(GatewayError::UpdateFailed {
        status: Some(404),
        message: "user not found for update".to_string(),
    });
    let mut controller = Controller::new(gateway.clone(), TestView::default());
    controller.begin_edit(&edit_target(3, "C", "c@x.com"));

    let typed = FormValues::new("Cee", "cee@x.com");
    let outcome = controller.submit(typed.clone()).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.mode(), SessionMode::Editing(UserId(3)));
    assert_eq!(controller.form(), &typed);
    assert_eq!(gateway.count(&Call::List), 0);
    let notice = controller.view().notices.last().expect("notice");
    assert_eq!(notice.context(), UiErrorContext::Update);
    assert_eq!(
        notice.message(),
        "could not update user: HTTP 404: user not found for update"
    );
}

#[tokio::test]
async fn begin_edit_populates_form_and_cancel_resets() {
    let mut controller = Controller::new(TestGateway::default(), TestView::default());

    controller.begin_edit(&edit_target(4, "Dan", "dan@x.com"));

    assert_eq!(controller.mode(), SessionMode::Editing(UserId(4)));
    assert_eq!(controller.form(), &FormValues::new("Dan", "dan@x.com"));
    let form = controller.view().forms.last().expect("form shown").clone();
    assert_eq!(form.id, Some(UserId(4)));
    assert_eq!(form.submit_label, SubmitLabel::Update);
    assert!(form.cancel_visible);

    controller.cancel_edit();

    assert_eq!(controller.mode(), SessionMode::Creating);
    assert_eq!(controller.form(), &FormValues::default());
    let form = controller.view().forms.last().expect("form shown");
    assert_eq!(form.submit_label, SubmitLabel::Save);
    assert!(!form.cancel_visible);
}

#[tokio::test]
async fn begin_edit_overwrites_previous_target() {
    let mut controller = Controller::new(TestGateway::default(), TestView::default());

    controller.begin_edit(&edit_target(1, "A", "a@x.com"));
    controller.begin_edit(&edit_target(2, "B", "b@x.com"));

    assert_eq!(controller.mode(), SessionMode::Editing(UserId(2)));
    assert_eq!(controller.form(), &FormValues::new("B", "b@x.com"));
}

#[tokio::test]
async fn cancel_edit_is_idempotent() {
    let gateway = TestGateway::default();
    let mut controller = Controller::new(gateway.clone(), TestView::default());

    controller.cancel_edit();
    controller.cancel_edit();

    assert_eq!(controller.mode(), SessionMode::Creating);
    assert_eq!(controller.form(), &FormValues::default());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn declined_delete_makes_no_call() {
    let gateway = TestGateway::default();
    let mut controller = Controller::new(gateway.clone(), TestView::confirming(false));
    controller.begin_edit(&edit_target(5, "E", "e@x.com"));

    let outcome = controller.request_delete(UserId(5)).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(gateway.calls().is_empty());
    assert_eq!(controller.mode(), SessionMode::Editing(UserId(5)));
    assert_eq!(
        controller.view().prompts,
        vec!["Delete user with ID 5?".to_string()]
    );
}

#[tokio::test]
async fn accepted_delete_refreshes_exactly_once() {
    let gateway = TestGateway::default();
    let mut controller = Controller::new(gateway.clone(), TestView::confirming(true));

    let outcome = controller.request_delete(UserId(6)).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(gateway.calls(), vec![Call::Delete(UserId(6)), Call::List]);
    assert_eq!(controller.view().tables.len(), 1);
}

#[tokio::test]
async fn failed_delete_leaves_table_and_session_alone() {
    let mut gateway = TestGateway::with_users(vec![user(6, "F", "f@x.com")]);
    gateway.fail_write = Some(GatewayError::DeleteFailed {
        status: None,
        message: "connection refused".to_string(),
    });
    let mut controller = Controller::new(gateway.clone(), TestView::confirming(true));
    controller.refresh().await;
    let before = controller.table().clone();

    let outcome = controller.request_delete(UserId(6)).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(gateway.calls(), vec![Call::List, Call::Delete(UserId(6))]);
    assert_eq!(controller.table(), &before);
    assert_eq!(controller.view().tables.len(), 1);
    assert_eq!(controller.mode(), SessionMode::Creating);
    let notice = controller.view().notices.last().expect("notice");
    assert_eq!(notice.category(), UiErrorCategory::Transport);
    assert_eq!(notice.context(), UiErrorContext::Delete);
}
