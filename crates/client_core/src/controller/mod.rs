//! Controller layer: session state transitions and gateway orchestration.

pub mod events;
pub mod session;

use shared::domain::{User, UserId};
use tracing::{debug, info};

use crate::{
    gateway::UsersGateway,
    render::{render, render_error, EditAction, TableBody},
};

use self::{
    events::UiError,
    session::{EditSession, FormValues, FormView, SessionMode},
};

/// Environment-specific surface the controller drives.
pub trait ViewPort {
    /// Replaces the whole table body.
    fn show_table(&mut self, table: &TableBody);
    fn show_form(&mut self, form: &FormView);
    /// Blocking notification.
    fn notify(&mut self, error: &UiError);
    fn confirm(&mut self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Created(User),
    Updated(User),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed,
}

pub struct Controller<G, V> {
    gateway: G,
    view: V,
    session: EditSession,
    table: TableBody,
}

impl<G: UsersGateway, V: ViewPort> Controller<G, V> {
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            session: EditSession::default(),
            table: TableBody::default(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    pub fn form(&self) -> &FormValues {
        self.session.form()
    }

    /// Last rendered table; edit/delete targets are read back from here.
    pub fn table(&self) -> &TableBody {
        &self.table
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Fetches the list and redraws the table. A failed fetch leaves a single
    /// error row instead of a stale table.
    pub async fn refresh(&mut self) -> bool {
        match self.gateway.list().await {
            Ok(users) => {
                debug!(count = users.len(), "rendering users");
                self.table = render(&users);
                self.view.show_table(&self.table);
                true
            }
            Err(err) => {
                self.table = render_error(&err.to_string());
                self.view.show_table(&self.table);
                false
            }
        }
    }

    pub async fn submit(&mut self, form: FormValues) -> SubmitOutcome {
        let values = form.trimmed();
        self.session.set_form(form);

        if !values.is_complete() {
            self.view.notify(&UiError::missing_fields());
            return SubmitOutcome::Invalid;
        }

        let result = match self.session.mode() {
            SessionMode::Editing(id) => self
                .gateway
                .update(id, &values.name, &values.email)
                .await
                .map(SubmitOutcome::Updated),
            SessionMode::Creating => self
                .gateway
                .create(&values.name, &values.email)
                .await
                .map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                info!(mode = ?self.session.mode(), "user saved");
                self.reset_form();
                self.refresh().await;
                outcome
            }
            Err(err) => {
                self.view.notify(&UiError::from_gateway(&err));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn begin_edit(&mut self, target: &EditAction) {
        info!(user_id = %target.id, "editing user");
        self.session.begin_edit(
            target.id,
            FormValues::new(target.name.clone(), target.email.clone()),
        );
        self.view.show_form(&self.session.view());
    }

    /// Safe to call while already creating.
    pub fn cancel_edit(&mut self) {
        if self.session.mode().is_editing() {
            info!("edit cancelled");
        }
        self.reset_form();
    }

    pub async fn request_delete(&mut self, id: UserId) -> DeleteOutcome {
        let prompt = format!("Delete user with ID {id}?");
        if !self.view.confirm(&prompt) {
            debug!(user_id = %id, "delete declined");
            return DeleteOutcome::Declined;
        }

        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(user_id = %id, "user deleted");
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                self.view.notify(&UiError::from_gateway(&err));
                DeleteOutcome::Failed
            }
        }
    }

    fn reset_form(&mut self) {
        self.session.reset();
        self.view.show_form(&self.session.view());
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
