//! Edit session state: create-vs-update mode plus pending form values.

use shared::domain::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Creating,
    Editing(UserId),
}

impl SessionMode {
    pub fn target(self) -> Option<UserId> {
        match self {
            Self::Creating => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
}

impl FormValues {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim())
    }

    /// Both fields present after trimming.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Save,
    Update,
}

impl SubmitLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::Update => "Update",
        }
    }
}

/// What the form should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Hidden identity field; set only while editing.
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub submit_label: SubmitLabel,
    pub cancel_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    mode: SessionMode,
    form: FormValues,
}

impl EditSession {
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn set_form(&mut self, form: FormValues) {
        self.form = form;
    }

    /// Overwrites any previous target.
    pub fn begin_edit(&mut self, id: UserId, form: FormValues) {
        self.mode = SessionMode::Editing(id);
        self.form = form;
    }

    pub fn reset(&mut self) {
        self.mode = SessionMode::Creating;
        self.form = FormValues::default();
    }

    pub fn view(&self) -> FormView {
        let editing = self.mode.is_editing();
        FormView {
            id: self.mode.target(),
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            submit_label: if editing {
                SubmitLabel::Update
            } else {
                SubmitLabel::Save
            },
            cancel_visible: editing,
        }
    }
}
