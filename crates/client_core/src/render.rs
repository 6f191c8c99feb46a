//! Projection of user records into table rows.

use shared::domain::{User, UserId};

/// Columns: id, name, email, actions.
pub const COLUMN_COUNT: usize = 4;
pub const EMPTY_PLACEHOLDER: &str = "No users found.";

/// Escapes text for insertion into element content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Data carried by a row's edit affordance: the identity plus a snapshot of
/// the values to load into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAction {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for EditAction {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAction {
    pub id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub name_html: String,
    pub email_html: String,
    pub edit: EditAction,
    pub delete: DeleteAction,
}

impl UserRow {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name_html: escape_html(&user.name),
            email_html: escape_html(&user.email),
            edit: EditAction::from(user),
            delete: DeleteAction { id: user.id },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Placeholder(String),
    /// Failure shown in place of the table: the raw `message` for text
    /// surfaces and its escaped form for markup.
    Error { message: String, html: String },
    User(UserRow),
}

impl TableRow {
    pub fn to_html(&self) -> String {
        match self {
            Self::Placeholder(text) => {
                format!("<tr><td colspan=\"{COLUMN_COUNT}\">{text}</td></tr>")
            }
            Self::Error { html, .. } => format!(
                "<tr><td colspan=\"{COLUMN_COUNT}\" class=\"error\">{html}</td></tr>"
            ),
            Self::User(row) => format!(
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td class=\"actions\">\
                 <button class=\"edit-btn\" data-id=\"{id}\" data-name=\"{name}\" data-email=\"{email}\">Edit</button>\
                 <button class=\"delete-btn\" data-id=\"{delete_id}\">Delete</button></td></tr>",
                id = row.id,
                name = row.name_html,
                email = row.email_html,
                delete_id = row.delete.id,
            ),
        }
    }
}

/// The table body; replaced wholesale on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBody {
    rows: Vec<TableRow>,
}

impl TableBody {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn user_rows(&self) -> impl Iterator<Item = &UserRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::User(user) => Some(user),
            _ => None,
        })
    }

    pub fn edit_action(&self, id: UserId) -> Option<&EditAction> {
        self.user_rows()
            .find(|row| row.edit.id == id)
            .map(|row| &row.edit)
    }

    pub fn delete_action(&self, id: UserId) -> Option<DeleteAction> {
        self.user_rows()
            .find(|row| row.delete.id == id)
            .map(|row| row.delete)
    }

    pub fn to_html(&self) -> String {
        self.rows
            .iter()
            .map(TableRow::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn render(records: &[User]) -> TableBody {
    if records.is_empty() {
        return TableBody {
            rows: vec![TableRow::Placeholder(EMPTY_PLACEHOLDER.to_string())],
        };
    }

    TableBody {
        rows: records
            .iter()
            .map(|user| TableRow::User(UserRow::from_user(user)))
            .collect(),
    }
}

pub fn render_error(message: &str) -> TableBody {
    TableBody {
        rows: vec![TableRow::Error {
            message: message.to_string(),
            html: escape_html(message),
        }],
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
