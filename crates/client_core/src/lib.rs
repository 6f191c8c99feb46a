//! Users CRUD client: remote gateway, view-state controller, and table renderer.

pub mod controller;
pub mod gateway;
pub mod render;

pub use controller::{
    events::{UiError, UiErrorCategory, UiErrorContext},
    session::{EditSession, FormValues, FormView, SessionMode, SubmitLabel},
    Controller, DeleteOutcome, SubmitOutcome, ViewPort,
};
pub use gateway::{
    collection_url, GatewayConfigError, GatewayError, HttpUsersGateway, Operation, UsersGateway,
    DEFAULT_USERS_PATH,
};
pub use render::{
    escape_html, render, render_error, DeleteAction, EditAction, TableBody, TableRow, UserRow,
};
