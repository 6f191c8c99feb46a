//! Line-oriented terminal adapter for the users controller.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};
use client_core::{FormValues, FormView, TableBody, TableRow, UiError, ViewPort};
use shared::domain::UserId;

pub const HELP: &str = "\
commands:
  list              reload the table
  name <text>       set the name field
  email <text>      set the email field
  save              submit the form (create or update)
  edit <id>         load a row into the form
  delete <id>       delete a row after confirmation
  cancel            leave edit mode and clear the form
  html              print the current table markup
  help              show this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Name(String),
    Email(String),
    Save,
    Edit(UserId),
    Delete(UserId),
    Cancel,
    Html,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "refresh" => Command::List,
        "name" => Command::Name(rest.to_string()),
        "email" => Command::Email(rest.to_string()),
        "save" | "submit" => Command::Save,
        "edit" => Command::Edit(parse_id(rest)?),
        "delete" | "rm" => Command::Delete(parse_id(rest)?),
        "cancel" => Command::Cancel,
        "html" => Command::Html,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}'; type 'help'"),
    };
    Ok(command)
}

fn parse_id(raw: &str) -> anyhow::Result<UserId> {
    if raw.is_empty() {
        return Err(anyhow!("missing user ID"));
    }
    raw.parse::<UserId>().map_err(|err| anyhow!("{err}"))
}

/// Holds the form fields as typed and talks to the terminal.
///
/// `ViewPort` callbacks cannot return errors, so the first failed write
/// they hit is kept until [`TerminalView::check_output`] takes it.
pub struct TerminalView<R, W> {
    input: R,
    output: W,
    pending: FormValues,
    submit_label: &'static str,
    write_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: FormValues::default(),
            submit_label: "Save",
            write_error: None,
        }
    }

    pub fn pending(&self) -> &FormValues {
        &self.pending
    }

    pub fn set_name(&mut self, name: &str) {
        self.pending.name = name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.pending.email = email.to_string();
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line, `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "[{}]> ", self.submit_label)?;
        self.output.flush()
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Returns the first write failure seen by a `ViewPort` callback, if any.
    pub fn check_output(&mut self) -> io::Result<()> {
        match self.write_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if self.write_error.is_none() {
                self.write_error = Some(err);
            }
        }
    }

    fn write_table(&mut self, table: &TableBody) -> io::Result<()> {
        writeln!(self.output, "{:>6}  {:<24} {}", "ID", "NAME", "EMAIL")?;
        for row in table.rows() {
            match row {
                TableRow::Placeholder(text) => writeln!(self.output, "  {text}")?,
                TableRow::Error { message, .. } => writeln!(self.output, "  ! {message}")?,
                TableRow::User(user) => writeln!(
                    self.output,
                    "{:>6}  {:<24} {}",
                    user.edit.id, user.edit.name, user.edit.email
                )?,
            }
        }
        Ok(())
    }

    fn write_form(&mut self, form: &FormView) -> io::Result<()> {
        match form.id {
            Some(id) => writeln!(
                self.output,
                "editing user {id}: name={:?} email={:?} ('cancel' to abort)",
                form.name, form.email
            ),
            None => writeln!(self.output, "form cleared"),
        }
    }
}

impl<R: BufRead, W: Write> ViewPort for TerminalView<R, W> {
    fn show_table(&mut self, table: &TableBody) {
        let result = self.write_table(table);
        self.record(result);
    }

    fn show_form(&mut self, form: &FormView) {
        self.pending = FormValues::new(form.name.clone(), form.email.clone());
        self.submit_label = form.submit_label.as_str();
        let result = self.write_form(form);
        self.record(result);
    }

    fn notify(&mut self, error: &UiError) {
        let result = writeln!(self.output, "! {}", error.message());
        self.record(result);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let asked = write!(self.output, "{prompt} [y/N] ").and_then(|()| self.output.flush());
        if let Err(err) = asked {
            self.record(Err(err));
            return false;
        }
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
