//! Validated terminal questions using cliclack
//!
//! A [`Question`] pairs a prompt with a [`Schema`]: answers are checked
//! while the user types, rejected answers are shown after the error prefix
//! and asked again, and accepted answers come back as typed values.

use crate::valid::{self, Checker, Limit, Schema};
use console::style;
use std::collections::HashMap;
use std::io;
use thiserror::Error;

/// Prefix before every question
const PREFIX: &str = " + ";
/// Prompt for the following elements of a list
const PREFIX_PS2: &str = "   > ";
/// Prefix before every error message
const PREFIX_ERR: &str = "  [!] ";
const STR_TRUE: &str = "y";
const STR_FALSE: &str = "n";

/// Errors returned while asking a question.
#[derive(Debug, Error)]
pub enum QuestionError {
    /// The user cancelled the prompt (Ctrl-C or Esc)
    #[error("question interrupted")]
    Interrupted,

    #[error("terminal error: {0}")]
    Io(io::Error),

    /// The prompt itself could not be built (e.g. a bad boolean default)
    #[error(transparent)]
    Schema(#[from] valid::Error),

    /// The final answer did not pass the validator
    #[error("{0}")]
    Invalid(String),
}

impl From<io::Error> for QuestionError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            QuestionError::Interrupted
        } else {
            QuestionError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, QuestionError>;

/// A question asked on the terminal and validated with a schema
#[derive(Debug, Clone)]
pub struct Question {
    schema: Schema,

    prefix_error: String,
    prefix_prompt: String,
    prompt: String,

    // Strings that represent booleans
    true_str: String,
    false_str: String,

    num: usize,
    print_num: bool,

    is_bool: bool,
}

impl Default for Question {
    fn default() -> Self {
        Self::new()
    }
}

impl Question {
    /// Create a question with the default prefixes and "y"/"n" as booleans
    pub fn new() -> Self {
        Self::custom(Schema::default(), PREFIX, PREFIX_ERR, STR_TRUE, STR_FALSE)
    }

    /// Create a question with custom prefixes and boolean strings.
    /// Empty arguments fall back to the defaults.
    pub fn custom(
        schema: Schema,
        prefix_prompt: &str,
        prefix_error: &str,
        true_str: &str,
        false_str: &str,
    ) -> Self {
        let or = |value: &str, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            schema,
            prefix_error: or(prefix_error, PREFIX_ERR),
            prefix_prompt: or(prefix_prompt, PREFIX),
            prompt: String::new(),
            true_str: or(true_str, STR_TRUE),
            false_str: or(false_str, STR_FALSE),
            num: 0,
            print_num: false,
            is_bool: false,
        }
    }

    /// Number every following question
    pub fn print_numbers(&mut self) -> &mut Self {
        self.print_num = true;
        self
    }

    /// Set a new prompt, clearing the default value and the checkers
    pub fn prompt(&mut self, text: &str) -> &mut Self {
        self.prompt = if self.print_num {
            self.num += 1;
            format!("{}. {}", self.num, text)
        } else {
            text.to_string()
        };

        self.is_bool = false;
        self.schema.by_default.clear();
        self.schema.set_checker(Checker::NONE);
        self
    }

    /// Value used when the answer is empty
    pub fn default(&mut self, value: &str) -> &mut Self {
        self.schema.set_default(value);
        self
    }

    pub fn check(&mut self, flags: Checker) -> &mut Self {
        self.schema.set_checker(flags);
        self
    }

    pub fn min(&mut self, n: impl Into<Limit>) -> &mut Self {
        self.schema.set_min(n);
        self
    }

    pub fn max(&mut self, n: impl Into<Limit>) -> &mut Self {
        self.schema.set_max(n);
        self
    }

    pub fn range<L: Into<Limit>>(&mut self, min: L, max: L) -> &mut Self {
        self.schema.set_range(min, max);
        self
    }

    /// The schema answers are checked against
    pub fn schema(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Build the text shown before the answer
    pub fn full_prompt(&self) -> valid::Result<String> {
        if self.schema.is_slice {
            return Ok(PREFIX_PS2.to_string());
        }

        let mut full = format!("{}{}", self.prefix_prompt, self.prompt);
        if full.ends_with('?') {
            full.push(' ');
        } else {
            full.push_str(": ");
        }

        let default = &self.schema.by_default;
        if !default.is_empty() {
            if self.is_bool {
                let mut schema = self.schema.clone();
                if self.is_true_str(default) || valid::bool(&mut schema, default)? {
                    full.push_str(&format!(
                        "[{}/{}] ",
                        style(&self.true_str).bold(),
                        self.false_str
                    ));
                } else {
                    full.push_str(&format!(
                        "[{}/{}] ",
                        self.true_str,
                        style(&self.false_str).bold()
                    ));
                }
            } else {
                full.push_str(&format!("[{}] ", style(default).bold()));
            }
        }

        Ok(full)
    }

    fn is_true_str(&self, answer: &str) -> bool {
        answer.eq_ignore_ascii_case(&self.true_str)
    }

    /// Ask the question, checking every answer with `validate`
    pub fn read_with<T, E, F>(&mut self, validate: F) -> Result<T>
    where
        F: Fn(&mut Schema, &str) -> std::result::Result<T, E> + Clone + 'static,
        E: ToString,
    {
        let prompt = self.full_prompt()?;
        let prefix_error = self.prefix_error.clone();
        let schema = self.schema.clone();
        let check = validate.clone();

        let mut input = cliclack::input(prompt.trim_end())
            .required(false)
            .validate(move |answer: &String| {
                let mut schema = schema.clone();
                check(&mut schema, answer)
                    .map(|_| ())
                    .map_err(|e| format!("{}{}", prefix_error, e.to_string()))
            });
        if !self.schema.by_default.is_empty() {
            input = input.placeholder(&self.schema.by_default);
        }

        let answer: String = input.interact()?;
        tracing::debug!(prompt = %self.prompt, "question answered");
        validate(&mut self.schema, &answer).map_err(|e| QuestionError::Invalid(e.to_string()))
    }

    pub fn read_string(&mut self) -> Result<String> {
        self.read_with(valid::string)
    }

    /// Ask a yes/no question; the question's true/false strings are accepted
    /// alongside the usual boolean spellings
    pub fn read_bool(&mut self) -> Result<bool> {
        let extra: HashMap<String, bool> = [
            (self.true_str.clone(), true),
            (self.false_str.clone(), false),
        ]
        .into_iter()
        .collect();
        valid::set_bool_strings(&extra);

        self.is_bool = true;
        self.read_with(valid::bool)
    }

    pub fn read_int(&mut self) -> Result<isize> {
        self.read_with(valid::int)
    }

    pub fn read_uint(&mut self) -> Result<usize> {
        self.read_with(valid::uint)
    }

    pub fn read_float(&mut self) -> Result<f64> {
        self.read_with(valid::float64)
    }

    pub fn read_email(&mut self) -> Result<String> {
        self.read_with(valid::email)
    }

    /// Ask for an answer matching the regular expression `expr`
    pub fn read_pattern(&mut self, expr: &str) -> Result<String> {
        let expr = expr.to_string();
        self.read_with(move |s: &mut Schema, answer: &str| valid::pattern(s, &expr, answer))
    }

    /// Ask for a list of strings, one per line, until an empty line
    pub fn read_string_slice(&mut self) -> Result<Vec<String>> {
        cliclack::log::step(self.full_prompt()?)?;

        self.schema.is_slice = true;
        let mut values = Vec::new();
        let result = loop {
            match self.read_with(valid::string) {
                Ok(value) if value.is_empty() => break Ok(values),
                Ok(value) => values.push(value),
                Err(e) => break Err(e),
            }
        };
        self.schema.is_slice = false;

        result
    }
}
