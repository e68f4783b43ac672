//! Request builder
//!
//! Assembles the wire text of a request from a verb, an optional target
//! entity, attribute fragments and options.
//!
//! ## Line Order
//! ```text
//! <Verb>
//! EntityName:<Kind>            (when an entity is set)
//! <PrimaryKey>:<id>            (when an entity is set)
//! <Key>:<value>                additions / plain attributes   ┐ in call
//! <Key>:<old>=<new>            replacements                   │ order
//! <Key>:<value>=               deletions                      ┘
//! -<Option>:<value>            options, always after attributes
//! .
//! ```

use crate::attributes::{AttributeMap, Changes, List};
use crate::error::{Result, RrpError};
use super::codec::{CRLF, END_MARKER};
use super::command::{EntityKind, Verb};

/// Builder for one request's wire text
///
/// Validation failures are remembered and reported by `build`, so a
/// rejected request never produces any text.
#[derive(Debug)]
pub struct RequestBuilder {
    verb: Verb,
    lines: Vec<String>,
    options: Vec<String>,
    error: Option<RrpError>,
}

impl RequestBuilder {
    /// Start a request for `verb`
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            lines: Vec::new(),
            options: Vec::new(),
            error: None,
        }
    }

    /// Target a typed entity: `EntityName:<Kind>` then its identifier line
    pub fn entity(mut self, kind: EntityKind, id: &str) -> Self {
        if id.is_empty() {
            self.fail(format!("missing {}", kind.primary_key()));
            return self;
        }
        self.push_line("EntityName", kind.as_str());
        self.push_line(kind.primary_key(), id);
        self
    }

    /// A single `<key>:<value>` line
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.push_line(key, value);
        self
    }

    /// One `<key>:<value>` line per element, in list order
    pub fn additions(mut self, key: &str, values: &List) -> Self {
        for value in values {
            self.push_line(key, value);
        }
        self
    }

    /// One `<key>:<old>=<new>` line per value of each map key
    pub fn replacements(mut self, key: &str, replaced: &AttributeMap) -> Self {
        for (old, new_values) in replaced.iter() {
            for new in new_values {
                self.check(old);
                self.check(new);
                self.lines.push(format!("{}:{}={}", key, old, new));
            }
        }
        self
    }

    /// One `<key>:<value>=` line per element, in list order
    pub fn deletions(mut self, key: &str, values: &List) -> Self {
        for value in values {
            self.check(value);
            self.lines.push(format!("{}:{}=", key, value));
        }
        self
    }

    /// Additions, then replacements, then deletions for `key`
    pub fn changes(self, key: &str, changes: &Changes) -> Self {
        self.additions(key, &changes.added)
            .replacements(key, &changes.replaced)
            .deletions(key, &changes.deleted)
    }

    /// A `-<name>:<value>` option line
    pub fn option(mut self, name: &str, value: &str) -> Self {
        self.check(name);
        self.check(value);
        self.options.push(format!("-{}:{}", name, value));
        self
    }

    /// A `-<name>:<n>` option line, only when `n` is strictly positive
    pub fn int_option(mut self, name: &str, n: i32) -> Self {
        if n > 0 {
            self.check(name);
            self.options.push(format!("-{}:{}", name, n));
        }
        self
    }

    /// Produce the CRLF-delimited request, closed by the `.` line
    pub fn build(self) -> Result<String> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let size = self.verb.as_str().len()
            + self
                .lines
                .iter()
                .chain(self.options.iter())
                .map(|l| l.len() + CRLF.len())
                .sum::<usize>()
            + CRLF.len() * 2
            + END_MARKER.len();

        let mut request = String::with_capacity(size);
        request.push_str(self.verb.as_str());
        request.push_str(CRLF);
        for line in self.lines.iter().chain(self.options.iter()) {
            request.push_str(line);
            request.push_str(CRLF);
        }
        request.push_str(END_MARKER);
        request.push_str(CRLF);

        Ok(request)
    }

    fn push_line(&mut self, key: &str, value: &str) {
        self.check(key);
        self.check(value);
        self.lines.push(format!("{}:{}", key, value));
    }

    /// Reject text that would break out of its line
    fn check(&mut self, text: &str) {
        if text.contains(['\r', '\n']) {
            self.fail(format!("line break in {:?}", text));
        }
    }

    fn fail(&mut self, reason: String) {
        if self.error.is_none() {
            self.error = Some(RrpError::BadParameter(reason));
        }
    }
}
