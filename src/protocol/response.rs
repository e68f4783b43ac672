//! Response definitions
//!
//! Structured form of a registry reply and the line parser producing it.

use crate::attributes::{AttributeMap, List};
use crate::error::{Result, RrpError};
use super::codec::{CRLF, END_MARKER};

/// A parsed registry reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Result code from the status line
    pub code: i32,

    /// Remainder of the status line (may be empty)
    pub description: String,

    /// `Key:Value` lines; `None` when the reply carried none
    pub attributes: Option<AttributeMap>,

    raw: String,
}

impl Response {
    /// Code of a response whose status line has not been read yet
    pub const UNPARSED: i32 = -1;

    /// Parse a complete reply, terminator line included
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = ResponseParser::new();
        for line in crlf_lines(text) {
            if parser.feed(line)? == ParseState::Done {
                break;
            }
        }
        parser.finish(text)
    }

    /// True for 2xx codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Every value recorded for `key`
    pub fn attribute(&self, key: &str) -> Option<&List> {
        self.attributes.as_ref()?.get(key)
    }

    /// First value recorded for `key`
    pub fn first_attribute(&self, key: &str) -> Option<&str> {
        self.attribute(key)?.first().map(String::as_str)
    }

    /// The reply exactly as received
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            code: Self::UNPARSED,
            description: String::new(),
            attributes: None,
            raw: String::new(),
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Parser position within a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Expecting `<code> <description>`
    Start,
    /// Expecting `Key:Value` lines or the `.` line
    Attributes,
    /// Terminator line consumed
    Done,
}

/// Line-at-a-time reply parser
///
/// Only a parser that reached `Done` yields a `Response`; any other outcome
/// discards what was accumulated.
#[derive(Debug)]
pub struct ResponseParser {
    state: ParseState,
    response: Response,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            response: Response::default(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Consume one line (without its CRLF)
    pub fn feed(&mut self, line: &str) -> Result<ParseState> {
        self.state = match self.state {
            ParseState::Start => {
                let (code, description) = parse_status_line(line)?;
                self.response.code = code;
                self.response.description = description.to_string();
                ParseState::Attributes
            }
            ParseState::Attributes if line == END_MARKER => ParseState::Done,
            ParseState::Attributes => {
                let (key, value) = line.split_once(':').ok_or_else(|| {
                    RrpError::ResponseFormat(format!("unexpected line {:?}", line))
                })?;
                self.response
                    .attributes
                    .get_or_insert_with(AttributeMap::new)
                    .put(key, value);
                ParseState::Attributes
            }
            ParseState::Done => {
                return Err(RrpError::ResponseFormat(
                    "line after terminator".to_string(),
                ))
            }
        };
        Ok(self.state)
    }

    /// The finished response; `raw` is the text it was parsed from
    pub fn finish(self, raw: &str) -> Result<Response> {
        match self.state {
            ParseState::Done => Ok(Response {
                raw: raw.to_string(),
                ..self.response
            }),
            ParseState::Start => Err(RrpError::ResponseFormat("empty reply".to_string())),
            ParseState::Attributes => Err(RrpError::ResponseFormat(
                "reply is missing its terminator".to_string(),
            )),
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `<code> <description>` on the first space
fn parse_status_line(line: &str) -> Result<(i32, &str)> {
    let (code, description) = line.split_once(' ').ok_or_else(|| {
        RrpError::ResponseFormat(format!("status line without description: {:?}", line))
    })?;

    // Plain decimal digits only, so no sign and never the -1 sentinel
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RrpError::ResponseFormat(format!("non-numeric status code {:?}", code)));
    }
    let code: i32 = code
        .parse()
        .map_err(|_| RrpError::ResponseFormat(format!("status code {:?} out of range", code)))?;

    Ok((code, description))
}

/// Lines that are terminated by CRLF; an unterminated tail is not a line
fn crlf_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let end = rest.find(CRLF)?;
        let line = &rest[..end];
        rest = &rest[end + CRLF.len()..];
        Some(line)
    })
}
