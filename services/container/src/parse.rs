// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Incremental parser for XML account listings.
//!
//! A listing looks like:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <account name="MossoCloudFS_1">
//!   <container><name>photos</name><count>12</count><bytes>409600</bytes></container>
//! </account>
//! ```
//!
//! Bytes arrive in chunks that don't respect token boundaries, so the parser
//! keeps the unconsumed tail of the input and only hands complete markup to
//! `quick-xml`. Field text is kept raw until the field closes.

use std::mem;

use cloudfiles_core::{Error, Result};
use log::debug;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::constants::*;
use crate::stats::parse_decimal;
use crate::Container;

/// Upper bound for a single tag, comment or CDATA section.
const MAX_MARKUP_LEN: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Count,
    Bytes,
}

impl Field {
    fn from_element(name: &[u8]) -> Option<Self> {
        match name {
            ELEMENT_NAME => Some(Field::Name),
            ELEMENT_COUNT => Some(Field::Count),
            ELEMENT_BYTES => Some(Field::Bytes),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Count => "count",
            Field::Bytes => "bytes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// No container is open.
    Idle,
    /// A `<container>` is open and none of its children.
    InContainer,
    /// A `<name>`, `<count>` or `<bytes>` of the open container is open.
    InField(Field),
    /// Inside an unknown child of the open container. `depth` is the size of
    /// the element stack once that child closes again.
    Skipping { depth: usize },
}

#[derive(Debug, Default)]
struct PartialContainer {
    name: Option<String>,
    object_count: Option<u64>,
    bytes_used: Option<u64>,
}

/// StreamingContainerParser builds [`Container`]s out of an XML listing fed
/// in arbitrary chunks.
///
/// One parser serves exactly one response. Feed every chunk with
/// [`feed`](Self::feed), then call [`finish`](Self::finish) once the body
/// is exhausted. Completed containers are available through
/// [`containers`](Self::containers) at any time, including after a failure,
/// in which case they are only the prefix parsed before it.
#[derive(Debug)]
pub struct StreamingContainerParser {
    /// Input not consumed yet, always starts at a token boundary.
    buf: Vec<u8>,
    state: ParseState,
    /// Local names of the open elements, outermost first.
    open: Vec<Vec<u8>>,
    /// Raw field text, still entity-escaped.
    text: Vec<u8>,
    current: Option<PartialContainer>,
    completed: Vec<Container>,
    failure: Option<String>,
    finished: bool,
}

impl Default for StreamingContainerParser {
    fn default() -> Self {
        Self::new()
    }
}

enum Token {
    Text(usize),
    Markup(usize),
}

impl StreamingContainerParser {
    /// Create a parser for a new response.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: ParseState::Idle,
            open: Vec::new(),
            text: Vec::new(),
            current: None,
            completed: Vec::new(),
            failure: None,
            finished: false,
        }
    }

    /// Feed the next chunk of the body.
    ///
    /// Every complete token in the buffered input is processed, an
    /// incomplete tag at the end is kept for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.check_usable()?;
        if self.finished {
            return Err(Error::unexpected("parser fed after finish"));
        }

        let mut buf = mem::take(&mut self.buf);
        buf.extend_from_slice(chunk);

        let (consumed, result) = self.consume(&buf);
        buf.drain(..consumed);
        self.buf = buf;

        if result.is_ok() && self.buf.len() > MAX_MARKUP_LEN {
            return self.fail(Error::malformed_response(format!(
                "markup longer than {MAX_MARKUP_LEN} bytes"
            )));
        }
        result.or_else(|err| self.fail(err))
    }

    /// Signal the end of the body.
    ///
    /// Fails with `MalformedResponse` if an element is still open or the
    /// body ends in the middle of a tag.
    pub fn finish(&mut self) -> Result<()> {
        self.check_usable()?;
        if self.finished {
            return Ok(());
        }

        if !self.buf.is_empty() {
            let tail = String::from_utf8_lossy(&self.buf).into_owned();
            return self.fail(Error::malformed_response(format!(
                "response ended inside markup {tail:?}"
            )));
        }
        if let Some(name) = self.open.last() {
            let name = String::from_utf8_lossy(name).into_owned();
            return self.fail(Error::malformed_response(format!(
                "response ended with <{name}> still open"
            )));
        }

        debug!(
            "container listing finished with {} containers",
            self.completed.len()
        );
        self.finished = true;
        Ok(())
    }

    /// Containers completed so far, in document order.
    pub fn containers(&self) -> &[Container] {
        &self.completed
    }

    /// Take the containers completed so far, leaving the parser empty of
    /// results but still able to continue.
    pub fn take_containers(&mut self) -> Vec<Container> {
        mem::take(&mut self.completed)
    }

    /// Consume the parser and return every completed container.
    pub fn into_containers(self) -> Vec<Container> {
        self.completed
    }

    /// Whether `finish` succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn check_usable(&self) -> Result<()> {
        match &self.failure {
            Some(msg) => Err(Error::malformed_response(format!(
                "parser already failed: {msg}"
            ))),
            None => Ok(()),
        }
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        self.failure = Some(err.message().to_string());
        Err(err)
    }

    /// Process every complete token of `buf`, returning how many bytes were
    /// consumed.
    fn consume(&mut self, buf: &[u8]) -> (usize, Result<()>) {
        let mut pos = 0;
        while let Some(token) = scan(&buf[pos..]) {
            let result = match token {
                Token::Text(n) => {
                    self.on_text(&buf[pos..pos + n]);
                    pos += n;
                    Ok(())
                }
                Token::Markup(n) => {
                    let result = self.on_markup(&buf[pos..pos + n]);
                    pos += n;
                    result
                }
            };
            if result.is_err() {
                return (pos, result);
            }
        }
        (pos, Ok(()))
    }

    fn on_markup(&mut self, raw: &[u8]) -> Result<()> {
        let mut reader = Reader::from_reader(raw);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let event = reader.read_event().map_err(|err| {
            Error::malformed_response(format!(
                "invalid markup {:?}",
                String::from_utf8_lossy(raw)
            ))
            .with_source(err)
        })?;

        match event {
            Event::Start(e) => self.on_start(e.local_name().as_ref()),
            Event::End(e) => self.on_end(e.local_name().as_ref()),
            Event::Empty(e) => {
                let name = e.local_name();
                self.on_start(name.as_ref())?;
                self.on_end(name.as_ref())
            }
            Event::CData(e) => self.on_cdata(&e),
            // Declarations, comments, processing instructions and doctypes
            // carry nothing we model.
            _ => Ok(()),
        }
    }

    fn on_start(&mut self, name: &[u8]) -> Result<()> {
        match self.state {
            ParseState::Idle => {
                if name == ELEMENT_CONTAINER {
                    self.state = ParseState::InContainer;
                    self.current = Some(PartialContainer::default());
                }
                // Anything else outside a container is an enclosing scope,
                // such as the <account> root.
            }
            ParseState::InContainer => {
                if let Some(field) = Field::from_element(name) {
                    self.state = ParseState::InField(field);
                    self.text.clear();
                } else if name == ELEMENT_CONTAINER {
                    return Err(Error::malformed_response(
                        "<container> opened inside another <container>",
                    ));
                } else {
                    self.state = ParseState::Skipping {
                        depth: self.open.len(),
                    };
                }
            }
            ParseState::InField(field) => {
                return Err(Error::malformed_response(format!(
                    "<{}> opened inside <{}>",
                    String::from_utf8_lossy(name),
                    field.as_str()
                )));
            }
            ParseState::Skipping { .. } => {}
        }

        self.open.push(name.to_vec());
        Ok(())
    }

    fn on_end(&mut self, name: &[u8]) -> Result<()> {
        if self.state == ParseState::Idle && name == ELEMENT_CONTAINER {
            return Err(Error::malformed_response(
                "</container> without an open <container>",
            ));
        }

        match self.open.pop() {
            Some(top) if top == name => {}
            Some(top) => {
                return Err(Error::malformed_response(format!(
                    "</{}> closes <{}>",
                    String::from_utf8_lossy(name),
                    String::from_utf8_lossy(&top)
                )))
            }
            None => {
                return Err(Error::malformed_response(format!(
                    "</{}> without a matching open element",
                    String::from_utf8_lossy(name)
                )))
            }
        }

        match self.state {
            ParseState::Idle => {}
            ParseState::InContainer => self.complete_container()?,
            ParseState::InField(field) => {
                self.complete_field(field)?;
                self.state = ParseState::InContainer;
            }
            ParseState::Skipping { depth } => {
                if self.open.len() == depth {
                    self.state = ParseState::InContainer;
                }
            }
        }
        Ok(())
    }

    fn on_text(&mut self, raw: &[u8]) {
        if let ParseState::InField(_) = self.state {
            self.text.extend_from_slice(raw);
        }
    }

    fn on_cdata(&mut self, raw: &[u8]) -> Result<()> {
        if let ParseState::InField(_) = self.state {
            let s = std::str::from_utf8(raw).map_err(|err| {
                Error::malformed_response("CDATA section is not valid utf-8").with_source(err)
            })?;
            self.text.extend_from_slice(escape(s).as_bytes());
        }
        Ok(())
    }

    fn complete_field(&mut self, field: Field) -> Result<()> {
        let raw = mem::take(&mut self.text);
        let raw = std::str::from_utf8(&raw).map_err(|err| {
            Error::malformed_response(format!("<{}> is not valid utf-8", field.as_str()))
                .with_source(err)
        })?;
        let value = unescape(raw).map_err(|err| {
            Error::malformed_response(format!("<{}> has an invalid escape", field.as_str()))
                .with_source(err)
        })?;

        let current = self
            .current
            .as_mut()
            .ok_or_else(|| Error::malformed_response("field closed outside a container"))?;
        match field {
            Field::Name => current.name = Some(value.into_owned()),
            Field::Count => current.object_count = Some(parse_counter(field, &value)?),
            Field::Bytes => current.bytes_used = Some(parse_counter(field, &value)?),
        }
        Ok(())
    }

    fn complete_container(&mut self) -> Result<()> {
        self.state = ParseState::Idle;
        let current = self.current.take().unwrap_or_default();

        let name = current
            .name
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::malformed_response("<container> closed without a <name>"))?;
        self.completed.push(Container {
            name,
            object_count: current.object_count,
            bytes_used: current.bytes_used.unwrap_or_default(),
        });
        Ok(())
    }
}

fn parse_counter(field: Field, value: &str) -> Result<u64> {
    parse_decimal(value).ok_or_else(|| {
        Error::malformed_response(format!(
            "<{}> is not a non-negative integer: {value:?}",
            field.as_str()
        ))
    })
}

/// Find the next complete token at the start of `buf`.
///
/// Text runs up to the next `<` or the end of the buffer, it's safe to
/// split because field text is only decoded once the field closes. Markup
/// is returned only once its terminator has arrived.
fn scan(buf: &[u8]) -> Option<Token> {
    if buf.is_empty() {
        return None;
    }
    if buf[0] != b'<' {
        let n = memchr(b'<', buf).unwrap_or(buf.len());
        return Some(Token::Text(n));
    }

    const COMMENT: &[u8] = b"<!--";
    const CDATA: &[u8] = b"<![CDATA[";

    let end = if buf.starts_with(COMMENT) {
        find(&buf[COMMENT.len()..], b"-->").map(|i| COMMENT.len() + i + 3)
    } else if buf.starts_with(CDATA) {
        find(&buf[CDATA.len()..], b"]]>").map(|i| CDATA.len() + i + 3)
    } else if COMMENT.starts_with(buf) || CDATA.starts_with(buf) {
        // Too short to tell which kind of markup this is.
        None
    } else if buf.starts_with(b"<?") {
        find(&buf[2..], b"?>").map(|i| 2 + i + 2)
    } else {
        tag_end(buf)
    };

    end.map(Token::Markup)
}

/// Length of the tag at the start of `buf`, `>` inside quoted attribute
/// values doesn't end it.
fn tag_end(buf: &[u8]) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in buf.iter().enumerate().skip(1) {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), _) if q == b => quote = None,
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn memchr(needle: u8, haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
