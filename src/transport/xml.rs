//! Minimal XML plumbing shared by the gateway codecs.
//!
//! Requests are written with [`quick_xml::Writer`] in a compact form (no declaration,
//! no indentation). Responses are read with [`quick_xml::Reader`] into a small element
//! tree, which keeps the tag lookups close to how the gateway documents its replies.

use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;

use crate::domain::{Credentials, GATEWAY_TIME_FORMAT, Login, Password, gateway_local_time};

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("element <{name}> is not closed")]
    UnclosedElement { name: String },

    #[error("unexpected element <{name}> after the root element")]
    TrailingElement { name: String },

    #[error("unexpected text outside the root element: {text:?}")]
    TextOutsideRoot { text: String },

    #[error("missing <{tag}> element")]
    MissingElement { tag: &'static str },

    #[error("<{tag}> is not an integer: {value:?}")]
    InvalidInteger {
        tag: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("<{tag}> is not a decimal: {value:?}")]
    InvalidDecimal {
        tag: &'static str,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("<{tag}> is not a yyyyMMddHHmmss timestamp: {value:?}")]
    InvalidTimestamp {
        tag: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    pub fn open(&mut self, name: &str) -> Result<(), EncodeError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    pub fn close(&mut self, name: &str) -> Result<(), EncodeError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write `<name>text</name>`, escaping `text`.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<(), EncodeError> {
        self.writer
            .create_element(name)
            .write_text_content(BytesText::new(text))?;
        Ok(())
    }

    /// Write the `login` and `pwd` elements every request starts with.
    pub fn credentials(&mut self, credentials: &Credentials) -> Result<(), EncodeError> {
        self.text_element(Login::FIELD, credentials.login().as_str())?;
        self.text_element(Password::FIELD, credentials.password().as_str())
    }

    pub fn finish(self) -> Result<String, EncodeError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Parse a whole document and return its root element.
    pub fn parse(xml: &str) -> Result<Self, DecodeError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let name = element_name(&start);
                    if stack.is_empty() && root.is_some() {
                        return Err(DecodeError::TrailingElement { name });
                    }
                    stack.push(Self::named(name));
                }
                Event::Empty(start) => {
                    let element = Self::named(element_name(&start));
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None if root.is_none() => root = Some(element),
                        None => return Err(DecodeError::TrailingElement { name: element.name }),
                    }
                }
                Event::End(_) => {
                    // Mismatched names are rejected by the reader itself.
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => root = Some(element),
                        }
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None => outside_root(&text)?,
                    }
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    let text = String::from_utf8_lossy(&data);
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None => outside_root(&text)?,
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(DecodeError::UnclosedElement { name: open.name });
        }
        root.ok_or(DecodeError::MissingRoot)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Text of this element followed by the text of its descendants.
    pub fn inner_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.inner_text());
        }
        out
    }

    /// First descendant named `tag`, in document order. The element itself is not a candidate.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.name == tag {
                Some(child)
            } else {
                child.find(tag)
            }
        })
    }

    /// First direct child named `tag`.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == tag)
    }

    pub fn require_child_int<T>(&self, tag: &'static str) -> Result<T, DecodeError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let child = self.child(tag).ok_or(DecodeError::MissingElement { tag })?;
        parse_int(tag, &child.inner_text())
    }

    pub fn require(&self, tag: &'static str) -> Result<&Element, DecodeError> {
        self.find(tag).ok_or(DecodeError::MissingElement { tag })
    }

    pub fn require_int<T>(&self, tag: &'static str) -> Result<T, DecodeError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        parse_int(tag, &self.require(tag)?.inner_text())
    }

    pub fn require_decimal(&self, tag: &'static str) -> Result<Decimal, DecodeError> {
        parse_decimal(tag, &self.require(tag)?.inner_text())
    }
}

fn outside_root(text: &str) -> Result<(), DecodeError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    Err(DecodeError::TextOutsideRoot {
        text: text.trim().to_owned(),
    })
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

pub fn parse_int<T>(tag: &'static str, value: &str) -> Result<T, DecodeError>
where
    T: FromStr<Err = ParseIntError>,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|source| DecodeError::InvalidInteger {
            tag,
            value: value.to_owned(),
            source,
        })
}

pub fn parse_decimal(tag: &'static str, value: &str) -> Result<Decimal, DecodeError> {
    Decimal::from_str(value.trim()).map_err(|source| DecodeError::InvalidDecimal {
        tag,
        value: value.to_owned(),
        source,
    })
}

pub fn parse_timestamp(tag: &'static str, value: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    NaiveDateTime::parse_from_str(value.trim(), GATEWAY_TIME_FORMAT)
        .map(gateway_local_time)
        .map_err(|source| DecodeError::InvalidTimestamp {
            tag,
            value: value.to_owned(),
            source,
        })
}
