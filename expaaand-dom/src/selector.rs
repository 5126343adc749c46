//! Compound selector parsing and matching.
//!
//! Supports a single compound selector: an optional tag name followed by any
//! number of `#id`, `.class`, `[attr]` and `[attr=value]` parts. Combinators
//! and pseudo-classes are not supported.

use std::str::FromStr;

use crate::element::Element;

/// Error returned for selectors outside the supported grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expected a name at position {pos}")]
    MissingName { pos: usize },

    #[error("unterminated attribute selector starting at position {pos}")]
    UnterminatedAttribute { pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatcher {
    name: String,
    value: Option<String>,
}

/// A parsed compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatcher>,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(i, _)| *i)
            .unwrap_or_else(|| self.chars.last().map(|(i, c)| i + c.len_utf8()).unwrap_or(0))
    }

    fn name(&mut self) -> Result<String, SelectorError> {
        let start = self.offset();
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| is_name_char(*c)) {
            out.push(c);
            self.pos += 1;
        }
        if out.is_empty() {
            return Err(SelectorError::MissingName { pos: start });
        }
        Ok(out)
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|c| c == ' ') {
            self.pos += 1;
        }
    }

    fn attribute(&mut self, open: usize) -> Result<AttributeMatcher, SelectorError> {
        self.skip_spaces();
        let name = self.name()?;
        self.skip_spaces();
        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_spaces();
                Some(self.attribute_value(open)?)
            }
            Some(ch) => {
                return Err(SelectorError::UnexpectedChar {
                    ch,
                    pos: self.offset(),
                });
            }
            None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
        };
        self.skip_spaces();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttributeMatcher { name, value })
            }
            Some(ch) => Err(SelectorError::UnexpectedChar {
                ch,
                pos: self.offset(),
            }),
            None => Err(SelectorError::UnterminatedAttribute { pos: open }),
        }
    }

    fn attribute_value(&mut self, open: usize) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut out = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            return Ok(out);
                        }
                        Some(c) => {
                            out.push(c);
                            self.pos += 1;
                        }
                        None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
                    }
                }
            }
            _ => self.name(),
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.trim();
        if src.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parser = Parser::new(src);
        let mut selector = Selector::default();

        if parser.peek().is_some_and(is_name_char) {
            selector.tag = Some(parser.name()?.to_ascii_lowercase());
        } else if parser.peek() == Some('*') {
            parser.pos += 1;
        }

        while let Some(c) = parser.peek() {
            let at = parser.offset();
            parser.pos += 1;
            match c {
                '#' => selector.id = Some(parser.name()?),
                '.' => selector.classes.push(parser.name()?),
                '[' => selector.attributes.push(parser.attribute(at)?),
                ch => return Err(SelectorError::UnexpectedChar { ch, pos: at }),
            }
        }

        Ok(selector)
    }
}

impl Selector {
    pub fn parse(src: &str) -> Result<Self, SelectorError> {
        src.parse()
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && tag != element.tag()
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.get_attribute("id").as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.contains_class(c)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (element.get_attribute(&attr.name), &attr.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => &actual == expected,
                (None, _) => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let selector = Selector::parse("div#menu.nav.open[data-x=\"1\"]").unwrap();
        assert_eq!(selector.tag.as_deref(), Some("div"));
        assert_eq!(selector.id.as_deref(), Some("menu"));
        assert_eq!(selector.classes, vec!["nav", "open"]);
        assert_eq!(selector.attributes.len(), 1);
        assert_eq!(selector.attributes[0].value.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert_eq!(
            Selector::parse("#"),
            Err(SelectorError::MissingName { pos: 1 })
        );
        assert_eq!(
            Selector::parse("div > p"),
            Err(SelectorError::UnexpectedChar { ch: ' ', pos: 3 })
        );
        assert_eq!(
            Selector::parse("[data-x"),
            Err(SelectorError::UnterminatedAttribute { pos: 0 })
        );
    }
}
