//! Decoder for structure literals embedded in table cells, e.g.
//! `{'Stormveil Castle:': ['120,000', 'Remembrance of the Grafted']}`.
//!
//! Accepts Python-style literals (single or double quoted strings, tuples,
//! `True`/`False`/`None`) and plain JSON. Anything that does not decode as a
//! whole is handed back untouched as [Nested::Raw].

use serde_json::{Map, Number, Value};

use crate::data::cell::value_to_text;

#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Missing,
    Value(Value),
    Raw(String),
}

pub fn decode(raw: &str) -> Nested {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Nested::Missing;
    }
    let mut parser = Parser::new(trimmed);
    match parser.parse_value() {
        Some(value) if parser.at_end() => Nested::Value(value),
        _ => Nested::Raw(raw.to_string()),
    }
}

/// Truthiness the way the source data's producer reads it: empty containers,
/// empty strings, zero, false and null are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            '{' => self.parse_dict(),
            '[' => self.parse_sequence('[', ']').map(Value::Array),
            '(' => self.parse_sequence('(', ')').map(Value::Array),
            '\'' | '"' => self.parse_strings().map(Value::String),
            ch if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() => self.parse_number(),
            ch if ch.is_ascii_alphabetic() => self.parse_keyword(),
            _ => None,
        }
    }

    fn parse_dict(&mut self) -> Option<Value> {
        self.bump();
        let mut map = Map::new();
        loop {
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            let key = self.parse_value()?;
            if !self.eat(':') {
                return None;
            }
            let value = self.parse_value()?;
            map.insert(value_to_text(&key), value);
            if self.eat(',') {
                continue;
            }
            return self.eat('}').then_some(Value::Object(map));
        }
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Option<Vec<Value>> {
        debug_assert_eq!(self.peek(), Some(open));
        self.bump();
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Some(items);
            }
            items.push(self.parse_value()?);
            if self.eat(',') {
                continue;
            }
            return self.eat(close).then_some(items);
        }
    }

    /// One quoted string, or several adjacent ones concatenated (`'a' 'b'`).
    fn parse_strings(&mut self) -> Option<String> {
        let mut out = self.parse_string()?;
        loop {
            let save = self.pos;
            self.skip_ws();
            match self.peek() {
                Some('\'') | Some('"') => out.push_str(&self.parse_string()?),
                _ => {
                    self.pos = save;
                    return Some(out);
                }
            }
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                ch if ch == quote => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    'u' => {
                        let hex: String = (0..4).filter_map(|_| self.bump()).collect();
                        let code = u32::from_str_radix(&hex, 16).ok()?;
                        out.push(char::from_u32(code)?);
                    }
                    other @ ('\\' | '\'' | '"' | '/') => out.push(other),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                ch => out.push(ch),
            }
        }
    }

    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '+' | '_'))
        {
            self.pos += 1;
        }
        let token: String = self.chars[start..self.pos]
            .iter()
            .filter(|ch| **ch != '_')
            .collect();
        if let Ok(int) = token.parse::<i64>() {
            return Some(Value::Number(Number::from(int)));
        }
        let float = token.parse::<f64>().ok().filter(|f| f.is_finite())?;
        Number::from_f64(float).map(Value::Number)
    }

    fn parse_keyword(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" | "true" => Some(Value::Bool(true)),
            "False" | "false" => Some(Value::Bool(false)),
            "None" | "null" => Some(Value::Null),
            _ => None,
        }
    }
}
