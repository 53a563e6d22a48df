//! Evaluates a tokenized config file into a JSON value tree.
//!
//! Grammar (PHP subset):
//!
//! ```text
//! file  := preamble* 'return' expr ';'? EOF
//! preamble := 'declare' '(' .. ')' ';' | 'namespace' NAME ';' | 'use' NAME ('as' NAME)? (',' ..)* ';'
//! expr  := term ('.' term)*
//! term  := array | STRING | NUMBER | '-' NUMBER | 'true' | 'false' | 'null'
//!        | '__DIR__' | NAME '::' 'class' | '(' expr ')'
//! array := '[' entries ']' | 'array' '(' entries ')'
//! entries := (expr ('=>' expr)? ',')* (expr ('=>' expr)?)?
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Number, Value};

use super::lexer::{Position, Token};
use super::PhpSyntaxError;

/// A PHP array key after PHP's key coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    fn into_string(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s,
        }
    }
}

/// Deepest nesting of arrays and parentheses accepted, matching the
/// recursion limit of the YAML and JSON decoders.
const MAX_NESTING: usize = 128;

pub(super) struct Parser<'a> {
    tokens: Vec<(Token, Position)>,
    index: usize,
    depth: usize,
    dir: Option<&'a Path>,
    namespace: Option<String>,
    aliases: HashMap<String, String>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(tokens: Vec<(Token, Position)>, dir: Option<&'a Path>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
            dir,
            namespace: None,
            aliases: HashMap::new(),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.index)
            .map(|(t, _)| t)
            .unwrap_or(&Token::Eof)
    }

    fn position(&self) -> Position {
        self.tokens
            .get(self.index)
            .or_else(|| self.tokens.last())
            .map(|(_, p)| *p)
            .unwrap_or(Position { line: 1, column: 1 })
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Token::Name(n) if n.eq_ignore_ascii_case(keyword))
    }

    fn error(&self, message: impl Into<String>) -> PhpSyntaxError {
        PhpSyntaxError::new(self.position(), message)
    }

    fn unexpected(&self, expected: &str) -> PhpSyntaxError {
        self.error(format!("expected {expected}, found {}", self.peek().describe()))
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), PhpSyntaxError> {
        if *self.peek() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_name(&mut self) -> Result<String, PhpSyntaxError> {
        match self.peek() {
            Token::Name(_) => match self.advance() {
                Token::Name(n) => Ok(n),
                _ => Err(self.unexpected("a name")),
            },
            _ => Err(self.unexpected("a name")),
        }
    }

    pub(super) fn parse_file(&mut self) -> Result<Value, PhpSyntaxError> {
        loop {
            if self.peek_keyword("declare") {
                self.skip_declare()?;
            } else if self.peek_keyword("namespace") {
                self.advance();
                let name = self.expect_name()?;
                self.namespace = Some(name.trim_start_matches('\\').to_string());
                self.expect(Token::Semicolon, "';' after namespace")?;
            } else if self.peek_keyword("use") {
                self.advance();
                self.parse_use()?;
            } else if self.peek_keyword("return") {
                self.advance();
                let value = self.expr()?;
                if *self.peek() == Token::Semicolon {
                    self.advance();
                }
                if *self.peek() != Token::Eof {
                    return Err(self.unexpected("end of input after return statement"));
                }
                return Ok(value);
            } else {
                return Err(self.unexpected("'return' statement"));
            }
        }
    }

    fn skip_declare(&mut self) -> Result<(), PhpSyntaxError> {
        self.advance();
        self.expect(Token::LParen, "'(' after declare")?;
        loop {
            match self.advance() {
                Token::RParen => break,
                Token::Eof => return Err(self.error("unterminated declare statement")),
                _ => {}
            }
        }
        self.expect(Token::Semicolon, "';' after declare")
    }

    fn parse_use(&mut self) -> Result<(), PhpSyntaxError> {
        // `use function` / `use const` imports do not affect class names.
        let imports_classes = !(self.peek_keyword("function") || self.peek_keyword("const"));
        if !imports_classes {
            self.advance();
        }
        loop {
            let full = self.expect_name()?;
            let full = full.trim_start_matches('\\').to_string();
            let alias = if self.peek_keyword("as") {
                self.advance();
                self.expect_name()?
            } else {
                full.rsplit('\\').next().unwrap_or(&full).to_string()
            };
            if imports_classes {
                self.aliases.insert(alias.to_ascii_lowercase(), full);
            }
            match self.advance() {
                Token::Comma => continue,
                Token::Semicolon => return Ok(()),
                _ => return Err(self.error("expected ',' or ';' in use statement")),
            }
        }
    }

    fn expr(&mut self) -> Result<Value, PhpSyntaxError> {
        let start = self.position();
        let first = self.term()?;
        if *self.peek() != Token::Dot {
            return Ok(first);
        }

        let mut out = to_php_string(&first).ok_or_else(|| {
            PhpSyntaxError::new(start, "array to string conversion in concatenation")
        })?;
        while *self.peek() == Token::Dot {
            self.advance();
            let pos = self.position();
            let next = self.term()?;
            let piece = to_php_string(&next).ok_or_else(|| {
                PhpSyntaxError::new(pos, "array to string conversion in concatenation")
            })?;
            out.push_str(&piece);
        }
        Ok(Value::String(out))
    }

    fn term(&mut self) -> Result<Value, PhpSyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(PhpSyntaxError::new(
                self.position(),
                format!("nesting too deep (more than {MAX_NESTING} levels)"),
            ));
        }
        self.depth += 1;
        let value = self.nested_term();
        self.depth -= 1;
        value
    }

    fn nested_term(&mut self) -> Result<Value, PhpSyntaxError> {
        let pos = self.position();
        match self.advance() {
            Token::LBracket => self.array(Token::RBracket),
            Token::LParen => {
                let value = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(value)
            }
            Token::Str(s) => Ok(Value::String(s)),
            Token::Int(i) => Ok(Value::from(i)),
            Token::Float(f) => float_value(f, pos),
            Token::Minus => match self.advance() {
                Token::Int(i) => Ok(Value::from(-i)),
                Token::Float(f) => float_value(-f, pos),
                _ => Err(PhpSyntaxError::new(pos, "expected a number after '-'")),
            },
            Token::Name(name) => self.name_term(name, pos),
            other => Err(PhpSyntaxError::new(
                pos,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }

    fn name_term(&mut self, name: String, pos: Position) -> Result<Value, PhpSyntaxError> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" => return Ok(Value::Null),
            "array" if *self.peek() == Token::LParen => {
                self.advance();
                return self.array(Token::RParen);
            }
            _ => {}
        }
        if name == "__DIR__" {
            let dir = self
                .dir
                .ok_or_else(|| PhpSyntaxError::new(pos, "__DIR__ used without a file location"))?;
            return Ok(Value::String(dir.display().to_string()));
        }

        if *self.peek() != Token::DoubleColon {
            return Err(PhpSyntaxError::new(pos, format!("cannot evaluate constant '{name}'")));
        }
        self.advance();
        let member = self.expect_name()?;
        if !member.eq_ignore_ascii_case("class") {
            return Err(PhpSyntaxError::new(
                pos,
                format!("cannot evaluate class constant '{name}::{member}'"),
            ));
        }
        self.resolve_class(&name, pos).map(Value::String)
    }

    fn resolve_class(&self, name: &str, pos: Position) -> Result<String, PhpSyntaxError> {
        if let Some(qualified) = name.strip_prefix('\\') {
            return Ok(qualified.to_string());
        }
        let (head, rest) = match name.split_once('\\') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        if rest.is_none() && matches!(head.to_ascii_lowercase().as_str(), "self" | "static" | "parent") {
            return Err(PhpSyntaxError::new(pos, format!("'{head}::class' outside a class")));
        }
        if let Some(imported) = self.aliases.get(&head.to_ascii_lowercase()) {
            return Ok(match rest {
                Some(rest) => format!("{imported}\\{rest}"),
                None => imported.clone(),
            });
        }
        Ok(match &self.namespace {
            Some(ns) => format!("{ns}\\{name}"),
            None => name.to_string(),
        })
    }

    fn array(&mut self, close: Token) -> Result<Value, PhpSyntaxError> {
        let mut entries: Vec<(Key, Value)> = Vec::new();
        let mut next_index: i64 = 0;

        loop {
            if *self.peek() == close {
                self.advance();
                break;
            }

            let key_pos = self.position();
            let first = self.expr()?;
            let (key, value) = if *self.peek() == Token::Arrow {
                self.advance();
                let key = coerce_key(first, key_pos)?;
                (key, self.expr()?)
            } else {
                (Key::Int(next_index), first)
            };

            if let Key::Int(i) = key {
                next_index = next_index.max(i.saturating_add(1));
            }
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }

            if *self.peek() == Token::Comma {
                self.advance();
            } else if *self.peek() != close {
                return Err(self.unexpected(&format!("',' or {}", close.describe())));
            }
        }

        Ok(finish_array(entries))
    }
}

/// A PHP array whose keys are exactly 0..n in order is a list.
fn finish_array(entries: Vec<(Key, Value)>) -> Value {
    let is_list = entries
        .iter()
        .enumerate()
        .all(|(i, (k, _))| *k == Key::Int(i as i64));
    if is_list {
        Value::Array(entries.into_iter().map(|(_, v)| v).collect())
    } else {
        let mut map = Map::new();
        for (k, v) in entries {
            map.insert(k.into_string(), v);
        }
        Value::Object(map)
    }
}

fn coerce_key(value: Value, pos: Position) -> Result<Key, PhpSyntaxError> {
    match value {
        Value::String(s) => Ok(match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => Key::Int(i),
            _ => Key::Str(s),
        }),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .map(Key::Int)
            .ok_or_else(|| PhpSyntaxError::new(pos, format!("unusable array key {n}"))),
        Value::Bool(b) => Ok(Key::Int(i64::from(b))),
        Value::Null => Ok(Key::Str(String::new())),
        Value::Array(_) | Value::Object(_) => {
            Err(PhpSyntaxError::new(pos, "arrays cannot be used as array keys"))
        }
    }
}

fn to_php_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn float_value(f: f64, pos: Position) -> Result<Value, PhpSyntaxError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| PhpSyntaxError::new(pos, format!("unrepresentable number {f}")))
}
