//! Tokenizer for the literal subset of PHP used by config files.

use super::PhpSyntaxError;

/// Line and column of a token, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Arrow,
    DoubleColon,
    Dot,
    Minus,
    Equals,
    Str(String),
    Int(i64),
    Float(f64),
    /// Identifier or qualified name, e.g. `return`, `Foo\Bar`, `\Foo\Bar`.
    Name(String),
    /// `?>` or end of input.
    Eof,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Self::LBracket => "'['".into(),
            Self::RBracket => "']'".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::Comma => "','".into(),
            Self::Semicolon => "';'".into(),
            Self::Arrow => "'=>'".into(),
            Self::DoubleColon => "'::'".into(),
            Self::Dot => "'.'".into(),
            Self::Minus => "'-'".into(),
            Self::Equals => "'='".into(),
            Self::Str(_) => "string literal".into(),
            Self::Int(_) | Self::Float(_) => "number".into(),
            Self::Name(n) => format!("'{n}'"),
            Self::Eof => "end of input".into(),
        }
    }
}

pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, PhpSyntaxError> {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        index: 0,
        line: 1,
        column: 1,
    };
    lexer.skip_open_tag();

    let mut tokens = Vec::new();
    loop {
        lexer.skip_trivia()?;
        let pos = lexer.position();
        let Some(ch) = lexer.peek() else {
            tokens.push((Token::Eof, pos));
            return Ok(tokens);
        };

        let token = match ch {
            '[' => lexer.single(Token::LBracket),
            ']' => lexer.single(Token::RBracket),
            '(' => lexer.single(Token::LParen),
            ')' => lexer.single(Token::RParen),
            ',' => lexer.single(Token::Comma),
            ';' => lexer.single(Token::Semicolon),
            '-' => lexer.single(Token::Minus),
            '.' if lexer.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => lexer.number()?,
            '.' => lexer.single(Token::Dot),
            '=' if lexer.peek_at(1) == Some('>') => {
                lexer.bump();
                lexer.bump();
                Token::Arrow
            }
            '=' => lexer.single(Token::Equals),
            ':' if lexer.peek_at(1) == Some(':') => {
                lexer.bump();
                lexer.bump();
                Token::DoubleColon
            }
            '?' if lexer.peek_at(1) == Some('>') => {
                tokens.push((Token::Eof, pos));
                return Ok(tokens);
            }
            '\'' => lexer.single_quoted()?,
            '"' => lexer.double_quoted()?,
            c if c.is_ascii_digit() => lexer.number()?,
            c if is_name_start(c) => lexer.name(),
            '\\' if lexer.peek_at(1).is_some_and(is_name_start) => lexer.name(),
            other => {
                return Err(PhpSyntaxError::new(pos, format!("unexpected character '{other}'")));
            }
        };
        tokens.push((token, pos));
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i).is_some_and(|p| p.eq_ignore_ascii_case(&c)))
    }

    fn skip_open_tag(&mut self) {
        // Leading whitespace before `<?php` would be output by PHP; tolerate it.
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        if self.starts_with("<?php") {
            for _ in 0.."<?php".len() {
                self.bump();
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<(), PhpSyntaxError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.position();
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(PhpSyntaxError::new(start, "unterminated block comment"));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            // A line comment ends at a closing tag too.
            if c == '?' && self.peek_at(1) == Some('>') {
                break;
            }
            self.bump();
        }
    }

    fn single_quoted(&mut self) -> Result<Token, PhpSyntaxError> {
        let start = self.position();
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(Token::Str(out)),
                Some('\\') => match self.peek() {
                    Some(c @ ('\'' | '\\')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
                None => return Err(PhpSyntaxError::new(start, "unterminated string literal")),
            }
        }
    }

    fn double_quoted(&mut self) -> Result<Token, PhpSyntaxError> {
        let start = self.position();
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::Str(out)),
                Some('\\') => {
                    let escaped = match self.peek() {
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('r') => Some('\r'),
                        Some('v') => Some('\u{0b}'),
                        Some('e') => Some('\u{1b}'),
                        Some('f') => Some('\u{0c}'),
                        Some('0') => Some('\0'),
                        Some(c @ ('\\' | '$' | '"')) => Some(c),
                        _ => None,
                    };
                    match escaped {
                        Some(c) => {
                            self.bump();
                            out.push(c);
                        }
                        None => out.push('\\'),
                    }
                }
                Some('$') if self.peek().is_some_and(|c| is_name_start(c) || c == '{') => {
                    let pos = self.position();
                    return Err(PhpSyntaxError::new(
                        pos,
                        "variable interpolation is not supported in config files",
                    ));
                }
                Some(c) => out.push(c),
                None => return Err(PhpSyntaxError::new(start, "unterminated string literal")),
            }
        }
    }

    fn number(&mut self) -> Result<Token, PhpSyntaxError> {
        let start = self.position();
        let mut text = String::new();
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
            } else if c == '_' {
                // Digit separator.
            } else if c == '.' && !is_float && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) {
                is_float = true;
                text.push(c);
            } else if matches!(c, 'e' | 'E') && !text.is_empty() {
                is_float = true;
                text.push(c);
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
                continue;
            } else {
                break;
            }
            self.bump();
        }

        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|e| PhpSyntaxError::new(start, format!("invalid number '{text}': {e}")))
        } else {
            text.parse::<i64>()
                .map(Token::Int)
                .map_err(|e| PhpSyntaxError::new(start, format!("invalid number '{text}': {e}")))
        }
    }

    fn name(&mut self) -> Token {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if is_name_char(c) || (c == '\\' && self.peek_at(1).is_some_and(is_name_start)) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token::Name(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn tokenizes_return_array() {
        assert_eq!(
            kinds("<?php\nreturn ['a' => 1, 'b' => [true]];"),
            vec![
                Token::Name("return".into()),
                Token::LBracket,
                Token::Str("a".into()),
                Token::Arrow,
                Token::Int(1),
                Token::Comma,
                Token::Str("b".into()),
                Token::Arrow,
                Token::LBracket,
                Token::Name("true".into()),
                Token::RBracket,
                Token::RBracket,
                Token::Semicolon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn single_quoted_escapes() {
        assert_eq!(
            kinds(r"'Shop\\V1\\Rest' 'it\'s' 'a\nb'"),
            vec![
                Token::Str(r"Shop\V1\Rest".into()),
                Token::Str("it's".into()),
                Token::Str(r"a\nb".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn double_quoted_escapes() {
        assert_eq!(
            kinds(r#""a\tb\n" "\$x" "C:\path""#),
            vec![
                Token::Str("a\tb\n".into()),
                Token::Str("$x".into()),
                Token::Str(r"C:\path".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn interpolation_is_rejected() {
        let err = tokenize(r#""hello $name""#).unwrap_err();
        assert!(err.message.contains("interpolation"));
    }

    #[test]
    fn qualified_names_and_class_constants() {
        assert_eq!(
            kinds(r"\Shop\V1\Rest\WidgetResource::class"),
            vec![
                Token::Name(r"\Shop\V1\Rest\WidgetResource".into()),
                Token::DoubleColon,
                Token::Name("class".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("42 1_000 3.5 .5 1e3"),
            vec![
                Token::Int(42),
                Token::Int(1000),
                Token::Float(3.5),
                Token::Float(0.5),
                Token::Float(1000.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("// line\n# hash\n/* block\n comment */ 1"),
            vec![Token::Int(1), Token::Eof]
        );
    }

    #[test]
    fn unterminated_comment_reports_start() {
        let err = tokenize("1 /* never closed").unwrap_err();
        assert_eq!(err.position, Position { line: 1, column: 3 });
    }

    #[test]
    fn closing_tag_ends_input() {
        assert_eq!(kinds("<?php return 1; ?>\nHTML"), vec![
            Token::Name("return".into()),
            Token::Int(1),
            Token::Semicolon,
            Token::Eof,
        ]);
    }

    #[test]
    fn positions_track_lines() {
        let tokens = tokenize("<?php\n\nreturn\n  [];").unwrap();
        assert_eq!(tokens[0].1, Position { line: 3, column: 1 });
        assert_eq!(tokens[1].1, Position { line: 4, column: 3 });
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = tokenize("return @foo;").unwrap_err();
        assert!(err.message.contains('@'));
        assert_eq!(err.position.column, 8);
    }
}
