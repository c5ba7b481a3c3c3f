// Frenchy Lexer: tokenizes .fry source files

use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals, kept as source text
    Integer(String),
    Decimal(String),
    Text(String),
    Bool(String),
    Null,

    // Identifiers & keywords
    Ident(String),
    Si,
    Sinon,
    Pendant,
    Que,
    Jusqua,
    Pour,
    Chaque,
    Dans,

    // Types
    EntierType,
    FlottantType,
    TexteType,
    BooleenType,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,

    // Special
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn current_span(&self) -> Span {
        Span { line: self.line, col: self.col }
    }

    fn error(&self, message: impl Into<String>, span: Span) -> SyntaxError {
        SyntaxError::new(message, span.line, span.col)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    // No escapes: the literal runs to the next quote.
    fn read_text(&mut self, span: Span) -> Result<Token, SyntaxError> {
        let mut raw = String::from('"');
        loop {
            match self.advance() {
                None => return Err(self.error("Unterminated text literal", span)),
                Some('"') => break,
                Some(c) => raw.push(c),
            }
        }
        raw.push('"');
        Ok(Token::Text(raw))
    }

    fn read_number(&mut self, first: char) -> Token {
        let mut s = String::new();
        s.push(first);
        let mut is_decimal = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else if c == '.' && !is_decimal && self.peek2().map_or(false, |x| x.is_ascii_digit()) {
                is_decimal = true;
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if is_decimal { Token::Decimal(s) } else { Token::Integer(s) }
    }

    fn read_ident(&mut self, first: char, span: Span) -> Result<Token, SyntaxError> {
        let mut s = String::new();
        s.push(first);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // jusqu'a / jusqu'à
        if s == "jusqu" {
            if self.peek() == Some('\'') && matches!(self.peek2(), Some('a') | Some('à')) {
                self.advance();
                self.advance();
                return Ok(Token::Jusqua);
            }
            return Err(self.error("Expected jusqu'à", span));
        }

        let token = match s.as_str() {
            "si"       => Token::Si,
            "sinon"    => Token::Sinon,
            "pendant"  => Token::Pendant,
            "que"      => Token::Que,
            "pour"     => Token::Pour,
            "chaque"   => Token::Chaque,
            "dans"     => Token::Dans,
            "vrai" | "faux" => Token::Bool(s),
            "nul"      => Token::Null,
            "entier"   => Token::EntierType,
            "flottant" => Token::FlottantType,
            "texte"    => Token::TexteType,
            "booleen" | "booléen" => Token::BooleenType,
            _          => Token::Ident(s),
        };
        Ok(token)
    }

    pub fn tokenize(&mut self) -> Result<Vec<TokenWithSpan>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let span = self.current_span();

            let ch = match self.peek() {
                None => {
                    tokens.push(TokenWithSpan { token: Token::Eof, span });
                    break;
                }
                Some(c) => c,
            };

            // Comments
            if ch == '/' && self.peek2() == Some('/') {
                while let Some(c) = self.peek() {
                    if c == '\n' { break; }
                    self.advance();
                }
                continue;
            }

            // Multi-line comments
            if ch == '/' && self.peek2() == Some('*') {
                self.advance(); self.advance();
                loop {
                    match self.advance() {
                        None => return Err(self.error("Unterminated block comment", span)),
                        Some('*') if self.peek() == Some('/') => { self.advance(); break; }
                        _ => {}
                    }
                }
                continue;
            }

            self.advance();

            let token = match ch {
                '"' => self.read_text(span)?,
                c if c.is_ascii_digit() => self.read_number(c),
                c if c.is_alphabetic() || c == '_' => self.read_ident(c, span)?,
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '%' => Token::Percent,
                '=' => {
                    if self.peek() == Some('=') { self.advance(); Token::EqEq }
                    else { Token::Eq }
                }
                '!' => {
                    if self.peek() == Some('=') { self.advance(); Token::NotEq }
                    else { return Err(self.error("Expected '=' after '!'", span)); }
                }
                '<' => {
                    if self.peek() == Some('=') { self.advance(); Token::LtEq }
                    else { Token::Lt }
                }
                '>' => {
                    if self.peek() == Some('=') { self.advance(); Token::GtEq }
                    else { Token::Gt }
                }
                '(' => Token::LParen,
                ')' => Token::RParen,
                '{' => Token::LBrace,
                '}' => Token::RBrace,
                '[' => Token::LBracket,
                ']' => Token::RBracket,
                ',' => Token::Comma,
                ';' => Token::Semicolon,
                _ => return Err(self.error(format!("Unexpected character '{}'", ch), span)),
            };

            tokens.push(TokenWithSpan { token, span });
        }

        Ok(tokens)
    }
}
