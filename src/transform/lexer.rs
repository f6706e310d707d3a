//! Tokenizer for Whitespace assembly.

use std::iter::Peekable;
use std::str::Chars;

use super::ast::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Mnemonic or label reference.
    Word(String),
    /// `name:`
    LabelDef(String),
    Number(i64),
    /// `"..."`, escapes already resolved.
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, SourceError> {
        let mut tokens = Vec::new();

        while let Some(&ch) = self.chars.peek() {
            match ch {
                '\n' => {
                    self.chars.next();
                    self.line += 1;
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '#' | ';' => self.skip_comment(),
                '"' => {
                    self.chars.next();
                    let value = self.read_string()?;
                    tokens.push(self.token(TokenKind::Str(value)));
                }
                '+' | '-' | '0'..='9' => {
                    let value = self.read_number()?;
                    tokens.push(self.token(TokenKind::Number(value)));
                }
                c if c.is_ascii_alphabetic() || c == '_' || c == '.' => {
                    let word = self.read_word();
                    if self.chars.peek() == Some(&':') {
                        self.chars.next();
                        tokens.push(self.token(TokenKind::LabelDef(word)));
                    } else {
                        tokens.push(self.token(TokenKind::Word(word)));
                    }
                }
                other => {
                    return Err(SourceError::UnexpectedChar {
                        ch: other,
                        line: self.line,
                    });
                }
            }
        }

        Ok(tokens)
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            line: self.line,
        }
    }

    fn skip_comment(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                word.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        word
    }

    fn read_number(&mut self) -> Result<i64, SourceError> {
        let mut text = String::new();
        if let Some(&(sign @ ('+' | '-'))) = self.chars.peek() {
            text.push(sign);
            self.chars.next();
        }
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        text.parse::<i64>().map_err(|_| SourceError::InvalidNumber {
            text,
            line: self.line,
        })
    }

    fn read_string(&mut self) -> Result<String, SourceError> {
        let start_line = self.line;
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(value),
                Some('\\') => match self.chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                    None => break,
                },
                Some(ch) => {
                    if ch == '\n' {
                        self.line += 1;
                    }
                    value.push(ch);
                }
                None => break,
            }
        }
        Err(SourceError::UnterminatedString { line: start_line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_words_numbers_labels() {
        assert_eq!(
            kinds("loop: push -12 jump loop"),
            vec![
                TokenKind::LabelDef("loop".into()),
                TokenKind::Word("push".into()),
                TokenKind::Number(-12),
                TokenKind::Word("jump".into()),
                TokenKind::Word("loop".into()),
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("# header\nadd ; trailing\n  exit"),
            vec![TokenKind::Word("add".into()), TokenKind::Word("exit".into())]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"print "a\tb\n\"""#),
            vec![
                TokenKind::Word("print".into()),
                TokenKind::Str("a\tb\n\"".into()),
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = Lexer::new("add\n\nexit").tokenize().unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("print \"oops").tokenize().unwrap_err();
        assert_eq!(err, SourceError::UnterminatedString { line: 1 });
    }

    #[test]
    fn test_bare_sign_is_invalid_number() {
        let err = Lexer::new("push -").tokenize().unwrap_err();
        assert!(matches!(err, SourceError::InvalidNumber { .. }));
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("push 1\n@").tokenize().unwrap_err();
        assert_eq!(err, SourceError::UnexpectedChar { ch: '@', line: 2 });
    }

    #[test]
    fn test_empty_input() {
        assert!(kinds("").is_empty());
        assert!(kinds("   \n\t ").is_empty());
    }
}
