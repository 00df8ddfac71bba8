use crate::types::ContainerKind;
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// TypeExpr
///
/// Parsed form of a field's type string:
///
/// ```text
/// expr  := ident generic? "[]"*
/// generic := "<" expr (("::" | ",") expr)* ">"
/// ```
///
/// `Optional` is the only generic head that is not a container.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeExpr {
    Named(String),
    Optional(Box<Self>),
    Array(Box<Self>),
    Container { kind: ContainerKind, args: Vec<Self> },
}

impl TypeExpr {
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let mut parser = Parser { src, pos: 0 };

        parser.skip_ws();
        if parser.at_end() {
            return Err(ParseError::Empty);
        }

        let expr = parser.expr()?;

        parser.skip_ws();
        if !parser.at_end() {
            return Err(ParseError::Trailing {
                rest: parser.rest().to_string(),
            });
        }

        Ok(expr)
    }

    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Container { kind, args } => {
                write!(f, "{kind}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str("::")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

///
/// ParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ParseError {
    #[error("'{head}' expects {expected} type argument(s), found {found}")]
    Arity {
        head: String,
        expected: usize,
        found: usize,
    },

    #[error("type expression is empty")]
    Empty,

    #[error("trailing input '{rest}'")]
    Trailing { rest: String },

    #[error("unexpected character '{found}' at offset {offset}, expected {expected}")]
    Unexpected {
        found: char,
        offset: usize,
        expected: &'static str,
    },

    #[error("unexpected end of type expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unknown generic type '{head}'")]
    UnknownGeneric { head: String },
}

// Parser
// hand-rolled recursive descent over a single type string
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn expr(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_ws();
        let head = self.ident()?;
        self.skip_ws();

        let mut expr = if self.eat("<") {
            let args = self.args()?;
            self.skip_ws();
            self.expect(">", "'>'")?;

            generic(head, args)?
        } else {
            TypeExpr::Named(head.to_string())
        };

        loop {
            self.skip_ws();
            if self.eat("[]") {
                expr = TypeExpr::Array(Box::new(expr));
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn args(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        let mut args = vec![self.expr()?];

        loop {
            self.skip_ws();
            if self.eat("::") || self.eat(",") {
                args.push(self.expr()?);
            } else {
                break;
            }
        }

        Ok(args)
    }

    fn ident(&mut self) -> Result<&'a str, ParseError> {
        let src = self.src;
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());

        if len == 0 {
            return Err(self.unexpected("a type name"));
        }
        self.pos += len;

        Ok(&src[start..self.pos])
    }

    fn expect(&mut self, token: &str, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.rest().chars().next() {
            Some(found) => ParseError::Unexpected {
                found,
                offset: self.pos,
                expected,
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }
}

// generic
// resolve a `Head<args>` form into its node, checking argument count
fn generic(head: &str, mut args: Vec<TypeExpr>) -> Result<TypeExpr, ParseError> {
    let arity_error = |expected: usize, found: usize| ParseError::Arity {
        head: head.to_string(),
        expected,
        found,
    };

    if head == "Optional" {
        if args.len() != 1 {
            return Err(arity_error(1, args.len()));
        }
        return Ok(TypeExpr::Optional(Box::new(args.remove(0))));
    }

    let Some(kind) = ContainerKind::from_generic_head(head) else {
        return Err(ParseError::UnknownGeneric {
            head: head.to_string(),
        });
    };
    if args.len() != kind.arity() {
        return Err(arity_error(kind.arity(), args.len()));
    }

    Ok(TypeExpr::Container { kind, args })
}

///
/// TESTS
///
