//! Tokenizer and recursive-descent parser.

use super::{BinaryOp, Expr, FormulaError, UnaryOp, UnsafeConstruct};

/// Parenthesis/unary nesting limit; deeper input is rejected as malformed.
const MAX_DEPTH: usize = 64;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    /// Only legal as a syntax error; lexed so calls report as calls.
    Comma,
}

fn unsafe_at(construct: UnsafeConstruct, position: usize) -> FormulaError {
    FormulaError::Unsafe {
        construct,
        position,
    }
}

fn malformed(position: usize, reason: &'static str) -> FormulaError {
    FormulaError::Malformed { position, reason }
}

fn keyword_construct(ident: &str) -> Option<UnsafeConstruct> {
    match ident {
        "and" | "or" | "not" => Some(UnsafeConstruct::BooleanLogic),
        "in" | "is" => Some(UnsafeConstruct::Comparison),
        "lambda" | "if" | "else" | "for" | "while" | "import" | "from" | "yield" | "await"
        | "async" | "def" | "class" | "return" | "del" | "global" | "nonlocal" | "with"
        | "as" | "try" | "except" | "finally" | "raise" | "assert" | "pass" | "break"
        | "continue" => Some(UnsafeConstruct::Keyword),
        _ => None,
    }
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;
        match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
            }
            b'0'..=b'9' => {
                pos = scan_number(bytes, pos);
                tokens.push((Token::Number(parse_number(source, start, pos)?), start));
            }
            b'.' => {
                let follows_value = matches!(
                    tokens.last(),
                    Some((Token::Ident(_) | Token::RParen, _))
                );
                if follows_value {
                    return Err(unsafe_at(UnsafeConstruct::AttributeAccess, start));
                }
                if !bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) {
                    return Err(malformed(start, "stray '.'"));
                }
                pos = scan_number(bytes, pos);
                tokens.push((Token::Number(parse_number(source, start, pos)?), start));
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                let ident = &source[start..pos];
                if let Some(construct) = keyword_construct(ident) {
                    return Err(unsafe_at(construct, start));
                }
                tokens.push((Token::Ident(ident.to_string()), start));
            }
            b'+' => {
                tokens.push((Token::Plus, start));
                pos += 1;
            }
            b'-' => {
                tokens.push((Token::Minus, start));
                pos += 1;
            }
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    return Err(unsafe_at(UnsafeConstruct::Exponentiation, start));
                }
                tokens.push((Token::Star, start));
                pos += 1;
            }
            b'/' => {
                if bytes.get(pos + 1) == Some(&b'/') {
                    return Err(unsafe_at(UnsafeConstruct::UnexpectedCharacter, start));
                }
                tokens.push((Token::Slash, start));
                pos += 1;
            }
            b'(' => {
                tokens.push((Token::LParen, start));
                pos += 1;
            }
            b')' => {
                tokens.push((Token::RParen, start));
                pos += 1;
            }
            b',' => {
                tokens.push((Token::Comma, start));
                pos += 1;
            }
            b'[' | b']' => return Err(unsafe_at(UnsafeConstruct::Subscript, start)),
            b'<' | b'>' | b'=' | b'!' => return Err(unsafe_at(UnsafeConstruct::Comparison, start)),
            b'&' | b'|' | b'^' | b'~' => {
                return Err(unsafe_at(UnsafeConstruct::BitwiseOperator, start));
            }
            b'%' => return Err(unsafe_at(UnsafeConstruct::Modulo, start)),
            b'"' | b'\'' => return Err(unsafe_at(UnsafeConstruct::StringLiteral, start)),
            _ => return Err(unsafe_at(UnsafeConstruct::UnexpectedCharacter, start)),
        }
    }

    Ok(tokens)
}

/// Scans `digits [. digits] [e [+-] digits]` starting at `pos`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = exp;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }
    pos
}

fn parse_number(source: &str, start: usize, end: usize) -> Result<f64, FormulaError> {
    source[start..end]
        .parse::<f64>()
        .map_err(|_| malformed(start, "invalid number literal"))
}

// ============================================================================
// Parser
// ============================================================================

pub(super) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            cursor: 0,
            depth: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Expr, FormulaError> {
        self.tokens = tokenize(self.source)?;
        if self.tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        let expr = self.expr()?;
        if let Some((_, position)) = self.tokens.get(self.cursor) {
            return Err(malformed(*position, "unexpected trailing input"));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map(|(_, position)| *position)
            .unwrap_or(self.source.len())
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).map(|(token, _)| token.clone());
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(malformed(self.position(), "expression nested too deeply"));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        let op = match self.peek() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Neg,
            _ => return self.primary(),
        };
        self.cursor += 1;
        self.enter()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let position = self.position();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    return Err(unsafe_at(UnsafeConstruct::FunctionCall, self.position()));
                }
                Ok(Expr::Var(name))
            }
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(malformed(position, "unbalanced parenthesis")),
                }
            }
            Some(_) => Err(malformed(position, "expected a value")),
            None => Err(malformed(position, "unexpected end of expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Expr, FormulaError> {
        Parser::new(source).parse()
    }

    fn construct(source: &str) -> UnsafeConstruct {
        match parse(source) {
            Err(FormulaError::Unsafe { construct, .. }) => construct,
            other => panic!("expected unsafe rejection for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn precedence_binds_multiplication_tighter() {
        let expr = parse("ATT + WPN * 2").unwrap();
        match expr {
            Expr::Binary {
                op: BinaryOp::Add,
                left,
                right,
            } => {
                assert_eq!(*left, Expr::Var("ATT".into()));
                assert!(matches!(
                    *right,
                    Expr::Binary {
                        op: BinaryOp::Mul,
                        ..
                    }
                ));
            }
            other => panic!("expected addition at the root, got {other:?}"),
        }
    }

    #[test]
    fn number_forms() {
        assert_eq!(parse("0.6").unwrap(), Expr::Number(0.6));
        assert_eq!(parse(".5").unwrap(), Expr::Number(0.5));
        assert_eq!(parse("1e2").unwrap(), Expr::Number(100.0));
        assert_eq!(parse("3.").unwrap(), Expr::Number(3.0));
    }

    #[test]
    fn rejects_disallowed_syntax() {
        assert_eq!(construct("stats.ATT"), UnsafeConstruct::AttributeAccess);
        assert_eq!(construct("max(ATT, 1)"), UnsafeConstruct::FunctionCall);
        assert_eq!(construct("pow(ATT, 2, 3)"), UnsafeConstruct::FunctionCall);
        assert_eq!(construct("ATT[0]"), UnsafeConstruct::Subscript);
        assert_eq!(construct("ATT > 3"), UnsafeConstruct::Comparison);
        assert_eq!(construct("ATT and DEX"), UnsafeConstruct::BooleanLogic);
        assert_eq!(construct("ATT ** 2"), UnsafeConstruct::Exponentiation);
        assert_eq!(construct("ATT % 2"), UnsafeConstruct::Modulo);
        assert_eq!(construct("'ATT'"), UnsafeConstruct::StringLiteral);
        assert_eq!(construct("lambda: 1"), UnsafeConstruct::Keyword);
        assert_eq!(construct("ATT # note"), UnsafeConstruct::UnexpectedCharacter);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse("   "), Err(FormulaError::Empty));
        assert!(matches!(parse("1 +"), Err(FormulaError::Malformed { .. })));
        assert!(matches!(parse("(1 + 2"), Err(FormulaError::Malformed { .. })));
        assert!(matches!(parse("1 2"), Err(FormulaError::Malformed { .. })));
        assert!(matches!(parse(")"), Err(FormulaError::Malformed { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert!(matches!(parse(&deep), Err(FormulaError::Malformed { .. })));
        let negations = format!("{}1", "-".repeat(500));
        assert!(matches!(parse(&negations), Err(FormulaError::Malformed { .. })));
    }
}
