//! Infix arithmetic evaluation: tokenize, shunting-yard to postfix, stack
//! evaluation.
//!
//! `%` has two forms. Followed by an operand it is binary percent-of,
//! `a%b = a / 100 * b`, binding tighter than `*` and `/`. Otherwise it is a
//! postfix `a% = a / 100`. A `-` at the start of the expression or right
//! after `(` negates the following operand.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("invalid expression")]
    InvalidExpression,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Op(BinOp),
    PercentPostfix,
    Neg,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    PercentOf,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::PercentOf => 3,
        }
    }

    fn apply(self, a: f64, b: f64) -> Result<f64, EvalError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Sub => Ok(a - b),
            Self::Mul => Ok(a * b),
            Self::Div if b == 0.0 => Err(EvalError::InvalidExpression),
            Self::Div => Ok(a / b),
            Self::PercentOf => Ok(a / 100.0 * b),
        }
    }
}

/// Evaluates `expr` to a finite number.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expr)?;
    let postfix = to_postfix(tokens)?;
    let value = eval_postfix(&postfix)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::InvalidExpression)
    }
}

/// Renders `value` rounded to 10 decimal places with trailing zeros removed.
pub fn format_result(value: f64) -> String {
    let fixed = format!("{value:.10}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidExpression)?;
                tokens.push(Token::Num(value));
                continue;
            }
            '+' => tokens.push(Token::Op(BinOp::Add)),
            '-' => {
                let unary = matches!(tokens.last(), None | Some(Token::LParen));
                tokens.push(if unary { Token::Neg } else { Token::Op(BinOp::Sub) });
            }
            '*' => tokens.push(Token::Op(BinOp::Mul)),
            '/' => tokens.push(Token::Op(BinOp::Div)),
            '%' => {
                let next_is_operand = chars
                    .get(i + 1)
                    .is_some_and(|c| c.is_ascii_digit() || *c == '.' || *c == '(');
                tokens.push(if next_is_operand {
                    Token::Op(BinOp::PercentOf)
                } else {
                    Token::PercentPostfix
                });
            }
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            _ => return Err(EvalError::InvalidExpression),
        }
        i += 1;
    }

    if tokens.is_empty() {
        return Err(EvalError::InvalidExpression);
    }
    Ok(tokens)
}

fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Num(_) | Token::PercentPostfix => output.push(token),
            Token::Neg | Token::LParen => operators.push(token),
            Token::RParen => loop {
                match operators.pop() {
                    Some(Token::LParen) => {
                        if let Some(Token::Neg) = operators.last() {
                            output.push(Token::Neg);
                            operators.pop();
                        }
                        break;
                    }
                    Some(op) => output.push(op),
                    None => return Err(EvalError::InvalidExpression),
                }
            },
            Token::Op(op) => {
                while let Some(top) = operators.last().copied() {
                    let pops = match top {
                        Token::Op(prev) => prev.precedence() >= op.precedence(),
                        Token::Neg => true,
                        _ => false,
                    };
                    if !pops {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push(token);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op == Token::LParen {
            return Err(EvalError::InvalidExpression);
        }
        output.push(op);
    }
    Ok(output)
}

fn eval_postfix(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in postfix {
        match *token {
            Token::Num(v) => stack.push(v),
            Token::Neg => {
                let v = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(-v);
            }
            Token::PercentPostfix => {
                let v = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(v / 100.0);
            }
            Token::Op(op) => {
                let b = stack.pop().ok_or(EvalError::InvalidExpression)?;
                let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(op.apply(a, b)?);
            }
            Token::LParen | Token::RParen => return Err(EvalError::InvalidExpression),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}
