//! Arithmetic calculator tool.
//!
//! A small recursive-descent evaluator over `+ - * / %` and parentheses,
//! plus `sqrt(n)`. Replaces the original lab's eval-with-allowlist with a
//! real grammar; still only arithmetic.

use pcore::{Handler, Tool, handler};

/// The calculator tool descriptor and handler.
pub fn tool() -> (Tool, Handler) {
    let spec = Tool::new(
        "calculator",
        "Performs mathematical calculations. Input: a math expression like '25 * 4 + 10' or 'sqrt(16)'.",
    );
    let handler = handler(|input| async move { run(&input) });
    (spec, handler)
}

/// Evaluate an expression and format the result or error as the tool
/// output string.
pub fn run(expression: &str) -> String {
    let expression = expression.trim();
    match evaluate(expression) {
        Ok(value) => format!("{expression} = {}", format_number(value)),
        Err(err) => format!("calculator error: {err}. Please check your expression."),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, String> {
    let mut parser = Parser {
        chars: expression.chars().collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if parser.pos != parser.chars.len() {
        return Err(format!(
            "unexpected character '{}'",
            parser.chars[parser.pos]
        ));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
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

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := factor (('*' | '/' | '%') factor)*
    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return Err("division by zero".into());
                }
                value /= divisor;
            } else if self.eat('%') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return Err("division by zero".into());
                }
                value %= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    // factor := '-' factor | 'sqrt' '(' expr ')' | '(' expr ')' | number
    fn factor(&mut self) -> Result<f64, String> {
        self.skip_ws();

        if self.eat('-') {
            return Ok(-self.factor()?);
        }

        if self.word("sqrt") {
            if !self.eat('(') {
                return Err("expected '(' after sqrt".into());
            }
            let inner = self.expr()?;
            if !self.eat(')') {
                return Err("missing closing parenthesis".into());
            }
            if inner < 0.0 {
                return Err("square root of a negative number".into());
            }
            return Ok(inner.sqrt());
        }

        if self.eat('(') {
            let value = self.expr()?;
            if !self.eat(')') {
                return Err("missing closing parenthesis".into());
            }
            return Ok(value);
        }

        self.number()
    }

    fn word(&mut self, word: &str) -> bool {
        self.skip_ws();
        let end = self.pos + word.len();
        if end <= self.chars.len() && self.chars[self.pos..end].iter().collect::<String>() == word {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return match self.peek() {
                Some(c) => Err(format!("unexpected character '{c}'")),
                None => Err("unexpected end of expression".into()),
            };
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().map_err(|_| format!("invalid number '{text}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_parens() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-3 + 5").unwrap(), 2.0);
        assert_eq!(evaluate("2 * -4").unwrap(), -8.0);
    }

    #[test]
    fn sqrt_works() {
        assert_eq!(evaluate("sqrt(16)").unwrap(), 4.0);
        assert_eq!(evaluate("sqrt(9) + 1").unwrap(), 4.0);
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(evaluate("1 / 0").unwrap_err(), "division by zero");
    }

    #[test]
    fn garbage_is_reported() {
        assert!(evaluate("2 +").is_err());
        assert!(evaluate("import os").is_err());
        assert!(evaluate("1 + (2").is_err());
    }

    #[test]
    fn run_formats_integers_cleanly() {
        assert_eq!(run("25 * 4 + 10"), "25 * 4 + 10 = 110");
    }

    #[test]
    fn run_reports_errors_as_text() {
        let output = run("2 ** 3");
        assert!(output.starts_with("calculator error:"));
    }

    #[tokio::test]
    async fn handler_evaluates() {
        let (spec, handler) = tool();
        assert_eq!(spec.name, "calculator");
        assert_eq!(handler("6 * 7".into()).await, "6 * 7 = 42");
    }
}
