use super::eval::{evaluate, format_result};

/// Text shown when evaluation fails.
pub const ERROR_DISPLAY: &str = "Error";

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single digit `0`..=`9`.
    Digit(u8),
    /// The `00` button.
    DoubleZero,
    /// Decimal point.
    Dot,
    /// `+`.
    Add,
    /// `-`.
    Sub,
    /// `*`.
    Mul,
    /// `/`.
    Div,
    /// `%`.
    Percent,
    /// `C`: reset input and result.
    Clear,
    /// `DEL`: remove the last character.
    Delete,
    /// `=`: evaluate.
    Equals,
}

impl Key {
    /// Parses a keypad label (`"7"`, `"00"`, `"DEL"`, `"="`, ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let key = match label {
            "00" => Self::DoubleZero,
            "." => Self::Dot,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Percent,
            "C" => Self::Clear,
            "DEL" => Self::Delete,
            "=" => Self::Equals,
            _ => {
                let mut chars = label.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Digit(digit as u8)
            }
        };
        Some(key)
    }

    fn text(self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Self::Digit(d) => DIGITS.get(usize::from(d)).copied().unwrap_or(""),
            Self::DoubleZero => "00",
            Self::Dot => ".",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Percent => "%",
            Self::Clear | Self::Delete | Self::Equals => "",
        }
    }

    fn is_operator(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }
}

/// Keypad calculator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    input: String,
    result: String,
    just_evaluated: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last evaluation output, [`ERROR_DISPLAY`], or empty.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn just_evaluated(&self) -> bool {
        self.just_evaluated
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Equals => {
                if self.input.is_empty() {
                    return;
                }
                self.result = match evaluate(&self.input) {
                    Ok(value) => format_result(value),
                    Err(err) => {
                        tracing::debug!(input = %self.input, "calculator: {err}");
                        ERROR_DISPLAY.to_string()
                    }
                };
                self.just_evaluated = true;
            }
            Key::Clear => self.reset(),
            Key::Delete => {
                if self.just_evaluated {
                    self.reset();
                } else {
                    self.input.pop();
                }
            }
            _ if self.just_evaluated => {
                self.input = if !key.is_operator() {
                    key.text().to_string()
                } else if self.result == ERROR_DISPLAY {
                    String::new()
                } else {
                    format!("{}{}", self.result, key.text())
                };
                self.result.clear();
                self.just_evaluated = false;
            }
            _ => self.input.push_str(key.text()),
        }
    }

    /// Presses each key in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    fn reset(&mut self) {
        self.input.clear();
        self.result.clear();
        self.just_evaluated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(labels: &[&str]) -> Vec<Key> {
        labels
            .iter()
            .map(|l| Key::from_label(l).expect("label"))
            .collect()
    }

    #[test]
    fn evaluates_and_continues_from_result() {
        let mut calc = Calculator::new();
        calc.press_all(keys(&["1", "0", "+", "5", "*", "2", "="]));
        assert_eq!(calc.result(), "20");
        assert!(calc.just_evaluated());

        calc.press(Key::Add);
        assert_eq!(calc.input(), "20+");
        assert_eq!(calc.result(), "");
        calc.press_all(keys(&["1", "="]));
        assert_eq!(calc.result(), "21");
    }

    #[test]
    fn digit_after_result_starts_fresh() {
        let mut calc = Calculator::new();
        calc.press_all(keys(&["2", "*", "3", "=", "7"]));
        assert_eq!(calc.input(), "7");
        assert!(!calc.just_evaluated());
    }

    #[test]
    fn error_requires_clearing() {
        let mut calc = Calculator::new();
        calc.press_all(keys(&["5", "/", "0", "="]));
        assert_eq!(calc.result(), ERROR_DISPLAY);

        calc.press(Key::Mul);
        assert_eq!(calc.input(), "");
        assert_eq!(calc.result(), "");
    }

    #[test]
    fn delete_trims_or_resets() {
        let mut calc = Calculator::new();
        calc.press_all(keys(&["1", "2", "3", "DEL"]));
        assert_eq!(calc.input(), "12");

        calc.press_all(keys(&["=", "DEL"]));
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn equals_on_empty_input_is_ignored() {
        let mut calc = Calculator::new();
        calc.press(Key::Equals);
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn percent_key() {
        let mut calc = Calculator::new();
        calc.press_all(keys(&["5", "0", "%", "5", "="]));
        assert_eq!(calc.result(), "2.5");
        assert!(Key::from_label("12").is_none());
    }
}
