use crate::error::Error;
use deriv_compute::{ConfigError, Decimals, Function};
use tracing::debug;

/// The state kept between lines of input: the configuration given on the command line, and the
/// last function entered.
#[derive(Debug)]
pub struct Session {
    variable: char,
    decimals: Decimals,
    current: Option<(Function, Function)>,
}

impl Session {
    /// Creates a session reading functions of `variable`, rounded to `decimals` digits (`-1` for
    /// unrounded results).
    pub fn new(variable: char, decimals: i32) -> Result<Self, ConfigError> {
        if !variable.is_alphabetic() {
            return Err(ConfigError::InvalidVariable(variable));
        }
        Ok(Self {
            variable: variable.to_ascii_lowercase(),
            decimals: Decimals::try_from(decimals)?,
            current: None,
        })
    }

    /// Handles one line of input, returning the lines to print.
    ///
    /// A line starting with `=` evaluates the last function and its derivative at the point that
    /// follows. Any other line is read as a new function.
    pub fn process(&mut self, input: &str) -> Result<Vec<String>, Error> {
        if let Some(point) = input.trim_start().strip_prefix('=') {
            return self.evaluate_at(point);
        }

        let f = Function::new(input, self.variable, self.decimals)?;
        let df = f.derivative();
        debug!(%f, %df, "read function");

        let v = self.variable;
        let lines = vec![format!("f({}) = {}", v, f), format!("f'({}) = {}", v, df)];
        self.current = Some((f, df));
        Ok(lines)
    }

    /// Evaluates the last function and its derivative at `point`.
    fn evaluate_at(&self, point: &str) -> Result<Vec<String>, Error> {
        let (f, df) = self.current.as_ref().ok_or(Error::NoFunction)?;
        let point = point.trim().replace(',', ".");
        let x = point.parse::<f64>()?;
        Ok(vec![
            format!("f({}) = {}", point, f.evaluate(x)),
            format!("f'({}) = {}", point, df.evaluate(x)),
        ])
    }
}
