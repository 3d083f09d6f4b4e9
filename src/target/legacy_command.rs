use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds a positional command for the legacy text interface
///
/// The path uses the menu form of the interface, e.g., `/define/operating-conditions/gravity`.
/// Empty arguments stand for "accept the default" (an empty line in the console).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LegacyCommand {
    /// Menu path of the command
    pub path: String,

    /// Positional arguments
    pub args: Vec<String>,
}

impl LegacyCommand {
    /// Allocates a new command
    pub fn new(path: &str, args: &[&str]) -> Self {
        LegacyCommand {
            path: path.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Appends a real number argument
    pub fn real(mut self, value: f64) -> Self {
        self.args.push(format_real(value));
        self
    }

    /// Appends a text argument
    pub fn arg(mut self, value: &str) -> Self {
        self.args.push(value.to_string());
        self
    }
}

impl fmt::Display for LegacyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Formats a real number the way the text interface expects (no exponent for common values)
pub(crate) fn format_real(value: f64) -> String {
    format!("{}", value)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LegacyCommand;

    #[test]
    fn display_works() {
        let cmd = LegacyCommand::new("/define/operating-conditions/gravity", &["yes"])
            .real(0.0)
            .real(0.0)
            .real(-9.81);
        assert_eq!(cmd.args, &["yes", "0", "0", "-9.81"]);
        assert_eq!(format!("{}", cmd), "/define/operating-conditions/gravity yes 0 0 -9.81");

        let cmd = LegacyCommand::new("/file/read-case", &[]).arg("/tmp/my case.cas.h5").arg("");
        assert_eq!(format!("{}", cmd), "/file/read-case \"/tmp/my case.cas.h5\" \"\"");
    }
}
