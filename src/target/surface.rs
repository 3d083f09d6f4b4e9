use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the structured control surfaces of a solver session
///
/// The legacy text-command surface is not listed here; it is reached through
/// [crate::target::Target::run_command].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Surface {
    /// Shortcut objects hanging directly from the session (e.g., `solver.setup`)
    Root,

    /// The settings tree (e.g., `solver.settings.setup`)
    Settings,
}

impl Surface {
    /// Returns the prefix used when naming a path of this surface
    pub fn prefix(&self) -> &'static str {
        match self {
            Surface::Root => "solver",
            Surface::Settings => "solver.settings",
        }
    }

    /// Returns a human-readable label for a `/`-separated path on this surface
    ///
    /// ```
    /// use cfdsetup::target::Surface;
    /// let label = Surface::Settings.label("setup/models/energy/enabled");
    /// assert_eq!(label, "solver.settings.setup.models.energy.enabled");
    /// ```
    pub fn label(&self, path: &str) -> String {
        let mut label = String::from(self.prefix());
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            label.push('.');
            label.push_str(segment);
        }
        label
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Joins path segments with `/`, ignoring empty segments
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
