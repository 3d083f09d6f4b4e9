use super::Candidate;
use crate::target::{LegacyCommand, Surface, ToValue};

/// Holds a desired setting and the ordered ways of applying it
///
/// A request is built for one configuration change, consumed by
/// [crate::applier::Applier::apply], and discarded.
pub struct SettingRequest<V> {
    /// Semantic key (e.g., `gravity_vector`, `viscosity.consistency_index`)
    pub key: String,

    /// Value to apply
    pub value: V,

    /// Candidates in priority order
    candidates: Vec<Candidate<V>>,

    /// Last-resort form of the same request
    legacy: Option<LegacyCommand>,

    /// Manual GUI path reported when every form fails
    gui_hint: Option<String>,
}

impl<V> SettingRequest<V> {
    /// Allocates a new request without candidates
    pub fn new(key: &str, value: V) -> Self {
        SettingRequest {
            key: key.to_string(),
            value,
            candidates: Vec::new(),
            legacy: None,
            gui_hint: None,
        }
    }

    /// Appends a candidate
    pub fn candidate(mut self, candidate: Candidate<V>) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Sets the legacy text-command form
    pub fn legacy(mut self, command: LegacyCommand) -> Self {
        self.legacy = Some(command);
        self
    }

    /// Sets the manual GUI path
    pub fn gui_hint(mut self, hint: &str) -> Self {
        self.gui_hint = Some(hint.to_string());
        self
    }

    /// Returns the candidates in priority order
    pub fn candidates(&self) -> &[Candidate<V>] {
        &self.candidates
    }

    /// Returns the legacy text-command form, if known
    pub fn legacy_command(&self) -> Option<&LegacyCommand> {
        self.legacy.as_ref()
    }

    /// Returns the manual GUI path, if known
    pub fn manual_path(&self) -> Option<&str> {
        self.gui_hint.as_deref()
    }
}

impl<V: ToValue> SettingRequest<V> {
    /// Appends a candidate setting a single field
    pub fn field(self, surface: Surface, path: &str) -> Self {
        self.candidate(Candidate::field(surface, path))
    }

    /// Appends one single-field candidate per surface, in the given order
    pub fn field_on(self, surfaces: &[Surface], path: &str) -> Self {
        surfaces.iter().fold(self, |request, surface| request.field(*surface, path))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
