use crate::target::{Refusal, Surface, Target, ToValue};

/// Defines a function that attempts one specific access path on a target
pub type Setter<V> = Box<dyn Fn(&mut dyn Target, &V) -> Result<(), Refusal>>;

/// Holds one access path to try when applying a setting
pub struct Candidate<V> {
    /// Name reported when this candidate succeeds (e.g., `solver.settings.setup.models.energy.enabled`)
    label: String,

    /// Attempts the access path
    setter: Setter<V>,
}

impl<V> Candidate<V> {
    /// Allocates a new candidate from an arbitrary setter
    pub fn new<F>(label: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut dyn Target, &V) -> Result<(), Refusal> + 'static,
    {
        Candidate {
            label: label.into(),
            setter: Box::new(setter),
        }
    }

    /// Returns the label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Attempts to apply the value through this access path
    pub fn attempt(&self, target: &mut dyn Target, value: &V) -> Result<(), Refusal> {
        (self.setter)(target, value)
    }
}

impl<V: ToValue> Candidate<V> {
    /// Allocates a candidate that sets a single field of a surface
    pub fn field(surface: Surface, path: &str) -> Self {
        let path = path.to_string();
        Candidate {
            label: surface.label(&path),
            setter: Box::new(move |target: &mut dyn Target, value: &V| {
                target.set_field(surface, &path, &value.to_value())
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Candidate;
    use crate::samples::Samples;
    use crate::target::{Refusal, SimulatedTarget, Surface, Target, Value};
    use crate::StrError;

    #[test]
    fn field_candidate_works() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let candidate: Candidate<bool> = Candidate::field(Surface::Settings, "setup/models/energy/enabled");
        assert_eq!(candidate.label(), "solver.settings.setup.models.energy.enabled");
        candidate.attempt(&mut target, &true).unwrap();
        assert_eq!(
            target.field(Surface::Settings, "setup/models/energy/enabled"),
            Some(&Value::Bool(true))
        );
        Ok(())
    }

    #[test]
    fn custom_candidate_works() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let candidate = Candidate::new("always refuses", |_: &mut dyn Target, v: &f64| {
            Err(Refusal::rejected(format!("{} is not accepted", v)))
        });
        assert_eq!(
            candidate.attempt(&mut target, &1.5),
            Err(Refusal::rejected("1.5 is not accepted"))
        );
        Ok(())
    }
}
