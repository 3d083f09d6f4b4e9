use crate::applier::first_success;
use crate::target::{join_path, Refusal, Surface, Target, Value};

/// Sets the first field name (among synonyms below `node`) that accepts the value
///
/// Returns the index of the accepted name.
pub fn set_first_synonym(
    target: &mut dyn Target,
    surface: Surface,
    node: &str,
    names: &[&str],
    value: &Value,
) -> Result<usize, Refusal> {
    first_success(names, |name| target.set_field(surface, &join_path(&[node, *name]), value))
        .map(|(index, _)| index)
        .map_err(combine)
}

/// Sets a text field to the first accepted option (among synonyms of the same option)
///
/// Returns the index of the accepted option.
pub fn set_first_choice(
    target: &mut dyn Target,
    surface: Surface,
    path: &str,
    choices: &[&str],
) -> Result<usize, Refusal> {
    first_success(choices, |choice| target.set_field(surface, path, &Value::text(choice)))
        .map(|(index, _)| index)
        .map_err(combine)
}

/// Merges the refusals of a list of synonyms into one
///
/// A rejection takes precedence over unavailability because it proves that the access path
/// exists. The message of the last refusal of the chosen kind is kept.
pub fn combine(refusals: Vec<Refusal>) -> Refusal {
    let last_rejected = refusals.iter().rev().find(|r| !r.is_unavailable());
    match (last_rejected, refusals.last()) {
        (Some(r), _) => r.clone(),
        (None, Some(r)) => r.clone(),
        (None, None) => Refusal::unavailable("no synonym to try"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
