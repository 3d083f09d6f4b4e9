/// Tries each item in order and stops at the first success
///
/// Returns the index of the successful item together with its result, or, if every item
/// fails, all errors in the order they occurred. An empty list yields `Err(vec![])`.
///
/// ```
/// use cfdsetup::applier::first_success;
/// let names = ["gravity_vector", "g_vector", "gravity_components"];
/// let res = first_success(names, |n| if n == "g_vector" { Ok(n.len()) } else { Err(n) });
/// assert_eq!(res, Ok((1, 8)));
/// ```
pub fn first_success<I, T, R, E, F>(items: I, mut attempt: F) -> Result<(usize, R), Vec<E>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Result<R, E>,
{
    let mut errors = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match attempt(item) {
            Ok(result) => return Ok((index, result)),
            Err(e) => errors.push(e),
        }
    }
    Err(errors)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
