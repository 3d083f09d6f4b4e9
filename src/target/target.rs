use super::{LegacyCommand, Refusal, Surface, Value};
use crate::StrError;

/// Defines the handle to a live solver session
///
/// A session exposes several control surfaces whose shape depends on the installed version.
/// Every call either succeeds or returns a [Refusal]; implementations must not panic on
/// unknown paths.
///
/// Paths are `/`-separated and relative to the surface root, e.g., `setup/models/energy/enabled`.
pub trait Target {
    /// Sets the field at `path` of `surface` to `value`
    fn set_field(&mut self, surface: Surface, path: &str, value: &Value) -> Result<(), Refusal>;

    /// Reads the field at `path` of `surface`
    fn get_field(&self, surface: Surface, path: &str) -> Result<Value, Refusal>;

    /// Lists the names of the objects held by the container at `path` of `surface`
    fn list_children(&self, surface: Surface, path: &str) -> Result<Vec<String>, Refusal>;

    /// Calls `method` on the object at `path` of `surface`
    fn invoke(&mut self, surface: Surface, path: &str, method: &str, args: &[Value]) -> Result<(), Refusal>;

    /// Issues a command through the legacy text interface
    fn run_command(&mut self, command: &LegacyCommand) -> Result<(), Refusal>;

    /// Checks whether the session is still reachable
    fn check_health(&mut self) -> Result<(), StrError>;
}
