use super::{FieldSpec, LegacyCommand, Refusal, Surface, SurfaceProfile, Target, Value, ValueKind};
use crate::StrError;
use std::collections::BTreeMap;

/// Implements a solver session that obeys a [SurfaceProfile]
///
/// Accepted writes are stored, so later reads see them; accepted legacy commands and method
/// calls are appended to a journal. The session is used for dry runs (planning which access
/// path a given installed version accepts) and in tests.
pub struct SimulatedTarget {
    /// Holds the API shape
    profile: SurfaceProfile,

    /// Holds the current field values
    fields: BTreeMap<(Surface, String), Value>,

    /// Holds the objects of each container
    children: BTreeMap<(Surface, String), Vec<String>>,

    /// Holds accepted commands and method calls, in order
    journal: Vec<String>,

    /// Counts the writes that changed a stored value
    changes: usize,

    /// Counts the health checks performed
    health_checks: usize,

    /// Holds the number of successful health checks left (None means unlimited)
    remaining: Option<usize>,
}

impl SimulatedTarget {
    /// Allocates a new instance
    pub fn new(profile: SurfaceProfile) -> Result<Self, StrError> {
        if profile.validate().is_some() {
            return Err("cannot allocate simulated target because profile.validate() failed");
        }
        let mut fields = BTreeMap::new();
        for v in &profile.values {
            fields.insert((v.surface, v.path.clone()), v.value.clone());
        }
        let mut children = BTreeMap::new();
        for c in &profile.containers {
            children.insert((c.surface, c.path.clone()), c.children.clone());
        }
        let remaining = profile.lifetime;
        Ok(SimulatedTarget {
            profile,
            fields,
            children,
            journal: Vec::new(),
            changes: 0,
            health_checks: 0,
            remaining,
        })
    }

    /// Returns the name of the underlying profile
    pub fn profile_name(&self) -> &str {
        &self.profile.name
    }

    /// Returns the stored value of a field, if any
    pub fn field(&self, surface: Surface, path: &str) -> Option<&Value> {
        self.fields.get(&(surface, path.to_string()))
    }

    /// Returns a copy of all stored field values
    pub fn snapshot(&self) -> BTreeMap<(Surface, String), Value> {
        self.fields.clone()
    }

    /// Returns the accepted commands and method calls
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    /// Returns the number of writes that changed a stored value
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Returns the number of health checks performed so far
    pub fn health_checks(&self) -> usize {
        self.health_checks
    }

    /// Makes every further health check fail
    pub fn close(&mut self) {
        self.remaining = Some(0);
    }

    /// Checks that every `*` segment of the spec names an existing object
    fn check_objects(&self, spec: &FieldSpec, path: &str) -> Result<(), Refusal> {
        let segments: Vec<&str> = path.split('/').collect();
        for (i, pattern) in spec.path.split('/').enumerate() {
            if pattern != "*" {
                continue;
            }
            let container = segments[..i].join("/");
            let name = segments[i];
            match self.children.get(&(spec.surface, container.clone())) {
                Some(names) => {
                    if !names.iter().any(|n| n == name) {
                        return Err(Refusal::unavailable(format!(
                            "{} has no object named {:?}",
                            spec.surface.label(&container),
                            name
                        )));
                    }
                }
                None => {
                    return Err(Refusal::unavailable(format!(
                        "{} does not exist",
                        spec.surface.label(&container)
                    )))
                }
            }
        }
        Ok(())
    }

    /// Copies an object and every stored field below it
    fn copy_object(&mut self, surface: Surface, container: &str, from: &str, to: &str) {
        let prefix = format!("{}/{}/", container, from);
        let copies: Vec<_> = self
            .fields
            .iter()
            .filter(|((s, p), _)| *s == surface && p.starts_with(&prefix))
            .map(|((_, p), v)| (format!("{}/{}/{}", container, to, &p[prefix.len()..]), v.clone()))
            .collect();
        for (path, value) in copies {
            self.fields.insert((surface, path), value);
        }
    }
}

/// Extracts the text arguments of a method call
fn text_args<'a>(args: &'a [Value], count: usize, method: &str) -> Result<Vec<&'a str>, Refusal> {
    let texts: Vec<&str> = args.iter().filter_map(|a| a.as_str()).collect();
    if args.len() != count || texts.len() != count {
        return Err(Refusal::rejected(format!("{} expects {} text argument(s)", method, count)));
    }
    Ok(texts)
}

impl Target for SimulatedTarget {
    fn set_field(&mut self, surface: Surface, path: &str, value: &Value) -> Result<(), Refusal> {
        let label = surface.label(path);
        let spec = match self.profile.find_field(surface, path) {
            Some(s) => s.clone(),
            None => return Err(Refusal::unavailable(format!("{} does not exist", label))),
        };
        self.check_objects(&spec, path)?;
        if !value.fits(spec.kind) {
            return Err(Refusal::rejected(format!(
                "{} expects {:?} but got {:?}",
                label,
                spec.kind,
                value.kind()
            )));
        }
        if !spec.choices.is_empty() {
            let text = value.as_str().unwrap_or_default();
            if !spec.choices.iter().any(|c| c == text) {
                return Err(Refusal::rejected(format!("{:?} is not a valid option for {}", text, label)));
            }
        }
        let stored = match (value, spec.kind) {
            (Value::Int(v), ValueKind::Real) => Value::Real(*v as f64),
            _ => value.clone(),
        };
        let key = (surface, path.to_string());
        if self.fields.get(&key) != Some(&stored) {
            self.fields.insert(key, stored);
            self.changes += 1;
        }
        Ok(())
    }

    fn get_field(&self, surface: Surface, path: &str) -> Result<Value, Refusal> {
        if let Some(spec) = self.profile.find_field(surface, path) {
            self.check_objects(spec, path)?;
        }
        match self.fields.get(&(surface, path.to_string())) {
            Some(v) => Ok(v.clone()),
            None => Err(Refusal::unavailable(format!("{} does not exist", surface.label(path)))),
        }
    }

    fn list_children(&self, surface: Surface, path: &str) -> Result<Vec<String>, Refusal> {
        match self.children.get(&(surface, path.to_string())) {
            Some(names) => Ok(names.clone()),
            None => Err(Refusal::unavailable(format!("{} does not exist", surface.label(path)))),
        }
    }

    fn invoke(&mut self, surface: Surface, path: &str, method: &str, args: &[Value]) -> Result<(), Refusal> {
        let label = surface.label(path);
        let spec = match self.profile.find_container(surface, path) {
            Some(c) => c,
            None => return Err(Refusal::unavailable(format!("{} does not exist", label))),
        };
        if !spec.methods.iter().any(|m| m == method) {
            return Err(Refusal::unavailable(format!("{} has no method {}", label, method)));
        }
        let key = (surface, path.to_string());
        match method {
            "copy" => {
                let names = text_args(args, 2, method)?;
                let (from, to) = (names[0], names[1]);
                let existing = self.children.get(&key).cloned().unwrap_or_default();
                if !existing.iter().any(|n| n == from) {
                    return Err(Refusal::rejected(format!("{} has no object named {:?}", label, from)));
                }
                if existing.iter().any(|n| n == to) {
                    return Err(Refusal::rejected(format!("{} already holds {:?}", label, to)));
                }
                self.children.entry(key).or_default().push(to.to_string());
                self.copy_object(surface, path, from, to);
            }
            "create" => {
                let names = text_args(args, 1, method)?;
                let entry = self.children.entry(key).or_default();
                if entry.iter().any(|n| n == names[0]) {
                    return Err(Refusal::rejected(format!("{} already holds {:?}", label, names[0])));
                }
                entry.push(names[0].to_string());
            }
            _ => (),
        }
        let args: Vec<String> = args.iter().map(|a| format!("{}", a)).collect();
        self.journal.push(format!("{}.{}({})", label, method, args.join(", ")));
        Ok(())
    }

    fn run_command(&mut self, command: &LegacyCommand) -> Result<(), Refusal> {
        let spec = match self.profile.find_command(&command.path) {
            Some(c) => c,
            None => return Err(Refusal::unavailable(format!("unknown command {}", command.path))),
        };
        if command.args.len() < spec.min_args {
            return Err(Refusal::rejected(format!(
                "{} expects at least {} argument(s) but got {}",
                command.path,
                spec.min_args,
                command.args.len()
            )));
        }
        self.journal.push(format!("{}", command));
        Ok(())
    }

    fn check_health(&mut self) -> Result<(), StrError> {
        self.health_checks += 1;
        match self.remaining {
            Some(0) => Err("solver session is no longer reachable"),
            Some(n) => {
                self.remaining = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
