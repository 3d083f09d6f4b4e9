use super::{Surface, Value, ValueKind};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Describes a settable field of a control surface
///
/// A `*` segment in the path matches any object name (e.g., a material).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldSpec {
    /// Control surface holding the field
    pub surface: Surface,

    /// Path pattern of the field
    pub path: String,

    /// Kind of value accepted by the field
    pub kind: ValueKind,

    /// Allowed text values (empty means any)
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Describes a container of named objects (e.g., the fluid materials)
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContainerSpec {
    /// Control surface holding the container
    pub surface: Surface,

    /// Path of the container
    pub path: String,

    /// Names of the objects initially held
    #[serde(default)]
    pub children: Vec<String>,

    /// Methods that may be invoked on the container
    #[serde(default)]
    pub methods: Vec<String>,
}

/// Holds the initial value of a field
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InitialValue {
    /// Control surface holding the field
    pub surface: Surface,

    /// Concrete path of the field (no `*` segments)
    pub path: String,

    /// Value
    pub value: Value,
}

/// Describes a command accepted by the legacy text interface
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CommandSpec {
    /// Menu path of the command
    pub path: String,

    /// Minimum number of positional arguments
    #[serde(default)]
    pub min_args: usize,
}

/// Describes the API shape exposed by one installed version of the solver
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SurfaceProfile {
    /// Name of the profile (e.g., the product version)
    pub name: String,

    /// Settable fields
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Containers of named objects and methods callable on objects
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,

    /// Initial field values
    #[serde(default)]
    pub values: Vec<InitialValue>,

    /// Legacy text commands
    #[serde(default)]
    pub commands: Vec<CommandSpec>,

    /// Number of successful health checks before the session closes (None means never)
    #[serde(default)]
    pub lifetime: Option<usize>,
}

impl SurfaceProfile {
    /// Allocates a new empty profile
    pub fn new(name: &str) -> Self {
        SurfaceProfile {
            name: name.to_string(),
            fields: Vec::new(),
            containers: Vec::new(),
            values: Vec::new(),
            commands: Vec::new(),
            lifetime: None,
        }
    }

    /// Adds a field
    pub fn field(&mut self, surface: Surface, path: &str, kind: ValueKind) -> &mut Self {
        self.fields.push(FieldSpec {
            surface,
            path: path.to_string(),
            kind,
            choices: Vec::new(),
        });
        self
    }

    /// Adds a text field restricted to the given choices
    pub fn field_choices(&mut self, surface: Surface, path: &str, choices: &[&str]) -> &mut Self {
        self.fields.push(FieldSpec {
            surface,
            path: path.to_string(),
            kind: ValueKind::Text,
            choices: choices.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// Adds a container
    pub fn container(&mut self, surface: Surface, path: &str, children: &[&str], methods: &[&str]) -> &mut Self {
        self.containers.push(ContainerSpec {
            surface,
            path: path.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    /// Adds an initial value
    pub fn value(&mut self, surface: Surface, path: &str, value: Value) -> &mut Self {
        self.values.push(InitialValue {
            surface,
            path: path.to_string(),
            value,
        });
        self
    }

    /// Adds a legacy command
    pub fn command(&mut self, path: &str, min_args: usize) -> &mut Self {
        self.commands.push(CommandSpec {
            path: path.to_string(),
            min_args,
        });
        self
    }

    /// Sets the number of successful health checks before the session closes
    pub fn lifetime(&mut self, checks: Option<usize>) -> &mut Self {
        self.lifetime = checks;
        self
    }

    /// Finds the field spec matching a concrete path
    pub fn find_field(&self, surface: Surface, path: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.surface == surface && path_matches(&f.path, path))
    }

    /// Finds the container at a concrete path
    pub fn find_container(&self, surface: Surface, path: &str) -> Option<&ContainerSpec> {
        self.containers.iter().find(|c| c.surface == surface && c.path == path)
    }

    /// Finds a legacy command
    pub fn find_command(&self, path: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.path == path)
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("profile name must not be empty".to_string());
        }
        for f in &self.fields {
            if f.path.is_empty() || f.path.split('/').any(|s| s.is_empty()) {
                return Some(format!("field path {:?} is incorrect; it must not contain empty segments", f.path));
            }
            if !f.choices.is_empty() && f.kind != ValueKind::Text {
                return Some(format!("field {:?} has choices but its kind is {:?}", f.path, f.kind));
            }
        }
        for c in &self.containers {
            if c.path.is_empty() {
                return Some("container path must not be empty".to_string());
            }
        }
        for v in &self.values {
            if v.path.contains('*') {
                return Some(format!("initial value path {:?} must not contain '*'", v.path));
            }
        }
        for c in &self.commands {
            if !c.path.starts_with('/') {
                return Some(format!("command path {:?} is incorrect; it must start with '/'", c.path));
            }
        }
        None // all good
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open profile file")?;
        let buffered = BufReader::new(file);
        let profile: SurfaceProfile = serde_json::from_reader(buffered).map_err(|_| "cannot parse profile file")?;
        if profile.validate().is_some() {
            return Err("profile file contains inconsistent data");
        }
        Ok(profile)
    }

    /// Writes a JSON file with this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

/// Checks whether a concrete path matches a pattern with `*` segments
pub(crate) fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut seg = path.split('/');
    loop {
        match (pat.next(), seg.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) => {
                if p != "*" && p != s {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{path_matches, SurfaceProfile};
    use crate::base::DEFAULT_TEST_DIR;
    use crate::target::{Surface, Value, ValueKind};
    use crate::StrError;

    #[test]
    fn path_matches_works() {
        assert!(path_matches("setup/materials/fluid/*/density/value", "setup/materials/fluid/carbopol/density/value"));
        assert!(!path_matches("setup/materials/fluid/*/density/value", "setup/materials/fluid/carbopol/density"));
        assert!(!path_matches("setup/models/energy/enabled", "setup/models/energy"));
        assert!(path_matches("a/b", "a/b"));
    }

    #[test]
    fn find_works() {
        let mut profile = SurfaceProfile::new("test");
        profile
            .field(Surface::Root, "setup/models/energy/enabled", ValueKind::Bool)
            .field_choices(Surface::Settings, "setup/models/viscous/model", &["laminar", "k-epsilon"])
            .container(Surface::Root, "setup/materials/fluid", &["air"], &["create"])
            .command("/display/mesh", 0);
        assert!(profile.find_field(Surface::Root, "setup/models/energy/enabled").is_some());
        assert!(profile.find_field(Surface::Settings, "setup/models/energy/enabled").is_none());
        let spec = profile.find_field(Surface::Settings, "setup/models/viscous/model").unwrap();
        assert_eq!(spec.choices, &["laminar", "k-epsilon"]);
        assert_eq!(profile.find_container(Surface::Root, "setup/materials/fluid").unwrap().children, &["air"]);
        assert!(profile.find_command("/display/mesh").is_some());
        assert!(profile.find_command("/display/grid").is_none());
    }

    #[test]
    fn validate_works() {
        let mut profile = SurfaceProfile::new("");
        assert_eq!(profile.validate(), Some("profile name must not be empty".to_string()));
        profile.name = "v1".to_string();
        assert_eq!(profile.validate(), None);

        profile.field(Surface::Root, "setup//gravity", ValueKind::Bool);
        assert_eq!(
            profile.validate(),
            Some("field path \"setup//gravity\" is incorrect; it must not contain empty segments".to_string())
        );
        profile.fields.clear();

        profile.commands.clear();
        profile.command("file/read-case", 1);
        assert_eq!(
            profile.validate(),
            Some("command path \"file/read-case\" is incorrect; it must start with '/'".to_string())
        );
        profile.commands.clear();

        profile.value(Surface::Root, "setup/materials/fluid/*/density/value", Value::Real(1.0));
        assert_eq!(
            profile.validate(),
            Some("initial value path \"setup/materials/fluid/*/density/value\" must not contain '*'".to_string())
        );
    }

    #[test]
    fn read_write_json_work() -> Result<(), StrError> {
        let mut profile = SurfaceProfile::new("json");
        profile
            .field(Surface::Settings, "setup/general/solver/time", ValueKind::Text)
            .value(Surface::Settings, "setup/general/solver/time", Value::text("steady"))
            .command("/file/read-case", 1)
            .lifetime(Some(3));
        let path = format!("{}/profile-json.json", DEFAULT_TEST_DIR);
        profile.write_json(&path)?;
        let read = SurfaceProfile::read_json(&path)?;
        assert_eq!(read.name, "json");
        assert_eq!(read.fields.len(), 1);
        assert_eq!(read.values[0].value, Value::text("steady"));
        assert_eq!(read.commands[0].min_args, 1);
        assert_eq!(read.lifetime, Some(3));
        assert_eq!(SurfaceProfile::read_json("/tmp/cfdsetup/not-found.json").err(), Some("cannot open profile file"));
        Ok(())
    }
}
