//! Namespace normalization and candidate chain construction.
//!
//! A caller's module path, e.g. `holocore::services::chat::command`, is turned
//! into a dot-separated namespace relative to the configuration root
//! (`chat.command`) and then into the ordered list of namespaces searched for
//! configuration (`chat.command`, `chat`).

use config::NamespaceSettings;
use errors::ResolveError;
use std::borrow::Cow;
use std::fmt;

const SEPARATOR: char = '.';

/// Identity of a component asking for configuration.
///
/// Type and instance identities resolve to the module that declares the type,
/// as reported by [`std::any::type_name`]. That name is best effort in the
/// standard library; callers needing a stable path can pass
/// `NamespaceSource::module(module_path!())` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceSource {
    /// A type descriptor.
    Type(&'static str),
    /// The type of a value.
    Instance(&'static str),
    /// An explicit module path, `::` or `.` separated.
    Module(Cow<'static, str>)
}

impl NamespaceSource {
    pub fn of<T: ?Sized>() -> Self {
        NamespaceSource::Type(std::any::type_name::<T>())
    }

    pub fn of_val<T: ?Sized>(value: &T) -> Self {
        NamespaceSource::Instance(std::any::type_name_of_val(value))
    }

    pub fn module(path: impl Into<Cow<'static, str>>) -> Self {
        NamespaceSource::Module(path.into())
    }

    /// The raw module path in dotted form, before any root handling.
    pub fn module_path(&self) -> String {
        match self {
            NamespaceSource::Type(name) | NamespaceSource::Instance(name) => {
                type_module_path(name)
            }
            NamespaceSource::Module(path) => path.replace("::", "."),
        }
    }
}

impl fmt::Display for NamespaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path())
    }
}

/// Module containing a type, from its fully qualified name.
fn type_module_path(type_name: &str) -> String {
    let mut name = type_name.trim_start_matches('&');
    for prefix in ["mut ", "dyn "] {
        name = name.strip_prefix(prefix).unwrap_or(name);
    }
    let name = name.split('<').next().unwrap_or(name);

    match name.rfind("::") {
        Some(idx) => name[..idx].replace("::", "."),
        None => String::new()
    }
}

/// Rules turning a module path into a namespace relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePolicy {
    root_prefix: String,
    forbidden_segment: String,
    organizational_segments: Vec<String>
}

impl Default for NamespacePolicy {
    fn default() -> Self {
        Self::from(&NamespaceSettings::default())
    }
}

impl From<&NamespaceSettings> for NamespacePolicy {
    fn from(settings: &NamespaceSettings) -> Self {
        Self {
            root_prefix: settings.root_prefix.replace("::", "."),
            forbidden_segment: settings.forbidden_segment.clone(),
            organizational_segments: settings.organizational_segments.clone()
        }
    }
}

impl NamespacePolicy {
    #[must_use]
    pub fn with_root_prefix(mut self, root_prefix: impl Into<String>) -> Self {
        self.root_prefix = root_prefix.into().replace("::", ".");
        self
    }

    #[must_use]
    pub fn with_forbidden_segment(mut self, segment: impl Into<String>) -> Self {
        self.forbidden_segment = segment.into();
        self
    }

    #[must_use]
    pub fn with_organizational_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.organizational_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// Normalize a caller into its namespace path.
    ///
    /// The result has no leading or trailing separator. It is empty when the
    /// caller is the root module itself.
    pub fn normalize(&self, source: &NamespaceSource) -> Result<String, ResolveError> {
        self.normalize_path(&source.module_path())
    }

    /// Normalize a raw `::` or `.` separated module path.
    pub fn normalize_path(&self, raw: &str) -> Result<String, ResolveError> {
        let path = raw.replace("::", ".");
        let path = path.trim_matches(SEPARATOR);

        let relative = if path == self.root_prefix {
            ""
        } else {
            path.strip_prefix(self.root_prefix.as_str())
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
                .ok_or_else(|| ResolveError::InvalidNamespace {
                    path: raw.to_string(),
                    root: self.root_prefix.clone()
                })?
        };

        let mut segments: Vec<&str> = relative
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.first() == Some(&self.forbidden_segment.as_str()) {
            return Err(ResolveError::ForbiddenNamespace {
                path: raw.to_string()
            });
        }

        if segments.len() > 1
            && self
                .organizational_segments
                .iter()
                .any(|segment| segment == segments[0])
        {
            segments.remove(0);
        }

        Ok(segments.join("."))
    }
}

/// Candidate namespaces for a normalized path, most specific first.
///
/// `chat.command.say` yields `chat.command.say`, `chat.command`, `chat`. The
/// empty path yields no candidates.
pub fn candidate_chain(path: &str) -> Vec<String> {
    let mut chain = Vec::new();
    if path.is_empty() {
        return chain;
    }

    let mut current = path;
    loop {
        chain.push(current.to_string());
        match current.rfind(SEPARATOR) {
            Some(idx) => current = &current[..idx],
            None => break
        }
    }
    chain
}
