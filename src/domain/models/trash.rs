use crate::domain::value_objects::TrashPrefix;

/// Where the trash copy of an object is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashDestination {
    /// Trash container: the configured prefix followed by the source container
    pub container: String,

    /// Object name, identical to the source object name
    pub object: String,
}

impl TrashDestination {
    /// Value for the `Destination` header of a copy request.
    ///
    /// Container and object are joined with a single `/`. The container is
    /// percent-encoded whole, so a `/` in its name cannot move that boundary;
    /// the object is encoded per segment and keeps its own separators.
    pub fn header_value(&self) -> String {
        let object = self
            .object
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", urlencoding::encode(&self.container), object)
    }
}

/// Decides which deletions get a trash copy and where the copy goes
#[derive(Debug, Clone, Default)]
pub struct TrashPolicy {
    prefix: TrashPrefix,
}

impl TrashPolicy {
    pub fn new(prefix: TrashPrefix) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &TrashPrefix {
        &self.prefix
    }

    /// Whether deleting an object from `container` requires a trash copy.
    ///
    /// Containers that already carry the trash prefix are never trashed
    /// again, otherwise emptying a trash container would recurse forever.
    pub fn should_trash(&self, container: &str) -> bool {
        !container.starts_with(self.prefix.as_str())
    }

    /// Compute the trash location for `container`/`object`
    pub fn trash_destination(&self, container: &str, object: &str) -> TrashDestination {
        TrashDestination {
            container: format!("{}{}", self.prefix, container),
            object: object.to_string(),
        }
    }
}
