mod object_path;
mod trash_prefix;

pub use object_path::ObjectPath;
pub use trash_prefix::{DEFAULT_TRASH_PREFIX, TrashPrefix};
