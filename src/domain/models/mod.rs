pub mod trash;

pub use trash::{TrashDestination, TrashPolicy};
