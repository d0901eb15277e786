pub mod copy;
pub mod undelete;

pub use copy::{CopyContext, CopyOutcome, DESTINATION};
pub use undelete::{
    CopyDisposition, TRASH_COPY_ERROR_PREFIX, UndeleteLayer, UndeleteMiddleware,
    handle_undelete_error,
};
