pub mod dialog;
pub mod draft;

pub use dialog::{DialogMode, DialogState, EditDialog, LoadTicket, SubmitTicket};
pub use draft::{CourseDraft, DraftField, from_draft, to_draft};
