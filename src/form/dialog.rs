use tracing::debug;

use crate::api::CourseApi;
use crate::error::{DialogError, FetchError, ValidationError, WriteError};
use crate::form::draft::CourseDraft;
use crate::models::{Course, CourseId};
use crate::sync::MutationPipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(CourseId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    OpenCreate,
    OpenEdit(CourseId),
    Submitting(DialogMode),
}

impl DialogState {
    fn open(mode: DialogMode) -> Self {
        match mode {
            DialogMode::Create => DialogState::OpenCreate,
            DialogMode::Edit(id) => DialogState::OpenEdit(id),
        }
    }
}

/// Handle for an edit-mode load started by [`EditDialog::open_edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: CourseId,
    generation: u64,
}

impl LoadTicket {
    pub async fn fetch(&self, api: &dyn CourseApi) -> Result<Course, FetchError> {
        api.get_course(self.id).await
    }
}

/// A submit in flight. Carries its own copy of the draft.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub mode: DialogMode,
    pub draft: CourseDraft,
    generation: u64,
}

impl SubmitTicket {
    pub async fn run(&self, pipeline: &MutationPipeline) -> Result<Course, WriteError> {
        match self.mode {
            DialogMode::Create => pipeline.create(&self.draft).await,
            DialogMode::Edit(id) => pipeline.update(id, &self.draft).await,
        }
    }
}

/// Add/edit course dialog.
///
/// ```text
/// Closed -> OpenCreate            (empty draft)
/// Closed -> OpenEdit(id)          (draft filled when the course arrives)
/// Open*  -> Submitting -> Closed  (write succeeded)
///                      -> Open*   (write failed, draft kept, error set)
/// ```
///
/// Loads and submits are split into a ticket and a completion call so the
/// dialog can keep taking input while the request is out. Completions whose
/// ticket belongs to an earlier opening are ignored.
#[derive(Debug, Clone)]
pub struct EditDialog {
    state: DialogState,
    draft: CourseDraft,
    loaded: bool,
    error: Option<String>,
    field_error: Option<ValidationError>,
    generation: u64,
}

impl Default for EditDialog {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
            draft: CourseDraft::default(),
            loaded: false,
            error: None,
            field_error: None,
            generation: 0,
        }
    }
}

impl EditDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    /// Mutable draft for field edits. `None` unless the dialog is open and idle.
    pub fn draft_mut(&mut self) -> Option<&mut CourseDraft> {
        match self.state {
            DialogState::OpenCreate | DialogState::OpenEdit(_) => Some(&mut self.draft),
            _ => None,
        }
    }

    /// False while an edit-mode dialog is still waiting for its course.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_error(&self) -> Option<&ValidationError> {
        self.field_error.as_ref()
    }

    pub fn open_create(&mut self) {
        self.reset(DialogState::OpenCreate);
        self.loaded = true;
    }

    /// Opens immediately with an empty draft; the caller fetches with the
    /// returned ticket and hands the result to [`EditDialog::populate`].
    pub fn open_edit(&mut self, id: CourseId) -> LoadTicket {
        self.reset(DialogState::OpenEdit(id));
        LoadTicket {
            id,
            generation: self.generation,
        }
    }

    /// Fill the draft from a fetched course. Returns false if the ticket is stale.
    pub fn populate(&mut self, ticket: LoadTicket, result: Result<Course, FetchError>) -> bool {
        if ticket.generation != self.generation || self.state != DialogState::OpenEdit(ticket.id) {
            debug!("Ignoring stale load for course {}", ticket.id);
            return false;
        }
        match result {
            Ok(course) => {
                self.draft = CourseDraft::from(&course);
                self.loaded = true;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("Failed to load course: {}", err));
            }
        }
        true
    }

    pub fn cancel(&mut self) {
        self.reset(DialogState::Closed);
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, DialogError> {
        let mode = match self.state {
            DialogState::OpenCreate => DialogMode::Create,
            DialogState::OpenEdit(id) => DialogMode::Edit(id),
            DialogState::Submitting(_) => return Err(DialogError::AlreadySubmitting),
            DialogState::Closed => return Err(DialogError::NotOpen),
        };
        self.state = DialogState::Submitting(mode);
        self.error = None;
        self.field_error = None;
        Ok(SubmitTicket {
            mode,
            draft: self.draft.clone(),
            generation: self.generation,
        })
    }

    /// Close on success; on failure reopen with the draft untouched and the
    /// error recorded. The write result is passed back either way.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Course, WriteError>,
    ) -> Result<Course, WriteError> {
        if ticket.generation != self.generation || self.state != DialogState::Submitting(ticket.mode) {
            debug!("Ignoring completion of an abandoned submit");
            return result;
        }
        match &result {
            Ok(_) => self.reset(DialogState::Closed),
            Err(err) => {
                self.state = DialogState::open(ticket.mode);
                self.error = Some(err.user_message());
                if let WriteError::Validation(field_error) = err {
                    self.field_error = Some(field_error.clone());
                }
            }
        }
        result
    }

    /// `begin_submit`, run the write, `finish_submit`.
    pub async fn submit(&mut self, pipeline: &MutationPipeline) -> Result<Course, DialogError> {
        let ticket = self.begin_submit()?;
        let result = ticket.run(pipeline).await;
        Ok(self.finish_submit(ticket, result)?)
    }

    fn reset(&mut self, state: DialogState) {
        self.generation += 1;
        self.state = state;
        self.draft = CourseDraft::default();
        self.loaded = false;
        self.error = None;
        self.field_error = None;
    }
}
