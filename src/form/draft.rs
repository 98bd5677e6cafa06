use crate::error::ValidationError;
use crate::models::{Course, CoursePayload, Difficulty};

/// Editable text form of a course.
///
/// Numbers stay as typed and lists stay as newline-joined text until
/// `from_draft` runs at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub price: String,
    pub thumbnail: String,
    pub curriculum: String,
    pub requirements: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Description,
    Instructor,
    Category,
    Duration,
    Price,
    Thumbnail,
    Curriculum,
    Requirements,
}

impl DraftField {
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Instructor => "instructor",
            DraftField::Category => "category",
            DraftField::Duration => "duration",
            DraftField::Price => "price",
            DraftField::Thumbnail => "thumbnail",
            DraftField::Curriculum => "curriculum",
            DraftField::Requirements => "requirements",
        }
    }
}

impl CourseDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::Instructor => &self.instructor,
            DraftField::Category => &self.category,
            DraftField::Duration => &self.duration,
            DraftField::Price => &self.price,
            DraftField::Thumbnail => &self.thumbnail,
            DraftField::Curriculum => &self.curriculum,
            DraftField::Requirements => &self.requirements,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::Instructor => self.instructor = value,
            DraftField::Category => self.category = value,
            DraftField::Duration => self.duration = value,
            DraftField::Price => self.price = value,
            DraftField::Thumbnail => self.thumbnail = value,
            DraftField::Curriculum => self.curriculum = value,
            DraftField::Requirements => self.requirements = value,
        }
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        to_draft(course)
    }
}

pub fn to_draft(course: &Course) -> CourseDraft {
    CourseDraft {
        title: course.title.clone(),
        description: course.description.clone(),
        instructor: course.instructor.clone(),
        category: course.category.clone(),
        difficulty: course.difficulty,
        duration: course.duration.to_string(),
        price: course.price.to_string(),
        thumbnail: course.thumbnail.clone().unwrap_or_default(),
        curriculum: course.curriculum.join("\n"),
        requirements: course.requirements.join("\n"),
    }
}

/// Parse a draft into a write payload.
///
/// Numeric fields are checked first so a malformed number is reported even
/// when other fields are still blank.
pub fn from_draft(draft: &CourseDraft) -> Result<CoursePayload, ValidationError> {
    let duration = parse_duration(&draft.duration)?;
    let price = parse_price(&draft.price)?;

    let title = required(DraftField::Title, &draft.title)?;
    let description = required(DraftField::Description, &draft.description)?;
    let instructor = required(DraftField::Instructor, &draft.instructor)?;
    let category = required(DraftField::Category, &draft.category)?;

    let thumbnail = Some(draft.thumbnail.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(CoursePayload {
        title,
        description,
        instructor,
        category,
        difficulty: draft.difficulty,
        duration,
        price,
        thumbnail,
        curriculum: split_lines(&draft.curriculum),
        requirements: split_lines(&draft.requirements),
    })
}

fn required(field: DraftField, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field.name(), ValidationError::REQUIRED));
    }
    Ok(value.to_string())
}

fn parse_duration(raw: &str) -> Result<i64, ValidationError> {
    let field = DraftField::Duration.name();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::new(field, ValidationError::REQUIRED));
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::new(field, ValidationError::NOT_A_NUMBER))
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let field = DraftField::Price.name();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::new(field, ValidationError::REQUIRED));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or(ValidationError::new(field, ValidationError::NOT_A_NUMBER))
}

/// One entry per non-blank line, trimmed, in order. Duplicates are kept.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
