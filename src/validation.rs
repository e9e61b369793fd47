use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{MessageRequest, StudentInfo};

pub const NAME_MAX_CHARS: usize = 100;
pub const SCORES_MAX_LEN: usize = 50;

lazy_static! {
    /// Letters, whitespace, hyphen and period, end to end.
    static ref NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z\s\-.]+$").unwrap();

    /// Characters that could open markup or break out of an attribute.
    static ref DANGEROUS_CHARS: Regex = Regex::new(r#"[<>"']"#).unwrap();
}

/// Validates and trims a person's name.
///
/// `field` is the label used in error reasons, e.g. "Name" or "Student name".
/// The dangerous-character check runs on its own, ahead of the allow-list,
/// so that markup attempts are reported as such even if the allow-list is
/// ever widened.
pub fn validate_name(field: &str, raw: &str) -> Result<String, ApiError> {
    let length = raw.chars().count();
    if length == 0 || length > NAME_MAX_CHARS {
        return Err(ApiError::validation(format!(
            "{field} must be between 1 and {NAME_MAX_CHARS} characters"
        )));
    }

    let stripped = DANGEROUS_CHARS.replace_all(raw, "");
    if stripped.len() != raw.len() {
        return Err(ApiError::validation(format!(
            "{field} contains potentially dangerous characters"
        )));
    }

    if !NAME_REGEX.is_match(raw) {
        return Err(ApiError::validation(format!(
            "{field} contains invalid characters"
        )));
    }

    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} must not be blank")));
    }

    Ok(trimmed.to_string())
}

pub fn validate_scores(scores: Vec<f64>) -> Result<Vec<f64>, ApiError> {
    if scores.is_empty() || scores.len() > SCORES_MAX_LEN {
        return Err(ApiError::validation(format!(
            "Scores must contain between 1 and {SCORES_MAX_LEN} entries"
        )));
    }

    if scores.iter().any(|score| !(0.0..=100.0).contains(score)) {
        return Err(ApiError::validation("Scores must be between 0 and 100"));
    }

    Ok(scores)
}

pub fn validate_attendance(value: f64) -> Result<f64, ApiError> {
    if !unit_interval(value) {
        return Err(ApiError::validation(
            "Attendance must be between 0.0 and 1.0",
        ));
    }
    Ok(value)
}

pub fn validate_risk_score(value: f64) -> Result<f64, ApiError> {
    if !unit_interval(value) {
        return Err(ApiError::validation(
            "Risk score must be between 0.0 and 1.0",
        ));
    }
    Ok(value)
}

/// Closed [0, 1]; NaN never satisfies a range check.
pub fn unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

pub fn validate_student(student: StudentInfo) -> Result<StudentInfo, ApiError> {
    let name = validate_name("Name", &student.name)?;
    let attendance = validate_attendance(student.attendance)?;
    let scores = validate_scores(student.scores)?;

    Ok(StudentInfo {
        name,
        attendance,
        scores,
    })
}

pub fn validate_message_request(request: MessageRequest) -> Result<MessageRequest, ApiError> {
    let student_name = validate_name("Student name", &request.student_name)?;
    let risk_score = validate_risk_score(request.risk_score)?;

    Ok(MessageRequest {
        student_name,
        risk_score,
    })
}
