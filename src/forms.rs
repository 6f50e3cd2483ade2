//! Form Validation
//!
//! Each form is a plain struct of raw input values. Components keep one in
//! a signal, render per-field errors from it, and gate the submit button
//! on [`can_submit`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::parse_input_date;
use crate::models::{
    CreateProjectRequest, LoginCredentials, Priority, ProfileUpdate, Project, ProjectStatus,
    RegisterData, Task, TaskPayload, TaskStatus, UpdateProjectRequest, User,
};

pub const USERNAME_MIN_LEN: usize = 3;
pub const PROJECT_NAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_SPECIALS: &str = "@$!%*#?&";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    TooShort(usize),
    PasswordPattern,
    Mismatch,
    EndBeforeStart,
    TermsNotAccepted,
}

impl FieldError {
    /// Message shown under the field labelled `label`
    pub fn message(&self, label: &str) -> String {
        match self {
            FieldError::Required => format!("{} is required", label),
            FieldError::InvalidEmail => "Please enter a valid email address".to_string(),
            FieldError::TooShort(n) => format!("{} must be at least {} characters", label, n),
            FieldError::PasswordPattern => format!(
                "Password must contain at least one letter, one number and one special character ({})",
                PASSWORD_SPECIALS
            ),
            FieldError::Mismatch => "Passwords do not match".to_string(),
            FieldError::EndBeforeStart => "End date must be after start date".to_string(),
            FieldError::TermsNotAccepted => "You must accept the terms and conditions".to_string(),
        }
    }
}

/// Submit is allowed only for a valid form with no request in flight
pub fn can_submit(valid: bool, submitting: bool) -> bool {
    valid && !submitting
}

/// Empty input becomes `None`, anything else is trimmed
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ========================
// Field rules
// ========================

pub fn required(value: &str) -> Option<FieldError> {
    value.trim().is_empty().then_some(FieldError::Required)
}

pub fn min_len(value: &str, min: usize) -> Option<FieldError> {
    required(value).or_else(|| (value.chars().count() < min).then_some(FieldError::TooShort(min)))
}

pub fn email(value: &str) -> Option<FieldError> {
    required(value).or_else(|| (!is_valid_email(value.trim())).then_some(FieldError::InvalidEmail))
}

/// Dot-atom local part, hostname-shaped domain labels
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});
static PASSWORD_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d@$!%*#?&]{8,}$").expect("valid password charset regex"));
static LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").expect("valid letter regex"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@$!%*#?&]").expect("valid special regex"));

pub fn is_valid_email(value: &str) -> bool {
    let local_len = value.split_once('@').map_or(0, |(local, _)| local.len());
    value.len() <= 254 && local_len <= 64 && EMAIL_RE.is_match(value)
}

/// At least 8 characters from letters, digits and `@$!%*#?&`, with one of each kind
pub fn is_strong_password(value: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(value)
        && LETTER_RE.is_match(value)
        && DIGIT_RE.is_match(value)
        && SPECIAL_RE.is_match(value)
}

fn new_password(value: &str) -> Option<FieldError> {
    min_len(value, PASSWORD_MIN_LEN).or_else(|| (!is_strong_password(value)).then_some(FieldError::PasswordPattern))
}

// ========================
// Password strength meter
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn of(score: u32) -> Self {
        match score {
            0..=39 => Strength::Weak,
            40..=69 => Strength::Medium,
            _ => Strength::Strong,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Strength::Weak => "strength-weak",
            Strength::Medium => "strength-medium",
            Strength::Strong => "strength-strong",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }
}

/// Score from 0 to 100 rewarding length, character classes and variety
pub fn password_strength(password: &str) -> u32 {
    let len = password.chars().count();
    if len == 0 {
        return 0;
    }
    let mut score = 0.0;
    if len >= 8 {
        score += 20.0;
    }
    if len >= 12 {
        score += 10.0;
    }
    let classes: [fn(&char) -> bool; 4] = [
        char::is_ascii_uppercase,
        char::is_ascii_lowercase,
        char::is_ascii_digit,
        |c: &char| !c.is_ascii_alphanumeric(),
    ];
    for class in classes {
        if password.chars().any(|c| class(&c)) {
            score += 15.0;
        }
    }
    let mut unique: Vec<char> = password.chars().collect();
    unique.sort_unstable();
    unique.dedup();
    score += (unique.len() as f64 / len as f64 * 10.0).min(10.0);
    (score as u32).min(100)
}

// ========================
// Auth forms
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn email_error(&self) -> Option<FieldError> {
        email(&self.email)
    }

    pub fn password_error(&self) -> Option<FieldError> {
        required(&self.password)
    }

    pub fn is_valid(&self) -> bool {
        self.email_error().is_none() && self.password_error().is_none()
    }

    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl RegisterForm {
    pub fn first_name_error(&self) -> Option<FieldError> {
        required(&self.first_name)
    }

    pub fn last_name_error(&self) -> Option<FieldError> {
        required(&self.last_name)
    }

    pub fn username_error(&self) -> Option<FieldError> {
        min_len(&self.username, USERNAME_MIN_LEN)
    }

    pub fn email_error(&self) -> Option<FieldError> {
        email(&self.email)
    }

    pub fn password_error(&self) -> Option<FieldError> {
        new_password(&self.password)
    }

    pub fn confirm_error(&self) -> Option<FieldError> {
        required(&self.confirm_password)
    }

    pub fn terms_error(&self) -> Option<FieldError> {
        (!self.agree_to_terms).then_some(FieldError::TermsNotAccepted)
    }

    /// Field rules only; the password match is checked on submit
    pub fn is_valid(&self) -> bool {
        [
            self.first_name_error(),
            self.last_name_error(),
            self.username_error(),
            self.email_error(),
            self.password_error(),
            self.confirm_error(),
            self.terms_error(),
        ]
        .iter()
        .all(Option::is_none)
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    pub fn to_request(&self) -> Result<RegisterData, FieldError> {
        if !self.passwords_match() {
            return Err(FieldError::Mismatch);
        }
        Ok(RegisterData {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn email_error(&self) -> Option<FieldError> {
        email(&self.email)
    }

    pub fn is_valid(&self) -> bool {
        self.email_error().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn password_error(&self) -> Option<FieldError> {
        min_len(&self.password, PASSWORD_MIN_LEN)
    }

    pub fn confirm_error(&self) -> Option<FieldError> {
        required(&self.confirm_password)
            .or_else(|| (self.password != self.confirm_password).then_some(FieldError::Mismatch))
    }

    pub fn is_valid(&self) -> bool {
        self.password_error().is_none() && self.confirm_error().is_none()
    }
}

// ========================
// Project forms
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub start_date: String,
    pub end_date: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            status: ProjectStatus::Planning,
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

impl ProjectForm {
    pub fn name_error(&self) -> Option<FieldError> {
        min_len(&self.name, PROJECT_NAME_MIN_LEN)
    }

    pub fn date_error(&self) -> Option<FieldError> {
        match (parse_input_date(&self.start_date), parse_input_date(&self.end_date)) {
            (Some(start), Some(end)) if start >= end => Some(FieldError::EndBeforeStart),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name_error().is_none() && self.date_error().is_none()
    }

    pub fn to_request(&self, members: &[User]) -> CreateProjectRequest {
        CreateProjectRequest {
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            members: members.iter().map(|m| m.id.clone()).collect(),
            priority: self.priority,
            status: self.status,
            start_date: parse_input_date(&self.start_date),
            end_date: parse_input_date(&self.end_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEditForm {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Empty for "no priority"
    pub priority: String,
    pub due_date: String,
}

impl Default for ProjectEditForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: ProjectStatus::Active,
            priority: String::new(),
            due_date: String::new(),
        }
    }
}

impl ProjectEditForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            status: project.status.unwrap_or(ProjectStatus::Active),
            priority: project.priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
            due_date: crate::format::to_input_date(project.due_date.or(project.end_date)),
        }
    }

    pub fn name_error(&self) -> Option<FieldError> {
        required(&self.name)
    }

    pub fn is_valid(&self) -> bool {
        self.name_error().is_none()
    }

    pub fn to_request(&self, members: &[User]) -> UpdateProjectRequest {
        UpdateProjectRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            priority: self.priority.parse().ok(),
            due_date: parse_input_date(&self.due_date),
            members: members.iter().map(|m| m.id.clone()).collect(),
        }
    }
}

// ========================
// Task form
// ========================

/// Shared by task create and task edit
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub project: String,
    pub assigned_to: String,
    pub status: TaskStatus,
    pub priority: String,
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project: String::new(),
            assigned_to: String::new(),
            status: TaskStatus::Pending,
            priority: String::new(),
            due_date: String::new(),
        }
    }
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            project: task.project_id().to_string(),
            assigned_to: task.assigned_to.as_ref().map(|r| r.id().to_string()).unwrap_or_default(),
            status: task.status,
            priority: task.priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
            due_date: crate::format::to_input_date(task.due_date),
        }
    }

    pub fn title_error(&self) -> Option<FieldError> {
        required(&self.title)
    }

    pub fn project_error(&self) -> Option<FieldError> {
        required(&self.project)
    }

    pub fn is_valid(&self) -> bool {
        self.title_error().is_none() && self.project_error().is_none()
    }

    /// Choosing another project invalidates the assignee
    pub fn select_project(&mut self, project: String) {
        if project != self.project {
            self.assigned_to.clear();
        }
        self.project = project;
    }

    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            project: self.project.clone(),
            assigned_to: optional(&self.assigned_to),
            status: self.status,
            priority: self.priority.parse().ok(),
            due_date: parse_input_date(&self.due_date),
        }
    }
}

// ========================
// Profile form
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }

    pub fn first_name_error(&self) -> Option<FieldError> {
        required(&self.first_name)
    }

    pub fn last_name_error(&self) -> Option<FieldError> {
        required(&self.last_name)
    }

    pub fn username_error(&self) -> Option<FieldError> {
        min_len(&self.username, USERNAME_MIN_LEN)
    }

    pub fn email_error(&self) -> Option<FieldError> {
        email(&self.email)
    }

    pub fn is_valid(&self) -> bool {
        self.first_name_error().is_none()
            && self.last_name_error().is_none()
            && self.username_error().is_none()
            && self.email_error().is_none()
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_rule() {
        assert_eq!(email(""), Some(FieldError::Required));
        assert_eq!(email("nope"), Some(FieldError::InvalidEmail));
        assert_eq!(email("a@"), Some(FieldError::InvalidEmail));
        assert_eq!(email("a..b@x.io"), Some(FieldError::InvalidEmail));
        assert_eq!(email("a b@x.io"), Some(FieldError::InvalidEmail));
        assert_eq!(email("ada.l+pf@example.com"), None);
        assert_eq!(email("ada@localhost"), None);
        assert_eq!(email("ada@-bad.io"), Some(FieldError::InvalidEmail));
        assert_eq!(email(&format!("{}@x.io", "a".repeat(65))), Some(FieldError::InvalidEmail));
    }

    #[test]
    fn test_password_pattern() {
        assert!(is_strong_password("abc123!x"));
        assert!(!is_strong_password("abc123xy"));
        assert!(!is_strong_password("abcdefg!"));
        assert!(!is_strong_password("1234567!"));
        assert!(!is_strong_password("ab1!"));
        assert!(!is_strong_password("abc123!x^"));
    }

    #[test]
    fn test_password_strength_bands() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(Strength::of(password_strength("aaaa")), Strength::Weak);
        assert_eq!(Strength::of(password_strength("abcdefg1")), Strength::Medium);
        assert_eq!(Strength::of(password_strength("Abcdefgh12!?")), Strength::Strong);
        assert_eq!(Strength::Strong.class(), "strength-strong");
    }

    #[test]
    fn test_submit_gating() {
        let mut form = LoginForm::default();
        assert!(!can_submit(form.is_valid(), false));
        form.email = "ada@example.com".into();
        form.password = "x".into();
        assert!(can_submit(form.is_valid(), false));
        assert!(!can_submit(form.is_valid(), true));
    }

    #[test]
    fn test_register_form() {
        let mut form = RegisterForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "al".into(),
            email: "ada@example.com".into(),
            password: "engine42!".into(),
            confirm_password: "engine42?".into(),
            agree_to_terms: true,
        };
        assert_eq!(form.username_error(), Some(FieldError::TooShort(3)));
        assert!(!form.is_valid());

        form.username = "ada".into();
        assert!(form.is_valid());
        assert_eq!(form.to_request().unwrap_err(), FieldError::Mismatch);

        form.confirm_password = "engine42!".into();
        assert_eq!(form.to_request().unwrap().username, "ada");

        form.agree_to_terms = false;
        assert_eq!(form.terms_error(), Some(FieldError::TermsNotAccepted));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_reset_form_requires_match() {
        let mut form = ResetPasswordForm { password: "longenough".into(), confirm_password: "longenougH".into() };
        assert_eq!(form.confirm_error(), Some(FieldError::Mismatch));
        form.confirm_password = "longenough".into();
        assert!(form.is_valid());
        form.password = "short".into();
        form.confirm_password = "short".into();
        assert_eq!(form.password_error(), Some(FieldError::TooShort(8)));
    }

    #[test]
    fn test_project_form_dates_and_defaults() {
        let mut form = ProjectForm { name: "Apollo".into(), ..Default::default() };
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, ProjectStatus::Planning);
        assert!(form.is_valid());

        form.start_date = "2025-03-04".into();
        form.end_date = "2025-03-04".into();
        assert_eq!(form.date_error(), Some(FieldError::EndBeforeStart));
        form.end_date = "2025-03-05".into();
        assert!(form.is_valid());

        form.name = "Ap".into();
        assert!(!form.is_valid());

        let request = ProjectForm { name: "Apollo".into(), ..Default::default() }.to_request(&[]);
        assert_eq!(request.description, None);
        assert_eq!(request.start_date, None);
    }

    #[test]
    fn test_task_form_payload_and_project_switch() {
        let mut form = TaskForm { title: "Write".into(), ..Default::default() };
        assert_eq!(form.project_error(), Some(FieldError::Required));
        form.select_project("p1".into());
        form.assigned_to = "u1".into();
        form.select_project("p1".into());
        assert_eq!(form.assigned_to, "u1");
        form.select_project("p2".into());
        assert_eq!(form.assigned_to, "");

        let payload = form.to_payload();
        assert_eq!(payload.assigned_to, None);
        assert_eq!(payload.description, None);
        assert_eq!(payload.priority, None);
        assert_eq!(payload.status, TaskStatus::Pending);
    }

    #[test]
    fn test_task_form_from_task() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t1", "title": "Ship", "status": "review", "priority": "high",
            "project": { "_id": "p1", "name": "P" }, "assignedTo": "u2",
            "dueDate": "2025-03-04T10:00:00Z"
        }))
        .unwrap();
        let form = TaskForm::from_task(&task);
        assert_eq!(form.project, "p1");
        assert_eq!(form.assigned_to, "u2");
        assert_eq!(form.priority, "high");
        assert_eq!(form.due_date, "2025-03-04");
        assert_eq!(form.to_payload().priority, Some(Priority::High));
    }

    #[test]
    fn test_profile_form() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1", "firstName": "Ada", "lastName": "L", "email": "ada@x.io", "username": "ada"
        }))
        .unwrap();
        let mut form = ProfileForm::from_user(&user);
        assert!(form.is_valid());
        form.email = "broken".into();
        assert!(!form.is_valid());
    }
}
