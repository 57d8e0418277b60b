use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in student as the UI sees it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Student {
    pub id: String,
    pub enrollment_no: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<i32>,
    pub is_active: bool,
}

impl Student {
    pub fn branch_selected(&self) -> bool {
        self.department
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.enrollment_no.clone()
        } else {
            name
        }
    }
}

/// `students` row, including the server-side password hash.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudentRow {
    #[serde(flatten)]
    pub student: Student,
    #[serde(default)]
    pub password_hash: Option<String>,
}

/// `auth_sessions` row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthSessionRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub student_id: String,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Session persisted in local storage.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoredSession {
    pub student: Student,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TestType {
    MockTest,
    SpeedTest,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MockTest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty: String,
    pub duration: i32,
    pub time_limit: i32,
    pub total_marks: i32,
    pub total_questions: i32,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub attempts: Option<i32>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub best_score: Option<f64>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub last_attempted: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpeedTest {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    pub duration: i32,
    pub total_questions: i32,
    #[serde(default)]
    pub attempts: Option<i32>,
    #[serde(default)]
    pub average_accuracy: Option<f64>,
    #[serde(default)]
    pub best_score: Option<f64>,
    #[serde(default)]
    pub best_time: Option<f64>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TestResult {
    pub id: String,
    pub student_id: String,
    pub test_id: String,
    pub test_type: TestType,
    pub score: f64,
    pub max_score: f64,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub questions_attempted: i32,
    pub completion_percentage: f64,
    pub time_taken_minutes: i32,
    pub total_time_minutes: i32,
    #[serde(default)]
    pub is_completed: Option<bool>,
    pub attempted_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert payload for `test_results`; the backend fills id and timestamps.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewTestResult {
    pub student_id: String,
    pub test_id: String,
    pub test_type: TestType,
    pub score: f64,
    pub max_score: f64,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub questions_attempted: i32,
    pub completion_percentage: f64,
    pub time_taken_minutes: i32,
    pub total_time_minutes: i32,
    pub is_completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreviousYearPaper {
    pub id: String,
    pub exam_name: String,
    pub paper_code: String,
    pub branch: String,
    pub year: i32,
    pub difficulty: String,
    pub duration: i32,
    pub total_marks: i32,
    pub total_questions: i32,
    #[serde(default)]
    pub subjects_covered: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub has_solutions: Option<bool>,
    #[serde(default)]
    pub has_video_solutions: Option<bool>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub download_count: Option<i32>,
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub file_size: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SubjectResource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub branch: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty_level: String,
    #[serde(default)]
    pub content_format: Option<String>,
    #[serde(default)]
    pub estimated_duration: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_ratings: Option<i32>,
    #[serde(default)]
    pub view_count: Option<i32>,
    #[serde(default)]
    pub download_count: Option<i32>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudyPlan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub branch: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_days: i32,
    pub daily_hours: f64,
    pub total_topics: i32,
    pub mock_tests_included: i32,
    #[serde(default)]
    pub enrolled_students: Option<i32>,
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub average_score_improvement: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub subjects_covered: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Per-student totals over `test_results`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestStatistics {
    pub total_mock_tests: usize,
    pub completed_mock_tests: usize,
    pub total_speed_tests: usize,
    pub completed_speed_tests: usize,
    /// Mean score, rounded half away from zero; 0 when there are no attempts.
    pub average_mock_score: i64,
    pub average_speed_accuracy: i64,
}

impl TestStatistics {
    pub fn from_results(results: &[TestResult]) -> Self {
        let of = |ty: TestType| results.iter().filter(move |r| r.test_type == ty);
        let completed = |ty: TestType| of(ty).filter(|r| r.is_completed == Some(true)).count();
        let average = |ty: TestType| {
            let (sum, n) = of(ty).fold((0.0, 0usize), |(s, n), r| (s + r.score, n + 1));
            if n == 0 {
                0
            } else {
                (sum / n as f64).round() as i64
            }
        };

        Self {
            total_mock_tests: of(TestType::MockTest).count(),
            completed_mock_tests: completed(TestType::MockTest),
            total_speed_tests: of(TestType::SpeedTest).count(),
            completed_speed_tests: completed(TestType::SpeedTest),
            average_mock_score: average(TestType::MockTest),
            average_speed_accuracy: average(TestType::SpeedTest),
        }
    }
}

/// Branches offered on the branch selection page: (code, label).
pub const BRANCHES: &[(&str, &str)] = &[
    ("CSE", "Computer Science & Engineering"),
    ("ECE", "Electronics & Communication"),
    ("EE", "Electrical Engineering"),
    ("ME", "Mechanical Engineering"),
    ("CE", "Civil Engineering"),
    ("CH", "Chemical Engineering"),
];
