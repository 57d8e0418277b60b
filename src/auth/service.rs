use chrono::{DateTime, Duration, TimeDelta, Utc};

use super::{
    hash_password, new_session_token, normalize_enrollment, AuthBackend, AuthError, AuthResult,
};
use crate::config::MAX_SESSION_TTL_HOURS;
use crate::models::{AuthSessionRow, StoredSession, Student};
use crate::storage::{read_json, save_json, KeyValueStore, Stored, SESSION_KEY};

/// Session lifecycle against a backend, mirrored into a local store.
///
/// The local copy is only a cache of the server row: expiry on the server
/// wins, and a row missing on the server ends the session.
pub struct AuthService<B, S> {
    backend: B,
    store: S,
    ttl: Duration,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl<B: AuthBackend, S: KeyValueStore> AuthService<B, S> {
    /// `ttl_hours` is clamped to `1..=MAX_SESSION_TTL_HOURS`.
    pub fn new(backend: B, store: S, ttl_hours: i64) -> Self {
        let hours = ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        let ttl = TimeDelta::try_hours(hours).unwrap_or(TimeDelta::zero());
        Self {
            backend,
            store,
            ttl,
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Locally stored session, without asking the backend.
    pub fn stored_session(&self) -> Option<StoredSession> {
        match read_json::<StoredSession>(&self.store, SESSION_KEY) {
            Stored::Found(s) => Some(s),
            _ => None,
        }
    }

    fn clear(&self) {
        self.store.remove(SESSION_KEY);
    }

    /// Validate the stored session and return the signed-in student.
    ///
    /// Every failure except a backend transport error clears the stored
    /// session.
    pub async fn check_auth(&self) -> AuthResult<Student> {
        let session = match read_json::<StoredSession>(&self.store, SESSION_KEY) {
            Stored::Missing => return Err(AuthError::NoSession),
            Stored::Corrupt => {
                self.clear();
                return Err(AuthError::NoSession);
            }
            Stored::Found(s) => s,
        };

        let now = self.now();
        if session.is_expired(now) {
            log::info!("local session expired at {}", session.expires_at);
            self.clear();
            return Err(AuthError::SessionExpired);
        }

        let Some(row) = self.backend.find_session(&session.token).await? else {
            log::info!("session revoked on the server");
            self.clear();
            return Err(AuthError::NoSession);
        };
        if row.expires_at <= now {
            self.clear();
            return Err(AuthError::SessionExpired);
        }

        let student = match self.backend.get_student(&row.student_id).await? {
            Some(r) if r.student.is_active => r.student,
            Some(_) => {
                self.clear();
                return Err(AuthError::Inactive);
            }
            None => {
                self.clear();
                return Err(AuthError::NoSession);
            }
        };

        save_json(
            &self.store,
            SESSION_KEY,
            &StoredSession {
                student: student.clone(),
                token: session.token,
                expires_at: row.expires_at,
            },
        );
        Ok(student)
    }

    pub async fn sign_in(&self, enrollment_no: &str, password: &str) -> AuthResult<Student> {
        let enrollment_no = normalize_enrollment(enrollment_no);
        if enrollment_no.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput);
        }

        let row = self
            .backend
            .find_student(&enrollment_no)
            .await?
            .ok_or(AuthError::EnrollmentNotFound)?;
        if !row.student.is_active {
            return Err(AuthError::Inactive);
        }

        let hash = hash_password(&enrollment_no, password);
        match row.password_hash.as_deref() {
            // First sign-in sets the password.
            None | Some("") => {
                self.backend
                    .set_password_hash(&row.student.id, &hash)
                    .await?;
                log::info!("password set for {enrollment_no}");
            }
            Some(stored) if stored == hash => {}
            Some(_) => return Err(AuthError::InvalidPassword),
        }

        let token = new_session_token()?;
        let expires_at = self
            .now()
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::ExpiryOutOfRange)?;
        self.backend
            .create_session(&AuthSessionRow {
                id: None,
                student_id: row.student.id.clone(),
                session_token: token.clone(),
                expires_at,
            })
            .await?;

        if let Some(previous) = self.stored_session() {
            self.revoke(&previous.token).await;
        }

        save_json(
            &self.store,
            SESSION_KEY,
            &StoredSession {
                student: row.student.clone(),
                token,
                expires_at,
            },
        );
        log::info!("signed in {enrollment_no}");
        Ok(row.student)
    }

    /// Accounts are pre-registered, so signing up is a first sign-in.
    pub async fn sign_up(&self, enrollment_no: &str, password: &str) -> AuthResult<Student> {
        self.sign_in(enrollment_no, password).await
    }

    pub async fn sign_out(&self) {
        let previous = self.stored_session();
        self.clear();
        if let Some(session) = previous {
            self.revoke(&session.token).await;
        }
    }

    pub async fn update_branch_selection(&self, department: &str) -> AuthResult<Student> {
        let department = department.trim();
        if department.is_empty() {
            return Err(AuthError::InvalidInput);
        }
        let mut session = self.stored_session().ok_or(AuthError::NotAuthenticated)?;
        if session.is_expired(self.now()) {
            self.clear();
            return Err(AuthError::SessionExpired);
        }

        self.backend
            .update_department(&session.student.id, department)
            .await?;
        session.student.department = Some(department.to_string());
        save_json(&self.store, SESSION_KEY, &session);
        Ok(session.student)
    }

    async fn revoke(&self, token: &str) {
        if let Err(e) = self.backend.delete_session(token).await {
            log::warn!("could not revoke session: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use crate::auth::hash_password;
    use crate::config::MAX_SESSION_TTL_HOURS;
use crate::models::StudentRow;
    use crate::storage::{save_json, MemoryStore};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Backend {
        students: RefCell<Vec<StudentRow>>,
        sessions: RefCell<Vec<AuthSessionRow>>,
        offline: Cell<bool>,
    }

    impl Backend {
        fn check(&self) -> ApiResult<()> {
            if self.offline.get() {
                Err(ApiError::Network("offline".to_string()))
            } else {
                Ok(())
            }
        }

        fn hash_of(&self, id: &str) -> Option<String> {
            self.students
                .borrow()
                .iter()
                .find(|r| r.student.id == id)
                .and_then(|r| r.password_hash.clone())
        }
    }

    #[derive(Clone, Default)]
    struct SharedBackend(Rc<Backend>);

    impl AuthBackend for SharedBackend {
        async fn find_student(&self, enrollment_no: &str) -> ApiResult<Option<StudentRow>> {
            self.0.check()?;
            Ok(self
                .0
                .students
                .borrow()
                .iter()
                .find(|r| r.student.enrollment_no == enrollment_no)
                .cloned())
        }

        async fn get_student(&self, id: &str) -> ApiResult<Option<StudentRow>> {
            self.0.check()?;
            Ok(self
                .0
                .students
                .borrow()
                .iter()
                .find(|r| r.student.id == id)
                .cloned())
        }

        async fn set_password_hash(&self, student_id: &str, hash: &str) -> ApiResult<()> {
            self.0.check()?;
            for r in self.0.students.borrow_mut().iter_mut() {
                if r.student.id == student_id {
                    r.password_hash = Some(hash.to_string());
                }
            }
            Ok(())
        }

        async fn update_department(&self, student_id: &str, department: &str) -> ApiResult<()> {
            self.0.check()?;
            for r in self.0.students.borrow_mut().iter_mut() {
                if r.student.id == student_id {
                    r.student.department = Some(department.to_string());
                }
            }
            Ok(())
        }

        async fn create_session(&self, session: &AuthSessionRow) -> ApiResult<()> {
            self.0.check()?;
            self.0.sessions.borrow_mut().push(session.clone());
            Ok(())
        }

        async fn find_session(&self, token: &str) -> ApiResult<Option<AuthSessionRow>> {
            self.0.check()?;
            Ok(self
                .0
                .sessions
                .borrow()
                .iter()
                .find(|s| s.session_token == token)
                .cloned())
        }

        async fn delete_session(&self, token: &str) -> ApiResult<()> {
            self.0.check()?;
            self.0
                .sessions
                .borrow_mut()
                .retain(|s| s.session_token != token);
            Ok(())
        }
    }

    fn student(id: &str, enrollment_no: &str, active: bool) -> StudentRow {
        StudentRow {
            student: Student {
                id: id.to_string(),
                enrollment_no: enrollment_no.to_string(),
                first_name: Some("Asha".to_string()),
                last_name: Some("Rao".to_string()),
                department: None,
                year_of_study: Some(4),
                is_active: active,
            },
            password_hash: None,
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    struct Fixture {
        backend: SharedBackend,
        store: MemoryStore,
        now: Rc<Cell<DateTime<Utc>>>,
        auth: AuthService<SharedBackend, MemoryStore>,
    }

    fn fixture() -> Fixture {
        let backend = SharedBackend::default();
        backend.0.students.borrow_mut().extend([
            student("1", "SOE2021CS001", true),
            student("2", "SOE2021CS002", false),
        ]);
        let store = MemoryStore::new();
        let now = Rc::new(Cell::new(t0()));
        let clock = now.clone();
        let auth = AuthService::new(backend.clone(), store.clone(), 24).with_clock(move || clock.get());
        Fixture {
            backend,
            store,
            now,
            auth,
        }
    }

    #[tokio::test]
    async fn first_sign_in_sets_password_then_wrong_password_is_rejected() {
        let f = fixture();
        let s = f.auth.sign_in(" soe2021cs001 ", "hunter2").await.unwrap();
        assert_eq!(s.id, "1");
        assert_eq!(
            f.backend.0.hash_of("1"),
            Some(hash_password("SOE2021CS001", "hunter2"))
        );

        let stored_before = f.store.get(SESSION_KEY);
        let sessions_before = f.backend.0.sessions.borrow().clone();
        assert!(stored_before.is_some());

        let err = f.auth.sign_in("SOE2021CS001", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidPassword);
        assert_eq!(err.to_string(), "Invalid password");
        assert_eq!(f.store.get(SESSION_KEY), stored_before);
        assert_eq!(*f.backend.0.sessions.borrow(), sessions_before);
        assert_eq!(
            f.backend.0.hash_of("1"),
            Some(hash_password("SOE2021CS001", "hunter2"))
        );
    }

    #[tokio::test]
    async fn sign_in_persists_session_with_ttl() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        let session = f.auth.stored_session().unwrap();
        assert_eq!(session.expires_at, t0() + Duration::hours(24));
        assert_eq!(session.token.len(), 64);
        assert_eq!(f.backend.0.sessions.borrow().len(), 1);
    }

    #[tokio::test]
    async fn oversized_ttl_is_clamped_and_overflow_is_an_error() {
        let f = fixture();
        let auth = AuthService::new(f.backend.clone(), f.store.clone(), 3_000_000_000)
            .with_clock(t0);
        auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        assert_eq!(
            auth.stored_session().unwrap().expires_at,
            t0() + Duration::hours(MAX_SESSION_TTL_HOURS)
        );

        let auth = AuthService::new(f.backend.clone(), f.store.clone(), 24)
            .with_clock(|| DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            auth.sign_in("SOE2021CS001", "pw").await.unwrap_err(),
            AuthError::ExpiryOutOfRange
        );
        assert_eq!(f.backend.0.sessions.borrow().len(), 1);
    }

    #[tokio::test]
    async fn second_sign_in_revokes_previous_token() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        let first = f.auth.stored_session().unwrap().token;
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        let second = f.auth.stored_session().unwrap().token;

        let sessions = f.backend.0.sessions.borrow();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_token, second);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn unknown_inactive_and_empty_inputs() {
        let f = fixture();
        assert_eq!(
            f.auth.sign_in("SOE1999XX999", "pw").await.unwrap_err(),
            AuthError::EnrollmentNotFound
        );
        assert_eq!(
            f.auth.sign_in("SOE2021CS002", "pw").await.unwrap_err(),
            AuthError::Inactive
        );
        assert_eq!(
            f.auth.sign_in("  ", "pw").await.unwrap_err(),
            AuthError::InvalidInput
        );
        assert!(f.store.get(SESSION_KEY).is_none());
    }

    #[tokio::test]
    async fn expired_local_session_is_cleared() {
        let f = fixture();
        save_json(
            &f.store,
            SESSION_KEY,
            &StoredSession {
                student: student("1", "SOE2021CS001", true).student,
                token: "stale".to_string(),
                expires_at: t0() - Duration::minutes(1),
            },
        );
        assert_eq!(f.auth.check_auth().await.unwrap_err(), AuthError::SessionExpired);
        assert!(f.store.get(SESSION_KEY).is_none());
    }

    #[tokio::test]
    async fn server_expiry_is_authoritative() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        let token = f.auth.stored_session().unwrap().token;
        for s in f.backend.0.sessions.borrow_mut().iter_mut() {
            if s.session_token == token {
                s.expires_at = t0() + Duration::hours(1);
            }
        }

        f.now.set(t0() + Duration::hours(2));
        assert_eq!(f.auth.check_auth().await.unwrap_err(), AuthError::SessionExpired);
        assert!(f.store.get(SESSION_KEY).is_none());
    }

    #[tokio::test]
    async fn check_auth_restores_and_refreshes_student() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        f.backend.0.students.borrow_mut()[0].student.department = Some("CSE".to_string());

        let s = f.auth.check_auth().await.unwrap();
        assert!(s.branch_selected());
        assert!(f.auth.stored_session().unwrap().student.branch_selected());
    }

    #[tokio::test]
    async fn revoked_or_corrupt_sessions_clear() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        f.backend.0.sessions.borrow_mut().clear();
        assert_eq!(f.auth.check_auth().await.unwrap_err(), AuthError::NoSession);
        assert!(f.store.get(SESSION_KEY).is_none());

        f.store.set(SESSION_KEY, "{garbage");
        assert_eq!(f.auth.check_auth().await.unwrap_err(), AuthError::NoSession);
        assert!(f.store.get(SESSION_KEY).is_none());
    }

    #[tokio::test]
    async fn transport_errors_keep_the_session() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        f.backend.0.offline.set(true);
        assert!(matches!(
            f.auth.check_auth().await.unwrap_err(),
            AuthError::Backend(ApiError::Network(_))
        ));
        assert!(f.store.get(SESSION_KEY).is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_and_revokes() {
        let f = fixture();
        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        f.auth.sign_out().await;
        assert!(f.store.get(SESSION_KEY).is_none());
        assert!(f.backend.0.sessions.borrow().is_empty());
        assert_eq!(f.auth.check_auth().await.unwrap_err(), AuthError::NoSession);

        // Signing out twice is harmless.
        f.auth.sign_out().await;
    }

    #[tokio::test]
    async fn branch_selection_requires_session() {
        let f = fixture();
        assert_eq!(
            f.auth.update_branch_selection("CSE").await.unwrap_err(),
            AuthError::NotAuthenticated
        );

        f.auth.sign_in("SOE2021CS001", "pw").await.unwrap();
        let s = f.auth.update_branch_selection("CSE").await.unwrap();
        assert_eq!(s.department.as_deref(), Some("CSE"));
        assert_eq!(
            f.backend.0.students.borrow()[0].student.department.as_deref(),
            Some("CSE")
        );
        assert!(f.auth.stored_session().unwrap().student.branch_selected());
    }
}
