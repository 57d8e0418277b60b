use crate::api::{ApiClient, ApiResult, Query};
use crate::models::{AuthSessionRow, StudentRow};

/// Server side of the session lifecycle.
///
/// Futures are not `Send`; everything runs on the browser's single thread.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn find_student(&self, enrollment_no: &str) -> ApiResult<Option<StudentRow>>;
    async fn get_student(&self, id: &str) -> ApiResult<Option<StudentRow>>;
    async fn set_password_hash(&self, student_id: &str, hash: &str) -> ApiResult<()>;
    async fn update_department(&self, student_id: &str, department: &str) -> ApiResult<()>;

    async fn create_session(&self, session: &AuthSessionRow) -> ApiResult<()>;
    async fn find_session(&self, token: &str) -> ApiResult<Option<AuthSessionRow>>;
    async fn delete_session(&self, token: &str) -> ApiResult<()>;
}

/// [`AuthBackend`] over the `students` and `auth_sessions` tables.
#[derive(Clone, Debug)]
pub struct RestAuthBackend {
    api: ApiClient,
}

impl RestAuthBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl AuthBackend for RestAuthBackend {
    async fn find_student(&self, enrollment_no: &str) -> ApiResult<Option<StudentRow>> {
        self.api
            .select_one(&Query::table("students").eq("enrollment_no", enrollment_no))
            .await
    }

    async fn get_student(&self, id: &str) -> ApiResult<Option<StudentRow>> {
        self.api
            .select_one(&Query::table("students").eq("id", id))
            .await
    }

    async fn set_password_hash(&self, student_id: &str, hash: &str) -> ApiResult<()> {
        self.api
            .update(
                &Query::table("students").eq("id", student_id),
                &serde_json::json!({ "password_hash": hash }),
            )
            .await
    }

    async fn update_department(&self, student_id: &str, department: &str) -> ApiResult<()> {
        self.api
            .update(
                &Query::table("students").eq("id", student_id),
                &serde_json::json!({ "department": department }),
            )
            .await
    }

    async fn create_session(&self, session: &AuthSessionRow) -> ApiResult<()> {
        let _: AuthSessionRow = self.api.insert("auth_sessions", session).await?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> ApiResult<Option<AuthSessionRow>> {
        self.api
            .select_one(&Query::table("auth_sessions").eq("session_token", token))
            .await
    }

    async fn delete_session(&self, token: &str) -> ApiResult<()> {
        self.api
            .delete(&Query::table("auth_sessions").eq("session_token", token))
            .await
    }
}
