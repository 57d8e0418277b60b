use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::auth::{AuthError, AuthService, RestAuthBackend};
use crate::config::EnvConfig;
use crate::models::{StoredSession, Student};
use crate::nav::{NavigationService, Shortcut, ShortcutGroup};
use crate::storage::{load_json, BrowserStorage, SESSION_KEY};

type BrowserAuth = AuthService<RestAuthBackend, BrowserStorage>;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub config: StoredValue<EnvConfig>,
    pub api: StoredValue<ApiClient>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        let api = ApiClient::from_config(&config);
        let service = AuthService::new(
            RestAuthBackend::new(api.clone()),
            BrowserStorage,
            config.session_ttl_hours,
        );
        Self {
            config: StoredValue::new(config),
            api: StoredValue::new(api),
            auth: AuthState::new(service),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

/// Signed-in student plus the service that owns the stored session.
///
/// `loading` stays true until [`AuthState::init`] has checked the stored
/// session with the backend.
#[derive(Clone, Copy)]
pub(crate) struct AuthState {
    pub student: RwSignal<Option<Student>>,
    pub loading: RwSignal<bool>,
    service: StoredValue<Rc<BrowserAuth>, LocalStorage>,
}

impl AuthState {
    fn new(service: BrowserAuth) -> Self {
        // Render the remembered student right away; init() confirms it.
        let remembered = load_json::<StoredSession>(&BrowserStorage, SESSION_KEY)
            .filter(|s| !s.is_expired(chrono::Utc::now()))
            .map(|s| s.student);
        Self {
            student: RwSignal::new(remembered),
            loading: RwSignal::new(true),
            service: StoredValue::new_local(Rc::new(service)),
        }
    }

    fn service(&self) -> Rc<BrowserAuth> {
        self.service.get_value()
    }

    pub fn init(self) {
        let service = self.service();
        spawn_local(async move {
            match service.check_auth().await {
                Ok(student) => self.student.set(Some(student)),
                Err(AuthError::Backend(e)) => {
                    // Keep the remembered student while the backend is unreachable.
                    log::warn!("session check failed: {e}");
                }
                Err(e) => {
                    log::info!("not signed in: {e}");
                    self.student.set(None);
                }
            }
            self.loading.set(false);
        });
    }

    pub async fn sign_in(self, enrollment_no: String, password: String) -> Result<Student, AuthError> {
        let student = self.service().sign_in(&enrollment_no, &password).await?;
        self.student.set(Some(student.clone()));
        Ok(student)
    }

    /// First-time access: sets the password, then signs in.
    pub async fn sign_up(self, enrollment_no: String, password: String) -> Result<Student, AuthError> {
        let student = self.service().sign_up(&enrollment_no, &password).await?;
        self.student.set(Some(student.clone()));
        Ok(student)
    }

    pub async fn sign_out(self) {
        self.service().sign_out().await;
        self.student.set(None);
    }

    pub async fn update_branch(self, department: String) -> Result<Student, AuthError> {
        let result = self.service().update_branch_selection(&department).await;
        match &result {
            Ok(student) => self.student.set(Some(student.clone())),
            Err(AuthError::NotAuthenticated | AuthError::SessionExpired) => self.student.set(None),
            Err(_) => {}
        }
        result
    }

    pub fn is_authenticated(&self) -> bool {
        self.student.with(Option::is_some)
    }
}

/// Access to the app's navigation service for components that add their own
/// shortcuts or pause keyboard handling (e.g. while a modal owns the keys).
#[derive(Clone, Copy)]
pub(crate) struct KeyboardContext {
    pub help_open: RwSignal<bool>,
    service: StoredValue<Option<Rc<NavigationService>>, LocalStorage>,
}

impl KeyboardContext {
    pub fn new(help_open: RwSignal<bool>, service: Option<NavigationService>) -> Self {
        Self {
            help_open,
            service: StoredValue::new_local(service.map(Rc::new)),
        }
    }

    fn with_service(&self, f: impl FnOnce(&NavigationService)) {
        let service = self.service.try_get_value().flatten();
        if let Some(s) = service {
            f(&s);
        }
    }

    pub fn bind(&self) {
        self.with_service(|s| s.bind());
    }

    pub fn teardown(&self) {
        self.with_service(|s| s.teardown());
    }

    pub fn page_changed(&self, path: &str) {
        self.with_service(|s| s.page_changed(path));
    }

    pub fn register_shortcut(&self, shortcut: Shortcut) {
        self.with_service(|s| s.register_shortcut(shortcut));
    }

    pub fn enable(&self) {
        self.with_service(|s| s.enable());
    }

    pub fn disable(&self) {
        self.with_service(|s| s.disable());
    }

    pub fn is_enabled(&self) -> bool {
        let mut enabled = false;
        self.with_service(|s| enabled = s.is_enabled());
        enabled
    }

    pub fn shortcut_groups(&self) -> Vec<ShortcutGroup> {
        let mut groups = Vec::new();
        self.with_service(|s| groups = s.shortcut_groups());
        groups
    }
}
