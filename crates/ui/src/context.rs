use std::sync::{Arc, Mutex};

use medlearn_core::model::SessionId;
use services::LearningLoopService;
use url::Url;

pub trait UiApp: Send + Sync {
    fn learning_loop(&self) -> Arc<LearningLoopService>;

    /// Base URL that relative slide media is resolved against.
    fn media_base(&self) -> Option<Url>;

    /// Session to reopen at launch instead of showing the topic input.
    fn resume_session(&self) -> Option<SessionId>;

    /// Human-readable name of the backend, e.g. its URL or "demo".
    fn backend_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    learning_loop: Arc<LearningLoopService>,
    media_base: Option<Url>,
    backend_label: String,
    resume_configured: Option<SessionId>,
    resume_once: Arc<Mutex<Option<SessionId>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let resume_configured = app.resume_session();

        Self {
            learning_loop: app.learning_loop(),
            media_base: app.media_base(),
            backend_label: app.backend_label(),
            resume_once: Arc::new(Mutex::new(resume_configured.clone())),
            resume_configured,
        }
    }

    #[must_use]
    pub fn learning_loop(&self) -> Arc<LearningLoopService> {
        Arc::clone(&self.learning_loop)
    }

    #[must_use]
    pub fn media_base(&self) -> Option<&Url> {
        self.media_base.as_ref()
    }

    #[must_use]
    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }

    /// Hands out the launch session once; later calls return `None`.
    #[must_use]
    pub fn take_resume_session(&self) -> Option<SessionId> {
        self.resume_once.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Launch session as configured, whether or not it was already taken.
    #[must_use]
    pub fn configured_resume_session(&self) -> Option<&SessionId> {
        self.resume_configured.as_ref()
    }
}

/// Provided once at launch by the binary.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
