use std::env;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use medlearn_core::model::{AnswerSet, Level, LevelResult, Session, SessionId};

use super::wire::{ErrorBody, EvaluateRequest, LearnRequest, LessonResponse};
use super::BackendPort;
use crate::error::{
    ApiError, ConfigError, BACKEND_UNAVAILABLE, EVALUATION_FAILED, GENERATION_FAILED,
    SESSION_NOT_FOUND,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const API_URL_VAR: &str = "MEDLEARN_API_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    /// Parse and normalise a backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unparsable or non-HTTP URL.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
            value: raw.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Read `MEDLEARN_API_URL`, falling back to the local development backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the variable is set to an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(API_URL_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Self::parse(DEFAULT_API_URL),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

/// Which backend call failed, for the error mapping and log fields.
#[derive(Clone, Copy, Debug)]
enum Operation {
    Generate,
    Evaluate,
    FetchSession,
    Ping,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Generate => "generate_learning",
            Operation::Evaluate => "evaluate_quiz",
            Operation::FetchSession => "get_session",
            Operation::Ping => "ping",
        }
    }

    fn fail(self, detail: Option<String>) -> ApiError {
        match self {
            Operation::Generate => {
                ApiError::Generation(detail.unwrap_or_else(|| GENERATION_FAILED.into()))
            }
            Operation::Evaluate => {
                ApiError::Evaluation(detail.unwrap_or_else(|| EVALUATION_FAILED.into()))
            }
            Operation::FetchSession => {
                ApiError::NotFound(detail.unwrap_or_else(|| SESSION_NOT_FOUND.into()))
            }
            Operation::Ping => {
                ApiError::Unavailable(detail.unwrap_or_else(|| BACKEND_UNAVAILABLE.into()))
            }
        }
    }
}

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, operation: Operation, path: &str) -> Result<Url, ApiError> {
        self.config.endpoint(path).map_err(|err| {
            tracing::warn!(operation = operation.name(), error = %err, "invalid endpoint URL");
            operation.fail(None)
        })
    }

    fn session_url(&self, session_id: &SessionId) -> Result<Url, ApiError> {
        let mut url = self.url(Operation::FetchSession, "api/session/")?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(session_id.as_str());
        }
        Ok(url)
    }

    async fn send(
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(operation = operation.name(), error = %err, "backend request failed");
            operation.fail(None)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::detail);
        tracing::warn!(
            operation = operation.name(),
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or_default(),
            "backend rejected request"
        );
        Err(operation.fail(detail))
    }

    async fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|err| {
            tracing::warn!(operation = operation.name(), error = %err, "undecodable backend response");
            operation.fail(None)
        })
    }

    fn lesson(
        operation: Operation,
        body: LessonResponse,
        fallback_topic: &str,
    ) -> Result<Session, ApiError> {
        body.into_session(fallback_topic).map_err(|err| {
            tracing::warn!(operation = operation.name(), error = %err, "unusable lesson");
            operation.fail(None)
        })
    }
}

#[async_trait]
impl BackendPort for HttpBackend {
    async fn generate_learning(&self, query: &str) -> Result<Session, ApiError> {
        let operation = Operation::Generate;
        let url = self.url(operation, "api/learn")?;
        let request = self.client.post(url).json(&LearnRequest { query });
        let response = Self::send(operation, request).await?;
        let body: LessonResponse = Self::decode(operation, response).await?;
        let session = Self::lesson(operation, body, query)?;
        tracing::info!(
            session_id = %session.session_id(),
            slides = session.slides().len(),
            "lesson generated"
        );
        Ok(session)
    }

    async fn evaluate_quiz(
        &self,
        session_id: &SessionId,
        level: Level,
        answers: &AnswerSet,
    ) -> Result<LevelResult, ApiError> {
        let operation = Operation::Evaluate;
        let url = self.url(operation, "api/quiz/evaluate")?;
        let request = self.client.post(url).json(&EvaluateRequest {
            session_id,
            level,
            user_answers: answers,
        });
        let response = Self::send(operation, request).await?;
        let result: LevelResult = Self::decode(operation, response).await?;
        tracing::info!(
            session_id = %session_id,
            level = level.number(),
            score = result.score,
            passed = result.passed,
            "level graded"
        );
        Ok(result)
    }

    async fn get_session(&self, session_id: &SessionId) -> Result<Session, ApiError> {
        let operation = Operation::FetchSession;
        let url = self.session_url(session_id)?;
        let response = Self::send(operation, self.client.get(url)).await?;
        let body: LessonResponse = Self::decode(operation, response).await?;
        Self::lesson(operation, body, "")
    }

    async fn ping(&self) -> Result<serde_json::Value, ApiError> {
        let operation = Operation::Ping;
        let url = self.url(operation, "api/test")?;
        let response = Self::send(operation, self.client.get(url)).await?;
        Self::decode(operation, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_path_prefix() {
        let config = ApiConfig::parse("https://example.org/medlearn").unwrap();
        assert_eq!(
            config.endpoint("api/learn").unwrap().as_str(),
            "https://example.org/medlearn/api/learn"
        );
        let config = ApiConfig::parse(DEFAULT_API_URL).unwrap();
        assert_eq!(
            config.endpoint("api/test").unwrap().as_str(),
            "http://localhost:8000/api/test"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            ApiConfig::parse("ftp://example.org"),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            ApiConfig::parse("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn session_ids_are_path_encoded() {
        let backend = HttpBackend::new(ApiConfig::parse(DEFAULT_API_URL).unwrap());
        let url = backend
            .session_url(&SessionId::new("a b/c").unwrap())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/session/a%20b%2Fc");
    }

    #[test]
    fn failures_fall_back_to_generic_messages() {
        assert_eq!(
            Operation::Generate.fail(None),
            ApiError::Generation(GENERATION_FAILED.into())
        );
        assert_eq!(
            Operation::FetchSession.fail(Some("gone".into())),
            ApiError::NotFound("gone".into())
        );
    }
}
