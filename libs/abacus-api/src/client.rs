//! HTTP client for the evaluation service.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use abacus_core::EvalRequest;

use crate::dto::{
    ArithmeticRequest, ArithmeticResponse, CalculusRequest, CalculusResponse, ComplexRequest,
    ComplexResponse, ConversionRequest, ConversionResponse, HealthResponse, LogarithmRequest,
    LogarithmResponse, MatrixRequest, MatrixResponse, PolynomialRequest, PolynomialResponse,
    StatisticsRequest, StatisticsResponse, TrigFunction, TrigonometryRequest,
    TrigonometryResponse,
};
use crate::error::{status_message, ApiError, Result};

/// Default evaluation service base URL (a local development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout. A slower service surfaces as
/// [`ApiError::Timeout`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the math evaluation service.
///
/// One instance per session; clones share the underlying connection pool,
/// which makes it cheap to hand a copy to each spawned request task. No
/// retries, no response caching: every call is a single attempt.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client against `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Client with an explicit timeout (tests shrink it).
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::unexpected(err.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch a state-machine request and extract the numeric result.
    pub async fn evaluate(&self, request: &EvalRequest) -> Result<f64> {
        match request {
            EvalRequest::Arithmetic { expression } => {
                let response = self
                    .evaluate_arithmetic(&ArithmeticRequest {
                        expression: expression.clone(),
                    })
                    .await?;
                Ok(response.result)
            }
            EvalRequest::Trigonometry {
                function,
                value,
                unit,
            } => {
                let response = self
                    .evaluate_trigonometry(&TrigonometryRequest {
                        function: TrigFunction::try_from(*function)?,
                        value: *value,
                        unit: *unit,
                    })
                    .await?;
                Ok(response.result)
            }
        }
    }

    // === Endpoints ===

    /// `POST /arithmetic/evaluate`
    pub async fn evaluate_arithmetic(
        &self,
        request: &ArithmeticRequest,
    ) -> Result<ArithmeticResponse> {
        self.post("/arithmetic/evaluate", request).await
    }

    /// `POST /trigonometry/evaluate`
    pub async fn evaluate_trigonometry(
        &self,
        request: &TrigonometryRequest,
    ) -> Result<TrigonometryResponse> {
        self.post("/trigonometry/evaluate", request).await
    }

    /// `POST /logarithms/evaluate`
    pub async fn evaluate_logarithm(
        &self,
        request: &LogarithmRequest,
    ) -> Result<LogarithmResponse> {
        self.post("/logarithms/evaluate", request).await
    }

    /// `POST /algebra/poly-solve`
    pub async fn solve_polynomial(
        &self,
        request: &PolynomialRequest,
    ) -> Result<PolynomialResponse> {
        self.post("/algebra/poly-solve", request).await
    }

    /// `POST /complex/evaluate`
    pub async fn evaluate_complex(&self, request: &ComplexRequest) -> Result<ComplexResponse> {
        self.post("/complex/evaluate", request).await
    }

    /// `POST /calculus/evaluate`
    pub async fn evaluate_calculus(&self, request: &CalculusRequest) -> Result<CalculusResponse> {
        self.post("/calculus/evaluate", request).await
    }

    /// `POST /matrices/evaluate`
    pub async fn evaluate_matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse> {
        self.post("/matrices/evaluate", request).await
    }

    /// `POST /statistics/evaluate`
    pub async fn evaluate_statistics(
        &self,
        request: &StatisticsRequest,
    ) -> Result<StatisticsResponse> {
        self.post("/statistics/evaluate", request).await
    }

    /// `POST /numbers/convert`
    pub async fn convert_number(&self, request: &ConversionRequest) -> Result<ConversionResponse> {
        self.post("/numbers/convert", request).await
    }

    /// `GET /health`
    pub async fn check_health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    // === Transport ===

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are best-effort JSON; an unreadable one still
            // classifies by status code.
            let body = response.json::<Value>().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_message(status.as_u16(), &body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::unexpected(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!("Request failed with status {}", status.as_u16()),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::unexpected(err.to_string()))
    }
}
