use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use vibe_core::{
    format_local, validate, FormatKind, FormatRequest, FormatResult, Origin, PrettyConfig,
    ValidationError,
};
use vibe_observability::FormatMetrics;
use vibe_remote::{CompletionTransport, HttpTransport, RemoteFormatter};

#[derive(Clone)]
pub struct FormatOrchestrator<T>
where
    T: CompletionTransport,
{
    config: Arc<PrettyConfig>,
    remote: RemoteFormatter<T>,
    metrics: Arc<FormatMetrics>,
}

impl<T> FormatOrchestrator<T>
where
    T: CompletionTransport,
{
    pub fn new(config: Arc<PrettyConfig>, transport: T, metrics: Arc<FormatMetrics>) -> Self {
        Self {
            remote: RemoteFormatter::new(config.clone(), transport),
            config,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<FormatMetrics> {
        &self.metrics
    }

    pub fn transport(&self) -> &T {
        self.remote.transport()
    }

    // Remote failures fall back to local; only validation errors surface.
    #[instrument(skip(self, request), fields(run_id = %Uuid::new_v4(), kind = %request.kind()))]
    pub async fn execute(&self, request: &FormatRequest) -> Result<FormatResult, ValidationError> {
        let started = Instant::now();
        self.metrics.inc_request();

        if let Err(err) = validate(request) {
            self.metrics.inc_validation_failure();
            debug!(error = %err, "request rejected");
            return Err(err);
        }

        let kind = request.kind();
        let result = match self.resolve_credential(request) {
            Some(credential) => {
                self.metrics.inc_remote_attempt();
                match self.remote.format(request.text(), kind, credential).await {
                    Ok(content) => {
                        self.metrics.inc_remote_success();
                        FormatResult {
                            content,
                            kind,
                            origin: Origin::Remote,
                        }
                    }
                    Err(err) => {
                        self.metrics.inc_fallback();
                        warn!(error = %err, "remote formatting failed, using local formatter");
                        self.format_locally(request)
                    }
                }
            }
            None => {
                debug!("no credential available, skipping remote formatter");
                self.format_locally(request)
            }
        };

        self.metrics.observe_latency(started.elapsed());
        info!(origin = result.origin.as_str(), "format request handled");
        Ok(result)
    }

    fn resolve_credential<'a>(&'a self, request: &'a FormatRequest) -> Option<&'a str> {
        request
            .credential()
            .or(self.config.env_credential.as_deref())
            .filter(|value| !value.is_empty())
    }

    fn format_locally(&self, request: &FormatRequest) -> FormatResult {
        self.metrics.inc_local();
        FormatResult {
            content: format_local(request.text(), request.kind()),
            kind: request.kind(),
            origin: Origin::Local,
        }
    }
}

#[derive(Clone)]
pub struct PrettyPrinter<T = HttpTransport>
where
    T: CompletionTransport,
{
    orchestrator: FormatOrchestrator<T>,
}

impl PrettyPrinter<HttpTransport> {
    pub fn from_env() -> Self {
        Self::from_config(PrettyConfig::from_env())
    }

    pub fn from_config(config: PrettyConfig) -> Self {
        let transport = HttpTransport::new(config.endpoint.as_str());
        Self::with_transport(config, transport, FormatMetrics::shared())
    }
}

impl<T> PrettyPrinter<T>
where
    T: CompletionTransport,
{
    pub fn with_transport(config: PrettyConfig, transport: T, metrics: Arc<FormatMetrics>) -> Self {
        Self {
            orchestrator: FormatOrchestrator::new(Arc::new(config), transport, metrics),
        }
    }

    pub fn orchestrator(&self) -> &FormatOrchestrator<T> {
        &self.orchestrator
    }

    pub async fn run(
        &self,
        text: &str,
        kind: &str,
        credential: Option<&str>,
    ) -> Result<FormatResult, ValidationError> {
        let request = match FormatRequest::parse(text, kind, credential) {
            Ok(request) => request,
            Err(err) => {
                self.orchestrator.metrics().inc_request();
                self.orchestrator.metrics().inc_validation_failure();
                return Err(err);
            }
        };
        self.orchestrator.execute(&request).await
    }

    pub async fn run_typed(
        &self,
        text: &str,
        kind: FormatKind,
        credential: Option<&str>,
    ) -> Result<FormatResult, ValidationError> {
        let request = FormatRequest::new(text, kind, credential.map(ToString::to_string));
        self.orchestrator.execute(&request).await
    }
}

/// Formats `text` as `kind` with configuration read from the environment.
///
/// Remote formatting is attempted when `credential` (or `VIBE_PP_API_KEY`)
/// is set; any remote failure silently degrades to local formatting.
///
/// # Errors
///
/// Returns [`ValidationError`] when the text is empty, `kind` is not one of
/// `json`, `xml`, `yaml`, `text`, or the text is malformed for its kind.
pub async fn format(
    text: &str,
    kind: &str,
    credential: Option<&str>,
) -> Result<String, ValidationError> {
    let printer = PrettyPrinter::from_env();
    printer
        .run(text, kind, credential)
        .await
        .map(|result| result.content)
}
