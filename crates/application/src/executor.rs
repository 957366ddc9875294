//! Endpoint execution pipeline
//!
//! One call to [`EndpointExecutor::execute`] drives a record through
//! input, interpolation, dispatch, response routing and logging. Only the
//! validation and dispatch outcome decides the returned
//! [`ExecutionResult`]; routing and logging are best-effort and report
//! their failures through the [`Notifier`].

use std::sync::Arc;

use bridge_domain::constants::{
    DEFAULT_INPUT_PROMPT, MODAL_PREVIEW_CHARS, PLUGIN_ID, TOAST_PREVIEW_CHARS,
};
use bridge_domain::{
    BodyTemplate, EndpointRecord, ExecutionResult, ExecutionStage, HttpMethod, LogEntry,
    LoggedRequest, ResponseSink, Settings, generate_execution_id, preview,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::Instrument;

use crate::error::{EndpointError, EndpointResult};
use crate::ports::{
    Clipboard, Clock, ExecutionLog, HttpClient, HttpRequest, HttpResponse, InputPrompt,
    NoteEditor, NoticeKind, Notifier, WorkspaceContext,
};
use crate::template::{Interpolator, Variables, substitute_known, substitute_value_known};

/// Collaborators the executor needs.
#[derive(Clone)]
pub struct ExecutorPorts {
    /// HTTP transport.
    pub http: Arc<dyn HttpClient>,
    /// Asks for `{{input}}`.
    pub prompt: Arc<dyn InputPrompt>,
    /// Toasts and side-channel reports.
    pub notifier: Arc<dyn Notifier>,
    /// Active document and vault name.
    pub workspace: Arc<dyn WorkspaceContext>,
    /// Selection replacement and note creation.
    pub editor: Arc<dyn NoteEditor>,
    /// System clipboard.
    pub clipboard: Arc<dyn Clipboard>,
    /// Execution log.
    pub log: Arc<dyn ExecutionLog>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

/// Runs endpoint records against the configured ports.
#[derive(Clone)]
pub struct EndpointExecutor {
    ports: ExecutorPorts,
    plugin_id: String,
}

/// A fully interpolated request, ready to send and to log.
#[derive(Debug, Clone)]
struct ResolvedRequest {
    method: HttpMethod,
    url: String,
    headers: IndexMap<String, String>,
    body: Option<String>,
}

impl ResolvedRequest {
    fn to_logged(&self) -> LoggedRequest {
        LoggedRequest {
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// Stage bookkeeping for one execution.
struct ExecutionContext {
    stage: ExecutionStage,
}

impl ExecutionContext {
    const fn new() -> Self {
        Self {
            stage: ExecutionStage::Idle,
        }
    }

    fn advance(&mut self, next: ExecutionStage) {
        tracing::debug!(from = %self.stage, to = %next, "stage transition");
        self.stage = next;
    }
}

impl EndpointExecutor {
    /// Creates an executor reporting itself as [`PLUGIN_ID`].
    #[must_use]
    pub fn new(ports: ExecutorPorts) -> Self {
        Self {
            ports,
            plugin_id: PLUGIN_ID.to_string(),
        }
    }

    /// Executes one endpoint.
    ///
    /// The record is expected to be valid; the service validates before
    /// calling this. Failures never escape: they become an unsuccessful
    /// [`ExecutionResult`].
    pub async fn execute(&self, endpoint: &EndpointRecord, settings: &Settings) -> ExecutionResult {
        let execution_id = generate_execution_id();
        let span = tracing::info_span!("endpoint", id = %endpoint.id, execution = %execution_id);

        async {
            let mut context = ExecutionContext::new();
            let outcome = self
                .run(&mut context, endpoint, settings)
                .await;

            match outcome {
                Ok(response) => {
                    context.advance(ExecutionStage::Done);
                    ExecutionResult::succeeded(response)
                }
                Err(EndpointError::Cancelled) => {
                    context.advance(ExecutionStage::Cancelled);
                    tracing::info!("execution cancelled by user");
                    ExecutionResult::cancelled()
                }
                Err(error) => {
                    let failed_in = context.stage;
                    context.advance(ExecutionStage::Failed);
                    tracing::error!(stage = %failed_in, error = %error, "execution failed");
                    ExecutionResult::failed(error.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        context: &mut ExecutionContext,
        endpoint: &EndpointRecord,
        settings: &Settings,
    ) -> EndpointResult<String> {
        if settings.timeout_ms == 0 {
            return Err(EndpointError::Configuration(
                "timeoutMs must be greater than zero".to_string(),
            ));
        }

        let mut input_vars = Variables::new();
        if endpoint.needs_input() {
            context.advance(ExecutionStage::AwaitingInput);
            let prompt = endpoint
                .input_prompt
                .as_deref()
                .filter(|prompt| !prompt.trim().is_empty())
                .unwrap_or(DEFAULT_INPUT_PROMPT);
            let value = self
                .ports
                .prompt
                .prompt_for_text(prompt)
                .await
                .ok_or(EndpointError::Cancelled)?;
            input_vars.insert("input".to_string(), value);
        }

        context.advance(ExecutionStage::Interpolating);
        let interpolator = Interpolator::capture(
            self.ports.workspace.as_ref(),
            settings,
            self.ports.clock.as_ref(),
            self.plugin_id.clone(),
        );
        let request = resolve_request(endpoint, &interpolator, &input_vars)?;

        context.advance(ExecutionStage::Dispatching);
        let response = self.dispatch(&request, settings.timeout_ms).await?;

        context.advance(ExecutionStage::RoutingResponse);
        self.route_response(&endpoint.insert_response_to, &response.body)
            .await;

        context.advance(ExecutionStage::Logging);
        let entry = LogEntry::new(
            endpoint.id.as_str(),
            interpolator.now(),
            request.to_logged(),
            &response.body,
        );
        self.log_execution(&entry).await;

        Ok(response.body)
    }

    async fn dispatch(
        &self,
        request: &ResolvedRequest,
        timeout_ms: u64,
    ) -> EndpointResult<HttpResponse> {
        tracing::info!(method = %request.method, url = %request.url, "dispatching request");

        let response = self
            .ports
            .http
            .execute(&HttpRequest {
                method: request.method.clone(),
                url: request.url.clone(),
                headers: request.headers.clone(),
                body: request.body.clone(),
                timeout_ms,
            })
            .await?;

        if !response.is_success() {
            return Err(EndpointError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        tracing::info!(status = response.status, "request completed");
        Ok(response)
    }

    /// Delivers the response body to the configured sink.
    async fn route_response(&self, sink: &ResponseSink, body: &str) {
        let notifier = &self.ports.notifier;
        match sink {
            ResponseSink::None => {}
            ResponseSink::Modal => notifier.notify(
                NoticeKind::Info,
                &format!("Response:\n{}", preview(body, MODAL_PREVIEW_CHARS)),
            ),
            ResponseSink::Toast => notifier.notify(
                NoticeKind::Info,
                &format!("API Response: {}...", preview(body, TOAST_PREVIEW_CHARS)),
            ),
            ResponseSink::Clipboard => match self.ports.clipboard.write_text(body).await {
                Ok(()) => notifier.notify(NoticeKind::Success, "Response copied to clipboard"),
                Err(error) => self.report_routing_failure(&error.to_string()),
            },
            ResponseSink::ActiveNote => match self.ports.editor.replace_selection(body).await {
                Ok(true) => {}
                Ok(false) => tracing::debug!("no focused editor, response not inserted"),
                Err(error) => self.report_routing_failure(&error.to_string()),
            },
            ResponseSink::NewNote => {
                let name = format!(
                    "API Response - {}.md",
                    self.ports.clock.now().format("%Y-%m-%dT%H-%M-%S")
                );
                match self.ports.editor.create_note(&name, body).await {
                    Ok(path) => {
                        tracing::debug!(%path, "response note created");
                        notifier.notify(
                            NoticeKind::Success,
                            &format!("Response saved to new note: {path}"),
                        );
                    }
                    Err(error) => self.report_routing_failure(&error.to_string()),
                }
            }
            ResponseSink::Unknown(kind) => {
                tracing::warn!(sink = %kind, "unknown response sink, response dropped");
            }
        }
    }

    fn report_routing_failure(&self, message: &str) {
        tracing::warn!(error = %message, "response routing failed");
        self.ports
            .notifier
            .notify(NoticeKind::Error, &format!("Failed to handle response: {message}"));
    }

    async fn log_execution(&self, entry: &LogEntry) {
        match self.ports.log.append(entry).await {
            Ok(location) => tracing::debug!(%location, "execution logged"),
            Err(error) => {
                tracing::warn!(error = %error, "failed to write execution log");
                self.ports
                    .notifier
                    .notify(NoticeKind::Error, &format!("Failed to log API call: {error}"));
            }
        }
    }
}

/// Applies `{{input}}` and the built-in variables to every part of the
/// request.
///
/// The input pass only fills `{{input}}` and leaves every other placeholder
/// for the built-in pass, unlike plain [`substitute`](crate::template::substitute)
/// which blanks unknown names.
fn resolve_request(
    endpoint: &EndpointRecord,
    interpolator: &Interpolator,
    input_vars: &Variables,
) -> EndpointResult<ResolvedRequest> {
    let url = interpolator.interpolate(&substitute_known(&endpoint.url, input_vars));

    let headers = endpoint
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(|value| (name.clone(), interpolator.interpolate(value)))
        })
        .collect();

    let body = if endpoint.method.allows_body() {
        endpoint
            .body_template
            .as_ref()
            .map(|template| resolve_body(template, interpolator, input_vars))
            .transpose()?
    } else {
        None
    };

    Ok(ResolvedRequest {
        method: endpoint.method.clone(),
        url,
        headers,
        body,
    })
}

fn resolve_body(
    template: &BodyTemplate,
    interpolator: &Interpolator,
    input_vars: &Variables,
) -> EndpointResult<String> {
    match template {
        BodyTemplate::Raw(text) => Ok(interpolator.interpolate(&substitute_known(text, input_vars))),
        BodyTemplate::Object(value) => {
            let with_input = substitute_value_known(value, input_vars)
                .map_err(|e| EndpointError::InvalidTemplate(e.to_string()))?;
            let text = interpolator.interpolate(&with_input.to_string());
            let parsed: Value = serde_json::from_str(&text)
                .map_err(|e| EndpointError::InvalidTemplate(e.to_string()))?;
            Ok(parsed.to_string())
        }
    }
}
