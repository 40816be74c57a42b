//! Tool capability trait, run context and output.

use std::fmt;

use async_trait::async_trait;
use kfunc_forms::{FormError, FormInstance, FormValues, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Capability set every tool implements.
#[async_trait]
pub trait FormTool: Send + Sync {
    /// Unique identifier used for lookup.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Short description of what the tool does.
    fn description(&self) -> &str;

    /// Space the tool is grouped under.
    fn space(&self) -> &str;

    /// Fresh, zero-valued input form.
    fn new_form(&self) -> Box<dyn FormInstance>;

    /// Schema of the tool's input form.
    fn schema(&self) -> Schema {
        self.new_form().schema()
    }

    /// Processes a populated input form.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Form`] when `form` is not the tool's record type,
    /// [`ToolError::Cancelled`] when the tool honours cancellation, and
    /// [`ToolError::Execution`] for tool-specific failures.
    async fn run(&self, ctx: &ToolContext, form: Box<dyn FormInstance>) -> ToolResult<ToolOutput>;
}

/// Builds a fresh form for `tool`, binds `values` onto it and runs the tool.
///
/// # Errors
///
/// Returns [`ToolError::Form`] when binding fails; the half-populated form is
/// dropped. Otherwise propagates the tool's own error.
pub async fn submit(
    tool: &dyn FormTool,
    ctx: &ToolContext,
    values: &FormValues,
) -> ToolResult<ToolOutput> {
    let mut form = tool.new_form();
    form.bind(values)?;
    tool.run(ctx, form).await
}

/// Per-invocation context handed to [`FormTool::run`].
#[derive(Clone, Debug, Default)]
pub struct ToolContext {
    cancellation: CancellationToken,
}

impl ToolContext {
    /// Creates a context with a fresh cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context observing the supplied token.
    #[must_use]
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Token the caller may cancel.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns `true` once the caller has cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fails with [`ToolError::Cancelled`] if the caller has cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Cancelled`] after cancellation.
    pub fn ensure_active(&self) -> ToolResult<()> {
        if self.is_cancelled() {
            return Err(ToolError::Cancelled);
        }
        Ok(())
    }
}

/// Result produced by a tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ToolOutput {
    /// Plain text.
    Text(String),
    /// A single number.
    Number(f64),
    /// Structured data.
    Json(Value),
}

impl ToolOutput {
    /// Creates a text output.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Serializes `value` into a structured output.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Execution`] if `value` cannot be represented as JSON.
    pub fn json(value: impl Serialize) -> ToolResult<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|err| ToolError::execution(format!("unserializable output: {err}")))
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Json(value) => write!(f, "{value:#}"),
        }
    }
}

/// Errors produced by tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Input could not be bound or was not the expected record type.
    #[error("invalid input: {0}")]
    Form(#[from] FormError),

    /// Caller cancelled the invocation.
    #[error("tool invocation cancelled")]
    Cancelled,

    /// Tool execution failed.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ToolError {
    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kfunc_forms::FormRecord;

    use super::*;

    #[derive(Debug, Default, FormRecord)]
    pub struct RepeatForm {
        #[form("type=text,label=Word,required=true")]
        pub word: String,
        #[form("type=number,label=Times")]
        pub times: usize,
    }

    #[derive(Debug, Default, FormRecord)]
    pub struct UnrelatedForm {
        pub value: String,
    }

    struct Repeat;

    #[async_trait]
    impl FormTool for Repeat {
        fn id(&self) -> &str {
            "repeat"
        }

        fn name(&self) -> &str {
            "Repeat"
        }

        fn description(&self) -> &str {
            "Repeats a word"
        }

        fn space(&self) -> &str {
            "content"
        }

        fn new_form(&self) -> Box<dyn FormInstance> {
            Box::new(RepeatForm::default())
        }

        async fn run(
            &self,
            ctx: &ToolContext,
            form: Box<dyn FormInstance>,
        ) -> ToolResult<ToolOutput> {
            ctx.ensure_active()?;
            let form = form.downcast::<RepeatForm>()?;
            Ok(ToolOutput::text(form.word.repeat(form.times)))
        }
    }

    #[tokio::test]
    async fn submit_binds_and_runs() {
        let values: FormValues = [("word", "ab"), ("times", "3")].into_iter().collect();
        let output = submit(&Repeat, &ToolContext::new(), &values).await.unwrap();
        assert_eq!(output, ToolOutput::text("ababab"));
    }

    #[tokio::test]
    async fn submit_surfaces_coercion_errors() {
        let values: FormValues = [("times", "many")].into_iter().collect();
        let err = submit(&Repeat, &ToolContext::new(), &values).await.unwrap_err();
        assert!(matches!(err, ToolError::Form(FormError::Coercion { .. })));
    }

    #[tokio::test]
    async fn foreign_form_is_rejected() {
        let err = Repeat
            .run(&ToolContext::new(), Box::new(UnrelatedForm::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Form(FormError::InvalidTarget { .. })));
    }

    #[tokio::test]
    async fn cancelled_context_stops_the_tool() {
        let token = CancellationToken::new();
        token.cancel();
        let err = Repeat
            .run(&ToolContext::with_cancellation(token), Repeat.new_form())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Cancelled));
    }

    #[test]
    fn tool_schema_comes_from_its_form() {
        let schema = Repeat.schema();
        assert_eq!(schema.len(), 2);
        assert!(schema.get("word").unwrap().required());
    }

    #[test]
    fn output_serializes_with_type_tag() {
        let value = serde_json::to_value(ToolOutput::Number(2.5)).unwrap();
        assert_eq!(value, serde_json::json!({ "type": "number", "value": 2.5 }));
        assert_eq!(ToolOutput::text("hi").to_string(), "hi");
    }
}
