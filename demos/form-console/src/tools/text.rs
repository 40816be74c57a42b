//! Case transforms over a block of text.

use async_trait::async_trait;
use kfunc::forms::{FormInstance, FormRecord};
use kfunc::tools::tool::{FormTool, ToolContext, ToolError, ToolOutput, ToolResult};

#[derive(Debug, Default, FormRecord)]
#[form(crate = "kfunc::forms")]
pub struct TextForm {
    #[form("name=Content,type=textarea,label=Text,placeholder=Enter text here,required=true")]
    pub content: String,
    #[form("name=Action,type=select,label=Action,options=Upper|Lower|Title,required=true")]
    pub action: String,
}

pub struct TextTool;

#[async_trait]
impl FormTool for TextTool {
    fn id(&self) -> &str {
        "text_tool"
    }

    fn name(&self) -> &str {
        "Text transform"
    }

    fn description(&self) -> &str {
        "Changes the letter case of a block of text"
    }

    fn space(&self) -> &str {
        "content"
    }

    fn new_form(&self) -> Box<dyn FormInstance> {
        Box::new(TextForm::default())
    }

    async fn run(&self, ctx: &ToolContext, form: Box<dyn FormInstance>) -> ToolResult<ToolOutput> {
        ctx.ensure_active()?;
        let form = form.downcast::<TextForm>()?;

        match form.action.as_str() {
            "Upper" => Ok(ToolOutput::Text(form.content.to_uppercase())),
            "Lower" => Ok(ToolOutput::Text(form.content.to_lowercase())),
            "Title" => Ok(ToolOutput::Text(title_case(&form.content))),
            other => Err(ToolError::execution(format!("unknown action: {other}"))),
        }
    }
}

/// Upper-cases the first letter of every word, leaving the rest as written.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric() && ch != '\'';
    }
    out
}

#[cfg(test)]
mod tests {
    use kfunc::forms::FormValues;
    use kfunc::tools::tool::submit;

    use super::*;

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(title_case("hello wORLD, it's rust"), "Hello WORLD, It's Rust");
    }

    #[tokio::test]
    async fn applies_the_selected_action() {
        let input: FormValues = [("Content", "Mixed Case"), ("Action", "Upper")].into_iter().collect();
        let output = submit(&TextTool, &ToolContext::new(), &input).await.unwrap();
        assert_eq!(output, ToolOutput::text("MIXED CASE"));
    }

    #[tokio::test]
    async fn unknown_action_fails() {
        let input: FormValues = [("Content", "x"), ("Action", "Reverse")].into_iter().collect();
        let err = submit(&TextTool, &ToolContext::new(), &input).await.unwrap_err();
        assert_eq!(err.to_string(), "tool execution failed: unknown action: Reverse");
    }
}
