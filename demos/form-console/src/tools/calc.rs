//! Four-function calculator.

use async_trait::async_trait;
use kfunc::forms::{FormInstance, FormRecord};
use kfunc::tools::tool::{FormTool, ToolContext, ToolError, ToolOutput, ToolResult};
use serde::Serialize;

#[derive(Debug, Default, FormRecord)]
#[form(crate = "kfunc::forms")]
pub struct CalcForm {
    #[form("name=A,type=number,label=A,required=true")]
    pub a: f64,
    #[form("name=B,type=number,label=B,required=true")]
    pub b: f64,
    #[form("name=Op,type=radio,label=Operation,options=add|sub|mul|div,required=true")]
    pub op: String,
    #[form("name=Labels,type=multiselect,label=Labels,options=fast|exact|experimental")]
    pub labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Calculation {
    result: f64,
    labels: Vec<String>,
    explain: String,
}

pub struct CalcTool;

#[async_trait]
impl FormTool for CalcTool {
    fn id(&self) -> &str {
        "calc_tool"
    }

    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Runs basic arithmetic and attaches labels"
    }

    fn space(&self) -> &str {
        "math"
    }

    fn new_form(&self) -> Box<dyn FormInstance> {
        Box::new(CalcForm::default())
    }

    async fn run(&self, ctx: &ToolContext, form: Box<dyn FormInstance>) -> ToolResult<ToolOutput> {
        ctx.ensure_active()?;
        let CalcForm { a, b, op, labels } = *form.downcast::<CalcForm>()?;

        let result = match op.as_str() {
            "add" => a + b,
            "sub" => a - b,
            "mul" => a * b,
            "div" => {
                if b == 0.0 {
                    return Err(ToolError::execution("division by zero"));
                }
                a / b
            }
            other => return Err(ToolError::execution(format!("unknown operation: {other}"))),
        };

        ToolOutput::json(Calculation {
            result,
            labels,
            explain: format!("{a} {op} {b} = {result}"),
        })
    }
}
