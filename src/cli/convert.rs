use super::ui;
use crate::core::{ConversionResult, ConvertError, RateProvider, RawParams, SymbolTable};
use clap::ValueEnum;
use comfy_table::{Cell, CellAlignment};
use tracing::error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical JSON document
    #[default]
    Json,
    /// Human readable table
    Table,
}

/// Rendered text for stdout and the process exit code.
#[derive(Debug)]
pub struct Outcome {
    pub body: String,
    pub exit_code: u8,
}

impl ConversionResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Amount")]);

        for (code, amount) in &self.output {
            table.add_row(vec![
                Cell::new(code),
                Cell::new(format!("{amount:.2}")).set_alignment(CellAlignment::Right),
            ]);
        }

        let mut output = format!(
            "Input: {}\n\n",
            ui::style_text(
                &format!("{} {}", self.input.amount, self.input.currency),
                ui::StyleType::Title
            )
        );
        output.push_str(&table.to_string());
        output
    }
}

fn render_error(err: &ConvertError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&err.to_json())
            .unwrap_or_else(|_| err.to_string()),
        OutputFormat::Table => ui::style_text(&err.to_string(), ui::StyleType::Error),
    }
}

fn render(result: &ConversionResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => result.to_json_pretty(),
        OutputFormat::Table => Ok(result.display_as_table()),
    }
}

/// Runs one conversion and renders either the result or the error.
pub async fn execute(
    params: &RawParams,
    format: OutputFormat,
    symbols: &SymbolTable,
    provider: &dyn RateProvider,
) -> Outcome {
    match crate::convert(params, symbols, provider).await {
        Ok(result) => match render(&result, format) {
            Ok(body) => Outcome { body, exit_code: 0 },
            Err(e) => {
                error!(error = %e, "Failed to render conversion result");
                Outcome {
                    body: e.to_string(),
                    exit_code: 1,
                }
            }
        },
        Err(err) => {
            error!(error = %err, code = err.code(), "Conversion failed");
            Outcome {
                body: render_error(&err, format),
                exit_code: err.exit_code(),
            }
        }
    }
}

/// Prints the outcome on stdout and returns the process exit status.
pub async fn run(
    params: &RawParams,
    format: OutputFormat,
    symbols: &SymbolTable,
    provider: &dyn RateProvider,
) -> u8 {
    let outcome = execute(params, format, symbols, provider).await;
    println!("{}", outcome.body);
    outcome.exit_code
}
