use crate::runner::Outcome;
use colored::*;
use data_api_core::{ClientError, ConfigError, FaultKind};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!(
            "{} {}\n\n{}\n\n{} {}",
            "Configuration Error:".red().bold(),
            err.name(),
            err.message(),
            "Suggestion:".yellow(),
            err.suggestion()
        ))
    }
}

impl From<&ClientError> for FormattedString {
    fn from(err: &ClientError) -> Self {
        let rendered = match err {
            ClientError::Configuration(err) => return FormattedString::from(err.clone()),
            ClientError::Remote { kind, fault } => match kind {
                FaultKind::Authentication | FaultKind::Authorization => format!(
                    "{} you do not have access to this object.\n\n'{}'",
                    "Access Denied:".red().bold(),
                    fault.message
                ),
                FaultKind::ObjectReference => format!(
                    "{} the object reference does not exist.\n\n'{}'",
                    "Not Found:".red().bold(),
                    fault.message
                ),
                FaultKind::Type => {
                    let mut rendered = format!(
                        "{} the object is not of the expected type.\n\n'{}'",
                        "Wrong Type:".red().bold(),
                        fault.message
                    );
                    if !fault.valid_types.is_empty() {
                        rendered.push_str(&format!(
                            "\n\nExpected one of: {}",
                            fault.valid_types.join(", ")
                        ));
                    }
                    rendered
                }
                FaultKind::Service => format!(
                    "{} the service failed to process the request.\n\n'{}'",
                    "Service Error:".red().bold(),
                    fault.message
                ),
                FaultKind::Attribute => format!(
                    "{} '{}'",
                    "Not Applicable:".yellow().bold(),
                    fault.message
                ),
            },
            ClientError::NotReady(_) | ClientError::Transport(_) | ClientError::Timeout(_) => {
                format!("{}\n\n'{}'", "Transport Error:".red().bold(), err)
            }
            ClientError::TransportConstruction(_) => format!(
                "{} check the logs for the underlying error.\n\n'{}'",
                "Client Error:".red().bold(),
                err
            ),
        };

        FormattedString(rendered)
    }
}

impl From<&Outcome> for FormattedString {
    fn from(outcome: &Outcome) -> Self {
        let header = format!(
            "{} {}",
            outcome.method.cyan().bold(),
            format!("({} ms)", outcome.elapsed.as_millis()).dimmed()
        );

        let body = match &outcome.result {
            Ok(Some(value)) => FormattedString::from(value.clone()).0,
            Ok(None) => "* n/a to this object *".dimmed().to_string(),
            Err(err) => FormattedString::from(err).0,
        };

        FormattedString(format!("{header}\n{body}"))
    }
}

impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(err) => FormattedString::from(err),
            Err(err) => FormattedString(format!("{}\n\n'{:#}'", "Error:".red().bold(), err)),
        }
    }
}
