//! Validation of interaction and preset documents
//!
//! Goes beyond deserialization: every entry is checked individually so one
//! bad entry does not hide the others, and semantic problems that the model
//! tolerates (duplicate names, enabled sounds without a file, out-of-range
//! volumes) are reported as warnings.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{json_kind, ActionType, Interaction, InteractionError};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// File is not valid JSON
    JsonSyntax,
    /// Top-level value has the wrong shape
    InvalidDocument,
    /// Entry lacks name, trigger, action or effect
    MissingField,
    /// Entry field has the wrong type or an unknown enum value
    InvalidField,
    /// Multiple interactions with the same name
    DuplicateName,
    /// Sound is enabled but no file is set
    SoundWithoutFile,
    /// Volume outside 0.0-1.0
    VolumeRange,
    /// Haptic feedback requested, which no target supports
    HapticUnsupported,
    /// Action requires a parameter that is absent
    MissingParam,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IssueType::JsonSyntax => "json_syntax",
            IssueType::InvalidDocument => "invalid_document",
            IssueType::MissingField => "missing_field",
            IssueType::InvalidField => "invalid_field",
            IssueType::DuplicateName => "duplicate_name",
            IssueType::SoundWithoutFile => "sound_without_file",
            IssueType::VolumeRange => "volume_range",
            IssueType::HapticUnsupported => "haptic_unsupported",
            IssueType::MissingParam => "missing_param",
        };
        f.write_str(name)
    }
}

/// A validation issue found in a document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub issue_type: IssueType,
    pub message: String,
    /// Where the issue is, e.g. `interactions[2]` or `presets.calm.interactions[0]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn error(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, issue_type, message: message.into(), location: None }
    }

    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, issue_type, message: message.into(), location: None }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => {
                write!(f, "{} [{}] {}: {}", self.severity, self.issue_type, location, self.message)
            }
            None => write!(f, "{} [{}] {}", self.severity, self.issue_type, self.message),
        }
    }
}

/// Collects validation issues across one or more documents.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Validate a file, detecting whether it is a preset library or an
    /// interaction document.
    pub fn validate_file(&mut self, path: &Path) -> std::io::Result<()> {
        let content = fs::read_to_string(path)?;
        self.validate_str(&content);
        Ok(())
    }

    /// Validate JSON text.
    pub fn validate_str(&mut self, content: &str) {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => self.validate_value(&value),
            Err(e) => self.push(ValidationIssue::error(IssueType::JsonSyntax, e.to_string())),
        }
    }

    /// Validate a parsed document.
    pub fn validate_value(&mut self, value: &Value) {
        let Some(object) = value.as_object() else {
            self.push(ValidationIssue::error(
                IssueType::InvalidDocument,
                format!("expected an object, found {}", json_kind(value)),
            ));
            return;
        };

        if object.contains_key("presets") {
            self.validate_presets(&object["presets"]);
        } else {
            self.validate_interaction_list(object.get("interactions"), "interactions");
        }
    }

    fn validate_presets(&mut self, presets: &Value) {
        let Some(presets) = presets.as_object() else {
            self.push(
                ValidationIssue::error(
                    IssueType::InvalidDocument,
                    format!("'presets' must be an object, found {}", json_kind(presets)),
                )
                .at("presets"),
            );
            return;
        };
        for (key, preset) in presets {
            let location = format!("presets.{}.interactions", key);
            self.validate_interaction_list(preset.get("interactions"), &location);
        }
    }

    fn validate_interaction_list(&mut self, list: Option<&Value>, location: &str) {
        let entries = match list {
            None | Some(Value::Null) => return,
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                self.push(
                    ValidationIssue::error(
                        IssueType::InvalidDocument,
                        format!("expected an array, found {}", json_kind(other)),
                    )
                    .at(location),
                );
                return;
            }
        };

        let mut seen: HashSet<String> = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let entry_location = format!("{}[{}]", location, index);
            match Interaction::from_value(entry) {
                Ok(interaction) => {
                    if !seen.insert(interaction.name.clone()) {
                        self.push(
                            ValidationIssue::warning(
                                IssueType::DuplicateName,
                                format!(
                                    "'{}' is already defined; lookups resolve to the first one",
                                    interaction.name
                                ),
                            )
                            .at(&entry_location),
                        );
                    }
                    self.check_interaction(&interaction, &entry_location);
                }
                Err(error) => {
                    let issue_type = match error {
                        InteractionError::MissingField(_) => IssueType::MissingField,
                        InteractionError::NotAnObject(_) | InteractionError::InvalidField { .. } => {
                            IssueType::InvalidField
                        }
                    };
                    self.push(ValidationIssue::error(issue_type, error.to_string()).at(entry_location));
                }
            }
        }
    }

    fn check_interaction(&mut self, interaction: &Interaction, location: &str) {
        let sound = &interaction.sound;
        if sound.enabled && sound.file.as_deref().map_or(true, str::is_empty) {
            self.push(
                ValidationIssue::warning(
                    IssueType::SoundWithoutFile,
                    "sound is enabled but no file is set; it will not play",
                )
                .at(location),
            );
        }
        if !(0.0..=1.0).contains(&sound.volume) {
            self.push(
                ValidationIssue::warning(
                    IssueType::VolumeRange,
                    format!("volume {} is outside 0.0-1.0", sound.volume),
                )
                .at(location),
            );
        }
        if interaction.feedback.haptic {
            self.push(
                ValidationIssue::warning(
                    IssueType::HapticUnsupported,
                    "haptic feedback is reserved and has no effect",
                )
                .at(location),
            );
        }
        if let Some(param) = required_param(interaction.action) {
            if !interaction.params.contains_key(param) {
                self.push(
                    ValidationIssue::warning(
                        IssueType::MissingParam,
                        format!("action '{}' does nothing without params.{}", interaction.action, param),
                    )
                    .at(location),
                );
            }
        }
    }
}

/// Parameter an action needs to have any effect in generated code.
fn required_param(action: ActionType) -> Option<&'static str> {
    match action {
        ActionType::PlaySound => Some("soundFile"),
        ActionType::ChangeAnimation => Some("animation"),
        ActionType::ShowText | ActionType::ShowTooltip => Some("text"),
        ActionType::ChangeSkin => Some("skin"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_registry;
    use serde_json::json;

    fn issues_for(value: Value) -> Vec<ValidationIssue> {
        let mut validator = Validator::new();
        validator.validate_value(&value);
        validator.into_issues()
    }

    #[test]
    fn test_defaults_are_clean() {
        let issues = issues_for(default_registry().export_value());
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_reports_every_malformed_entry() {
        let issues = issues_for(json!({"interactions": [
            {"name": "a", "trigger": "click"},
            {"name": "b", "trigger": "poke", "action": "bounce", "effect": {"type": "none"}},
            "oops"
        ]}));
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].issue_type, IssueType::MissingField);
        assert_eq!(issues[0].location.as_deref(), Some("interactions[0]"));
        assert_eq!(issues[1].issue_type, IssueType::InvalidField);
        assert_eq!(issues[2].issue_type, IssueType::InvalidField);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_warnings() {
        let issues = issues_for(json!({"interactions": [
            {"name": "x", "trigger": "click", "action": "bounce", "effect": {"type": "none"},
             "sound": {"enabled": true, "volume": 1.5}, "feedback": {"haptic": true}},
            {"name": "x", "trigger": "hover", "action": "show_text", "effect": {"type": "glow"}}
        ]}));
        let types: Vec<_> = issues.iter().map(|i| i.issue_type).collect();
        assert_eq!(
            types,
            [
                IssueType::SoundWithoutFile,
                IssueType::VolumeRange,
                IssueType::HapticUnsupported,
                IssueType::DuplicateName,
                IssueType::MissingParam,
            ]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_preset_library() {
        let issues = issues_for(json!({"presets": {
            "calm": {"interactions": [{"name": "bad"}]},
            "ok": {"interactions": []}
        }}));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location.as_deref(), Some("presets.calm.interactions[0]"));
    }

    #[test]
    fn test_bad_shapes() {
        let mut validator = Validator::new();
        validator.validate_str("{ nope");
        validator.validate_value(&json!(42));
        validator.validate_value(&json!({"interactions": {}}));
        validator.validate_value(&json!({"presets": []}));
        let types: Vec<_> = validator.issues().iter().map(|i| i.issue_type).collect();
        assert_eq!(
            types,
            [
                IssueType::JsonSyntax,
                IssueType::InvalidDocument,
                IssueType::InvalidDocument,
                IssueType::InvalidDocument,
            ]
        );
        assert!(validator.has_errors());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::warning(IssueType::DuplicateName, "dup").at("interactions[1]");
        assert_eq!(issue.to_string(), "WARNING [duplicate_name] interactions[1]: dup");
    }
}
