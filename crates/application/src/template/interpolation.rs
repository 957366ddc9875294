//! Built-in variable interpolation
//!
//! Two passes run in a fixed order. The settings-scope pass fills
//! `{{title}}`, `{{filepath}}`, `{{token}}` and named tokens; the extra-scope
//! pass fills `{{date}}`, `{{vault}}` and `{{plugin-id}}`. The interactive
//! `{{input}}` variable is handled by the executor before either pass.

use bridge_domain::{Settings, TokenMap};
use chrono::{DateTime, SecondsFormat, Utc};

use super::placeholder::{has_placeholders, substitute_known};
use crate::ports::{ActiveDocument, Clock, WorkspaceContext};

/// Values captured once per execution and reused for every template.
#[derive(Debug, Clone)]
pub struct Interpolator {
    active_document: Option<ActiveDocument>,
    default_token: String,
    tokens: TokenMap,
    now: DateTime<Utc>,
    vault: String,
    plugin_id: String,
}

impl Interpolator {
    /// Captures the workspace, token and time state for one execution.
    #[must_use]
    pub fn capture(
        workspace: &dyn WorkspaceContext,
        settings: &Settings,
        clock: &dyn Clock,
        plugin_id: impl Into<String>,
    ) -> Self {
        Self {
            active_document: workspace.active_document(),
            default_token: settings.default_token().unwrap_or_default().to_string(),
            tokens: settings.tokens.clone(),
            now: clock.now(),
            vault: workspace.vault_name(),
            plugin_id: plugin_id.into(),
        }
    }

    /// Returns the instant substituted for `{{date}}`.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Runs the settings-scope pass.
    ///
    /// `{{title}}` and `{{filepath}}` stay untouched when no document is
    /// active. `{{token}}` becomes the `default` token or the empty string.
    #[must_use]
    pub fn interpolate_settings_variables(&self, template: &str) -> String {
        let mut result = template.to_string();

        if let Some(document) = &self.active_document {
            result = result
                .replace("{{title}}", &document.basename)
                .replace("{{filepath}}", &document.path);
        }

        result = result.replace("{{token}}", &self.default_token);

        substitute_known(&result, &self.tokens)
    }

    /// Runs the extra-scope pass.
    #[must_use]
    pub fn interpolate_extra_variables(&self, template: &str) -> String {
        template
            .replace(
                "{{date}}",
                &self.now.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .replace("{{vault}}", &self.vault)
            .replace("{{plugin-id}}", &self.plugin_id)
    }

    /// Runs both passes.
    #[must_use]
    pub fn interpolate(&self, template: &str) -> String {
        if !has_placeholders(template) {
            return template.to_string();
        }
        let settings_pass = self.interpolate_settings_variables(template);
        self.interpolate_extra_variables(&settings_pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct Workspace(Option<ActiveDocument>);

    impl WorkspaceContext for Workspace {
        fn active_document(&self) -> Option<ActiveDocument> {
            self.0.clone()
        }

        fn vault_name(&self) -> String {
            "My Vault".to_string()
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 1).single().unwrap_or_default())
    }

    fn interpolator(document: Option<&str>, settings: &Settings) -> Interpolator {
        let workspace = Workspace(document.map(ActiveDocument::from_path));
        Interpolator::capture(&workspace, settings, &clock(), "obsidian-api-bridge")
    }

    #[test]
    fn test_document_variables_without_token() {
        let interpolator = interpolator(Some("folder/Notes.md"), &Settings::default());
        assert_eq!(
            interpolator.interpolate("{{title}} @ {{filepath}} [{{token}}]"),
            "Notes @ folder/Notes.md []"
        );
    }

    #[test]
    fn test_document_variables_left_when_nothing_active() {
        let interpolator = interpolator(None, &Settings::default());
        assert_eq!(
            interpolator.interpolate("{{title}}|{{filepath}}"),
            "{{title}}|{{filepath}}"
        );
    }

    #[test]
    fn test_default_and_named_tokens() {
        let mut settings = Settings::default();
        settings.tokens.insert("default".into(), "abc".into());
        settings.tokens.insert("github".into(), "ghp".into());

        let interpolator = interpolator(None, &settings);
        assert_eq!(
            interpolator.interpolate("Bearer {{token}} / {{github}} / {{unknown}}"),
            "Bearer abc / ghp / {{unknown}}"
        );
    }

    #[test]
    fn test_extra_variables() {
        let interpolator = interpolator(None, &Settings::default());
        assert_eq!(
            interpolator.interpolate("{{date}} {{vault}} {{plugin-id}}"),
            "2024-03-09T08:05:01.000Z My Vault obsidian-api-bridge"
        );
    }

    #[test]
    fn test_input_is_not_a_builtin() {
        let interpolator = interpolator(Some("a.md"), &Settings::default());
        assert_eq!(interpolator.interpolate("q={{input}}"), "q={{input}}");
    }
}
