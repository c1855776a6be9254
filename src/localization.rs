//! Prompt catalog for the bot.
//!
//! Every user-facing string, button labels included, lives in
//! `locales/ru/main.ftl`, which is compiled into the binary.

use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use tracing::{error, warn};
use unic_langid::LanguageIdentifier;

/// The only language the bot speaks
pub const DEFAULT_LOCALE: &str = "ru";

const MAIN_RESOURCE: &str = include_str!("../locales/ru/main.ftl");

/// Localization manager holding the compiled message bundle
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a manager from the embedded catalog
    pub fn new() -> Result<Self> {
        let locale: LanguageIdentifier = DEFAULT_LOCALE.parse()?;
        Self::from_source(locale, MAIN_RESOURCE)
    }

    /// Create a manager from Fluent source text
    pub fn from_source(locale: LanguageIdentifier, source: &str) -> Result<Self> {
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse Fluent resource: {errors:?}"))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Keep rendered text byte-exact, without Unicode isolation marks
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add Fluent resource: {errors:?}"))?;

        Ok(Self { bundle })
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(message) = self.bundle.get_message(key) else {
            return format!("Missing translation: {key}");
        };

        let Some(pattern) = message.value() else {
            return format!("Missing value for key: {key}");
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(key, ?errors, "Errors while formatting message");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.get_message(key, Some(&fluent_args))
    }

    pub fn has_message(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_none() {
        let manager = LocalizationManager::new()?;
        // A concurrent initializer may have won the race; either value is identical
        let _ = LOCALIZATION_MANAGER.set(manager);
    }
    Ok(())
}

fn localization_manager() -> Option<&'static LocalizationManager> {
    if LOCALIZATION_MANAGER.get().is_none() {
        if let Err(e) = init_localization() {
            error!(error = %e, "Localization catalog failed to load");
        }
    }
    LOCALIZATION_MANAGER.get()
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    match localization_manager() {
        Some(manager) => manager.get_message(key, None),
        None => key.to_string(),
    }
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    match localization_manager() {
        Some(manager) => manager.get_message_with_args(key, args),
        None => key.to_string(),
    }
}
