/*!
 * Language utilities for ISO language code handling.
 *
 * This module holds the numbered target-language menu offered to users and
 * helpers for validating ISO 639-1 (2-letter) and ISO 639-3 (3-letter) codes.
 */

use anyhow::{anyhow, Result};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language code type
#[derive(Debug, PartialEq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part1);
    }
    if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();
    let lang = match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code),
        LanguageCodeType::Part3 => Language::from_639_3(&normalized_code),
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// `code (Name)` when the code is known, the bare code otherwise
pub fn display_language(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", code, name),
        Err(_) => code.to_string(),
    }
}

/// Numbered menu of target languages.
///
/// Keys are the short option codes a caller submits ("1", "2", ...); values are
/// the ISO 639-1 codes handed to the translation backend. Unknown keys resolve
/// to `fallback_language`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageMenu {
    /// Option code to ISO 639-1 code
    #[serde(default = "default_menu_entries")]
    pub entries: BTreeMap<String, String>,

    /// Language used for unrecognized option codes
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
}

impl Default for LanguageMenu {
    fn default() -> Self {
        Self {
            entries: default_menu_entries(),
            fallback_language: default_fallback_language(),
        }
    }
}

impl LanguageMenu {
    /// Resolve an option code to a language code
    pub fn resolve(&self, option: &str) -> &str {
        self.entries
            .get(option.trim())
            .map(String::as_str)
            .unwrap_or(self.fallback_language.as_str())
    }

    /// Menu entries ordered by their option number
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(key, code)| (key.as_str(), code.as_str()))
            .collect();
        entries.sort_by_key(|(key, _)| (key.parse::<u32>().unwrap_or(u32::MAX), key.to_string()));
        entries
    }

    /// Human-readable menu lines in option order, ending with the fallback
    pub fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .sorted_entries()
            .into_iter()
            .map(|(key, code)| format!("{:>3}. {}", key, display_language(code)))
            .collect();
        lines.push(format!("Fallback: {}", display_language(&self.fallback_language)));
        lines
    }

    /// Check that every code in the menu is a real language
    pub fn validate(&self) -> Result<()> {
        validate_language_code(&self.fallback_language)
            .map_err(|_| anyhow!("Invalid fallback language: {}", self.fallback_language))?;

        for (key, code) in &self.entries {
            validate_language_code(code)
                .map_err(|_| anyhow!("Invalid language code '{}' for menu option {}", code, key))?;
        }

        Ok(())
    }
}

fn default_menu_entries() -> BTreeMap<String, String> {
    [
        ("1", "ta"),
        ("2", "hi"),
        ("3", "te"),
        ("4", "or"),
        ("5", "kn"),
        ("6", "ml"),
        ("7", "bn"),
        ("8", "gu"),
        ("9", "mr"),
        ("10", "pa"),
        ("11", "ur"),
        ("12", "en"),
    ]
    .into_iter()
    .map(|(key, code)| (key.to_string(), code.to_string()))
    .collect()
}

fn default_fallback_language() -> String {
    "en".to_string()
}
