/*!
 * Tests for the language menu and ISO code helpers
 */

use weblingo::language_utils::{get_language_name, validate_language_code, LanguageCodeType, LanguageMenu};

#[test]
fn test_menu_resolve_shouldMapEveryDefaultOption() {
    let menu = LanguageMenu::default();
    let expected = [
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
    ];
    for (option, code) in expected {
        assert_eq!(menu.resolve(option), code, "option {}", option);
    }
}

#[test]
fn test_menu_resolve_withUnknownOption_shouldFallBack() {
    let menu = LanguageMenu::default();
    assert_eq!(menu.resolve("99"), "en");
    assert_eq!(menu.resolve(""), "en");
    assert_eq!(menu.resolve("hi"), "en");
}

#[test]
fn test_menu_sorted_entries_shouldUseNumericOrder() {
    let menu = LanguageMenu::default();
    let keys: Vec<&str> = menu.sorted_entries().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys.first(), Some(&"1"));
    assert_eq!(keys[9], "10");
    assert_eq!(keys.last(), Some(&"12"));
}

#[test]
fn test_menu_describe_shouldNameLanguages() {
    let lines = LanguageMenu::default().describe();
    assert_eq!(lines.len(), 13);
    assert!(lines[1].contains("hi (Hindi)"));
    assert_eq!(lines.last().map(String::as_str), Some("Fallback: en (English)"));
}

#[test]
fn test_validate_language_code_shouldDistinguishParts() {
    assert_eq!(validate_language_code("hi").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("hin").unwrap(), LanguageCodeType::Part3);
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ta").unwrap(), "Tamil");
    assert_eq!(get_language_name("BN").unwrap(), "Bengali");
    assert!(get_language_name("xx").is_err());
}
