//! # I18n Unit Tests / I18n 单元测试
//!
//! The selected locale is process-global, so every check lives in one test
//! to keep them from racing each other.
//!
//! 所选语言是进程全局的，因此所有检查放在同一个测试中，避免相互竞争。

use casper_runner::set_language;

fn current() -> String {
    rust_i18n::locale().to_string()
}

#[test]
fn test_language_selection_and_fallback() {
    // Exact match
    set_language("zh-CN");
    assert_eq!(current(), "zh-CN");

    set_language("en");
    assert_eq!(current(), "en");

    // Language prefix of a regional locale
    set_language("en-US");
    assert_eq!(current(), "en");
    set_language("en_GB");
    assert_eq!(current(), "en");

    // Unsupported languages fall back to English
    set_language("zh-CN");
    set_language("fr-FR");
    assert_eq!(current(), "en");

    set_language("zh-CN");
    set_language("zh-TW");
    assert_eq!(current(), "en");

    set_language("");
    assert_eq!(current(), "en");
}

