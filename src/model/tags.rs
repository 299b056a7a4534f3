use regex::Regex;
use std::sync::OnceLock;

fn hashtag() -> &'static Regex {
    static HASHTAG: OnceLock<Regex> = OnceLock::new();
    // `\w` is Unicode-aware in the regex crate.
    HASHTAG.get_or_init(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"))
}

/// Every `#word` in `content`, in order of occurrence. Duplicates are kept.
pub fn extract_tags(content: &str) -> Vec<String> {
    hashtag()
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}
