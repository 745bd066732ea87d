pub mod icon_llm;
pub mod progress_file;
pub mod time_llm;

pub use icon_llm::OpenAiIconAdapter;
pub use progress_file::FileProgressRepository;
pub use time_llm::OpenAiTimeAdapter;

/// Strips a markdown code fence from a model response so the remainder can be
/// fed to the JSON parser. Models wrap JSON in ```json fences often enough
/// that both suggestion adapters need this.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

#[cfg(test)]
mod tests {
    use super::strip_code_fences;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }
}
