/// Parse a `--recipes` value. Zero is rejected.
pub fn parse_corpus_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a recipe count", s))?;
    if size == 0 {
        return Err("Recipe count must be at least 1".to_string());
    }
    Ok(size)
}

/// Split a comma-separated seed list, trimming entries and dropping empty ones.
pub fn split_seeds(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(str::to_string)
        .collect()
}
