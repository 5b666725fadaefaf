use std::path::PathBuf;

pub fn default_source() -> PathBuf {
    PathBuf::from("recipes.jsonl")
}

pub fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache/umami")
}

pub fn default_corpus_size() -> usize {
    10_000
}

pub fn default_recommendations() -> usize {
    5
}
