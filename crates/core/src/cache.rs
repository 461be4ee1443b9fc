use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

/// Get the cache directory for a given URL
pub fn get_cache_dir(cache_root: &Path, url: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    let url_hash = hasher.finish();

    cache_root.join(url_hash.to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("quizgen")
}

pub fn get_model_dir(cache_root: &Path) -> PathBuf {
    cache_root.join("models")
}

/// Parent of the per-run workspaces
pub fn get_workspace_root(cache_root: &Path) -> PathBuf {
    cache_root.join("workspaces")
}

/// Get the path for a cached quiz file
pub fn get_quiz_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("quiz.json")
}
