const SUPPORTED_HOST_MARKERS: &[&str] = &["youtube.com", "youtu.be"];

/// Cheap gate applied before a pipeline run; yt-dlp does the real parsing.
pub fn is_supported_video_url(url: &str) -> bool {
    SUPPORTED_HOST_MARKERS
        .iter()
        .any(|marker| url.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_youtube_hosts() {
        assert!(is_supported_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_supported_video_url("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(!is_supported_video_url("https://vimeo.com/123"));
        assert!(!is_supported_video_url(""));
    }
}
