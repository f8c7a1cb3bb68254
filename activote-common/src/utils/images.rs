pub const DEFAULT_PROFILE_IMAGE: &str = "/default-profile.png";
pub const DEFAULT_CANDIDATE_IMAGE: &str = "/default.jpg";

/// Resolves a voter's profile image reference.
///
/// Uploaded images are served by the backend, so `/uploads/...` paths are
/// prefixed with the backend origin (e.g. `http://localhost:8080`).
pub fn resolve_user_image(origin: &str, image: Option<&str>) -> String {
    match image.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_PROFILE_IMAGE.to_string(),
        Some(path) if path.starts_with("/uploads") => {
            format!("{}{}", origin.trim_end_matches('/'), path)
        }
        Some(other) => other.to_string(),
    }
}

/// Candidate portraits are bundled assets addressed by file name.
pub fn resolve_candidate_image(image_url: Option<&str>) -> String {
    match image_url.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => format!("/images/{}", name),
        None => DEFAULT_CANDIDATE_IMAGE.to_string(),
    }
}
