/// Guess a `Content-Type` from the file name's extension.
///
/// Text types carry an explicit UTF-8 charset so browsers render them inline
/// correctly. Unknown extensions fall back to `application/octet-stream`.
pub fn guess_mime_type(filename: &str) -> String {
    let mime = mime_guess::from_path(filename).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT && mime.get_param("charset").is_none() {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}
