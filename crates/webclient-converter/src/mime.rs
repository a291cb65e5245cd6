//! MIME type classification.

/// Splits off parameters and lowercases, e.g. `Image/PNG; q=1` becomes `image/png`.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Image types the clients can render inline.
pub fn is_supported_image(mime_type: &str) -> bool {
    let essence = essence(mime_type);
    essence.starts_with("image/") && essence != "image/svg+xml"
}

pub fn is_gif(mime_type: &str) -> bool {
    essence(mime_type) == "image/gif"
}

pub fn is_audio(mime_type: &str) -> bool {
    essence(mime_type).starts_with("audio/")
}

pub fn is_video(mime_type: &str) -> bool {
    essence(mime_type).starts_with("video/")
}

/// Preferred file extension for a MIME type, without the dot.
pub fn extension(mime_type: &str) -> Option<&'static str> {
    let extension = match essence(mime_type).as_str() {
        "application/pdf" => "pdf",
        "application/zip" => "zip",
        "application/json" => "json",
        "application/xml" | "text/xml" => "xml",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        "application/vnd.ms-excel" => "xls",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => "xlsx",
        "application/vnd.ms-powerpoint" => "ppt",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => "pptx",
        "application/vnd.android.package-archive" => "apk",
        "text/plain" => "txt",
        "text/html" => "html",
        "text/csv" => "csv",
        "text/vcard" | "text/x-vcard" => "vcf",
        "image/jpeg" => "jpeg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/heic" => "heic",
        "image/svg+xml" => "svg",
        "audio/aac" => "aac",
        "audio/mp4" | "audio/x-m4a" => "m4a",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        "audio/opus" => "opus",
        "audio/wav" | "audio/x-wav" => "wav",
        "video/mp4" => "mp4",
        "video/3gpp" => "3gp",
        "video/quicktime" => "mov",
        "video/webm" => "webm",
        "video/x-matroska" => "mkv",
        _ => return None,
    };
    Some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_classification() {
        assert!(is_supported_image("image/png"));
        assert!(is_supported_image("IMAGE/JPEG; charset=binary"));
        assert!(!is_supported_image("image/svg+xml"));
        assert!(is_gif("image/gif"));
        assert!(!is_supported_image("application/pdf"));
    }

    #[test]
    fn media_classification() {
        assert!(is_audio("audio/ogg"));
        assert!(is_video("video/mp4"));
        assert!(!is_video("audio/mp4"));
    }

    #[test]
    fn extensions() {
        assert_eq!(extension("application/pdf"), Some("pdf"));
        assert_eq!(extension("image/jpeg"), Some("jpeg"));
        assert_eq!(extension("application/x-unknown"), None);
    }
}
