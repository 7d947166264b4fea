//! MIME type detection module
//!
//! Maps a closed set of file-extension categories to their Content-Type.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_JAVASCRIPT: &str = "text/javascript";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_JPEG: &str = "image/jpeg";
pub const IMAGE_GIF: &str = "image/gif";
pub const IMAGE_BMP: &str = "image/bmp";
pub const IMAGE_ICON: &str = "image/vnd.microsoft.icon";
pub const IMAGE_TIFF: &str = "image/tiff";
pub const IMAGE_SVG: &str = "image/svg+xml";
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// File-extension category of a static asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileExtension {
    Html,
    Css,
    Text,
    Js,
    Json,
    Xml,
    Png,
    Jpeg,
    Gif,
    Bmp,
    Ico,
    Tiff,
    Svg,
    Mp3,
    Unknown,
}

impl FileExtension {
    /// Classify a bare extension (without the dot), case-insensitively
    pub fn from_extension(extension: Option<&str>) -> Self {
        let Some(ext) = extension else {
            return Self::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "txt" => Self::Text,
            "js" => Self::Js,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "png" => Self::Png,
            "jpg" | "jpeg" | "jpe" => Self::Jpeg,
            "gif" => Self::Gif,
            "bmp" => Self::Bmp,
            "ico" => Self::Ico,
            "tiff" | "tif" => Self::Tiff,
            "svg" | "svgz" => Self::Svg,
            "mp3" => Self::Mp3,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => TEXT_HTML,
            Self::Css => TEXT_CSS,
            Self::Text => TEXT_PLAIN,
            Self::Js => TEXT_JAVASCRIPT,
            Self::Json => APPLICATION_JSON,
            Self::Xml => APPLICATION_XML,
            Self::Png => IMAGE_PNG,
            Self::Jpeg => IMAGE_JPEG,
            Self::Gif => IMAGE_GIF,
            Self::Bmp => IMAGE_BMP,
            Self::Ico => IMAGE_ICON,
            Self::Tiff => IMAGE_TIFF,
            Self::Svg => IMAGE_SVG,
            Self::Mp3 => AUDIO_MPEG,
            Self::Unknown => APPLICATION_OCTET_STREAM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_content_type(extension: Option<&str>) -> &'static str {
        FileExtension::from_extension(extension).content_type()
    }

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html");
        assert_eq!(get_content_type(Some("htm")), "text/html");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "text/javascript");
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("jpe")), "image/jpeg");
        assert_eq!(get_content_type(Some("ico")), "image/vnd.microsoft.icon");
        assert_eq!(get_content_type(Some("tif")), "image/tiff");
        assert_eq!(get_content_type(Some("svgz")), "image/svg+xml");
        assert_eq!(get_content_type(Some("mp3")), "audio/mpeg");
        assert_eq!(get_content_type(Some("txt")), "text/plain");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(FileExtension::from_extension(Some("JPEG")), FileExtension::Jpeg);
        assert_eq!(
            FileExtension::from_path(Path::new("/www/Index.HTML")),
            FileExtension::Html
        );
    }

    #[test]
    fn test_mapping_is_total() {
        let all = [
            FileExtension::Html,
            FileExtension::Css,
            FileExtension::Text,
            FileExtension::Js,
            FileExtension::Json,
            FileExtension::Xml,
            FileExtension::Png,
            FileExtension::Jpeg,
            FileExtension::Gif,
            FileExtension::Bmp,
            FileExtension::Ico,
            FileExtension::Tiff,
            FileExtension::Svg,
            FileExtension::Mp3,
            FileExtension::Unknown,
        ];
        for ext in all {
            assert!(!ext.content_type().is_empty(), "{ext:?} has no MIME type");
        }
        assert_eq!(
            FileExtension::Unknown.content_type(),
            APPLICATION_OCTET_STREAM
        );
    }
}
