use depth_colorize::DepthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Frame file {path}: expected {expected} bytes, got {actual}")]
    FrameSize {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PCD write error: {0}")]
    PcdWrite(String),

    #[error("Depth error: {0}")]
    Depth(#[from] DepthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_error_config() {
        let error = ViewerError::Config("frame size must be non-zero, got 0x480".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: frame size must be non-zero, got 0x480"
        );
    }

    #[test]
    fn test_viewer_error_frame_size() {
        let error = ViewerError::FrameSize {
            path: "frame.raw".to_string(),
            expected: 614_400,
            actual: 1000,
        };
        assert_eq!(
            error.to_string(),
            "Frame file frame.raw: expected 614400 bytes, got 1000"
        );
    }

    #[test]
    fn test_viewer_error_png_encode() {
        let error = ViewerError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_viewer_error_pcd_write() {
        let error = ViewerError::PcdWrite("disk full".to_string());
        assert_eq!(error.to_string(), "PCD write error: disk full");
    }

    #[test]
    fn test_viewer_error_from_depth_error() {
        let error: ViewerError = DepthError::InvalidMaxDepth(0).into();
        match error {
            ViewerError::Depth(DepthError::InvalidMaxDepth(0)) => {}
            _ => panic!("Expected Depth variant"),
        }
    }

    #[test]
    fn test_viewer_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: ViewerError = io.into();
        assert_eq!(error.to_string(), "IO error: gone");
    }
}
