use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no value given for {0}")]
    MissingValue(&'static str),
    #[error("could not read config store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config store {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write config store {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to read input: {0}")]
    Prompt(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path),
            _ => FileError::Io { path, source: err },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed ({status}): {body}")]
    RequestFailed { status: u16, body: String },
    #[error("no response from API")]
    EmptyResponse,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_from_io_kind() {
        let path = PathBuf::from("log.json");
        let err = FileError::from_io(path.clone(), std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(err, FileError::NotFound(p) if p == path));

        let err = FileError::from_io(path.clone(), std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FileError::PermissionDenied(_)));

        let err = FileError::from_io(path, std::io::Error::from(std::io::ErrorKind::InvalidData));
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn test_request_failed_message_carries_status_and_body() {
        let err = ApiError::RequestFailed { status: 401, body: "bad key".to_string() };
        assert_eq!(err.to_string(), "API request failed (401): bad key");
    }
}
