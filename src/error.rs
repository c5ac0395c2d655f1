use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DumpError {
    Config(String),
    DirectoryCreation { path: PathBuf, source: io::Error },
    DestinationExists(PathBuf),
    DumpProgram { status: Option<i32>, stderr: String },
    MissingOutput(PathBuf),
    Notification { sink: String, message: String },
    Io(io::Error),
    Serialization(String),
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DumpError::DirectoryCreation { path, source } => {
                write!(f, "Failed to create directory {}: {}", path.display(), source)
            }
            DumpError::DestinationExists(path) => {
                write!(f, "Destination file already exists: {}", path.display())
            }
            DumpError::DumpProgram { status, stderr } => {
                match status {
                    Some(code) => write!(f, "Dump program exited with status {}", code)?,
                    None => write!(f, "Dump program failed")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            DumpError::MissingOutput(path) => write!(
                f,
                "Dump program reported success but no file was produced at {}",
                path.display()
            ),
            DumpError::Notification { sink, message } => {
                write!(f, "Notification error ({}): {}", sink, message)
            }
            DumpError::Io(err) => write!(f, "IO error: {}", err),
            DumpError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DumpError::DirectoryCreation { source, .. } => Some(source),
            DumpError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(err: io::Error) -> Self {
        DumpError::Io(err)
    }
}

impl From<toml::de::Error> for DumpError {
    fn from(err: toml::de::Error) -> Self {
        DumpError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for DumpError {
    fn from(err: toml::ser::Error) -> Self {
        DumpError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for DumpError {
    fn from(err: reqwest::Error) -> Self {
        DumpError::Notification {
            sink: "webhook".to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DumpError>;
