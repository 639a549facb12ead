use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Which remote resource a failed read was aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Users,
    User(u32),
}

/// Failure of a read against the users API.
///
/// `Status` carries the non-success HTTP status. `Transport` wraps the
/// underlying client error untouched (connect/timeout/body decoding).
#[derive(Debug)]
pub enum FetchError {
    Status { resource: Resource, status: u16 },
    Transport(reqwest::Error),
}

impl FetchError {
    /// HTTP status of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status { resource: Resource::Users, status } => {
                write!(f, "Failed to fetch users: {status}")
            }
            FetchError::Status { resource: Resource::User(_), status } => {
                write!(f, "Failed to fetch user: {status}")
            }
            FetchError::Transport(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Status { .. } => None,
            FetchError::Transport(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e)
    }
}

pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

#[derive(Debug)]
pub struct SimpleError(pub String);

impl SimpleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl Display for SimpleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError::new(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_the_resource_and_code() {
        let list = FetchError::Status { resource: Resource::Users, status: 500 };
        assert_eq!(list.to_string(), "Failed to fetch users: 500");
        assert_eq!(list.status(), Some(500));

        let one = FetchError::Status { resource: Resource::User(7), status: 404 };
        assert_eq!(one.to_string(), "Failed to fetch user: 404");
    }

    #[test]
    fn context_wraps_source_message() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = res.with_ctx(|| "init terminal".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "init terminal: boom");
    }
}
