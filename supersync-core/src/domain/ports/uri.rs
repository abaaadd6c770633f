use crate::domain::error::DomainError;
use crate::domain::profile::ProfileOutput;

/// Turns a profile output into a SQLAlchemy URI.
///
/// The URI is opaque to callers: it is compared and forwarded, never parsed.
pub trait UriBuilder: Send + Sync {
    fn build(&self, output: &ProfileOutput) -> Result<String, DomainError>;
}

// Closures work as builders (handy for tests and one-off wiring)
impl<F> UriBuilder for F
where
    F: Fn(&ProfileOutput) -> Result<String, DomainError> + Send + Sync,
{
    fn build(&self, output: &ProfileOutput) -> Result<String, DomainError> {
        self(output)
    }
}
