//! Conversion of library errors into CLI errors.

use vacancies_core::AppError;

/// Attaches [`AppError::user_message`] as context while keeping the error
/// itself, and its sources, in the chain.
pub trait UserContext<T> {
    fn user_context(self) -> anyhow::Result<T>;
}

impl<T> UserContext<T> for Result<T, AppError> {
    fn user_context(self) -> anyhow::Result<T> {
        self.map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })
    }
}
