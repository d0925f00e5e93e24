use thiserror::Error;

use crate::distractor::DistractorError;
use crate::model::{SettingsError, TermError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Term(#[from] TermError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Distractor(#[from] DistractorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKey;

    #[test]
    fn wraps_component_errors_transparently() {
        let err = Error::from(TermError::BlankField(FieldKey::Front));
        assert_eq!(err.to_string(), "term field `front` is blank");

        let err = Error::from(DistractorError::InvalidCount(1));
        assert!(matches!(err, Error::Distractor(_)));
    }
}
