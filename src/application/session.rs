//! Submission state machine.
//!
//! `Idle -> FieldsFilled -> Encoding -> Predicted -> Rendered -> Idle`.
//! Nothing survives a cycle; a failed submission drops straight back to `Idle`.

use crate::application::InferenceService;
use crate::domain::{Prediction, RespondentRecord};
use crate::FinclusionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for input
    Idle,
    /// The user has edited at least one control
    FieldsFilled,
    /// Submission accepted, encoding in progress
    Encoding,
    /// Classifier returned a prediction
    Predicted,
    /// Verdict is on screen
    Rendered,
}

/// One interactive session over a shared inference service.
pub struct InferenceSession {
    service: InferenceService,
    state: SessionState,
}

impl InferenceSession {
    #[must_use]
    pub fn new(service: InferenceService) -> Self {
        Self {
            service,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn service(&self) -> &InferenceService {
        &self.service
    }

    /// Note that a control changed.
    pub fn fields_changed(&mut self) {
        if matches!(self.state, SessionState::Idle | SessionState::Rendered) {
            self.state = SessionState::FieldsFilled;
        }
    }

    /// Run one submission.
    ///
    /// Defaults count as filled fields, so submitting from `Idle` is allowed.
    ///
    /// # Errors
    /// Returns the pipeline error after resetting to `Idle`.
    pub fn submit(&mut self, record: &RespondentRecord) -> Result<Prediction, FinclusionError> {
        if matches!(self.state, SessionState::Encoding | SessionState::Predicted) {
            return Err(FinclusionError::Validation(
                "A submission is already being processed".into(),
            ));
        }

        self.state = SessionState::Encoding;
        match self.service.run(record) {
            Ok(prediction) => {
                self.state = SessionState::Predicted;
                Ok(prediction)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// The verdict has been drawn.
    pub fn rendered(&mut self) {
        if self.state == SessionState::Predicted {
            self.state = SessionState::Rendered;
        }
    }

    /// The user dismissed the verdict.
    pub fn acknowledge(&mut self) {
        if self.state == SessionState::Rendered {
            self.state = SessionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonArtifactStore;
    use crate::application::ResourceLoader;
    use crate::domain::kenya_respondent;

    fn session() -> InferenceSession {
        let loader = ResourceLoader::new(JsonArtifactStore::in_dir("models"));
        InferenceSession::new(InferenceService::new(loader.load().expect("resources")))
    }

    #[test]
    fn test_full_cycle() {
        let mut session = session();
        assert_eq!(session.state(), SessionState::Idle);

        session.fields_changed();
        assert_eq!(session.state(), SessionState::FieldsFilled);

        session.submit(&kenya_respondent()).expect("predict");
        assert_eq!(session.state(), SessionState::Predicted);

        session.rendered();
        assert_eq!(session.state(), SessionState::Rendered);

        session.acknowledge();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let mut session = session();
        session.fields_changed();

        let record = RespondentRecord {
            job_type: "Pirate".into(),
            ..kenya_respondent()
        };
        assert!(session.submit(&record).is_err());
        assert_eq!(session.state(), SessionState::Idle);

        // The session keeps working after a failure.
        assert!(session.submit(&kenya_respondent()).is_ok());
    }

    #[test]
    fn test_rejects_submission_while_predicted() {
        let mut session = session();
        session.submit(&kenya_respondent()).expect("predict");
        assert!(session.submit(&kenya_respondent()).is_err());
        assert_eq!(session.state(), SessionState::Predicted);
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut session = session();
        session.rendered();
        session.acknowledge();
        assert_eq!(session.state(), SessionState::Idle);
    }
}
