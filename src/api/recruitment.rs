use tracing::info;

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::candidate::{Candidate, CandidateStatus};
use crate::model::job_position::JobPosition;
use crate::models::{NewCandidate, NewJobPosition};
use crate::state::{AppState, new_id, require};
use crate::store::CollectionKey;

impl<S: KeyValueStore> AppState<S> {
    pub fn add_job_position(&mut self, payload: NewJobPosition) -> Result<JobPosition> {
        require(&payload.title, "Title")?;

        let position = JobPosition {
            id: new_id("jp"),
            title: payload.title,
            department: payload.department,
            status: payload.status,
        };

        self.job_positions.push(position.clone());
        self.persist(CollectionKey::JobPositions, &self.job_positions)?;
        Ok(position)
    }

    pub fn update_job_position(&mut self, updated: JobPosition) -> Result<()> {
        require(&updated.title, "Title")?;

        let slot = self
            .job_positions
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| HrmError::not_found("Job position", updated.id.clone()))?;
        *slot = updated;

        self.persist(CollectionKey::JobPositions, &self.job_positions)
    }

    /// New candidates start at `Applied`.
    pub fn add_candidate(&mut self, payload: NewCandidate) -> Result<Candidate> {
        if payload.job_id.trim().is_empty() {
            return Err(HrmError::NoJobPositionSelected);
        }
        require(&payload.first_name, "First name")?;
        require(&payload.last_name, "Last name")?;
        require(&payload.email, "Email")?;

        let candidate = Candidate {
            id: new_id("can"),
            job_id: payload.job_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            status: CandidateStatus::Applied,
        };

        self.candidates.push(candidate.clone());
        self.persist(CollectionKey::Candidates, &self.candidates)?;

        info!(candidate_id = %candidate.id, job_id = %candidate.job_id, "Candidate added");
        Ok(candidate)
    }

    pub fn update_candidate(&mut self, updated: Candidate) -> Result<()> {
        let slot = self
            .candidates
            .iter_mut()
            .find(|c| c.id == updated.id)
            .ok_or_else(|| HrmError::not_found("Candidate", updated.id.clone()))?;
        *slot = updated;

        self.persist(CollectionKey::Candidates, &self.candidates)
    }

    pub fn candidates_for(&self, job_id: &str) -> Vec<&Candidate> {
        self.candidates.iter().filter(|c| c.job_id == job_id).collect()
    }
}
