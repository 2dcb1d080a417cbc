//! Approval gates rule: a job's tasks wait for the proof (BAT) and the
//! plates.

use crate::models::{
    format_timestamp, ConflictType, Job, PlatesStatus, ProofSent, ProposedAssignment,
    ScheduleConflict, Snapshot,
};

/// Rejects a placement whose job has an unsatisfied gate.
///
/// The proof gate is checked first; only the first failing gate is
/// reported.
pub fn validate_approval_gates(
    proposed: &ProposedAssignment,
    snapshot: &Snapshot,
) -> Option<ScheduleConflict> {
    let task = snapshot.task(&proposed.task_id)?;
    let job = snapshot.job(&task.job_id)?;

    check_proof_gate(proposed, job).or_else(|| check_plates_gate(proposed, job))
}

fn check_proof_gate(proposed: &ProposedAssignment, job: &Job) -> Option<ScheduleConflict> {
    let proof = &job.proof_approval;
    if proof.sent_at == ProofSent::NoProofRequired || proof.approved_at.is_some() {
        return None;
    }

    let conflict = |reason: &str, message: String| {
        ScheduleConflict::new(ConflictType::ApprovalGateConflict, &proposed.task_id, message)
            .with_target(&proposed.target_id)
            .with_detail("gate", "BAT")
            .with_detail("jobId", job.id.as_str())
            .with_detail("reason", reason)
    };

    Some(match proof.sent_at {
        ProofSent::AwaitingFile => conflict(
            "AwaitingFile",
            format!("Job {}: waiting for the client's file before the proof", job.id),
        ),
        ProofSent::Sent(sent_at) => conflict(
            "Pending",
            format!("Job {}: proof sent, awaiting client approval", job.id),
        )
        .with_detail("sentAt", format_timestamp(&sent_at)),
        // NoProofRequired returned above
        ProofSent::NotSent | ProofSent::NoProofRequired => conflict(
            "NotSent",
            format!("Job {}: proof has not been sent", job.id),
        ),
    })
}

fn check_plates_gate(proposed: &ProposedAssignment, job: &Job) -> Option<ScheduleConflict> {
    if job.plates_status == PlatesStatus::Done {
        return None;
    }
    Some(
        ScheduleConflict::new(
            ConflictType::ApprovalGateConflict,
            &proposed.task_id,
            format!("Job {}: plates are not ready", job.id),
        )
        .with_target(&proposed.target_id)
        .with_detail("gate", "Plates")
        .with_detail("jobId", job.id.as_str())
        .with_detail("status", job.plates_status.as_str()),
    )
}
