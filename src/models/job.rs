//! Job model.
//!
//! A job is a customer order. Before any of its tasks may be scheduled,
//! two gates must pass:
//!
//! - **Proof (BAT)**: the client signed off the proof, or none is needed.
//! - **Plates**: printing plates are made.
//!
//! The job must also leave the workshop by `workshop_exit_date`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::serde_time::{format_timestamp, iso_millis_option, parse_timestamp};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Shop reference number.
    #[serde(default)]
    pub reference: String,
    /// Client name.
    #[serde(default)]
    pub client: String,
    /// Date the job must leave the workshop (inclusive).
    pub workshop_exit_date: NaiveDate,
    /// Proof (BAT) gate.
    #[serde(default)]
    pub proof_approval: ProofApproval,
    /// Plates gate.
    #[serde(default)]
    pub plates_status: PlatesStatus,
    /// Task ids in production order.
    #[serde(default)]
    pub task_ids: Vec<String>,
}

/// Proof (BAT) gate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofApproval {
    /// Whether and when the proof went out.
    #[serde(default)]
    pub sent_at: ProofSent,
    /// When the client approved. `None` = not approved.
    #[serde(default, with = "iso_millis_option")]
    pub approved_at: Option<DateTime<Utc>>,
}

/// The `sentAt` field of a proof approval.
///
/// On the wire this is `null`, one of the markers `"NoProofRequired"` /
/// `"AwaitingFile"`, or the ISO timestamp the proof was sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProofSent {
    /// Proof not sent yet.
    #[default]
    NotSent,
    /// Job runs without a proof.
    NoProofRequired,
    /// Waiting for the client's print file.
    AwaitingFile,
    /// Proof sent at the given time.
    Sent(DateTime<Utc>),
}

const NO_PROOF_REQUIRED: &str = "NoProofRequired";
const AWAITING_FILE: &str = "AwaitingFile";

impl Serialize for ProofSent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProofSent::NotSent => serializer.serialize_none(),
            ProofSent::NoProofRequired => serializer.serialize_str(NO_PROOF_REQUIRED),
            ProofSent::AwaitingFile => serializer.serialize_str(AWAITING_FILE),
            ProofSent::Sent(ts) => serializer.serialize_str(&format_timestamp(ts)),
        }
    }
}

impl<'de> Deserialize<'de> for ProofSent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None => Ok(ProofSent::NotSent),
            Some(NO_PROOF_REQUIRED) => Ok(ProofSent::NoProofRequired),
            Some(AWAITING_FILE) => Ok(ProofSent::AwaitingFile),
            Some(raw) => parse_timestamp(raw)
                .map(ProofSent::Sent)
                .map_err(de::Error::custom),
        }
    }
}

/// Plates gate state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatesStatus {
    #[default]
    Todo,
    Done,
}

impl PlatesStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatesStatus::Todo => "Todo",
            PlatesStatus::Done => "Done",
        }
    }
}

impl ProofApproval {
    /// Proof not sent.
    pub fn not_sent() -> Self {
        Self::default()
    }

    /// No proof needed for this job.
    pub fn not_required() -> Self {
        Self {
            sent_at: ProofSent::NoProofRequired,
            approved_at: None,
        }
    }

    /// Waiting for the client's file.
    pub fn awaiting_file() -> Self {
        Self {
            sent_at: ProofSent::AwaitingFile,
            approved_at: None,
        }
    }

    /// Sent, awaiting client approval.
    pub fn pending(sent_at: DateTime<Utc>) -> Self {
        Self {
            sent_at: ProofSent::Sent(sent_at),
            approved_at: None,
        }
    }

    /// Sent and approved.
    pub fn approved(sent_at: DateTime<Utc>, approved_at: DateTime<Utc>) -> Self {
        Self {
            sent_at: ProofSent::Sent(sent_at),
            approved_at: Some(approved_at),
        }
    }
}

impl Job {
    /// Creates a job with both gates closed.
    pub fn new(id: impl Into<String>, workshop_exit_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            reference: String::new(),
            client: String::new(),
            workshop_exit_date,
            proof_approval: ProofApproval::not_sent(),
            plates_status: PlatesStatus::Todo,
            task_ids: Vec::new(),
        }
    }

    /// Sets the reference number.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Sets the client name.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Sets the proof gate.
    pub fn with_proof(mut self, proof: ProofApproval) -> Self {
        self.proof_approval = proof;
        self
    }

    /// Sets the plates gate.
    pub fn with_plates(mut self, status: PlatesStatus) -> Self {
        self.plates_status = status;
        self
    }

    /// Appends a task id to the production order.
    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_ids.push(task_id.into());
        self
    }

    /// Last instant the job may still be in the workshop
    /// (`workshop_exit_date` at 23:59:59.999 UTC).
    pub fn deadline(&self) -> DateTime<Utc> {
        self.workshop_exit_date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sent() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_job_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let job = Job::new("j1", date)
            .with_reference("45123")
            .with_client("Imprimerie Martin")
            .with_proof(ProofApproval::not_required())
            .with_plates(PlatesStatus::Done)
            .with_task("t1")
            .with_task("t2");

        assert_eq!(job.reference, "45123");
        assert_eq!(job.proof_approval.sent_at, ProofSent::NoProofRequired);
        assert_eq!(job.plates_status, PlatesStatus::Done);
        assert_eq!(job.task_ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_deadline_end_of_day() {
        let job = Job::new("j1", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        let expected = Utc.with_ymd_and_hms(2025, 1, 20, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);
        assert_eq!(job.deadline(), expected);
    }

    #[test]
    fn test_proof_sent_wire_format() {
        let cases = [
            ("null", ProofSent::NotSent),
            ("\"NoProofRequired\"", ProofSent::NoProofRequired),
            ("\"AwaitingFile\"", ProofSent::AwaitingFile),
            ("\"2025-01-10T14:00:00.000Z\"", ProofSent::Sent(sent())),
        ];
        for (json, expected) in cases {
            let parsed: ProofSent = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
        assert!(serde_json::from_str::<ProofSent>("\"Sometime\"").is_err());
    }

    #[test]
    fn test_job_wire_defaults() {
        let json = r#"{ "id": "j1", "workshopExitDate": "2025-01-20" }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.proof_approval, ProofApproval::not_sent());
        assert_eq!(job.plates_status, PlatesStatus::Todo);
        assert!(job.task_ids.is_empty());

        let json = r#"{
            "id": "j2",
            "workshopExitDate": "2025-01-20",
            "proofApproval": {
                "sentAt": "2025-01-10T14:00:00.000Z",
                "approvedAt": "2025-01-11T08:00:00.000Z"
            },
            "platesStatus": "Done"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.proof_approval.approved_at.is_some());
        assert_eq!(job.plates_status.as_str(), "Done");
    }
}
