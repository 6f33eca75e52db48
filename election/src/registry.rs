//! Candidate registry: registration rules for `ElectionRecord::candidates`.

use ballot_types::Timestamp;

use crate::error::{ElectionError, WindowKind};
use crate::phase::require_open;
use crate::record::{Candidate, ElectionRecord};

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_EMAIL_CHARS: usize = 254;

pub struct CandidateRegistry;

impl CandidateRegistry {
    /// Register a candidate on the draft record.
    ///
    /// Checks run in a fixed order and the first failure wins: configured,
    /// candidacy open, id unused, email unused, field shape.
    pub fn register(
        &self,
        record: Option<&mut ElectionRecord>,
        candidate: Candidate,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        let record = record.ok_or(ElectionError::ElectionNotConfigured)?;
        require_open(&record.candidacy_window, WindowKind::Candidacy, now)?;

        if record.candidates.contains_key(&candidate.id) {
            return Err(ElectionError::DuplicateCandidateId(candidate.id));
        }
        if record
            .candidates
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&candidate.email))
        {
            return Err(ElectionError::DuplicateEmail(candidate.email));
        }
        validate_fields(&candidate)?;

        record.candidates.insert(
            candidate.id.clone(),
            Candidate {
                vote_count: 0,
                ..candidate
            },
        );
        Ok(())
    }
}

fn validate_fields(candidate: &Candidate) -> Result<(), ElectionError> {
    if candidate.id.trim().is_empty() {
        return Err(ElectionError::invalid_field("id", "must not be empty"));
    }
    if candidate.name.trim().is_empty() {
        return Err(ElectionError::invalid_field("name", "must not be empty"));
    }
    let name_len = candidate.name.chars().count();
    if name_len > MAX_NAME_CHARS {
        return Err(ElectionError::invalid_field(
            "name",
            format!("{} characters exceeds the limit of {}", name_len, MAX_NAME_CHARS),
        ));
    }
    let email_len = candidate.email.chars().count();
    if email_len > MAX_EMAIL_CHARS {
        return Err(ElectionError::invalid_field(
            "email",
            format!("{} characters exceeds the limit of {}", email_len, MAX_EMAIL_CHARS),
        ));
    }
    if !is_email_shaped(&candidate.email) {
        return Err(ElectionError::invalid_field(
            "email",
            format!("'{}' is not of the form local-part@domain", candidate.email),
        ));
    }
    Ok(())
}

/// `local@domain.tld`: one `@`, no whitespace, a dotted domain without empty labels.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ElectionWindows, Window};
    use crate::error::PhaseViolation;

    fn record() -> ElectionRecord {
        ElectionRecord::new(
            ElectionWindows::new(
                Window::new(Timestamp::new(100), Timestamp::new(200)),
                Window::new(Timestamp::new(300), Timestamp::new(400)),
            )
            .unwrap(),
        )
    }

    fn open() -> Timestamp {
        Timestamp::new(150)
    }

    #[test]
    fn registers_with_zero_votes() {
        let mut r = record();
        let mut c = Candidate::new("c1", "Ana Souza", "ana@example.org");
        c.vote_count = 9;
        CandidateRegistry.register(Some(&mut r), c, open()).unwrap();
        assert_eq!(r.candidates["c1"].vote_count, 0);
    }

    #[test]
    fn unconfigured_comes_first() {
        let err = CandidateRegistry
            .register(None, Candidate::new("", "", ""), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::ElectionNotConfigured));
    }

    #[test]
    fn phase_checked_before_fields() {
        let mut r = record();
        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("", "", "bad"), Timestamp::new(99))
            .unwrap_err();
        assert!(matches!(
            err,
            ElectionError::PhaseViolation(PhaseViolation::TooEarly { .. })
        ));

        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", "Ana", "a@b.org"), Timestamp::new(201))
            .unwrap_err();
        assert!(matches!(
            err,
            ElectionError::PhaseViolation(PhaseViolation::TooLate { .. })
        ));
    }

    #[test]
    fn duplicate_id_then_duplicate_email() {
        let mut r = record();
        CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", "Ana", "ana@example.org"), open())
            .unwrap();

        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", "Bia", "bia@example.org"), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::DuplicateCandidateId(ref id) if id == "c1"));

        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c2", "Bia", "ANA@example.org"), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::DuplicateEmail(_)));
        assert_eq!(r.candidates.len(), 1);
    }

    #[test]
    fn name_limit_counts_characters() {
        let mut r = record();
        let fifty = "é".repeat(MAX_NAME_CHARS);
        CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", fifty, "a@example.org"), open())
            .unwrap();

        let fifty_one = "x".repeat(MAX_NAME_CHARS + 1);
        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c2", fifty_one, "b@example.org"), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidField { field: "name", .. }));
    }

    #[test]
    fn email_limit_and_shape() {
        let mut r = record();
        let long = format!("{}@example.org", "a".repeat(MAX_EMAIL_CHARS));
        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", "Ana", long), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidField { field: "email", .. }));

        let err = CandidateRegistry
            .register(Some(&mut r), Candidate::new("c1", "Ana", "ana.example.org"), open())
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidField { field: "email", .. }));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email_shaped("email_teste@ttcfabric.com"));
        assert!(is_email_shaped("a.b+c@sub.example.co"));
        assert!(!is_email_shaped("@example.org"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a@@b.org"));
        assert!(!is_email_shaped("a@b..org"));
        assert!(!is_email_shaped("a b@c.org"));
    }
}
