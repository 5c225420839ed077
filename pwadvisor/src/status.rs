use breach_pipeline::BreachEvent;

/// What the breach indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachStatus {
    Waiting,
    Safe,
    Breached { count: u64 },
    /// The lookup failed; this is not a clean result.
    Unavailable,
}

impl From<&BreachEvent> for BreachStatus {
    fn from(event: &BreachEvent) -> Self {
        match event {
            BreachEvent::WaitingForInput => BreachStatus::Waiting,
            BreachEvent::Checked(result) if result.breached => {
                BreachStatus::Breached { count: result.count }
            }
            BreachEvent::Checked(_) => BreachStatus::Safe,
            BreachEvent::Failed(_) => BreachStatus::Unavailable,
        }
    }
}

impl BreachStatus {
    pub fn message(&self) -> String {
        match self {
            BreachStatus::Waiting => "Waiting\u{2026}".to_string(),
            BreachStatus::Safe => "Not found in public breaches.".to_string(),
            BreachStatus::Breached { count } => format!(
                "Pwned {} {}! Consider a unique password.",
                group_thousands(*count),
                if *count == 1 { "time" } else { "times" }
            ),
            BreachStatus::Unavailable => "Error checking breaches. Try again later.".to_string(),
        }
    }
}

/// Formats `n` with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use breach_pipeline::BreachCheckFailed;
    use pwned_range::{BreachQueryResult, FailureKind};

    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(52256179), "52,256,179");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_status_from_events() {
        assert_eq!(BreachStatus::from(&BreachEvent::WaitingForInput), BreachStatus::Waiting);
        assert_eq!(
            BreachStatus::from(&BreachEvent::Checked(BreachQueryResult::clean())),
            BreachStatus::Safe
        );
        assert_eq!(
            BreachStatus::from(&BreachEvent::Checked(BreachQueryResult::found(3))),
            BreachStatus::Breached { count: 3 }
        );

        let failed = BreachEvent::Failed(BreachCheckFailed {
            kind: FailureKind::TransportFailure,
            reason: "HTTP 503 for prefix CBFDA".to_string(),
        });
        assert_eq!(BreachStatus::from(&failed), BreachStatus::Unavailable);
    }

    #[test]
    fn test_failure_is_not_safe() {
        let failed = BreachStatus::Unavailable.message();
        assert_ne!(failed, BreachStatus::Safe.message());
        assert!(failed.contains("Try again later"));
    }

    #[test]
    fn test_breached_message() {
        assert_eq!(
            BreachStatus::Breached { count: 2254650 }.message(),
            "Pwned 2,254,650 times! Consider a unique password."
        );
        assert_eq!(
            BreachStatus::Breached { count: 1 }.message(),
            "Pwned 1 time! Consider a unique password."
        );
    }
}
