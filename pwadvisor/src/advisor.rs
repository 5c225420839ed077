use breach_pipeline::{BreachPipeline, Clock, TokioClock};
use pwned_range::RangeTransport;
use serde::Serialize;
use tracing::debug;

use crate::insights::insights;
use crate::strength::{StrengthOracle, StrengthReport};

/// Immediate feedback for one input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub strength: StrengthReport,
    pub insights: Vec<String>,
}

/// Routes each change of the password field to the strength oracle and the breach
/// pipeline.
pub struct Advisor<O, T, C = TokioClock> {
    oracle: O,
    pipeline: BreachPipeline<T, C>,
}

impl<O, T, C> Advisor<O, T, C>
where
    O: StrengthOracle,
    T: RangeTransport + 'static,
    C: Clock + 'static,
{
    pub fn new(oracle: O, pipeline: BreachPipeline<T, C>) -> Self {
        Self { oracle, pipeline }
    }

    /// Handles the field's new value.
    ///
    /// An empty value resets the breach pipeline (which reports waiting for input)
    /// and yields no assessment. Anything else is estimated right away and
    /// scheduled for a breach lookup.
    pub fn on_input(&self, password: &str) -> Option<Assessment> {
        if password.is_empty() {
            self.pipeline.reset();
            return None;
        }

        self.pipeline.schedule(password);

        let Some(strength) = self.oracle.estimate(password) else {
            debug!("no strength estimate for input");
            return None;
        };
        let insights = insights(&strength);
        Some(Assessment { strength, insights })
    }

    pub fn pipeline(&self) -> &BreachPipeline<T, C> {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use breach_pipeline::{BreachEvent, Phase, PipelineConfig};
    use pwned_range::{BreachQueryResult, Error};
    use tokio::sync::mpsc::{self, UnboundedReceiver, error::TryRecvError};

    use super::*;
    use crate::strength::{PatternKind, PatternMatch, StrengthLevel};

    struct FixedOracle;

    impl StrengthOracle for FixedOracle {
        fn estimate(&self, password: &str) -> Option<StrengthReport> {
            Some(StrengthReport {
                score: 0,
                level: StrengthLevel::VeryWeak,
                matches: vec![PatternMatch {
                    kind: PatternKind::Dictionary,
                    token: password.to_string(),
                }],
                warning: Some("This is a top-10 common password.".to_string()),
                suggestions: vec!["Add another word or two.".to_string()],
                crack_time: "less than a second".to_string(),
            })
        }
    }

    // password123 -> CBFDA C6008F9CAB4083784CBD1874F76618D2A97
    struct RecordingTransport {
        prefixes: Arc<Mutex<Vec<String>>>,
    }

    impl RangeTransport for RecordingTransport {
        async fn fetch_range(&self, prefix: &str) -> Result<String, Error> {
            self.prefixes.lock().unwrap().push(prefix.to_string());
            Ok("C6008F9CAB4083784CBD1874F76618D2A97:2254650".to_string())
        }
    }

    type Recorded = Arc<Mutex<Vec<String>>>;

    type TestAdvisor = Advisor<FixedOracle, RecordingTransport>;

    fn advisor() -> (TestAdvisor, UnboundedReceiver<BreachEvent>, Recorded) {
        let (events_tx, events) = mpsc::unbounded_channel();
        let prefixes = Recorded::default();
        let transport = RecordingTransport { prefixes: Arc::clone(&prefixes) };
        let pipeline = BreachPipeline::new(transport, events_tx, PipelineConfig::default());
        (Advisor::new(FixedOracle, pipeline), events, prefixes)
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_is_assessed_and_checked() {
        let (advisor, mut events, prefixes) = advisor();

        let assessment = advisor.on_input("password123").unwrap();
        assert_eq!(assessment.strength.level, StrengthLevel::VeryWeak);
        assert_eq!(assessment.insights.len(), 1);
        assert!(assessment.insights[0].contains("password123"));
        assert_eq!(advisor.pipeline().phase(), Phase::Armed);

        assert_eq!(
            events.recv().await.unwrap(),
            BreachEvent::Checked(BreachQueryResult::found(2254650))
        );
        assert_eq!(*prefixes.lock().unwrap(), vec!["CBFDA".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_then_clearing() {
        let (advisor, mut events, prefixes) = advisor();

        advisor.on_input("p");
        advisor.on_input("pa");
        assert_eq!(advisor.on_input(""), None);

        assert_eq!(events.recv().await.unwrap(), BreachEvent::WaitingForInput);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(advisor.pipeline().phase(), Phase::Idle);
        assert!(prefixes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_settled_value_is_looked_up() {
        let (advisor, mut events, prefixes) = advisor();

        for value in ["p", "pa", "pas", "password", "password1", "password12", "password123"] {
            advisor.on_input(value);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        events.recv().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(*prefixes.lock().unwrap(), vec!["CBFDA".to_string()]);
    }
}
