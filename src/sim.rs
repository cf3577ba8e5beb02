//! Play a trace against a predictor, standing in for the host simulator.

use tracing::trace;

use crate::branch::*;
use crate::history::GlobalHistory;
use crate::host::*;
use crate::stats::PredictionStats;

/// Run a trace on one core of some [`HostPredictor`].
///
/// Each conditional branch is predicted and then resolved with its recorded
/// outcome. The running global history is only advanced by conditional
/// branches, and only after the branch has been resolved.
pub fn run_trace<P: HostPredictor>(bp: &mut P, core_id: usize,
    records: &[BranchRecord]) -> PredictionStats
{
    let mut stat = PredictionStats::new();
    let mut ghr = GlobalHistory::default();

    for record in records.iter() {
        let event = BranchEvent {
            core_id,
            pc: record.pc,
            history: ghr,
            outcome: record.outcome,
            kind: record.kind,
        };
        bp.timestamp(&event);

        if record.is_conditional() {
            let prediction = bp.predict(core_id, record.pc, ghr);
            stat.record(record, prediction);
            if prediction != record.outcome {
                trace!(core_id, ghr = %ghr, "Misprediction @ {:#x}", record.pc);
                bp.recover(&RecoveryInfo { core_id, pc: record.pc, history: ghr });
            }
        }

        bp.spec_update(&event);
        bp.update(&event);
        bp.retire(&event);

        if record.is_conditional() {
            ghr = ghr.push(record.outcome);
        }
    }
    stat
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::PredictorConfig;
    use crate::host::PerceptronPredictor;
    use crate::trace::*;

    #[test]
    fn learns_a_biased_branch() {
        let mut bp = PerceptronPredictor::<12>::init(&PredictorConfig::new(1))
            .unwrap();
        let trace = TraceBuilder::new(0)
            .branch(0x1000, BranchPattern::NeverTaken)
            .build(100);
        let stat = run_trace(&mut bp, 0, &trace);
        assert_eq!(stat.global_brns(), 100);

        // Only the cold-start prediction should miss
        assert_eq!(stat.global_miss(), 1);
    }

    #[test]
    fn unconditional_records_are_not_counted() {
        let mut bp = PerceptronPredictor::<12>::init(&PredictorConfig::new(1))
            .unwrap();
        let trace = TraceBuilder::new(0)
            .branch(0x1000, BranchPattern::AlwaysTaken)
            .site(0x2000, BranchKind::DirectCall, BranchPattern::AlwaysTaken)
            .build(10);
        let stat = run_trace(&mut bp, 0, &trace);
        assert_eq!(stat.global_brns(), 5);
        assert!(stat.get(0x2000).is_none());
    }
}
