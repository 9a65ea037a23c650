//! Per-participant PASS/FAIL lines and the closing summary.

use marathon_notify::SendOutcome;
use marathon_participants::domain::types::Participant;

#[derive(Default)]
pub struct Reporter {
    passed: usize,
    failed: usize,
    dry_run: bool,
}

impl Reporter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_dry_run(&mut self, participant: &Participant, payload: &serde_json::Value) {
        self.passed += 1;
        println!(
            "DRY   [{}] {} ({})",
            participant.id,
            participant.full_name(),
            participant.phone_number
        );
        println!("        {payload}");
    }

    pub fn record(&mut self, participant: &Participant, outcome: &SendOutcome) {
        if outcome.ok {
            self.passed += 1;
            println!(
                "PASS  [{}] {} ({})",
                participant.id,
                participant.full_name(),
                participant.phone_number
            );
        } else {
            self.failed += 1;
            println!(
                "FAIL  [{}] {} ({})",
                participant.id,
                participant.full_name(),
                participant.phone_number
            );
            println!("        error: {}", outcome.message);
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!("────────────────────────────────────────────────────");
        println!(
            "Total: {}, sent: {}, failed: {}",
            self.passed + self.failed,
            self.passed,
            self.failed
        );
        if self.dry_run {
            println!("Dry run: nothing was sent. Pass --send to deliver.");
        }
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
