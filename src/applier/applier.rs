use super::{ApplyReport, Attempt, Outcome, SettingRequest, LEGACY_LABEL};
use crate::target::Target;
use log::{debug, info, warn};
use std::fmt;

/// Defines the stages of one application
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// Nothing attempted yet
    Unattempted,

    /// Attempting the candidate with the given index
    Trying(usize),

    /// Attempting the legacy text-command form
    TryingLegacy,

    /// Applied (terminal)
    Applied(Outcome),

    /// Every form failed (terminal)
    Failed,
}

impl Stage {
    /// Returns true if this stage is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Applied(..) | Stage::Failed)
    }
}

/// Applies settings to a target despite uncertainty about which control surface is valid
///
/// Candidates are tried strictly in order, each exactly once. The first accepted candidate
/// ends the application; a refusal of any kind moves on to the next candidate. When every
/// candidate is refused, the legacy text-command form is tried once, if known. Nothing is
/// rolled back and nothing is retried.
pub struct Applier {
    /// Prints one table row per application
    pub verbose: bool,
}

impl Applier {
    /// Allocates a new instance
    pub fn new(verbose: bool) -> Self {
        Applier { verbose }
    }

    /// Applies one setting and reports which access path (if any) succeeded
    ///
    /// Never fails: refusals are recorded in the report.
    pub fn apply<V: fmt::Debug>(&self, target: &mut dyn Target, request: &SettingRequest<V>) -> ApplyReport {
        let candidates = request.candidates();
        let mut attempts = Vec::new();
        let mut stage = Stage::Unattempted;
        let outcome = loop {
            stage = match stage {
                Stage::Unattempted => {
                    if candidates.is_empty() {
                        Stage::TryingLegacy
                    } else {
                        Stage::Trying(0)
                    }
                }
                Stage::Trying(i) => {
                    let candidate = &candidates[i];
                    match candidate.attempt(target, &request.value) {
                        Ok(()) => {
                            attempts.push(Attempt {
                                label: candidate.label().to_string(),
                                refusal: None,
                            });
                            if i == 0 {
                                Stage::Applied(Outcome::AppliedViaPrimary)
                            } else {
                                Stage::Applied(Outcome::AppliedViaFallback(candidate.label().to_string()))
                            }
                        }
                        Err(refusal) => {
                            debug!("{}: {} {}", request.key, candidate.label(), refusal);
                            attempts.push(Attempt {
                                label: candidate.label().to_string(),
                                refusal: Some(refusal),
                            });
                            if i + 1 < candidates.len() {
                                Stage::Trying(i + 1)
                            } else {
                                Stage::TryingLegacy
                            }
                        }
                    }
                }
                Stage::TryingLegacy => match request.legacy_command() {
                    None => Stage::Failed,
                    Some(command) => {
                        let refusal = target.run_command(command).err();
                        if let Some(r) = &refusal {
                            debug!("{}: {} {}", request.key, command, r);
                        }
                        let accepted = refusal.is_none();
                        attempts.push(Attempt {
                            label: format!("{}", command),
                            refusal,
                        });
                        if accepted {
                            Stage::Applied(Outcome::AppliedViaFallback(LEGACY_LABEL.to_string()))
                        } else {
                            Stage::Failed
                        }
                    }
                },
                Stage::Applied(outcome) => break outcome,
                Stage::Failed => break Outcome::Failed,
            };
        };

        let mut report = ApplyReport {
            key: request.key.clone(),
            value: format!("{:?}", request.value),
            outcome,
            attempts,
            diagnostic: None,
        };
        match &report.outcome {
            Outcome::Failed => {
                let message = diagnostic(&report, request.manual_path());
                warn!("{}", message);
                report.diagnostic = Some(message);
            }
            outcome => info!("{} = {} ({})", report.key, report.value, outcome),
        }
        if self.verbose {
            self.print_report(&report);
        }
        report
    }

    /// Prints the header of the table of applied settings
    pub fn print_header(&self) {
        if self.verbose {
            println!("Legend:");
            println!("✅ : applied via primary path");
            println!("👍 : applied via fallback path");
            println!("😱 : failed; set it manually\n");
            println!("{:<36} {:>2} {:>5}  {}", "setting", "", "tries", "accepted by");
        }
    }

    /// Prints one row of the table of applied settings
    pub fn print_report(&self, report: &ApplyReport) {
        let mark = match report.outcome {
            Outcome::AppliedViaPrimary => "✅",
            Outcome::AppliedViaFallback(..) => "👍",
            Outcome::Failed => "😱",
        };
        let via = report.accepted_by().unwrap_or(".");
        println!("{:<36} {:>2} {:>5}  {}", report.key, mark, report.attempts.len(), via);
    }
}

/// Composes the warning for an exhausted chain
fn diagnostic(report: &ApplyReport, manual_path: Option<&str>) -> String {
    let last_rejection = report
        .attempts
        .iter()
        .rev()
        .find_map(|a| match &a.refusal {
            Some(r) if !r.is_unavailable() => Some(r.message().to_string()),
            _ => None,
        });
    let mut message = format!(
        "cannot apply {} = {} ({} unavailable, {} rejected",
        report.key,
        report.value,
        report.n_unavailable(),
        report.n_rejected()
    );
    if let Some(m) = last_rejection {
        message.push_str(&format!("; last rejection: {}", m));
    }
    message.push(')');
    match manual_path {
        Some(path) => message.push_str(&format!("; set it manually in the GUI: {}", path)),
        None => message.push_str("; no manual path is known"),
    }
    message
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Applier, Stage};
    use crate::applier::{Candidate, Outcome, SettingRequest};
    use crate::samples::Samples;
    use crate::target::{LegacyCommand, Refusal, SimulatedTarget, Surface, SurfaceProfile, Target, ValueKind};
    use crate::StrError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Returns a candidate that records its label when attempted
    fn tracked(label: &'static str, accept: bool, log: &Rc<RefCell<Vec<&'static str>>>) -> Candidate<f64> {
        let log = Rc::clone(log);
        Candidate::new(label, move |_: &mut dyn Target, _: &f64| {
            log.borrow_mut().push(label);
            if accept {
                Ok(())
            } else {
                Err(Refusal::unavailable(label))
            }
        })
    }

    #[test]
    fn stage_terminal_works() {
        assert!(!Stage::Unattempted.is_terminal());
        assert!(!Stage::Trying(0).is_terminal());
        assert!(!Stage::TryingLegacy.is_terminal());
        assert!(Stage::Applied(Outcome::AppliedViaPrimary).is_terminal());
        assert!(Stage::Failed.is_terminal());
    }

    #[test]
    fn apply_tries_in_order_and_stops_at_first_success() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(SurfaceProfile::new("empty"))?;
        let log = Rc::new(RefCell::new(Vec::new()));
        let request = SettingRequest::new("x", 1.0)
            .candidate(tracked("a", false, &log))
            .candidate(tracked("b", false, &log))
            .candidate(tracked("c", true, &log))
            .candidate(tracked("d", true, &log));
        let report = Applier::new(false).apply(&mut target, &request);
        assert_eq!(*log.borrow(), &["a", "b", "c"]);
        assert_eq!(report.outcome, Outcome::AppliedViaFallback("c".to_string()));
        assert_eq!(report.attempts.len(), 3);
        assert_eq!(report.accepted_by(), Some("c"));
        assert_eq!(report.diagnostic, None);
        Ok(())
    }

    #[test]
    fn apply_reports_primary() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(SurfaceProfile::new("empty"))?;
        let log = Rc::new(RefCell::new(Vec::new()));
        let request = SettingRequest::new("x", 1.0)
            .candidate(tracked("a", true, &log))
            .legacy(LegacyCommand::new("/never", &[]));
        let report = Applier::new(false).apply(&mut target, &request);
        assert_eq!(report.outcome, Outcome::AppliedViaPrimary);
        assert_eq!(*log.borrow(), &["a"]);
        assert!(target.journal().is_empty());
        Ok(())
    }

    #[test]
    fn apply_falls_back_to_legacy() -> Result<(), StrError> {
        let mut profile = SurfaceProfile::new("tui");
        profile.command("/define/operating-conditions/gravity", 4);
        let mut target = SimulatedTarget::new(profile)?;
        let request = SettingRequest::new("gravity_vector", [0.0, 0.0, -9.81])
            .field(Surface::Root, "setup/operating_conditions/gravity_vector")
            .legacy(
                LegacyCommand::new("/define/operating-conditions/gravity", &["yes"])
                    .real(0.0)
                    .real(0.0)
                    .real(-9.81),
            );
        let report = Applier::new(false).apply(&mut target, &request);
        assert_eq!(report.outcome, Outcome::AppliedViaFallback("legacy".to_string()));
        assert_eq!(report.n_unavailable(), 1);
        assert_eq!(target.journal(), &["/define/operating-conditions/gravity yes 0 0 -9.81"]);
        Ok(())
    }

    #[test]
    fn apply_with_only_legacy_works() -> Result<(), StrError> {
        let mut profile = SurfaceProfile::new("tui");
        profile.command("/display/mesh", 0);
        let mut target = SimulatedTarget::new(profile)?;
        let request: SettingRequest<()> =
            SettingRequest::new("display.mesh", ()).legacy(LegacyCommand::new("/display/mesh", &[]));
        let report = Applier::new(false).apply(&mut target, &request);
        assert_eq!(report.outcome, Outcome::AppliedViaFallback("legacy".to_string()));
        Ok(())
    }

    #[test]
    fn apply_failure_never_propagates() -> Result<(), StrError> {
        let mut profile = SurfaceProfile::new("picky");
        profile
            .field(Surface::Settings, "setup/operating_conditions/gravity_vector", ValueKind::Text)
            .command("/define/operating-conditions/gravity", 5);
        let mut target = SimulatedTarget::new(profile)?;
        let request = SettingRequest::new("gravity_vector", [0.0, 0.0, -9.81])
            .field(Surface::Root, "setup/operating_conditions/gravity_vector")
            .field(Surface::Settings, "setup/operating_conditions/gravity_vector")
            .legacy(LegacyCommand::new("/define/operating-conditions/gravity", &["yes", "0", "0", "-9.81"]))
            .gui_hint("Setup → General → Gravity");
        let report = Applier::new(true).apply(&mut target, &request);
        assert_eq!(report.outcome, Outcome::Failed);
        assert_eq!(report.attempts.len(), 3);
        assert_eq!(report.n_unavailable(), 1);
        assert_eq!(report.n_rejected(), 2);
        assert_eq!(
            report.diagnostic,
            Some(
                "cannot apply gravity_vector = [0.0, 0.0, -9.81] (1 unavailable, 2 rejected; \
                 last rejection: /define/operating-conditions/gravity expects at least 5 argument(s) but got 4); \
                 set it manually in the GUI: Setup → General → Gravity"
                    .to_string()
            )
        );
        Ok(())
    }

    #[test]
    fn apply_without_any_form_fails() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(SurfaceProfile::new("empty"))?;
        let request: SettingRequest<f64> = SettingRequest::new("nothing", 0.0);
        let report = Applier::new(false).apply(&mut target, &request);
        assert_eq!(report.outcome, Outcome::Failed);
        assert!(report.attempts.is_empty());
        assert_eq!(
            report.diagnostic,
            Some("cannot apply nothing = 0.0 (0 unavailable, 0 rejected); no manual path is known".to_string())
        );
        Ok(())
    }

    #[test]
    fn apply_is_idempotent() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let request = SettingRequest::new("viscous.model", "laminar".to_string())
            .field(Surface::Settings, "setup/models/viscous/model")
            .field(Surface::Root, "setup/models/viscous/model");
        let applier = Applier::new(false);
        let first = applier.apply(&mut target, &request);
        let snapshot = target.snapshot();
        let changes = target.changes();
        let second = applier.apply(&mut target, &request);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.outcome, Outcome::AppliedViaPrimary);
        assert_eq!(target.snapshot(), snapshot);
        assert_eq!(target.changes(), changes);
        Ok(())
    }
}
