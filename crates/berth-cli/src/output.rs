//! Formatted output helpers for CLI commands.

use berth_runtime::{Action, GroupReport};

pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Prints a group report, one line per member.
pub fn print_report(report: &GroupReport) {
    let verb = match report.action {
        Action::Start => "Starting",
        Action::Stop => "Stopping",
    };
    let done = match report.action {
        Action::Start => "started",
        Action::Stop => "stopped",
    };

    println!("{verb} {BOLD}{}{RESET}:", report.target);
    for member in &report.members {
        match &member.error {
            None => println!("  {GREEN}●{RESET} {} {done}", member.container),
            Some(reason) => println!("  {RED}✗{RESET} {}: {reason}", member.container),
        }
    }

    let failed = report.members.iter().filter(|m| !m.succeeded()).count();
    if failed > 0 {
        println!("{RED}{failed}{RESET} of {} member(s) failed.", report.members.len());
    }
}

#[cfg(test)]
mod tests {
    use berth_runtime::MemberOutcome;

    use super::*;

    #[test]
    fn report_counts_failures() {
        let report = GroupReport {
            target: "web".to_string(),
            action: Action::Start,
            members: vec![
                MemberOutcome {
                    container: "nginx".to_string(),
                    error: None,
                },
                MemberOutcome {
                    container: "ghost".to_string(),
                    error: Some("no such container: ghost".to_string()),
                },
            ],
        };
        assert!(!report.all_succeeded());
        print_report(&report);
    }
}
