use anyhow::Result;
use kimeru_core::{Assignment, Connectivity, Point, Waypoint};
use serde::Serialize;
use std::io::Write;

use crate::audit::AuditReport;
use crate::seeds::SeedInfo;

/// Roulette result after the simulated spin settled.
#[derive(Debug, Clone, Serialize)]
pub struct SpinReport {
    pub seed: SeedInfo,
    pub items: Vec<String>,
    pub selected_index: usize,
    pub selected: String,
    pub rotation_deg: f64,
    pub frames: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub seed: SeedInfo,
    pub order: Vec<String>,
}

/// Highlighted path of one candidate, in rail and canvas coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    pub start: usize,
    pub item: String,
    pub waypoints: Vec<Waypoint>,
    pub points: Vec<Point>,
    pub path_length: f64,
    pub animation_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LadderReport {
    pub seed: SeedInfo,
    pub columns: usize,
    pub rows: usize,
    pub rungs: Vec<Vec<bool>>,
    pub mapping: Vec<usize>,
    pub bottom_labels: Vec<String>,
    pub assignments: Vec<Assignment>,
    pub connectivity: Connectivity,
    pub trace: Option<TraceReport>,
    #[serde(skip)]
    pub picture: String,
}

/// Anything a subcommand can print.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Spin(SpinReport),
    Order(OrderReport),
    Ladder(LadderReport),
    Audit(AuditReport),
    Code(CodeReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeReport {
    pub code: String,
    pub mode: String,
    pub seed: u64,
}

fn seed_line(seed: &SeedInfo) -> String {
    match &seed.code {
        Some(code) => format!("Seed: {} (code {code})", seed.seed),
        None => format!("Seed: {}", seed.seed),
    }
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_console_report<W: Write + ?Sized>(out: &mut W, report: &Report) -> Result<()> {
    match report {
        Report::Spin(spin) => {
            writeln!(out, "{}", seed_line(&spin.seed))?;
            writeln!(out, "Wheel: {}", spin.items.join(", "))?;
            writeln!(
                out,
                "Selected: {} (slice {}, {:.1} deg after {} frames)",
                spin.selected, spin.selected_index, spin.rotation_deg, spin.frames
            )?;
        }
        Report::Order(order) => {
            writeln!(out, "{}", seed_line(&order.seed))?;
            for (position, item) in order.order.iter().enumerate() {
                writeln!(out, "{:>3}. {item}", position + 1)?;
            }
        }
        Report::Ladder(ladder) => write_ladder(out, ladder)?,
        Report::Audit(audit) => write_audit(out, audit)?,
        Report::Code(code) => {
            writeln!(out, "Code: {}", code.code)?;
            writeln!(out, "Mode: {}", code.mode)?;
            writeln!(out, "Seed: {}", code.seed)?;
        }
    }
    Ok(())
}

fn write_ladder<W: Write + ?Sized>(out: &mut W, ladder: &LadderReport) -> Result<()> {
    writeln!(out, "{}", seed_line(&ladder.seed))?;
    writeln!(out, "{}", ladder.picture)?;
    writeln!(out)?;
    for assignment in &ladder.assignments {
        let marker = if assignment.is_prize { "*" } else { " " };
        writeln!(
            out,
            "{marker} {} -> {} (slot {})",
            assignment.item, assignment.label, assignment.destination
        )?;
    }
    if !ladder.connectivity.is_satisfied() {
        writeln!(
            out,
            "Note: {} gap(s) have fewer than {} rungs",
            ladder.connectivity.shortfalls.len(),
            ladder.connectivity.required
        )?;
    }
    if let Some(trace) = &ladder.trace {
        writeln!(
            out,
            "Trace of {} from rail {}: {} waypoints, {:.1}px over {:.0} ms",
            trace.item,
            trace.start,
            trace.waypoints.len(),
            trace.path_length,
            trace.animation_ms
        )?;
    }
    Ok(())
}

fn write_audit<W: Write + ?Sized>(out: &mut W, audit: &AuditReport) -> Result<()> {
    writeln!(out, "Ladder audit: {} rails, {} trials", audit.columns, audit.trials)?;
    writeln!(out, "Seed: {}", audit.seed)?;
    writeln!(
        out,
        "Fully connected: {}/{} ({:.1}%, target {:.1}%)",
        audit.satisfied,
        audit.trials,
        audit.rate * 100.0,
        audit.min_rate * 100.0
    )?;
    writeln!(out, "Broken permutations: {}", audit.broken_permutations)?;
    writeln!(out, "Shared rails: {}", audit.shared_rails)?;
    writeln!(out, "Mean rungs per gap: {:.2}", audit.mean_rungs_per_gap)?;
    writeln!(
        out,
        "Result: {}",
        if audit.passed { "PASS" } else { "FAIL" }
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_report() -> Report {
        Report::Order(OrderReport {
            seed: SeedInfo::from_numeric(7),
            order: vec!["b".to_string(), "a".to_string()],
        })
    }

    #[test]
    fn console_order_is_numbered() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &order_report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Seed: 7"));
        assert!(text.contains("  1. b"));
        assert!(text.contains("  2. a"));
    }

    #[test]
    fn json_report_is_tagged() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &order_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["kind"], "order");
        assert_eq!(value["order"][0], "b");
        assert_eq!(value["seed"]["seed"], 7);
    }

    #[test]
    fn seed_line_mentions_code() {
        let info = SeedInfo::from_code(3, "OR-KITE07".to_string());
        assert_eq!(seed_line(&info), "Seed: 3 (code OR-KITE07)");
    }
}
