use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::roster::{eligible, AvailabilityIndex, DayType, FairnessLedger, SlotResult, SlotState};
use crate::workbook::{ScheduleSheet, DATE_COL, DAY_COL};

/// Formats a pair of names for display, e.g. "Ana & Ben"
pub fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "[EMPTY]".to_string()
    } else {
        names.join(" & ")
    }
}

/// Writes the schedule sheet back out, header first
pub fn write_schedule_to_file(sheet: &ScheduleSheet, path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_path(path)?;
    wtr.write_record(&sheet.header)?;
    for row in &sheet.rows {
        wtr.write_record(&row.cells)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the outcome of a fill run
pub fn print_fill_results(results: &[SlotResult], sheet: &ScheduleSheet) {
    println!("\n=== Filled Missing Assignments ===");
    println!("Slots completed: {}", results.len());

    for result in results {
        let label = sheet
            .rows
            .iter()
            .find(|r| r.row == result.row)
            .map(|r| format!("{} {}", r.cell(DAY_COL), r.cell(DATE_COL)))
            .unwrap_or_default();
        println!(
            "  Row {} ({}) -> {} (new: {})",
            result.row,
            label,
            format_names(&result.names),
            format_names(&result.picked)
        );
    }

    let incomplete = sheet
        .slots()
        .iter()
        .filter(|slot| slot.state() != SlotState::Filled)
        .count();
    if incomplete > 0 {
        println!("⚠️  Slots still short of volunteers: {}", incomplete);
    }
}

/// Prints each service day's volunteers in selection order
pub fn print_availability(index: &AvailabilityIndex, ledger: &FairnessLedger) {
    println!("\n=== Availability ({} volunteers) ===", index.people.len());
    for day in DayType::ALL {
        let candidates = eligible(day, &index.availability, &[], ledger);
        println!("\n{} ({} available):", day, candidates.len());
        for name in &candidates {
            let partners = index
                .partners
                .preferred(name)
                .map(|p| format!(" (prefers: {})", p.join(", ")))
                .unwrap_or_default();
            println!("  - {} [served {}]{}", name, ledger.get(name), partners);
        }
    }
}
