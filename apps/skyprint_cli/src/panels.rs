use skyprint::chart::Section;
use skyprint::ComputeOutcome;
use std::fmt::Write;

/// Text rendering of the overview, sections and transits panels.
pub fn render_outcome(outcome: &ComputeOutcome) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_outcome(&mut out, outcome);
    out
}

fn write_outcome(out: &mut String, outcome: &ComputeOutcome) -> std::fmt::Result {
    if let Some(notice) = outcome.engine_notice() {
        writeln!(out, "{}\n", notice)?;
    }

    let overview = &outcome.overview;
    writeln!(out, "== Overview ==")?;
    writeln!(
        out,
        "Chart ID: {} • Reading ID: {}",
        overview.chart_id, overview.reading_id
    )?;
    writeln!(out, "View Reading JSON: {}", overview.reading_json_url)?;
    writeln!(out, "Download PDF: {}", overview.pdf_url)?;

    writeln!(out, "\n== Sections ==")?;
    for section in &outcome.reading.sections {
        write_section(out, section)?;
    }

    writeln!(out, "\n== Transits ==")?;
    write!(out, "{}", outcome.transits.render_text())?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(())
}

fn write_section(out: &mut String, section: &Section) -> std::fmt::Result {
    writeln!(out, "\n-- {} --", section.title)?;
    if !section.short.is_empty() {
        writeln!(out, "{}", section.short)?;
    }
    if !section.long.is_empty() {
        writeln!(out, "{}", section.long)?;
    }
    if let Some(actions) = section.action_list() {
        for action in actions {
            writeln!(out, "  * {}", action)?;
        }
    }
    Ok(())
}
