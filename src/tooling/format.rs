//! Human-readable rendering of agent records.

use crate::agent::AgentRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a search result as a table.
pub fn format_agent_list_text(agents: &[AgentRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Agents")));
    if agents.is_empty() {
        out.push_str("No agents found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Tags", "Description"]);
    for agent in agents {
        table.add_row(vec![
            agent.id.clone(),
            agent.name.clone(),
            agent.tags.join(", "),
            agent.description.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} agents.\n", agents.len()));
    out
}

/// Format a single agent.
pub fn format_agent_text(agent: &AgentRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Agent {}", agent.id))
    ));
    out.push_str(&format!("  Name: {}\n", agent.name));
    if agent.description.is_empty() {
        out.push_str("  Description: -\n");
    } else {
        out.push_str(&format!("  Description: {}\n", agent.description));
    }
    if agent.tags.is_empty() {
        out.push_str("  Tags: -\n");
    } else {
        out.push_str(&format!("  Tags: {}\n", agent.tags.join(", ")));
    }
    out
}
