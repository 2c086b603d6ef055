//! Output formatting for CLI

use crate::observers::Standings;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the standings table, labelling rows with participant names
pub fn print_standings(standings: &Standings, names: &[String]) {
    let label = |player: crate::PlayerId| {
        names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    };

    print_subsection("Standings");
    println!(
        "  {:<24} {:>8} {:>6} {:>6} {:>6} {:>6}",
        "Participant", "Utility", "Wins", "Ties", "Losses", "Faults"
    );
    for standing in &standings.players {
        println!(
            "  {:<24} {:>8.1} {:>6} {:>6} {:>6} {:>6}",
            label(standing.player),
            standing.total_utility,
            standing.wins,
            standing.ties,
            standing.losses,
            standing.faults
        );
    }
    if let Some(leader) = standings.leader() {
        println!(
            "\n  Leader: {} ({:+.1})",
            label(leader.player),
            leader.total_utility
        );
    }
}
