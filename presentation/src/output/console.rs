//! Console output: live narration and the final report

use crate::output::formatter::ReportFormatter;
use colored::{ColoredString, Colorize};
use council_application::AnnouncementSink;
use council_domain::{
    Announcement, AnnouncementKind, GameReport, Outcome, ParticipantSummary, Team, Visibility,
};

/// Narrates announcements to stdout as they happen
pub struct ConsoleAnnouncer {
    /// Also print announcements only some participants could see
    show_private: bool,
}

impl ConsoleAnnouncer {
    pub fn new() -> Self {
        Self { show_private: true }
    }

    /// Narrate only what the whole table heard
    pub fn public_only(mut self) -> Self {
        self.show_private = false;
        self
    }

    /// One line of narration, or `None` if it is not shown
    pub fn render(&self, announcement: &Announcement) -> Option<String> {
        if !announcement.visible_to.is_public() && !self.show_private {
            return None;
        }

        let text = match announcement.kind {
            AnnouncementKind::PhaseStarted => {
                format!("\n{}", format!("== {} ==", announcement.text).cyan().bold())
            }
            AnnouncementKind::Speech => format!("  {}", announcement.text),
            AnnouncementKind::Death => format!("  {}", announcement.text.red().bold()),
            AnnouncementKind::PeacefulNight => format!("  {}", announcement.text.green()),
            AnnouncementKind::VoteResult => format!("  {}", announcement.text.yellow()),
            AnnouncementKind::GameOver => {
                format!("\n{}", announcement.text.magenta().bold())
            }
            AnnouncementKind::GameStarted
            | AnnouncementKind::Inspection
            | AnnouncementKind::AbilityUsed => format!("  {}", announcement.text),
        };

        match &announcement.visible_to {
            Visibility::Everyone => Some(text),
            Visibility::Members(members) => Some(format!(
                "{} {}",
                format!("[to {}]", Self::join(members)).dimmed(),
                text.trim_start()
            )),
        }
    }

    fn join<T: std::fmt::Display>(items: &[T]) -> String {
        items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ConsoleAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementSink for ConsoleAnnouncer {
    fn announce(&self, announcement: &Announcement) {
        if let Some(line) = self.render(announcement) {
            println!("{}", line);
        }
    }
}

/// Formats game reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report: outcome and the revealed table.
    ///
    /// Meant to follow live narration, so the log itself is not repeated.
    pub fn format(report: &GameReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Werewolf Council Results"));
        output.push('\n');
        output.push_str(&Self::outcome_line(report));
        output.push_str(&Self::section_header("The Table"));
        output.push_str(&Self::table(&report.participants));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &GameReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Outcome, every public death and vote, and the revealed table
    pub fn format_summary(report: &GameReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Werewolf Council ===".cyan().bold()
        ));
        output.push_str(&Self::outcome_line(report));
        output.push('\n');

        let key_events = report.public_log().filter(|a| {
            matches!(
                a.kind,
                AnnouncementKind::Death | AnnouncementKind::VoteResult
            )
        });
        for announcement in key_events {
            output.push_str(&format!(
                "  {} {}\n",
                format!("[round {}]", announcement.round).dimmed(),
                announcement.text
            ));
        }
        output.push('\n');
        output.push_str(&Self::table(&report.participants));

        output
    }

    fn outcome_line(report: &GameReport) -> String {
        let outcome = match report.outcome {
            Outcome::Winner(team) => Self::team_colored(team, &format!("{} wins", team)),
            Outcome::Aborted => "No winner (aborted)".yellow().bold(),
            Outcome::Pending => "Unfinished".dimmed(),
        };
        format!(
            "{} {} after {} round(s), {} survivor(s)\n",
            "Outcome:".cyan().bold(),
            outcome,
            report.rounds,
            report.survivors().len()
        )
    }

    fn table(participants: &[ParticipantSummary]) -> String {
        let width = participants
            .iter()
            .map(|p| p.id.as_str().chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for p in participants {
            let status = if p.alive {
                "alive".green()
            } else {
                "dead".red()
            };
            output.push_str(&format!(
                "  {:<width$}  {:<9} {:<6} {}\n",
                p.id.as_str(),
                Self::team_colored(p.team, p.role.as_str()),
                status,
                p.model.to_string().dimmed(),
                width = width
            ));
        }
        output
    }

    fn team_colored(team: Team, text: &str) -> ColoredString {
        match team {
            Team::Werewolves => text.red().bold(),
            Team::Villagers => text.green().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format(&self, report: &GameReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &GameReport) -> String {
        Self::format_json(report)
    }

    fn format_summary(&self, report: &GameReport) -> String {
        Self::format_summary(report)
    }
}
