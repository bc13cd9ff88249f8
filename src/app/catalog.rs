//! Listing and selecting solutions
//!
//! Solutions are fetched fresh on every call; nothing is cached between
//! export rounds.

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::models::SolutionRecord;
use crate::app::runner::{OutputMode, ProcessRunner};
use crate::app::table::parse_solutions;
use crate::constants::{pac, table, ui};
use crate::errors::{Result, SelectionError, SelectionResult};

/// What the user asked for at the selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Row chosen by its 1-based index
    Indexed(String),
    /// Non-numeric input used verbatim as a solution name
    Literal(String),
    Quit,
}

impl Selection {
    /// The solution name to export, if any
    pub fn solution_name(&self) -> Option<&str> {
        match self {
            Selection::Indexed(name) | Selection::Literal(name) => Some(name),
            Selection::Quit => None,
        }
    }
}

/// Map raw input onto a solution
///
/// Numbers must fall within `1..=records.len()`; an out-of-range number never
/// falls back to a literal name. Anything that does not parse as a number is
/// taken as the solution's unique name.
pub fn resolve_selection(input: &str, records: &[SolutionRecord]) -> SelectionResult<Selection> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(ui::QUIT) {
        return Ok(Selection::Quit);
    }

    if input.is_empty() {
        return Err(SelectionError::EmptyName);
    }
    if !is_integer(input) {
        return Ok(Selection::Literal(input.to_string()));
    }

    // Integers too large for usize are out of range as well
    match input.trim_start_matches('+').parse::<usize>() {
        Ok(index) if (1..=records.len()).contains(&index) => {
            Ok(Selection::Indexed(records[index - 1].unique_name.clone()))
        }
        _ => Err(SelectionError::OutOfRange {
            count: records.len(),
        }),
    }
}

/// Optional sign followed by at least one ASCII digit
fn is_integer(input: &str) -> bool {
    let digits = input.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Render the numbered solution table
pub fn render_table(records: &[SolutionRecord]) -> String {
    let mut out = String::new();
    let title_rule = "=".repeat(table::RULE_WIDTH);
    let rule = "-".repeat(table::RULE_WIDTH);

    out.push_str(&format!("\n{}\nAVAILABLE SOLUTIONS\n{}\n", title_rule, title_rule));
    out.push_str(&format!(
        "{:<iw$} {:<uw$} {:<fw$} {}\n",
        "#",
        "Unique Name",
        "Friendly Name",
        "Version",
        iw = table::INDEX_WIDTH,
        uw = table::UNIQUE_NAME_WIDTH,
        fw = table::FRIENDLY_NAME_WIDTH,
    ));
    out.push_str(&rule);
    out.push('\n');

    for (idx, record) in records.iter().enumerate() {
        let columns = record.columns();
        out.push_str(&format!(
            "{:<iw$} {:<uw$} {:<fw$} {}\n",
            idx + 1,
            columns.unique_name,
            columns.display_friendly_name(),
            columns.version,
            iw = table::INDEX_WIDTH,
            uw = table::UNIQUE_NAME_WIDTH,
            fw = table::FRIENDLY_NAME_WIDTH,
        ));
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Total: {} solutions", records.len()));
    out
}

/// Solutions available in the signed-in environment
pub struct SolutionCatalog {
    runner: Arc<dyn ProcessRunner>,
}

impl SolutionCatalog {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Fetch, print and return the solutions in listing order
    ///
    /// A failing listing degrades to an empty collection after printing a
    /// diagnostic; only a missing pac executable is an error.
    pub async fn list(&self) -> Result<Vec<SolutionRecord>> {
        println!("\n📦 Fetching available solutions...");

        let output = self
            .runner
            .run(pac::SOLUTION_LIST_ARGS, OutputMode::Capture)
            .await?;

        if !output.success() {
            warn!("solution list exited with status {}", output.exit_code);
            println!("❌ Failed to fetch solutions. Make sure you're authenticated.");
            if !output.stderr.is_empty() {
                println!("Error: {}", output.stderr);
            }
            return Ok(Vec::new());
        }

        let records = parse_solutions(&output.stdout);
        if records.is_empty() {
            println!("No solutions found or unable to parse output.");
            return Ok(records);
        }

        info!("Found {} solutions", records.len());
        println!("{}", render_table(&records));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FakeRunner, Reply};

    fn records(names: &[&str]) -> Vec<SolutionRecord> {
        names
            .iter()
            .map(|n| {
                SolutionRecord::from_line(&format!("{} {} Friendly 1.0.0.0 False", n, n)).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_resolve_by_index() {
        let records = records(&["A", "B", "C"]);

        assert_eq!(
            resolve_selection("2", &records),
            Ok(Selection::Indexed("B".to_string()))
        );
        assert_eq!(
            resolve_selection(" 1 ", &records),
            Ok(Selection::Indexed("A".to_string()))
        );
        assert_eq!(
            resolve_selection("3", &records),
            Ok(Selection::Indexed("C".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_has_no_fallback() {
        let records = records(&["A", "B", "C"]);

        assert_eq!(
            resolve_selection("5", &records),
            Err(SelectionError::OutOfRange { count: 3 })
        );
        assert_eq!(
            resolve_selection("0", &records),
            Err(SelectionError::OutOfRange { count: 3 })
        );
        assert_eq!(
            resolve_selection("-1", &records),
            Err(SelectionError::OutOfRange { count: 3 })
        );

        // Numbers beyond any integer type are still numbers
        for input in ["99999999999999999999", "+99999999999999999999", "-99999999999999999999"] {
            assert_eq!(
                resolve_selection(input, &records),
                Err(SelectionError::OutOfRange { count: 3 }),
                "{}",
                input
            );
        }
        assert_eq!(
            resolve_selection("+2", &records),
            Ok(Selection::Indexed("B".to_string()))
        );
    }

    #[test]
    fn test_literal_fallback() {
        let records = records(&["A", "B", "C"]);

        let selection = resolve_selection("MyCustomName", &records).unwrap();
        assert_eq!(selection, Selection::Literal("MyCustomName".to_string()));
        assert_eq!(selection.solution_name(), Some("MyCustomName"));

        assert_eq!(
            resolve_selection("", &records),
            Err(SelectionError::EmptyName)
        );

        // A lone sign or mixed digits is a name, not a number
        assert_eq!(
            resolve_selection("-", &records),
            Ok(Selection::Literal("-".to_string()))
        );
        assert_eq!(
            resolve_selection("2fast", &records),
            Ok(Selection::Literal("2fast".to_string()))
        );
    }

    #[test]
    fn test_quit() {
        let records = records(&["A"]);

        assert_eq!(resolve_selection("q", &records), Ok(Selection::Quit));
        assert_eq!(resolve_selection("Q", &records), Ok(Selection::Quit));
        assert_eq!(Selection::Quit.solution_name(), None);
    }

    #[test]
    fn test_render_table_layout() {
        let records = vec![
            SolutionRecord::from_line("ContosoCore Contoso Field Service Extensions 1.0.0.3 False")
                .unwrap(),
            SolutionRecord::from_line("Tiny 1.0").unwrap(),
        ];

        let rendered = render_table(&records);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines.contains(&"AVAILABLE SOLUTIONS"));
        assert!(lines.iter().any(|l| l.starts_with("#    Unique Name")));

        let first = lines.iter().find(|l| l.starts_with("1 ")).unwrap();
        assert_eq!(
            *first,
            format!(
                "{:<4} {:<30} {:<25} {}",
                1, "ContosoCore", "Contoso Field Service...", "1.0.0.3"
            )
        );

        let second = lines.iter().find(|l| l.starts_with("2 ")).unwrap();
        assert_eq!(second.trim_end(), "2    Tiny");
        assert_eq!(lines.last(), Some(&"Total: 2 solutions"));
    }

    #[tokio::test]
    async fn test_list_parses_in_order() {
        let listing = "Unique Name Friendly Name Version Managed\n\
                       ---- ----\n\
                       B Bee 1.0 False\n\
                       A Ay 2.0 True\n";
        let catalog = SolutionCatalog::new(std::sync::Arc::new(
            FakeRunner::new().on(&["solution", "list"], Reply::ok(listing)),
        ));

        let records = catalog.list().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.unique_name.as_str()).collect();

        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(records[1].columns().managed, Some(true));
    }

    #[tokio::test]
    async fn test_failed_listing_is_empty_not_error() {
        let catalog = SolutionCatalog::new(std::sync::Arc::new(
            FakeRunner::new().on(&["solution", "list"], Reply::failed(1, "No active profile")),
        ));

        let records = catalog.list().await.unwrap();
        assert!(records.is_empty());
    }
}
