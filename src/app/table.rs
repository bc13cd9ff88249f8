//! Scraping of pac's human-readable tables
//!
//! pac has no stable machine-readable listing for these commands, so rows are
//! recovered line by line: separators, headers and blank lines are dropped and
//! the remaining lines are treated as data.

use tracing::debug;

use crate::app::models::SolutionRecord;
use crate::constants::table;

/// Which pac table is being scraped; each has its own header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `pac auth list`
    AuthProfiles,
    /// `pac solution list`
    Solutions,
}

impl TableKind {
    fn header(self) -> &'static str {
        match self {
            TableKind::AuthProfiles => table::AUTH_HEADER,
            TableKind::Solutions => table::SOLUTION_HEADER,
        }
    }
}

/// Whether a line carries no data for the given table
pub fn is_noise_line(line: &str, kind: TableKind) -> bool {
    line.trim().is_empty() || line.contains(table::SEPARATOR) || line.contains(kind.header())
}

/// Lines that survive noise filtering, in output order
pub fn data_lines(output: &str, kind: TableKind) -> impl Iterator<Item = &str> {
    output
        .trim()
        .lines()
        .filter(move |line| !is_noise_line(line, kind))
}

/// Whether a profile row points at a Dynamics organization URL
pub fn is_active_profile_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains(table::HOST_MARKER) && lower.contains(table::ORG_MARKER)
}

/// Parsed `pac auth list` output
#[derive(Debug, Clone, Default)]
pub struct ProfileListing {
    raw: String,
    profiles: Vec<String>,
}

impl ProfileListing {
    pub fn parse(output: &str) -> Self {
        let profiles: Vec<String> = data_lines(output, TableKind::AuthProfiles)
            .map(str::to_string)
            .collect();
        debug!("Parsed {} authentication profile rows", profiles.len());

        Self {
            raw: output.to_string(),
            profiles,
        }
    }

    /// The listing exactly as pac printed it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Data rows of the listing
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// At least one row looks like a signed-in environment
    ///
    /// The whole listing must first mention `active`, or mention `http`
    /// without `universal`; only then are the rows inspected.
    pub fn has_active_profile(&self) -> bool {
        listing_mentions_profiles(&self.raw)
            && self.profiles.iter().any(|line| is_active_profile_line(line))
    }
}

/// Coarse check over the whole `pac auth list` output
fn listing_mentions_profiles(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains(table::ACTIVE_MARKER)
        || (lower.contains(table::HOST_MARKER) && !lower.contains(table::UNIVERSAL_MARKER))
}

/// Extract solution records from `pac solution list` output
pub fn parse_solutions(output: &str) -> Vec<SolutionRecord> {
    let records: Vec<SolutionRecord> = data_lines(output, TableKind::Solutions)
        .filter_map(SolutionRecord::from_line)
        .collect();
    debug!("Parsed {} solution rows", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION_LISTING: &str = "\

Unique Name                Friendly Name                  Version      Managed
-------------------------  -----------------------------  -----------  -------
ContosoCore                Contoso Core                   1.0.0.3      False
FieldServiceExtensions     Contoso Field Service Extensions 2.1.0.0    False
msdyn_Default              Default Solution               1.0          True
";

    const AUTH_LISTING: &str = "\
Index Active Kind      Name Friendly Name    Url                                  User
[1]   *      UNIVERSAL      Contoso (Default) https://contoso.crm.dynamics.com/    admin@contoso.com
";

    #[test]
    fn test_noise_filtering() {
        assert!(is_noise_line("", TableKind::Solutions));
        assert!(is_noise_line("    ", TableKind::Solutions));
        assert!(is_noise_line("------  ------", TableKind::Solutions));
        assert!(is_noise_line("Unique Name  Friendly Name", TableKind::Solutions));
        assert!(is_noise_line("Index Active Kind", TableKind::AuthProfiles));

        assert!(!is_noise_line("ContosoCore Contoso 1.0 False", TableKind::Solutions));
        // Headers only apply to their own table
        assert!(!is_noise_line("IndexBuilder Index Builder 1.0", TableKind::Solutions));
        assert!(!is_noise_line("Unique Name", TableKind::AuthProfiles));
    }

    #[test]
    fn test_parse_solutions_keeps_order_and_raw_lines() {
        let records = parse_solutions(SOLUTION_LISTING);
        let names: Vec<&str> = records.iter().map(|r| r.unique_name.as_str()).collect();

        assert_eq!(
            names,
            vec!["ContosoCore", "FieldServiceExtensions", "msdyn_Default"]
        );
        assert!(records[0].raw_line.contains("1.0.0.3"));

        let columns = records[1].columns();
        assert_eq!(columns.version, "2.1.0.0");
        assert_eq!(columns.display_friendly_name(), "Contoso Field Service...");
    }

    #[test]
    fn test_only_noise_yields_no_solutions() {
        let output = "\nUnique Name   Friendly Name   Version\n---------  --------\n\n   \n";
        assert!(parse_solutions(output).is_empty());
        assert!(parse_solutions("").is_empty());
    }

    #[test]
    fn test_active_profile_detection() {
        let listing = ProfileListing::parse(AUTH_LISTING);

        assert_eq!(listing.profiles().len(), 1);
        assert!(listing.has_active_profile());
        assert_eq!(listing.raw(), AUTH_LISTING);
    }

    #[test]
    fn test_active_profile_requires_both_markers() {
        assert!(is_active_profile_line("[1] * HTTPS://ORG.CRM4.DYNAMICS.COM"));
        assert!(!is_active_profile_line("[1] * https://make.powerapps.com"));
        assert!(!is_active_profile_line("[1] * contoso.crm.dynamics.com"));

        let empty = ProfileListing::parse("No profiles were found on this computer.");
        assert!(!empty.has_active_profile());

        // A header mentioning both markers is still a header
        let header_only = ProfileListing::parse("Index Url (http, crm)");
        assert!(!header_only.has_active_profile());
    }

    #[test]
    fn test_listing_gate_before_row_check() {
        // No "active" anywhere and a UNIVERSAL profile: the rows are not consulted
        let universal_without_header = ProfileListing::parse(
            "[1] * UNIVERSAL https://contoso.crm.dynamics.com/ admin@contoso.com",
        );
        assert!(!universal_without_header.has_active_profile());

        // No "active" but an http row without UNIVERSAL passes the gate
        let plain_row =
            ProfileListing::parse("[1] * https://contoso.crm.dynamics.com/ admin@contoso.com");
        assert!(plain_row.has_active_profile());

        // pac's real header carries "Active", so UNIVERSAL rows are still detected
        assert!(ProfileListing::parse(AUTH_LISTING).has_active_profile());
    }
}
