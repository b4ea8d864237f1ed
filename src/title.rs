//! Repository name cleanup and item type inference.
//!
//! Repositories following the naming guidelines look like
//! `owner/PREFIX-CODE-Title_Words`, where `CODE` is an item type abbreviation.

use crate::artifact;

/// Names whose first segment is at least this long never carry a type code.
const MAX_PREFIX_LEN: usize = 10;

/// Unknown upper-case codes longer than this are treated as part of the title.
const MAX_CODE_LEN: usize = 8;

/// A repository name reduced to a display title and an optional item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTitle {
    /// Cleaned display title.
    pub(crate) title: String,
    /// Catalog type name inferred from the type code, if any.
    pub(crate) item_type: Option<&'static str>,
}

impl CleanTitle {
    /// Parse a GitHub repository name, with or without its owner prefix.
    pub(crate) fn parse(repository: &str) -> Self {
        let name = match repository.split_once('/') {
            Some((_, name)) => name,
            None => repository,
        };

        let segments: Vec<&str> = name.split('-').collect();
        let mut item_type = None;
        let mut follows_guidelines = false;

        if segments.len() > 2 && segments[0].chars().count() < MAX_PREFIX_LEN {
            let code = segments[1];
            if let Some(found) = artifact::catalog_name_for(code) {
                item_type = Some(found);
                follows_guidelines = true;
            } else if code.to_uppercase() == code && code.chars().count() < MAX_CODE_LEN {
                follows_guidelines = true;
            }
        }

        let raw_title = if follows_guidelines {
            segments[2..].join("-")
        } else {
            name.to_string()
        };

        Self {
            title: raw_title.replace('_', " ").trim().to_string(),
            item_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CleanTitle;

    fn assert_parsed(input: &str, title: &str, item_type: Option<&str>) {
        let parsed = CleanTitle::parse(input);
        assert_eq!(parsed.title, title, "title for {input}");
        assert_eq!(parsed.item_type, item_type, "type for {input}");
    }

    #[test]
    fn parses_guideline_names() {
        assert_parsed(
            "SkylineCommunications/SLC-AS-MediaOps-Apps",
            "MediaOps-Apps",
            Some("Automation"),
        );
        assert_parsed("SLC-AS-MediaOps-Apps", "MediaOps-Apps", Some("Automation"));
        assert_parsed(
            "SkylineCommunications/PCKTV-AS-RegressionTests",
            "RegressionTests",
            Some("Automation"),
        );
        assert_parsed(
            "SkylineCommunications/RBM-AS-Playout",
            "Playout",
            Some("Automation"),
        );
        assert_parsed(
            "SkylineCommunications/SLC-Doc-Vodafone-Deutschland-GmbH",
            "Vodafone-Deutschland-GmbH",
            Some("Custom Solution"),
        );
        assert_parsed(
            "SkylineCommunications/FOXA-GQIDS-GetAppearTVData",
            "GetAppearTVData",
            Some("Ad Hoc Data Source"),
        );
        assert_parsed(
            "SkylineCommunications/YLE-C-Avid-iNewsOrder-Ingest",
            "Avid-iNewsOrder-Ingest",
            Some("Connector"),
        );
    }

    #[test]
    fn keeps_names_outside_guidelines() {
        assert_parsed(
            "SkylineCommunications/ngx-dwa-theme-creation-helper",
            "ngx-dwa-theme-creation-helper",
            None,
        );
    }

    #[test]
    fn unknown_upper_case_code_still_strips_prefix() {
        assert_parsed("SLC-XYZ-My_Tool", "My Tool", None);
    }

    #[test]
    fn long_unknown_code_is_part_of_the_title() {
        assert_parsed("SLC-ABCDEFGH-Tool", "SLC-ABCDEFGH-Tool", None);
    }

    #[test]
    fn long_prefix_disables_code_detection() {
        assert_parsed("LONGPREFIX-AS-Tool", "LONGPREFIX-AS-Tool", None);
    }

    #[test]
    fn two_segments_never_infer_a_type() {
        assert_parsed("SLC-testRepo", "SLC-testRepo", None);
        assert_parsed("owner/AS-C", "AS-C", None);
        assert_parsed("owner/plain_repo_", "plain repo", None);
    }

    #[test]
    fn only_first_slash_separates_owner() {
        assert_parsed("owner/SLC-AS-a/b", "a/b", Some("Automation"));
    }
}
