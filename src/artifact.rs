//! Catalog item types and the naming aliases that map onto them.
//!
//! Repository names carry a short abbreviation (`SLC-AS-MyScript`), GitHub
//! topics carry a long machine-readable form (`automationscript`), and people
//! write the human label (`automation script`). All of them resolve to the same
//! catalog type name through [`find`].

/// A catalog item type and every spelling that refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactType {
    /// Abbreviations used in repository names.
    pub(crate) abbreviations: &'static [&'static str],
    /// Topic names and human-readable labels.
    pub(crate) aliases: &'static [&'static str],
    /// The type name written to the catalog file.
    pub(crate) catalog_name: &'static str,
}

impl ArtifactType {
    /// Return true when the term names this type in any of its forms.
    pub(crate) fn is_match(&self, term: &str) -> bool {
        let matches = |name: &&str| name.eq_ignore_ascii_case(term);
        matches(&self.catalog_name)
            || self.abbreviations.iter().any(matches)
            || self.aliases.iter().any(matches)
    }
}

/// Shorthand for building table rows.
const fn entry(
    abbreviations: &'static [&'static str],
    aliases: &'static [&'static str],
    catalog_name: &'static str,
) -> ArtifactType {
    ArtifactType {
        abbreviations,
        aliases,
        catalog_name,
    }
}

/// Known item types, in lookup order.
pub const ARTIFACT_TYPES: &[ArtifactType] = &[
    entry(
        &["AS"],
        &["automationscript", "automation script"],
        "Automation",
    ),
    entry(&["C"], &["connector"], "Connector"),
    entry(
        &["CF"],
        &["companionfile", "companion file"],
        "Custom Solution",
    ),
    entry(
        &["CHATOPS"],
        &["chatopsextension", "chatops extension"],
        "ChatOps Extension",
    ),
    entry(&["D"], &["dashboard"], "Dashboard"),
    entry(
        &["DISMACRO"],
        &["dismacro", "dis macro"],
        "Custom Solution",
    ),
    entry(&["DOC"], &["documentation"], "Custom Solution"),
    entry(
        &["F"],
        &["functiondefinition", "function definition"],
        "Custom Solution",
    ),
    entry(
        &["GQIDS"],
        &["gqidatasource", "gqi data source", "ad hoc data source"],
        "Ad Hoc Data Source",
    ),
    entry(
        &["GQIO"],
        &["gqioperator", "gqi operator", "data transformer"],
        "Data Transformer",
    ),
    entry(
        &["LSO"],
        &[
            "lifecycleserviceorchestration",
            "lifecycle service orchestration",
        ],
        "Custom Solution",
    ),
    entry(
        &["PA"],
        &["processautomation", "process automation"],
        "Custom Solution",
    ),
    entry(
        &["PLS"],
        &["profileloadscript", "profile load script"],
        "Custom Solution",
    ),
    entry(
        &["S"],
        &["solution", "custom solution"],
        "Custom Solution",
    ),
    entry(
        &["SC"],
        &["scriptedconnector", "scripted connector"],
        "Scripted Connector",
    ),
    entry(
        &["T"],
        &["testingsolution", "testing solution"],
        "Testing Solution",
    ),
    entry(
        &["UDAPI"],
        &["userdefinedapi", "user defined api"],
        "User-Defined API",
    ),
    entry(&["V"], &["visio", "visual overview"], "Visual Overview"),
    entry(
        &["LCA"],
        &["lowcodeapp", "low code app", "low-code app"],
        "Low-Code App",
    ),
];

/// Find the first type matching a term by catalog name, abbreviation, or alias.
pub fn find(term: &str) -> Option<&'static ArtifactType> {
    ARTIFACT_TYPES
        .iter()
        .find(|artifact| artifact.is_match(term))
}

/// Return the catalog type name for a term, if it names a known type.
pub fn catalog_name_for(term: &str) -> Option<&'static str> {
    find(term).map(|artifact| artifact.catalog_name)
}
