//! Immutable integrity report values.
//!
//! Checks produce per-relation sub-reports; the final report is a value
//! assembled from them once, never a shared accumulator.

use serde::Serialize;

/// How bad one finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// The eight tracked relationship types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    SkillDomain,
    AgentSkill,
    AgentMcp,
    CommandSkill,
    CommandDomain,
    FileIndex,
    HookRegistry,
    HookDocs,
}

impl Relation {
    /// All relations, in report order.
    pub const ALL: [Relation; 8] = [
        Relation::SkillDomain,
        Relation::AgentSkill,
        Relation::AgentMcp,
        Relation::CommandSkill,
        Relation::CommandDomain,
        Relation::FileIndex,
        Relation::HookRegistry,
        Relation::HookDocs,
    ];
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Relation::SkillDomain => "skill -> domain",
            Relation::AgentSkill => "agent -> skill",
            Relation::AgentMcp => "agent -> mcp",
            Relation::CommandSkill => "command -> skill",
            Relation::CommandDomain => "command -> domain",
            Relation::FileIndex => "file <-> domain index",
            Relation::HookRegistry => "hook -> registry",
            Relation::HookDocs => "hook -> docs",
        };
        write!(f, "{name}")
    }
}

/// One classified mismatch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Violation {
    pub relation: Relation,
    pub severity: Severity,
    /// Component or file on the declaring side.
    pub source: String,
    /// Name the declaration points at.
    pub target: String,
    pub message: String,
}

/// One relation's walk: how many edges, how many resolved, what failed.
#[derive(Debug, Clone, Serialize)]
pub struct RelationReport {
    pub relation: Relation,
    pub total: usize,
    pub valid: usize,
    pub violations: Vec<Violation>,
}

impl RelationReport {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            total: 0,
            valid: 0,
            violations: Vec::new(),
        }
    }

    /// Record one resolved edge.
    pub fn record_valid(&mut self) {
        self.total += 1;
        self.valid += 1;
    }

    /// Record one mismatch.
    pub fn record(&mut self, severity: Severity, source: &str, target: &str, message: String) {
        self.total += 1;
        self.violations.push(Violation {
            relation: self.relation,
            severity,
            source: source.to_string(),
            target: target.to_string(),
            message,
        });
    }

    /// Share of edges that resolve; a relation with nothing to check is
    /// vacuously healthy.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.valid as f64 / self.total as f64) * 100.0
        }
    }

    /// Sort violations for stable output.
    pub fn finish(mut self) -> Self {
        self.violations.sort();
        self
    }
}

/// The full integrity report: eight sub-reports plus unscored suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub relations: Vec<RelationReport>,
    /// Lower-confidence advice; never affects the score.
    pub suggestions: Vec<Violation>,
    /// True when the underlying scan was cut short.
    pub partial: bool,
    #[serde(rename = "healthScore")]
    pub health_score: f64,
}

impl IntegrityReport {
    pub fn assemble(
        relations: Vec<RelationReport>,
        mut suggestions: Vec<Violation>,
        partial: bool,
    ) -> Self {
        suggestions.sort();
        let health_score = Self::score_of(&relations);
        Self {
            relations,
            suggestions,
            partial,
            health_score,
        }
    }

    /// Equal-weight mean of the per-relation percentages. The weighting
    /// across relation types is a documented implementation choice.
    fn score_of(relations: &[RelationReport]) -> f64 {
        if relations.is_empty() {
            return 100.0;
        }
        relations.iter().map(RelationReport::percent).sum::<f64>() / relations.len() as f64
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.relations.iter().flat_map(|r| r.violations.iter())
    }

    pub fn count_of(&self, severity: Severity) -> usize {
        self.violations()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// 100% exactly when every relation reports valid = total.
    pub fn is_healthy(&self) -> bool {
        self.relations.iter().all(|r| r.valid == r.total)
    }
}
