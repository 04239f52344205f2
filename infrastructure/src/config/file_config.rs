//! Raw TOML configuration data types
//!
//! These structs mirror the exact structure of `council.toml`. They carry a
//! complete built-in default catalog and domain mapping so the tool runs
//! without any config file at all; a user file overrides section by section.

use council_application::CouncilParams;
use council_domain::{
    Agent, AgentCatalog, ConfigIssue, DomainConfig, DomainError, DomainMapping, QuestionPattern,
    SelectionBounds, TieBreaker,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[council]` section: deliberation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub min_agents: usize,
    pub max_agents: usize,
    pub max_rounds: usize,
    pub conflict_threshold: f64,
    pub devils_advocate: bool,
    pub allow_manual_override: bool,
    pub collect_timeout_secs: u64,
    /// "rotation" or "alphabetical"
    pub tie_breaker: String,
    pub min_perspectives: usize,
    pub expected_rounds: usize,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        let params = CouncilParams::default();
        Self {
            min_agents: params.bounds.min_agents,
            max_agents: params.bounds.max_agents,
            max_rounds: params.max_rounds,
            conflict_threshold: params.conflict_threshold,
            devils_advocate: params.devils_advocate,
            allow_manual_override: params.allow_manual_override,
            collect_timeout_secs: params.collect_timeout_secs,
            tie_breaker: "rotation".to_string(),
            min_perspectives: params.min_perspectives,
            expected_rounds: params.expected_rounds,
        }
    }
}

/// `[[agents]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub name: String,
    pub role: String,
    pub expertise: Vec<String>,
    pub triggers: Vec<String>,
    pub veto_power: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            expertise: Vec::new(),
            triggers: Vec::new(),
            veto_power: false,
        }
    }
}

impl FileAgentConfig {
    fn to_agent(&self) -> Agent {
        let mut agent = Agent::new(self.name.clone(), self.role.clone())
            .with_expertise(self.expertise.iter().cloned())
            .with_triggers(self.triggers.iter().cloned());
        if self.veto_power {
            agent = agent.with_veto_power();
        }
        agent
    }
}

/// `[domains.<name>]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDomainConfig {
    pub keywords: Vec<String>,
    pub primary_agents: Vec<String>,
    pub secondary_agents: Vec<String>,
    pub weight: f64,
}

impl Default for FileDomainConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            primary_agents: Vec::new(),
            secondary_agents: Vec::new(),
            weight: 1.0,
        }
    }
}

impl FileDomainConfig {
    fn to_domain(&self) -> DomainConfig {
        DomainConfig {
            keywords: self.keywords.iter().cloned().collect(),
            primary_agents: self.primary_agents.iter().cloned().collect(),
            secondary_agents: self.secondary_agents.iter().cloned().collect(),
            weight: self.weight,
        }
    }
}

/// `[[question_patterns]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuestionPattern {
    pub pattern: String,
    pub domain: String,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Directory for markdown session reports
    pub directory: String,
    /// Whether to write a report after each session
    pub write_reports: bool,
    /// "full", "progress" or "summary"
    pub visibility: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            directory: "./council-sessions".to_string(),
            write_reports: true,
            visibility: "full".to_string(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Serialized first: TOML needs plain values ahead of any table
    pub fallback_roster: Vec<String>,
    pub council: FileCouncilConfig,
    pub output: FileOutputConfig,
    pub domains: BTreeMap<String, FileDomainConfig>,
    pub agents: Vec<FileAgentConfig>,
    pub question_patterns: Vec<FileQuestionPattern>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            fallback_roster: vec![
                "ProductManager".to_string(),
                "TechLead".to_string(),
                "SecurityEngineer".to_string(),
            ],
            council: FileCouncilConfig::default(),
            output: FileOutputConfig::default(),
            domains: default_domains(),
            agents: default_agents(),
            question_patterns: default_question_patterns(),
        }
    }
}

impl FileConfig {
    /// Build the validated agent catalog
    pub fn catalog(&self) -> Result<AgentCatalog, DomainError> {
        AgentCatalog::new(self.agents.iter().map(FileAgentConfig::to_agent).collect())
    }

    /// Build the domain mapping (unvalidated; see [`FileConfig::validate`])
    pub fn mapping(&self) -> DomainMapping {
        DomainMapping {
            domains: self
                .domains
                .iter()
                .map(|(name, d)| (name.clone(), d.to_domain()))
                .collect(),
            question_patterns: self
                .question_patterns
                .iter()
                .map(|qp| QuestionPattern {
                    pattern: qp.pattern.clone(),
                    domain: qp.domain.clone(),
                })
                .collect(),
            fallback_roster: self.fallback_roster.clone(),
        }
    }

    /// Build execution parameters
    pub fn params(&self) -> CouncilParams {
        CouncilParams {
            bounds: SelectionBounds {
                min_agents: self.council.min_agents,
                max_agents: self.council.max_agents,
                tie_breaker: self.tie_breaker(),
            },
            max_rounds: self.council.max_rounds,
            conflict_threshold: self.council.conflict_threshold,
            devils_advocate: self.council.devils_advocate,
            allow_manual_override: self.council.allow_manual_override,
            collect_timeout_secs: self.council.collect_timeout_secs,
            min_perspectives: self.council.min_perspectives,
            expected_rounds: self.council.expected_rounds,
        }
    }

    fn tie_breaker(&self) -> TieBreaker {
        match self.council.tie_breaker.to_lowercase().as_str() {
            "alphabetical" => TieBreaker::Alphabetical,
            _ => TieBreaker::Rotation,
        }
    }

    /// Validate the whole configuration, returning all detected issues
    ///
    /// Combines the domain-mapping checks with bound sanity, catalog
    /// construction and cross-references between domains and agents.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        use council_domain::Severity;

        let mut issues = self.mapping().validate();

        if let Err(e) = self.catalog() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                message: format!("agent catalog: {}", e),
            });
        }

        if self.council.min_agents == 0 || self.council.min_agents > self.council.max_agents {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                message: format!(
                    "invalid agent bounds: min_agents={}, max_agents={}",
                    self.council.min_agents, self.council.max_agents
                ),
            });
        }

        if self.council.max_rounds == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                message: "max_rounds must be at least 1".to_string(),
            });
        }

        let known = ["rotation", "alphabetical"];
        if !known.contains(&self.council.tie_breaker.to_lowercase().as_str()) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                message: format!(
                    "unknown tie_breaker '{}', falling back to 'rotation'",
                    self.council.tie_breaker
                ),
            });
        }

        // Domains and fallback roster naming agents missing from the catalog
        // still work (selection skips them), but almost always a typo.
        let names: Vec<&str> = self.agents.iter().map(|a| a.name.as_str()).collect();
        for (domain, config) in &self.domains {
            for agent in config.primary_agents.iter().chain(&config.secondary_agents) {
                if !names.contains(&agent.as_str()) {
                    issues.push(ConfigIssue {
                        severity: Severity::Warning,
                        message: format!(
                            "domain '{}' references unknown agent '{}'",
                            domain, agent
                        ),
                    });
                }
            }
        }
        for agent in &self.fallback_roster {
            if !names.contains(&agent.as_str()) {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    message: format!("fallback roster references unknown agent '{}'", agent),
                });
            }
        }

        issues
    }
}

fn default_agents() -> Vec<FileAgentConfig> {
    fn agent(name: &str, role: &str, expertise: &[&str], triggers: &[&str]) -> FileAgentConfig {
        FileAgentConfig {
            name: name.to_string(),
            role: role.to_string(),
            expertise: expertise.iter().map(|s| s.to_string()).collect(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
            veto_power: false,
        }
    }

    let mut agents = vec![
        agent(
            "SecurityEngineer",
            "Security and threat review",
            &["security", "authentication", "authorization", "encryption"],
            &["vulnerability", "exploit", "credential"],
        ),
        agent(
            "PerformanceEngineer",
            "Performance and scalability review",
            &["performance", "latency", "caching", "scalability"],
            &["slow", "bottleneck", "throughput"],
        ),
        agent(
            "SoftwareArchitect",
            "System design and structure",
            &["architecture", "design", "modularity", "api"],
            &["refactor", "coupling", "pattern"],
        ),
        agent(
            "QaEngineer",
            "Quality assurance and testing",
            &["testing", "quality", "coverage"],
            &["regression", "flaky", "ci"],
        ),
        agent(
            "DataEngineer",
            "Data modeling and storage",
            &["data", "database", "schema", "storage"],
            &["migration", "pipeline", "sql"],
        ),
        agent(
            "FrontendSpecialist",
            "User interface and experience",
            &["frontend", "ui", "ux", "accessibility"],
            &["component", "interface", "responsive"],
        ),
        agent(
            "ProductManager",
            "Product priorities and user impact",
            &["product", "requirements", "roadmap"],
            &["user", "customer", "scope"],
        ),
        agent(
            "TechLead",
            "Technical direction and tradeoffs",
            &["architecture", "delivery", "maintainability"],
            &["tradeoff", "risk", "estimate"],
        ),
    ];
    agents[0].veto_power = true;
    agents
}

fn default_domains() -> BTreeMap<String, FileDomainConfig> {
    fn domain(keywords: &[&str], primary: &[&str], secondary: &[&str]) -> FileDomainConfig {
        FileDomainConfig {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            primary_agents: primary.iter().map(|s| s.to_string()).collect(),
            secondary_agents: secondary.iter().map(|s| s.to_string()).collect(),
            weight: 1.0,
        }
    }

    [
        (
            "security",
            domain(
                &["auth", "security", "vulnerability", "encryption", "oauth", "token", "credential"],
                &["SecurityEngineer"],
                &["TechLead", "SoftwareArchitect"],
            ),
        ),
        (
            "performance",
            domain(
                &["performance", "latency", "slow", "cache", "caching", "scale", "throughput"],
                &["PerformanceEngineer"],
                &["SoftwareArchitect", "DataEngineer"],
            ),
        ),
        (
            "architecture",
            domain(
                &["architecture", "design", "refactor", "module", "api", "structure"],
                &["SoftwareArchitect", "TechLead"],
                &["SecurityEngineer"],
            ),
        ),
        (
            "testing",
            domain(
                &["test", "testing", "coverage", "regression", "ci"],
                &["QaEngineer"],
                &["TechLead"],
            ),
        ),
        (
            "data",
            domain(
                &["data", "database", "schema", "migration", "storage", "sql"],
                &["DataEngineer"],
                &["SoftwareArchitect", "PerformanceEngineer"],
            ),
        ),
        (
            "frontend",
            domain(
                &["frontend", "ui", "ux", "component", "accessibility", "interface"],
                &["FrontendSpecialist"],
                &["ProductManager", "QaEngineer"],
            ),
        ),
    ]
    .into_iter()
    .map(|(name, d)| (name.to_string(), d))
    .collect()
}

fn default_question_patterns() -> Vec<FileQuestionPattern> {
    let pattern = |pattern: &str, domain: &str| FileQuestionPattern {
        pattern: pattern.to_string(),
        domain: domain.to_string(),
    };
    vec![
        pattern(r"(?i)\b(secure|protect|encrypt|login|sign[- ]?in)\b", "security"),
        pattern(r"(?i)\bwhy is .+ slow\b", "performance"),
        pattern(r"(?i)\b(migrate|migration)\b", "data"),
    ]
}
