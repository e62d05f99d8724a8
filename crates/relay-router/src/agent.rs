//! Agent router
//!
//! Chooses which named agent answers a chat query.
//!
//! # Selection Logic
//! - explicit selection of a registered agent wins (`"auto"` means none)
//! - otherwise the highest-priority route with a matching pattern
//! - otherwise the default agent

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::AgentRouteError;

/// Selection value meaning "let the router decide"
pub const AUTO_SELECTION: &str = "auto";

/// Agent used when nothing else matches
pub const DEFAULT_AGENT: &str = "general";

/// A named agent and the query patterns that select it
#[derive(Debug, Clone)]
pub struct AgentRoute {
    agent: String,
    patterns: Vec<Regex>,
    priority: i32,
}

impl AgentRoute {
    /// Route for `agent` with no patterns and priority 0
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            patterns: Vec::new(),
            priority: 0,
        }
    }

    /// Add a case-insensitive pattern
    ///
    /// # Errors
    /// Returns [`AgentRouteError::InvalidPattern`] if the regex does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, AgentRouteError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| AgentRouteError::InvalidPattern {
                agent: self.agent.clone(),
                message: e.to_string(),
            })?;
        self.patterns.push(regex);
        Ok(self)
    }

    /// Add several patterns
    ///
    /// # Errors
    /// Returns the first pattern compile error.
    pub fn patterns<'a>(
        self,
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AgentRouteError> {
        patterns.into_iter().try_fold(self, Self::pattern)
    }

    /// Set priority (higher is tried first)
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Agent id
    #[inline]
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Route priority
    #[inline]
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    fn matching_pattern(&self, query: &str) -> Option<&Regex> {
        self.patterns.iter().find(|p| p.is_match(query))
    }
}

/// How an agent was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RouteMethod {
    /// Named by the caller
    Explicit,
    /// A route pattern matched the query
    Pattern {
        /// Source of the matching pattern
        pattern: String,
    },
    /// No pattern matched
    Fallback,
}

/// Result of agent selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDecision {
    /// Chosen agent id
    pub agent: String,
    /// How it was chosen
    #[serde(flatten)]
    pub method: RouteMethod,
}

/// Dispatch table from queries to agents
#[derive(Debug, Clone)]
pub struct AgentRouter {
    routes: Vec<AgentRoute>,
    default_agent: String,
}

impl Default for AgentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRouter {
    /// Router with no routes and the `general` default agent
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            default_agent: DEFAULT_AGENT.to_string(),
        }
    }

    /// Router with the assistant's built-in agents
    ///
    /// # Errors
    /// Returns [`AgentRouteError::InvalidPattern`] if a built-in pattern is rejected.
    pub fn with_defaults() -> Result<Self, AgentRouteError> {
        let mut router = Self::new();
        router.register(
            AgentRoute::new("terrain")
                .patterns([r"\bterrain\b", r"topograph", r"\belevation\b", r"openstreetmap|\bosm\b"])?
                .with_priority(20),
        );
        router.register(
            AgentRoute::new("layout")
                .patterns([r"\blayout\b", r"turbine\s+(placement|spacing|positions?)"])?
                .with_priority(20),
        );
        router.register(
            AgentRoute::new("simulation")
                .patterns([r"\bwake\b", r"simulat", r"wind\s+rose", r"\baep\b|annual\s+energy"])?
                .with_priority(15),
        );
        router.register(
            AgentRoute::new("petrophysics")
                .patterns([
                    r"porosity",
                    r"shale\s+volume",
                    r"water\s+saturation",
                    r"well\s+logs?",
                    r"\blas\b",
                ])?
                .with_priority(10),
        );
        Ok(router)
    }

    /// Set the fallback agent
    #[inline]
    #[must_use]
    pub fn with_default_agent(mut self, agent: impl Into<String>) -> Self {
        self.default_agent = agent.into();
        self
    }

    /// Register a route
    ///
    /// Routes are kept sorted by priority, highest first; equal priorities
    /// keep registration order.
    pub fn register(&mut self, route: AgentRoute) {
        self.routes.push(route);
        self.routes.sort_by_key(|r| std::cmp::Reverse(r.priority));
    }

    /// Fallback agent id
    #[inline]
    #[must_use]
    pub fn default_agent(&self) -> &str {
        &self.default_agent
    }

    /// All selectable agent ids (routes then default)
    #[must_use]
    pub fn agents(&self) -> Vec<&str> {
        let mut agents: Vec<&str> = self.routes.iter().map(AgentRoute::agent).collect();
        if !agents.contains(&self.default_agent.as_str()) {
            agents.push(&self.default_agent);
        }
        agents
    }

    /// Check if an agent id is selectable
    #[must_use]
    pub fn contains(&self, agent: &str) -> bool {
        agent == self.default_agent || self.routes.iter().any(|r| r.agent == agent)
    }

    /// Choose the agent for `query`
    ///
    /// # Errors
    /// - [`AgentRouteError::UnknownAgent`] if `selection` names an unregistered agent
    /// - [`AgentRouteError::EmptyQuery`] if no selection is given and the query is blank
    pub fn route(
        &self,
        query: &str,
        selection: Option<&str>,
    ) -> Result<AgentDecision, AgentRouteError> {
        if let Some(selected) = selection.map(str::trim) {
            if !selected.is_empty() && !selected.eq_ignore_ascii_case(AUTO_SELECTION) {
                if !self.contains(selected) {
                    return Err(AgentRouteError::UnknownAgent(selected.to_string()));
                }
                tracing::debug!(agent = selected, "agent selected explicitly");
                return Ok(AgentDecision {
                    agent: selected.to_string(),
                    method: RouteMethod::Explicit,
                });
            }
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(AgentRouteError::EmptyQuery);
        }

        for route in &self.routes {
            if let Some(pattern) = route.matching_pattern(query) {
                tracing::debug!(agent = %route.agent, pattern = pattern.as_str(), "agent matched");
                return Ok(AgentDecision {
                    agent: route.agent.clone(),
                    method: RouteMethod::Pattern {
                        pattern: pattern.as_str().to_string(),
                    },
                });
            }
        }

        tracing::debug!(agent = %self.default_agent, "no agent pattern matched, using default");
        Ok(AgentDecision {
            agent: self.default_agent.clone(),
            method: RouteMethod::Fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> AgentRouter {
        AgentRouter::with_defaults().unwrap()
    }

    #[test]
    fn explicit_selection_wins() {
        let decision = router()
            .route("analyze terrain at 35.0, -101.4", Some("petrophysics"))
            .unwrap();
        assert_eq!(decision.agent, "petrophysics");
        assert_eq!(decision.method, RouteMethod::Explicit);
    }

    #[test]
    fn auto_selection_falls_through_to_patterns() {
        let decision = router().route("Analyze terrain for a site", Some("auto")).unwrap();
        assert_eq!(decision.agent, "terrain");
        assert!(matches!(decision.method, RouteMethod::Pattern { .. }));
    }

    #[test]
    fn unknown_explicit_agent_rejected() {
        assert_eq!(
            router().route("hello", Some("weather")).unwrap_err(),
            AgentRouteError::UnknownAgent("weather".to_string())
        );
    }

    #[test]
    fn explicit_default_agent_allowed() {
        let decision = router().route("", Some("general")).unwrap();
        assert_eq!(decision.agent, "general");
    }

    #[test]
    fn pattern_matching_is_case_insensitive() {
        assert_eq!(router().route("Show me the WIND ROSE", None).unwrap().agent, "simulation");
        assert_eq!(
            router().route("calculate porosity from the well log", None).unwrap().agent,
            "petrophysics"
        );
    }

    #[test]
    fn priority_orders_overlapping_matches() {
        // Both terrain (20) and simulation (15) patterns match.
        let decision = router().route("run a wake simulation over this terrain", None).unwrap();
        assert_eq!(decision.agent, "terrain");
    }

    #[test]
    fn fallback_to_default() {
        let decision = router().route("what can you do?", None).unwrap();
        assert_eq!(decision.agent, DEFAULT_AGENT);
        assert_eq!(decision.method, RouteMethod::Fallback);

        let custom = router().with_default_agent("renewable");
        assert_eq!(custom.route("hi", None).unwrap().agent, "renewable");
        assert!(custom.contains("renewable"));
    }

    #[test]
    fn empty_query_rejected() {
        assert_eq!(router().route("   ", None).unwrap_err(), AgentRouteError::EmptyQuery);
    }

    #[test]
    fn invalid_pattern_reported() {
        let err = AgentRoute::new("bad").pattern("(unclosed").unwrap_err();
        assert!(matches!(err, AgentRouteError::InvalidPattern { ref agent, .. } if agent == "bad"));
    }

    #[test]
    fn agents_listed_once() {
        let router = router();
        let agents = router.agents();
        assert_eq!(agents.len(), 5);
        assert_eq!(agents.last(), Some(&"general"));
    }

    #[test]
    fn decision_serializes_flat() {
        let decision = AgentDecision {
            agent: "terrain".to_string(),
            method: RouteMethod::Pattern {
                pattern: "terrain".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(decision).unwrap(),
            serde_json::json!({"agent": "terrain", "method": "pattern", "pattern": "terrain"})
        );
    }
}
