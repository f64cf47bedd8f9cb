// aivis-core/src/domain/rules/authority.rs

use async_trait::async_trait;

use super::common::{Tally, host_of};
use super::constants::{AuthorConstants, CitationConstants};
use crate::domain::error::RuleError;
use crate::domain::page::{PageCategory, RuleContext};
use crate::domain::scoring::{Applicability, Dimension, Issue, Rule, RuleDescriptor, RuleResult};

/// Byline, bio and profile link. LLM analysis can find attribution in the body
/// text and credit author credentials.
pub struct AuthorPresenceRule {
    descriptor: RuleDescriptor,
    constants: AuthorConstants,
}

impl AuthorPresenceRule {
    pub fn new(constants: AuthorConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "authority.author_presence",
                "Author Presence",
                Dimension::Authority,
            )
            .description("Visible author attribution with bio and profile")
            .weight(0.4)
            .priority(50)
            .llm_eligible(),
            constants,
        }
    }
}

#[async_trait]
impl Rule for AuthorPresenceRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let c = &self.constants;
        let mut tally = Tally::new();

        let byline = ctx
            .signals
            .author
            .as_ref()
            .filter(|author| !author.name.trim().is_empty());

        match byline {
            Some(author) => {
                tally.add(c.byline_points, format!("Author byline found: {}", author.name.trim()));
                if author.has_bio {
                    tally.add(c.bio_points, "Author bio present");
                } else {
                    tally.issue(Issue::low(
                        "Author bio missing",
                        "Add a short bio describing the author's expertise.",
                    ));
                }
                if author.has_profile_link {
                    tally.add(c.profile_points, "Author links to a profile page");
                } else {
                    tally.issue(Issue::low(
                        "No author profile link",
                        "Link the byline to a dedicated author page.",
                    ));
                }
            }
            None => {
                tally.note("No author byline found");
                tally.issue(Issue::high(
                    "No author attribution",
                    "Add a visible author byline linked to an author profile page.",
                ));
            }
        }
        tally.detail("has_byline", byline.is_some());

        if let Some(analysis) = ctx.llm.authority.available() {
            if byline.is_none() && analysis.has_author {
                tally.add(
                    c.byline_points,
                    "LLM analysis detected author attribution in the content",
                );
            }
            if analysis.author_has_credentials {
                tally.add(c.credentials_bonus, "LLM analysis found author credentials");
            }
            tally.detail("llm_enhanced", true);
        }

        Ok(tally.finish())
    }
}

/// Outbound citations, with extra credit for authoritative sources.
pub struct CitationQualityRule {
    descriptor: RuleDescriptor,
    constants: CitationConstants,
}

impl CitationQualityRule {
    pub fn new(constants: CitationConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "authority.citation_quality",
                "Citation Quality",
                Dimension::Authority,
            )
            .description("Outbound citations to credible sources")
            .weight(0.3)
            .priority(40)
            .applicability(Applicability::categories([
                PageCategory::BlogArticle,
                PageCategory::Documentation,
                PageCategory::Guide,
            ]))
            .llm_eligible(),
            constants,
        }
    }

    fn is_authoritative(&self, link: &str) -> bool {
        let Some(host) = host_of(link) else {
            return false;
        };
        self.constants.authoritative_domains.iter().any(|domain| {
            let domain = domain.to_lowercase();
            if domain.starts_with('.') {
                host.ends_with(&domain)
            } else {
                host == domain || host.ends_with(&format!(".{}", domain))
            }
        })
    }

    fn citation_points(&self, count: usize) -> f64 {
        (count as f64 * self.constants.points_per_citation).min(self.constants.max_citation_points)
    }
}

#[async_trait]
impl Rule for CitationQualityRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let c = &self.constants;
        let mut tally = Tally::new();

        let links = &ctx.signals.outbound_links;
        let authoritative = links.iter().filter(|l| self.is_authoritative(l)).count();
        let citation_points = self.citation_points(links.len());

        if links.is_empty() {
            tally.note("No outbound citations found");
            tally.issue(Issue::medium(
                "No citations to external sources",
                "Back key claims with links to primary or reputable sources.",
            ));
        } else {
            tally.add(citation_points, format!("{} outbound citation(s)", links.len()));
            if authoritative > 0 {
                tally.add(
                    (authoritative as f64 * c.points_per_authoritative)
                        .min(c.max_authoritative_points),
                    format!("{} citation(s) to authoritative domains", authoritative),
                );
            } else {
                tally.issue(Issue::low(
                    "No authoritative sources cited",
                    "Prefer government, academic or standards bodies for factual claims.",
                ));
            }
        }
        tally.detail("citation_count", links.len());
        tally.detail("authoritative_count", authoritative);

        if let Some(analysis) = ctx.llm.authority.available() {
            let counted = analysis.citation_count as usize;
            if counted > links.len() {
                let extra = self.citation_points(counted) - citation_points;
                if extra > 0.0 {
                    tally.add(
                        extra,
                        format!("LLM analysis counted {} citation(s) in the body text", counted),
                    );
                }
            }
            if analysis.cites_primary_sources {
                tally.add(
                    c.primary_source_bonus,
                    "LLM analysis confirmed primary sources are cited",
                );
            }
            tally.detail("llm_enhanced", true);
        }

        Ok(tally.finish())
    }
}
