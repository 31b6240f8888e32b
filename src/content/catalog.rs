// In-memory content catalog
//
// Holds the projects and posts for the whole process. Loaded from a JSON file
// or from the built-in set, then never touched again.

use crate::content::{BlogPost, Project};
use crate::error::{FolioError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

// The post page shows this many "more articles"
pub const RELATED_POSTS_LIMIT: usize = 2;

// Shape of the content file on disk
#[derive(Debug, Default, Deserialize)]
struct ContentFile {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    posts: Vec<BlogPost>,
}

/// Read-only collection of projects and posts
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Arc<Vec<Project>>,
    posts: Arc<Vec<BlogPost>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate slugs
    pub fn new(projects: Vec<Project>, posts: Vec<BlogPost>) -> Result<Self> {
        ensure_unique(projects.iter().map(|p| p.slug.as_str()))?;
        ensure_unique(posts.iter().map(|p| p.slug.as_str()))?;

        Ok(Self {
            projects: Arc::new(projects),
            posts: Arc::new(posts),
        })
    }

    /// Load a catalog from a JSON content file
    ///
    /// # Arguments
    /// * `path` - File shaped like `{ "projects": [...], "posts": [...] }`
    ///
    /// # Returns
    /// * `Ok(Catalog)` - Parsed content
    /// * `Err(FolioError)` - Unreadable file, bad JSON, or a repeated slug
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let file: ContentFile = serde_json::from_str(&raw)?;

        debug!(
            path = %path.display(),
            projects = file.projects.len(),
            posts = file.posts.len(),
            "loaded content file"
        );

        Self::new(file.projects, file.posts)
    }

    /// The content that ships with the binary
    pub fn builtin() -> Self {
        Self {
            projects: Arc::new(builtin_projects()),
            posts: Arc::new(builtin_posts()),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Shared handle to the post corpus, for search sessions
    pub fn post_corpus(&self) -> Arc<Vec<BlogPost>> {
        Arc::clone(&self.posts)
    }

    pub fn project(&self, slug: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| FolioError::ProjectNotFound(slug.to_string()))
    }

    pub fn post(&self, slug: &str) -> Result<&BlogPost> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| FolioError::PostNotFound(slug.to_string()))
    }

    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Posts ordered newest first
    ///
    /// The sort is stable, so posts from the same month keep file order.
    /// Posts whose date can't be parsed go last.
    pub fn posts_newest_first(&self) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.published_on().cmp(&a.published_on()));
        posts
    }

    /// Other posts to show under a post, in catalog order
    pub fn related_posts(&self, slug: &str) -> Vec<&BlogPost> {
        self.posts
            .iter()
            .filter(|p| p.slug != slug)
            .take(RELATED_POSTS_LIMIT)
            .collect()
    }
}

fn ensure_unique<'a>(slugs: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(FolioError::DuplicateSlug(slug.to_string()));
        }
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            slug: "coderevu-ai-pr-review".to_string(),
            name: "CodeRevU — AI-Powered GitHub PR Review SaaS".to_string(),
            description: "An AI-powered GitHub pull request review platform that automatically \
                          generates structured, actionable code reviews using Retrieval-Augmented \
                          Generation (RAG) and Gemini AI."
                .to_string(),
            long_description: Some(
                r#"
CodeRevU was built to eliminate repetitive manual pull request reviews by automating high-quality, context-aware feedback directly at the PR level.

The system indexes repositories asynchronously, retrieves relevant code context using vector search, and generates structured review comments using Gemini AI.

**Key Challenges**
- Indexing large repositories without blocking GitHub webhook flows.
- Designing a RAG pipeline that retrieves semantically relevant code instead of naive file matches.
- Handling concurrent PR events safely across multiple repositories.
- Preventing hallucinated feedback by grounding LLM responses in real code context.

**Key Learnings**
- Pinecone-based vector search significantly improved contextual relevance over keyword-based approaches.
- Asynchronous workflows with Inngest prevented API blocking and enabled safe concurrency.
- Structured prompts reduced noisy or vague review output.
- Webhook-driven architectures require idempotency and replay safety.

**Uniqueness**
- PR-level RAG instead of generic repo chat.
- Fully automated review generation on PR open/update.
- Structured feedback designed for real engineering teams.

**Impact**
- Eliminated repetitive manual review effort for common PR patterns.
- Enabled faster review cycles with consistent feedback quality.
"#
                .to_string(),
            ),
            year: "2025".to_string(),
            tech: strings(&[
                "Next.js 16",
                "TypeScript",
                "PostgreSQL",
                "Prisma",
                "Gemini AI",
                "Pinecone",
                "Inngest",
                "GitHub Webhooks",
            ]),
            image: None,
            link: None,
            github: Some("https://github.com/xd-sarthak/CodeRevU".to_string()),
            featured: true,
        },
        Project {
            slug: "blogify-distributed-system".to_string(),
            name: "Blogify — Distributed Blogging Platform".to_string(),
            description: "A 3-service distributed backend system with async communication, Redis \
                          caching, and RabbitMQ-based messaging, achieving 99.9% message delivery \
                          reliability."
                .to_string(),
            long_description: Some(
                r#"
Blogify was designed to explore real-world distributed system patterns using microservices and asynchronous messaging.

The system is split into User, Author, and Blog services communicating via RabbitMQ, with Redis used for caching and pub/sub invalidation.

**Key Challenges**
- Designing message-driven workflows without tight coupling.
- Maintaining cache consistency across services.
- Handling retries, failures, and duplicate events.
- Ensuring reliable delivery under load.

**Key Learnings**
- Redis TTL-based caching reduced read latency from ~120ms to under 6ms.
- Pub/Sub invalidation enabled near-instant cross-service cache coherence.
- Message acknowledgements were critical for reliability.
- Docker simplified local orchestration and testing.

**Uniqueness**
- True async service communication (not fake microservices).
- Redis + RabbitMQ used for distinct responsibilities.
- Failure-aware message handling.

**Impact**
- Achieved 99.9% message delivery reliability.
- Reduced read latency by ~95%.
"#
                .to_string(),
            ),
            year: "2025".to_string(),
            tech: strings(&["Node.js", "TypeScript", "MongoDB", "Redis", "RabbitMQ", "Docker"]),
            image: None,
            link: None,
            github: Some("https://github.com/xd-sarthak/blogapp".to_string()),
            featured: false,
        },
    ]
}

fn builtin_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            slug: "understanding-monorepo-and-turborepo".to_string(),
            title: "Understanding Monorepo and Turborepo".to_string(),
            excerpt: "A practical, recruiter-friendly guide to Monorepos and how Turborepo \
                      accelerates modern development with intelligent caching, parallel \
                      execution, and dependency-aware task scheduling."
                .to_string(),
            content: Some(
                r#"
Modern engineering teams juggle multiple applications, shared modules, design systems, and utility libraries. Maintaining these assets across isolated repositories often leads to duplicated effort, version drift, and unnecessary complexity. This is where the Monorepo pattern shines. A Monorepo consolidates all your projects into a single, unified codebase, making it easier to share logic, maintain consistency, and foster cross-team collaboration.
"#
                .to_string(),
            ),
            date: "Dec 2025".to_string(),
            read_time: "8 min".to_string(),
            tags: strings(&["monorepo", "turborepo", "tooling", "architecture"]),
            featured: true,
        },
        BlogPost {
            slug: "devops-for-developers-smooth-deployment-workflows-github-actions".to_string(),
            title: "Devops for developers: Smooth deployment workflows with CI/CD using Github Actions"
                .to_string(),
            excerpt: "A practical guide for developers who want to build reliable CI/CD pipelines \
                      using GitHub Actions, automate deployments, and ship code to production \
                      with confidence."
                .to_string(),
            content: None,
            date: "Dec 2025".to_string(),
            read_time: "12 min".to_string(),
            tags: strings(&["devops", "ci/cd", "github actions", "automation", "deployment"]),
            featured: true,
        },
        BlogPost {
            slug: "real-time-collaboration-backend-communication-redis-worker-design".to_string(),
            title: "Real-Time Collaboration: Backend Communication POV & Redis Worker System Design"
                .to_string(),
            excerpt: "A deep dive into how real-time collaboration systems work under the hood, \
                      how Redis-backed queues reduce latency, and how worker architectures \
                      ensure fast and reliable data persistence."
                .to_string(),
            content: None,
            date: "Dec 2025".to_string(),
            read_time: "15 min".to_string(),
            tags: strings(&[
                "real-time",
                "redis",
                "architecture",
                "queues",
                "system-design",
                "backend",
            ]),
            featured: true,
        },
        BlogPost {
            slug: "how-cors-works-under-the-hood".to_string(),
            title: "How CORS Really Works Under the Hood: A Deep Dive for Modern Web Developers"
                .to_string(),
            excerpt: "Understand how CORS prevents security vulnerabilities, how browsers validate \
                      cross-origin requests, and what actually happens during preflight, headers, \
                      and server checks. A complete, human-readable guide for backend and \
                      frontend developers."
                .to_string(),
            content: Some(
                r#"
If you’ve been building modern web apps, whether a frontend in React or a backend in Node.js, FastAPI, or Go, you’ve definitely faced that infamous error: “CORS policy: Access to fetch at…”. For many developers, CORS feels like a random wall the browser throws up. But under the hood, CORS is actually a well-structured security system designed to protect users, not frustrate developers.
"#
                .to_string(),
            ),
            date: "Dec 2025".to_string(),
            read_time: "12 min".to_string(),
            tags: strings(&["CORS", "Web Security", "JavaScript", "Backend", "HTTP"]),
            featured: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{filter_posts, SectionParser};
    use std::fs;
    use tempfile::TempDir;

    fn post(slug: &str, date: &str) -> BlogPost {
        BlogPost {
            slug: slug.to_string(),
            title: slug.to_string(),
            excerpt: String::new(),
            content: None,
            date: date.to_string(),
            read_time: "5 min".to_string(),
            tags: Vec::new(),
            featured: false,
        }
    }

    #[test]
    fn test_builtin_has_unique_slugs() {
        let catalog = Catalog::builtin();
        let rebuilt = Catalog::new(catalog.projects().to_vec(), catalog.posts().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_builtin_matches_site_content() {
        let catalog = Catalog::builtin();

        let coderevu = catalog.project("coderevu-ai-pr-review").unwrap();
        let titles: Vec<String> = SectionParser::parse_opt(coderevu.long_description.as_deref())
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Key Challenges", "Key Learnings", "Uniqueness", "Impact"]);

        let cors = catalog.post("how-cors-works-under-the-hood").unwrap();
        assert!(cors.tags.contains(&"Web Security".to_string()));
        assert!(cors.body().is_some());

        let redis = filter_posts("redis", catalog.posts());
        assert_eq!(
            redis[0].slug,
            "real-time-collaboration-backend-communication-redis-worker-design"
        );
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let result = Catalog::new(
            Vec::new(),
            vec![post("redis-guide", "Dec 2025"), post("redis-guide", "Nov 2025")],
        );

        match result {
            Err(FolioError::DuplicateSlug(slug)) => assert_eq!(slug, "redis-guide"),
            _ => panic!("Expected DuplicateSlug error"),
        }
    }

    #[test]
    fn test_lookup_by_slug() {
        let catalog = Catalog::builtin();

        let project = catalog.project("blogify-distributed-system").unwrap();
        assert!(project.name.starts_with("Blogify"));

        assert!(matches!(
            catalog.project("missing"),
            Err(FolioError::ProjectNotFound(_))
        ));
        assert!(matches!(
            catalog.post("missing"),
            Err(FolioError::PostNotFound(_))
        ));
    }

    #[test]
    fn test_featured_projects() {
        let catalog = Catalog::builtin();
        let featured = catalog.featured_projects();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "coderevu-ai-pr-review");
    }

    #[test]
    fn test_posts_newest_first() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![
                post("old", "Jan 2024"),
                post("undated", "soon"),
                post("new-a", "Dec 2025"),
                post("new-b", "Dec 2025"),
            ],
        )
        .unwrap();

        let slugs: Vec<&str> = catalog
            .posts_newest_first()
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["new-a", "new-b", "old", "undated"]);
    }

    #[test]
    fn test_related_posts() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![
                post("a", "Dec 2025"),
                post("b", "Dec 2025"),
                post("c", "Dec 2025"),
                post("d", "Dec 2025"),
            ],
        )
        .unwrap();

        let related: Vec<&str> = catalog
            .related_posts("a")
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(related, vec!["b", "c"]);

        let related: Vec<&str> = catalog
            .related_posts("c")
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(related, vec!["a", "b"]);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("content.json");
        fs::write(
            &path,
            r#"{
                "posts": [
                    {"slug": "redis-guide", "title": "Redis Guide", "excerpt": "caching basics",
                     "date": "Dec 2025", "readTime": "8 min", "tags": ["redis"]}
                ]
            }"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.projects().is_empty());
        assert_eq!(catalog.posts().len(), 1);
        assert_eq!(catalog.post("redis-guide").unwrap().tags, vec!["redis".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Catalog::load(temp.path().join("nope.json"));
        assert!(matches!(result, Err(FolioError::Io(_))));
    }

    #[test]
    fn test_load_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("content.json");
        fs::write(&path, "{ posts: ").unwrap();

        assert!(matches!(Catalog::load(&path), Err(FolioError::Serialization(_))));
    }
}
