//! In-memory tables behind the mock backend.

use chrono::{DateTime, Duration as TimeDelta, Utc};
use quill_core::entities::{
    AbTest, AbTestVariant, AccountSettings, AppearanceSettings, Content, ContentTemplate,
    SavedProject, User,
};
use quill_core::enums::{AbTestStatus, Platform, ProjectStatus, TemplateCategory};
use quill_core::requests::{NewAbTest, NewContent, NewSavedProject, NewTemplate};

pub const MOCK_USERNAME: &str = "demo";
pub const MOCK_PASSWORD: &str = "password";
/// Tokens the mock backend issues, and the only ones it accepts.
pub const MOCK_TOKEN_PREFIX: &str = "mock-token-";

#[derive(Debug)]
pub(crate) struct MockState {
    pub(crate) user: User,
    pub(crate) password: String,
    pub(crate) ab_tests: Vec<AbTest>,
    pub(crate) saved_projects: Vec<SavedProject>,
    pub(crate) templates: Vec<ContentTemplate>,
    pub(crate) contents: Vec<Content>,
    pub(crate) account: AccountSettings,
    pub(crate) appearance: AppearanceSettings,
    next_id: u64,
}

impl MockState {
    /// Empty tables with only the demo account.
    pub(crate) fn empty() -> Self {
        let user = User {
            id: "user-1".into(),
            username: MOCK_USERNAME.into(),
            name: "Demo User".into(),
            email: "demo@quill.dev".into(),
            roles: vec!["admin".into()],
        };
        Self {
            account: AccountSettings {
                name: user.name.clone(),
                email: user.email.clone(),
                bio: String::new(),
                company: "Quill".into(),
            },
            user,
            password: MOCK_PASSWORD.into(),
            ab_tests: Vec::new(),
            saved_projects: Vec::new(),
            templates: Vec::new(),
            contents: Vec::new(),
            appearance: AppearanceSettings::default(),
            next_id: 1,
        }
    }

    /// Demo data so every screen has something to show.
    pub(crate) fn seeded(now: DateTime<Utc>) -> Self {
        let mut state = Self::empty();
        let week_ago = now - TimeDelta::days(7);

        state.ab_tests.push(AbTest {
            id: "ab-1".into(),
            title: "Homepage headline".into(),
            description: "Benefit-led versus feature-led hero copy".into(),
            content: "Write better content in half the time".into(),
            variants: vec![
                AbTestVariant {
                    id: "ab-1-v1".into(),
                    name: "Control".into(),
                    content: "Write better content in half the time".into(),
                    impressions: 1240,
                    conversions: 62,
                },
                AbTestVariant {
                    id: "ab-1-v2".into(),
                    name: "Variant B".into(),
                    content: "AI-assisted drafts, SEO checks, and scheduling".into(),
                    impressions: 1198,
                    conversions: 79,
                },
            ],
            status: AbTestStatus::Running,
            created_at: week_ago,
            completed_at: None,
        });

        state.saved_projects.push(SavedProject {
            id: "proj-1".into(),
            title: "Spring launch announcement".into(),
            content: "We are excited to announce our spring release.".into(),
            status: ProjectStatus::Draft,
            platform: Platform::Blog,
            keywords: vec!["launch".into(), "spring".into()],
            created_at: week_ago,
            updated_at: now,
        });
        state.saved_projects.push(SavedProject {
            id: "proj-2".into(),
            title: "Weekly tips thread".into(),
            content: "Five ways to repurpose a single blog post.".into(),
            status: ProjectStatus::Published,
            platform: Platform::Twitter,
            keywords: vec!["tips".into()],
            created_at: week_ago,
            updated_at: week_ago,
        });

        state.templates.extend([
            template("tpl-1", "How-to guide", TemplateCategory::BlogPost, Platform::Blog),
            template(
                "tpl-2",
                "Product teaser",
                TemplateCategory::SocialMedia,
                Platform::Twitter,
            ),
            template("tpl-3", "Newsletter", TemplateCategory::Email, Platform::Email),
        ]);

        state.contents.push(Content {
            id: "content-1".into(),
            title: "Getting started with Quill".into(),
            body: "Quill helps small teams plan, write, and measure content.".into(),
            status: ProjectStatus::Published,
            platform: Platform::Blog,
            keywords: vec!["content marketing".into()],
            created_at: week_ago,
            updated_at: week_ago,
        });

        state
    }

    pub(crate) fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id + 100);
        self.next_id += 1;
        id
    }

    pub(crate) fn insert_ab_test(&mut self, new: NewAbTest, now: DateTime<Utc>) -> AbTest {
        let id = self.next_id("ab");
        let variants = new
            .variants
            .into_iter()
            .enumerate()
            .map(|(i, v)| AbTestVariant {
                id: format!("{id}-v{}", i + 1),
                name: v.name,
                content: v.content,
                impressions: 0,
                conversions: 0,
            })
            .collect();
        let test = AbTest {
            id,
            title: new.title,
            description: new.description,
            content: new.content,
            variants,
            status: AbTestStatus::Draft,
            created_at: now,
            completed_at: None,
        };
        self.ab_tests.insert(0, test.clone());
        test
    }

    pub(crate) fn insert_saved_project(
        &mut self,
        new: NewSavedProject,
        now: DateTime<Utc>,
    ) -> SavedProject {
        let project = SavedProject {
            id: self.next_id("proj"),
            title: new.title,
            content: new.content,
            status: new.status,
            platform: new.platform,
            keywords: new.keywords,
            created_at: now,
            updated_at: now,
        };
        self.saved_projects.insert(0, project.clone());
        project
    }

    pub(crate) fn insert_template(&mut self, new: NewTemplate) -> ContentTemplate {
        let template = ContentTemplate {
            id: self.next_id("tpl"),
            name: new.name,
            description: new.description,
            content: new.content,
            category: new.category,
            platform: new.platform,
        };
        self.templates.push(template.clone());
        template
    }

    pub(crate) fn insert_content(&mut self, new: NewContent, now: DateTime<Utc>) -> Content {
        let content = Content {
            id: self.next_id("content"),
            title: new.title,
            body: new.body,
            status: ProjectStatus::Draft,
            platform: new.platform,
            keywords: new.keywords,
            created_at: now,
            updated_at: now,
        };
        self.contents.insert(0, content.clone());
        content
    }
}

fn template(
    id: &str,
    name: &str,
    category: TemplateCategory,
    platform: Platform,
) -> ContentTemplate {
    ContentTemplate {
        id: id.into(),
        name: name.into(),
        description: format!("Starter structure for a {} piece", category.as_str().replace('_', " ")),
        content: format!("# {name}\n\n## Hook\n\n## Body\n\n## Call to action\n"),
        category,
        platform,
    }
}
