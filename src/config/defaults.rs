//! Built-in FreePromptHub tables. Any of them can be replaced from the TOML file.

use crate::domain::model::{AffiliateProduct, Banner, Category, PromptSpec};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

fn product(name: &str, price: &str, description: &str, link: &str) -> AffiliateProduct {
    AffiliateProduct {
        name: name.to_string(),
        price: price.to_string(),
        description: description.to_string(),
        link: link.to_string(),
    }
}

pub fn affiliates() -> BTreeMap<String, AffiliateProduct> {
    [
        (
            "billionaire-brain-wave",
            product(
                "Billionaire Brain Wave",
                "$42.32",
                "Wealth manifestation audio program using theta brainwave technology",
                "https://3811aatcrgoq3zex8i6zidmb77.hop.clickbank.net",
            ),
        ),
        (
            "mitolyn",
            product(
                "Mitolyn",
                "$180.63",
                "Advanced weight loss supplement targeting metabolism",
                "https://932bfl2gkkmw0w7cympk893t13.hop.clickbank.net",
            ),
        ),
        (
            "his-secret-obsession",
            product(
                "His Secret Obsession",
                "$48.85",
                "Relationship guide for women about understanding men",
                "https://fdd98gwkrduu9o55wkx6seqd2w.hop.clickbank.net",
            ),
        ),
        (
            "teds-woodworking",
            product(
                "TedsWoodworking",
                "$61.36",
                "16,000 woodworking plans and project database",
                "https://6c0e5c0dqlol4ufpg9yjr0xl50.hop.clickbank.net",
            ),
        ),
        (
            "the-genius-wave",
            product(
                "The Genius Wave",
                "$46.91",
                "Brain enhancement audio for focus and creativity",
                "https://0e8c9e1jnhrmcvc5tkmt63yr1r.hop.clickbank.net",
            ),
        ),
        (
            "sleeplean",
            product(
                "SleepLean",
                "$187.11",
                "Revolutionary weight loss while sleeping formula",
                "https://454019zerqrp6s2c-9sgr8eldl.hop.clickbank.net",
            ),
        ),
        (
            "hepatoburn",
            product(
                "HepatoBurn",
                "$167.00",
                "Liver health and metabolism booster supplement",
                "https://8352ejscimwv5p74jfehq03luy.hop.clickbank.net",
            ),
        ),
        (
            "neuro-energizer",
            product(
                "Neuro Energizer",
                "$51.39",
                "Brain enhancement and manifestation program",
                "https://9d76fn1hemvx3t0bresjkcmiki.hop.clickbank.net",
            ),
        ),
    ]
    .into_iter()
    .map(|(key, p)| (key.to_string(), p))
    .collect()
}

pub fn category_affiliates() -> BTreeMap<String, String> {
    [
        (Category::Money, "billionaire-brain-wave"),
        (Category::Business, "the-genius-wave"),
        (Category::Relationships, "his-secret-obsession"),
        (Category::Health, "mitolyn"),
        (Category::Everyday, "teds-woodworking"),
        (Category::Coding, "the-genius-wave"),
        (Category::Content, "the-genius-wave"),
        (Category::AiArt, "the-genius-wave"),
    ]
    .into_iter()
    .map(|(c, key)| (c.slug().to_string(), key.to_string()))
    .collect()
}

fn banner(heading: &str, body: &str, cta: &str, link: &str, gradient: &str, accent: &str) -> Banner {
    Banner {
        heading: heading.to_string(),
        body: body.to_string(),
        cta: cta.to_string(),
        link: link.to_string(),
        gradient: gradient.to_string(),
        accent: accent.to_string(),
        heading_color: "white".to_string(),
        button_background: "white".to_string(),
    }
}

pub fn banners() -> BTreeMap<String, Banner> {
    let mut banners = BTreeMap::new();

    banners.insert(
        Category::Business.slug().to_string(),
        banner(
            "🧠 Unlock Your Business Genius",
            "This prompt helps with business strategy. Want to think like a CEO? The Genius Wave uses neuroscience to unlock your brain's full potential - enhancing creativity, focus, and decision-making in just 7 minutes.",
            "Activate Your Genius Wave →",
            "https://0e8c9e1jnhrmcvc5tkmt63yr1r.hop.clickbank.net",
            "#4CAF50 0%, #45a049 100%",
            "#4CAF50",
        ),
    );
    banners.insert(
        Category::Money.slug().to_string(),
        banner(
            "💰 Ready for Wealth Breakthrough?",
            "This prompt helps manage money better. Want to actually attract wealth? The Billionaire Brain Wave uses neuroscience to rewire your mind for abundance in just 7 minutes a day.",
            "Activate Your Billionaire Brain →",
            "https://3811aatcrgoq3zex8i6zidmb77.hop.clickbank.net",
            "#00c853 0%, #00e676 100%",
            "#00c853",
        ),
    );
    banners.insert(
        Category::Health.slug().to_string(),
        banner(
            "😴 Lose Weight While You Sleep",
            "Health starts with quality sleep. SleepLean optimizes your metabolism during rest, helping you burn fat overnight while improving sleep quality. Wake up refreshed, energized, and closer to your health goals - all while you sleep.",
            "Start Losing Weight Tonight →",
            "https://454019zerqrp6s2c-9sgr8eldl.hop.clickbank.net",
            "#667eea 0%, #764ba2 100%",
            "#667eea",
        ),
    );
    banners.insert(
        Category::Relationships.slug().to_string(),
        banner(
            "💕 Unlock the Secret to Lasting Love",
            "Want to understand what makes relationships thrive? His Secret Obsession reveals the hidden desires that create deep emotional bonds. Learn the psychological triggers that make someone feel truly valued, understood, and irreplaceable in any relationship.",
            "Discover the Secret →",
            "https://fdd98gwkrduu9o55wkx6seqd2w.hop.clickbank.net",
            "#e91e63 0%, #c2185b 100%",
            "#e91e63",
        ),
    );
    banners.insert(
        Category::Everyday.slug().to_string(),
        banner(
            "🔨 Master DIY Projects with 16,000 Plans",
            "Want to build something amazing? TedsWoodworking gives you instant access to 16,000 professional woodworking plans. From simple weekend projects to elaborate furniture - complete blueprints, materials lists, and step-by-step instructions included.",
            "Get 16,000 Woodworking Plans →",
            "https://6c0e5c0dqlol4ufpg9yjr0xl50.hop.clickbank.net",
            "#8B4513 0%, #A0522D 100%",
            "#8B4513",
        ),
    );
    banners.insert(
        Category::Content.slug().to_string(),
        banner(
            "☕ Boost Your Content Creation Energy",
            "Creating great content requires focus and energy. Java Burn 2.0 is a tasteless powder that transforms your morning coffee into a metabolism-boosting powerhouse. Stay sharp, burn fat, and create content that converts - all from your daily coffee.",
            "Power Up Your Coffee →",
            "https://13f75e6ccbuz3u04ikq7xmpr5b.hop.clickbank.net",
            "#6B4423 0%, #8B5A2B 100%",
            "#6B4423",
        ),
    );

    let mut coding = banner(
        "⚡ Code at Peak Performance",
        "Long coding sessions demand sustained mental energy. Neuro Energizer uses scientifically-proven nootropics to enhance focus, memory, and cognitive speed - helping you debug faster, think clearer, and code better for hours without the crash.",
        "Unlock Your Coding Potential →",
        "https://9d76fn1hemvx3t0bresjkcmiki.hop.clickbank.net",
        "#1a1a2e 0%, #16213e 100%",
        "#1a1a2e",
    );
    coding.heading_color = "#00ff41".to_string();
    coding.button_background = "#00ff41".to_string();
    banners.insert(Category::Coding.slug().to_string(), coding);

    banners
}

/// Canonical hop link per category, used when retargeting stale ClickBank links.
pub fn category_links() -> BTreeMap<String, String> {
    [
        (Category::Business, "https://0e8c9e1jnhrmcvc5tkmt63yr1r.hop.clickbank.net"),
        (Category::Everyday, "https://6c0e5c0dqlol4ufpg9yjr0xl50.hop.clickbank.net"),
        (Category::Content, "https://13f75e6ccbuz3u04ikq7xmpr5b.hop.clickbank.net"),
        (Category::Coding, "https://9d76fn1hemvx3t0bresjkcmiki.hop.clickbank.net"),
        (Category::Relationships, "https://fdd98gwkrduu9o55wkx6seqd2w.hop.clickbank.net"),
        (Category::Health, "https://454019zerqrp6s2c-9sgr8eldl.hop.clickbank.net"),
        (Category::Money, "https://3811aatcrgoq3zex8i6zidmb77.hop.clickbank.net"),
    ]
    .into_iter()
    .map(|(c, link)| (c.slug().to_string(), link.to_string()))
    .collect()
}

/// Known-broken hop links and their replacements.
pub fn link_fixes() -> BTreeMap<String, String> {
    let teds = "https://6c0e5c0dqlol4ufpg9yjr0xl50.hop.clickbank.net";
    [
        ("https://7ca54ouacpux8odjs7-cmvvj54.hop.clickbank.net", teds),
        ("https://7ca54ouacpxk8odjs7-cmvvj54.hop.clickbank.net", teds),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

/// Related-prompt card titles that were published with `href="#"`.
pub fn related_links() -> BTreeMap<String, String> {
    [
        ("Pitch Deck Creator", "/prompts/business/business-plan.html"),
        ("Financial Model Builder", "/prompts/money/budget-optimizer.html"),
        ("Lead Generation System", "/prompts/business/cold-email.html"),
        ("Customer Journey Map", "/prompts/business/customer-survey.html"),
        ("Brand Voice Guide", "/prompts/content/copywriting.html"),
        ("Content Audit", "/prompts/content/blog-post.html"),
        ("Meeting Minutes", "/prompts/business/meeting-agenda.html"),
        ("Ad Copy Generator", "/prompts/content/copywriting.html"),
        ("Landing Page Copy", "/prompts/content/copywriting.html"),
        ("SEO Content Brief", "/prompts/content/blog-post.html"),
        ("Video Script Writer", "/prompts/content/youtube-script.html"),
        ("Press Release", "/prompts/content/blog-post.html"),
        ("Case Study Template", "/prompts/business/competitor-analysis.html"),
        ("API Documentation", "/prompts/coding/api-builder.html"),
        ("Database Designer", "/prompts/coding/sql-optimizer.html"),
        ("Docker Setup", "/prompts/coding/python-automation.html"),
        ("CI/CD Pipeline", "/prompts/coding/python-automation.html"),
        ("Security Audit", "/prompts/coding/code-reviewer.html"),
        ("Performance Optimizer", "/prompts/coding/code-reviewer.html"),
        ("Investment Tracker", "/prompts/money/investment-analyzer.html"),
        ("Tax Optimizer", "/prompts/money/budget-optimizer.html"),
        ("Retirement Planner", "/prompts/money/investment-analyzer.html"),
        ("Crypto Portfolio", "/prompts/money/investment-analyzer.html"),
        ("Real Estate Calculator", "/prompts/money/investment-analyzer.html"),
        ("Passive Income Ideas", "/prompts/money/side-income.html"),
        ("Dividend Strategy", "/prompts/money/investment-analyzer.html"),
        ("Stock Screener", "/prompts/money/investment-analyzer.html"),
        ("Dating First Message", "/prompts/relationships/dating-app-messages.html"),
        ("Long Distance Tips", "/prompts/relationships/couple-arguments.html"),
        ("Marriage Proposal", "/prompts/relationships/first-date-ideas.html"),
        ("Parenting Advice", "/prompts/relationships/family-drama.html"),
        ("Friend Reconnection", "/prompts/relationships/toxic-friend.html"),
        ("Conflict Resolution", "/prompts/relationships/couple-arguments.html"),
        ("Love Languages", "/prompts/relationships/couple-arguments.html"),
        ("Keto Meal Planner", "/prompts/health/meal-prep-beginner.html"),
        ("Marathon Training", "/prompts/health/home-workout.html"),
        ("Meditation Guide", "/prompts/health/mental-health.html"),
        ("Supplement Stack", "/prompts/health/energy-boost.html"),
        ("Recovery Plan", "/prompts/health/sleep-better.html"),
        ("Moving Abroad", "/prompts/everyday/moving-checklist.html"),
        ("Career Change", "/prompts/everyday/resume-fixer.html"),
        ("Time Management", "/prompts/everyday/clean-organize.html"),
        ("Study Schedule", "/prompts/everyday/meal-planner.html"),
    ]
    .into_iter()
    .map(|(title, path)| (title.to_string(), path.to_string()))
    .collect()
}

/// Relative asset and home links that break once pages move; applied longest first.
pub fn path_rewrites() -> BTreeMap<String, String> {
    [
        (r#"href="../../style.css""#, r#"href="/style.css""#),
        (r#"href="../style.css""#, r#"href="/style.css""#),
        (r#"src="../../script.js""#, r#"src="/script.js""#),
        (r#"src="../../search.js""#, r#"src="/search.js""#),
        (r#"src="../script.js""#, r#"src="/script.js""#),
        (r#"href="../../index.html""#, r#"href="/""#),
        (r#"href="../index.html""#, r#"href="/""#),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

pub fn stylesheets() -> Vec<String> {
    vec!["/style.css".to_string(), "/css/dark-mode.css".to_string()]
}

/// Unsubstantiated discount claims and their honest wording, applied in order.
pub fn claim_replacements() -> Vec<(String, String)> {
    [
        ("⚠️ 67% OFF TODAY - ", ""),
        ("67% OFF TODAY - ", ""),
        ("⚠️ 67% OFF - ", ""),
        ("67% OFF - ", ""),
        ("Get 67% Off Today Only →", "Learn More →"),
        ("67% off today only!", "Special offer available"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

/// Unverifiable marketing figures and the factual wording that replaces them.
pub fn marketing_claims() -> Vec<(String, String)> {
    [
        ("2X conversion rates, write $10K proposals, automate 80% of emails", "Improve conversion rates, write professional proposals, automate routine emails"),
        ("10X writing speed, viral hooks that work, LinkedIn posts that get 1000+ views", "Write faster, create engaging content, improve social media engagement"),
        ("Debug in minutes not hours, generate production-ready code, learn 3X faster", "Debug more efficiently, generate clean code, accelerate learning"),
        ("Replace $10,000 consultants with prompts that generated $50M+ in revenue for real businesses. Get the exact frameworks used by McKinsey consultants, Y Combinator startups, and Fortune 500 growth teams.", "Professional business frameworks and templates used by consultants and successful companies. Save time and money with proven strategies for growth and operations."),
        ("The same framework that grew a SaaS from $0 to $2M ARR. Includes channel prioritization, CAC/LTV models, and week-by-week execution.", "Comprehensive marketing framework with channel prioritization, customer acquisition models, and detailed execution plans."),
        ("Worth $15K agency fee", "Professional quality"),
        ("The template that raised $500K+ for 12 startups. Passes investor sniff test in 30 seconds. Includes financials that actually make sense.", "Professional business plan template with investor-ready format. Includes financial projections and clear value propositions."),
        ("Raised $6M total", "Investor-tested"),
        ("Write 10X faster. Rank #1 on Google 3X more often. Get 500% more engagement. These prompts generated 100M+ views and $2M+ in content revenue. Stop struggling with blank pages.", "Create content more efficiently with proven templates. Improve SEO rankings and engagement rates. Overcome writer's block with structured frameworks."),
        ("You are a world-class direct response copywriter who has generated over $100M in sales through your copy.", "You are an experienced copywriter specializing in persuasive and conversion-focused content."),
        ("You are a world-class sales copywriter who has written email campaigns generating over $50M in revenue with average open rates of 40% and reply rates of 15%.", "You are an experienced email marketing specialist who understands how to write engaging campaigns with strong open and response rates."),
        ("You are a Chief Marketing Officer with 20 years of experience growing businesses from startup to $100M+ in revenue.", "You are an experienced marketing strategist with deep knowledge of growth strategies across different business stages."),
        ("Save $2,400/year on groceries. Land jobs paying 30% more. Build emergency funds from nothing. These aren't generic tips - they're exact scripts that solved real problems for 10,000+ people just like you.", "Practical strategies to reduce grocery costs, improve job applications, and build savings. Specific scripts and templates based on real-world experience."),
        ("Beat 95% of applicants with ATS-optimized format + psychological triggers that make recruiters call. Average: 3X more interviews.", "ATS-optimized resume format with professional keywords that help you stand out. Improve your interview callback rate."),
        ("Users saved average $18,000/year using these prompts. Find hidden tax deductions worth $3,000+. Optimize investments for 2-3% higher returns. Build wealth 5X faster than traditional advice.", "Practical financial strategies to reduce expenses, find tax deductions, and optimize investments. Build wealth systematically with proven approaches."),
        ("Same analysis hedge funds pay $10K for. Reduce risk 40% while maintaining returns. Beat 92% of retail investors.", "Professional investment analysis framework. Balance risk and returns with systematic evaluation methods."),
        ("Worth $10K analysis", "Professional analysis"),
        ("Build 6-month emergency fund 3X faster. Automated savings plan that actually works. Sleep better knowing you're covered.", "Structured approach to building an emergency fund. Create automated savings habits for financial security."),
        ("3X faster savings", "Accelerated savings"),
        ("Build visible muscle in 20 min/day. The routine that got 500+ couch potatoes doing pushups. See results in 14 days guaranteed.", "Efficient 20-minute daily workout routine. Progressive exercises suitable for beginners. Track improvements over time."),
        ("Your members ask about nutrition 10x more than equipment. We can solve that problem and add $2,000/month to your revenue with zero effort from your staff.", "Your members frequently ask about nutrition. We can provide a solution that generates additional monthly revenue with minimal staff involvement."),
        ("Convenience items that cost 300% more than homemade", "Convenience items that cost significantly more than homemade alternatives"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

/// Site pages that carry the footer resource list, as in the navigation.
pub fn feed_pages() -> Vec<String> {
    let mut pages: Vec<String> = [
        "index.html",
        "about.html",
        "contact.html",
        "search/index.html",
        "privacy-policy.html",
        "terms-of-service.html",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect();
    pages.extend(Category::ALL.iter().map(|c| format!("prompts/{}/index.html", c.slug())));
    pages
}

const PROMPT_CATALOGUE: &str = include_str!("../../data/prompts.toml");

#[derive(Deserialize)]
struct Catalogue {
    prompts: Vec<PromptSpec>,
}

static CATALOGUE: Lazy<Vec<PromptSpec>> = Lazy::new(|| {
    toml::from_str::<Catalogue>(PROMPT_CATALOGUE)
        .expect("built-in prompt catalogue is valid TOML")
        .prompts
});

/// Every catalogue page with its text; `[[prompts]]` in the TOML file replaces it.
pub fn prompts() -> Vec<PromptSpec> {
    CATALOGUE.clone()
}
