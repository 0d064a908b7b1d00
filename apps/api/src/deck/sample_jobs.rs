//! Default job set used when hydrating a deck without an explicit job list.

use chrono::{DateTime, Duration, Utc};

use crate::models::{JobPosting, SalaryRange};

struct Seed {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    domain: &'static str,
    salary: (u32, u32),
    location: &'static str,
    tags: &'static [&'static str],
    description: &'static str,
    age_days: i64,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "job-1",
        title: "Senior Frontend Developer",
        company: "TechCorp",
        domain: "techcorp.com",
        salary: (120_000, 180_000),
        location: "San Francisco, CA",
        tags: &["React", "TypeScript", "Next.js", "Tailwind CSS"],
        description: "Join our team building the next generation of web applications with modern React tooling.",
        age_days: 0,
    },
    Seed {
        id: "job-2",
        title: "Full Stack Engineer",
        company: "StartupXYZ",
        domain: "startupxyz.com",
        salary: (90_000, 140_000),
        location: "Remote",
        tags: &["Node.js", "React", "PostgreSQL", "AWS"],
        description: "Fast-growing startup seeking a versatile full-stack engineer to help scale the platform.",
        age_days: 1,
    },
    Seed {
        id: "job-3",
        title: "Product Manager",
        company: "InnovateLab",
        domain: "innovatelab.com",
        salary: (110_000, 160_000),
        location: "New York, NY",
        tags: &["Product Strategy", "Agile", "User Research", "Analytics"],
        description: "Lead product development for a flagship SaaS platform alongside engineering and design.",
        age_days: 2,
    },
    Seed {
        id: "job-4",
        title: "DevOps Engineer",
        company: "CloudScale",
        domain: "cloudscale.com",
        salary: (100_000, 150_000),
        location: "Austin, TX",
        tags: &["Docker", "Kubernetes", "AWS", "Terraform"],
        description: "Build and maintain cloud infrastructure that scales to millions of users.",
        age_days: 3,
    },
    Seed {
        id: "job-5",
        title: "UX Designer",
        company: "DesignStudio",
        domain: "designstudio.com",
        salary: (80_000, 120_000),
        location: "Los Angeles, CA",
        tags: &["Figma", "User Research", "Prototyping", "Design Systems"],
        description: "Create intuitive experiences for mobile and web applications with cross-functional teams.",
        age_days: 4,
    },
    Seed {
        id: "job-6",
        title: "Data Scientist",
        company: "DataInsights",
        domain: "datainsights.com",
        salary: (130_000, 190_000),
        location: "Seattle, WA",
        tags: &["Python", "Machine Learning", "SQL", "Statistics"],
        description: "Apply analytics and machine learning to large datasets to drive business decisions.",
        age_days: 5,
    },
    Seed {
        id: "job-7",
        title: "Backend Developer",
        company: "APICorp",
        domain: "apicorp.com",
        salary: (95_000, 145_000),
        location: "Chicago, IL",
        tags: &["Python", "Django", "PostgreSQL", "Redis"],
        description: "Build scalable backend services and APIs on a microservices architecture.",
        age_days: 6,
    },
    Seed {
        id: "job-8",
        title: "Mobile Developer",
        company: "AppMakers",
        domain: "appmakers.com",
        salary: (85_000, 135_000),
        location: "Miami, FL",
        tags: &["React Native", "iOS", "Android", "TypeScript"],
        description: "Develop cross-platform mobile applications with React Native.",
        age_days: 7,
    },
    Seed {
        id: "job-9",
        title: "Security Engineer",
        company: "SecureTech",
        domain: "securetech.com",
        salary: (120_000, 180_000),
        location: "Denver, CO",
        tags: &["Cybersecurity", "Penetration Testing", "AWS", "Compliance"],
        description: "Protect systems and data from threats and run regular security assessments.",
        age_days: 8,
    },
    Seed {
        id: "job-10",
        title: "AI/ML Engineer",
        company: "AIFirst",
        domain: "aifirst.com",
        salary: (140_000, 200_000),
        location: "Boston, MA",
        tags: &["TensorFlow", "PyTorch", "Python", "Deep Learning"],
        description: "Develop machine learning models and neural networks for hard problems.",
        age_days: 9,
    },
    Seed {
        id: "job-11",
        title: "Sales Engineer",
        company: "SalesPro",
        domain: "salespro.com",
        salary: (90_000, 140_000),
        location: "Phoenix, AZ",
        tags: &["Sales", "Technical", "CRM", "Presentations"],
        description: "Bridge sales and engineering and help customers understand technical solutions.",
        age_days: 10,
    },
    Seed {
        id: "job-12",
        title: "QA Engineer",
        company: "QualityFirst",
        domain: "qualityfirst.com",
        salary: (70_000, 110_000),
        location: "Portland, OR",
        tags: &["Testing", "Automation", "Selenium", "Jest"],
        description: "Develop automated test suites and work with development teams on quality.",
        age_days: 11,
    },
];

/// Builds the default postings with ages relative to `now`.
pub fn default_jobs(now: DateTime<Utc>) -> Vec<JobPosting> {
    SEEDS
        .iter()
        .map(|seed| JobPosting {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            company: seed.company.to_string(),
            logo_url: format!("https://logo.clearbit.com/{}", seed.domain),
            salary_range: SalaryRange {
                min: seed.salary.0,
                max: seed.salary.1,
                currency: "USD".to_string(),
            },
            location: seed.location.to_string(),
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            description: seed.description.to_string(),
            video_url: None,
            created_at: now - Duration::days(seed.age_days),
        })
        .collect()
}
