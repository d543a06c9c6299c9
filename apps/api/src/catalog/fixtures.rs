//! Seed data the catalog starts from. Nothing here is persisted.

use crate::catalog::models::{
    Assessment, Candidate, HiringStage, Job, JobStatus, Question, QuestionType,
};

fn job(
    id: &str,
    title: &str,
    description: &str,
    status: JobStatus,
    tags: &[&str],
    order: u32,
) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        order,
        imported_at: None,
    }
}

fn candidate(id: &str, name: &str, stage: HiringStage, profile: &str, job_id: &str) -> Candidate {
    let handle = name.to_lowercase().replace(' ', ".");
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{handle}@example.com"),
        avatar_url: format!("https://i.pravatar.cc/150?u={handle}"),
        stage,
        profile: profile.to_string(),
        job_id: job_id.to_string(),
    }
}

pub fn seed_jobs() -> Vec<Job> {
    vec![
        job(
            "job-1",
            "Senior Frontend Engineer",
            "Own the design system and lead the migration of our dashboard to a component library.",
            JobStatus::Open,
            &["React", "TypeScript", "Design Systems"],
            1,
        ),
        job(
            "job-2",
            "Backend Engineer",
            "Build and operate the services behind our hiring pipeline, from ingestion to search.",
            JobStatus::Interviewing,
            &["Rust", "PostgreSQL", "Distributed Systems"],
            2,
        ),
        job(
            "job-3",
            "Product Designer",
            "Shape the recruiter experience end to end, from research through polished UI.",
            JobStatus::Open,
            &["Figma", "User Research", "Prototyping"],
            3,
        ),
        job(
            "job-4",
            "Data Analyst",
            "Turn funnel data into hiring insights for recruiters and leadership.",
            JobStatus::Closed,
            &["SQL", "Python", "Dashboards"],
            4,
        ),
    ]
}

pub fn seed_candidates() -> Vec<Candidate> {
    vec![
        candidate(
            "1",
            "Alex Johnson",
            HiringStage::Applied,
            "Senior frontend engineer with 7 years of React and TypeScript. Built a design system used by 40 engineers.",
            "job-1",
        ),
        candidate(
            "2",
            "Maria Garcia",
            HiringStage::Screening,
            "Backend engineer focused on Rust and PostgreSQL. Scaled an event ingestion service to 50k requests per second.",
            "job-2",
        ),
        candidate(
            "3",
            "Sam Lee",
            HiringStage::TechnicalInterview,
            "Full-stack developer, 4 years with Node.js and React. Comfortable owning features from database to UI.",
            "job-1",
        ),
        candidate(
            "4",
            "Priya Patel",
            HiringStage::Offer,
            "Product designer with a research background. Led the redesign of a B2B onboarding flow that doubled activation.",
            "job-3",
        ),
        candidate(
            "5",
            "Jordan Smith",
            HiringStage::Hired,
            "Data analyst fluent in SQL and Python. Built the weekly hiring funnel dashboards for a 300-person company.",
            "job-4",
        ),
        candidate(
            "6",
            "Chen Wei",
            HiringStage::Rejected,
            "Junior backend developer, 1 year of Go. Contributed to an internal CLI for deployment automation.",
            "job-2",
        ),
    ]
}

pub fn seed_assessments() -> Vec<Assessment> {
    vec![Assessment {
        id: "asmt-1".to_string(),
        title: "Frontend Fundamentals".to_string(),
        description: "Screening quiz for frontend roles.".to_string(),
        questions: vec![
            Question {
                id: "q-1".to_string(),
                question_type: QuestionType::MultipleChoice,
                text: "Which hook runs a side effect after render?".to_string(),
                options: Some(vec![
                    "useMemo".to_string(),
                    "useEffect".to_string(),
                    "useRef".to_string(),
                ]),
            },
            Question {
                id: "q-2".to_string(),
                question_type: QuestionType::Text,
                text: "Describe how you would structure a shared component library.".to_string(),
                options: None,
            },
            Question {
                id: "q-3".to_string(),
                question_type: QuestionType::Code,
                text: "Write a debounce function.".to_string(),
                options: None,
            },
        ],
    }]
}
